//! CLI subcommands.

pub mod config;
pub mod expenses;
pub mod parse;
