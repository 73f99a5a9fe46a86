//! Command-line interface for wordbench
//!
//! clap parses the arguments, each subcommand lives in its own module under
//! `commands`, and `output` handles console formatting.

pub mod commands;
pub mod output;

pub use commands::Cli;
pub use output::Output;
