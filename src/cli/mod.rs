//! Command-line interface for hook-normalizer.
//!
//! Lets a webhook document be normalized from a file or stdin, and the
//! catalog operations be run by hand, without the surrounding server.

mod commands;

pub use commands::{Cli, Commands, run_command};
