//! Library exports for cogp-cli.
//!
//! This module exports the CLI structure so it can be rendered into
//! documentation and exercised by tests.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
