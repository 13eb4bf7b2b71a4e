//! CLI command implementations.
//!
//! - `apply`: validate the arguments, build the change plan and run it

pub mod apply;

pub use apply::ApplyCommand;
