#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # cogp
//!
//! A library for changing the owner, group and permission bits of many
//! paths at once, optionally recursing into directories.
//!
//! A run has three stages:
//!
//! 1. **Validation**: [`ChangeSet::resolve`] turns the owner, group and
//!    permissions arguments into ids and a [`Mode`], failing before anything
//!    else happens
//! 2. **Planning**: [`ChangePlan::build`] loads the initial paths from a
//!    [`PathSource`] and, if asked, expands directories with
//!    [`expand`](traversal::expand)
//! 3. **Execution**: [`PlanExecutor`] applies the changes children-first,
//!    collecting a [`Failure`] for every operation that did not succeed
//!
//! Only stage 1 and loading the path list can fail the run as a whole.
//!
//! ## Examples
//!
//! ```
//! use cogp::{Mode, ModeChange};
//!
//! let change = ModeChange::parse("rwsr-x---").unwrap();
//! assert_eq!(change.mode(), Mode::from_bits(0o4750));
//!
//! assert!(ModeChange::parse("/").unwrap().is_unchanged());
//! assert!(ModeChange::parse("rwx").is_err());
//! ```

pub mod apply;
pub mod config;
pub mod error;
pub mod identity;
pub mod logging;
pub mod mode;
pub mod operations;
pub mod report;
pub mod source;
pub mod traversal;

// Re-export key types at crate root for convenience
pub use apply::{apply, ApplyReport, FileOps, SystemFileOps};
pub use config::{ChangeSet, RunConfig, RunConfigBuilder};
pub use error::{Error, Result};
pub use identity::{IdentityResolver, SystemIdentityResolver};
pub use logging::{init_logger, LogLevel, Logger};
pub use mode::{Mode, ModeChange};
pub use operations::{ChangePlan, ExecutionResult, PlanAction, PlanExecutor};
pub use report::{FailedOperation, Failure, RECORD_SEPARATOR};
pub use source::PathSource;
pub use traversal::{expand, EntryKind, Expansion};
