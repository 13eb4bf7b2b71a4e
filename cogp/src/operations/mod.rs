//! Change operations using the plan-execute pattern.
//!
//! Operations are split into two phases:
//! 1. **Planning**: loads the path source and expands directories into the
//!    full target list, modifying nothing
//! 2. **Execution**: applies the changes to every target, or in dry-run mode
//!    only describes what would be done
//!
//! # Examples
//!
//! ```no_run
//! use cogp::apply::SystemFileOps;
//! use cogp::config::{ChangeSet, RunConfig};
//! use cogp::identity::SystemIdentityResolver;
//! use cogp::operations::{ChangePlan, PlanExecutor};
//! use cogp::source::PathSource;
//! use std::path::PathBuf;
//!
//! let changes = ChangeSet::resolve("root", "/", "750", &SystemIdentityResolver).unwrap();
//! let config = RunConfig::builder(changes)
//!     .recursive(true)
//!     .source(PathSource::Arguments(vec![PathBuf::from("/srv/data")]))
//!     .build();
//!
//! // Generate plan
//! let plan = ChangePlan::build(config).unwrap();
//!
//! // Execute plan
//! let result = PlanExecutor::new(&SystemFileOps).execute(&plan);
//! for failure in result.report.failures() {
//!     eprintln!("{failure}");
//! }
//! ```

pub mod executor;
pub mod plan;

pub use executor::{ExecutionResult, PlanExecutor};
pub use plan::{ChangePlan, PlanAction};

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
