//! Apply command implementation.
//!
//! This module implements the one thing `cogp` does: resolve the owner,
//! group and permissions, load and expand the paths, then change them.

use crate::error::CliError;
use crate::utils::{write_failures, GlobalOptions};
use clap::Args;
use cogp::{
    ChangePlan, ChangeSet, PathSource, PlanExecutor, RunConfig, SystemFileOps,
    SystemIdentityResolver,
};
use std::io::{self, Write};
use std::path::PathBuf;

/// Arguments describing one change run.
#[derive(Args)]
pub struct ApplyCommand {
    /// Recurse into directories given as paths
    #[arg(short, long)]
    pub recursive: bool,

    /// Print the changes that would be made without making them
    #[arg(long)]
    pub dry_run: bool,

    /// Read NUL-terminated paths from this file
    #[arg(long, value_name = "LISTFILE", conflicts_with = "paths")]
    pub list: Option<PathBuf>,

    /// New owner name, or "/" to keep
    #[arg(value_name = "OWNER")]
    pub owner: String,

    /// New group name, or "/" to keep
    #[arg(value_name = "GROUP")]
    pub group: String,

    /// New permissions, or "/" to keep
    #[arg(value_name = "PERMISSIONS", allow_hyphen_values = true)]
    pub permissions: String,

    /// Paths to change, taken verbatim (read from stdin when neither paths
    /// nor --list are given)
    #[arg(value_name = "PATH", trailing_var_arg = true, allow_hyphen_values = true)]
    pub paths: Vec<PathBuf>,
}

/// Spelling of the list option when it reaches the path arguments.
const LIST_FLAG: &str = "--list";

impl ApplyCommand {
    /// Where the initial paths come from.
    ///
    /// Everything after the permissions is a path, except that a leading
    /// `--list` must be followed by exactly one list file.
    pub(crate) fn source(&self) -> Result<PathSource, CliError> {
        if let Some(list) = &self.list {
            return Ok(PathSource::ListFile(list.clone()));
        }

        match self.paths.split_first() {
            None => Ok(PathSource::Stdin),
            Some((first, rest)) if first.as_os_str() == LIST_FLAG => match rest {
                [list] => Ok(PathSource::ListFile(list.clone())),
                [] => Err(CliError::InvalidArguments(
                    "Missing path after \"--list\".".to_string(),
                )),
                _ => Err(CliError::InvalidArguments(
                    "\"--list\" can only be followed by a single argument (path).".to_string(),
                )),
            },
            Some(_) => Ok(PathSource::Arguments(self.paths.clone())),
        }
    }

    /// Execute the apply command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let logger = &global.logger;

        // 1. Validate owner, group and permissions
        let changes = ChangeSet::resolve(
            &self.owner,
            &self.group,
            &self.permissions,
            &SystemIdentityResolver,
        )?;

        // 2. Build configuration
        let source = self.source()?;
        logger.debug(&format!("reading paths from {}", source.describe()));
        let config = RunConfig::builder(changes)
            .source(source)
            .recursive(self.recursive)
            .dry_run(self.dry_run)
            .build();
        let dry_run = config.dry_run;

        // 3. Load and expand the paths
        let plan = ChangePlan::build(config)?;

        // 4. Execute
        let mut executor = PlanExecutor::new(&SystemFileOps);
        if dry_run {
            executor = executor.dry_run();
        }
        let result = executor.execute(&plan);

        // 5. Report
        if result.dry_run {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for line in &result.planned {
                writeln!(out, "{line}")?;
            }
            out.flush()?;
        }

        if logger.shows_failures() {
            write_failures(plan.traversal_failures.iter().chain(result.report.failures()))?;
        }

        logger.info(&format!(
            "{} target(s), {} operation(s) attempted, {} failed",
            plan.len(),
            result.report.attempted(),
            plan.traversal_failures.len() + result.failed()
        ));

        Ok(())
    }
}
