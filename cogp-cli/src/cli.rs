//! CLI structure and argument definitions.
//!
//! `cogp` has a single mode of operation, so instead of subcommands the
//! top-level parser carries the global options and flattens in the
//! [`ApplyCommand`] arguments.

use crate::commands::ApplyCommand;
use clap::Parser;

/// Usage examples and notes shown after the option list in `--help`.
pub const AFTER_HELP: &str = "\
Examples:
  cogp user group rwxr--r-- <path1> <path2> ...
  cogp user group 744 <path1> <path2> ...
  cogp user group 700 --list <path_to_list>
  cogp -r user group 0600 <path1> <path2> ...
  some_program | cogp user group 644

Notes:
  Every argument after the permissions is taken as a path, even if it
  starts with '-'. Options other than --list go before the owner.
  Paths in a list file or on stdin must be NUL-terminated.
  Symlinks below the top-level paths are ignored.
  If none of the top-level paths is a directory, -r has no effect.

  Permissions can be given as rwxrwxrwx (with s/S in the owner and group
  execute positions and t/T in the other execute position), as three octal
  digits 000-777, or as four octal digits 0000-7777.

  \"/\" leaves the owner, group or permissions unchanged:
    cogp user / /
    cogp / / 700
    cogp -r user / /

  Everything written to stderr, including --verbose output, is split into
  records terminated by the ASCII record separator (0x1E).";

/// Change owner, group and permissions of paths, optionally recursively.
#[derive(Parser)]
#[command(name = "cogp")]
#[command(
    version,
    about = "Change owner, group and permissions of paths, optionally recursively",
    long_about = None,
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress per-path failure records
    #[arg(long)]
    pub quiet: bool,

    #[command(flatten)]
    pub apply: ApplyCommand,
}
