//! Build script for cogp-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs and
/// src/commands/apply.rs.
fn build_cli() -> Command {
    Command::new("cogp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Change owner, group and permissions of paths, optionally recursively")
        .long_about(
            "Change the owner, group and permission bits of paths given as arguments, \
             in a NUL-separated list file, or on stdin. With -r, directories are \
             expanded into all their descendants; symlinks below the top-level paths \
             are ignored and children are changed before their parent directories. \
             Use \"/\" for the owner, group or permissions to leave it unchanged.",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress per-path failure records")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Recurse into directories given as paths")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Print the changes that would be made without making them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .value_name("LISTFILE")
                .help("Read NUL-terminated paths from this file"),
        )
        .arg(
            Arg::new("owner")
                .value_name("OWNER")
                .required(true)
                .help("New owner name, or \"/\" to keep"),
        )
        .arg(
            Arg::new("group")
                .value_name("GROUP")
                .required(true)
                .help("New group name, or \"/\" to keep"),
        )
        .arg(
            Arg::new("permissions")
                .value_name("PERMISSIONS")
                .required(true)
                .help("New permissions (rwxrwxrwx, 000-777 or 0000-7777), or \"/\" to keep"),
        )
        .arg(
            Arg::new("paths")
                .value_name("PATH")
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .help("Paths to change (read from stdin when neither paths nor --list are given)"),
        )
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("cogp.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
