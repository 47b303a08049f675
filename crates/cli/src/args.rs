// crates/cli/src/args.rs
use crate::options::ReportFormat;
use crate::parsers::JobArg;
use clap::{ArgAction, Parser, ValueHint};
use std::path::PathBuf;

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "code_snapshot",
    version = crate::VERSION,
    about = "Concatenate a project's source files into one annotated text file per tree",
    long_about = "Walks each ROOT directory, keeps files whose name ends with one of the \
                  accepted suffixes and writes them, each preceded by a path banner and \
                  followed by an 80-column rule, into OUTPUT.\n\n\
                  Without --job or --config, snapshots backend/src into backend.txt and \
                  frontend/src into frontend.txt."
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Tree to snapshot as [NAME:]ROOT=OUTPUT (repeatable)
    #[arg(short, long = "job", value_name = "[NAME:]ROOT=OUTPUT", help_heading = "Jobs")]
    pub jobs: Vec<JobArg>,

    /// JSON or YAML manifest listing jobs
    #[arg(short, long, value_hint = ValueHint::FilePath, help_heading = "Jobs")]
    pub config: Option<PathBuf>,

    /// Accepted filename suffixes, replacing the defaults (e.g. --ext ts,tsx --ext .css)
    #[arg(short, long, value_delimiter = ',', help_heading = "Filter")]
    pub ext: Vec<String>,

    /// Gitignore-style globs to leave out (e.g. node_modules,dist)
    #[arg(long, value_delimiter = ',', help_heading = "Filter")]
    pub exclude: Vec<String>,

    /// Follow symbolic links to directories
    #[arg(long, help_heading = "Walk")]
    pub follow: bool,

    /// Skip dot-files and dot-directories
    #[arg(long, help_heading = "Walk")]
    pub no_hidden: bool,

    /// Honour .gitignore files
    #[arg(long, help_heading = "Walk")]
    pub git_ignore: bool,

    /// Maximum directory depth
    #[arg(long, help_heading = "Walk")]
    pub max_depth: Option<usize>,

    /// Abort a job on the first unreadable file
    #[arg(long, help_heading = "Behavior")]
    pub strict: bool,

    /// Print a summary of every job at the end
    #[arg(long, value_enum, help_heading = "Output")]
    pub report: Option<ReportFormat>,

    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, help_heading = "Output")]
    pub verbose: u8,

    /// Only errors on stderr
    #[arg(short, long, conflicts_with = "verbose", help_heading = "Output")]
    pub quiet: bool,
}
