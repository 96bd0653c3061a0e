//! Command-line argument parsing
//!
//! Supports:
//! - Unified diff of two files (text or JSON)
//! - Three-way merge with conflict markers
//! - Search and replace in a file

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::search::SearchOptions;

/// Diff, merge and search text files
#[derive(Parser, Debug)]
#[command(name = "strata", version, about = "Diff, merge and search text files")]
pub struct CliArgs {
    /// Read configuration from this file instead of the user config
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show line differences between two files as a unified diff
    Diff {
        old: PathBuf,
        new: PathBuf,
        /// Print hunks as JSON instead of a unified diff
        #[arg(long)]
        json: bool,
    },
    /// Merge OURS and THEIRS against their common BASE
    Merge {
        base: PathBuf,
        ours: PathBuf,
        theirs: PathBuf,
        /// Write the merged text here instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// List every match of PATTERN in FILE
    Search {
        file: PathBuf,
        pattern: String,
        #[command(flatten)]
        flags: MatchFlags,
        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replace every match of PATTERN in FILE with REPLACEMENT
    Replace {
        file: PathBuf,
        pattern: String,
        /// Replacement text; with --regex, `$1` / `${name}` expand groups
        replacement: String,
        #[command(flatten)]
        flags: MatchFlags,
        /// Rewrite FILE instead of printing the result
        #[arg(long)]
        in_place: bool,
    },
}

/// Flags that override the configured search options
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct MatchFlags {
    /// Treat PATTERN as a regular expression
    #[arg(short = 'e', long)]
    pub regex: bool,

    /// Match without regard to case
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Only match whole words
    #[arg(short = 'w', long)]
    pub whole_word: bool,
}

impl MatchFlags {
    /// Apply these flags on top of configured defaults. Flags only ever
    /// turn options on; an unset flag keeps the configured value.
    pub fn apply(&self, base: SearchOptions) -> SearchOptions {
        SearchOptions {
            case_sensitive: base.case_sensitive && !self.ignore_case,
            regex: base.regex || self.regex,
            whole_word: base.whole_word || self.whole_word,
            wrap_around: base.wrap_around,
        }
    }
}
