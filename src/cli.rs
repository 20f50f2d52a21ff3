use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// docpub - publish generated documentation to a gh-pages branch
#[derive(Parser, Debug)]
#[command(name = "docpub")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "A deploy switches branches in the working tree. Do not run two deploys, or any other git command, on the same repository at once."
)]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Where configuration comes from
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Configuration file (default: docpub.toml in the docs directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Docs project directory
    #[arg(long)]
    pub docs_dir: Option<PathBuf>,

    /// Root of the published tree
    #[arg(long)]
    pub dst_dir: Option<PathBuf>,

    /// Temp staging directory
    #[arg(long)]
    pub tmp_dir: Option<PathBuf>,

    /// Remote to push to
    #[arg(long)]
    pub remote: Option<String>,

    /// Publish branch
    #[arg(long)]
    pub branch: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the docs and publish them to the publish branch
    Deploy {
        #[command(flatten)]
        config: ConfigArgs,

        /// Show the steps and validate the repository without changing anything
        #[arg(long)]
        dry_run: bool,

        /// Commit on the publish branch but do not push
        #[arg(long)]
        no_push: bool,

        /// Deploy even if tracked files have uncommitted changes
        #[arg(long)]
        allow_dirty: bool,
    },

    /// Check that a deploy can run
    Check {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        config: ConfigArgs,
    },
}
