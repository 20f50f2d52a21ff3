//! docpub CLI - publish generated documentation to a gh-pages branch
//!
//! Usage: docpub <COMMAND>
//!
//! Commands:
//!   deploy  Rebuild the docs and publish them
//!   check   Check that a deploy can run
//!   config  Print the effective configuration

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = interrupted.clone();
        // Child processes still receive the signal; the pipeline stops
        // before its next step and restores the branch.
        let _ = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst));
    }

    if let Err(err) = run(cli, interrupted) {
        ui::error::print_error(&err, json);
        std::process::exit(1);
    }
}

fn run(cli: Cli, interrupted: Arc<AtomicBool>) -> Result<()> {
    let Cli {
        json,
        color,
        verbose,
        command,
    } = cli;

    match command {
        Commands::Deploy {
            config,
            dry_run,
            no_push,
            allow_dirty,
        } => commands::deploy::cmd_deploy(
            &config,
            commands::deploy::DeployFlags {
                dry_run,
                no_push,
                allow_dirty,
            },
            json,
            verbose,
            color,
            interrupted,
        ),
        Commands::Check { config } => commands::check::cmd_check(&config, json, verbose, color),
        Commands::Config { config } => commands::config::cmd_config(&config, json),
    }
}
