//! formdetails CLI: the `formdetails` command.

mod cli;
mod commands;
mod config;
mod logging;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Merge { run, append_file } => commands::merge::run(run, append_file),
        Commands::Normalize { run } => commands::normalize::run(run),
        Commands::All { run, append_file } => commands::all::run(run, append_file),
    }
}
