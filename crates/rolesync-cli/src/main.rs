//! Rolesync CLI
//!
//! The command-line interface for reconciling serialized security roles
//! into a live role store.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} Rolesync CLI", "rolesync".green().bold());
            println!();
            println!("Run {} for available commands.", "rolesync --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync {
            source,
            store,
            config,
            dry_run,
            json,
        } => commands::run_sync(&source, &store, config.as_deref(), dry_run, json),
        Commands::Check {
            source,
            store,
            config,
            json,
        } => {
            let drifted = commands::run_check(&source, &store, config.as_deref(), json)?;
            if drifted {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::List { store } => commands::run_list(&store),
    }
}
