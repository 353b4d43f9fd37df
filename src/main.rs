//! stockdeck: terminal dashboard for stock listings by industry group

#![allow(clippy::needless_pass_by_value)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use stockdeck::cli::{self, BrowseConfig, GroupsConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stockdeck")]
#[command(version)]
#[command(about = "Browse stock listings by industry group", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Query matched no companies

EXAMPLES:
    # Browse a listing interactively
    stockdeck browse companies.json

    # Use a custom industry catalog
    stockdeck browse companies.csv --catalog gics.yaml

    # Group summary for scripts
    stockdeck groups companies.json --query bank --json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `browse` subcommand
#[derive(Parser)]
struct BrowseArgs {
    /// Path to the listing file (JSON or CSV, format auto-detected)
    listing: PathBuf,

    /// Industry catalog YAML (defaults to the built-in ASX groups)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Theme (dark, light, high-contrast)
    #[arg(long)]
    theme: Option<String>,

    /// Directory for watchlist exports (defaults to the current directory)
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

/// Arguments for the `groups` subcommand
#[derive(Parser)]
struct GroupsArgs {
    /// Path to the listing file (JSON or CSV, format auto-detected)
    listing: PathBuf,

    /// Industry catalog YAML (defaults to the built-in ASX groups)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Filter companies before grouping
    #[arg(short, long)]
    query: Option<String>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse a listing in the interactive dashboard
    Browse(BrowseArgs),

    /// Print the industry group summary
    Groups(GroupsArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Browse(args) => {
            let config = BrowseConfig {
                listing_path: args.listing,
                catalog_path: args.catalog,
                theme: args.theme,
                export_dir: args.export_dir,
                config_path: cli.config,
            };
            let exit_code = cli::run_browse(config)?;
            if exit_code != cli::exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
        }
        Commands::Groups(args) => {
            let config = GroupsConfig {
                listing_path: args.listing,
                catalog_path: args.catalog,
                query: args.query,
                json: args.json,
                config_path: cli.config,
            };
            let exit_code = cli::run_groups(config)?;
            if exit_code != cli::exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}
