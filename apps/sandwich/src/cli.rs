//! # CLI
//!
//! clap definitions and the `cmd_*` functions behind each subcommand.
//!
//! The command functions take plain arguments so tests can call them
//! without going through argument parsing.

use crate::api;
use clap::{Parser, Subcommand};
use sandwich_core::Store;
use std::error::Error;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Result of a CLI command.
pub type CliResult = Result<(), Box<dyn Error>>;

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "sandwich", version, about = "Sandwich shop API server and tools")]
pub struct Cli {
    /// Path to the redb database file.
    #[arg(long, global = true, env = "SANDWICH_DB", default_value = "sandwich.redb")]
    pub db: PathBuf,

    /// Log filter, e.g. `info` or `sandwich_core=debug`.
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an empty database.
    Init {
        /// Overwrite an existing database file.
        #[arg(long)]
        force: bool,
    },

    /// Load the sample inventory, menu, recipes and promo codes.
    Seed,

    /// Show row counts per table.
    Status {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run the HTTP API.
    Serve {
        #[arg(long, env = "SANDWICH_HOST", default_value = "127.0.0.1")]
        host: IpAddr,

        #[arg(long, env = "SANDWICH_PORT", default_value_t = 8000)]
        port: u16,
    },
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> CliResult {
    match cli.command {
        Commands::Init { force } => cmd_init(&cli.db, force),
        Commands::Seed => cmd_seed(&cli.db),
        Commands::Status { json } => cmd_status(&cli.db, json),
        Commands::Serve { host, port } => cmd_serve(&cli.db, SocketAddr::new(host, port)).await,
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Open an existing database, refusing to create one implicitly.
fn open_existing(db_path: &Path) -> Result<Store, Box<dyn Error>> {
    if !db_path.exists() {
        return Err(format!(
            "Database not found at {}. Run `sandwich init` first.",
            db_path.display()
        )
        .into());
    }
    Ok(Store::open(db_path)?)
}

pub fn cmd_init(db_path: &Path, force: bool) -> CliResult {
    if db_path.exists() {
        if !force {
            return Err(format!(
                "Database already exists at {}. Use --force to overwrite.",
                db_path.display()
            )
            .into());
        }
        std::fs::remove_file(db_path)?;
        tracing::info!(path = %db_path.display(), "removed existing database");
    }

    Store::open(db_path)?;
    println!("Initialized database at {}", db_path.display());
    Ok(())
}

pub fn cmd_seed(db_path: &Path) -> CliResult {
    let store = open_existing(db_path)?;
    let summary = store.seed()?;
    println!(
        "Seeded {} resources, {} sandwiches, {} recipes and {} promotional codes",
        summary.resources, summary.sandwiches, summary.recipes, summary.promotional_codes
    );
    Ok(())
}

pub fn cmd_status(db_path: &Path, json: bool) -> CliResult {
    let store = open_existing(db_path)?;
    let status = store.status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("Database: {}", db_path.display());
    let rows = [
        ("resources", status.resources),
        ("sandwiches", status.sandwiches),
        ("recipes", status.recipes),
        ("orders", status.orders),
        ("order_details", status.order_details),
        ("payments", status.payments),
        ("promotional_codes", status.promotional_codes),
        ("reviews", status.reviews),
    ];
    for (table, count) in rows {
        println!("  {table:<18} {count}");
    }
    println!("  {:<18} {}", "total", status.total());
    Ok(())
}

pub async fn cmd_serve(db_path: &Path, addr: SocketAddr) -> CliResult {
    let store = Store::open(db_path)?;
    tracing::info!(db = %db_path.display(), "opened database");
    api::serve(store, addr).await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn explicit_flags_parse() {
        let cli = Cli::try_parse_from([
            "sandwich", "--db", "shop.redb", "serve", "--host", "0.0.0.0", "--port", "9000",
        ])
        .unwrap();
        assert_eq!(cli.db, PathBuf::from("shop.redb"));
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.to_string(), "0.0.0.0");
                assert_eq!(port, 9000);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn status_json_flag() {
        let cli = Cli::try_parse_from(["sandwich", "status", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Status { json: true }));
    }
}
