//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod item;
pub mod serve;

/// Livelist - a shared task list with live refresh
#[derive(Parser)]
#[command(name = "livelist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the SQLite database file
    #[arg(long, global = true, env = "LIVELIST_DB", default_value = "livelist.db")]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(serve::ServeArgs),

    /// Edit the list directly in the database
    #[command(subcommand)]
    Item(item::ItemCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args, &self.db).await,
            Commands::Item(cmd) => item::execute(cmd, &self.db).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_memory() {
        let cli = Cli::try_parse_from(["livelist", "serve", "--memory", "--port", "9000"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert!(args.memory);
                assert_eq!(args.port, 9000);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_item_rename() {
        let cli = Cli::try_parse_from([
            "livelist", "--db", "/tmp/x.db", "item", "rename", "3", "New title",
        ])
        .unwrap();
        assert_eq!(cli.db, PathBuf::from("/tmp/x.db"));
        assert!(matches!(
            cli.command,
            Commands::Item(item::ItemCommands::Rename { id: 3, .. })
        ));
    }
}
