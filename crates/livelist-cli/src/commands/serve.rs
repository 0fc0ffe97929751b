//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use livelist_core::{ListStore, MemoryStore, SqliteStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "LIVELIST_PORT", default_value = "8080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "LIVELIST_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Keep the list in memory instead of the database file
    #[arg(long)]
    pub memory: bool,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file used with --log
    #[arg(long, default_value = "livelist.log")]
    pub log_file: PathBuf,
}

pub async fn execute(args: ServeArgs, db_path: &Path) -> Result<()> {
    let (store, backend): (Arc<dyn ListStore>, String) = if args.memory {
        (Arc::new(MemoryStore::new()), "in-memory".to_string())
    } else {
        (
            Arc::new(SqliteStore::open(db_path)?),
            db_path.display().to_string(),
        )
    };

    println!();
    println!("  {} {}", "livelist".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}       http://{}:{}", "List".green(), args.host, args.port);
    println!("  {}        http://{}:{}/api/items", "API".green(), args.host, args.port);
    println!("  {}  ws://{}:{}/ws", "WebSocket".green(), args.host, args.port);
    println!("  {}    {}", "Storage".green(), backend);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    livelist_web::run_server(store, &args.host, args.port).await?;

    Ok(())
}
