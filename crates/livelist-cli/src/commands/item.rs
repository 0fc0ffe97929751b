//! Direct list editing commands.
//!
//! These write to the database file and then ask a running server, if any,
//! to pulse its viewers.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use livelist_core::notifier::WebNotifier;
use livelist_core::{ItemId, ListStore, SqliteStore};
use std::path::Path;

use crate::output;

#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add a new item
    Add {
        /// Item title
        title: String,
    },

    /// List items, newest first
    List {
        /// Only items not yet done
        #[arg(long, conflicts_with = "completed")]
        open: bool,

        /// Only done items
        #[arg(long)]
        completed: bool,
    },

    /// Show one item
    Show {
        /// Item ID
        id: ItemId,
    },

    /// Flip an item's done flag
    Toggle {
        /// Item ID
        id: ItemId,
    },

    /// Rename an item
    Rename {
        /// Item ID
        id: ItemId,

        /// New title
        title: String,
    },

    /// Delete an item
    Delete {
        /// Item ID
        id: ItemId,
    },

    /// Delete every item
    Clear,

    /// Delete every done item
    ClearCompleted,
}

pub async fn execute(cmd: ItemCommands, db_path: &Path) -> Result<()> {
    let store = SqliteStore::open(db_path)?;

    match cmd {
        ItemCommands::Add { title } => {
            let item = store.create(&title)?;
            println!(
                "{} Added item: {} ({})",
                "✓".green().bold(),
                item.title.cyan(),
                format!("#{}", item.id).dimmed()
            );
            notify().await;
        }

        ItemCommands::List { open, completed } => {
            let items = if open {
                store.open_items()?
            } else if completed {
                store.completed_items()?
            } else {
                store.list()?
            };
            output::print_items_table(&items);
        }

        ItemCommands::Show { id } => {
            let item = store.find(id)?;
            output::print_item(&item);
        }

        ItemCommands::Toggle { id } => {
            store.toggle(id)?;
            println!("{} Toggled item {}", "✓".green().bold(), format!("#{}", id).dimmed());
            notify().await;
        }

        ItemCommands::Rename { id, title } => {
            store.rename(id, &title)?;
            println!(
                "{} Renamed item {} to {}",
                "✓".green().bold(),
                format!("#{}", id).dimmed(),
                title.cyan()
            );
            notify().await;
        }

        ItemCommands::Delete { id } => {
            store.delete(id)?;
            println!("{} Deleted item {}", "✓".green().bold(), format!("#{}", id).dimmed());
            notify().await;
        }

        ItemCommands::Clear => {
            store.clear()?;
            println!("{} Cleared all items", "✓".green().bold());
            notify().await;
        }

        ItemCommands::ClearCompleted => {
            store.clear_completed()?;
            println!("{} Cleared completed items", "✓".green().bold());
            notify().await;
        }
    }

    Ok(())
}

/// Pulse viewers of a running server; silent when none is running.
async fn notify() {
    let notifier = WebNotifier::new();
    if notifier.notify_refresh().await {
        println!("  {}", format!("live viewers refreshed via {}", notifier.base_url()).dimmed());
    }
}
