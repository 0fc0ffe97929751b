//! Terminal output formatting.

use colored::Colorize;
use livelist_core::Item;

/// Print items as a table.
pub fn print_items_table(items: &[Item]) {
    if items.is_empty() {
        println!("{}", "No items found.".dimmed());
        return;
    }

    println!("{:<8} {:<6} {}", "ID", "Done", "Title");
    println!("{}", "─".repeat(60));

    for item in items {
        let title = truncate(&item.title, 44);
        let (done, title) = if item.done {
            (format!("{:<6}", "[x]").green(), title.dimmed())
        } else {
            (format!("{:<6}", "[ ]").normal(), title.normal())
        };
        println!("{:<8} {} {}", item.id, done, title);
    }

    let completed = items.iter().filter(|i| i.done).count();
    println!();
    println!(
        "{} open, {} completed",
        (items.len() - completed).to_string().cyan(),
        completed.to_string().green()
    );
}

/// Print a single item.
pub fn print_item(item: &Item) {
    println!("{} {}", item.title.cyan().bold(), format!("(#{})", item.id).dimmed());
    let status = if item.done { "done".green() } else { "open".yellow() };
    println!("{}: {}", "Status".bold(), status);
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }
}
