//! Grammar-logs command - Browse and export logged grammar checks

use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;

use super::utils;
use mknote::clipboard::{Clipboard, SystemClipboard};
use mknote::config::Config;
use mknote::grammar::log::MONTH_FORMAT;
use mknote::grammar::{GrammarLog, LogEntry};

/// Options for the grammar-logs command
pub struct LogOptions {
    /// Month in YYYY-MM format (default: current month)
    pub month: Option<String>,
    /// Maximum number of entries to list
    pub limit: usize,
    /// 1-based entry number to show in full
    pub entry: Option<String>,
    /// Export the selected entry to a markdown file
    pub export: bool,
}

/// Result of resolving an `--entry` argument
#[derive(Debug, PartialEq, Eq)]
pub enum EntrySelection {
    Found(usize),
    OutOfRange,
    NotANumber,
}

/// Resolve a 1-based entry number against `count` entries
pub fn select_entry(arg: &str, count: usize) -> EntrySelection {
    match arg.trim().parse::<i64>() {
        Ok(n) if n >= 1 && (n as usize) <= count => EntrySelection::Found(n as usize - 1),
        Ok(_) => EntrySelection::OutOfRange,
        Err(_) => EntrySelection::NotANumber,
    }
}

/// Format the list view of a month
pub fn format_list(month: &str, entries: &[LogEntry], limit: usize) -> String {
    let mut lines = vec![
        String::new(),
        format!("Grammar Check Logs for {}", month),
        "-".repeat(50),
    ];

    for (i, entry) in entries.iter().take(limit).enumerate() {
        lines.push(String::new());
        lines.push(format!("[{}] {}", i + 1, entry.timestamp));
        lines.push(String::new());
        lines.push(format!("Original: {}", utils::preview(&entry.original, 80)));
        if entry.is_failure() {
            lines.push(format!("Result: {}", entry.corrected));
        } else {
            lines.push(format!("Corrected: {}", utils::preview(&entry.corrected, 80)));
        }
        lines.push("-".repeat(30));
    }

    if entries.len() > limit {
        lines.push(String::new());
        lines.push(format!(
            "Showing {} of {} entries. Use --limit to show more.",
            limit,
            entries.len()
        ));
    }

    lines.join("\n")
}

/// Format one entry in full
pub fn format_entry(number: usize, entry: &LogEntry) -> String {
    [
        String::new(),
        format!("Detailed Grammar Check Log Entry [{}]", number),
        format!("Timestamp: {}", entry.timestamp),
        "-".repeat(50),
        String::new(),
        "ORIGINAL TEXT:".to_string(),
        "-".repeat(15),
        entry.original.clone(),
        String::new(),
        "CORRECTED TEXT:".to_string(),
        "-".repeat(15),
        entry.corrected.clone(),
    ]
    .join("\n")
}

/// Execute the grammar-logs command
pub fn execute(config: &Config, options: LogOptions) -> Result<()> {
    let log = GrammarLog::new(config.logs_dir());

    if !log.exists() {
        println!("No logs found.");
        return Ok(());
    }

    let month = options
        .month
        .unwrap_or_else(|| Local::now().format(MONTH_FORMAT).to_string());

    let entries = match log.read_month(&month) {
        Ok(Some(entries)) => entries,
        Ok(None) => {
            println!("No logs found for {}.", month);
            return Ok(());
        }
        Err(e) => {
            println!("Error reading log file: {:#}", e);
            return Ok(());
        }
    };

    if entries.is_empty() {
        println!("No entries found in {} log file.", month);
        return Ok(());
    }

    if let Some(arg) = options.entry {
        let index = match select_entry(&arg, entries.len()) {
            EntrySelection::Found(index) => index,
            EntrySelection::OutOfRange => {
                println!(
                    "Error: Entry {} not found. Valid range is 1-{}.",
                    arg,
                    entries.len()
                );
                return Ok(());
            }
            EntrySelection::NotANumber => {
                println!("Error: Entry ID must be a number.");
                return Ok(());
            }
        };

        let entry = &entries[index];
        println!("{}", format_entry(index + 1, entry));

        if options.export {
            let path = log.export(entry)?;
            println!("\n{} {}", "Exported to:".green(), path.display());

            if utils::confirm("\nCopy corrected text to clipboard? (y/n): ")? {
                let mut clipboard = SystemClipboard::new()?;
                clipboard.set_text(&entry.corrected)?;
                println!("Corrected text copied to clipboard.");
            }
        }
        return Ok(());
    }

    println!("{}", format_list(&month, &entries, options.limit));
    println!(
        "\nTo view full details of an entry, use: mknote grammar-logs --month {} --entry <entry_number>",
        month
    );
    println!("To export an entry to a file, add --export to the command above");

    println!("\nAvailable monthly logs:");
    println!("{}", log.months()?.join(", "));

    Ok(())
}
