//! Important command - Show `[!]` ... `[!!]` items across a project's notes

use anyhow::Result;
use owo_colors::OwoColorize;

use super::utils;
use mknote::config::Config;
use mknote::notes::important::{self, ProjectItems};

/// Format collected items grouped by date
pub fn format_items(project: &str, collected: &ProjectItems) -> String {
    let mut lines = vec![
        String::new(),
        format!("Important Items for project '{}':", project),
        "-".repeat(50),
    ];

    for (date, items) in collected.by_date() {
        lines.push(String::new());
        lines.push(format!("***** {} *****", date));
        lines.push(String::new());
        for item in items {
            let section = item.section.as_deref().unwrap_or("-");
            lines.push(format!("[{}] \n\n {}", section, item.text.trim()));
        }
    }

    lines.join("\n")
}

/// Execute the important-items command
pub fn execute(config: &Config, project: &str) -> Result<()> {
    let store = utils::store(config);

    if !store.project_exists(project) {
        println!("Project '{}' does not exist.", project);
        return Ok(());
    }

    let collected = important::collect_project(&store, project)?;

    for open in &collected.unterminated {
        eprintln!(
            "{} {}.md line {}: [!] has no closing [!!], item skipped",
            "Warning:".yellow(),
            open.date,
            open.line
        );
    }

    if collected.items.is_empty() {
        println!("No important items found in project '{}'", project);
        return Ok(());
    }

    println!("{}", format_items(project, &collected));
    Ok(())
}
