//! List command - Show all projects with their contribution graphs

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use super::{stats, utils};
use mknote::config::Config;
use mknote::notes::NoteStore;

/// Summary of one project
#[derive(Debug)]
pub struct ProjectSummary {
    pub name: String,
    /// Number of daily notes
    pub notes: usize,
    /// Date stem of the most recent note
    pub last_note: Option<String>,
}

/// Summaries of every project, sorted by name
pub fn summarize(store: &NoteStore) -> Result<Vec<ProjectSummary>> {
    let mut summaries = Vec::new();
    for name in store.list_projects()? {
        let files = store.note_files(&name)?;
        summaries.push(ProjectSummary {
            notes: files.len(),
            last_note: files.first().map(|f| f.replace(".md", "")),
            name,
        });
    }
    Ok(summaries)
}

/// Render project summaries as a table
pub fn format_table(summaries: &[ProjectSummary]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Project"), Cell::new("Notes"), Cell::new("Last note")]);

    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.name),
            Cell::new(summary.notes),
            Cell::new(summary.last_note.as_deref().unwrap_or("-")),
        ]);
    }

    table.to_string()
}

/// Execute the list command
pub fn execute(config: &Config, months: u32) -> Result<()> {
    let store = utils::store(config);

    if !store.base_dir().exists() {
        println!(
            "No projects found. Base directory '{}' does not exist.",
            store.base_dir().display()
        );
        return Ok(());
    }

    let summaries = summarize(&store)?;
    if summaries.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    println!("\nExisting projects:");
    println!("{}", format_table(&summaries));

    for summary in &summaries {
        stats::print_graph(&store, &summary.name, months)?;
    }

    Ok(())
}
