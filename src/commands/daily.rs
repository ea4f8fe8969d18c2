//! Daily command - Create today's note for a project

use anyhow::Result;
use owo_colors::OwoColorize;

use super::utils;
use mknote::config::Config;
use mknote::notes::{self, DailyOutcome};

/// Execute the daily command
pub fn execute(config: &Config, project: &str) -> Result<DailyOutcome> {
    let store = utils::store(config);
    let outcome =
        notes::create_daily_note(&store, project, utils::today(), &utils::template(config))?;
    report(project, &outcome);
    Ok(outcome)
}

/// Print the outcome of creating a daily note
pub fn report(project: &str, outcome: &DailyOutcome) {
    match outcome {
        DailyOutcome::Created {
            path,
            previous,
            carried,
        } => {
            if let Some(previous) = previous {
                println!("Processing tasks from last note: {}", previous);
            }
            println!(
                "{} '{}' with the daily note template.",
                "Created file".green(),
                path.display()
            );
            if *carried > 0 {
                println!(
                    "Carried over {} incomplete tasks from last note.",
                    carried.to_string().bold()
                );
            }
        }
        DailyOutcome::ProjectMissing => {
            println!(
                "Project '{}' does not exist. Create it first using the 'new' command.",
                project
            );
        }
        DailyOutcome::AlreadyExists(path) => {
            println!("{} '{}' already exists.", "File".yellow(), path.display());
        }
    }
}
