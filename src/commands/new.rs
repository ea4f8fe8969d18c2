//! New command - Create a project with its README and first note

use anyhow::Result;
use owo_colors::OwoColorize;

use super::{daily, utils};
use mknote::config::Config;
use mknote::notes::{self, ProjectOutcome};

/// Execute the new command
pub fn execute(config: &Config, project: &str) -> Result<bool> {
    let store = utils::store(config);
    let outcome = notes::create_project(&store, project, utils::today(), &utils::template(config))?;

    match outcome {
        ProjectOutcome::Created { dir, first_note } => {
            println!(
                "{} {}",
                "Created new project directory:".green(),
                dir.display()
            );
            daily::report(project, &first_note);
            Ok(true)
        }
        ProjectOutcome::AlreadyExists => {
            println!("Project '{}' already exists.", project);
            Ok(false)
        }
    }
}
