//! Stats command - Show the contribution graph of a project

use anyhow::Result;

use super::utils;
use mknote::config::Config;
use mknote::notes::{ContributionGraph, NoteStore};

/// Execute the stats command
pub fn execute(config: &Config, project: &str, months: u32) -> Result<()> {
    let store = utils::store(config);
    print_graph(&store, project, months)
}

/// Print the graph of one project, or a message if it does not exist
pub fn print_graph(store: &NoteStore, project: &str, months: u32) -> Result<()> {
    if !store.project_exists(project) {
        println!("Project '{}' does not exist.", project);
        return Ok(());
    }

    let graph = ContributionGraph::build(store, project, months, utils::today())?;
    println!("{}", graph.render());
    Ok(())
}
