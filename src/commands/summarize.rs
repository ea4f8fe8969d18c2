//! Summarize command - Summarize a day's clipboard session

use anyhow::Result;
use chrono::Local;

use super::utils;
use mknote::config::{self, Config};
use mknote::gemini::GeminiClient;
use mknote::session::{self, SessionLog};
use mknote::spinner::Spinner;

/// Execute the summarize command
pub fn execute(config: &mut Config, date: Option<&str>) -> Result<()> {
    let date = session::session_date(date)?;
    let sessions = SessionLog::new(config::sessions_dir()?);

    if !sessions.file_for(date).exists() {
        println!("No clipboard session for {}.", date);
        return Ok(());
    }

    let Some(key) = utils::ensure_api_key(config)? else {
        return Ok(());
    };
    let model = GeminiClient::new(key);

    let spinner = Spinner::start("Summarizing session...");
    let result = session::summarize(&model, &sessions, date, Local::now().naive_local());
    spinner.finish("Summarizing session... Done!");

    match result? {
        Some((summary, path)) => {
            println!("\n{}\n", summary.trim());
            println!("Appended to {}", path.display());
        }
        None => println!("No clipboard session for {}.", date),
    }
    Ok(())
}
