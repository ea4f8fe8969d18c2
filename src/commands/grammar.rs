//! Grammar command - Correct the clipboard text with the language model

use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;

use super::utils;
use mknote::clipboard::{Clipboard, SystemClipboard};
use mknote::config::Config;
use mknote::desktop;
use mknote::gemini::{GeminiClient, LanguageModel};
use mknote::grammar::{self, Correction, GrammarLog};
use mknote::spinner::Spinner;

/// Execute the grammar command
pub fn execute(config: &mut Config, paste: bool) -> Result<()> {
    let Some(api_key) = utils::ensure_api_key(config)? else {
        return Ok(());
    };

    let mut clipboard = match SystemClipboard::new() {
        Ok(clipboard) => clipboard,
        Err(e) => {
            println!("Error accessing clipboard: {:#}", e);
            return Ok(());
        }
    };

    let model = GeminiClient::new(api_key);
    let log = GrammarLog::new(config.logs_dir());
    check_clipboard(&mut clipboard, &model, &log, paste)
}

/// Correct the clipboard text in place and log the check
pub fn check_clipboard<C, M>(clipboard: &mut C, model: &M, log: &GrammarLog, paste: bool) -> Result<()>
where
    C: Clipboard + ?Sized,
    M: LanguageModel + ?Sized,
{
    let text = match clipboard.get_text() {
        Ok(text) if !text.is_empty() => text,
        Ok(_) => {
            println!("No text found in clipboard.");
            return Ok(());
        }
        Err(e) => {
            println!("Error accessing clipboard: {:#}", e);
            return Ok(());
        }
    };

    println!("Text from clipboard ({} characters):", text.chars().count());
    println!("\"{}\"", utils::preview(&text, 60));
    println!();

    let spinner = Spinner::start("Checking grammar...");
    let report = grammar::correct(model, log, &text, Local::now().naive_local());
    spinner.finish("Checking grammar... Done!");
    let report = report?;

    match report.correction {
        Correction::Corrected { text: corrected, changes } => {
            println!("\nOriginal text:");
            println!("{}", utils::preview(&text, 100));
            println!("\nCorrected text:");
            println!("{}", utils::preview(&corrected, 100));

            clipboard.set_text(&corrected)?;
            println!("\n{}", "Corrected text copied to clipboard.".green());

            if changes > 0 {
                println!("\nFound and corrected {} grammar issues.", changes);
            } else {
                println!("\nNo grammar issues found.");
            }

            if paste {
                if let Err(e) = desktop::auto_paste() {
                    eprintln!("{} {:#}", "Auto-paste failed:".red(), e);
                }
            }
            if let Err(e) = desktop::notify("mknote", "Corrected text copied to clipboard") {
                tracing::debug!(error = %e, "desktop notification failed");
            }
        }
        Correction::Failed { error, .. } => {
            if error.is_request_error() {
                println!("\n{} {}", "API request error:".red(), error);
            } else {
                println!("\n{} {}", "Error processing response:".red(), error);
            }
        }
    }

    println!("Logged grammar check to {}", report.log_file.display());
    Ok(())
}
