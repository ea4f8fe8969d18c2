//! Watch command - Record clipboard captures into today's session file

use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::{self, BufRead};
use std::time::Duration;

use super::utils;
use mknote::clipboard::SystemClipboard;
use mknote::config::{self, Config};
use mknote::gemini::{GeminiClient, LanguageModel};
use mknote::grammar::GrammarLog;
use mknote::session::{SessionLog, SessionRecorder, WatchStats, WatchTask};

/// Options for the watch command
pub struct WatchOptions {
    pub interval_ms: u64,
    pub correct: bool,
    pub paste: bool,
}

/// A line typed while watching
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Summarize,
    Quit,
    Help,
    Unknown,
}

pub fn parse_input(line: &str) -> Input {
    match line.trim().to_lowercase().as_str() {
        "s" | "summary" => Input::Summarize,
        "q" | "quit" | "exit" => Input::Quit,
        "h" | "help" | "?" => Input::Help,
        _ => Input::Unknown,
    }
}

fn print_help() {
    println!("Commands:");
    println!("  s  summarize today's session");
    println!("  q  stop watching");
    println!("  h  show this help");
}

fn format_stats(stats: &WatchStats) -> String {
    format!(
        "Captured {} clip(s), wrote back {} correction(s), {} unreadable read(s).",
        stats.captured, stats.written_back, stats.read_errors
    )
}

/// Execute the watch command
pub fn execute(config: &mut Config, options: WatchOptions) -> Result<()> {
    let model: Option<Box<dyn LanguageModel + Send>> = if options.correct {
        let Some(key) = utils::ensure_api_key(config)? else {
            return Ok(());
        };
        Some(Box::new(GeminiClient::new(key)))
    } else {
        config
            .api_key()
            .map(|key| Box::new(GeminiClient::new(key)) as Box<dyn LanguageModel + Send>)
    };

    let sessions = SessionLog::new(config::sessions_dir()?);
    let recorder = SessionRecorder {
        sessions,
        grammar_log: GrammarLog::new(config.logs_dir()),
        model,
        correct: options.correct,
    };

    let task = WatchTask::spawn(
        SystemClipboard::new,
        recorder,
        options.paste,
        Duration::from_millis(options.interval_ms.max(50)),
    );

    println!("{}", "Watching the clipboard.".green());
    if options.correct {
        println!("Captured text is grammar-checked and the correction copied back.");
    }
    print_help();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        match parse_input(&line?) {
            Input::Summarize => {
                if !task.summarize() {
                    break;
                }
            }
            Input::Quit => break,
            Input::Help => print_help(),
            Input::Unknown => println!("Unknown command. Type h for help."),
        }
    }

    let stats = task.stop()?;
    println!("\n{}", format_stats(&stats));
    Ok(())
}
