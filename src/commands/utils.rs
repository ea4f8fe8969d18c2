//! Shared utilities for commands

use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::io::{self, Write};

use mknote::config::Config;
use mknote::notes::{NoteStore, Template};

/// Notes tree of the configured base directory
pub fn store(config: &Config) -> NoteStore {
    NoteStore::new(config.base_dir())
}

/// Configured daily-note template
pub fn template(config: &Config) -> Template {
    Template::load(config.template_path().as_deref())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// First `max` characters of `text`, with `...` if it was cut
pub fn preview(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Mask an API key for display
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "****".to_string()
    }
}

/// Ask a question on stdin and return the trimmed answer
pub fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Ask a yes/no question; anything but `y`/`yes` is no
pub fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(question)?.to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// The configured API key, asking for one and saving it if there is none
///
/// Returns `None` if the user gave no key.
pub fn ensure_api_key(config: &mut Config) -> Result<Option<String>> {
    if let Some(key) = config.api_key() {
        return Ok(Some(key.to_string()));
    }

    println!("Gemini API key not set. Let's configure it now.");
    println!("You'll need a Gemini API key from https://ai.google.dev/");

    let key = prompt("Enter your Gemini API key: ")?;
    if key.is_empty() {
        println!("No API key provided. Exiting.");
        return Ok(None);
    }

    config.gemini_api_key = key.clone();
    config.save()?;
    println!("API key saved successfully!");
    Ok(Some(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("exactly10!", 10), "exactly10!");
        assert_eq!(preview("this is longer", 4), "this...");
        // Cuts on characters, not bytes
        assert_eq!(preview("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("abcd1234wxyz"), "abcd...wxyz");
        assert_eq!(mask_key("12345678"), "****");
        assert_eq!(mask_key(""), "****");
    }
}
