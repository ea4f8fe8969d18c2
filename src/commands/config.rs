//! Config command - Show, set, or edit the configuration

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::fs;
use std::io::Write;

use super::utils;
use mknote::config::{self, Config, API_KEY_PLACEHOLDER};
use mknote::desktop;

const EDIT_INSTRUCTIONS: &str = "\
// Edit the configuration below, then save and close the editor.
// Lines before the opening brace are ignored.
//
// base_dir:       directory holding one folder per project
// gemini_api_key: key from https://ai.google.dev/
// editor:         command used to open this file
// template_path:  custom daily-note template (leave empty for the built-in one)
";

/// Options for the config command
pub struct ConfigOptions {
    pub base_dir: Option<String>,
    pub gemini_key: Option<String>,
    pub edit: bool,
}

/// Parse an edited config buffer, ignoring anything before the first `{`
pub fn parse_edited(buffer: &str) -> Result<Config> {
    let start = buffer.find('{').context("No JSON object found")?;
    serde_json::from_str(&buffer[start..]).context("Invalid JSON")
}

/// Render the config for display with the API key masked
pub fn format_config(config: &Config) -> String {
    let key = if config.gemini_api_key.is_empty() || config.gemini_api_key == API_KEY_PLACEHOLDER {
        config.gemini_api_key.clone()
    } else {
        utils::mask_key(&config.gemini_api_key)
    };

    let mut lines = vec![
        format!("  base_dir: {}", config.base_dir),
        format!("  gemini_api_key: {}", key),
        format!("  editor: {}", config.editor),
        format!("  template_path: {}", config.template_path),
    ];
    for (name, value) in &config.extra {
        lines.push(format!("  {}: {}", name, value));
    }
    lines.join("\n")
}

/// Execute the config command
pub fn execute(options: ConfigOptions) -> Result<()> {
    let mut config = Config::load()?;

    if options.edit || (options.base_dir.is_none() && options.gemini_key.is_none()) {
        return edit(&config);
    }

    if let Some(base_dir) = options.base_dir {
        config.base_dir = config::expand_tilde(&base_dir).to_string_lossy().into_owned();
    }
    if let Some(key) = options.gemini_key {
        config.gemini_api_key = key;
    }

    config.save()?;
    println!("{}", "Configuration updated:".green());
    println!("{}", format_config(&config));
    Ok(())
}

/// Round-trip the config through the user's editor
fn edit(config: &Config) -> Result<()> {
    let mut file = tempfile::Builder::new()
        .prefix("mknote-config-")
        .suffix(".json")
        .tempfile()
        .context("Failed to create temporary file")?;

    write!(file, "{}\n{}\n", EDIT_INSTRUCTIONS, serde_json::to_string_pretty(config)?)?;
    file.flush()?;

    desktop::edit_file(&config.editor, file.path())?;

    let buffer = fs::read_to_string(file.path())
        .with_context(|| format!("Failed to read: {}", file.path().display()))?;

    let edited = match parse_edited(&buffer) {
        Ok(edited) => edited,
        Err(e) => {
            println!("{} {:#}", "Error: configuration not saved.".red(), e);
            return Ok(());
        }
    };

    println!("\nNew configuration:");
    println!("{}", format_config(&edited));

    if edited == *config {
        println!("\nNo changes made.");
        return Ok(());
    }

    if utils::confirm("\nSave this configuration? (y/n): ")? {
        edited.save()?;
        println!("{}", "Configuration saved.".green());
    } else {
        println!("Configuration not saved.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edited_skips_comment_block() {
        let buffer = format!(
            "{}\n{{\n  \"base_dir\": \"/tmp/notes\",\n  \"gemini_api_key\": \"k\",\n  \"theme\": \"dark\"\n}}\n",
            EDIT_INSTRUCTIONS
        );

        let config = parse_edited(&buffer).unwrap();
        assert_eq!(config.base_dir, "/tmp/notes");
        assert_eq!(config.gemini_api_key, "k");
        assert_eq!(config.editor, "vim");
        assert_eq!(config.extra.get("theme").and_then(|v| v.as_str()), Some("dark"));
    }

    #[test]
    fn test_parse_edited_rejects_garbage() {
        assert!(parse_edited("no json here").is_err());
        assert!(parse_edited("// x\n{ \"base_dir\": ").is_err());
    }

    #[test]
    fn test_format_config_masks_key() {
        let mut config = Config {
            gemini_api_key: "abcd1234567890wxyz".to_string(),
            ..Config::default()
        };
        assert!(format_config(&config).contains("gemini_api_key: abcd...wxyz"));

        config.gemini_api_key = API_KEY_PLACEHOLDER.to_string();
        assert!(format_config(&config).contains(API_KEY_PLACEHOLDER));
    }
}
