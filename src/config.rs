//! User configuration and well-known paths
//!
//! The configuration lives in `~/.noter-config` as a JSON object. It is read once per
//! command and handed to whatever needs it; nothing caches it across invocations.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder written by older config templates in place of a real key
pub const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Get the config file path (~/.noter-config)
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".noter-config"))
}

/// Get the clipboard session directory (~/.noter-sessions/)
pub fn sessions_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".noter-sessions"))
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn default_base_dir() -> String {
    dirs::home_dir()
        .map(|home| home.join(".notes").to_string_lossy().into_owned())
        .unwrap_or_else(|| "~/.notes".to_string())
}

fn default_editor() -> String {
    "vim".to_string()
}

/// Put the default of every known key that is missing or not a string into `map`
///
/// Returns whether anything was replaced.
fn fill_defaults(map: &mut Map<String, Value>) -> Result<bool> {
    let Value::Object(defaults) = serde_json::to_value(Config::default())? else {
        return Ok(false);
    };

    let mut repaired = false;
    for (key, default) in defaults {
        match map.get(&key) {
            Some(Value::String(_)) => {}
            Some(other) => {
                tracing::warn!(key = %key, value = %other, "config value has the wrong type, using default");
                map.insert(key, default);
                repaired = true;
            }
            None => {
                map.insert(key, default);
                repaired = true;
            }
        }
    }
    Ok(repaired)
}

/// Persisted settings
///
/// Keys missing from the file are filled from the defaults; keys this version does not
/// know about are carried through `extra` so a save never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one sub-directory per project
    #[serde(default = "default_base_dir")]
    pub base_dir: String,

    #[serde(default)]
    pub gemini_api_key: String,

    /// Editor used by `config --edit`
    #[serde(default = "default_editor")]
    pub editor: String,

    /// Custom daily-note template (empty = built-in)
    #[serde(default)]
    pub template_path: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            gemini_api_key: String::new(),
            editor: default_editor(),
            template_path: String::new(),
            extra: Map::new(),
        }
    }
}

impl Config {
    /// Load the config from `~/.noter-config`
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load the config from `path`, writing defaults when it is missing or corrupt
    ///
    /// Known keys that are missing, null or not strings are replaced by their defaults; the
    /// other keys are kept. Only a file that is not a JSON object is reset as a whole.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {}", path.display()))?;

        let mut map = match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Self::reset(path, "not a JSON object"),
            Err(e) => return Self::reset(path, &e.to_string()),
        };

        let repaired = fill_defaults(&mut map)?;
        let config: Config = match serde_json::from_value(Value::Object(map)) {
            Ok(config) => config,
            Err(e) => return Self::reset(path, &e.to_string()),
        };

        if repaired {
            config.save_to(path)?;
        }
        Ok(config)
    }

    fn reset(path: &Path, reason: &str) -> Result<Self> {
        tracing::warn!(path = %path.display(), error = %reason, "config is corrupt, resetting to defaults");
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    /// Save the config to `~/.noter-config`
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write: {}", path.display()))
    }

    /// Base directory with `~` expanded
    pub fn base_dir(&self) -> PathBuf {
        expand_tilde(&self.base_dir)
    }

    /// Custom template path, if one is configured
    pub fn template_path(&self) -> Option<PathBuf> {
        let trimmed = self.template_path.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(expand_tilde(trimmed))
        }
    }

    /// The API key, unless it is blank or the placeholder
    pub fn api_key(&self) -> Option<&str> {
        let key = self.gemini_api_key.trim();
        if key.is_empty() || key == API_KEY_PLACEHOLDER {
            None
        } else {
            Some(key)
        }
    }

    /// Directory holding the grammar-check CSV logs
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir().join("_logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_paths_exist() {
        // These should not panic
        let _ = config_path();
        let _ = sessions_dir();
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".noter-config");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.editor, "vim");
        assert!(config.gemini_api_key.is_empty());
        assert!(path.exists());

        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["editor"], "vim");
        assert_eq!(saved["template_path"], "");
    }

    #[test]
    fn test_partial_file_keeps_present_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".noter-config");
        fs::write(&path, r#"{"base_dir": "/srv/notes", "theme": "dark"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_dir, "/srv/notes");
        assert_eq!(config.editor, "vim");
        assert_eq!(config.extra.get("theme"), Some(&Value::from("dark")));

        // Unknown keys survive a save
        config.save_to(&path).unwrap();
        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["theme"], "dark");
        assert_eq!(saved["base_dir"], "/srv/notes");
    }

    #[test]
    fn test_wrong_typed_key_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".noter-config");
        fs::write(
            &path,
            r#"{"base_dir":"/srv/notes","gemini_api_key":"secret-key-123","template_path":null,"editor":7}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_dir, "/srv/notes");
        assert_eq!(config.gemini_api_key, "secret-key-123");
        assert_eq!(config.template_path, "");
        assert_eq!(config.editor, "vim");

        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["base_dir"], "/srv/notes");
        assert_eq!(saved["gemini_api_key"], "secret-key-123");
        assert_eq!(saved["template_path"], "");
    }

    #[test]
    fn test_non_object_file_resets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".noter-config");
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_corrupt_file_resets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".noter-config");
        fs::write(&path, "{ not json").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());

        let content = fs::read_to_string(&path).unwrap();
        assert!(serde_json::from_str::<Value>(&content).is_ok());
    }

    #[test]
    fn test_api_key_placeholder_is_unset() {
        let mut config = Config::default();
        assert!(config.api_key().is_none());

        config.gemini_api_key = API_KEY_PLACEHOLDER.to_string();
        assert!(config.api_key().is_none());

        config.gemini_api_key = "abc123".to_string();
        assert_eq!(config.api_key(), Some("abc123"));
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde("relative"), PathBuf::from("relative"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/.notes"), home.join(".notes"));
            assert_eq!(expand_tilde("~"), home);
        }
    }

    #[test]
    fn test_template_path_blank_is_none() {
        let mut config = Config::default();
        assert!(config.template_path().is_none());
        config.template_path = "   ".to_string();
        assert!(config.template_path().is_none());
        config.template_path = "/tmp/t.md".to_string();
        assert_eq!(config.template_path(), Some(PathBuf::from("/tmp/t.md")));
    }
}
