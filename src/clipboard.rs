//! System clipboard access

use anyhow::{Context, Result};

/// Read/write access to a text clipboard
pub trait Clipboard {
    fn get_text(&mut self) -> Result<String>;
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The OS clipboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().context("Failed to open the system clipboard")?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Result<String> {
        self.inner
            .get_text()
            .context("Failed to read text from the clipboard")
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_string())
            .context("Failed to write text to the clipboard")
    }
}

/// In-memory clipboard
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub text: String,
    /// Every value written through `set_text`
    pub writes: Vec<String>,
}

impl MemoryClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            writes: Vec::new(),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.text = text.to_string();
        self.writes.push(text.to_string());
        Ok(())
    }
}
