//! Clipboard sessions
//!
//! While `watch` runs, every new piece of text copied to the clipboard is appended to the
//! day's session file, `~/.noter-sessions/clipboard-session-<YYYY-MM-DD>.md`. A session can
//! be summarized by the language model; the summary is appended to the same file.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::clipboard::Clipboard;
use crate::desktop;
use crate::gemini::LanguageModel;
use crate::grammar::{self, Correction, GrammarLog};

const FILE_PREFIX: &str = "clipboard-session-";

/// Per-day session files
#[derive(Debug, Clone)]
pub struct SessionLog {
    dir: PathBuf,
}

impl SessionLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn file_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}{}.md", FILE_PREFIX, date.format("%Y-%m-%d")))
    }

    fn open_for_append(&self, date: NaiveDate) -> Result<(PathBuf, fs::File)> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create: {}", self.dir.display()))?;

        let path = self.file_for(date);
        let is_new = !path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open: {}", path.display()))?;

        if is_new {
            writeln!(file, "# Clipboard Session - {}", date.format("%Y-%m-%d"))?;
        }
        Ok((path, file))
    }

    /// Append one captured text, with its correction if there was one
    pub fn record(
        &self,
        now: NaiveDateTime,
        text: &str,
        correction: Option<&str>,
    ) -> Result<PathBuf> {
        let (path, mut file) = self.open_for_append(now.date())?;

        let mut entry = format!("\n### {}\n\n```\n{}\n```\n", now.format("%H:%M:%S"), text);
        if let Some(corrected) = correction {
            entry.push_str(&format!("\nCorrected:\n\n```\n{}\n```\n", corrected));
        }
        file.write_all(entry.as_bytes())
            .with_context(|| format!("Failed to write: {}", path.display()))?;

        Ok(path)
    }

    /// Append a summary section to the session of `date`
    pub fn append_summary(&self, date: NaiveDate, now: NaiveDateTime, summary: &str) -> Result<PathBuf> {
        let (path, mut file) = self.open_for_append(date)?;
        let section = format!("\n## Summary ({})\n\n{}\n", now.format("%H:%M"), summary.trim());
        file.write_all(section.as_bytes())
            .with_context(|| format!("Failed to write: {}", path.display()))?;
        Ok(path)
    }

    /// Content of the session of `date`, if there is one
    pub fn read(&self, date: NaiveDate) -> Result<Option<String>> {
        let path = self.file_for(date);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("Failed to read: {}", path.display()))
    }
}

/// Prompt asking for a summary of a session file
pub fn summary_prompt(session: &str) -> String {
    format!(
        "Summarize the following clipboard session notes. \
         Group related items, list the main topics and any follow-up tasks as markdown bullet points:\n\n{}",
        session
    )
}

/// Summarize the session of `date` and append the summary to it
///
/// Returns `None` when there is no session for that day.
pub fn summarize<M: LanguageModel + ?Sized>(
    model: &M,
    sessions: &SessionLog,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Result<Option<(String, PathBuf)>> {
    let Some(content) = sessions.read(date)? else {
        return Ok(None);
    };

    let summary = model
        .generate(&summary_prompt(&content))
        .context("Failed to summarize session")?;
    let path = sessions.append_summary(date, now, &summary)?;

    Ok(Some((summary, path)))
}

/// Reaction to clipboard captures
pub trait CaptureHandler {
    /// Handle new clipboard text; a returned value is written back to the clipboard
    fn on_capture(&mut self, text: &str) -> Result<Option<String>>;

    fn on_summarize(&mut self) -> Result<()>;
}

/// Records captures to the session file, optionally correcting them
pub struct SessionRecorder {
    pub sessions: SessionLog,
    pub grammar_log: GrammarLog,
    pub model: Option<Box<dyn LanguageModel + Send>>,
    /// Send captures through the grammar check
    pub correct: bool,
}

impl CaptureHandler for SessionRecorder {
    fn on_capture(&mut self, text: &str) -> Result<Option<String>> {
        let now = Local::now().naive_local();

        let corrected = match (&self.model, self.correct) {
            (Some(model), true) => {
                let report = grammar::correct(model.as_ref(), &self.grammar_log, text, now)?;
                match report.correction {
                    Correction::Corrected { text, changes } => {
                        println!("Corrected {} line(s).", changes);
                        Some(text)
                    }
                    Correction::Failed { marker, .. } => {
                        println!("Grammar check failed: {}", marker);
                        None
                    }
                }
            }
            _ => None,
        };

        let path = self.sessions.record(now, text, corrected.as_deref())?;
        tracing::debug!(path = %path.display(), "recorded clipboard capture");
        Ok(corrected)
    }

    fn on_summarize(&mut self) -> Result<()> {
        let Some(model) = &self.model else {
            bail!("Summaries need a Gemini API key (mknote config --gemini-key <KEY>)");
        };

        let now = Local::now().naive_local();
        match summarize(model.as_ref(), &self.sessions, now.date(), now)? {
            Some((summary, path)) => {
                println!("\nSession summary:\n{}\n", summary.trim());
                println!("Appended to {}", path.display());
            }
            None => println!("Nothing captured yet today."),
        }
        Ok(())
    }
}

/// Counters reported when a watch ends
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WatchStats {
    pub captured: usize,
    pub written_back: usize,
    pub read_errors: usize,
}

/// Messages from the foreground to the poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchCommand {
    Summarize,
    Stop,
}

/// One clipboard poller
pub struct Poller<C, H> {
    clipboard: C,
    handler: H,
    paste: bool,
    last_seen: Option<String>,
    stats: WatchStats,
}

impl<C: Clipboard, H: CaptureHandler> Poller<C, H> {
    pub fn new(clipboard: C, handler: H, paste: bool) -> Self {
        Self {
            clipboard,
            handler,
            paste,
            last_seen: None,
            stats: WatchStats::default(),
        }
    }

    /// Start from the current clipboard content so it is not captured
    pub fn prime(&mut self) {
        self.last_seen = self.clipboard.get_text().ok();
    }

    /// Read the clipboard once and handle new text
    ///
    /// Returns whether something was captured. Read failures are counted and skipped.
    pub fn tick(&mut self) -> Result<bool> {
        let text = match self.clipboard.get_text() {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "clipboard unreadable, skipping");
                self.stats.read_errors += 1;
                return Ok(false);
            }
        };

        if text.trim().is_empty() || self.last_seen.as_deref() == Some(text.as_str()) {
            return Ok(false);
        }

        let preview: String = text.chars().take(60).collect();
        println!("Captured {} characters: \"{}\"", text.chars().count(), preview);
        self.stats.captured += 1;
        self.last_seen = Some(text.clone());

        if let Some(write_back) = self.handler.on_capture(&text)? {
            self.clipboard.set_text(&write_back)?;
            self.last_seen = Some(write_back);
            self.stats.written_back += 1;

            if self.paste {
                if let Err(e) = desktop::auto_paste() {
                    tracing::warn!(error = %e, "auto-paste failed");
                }
            }
        }

        Ok(true)
    }

    pub fn summarize(&mut self) {
        if let Err(e) = self.handler.on_summarize() {
            eprintln!("Summary failed: {:#}", e);
        }
    }

    /// Poll until a stop message arrives or the sender goes away
    pub fn run(mut self, interval: Duration, commands: Receiver<WatchCommand>) -> WatchStats {
        loop {
            match commands.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    if let Err(e) = self.tick() {
                        eprintln!("Error handling clipboard text: {:#}", e);
                    }
                }
                Ok(WatchCommand::Summarize) => self.summarize(),
                Ok(WatchCommand::Stop) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.stats
    }
}

/// A poller running on its own thread
pub struct WatchTask {
    commands: Sender<WatchCommand>,
    handle: JoinHandle<Result<WatchStats>>,
}

impl WatchTask {
    /// Spawn a poller; the clipboard is opened on the poller thread
    pub fn spawn<C, H, F>(open_clipboard: F, handler: H, paste: bool, interval: Duration) -> Self
    where
        C: Clipboard,
        H: CaptureHandler + Send + 'static,
        F: FnOnce() -> Result<C> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let clipboard = open_clipboard()?;
            let mut poller = Poller::new(clipboard, handler, paste);
            poller.prime();
            Ok(poller.run(interval, rx))
        });

        Self {
            commands: tx,
            handle,
        }
    }

    /// Ask for a summary; false if the poller is gone
    pub fn summarize(&self) -> bool {
        self.commands.send(WatchCommand::Summarize).is_ok()
    }

    /// Stop the poller and wait for it
    pub fn stop(self) -> Result<WatchStats> {
        let _ = self.commands.send(WatchCommand::Stop);
        match self.handle.join() {
            Ok(result) => result,
            Err(_) => bail!("Clipboard poller panicked"),
        }
    }
}

/// Parse a `--date` argument, defaulting to today
pub fn session_date(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {}", s)),
        None => Ok(Local::now().date_naive()),
    }
}
