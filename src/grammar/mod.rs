//! Grammar correction through a language model
//!
//! Every check, successful or not, ends up as one row of the monthly CSV log. Failed checks
//! store a marker in place of the corrected text.

pub mod log;

use anyhow::Result;
use chrono::NaiveDateTime;
use std::path::PathBuf;

use crate::gemini::{GeminiError, LanguageModel};
pub use log::{GrammarLog, LogEntry};

/// Logged when the model answered without any text
pub const NO_CORRECTION_RECEIVED: &str = "NO_CORRECTION_RECEIVED";

/// Logged when the response had an unknown shape
pub const UNEXPECTED_API_RESPONSE: &str = "UNEXPECTED_API_RESPONSE";

const API_ERROR_PREFIX: &str = "API_ERROR";
const ERROR_PREFIX: &str = "ERROR";

/// Does a logged "corrected text" value mark a failed check?
pub fn is_failure_marker(corrected: &str) -> bool {
    corrected.starts_with(ERROR_PREFIX)
        || corrected.starts_with(API_ERROR_PREFIX)
        || corrected == NO_CORRECTION_RECEIVED
        || corrected == UNEXPECTED_API_RESPONSE
}

/// Log marker for a failed model call
pub fn failure_marker(error: &GeminiError) -> String {
    match error {
        GeminiError::EmptyResponse => NO_CORRECTION_RECEIVED.to_string(),
        GeminiError::MalformedResponse => UNEXPECTED_API_RESPONSE.to_string(),
        // A body that was not JSON at all
        GeminiError::Http(e) if e.is_decode() => format!("{}: {}", ERROR_PREFIX, error),
        _ => format!("{}: {}", API_ERROR_PREFIX, error),
    }
}

/// Prompt asking the model for a corrected version of `text`
pub fn build_prompt(text: &str) -> String {
    format!(
        "Please check and correct the grammar in the following text. \n\
         Return ONLY the corrected text without any explanations or comments:\n\n{}",
        text
    )
}

/// Number of lines added or removed between two texts
pub fn count_changes(original: &str, corrected: &str) -> usize {
    let a: Vec<&str> = original.lines().collect();
    let b: Vec<&str> = corrected.lines().collect();

    // Longest common subsequence of lines, two rows at a time
    let mut next = vec![0usize; b.len() + 1];
    let mut row = vec![0usize; b.len() + 1];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            row[j] = if a[i] == b[j] {
                next[j + 1] + 1
            } else {
                next[j].max(row[j + 1])
            };
        }
        std::mem::swap(&mut row, &mut next);
    }
    let common = next[0];

    (a.len() - common) + (b.len() - common)
}

/// Outcome of one grammar check
#[derive(Debug)]
pub enum Correction {
    Corrected {
        text: String,
        /// Lines added or removed
        changes: usize,
    },
    Failed {
        /// Marker written to the log
        marker: String,
        error: GeminiError,
    },
}

/// Result of a check together with the log file it was written to
#[derive(Debug)]
pub struct CheckReport {
    pub correction: Correction,
    pub log_file: PathBuf,
}

/// Ask `model` to correct `text` and log the result
pub fn correct<M: LanguageModel + ?Sized>(
    model: &M,
    log: &GrammarLog,
    text: &str,
    now: NaiveDateTime,
) -> Result<CheckReport> {
    let correction = match model.generate(&build_prompt(text)) {
        Ok(corrected) => Correction::Corrected {
            changes: count_changes(text, &corrected),
            text: corrected,
        },
        Err(error) => {
            tracing::warn!(error = %error, "grammar check failed");
            Correction::Failed {
                marker: failure_marker(&error),
                error,
            }
        }
    };

    let logged = match &correction {
        Correction::Corrected { text, .. } => text.as_str(),
        Correction::Failed { marker, .. } => marker.as_str(),
    };
    let log_file = log.append(now, text, logged)?;

    Ok(CheckReport {
        correction,
        log_file,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    /// Model returning canned results and recording prompts
    pub struct FakeModel {
        pub responses: RefCell<Vec<crate::gemini::Result<String>>>,
        pub prompts: RefCell<Vec<String>>,
    }

    impl FakeModel {
        pub fn new(responses: Vec<crate::gemini::Result<String>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl LanguageModel for FakeModel {
        fn generate(&self, prompt: &str) -> crate::gemini::Result<String> {
            self.prompts.borrow_mut().push(prompt.to_string());
            let mut responses = self.responses.borrow_mut();
            if responses.is_empty() {
                Err(GeminiError::EmptyResponse)
            } else {
                responses.remove(0)
            }
        }
    }
}
