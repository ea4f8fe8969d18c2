//! Derived views over a daily note's markdown
//!
//! The markdown text is the only representation of a note; these helpers re-parse it on
//! demand.

use super::section::{Line, Section, SectionTracker};

/// Marker of an unchecked task
pub const UNCHECKED: &str = "- [ ]";

/// Marker of a completed task
pub const CHECKED: &str = "- [x]";

/// Obligations left open by a note
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenWork {
    /// Unchecked task lines found in the Tasks section
    pub incomplete: Vec<String>,
    /// `-` lines found in the Expected for Tomorrow section
    pub expected: Vec<String>,
}

impl OpenWork {
    /// Lines to seed the next note's Tasks section with, in carry-over order
    pub fn carried(self) -> Vec<String> {
        let mut lines = self.incomplete;
        lines.extend(self.expected);
        lines
    }

    pub fn is_empty(&self) -> bool {
        self.incomplete.is_empty() && self.expected.is_empty()
    }
}

/// Collect incomplete and expected tasks
pub fn open_work(content: &str) -> OpenWork {
    OpenWork {
        incomplete: incomplete_tasks(content),
        expected: expected_tasks(content),
    }
}

/// Body lines of `section` accepted by `keep`
fn section_lines(content: &str, section: Section, keep: impl Fn(&str) -> bool) -> Vec<String> {
    let mut tracker = SectionTracker::watching(section.clone());
    let mut lines = Vec::new();

    for line in content.split('\n') {
        if let Line::Body(current, body) = tracker.classify(line) {
            if *current == section && keep(body) {
                lines.push(body.to_string());
            }
        }
    }

    lines
}

/// Unchecked task lines strictly inside the Tasks section
pub fn incomplete_tasks(content: &str) -> Vec<String> {
    section_lines(content, Section::Tasks, |line| line.starts_with(UNCHECKED))
}

/// Lines starting with `-` inside the Expected for Tomorrow section
pub fn expected_tasks(content: &str) -> Vec<String> {
    section_lines(content, Section::Expected, |line| line.starts_with('-'))
}

/// Number of checked markers anywhere in the note
pub fn completed_count(content: &str) -> usize {
    content.matches(CHECKED).count()
}
