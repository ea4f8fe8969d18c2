//! Markdown section classification
//!
//! Daily notes are split into `##` sections. Every scan over a note walks the lines through
//! a [`SectionTracker`], which reports which section a body line belongs to.
//!
//! A scan looking for one section can watch it: the watched section's heading text then
//! opens it wherever it appears on a line, while every other section still needs a line
//! starting with `##`.

/// Heading that opens the task list
pub const TASKS_HEADING: &str = "## Tasks";

/// Heading that opens the list of tasks planned for the next day
pub const EXPECTED_HEADING: &str = "## Expected for Tomorrow";

/// Section a line of a daily note belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Before the first `##` heading
    Outside,
    Goals,
    Tasks,
    Notes,
    Expected,
    Reflections,
    /// Any other `##` heading, with its trimmed title
    Other(String),
}

impl Section {
    /// Heading text the lifecycle engine matches for this section
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            Self::Tasks => Some(TASKS_HEADING),
            Self::Expected => Some(EXPECTED_HEADING),
            _ => None,
        }
    }

    /// Classify a heading line
    ///
    /// `### Tasks` still opens the task list.
    fn from_heading(line: &str) -> Self {
        if line.contains(TASKS_HEADING) {
            return Self::Tasks;
        }
        if line.contains(EXPECTED_HEADING) {
            return Self::Expected;
        }

        let title = heading_title(line);
        match title {
            "Goals for Today" => Self::Goals,
            "Notes" => Self::Notes,
            "Reflections" => Self::Reflections,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A classified line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'s, 'l> {
    /// A `##` heading that switched the current section
    Heading(&'l str),
    /// A body line inside the given section
    Body(&'s Section, &'l str),
}

/// Title text of a heading line (`## Notes` -> `Notes`)
pub fn heading_title(line: &str) -> &str {
    line.strip_prefix("##").unwrap_or(line).trim()
}

/// Is this line a section heading?
pub fn is_heading(line: &str) -> bool {
    line.starts_with("##")
}

/// Line-by-line section state machine
#[derive(Debug, Default)]
pub struct SectionTracker {
    current: Option<Section>,
    watched: Option<Section>,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker for a scan that collects the lines of `section`
    pub fn watching(section: Section) -> Self {
        Self {
            current: None,
            watched: Some(section),
        }
    }

    /// Current section (`Outside` before the first heading)
    pub fn current(&self) -> &Section {
        self.current.as_ref().unwrap_or(&Section::Outside)
    }

    /// Feed one line; headings update the state and are reported as such
    pub fn classify<'s, 'l>(&'s mut self, line: &'l str) -> Line<'s, 'l> {
        let opens_watched = self
            .watched
            .as_ref()
            .and_then(Section::marker)
            .is_some_and(|marker| line.contains(marker));

        if opens_watched {
            self.current = self.watched.clone();
            Line::Heading(line)
        } else if is_heading(line) {
            self.current = Some(Section::from_heading(line));
            Line::Heading(line)
        } else {
            Line::Body(self.current(), line)
        }
    }
}
