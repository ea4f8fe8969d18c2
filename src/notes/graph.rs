//! Contribution graph: a per-day activity heat-map of a project

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Days, Duration, NaiveDate};
use std::collections::BTreeMap;
use std::fs;

use super::note;
use super::store::NoteStore;

/// Glyphs for activity levels 0..=4
const GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];

/// Highest activity level
pub const MAX_LEVEL: u8 = 4;

/// Longest history a graph covers
pub const MAX_MONTHS: u32 = 1200;

/// Completed tasks per level step
const TASKS_PER_LEVEL: usize = 3;

/// Activity level of a day
///
/// `None` means there is no note for the day.
pub fn activity_level(completed: Option<usize>) -> u8 {
    match completed {
        None => 0,
        Some(0) => 1,
        Some(n) => (1 + n / TASKS_PER_LEVEL).min(MAX_LEVEL as usize) as u8,
    }
}

/// Heat-map glyph of a level
pub fn glyph(level: u8) -> char {
    GLYPHS[level.min(MAX_LEVEL) as usize]
}

/// Activity levels for a project over a date range
#[derive(Debug, Clone)]
pub struct ContributionGraph {
    pub project: String,
    pub months: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    levels: BTreeMap<NaiveDate, u8>,
}

impl ContributionGraph {
    /// Scan the notes of `project` for the `months * 30` days up to `today`
    pub fn build(store: &NoteStore, project: &str, months: u32, today: NaiveDate) -> Result<Self> {
        if months > MAX_MONTHS {
            bail!("Cannot show more than {} months (got {})", MAX_MONTHS, months);
        }
        let start = today
            .checked_sub_days(Days::new(u64::from(months) * 30))
            .with_context(|| format!("{} months before {} is out of range", months, today))?;
        let mut levels = BTreeMap::new();

        let mut day = start;
        while day <= today {
            let path = store.note_path(project, day);
            let completed = if path.exists() {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read: {}", path.display()))?;
                Some(note::completed_count(&content))
            } else {
                None
            };
            levels.insert(day, activity_level(completed));
            day += Duration::days(1);
        }

        Ok(Self {
            project: project.to_string(),
            months,
            start,
            end: today,
            levels,
        })
    }

    /// Level recorded for `day` (0 outside the range)
    pub fn level(&self, day: NaiveDate) -> u8 {
        self.levels.get(&day).copied().unwrap_or(0)
    }

    /// Month names for every first-of-month in the range
    fn month_labels(&self) -> String {
        let mut label = String::new();
        let mut day = self.start;
        while day <= self.end {
            if day.day() == 1 {
                label.push_str(&format!("{}   ", day.format("%b")));
            }
            day += Duration::days(1);
        }
        label
    }

    /// One row per weekday, Monday first, one cell per week
    fn rows(&self) -> Vec<String> {
        let first_weekday = i64::from(self.start.weekday().num_days_from_monday());

        (0..7)
            .map(|day_of_week| {
                let mut row = String::new();
                let mut day = self.start + Duration::days((7 - first_weekday + day_of_week) % 7);
                while day <= self.end {
                    row.push(glyph(self.level(day)));
                    row.push(' ');
                    day += Duration::days(7);
                }
                row
            })
            .collect()
    }

    /// Render the graph as text
    pub fn render(&self) -> String {
        let mut lines = vec![
            String::new(),
            format!(
                "Contribution graph for {} (last {} months):",
                self.project, self.months
            ),
            format!("Less {} More", "─".repeat(20)),
            "█ = High activity  ▓ = Medium  ▒ = Low  ░ = Very Low  · = None".to_string(),
            String::new(),
            self.month_labels(),
        ];
        lines.extend(self.rows());
        lines.push(String::new());

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::store::DATE_FORMAT;
    use tempfile::tempdir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_activity_levels() {
        assert_eq!(activity_level(None), 0);
        assert_eq!(activity_level(Some(0)), 1);
        assert_eq!(activity_level(Some(1)), 1);
        assert_eq!(activity_level(Some(2)), 1);
        assert_eq!(activity_level(Some(3)), 2);
        assert_eq!(activity_level(Some(6)), 3);
        assert_eq!(activity_level(Some(9)), 4);
        assert_eq!(activity_level(Some(100)), 4);
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(glyph(0), '·');
        assert_eq!(glyph(1), '░');
        assert_eq!(glyph(4), '█');
        assert_eq!(glyph(9), '█');
    }

    #[test]
    fn test_build_reads_completed_tasks() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        store.create_project_dir("demo", date("2024-03-01")).unwrap();
        fs::write(store.note_path("demo", date("2024-03-10")), "nothing done").unwrap();
        fs::write(
            store.note_path("demo", date("2024-03-11")),
            "- [x] a\n- [x] b\n- [x] c\n- [x] d\n- [x] e\n- [x] f\n",
        )
        .unwrap();

        let graph = ContributionGraph::build(&store, "demo", 1, date("2024-03-12")).unwrap();
        assert_eq!(graph.start, date("2024-02-11"));
        assert_eq!(graph.level(date("2024-03-09")), 0);
        assert_eq!(graph.level(date("2024-03-10")), 1);
        assert_eq!(graph.level(date("2024-03-11")), 3);
    }

    #[test]
    fn test_render_layout() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        store.create_project_dir("demo", date("2024-03-01")).unwrap();

        // 2024-02-11 (Sunday) .. 2024-03-12 (Tuesday)
        let graph = ContributionGraph::build(&store, "demo", 1, date("2024-03-12")).unwrap();
        let out = graph.render();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[1], "Contribution graph for demo (last 1 months):");
        assert_eq!(lines[5], "Mar   ");

        // Monday row starts on 2024-02-12 and covers 5 Mondays up to 2024-03-11
        let rows = &lines[6..13];
        assert_eq!(rows[0].chars().filter(|c| *c == '·').count(), 5);
        // Sunday row starts on the start date itself: 2024-02-11 .. 2024-03-10
        assert_eq!(rows[6].chars().filter(|c| *c == '·').count(), 5);
        // Tuesday row: 2024-02-13 .. 2024-03-12
        assert_eq!(rows[1].chars().filter(|c| *c == '·').count(), 5);
        // Wednesday row ends before today: 2024-02-14 .. 2024-03-06
        assert_eq!(rows[2].chars().filter(|c| *c == '·').count(), 4);
    }

    #[test]
    fn test_build_rejects_out_of_range_months() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        store.create_project_dir("demo", date("2024-03-01")).unwrap();

        assert!(ContributionGraph::build(&store, "demo", 4_000_000, date("2024-03-01")).is_err());

        // Allowed count, but the window would start before the earliest date
        let early = NaiveDate::MIN + Duration::days(10);
        assert!(ContributionGraph::build(&store, "demo", MAX_MONTHS, early).is_err());
    }

    #[test]
    fn test_render_rows_use_level_glyphs() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        store.create_project_dir("demo", date("2024-03-01")).unwrap();

        // Mondays 2024-02-19, 02-26, 03-04 and 03-11 with 0, 3, 6 and 9 completed tasks
        let mondays = ["2024-02-19", "2024-02-26", "2024-03-04", "2024-03-11"];
        for (i, day) in mondays.iter().enumerate() {
            fs::write(store.note_path("demo", date(day)), "- [x] t\n".repeat(i * 3)).unwrap();
        }

        let graph = ContributionGraph::build(&store, "demo", 1, date("2024-03-12")).unwrap();
        let out = graph.render();
        let lines: Vec<&str> = out.lines().collect();

        // Monday row: 2024-02-12 has no note
        assert_eq!(lines[6], "· ░ ▒ ▓ █ ");
        assert!(lines[7..13].iter().all(|row| row.chars().all(|c| c == '·' || c == ' ')));
    }
}
