//! Daily-note lifecycle: find the previous note, carry its open work forward, write today's

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use super::note;
use super::store::{self, NoteStore, DATE_FORMAT};
use super::template::{Template, TemplateVars};

/// Result of creating a daily note
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyOutcome {
    /// The note was written
    Created {
        path: PathBuf,
        /// Date stem of the note tasks were taken from
        previous: Option<String>,
        /// Number of lines carried into the Tasks section
        carried: usize,
    },
    /// The project directory does not exist
    ProjectMissing,
    /// A note for the date already exists and was left untouched
    AlreadyExists(PathBuf),
}

impl DailyOutcome {
    pub fn created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// Create the note for `today` in `project`
pub fn create_daily_note(
    store: &NoteStore,
    project: &str,
    today: NaiveDate,
    template: &Template,
) -> Result<DailyOutcome> {
    if !store.project_exists(project) {
        return Ok(DailyOutcome::ProjectMissing);
    }

    let path = store.note_path(project, today);
    if path.exists() {
        return Ok(DailyOutcome::AlreadyExists(path));
    }

    let (previous, carried) = match store.latest_note(project)? {
        Some(last) => {
            let content = fs::read_to_string(&last)
                .with_context(|| format!("Failed to read: {}", last.display()))?;
            let carried = note::open_work(&content).carried();
            let stem = store::note_stem(&last);
            tracing::debug!(previous = %stem, carried = carried.len(), "collected open work");
            (Some(stem), carried)
        }
        None => (None, Vec::new()),
    };

    let date = today.format(DATE_FORMAT).to_string();
    let content = template.render(&TemplateVars {
        date: &date,
        project_name: project,
        carried_tasks: &carried,
    });

    // Re-check right before writing; another invocation may have created it meanwhile
    if path.exists() {
        return Ok(DailyOutcome::AlreadyExists(path));
    }
    fs::write(&path, content).with_context(|| format!("Failed to write: {}", path.display()))?;
    tracing::info!(path = %path.display(), carried = carried.len(), "created daily note");

    Ok(DailyOutcome::Created {
        path,
        previous,
        carried: carried.len(),
    })
}

/// Result of creating a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectOutcome {
    Created {
        dir: PathBuf,
        first_note: DailyOutcome,
    },
    AlreadyExists,
}

/// Create a project directory, its README and its first daily note
pub fn create_project(
    store: &NoteStore,
    project: &str,
    today: NaiveDate,
    template: &Template,
) -> Result<ProjectOutcome> {
    if !store.create_project_dir(project, today)? {
        return Ok(ProjectOutcome::AlreadyExists);
    }

    let first_note = create_daily_note(store, project, today, template)?;
    Ok(ProjectOutcome::Created {
        dir: store.project_dir(project),
        first_note,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::section::TASKS_HEADING;
    use tempfile::tempdir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    /// Lines between `## Tasks` and the next heading, blank lines dropped
    fn tasks_section(content: &str) -> Vec<String> {
        content
            .lines()
            .skip_while(|l| !l.contains(TASKS_HEADING))
            .skip(1)
            .take_while(|l| !l.starts_with("##"))
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_missing_project_is_soft_failure() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        let outcome =
            create_daily_note(&store, "ghost", date("2024-03-01"), &Template::default()).unwrap();
        assert_eq!(outcome, DailyOutcome::ProjectMissing);
        assert!(!outcome.created());
        assert!(!dir.path().join("ghost").exists());
    }

    #[test]
    fn test_second_call_same_day_does_not_overwrite() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        let today = date("2024-03-01");
        create_project(&store, "demo", today, &Template::default()).unwrap();

        let path = store.note_path("demo", today);
        fs::write(&path, "my edits").unwrap();

        let outcome = create_daily_note(&store, "demo", today, &Template::default()).unwrap();
        assert_eq!(outcome, DailyOutcome::AlreadyExists(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "my edits");
    }

    #[test]
    fn test_first_note_uses_placeholders() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        let today = date("2024-03-01");

        let outcome = create_project(&store, "demo", today, &Template::default()).unwrap();
        let ProjectOutcome::Created { first_note, .. } = outcome else {
            panic!("project should be created");
        };
        assert_eq!(
            first_note,
            DailyOutcome::Created {
                path: store.note_path("demo", today),
                previous: None,
                carried: 0,
            }
        );

        let content = fs::read_to_string(store.note_path("demo", today)).unwrap();
        assert_eq!(
            tasks_section(&content),
            vec![" -  Task 0", " -  Task 1", " -  Task 2"]
        );
    }

    #[test]
    fn test_carry_over_incomplete_then_expected() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        store.create_project_dir("demo", date("2024-03-01")).unwrap();
        fs::write(
            store.note_path("demo", date("2024-03-01")),
            "## Tasks\n- [ ] one\n- [x] done\n- [ ] two\n\n## Expected for Tomorrow\n- three\n",
        )
        .unwrap();

        let outcome =
            create_daily_note(&store, "demo", date("2024-03-02"), &Template::default()).unwrap();
        assert_eq!(
            outcome,
            DailyOutcome::Created {
                path: store.note_path("demo", date("2024-03-02")),
                previous: Some("2024-03-01".to_string()),
                carried: 3,
            }
        );

        let content = fs::read_to_string(store.note_path("demo", date("2024-03-02"))).unwrap();
        assert_eq!(
            tasks_section(&content),
            vec!["- [ ] one", "- [ ] two", "- three"]
        );
        // Expected section of the new note is never seeded
        assert!(content.contains("## Expected for Tomorrow\n- No expected tasks"));
    }

    #[test]
    fn test_nothing_to_carry_uses_placeholders() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        store.create_project_dir("demo", date("2024-03-01")).unwrap();
        fs::write(
            store.note_path("demo", date("2024-03-01")),
            "## Tasks\n- [x] all done\n",
        )
        .unwrap();

        let outcome =
            create_daily_note(&store, "demo", date("2024-03-05"), &Template::default()).unwrap();
        assert!(outcome.created());
        let content = fs::read_to_string(store.note_path("demo", date("2024-03-05"))).unwrap();
        assert_eq!(tasks_section(&content).len(), 3);
    }

    #[test]
    fn test_picks_latest_note_by_name() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        store.create_project_dir("demo", date("2024-01-01")).unwrap();
        fs::write(
            store.note_path("demo", date("2024-01-09")),
            "## Tasks\n- [ ] old\n",
        )
        .unwrap();
        fs::write(
            store.note_path("demo", date("2024-01-10")),
            "## Tasks\n- [ ] new\n",
        )
        .unwrap();

        create_daily_note(&store, "demo", date("2024-01-11"), &Template::default()).unwrap();
        let content = fs::read_to_string(store.note_path("demo", date("2024-01-11"))).unwrap();
        assert_eq!(tasks_section(&content), vec!["- [ ] new"]);
    }

    #[test]
    fn test_create_project_twice() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        let today = date("2024-03-01");

        let first = create_project(&store, "demo", today, &Template::default()).unwrap();
        assert!(matches!(first, ProjectOutcome::Created { .. }));

        let before: Vec<_> = fs::read_dir(dir.path().join("demo"))
            .unwrap()
            .flatten()
            .map(|e| e.file_name())
            .collect();

        let second = create_project(&store, "demo", today, &Template::default()).unwrap();
        assert_eq!(second, ProjectOutcome::AlreadyExists);

        let after: Vec<_> = fs::read_dir(dir.path().join("demo"))
            .unwrap()
            .flatten()
            .map(|e| e.file_name())
            .collect();
        assert_eq!(before.len(), after.len());
    }
}
