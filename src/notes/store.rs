//! Project and note files on disk
//!
//! Layout: `<base_dir>/<project>/<YYYY-MM-DD>.md`, with `README.md` reserved in each
//! project directory.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// File name reserved for the project description
pub const README: &str = "README.md";

/// Date format used in note file names
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Access to the notes tree under one base directory
#[derive(Debug, Clone)]
pub struct NoteStore {
    base_dir: PathBuf,
}

impl NoteStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn project_dir(&self, project: &str) -> PathBuf {
        self.base_dir.join(project)
    }

    pub fn project_exists(&self, project: &str) -> bool {
        self.project_dir(project).is_dir()
    }

    /// Path of the note for `date`
    pub fn note_path(&self, project: &str, date: NaiveDate) -> PathBuf {
        self.project_dir(project)
            .join(format!("{}.md", date.format(DATE_FORMAT)))
    }

    /// Sorted names of all projects
    ///
    /// Directories starting with `_` or `.` hold tool data (e.g. `_logs`) and are skipped.
    pub fn list_projects(&self) -> Result<Vec<String>> {
        let mut projects = Vec::new();

        if !self.base_dir.exists() {
            return Ok(projects);
        }

        let entries = fs::read_dir(&self.base_dir)
            .with_context(|| format!("Failed to read: {}", self.base_dir.display()))?;

        for entry in entries.flatten() {
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('_') || name.starts_with('.') {
                continue;
            }
            projects.push(name);
        }

        projects.sort();
        Ok(projects)
    }

    /// Note file names of a project, most recent first
    ///
    /// Names are `YYYY-MM-DD.md`, fixed width and zero padded, so a descending string sort
    /// is a descending date sort.
    pub fn note_files(&self, project: &str) -> Result<Vec<String>> {
        let project_dir = self.project_dir(project);
        let mut files = Vec::new();

        if !project_dir.exists() {
            return Ok(files);
        }

        let entries = fs::read_dir(&project_dir)
            .with_context(|| format!("Failed to read: {}", project_dir.display()))?;

        for entry in entries.flatten() {
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(".md") && name != README {
                files.push(name);
            }
        }

        files.sort_by(|a, b| b.cmp(a));
        Ok(files)
    }

    /// The most recent note of a project
    pub fn latest_note(&self, project: &str) -> Result<Option<PathBuf>> {
        let files = self.note_files(project)?;
        Ok(files
            .into_iter()
            .next()
            .map(|name| self.project_dir(project).join(name)))
    }

    /// Create the project directory and its README
    ///
    /// Returns `false` without touching the disk if the directory already exists.
    pub fn create_project_dir(&self, project: &str, today: NaiveDate) -> Result<bool> {
        let project_dir = self.project_dir(project);
        if project_dir.exists() {
            return Ok(false);
        }

        fs::create_dir_all(&project_dir)
            .with_context(|| format!("Failed to create: {}", project_dir.display()))?;

        let readme = project_dir.join(README);
        let content = format!(
            "# {}\n\nProject created on {}",
            project,
            today.format(DATE_FORMAT)
        );
        fs::write(&readme, content)
            .with_context(|| format!("Failed to write: {}", readme.display()))?;

        Ok(true)
    }
}

/// Date stem of a note path (`/x/2024-03-01.md` -> `2024-03-01`)
pub fn note_stem(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().replace(".md", ""))
        .unwrap_or_default()
}
