//! Daily-note template rendering

use std::fs;
use std::path::Path;

/// Built-in daily-note template
pub const DEFAULT_TEMPLATE: &str = "# Daily Note - {date} - {project_name}

## Goals for Today
- [ ] Goal 1
- [ ] Goal 2
- [ ] Goal 3

## Tasks
{carried_tasks}

## Notes
- Note 1
- Note 2

## Expected for Tomorrow
{expected_tasks}

## Reflections
- What went well today?
- What could be improved?
";

/// Expected section of every freshly created note
pub const NO_EXPECTED_TASKS: &str = "- No expected tasks";

/// Number of placeholder task lines used when nothing is carried over
pub const PLACEHOLDER_TASKS: usize = 3;

/// Values substituted into a template
#[derive(Debug, Clone)]
pub struct TemplateVars<'a> {
    pub date: &'a str,
    pub project_name: &'a str,
    pub carried_tasks: &'a [String],
}

/// Placeholder lines for an empty Tasks section
pub fn placeholder_tasks() -> Vec<String> {
    (0..PLACEHOLDER_TASKS)
        .map(|i| format!(" -  Task {}", i))
        .collect()
}

/// A daily-note template
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Load a custom template, falling back to the built-in one if it cannot be read
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match fs::read_to_string(path) {
            Ok(text) => Self::new(text),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "custom template unreadable, using built-in");
                Self::default()
            }
        }
    }

    /// Render the template
    ///
    /// An empty `carried_tasks` renders the placeholder lines instead.
    pub fn render(&self, vars: &TemplateVars<'_>) -> String {
        let carried = if vars.carried_tasks.is_empty() {
            placeholder_tasks().join("\n")
        } else {
            vars.carried_tasks.join("\n")
        };

        self.text
            .replace("{date}", vars.date)
            .replace("{project_name}", vars.project_name)
            .replace("{expected_tasks}", NO_EXPECTED_TASKS)
            .replace("{carried_tasks}", &carried)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_render_with_carried_tasks() {
        let tasks = vec!["- [ ] a".to_string(), "- [ ] b".to_string()];
        let out = Template::default().render(&TemplateVars {
            date: "2024-03-01",
            project_name: "demo",
            carried_tasks: &tasks,
        });

        assert!(out.starts_with("# Daily Note - 2024-03-01 - demo\n"));
        assert!(out.contains("## Tasks\n- [ ] a\n- [ ] b\n\n## Notes"));
        assert!(out.contains("## Expected for Tomorrow\n- No expected tasks\n"));
    }

    #[test]
    fn test_render_placeholders_when_nothing_carried() {
        let out = Template::default().render(&TemplateVars {
            date: "2024-03-01",
            project_name: "demo",
            carried_tasks: &[],
        });
        assert!(out.contains("## Tasks\n -  Task 0\n -  Task 1\n -  Task 2\n\n## Notes"));
    }

    #[test]
    fn test_custom_template_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{project_name}} @ {{date}}\n{{carried_tasks}}").unwrap();

        let template = Template::load(Some(file.path()));
        let tasks = vec!["- [ ] x".to_string()];
        let out = template.render(&TemplateVars {
            date: "2024-03-01",
            project_name: "demo",
            carried_tasks: &tasks,
        });
        assert_eq!(out, "demo @ 2024-03-01\n- [ ] x");
    }

    #[test]
    fn test_missing_custom_template_falls_back() {
        let template = Template::load(Some(Path::new("/nonexistent/template.md")));
        let out = template.render(&TemplateVars {
            date: "2024-03-01",
            project_name: "demo",
            carried_tasks: &[],
        });
        assert!(out.contains("## Reflections"));
    }
}
