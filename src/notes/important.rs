//! Important items: text spans between `[!]` and `[!!]` markers

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::section::heading_title;
use super::store::{self, NoteStore};

/// Marker that opens an important item
pub const OPEN_MARKER: &str = "[!]";

/// Marker that closes an important item
pub const CLOSE_MARKER: &str = "[!!]";

/// One flagged span of a note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportantItem {
    /// Text strictly between the markers
    pub text: String,
    /// Heading active where the item was opened
    pub section: Option<String>,
    /// Date stem of the note file
    pub date: String,
}

/// Result of scanning one note
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportantScan {
    pub items: Vec<ImportantItem>,
    /// 1-based line of an opener that was never closed
    pub unterminated: Option<usize>,
}

struct OpenItem {
    line: usize,
    section: Option<String>,
    text: String,
}

/// Scan note content for important items
pub fn scan(content: &str, date: &str) -> ImportantScan {
    let mut result = ImportantScan::default();
    let mut section: Option<String> = None;
    let mut open: Option<OpenItem> = None;

    for (index, line) in content.split_inclusive('\n').enumerate() {
        if line.starts_with("##") {
            section = Some(heading_title(line).to_string());
            continue;
        }

        // Text of this line that may belong to an item
        let mut rest = line;
        let opener = line.find(OPEN_MARKER);

        if let Some(pos) = opener {
            rest = &line[pos + OPEN_MARKER.len()..];
            open = Some(OpenItem {
                line: index + 1,
                section: section.clone(),
                text: String::new(),
            });
        }

        let Some(item) = open.as_mut() else {
            continue;
        };

        let closed = match rest.find(CLOSE_MARKER) {
            Some(pos) => Some(&rest[..pos]),
            // A closer in front of the opener ends the item with the rest of the line
            None if opener.is_some() && line.contains(CLOSE_MARKER) => Some(rest),
            None => None,
        };

        match closed {
            Some(tail) => {
                item.text.push_str(tail);
                if let Some(item) = open.take() {
                    result.items.push(ImportantItem {
                        text: item.text,
                        section: item.section,
                        date: date.to_string(),
                    });
                }
            }
            None => item.text.push_str(rest),
        }
    }

    if let Some(item) = open {
        result.unterminated = Some(item.line);
    }

    result
}

/// Scan one note file; the date is taken from the file name
pub fn extract(path: &Path) -> Result<ImportantScan> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path.display()))?;
    let date = store::note_stem(path);
    let scan = scan(&content, &date);

    if let Some(line) = scan.unterminated {
        tracing::warn!(path = %path.display(), line, "important item opened with [!] but never closed");
    }
    Ok(scan)
}

/// Items of one note file whose opener has no matching close marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unterminated {
    pub date: String,
    pub line: usize,
}

/// All important items of a project
#[derive(Debug, Clone, Default)]
pub struct ProjectItems {
    /// Items, most recent note first
    pub items: Vec<ImportantItem>,
    pub unterminated: Vec<Unterminated>,
}

impl ProjectItems {
    /// Items grouped by note date, in display order
    pub fn by_date(&self) -> Vec<(&str, Vec<&ImportantItem>)> {
        let mut groups: Vec<(&str, Vec<&ImportantItem>)> = Vec::new();
        for item in &self.items {
            match groups.last_mut() {
                Some((date, group)) if *date == item.date => group.push(item),
                _ => groups.push((&item.date, vec![item])),
            }
        }
        groups
    }
}

/// Collect important items across every note of a project
pub fn collect_project(store: &NoteStore, project: &str) -> Result<ProjectItems> {
    let mut collected = ProjectItems::default();
    let project_dir = store.project_dir(project);

    for name in store.note_files(project)? {
        let scan = extract(&project_dir.join(&name))?;
        if let Some(line) = scan.unterminated {
            collected.unterminated.push(Unterminated {
                date: name.replace(".md", ""),
                line,
            });
        }
        collected.items.extend(scan.items);
    }

    // Stable, so items keep their order within a note
    collected.items.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::store::DATE_FORMAT;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_single_line_item() {
        let scan = scan("## A\ntext [!] inner [!!] more\n", "2024-03-01");
        assert_eq!(
            scan.items,
            vec![ImportantItem {
                text: " inner ".to_string(),
                section: Some("A".to_string()),
                date: "2024-03-01".to_string(),
            }]
        );
        assert!(scan.unterminated.is_none());
    }

    #[test]
    fn test_multi_line_item_keeps_newlines() {
        let content = "## Notes\nstart [!] first\nsecond\nthird [!!] tail\n";
        let scan = scan(content, "2024-03-01");
        assert_eq!(scan.items.len(), 1);
        assert_eq!(scan.items[0].text, " first\nsecond\nthird ");
    }

    #[test]
    fn test_section_recorded_at_opener() {
        let content = "## First\n[!] a\n## Second\nb [!!]\n";
        let scan = scan(content, "2024-03-01");
        assert_eq!(scan.items[0].section.as_deref(), Some("First"));
        // Heading lines are not part of the body
        assert_eq!(scan.items[0].text, " a\nb ");
    }

    #[test]
    fn test_unterminated_item_dropped_and_reported() {
        let content = "## A\n[!] one [!!]\nline\n[!] never closed\nmore\n";
        let scan = scan(content, "2024-03-01");
        assert_eq!(scan.items.len(), 1);
        assert_eq!(scan.unterminated, Some(4));
    }

    #[test]
    fn test_close_without_open_is_ignored() {
        let scan = scan("stray [!!] marker\n", "2024-03-01");
        assert!(scan.items.is_empty());
        assert!(scan.unterminated.is_none());
    }

    #[test]
    fn test_closer_before_opener_closes_item() {
        let content = "## A\nnote [!!] x [!] first\n[!] second [!!]\n";
        let scan = scan(content, "2024-03-01");
        let texts: Vec<&str> = scan.items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec![" first\n", " second "]);
        assert!(scan.unterminated.is_none());
    }

    #[test]
    fn test_new_opener_restarts_item() {
        let scan = scan("[!] abandoned\n[!] kept [!!]\n", "2024-03-01");
        assert_eq!(scan.items.len(), 1);
        assert_eq!(scan.items[0].text, " kept ");
    }

    #[test]
    fn test_item_before_any_heading_has_no_section() {
        let scan = scan("[!]x[!!]", "2024-03-01");
        assert_eq!(scan.items[0].section, None);
        assert_eq!(scan.items[0].text, "x");
    }

    #[test]
    fn test_collect_project_sorted_and_grouped() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        let day = |s: &str| NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap();
        store.create_project_dir("demo", day("2024-03-01")).unwrap();

        fs::write(
            store.note_path("demo", day("2024-03-01")),
            "## Notes\n[!] old [!!]\n",
        )
        .unwrap();
        fs::write(
            store.note_path("demo", day("2024-03-02")),
            "## Tasks\n[!] first [!!]\n## Notes\n[!] second [!!]\n[!] dangling\n",
        )
        .unwrap();

        let collected = collect_project(&store, "demo").unwrap();
        let texts: Vec<&str> = collected.items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec![" first ", " second ", " old "]);

        let groups = collected.by_date();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "2024-03-02");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "2024-03-01");

        assert_eq!(
            collected.unterminated,
            vec![Unterminated {
                date: "2024-03-02".to_string(),
                line: 5,
            }]
        );
    }
}
