//! Daily notes: storage, parsing and reports

pub mod daily;
pub mod graph;
pub mod important;
pub mod note;
pub mod section;
pub mod store;
pub mod template;

// Re-exports for library consumers
pub use daily::{create_daily_note, create_project, DailyOutcome, ProjectOutcome};
pub use graph::ContributionGraph;
pub use store::NoteStore;
pub use template::Template;
