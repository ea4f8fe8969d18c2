//! mknote library
//!
//! Core functionality for project-scoped daily notes: note storage and carry-over,
//! contribution graphs, important-item extraction, and the clipboard grammar assistant.

pub mod clipboard;
pub mod config;
pub mod desktop;
pub mod gemini;
pub mod grammar;
pub mod logging;
pub mod notes;
pub mod session;
pub mod spinner;
