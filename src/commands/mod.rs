//! CLI commands

pub mod code;
pub mod config;
pub mod daily;
pub mod grammar;
pub mod grammar_logs;
pub mod important;
pub mod list;
pub mod new;
pub mod stats;
pub mod summarize;
pub mod utils;
pub mod watch;
