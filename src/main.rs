//! mknote: daily notes per project, with task carry-over and a clipboard grammar assistant

use anyhow::Result;
use clap::{Parser, Subcommand};

use mknote::config::Config;
use mknote::logging;
use mknote::notes::graph::MAX_MONTHS;

mod commands;

#[derive(Parser)]
#[command(name = "mknote")]
#[command(about = "Manage daily notes for projects", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase diagnostic output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project
    New {
        /// Name of the project
        project_name: String,
    },

    /// List existing projects with their contribution graphs
    List {
        /// Number of months to show in contribution graph
        #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_MONTHS)))]
        months: u32,
    },

    /// Create today's note for a project
    Daily {
        /// Name of the project
        project_name: String,
    },

    /// Show contribution graph for a specific project
    Stats {
        /// Name of the project
        project_name: String,

        /// Number of months to show in contribution graph
        #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_MONTHS)))]
        months: u32,
    },

    /// Show important items from project notes
    #[command(name = "i", visible_alias = "important")]
    Important {
        /// Name of the project
        project_name: String,
    },

    /// Check and correct grammar for text in clipboard
    Grammar {
        /// Paste the corrected text into the focused window
        #[arg(short, long)]
        paste: bool,
    },

    /// View grammar check logs
    GrammarLogs {
        /// Month to view logs for (YYYY-MM format)
        #[arg(long)]
        month: Option<String>,

        /// Maximum number of entries to display
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Display a specific entry in detail by its number
        #[arg(long)]
        entry: Option<String>,

        /// Export the specified entry to a file
        #[arg(long, requires = "entry")]
        export: bool,
    },

    /// Configure mknote settings (opens the editor when no option is given)
    Config {
        /// Base directory to save notes
        #[arg(long)]
        base_dir: Option<String>,

        /// Set Gemini API key for grammar checking
        #[arg(long)]
        gemini_key: Option<String>,

        /// Edit configuration in the configured editor
        #[arg(long)]
        edit: bool,
    },

    /// Open VS Code in the notes directory
    Code,

    /// Record clipboard text to today's session file
    Watch {
        /// Clipboard polling interval in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,

        /// Grammar-check each capture and write the correction back
        #[arg(short, long)]
        correct: bool,

        /// Paste corrections into the focused window
        #[arg(short, long, requires = "correct")]
        paste: bool,
    },

    /// Summarize a clipboard session with the language model
    Summarize {
        /// Session date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::enable_logging(cli.verbose);

    // `config` loads and saves on its own
    if let Commands::Config {
        base_dir,
        gemini_key,
        edit,
    } = cli.command
    {
        let options = commands::config::ConfigOptions {
            base_dir,
            gemini_key,
            edit,
        };
        return commands::config::execute(options);
    }

    let mut config = Config::load()?;
    tracing::debug!(base_dir = %config.base_dir().display(), "loaded config");

    match cli.command {
        Commands::New { project_name } => {
            commands::new::execute(&config, &project_name)?;
        }

        Commands::List { months } => {
            commands::list::execute(&config, months)?;
        }

        Commands::Daily { project_name } => {
            commands::daily::execute(&config, &project_name)?;
        }

        Commands::Stats {
            project_name,
            months,
        } => {
            commands::stats::execute(&config, &project_name, months)?;
        }

        Commands::Important { project_name } => {
            commands::important::execute(&config, &project_name)?;
        }

        Commands::Grammar { paste } => {
            commands::grammar::execute(&mut config, paste)?;
        }

        Commands::GrammarLogs {
            month,
            limit,
            entry,
            export,
        } => {
            let options = commands::grammar_logs::LogOptions {
                month,
                limit,
                entry,
                export,
            };
            commands::grammar_logs::execute(&config, options)?;
        }

        Commands::Code => {
            commands::code::execute(&config)?;
        }

        Commands::Watch {
            interval_ms,
            correct,
            paste,
        } => {
            let options = commands::watch::WatchOptions {
                interval_ms,
                correct,
                paste,
            };
            commands::watch::execute(&mut config, options)?;
        }

        Commands::Summarize { date } => {
            commands::summarize::execute(&mut config, date.as_deref())?;
        }

        Commands::Config { .. } => unreachable!("handled above"),
    }

    Ok(())
}
