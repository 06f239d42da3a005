use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wordtally", version)]
#[command(about = "Track how many words you add to your documents each day", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record the current contents of one or more files
    #[command(alias = "o")]
    Observe {
        /// Files to observe
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Directory file keys are relative to (defaults to the current directory)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Show today's total and per-file deltas
    #[command(alias = "t")]
    Today,

    /// Write the current state to disk now and print it
    Flush,

    /// List per-day totals, most recent first
    #[command(alias = "ls")]
    History {
        /// Only show the N most recent days
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show the per-file breakdown of a day (defaults to today)
    Show {
        /// Day as YYYY-MM-DD
        day: Option<String>,
    },

    /// Watch a directory and track files as they are saved
    #[command(alias = "w")]
    Watch {
        /// Directory to watch (defaults to the current directory)
        dir: Option<PathBuf>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (backend, extensions)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print the data, config and state locations
    Paths,
}
