use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::pipeline::Selector;

#[derive(Debug, Parser)]
#[command(name = "scribe")]
#[command(version, about = "Generate an article on any topic and keep a browsable history")]
pub struct Cli {
    /// TOML settings file (defaults to $SCRIBE_CONFIG, then ./scribe.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Generate one article and print it as markdown
    Generate {
        /// Topic of the article; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,

        /// Print the article while it is being written
        #[arg(long)]
        stream: bool,
    },

    /// List stored articles, newest first
    History {
        /// Show at most this many entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Print a stored article
    Show {
        /// `N` or `#N` for the N-th newest entry, or a key / unique key prefix
        selector: Selector,
    },

    /// Prompt for topics until `/quit` (the default)
    Interactive,
}

impl Cli {
    /// The subcommand to run, falling back to the interactive session.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Interactive)
    }
}
