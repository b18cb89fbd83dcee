//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the gmpf CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// gmpf - Normalize, inspect and edit GMP filter strings
#[derive(Parser, Debug)]
#[command(name = "gmpf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (log dropped filter fragments)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the canonical form of a filter
    #[command(alias = "n")]
    Normalize {
        /// Filter expression (e.g., "name~scan rows=10 first=1")
        filter: String,

        /// Fail instead of dropping malformed terms
        #[arg(long)]
        strict: bool,
    },

    /// Print the effective value of a keyword
    Get {
        /// Filter expression
        filter: String,

        /// Keyword to look up
        keyword: String,
    },

    /// Set a keyword and print the resulting filter
    Set {
        /// Filter expression
        filter: String,

        /// Keyword to set
        keyword: String,

        /// Value to set
        value: String,

        /// Relation symbol (=, ~, >, <, :)
        #[arg(short, long, default_value = "=")]
        relation: String,
    },

    /// Remove every term for a keyword and print the resulting filter
    #[command(alias = "rm")]
    Remove {
        /// Filter expression
        filter: String,

        /// Keyword to remove
        keyword: String,
    },

    /// Merge a filter into another and print the result
    Merge {
        /// Filter currently shown
        base: String,

        /// Filter applied on top (e.g., a saved filter)
        other: String,

        /// Keep the base filter's first/rows (default from config)
        #[arg(long, overrides_with = "reset_paging")]
        keep_paging: bool,

        /// Take first/rows from the other filter
        #[arg(long)]
        reset_paging: bool,
    },

    /// Move a filter to another page
    Page {
        /// Filter expression
        filter: String,

        #[command(flatten)]
        target: PageTarget,
    },

    /// Report malformed or suspicious terms
    Check {
        /// Filter expression
        filter: String,
    },

    /// Compute pagination from raw listing counts
    Counts(CountsArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Page to move to.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct PageTarget {
    /// Next page
    #[arg(long)]
    pub next: bool,

    /// Previous page
    #[arg(long)]
    pub previous: bool,

    /// First page
    #[arg(long)]
    pub first: bool,

    /// Everything on one page
    #[arg(long)]
    pub all: bool,
}

/// Raw counts, given directly or read from a response file.
#[derive(Args, Debug)]
pub struct CountsArgs {
    /// Offset of the returned page
    #[arg(long, conflicts_with = "response")]
    pub first: Option<String>,

    /// Requested page size
    #[arg(long, conflicts_with = "response")]
    pub rows: Option<String>,

    /// Number of entities returned
    #[arg(long, conflicts_with = "response")]
    pub length: Option<String>,

    /// Number of entities matching the filter
    #[arg(long, conflicts_with = "response")]
    pub filtered: Option<String>,

    /// Number of entities ignoring the filter
    #[arg(long, conflicts_with = "response")]
    pub all: Option<String>,

    /// JSON listing response to read counts from
    #[arg(long, requires = "entity")]
    pub response: Option<std::path::PathBuf>,

    /// Entity name in the response (e.g., "task")
    #[arg(long)]
    pub entity: Option<String>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print config file path
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "filter.rows", "output.color")
        key: String,

        /// Value to set
        value: String,
    },
}

/// Shell types for completions
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}
