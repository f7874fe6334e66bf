//! CLI command definitions and argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Clausewise - Segment contracts into clauses and flag risky terms.
#[derive(Debug, Parser)]
#[command(name = "clausewise")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CLAUSEWISE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full review pipeline over a contract
    Analyze(AnalyzeArgs),

    /// Show the clause tree of a contract
    Segment(SegmentArgs),

    /// Classify a piece of clause text
    Classify(ClassifyArgs),

    /// List the active risk rules
    Rules(RulesArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Contract text file, or '-' for stdin
    #[arg(default_value = "-")]
    pub input: String,

    /// Contract type (e.g. nda, services, employment)
    #[arg(short = 't', long)]
    pub contract_type: Option<String>,

    /// Reviewing party (e.g. employee, employer, vendor, client)
    #[arg(short, long)]
    pub perspective: Option<String>,

    /// Additional rules (JSON or TOML playbook)
    #[arg(long)]
    pub playbook: Option<PathBuf>,
}

/// Arguments for the segment command.
#[derive(Debug, Parser)]
pub struct SegmentArgs {
    /// Contract text file, or '-' for stdin
    #[arg(default_value = "-")]
    pub input: String,
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Clause text file, or '-' for stdin
    #[arg(default_value = "-")]
    pub input: String,

    /// Clause heading
    #[arg(long, default_value = "")]
    pub title: String,
}

/// Arguments for the rules command.
#[derive(Debug, Parser)]
pub struct RulesArgs {
    /// Playbook whose rules are appended to the built-in ones
    #[arg(long)]
    pub playbook: Option<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
