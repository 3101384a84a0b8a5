//! CLI module for Sanke.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Sanke - Transcript Harvesting and Reporting
///
/// A CLI tool that turns a list of YouTube videos into one structured
/// Markdown report. The name "Sanke" comes from the Norwegian word for
/// "gather" or "harvest."
#[derive(Parser, Debug)]
#[command(name = "sanke")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, extract, and aggregate a batch of videos into a report
    Harvest {
        /// YouTube URLs or video IDs to process, in report order
        urls: Vec<String>,

        /// File with one URL per line (lines starting with # are skipped)
        #[arg(short, long)]
        input: Option<String>,

        /// Extraction schema: a preset name or a path to a TOML schema file
        #[arg(short, long)]
        schema: Option<String>,

        /// LLM model to use for extraction
        #[arg(short, long)]
        model: Option<String>,

        /// Maximum concurrent fetch+extract tasks
        #[arg(long)]
        max_concurrent: Option<usize>,

        /// Report title
        #[arg(short, long)]
        title: Option<String>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List built-in schemas, or show one as TOML
    Schemas {
        /// Schema name to show
        name: Option<String>,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
