// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `labeljury`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "labeljury",
    version,
    about = "Analyze an ingredient-label photo and produce a verdict.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the label photo. If omitted, the run proceeds on the
    /// documented "No image provided." text.
    #[arg(long, value_name = "PATH")]
    pub image: Option<String>,

    /// Who the analysis is for (e.g. "Athlete", "Parent").
    #[arg(long, value_name = "TEXT", default_value = "Athlete")]
    pub persona: String,

    /// Path to the config file (TOML).
    ///
    /// Default: `Labeljury.toml` in the current working directory, if it
    /// exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `LABELJURY_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Build + validate the graph, print the execution plan, but call no
    /// collaborator.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
