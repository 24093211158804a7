// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The CLI is a thin shell over the library: every subcommand maps onto one
//! execution-engine call or one orchestration task in [`crate::ops`].

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `shipkit`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "shipkit",
    version,
    about = "Package, publish and wire up deployment pipelines for your services.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the project file (TOML).
    ///
    /// Default: `Shipkit.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Shipkit.toml")]
    pub project: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SHIPKIT_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Log extra environment entries and redacted command output.
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Run an arbitrary command through the execution engine.
    Exec {
        /// Program and arguments to execute.
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "COMMAND"
        )]
        command: Vec<String>,

        /// Wrap the invocation in the platform shell.
        #[arg(long)]
        shell: bool,

        /// Attach the command to this terminal instead of capturing output.
        #[arg(long)]
        interactive: bool,
    },

    /// Compress the service's build output into a deployable archive.
    Package,

    /// Package the service and publish it with the configured provider CLI.
    Publish,

    /// Create and configure the deployment pipeline for the git remote.
    PipelineConfig,
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
