//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};

use crate::requirements::checker::parse_minimum;
use crate::requirements::probe::default_python;
use crate::ui::OutputFormat;
use crate::version::Version;

/// Default required interpreter version.
pub const DEFAULT_MIN_PYTHON: &str = "3.10";

/// Check that a Python environment is ready for the course.
#[derive(Debug, Parser)]
#[command(name = "check-environment")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Python interpreter to inspect (name on PATH or full path)
    #[arg(long, global = true, env = "ENVCHECK_PYTHON", default_value = default_python())]
    pub python: String,

    /// Lowest acceptable interpreter version; its major version must match exactly
    #[arg(
        long,
        global = true,
        env = "ENVCHECK_MIN_PYTHON",
        default_value = DEFAULT_MIN_PYTHON,
        value_parser = min_python_parser
    )]
    pub min_python: Version,

    /// Report format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit with status 1 when any check fails
    #[arg(long, global = true)]
    pub strict: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Commands {
    /// Check the interpreter and every requirement (default if no command specified)
    Check,

    /// Show the requirement table
    List,
}

fn min_python_parser(value: &str) -> Result<Version, String> {
    parse_minimum(value).map_err(|e| e.to_string())
}
