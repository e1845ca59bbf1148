//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::OutputStyle;

use super::check::CheckCommand;
use super::list::ListCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, writing its report to `out`.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self { exit_code }
    }

    /// Whether the command succeeded.
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    style: OutputStyle,
}

impl CommandDispatcher {
    /// Create a new dispatcher that renders in the given style.
    pub fn new(style: OutputStyle) -> Self {
        Self { style }
    }

    /// Get the output style.
    pub fn style(&self) -> OutputStyle {
        self.style
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. With no subcommand, the environment is checked.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        match cli.command.unwrap_or(Commands::Check) {
            Commands::Check => CheckCommand::from_cli(cli, self.style).execute(out),
            Commands::List => ListCommand::new(cli.format).execute(out),
        }
    }
}
