//! Check command implementation.
//!
//! The `check-environment check` command (also the default) inspects the
//! interpreter and every requirement and prints one line per verdict.

use std::io::Write;

use crate::cli::args::Cli;
use crate::error::Result;
use crate::requirements::{EnvironmentChecker, PackageProbe, PythonProbe, RequirementRegistry};
use crate::ui::{Output, OutputFormat, OutputStyle};
use crate::version::Version;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    probe: Box<dyn PackageProbe>,
    registry: RequirementRegistry,
    min_python: Version,
    output: Output,
    strict: bool,
}

impl CheckCommand {
    /// Create a check command with an explicit probe and registry.
    pub fn new(
        probe: Box<dyn PackageProbe>,
        registry: RequirementRegistry,
        min_python: Version,
        output: Output,
    ) -> Self {
        Self {
            probe,
            registry,
            min_python,
            output,
            strict: false,
        }
    }

    /// Build the command from parsed arguments.
    pub fn from_cli(cli: &Cli, style: OutputStyle) -> Self {
        let style = match cli.format {
            OutputFormat::Json => OutputStyle::Plain,
            OutputFormat::Text => style,
        };
        Self::new(
            Box::new(PythonProbe::new(&cli.python)),
            RequirementRegistry::new(),
            cli.min_python.clone(),
            Output::new(cli.format, style),
        )
        .strict(cli.strict)
    }

    /// Exit non-zero when any check fails.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Command for CheckCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let checker = EnvironmentChecker::new(
            self.probe.as_ref(),
            &self.registry,
            self.min_python.clone(),
        );
        let report = checker.run();
        self.output.write_report(out, &report)?;

        tracing::debug!(
            "{} of {} checks failed",
            report.failure_count(),
            report.results.len() + 1
        );

        if self.strict && !report.all_ok() {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
