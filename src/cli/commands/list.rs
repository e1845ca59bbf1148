//! List command implementation.
//!
//! The `check-environment list` command shows the requirement table
//! without touching any interpreter.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::requirements::probe::VersionAccessor;
use crate::requirements::RequirementRegistry;
use crate::ui::OutputFormat;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    registry: RequirementRegistry,
    format: OutputFormat,
}

#[derive(Serialize)]
struct ListEntry<'a> {
    package: &'a str,
    minimum: Option<&'a str>,
    version_attribute: Option<&'static str>,
}

impl ListCommand {
    /// List the built-in requirements.
    pub fn new(format: OutputFormat) -> Self {
        Self::with_registry(RequirementRegistry::new(), format)
    }

    /// List a specific registry.
    pub fn with_registry(registry: RequirementRegistry, format: OutputFormat) -> Self {
        Self { registry, format }
    }
}

impl Command for ListCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let entries: Vec<_> = self
            .registry
            .iter()
            .map(|req| ListEntry {
                package: &req.name,
                minimum: req.minimum.as_ref().map(|v| v.as_str()),
                version_attribute: req
                    .minimum
                    .as_ref()
                    .map(|_| VersionAccessor::for_package(&req.name).attribute()),
            })
            .collect();

        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &entries)?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                let width = entries.iter().map(|e| e.package.len()).max().unwrap_or(0);
                for entry in &entries {
                    match entry.minimum {
                        Some(min) => writeln!(out, "{:<width$}  >= {}", entry.package, min)?,
                        None => writeln!(out, "{:<width$}  any version", entry.package)?,
                    }
                }
            }
        }
        Ok(CommandResult::success())
    }
}
