//! Report rendering.

use std::io::Write;

use serde::Serialize;

use super::icons::format_line;
use super::theme::{OutputStyle, Theme};
use crate::error::Result;
use crate::requirements::checker::Report;

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One diagnostic line per check.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    ok: bool,
    #[serde(flatten)]
    report: &'a Report,
}

/// Writes reports in the chosen format and style.
#[derive(Debug)]
pub struct Output {
    format: OutputFormat,
    theme: Theme,
}

impl Output {
    /// Create a new report writer.
    pub fn new(format: OutputFormat, style: OutputStyle) -> Self {
        Self {
            format,
            theme: Theme::for_style(style),
        }
    }

    /// Get the output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write a whole report.
    pub fn write_report(&self, out: &mut dyn Write, report: &Report) -> Result<()> {
        match self.format {
            OutputFormat::Text => self.write_text(out, report),
            OutputFormat::Json => {
                let doc = JsonReport {
                    ok: report.all_ok(),
                    report,
                };
                serde_json::to_writer_pretty(&mut *out, &doc)?;
                writeln!(out)?;
                Ok(())
            }
        }
    }

    fn write_text(&self, out: &mut dyn Write, report: &Report) -> Result<()> {
        if let Some(info) = &report.interpreter {
            writeln!(out, "Using python in {}", info.prefix)?;
            writeln!(out, "{}", info.version)?;
        }
        if !report.interpreter_check.is_ok() {
            writeln!(out, "{}", format_line(&report.interpreter_check, &self.theme))?;
        }

        writeln!(out)?;
        for result in &report.results {
            writeln!(out, "{}", format_line(result, &self.theme))?;
        }
        Ok(())
    }
}
