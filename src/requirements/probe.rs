//! Interpreter probe for importing packages and reading their versions.
//!
//! Nothing about a Python environment can be learned from the outside
//! reliably: packages live wherever the interpreter's import machinery says
//! they live. The probe therefore asks the interpreter itself, spawning one
//! short-lived child per question.
//!
//! # Example
//!
//! ```no_run
//! use envcheck::requirements::probe::{PackageProbe, PythonProbe, VersionAccessor};
//!
//! let probe = PythonProbe::new("python3");
//! let info = probe.interpreter().unwrap();
//! println!("Using python in {}", info.prefix);
//! let numpy = probe.import("numpy", Some(VersionAccessor::for_package("numpy")));
//! println!("{:?}", numpy);
//! ```

use std::ffi::{OsStr, OsString};
use std::process::Command;

use serde::Serialize;
use thiserror::Error;

/// Prints `sys.prefix` on the first line and `sys.version` after it.
const INTERPRETER_SCRIPT: &str = r#"import sys
sys.stdout.write(sys.prefix + "\n" + sys.version + "\n")
"#;

/// Imports `argv[1]` and, when given, prints attribute `argv[2]` of it.
///
/// Whatever the import writes to stdout is sent to stderr; the version is
/// the first line after [`VERSION_MARKER`].
const IMPORT_SCRIPT: &str = r#"import contextlib, importlib, sys
try:
    with contextlib.redirect_stdout(sys.stderr):
        mod = importlib.import_module(sys.argv[1])
except Exception as exc:
    sys.stderr.write("%s: %s\n" % (type(exc).__name__, exc))
    sys.exit(3)
if len(sys.argv) > 2:
    value = getattr(mod, sys.argv[2], None)
    if value is None:
        sys.exit(4)
    if isinstance(value, tuple):
        value = ".".join(str(part) for part in value)
    sys.stdout.write("\n%s\n%s\n" % (sys.argv[3], value))
    sys.stdout.flush()
"#;

/// Line that precedes the version in the import script's stdout.
const VERSION_MARKER: &str = "--envcheck-version--";

const EXIT_IMPORT_FAILED: i32 = 3;
const EXIT_NO_VERSION: i32 = 4;

/// Packages that publish their version under a non-standard attribute.
const ACCESSOR_EXCEPTIONS: &[(&str, &str)] = &[("PIL", "VERSION"), ("xlrd", "__VERSION__")];

/// Where a package keeps its self-reported version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionAccessor {
    /// The conventional `__version__` attribute.
    Dunder,
    /// A package-specific attribute.
    Attribute(&'static str),
}

impl VersionAccessor {
    /// Look up the accessor for a package name.
    pub fn for_package(package: &str) -> Self {
        ACCESSOR_EXCEPTIONS
            .iter()
            .find(|(name, _)| *name == package)
            .map(|(_, attr)| VersionAccessor::Attribute(*attr))
            .unwrap_or(VersionAccessor::Dunder)
    }

    /// The attribute name to read.
    pub fn attribute(&self) -> &'static str {
        match self {
            VersionAccessor::Dunder => "__version__",
            VersionAccessor::Attribute(attr) => *attr,
        }
    }
}

/// What the interpreter says about itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpreterInfo {
    /// Installation prefix (`sys.prefix`).
    pub prefix: String,
    /// Full version banner (`sys.version`).
    pub version: String,
}

/// Why a probe could not produce an answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The package could not be imported.
    #[error("not installed")]
    NotFound,

    /// The package imported but lacks the version attribute.
    #[error("no '{attribute}' attribute")]
    NoVersion { attribute: String },

    /// The interpreter could not be started.
    #[error("could not run {program}: {message}")]
    Launch { program: String, message: String },

    /// The interpreter ran but answered in an unexpected way.
    #[error("interpreter exited with {status}: {stderr}")]
    Unexpected { status: String, stderr: String },
}

/// Capability probe against a Python environment.
///
/// Implemented by [`PythonProbe`] for real interpreters; tests substitute
/// their own tables.
pub trait PackageProbe {
    /// Report the interpreter's prefix and version.
    fn interpreter(&self) -> Result<InterpreterInfo, ProbeError>;

    /// Import `package`. With an accessor, also return its version string.
    ///
    /// Returns `Ok(None)` when no accessor was given and the import worked.
    fn import(
        &self,
        package: &str,
        accessor: Option<VersionAccessor>,
    ) -> Result<Option<String>, ProbeError>;
}

/// Probe backed by a Python executable.
#[derive(Debug, Clone)]
pub struct PythonProbe {
    program: OsString,
}

impl PythonProbe {
    /// Create a probe for the given interpreter (path or name on PATH).
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
        }
    }

    /// The interpreter this probe runs.
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    fn run(&self, script: &str, args: &[&str]) -> Result<std::process::Output, ProbeError> {
        tracing::debug!(
            "Running {} -c <script> {:?}",
            self.program.to_string_lossy(),
            args
        );
        Command::new(&self.program)
            .arg("-c")
            .arg(script)
            .args(args)
            .output()
            .map_err(|e| ProbeError::Launch {
                program: self.program.to_string_lossy().to_string(),
                message: e.to_string(),
            })
    }
}

impl PackageProbe for PythonProbe {
    fn interpreter(&self) -> Result<InterpreterInfo, ProbeError> {
        let output = self.run(INTERPRETER_SCRIPT, &[])?;
        if !output.status.success() {
            return Err(unexpected(&output));
        }
        parse_interpreter_output(&String::from_utf8_lossy(&output.stdout))
            .ok_or_else(|| unexpected(&output))
    }

    fn import(
        &self,
        package: &str,
        accessor: Option<VersionAccessor>,
    ) -> Result<Option<String>, ProbeError> {
        let output = match accessor {
            Some(acc) => {
                self.run(IMPORT_SCRIPT, &[package, acc.attribute(), VERSION_MARKER])?
            }
            None => self.run(IMPORT_SCRIPT, &[package])?,
        };

        match output.status.code() {
            Some(0) => {}
            Some(EXIT_IMPORT_FAILED) => {
                tracing::debug!(
                    "Import of {} failed: {}",
                    package,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                return Err(ProbeError::NotFound);
            }
            Some(EXIT_NO_VERSION) => {
                return Err(ProbeError::NoVersion {
                    attribute: accessor.map(|a| a.attribute()).unwrap_or_default().to_string(),
                })
            }
            _ => return Err(unexpected(&output)),
        }

        if accessor.is_none() {
            return Ok(None);
        }
        parse_import_output(&String::from_utf8_lossy(&output.stdout))
            .map(Some)
            .ok_or_else(|| unexpected(&output))
    }
}

fn unexpected(output: &std::process::Output) -> ProbeError {
    ProbeError::Unexpected {
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

/// Split interpreter script output into prefix and version banner.
///
/// Older interpreters put a newline inside `sys.version`; everything after
/// the first line belongs to the banner.
pub fn parse_interpreter_output(stdout: &str) -> Option<InterpreterInfo> {
    let (prefix, version) = stdout.split_once('\n')?;
    let version = version.trim_end();
    if version.is_empty() {
        return None;
    }
    Some(InterpreterInfo {
        prefix: prefix.trim_end_matches('\r').to_string(),
        version: version.to_string(),
    })
}

/// Extract the version line that follows the last [`VERSION_MARKER`].
///
/// Native extensions can still write to the process's stdout during import,
/// and their buffers may be flushed after the version, so only the single
/// line after the marker counts.
pub fn parse_import_output(stdout: &str) -> Option<String> {
    let (_, after) = stdout.rsplit_once(VERSION_MARKER)?;
    let after = after
        .strip_prefix("\r\n")
        .or_else(|| after.strip_prefix('\n'))?;
    Some(after.lines().next().unwrap_or_default().trim().to_string())
}

/// Default interpreter name for this platform.
pub fn default_python() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessor_defaults_to_dunder() {
        assert_eq!(VersionAccessor::for_package("numpy"), VersionAccessor::Dunder);
        assert_eq!(VersionAccessor::Dunder.attribute(), "__version__");
    }

    #[test]
    fn accessor_exceptions() {
        assert_eq!(VersionAccessor::for_package("PIL").attribute(), "VERSION");
        assert_eq!(VersionAccessor::for_package("xlrd").attribute(), "__VERSION__");
    }

    #[test]
    fn accessor_lookup_is_case_sensitive() {
        assert_eq!(VersionAccessor::for_package("pil"), VersionAccessor::Dunder);
    }

    #[test]
    fn parses_interpreter_output() {
        let info =
            parse_interpreter_output("/opt/conda\n3.10.12 (main, Jun 11 2023) [GCC 11.4.0]\n")
                .unwrap();
        assert_eq!(info.prefix, "/opt/conda");
        assert_eq!(info.version, "3.10.12 (main, Jun 11 2023) [GCC 11.4.0]");
    }

    #[test]
    fn keeps_multiline_banner() {
        let info = parse_interpreter_output("/usr\n3.6.9 (default)\n[GCC 8.4.0]\n").unwrap();
        assert_eq!(info.version, "3.6.9 (default)\n[GCC 8.4.0]");
    }

    #[test]
    fn rejects_truncated_output() {
        assert!(parse_interpreter_output("").is_none());
        assert!(parse_interpreter_output("/usr").is_none());
        assert!(parse_interpreter_output("/usr\n\n").is_none());
    }

    #[test]
    fn missing_interpreter_is_launch_error() {
        let probe = PythonProbe::new("this-python-does-not-exist-12345");
        assert!(matches!(
            probe.interpreter(),
            Err(ProbeError::Launch { .. })
        ));
        assert!(matches!(
            probe.import("numpy", None),
            Err(ProbeError::Launch { .. })
        ));
    }

    #[test]
    fn default_python_is_named() {
        assert!(default_python().starts_with("python"));
    }

    #[test]
    fn import_output_takes_line_after_marker() {
        let stdout = format!("\n{}\n2.5.0\n", VERSION_MARKER);
        assert_eq!(parse_import_output(&stdout).as_deref(), Some("2.5.0"));
    }

    #[test]
    fn import_output_ignores_chatter_around_version() {
        let stdout = format!(
            "loading plugins...\nready\n{}\r\n1.3.9\r\nlate flush from C\n",
            VERSION_MARKER
        );
        assert_eq!(parse_import_output(&stdout).as_deref(), Some("1.3.9"));
    }

    #[test]
    fn import_output_keeps_empty_version() {
        let stdout = format!("\n{}\n\n", VERSION_MARKER);
        assert_eq!(parse_import_output(&stdout).as_deref(), Some(""));
    }

    #[test]
    fn import_output_without_marker_is_rejected() {
        assert!(parse_import_output("2.5.0\n").is_none());
        assert!(parse_import_output("").is_none());
    }

    /// Runs the real import script against fixture modules on `PYTHONPATH`.
    #[cfg(unix)]
    mod with_python {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;
        use std::process::Command;

        use tempfile::TempDir;

        use super::super::*;
        use crate::requirements::{check_package, CheckResult, Requirement};

        const MODULES: &[(&str, &str)] = &[
            ("good_pkg", "__version__ = '2.5.0'\n"),
            (
                "chatty_pkg",
                "print('chatty_pkg: loading plugins')\n__version__ = '2.5.0'\nprint('done')\n",
            ),
            ("versionless_pkg", "VALUE = 1\n"),
            ("tupled_pkg", "VERSION = (1, 1, 7)\n"),
            ("broken_pkg", "raise RuntimeError('compiled extension missing')\n"),
        ];

        /// Writes the fixture modules and a `python` wrapper that puts them
        /// on the import path. `None` when no python3 is available.
        fn python_env() -> Option<(TempDir, PathBuf)> {
            let available = Command::new("python3")
                .arg("--version")
                .output()
                .map(|o| o.status.success())
                .unwrap_or(false);
            if !available {
                eprintln!("python3 not found; skipping");
                return None;
            }

            let temp = TempDir::new().unwrap();
            for (name, source) in MODULES {
                fs::write(temp.path().join(format!("{name}.py")), source).unwrap();
            }
            let wrapper = temp.path().join("python");
            fs::write(
                &wrapper,
                format!(
                    "#!/bin/sh\nPYTHONPATH='{}' exec python3 \"$@\"\n",
                    temp.path().display()
                ),
            )
            .unwrap();
            fs::set_permissions(&wrapper, fs::Permissions::from_mode(0o755)).unwrap();
            Some((temp, wrapper))
        }

        #[test]
        fn reads_dunder_version() {
            let Some((_temp, python)) = python_env() else { return };
            let probe = PythonProbe::new(&python);
            assert_eq!(
                probe.import("good_pkg", Some(VersionAccessor::Dunder)),
                Ok(Some("2.5.0".to_string()))
            );
        }

        #[test]
        fn output_printed_on_import_does_not_leak_into_version() {
            let Some((_temp, python)) = python_env() else { return };
            let probe = PythonProbe::new(&python);
            assert_eq!(
                check_package(&probe, &Requirement::new("chatty_pkg", "2.0")),
                CheckResult::ok("chatty_pkg", Some("2.5.0"))
            );
        }

        #[test]
        fn missing_attribute_is_no_version() {
            let Some((_temp, python)) = python_env() else { return };
            let probe = PythonProbe::new(&python);
            assert_eq!(
                probe.import("versionless_pkg", Some(VersionAccessor::Dunder)),
                Err(ProbeError::NoVersion {
                    attribute: "__version__".to_string()
                })
            );
        }

        #[test]
        fn tuple_version_is_joined() {
            let Some((_temp, python)) = python_env() else { return };
            let probe = PythonProbe::new(&python);
            assert_eq!(
                probe.import("tupled_pkg", Some(VersionAccessor::Attribute("VERSION"))),
                Ok(Some("1.1.7".to_string()))
            );
        }

        #[test]
        fn failing_imports_are_not_found() {
            let Some((_temp, python)) = python_env() else { return };
            let probe = PythonProbe::new(&python);
            assert_eq!(
                probe.import("broken_pkg", Some(VersionAccessor::Dunder)),
                Err(ProbeError::NotFound)
            );
            assert_eq!(
                probe.import("no_such_pkg_12345", None),
                Err(ProbeError::NotFound)
            );
        }

        #[test]
        fn import_without_accessor_returns_nothing() {
            let Some((_temp, python)) = python_env() else { return };
            let probe = PythonProbe::new(&python);
            assert_eq!(probe.import("chatty_pkg", None), Ok(None));
        }

        #[test]
        fn reports_interpreter() {
            let Some((_temp, python)) = python_env() else { return };
            let info = PythonProbe::new(&python).interpreter().unwrap();
            assert!(!info.prefix.is_empty());
            assert!(info.version.starts_with('3'));
        }
    }
}
