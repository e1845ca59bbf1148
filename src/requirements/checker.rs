//! Requirement evaluation.
//!
//! [`check_interpreter_version`] and [`check_package`] each turn one probe
//! answer into a [`CheckResult`]. [`EnvironmentChecker`] walks the whole
//! registry and collects every result into a [`Report`]; no check stops
//! another from running.

use serde::Serialize;

use crate::error::{self, EnvcheckError};
use crate::requirements::probe::{InterpreterInfo, PackageProbe, ProbeError, VersionAccessor};
use crate::requirements::registry::{Requirement, RequirementRegistry};
use crate::requirements::status::{CheckResult, FailReason};
use crate::version::Version;

/// Subject name used for interpreter results.
pub const INTERPRETER_SUBJECT: &str = "python";

/// Parse a configured interpreter minimum.
///
/// The minimum must start with a numeric major version, since that is what
/// the interpreter's major version is matched against.
pub fn parse_minimum(value: &str) -> error::Result<Version> {
    let version = Version::parse(value)?;
    if version.major().is_none() {
        return Err(EnvcheckError::InvalidMinimum {
            value: value.to_string(),
            message: "expected a leading major version such as 3.10".to_string(),
        });
    }
    Ok(version)
}

/// Compare the running interpreter's version against the required minimum.
///
/// The required major version is the minimum's leading component.
pub fn check_interpreter_version(current: &str, minimum: &Version) -> CheckResult {
    let found = Version::new(current);
    let required_major = minimum.major().unwrap_or_default();

    let result = if found.major() != Some(required_major) {
        CheckResult::fail(
            INTERPRETER_SUBJECT,
            FailReason::InterpreterMajorMismatch {
                required_major,
                found: current.to_string(),
            },
        )
    } else if found < *minimum {
        CheckResult::fail(
            INTERPRETER_SUBJECT,
            FailReason::InterpreterTooOld {
                required: minimum.to_string(),
                found: current.to_string(),
            },
        )
    } else {
        CheckResult::ok(INTERPRETER_SUBJECT, Some(current))
    };

    tracing::debug!(
        "Interpreter {} against {}: ok={}",
        current,
        minimum,
        result.is_ok()
    );
    result
}

/// Check a single requirement through the probe.
pub fn check_package<P: PackageProbe + ?Sized>(
    probe: &P,
    requirement: &Requirement,
) -> CheckResult {
    let name = requirement.name.as_str();
    let accessor = requirement
        .minimum
        .as_ref()
        .map(|_| VersionAccessor::for_package(name));

    let result = match (probe.import(name, accessor), &requirement.minimum) {
        (Err(ProbeError::NoVersion { attribute }), _) => CheckResult::fail(
            name,
            FailReason::VersionUnreadable {
                attribute,
                value: None,
            },
        ),
        (Err(err), _) => {
            tracing::debug!("{} unavailable: {}", name, err);
            CheckResult::fail(
                name,
                FailReason::NotInstalled {
                    hint: requirement.hint.clone(),
                },
            )
        }
        (Ok(Some(installed)), Some(minimum)) => {
            compare_installed(name, &installed, minimum, accessor)
        }
        (Ok(_), _) => CheckResult::ok(name, None),
    };

    tracing::debug!("{}: ok={}", name, result.is_ok());
    result
}

fn compare_installed(
    name: &str,
    installed: &str,
    minimum: &Version,
    accessor: Option<VersionAccessor>,
) -> CheckResult {
    match Version::parse(installed) {
        Ok(version) if version < *minimum => CheckResult::fail(
            name,
            FailReason::VersionTooLow {
                installed: installed.to_string(),
                required: minimum.to_string(),
            },
        ),
        Ok(_) => CheckResult::ok(name, Some(installed)),
        Err(_) => CheckResult::fail(
            name,
            FailReason::VersionUnreadable {
                attribute: accessor
                    .unwrap_or(VersionAccessor::Dunder)
                    .attribute()
                    .to_string(),
                value: (!installed.is_empty()).then(|| installed.to_string()),
            },
        ),
    }
}

/// Everything one run found out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Interpreter prefix and version, when it could be started
    pub interpreter: Option<InterpreterInfo>,
    /// Verdict on the interpreter
    pub interpreter_check: CheckResult,
    /// One result per requirement, in registry order
    pub results: Vec<CheckResult>,
}

impl Report {
    /// Whether every check passed.
    pub fn all_ok(&self) -> bool {
        self.interpreter_check.is_ok() && self.results.iter().all(CheckResult::is_ok)
    }

    /// Number of failed checks, the interpreter included.
    pub fn failure_count(&self) -> usize {
        usize::from(!self.interpreter_check.is_ok())
            + self.results.iter().filter(|r| !r.is_ok()).count()
    }
}

/// Runs the interpreter check and every requirement check.
pub struct EnvironmentChecker<'a, P: PackageProbe + ?Sized> {
    probe: &'a P,
    registry: &'a RequirementRegistry,
    min_python: Version,
}

impl<'a, P: PackageProbe + ?Sized> EnvironmentChecker<'a, P> {
    /// Create a checker.
    pub fn new(probe: &'a P, registry: &'a RequirementRegistry, min_python: Version) -> Self {
        Self {
            probe,
            registry,
            min_python,
        }
    }

    /// The interpreter minimum in use.
    pub fn min_python(&self) -> &Version {
        &self.min_python
    }

    /// Evaluate everything.
    pub fn run(&self) -> Report {
        let (interpreter, interpreter_check) = match self.probe.interpreter() {
            Ok(info) => {
                let check = check_interpreter_version(&info.version, &self.min_python);
                (Some(info), check)
            }
            Err(err) => {
                tracing::debug!("Interpreter probe failed: {}", err);
                let (subject, message) = match err {
                    ProbeError::Launch { program, message } => (program, message),
                    other => (INTERPRETER_SUBJECT.to_string(), other.to_string()),
                };
                (
                    None,
                    CheckResult::fail(&subject, FailReason::InterpreterUnavailable { message }),
                )
            }
        };

        let results = self
            .registry
            .iter()
            .map(|req| check_package(self.probe, req))
            .collect();

        Report {
            interpreter,
            interpreter_check,
            results,
        }
    }
}
