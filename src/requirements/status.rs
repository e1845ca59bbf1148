//! Check result types.
//!
//! Each check produces a [`CheckResult`]. Failures carry a [`FailReason`]
//! that knows how to describe itself to the user.

use serde::Serialize;

/// Why a check failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FailReason {
    /// The package could not be imported.
    NotInstalled {
        /// Extra text appended to the message
        hint: Option<String>,
    },

    /// The package imported but reports an older version than required.
    VersionTooLow { installed: String, required: String },

    /// The package imported but its version could not be read.
    VersionUnreadable {
        /// Attribute that was consulted
        attribute: String,
        /// What the attribute held, if anything
        value: Option<String>,
    },

    /// The interpreter's major version is not the required one.
    InterpreterMajorMismatch { required_major: u64, found: String },

    /// The interpreter is older than the required minimum.
    InterpreterTooOld { required: String, found: String },

    /// The interpreter could not be started at all.
    InterpreterUnavailable { message: String },
}

/// The outcome of checking one subject (the interpreter or a package).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckResult {
    /// The subject satisfies its requirement.
    Ok {
        subject: String,
        /// Version that was found; absent when none was inspected
        installed: Option<String>,
    },

    /// The subject does not satisfy its requirement.
    Fail { subject: String, reason: FailReason },
}

impl CheckResult {
    /// A passing result.
    pub fn ok(subject: &str, installed: Option<&str>) -> Self {
        CheckResult::Ok {
            subject: subject.to_string(),
            installed: installed.map(str::to_string),
        }
    }

    /// A failing result.
    pub fn fail(subject: &str, reason: FailReason) -> Self {
        CheckResult::Fail {
            subject: subject.to_string(),
            reason,
        }
    }

    /// Whether the check passed.
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckResult::Ok { .. })
    }

    /// The package name or interpreter the result is about.
    pub fn subject(&self) -> &str {
        match self {
            CheckResult::Ok { subject, .. } | CheckResult::Fail { subject, .. } => subject,
        }
    }

    /// The failure reason, if any.
    pub fn reason(&self) -> Option<&FailReason> {
        match self {
            CheckResult::Ok { .. } => None,
            CheckResult::Fail { reason, .. } => Some(reason),
        }
    }

    /// Human-readable diagnostic, without the status tag.
    pub fn message(&self) -> String {
        match self {
            CheckResult::Ok {
                subject,
                installed: Some(version),
            } => format!("{} version {}", subject, version),
            CheckResult::Ok {
                subject,
                installed: None,
            } => subject.clone(),
            CheckResult::Fail { subject, reason } => reason.message(subject),
        }
    }
}

impl FailReason {
    /// Describe the failure of `subject`.
    pub fn message(&self, subject: &str) -> String {
        match self {
            FailReason::NotInstalled { hint: Some(hint) } => {
                format!("{} not installed. {}", subject, hint)
            }
            FailReason::NotInstalled { hint: None } => format!("{} not installed.", subject),
            FailReason::VersionTooLow {
                installed,
                required,
            } => format!(
                "{} version {} or higher required, but {} installed.",
                subject, required, installed
            ),
            FailReason::VersionUnreadable {
                attribute,
                value: None,
            } => format!(
                "{} is installed but does not report a version ({}).",
                subject, attribute
            ),
            FailReason::VersionUnreadable {
                attribute,
                value: Some(value),
            } => format!(
                "{} is installed but reports an unreadable version '{}' ({}).",
                subject, value, attribute
            ),
            FailReason::InterpreterMajorMismatch {
                required_major,
                found,
            } => format!(
                "Python {} is required, but {} is installed.",
                required_major, found
            ),
            FailReason::InterpreterTooOld { required, found } => format!(
                "Python version {} is required, but {} is installed.",
                required, found
            ),
            FailReason::InterpreterUnavailable { message } => {
                format!("Could not run {}: {}", subject, message)
            }
        }
    }
}
