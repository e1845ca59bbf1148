//! Status tags that prefix every diagnostic line.

use super::theme::Theme;
use crate::requirements::status::CheckResult;

/// Verdict shown at the start of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// The check passed.
    Ok,
    /// The check failed.
    Fail,
}

impl StatusKind {
    /// Tag for a check result.
    pub fn of(result: &CheckResult) -> Self {
        if result.is_ok() {
            Self::Ok
        } else {
            Self::Fail
        }
    }

    /// Bracketed tag text. Both tags are six columns wide.
    pub fn bracketed(self) -> &'static str {
        match self {
            Self::Ok => "[ OK ]",
            Self::Fail => "[FAIL]",
        }
    }

    /// Tag styled with the given theme.
    pub fn styled(self, theme: &Theme) -> String {
        let tag = self.bracketed();
        match self {
            Self::Ok => theme.ok.apply_to(tag).to_string(),
            Self::Fail => theme.fail.apply_to(tag).to_string(),
        }
    }
}

/// A full diagnostic line: tag, space, message.
pub fn format_line(result: &CheckResult, theme: &Theme) -> String {
    format!("{} {}", StatusKind::of(result).styled(theme), result.message())
}
