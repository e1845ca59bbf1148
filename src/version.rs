//! Tolerant version parsing and ordering.
//!
//! Installed packages report versions in every shape imaginable
//! (`1.24.3`, `2.1.0rc1`, `0.19.post1`, `3.10.12 (main, Jun 11 2023)`).
//! [`Version`] never fails on a non-blank input: the string is split into
//! numeric and alphabetic runs and those runs are compared.
//!
//! # Example
//!
//! ```
//! use envcheck::version::Version;
//!
//! let installed = Version::new("1.9.3");
//! let minimum = Version::new("2.0");
//! assert!(installed < minimum);
//! assert!(Version::new("2.0.1") >= minimum);
//! ```

use regex::Regex;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static RE_COMPONENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+|[A-Za-z]+").unwrap());

/// Error returned by [`Version::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The input was empty or only whitespace.
    #[error("version string is empty")]
    Empty,

    /// The input contained no digits or letters at all.
    #[error("no version components in '{0}'")]
    Unparseable(String),
}

/// A single run of a version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// A run of digits (saturates at `u64::MAX`).
    Number(u64),
    /// A run of letters, lowercased.
    Tag(String),
}

/// A parsed version that keeps the text it came from.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    components: Vec<Component>,
}

impl Version {
    /// Parse a version without ever failing.
    ///
    /// Blank or symbol-only input yields a version with no components,
    /// which orders like `0`.
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim();
        Self {
            raw: raw.to_string(),
            components: tokenize(raw),
        }
    }

    /// Parse a version, rejecting input that carries no version at all.
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        if raw.trim().is_empty() {
            return Err(VersionError::Empty);
        }
        let version = Self::new(raw);
        if version.components.is_empty() {
            return Err(VersionError::Unparseable(version.raw));
        }
        Ok(version)
    }

    /// The original text, trimmed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed components.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The leading numeric component, if the version starts with one.
    pub fn major(&self) -> Option<u64> {
        match self.components.first() {
            Some(Component::Number(n)) => Some(*n),
            _ => None,
        }
    }
}

/// Split the first whitespace-delimited token into components.
fn tokenize(raw: &str) -> Vec<Component> {
    let Some(token) = raw.split_whitespace().next() else {
        return Vec::new();
    };
    // "v1.2" is a release, not a tag followed by a release
    let token = match token.strip_prefix(['v', 'V']) {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => token,
    };

    RE_COMPONENT
        .find_iter(token)
        .map(|m| {
            let text = m.as_str();
            if text.as_bytes()[0].is_ascii_digit() {
                Component::Number(text.parse().unwrap_or(u64::MAX))
            } else {
                Component::Tag(text.to_ascii_lowercase())
            }
        })
        .collect()
}

/// Rank of a tag relative to the other tags. Release sits between 4 and 5.
fn tag_rank(tag: &str) -> u8 {
    match tag {
        "dev" => 0,
        "a" | "alpha" => 1,
        "b" | "beta" => 2,
        "c" | "rc" | "pre" | "preview" => 3,
        "post" | "p" | "rev" | "r" => 5,
        _ => 4,
    }
}

fn is_post_release(tag: &str) -> bool {
    tag_rank(tag) > 4
}

/// Where a tag sits relative to a number in the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Slot {
    /// Pre-release and unknown tags, below any number.
    Before,
    /// A number, or a missing position (counted as 0).
    Number,
    /// Post-release tags, above 0 but below 1.
    After,
}

/// Sort key of one position. A missing position has the same key as `0`,
/// so trailing zeros never matter and the ordering stays total.
fn sort_key(component: Option<&Component>) -> (u64, Slot, u8, &str) {
    match component {
        None => (0, Slot::Number, 0, ""),
        Some(Component::Number(n)) => (*n, Slot::Number, 0, ""),
        Some(Component::Tag(t)) if is_post_release(t) => {
            (0, Slot::After, tag_rank(t), t.as_str())
        }
        Some(Component::Tag(t)) => (0, Slot::Before, tag_rank(t), t.as_str()),
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| sort_key(self.components.get(i)).cmp(&sort_key(other.components.get(i))))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::new(s)
    }

    #[test]
    fn orders_numeric_components_numerically() {
        assert!(v("1.9.3") < v("2.0"));
        assert!(v("2.0.1") > v("2.0"));
        assert!(v("1.10") > v("1.9"));
        assert!(v("0.16") < v("0.19"));
    }

    #[test]
    fn missing_trailing_zero_is_equal() {
        assert_eq!(v("2.0"), v("2.0.0"));
        assert_eq!(v("3"), v("3.0.0"));
    }

    #[test]
    fn prerelease_sorts_before_release() {
        assert!(v("1.0rc1") < v("1.0"));
        assert!(v("1.0.0rc1") < v("1.0"));
        assert!(v("1.0a2") < v("1.0b1"));
        assert!(v("1.0b1") < v("1.0rc1"));
        assert!(v("1.0.dev0") < v("1.0a1"));
    }

    #[test]
    fn post_release_sorts_after_release_but_before_next_patch() {
        assert!(v("1.0.post1") > v("1.0"));
        assert!(v("1.0.post1") < v("1.0.1"));
    }

    #[test]
    fn post_release_sorts_after_explicit_zero_patch() {
        assert!(v("1.0.0") < v("1.0.post1"));
        assert!(v("0.8.0") < v("0.8.post1"));
        assert!(v("1.0.post1") < v("1.0.1"));
    }

    #[test]
    fn numbers_above_zero_beat_any_tag() {
        assert!(v("1.0.1") > v("1.0.post9"));
        assert!(v("1.1") > v("1.0rc1"));
        assert!(v("1.0.0") > v("1.0.rc1"));
    }

    #[test]
    fn ordering_is_transitive() {
        let versions: Vec<Version> = [
            "1.0", "1.0.0", "1.0.post1", "1.0.1", "1.0rc1", "1.0.0rc1", "1.0.dev0", "1.0a1",
            "1.0.0.post2", "1.0b", "1", "0.9.9", "2.0", "1.0-SNAPSHOT", "1.0.x",
        ]
        .into_iter()
        .map(v)
        .collect();

        for a in &versions {
            for b in &versions {
                assert_eq!(a.cmp(b), b.cmp(a).reverse(), "{a} vs {b}");
                for c in &versions {
                    if a <= b && b <= c {
                        assert!(a <= c, "{a} <= {b} <= {c} but {a} > {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn sorting_is_stable_across_input_order() {
        let mut forward: Vec<_> = ["1.0.1", "1.0.post1", "1.0.0", "1.0rc1", "0.9"]
            .into_iter()
            .map(v)
            .collect();
        let mut backward: Vec<_> = forward.iter().rev().cloned().collect();
        forward.sort();
        backward.sort();

        let raw = |vs: &[Version]| vs.iter().map(|x| x.as_str().to_string()).collect::<Vec<_>>();
        assert_eq!(raw(&forward), ["0.9", "1.0rc1", "1.0.0", "1.0.post1", "1.0.1"]);
        assert_eq!(raw(&forward), raw(&backward));
    }

    #[test]
    fn interpreter_banner_uses_first_token() {
        let version = v("3.10.12 (main, Jun 11 2023, 05:26:28) [GCC 11.4.0]");
        assert_eq!(version, v("3.10.12"));
        assert_eq!(version.major(), Some(3));
        // display keeps the full text
        assert!(version.to_string().contains("GCC"));
    }

    #[test]
    fn leading_v_is_ignored() {
        assert_eq!(v("v1.2.3"), v("1.2.3"));
        assert_eq!(v("V2"), v("2.0"));
    }

    #[test]
    fn huge_numbers_saturate() {
        let version = v("99999999999999999999999.1");
        assert_eq!(version.major(), Some(u64::MAX));
    }

    #[test]
    fn major_absent_for_tag_first_versions() {
        assert_eq!(v("unknown").major(), None);
        assert_eq!(v("").major(), None);
    }

    #[test]
    fn parse_rejects_blank_and_symbol_only() {
        assert_eq!(Version::parse(""), Err(VersionError::Empty));
        assert_eq!(Version::parse("   "), Err(VersionError::Empty));
        assert!(matches!(
            Version::parse("+++"),
            Err(VersionError::Unparseable(_))
        ));
    }

    #[test]
    fn parse_accepts_odd_but_meaningful_input() {
        assert!(Version::parse("1.0-SNAPSHOT").is_ok());
        assert!(Version::parse("nightly").is_ok());
        assert!("3.10".parse::<Version>().is_ok());
    }

    #[test]
    fn tags_are_case_insensitive() {
        assert_eq!(v("1.0RC1"), v("1.0rc1"));
    }

    #[test]
    fn serializes_as_raw_string() {
        let json = serde_json::to_string(&v("0.8.1")).unwrap();
        assert_eq!(json, "\"0.8.1\"");
    }
}
