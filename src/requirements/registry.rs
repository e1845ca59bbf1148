//! Requirement table.
//!
//! Defines which packages the course needs and the lowest version of each
//! that is known to work. The table is compiled in; evaluation order is
//! insertion order.

use crate::version::Version;

/// A package the environment must provide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Importable package name (e.g., "numpy", "PIL")
    pub name: String,
    /// Lowest acceptable version; `None` skips version inspection entirely
    pub minimum: Option<Version>,
    /// Extra text appended to the "not installed" message
    pub hint: Option<String>,
}

impl Requirement {
    /// A requirement with a minimum version.
    pub fn new(name: &str, minimum: &str) -> Self {
        Self {
            name: name.to_string(),
            minimum: Some(Version::new(minimum)),
            hint: None,
        }
    }

    /// A requirement satisfied by any importable version.
    pub fn any_version(name: &str) -> Self {
        Self {
            name: name.to_string(),
            minimum: None,
            hint: None,
        }
    }

    /// Attach an install hint.
    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }
}

/// Course dependencies and their minimum versions.
const BUILTIN: &[(&str, Option<&str>)] = &[
    ("numpy", Some("1.9")),
    ("matplotlib", Some("2.0")),
    ("pandas", Some("1.1")),
    ("xarray", Some("0.16")),
    ("geopandas", Some("0.8")),
    ("rasterio", Some("1.1")),
    ("owslib", Some("0.19")),
    ("fsspec", Some("0.8")),
    ("s3fs", Some("0.3")),
    ("pyproj", Some("2.4")),
];

/// Ordered set of requirements with unique names.
#[derive(Debug, Clone, Default)]
pub struct RequirementRegistry {
    requirements: Vec<Requirement>,
}

impl RequirementRegistry {
    /// Create a registry with the built-in course requirements.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for (name, minimum) in BUILTIN {
            let req = match minimum {
                Some(min) => Requirement::new(name, min),
                None => Requirement::any_version(name),
            };
            registry.insert(req);
        }
        registry
    }

    /// Create a registry with no requirements.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a requirement, replacing one with the same name in place.
    pub fn insert(&mut self, requirement: Requirement) {
        match self
            .requirements
            .iter_mut()
            .find(|r| r.name == requirement.name)
        {
            Some(existing) => *existing = requirement,
            None => self.requirements.push(requirement),
        }
    }

    /// Look up a requirement by package name.
    pub fn get(&self, name: &str) -> Option<&Requirement> {
        self.requirements.iter().find(|r| r.name == name)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Requirement> {
        self.requirements.iter()
    }

    /// Number of requirements.
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl FromIterator<Requirement> for RequirementRegistry {
    fn from_iter<I: IntoIterator<Item = Requirement>>(iter: I) -> Self {
        let mut registry = Self::empty();
        for req in iter {
            registry.insert(req);
        }
        registry
    }
}
