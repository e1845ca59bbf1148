//! envcheck - Python environment verifier for the geospatial course.
//!
//! Checks that a Python interpreter is recent enough and that every course
//! dependency imports and meets its minimum version, printing one
//! `[ OK ]` / `[FAIL]` line per check.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`requirements`] - Requirement table, interpreter probe, and checks
//! - [`ui`] - Status tags, colors, and report rendering
//! - [`version`] - Tolerant version parsing and ordering
//!
//! # Example
//!
//! ```
//! use envcheck::requirements::check_interpreter_version;
//! use envcheck::version::Version;
//!
//! let minimum = Version::new("3.10");
//! assert!(!check_interpreter_version("3.9.5", &minimum).is_ok());
//! assert!(check_interpreter_version("3.10.0", &minimum).is_ok());
//! ```

pub mod cli;
pub mod error;
pub mod requirements;
pub mod ui;
pub mod version;

pub use error::{EnvcheckError, Result};
