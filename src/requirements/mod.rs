//! Requirement checking against a Python environment.
//!
//! This module decides whether the interpreter and each course dependency
//! satisfy their minimum versions.
//!
//! # Modules
//!
//! - [`checker`] - Interpreter and package checks, whole-table runs
//! - [`probe`] - Interpreter probe that imports packages and reads versions
//! - [`registry`] - The requirement table
//! - [`status`] - Check result types

pub mod checker;
pub mod probe;
pub mod registry;
pub mod status;

pub use checker::{check_interpreter_version, check_package, EnvironmentChecker, Report};
pub use probe::{InterpreterInfo, PackageProbe, ProbeError, PythonProbe, VersionAccessor};
pub use registry::{Requirement, RequirementRegistry};
pub use status::{CheckResult, FailReason};
