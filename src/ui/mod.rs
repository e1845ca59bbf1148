//! Terminal output.
//!
//! This module provides:
//! - [`OutputStyle`] and [`Theme`] for plain or colored tags
//! - [`StatusKind`] and [`format_line`] for diagnostic lines
//! - [`Output`] for writing whole reports as text or JSON
//!
//! # Example
//!
//! ```
//! use envcheck::requirements::CheckResult;
//! use envcheck::ui::{format_line, Theme};
//!
//! let line = format_line(&CheckResult::ok("numpy", Some("1.26.4")), &Theme::plain());
//! assert_eq!(line, "[ OK ] numpy version 1.26.4");
//! ```

pub mod icons;
pub mod output;
pub mod theme;

pub use icons::{format_line, StatusKind};
pub use output::{Output, OutputFormat};
pub use theme::{OutputStyle, Theme};
