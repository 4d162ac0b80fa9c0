//! Core contracts for recordsmith.
//!
//! This crate defines the pattern mini-language compiler and the shape
//! descriptor it produces, plus the directive marker shared by the template
//! parser.

pub mod error;
pub mod pattern;

pub use error::{PatternError, Result};
pub use pattern::{PATTERN_MAX_LEN, PatternDescriptor, compile};

/// Token that turns a template string into a directive.
pub const DIRECTIVE_MARKER: &str = "_go:";
