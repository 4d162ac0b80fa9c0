use thiserror::Error;

use recordsmith_core::PatternError;

/// Errors emitted while building a processor from a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("malformed template: {0}")]
    MalformedInput(#[from] serde_json::Error),
    #[error("invalid pattern: {pattern}, reason: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },
    #[error("unresolved directive '{directive}' in field '{field}': {reason}")]
    UnresolvedDirective {
        field: String,
        directive: String,
        reason: String,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TemplateError {
    pub(crate) fn unresolved(
        field: impl Into<String>,
        directive: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnresolvedDirective {
            field: field.into(),
            directive: directive.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;
