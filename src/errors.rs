//! Shared error types for profile building and risk verification.
//!
//! Every variant is terminal: the library never retries or skips past one.
//! An ordinary metric that fails its threshold is *not* an error, it is a
//! `false` folded into the verification result.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sqatt operations
#[derive(Debug, Error)]
pub enum Error {
    /// A threshold cell is not exactly one comparator token and one number
    #[error("Malformed threshold expression '{expression}': {reason}")]
    MalformedThresholdExpression { expression: String, reason: String },

    /// A component under verification has no quadrant assigned
    #[error("Component '{component}' is not assigned to a risk quadrant")]
    UnmappedComponent { component: String },

    /// The resolved quadrant has no threshold for the verified metric
    #[error("Quadrant '{quadrant}' has no threshold for metric '{metric}'")]
    UnmappedQuadrantMetric { quadrant: String, metric: String },

    /// Comparator token outside `<`, `<=`, `>`, `>=`
    #[error("Unsupported comparator '{0}'")]
    UnsupportedComparator(String),

    /// A row does not carry a column the operation needs
    #[error("Missing column '{column}'")]
    MissingColumn { column: String },

    /// The header row does not have the expected shape
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A cell that must be numeric could not be parsed
    #[error("Invalid value '{value}' for '{column}'")]
    InvalidMetricValue { column: String, value: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// File system errors with the offending path
    #[error("{message} '{}': {source}", .path.display())]
    FileSystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error annotated with where it happened
    #[error("{context}: {inner}")]
    WithContext { context: String, inner: Box<Error> },

    /// CSV reader/writer errors
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML configuration errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a malformed threshold error
    pub fn malformed_threshold(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedThresholdExpression {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create an invalid metric value error
    pub fn invalid_value(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidMetricValue {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by inconsistent risk configuration (lookup
    /// failures and bad threshold cells) rather than by the input data.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Self::WithContext { inner, .. } => inner.is_configuration_error(),
            Self::MalformedThresholdExpression { .. }
            | Self::UnmappedComponent { .. }
            | Self::UnmappedQuadrantMetric { .. }
            | Self::UnsupportedComparator(_)
            | Self::Configuration(_) => true,
            _ => false,
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            inner: Box::new(self),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_failures_are_configuration_errors() {
        let unmapped = Error::UnmappedComponent {
            component: "ComponentX".to_string(),
        };
        assert!(unmapped.is_configuration_error());
        assert!(Error::UnsupportedComparator("==".to_string()).is_configuration_error());
        assert!(!Error::missing_column("Component").is_configuration_error());
    }

    #[test]
    fn test_with_context_keeps_message() {
        let err = Error::UnmappedQuadrantMetric {
            quadrant: "Q1".to_string(),
            metric: "Coverage".to_string(),
        }
        .with_context("verifying coverage.csv");

        assert!(err.is_configuration_error());
        assert_eq!(
            err.to_string(),
            "verifying coverage.csv: Quadrant 'Q1' has no threshold for metric 'Coverage'"
        );
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<()> = Err(Error::invalid_value("Coverage", "n/a"));
        let err = result.context("row 3").unwrap_err();
        assert!(err.to_string().starts_with("row 3: "));
    }
}
