//! Error types for algoviz.
//!
//! Every fallible operation returns `Result<T, VizError>` instead of panicking.
//! Algorithm outcomes such as "no solution" or "cycle detected" are not errors:
//! they are terminal snapshot kinds and play back like any other trace.

use thiserror::Error;

/// Result type alias for algoviz operations.
pub type VizResult<T> = Result<T, VizError>;

/// Unified error type for all algoviz operations.
///
/// # Design
///
/// Errors fall into three groups:
/// 1. Configuration errors: user input rejected before generation starts
/// 2. Generator invariant violations: programming errors, reported loudly
/// 3. I/O and serialization errors from scenario files
#[derive(Debug, Error)]
pub enum VizError {
    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Raw user input (node list, array, puzzle grid) could not be accepted.
    #[error("Invalid {field}: {message}")]
    Input {
        /// Which input field was rejected.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Generator Invariant Violations =====
    /// A trace with no snapshots was produced or loaded.
    #[error("Trace is empty: a generator must emit at least one snapshot")]
    EmptyTrace,

    /// A generator emitted a trace that breaks the initialize/terminal framing.
    #[error("Malformed trace: {0}")]
    MalformedTrace(String),

    /// A start or source label does not exist in the node set.
    #[error("Unknown node '{0}'")]
    UnknownNode(String),

    /// A generator exceeded the configured snapshot budget.
    #[error("Trace limit exceeded: more than {limit} snapshots")]
    TraceLimit {
        /// Configured maximum number of snapshots.
        limit: usize,
    },

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VizError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an input error for the named field.
    #[must_use]
    pub fn input(field: &'static str, message: impl Into<String>) -> Self {
        Self::Input {
            field,
            message: message.into(),
        }
    }

    /// Create a malformed-trace error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedTrace(message.into())
    }

    /// Check if this error was caused by user input (and should be shown to
    /// the user as a correctable message rather than a bug report).
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::Input { .. } | Self::YamlParse(_) | Self::Validation(_)
        )
    }
}
