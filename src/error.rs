//! Error types for rival tracking.
//!
//! The rival core itself never fails: sparse or malformed telemetry degrades into a
//! smaller result (see [`crate::engine::RivalEngine::tick`]). The errors in this module
//! belong to the surfaces around the core: configuration loading, recording files and
//! snapshot providers.
//!
//! ## Error Categories
//!
//! - **Configuration Errors**: Out-of-range options or unreadable configuration YAML
//! - **File Errors**: Problems reading recordings or configuration from disk
//! - **Parse Errors**: YAML that does not match the expected layout
//! - **Provider Errors**: Transport failures reported by a snapshot provider
//! - **Disconnects**: The simulator went away and the session must be reset
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use slipstream::RivalError;
//!
//! let error = RivalError::provider_failed("shared memory not mapped");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rival tracking operations.
pub type Result<T, E = RivalError> = std::result::Result<T, E>;

/// Main error type for rival tracking operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RivalError {
    #[error("Invalid configuration for {field}: {details}")]
    Config { field: String, details: String },

    #[error("File error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Snapshot provider failed: {reason}")]
    Provider {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Telemetry source disconnected")]
    Disconnected,
}

impl RivalError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            RivalError::Provider { .. } => true,
            RivalError::Disconnected => true,
            RivalError::Config { .. } => false,
            RivalError::File { .. } => false,
            RivalError::Parse { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            RivalError::Config { .. } => vec![
                "Check the option against its documented range",
                "Remove the option to fall back to its default",
            ],
            RivalError::File { .. } => vec![
                "Check file exists and is readable",
                "Check file permissions",
            ],
            RivalError::Parse { .. } => vec![
                "Check the YAML keys use PascalCase names",
                "Verify the recording was produced by a compatible version",
            ],
            RivalError::Provider { .. } => vec![
                "Ensure the simulator is running",
                "Verify the transport adapter is connected",
                "Try restarting the simulator",
            ],
            RivalError::Disconnected => vec![
                "Wait for the simulator to start a new session",
                "Reconnect the telemetry source",
            ],
        }
    }

    /// Helper constructor for configuration errors.
    pub fn invalid_config(field: impl Into<String>, details: impl Into<String>) -> Self {
        RivalError::Config { field: field.into(), details: details.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        RivalError::File { path, source }
    }

    /// Helper constructor for YAML parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl ToString) -> Self {
        RivalError::Parse { context: context.into(), details: details.to_string() }
    }

    /// Helper constructor for provider failures.
    pub fn provider_failed(reason: impl Into<String>) -> Self {
        RivalError::Provider { reason: reason.into(), source: None }
    }

    /// Helper constructor for provider failures with source.
    pub fn provider_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        RivalError::Provider { reason: reason.into(), source: Some(source) }
    }

    /// Whether the telemetry source went away and accumulated state is stale.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, RivalError::Disconnected)
    }
}
