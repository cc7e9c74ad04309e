//! Error types for export and import.

use thiserror::Error;

/// Structured error types for the [`export`](crate::export) module.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ExportError {
    /// More than one of the mutually exclusive filter options was supplied
    #[error("Only one filter option may be given, got: {}", .options.join(", "))]
    InvalidFilterCombination { options: Vec<&'static str> },

    /// The dictionary could not be written as JSON
    #[error("Export serialization failed: {source}")]
    SerializationFailed {
        #[source]
        source: serde_json::Error,
    },

    /// The input text is not a valid export document
    #[error("Export deserialization failed: {source}")]
    DeserializationFailed {
        #[source]
        source: serde_json::Error,
    },

    /// The document carries a format version this build cannot read
    #[error("Unsupported export version {version}; only version {supported} is supported")]
    UnsupportedVersion { version: String, supported: u8 },
}

impl ExportError {
    /// Check if this error is related to serialization
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            ExportError::SerializationFailed { .. } | ExportError::DeserializationFailed { .. }
        )
    }

    /// Check if this error rejected the filter options
    pub fn is_filter_error(&self) -> bool {
        matches!(self, ExportError::InvalidFilterCombination { .. })
    }
}

// Conversion from ExportError to the main Error type
impl From<ExportError> for crate::Error {
    fn from(err: ExportError) -> Self {
        crate::Error::Export(err)
    }
}
