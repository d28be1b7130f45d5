use thiserror::Error;

/// Validation errors for identifier primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a coordinate names an rkey without a collection.
    #[error("record key '{0}' given without a collection")]
    DanglingRecordKey(String),
}
