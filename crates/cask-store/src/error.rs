/// Errors from store construction and configuration.
///
/// Individual get/set calls never return these; their outcomes are reported
/// through [`cask_types::OperationResult`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A configuration value is out of range.
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
