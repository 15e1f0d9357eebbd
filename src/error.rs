//! Error types for Rollbook
//!
//! Provides a unified error type for all store operations.

use thiserror::Error;

/// Result type alias using RollbookError
pub type Result<T> = std::result::Result<T, RollbookError>;

/// Unified error type for Rollbook operations
#[derive(Debug, Error)]
pub enum RollbookError {
    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Roster Errors
    // -------------------------------------------------------------------------
    #[error("Roll number {0} already exists")]
    DuplicateKey(u32),

    #[error("Roll number {0} not found")]
    NotFound(u32),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RollbookError {
    /// True for the load/save failure family (missing file, corrupt content,
    /// write failure). The caller decides whether to reseed or abort.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            RollbookError::Io(_) | RollbookError::Storage(_) | RollbookError::Serialization(_)
        )
    }
}

impl From<serde_json::Error> for RollbookError {
    fn from(err: serde_json::Error) -> Self {
        RollbookError::Serialization(err.to_string())
    }
}
