//! Error types for gamecat
//!
//! Provides a unified error type for all operations. The `Display` text of
//! every recoverable variant is exactly what the client sees on the wire.

use thiserror::Error;

/// Result type alias using CatalogError
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Unified error type for gamecat operations
#[derive(Debug, Error)]
pub enum CatalogError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    // -------------------------------------------------------------------------
    // Load Errors
    // -------------------------------------------------------------------------
    #[error("Failed to load catalog: {0}")]
    Load(String),

    // -------------------------------------------------------------------------
    // Malformed Command Errors
    // -------------------------------------------------------------------------
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid command. Usage: {0}")]
    Usage(&'static str),

    // -------------------------------------------------------------------------
    // Query Errors
    // -------------------------------------------------------------------------
    #[error("Invalid platform. Please use command 'platforms' to see a list of available platforms")]
    UnknownPlatform(String),

    #[error("No games available for the current platform filter")]
    EmptyCatalog,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Whether the error can be reported to the client with the session continuing.
    ///
    /// Query and syntax errors are recoverable; I/O, load and config errors are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidCommand(_)
                | CatalogError::InvalidNumber(_)
                | CatalogError::Usage(_)
                | CatalogError::UnknownPlatform(_)
                | CatalogError::EmptyCatalog
        )
    }
}
