//! Error types for walkv
//!
//! Provides a unified error type for the record log and the write-ahead log.

use thiserror::Error;

/// Result type alias using WalError
pub type Result<T> = std::result::Result<T, WalError>;

/// Unified error type for walkv operations
#[derive(Debug, Error)]
pub enum WalError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Record Log Errors
    // -------------------------------------------------------------------------
    #[error("record corruption at offset {offset}: stored crc {stored:#010x}, computed {computed:#010x}")]
    Corruption { offset: u64, stored: u32, computed: u32 },

    #[error("record log is closed")]
    Closed,

    #[error("offset {offset} is past the end of the log ({log_len} bytes)")]
    OutOfBounds { offset: u64, log_len: u64 },

    #[error("offset {offset} is not the start of a record")]
    Misaligned { offset: u64 },

    #[error("record at offset {offset} is incomplete: needs {needed} bytes, {available} available")]
    Truncated { offset: u64, needed: u64, available: u64 },

    /// Clean end of stream: the offset is exactly the length of the log.
    #[error("end of log at offset {offset}")]
    EndOfLog { offset: u64 },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("unsupported operation format version: {0}")]
    UnsupportedVersion(u8),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WalError {
    /// True for the clean end-of-stream signal, false for every real failure.
    pub fn is_end_of_log(&self) -> bool {
        matches!(self, WalError::EndOfLog { .. })
    }

    /// True if a stored checksum did not match its payload.
    pub fn is_corruption(&self) -> bool {
        matches!(self, WalError::Corruption { .. })
    }
}

impl From<bincode::Error> for WalError {
    fn from(err: bincode::Error) -> Self {
        WalError::Serialization(err.to_string())
    }
}
