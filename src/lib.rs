//! # walkv
//!
//! A crash-recoverable key-value store built from two layers:
//! - A record log: append-only, length-prefixed, CRC32-checked frames in one file
//! - A write-ahead log: PUT/DELETE operations logged before they are applied
//!   to an in-memory map, and replayed in order on startup
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   WriteAheadLog (wal)                        │
//! │          put / delete ──► append    get ──► memory           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ encode Operation / replay on open
//!                       ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    FileLog (log)                             │
//! │        [len u64 BE][payload][crc32 u32 BE] ...               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single process, single writer. No compaction, rotation or locking.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod log;
pub mod wal;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, WalError};
pub use config::{Config, SyncStrategy};
pub use log::{FileLog, Log};
pub use wal::{Operation, RecoveryStats, WalRecovery, WriteAheadLog};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of walkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
