//! Write-Ahead Log (WAL) Module
//!
//! Durable key-value store: every mutation is appended to the record log
//! before it becomes visible in memory, and the whole log is replayed on open.
//!
//! ## Responsibilities
//! - Encode PUT/DELETE operations as record payloads
//! - Append before mutating the in-memory map
//! - Rebuild the map by replaying the log in order on startup
//! - Refuse to open on any replay error other than a clean end of log
//!
//! ## Operation Payload
//! ```text
//! ┌─────────────┬──────────────────────────────────────────┐
//! │ Version (1) │ bincode(Operation), fixint, big-endian   │
//! └─────────────┴──────────────────────────────────────────┘
//! ```

mod operation;
mod recovery;
mod write_ahead_log;

pub use operation::{Operation, OPERATION_FORMAT_VERSION};
pub use recovery::{RecoveryStats, WalRecovery};
pub use write_ahead_log::WriteAheadLog;
