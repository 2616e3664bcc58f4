//! Record Log Module
//!
//! Append-only, checksummed storage of opaque byte records in a single file.
//!
//! ## Responsibilities
//! - Append framed records at the end of the file
//! - Random-offset reads with CRC32 verification
//! - Forward iteration from offset 0 to end of log
//! - Closed-state guard after `close()`
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ Record 1                                    │
//! │ ┌────────────┬───────────────┬────────────┐ │
//! │ │ Len (8 BE) │ Payload (Len) │ CRC (4 BE) │ │
//! │ └────────────┴───────────────┴────────────┘ │
//! ├─────────────────────────────────────────────┤
//! │ Record 2                                    │
//! │ ┌────────────┬───────────────┬────────────┐ │
//! │ │ Len (8 BE) │ Payload (Len) │ CRC (4 BE) │ │
//! │ └────────────┴───────────────┴────────────┘ │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! There is no file header and no index: the byte offset of a record's
//! length prefix is its address. An empty file is a valid empty log.

mod frame;
mod file_log;
mod iter;

pub use frame::{checksum, encode_frame, frame_len, CHECKSUM_SIZE, FRAME_OVERHEAD, LENGTH_SIZE};
pub use file_log::FileLog;
pub use iter::Records;

use crate::error::Result;

/// An append-only log of opaque records addressed by byte offset
///
/// Implementations are single-writer and not internally synchronized.
pub trait Log {
    /// Append a record and return the offset it was written at.
    fn append(&mut self, record: &[u8]) -> Result<u64>;

    /// Read the record starting at `offset`.
    ///
    /// Returns the payload and the offset of the record that follows it.
    /// Fails with `WalError::EndOfLog` when `offset` is exactly the end of
    /// the log.
    fn read(&mut self, offset: u64) -> Result<(Vec<u8>, u64)>;

    /// Close the log. Later appends and reads fail with `WalError::Closed`.
    fn close(&mut self) -> Result<()>;

    /// Whether `close()` has completed.
    fn is_closed(&self) -> bool;

    /// Iterate over every record from the start of the log.
    fn records(&mut self) -> Records<'_, Self>
    where
        Self: Sized,
    {
        Records::new(self, 0)
    }
}
