//! WAL Recovery
//!
//! Rebuilds the in-memory map by replaying every record in log order.

use std::collections::HashMap;
use std::path::Path;

use tracing::{trace, warn};

use crate::error::Result;
use crate::log::{FileLog, Log};

use super::Operation;

/// Statistics gathered while replaying a log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryStats {
    /// Number of records replayed
    pub records_replayed: u64,

    /// PUT operations among them
    pub puts: u64,

    /// DELETE operations among them
    pub deletes: u64,

    /// Bytes of log consumed, framing included
    pub bytes_replayed: u64,

    /// Keys with a value after replay
    pub live_keys: usize,
}

/// Handles WAL recovery on startup
pub struct WalRecovery;

impl WalRecovery {
    /// Replay `log` from offset 0 into a fresh map
    ///
    /// Stops cleanly at end of log. Any other error, including a checksum
    /// mismatch, a torn final record or an undecodable payload, aborts the
    /// replay and is returned; nothing is skipped or repaired.
    pub fn replay<L: Log>(log: &mut L) -> Result<(HashMap<Vec<u8>, Vec<u8>>, RecoveryStats)> {
        let mut data = HashMap::new();
        let mut stats = RecoveryStats::default();
        let mut records = log.records();

        for item in records.by_ref() {
            let (offset, payload) = match item {
                Ok(record) => record,
                Err(e) => {
                    warn!(error = %e, "replay aborted");
                    return Err(e);
                }
            };

            let operation = match Operation::decode(&payload) {
                Ok(op) => op,
                Err(e) => {
                    warn!(offset, error = %e, "replay aborted: undecodable operation");
                    return Err(e);
                }
            };

            trace!(offset, kind = operation.kind(), "replaying operation");
            match operation {
                Operation::Put { .. } => stats.puts += 1,
                Operation::Delete { .. } => stats.deletes += 1,
            }
            stats.records_replayed += 1;
            apply(&mut data, operation);
        }

        stats.bytes_replayed = records.offset();
        stats.live_keys = data.len();
        Ok((data, stats))
    }

    /// Verify an existing log file without modifying it
    ///
    /// Returns the stats a store opened on this file would report, or the
    /// first error that would keep it from opening.
    pub fn verify(path: &Path) -> Result<RecoveryStats> {
        let mut log = FileLog::open_read_only(path)?;
        let (_, stats) = Self::replay(&mut log)?;
        log.close()?;
        Ok(stats)
    }
}

/// Apply one operation to the map: PUT overwrites, DELETE removes
pub(crate) fn apply(data: &mut HashMap<Vec<u8>, Vec<u8>>, operation: Operation) {
    match operation {
        Operation::Put { key, value } => {
            data.insert(key, value);
        }
        Operation::Delete { key } => {
            data.remove(&key);
        }
    }
}
