//! Write-ahead log backed key-value store

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, trace};

use crate::config::Config;
use crate::error::Result;
use crate::log::{FileLog, Log};

use super::recovery::{apply, RecoveryStats, WalRecovery};
use super::Operation;

/// Key-value store whose every mutation is logged before it is applied
///
/// Reads are served from memory only. Single-threaded: wrap the whole
/// store in a mutex to share it.
pub struct WriteAheadLog<L: Log = FileLog> {
    /// Sole append/read path to the record log
    log: L,

    /// Live keys; deleted keys are removed, not tombstoned
    data: HashMap<Vec<u8>, Vec<u8>>,

    /// What the construction replay found
    stats: RecoveryStats,
}

impl WriteAheadLog<FileLog> {
    /// Open (creating if absent) the log at `path` and replay it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_log(FileLog::open(path)?)
    }

    /// Open with full configuration
    pub fn open_with_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::with_log(FileLog::open_with(&config.path, config.sync_strategy)?)
    }

    /// Replay an existing log without creating or writing it
    ///
    /// Fails if the file does not exist. `put` and `delete` fail with an
    /// I/O error and leave the map unchanged.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_log(FileLog::open_read_only(path)?)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        self.log.path()
    }

    /// Force logged operations to disk regardless of sync strategy
    pub fn sync(&mut self) -> Result<()> {
        self.log.sync()
    }
}

impl<L: Log> WriteAheadLog<L> {
    /// Build a store over an already open log by replaying it
    ///
    /// All or nothing: if replay fails the log is dropped and the error
    /// returned.
    pub fn with_log(mut log: L) -> Result<Self> {
        let (data, stats) = WalRecovery::replay(&mut log)?;

        info!(
            records = stats.records_replayed,
            puts = stats.puts,
            deletes = stats.deletes,
            live_keys = stats.live_keys,
            "write-ahead log recovered"
        );

        Ok(Self { log, data, stats })
    }

    /// Get a value by key
    ///
    /// Deleted and never-written keys both return `None`.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.data.get(key).cloned())
    }

    /// Put a key-value pair
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.commit(Operation::Put {
            key: key.to_vec(),
            value: value.to_vec(),
        })
    }

    /// Delete a key
    ///
    /// A DELETE record is logged even if the key is absent.
    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.commit(Operation::Delete { key: key.to_vec() })
    }

    /// Append first; the map only changes once the append succeeded
    fn commit(&mut self, operation: Operation) -> Result<()> {
        let payload = operation.encode()?;
        let offset = self.log.append(&payload)?;

        trace!(offset, kind = operation.kind(), "committed operation");
        apply(&mut self.data, operation);
        Ok(())
    }

    /// Whether `key` currently has a value
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.data.contains_key(key)
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over live pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.data.iter().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }

    /// Stats from the replay performed when this store was opened
    pub fn recovery_stats(&self) -> RecoveryStats {
        self.stats
    }

    /// The underlying record log
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Close the underlying log
    ///
    /// Later writes fail with `WalError::Closed`; `get` keeps working.
    pub fn close(&mut self) -> Result<()> {
        self.log.close()?;
        debug!(live_keys = self.data.len(), "write-ahead log closed");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.log.is_closed()
    }
}
