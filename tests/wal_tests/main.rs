//! Tests for the write-ahead log
//!
//! These tests verify:
//! - Operation encoding
//! - PUT/DELETE/GET semantics
//! - Append-before-apply ordering on failure
//! - Replay on reopen, including refusal to open damaged logs
//! - Read-only verification

mod operation_tests;

use std::cell::Cell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use tempfile::TempDir;
use walkv::log::{FileLog, Log};
use walkv::{Result, WalError};

// =============================================================================
// Helper Functions
// =============================================================================

pub fn setup_temp_wal() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let wal_path = temp_dir.path().join("test.wal");
    (temp_dir, wal_path)
}

/// A file log whose appends can be made to fail on demand
pub struct FlakyLog {
    pub inner: FileLog,
    pub fail_appends: Rc<Cell<bool>>,
}

impl Log for FlakyLog {
    fn append(&mut self, record: &[u8]) -> Result<u64> {
        if self.fail_appends.get() {
            return Err(WalError::Io(io::Error::new(io::ErrorKind::Other, "disk full")));
        }
        self.inner.append(record)
    }

    fn read(&mut self, offset: u64) -> Result<(Vec<u8>, u64)> {
        self.inner.read(offset)
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }

    fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}
