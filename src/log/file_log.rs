//! File-backed record log
//!
//! Every append seeks to the end of the file and writes one frame; every
//! read seeks to the requested offset and verifies the frame's checksum.
//!
//! Record start offsets are indexed in memory when the file is opened (by
//! walking the length prefixes) and on every append. A read at any other
//! offset fails with `WalError::Misaligned` before the file is touched.

use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::config::SyncStrategy;
use crate::error::{Result, WalError};

use super::frame::{checksum, decode_checksum, decode_length, encode_frame};
use super::{Log, CHECKSUM_SIZE, FRAME_OVERHEAD, LENGTH_SIZE};

/// A record log stored in a single file
///
/// The append position is always the current file length. `file` is `None`
/// once the log has been closed.
#[derive(Debug)]
pub struct FileLog {
    /// Path of the backing file
    path: PathBuf,
    /// Open handle, `None` after close
    file: Option<File>,
    /// When to fsync after appends
    sync_strategy: SyncStrategy,
    /// Appends written since the last fsync
    uncommitted: usize,
    /// Opened without write access
    read_only: bool,
    /// Offsets where a record (possibly torn) begins
    starts: BTreeSet<u64>,
}

impl FileLog {
    /// Open a log at `path`, creating the file if it does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, SyncStrategy::default())
    }

    /// Open a log with an explicit sync strategy
    pub fn open_with(path: impl AsRef<Path>, sync_strategy: SyncStrategy) -> Result<Self> {
        sync_strategy.validate()?;

        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)?;
        let starts = index_record_starts(&mut file)?;

        debug!(
            path = %path.display(),
            len = file.metadata()?.len(),
            records = starts.len(),
            "opened record log"
        );

        Ok(Self {
            path,
            file: Some(file),
            sync_strategy,
            uncommitted: 0,
            read_only: false,
            starts,
        })
    }

    /// Open an existing log for reading only
    ///
    /// Fails if the file does not exist. Appends fail with an I/O error.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::open(&path)?;
        let starts = index_record_starts(&mut file)?;

        Ok(Self {
            path,
            file: Some(file),
            sync_strategy: SyncStrategy::OsBuffered,
            uncommitted: 0,
            read_only: true,
            starts,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current length of the log in bytes
    pub fn len(&self) -> Result<u64> {
        let file = self.file.as_ref().ok_or(WalError::Closed)?;
        Ok(file.metadata()?.len())
    }

    /// Whether the log holds no records
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Whether `offset` is where a record begins
    pub fn is_record_start(&self, offset: u64) -> bool {
        self.starts.contains(&offset)
    }

    /// Number of appends not yet covered by an fsync
    pub fn uncommitted_count(&self) -> usize {
        self.uncommitted
    }

    /// Force written records to disk
    pub fn sync(&mut self) -> Result<()> {
        let file = self.file.as_ref().ok_or(WalError::Closed)?;
        file.sync_data()?;
        self.uncommitted = 0;
        Ok(())
    }

    fn sync_if_due(&mut self) -> Result<()> {
        let due = match self.sync_strategy {
            SyncStrategy::OsBuffered => false,
            SyncStrategy::EveryWrite => true,
            SyncStrategy::EveryNEntries { count } => self.uncommitted >= count,
        };

        if due {
            self.sync()?;
        }
        Ok(())
    }
}

impl Log for FileLog {
    fn append(&mut self, record: &[u8]) -> Result<u64> {
        let file = self.file.as_mut().ok_or(WalError::Closed)?;

        let offset = file.seek(SeekFrom::End(0))?;
        let frame = encode_frame(record);

        // Indexed before writing so a partially written frame reads as torn.
        self.starts.insert(offset);
        file.write_all(&frame)?;

        self.uncommitted += 1;
        debug!(offset, len = record.len(), "appended record");

        self.sync_if_due()?;
        Ok(offset)
    }

    fn read(&mut self, offset: u64) -> Result<(Vec<u8>, u64)> {
        let file = self.file.as_mut().ok_or(WalError::Closed)?;
        let log_len = file.metadata()?.len();

        if offset == log_len {
            return Err(WalError::EndOfLog { offset });
        }
        if offset > log_len {
            return Err(WalError::OutOfBounds { offset, log_len });
        }

        if !self.starts.contains(&offset) {
            return Err(WalError::Misaligned { offset });
        }

        let available = log_len - offset;
        if available < LENGTH_SIZE {
            return Err(WalError::Truncated {
                offset,
                needed: LENGTH_SIZE,
                available,
            });
        }

        file.seek(SeekFrom::Start(offset))?;

        let mut header = [0u8; LENGTH_SIZE as usize];
        file.read_exact(&mut header)?;
        let payload_len = decode_length(header);

        let needed = payload_len.saturating_add(FRAME_OVERHEAD);
        if needed > available {
            return Err(WalError::Truncated {
                offset,
                needed,
                available,
            });
        }

        let mut payload = vec![0u8; payload_len as usize];
        file.read_exact(&mut payload)?;

        let mut trailer = [0u8; CHECKSUM_SIZE as usize];
        file.read_exact(&mut trailer)?;
        let stored = decode_checksum(trailer);

        let computed = checksum(&payload);
        if stored != computed {
            return Err(WalError::Corruption {
                offset,
                stored,
                computed,
            });
        }

        trace!(offset, len = payload_len, "read record");
        Ok((payload, offset + needed))
    }

    fn close(&mut self) -> Result<()> {
        if let Some(file) = self.file.as_ref() {
            if !self.read_only {
                file.sync_all()?;
            }
            self.file = None;
            self.uncommitted = 0;
            self.starts.clear();
            debug!(path = %self.path.display(), "closed record log");
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.file.is_none()
    }
}

/// Walk the length prefixes from offset 0 and collect every record start
///
/// Checksums are not verified here. A final frame that runs past the end of
/// the file is still indexed so that reading it reports the torn record.
fn index_record_starts(file: &mut File) -> Result<BTreeSet<u64>> {
    let log_len = file.metadata()?.len();
    let mut starts = BTreeSet::new();
    let mut offset = 0u64;

    while offset < log_len {
        starts.insert(offset);

        if log_len - offset < LENGTH_SIZE {
            break;
        }

        file.seek(SeekFrom::Start(offset))?;
        let mut header = [0u8; LENGTH_SIZE as usize];
        file.read_exact(&mut header)?;

        let next = decode_length(header)
            .saturating_add(FRAME_OVERHEAD)
            .saturating_add(offset);
        if next > log_len {
            break;
        }
        offset = next;
    }

    Ok(starts)
}
