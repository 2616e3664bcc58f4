//! Forward iteration over a record log

use std::iter::FusedIterator;

use crate::error::Result;

use super::Log;

/// Iterator over `(offset, payload)` pairs of a log
///
/// Ends cleanly at end of log. Any other read error is yielded once and
/// the iterator is fused afterwards; there is no resync past a bad record.
pub struct Records<'a, L: Log> {
    log: &'a mut L,
    offset: u64,
    done: bool,
}

impl<'a, L: Log> Records<'a, L> {
    /// Start iterating at `offset`, which must be a record boundary
    pub fn new(log: &'a mut L, offset: u64) -> Self {
        Self {
            log,
            offset,
            done: false,
        }
    }

    /// Offset of the next record to read
    ///
    /// After clean exhaustion this is the length of the log.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl<L: Log> Iterator for Records<'_, L> {
    type Item = Result<(u64, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.log.read(self.offset) {
            Ok((payload, next_offset)) => {
                let offset = self.offset;
                self.offset = next_offset;
                Some(Ok((offset, payload)))
            }
            Err(e) if e.is_end_of_log() => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<L: Log> FusedIterator for Records<'_, L> {}
