//! Record framing
//!
//! Builds the `[len][payload][crc]` frame written by `FileLog::append`.

use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Size of the big-endian length prefix
pub const LENGTH_SIZE: u64 = 8;

/// Size of the big-endian CRC32 trailer
pub const CHECKSUM_SIZE: u64 = 4;

/// Bytes a record occupies on disk in addition to its payload
pub const FRAME_OVERHEAD: u64 = LENGTH_SIZE + CHECKSUM_SIZE;

/// On-disk footprint of a record carrying `payload_len` bytes
pub fn frame_len(payload_len: u64) -> u64 {
    FRAME_OVERHEAD + payload_len
}

/// CRC-32 (IEEE polynomial) of a payload
pub fn checksum(payload: &[u8]) -> u32 {
    crc32fast::hash(payload)
}

/// Encode a payload into a complete frame
pub fn encode_frame(payload: &[u8]) -> Bytes {
    let mut frame = BytesMut::with_capacity(payload.len() + FRAME_OVERHEAD as usize);
    frame.put_u64(payload.len() as u64);
    frame.put_slice(payload);
    frame.put_u32(checksum(payload));
    frame.freeze()
}

/// Decode a length prefix
pub(crate) fn decode_length(header: [u8; LENGTH_SIZE as usize]) -> u64 {
    (&header[..]).get_u64()
}

/// Decode a checksum trailer
pub(crate) fn decode_checksum(trailer: [u8; CHECKSUM_SIZE as usize]) -> u32 {
    (&trailer[..]).get_u32()
}
