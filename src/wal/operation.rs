//! WAL operation definitions
//!
//! Defines the mutations recorded in the log and their versioned encoding.

use bincode::Options;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WalError};

/// Encoding version written as the first byte of every operation payload
pub const OPERATION_FORMAT_VERSION: u8 = 1;

/// Operations that can be logged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Put a key-value pair
    Put { key: Vec<u8>, value: Vec<u8> },

    /// Delete a key
    Delete { key: Vec<u8> },
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_big_endian()
        .reject_trailing_bytes()
}

impl Operation {
    /// The key this operation mutates
    pub fn key(&self) -> &[u8] {
        match self {
            Operation::Put { key, .. } | Operation::Delete { key } => key,
        }
    }

    /// Short name used in logs and dumps
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Put { .. } => "PUT",
            Operation::Delete { .. } => "DELETE",
        }
    }

    /// Encode into a record payload: version byte followed by the body
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = vec![OPERATION_FORMAT_VERSION];
        codec().serialize_into(&mut buf, self)?;
        Ok(buf)
    }

    /// Decode a record payload produced by `encode`
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (&version, body) = bytes
            .split_first()
            .ok_or_else(|| WalError::Serialization("empty operation payload".to_string()))?;

        if version != OPERATION_FORMAT_VERSION {
            return Err(WalError::UnsupportedVersion(version));
        }

        Ok(codec().deserialize(body)?)
    }
}
