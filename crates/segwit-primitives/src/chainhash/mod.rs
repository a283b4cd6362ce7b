//! Chain hash type for transaction identification.
//!
//! Provides a `Hash` type — a 32-byte array displayed as byte-reversed hex,
//! matching Bitcoin's convention for transaction IDs.  This type fixes the
//! txid byte-order convention for the whole SDK: hex strings cross the API
//! boundary in display (big-endian) order and are reversed exactly once,
//! here; raw `[u8; 32]` values are always internal (little-endian) order.

use crate::hash::sha256d;
use crate::PrimitivesError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Size of a Hash in bytes.
pub const HASH_SIZE: usize = 32;

/// Maximum hex string length for a Hash (64 hex characters).
pub const MAX_HASH_STRING_SIZE: usize = HASH_SIZE * 2;

/// A 32-byte hash used for transaction IDs.
///
/// When displayed as a string, the bytes are reversed to match Bitcoin's
/// standard representation (little-endian internal, big-endian display).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// Create a Hash from a raw 32-byte array.
    ///
    /// The bytes are stored as-is (internal byte order).
    pub fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    /// Create a Hash from a byte slice in internal order.
    ///
    /// # Arguments
    /// * `bytes` - A slice that must be exactly 32 bytes.
    ///
    /// # Returns
    /// `Ok(Hash)` if the slice is 32 bytes, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != HASH_SIZE {
            return Err(PrimitivesError::InvalidHash(format!(
                "invalid hash length of {}, want {}",
                bytes.len(),
                HASH_SIZE
            )));
        }
        let mut arr = [0u8; HASH_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Hash(arr))
    }

    /// Create a Hash from a byte-reversed (display order) hex string.
    ///
    /// This is the form transaction IDs appear in block explorers and RPC
    /// output. Short strings are zero-padded on the high end.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of up to 64 characters.
    ///
    /// # Returns
    /// `Ok(Hash)` on success, or an error for invalid input.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Ok(Hash::default());
        }
        if hex_str.len() > MAX_HASH_STRING_SIZE {
            return Err(PrimitivesError::InvalidHash(format!(
                "max hash string length is {} characters",
                MAX_HASH_STRING_SIZE
            )));
        }

        // Pad to even length if needed.
        let padded = if hex_str.len() % 2 != 0 {
            format!("0{}", hex_str)
        } else {
            hex_str.to_string()
        };

        // Decode into a 32-byte buffer, right-aligned (display order).
        let decoded = hex::decode(&padded)?;
        let mut display_order = [0u8; HASH_SIZE];
        let offset = HASH_SIZE - decoded.len();
        display_order[offset..].copy_from_slice(&decoded);

        // Reverse to get internal byte order.
        let mut dst = [0u8; HASH_SIZE];
        for i in 0..HASH_SIZE {
            dst[i] = display_order[HASH_SIZE - 1 - i];
        }

        Ok(Hash(dst))
    }

    /// Compute the double SHA-256 of the input and wrap it as a Hash.
    ///
    /// This is how transaction IDs are derived from serialized bytes.
    pub fn double_hash(data: &[u8]) -> Self {
        Hash(sha256d(data))
    }

    /// Access the internal byte array.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Return a copy of the internal bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// Display the hash as byte-reversed hex (Bitcoin convention).
///
/// Internal bytes `[0x06, 0xe5, ...]` display as `"...e506"`.
impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        write!(f, "{}", hex::encode(reversed))
    }
}

/// Parse a byte-reversed hex string into a Hash.
impl FromStr for Hash {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

/// Serialize as a display-order hex string in JSON.
impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Deserialize from a display-order hex string in JSON.
impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
