//! Minimal script type for transaction templates.
//!
//! Scripts are treated as opaque byte sequences; this module provides just
//! enough structure to build the P2PKH/P2WPKH locking templates and to
//! extract the BIP143 scriptCode from a P2WPKH program. There is no
//! interpreter.

use std::fmt;

use crate::TransactionError;

/// Duplicate the top stack item.
pub const OP_DUP: u8 = 0x76;
/// Hash the top stack item with RIPEMD160(SHA256(x)).
pub const OP_HASH160: u8 = 0xa9;
/// Push the next 20 bytes onto the stack.
pub const OP_DATA_20: u8 = 0x14;
/// Verify the top two stack items are equal.
pub const OP_EQUALVERIFY: u8 = 0x88;
/// Verify an ECDSA signature against a public key.
pub const OP_CHECKSIG: u8 = 0xac;
/// Push an empty byte array (witness version 0 in witness programs).
pub const OP_0: u8 = 0x00;
/// The next byte is the length of data to push.
pub const OP_PUSHDATA1: u8 = 0x4c;

/// Byte length of a P2WPKH witness program: OP_0, push-20, 20-byte hash.
const P2WPKH_PROGRAM_LEN: usize = 22;

/// A Bitcoin script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Script(Vec<u8>);

impl Script {
    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "76a914...88ac").
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or an error if the hex is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| TransactionError::SerializationError(format!("invalid hex: {}", e)))?;
        Ok(Script(bytes))
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Return the raw script bytes.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Return the script as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Return the byte length of the script.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the script is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a data push to the script.
    ///
    /// Uses a direct length opcode for data up to 75 bytes and OP_PUSHDATA1
    /// for data up to 255 bytes; larger pushes are not needed by any
    /// supported template.
    ///
    /// # Arguments
    /// * `data` - The bytes to push.
    ///
    /// # Returns
    /// `Ok(())` on success, or `MalformedScript` if the data is too large.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), TransactionError> {
        match data.len() {
            0..=0x4b => self.0.push(data.len() as u8),
            0x4c..=0xff => {
                self.0.push(OP_PUSHDATA1);
                self.0.push(data.len() as u8);
            }
            _ => {
                return Err(TransactionError::MalformedScript(format!(
                    "push data of {} bytes exceeds supported size",
                    data.len()
                )));
            }
        }
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Check whether this script is a P2WPKH witness program.
    ///
    /// The canonical form is exactly 22 bytes: `OP_0 <push 20> <20-byte hash>`.
    pub fn is_p2wpkh(&self) -> bool {
        self.0.len() == P2WPKH_PROGRAM_LEN && self.0[0] == OP_0 && self.0[1] == OP_DATA_20
    }

    /// Derive the BIP143 scriptCode from a P2WPKH locking script.
    ///
    /// Per BIP143, signing a P2WPKH input substitutes the legacy P2PKH
    /// script `OP_DUP OP_HASH160 <push 20> <hash> OP_EQUALVERIFY OP_CHECKSIG`
    /// built from the 20-byte hash inside the witness program.
    ///
    /// # Returns
    /// `Ok(Script)` with the 25-byte scriptCode, or `MalformedScript` if this
    /// script is not the canonical 22-byte P2WPKH template.
    pub fn p2wpkh_script_code(&self) -> Result<Script, TransactionError> {
        if !self.is_p2wpkh() {
            return Err(TransactionError::MalformedScript(format!(
                "not a P2WPKH locking script: {}",
                self.to_hex()
            )));
        }
        let mut pkh = [0u8; 20];
        pkh.copy_from_slice(&self.0[2..]);
        Ok(p2pkh_lock(&pkh))
    }
}

/// Create a P2PKH locking script from a 20-byte public key hash.
///
/// Produces: `OP_DUP OP_HASH160 <push 20> <hash> OP_EQUALVERIFY OP_CHECKSIG`
pub fn p2pkh_lock(pubkey_hash: &[u8; 20]) -> Script {
    let mut bytes = Vec::with_capacity(25);
    bytes.push(OP_DUP);
    bytes.push(OP_HASH160);
    bytes.push(OP_DATA_20);
    bytes.extend_from_slice(pubkey_hash);
    bytes.push(OP_EQUALVERIFY);
    bytes.push(OP_CHECKSIG);
    Script(bytes)
}

/// Create a P2WPKH locking script (witness program) from a 20-byte public
/// key hash.
///
/// Produces: `OP_0 <push 20> <hash>`
pub fn p2wpkh_lock(pubkey_hash: &[u8; 20]) -> Script {
    let mut bytes = Vec::with_capacity(P2WPKH_PROGRAM_LEN);
    bytes.push(OP_0);
    bytes.push(OP_DATA_20);
    bytes.extend_from_slice(pubkey_hash);
    Script(bytes)
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
