//! Transaction output with satoshi value and locking script.
//!
//! Defines the spending conditions for the output's value.  The encoder
//! owns the script length prefix: callers supply the bare locking script
//! and the same serialization feeds both the wire format and the BIP143
//! hashOutputs computation.

use segwit_primitives::util::{VarInt, WireReader, WireWriter};

use crate::script::Script;
use crate::TransactionError;

/// A single output in a transaction.
///
/// # Wire format
///
/// | Field            | Size           |
/// |------------------|----------------|
/// | satoshis         | 8 bytes (LE)   |
/// | script length    | VarInt         |
/// | locking_script   | variable       |
#[derive(Clone, Debug, Default)]
pub struct TransactionOutput {
    /// The number of satoshis locked by this output.
    pub satoshis: u64,

    /// The locking script (scriptPubKey) that defines spending conditions.
    pub locking_script: Script,
}

impl TransactionOutput {
    /// Create a new `TransactionOutput` with zero satoshis and an empty script.
    pub fn new() -> Self {
        TransactionOutput {
            satoshis: 0,
            locking_script: Script::new(),
        }
    }

    /// Create an output from a value and locking script.
    pub fn with_script(satoshis: u64, locking_script: Script) -> Self {
        TransactionOutput {
            satoshis,
            locking_script,
        }
    }

    /// Deserialize a `TransactionOutput` from a `WireReader`.
    ///
    /// Reads 8-byte LE satoshis, a varint script length, and the script bytes.
    ///
    /// # Returns
    /// `Ok(TransactionOutput)` on success, or a `TransactionError` if the
    /// data is truncated.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, TransactionError> {
        let satoshis = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading satoshis: {}", e))
        })?;

        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;

        let script_bytes = reader.read_bytes(script_len.value() as usize).map_err(|e| {
            TransactionError::SerializationError(format!("reading locking script: {}", e))
        })?;

        Ok(TransactionOutput {
            satoshis,
            locking_script: Script::from_bytes(script_bytes),
        })
    }

    /// Serialize this `TransactionOutput` into a `WireWriter`.
    ///
    /// Writes 8-byte LE satoshis, a varint script length, and the script.
    pub fn write_to(&self, writer: &mut WireWriter) {
        writer.write_u64_le(self.satoshis);
        let script_bytes = self.locking_script.to_bytes();
        writer.write_varint(VarInt::from(script_bytes.len()));
        writer.write_bytes(script_bytes);
    }

    /// Serialize this output to a byte vector.
    ///
    /// These are exactly the bytes committed to by hashOutputs during
    /// sighash computation.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Return the locking script as a hex-encoded string.
    pub fn locking_script_hex(&self) -> String {
        self.locking_script.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding() {
        // First output of the BIP143 native-P2WPKH test transaction.
        let output = TransactionOutput::with_script(
            112_340_000,
            Script::from_hex("76a9148280b37df378db99f66f85c95a783a76ac7a6d5988ac").unwrap(),
        );

        assert_eq!(
            hex::encode(output.to_bytes()),
            "202cb206000000001976a9148280b37df378db99f66f85c95a783a76ac7a6d5988ac"
        );
    }

    #[test]
    fn test_roundtrip() {
        let output = TransactionOutput::with_script(
            223_450_000,
            Script::from_hex("76a9143bde42dbee7e4dbe6a21b2d50ce2f0167faa815988ac").unwrap(),
        );
        let bytes = output.to_bytes();

        let mut reader = WireReader::new(&bytes);
        let parsed = TransactionOutput::read_from(&mut reader).unwrap();
        assert_eq!(parsed.satoshis, output.satoshis);
        assert_eq!(parsed.locking_script, output.locking_script);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_truncated_rejected() {
        let mut reader = WireReader::new(&[0x00; 7]);
        assert!(TransactionOutput::read_from(&mut reader).is_err());
    }
}
