//! Transaction input referencing a previous output.
//!
//! Contains the source transaction ID, output index, sequence number,
//! optional unlocking script, and the witness stack attached to this
//! input.  Provides binary serialization/deserialization following the
//! Bitcoin wire format (the witness stack itself is serialized
//! separately, after the output list).

use segwit_primitives::util::{VarInt, WireReader, WireWriter};

use crate::output::TransactionOutput;
use crate::script::Script;
use crate::witness::Witness;
use crate::TransactionError;

/// Default sequence number indicating a finalized input (no relative lock-time).
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// A single input in a transaction.
///
/// Each input references an output from a previous transaction by its
/// transaction ID (`source_txid`) and output index (`source_tx_out_index`).
/// Legacy inputs carry an `unlocking_script` (scriptSig); segwit inputs
/// leave the scriptSig empty and carry their authorization data in the
/// `witness` stack instead.
///
/// Signing a segwit input requires the satoshi value and locking script
/// of the output being spent; provide them with `set_source_output`.
///
/// # Wire format (base serialization)
///
/// | Field              | Size             |
/// |--------------------|------------------|
/// | source_txid        | 32 bytes (LE)    |
/// | source_tx_out_index| 4 bytes (LE)     |
/// | script length      | VarInt           |
/// | unlocking_script   | variable         |
/// | sequence_number    | 4 bytes (LE)     |
#[derive(Clone, Debug)]
pub struct TransactionInput {
    /// The 32-byte transaction ID of the output being spent, in internal
    /// (little-endian) byte order.
    pub source_txid: [u8; 32],

    /// Index of the output within the source transaction.
    pub source_tx_out_index: u32,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence_number: u32,

    /// The legacy unlocking script (scriptSig). `None` for segwit inputs
    /// and for legacy inputs that have not yet been signed.
    pub unlocking_script: Option<Script>,

    /// The witness stack for this input. Empty for legacy inputs.
    pub witness: Witness,

    /// Optional reference to the output being spent.  Required for
    /// segwit signing, which commits to the source value and script.
    source_output: Option<TransactionOutput>,
}

impl TransactionInput {
    /// Create a new `TransactionInput` with default values.
    ///
    /// The source txid is zeroed, output index is 0, sequence is finalized,
    /// and no unlocking script, witness items, or source output are set.
    pub fn new() -> Self {
        TransactionInput {
            source_txid: [0u8; 32],
            source_tx_out_index: 0,
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
            unlocking_script: None,
            witness: Witness::new(),
            source_output: None,
        }
    }

    /// Deserialize a `TransactionInput` from a `WireReader`.
    ///
    /// Reads the base wire format: 32-byte txid, 4-byte output index,
    /// varint-prefixed unlocking script, and 4-byte sequence number.
    /// The witness stack is read separately by the transaction decoder.
    ///
    /// # Returns
    /// `Ok(TransactionInput)` on success, or a `TransactionError` if the
    /// data is truncated or malformed.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, TransactionError> {
        let txid_bytes = reader.read_bytes(32).map_err(|e| {
            TransactionError::SerializationError(format!("reading source txid: {}", e))
        })?;
        let mut source_txid = [0u8; 32];
        source_txid.copy_from_slice(txid_bytes);

        let source_tx_out_index = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading output index: {}", e))
        })?;

        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;

        let script_bytes = reader.read_bytes(script_len.value() as usize).map_err(|e| {
            TransactionError::SerializationError(format!("reading unlocking script: {}", e))
        })?;

        let sequence_number = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence number: {}", e))
        })?;

        let unlocking_script = if script_bytes.is_empty() {
            None
        } else {
            Some(Script::from_bytes(script_bytes))
        };

        Ok(TransactionInput {
            source_txid,
            source_tx_out_index,
            sequence_number,
            unlocking_script,
            witness: Witness::new(),
            source_output: None,
        })
    }

    /// Serialize this `TransactionInput` into a `WireWriter`.
    ///
    /// Writes the base wire format: txid, output index, varint script
    /// length, script bytes, and sequence number.  The witness stack is
    /// written separately by the transaction encoder.
    pub fn write_to(&self, writer: &mut WireWriter) {
        writer.write_bytes(&self.source_txid);
        writer.write_u32_le(self.source_tx_out_index);

        match &self.unlocking_script {
            Some(script) => {
                let script_bytes = script.to_bytes();
                writer.write_varint(VarInt::from(script_bytes.len()));
                writer.write_bytes(script_bytes);
            }
            None => {
                writer.write_varint(VarInt::from(0u64));
            }
        }

        writer.write_u32_le(self.sequence_number);
    }

    /// Return the 36-byte outpoint (txid followed by the LE output index).
    ///
    /// This is the form committed to by the signature digest.
    pub fn outpoint_bytes(&self) -> [u8; 36] {
        let mut out = [0u8; 36];
        out[..32].copy_from_slice(&self.source_txid);
        out[32..].copy_from_slice(&self.source_tx_out_index.to_le_bytes());
        out
    }

    /// Set a direct source output on this input.
    ///
    /// This provides the satoshi value and locking script of the output
    /// being spent. Segwit signing fails without it.
    ///
    /// # Arguments
    /// * `output` - The source output, or `None` to clear.
    pub fn set_source_output(&mut self, output: Option<TransactionOutput>) {
        self.source_output = output;
    }

    /// Look up the source transaction output, if available.
    pub fn source_tx_output(&self) -> Option<&TransactionOutput> {
        self.source_output.as_ref()
    }

    /// Return the satoshi value of the source output, if available.
    pub fn source_tx_satoshis(&self) -> Option<u64> {
        self.source_tx_output().map(|o| o.satoshis)
    }

    /// Return the locking script of the source output, if available.
    pub fn source_tx_script(&self) -> Option<&Script> {
        self.source_tx_output().map(|o| &o.locking_script)
    }
}

impl Default for TransactionInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segwit_primitives::chainhash::Hash;

    fn sample_input() -> TransactionInput {
        let mut input = TransactionInput::new();
        input.source_txid =
            *Hash::from_hex("9f96ade4b41d5433f4eda31e1738ec2b36f6e7d1420d94a6af99801a88f7f7ff")
                .unwrap()
                .as_bytes();
        input.source_tx_out_index = 0;
        input.sequence_number = 0xFFFF_FFEE;
        input
    }

    #[test]
    fn serializes_unsigned_input() {
        let input = sample_input();
        let mut writer = WireWriter::new();
        input.write_to(&mut writer);
        let bytes = writer.into_bytes();

        assert_eq!(bytes.len(), 32 + 4 + 1 + 4);
        // txid is stored and written in internal (reversed) order
        assert_eq!(bytes[0], 0xff);
        assert_eq!(bytes[31], 0x9f);
        // zero-length script placeholder
        assert_eq!(bytes[36], 0x00);
        // sequence
        assert_eq!(&bytes[37..41], &[0xee, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn roundtrips_signed_input() {
        let mut input = sample_input();
        input.unlocking_script = Some(Script::from_hex("47304402aa").unwrap());

        let mut writer = WireWriter::new();
        input.write_to(&mut writer);
        let bytes = writer.into_bytes();

        let mut reader = WireReader::new(&bytes);
        let decoded = TransactionInput::read_from(&mut reader).unwrap();
        assert_eq!(decoded.source_txid, input.source_txid);
        assert_eq!(decoded.source_tx_out_index, 0);
        assert_eq!(decoded.sequence_number, 0xFFFF_FFEE);
        assert_eq!(
            decoded.unlocking_script.unwrap().to_hex(),
            "47304402aa"
        );
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn outpoint_concatenates_txid_and_index() {
        let mut input = sample_input();
        input.source_tx_out_index = 1;
        let outpoint = input.outpoint_bytes();
        assert_eq!(&outpoint[..32], &input.source_txid);
        assert_eq!(&outpoint[32..], &[0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn rejects_truncated_input() {
        let input = sample_input();
        let mut writer = WireWriter::new();
        input.write_to(&mut writer);
        let bytes = writer.into_bytes();

        let mut reader = WireReader::new(&bytes[..bytes.len() - 2]);
        assert!(TransactionInput::read_from(&mut reader).is_err());
    }

    #[test]
    fn source_output_lookup() {
        let mut input = sample_input();
        assert!(input.source_tx_output().is_none());
        assert!(input.source_tx_satoshis().is_none());

        input.set_source_output(Some(TransactionOutput::with_script(
            600_000_000,
            Script::from_hex("00141d0f172a0ecb48aee1be1f2687d2963ae33f71a1").unwrap(),
        )));
        assert_eq!(input.source_tx_satoshis(), Some(600_000_000));
        assert!(input.source_tx_script().unwrap().is_p2wpkh());
    }
}
