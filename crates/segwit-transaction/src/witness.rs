//! Per-input witness stack.
//!
//! Each input in a segregated-witness transaction carries an ordered stack
//! of byte items that satisfy the witness program of the output being
//! spent. An input with no witness data carries an explicit empty stack,
//! which serializes as the single byte 0x00 — distinct from the absence of
//! the witness section at the transaction level.

use segwit_primitives::util::{VarInt, WireReader, WireWriter};

use crate::TransactionError;

/// An ordered stack of witness items for one transaction input.
///
/// # Wire format
///
/// | Field       | Size                        |
/// |-------------|-----------------------------|
/// | item count  | VarInt                      |
/// | per item    | VarInt length + item bytes  |
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Witness {
    items: Vec<Vec<u8>>,
}

impl Witness {
    /// Create an empty witness stack.
    pub fn new() -> Self {
        Witness { items: Vec::new() }
    }

    /// Create a witness stack from a list of items.
    pub fn from_items(items: Vec<Vec<u8>>) -> Self {
        Witness { items }
    }

    /// Build the canonical 2-item P2WPKH witness stack.
    ///
    /// The stack is `[signature ‖ sighash-type byte, compressed public key]`,
    /// the unlock proof for a P2WPKH output.
    ///
    /// # Arguments
    /// * `signature_with_type` - DER signature with the trailing sighash byte.
    /// * `pubkey` - The 33-byte compressed public key.
    pub fn p2wpkh(signature_with_type: Vec<u8>, pubkey: &[u8; 33]) -> Self {
        Witness {
            items: vec![signature_with_type, pubkey.to_vec()],
        }
    }

    /// Append an item to the stack.
    pub fn push(&mut self, item: Vec<u8>) {
        self.items.push(item);
    }

    /// Return the witness items in stack order.
    pub fn items(&self) -> &[Vec<u8>] {
        &self.items
    }

    /// Return the number of items in the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the stack has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Deserialize a witness stack from a `WireReader`.
    ///
    /// # Returns
    /// `Ok(Witness)` on success, or a `TransactionError` if the data is
    /// truncated.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, TransactionError> {
        let count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading witness item count: {}", e))
        })?;

        // Each item costs at least its one-byte length prefix; cap the
        // preallocation so a hostile count fails in the loop, not on alloc.
        let mut items = Vec::with_capacity((count.value() as usize).min(reader.remaining()));
        for _ in 0..count.value() {
            let len = reader.read_varint().map_err(|e| {
                TransactionError::SerializationError(format!("reading witness item length: {}", e))
            })?;
            let item = reader.read_bytes(len.value() as usize).map_err(|e| {
                TransactionError::SerializationError(format!("reading witness item: {}", e))
            })?;
            items.push(item.to_vec());
        }

        Ok(Witness { items })
    }

    /// Serialize this witness stack into a `WireWriter`.
    ///
    /// An empty stack writes the single byte 0x00.
    pub fn write_to(&self, writer: &mut WireWriter) {
        writer.write_varint(VarInt::from(self.items.len()));
        for item in &self.items {
            writer.write_varint(VarInt::from(item.len()));
            writer.write_bytes(item);
        }
    }

    /// Serialize this witness stack to a byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stack_serializes_as_zero_byte() {
        assert_eq!(Witness::new().to_bytes(), vec![0x00]);
    }

    #[test]
    fn test_p2wpkh_stack_layout() {
        let sig = vec![0x30, 0x44, 0x01]; // placeholder bytes
        let pubkey = [0x02u8; 33];
        let witness = Witness::p2wpkh(sig.clone(), &pubkey);

        assert_eq!(witness.len(), 2);
        assert_eq!(witness.items()[0], sig);
        assert_eq!(witness.items()[1], pubkey.to_vec());

        // count(1) + len(1) + 3 + len(1) + 33
        let bytes = witness.to_bytes();
        assert_eq!(bytes[0], 0x02);
        assert_eq!(bytes[1], 0x03);
        assert_eq!(bytes[5], 33);
        assert_eq!(bytes.len(), 1 + 1 + 3 + 1 + 33);
    }

    #[test]
    fn test_roundtrip() {
        let witness = Witness::from_items(vec![vec![], vec![0xaa; 72], vec![0xbb; 33]]);
        let bytes = witness.to_bytes();

        let mut reader = WireReader::new(&bytes);
        let parsed = Witness::read_from(&mut reader).unwrap();
        assert_eq!(parsed, witness);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_truncated_stack_rejected() {
        // Claims 2 items but provides none.
        let mut reader = WireReader::new(&[0x02]);
        assert!(Witness::read_from(&mut reader).is_err());

        // Item length runs past the end.
        let mut reader = WireReader::new(&[0x01, 0x05, 0xaa]);
        assert!(Witness::read_from(&mut reader).is_err());
    }
}
