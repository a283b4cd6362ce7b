//! Core segwit transaction type.
//!
//! Represents a complete transaction with version, inputs, outputs, and
//! locktime.  Supports both the base (legacy) serialization and the
//! BIP-144 extended serialization carrying witness data, transaction ID
//! computation over the base form, and builder-pattern methods for
//! adding inputs and outputs.

use segwit_primitives::chainhash::Hash;
use segwit_primitives::util::{VarInt, WireReader, WireWriter};

use crate::input::{TransactionInput, DEFAULT_SEQUENCE_NUMBER};
use crate::output::TransactionOutput;
use crate::script::Script;
use crate::sighash::{self, SighashCache};
use crate::witness::Witness;
use crate::TransactionError;

/// Marker byte distinguishing the extended serialization: it occupies
/// the position of a legacy input count, which can never be zero.
const SEGWIT_MARKER: u8 = 0x00;

/// Flag byte following the marker. Only value 0x01 is defined.
const SEGWIT_FLAG: u8 = 0x01;

/// A transaction consisting of a version, a set of inputs, a set of
/// outputs, and a lock time.  Witness stacks live on the inputs.
///
/// # Wire format (extended, BIP-144)
///
/// | Field         | Size                      |
/// |---------------|---------------------------|
/// | version       | 4 bytes (LE)              |
/// | marker        | 1 byte (0x00)             |
/// | flag          | 1 byte (0x01)             |
/// | input count   | VarInt                    |
/// | inputs        | variable (per input)      |
/// | output count  | VarInt                    |
/// | outputs       | variable (per output)     |
/// | witnesses     | one stack per input       |
/// | lock_time     | 4 bytes (LE)              |
///
/// The marker, flag, and witness section are omitted when no input
/// carries witness data, which yields the legacy format.
#[derive(Clone, Debug)]
pub struct Transaction {
    /// Transaction format version. Currently 1 or 2.
    pub version: u32,

    /// Ordered list of transaction inputs.
    pub inputs: Vec<TransactionInput>,

    /// Ordered list of transaction outputs.
    pub outputs: Vec<TransactionOutput>,

    /// Lock time. If non-zero, the transaction is not valid until the
    /// specified block height or Unix timestamp.
    pub lock_time: u32,
}

impl Transaction {
    /// Create a new empty transaction with version 1 and lock time 0.
    pub fn new() -> Self {
        Transaction {
            version: 1,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
        }
    }

    /// Assemble a transaction from parts, attaching one witness stack
    /// per input.
    ///
    /// # Arguments
    /// * `version`   - Transaction format version.
    /// * `inputs`    - The transaction inputs, in order.
    /// * `outputs`   - The transaction outputs, in order.
    /// * `witnesses` - Exactly one witness stack per input, positionally
    ///   aligned. Use an empty stack for legacy inputs.
    /// * `lock_time` - The transaction lock time.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or
    /// [`TransactionError::WitnessCountMismatch`] when the witness list
    /// length differs from the input list length.
    pub fn assemble(
        version: u32,
        mut inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
        witnesses: Vec<Witness>,
        lock_time: u32,
    ) -> Result<Self, TransactionError> {
        if witnesses.len() != inputs.len() {
            return Err(TransactionError::WitnessCountMismatch {
                inputs: inputs.len(),
                witnesses: witnesses.len(),
            });
        }

        for (input, witness) in inputs.iter_mut().zip(witnesses) {
            input.witness = witness;
        }

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| TransactionError::SerializationError(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// This method requires the byte slice to contain exactly one complete
    /// transaction with no trailing data.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` if the data
    /// is truncated, malformed, or has trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = WireReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Deserialize a transaction from a `WireReader`.
    ///
    /// Detects the extended serialization by inspecting the byte after
    /// the version: a legacy input count is never zero, so a 0x00 there
    /// is the segwit marker and must be followed by the 0x01 flag and a
    /// witness section with one stack per input.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, TransactionError> {
        let version = reader
            .read_u32_le()
            .map_err(|e| TransactionError::SerializationError(format!("reading version: {}", e)))?;

        let has_witness = reader.peek_u8().map_err(|e| {
            TransactionError::SerializationError(format!("reading input count: {}", e))
        })? == SEGWIT_MARKER;

        if has_witness {
            reader.read_u8().map_err(|e| {
                TransactionError::SerializationError(format!("reading marker: {}", e))
            })?;
            let flag = reader.read_u8().map_err(|e| {
                TransactionError::SerializationError(format!("reading flag: {}", e))
            })?;
            if flag != SEGWIT_FLAG {
                return Err(TransactionError::SerializationError(format!(
                    "unknown segwit flag 0x{:02x}",
                    flag
                )));
            }
        }

        let input_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading input count: {}", e))
        })?;

        // A serialized input is at least 41 bytes; cap the preallocation at
        // what the remaining data could possibly hold so a hostile count
        // fails in the parse loop instead of aborting on allocation.
        let mut inputs =
            Vec::with_capacity((input_count.value() as usize).min(reader.remaining() / 41));
        for _ in 0..input_count.value() {
            inputs.push(TransactionInput::read_from(reader)?);
        }

        let output_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading output count: {}", e))
        })?;

        // A serialized output is at least 9 bytes.
        let mut outputs =
            Vec::with_capacity((output_count.value() as usize).min(reader.remaining() / 9));
        for _ in 0..output_count.value() {
            outputs.push(TransactionOutput::read_from(reader)?);
        }

        if has_witness {
            for input in &mut inputs {
                input.witness = Witness::read_from(reader)?;
            }
        }

        let lock_time = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading lock time: {}", e))
        })?;

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Whether any input carries witness data.
    pub fn has_witness(&self) -> bool {
        self.inputs.iter().any(|input| !input.witness.is_empty())
    }

    /// Serialize this transaction to raw bytes.
    ///
    /// Uses the extended (BIP-144) serialization when any input carries
    /// witness data, and the legacy serialization otherwise.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.serialize(self.has_witness())
    }

    /// Serialize this transaction in the legacy format, with witness
    /// data stripped.  This is the form the transaction ID commits to.
    pub fn to_bytes_legacy(&self) -> Vec<u8> {
        self.serialize(false)
    }

    fn serialize(&self, with_witness: bool) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(256);
        writer.write_u32_le(self.version);

        if with_witness {
            writer.write_u8(SEGWIT_MARKER);
            writer.write_u8(SEGWIT_FLAG);
        }

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(&mut writer);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(&mut writer);
        }

        if with_witness {
            for input in &self.inputs {
                input.witness.write_to(&mut writer);
            }
        }

        writer.write_u32_le(self.lock_time);
        writer.into_bytes()
    }

    /// Serialize this transaction to a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    // -----------------------------------------------------------------
    // Transaction ID
    // -----------------------------------------------------------------

    /// Compute the transaction ID.
    ///
    /// The txid is the double SHA-256 of the legacy serialization, so it
    /// does not change when witness data is attached.  The returned
    /// bytes are in internal (little-endian) order; use `tx_id_hex()`
    /// for the conventional display string.
    pub fn tx_id(&self) -> [u8; 32] {
        *Hash::double_hash(&self.to_bytes_legacy()).as_bytes()
    }

    /// Compute the transaction ID as a human-readable hex string.
    ///
    /// The hex string is byte-reversed from the internal hash, following
    /// Bitcoin's convention where txids are displayed in big-endian order.
    pub fn tx_id_hex(&self) -> String {
        Hash::double_hash(&self.to_bytes_legacy()).to_string()
    }

    // -----------------------------------------------------------------
    // Inputs and outputs
    // -----------------------------------------------------------------

    /// Append a `TransactionInput` to this transaction.
    pub fn add_input(&mut self, input: TransactionInput) {
        self.inputs.push(input);
    }

    /// Return the number of inputs in the transaction.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Append a `TransactionOutput` to this transaction.
    pub fn add_output(&mut self, output: TransactionOutput) {
        self.outputs.push(output);
    }

    /// Return the number of outputs in the transaction.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Compute the sum of all output satoshi values.
    ///
    /// Saturates at `u64::MAX` rather than overflowing on nonsense
    /// caller-supplied amounts.
    pub fn total_output_satoshis(&self) -> u64 {
        self.outputs
            .iter()
            .fold(0u64, |total, o| total.saturating_add(o.satoshis))
    }

    /// Compute the sum of all input satoshi values from their source outputs.
    ///
    /// Returns an error if any input does not have its source output set.
    pub fn total_input_satoshis(&self) -> Result<u64, TransactionError> {
        let mut total = 0u64;
        for input in &self.inputs {
            let sats = input.source_tx_satoshis().ok_or_else(|| {
                TransactionError::InvalidTransaction(
                    "missing source output on input".to_string(),
                )
            })?;
            total = total.saturating_add(sats);
        }
        Ok(total)
    }

    /// Return the size of this transaction in bytes, witness included.
    pub fn size(&self) -> usize {
        self.to_bytes().len()
    }

    /// Add an input from UTXO information.
    ///
    /// Creates a new input referencing the given previous transaction
    /// output and stores the locking script and satoshi value for
    /// sighash computation during signing.
    ///
    /// # Arguments
    /// * `prev_tx_id` - The hex txid of the previous transaction (display order).
    /// * `vout` - The output index being spent.
    /// * `prev_locking_script_hex` - Hex-encoded locking script of the previous output.
    /// * `satoshis` - The satoshi value of the previous output.
    pub fn add_input_from(
        &mut self,
        prev_tx_id: &str,
        vout: u32,
        prev_locking_script_hex: &str,
        satoshis: u64,
    ) -> Result<(), TransactionError> {
        let hash = Hash::from_hex(prev_tx_id)?;

        let locking_script = if prev_locking_script_hex.is_empty() {
            Script::new()
        } else {
            Script::from_hex(prev_locking_script_hex)?
        };

        let mut input = TransactionInput::new();
        input.source_txid = *hash.as_bytes();
        input.source_tx_out_index = vout;
        input.sequence_number = DEFAULT_SEQUENCE_NUMBER;
        input.set_source_output(Some(TransactionOutput::with_script(
            satoshis,
            locking_script,
        )));

        self.inputs.push(input);
        Ok(())
    }

    // -----------------------------------------------------------------
    // Signature hash
    // -----------------------------------------------------------------

    /// Compute the BIP-143 signature hash for a given input.
    ///
    /// Looks up the source output's locking script and satoshi value from
    /// the input's stored source info.  When the source script is a
    /// P2WPKH witness program, the scriptCode is derived from its key
    /// hash; otherwise the source script is used as the scriptCode
    /// directly.
    ///
    /// # Arguments
    /// * `cache` - Precomputed field-group hashes from [`SighashCache::new`].
    /// * `input_index` - Index of the input being signed.
    /// * `sighash_flag` - The combined sighash flags (e.g. `SIGHASH_ALL`).
    ///
    /// # Returns
    /// A 32-byte double-SHA256 digest to be signed by ECDSA.
    pub fn calc_input_signature_hash(
        &self,
        cache: &SighashCache,
        input_index: usize,
        sighash_flag: u32,
    ) -> Result<[u8; 32], TransactionError> {
        if input_index >= self.inputs.len() {
            return Err(TransactionError::InvalidTransaction(format!(
                "input index {} out of range (tx has {} inputs)",
                input_index,
                self.inputs.len()
            )));
        }

        let input = &self.inputs[input_index];
        let source_output = input.source_tx_output().ok_or_else(|| {
            TransactionError::SigningError(
                "missing source output on input (no previous tx info)".to_string(),
            )
        })?;

        let script_code = if source_output.locking_script.is_p2wpkh() {
            source_output.locking_script.p2wpkh_script_code()?
        } else {
            source_output.locking_script.clone()
        };

        sighash::signature_hash(
            self,
            cache,
            input_index,
            script_code.to_bytes(),
            source_output.satoshis,
            sighash_flag,
        )
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Transaction {
    /// Display the transaction as its hex-encoded serialization.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
