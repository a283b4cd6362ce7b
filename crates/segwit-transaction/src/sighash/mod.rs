//! Signature hash computation for segwit transaction signing.
//!
//! Computes the digest that is signed by ECDSA to authorize spending a
//! transaction input, following the BIP-143 algorithm for version-0
//! witness programs.  Unlike the legacy sighash, BIP-143 commits to the
//! value being spent and hashes each field group only once regardless
//! of input count.
//!
//! See <https://github.com/bitcoin/bips/blob/master/bip-0143.mediawiki>

use segwit_primitives::hash::sha256d;
use segwit_primitives::util::{VarInt, WireWriter};

use crate::transaction::Transaction;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Sighash flag constants
// -----------------------------------------------------------------------

/// Sign all inputs and all outputs (the default).
pub const SIGHASH_ALL: u32 = 0x01;

/// Sign all inputs but no outputs, allowing outputs to be modified.
pub const SIGHASH_NONE: u32 = 0x02;

/// Sign all inputs and only the output with the same index as the signed input.
pub const SIGHASH_SINGLE: u32 = 0x03;

/// Combined with another flag: only sign the current input, allowing other
/// inputs to be added later.
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

/// Mask applied to extract the base sighash type (ALL, NONE, SINGLE).
pub const SIGHASH_MASK: u32 = 0x1f;

// -----------------------------------------------------------------------
// Cached field-group hashes
// -----------------------------------------------------------------------

/// The three field-group hashes shared by every input's BIP-143 digest.
///
/// `hashPrevouts`, `hashSequence`, and `hashOutputs` depend only on the
/// transaction, not on which input is being signed, so they are computed
/// once here and reused when signing each input.  The cached values are
/// the unrestricted (SIGHASH_ALL) forms; flag handling in
/// [`calc_preimage`] substitutes zeros or a single-output hash as the
/// sighash type requires.
#[derive(Clone, Debug)]
pub struct SighashCache {
    /// sha256d of all outpoints (txid + vout) concatenated.
    pub hash_prevouts: [u8; 32],

    /// sha256d of all input sequence numbers concatenated.
    pub hash_sequence: [u8; 32],

    /// sha256d of all serialized outputs concatenated.
    pub hash_outputs: [u8; 32],
}

impl SighashCache {
    /// Compute the field-group hashes for a transaction.
    pub fn new(tx: &Transaction) -> Self {
        SighashCache {
            hash_prevouts: prevouts_hash(tx),
            hash_sequence: sequence_hash(tx),
            hash_outputs: outputs_hash(tx, None),
        }
    }
}

// -----------------------------------------------------------------------
// BIP-143 signature hash
// -----------------------------------------------------------------------

/// Compute the BIP-143 signature hash for a given input.
///
/// # Arguments
/// * `tx`           - The transaction being signed.
/// * `cache`        - Precomputed field-group hashes for `tx`.
/// * `input_index`  - Index of the input being signed.
/// * `script_code`  - The scriptCode of the output being spent.  For
///   P2WPKH this is the canonical P2PKH script built from the witness
///   program's key hash, not the 22-byte witness program itself.
/// * `satoshis`     - The satoshi value of the output being spent.
/// * `sighash_type` - The combined sighash flags (e.g. `SIGHASH_ALL`).
///
/// # Returns
/// A 32-byte double-SHA256 digest to be signed by ECDSA.
pub fn signature_hash(
    tx: &Transaction,
    cache: &SighashCache,
    input_index: usize,
    script_code: &[u8],
    satoshis: u64,
    sighash_type: u32,
) -> Result<[u8; 32], TransactionError> {
    let preimage = calc_preimage(tx, cache, input_index, script_code, satoshis, sighash_type)?;
    Ok(sha256d(&preimage))
}

/// Compute the BIP-143 pre-image bytes before double-hashing.
///
/// The preimage consists of:
/// 1. nVersion (4 bytes LE)
/// 2. hashPrevouts (32 bytes) - zeroed when ANYONECANPAY
/// 3. hashSequence (32 bytes) - zeroed when ANYONECANPAY, SINGLE, or NONE
/// 4. outpoint (32+4 bytes) - txid + vout of the input being signed
/// 5. scriptCode (varint + script)
/// 6. value (8 bytes LE) - satoshis of the output being spent
/// 7. nSequence (4 bytes LE) - sequence of the input being signed
/// 8. hashOutputs (32 bytes) - all outputs, one output (SINGLE), or zeros
/// 9. nLocktime (4 bytes LE)
/// 10. sighashType (4 bytes LE)
///
/// # Returns
/// The raw preimage bytes (not yet hashed).
pub fn calc_preimage(
    tx: &Transaction,
    cache: &SighashCache,
    input_index: usize,
    script_code: &[u8],
    satoshis: u64,
    sighash_type: u32,
) -> Result<Vec<u8>, TransactionError> {
    if input_index >= tx.inputs.len() {
        return Err(TransactionError::InvalidTransaction(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        )));
    }

    let input = &tx.inputs[input_index];
    let base_type = sighash_type & SIGHASH_MASK;

    let hash_prevouts = if sighash_type & SIGHASH_ANYONECANPAY == 0 {
        cache.hash_prevouts
    } else {
        [0u8; 32]
    };

    let hash_sequence = if sighash_type & SIGHASH_ANYONECANPAY == 0
        && base_type != SIGHASH_SINGLE
        && base_type != SIGHASH_NONE
    {
        cache.hash_sequence
    } else {
        [0u8; 32]
    };

    let hash_outputs = if base_type != SIGHASH_SINGLE && base_type != SIGHASH_NONE {
        cache.hash_outputs
    } else if base_type == SIGHASH_SINGLE && input_index < tx.outputs.len() {
        outputs_hash(tx, Some(input_index))
    } else {
        [0u8; 32]
    };

    let mut writer = WireWriter::with_capacity(156 + script_code.len());

    writer.write_u32_le(tx.version);
    writer.write_bytes(&hash_prevouts);
    writer.write_bytes(&hash_sequence);
    writer.write_bytes(&input.outpoint_bytes());
    writer.write_varint(VarInt::from(script_code.len()));
    writer.write_bytes(script_code);
    writer.write_u64_le(satoshis);
    writer.write_u32_le(input.sequence_number);
    writer.write_bytes(&hash_outputs);
    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(sighash_type);

    Ok(writer.into_bytes())
}

// -----------------------------------------------------------------------
// Internal helper functions
// -----------------------------------------------------------------------

/// sha256d of all input outpoints (txid + vout) concatenated.
fn prevouts_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = WireWriter::with_capacity(tx.inputs.len() * 36);
    for input in &tx.inputs {
        writer.write_bytes(&input.outpoint_bytes());
    }
    sha256d(writer.as_bytes())
}

/// sha256d of all input sequence numbers concatenated (4 bytes LE each).
fn sequence_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = WireWriter::with_capacity(tx.inputs.len() * 4);
    for input in &tx.inputs {
        writer.write_u32_le(input.sequence_number);
    }
    sha256d(writer.as_bytes())
}

/// sha256d of serialized outputs.
///
/// `None` includes every output; `Some(n)` includes only the output at
/// index `n` (used for SIGHASH_SINGLE).
fn outputs_hash(tx: &Transaction, n: Option<usize>) -> [u8; 32] {
    let mut writer = WireWriter::new();
    match n {
        None => {
            for output in &tx.outputs {
                output.write_to(&mut writer);
            }
        }
        Some(index) => {
            tx.outputs[index].write_to(&mut writer);
        }
    }
    sha256d(writer.as_bytes())
}
