//! Pay-to-Witness-Public-Key-Hash (P2WPKH) script template.
//!
//! Creates native segwit v0 locking scripts (`OP_0 <20-byte pubkey
//! hash>`) and witness stacks (`<sig> <pubkey>`).

use segwit_primitives::ec::PrivateKey;

use crate::script::{self, Script};
use crate::sighash::{SighashCache, SIGHASH_ALL};
use crate::template::WitnessTemplate;
use crate::transaction::Transaction;
use crate::witness::Witness;
use crate::TransactionError;

/// Create a P2WPKH locking script from a 20-byte public key hash.
///
/// Produces: `OP_0 <20-byte pubkey hash>`
pub fn lock(pubkey_hash: &[u8; 20]) -> Script {
    script::p2wpkh_lock(pubkey_hash)
}

/// Create a P2WPKH witness signer for transaction inputs.
///
/// # Arguments
/// * `private_key` - The private key used to sign.
/// * `sighash_flag` - Optional sighash flag. Defaults to `SIGHASH_ALL` (0x01).
///
/// # Returns
/// A `P2WPKH` instance implementing `WitnessTemplate`.
pub fn unlock(private_key: PrivateKey, sighash_flag: Option<u32>) -> P2WPKH {
    P2WPKH {
        private_key,
        sighash_flag: sighash_flag.unwrap_or(SIGHASH_ALL),
    }
}

/// P2WPKH signing template holding a private key and sighash flag.
///
/// Implements `WitnessTemplate` to produce two-item witness stacks of
/// the form `<DER_signature || sighash_byte> <compressed_pubkey>`.
pub struct P2WPKH {
    /// The private key used for ECDSA signing.
    private_key: PrivateKey,

    /// The sighash flag to use (e.g. `SIGHASH_ALL`).
    sighash_flag: u32,
}

impl WitnessTemplate for P2WPKH {
    /// Sign the specified input and produce its witness stack.
    ///
    /// Computes the BIP-143 signature hash for the input, signs it with
    /// the private key using RFC6979 deterministic ECDSA, and constructs
    /// the witness: `<DER_sig || sighash_byte> <compressed_pubkey>`.
    ///
    /// The input must carry its source output (value and locking script);
    /// BIP-143 commits to both.
    fn sign(&self, tx: &Transaction, input_index: u32) -> Result<Witness, TransactionError> {
        let idx = input_index as usize;

        if idx >= tx.inputs.len() {
            return Err(TransactionError::SigningError(format!(
                "input index {} out of range (tx has {} inputs)",
                idx,
                tx.inputs.len()
            )));
        }

        let input = &tx.inputs[idx];
        if input.source_tx_output().is_none() {
            return Err(TransactionError::SigningError(
                "missing source output on input (no previous tx info)".to_string(),
            ));
        }

        let cache = SighashCache::new(tx);
        let sig_hash = tx.calc_input_signature_hash(&cache, idx, self.sighash_flag)?;

        // RFC6979 deterministic ECDSA, low-S normalized.
        let signature = self.private_key.sign(&sig_hash)?;

        let pub_key_bytes: [u8; 33] = self.private_key.pub_key().to_compressed();

        let der_sig = signature.to_der();
        let mut sig_buf = Vec::with_capacity(der_sig.len() + 1);
        sig_buf.extend_from_slice(&der_sig);
        sig_buf.push(self.sighash_flag as u8);

        Ok(Witness::p2wpkh(sig_buf, &pub_key_bytes))
    }

    /// Estimate the serialized byte length of a P2WPKH witness stack.
    ///
    /// A typical stack serializes to approximately 108 bytes:
    /// 1 (item count) + 1 + 72 (DER sig + sighash) + 1 + 33 (pubkey).
    fn estimate_length(&self, _tx: &Transaction, _input_index: u32) -> u32 {
        108
    }
}
