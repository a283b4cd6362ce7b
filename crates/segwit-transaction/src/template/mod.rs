//! Script templates for common transaction types.
//!
//! Provides the `WitnessTemplate` trait and a P2WPKH implementation for
//! producing witness stacks during transaction signing.

pub mod p2wpkh;

use crate::transaction::Transaction;
use crate::witness::Witness;
use crate::TransactionError;

/// Trait for templates that produce witness stacks.
///
/// Any segwit signing strategy should implement this trait.  The `sign`
/// method receives the full transaction and the input index, computes the
/// appropriate signature hash, signs it, and returns the witness stack
/// for that input.
pub trait WitnessTemplate {
    /// Produce a witness stack for the given input.
    ///
    /// # Arguments
    /// * `tx` - The transaction being signed.
    /// * `input_index` - The index of the input to sign.
    ///
    /// # Returns
    /// `Ok(Witness)` containing the witness stack, or an error on failure.
    fn sign(&self, tx: &Transaction, input_index: u32) -> Result<Witness, TransactionError>;

    /// Estimate the serialized byte length of the witness stack.
    ///
    /// Used for fee calculation before the actual signature is computed.
    fn estimate_length(&self, tx: &Transaction, input_index: u32) -> u32;
}
