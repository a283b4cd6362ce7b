//! SegWit SDK - Transaction building, signing, and serialization.
//!
//! Provides the Transaction type with inputs, outputs, and per-input
//! witness stacks, BIP143 signature hash computation, deterministic ECDSA
//! signing via P2WPKH templates, and binary/hex serialization in both the
//! legacy and segregated-witness wire formats.

pub mod transaction;
pub mod input;
pub mod output;
pub mod witness;
pub mod script;
pub mod sighash;
pub mod template;

mod error;
pub use error::TransactionError;
pub use input::TransactionInput;
pub use output::TransactionOutput;
pub use script::Script;
pub use transaction::Transaction;
pub use witness::Witness;
