/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The transaction structure is invalid (e.g. input index out of range).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    /// An error occurred during input signing (e.g. missing source output).
    #[error("signing error: {0}")]
    SigningError(String),
    /// An error occurred during binary/hex serialization or deserialization.
    #[error("serialization error: {0}")]
    SerializationError(String),
    /// A script does not match the expected template (e.g. scriptCode
    /// extraction from a non-P2WPKH locking script).
    #[error("malformed script: {0}")]
    MalformedScript(String),
    /// Witness stack count does not match the input count.
    #[error("witness count {witnesses} does not match input count {inputs}")]
    WitnessCountMismatch { inputs: usize, witnesses: usize },
    /// An underlying primitives error (forwarded from `segwit-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] segwit_primitives::PrimitivesError),
}
