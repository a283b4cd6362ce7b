#![deny(missing_docs)]

//! SegWit transaction SDK - complete SDK.
//!
//! Re-exports all SDK components for convenient single-crate usage.

pub use segwit_primitives as primitives;
pub use segwit_transaction as transaction;
