//! SegWit SDK - Hashing, wire codec, and secp256k1 signing primitives.
//!
//! This crate provides the foundational building blocks for transaction
//! construction and signing:
//! - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160, HMAC)
//! - Chain hash type for transaction identification
//! - Wire-format codec (little-endian integers, VarInt, reader/writer)
//! - Elliptic curve cryptography (secp256k1 keys and ECDSA signatures)

pub mod hash;
pub mod chainhash;
pub mod util;
pub mod ec;

mod error;
pub use error::PrimitivesError;
