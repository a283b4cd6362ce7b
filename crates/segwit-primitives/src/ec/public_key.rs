//! secp256k1 public key.
//!
//! Supports compressed/uncompressed SEC1 serialization, Hash160 digests for
//! script templates, and ECDSA signature verification.

use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use std::fmt;

use crate::ec::signature::Signature;
use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (parity prefix + 32-byte x-coordinate).
const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32-byte x + 32-byte y).
const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 public key for signature verification and script templates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    /// The underlying k256 verifying key.
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a PublicKey from raw SEC1 encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) formats.
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the bytes do not represent
    /// a valid curve point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "public key bytes are empty".to_string(),
            ));
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner: vk })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of a compressed (66 chars) or uncompressed
    ///   (130 chars) key.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    ///
    /// The first byte is 0x02 (even Y) or 0x03 (odd Y), followed by the
    /// 32-byte X coordinate. This is the form that appears in P2WPKH
    /// witness stacks.
    ///
    /// # Returns
    /// A 33-byte array containing the compressed public key.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the public key in uncompressed SEC1 format (65 bytes).
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the public key as a lowercase hex string (compressed format).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Compute the Hash160 of the compressed public key.
    ///
    /// Hash160 = RIPEMD160(SHA256(compressed_pubkey)). This is the 20-byte
    /// value embedded in P2PKH and P2WPKH locking scripts.
    ///
    /// # Returns
    /// A 20-byte hash digest.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_compressed())
    }

    /// Verify an ECDSA signature over a 32-byte digest.
    ///
    /// # Arguments
    /// * `digest` - The 32-byte digest that was signed.
    /// * `signature` - The signature to verify.
    ///
    /// # Returns
    /// `true` if the signature is valid for this key.
    pub fn verify(&self, digest: &[u8; 32], signature: &Signature) -> bool {
        signature.verify(digest, self)
    }

    /// Wrap a k256 `VerifyingKey`.
    pub(crate) fn from_k256_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey { inner: *vk }
    }

    /// Access the underlying k256 `VerifyingKey`.
    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

/// Display the public key as compressed hex.
impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_roundtrip() {
        let key = PublicKey::from_hex(
            "025476c2e83188368da1ff3e292e7acafcdb3566bb0ad253f62fc70f07aeee6357",
        )
        .unwrap();

        let compressed = key.to_compressed();
        assert_eq!(compressed.len(), 33);
        assert!(compressed[0] == 0x02 || compressed[0] == 0x03);

        let parsed = PublicKey::from_bytes(&compressed).unwrap();
        assert_eq!(parsed.to_hex(), key.to_hex());
    }

    #[test]
    fn test_uncompressed_roundtrip() {
        let key = PublicKey::from_hex(
            "025476c2e83188368da1ff3e292e7acafcdb3566bb0ad253f62fc70f07aeee6357",
        )
        .unwrap();

        let uncompressed = key.to_uncompressed();
        assert_eq!(uncompressed.len(), 65);
        assert_eq!(uncompressed[0], 0x04);

        let parsed = PublicKey::from_bytes(&uncompressed).unwrap();
        assert_eq!(parsed.to_compressed(), key.to_compressed());
    }

    #[test]
    fn test_invalid_key_rejected() {
        // Empty input.
        assert!(PublicKey::from_bytes(&[]).is_err());

        // Valid prefix but x-coordinate not on the curve.
        let mut bad = [0u8; 33];
        bad[0] = 0x02;
        assert!(PublicKey::from_bytes(&bad).is_err());
    }

    #[test]
    fn test_hash160_of_known_key() {
        // The BIP143 test vector's P2WPKH program commits to this key's Hash160.
        let key = PublicKey::from_hex(
            "025476c2e83188368da1ff3e292e7acafcdb3566bb0ad253f62fc70f07aeee6357",
        )
        .unwrap();
        assert_eq!(
            hex::encode(key.hash160()),
            "1d0f172a0ecb48aee1be1f2687d2963ae33f71a1"
        );
    }
}
