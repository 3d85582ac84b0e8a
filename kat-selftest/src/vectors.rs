//! Known-answer test vector types.
//!
//! Vectors are stored as static hex strings with explicit declared sizes.
//! Decoding cross-checks every declared size against the decoded length,
//! so a table entry that drifts out of sync with its declaration fails the
//! self-test instead of silently testing the wrong thing.

use crate::error::{Result, SelfTestError};

/// Largest block size of any tested block cipher.
pub const MAX_BLOCK_SIZE: usize = 16;
/// Largest IV/nonce/tweak of any tested algorithm.
pub const MAX_IV_SIZE: usize = 16;
/// Largest digest of any tested hash or MAC.
pub const MAX_DIGEST_SIZE: usize = 64;

/// Test vector for a single-block cipher algorithm.
#[derive(Debug, Clone, Copy)]
pub struct BlockCipherVector {
    /// Cipher key, hex.
    pub key: &'static str,
    /// One block of plaintext, hex.
    pub plaintext: &'static str,
    /// The matching ciphertext block, hex.
    pub ciphertext: &'static str,
    /// Declared cipher block size in bytes.
    pub block_size: usize,
}

/// Test vector for a length-preserving cipher algorithm.
#[derive(Debug, Clone, Copy)]
pub struct CipherVector {
    /// Cipher key, hex.
    pub key: &'static str,
    /// IV / counter block / tweak, hex (empty for ECB).
    pub iv: &'static str,
    /// Declared IV size in bytes.
    pub iv_size: usize,
    /// Message plaintext, hex.
    pub plaintext: &'static str,
    /// The matching ciphertext, hex.
    pub ciphertext: &'static str,
    /// Declared message length in bytes.
    pub message_size: usize,
}

/// Test vector for an AEAD algorithm.
#[derive(Debug, Clone, Copy)]
pub struct AeadVector {
    /// Cipher key, hex.
    pub key: &'static str,
    /// Nonce, hex.
    pub iv: &'static str,
    /// Declared nonce size in bytes.
    pub iv_size: usize,
    /// Associated data, hex (may be empty).
    pub assoc: &'static str,
    /// Declared associated data length in bytes.
    pub assoc_size: usize,
    /// Message plaintext, hex.
    pub plaintext: &'static str,
    /// Declared plaintext length in bytes.
    pub plaintext_size: usize,
    /// Ciphertext followed by the authentication tag, hex.
    pub ciphertext: &'static str,
    /// Declared ciphertext-plus-tag length in bytes. Exceeds
    /// `plaintext_size` by exactly the tag length.
    pub ciphertext_size: usize,
}

/// Test vector for a hash or MAC algorithm.
#[derive(Debug, Clone, Copy)]
pub struct HashVector {
    /// MAC key, hex; `None` for unkeyed hashes.
    pub key: Option<&'static str>,
    /// Message, hex.
    pub message: &'static str,
    /// Expected digest, hex.
    pub digest: &'static str,
    /// Declared digest size in bytes.
    pub digest_size: usize,
}

/// Test vector for a DRBG algorithm, following the CAVP layout: one
/// instantiate, two generate calls, the second call's output recorded.
#[derive(Debug, Clone, Copy)]
pub struct DrbgVector {
    /// Entropy input ‖ nonce for instantiation, hex.
    pub entropy: &'static str,
    /// Declared instantiation entropy length in bytes.
    pub entropy_size: usize,
    /// Personalization string, hex (may be empty).
    pub pers: &'static str,
    /// Fresh entropy for the first generate call, hex (prediction-resistant
    /// variants only, else empty).
    pub entpr_a: &'static str,
    /// Fresh entropy for the second generate call, hex.
    pub entpr_b: &'static str,
    /// Declared per-call fresh entropy length in bytes (zero when not
    /// prediction resistant).
    pub entpr_size: usize,
    /// Additional input for the first generate call, hex.
    pub add_a: &'static str,
    /// Additional input for the second generate call, hex.
    pub add_b: &'static str,
    /// Declared additional input length in bytes.
    pub add_size: usize,
    /// Expected output of the second generate call, hex.
    pub output: &'static str,
    /// Declared output length in bytes.
    pub out_size: usize,
}

/// The family-tagged union of test vectors. The driver a registry entry
/// names must match the variant it carries; drivers check this defensively
/// rather than reinterpreting another family's data.
#[derive(Debug, Clone, Copy)]
pub enum KatVector {
    /// Single-block cipher vector.
    BlockCipher(BlockCipherVector),
    /// Length-preserving cipher vector.
    Cipher(CipherVector),
    /// AEAD vector.
    Aead(AeadVector),
    /// Hash/MAC vector.
    Hash(HashVector),
    /// DRBG vector.
    Drbg(DrbgVector),
}

/// Decode one hex field, checking the declared size.
pub(crate) fn decode_field(
    algorithm: &str,
    name: &'static str,
    hex_str: &str,
    declared: usize,
) -> Result<Vec<u8>> {
    let bytes = hex::decode(hex_str)
        .map_err(|e| SelfTestError::bad_vector(algorithm, format!("{name} is not hex: {e}")))?;
    if bytes.len() != declared {
        return Err(SelfTestError::bad_vector(
            algorithm,
            format!("{name} declares {declared} bytes but holds {}", bytes.len()),
        ));
    }
    Ok(bytes)
}

/// Decode one hex field whose length is implied by a sibling field.
pub(crate) fn decode_unsized(
    algorithm: &str,
    name: &'static str,
    hex_str: &str,
) -> Result<Vec<u8>> {
    hex::decode(hex_str)
        .map_err(|e| SelfTestError::bad_vector(algorithm, format!("{name} is not hex: {e}")))
}

impl KatVector {
    /// This vector as a block cipher vector, or a malformed-vector error.
    pub(crate) fn block_cipher(&self, algorithm: &str) -> Result<&BlockCipherVector> {
        match self {
            KatVector::BlockCipher(vector) => Ok(vector),
            _ => Err(SelfTestError::bad_vector(algorithm, "driver expects a block cipher vector")),
        }
    }

    /// This vector as a length-preserving cipher vector.
    pub(crate) fn cipher(&self, algorithm: &str) -> Result<&CipherVector> {
        match self {
            KatVector::Cipher(vector) => Ok(vector),
            _ => Err(SelfTestError::bad_vector(algorithm, "driver expects a cipher vector")),
        }
    }

    /// This vector as an AEAD vector.
    pub(crate) fn aead(&self, algorithm: &str) -> Result<&AeadVector> {
        match self {
            KatVector::Aead(vector) => Ok(vector),
            _ => Err(SelfTestError::bad_vector(algorithm, "driver expects an AEAD vector")),
        }
    }

    /// This vector as a hash/MAC vector.
    pub(crate) fn hash(&self, algorithm: &str) -> Result<&HashVector> {
        match self {
            KatVector::Hash(vector) => Ok(vector),
            _ => Err(SelfTestError::bad_vector(algorithm, "driver expects a hash vector")),
        }
    }

    /// This vector as a DRBG vector.
    pub(crate) fn drbg(&self, algorithm: &str) -> Result<&DrbgVector> {
        match self {
            KatVector::Drbg(vector) => Ok(vector),
            _ => Err(SelfTestError::bad_vector(algorithm, "driver expects a DRBG vector")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn decode_field_checks_declared_size() {
        assert_eq!(decode_field("alg", "key", "00112233", 4).unwrap(), vec![0, 0x11, 0x22, 0x33]);
        let err = decode_field("alg", "key", "00112233", 5).unwrap_err();
        assert!(matches!(err, SelfTestError::BadVector { .. }));
    }

    #[test]
    fn decode_field_rejects_non_hex() {
        let err = decode_field("alg", "iv", "zz", 1).unwrap_err();
        assert!(matches!(err, SelfTestError::BadVector { .. }));
    }

    #[test]
    fn family_accessors_reject_cross_family_reads() {
        let vector = KatVector::Hash(HashVector {
            key: None,
            message: "00",
            digest: "00",
            digest_size: 1,
        });
        assert!(vector.hash("alg").is_ok());
        assert!(vector.drbg("alg").is_err());
        assert!(vector.block_cipher("alg").is_err());
    }
}
