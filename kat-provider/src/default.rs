//! The default in-process provider.
//!
//! Resolves algorithm identifiers to the software implementations in this
//! crate. Identifiers follow the `<cipher>-<keybits>[-<mode>]` convention
//! used across the module, e.g. `aes-128-cbc` or `hmac-drbg-sha-256-pr`.

use crate::aead::AesGcm;
use crate::block::AesBlockCipher;
use crate::cipher::{AesCipher, AesMode};
use crate::digest::{HmacSha256, ShaAlgorithm, ShaDigest};
use crate::drbg::HmacDrbg;
use crate::error::{ProviderError, Result};
use crate::traits::{AeadCipher, BlockCipher, Cipher, CryptoProvider, Digest, Drbg};

/// The provider backing `run_all_self_tests`.
///
/// Stateless; every allocation returns a fresh unkeyed instance.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultProvider;

fn unknown(algorithm: &str) -> ProviderError {
    ProviderError::UnsupportedAlgorithm(algorithm.to_owned())
}

impl CryptoProvider for DefaultProvider {
    fn block_cipher(&self, algorithm: &str) -> Result<Box<dyn BlockCipher>> {
        let key_len = match algorithm {
            "aes-128" => 16,
            "aes-192" => 24,
            "aes-256" => 32,
            _ => return Err(unknown(algorithm)),
        };
        Ok(Box::new(AesBlockCipher::new(key_len)))
    }

    fn cipher(&self, algorithm: &str) -> Result<Box<dyn Cipher>> {
        let (mode, key_len) = match algorithm {
            "aes-128-cbc" => (AesMode::Cbc, 16),
            "aes-256-cbc" => (AesMode::Cbc, 32),
            "aes-128-ctr" => (AesMode::Ctr, 16),
            "aes-256-ctr" => (AesMode::Ctr, 32),
            "aes-128-ecb" => (AesMode::Ecb, 16),
            "aes-256-ecb" => (AesMode::Ecb, 32),
            // XTS keys carry both halves.
            "aes-128-xts" => (AesMode::Xts, 32),
            "aes-256-xts" => (AesMode::Xts, 64),
            _ => return Err(unknown(algorithm)),
        };
        Ok(Box::new(AesCipher::new(mode, key_len)))
    }

    fn aead(&self, algorithm: &str) -> Result<Box<dyn AeadCipher>> {
        let key_len = match algorithm {
            "aes-128-gcm" => 16,
            "aes-256-gcm" => 32,
            _ => return Err(unknown(algorithm)),
        };
        Ok(Box::new(AesGcm::new(key_len)))
    }

    fn digest(&self, algorithm: &str) -> Result<Box<dyn Digest>> {
        Ok(match algorithm {
            "sha-1" => Box::new(ShaDigest::new(ShaAlgorithm::Sha1)),
            "sha-256" => Box::new(ShaDigest::new(ShaAlgorithm::Sha256)),
            "sha-512" => Box::new(ShaDigest::new(ShaAlgorithm::Sha512)),
            "hmac-sha-256" => Box::new(HmacSha256::new()),
            _ => return Err(unknown(algorithm)),
        })
    }

    fn drbg(&self, algorithm: &str) -> Result<Box<dyn Drbg>> {
        let prediction_resistant = match algorithm {
            "hmac-drbg-sha-256" => false,
            "hmac-drbg-sha-256-pr" => true,
            _ => return Err(unknown(algorithm)),
        };
        Ok(Box::new(HmacDrbg::new(prediction_resistant)))
    }
}
