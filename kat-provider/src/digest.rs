//! Hash and MAC primitives: SHA-1, SHA-256, SHA-512, HMAC-SHA-256.
//!
//! [`sha256`] is the raw library entry point, callable without a provider
//! instance. It is certified separately from the dispatched `sha-256`
//! digest because nothing guarantees the two resolve to the same
//! implementation.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Digest as _, Sha256, Sha512};
use zeroize::Zeroizing;

use crate::error::{ProviderError, Result};
use crate::traits::{Digest, ExecutionClass};

/// SHA-256 digest size in bytes.
pub const SHA256_DIGEST_SIZE: usize = 32;

/// Compute SHA-256 of `message` through the library entry point.
#[must_use]
pub fn sha256(message: &[u8]) -> [u8; SHA256_DIGEST_SIZE] {
    Sha256::digest(message).into()
}

/// Which hash an unkeyed [`ShaDigest`] instance computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaAlgorithm {
    /// SHA-1 (legacy, still part of the approved set).
    Sha1,
    /// SHA-256.
    Sha256,
    /// SHA-512.
    Sha512,
}

/// An unkeyed SHA hash behind the [`Digest`] capability interface.
pub struct ShaDigest {
    algorithm: ShaAlgorithm,
}

impl ShaDigest {
    /// Create an instance computing `algorithm`.
    #[must_use]
    pub fn new(algorithm: ShaAlgorithm) -> Self {
        ShaDigest { algorithm }
    }
}

impl Digest for ShaDigest {
    fn execution_class(&self) -> ExecutionClass {
        ExecutionClass::InProcess
    }

    fn digest_size(&self) -> usize {
        match self.algorithm {
            ShaAlgorithm::Sha1 => 20,
            ShaAlgorithm::Sha256 => 32,
            ShaAlgorithm::Sha512 => 64,
        }
    }

    fn set_key(&mut self, _key: &[u8]) -> Result<()> {
        Err(ProviderError::KeyNotAccepted)
    }

    fn digest(&self, message: &[u8], out: &mut [u8]) -> Result<()> {
        if out.len() != self.digest_size() {
            return Err(ProviderError::InvalidBuffer("output must be exactly one digest"));
        }
        match self.algorithm {
            ShaAlgorithm::Sha1 => out.copy_from_slice(Sha1::digest(message).as_slice()),
            ShaAlgorithm::Sha256 => out.copy_from_slice(Sha256::digest(message).as_slice()),
            ShaAlgorithm::Sha512 => out.copy_from_slice(Sha512::digest(message).as_slice()),
        }
        Ok(())
    }
}

/// HMAC-SHA-256 behind the [`Digest`] capability interface.
pub struct HmacSha256 {
    key: Option<Zeroizing<Vec<u8>>>,
}

impl HmacSha256 {
    /// Create an unkeyed instance.
    #[must_use]
    pub fn new() -> Self {
        HmacSha256 { key: None }
    }
}

impl Default for HmacSha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Digest for HmacSha256 {
    fn execution_class(&self) -> ExecutionClass {
        ExecutionClass::InProcess
    }

    fn digest_size(&self) -> usize {
        SHA256_DIGEST_SIZE
    }

    fn set_key(&mut self, key: &[u8]) -> Result<()> {
        self.key = Some(Zeroizing::new(key.to_vec()));
        Ok(())
    }

    fn digest(&self, message: &[u8], out: &mut [u8]) -> Result<()> {
        if out.len() != self.digest_size() {
            return Err(ProviderError::InvalidBuffer("output must be exactly one digest"));
        }
        let key = self.key.as_ref().ok_or(ProviderError::KeyNotSet)?;
        let mut mac = Hmac::<Sha256>::new_from_slice(key)
            .map_err(|_| ProviderError::Backend("HMAC key rejected"))?;
        mac.update(message);
        out.copy_from_slice(mac.finalize().into_bytes().as_slice());
        Ok(())
    }
}
