//! AES block cipher: provider instance plus the library-style entry point.
//!
//! The provider path hands out a [`BlockCipher`] trait object resolved by
//! identifier; the library path ([`AesKey`]) expands a key schedule and
//! transforms single blocks with no instance object. The two paths are kept
//! separate because callers reach AES both ways, and each must be certified
//! on its own.

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block};

use crate::error::{ProviderError, Result};
use crate::traits::{BlockCipher, ExecutionClass};

/// AES block size in bytes.
pub const AES_BLOCK_SIZE: usize = 16;

// ============================================================================
// Library entry point
// ============================================================================

enum Schedule {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

/// An expanded AES key schedule, usable without a provider instance.
pub struct AesKey {
    schedule: Schedule,
}

impl AesKey {
    /// Expand `key` into a key schedule.
    ///
    /// # Errors
    /// Returns an error unless the key is 16, 24, or 32 bytes.
    pub fn expand(key: &[u8]) -> Result<Self> {
        let schedule = match key.len() {
            16 => Schedule::Aes128(Aes128::new_from_slice(key).map_err(|_| {
                ProviderError::InvalidKeyLength { expected: 16, got: key.len() }
            })?),
            24 => Schedule::Aes192(Aes192::new_from_slice(key).map_err(|_| {
                ProviderError::InvalidKeyLength { expected: 24, got: key.len() }
            })?),
            32 => Schedule::Aes256(Aes256::new_from_slice(key).map_err(|_| {
                ProviderError::InvalidKeyLength { expected: 32, got: key.len() }
            })?),
            other => {
                return Err(ProviderError::InvalidKeyLength { expected: 16, got: other });
            }
        };
        Ok(AesKey { schedule })
    }

    /// Encrypt one block in place.
    pub fn encrypt_block(&self, block: &mut [u8; AES_BLOCK_SIZE]) {
        let block = Block::from_mut_slice(block);
        match &self.schedule {
            Schedule::Aes128(c) => c.encrypt_block(block),
            Schedule::Aes192(c) => c.encrypt_block(block),
            Schedule::Aes256(c) => c.encrypt_block(block),
        }
    }

    /// Decrypt one block in place.
    pub fn decrypt_block(&self, block: &mut [u8; AES_BLOCK_SIZE]) {
        let block = Block::from_mut_slice(block);
        match &self.schedule {
            Schedule::Aes128(c) => c.decrypt_block(block),
            Schedule::Aes192(c) => c.decrypt_block(block),
            Schedule::Aes256(c) => c.decrypt_block(block),
        }
    }
}

// ============================================================================
// Provider instance
// ============================================================================

/// AES behind the [`BlockCipher`] capability interface.
pub struct AesBlockCipher {
    key_len: usize,
    key: Option<AesKey>,
}

impl AesBlockCipher {
    /// Create an unkeyed instance expecting a `key_len`-byte key.
    #[must_use]
    pub fn new(key_len: usize) -> Self {
        AesBlockCipher { key_len, key: None }
    }

    fn checked_block<'a>(&self, block: &'a mut [u8]) -> Result<&'a mut [u8; AES_BLOCK_SIZE]> {
        <&mut [u8; AES_BLOCK_SIZE]>::try_from(block)
            .map_err(|_| ProviderError::InvalidBuffer("block must be exactly one cipher block"))
    }
}

impl BlockCipher for AesBlockCipher {
    fn execution_class(&self) -> ExecutionClass {
        ExecutionClass::InProcess
    }

    fn block_size(&self) -> usize {
        AES_BLOCK_SIZE
    }

    fn set_key(&mut self, key: &[u8]) -> Result<()> {
        if key.len() != self.key_len {
            return Err(ProviderError::InvalidKeyLength { expected: self.key_len, got: key.len() });
        }
        self.key = Some(AesKey::expand(key)?);
        Ok(())
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        let block = self.checked_block(block)?;
        self.key.as_ref().ok_or(ProviderError::KeyNotSet)?.encrypt_block(block);
        Ok(())
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        let block = self.checked_block(block)?;
        self.key.as_ref().ok_or(ProviderError::KeyNotSet)?.decrypt_block(block);
        Ok(())
    }
}
