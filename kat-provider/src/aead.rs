//! AES-GCM behind the [`AeadCipher`] capability interface.

use aes_gcm::aead::AeadInPlace;
use aes_gcm::{Aes128Gcm, Aes256Gcm, KeyInit, Nonce, Tag};
use zeroize::Zeroizing;

use crate::error::{ProviderError, Result};
use crate::traits::{AeadCipher, ExecutionClass};

/// GCM nonce length in bytes.
pub const GCM_IV_SIZE: usize = 12;
/// The only tag length this provider certifies.
pub const GCM_TAG_SIZE: usize = 16;

/// AES-GCM behind the [`AeadCipher`] capability interface.
///
/// Operates on a combined buffer laid out as
/// associated data ‖ message ‖ tag space, the shape the self-test drivers
/// build.
pub struct AesGcm {
    key_len: usize,
    key: Option<Zeroizing<Vec<u8>>>,
    tag_size: Option<usize>,
}

impl AesGcm {
    /// Create an unkeyed instance expecting a `key_len`-byte key.
    #[must_use]
    pub fn new(key_len: usize) -> Self {
        AesGcm { key_len, key: None, tag_size: None }
    }

    fn configured(&self) -> Result<&[u8]> {
        if self.tag_size.is_none() {
            return Err(ProviderError::UnsupportedTagSize(0));
        }
        self.key.as_ref().map(|k| k.as_slice()).ok_or(ProviderError::KeyNotSet)
    }

    fn check_iv(iv: &[u8]) -> Result<()> {
        if iv.len() != GCM_IV_SIZE {
            return Err(ProviderError::InvalidIvLength { expected: GCM_IV_SIZE, got: iv.len() });
        }
        Ok(())
    }

    fn seal(key: &[u8], iv: &[u8], assoc: &[u8], msg: &mut [u8]) -> Result<Tag> {
        let nonce = Nonce::from_slice(iv);
        let tag = match key.len() {
            16 => Aes128Gcm::new_from_slice(key)
                .map_err(|_| ProviderError::Backend("GCM key rejected"))?
                .encrypt_in_place_detached(nonce, assoc, msg),
            32 => Aes256Gcm::new_from_slice(key)
                .map_err(|_| ProviderError::Backend("GCM key rejected"))?
                .encrypt_in_place_detached(nonce, assoc, msg),
            other => {
                return Err(ProviderError::InvalidKeyLength { expected: 16, got: other });
            }
        };
        tag.map_err(|_| ProviderError::Backend("GCM encryption rejected the input"))
    }

    fn open(key: &[u8], iv: &[u8], assoc: &[u8], msg: &mut [u8], tag: &Tag) -> Result<()> {
        let nonce = Nonce::from_slice(iv);
        let opened = match key.len() {
            16 => Aes128Gcm::new_from_slice(key)
                .map_err(|_| ProviderError::Backend("GCM key rejected"))?
                .decrypt_in_place_detached(nonce, assoc, msg, tag),
            32 => Aes256Gcm::new_from_slice(key)
                .map_err(|_| ProviderError::Backend("GCM key rejected"))?
                .decrypt_in_place_detached(nonce, assoc, msg, tag),
            other => {
                return Err(ProviderError::InvalidKeyLength { expected: 16, got: other });
            }
        };
        opened.map_err(|_| ProviderError::Backend("GCM tag verification failed"))
    }
}

impl AeadCipher for AesGcm {
    fn execution_class(&self) -> ExecutionClass {
        ExecutionClass::InProcess
    }

    fn iv_size(&self) -> usize {
        GCM_IV_SIZE
    }

    fn set_key(&mut self, key: &[u8]) -> Result<()> {
        if key.len() != self.key_len {
            return Err(ProviderError::InvalidKeyLength { expected: self.key_len, got: key.len() });
        }
        self.key = Some(Zeroizing::new(key.to_vec()));
        Ok(())
    }

    fn set_tag_size(&mut self, tag_size: usize) -> Result<()> {
        if tag_size != GCM_TAG_SIZE {
            return Err(ProviderError::UnsupportedTagSize(tag_size));
        }
        self.tag_size = Some(tag_size);
        Ok(())
    }

    fn encrypt(
        &self,
        data: &mut [u8],
        assoc_len: usize,
        plaintext_len: usize,
        iv: &[u8],
    ) -> Result<usize> {
        let key = self.configured()?;
        Self::check_iv(iv)?;
        if data.len() < assoc_len + plaintext_len + GCM_TAG_SIZE {
            return Err(ProviderError::InvalidBuffer("no room for ciphertext and tag"));
        }
        let (assoc, message) = data.split_at_mut(assoc_len);
        let tag = Self::seal(key, iv, assoc, &mut message[..plaintext_len])?;
        message[plaintext_len..plaintext_len + GCM_TAG_SIZE].copy_from_slice(tag.as_slice());
        Ok(plaintext_len + GCM_TAG_SIZE)
    }

    fn decrypt(
        &self,
        data: &mut [u8],
        assoc_len: usize,
        ciphertext_len: usize,
        iv: &[u8],
    ) -> Result<usize> {
        let key = self.configured()?;
        Self::check_iv(iv)?;
        if ciphertext_len < GCM_TAG_SIZE || data.len() < assoc_len + ciphertext_len {
            return Err(ProviderError::InvalidBuffer("ciphertext shorter than the tag"));
        }
        let plaintext_len = ciphertext_len - GCM_TAG_SIZE;
        let (assoc, message) = data.split_at_mut(assoc_len);
        let tag = Tag::clone_from_slice(&message[plaintext_len..ciphertext_len]);
        Self::open(key, iv, assoc, &mut message[..plaintext_len], &tag)?;
        Ok(plaintext_len)
    }
}
