//! Length-preserving AES modes: CBC, CTR, ECB, and XTS.
//!
//! Each instance stores only the raw key; the underlying mode object is
//! rebuilt from key + IV on every call, so no chaining state survives
//! between calls and the same instance can encrypt and decrypt in any
//! order.

use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit, StreamCipher};
use aes::{Aes128, Aes256};
use xts_mode::Xts128;
use zeroize::Zeroizing;

use crate::error::{ProviderError, Result};
use crate::traits::{Cipher, ExecutionClass};

use crate::block::AES_BLOCK_SIZE;

type CbcEnc128 = cbc::Encryptor<Aes128>;
type CbcDec128 = cbc::Decryptor<Aes128>;
type CbcEnc256 = cbc::Encryptor<Aes256>;
type CbcDec256 = cbc::Decryptor<Aes256>;
type Ctr128 = ctr::Ctr128BE<Aes128>;
type Ctr256 = ctr::Ctr128BE<Aes256>;
type EcbEnc128 = ecb::Encryptor<Aes128>;
type EcbDec128 = ecb::Decryptor<Aes128>;
type EcbEnc256 = ecb::Encryptor<Aes256>;
type EcbDec256 = ecb::Decryptor<Aes256>;

/// Which length-preserving mode an [`AesCipher`] instance runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AesMode {
    /// Cipher block chaining.
    Cbc,
    /// Big-endian 128-bit counter mode.
    Ctr,
    /// Electronic codebook (no IV).
    Ecb,
    /// XEX with ciphertext stealing; the IV is the 16-byte tweak and the
    /// key holds both key halves.
    Xts,
}

/// AES in a length-preserving mode behind the [`Cipher`] capability
/// interface.
pub struct AesCipher {
    mode: AesMode,
    key_len: usize,
    key: Option<Zeroizing<Vec<u8>>>,
}

impl AesCipher {
    /// Create an unkeyed instance for `mode` expecting a `key_len`-byte key.
    #[must_use]
    pub fn new(mode: AesMode, key_len: usize) -> Self {
        AesCipher { mode, key_len, key: None }
    }

    fn key(&self) -> Result<&[u8]> {
        self.key.as_deref().map(Vec::as_slice).ok_or(ProviderError::KeyNotSet)
    }

    fn check_iv(&self, iv: &[u8]) -> Result<()> {
        if iv.len() != self.iv_size() {
            return Err(ProviderError::InvalidIvLength { expected: self.iv_size(), got: iv.len() });
        }
        Ok(())
    }

    fn check_blocks(&self, data: &[u8]) -> Result<()> {
        let whole_blocks = data.len() % AES_BLOCK_SIZE == 0 && !data.is_empty();
        match self.mode {
            AesMode::Cbc | AesMode::Ecb if !whole_blocks => {
                Err(ProviderError::InvalidBuffer("data must be a whole number of blocks"))
            }
            // XTS handles ragged tails by ciphertext stealing but still
            // needs at least one full block.
            AesMode::Xts if data.len() < AES_BLOCK_SIZE => {
                Err(ProviderError::InvalidBuffer("XTS needs at least one block of data"))
            }
            _ => Ok(()),
        }
    }

    fn xts_tweak(iv: &[u8]) -> [u8; AES_BLOCK_SIZE] {
        let mut tweak = [0u8; AES_BLOCK_SIZE];
        tweak.copy_from_slice(iv);
        tweak
    }

    fn run(&self, data: &mut [u8], iv: &[u8], decrypt: bool) -> Result<()> {
        let key = self.key()?;
        self.check_iv(iv)?;
        self.check_blocks(data)?;
        let len = data.len();
        let bad_key = || ProviderError::InvalidKeyLength { expected: self.key_len, got: key.len() };

        match (self.mode, key.len(), decrypt) {
            (AesMode::Cbc, 16, false) => {
                let enc = CbcEnc128::new_from_slices(key, iv).map_err(|_| bad_key())?;
                enc.encrypt_padded_mut::<NoPadding>(data, len).map_err(|_| ProviderError::Backend("buffer not aligned to the cipher block size"))?;
            }
            (AesMode::Cbc, 16, true) => {
                let dec = CbcDec128::new_from_slices(key, iv).map_err(|_| bad_key())?;
                dec.decrypt_padded_mut::<NoPadding>(data).map_err(|_| ProviderError::Backend("buffer not aligned to the cipher block size"))?;
            }
            (AesMode::Cbc, 32, false) => {
                let enc = CbcEnc256::new_from_slices(key, iv).map_err(|_| bad_key())?;
                enc.encrypt_padded_mut::<NoPadding>(data, len).map_err(|_| ProviderError::Backend("buffer not aligned to the cipher block size"))?;
            }
            (AesMode::Cbc, 32, true) => {
                let dec = CbcDec256::new_from_slices(key, iv).map_err(|_| bad_key())?;
                dec.decrypt_padded_mut::<NoPadding>(data).map_err(|_| ProviderError::Backend("buffer not aligned to the cipher block size"))?;
            }
            // CTR encryption and decryption are the same keystream XOR.
            (AesMode::Ctr, 16, _) => {
                let mut ctr = Ctr128::new_from_slices(key, iv).map_err(|_| bad_key())?;
                ctr.apply_keystream(data);
            }
            (AesMode::Ctr, 32, _) => {
                let mut ctr = Ctr256::new_from_slices(key, iv).map_err(|_| bad_key())?;
                ctr.apply_keystream(data);
            }
            (AesMode::Ecb, 16, false) => {
                let enc = EcbEnc128::new_from_slice(key).map_err(|_| bad_key())?;
                enc.encrypt_padded_mut::<NoPadding>(data, len).map_err(|_| ProviderError::Backend("buffer not aligned to the cipher block size"))?;
            }
            (AesMode::Ecb, 16, true) => {
                let dec = EcbDec128::new_from_slice(key).map_err(|_| bad_key())?;
                dec.decrypt_padded_mut::<NoPadding>(data).map_err(|_| ProviderError::Backend("buffer not aligned to the cipher block size"))?;
            }
            (AesMode::Ecb, 32, false) => {
                let enc = EcbEnc256::new_from_slice(key).map_err(|_| bad_key())?;
                enc.encrypt_padded_mut::<NoPadding>(data, len).map_err(|_| ProviderError::Backend("buffer not aligned to the cipher block size"))?;
            }
            (AesMode::Ecb, 32, true) => {
                let dec = EcbDec256::new_from_slice(key).map_err(|_| bad_key())?;
                dec.decrypt_padded_mut::<NoPadding>(data).map_err(|_| ProviderError::Backend("buffer not aligned to the cipher block size"))?;
            }
            (AesMode::Xts, 32, dec) => {
                let c1 = Aes128::new_from_slice(&key[..16]).map_err(|_| bad_key())?;
                let c2 = Aes128::new_from_slice(&key[16..]).map_err(|_| bad_key())?;
                let xts = Xts128::new(c1, c2);
                if dec {
                    xts.decrypt_sector(data, Self::xts_tweak(iv));
                } else {
                    xts.encrypt_sector(data, Self::xts_tweak(iv));
                }
            }
            (AesMode::Xts, 64, dec) => {
                let c1 = Aes256::new_from_slice(&key[..32]).map_err(|_| bad_key())?;
                let c2 = Aes256::new_from_slice(&key[32..]).map_err(|_| bad_key())?;
                let xts = Xts128::new(c1, c2);
                if dec {
                    xts.decrypt_sector(data, Self::xts_tweak(iv));
                } else {
                    xts.encrypt_sector(data, Self::xts_tweak(iv));
                }
            }
            _ => return Err(bad_key()),
        }
        Ok(())
    }
}

impl Cipher for AesCipher {
    fn execution_class(&self) -> ExecutionClass {
        ExecutionClass::InProcess
    }

    fn iv_size(&self) -> usize {
        match self.mode {
            AesMode::Ecb => 0,
            AesMode::Cbc | AesMode::Ctr | AesMode::Xts => AES_BLOCK_SIZE,
        }
    }

    fn set_key(&mut self, key: &[u8]) -> Result<()> {
        if key.len() != self.key_len {
            return Err(ProviderError::InvalidKeyLength { expected: self.key_len, got: key.len() });
        }
        self.key = Some(Zeroizing::new(key.to_vec()));
        Ok(())
    }

    fn encrypt(&self, data: &mut [u8], iv: &[u8]) -> Result<()> {
        self.run(data, iv, false)
    }

    fn decrypt(&self, data: &mut [u8], iv: &[u8]) -> Result<()> {
        self.run(data, iv, true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
    const IV: &str = "000102030405060708090a0b0c0d0e0f";
    const MSG: &str = "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51";

    fn keyed(mode: AesMode, key_len: usize, key: &[u8]) -> AesCipher {
        let mut tfm = AesCipher::new(mode, key_len);
        tfm.set_key(key).unwrap();
        tfm
    }

    #[test]
    fn cbc_matches_sp800_38a() {
        let tfm = keyed(AesMode::Cbc, 16, &hex::decode(KEY).unwrap());
        let iv = hex::decode(IV).unwrap();
        let mut buf = hex::decode(MSG).unwrap();
        tfm.encrypt(&mut buf, &iv).unwrap();
        assert_eq!(
            hex::encode(&buf),
            "7649abac8119b246cee98e9b12e9197d5086cb9b507219ee95db113a917678b2"
        );
        tfm.decrypt(&mut buf, &iv).unwrap();
        assert_eq!(hex::encode(&buf), MSG);
    }

    #[test]
    fn ctr_matches_sp800_38a() {
        let tfm = keyed(AesMode::Ctr, 16, &hex::decode(KEY).unwrap());
        let iv = hex::decode("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff").unwrap();
        let mut buf = hex::decode(MSG).unwrap();
        tfm.encrypt(&mut buf, &iv).unwrap();
        assert_eq!(
            hex::encode(&buf),
            "874d6191b620e3261bef6864990db6ce9806f66b7970fdff8617187bb9fffdff"
        );
        tfm.decrypt(&mut buf, &iv).unwrap();
        assert_eq!(hex::encode(&buf), MSG);
    }

    #[test]
    fn ecb_takes_no_iv() {
        let tfm = keyed(AesMode::Ecb, 16, &hex::decode(KEY).unwrap());
        assert_eq!(tfm.iv_size(), 0);
        let mut buf = hex::decode(MSG).unwrap();
        tfm.encrypt(&mut buf, &[]).unwrap();
        assert_eq!(
            hex::encode(&buf),
            "3ad77bb40d7a3660a89ecaf32466ef97f5d3d58503b9699de785895a96fdbaaf"
        );
        tfm.decrypt(&mut buf, &[]).unwrap();
        assert_eq!(hex::encode(&buf), MSG);
    }

    #[test]
    fn xts_round_trips() {
        let key = hex::decode(format!("{KEY}603deb1015ca71be2b73aef0857d7781")).unwrap();
        let tfm = keyed(AesMode::Xts, 32, &key);
        let iv = hex::decode("33333333330000000000000000000000").unwrap();
        let mut buf = hex::decode(MSG).unwrap();
        tfm.encrypt(&mut buf, &iv).unwrap();
        assert_ne!(hex::encode(&buf), MSG);
        tfm.decrypt(&mut buf, &iv).unwrap();
        assert_eq!(hex::encode(&buf), MSG);
    }

    #[test]
    fn cbc_rejects_ragged_length() {
        let tfm = keyed(AesMode::Cbc, 16, &hex::decode(KEY).unwrap());
        let iv = hex::decode(IV).unwrap();
        let mut buf = vec![0u8; 17];
        assert!(matches!(tfm.encrypt(&mut buf, &iv), Err(ProviderError::InvalidBuffer(_))));
    }

    #[test]
    fn wrong_iv_length_is_rejected() {
        let tfm = keyed(AesMode::Cbc, 16, &hex::decode(KEY).unwrap());
        let mut buf = vec![0u8; 16];
        let err = tfm.encrypt(&mut buf, &[0u8; 8]).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidIvLength { expected: 16, got: 8 }));
    }

    proptest! {
        #[test]
        fn cbc_round_trip_is_identity(
            key in proptest::array::uniform32(any::<u8>()),
            iv in proptest::array::uniform16(any::<u8>()),
            blocks in proptest::collection::vec(any::<u8>(), 16..=64),
        ) {
            let mut data = blocks;
            data.truncate(data.len() - data.len() % 16);
            let original = data.clone();
            let tfm = keyed(AesMode::Cbc, 32, &key);
            tfm.encrypt(&mut data, &iv).unwrap();
            tfm.decrypt(&mut data, &iv).unwrap();
            prop_assert_eq!(data, original);
        }

        #[test]
        fn ctr_round_trip_is_identity(
            key in proptest::array::uniform16(any::<u8>()),
            iv in proptest::array::uniform16(any::<u8>()),
            mut data in proptest::collection::vec(any::<u8>(), 1..=96),
        ) {
            let original = data.clone();
            let tfm = keyed(AesMode::Ctr, 16, &key);
            tfm.encrypt(&mut data, &iv).unwrap();
            tfm.decrypt(&mut data, &iv).unwrap();
            prop_assert_eq!(data, original);
        }
    }
}
