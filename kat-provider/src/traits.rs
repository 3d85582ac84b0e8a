//! Capability interface expected from a cryptographic provider.
//!
//! The self-test engine talks to primitives exclusively through these
//! object-safe traits. Instances are allocated by identifier through
//! [`CryptoProvider`] and released by dropping them, so a driver that
//! returns early on failure still releases everything it acquired.

use crate::error::Result;

/// How an implementation executes, as reported by its metadata.
///
/// Offloaded (hardware-accelerated / asynchronous) implementations fall
/// outside the certification boundary of the in-process module; the
/// self-test engine refuses to certify them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionClass {
    /// Synchronous, in-process software implementation.
    InProcess,
    /// Asynchronous or hardware-offloaded implementation.
    Offloaded,
}

/// A fixed-size block cipher instance (single-block transforms only).
pub trait BlockCipher {
    /// Execution-class metadata for the Implementation Validator.
    fn execution_class(&self) -> ExecutionClass;

    /// Cipher block size in bytes.
    fn block_size(&self) -> usize;

    /// Configure the key. Must be called before any transform.
    ///
    /// # Errors
    /// Returns an error if the key length is invalid for the instance.
    fn set_key(&mut self, key: &[u8]) -> Result<()>;

    /// Encrypt exactly one block in place.
    ///
    /// # Errors
    /// Returns an error if no key is set or `block` is not one block long.
    fn encrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Decrypt exactly one block in place.
    ///
    /// # Errors
    /// Returns an error if no key is set or `block` is not one block long.
    fn decrypt_block(&self, block: &mut [u8]) -> Result<()>;
}

/// A length-preserving cipher instance (CBC/CTR/ECB/XTS and friends).
///
/// The IV is supplied with every call; implementations must not carry
/// chaining state across calls.
pub trait Cipher {
    /// Execution-class metadata for the Implementation Validator.
    fn execution_class(&self) -> ExecutionClass;

    /// Required IV length in bytes (zero for ECB).
    fn iv_size(&self) -> usize;

    /// Configure the key. Must be called before any transform.
    ///
    /// # Errors
    /// Returns an error if the key length is invalid for the instance.
    fn set_key(&mut self, key: &[u8]) -> Result<()>;

    /// Encrypt `data` in place using `iv`.
    ///
    /// # Errors
    /// Returns an error if no key is set, the IV length is wrong, or the
    /// data length is invalid for the mode.
    fn encrypt(&self, data: &mut [u8], iv: &[u8]) -> Result<()>;

    /// Decrypt `data` in place using `iv`.
    ///
    /// # Errors
    /// Returns an error if no key is set, the IV length is wrong, or the
    /// data length is invalid for the mode.
    fn decrypt(&self, data: &mut [u8], iv: &[u8]) -> Result<()>;
}

/// An AEAD cipher instance operating on a combined
/// associated-data ‖ message ‖ tag buffer.
pub trait AeadCipher {
    /// Execution-class metadata for the Implementation Validator.
    fn execution_class(&self) -> ExecutionClass;

    /// Required nonce length in bytes.
    fn iv_size(&self) -> usize;

    /// Configure the key. Must be called before any transform.
    ///
    /// # Errors
    /// Returns an error if the key length is invalid for the instance.
    fn set_key(&mut self, key: &[u8]) -> Result<()>;

    /// Configure the authentication tag size. Must be called before any
    /// transform.
    ///
    /// # Errors
    /// Returns an error if the tag size is not supported.
    fn set_tag_size(&mut self, tag_size: usize) -> Result<()>;

    /// Encrypt in place. `data` starts with `assoc_len` bytes of associated
    /// data followed by `plaintext_len` bytes of plaintext and room for the
    /// tag. Returns the number of message bytes written (ciphertext + tag).
    ///
    /// # Errors
    /// Returns an error if the instance is not fully configured or the
    /// buffer is too small to hold ciphertext and tag.
    fn encrypt(&self, data: &mut [u8], assoc_len: usize, plaintext_len: usize, iv: &[u8])
        -> Result<usize>;

    /// Decrypt in place. `data` starts with `assoc_len` bytes of associated
    /// data followed by `ciphertext_len` bytes of ciphertext including the
    /// tag. Returns the number of plaintext bytes recovered.
    ///
    /// # Errors
    /// Returns an error if the instance is not fully configured, the buffer
    /// is malformed, or tag verification fails.
    fn decrypt(&self, data: &mut [u8], assoc_len: usize, ciphertext_len: usize, iv: &[u8])
        -> Result<usize>;
}

/// A hash or MAC instance.
pub trait Digest {
    /// Execution-class metadata for the Implementation Validator.
    fn execution_class(&self) -> ExecutionClass;

    /// Output size in bytes.
    fn digest_size(&self) -> usize;

    /// Configure a MAC key. Plain hashes reject this call.
    ///
    /// # Errors
    /// Returns an error if the instance takes no key.
    fn set_key(&mut self, key: &[u8]) -> Result<()>;

    /// Compute the digest of `message` into `out`.
    ///
    /// # Errors
    /// Returns an error if `out` is not exactly `digest_size` bytes or a
    /// required key is missing.
    fn digest(&self, message: &[u8], out: &mut [u8]) -> Result<()>;
}

/// A deterministic random bit generator instance.
pub trait Drbg {
    /// Execution-class metadata for the Implementation Validator.
    fn execution_class(&self) -> ExecutionClass;

    /// Seed or reseed the instance from caller-supplied entropy instead of
    /// the live entropy source. Only meaningful during self-testing; the
    /// `entropy` block covers entropy input and nonce combined.
    ///
    /// # Errors
    /// Returns an error if the seed material is shorter than the security
    /// strength requires.
    fn reseed_for_test(&mut self, entropy: &[u8], personalization: &[u8]) -> Result<()>;

    /// Fill `out` with generated bytes. `additional` is mixed into the
    /// state per SP 800-90A; `fresh_entropy`, when present, triggers a
    /// reseed before generation (prediction resistance).
    ///
    /// # Errors
    /// Returns an error if the instance is unseeded, or if it is
    /// prediction-resistant and `fresh_entropy` is absent.
    fn generate(&mut self, out: &mut [u8], additional: &[u8], fresh_entropy: Option<&[u8]>)
        -> Result<()>;
}

/// Allocate-by-identifier entry points of a cryptographic provider.
///
/// The provider hands out its default (highest-priority) implementation for
/// the identifier; the engine never enumerates alternates.
pub trait CryptoProvider {
    /// Allocate a block cipher instance.
    ///
    /// # Errors
    /// Returns an error if the identifier is unknown to this provider.
    fn block_cipher(&self, algorithm: &str) -> Result<Box<dyn BlockCipher>>;

    /// Allocate a length-preserving cipher instance.
    ///
    /// # Errors
    /// Returns an error if the identifier is unknown to this provider.
    fn cipher(&self, algorithm: &str) -> Result<Box<dyn Cipher>>;

    /// Allocate an AEAD instance.
    ///
    /// # Errors
    /// Returns an error if the identifier is unknown to this provider.
    fn aead(&self, algorithm: &str) -> Result<Box<dyn AeadCipher>>;

    /// Allocate a hash/MAC instance.
    ///
    /// # Errors
    /// Returns an error if the identifier is unknown to this provider.
    fn digest(&self, algorithm: &str) -> Result<Box<dyn Digest>>;

    /// Allocate a DRBG instance.
    ///
    /// # Errors
    /// Returns an error if the identifier is unknown to this provider.
    fn drbg(&self, algorithm: &str) -> Result<Box<dyn Drbg>>;
}
