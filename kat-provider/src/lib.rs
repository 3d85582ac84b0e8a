#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Capability interface and default provider for the KatGate self-test
//! engine.
//!
//! The self-test engine in `kat-selftest` talks to cryptographic
//! primitives only through the traits in [`traits`]; this crate also ships
//! [`DefaultProvider`], an in-process provider that adapts established
//! primitive crates (`aes`, `cbc`, `ctr`, `ecb`, `xts-mode`, `aes-gcm`,
//! `sha1`, `sha2`, `hmac`) to that interface, plus the two raw library
//! entry points ([`block::AesKey`] and [`digest::sha256`]) that are
//! certified independently of provider dispatch.
//!
//! Nothing here implements cryptography from scratch except the
//! SP 800-90A HMAC-DRBG construction in [`drbg`], which is a thin state
//! machine over the `hmac` crate.

pub mod aead;
pub mod block;
pub mod cipher;
pub mod digest;
pub mod drbg;
pub mod error;
pub mod traits;

mod default;

pub use default::DefaultProvider;
pub use error::{ProviderError, Result};
pub use traits::{AeadCipher, BlockCipher, Cipher, CryptoProvider, Digest, Drbg, ExecutionClass};
