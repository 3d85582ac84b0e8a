#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! KatGate — fail-closed power-up self-tests for a cryptographic
//! provider.
//!
//! Before a provider is trusted, every FIPS-approved primitive it offers
//! must reproduce a known answer: block ciphers and their modes, AEAD,
//! hashes and MACs, and DRBGs. KatGate runs those known-answer tests in a
//! fixed order and reports a single verdict.
//!
//! ```no_run
//! if !katgate::run_all_self_tests() {
//!     // The provider is untrustworthy; the caller decides how to halt.
//!     std::process::abort();
//! }
//! ```
//!
//! The engine itself never halts the process and exposes no state beyond
//! the boolean verdict; diagnostics for the first failure are emitted
//! through `tracing`.

pub use kat_provider::{
    AeadCipher, BlockCipher, Cipher, CryptoProvider, DefaultProvider, Digest, Drbg,
    ExecutionClass, ProviderError,
};
pub use kat_selftest::{run_all_self_tests, run_tests, SelfTest, SelfTestError, SELF_TESTS};

/// Crate version, for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    #[test]
    fn version_is_populated() {
        assert!(!super::VERSION.is_empty());
    }
}
