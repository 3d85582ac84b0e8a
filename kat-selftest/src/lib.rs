#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Power-up known-answer self-tests for the KatGate cryptographic
//! provider.
//!
//! Every approved primitive family — block ciphers, length-preserving
//! ciphers, AEAD, hash/MAC, DRBG — is exercised once against a fixed
//! known-answer vector before the provider may be trusted. A single
//! mismatch, provider error, or structural surprise anywhere fails the
//! whole run; there is no partial success and nothing is retried.
//!
//! The engine reports a bare pass/fail. Deciding what to do on failure
//! (typically halting the host) is deliberately the caller's job:
//!
//! ```no_run
//! if !kat_selftest::run_all_self_tests() {
//!     // Fail closed: the provider must not be used.
//!     std::process::abort();
//! }
//! ```
//!
//! Details of the first failure are emitted through `tracing`.

pub mod compare;
pub mod drivers;
pub mod error;
pub mod registry;
pub mod validate;
pub mod vectors;

use kat_provider::{CryptoProvider, DefaultProvider};

#[cfg(feature = "fault-injection")]
pub use compare::set_broken_algorithm;
pub use error::{Result, SelfTestError};
pub use registry::{DriverFn, SelfTest, SELF_TESTS};

/// Run every registered self-test against the default provider.
///
/// Returns `true` only if all tests pass. Stops at the first failure:
/// once one primitive is known untrustworthy there is nothing further
/// worth certifying.
#[must_use]
pub fn run_all_self_tests() -> bool {
    run_tests(SELF_TESTS, &DefaultProvider)
}

/// Run `tests` in declared order against `provider`, stopping at the
/// first failure.
///
/// Exposed separately so harnesses can run instrumented providers or
/// reduced registries; production callers want [`run_all_self_tests`].
#[must_use]
pub fn run_tests(tests: &[SelfTest], provider: &dyn CryptoProvider) -> bool {
    tracing::info!(count = tests.len(), "running cryptographic self-tests");
    for test in tests {
        if let Err(error) = (test.driver)(test, provider) {
            tracing::error!(algorithm = test.algorithm, %error, "self-test failed");
            return false;
        }
        tracing::debug!(algorithm = test.algorithm, "self-test passed");
    }
    tracing::info!("all self-tests passed");
    true
}
