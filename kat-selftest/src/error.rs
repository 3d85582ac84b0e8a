//! Failure taxonomy of the self-test engine.
//!
//! Every variant is fatal to the algorithm under test; nothing is retried
//! or downgraded. The orchestrator stops at the first error it sees.

use kat_provider::ProviderError;

/// Why a single algorithm's self-test failed.
#[derive(Debug, thiserror::Error)]
pub enum SelfTestError {
    /// The provider refused an allocation, configuration, or operation.
    #[error("{algorithm}: failed to {step}: {source}")]
    Provider {
        /// Algorithm under test.
        algorithm: String,
        /// The step that failed ("allocate", "set key", "encrypt", ...).
        step: &'static str,
        /// The provider's own error detail.
        #[source]
        source: ProviderError,
    },

    /// The instance reported a structural property that contradicts the
    /// test vector (block size, IV size, digest size, output length).
    #[error("{algorithm}: wrong {property}: expected {expected}, got {actual}")]
    Structural {
        /// Algorithm under test.
        algorithm: String,
        /// The property that mismatched.
        property: &'static str,
        /// Value the vector declares.
        expected: usize,
        /// Value the instance reported.
        actual: usize,
    },

    /// The computed result differs from the known answer.
    #[error("wrong result from {algorithm} {operation}")]
    Mismatch {
        /// Algorithm under test.
        algorithm: String,
        /// The operation whose output mismatched.
        operation: &'static str,
    },

    /// The provider handed out an offloaded implementation, which is
    /// outside the certification boundary. A configuration defect, but
    /// engine-halting all the same.
    #[error("{algorithm}: unexpectedly got an offloaded implementation")]
    OffloadedImplementation {
        /// Algorithm under test.
        algorithm: String,
    },

    /// The registry carries a vector that fails its own declared-size
    /// invariants. A programming-time defect caught defensively.
    #[error("{algorithm}: malformed test vector: {detail}")]
    BadVector {
        /// Algorithm under test.
        algorithm: String,
        /// What was wrong with the vector.
        detail: String,
    },
}

impl SelfTestError {
    pub(crate) fn provider(algorithm: &str, step: &'static str, source: ProviderError) -> Self {
        SelfTestError::Provider { algorithm: algorithm.to_owned(), step, source }
    }

    pub(crate) fn structural(
        algorithm: &str,
        property: &'static str,
        expected: usize,
        actual: usize,
    ) -> Self {
        SelfTestError::Structural { algorithm: algorithm.to_owned(), property, expected, actual }
    }

    pub(crate) fn bad_vector(algorithm: &str, detail: impl Into<String>) -> Self {
        SelfTestError::BadVector { algorithm: algorithm.to_owned(), detail: detail.into() }
    }
}

/// Result type alias for self-test outcomes.
pub type Result<T> = std::result::Result<T, SelfTestError>;
