//! Error types for the provider crate.

/// Errors reported by provider instances and the allocate-by-identifier
/// entry points.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// No implementation is registered under the requested identifier.
    #[error("no implementation available for '{0}'")]
    UnsupportedAlgorithm(String),

    /// The supplied key length is not valid for this instance.
    #[error("invalid key length {got} (expected {expected})")]
    InvalidKeyLength {
        /// Length the instance requires, in bytes.
        expected: usize,
        /// Length the caller supplied, in bytes.
        got: usize,
    },

    /// The supplied IV/nonce/tweak length is not valid for this instance.
    #[error("invalid IV length {got} (expected {expected})")]
    InvalidIvLength {
        /// Length the instance requires, in bytes.
        expected: usize,
        /// Length the caller supplied, in bytes.
        got: usize,
    },

    /// The requested authentication tag size is not supported.
    #[error("unsupported authentication tag size {0}")]
    UnsupportedTagSize(usize),

    /// An operation was attempted before the key was configured.
    #[error("key has not been set")]
    KeyNotSet,

    /// The instance does not take a key (plain hash used as a MAC).
    #[error("instance does not accept a key")]
    KeyNotAccepted,

    /// A buffer has the wrong shape for the requested operation.
    #[error("invalid buffer: {0}")]
    InvalidBuffer(&'static str),

    /// A DRBG was asked to generate output before it was seeded.
    #[error("DRBG has not been seeded")]
    NotSeeded,

    /// Not enough seed material was supplied for the security strength.
    #[error("insufficient entropy: {got} bytes (need at least {need})")]
    InsufficientEntropy {
        /// Minimum seed material required, in bytes.
        need: usize,
        /// Amount the caller supplied, in bytes.
        got: usize,
    },

    /// A prediction-resistant DRBG was asked to generate without fresh
    /// entropy.
    #[error("prediction-resistant DRBG requires fresh entropy per generate call")]
    EntropyRequired,

    /// The underlying primitive engine rejected the operation.
    #[error("cipher operation failed: {0}")]
    Backend(&'static str),
}

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
