//! The implementation validator.
//!
//! The certification boundary covers synchronous, in-process software
//! implementations only. An offloaded implementation reaching the engine
//! means the provider is misconfigured, and the self-test must fail closed
//! exactly as it would for a wrong answer.

use kat_provider::ExecutionClass;

use crate::error::{Result, SelfTestError};

/// Reject instances whose metadata places them outside the certification
/// boundary.
///
/// # Errors
/// Returns [`SelfTestError::OffloadedImplementation`] for anything but an
/// in-process implementation.
pub fn check_execution_class(algorithm: &str, class: ExecutionClass) -> Result<()> {
    match class {
        ExecutionClass::InProcess => Ok(()),
        ExecutionClass::Offloaded => {
            Err(SelfTestError::OffloadedImplementation { algorithm: algorithm.to_owned() })
        }
    }
}
