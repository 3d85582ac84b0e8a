//! The result comparator: the single place where a computed result is
//! judged against a known answer.
//!
//! Centralizing the comparison keeps diagnostics uniform and gives the
//! fault-injection hook one well-defined interception point.

use subtle::ConstantTimeEq;

use crate::error::{Result, SelfTestError};

#[cfg(feature = "fault-injection")]
static BROKEN_ALGORITHM: std::sync::Mutex<Option<String>> = std::sync::Mutex::new(None);

/// Name one algorithm whose next results should be corrupted before
/// comparison, or `None` to stop injecting. Test-harness support only:
/// set it before a run, never during one.
#[cfg(feature = "fault-injection")]
pub fn set_broken_algorithm(algorithm: Option<&str>) {
    let mut broken =
        BROKEN_ALGORITHM.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    *broken = algorithm.map(str::to_owned);
}

#[cfg(feature = "fault-injection")]
fn inject_fault(algorithm: &str, actual: &mut [u8]) {
    let broken = BROKEN_ALGORITHM.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    if broken.as_deref() == Some(algorithm) {
        if let Some(byte) = actual.first_mut() {
            *byte ^= 0xff;
        }
    }
}

/// Compare `actual` against `expected` for `algorithm`'s `operation`.
///
/// # Errors
/// Returns [`SelfTestError::Mismatch`] carrying the operation label and
/// algorithm identifier if the buffers differ.
pub fn check_result(
    algorithm: &str,
    operation: &'static str,
    actual: &mut [u8],
    expected: &[u8],
) -> Result<()> {
    #[cfg(feature = "fault-injection")]
    inject_fault(algorithm, actual);

    if actual.len() != expected.len() {
        return Err(SelfTestError::structural(
            algorithm,
            "result length",
            expected.len(),
            actual.len(),
        ));
    }
    if bool::from(actual.ct_eq(expected)) {
        Ok(())
    } else {
        Err(SelfTestError::Mismatch { algorithm: algorithm.to_owned(), operation })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn equal_buffers_pass() {
        let mut actual = [0xde, 0xad, 0xbe, 0xef];
        assert!(check_result("alg", "encryption", &mut actual, &[0xde, 0xad, 0xbe, 0xef]).is_ok());
    }

    #[test]
    fn differing_buffers_fail_with_context() {
        let mut actual = [0xde, 0xad, 0xbe, 0xef];
        let err = check_result("aes-128", "decryption", &mut actual, &[0; 4]).unwrap_err();
        match err {
            SelfTestError::Mismatch { algorithm, operation } => {
                assert_eq!(algorithm, "aes-128");
                assert_eq!(operation, "decryption");
            }
            other => panic!("expected Mismatch, got {other:?}"),
        }
    }

    #[test]
    fn length_mismatch_is_structural() {
        let mut actual = [0u8; 3];
        let err = check_result("alg", "digest", &mut actual, &[0u8; 4]).unwrap_err();
        assert!(matches!(err, SelfTestError::Structural { property: "result length", .. }));
    }

    proptest! {
        #[test]
        fn comparison_agrees_with_slice_equality(
            actual in proptest::collection::vec(any::<u8>(), 0..64),
            expected in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let mut buf = actual.clone();
            let outcome = check_result("alg", "op", &mut buf, &expected);
            prop_assert_eq!(outcome.is_ok(), actual == expected);
        }
    }
}
