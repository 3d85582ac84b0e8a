//! Engine-level tests against the default provider: every registered
//! algorithm passes, and passes again on a second run with no hidden
//! state carried between runs.

use kat_provider::DefaultProvider;
use kat_selftest::{run_all_self_tests, run_tests, SELF_TESTS};

#[test]
fn all_self_tests_pass() {
    assert!(run_all_self_tests(), "power-up self-tests should pass");
}

#[test]
fn self_tests_are_deterministic_across_runs() {
    assert!(run_all_self_tests());
    assert!(run_all_self_tests(), "second run should pass identically");
}

#[test]
fn every_driver_passes_twice_in_isolation() {
    let provider = DefaultProvider;
    for test in SELF_TESTS {
        for attempt in 1..=2 {
            let outcome = (test.driver)(test, &provider);
            assert!(
                outcome.is_ok(),
                "{} failed on attempt {attempt}: {:?}",
                test.algorithm,
                outcome.err()
            );
        }
    }
}

#[test]
fn reduced_registry_runs() {
    // A single-entry registry is a valid registry.
    let first = &SELF_TESTS[..1];
    assert!(run_tests(first, &DefaultProvider));
}

#[test]
fn empty_registry_is_vacuously_true() {
    assert!(run_tests(&[], &DefaultProvider));
}
