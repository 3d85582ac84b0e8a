//! Fault-injection behavior: naming an algorithm corrupts its result and
//! fails the run; naming anything else leaves the run untouched.
//!
//! The hook is process-global, so the scenarios run inside one test
//! function to keep them ordered.

use katgate::run_all_self_tests;
use kat_selftest::set_broken_algorithm;

#[test]
fn fault_injection_is_observable_and_scoped() {
    // Baseline: nothing broken.
    assert!(run_all_self_tests());

    // Breaking a registered algorithm must fail the whole gate.
    set_broken_algorithm(Some("aes-128-cbc"));
    assert!(!run_all_self_tests(), "a broken algorithm must fail the run");

    // Breaking an algorithm that is not in the registry affects nothing.
    set_broken_algorithm(Some("no-such-algorithm"));
    assert!(run_all_self_tests(), "injection must only hit the named algorithm");

    // Every registered algorithm's failure path is reachable.
    for test in kat_selftest::SELF_TESTS {
        set_broken_algorithm(Some(test.algorithm));
        assert!(!run_all_self_tests(), "{} should fail while broken", test.algorithm);
    }

    // Clearing the hook restores the passing state.
    set_broken_algorithm(None);
    assert!(run_all_self_tests());
}
