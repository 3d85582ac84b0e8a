//! End-to-end scenarios exercising the full stack: registry, drivers,
//! default provider, comparator, orchestrator.

use katgate::{run_all_self_tests, run_tests, CryptoProvider, DefaultProvider, SelfTest};
use kat_selftest::vectors::{BlockCipherVector, DrbgVector, KatVector};
use kat_selftest::{drivers, SELF_TESTS};

#[test]
fn the_full_gate_passes() {
    assert!(run_all_self_tests());
}

#[test]
fn single_aes_entry_registry_passes() {
    let registry = [SelfTest {
        algorithm: "aes-128",
        driver: drivers::aes,
        vector: KatVector::BlockCipher(BlockCipherVector {
            key: "2b7e151628aed2a6abf7158809cf4f3c",
            plaintext: "6bc1bee22e409f96e93d7e117393172a",
            ciphertext: "3ad77bb40d7a3660a89ecaf32466ef97",
            block_size: 16,
        }),
    }];
    assert!(run_tests(&registry, &DefaultProvider));
}

#[test]
fn corrupting_expected_ciphertext_fails_the_gate() {
    // Same vector with byte 0 of the expected ciphertext flipped.
    let registry = [SelfTest {
        algorithm: "aes-128",
        driver: drivers::aes,
        vector: KatVector::BlockCipher(BlockCipherVector {
            key: "2b7e151628aed2a6abf7158809cf4f3c",
            plaintext: "6bc1bee22e409f96e93d7e117393172a",
            ciphertext: "3bd77bb40d7a3660a89ecaf32466ef97",
            block_size: 16,
        }),
    }];
    assert!(!run_tests(&registry, &DefaultProvider));
}

#[test]
fn corrupted_entry_fails_with_mismatch_attributed_to_it() {
    let test = SelfTest {
        algorithm: "aes-128",
        driver: drivers::aes,
        vector: KatVector::BlockCipher(BlockCipherVector {
            key: "2b7e151628aed2a6abf7158809cf4f3c",
            plaintext: "6bc1bee22e409f96e93d7e117393172a",
            ciphertext: "3bd77bb40d7a3660a89ecaf32466ef97",
            block_size: 16,
        }),
    };
    let err = (test.driver)(&test, &DefaultProvider).unwrap_err();
    match err {
        kat_selftest::SelfTestError::Mismatch { algorithm, operation } => {
            assert_eq!(algorithm, "aes-128");
            assert_eq!(operation, "encryption");
        }
        other => panic!("expected a mismatch, got {other:?}"),
    }
}

#[test]
fn aes_cbc_round_trip_matches_the_vector_exactly() {
    // Drive the provider directly: a 32-byte message with a 16-byte key
    // and IV must round-trip to the vector's bytes, independent of the
    // comparator.
    let provider = DefaultProvider;
    let mut tfm = provider.cipher("aes-128-cbc").unwrap();
    tfm.set_key(&hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap()).unwrap();

    let iv = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
    let plaintext =
        hex::decode("6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51").unwrap();
    let mut buffer = plaintext.clone();
    tfm.encrypt(&mut buffer, &iv).unwrap();
    assert_eq!(
        hex::encode(&buffer),
        "7649abac8119b246cee98e9b12e9197d5086cb9b507219ee95db113a917678b2"
    );
    tfm.decrypt(&mut buffer, &iv).unwrap();
    assert_eq!(buffer, plaintext);
}

#[test]
fn aead_tag_arithmetic_holds_for_the_registry_vector() {
    let gcm = SELF_TESTS.iter().find(|t| t.algorithm == "aes-128-gcm").unwrap();
    let KatVector::Aead(v) = &gcm.vector else {
        panic!("aes-128-gcm must carry an AEAD vector");
    };
    assert_eq!(v.ciphertext_size - v.plaintext_size, 16);
    assert!((gcm.driver)(gcm, &DefaultProvider).is_ok());
}

#[test]
fn drbg_second_generate_call_reproduces_the_vector() {
    // 48-byte entropy, two 32-byte additional-data strings, 128-byte
    // output, no prediction resistance.
    let registry = [SelfTest {
        algorithm: "hmac-drbg-sha-256",
        driver: drivers::drbg,
        vector: KatVector::Drbg(DrbgVector {
            entropy: "f97a3cfd91faa046b9e61b9493d436c4931f604b22f1081521b3419151e8ff06\
                      11f3a7d43595357d58120bd1e2dd8aed",
            entropy_size: 48,
            pers: "",
            entpr_a: "",
            entpr_b: "",
            entpr_size: 0,
            add_a: "517289afe444a0fe5ed1a41dbbb5eb17150079bdd31e29cf2ff30034d8268e3b",
            add_b: "88028d29ef80b4e6f0fe12f91d7449fe75062682e89c571440c0c9b52c42a6e0",
            add_size: 32,
            output: "c6871cff0824fe55ea7689a52229886730450e5d362da5bf590dcf9acd67fed4\
                     cb32107df5d03969a66b1f6494fdf5d63d5b4d0d34ea7399a07d0116126d0d51\
                     8c7c55ba46e12f62efc8fe28a51c9d428e6d371d7397ab319fc73ded4722e5b4\
                     f30004032a6128df5e7497ecf82ca7b0a50e867ef6728a4f509a8c859087039c",
            out_size: 128,
        }),
    }];
    assert!(run_tests(&registry, &DefaultProvider));
}

#[test]
fn cipher_round_trips_hold_without_expected_ciphertext() {
    // decrypt(encrypt(p)) == p for every block/length-preserving entry,
    // checked against the provider directly rather than the comparator.
    let provider = DefaultProvider;
    for test in SELF_TESTS {
        match &test.vector {
            KatVector::Cipher(v) => {
                let mut tfm = provider.cipher(test.algorithm).unwrap();
                tfm.set_key(&hex::decode(v.key).unwrap()).unwrap();
                let iv = hex::decode(v.iv).unwrap();
                let plaintext = hex::decode(v.plaintext).unwrap();
                let mut buffer = plaintext.clone();
                tfm.encrypt(&mut buffer, &iv).unwrap();
                tfm.decrypt(&mut buffer, &iv).unwrap();
                assert_eq!(buffer, plaintext, "{} round trip", test.algorithm);
            }
            KatVector::BlockCipher(v) => {
                let mut tfm = provider.block_cipher(test.algorithm).unwrap();
                tfm.set_key(&hex::decode(v.key).unwrap()).unwrap();
                let plaintext = hex::decode(v.plaintext).unwrap();
                let mut block = plaintext.clone();
                tfm.encrypt_block(&mut block).unwrap();
                tfm.decrypt_block(&mut block).unwrap();
                assert_eq!(block, plaintext, "{} round trip", test.algorithm);
            }
            _ => {}
        }
    }
}
