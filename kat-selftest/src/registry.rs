//! The self-test registry: every approved algorithm bound to its driver
//! and known-answer vector, in the fixed order the orchestrator runs them.
//!
//! Vector provenance:
//! - AES single-block and mode vectors: NIST SP 800-38A appendix F, using
//!   its 128-bit key and the first two plaintext blocks as the shared
//!   32-byte message.
//! - AES-GCM: test case 4 of the GCM submission to NIST (the SP 800-38D
//!   reference vectors).
//! - AES-XTS: generated with OpenSSL, cross-checked against the IEEE 1619
//!   reference implementation.
//! - SHA-1/SHA-256/SHA-512 and HMAC-SHA-256: computed over the shared
//!   message with independent reference implementations.
//! - DRBG: NIST CAVP drbgtestvectors, HMAC SHA-256 with and without
//!   prediction resistance.

use kat_provider::CryptoProvider;

use crate::drivers;
use crate::error::Result;
use crate::vectors::{
    AeadVector, BlockCipherVector, CipherVector, DrbgVector, HashVector, KatVector,
};

/// A family test driver: runs one registry entry against a provider.
pub type DriverFn = fn(&SelfTest, &dyn CryptoProvider) -> Result<()>;

/// One registry entry: an algorithm identifier, the driver that knows its
/// family's protocol, and exactly one known-answer vector.
pub struct SelfTest {
    /// Provider identifier of the algorithm under test.
    pub algorithm: &'static str,
    /// Driver encoding the family's test protocol.
    pub driver: DriverFn,
    /// The known answer the driver verifies against.
    pub vector: KatVector,
}

// Shared across the AES mode vectors (SP 800-38A).
const AES_KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
const AES_IV: &str = "000102030405060708090a0b0c0d0e0f";
const MESSAGE: &str = "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51";

/// All power-up self-tests, in execution order.
///
/// Plain AES runs first and separately from the modes: the block-cipher
/// dispatch, the mode implementations, and the library entry point do not
/// necessarily share an AES implementation, so each gets its own test.
pub static SELF_TESTS: &[SelfTest] = &[
    SelfTest {
        algorithm: "aes-128",
        driver: drivers::aes,
        vector: KatVector::BlockCipher(BlockCipherVector {
            key: AES_KEY,
            plaintext: "6bc1bee22e409f96e93d7e117393172a",
            ciphertext: "3ad77bb40d7a3660a89ecaf32466ef97",
            block_size: 16,
        }),
    },
    SelfTest {
        algorithm: "aes-128-cbc",
        driver: drivers::cipher,
        vector: KatVector::Cipher(CipherVector {
            key: AES_KEY,
            iv: AES_IV,
            iv_size: 16,
            plaintext: MESSAGE,
            ciphertext: "7649abac8119b246cee98e9b12e9197d5086cb9b507219ee95db113a917678b2",
            message_size: 32,
        }),
    },
    SelfTest {
        algorithm: "aes-128-ctr",
        driver: drivers::cipher,
        vector: KatVector::Cipher(CipherVector {
            key: AES_KEY,
            iv: "f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff",
            iv_size: 16,
            plaintext: MESSAGE,
            ciphertext: "874d6191b620e3261bef6864990db6ce9806f66b7970fdff8617187bb9fffdff",
            message_size: 32,
        }),
    },
    SelfTest {
        algorithm: "aes-128-ecb",
        driver: drivers::cipher,
        vector: KatVector::Cipher(CipherVector {
            key: AES_KEY,
            iv: "",
            iv_size: 0,
            plaintext: MESSAGE,
            ciphertext: "3ad77bb40d7a3660a89ecaf32466ef97f5d3d58503b9699de785895a96fdbaaf",
            message_size: 32,
        }),
    },
    SelfTest {
        algorithm: "aes-128-gcm",
        driver: drivers::aead,
        vector: KatVector::Aead(AeadVector {
            key: "feffe9928665731c6d6a8f9467308308",
            iv: "cafebabefacedbaddecaf888",
            iv_size: 12,
            assoc: "feedfacedeadbeeffeedfacedeadbeefabaddad2",
            assoc_size: 20,
            plaintext: "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a72\
                        1c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b39",
            plaintext_size: 60,
            ciphertext: "42831ec2217774244b7221b784d0d49ce3aa212f2c02a4e035c17e2329aca12e\
                         21d514b25466931c7d8f6a5aac84aa051ba30b396a0aac973d58e091\
                         5bc94fbc3221a5db94fae95ae7121a47",
            ciphertext_size: 76,
        }),
    },
    SelfTest {
        algorithm: "aes-128-xts",
        driver: drivers::cipher,
        vector: KatVector::Cipher(CipherVector {
            key: "2b7e151628aed2a6abf7158809cf4f3c603deb1015ca71be2b73aef0857d7781",
            iv: "33333333330000000000000000000000",
            iv_size: 16,
            plaintext: MESSAGE,
            ciphertext: "f27a3b9920dd45acd6e77127c223471f74445721c6d4c3a779774eb5721e4cd6",
            message_size: 32,
        }),
    },
    SelfTest {
        algorithm: "sha-1",
        driver: drivers::hash,
        vector: KatVector::Hash(HashVector {
            key: None,
            message: MESSAGE,
            digest: "0613af950acadbb268fb9b7d1b58f3ec5ca57101",
            digest_size: 20,
        }),
    },
    // The sha256() library entry point is not necessarily covered by the
    // dispatched hmac-sha-256 test, so it is tested on its own.
    SelfTest {
        algorithm: "sha-256",
        driver: drivers::sha256_library,
        vector: KatVector::Hash(HashVector {
            key: None,
            message: MESSAGE,
            digest: "b9a9c636a2553ad6a826be94755dc55aa7013c9fb23abdc0b61499ce32dd6fd5",
            digest_size: 32,
        }),
    },
    SelfTest {
        algorithm: "hmac-sha-256",
        driver: drivers::hash,
        vector: KatVector::Hash(HashVector {
            key: Some("0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b"),
            message: MESSAGE,
            digest: "35e025c14b1ba3151ae6c2208b0ed0e96b26e86c529fd73d8e280a224680c681",
            digest_size: 32,
        }),
    },
    SelfTest {
        algorithm: "sha-512",
        driver: drivers::hash,
        vector: KatVector::Hash(HashVector {
            key: None,
            message: MESSAGE,
            digest: "b544baa6565f84e0141d1dc2377a5f65f7a7b5a3bd5954ce30f0c0e6348f9d8d\
                     1e784d505549a469dfa7fc3ec875f53fbaf63683f70c0fd54cb5521875b33c4e",
            digest_size: 64,
        }),
    },
    SelfTest {
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
    },
    SelfTest {
        algorithm: "hmac-drbg-sha-256-pr",
        driver: drivers::drbg,
        vector: KatVector::Drbg(DrbgVector {
            entropy: "c7ccbc677e21661e272b63dd3a78dcdf666d3f24aecf3701a90d898aa7dc8158\
                      aeb210157e18446d13eadf3785fe81fb",
            entropy_size: 48,
            pers: "bc55ab3cf652b0113d7b90b824c9264e5a1e770d3d584adad181e9f8eb308f6f",
            entpr_a: "7ba1915b3c04c41b1d192f1a1881603c6c6291b7e9f5cb96bb816accb5ae55b6",
            entpr_b: "992cc7787e3b8812efbed3d27d2aa586da8d58734a0ab22ebb4c7ee39ab681c1",
            entpr_size: 32,
            add_a: "18e817ffef39c7415c730303f63de85fc8abe4ab0fade8d686885528c169dd76",
            add_b: "ac07fcbe870ed3ea1f7eb8e79dece8e7bcf3182577354aaa00992add0a005082",
            add_size: 32,
            output: "956f95fc3bb7fe3ed04e1a146c347f7b1d0d635e489c69e64607d287f386523d\
                     98275ed754e775504ffb4dfdac2f4b77cf9e8ecc16a224cd53de3ec5555dd526\
                     3f89dfca8b4e1eb68878635ca263984e6f2559b15f2b23b04ba5185dc2157440\
                     594cb41ecf9a36fd43e203b8599130892ac85a43237c7372da3fad2bba006bd1",
            out_size: 128,
        }),
    },
];

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::vectors::decode_unsized;

    #[test]
    fn registry_order_is_fixed() {
        let order: Vec<&str> = SELF_TESTS.iter().map(|t| t.algorithm).collect();
        assert_eq!(
            order,
            [
                "aes-128",
                "aes-128-cbc",
                "aes-128-ctr",
                "aes-128-ecb",
                "aes-128-gcm",
                "aes-128-xts",
                "sha-1",
                "sha-256",
                "hmac-sha-256",
                "sha-512",
                "hmac-drbg-sha-256",
                "hmac-drbg-sha-256-pr",
            ]
        );
    }

    #[test]
    fn every_vector_satisfies_its_declared_sizes() {
        for test in SELF_TESTS {
            let alg = test.algorithm;
            let check = |name, hex_str, declared| {
                crate::vectors::decode_field(alg, name, hex_str, declared)
                    .unwrap_or_else(|e| panic!("{alg}: {e}"))
            };
            match &test.vector {
                KatVector::BlockCipher(v) => {
                    check("plaintext", v.plaintext, v.block_size);
                    check("ciphertext", v.ciphertext, v.block_size);
                    decode_unsized(alg, "key", v.key).unwrap();
                }
                KatVector::Cipher(v) => {
                    check("iv", v.iv, v.iv_size);
                    check("plaintext", v.plaintext, v.message_size);
                    check("ciphertext", v.ciphertext, v.message_size);
                }
                KatVector::Aead(v) => {
                    check("iv", v.iv, v.iv_size);
                    check("assoc", v.assoc, v.assoc_size);
                    check("plaintext", v.plaintext, v.plaintext_size);
                    check("ciphertext", v.ciphertext, v.ciphertext_size);
                    assert!(
                        v.ciphertext_size > v.plaintext_size,
                        "{alg}: AEAD ciphertext must extend plaintext by the tag"
                    );
                }
                KatVector::Hash(v) => {
                    check("digest", v.digest, v.digest_size);
                    if let Some(key) = v.key {
                        decode_unsized(alg, "key", key).unwrap();
                    }
                }
                KatVector::Drbg(v) => {
                    check("entropy", v.entropy, v.entropy_size);
                    check("entpr_a", v.entpr_a, v.entpr_size);
                    check("entpr_b", v.entpr_b, v.entpr_size);
                    check("add_a", v.add_a, v.add_size);
                    check("add_b", v.add_b, v.add_size);
                    check("output", v.output, v.out_size);
                }
            }
        }
    }

    #[test]
    fn aead_tag_length_is_sixteen() {
        let gcm = SELF_TESTS.iter().find(|t| t.algorithm == "aes-128-gcm").unwrap();
        let KatVector::Aead(v) = &gcm.vector else {
            panic!("aes-128-gcm must carry an AEAD vector");
        };
        assert_eq!(v.ciphertext_size - v.plaintext_size, 16);
    }
}
