//! Family test drivers.
//!
//! One driver per algorithm shape, each following the same protocol:
//! acquire an instance for the identifier, validate its execution class,
//! verify the structural properties the vector declares, configure it,
//! run the forward and inverse operations, and hand every result to the
//! comparator. Instances and scratch buffers are dropped on every exit
//! path, so early failure returns release everything they acquired.

use kat_provider::CryptoProvider;

use crate::compare::check_result;
use crate::error::{Result, SelfTestError};
use crate::registry::SelfTest;
use crate::validate::check_execution_class;
use crate::vectors::{
    decode_field, decode_unsized, MAX_BLOCK_SIZE, MAX_DIGEST_SIZE, MAX_IV_SIZE,
};

/// Test a block cipher through the provider dispatch path.
///
/// # Errors
/// Fails on any provider error, structural mismatch, or wrong result.
pub fn block_cipher(test: &SelfTest, provider: &dyn CryptoProvider) -> Result<()> {
    let alg = test.algorithm;
    let vector = test.vector.block_cipher(alg)?;
    if vector.block_size > MAX_BLOCK_SIZE {
        return Err(SelfTestError::bad_vector(alg, "block size exceeds the engine maximum"));
    }
    let key = decode_unsized(alg, "key", vector.key)?;
    let plaintext = decode_field(alg, "plaintext", vector.plaintext, vector.block_size)?;
    let ciphertext = decode_field(alg, "ciphertext", vector.ciphertext, vector.block_size)?;

    let mut tfm = provider
        .block_cipher(alg)
        .map_err(|e| SelfTestError::provider(alg, "allocate", e))?;
    check_execution_class(alg, tfm.execution_class())?;
    if tfm.block_size() != vector.block_size {
        return Err(SelfTestError::structural(
            alg,
            "block size",
            vector.block_size,
            tfm.block_size(),
        ));
    }
    tfm.set_key(&key).map_err(|e| SelfTestError::provider(alg, "set key", e))?;

    // Encrypt the plaintext, then verify the resulting ciphertext.
    let mut block = plaintext.clone();
    tfm.encrypt_block(&mut block).map_err(|e| SelfTestError::provider(alg, "encrypt", e))?;
    check_result(alg, "encryption", &mut block, &ciphertext)?;

    // Decrypt the ciphertext, then verify the resulting plaintext.
    tfm.decrypt_block(&mut block).map_err(|e| SelfTestError::provider(alg, "decrypt", e))?;
    check_result(alg, "decryption", &mut block, &plaintext)?;
    Ok(())
}

/// Test plain AES through both the provider dispatch path and the
/// library-style expanded-key entry point.
///
/// The two paths need not share an implementation, so each is verified on
/// its own.
///
/// # Errors
/// Fails on any provider error, structural mismatch, or wrong result on
/// either path.
pub fn aes(test: &SelfTest, provider: &dyn CryptoProvider) -> Result<()> {
    let alg = test.algorithm;
    let vector = test.vector.block_cipher(alg)?;
    if vector.block_size != kat_provider::block::AES_BLOCK_SIZE {
        return Err(SelfTestError::bad_vector(alg, "AES vectors carry 16-byte blocks"));
    }

    block_cipher(test, provider)?;

    let key = decode_unsized(alg, "key", vector.key)?;
    let plaintext = decode_field(alg, "plaintext", vector.plaintext, vector.block_size)?;
    let ciphertext = decode_field(alg, "ciphertext", vector.ciphertext, vector.block_size)?;

    let schedule = kat_provider::block::AesKey::expand(&key)
        .map_err(|e| SelfTestError::provider(alg, "expand key", e))?;
    let mut block = [0u8; kat_provider::block::AES_BLOCK_SIZE];
    block.copy_from_slice(&plaintext);
    schedule.encrypt_block(&mut block);
    check_result(alg, "encryption (library)", &mut block, &ciphertext)?;
    schedule.decrypt_block(&mut block);
    check_result(alg, "decryption (library)", &mut block, &plaintext)?;
    Ok(())
}

/// Test a length-preserving cipher over a full message buffer.
///
/// The vector IV is handed to the instance separately for the encrypt and
/// decrypt calls, since stateful mode implementations consume it.
///
/// # Errors
/// Fails on any provider error, structural mismatch, or wrong result.
pub fn cipher(test: &SelfTest, provider: &dyn CryptoProvider) -> Result<()> {
    let alg = test.algorithm;
    let vector = test.vector.cipher(alg)?;
    if vector.iv_size > MAX_IV_SIZE {
        return Err(SelfTestError::bad_vector(alg, "IV size exceeds the engine maximum"));
    }
    let key = decode_unsized(alg, "key", vector.key)?;
    let iv = decode_field(alg, "iv", vector.iv, vector.iv_size)?;
    let plaintext = decode_field(alg, "plaintext", vector.plaintext, vector.message_size)?;
    let ciphertext = decode_field(alg, "ciphertext", vector.ciphertext, vector.message_size)?;

    let mut tfm =
        provider.cipher(alg).map_err(|e| SelfTestError::provider(alg, "allocate", e))?;
    check_execution_class(alg, tfm.execution_class())?;
    if tfm.iv_size() != vector.iv_size {
        return Err(SelfTestError::structural(alg, "IV size", vector.iv_size, tfm.iv_size()));
    }
    tfm.set_key(&key).map_err(|e| SelfTestError::provider(alg, "set key", e))?;

    let mut message = plaintext.clone();
    tfm.encrypt(&mut message, &iv).map_err(|e| SelfTestError::provider(alg, "encrypt", e))?;
    check_result(alg, "encryption", &mut message, &ciphertext)?;

    tfm.decrypt(&mut message, &iv).map_err(|e| SelfTestError::provider(alg, "decrypt", e))?;
    check_result(alg, "decryption", &mut message, &plaintext)?;
    Ok(())
}

/// Test an AEAD over a combined associated-data ‖ message ‖ tag buffer.
///
/// The tag length is derived from the vector as ciphertext length minus
/// plaintext length and configured on the instance before use.
///
/// # Errors
/// Fails on any provider error, structural mismatch, or wrong result.
pub fn aead(test: &SelfTest, provider: &dyn CryptoProvider) -> Result<()> {
    let alg = test.algorithm;
    let vector = test.vector.aead(alg)?;
    if vector.iv_size > MAX_IV_SIZE {
        return Err(SelfTestError::bad_vector(alg, "IV size exceeds the engine maximum"));
    }
    if vector.ciphertext_size <= vector.plaintext_size {
        return Err(SelfTestError::bad_vector(alg, "ciphertext must extend plaintext by the tag"));
    }
    let tag_size = vector.ciphertext_size - vector.plaintext_size;

    let key = decode_unsized(alg, "key", vector.key)?;
    let iv = decode_field(alg, "iv", vector.iv, vector.iv_size)?;
    let assoc = decode_field(alg, "assoc", vector.assoc, vector.assoc_size)?;
    let plaintext = decode_field(alg, "plaintext", vector.plaintext, vector.plaintext_size)?;
    let ciphertext = decode_field(alg, "ciphertext", vector.ciphertext, vector.ciphertext_size)?;

    let mut tfm = provider.aead(alg).map_err(|e| SelfTestError::provider(alg, "allocate", e))?;
    check_execution_class(alg, tfm.execution_class())?;
    if tfm.iv_size() != vector.iv_size {
        return Err(SelfTestError::structural(alg, "IV size", vector.iv_size, tfm.iv_size()));
    }
    tfm.set_key(&key).map_err(|e| SelfTestError::provider(alg, "set key", e))?;
    tfm.set_tag_size(tag_size).map_err(|e| SelfTestError::provider(alg, "set tag size", e))?;

    // Associated data, then the plaintext padded out with room for the tag.
    let mut buffer = Vec::with_capacity(vector.assoc_size + vector.ciphertext_size);
    buffer.extend_from_slice(&assoc);
    buffer.extend_from_slice(&plaintext);
    buffer.resize(vector.assoc_size + vector.ciphertext_size, 0);

    // Encrypt, then verify ciphertext ‖ tag in one comparison.
    let written = tfm
        .encrypt(&mut buffer, vector.assoc_size, vector.plaintext_size, &iv)
        .map_err(|e| SelfTestError::provider(alg, "encrypt", e))?;
    if written != vector.ciphertext_size {
        return Err(SelfTestError::structural(
            alg,
            "ciphertext length",
            vector.ciphertext_size,
            written,
        ));
    }
    check_result(alg, "encryption", &mut buffer[vector.assoc_size..], &ciphertext)?;

    // Decrypt the ciphertext ‖ tag, then verify the recovered plaintext.
    let recovered = tfm
        .decrypt(&mut buffer, vector.assoc_size, vector.ciphertext_size, &iv)
        .map_err(|e| SelfTestError::provider(alg, "decrypt", e))?;
    if recovered != vector.plaintext_size {
        return Err(SelfTestError::structural(
            alg,
            "plaintext length",
            vector.plaintext_size,
            recovered,
        ));
    }
    let plaintext_end = vector.assoc_size + vector.plaintext_size;
    check_result(alg, "decryption", &mut buffer[vector.assoc_size..plaintext_end], &plaintext)?;
    Ok(())
}

/// Test a hash or MAC through the provider dispatch path.
///
/// # Errors
/// Fails on any provider error, structural mismatch, or wrong result.
pub fn hash(test: &SelfTest, provider: &dyn CryptoProvider) -> Result<()> {
    let alg = test.algorithm;
    let vector = test.vector.hash(alg)?;
    if vector.digest_size > MAX_DIGEST_SIZE {
        return Err(SelfTestError::bad_vector(alg, "digest size exceeds the engine maximum"));
    }
    let message = decode_unsized(alg, "message", vector.message)?;
    let digest = decode_field(alg, "digest", vector.digest, vector.digest_size)?;

    let mut tfm =
        provider.digest(alg).map_err(|e| SelfTestError::provider(alg, "allocate", e))?;
    check_execution_class(alg, tfm.execution_class())?;
    if tfm.digest_size() != vector.digest_size {
        return Err(SelfTestError::structural(
            alg,
            "digest size",
            vector.digest_size,
            tfm.digest_size(),
        ));
    }
    if let Some(key) = vector.key {
        let key = decode_unsized(alg, "key", key)?;
        tfm.set_key(&key).map_err(|e| SelfTestError::provider(alg, "set key", e))?;
    }

    let mut out = vec![0u8; vector.digest_size];
    tfm.digest(&message, &mut out).map_err(|e| SelfTestError::provider(alg, "digest", e))?;
    check_result(alg, "digest", &mut out, &digest)?;
    Ok(())
}

/// Test SHA-256 through the raw library entry point, bypassing provider
/// dispatch. The dispatched `sha-256` may resolve elsewhere, so this path
/// is certified separately.
///
/// # Errors
/// Fails on a malformed vector or wrong result.
pub fn sha256_library(test: &SelfTest, _provider: &dyn CryptoProvider) -> Result<()> {
    let alg = test.algorithm;
    let vector = test.vector.hash(alg)?;
    if vector.digest_size != kat_provider::digest::SHA256_DIGEST_SIZE {
        return Err(SelfTestError::bad_vector(alg, "SHA-256 digests are 32 bytes"));
    }
    let message = decode_unsized(alg, "message", vector.message)?;
    let digest = decode_field(alg, "digest", vector.digest, vector.digest_size)?;

    let mut out = kat_provider::digest::sha256(&message);
    check_result(alg, "digest (library)", &mut out, &digest)?;
    Ok(())
}

/// Test a DRBG: instantiate from the vector's entropy, generate twice, and
/// verify the second call's output, matching the CAVP vector layout.
///
/// # Errors
/// Fails on any provider error or wrong final output; a failure at reseed
/// or either generate call is immediately fatal.
pub fn drbg(test: &SelfTest, provider: &dyn CryptoProvider) -> Result<()> {
    let alg = test.algorithm;
    let vector = test.vector.drbg(alg)?;
    let entropy = decode_field(alg, "entropy", vector.entropy, vector.entropy_size)?;
    let pers = decode_unsized(alg, "pers", vector.pers)?;
    let entpr_a = decode_field(alg, "entpr_a", vector.entpr_a, vector.entpr_size)?;
    let entpr_b = decode_field(alg, "entpr_b", vector.entpr_b, vector.entpr_size)?;
    let add_a = decode_field(alg, "add_a", vector.add_a, vector.add_size)?;
    let add_b = decode_field(alg, "add_b", vector.add_b, vector.add_size)?;
    let output = decode_field(alg, "output", vector.output, vector.out_size)?;

    let mut rng = provider.drbg(alg).map_err(|e| SelfTestError::provider(alg, "allocate", e))?;
    check_execution_class(alg, rng.execution_class())?;

    // Seed from the vector's entropy and personalization string.
    rng.reseed_for_test(&entropy, &pers)
        .map_err(|e| SelfTestError::provider(alg, "reseed", e))?;

    // Two generate calls; prediction-resistant variants consume fresh
    // entropy on each. Only the final output is recorded by the vector.
    let fresh_a = (vector.entpr_size > 0).then_some(entpr_a.as_slice());
    let fresh_b = (vector.entpr_size > 0).then_some(entpr_b.as_slice());
    let mut out = vec![0u8; vector.out_size];
    rng.generate(&mut out, &add_a, fresh_a)
        .map_err(|e| SelfTestError::provider(alg, "generate (first call)", e))?;
    rng.generate(&mut out, &add_b, fresh_b)
        .map_err(|e| SelfTestError::provider(alg, "generate (second call)", e))?;

    check_result(alg, "generation", &mut out, &output)?;
    Ok(())
}
