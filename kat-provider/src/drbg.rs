//! HMAC-DRBG (SHA-256) per NIST SP 800-90A §10.1.2.
//!
//! Supports the test-mode seeding interface the self-test engine needs:
//! the caller supplies the entropy-input ‖ nonce block directly instead of
//! drawing from a live entropy source. Prediction-resistant instances
//! reseed from caller-supplied fresh entropy on every generate call.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::error::{ProviderError, Result};
use crate::traits::{Drbg, ExecutionClass};

const OUT_LEN: usize = 32;
// Security strength (entropy input) plus the nonce, per SP 800-90A table 2.
const MIN_SEED_LEN: usize = 48;
const MIN_RESEED_LEN: usize = 32;
const RESEED_INTERVAL: u64 = 1 << 48;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-DRBG with SHA-256 behind the [`Drbg`] capability interface.
pub struct HmacDrbg {
    key: [u8; OUT_LEN],
    value: [u8; OUT_LEN],
    reseed_counter: u64,
    seeded: bool,
    prediction_resistant: bool,
}

impl HmacDrbg {
    /// Create an uninstantiated DRBG. `prediction_resistant` instances
    /// demand fresh entropy on every generate call.
    #[must_use]
    pub fn new(prediction_resistant: bool) -> Self {
        HmacDrbg {
            key: [0u8; OUT_LEN],
            value: [0u8; OUT_LEN],
            reseed_counter: 0,
            seeded: false,
            prediction_resistant,
        }
    }

    fn mac(key: &[u8], parts: &[&[u8]]) -> [u8; OUT_LEN] {
        let mut mac =
            HmacSha256::new_from_slice(key).expect("HMAC-SHA-256 accepts any key length");
        for part in parts {
            mac.update(part);
        }
        mac.finalize().into_bytes().into()
    }

    /// SP 800-90A §10.1.2.2. With empty `provided_data` only the first
    /// round runs.
    fn update(&mut self, provided_data: &[u8]) {
        self.key = Self::mac(&self.key, &[&self.value, &[0x00], provided_data]);
        self.value = Self::mac(&self.key, &[&self.value]);
        if !provided_data.is_empty() {
            self.key = Self::mac(&self.key, &[&self.value, &[0x01], provided_data]);
            self.value = Self::mac(&self.key, &[&self.value]);
        }
    }

    fn reseed(&mut self, entropy: &[u8], additional: &[u8]) -> Result<()> {
        if entropy.len() < MIN_RESEED_LEN {
            return Err(ProviderError::InsufficientEntropy {
                need: MIN_RESEED_LEN,
                got: entropy.len(),
            });
        }
        let mut seed_material = Vec::with_capacity(entropy.len() + additional.len());
        seed_material.extend_from_slice(entropy);
        seed_material.extend_from_slice(additional);
        self.update(&seed_material);
        seed_material.zeroize();
        self.reseed_counter = 1;
        Ok(())
    }
}

impl Drop for HmacDrbg {
    fn drop(&mut self) {
        self.key.zeroize();
        self.value.zeroize();
    }
}

impl Drbg for HmacDrbg {
    fn execution_class(&self) -> ExecutionClass {
        ExecutionClass::InProcess
    }

    fn reseed_for_test(&mut self, entropy: &[u8], personalization: &[u8]) -> Result<()> {
        if !self.seeded {
            // Fresh instantiate: the entropy block must cover entropy input
            // and nonce.
            if entropy.len() < MIN_SEED_LEN {
                return Err(ProviderError::InsufficientEntropy {
                    need: MIN_SEED_LEN,
                    got: entropy.len(),
                });
            }
            self.key = [0x00; OUT_LEN];
            self.value = [0x01; OUT_LEN];
        }
        self.reseed(entropy, personalization)?;
        self.seeded = true;
        Ok(())
    }

    fn generate(&mut self, out: &mut [u8], additional: &[u8], fresh_entropy: Option<&[u8]>)
        -> Result<()> {
        if !self.seeded {
            return Err(ProviderError::NotSeeded);
        }
        if self.reseed_counter > RESEED_INTERVAL {
            return Err(ProviderError::NotSeeded);
        }
        if self.prediction_resistant && fresh_entropy.is_none() {
            return Err(ProviderError::EntropyRequired);
        }

        // §9.3.1: with prediction resistance the additional input is
        // consumed by the reseed and not used again below.
        let additional = match fresh_entropy {
            Some(entropy) => {
                self.reseed(entropy, additional)?;
                &[][..]
            }
            None => additional,
        };

        if !additional.is_empty() {
            self.update(additional);
        }
        let mut filled = 0;
        while filled < out.len() {
            self.value = Self::mac(&self.key, &[&self.value]);
            let take = usize::min(OUT_LEN, out.len() - filled);
            out[filled..filled + take].copy_from_slice(&self.value[..take]);
            filled += take;
        }
        // §10.1.2.5 step 6 runs unconditionally; with no additional input
        // it is the single-round update.
        self.update(additional);
        self.reseed_counter += 1;
        Ok(())
    }
}
