use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes256;
use rand_core::{CryptoRng, RngCore};

#[cfg(feature = "default-rng")]
use rand_core::OsRng;

// The entropy side of the KEM. Operational use draws from the OS; the seeded
// path is the AES-256-CTR DRBG of the NIST KAT generator (no derivation
// function, no prediction resistance, no additional input), byte-compatible
// with the reference `.rsp` files.

/// AES-256-CTR deterministic random bit generator, KAT-generator profile.
pub(crate) struct AesCtrDrbg {
    key: [u8; 32],
    v: [u8; 16],
}

impl AesCtrDrbg {
    pub(crate) fn new(entropy: &[u8; 48]) -> Self {
        let mut drbg = Self { key: [0u8; 32], v: [0u8; 16] };
        drbg.update(Some(entropy));
        drbg
    }

    pub(crate) fn reseed(&mut self, entropy: &[u8; 48]) {
        self.update(Some(entropy));
    }

    // V is a big-endian 128-bit counter
    fn increment_counter(&mut self) {
        for byte in self.v.iter_mut().rev() {
            *byte = byte.wrapping_add(1);
            if *byte != 0 {
                break;
            }
        }
    }

    // CTR_DRBG Update: encrypt three successive counter blocks under the
    // current key, fold in the provided data, and split into new key and V.
    fn update(&mut self, provided: Option<&[u8; 48]>) {
        let cipher = Aes256::new(GenericArray::from_slice(&self.key));
        let mut temp = [0u8; 48];
        for chunk in temp.chunks_mut(16) {
            self.increment_counter();
            let mut block = GenericArray::clone_from_slice(&self.v);
            cipher.encrypt_block(&mut block);
            chunk.copy_from_slice(&block);
        }
        if let Some(data) = provided {
            for (t, d) in temp.iter_mut().zip(data.iter()) {
                *t ^= d;
            }
        }
        self.key.copy_from_slice(&temp[..32]);
        self.v.copy_from_slice(&temp[32..]);
    }

    /// One generate call: a counter block per 16 output bytes, then Update.
    pub(crate) fn random_bytes(&mut self, out: &mut [u8]) {
        let cipher = Aes256::new(GenericArray::from_slice(&self.key));
        for chunk in out.chunks_mut(16) {
            self.increment_counter();
            let mut block = GenericArray::clone_from_slice(&self.v);
            cipher.encrypt_block(&mut block);
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
        self.update(None);
    }
}

impl RngCore for AesCtrDrbg {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.random_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, out: &mut [u8]) {
        self.random_bytes(out);
    }

    fn try_fill_bytes(&mut self, out: &mut [u8]) -> Result<(), rand_core::Error> {
        self.random_bytes(out);
        Ok(())
    }
}

impl CryptoRng for AesCtrDrbg {}


/// What a KEM instance draws from: the OS by default, the seeded DRBG after
/// `set_drbg_seed`.
pub(crate) enum EntropySource {
    #[cfg(feature = "default-rng")]
    System(OsRng),
    Seeded(AesCtrDrbg),
}

impl EntropySource {
    #[cfg(feature = "default-rng")]
    pub(crate) fn system() -> Self {
        Self::System(OsRng)
    }

    pub(crate) fn seeded(seed: &[u8; 48]) -> Self {
        Self::Seeded(AesCtrDrbg::new(seed))
    }

    pub(crate) fn reseed(&mut self, seed: &[u8; 48]) -> Result<(), &'static str> {
        match self {
            #[cfg(feature = "default-rng")]
            Self::System(_) => Err("drbg: reseed requested before set_drbg_seed"),
            Self::Seeded(drbg) => {
                drbg.reseed(seed);
                Ok(())
            }
        }
    }
}

impl RngCore for EntropySource {
    fn next_u32(&mut self) -> u32 {
        match self {
            #[cfg(feature = "default-rng")]
            Self::System(rng) => rng.next_u32(),
            Self::Seeded(drbg) => drbg.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            #[cfg(feature = "default-rng")]
            Self::System(rng) => rng.next_u64(),
            Self::Seeded(drbg) => drbg.next_u64(),
        }
    }

    fn fill_bytes(&mut self, out: &mut [u8]) {
        match self {
            #[cfg(feature = "default-rng")]
            Self::System(rng) => rng.fill_bytes(out),
            Self::Seeded(drbg) => drbg.fill_bytes(out),
        }
    }

    fn try_fill_bytes(&mut self, out: &mut [u8]) -> Result<(), rand_core::Error> {
        match self {
            #[cfg(feature = "default-rng")]
            Self::System(rng) => rng.try_fill_bytes(out),
            Self::Seeded(drbg) => drbg.try_fill_bytes(out),
        }
    }
}

impl CryptoRng for EntropySource {}
