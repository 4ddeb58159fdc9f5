#![no_std]
#![deny(clippy::pedantic)]
#![deny(warnings)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]


// Implements the round-3 CRYSTALS-Kyber IND-CCA2 KEM.
// See <https://pq-crystals.org/kyber/data/kyber-specification-round3-20210804.pdf>
//
// Supports automatically clearing sensitive data on drop
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::traits::SerDes;

// Functionality map per the round-3 specification
//
// Algorithm 1 Parse (uniform rejection sampling)  --> sampling.rs
// Algorithm 2 CBD (centered binomial sampling)    --> sampling.rs
// Algorithm 3 Decode_l (and its inverse Encode_l) --> byte_fns.rs
// Algorithm 4 CPAPKE.KeyGen                       --> k_pke.rs
// Algorithm 5 CPAPKE.Enc                          --> k_pke.rs
// Algorithm 6 CPAPKE.Dec                          --> k_pke.rs
// Algorithm 7 CCAKEM.KeyGen                       --> kem.rs
// Algorithm 8 CCAKEM.Enc                          --> kem.rs
// Algorithm 9 CCAKEM.Dec (implicit rejection)     --> kem.rs
// NTT, NTT^-1 and basecase multiplication (1.1)   --> ntt.rs
// XOF/H/G/PRF/KDF wiring, Compress/Decompress     --> helpers.rs
// Vector and matrix layer over R_q                --> module.rs
// AES-256-CTR DRBG (KAT entropy source)           --> drbg.rs
//
// The three parameter sets are modules in this file with injected macro code
// connecting them to the generic functionality above.

mod byte_fns;
mod drbg;
mod helpers;
mod k_pke;
mod kem;
mod module;
mod ntt;
mod sampling;
mod types;

/// All KEM functionality is reachable through traits, so consumers can hold
/// any parameter set behind a common interface.
pub mod traits;

// Relevant to all parameter sets
const _N: u32 = 256;
const Q: u32 = 3329;
const ZETA: u32 = 17;

/// Shared secret length in bytes for all parameter sets.
pub const SSK_LEN: usize = 32;

/// The 32-byte shared secret established by encapsulation/decapsulation.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SSK_LEN]);

impl SerDes for SharedSecret {
    type ByteArray = [u8; SSK_LEN];

    fn into_bytes(self) -> Self::ByteArray { self.0 }

    fn try_from_bytes(ssk: Self::ByteArray) -> Result<Self, &'static str> {
        // No validation is possible on a uniform secret; Result for symmetry.
        Ok(SharedSecret(ssk))
    }
}

// Comparison runs over the full length regardless of where a mismatch occurs.
impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        let mut result = true;
        for i in 0..self.0.len() {
            result &= self.0[i] == other.0[i];
        }
        result
    }
}


// This common functionality is injected into each parameter set module
macro_rules! functionality {
    () => {
        const ETA1_64: usize = ETA1 as usize * 64; // Rust const generics cannot yet
        const ETA2_64: usize = ETA2 as usize * 64; // evaluate ETA * 64 at the use site

        use zeroize::{Zeroize, ZeroizeOnDrop};

        use crate::byte_fns::byte_decode;
        use crate::drbg::EntropySource;
        use crate::kem::{kem_decaps, kem_encaps, kem_keygen};
        use crate::traits::{Kem, SerDes};
        use crate::SharedSecret;

        /// Correctly sized public (encapsulation) key for this parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct PublicKey([u8; PK_LEN]);

        /// Correctly sized secret (decapsulation) key for this parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct SecretKey([u8; SK_LEN]);

        /// Correctly sized ciphertext for this parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct Ciphertext([u8; CT_LEN]);

        /// A KEM instance for this parameter set. Each instance owns its
        /// entropy source: the OS RNG by default, or the AES-256-CTR DRBG
        /// after `set_drbg_seed` (the deterministic Known-Answer-Test mode).
        pub struct Kyber {
            entropy: EntropySource,
        }

        impl Kyber {
            /// Creates an instance drawing entropy from the operating system.
            #[cfg(feature = "default-rng")]
            #[must_use]
            pub fn new() -> Self {
                Self { entropy: EntropySource::system() }
            }

            /// Creates an instance whose DRBG is seeded with `seed`, making
            /// every subsequent operation deterministic.
            #[must_use]
            pub fn from_drbg_seed(seed: [u8; 48]) -> Self {
                Self { entropy: EntropySource::seeded(&seed) }
            }
        }

        #[cfg(feature = "default-rng")]
        impl Default for Kyber {
            fn default() -> Self { Self::new() }
        }

        impl Kem for Kyber {
            type Ciphertext = Ciphertext;
            type PublicKey = PublicKey;
            type SecretKey = SecretKey;

            fn try_keygen(&mut self) -> Result<(PublicKey, SecretKey), &'static str> {
                let (mut pk, mut sk) = ([0u8; PK_LEN], [0u8; SK_LEN]);
                kem_keygen::<K, ETA1_64>(&mut self.entropy, &mut pk, &mut sk)?;
                Ok((PublicKey(pk), SecretKey(sk)))
            }

            fn try_encaps(
                &mut self, pk: &PublicKey,
            ) -> Result<(Ciphertext, SharedSecret), &'static str> {
                let mut ct = [0u8; CT_LEN];
                let ssk = kem_encaps::<K, ETA1_64, ETA2_64>(
                    &mut self.entropy,
                    DU,
                    DV,
                    &pk.0,
                    &mut ct,
                )?;
                Ok((Ciphertext(ct), ssk))
            }

            fn try_decaps(
                &self, sk: &SecretKey, ct: &Ciphertext,
            ) -> Result<SharedSecret, &'static str> {
                kem_decaps::<K, ETA1_64, ETA2_64, CT_LEN>(DU, DV, &sk.0, &ct.0)
            }

            fn set_drbg_seed(&mut self, seed: [u8; 48]) {
                self.entropy = EntropySource::seeded(&seed);
            }

            fn reseed_drbg(&mut self, seed: [u8; 48]) -> Result<(), &'static str> {
                self.entropy.reseed(&seed)
            }
        }

        impl SerDes for PublicKey {
            type ByteArray = [u8; PK_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(pk: Self::ByteArray) -> Result<Self, &'static str> {
                // Every 12-bit group must decode to a canonical residue; the
                // fixed-size array already rules out length confusion.
                for i in 0..K {
                    byte_decode(12, &pk[384 * i..384 * (i + 1)])?;
                }
                Ok(PublicKey(pk))
            }
        }

        impl SerDes for SecretKey {
            type ByteArray = [u8; SK_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(sk: Self::ByteArray) -> Result<Self, &'static str> {
                // Fixed size is the only checkable property; a Result is kept
                // for future validation opportunities.
                Ok(SecretKey(sk))
            }
        }

        impl SerDes for Ciphertext {
            type ByteArray = [u8; CT_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(ct: Self::ByteArray) -> Result<Self, &'static str> {
                // Any fixed-size byte pattern is a syntactically valid
                // ciphertext; invalid ones are rejected implicitly by decaps.
                Ok(Ciphertext(ct))
            }
        }
    };
}


/// Functionality for the Kyber-512 parameter set (NIST security category 1).
#[cfg(feature = "kyber-512")]
pub mod kyber_512 {
    //! Typical flow: the originator runs `Kyber::new().try_keygen()`, serializes
    //! the public key to the remote party, which runs `try_encaps` and returns
    //! the serialized ciphertext; `try_decaps` then yields the same shared
    //! secret on both ends.

    const K: usize = 2;
    const ETA1: u32 = 3;
    const ETA2: u32 = 2;
    const DU: u32 = 10;
    const DV: u32 = 4;

    /// Serialized public key length in bytes.
    pub const PK_LEN: usize = 800;
    /// Serialized secret key length in bytes.
    pub const SK_LEN: usize = 1632;
    /// Serialized ciphertext length in bytes.
    pub const CT_LEN: usize = 768;

    functionality!();
}


/// Functionality for the Kyber-768 parameter set (NIST security category 3).
#[cfg(feature = "kyber-768")]
pub mod kyber_768 {
    //! Typical flow: the originator runs `Kyber::new().try_keygen()`, serializes
    //! the public key to the remote party, which runs `try_encaps` and returns
    //! the serialized ciphertext; `try_decaps` then yields the same shared
    //! secret on both ends.

    const K: usize = 3;
    const ETA1: u32 = 2;
    const ETA2: u32 = 2;
    const DU: u32 = 10;
    const DV: u32 = 4;

    /// Serialized public key length in bytes.
    pub const PK_LEN: usize = 1184;
    /// Serialized secret key length in bytes.
    pub const SK_LEN: usize = 2400;
    /// Serialized ciphertext length in bytes.
    pub const CT_LEN: usize = 1088;

    functionality!();
}


/// Functionality for the Kyber-1024 parameter set (NIST security category 5).
#[cfg(feature = "kyber-1024")]
pub mod kyber_1024 {
    //! Typical flow: the originator runs `Kyber::new().try_keygen()`, serializes
    //! the public key to the remote party, which runs `try_encaps` and returns
    //! the serialized ciphertext; `try_decaps` then yields the same shared
    //! secret on both ends.

    const K: usize = 4;
    const ETA1: u32 = 2;
    const ETA2: u32 = 2;
    const DU: u32 = 11;
    const DV: u32 = 5;

    /// Serialized public key length in bytes.
    pub const PK_LEN: usize = 1568;
    /// Serialized secret key length in bytes.
    pub const SK_LEN: usize = 3168;
    /// Serialized ciphertext length in bytes.
    pub const CT_LEN: usize = 1568;

    functionality!();
}
