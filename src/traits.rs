use crate::SharedSecret;

/// The three KEM operations plus control of the entropy source. Each
/// implementor is a self-contained instance owning its own DRBG, so distinct
/// instances never share mutable state; the trait exists so consumers can hold
/// parameter sets behind a common interface.
pub trait Kem {
    /// The (public) encapsulation key produced by `try_keygen`.
    type PublicKey;
    /// The (private) decapsulation key produced by `try_keygen`.
    type SecretKey;
    /// The ciphertext carried from the encapsulating to the decapsulating party.
    type Ciphertext;

    /// Generates a public/secret keypair from the instance's entropy source.
    ///
    /// # Errors
    /// Returns an error if the entropy source fails.
    ///
    /// # Examples
    /// ```rust
    /// # fn main() -> Result<(), &'static str> {
    /// # #[cfg(all(feature = "kyber-512", feature = "default-rng"))] {
    /// use kyber_r3::kyber_512::{Ciphertext, Kyber, PublicKey};
    /// use kyber_r3::traits::{Kem, SerDes};
    ///
    /// let mut alice = Kyber::new();
    /// let (pk, sk) = alice.try_keygen()?;
    /// let pk_bytes = pk.into_bytes(); // sent to the remote party
    ///
    /// let mut bob = Kyber::new();
    /// let bob_pk = PublicKey::try_from_bytes(pk_bytes)?;
    /// let (ct, ssk_bob) = bob.try_encaps(&bob_pk)?;
    /// let ct_bytes = ct.into_bytes(); // sent back
    ///
    /// let ct = Ciphertext::try_from_bytes(ct_bytes)?;
    /// let ssk_alice = alice.try_decaps(&sk, &ct)?;
    /// assert_eq!(ssk_alice, ssk_bob);
    /// # }
    /// # Ok(())}
    /// ```
    fn try_keygen(&mut self) -> Result<(Self::PublicKey, Self::SecretKey), &'static str>;

    /// Encapsulates a fresh 32-byte shared secret under `pk`, returning the
    /// ciphertext to transmit and the local copy of the secret.
    ///
    /// # Errors
    /// Returns an error if the entropy source fails or `pk` is malformed.
    fn try_encaps(
        &mut self, pk: &Self::PublicKey,
    ) -> Result<(Self::Ciphertext, SharedSecret), &'static str>;

    /// Recovers the shared secret from `ct`. A ciphertext that fails the
    /// re-encryption check yields a pseudorandom secret derived from the key's
    /// rejection value; the caller cannot distinguish the two cases, and
    /// neither can a timing observer.
    ///
    /// # Errors
    /// Returns an error only on malformed input lengths, never on the
    /// validity of the ciphertext.
    fn try_decaps(
        &self, sk: &Self::SecretKey, ct: &Self::Ciphertext,
    ) -> Result<SharedSecret, &'static str>;

    /// Switches the instance from OS entropy to the AES-256-CTR DRBG seeded
    /// with `seed`. All subsequent operations become deterministic functions
    /// of the DRBG state; this is the Known-Answer-Test workflow.
    ///
    /// # Examples
    /// ```rust
    /// # #[cfg(all(feature = "kyber-512", feature = "default-rng"))] {
    /// use kyber_r3::kyber_512::Kyber;
    /// use kyber_r3::traits::{Kem, SerDes};
    ///
    /// let seed = [42u8; 48];
    /// let mut first = Kyber::new();
    /// first.set_drbg_seed(seed);
    /// let mut second = Kyber::new();
    /// second.set_drbg_seed(seed);
    ///
    /// let (pk1, _) = first.try_keygen().unwrap();
    /// let (pk2, _) = second.try_keygen().unwrap();
    /// assert_eq!(pk1.into_bytes(), pk2.into_bytes());
    /// # }
    /// ```
    fn set_drbg_seed(&mut self, seed: [u8; 48]);

    /// Reseeds the DRBG previously installed by `set_drbg_seed`.
    ///
    /// # Errors
    /// Returns an error if no seed was ever set.
    fn reseed_drbg(&mut self, seed: [u8; 48]) -> Result<(), &'static str>;
}


/// Serialization to and from fixed-size byte arrays. Deserialization performs
/// whatever validation the type allows, so operational code downstream can
/// assume well-formed values.
pub trait SerDes {
    /// The fixed-size byte array this type serializes into.
    type ByteArray;

    /// Produces the byte-array form.
    fn into_bytes(self) -> Self::ByteArray;

    /// Consumes a byte array and validates it into the typed form.
    ///
    /// # Errors
    /// Returns an error on malformed input.
    fn try_from_bytes(ba: Self::ByteArray) -> Result<Self, &'static str>
    where
        Self: Sized;
}
