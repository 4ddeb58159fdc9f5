// Deterministic (seeded-DRBG) behavior: identical seeds must produce
// byte-identical keys, ciphertexts and secrets, and the implicit-rejection
// branch must equal KDF(z ‖ H(ct)) recomputed from the secret key.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Shake256};

use kyber_r3::traits::{Kem, SerDes};

macro_rules! deterministic_suite {
    ($modname:ident) => {{
        use kyber_r3::$modname::Kyber;

        // five keygens from the same seed agree byte for byte
        let seed = [7u8; 48];
        let mut outputs = Vec::new();
        for _ in 0..5 {
            let mut kem = Kyber::from_drbg_seed(seed);
            let (pk, sk) = kem.try_keygen().unwrap();
            let mut concat = pk.into_bytes().to_vec();
            concat.extend_from_slice(&sk.into_bytes());
            outputs.push(concat);
        }
        assert!(outputs.windows(2).all(|w| w[0] == w[1]));

        // a fixed keypair and a fixed seed pin the ciphertext and secret
        let mut kem = Kyber::from_drbg_seed([8u8; 48]);
        let (pk, sk) = kem.try_keygen().unwrap();
        let mut pinned = Vec::new();
        for _ in 0..5 {
            kem.set_drbg_seed([9u8; 48]);
            let (ct, ssk) = kem.try_encaps(&pk).unwrap();
            let recovered = kem.try_decaps(&sk, &ct).unwrap();
            assert_eq!(ssk, recovered);
            let mut concat = ct.into_bytes().to_vec();
            concat.extend_from_slice(&ssk.into_bytes());
            pinned.push(concat);
        }
        assert!(pinned.windows(2).all(|w| w[0] == w[1]));

        // reseeding is deterministic too, and distinct from not reseeding
        let mut plain = Kyber::from_drbg_seed([1u8; 48]);
        let mut reseeded = Kyber::from_drbg_seed([1u8; 48]);
        reseeded.reseed_drbg([2u8; 48]).unwrap();
        let mut reseeded_again = Kyber::from_drbg_seed([1u8; 48]);
        reseeded_again.reseed_drbg([2u8; 48]).unwrap();
        let (pk_plain, _) = plain.try_keygen().unwrap();
        let (pk_a, _) = reseeded.try_keygen().unwrap();
        let (pk_b, _) = reseeded_again.try_keygen().unwrap();
        let pk_a_bytes = pk_a.into_bytes();
        assert_eq!(pk_a_bytes, pk_b.into_bytes());
        assert_ne!(pk_plain.into_bytes(), pk_a_bytes);
    }};
}

macro_rules! rejection_branch_suite {
    ($modname:ident) => {{
        use kyber_r3::$modname::{Ciphertext, Kyber};

        let mut kem = Kyber::from_drbg_seed([11u8; 48]);
        let (pk, sk) = kem.try_keygen().unwrap();
        let (ct, ssk) = kem.try_encaps(&pk).unwrap();

        let mut tampered = ct.into_bytes();
        tampered[3] ^= 0x10;
        let rejected = kem
            .try_decaps(&sk, &Ciphertext::try_from_bytes(tampered).unwrap())
            .unwrap();
        assert_ne!(rejected, ssk);

        // the rejection key is KDF(z ‖ H(ct*)) with z the last 32 sk bytes
        let sk_bytes = sk.into_bytes();
        let z = &sk_bytes[sk_bytes.len() - 32..];
        let h_ct: [u8; 32] = Sha3_256::digest(&tampered).into();
        let mut hasher = Shake256::default();
        hasher.update(z);
        hasher.update(&h_ct);
        let mut expected = [0u8; 32];
        hasher.finalize_xof().read(&mut expected);
        assert_eq!(rejected.into_bytes(), expected);
    }};
}

#[cfg(feature = "kyber-512")]
#[test]
fn kyber_512_is_deterministic_under_a_seeded_drbg() {
    deterministic_suite!(kyber_512);
}

#[cfg(feature = "kyber-768")]
#[test]
fn kyber_768_is_deterministic_under_a_seeded_drbg() {
    deterministic_suite!(kyber_768);
}

#[cfg(feature = "kyber-1024")]
#[test]
fn kyber_1024_is_deterministic_under_a_seeded_drbg() {
    deterministic_suite!(kyber_1024);
}

#[cfg(feature = "kyber-512")]
#[test]
fn kyber_512_rejection_key_derives_from_z() {
    rejection_branch_suite!(kyber_512);
}

#[cfg(feature = "kyber-768")]
#[test]
fn kyber_768_rejection_key_derives_from_z() {
    rejection_branch_suite!(kyber_768);
}

#[cfg(feature = "kyber-1024")]
#[test]
fn kyber_1024_rejection_key_derives_from_z() {
    rejection_branch_suite!(kyber_1024);
}

#[cfg(all(feature = "kyber-768", feature = "default-rng"))]
#[test]
fn reseed_without_a_seed_errors() {
    use kyber_r3::kyber_768::Kyber;

    let mut kem = Kyber::new();
    assert!(kem.reseed_drbg([0u8; 48]).is_err());

    kem.set_drbg_seed([0u8; 48]);
    assert!(kem.reseed_drbg([0u8; 48]).is_ok());
}
