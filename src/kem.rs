use rand_core::CryptoRngCore;
use subtle::{ConditionallySelectable, ConstantTimeEq};

use crate::helpers::{g, h, kdf};
use crate::k_pke::{k_pke_decrypt, k_pke_encrypt, k_pke_key_gen};
use crate::{SharedSecret, SSK_LEN};

// The Fujisaki–Okamoto wrapper lifting the CPA scheme to an IND-CCA2 KEM.
// Decapsulation never reports failure: a mismatching re-encryption swaps the
// KDF input to the per-key rejection value z behind a constant-time mask.

/// KEM keygen: runs CPA keygen, draws z, and assembles
/// `sk = dk_pke ‖ pk ‖ H(pk) ‖ z`. The entropy stream is consumed as
/// d (32 bytes) then z (32 bytes).
pub(crate) fn kem_keygen<const K: usize, const ETA1_64: usize>(
    rng: &mut impl CryptoRngCore, pk: &mut [u8], sk: &mut [u8],
) -> Result<(), &'static str> {
    debug_assert_eq!(pk.len(), 384 * K + 32, "kem keygen: pk length");
    debug_assert_eq!(sk.len(), 768 * K + 96, "kem keygen: sk length");

    let p1 = 384 * K;
    k_pke_key_gen::<K, ETA1_64>(rng, pk, &mut sk[..p1])?;

    let mut z = [0u8; 32];
    rng.try_fill_bytes(&mut z).map_err(|_| "keygen: random number generator failed")?;

    let h_pk = h(pk);
    let p2 = p1 + pk.len();
    let p3 = p2 + h_pk.len();
    sk[p1..p2].copy_from_slice(pk);
    sk[p2..p3].copy_from_slice(&h_pk);
    sk[p3..].copy_from_slice(&z);
    Ok(())
}


/// Encapsulation: `m = H(32 random bytes)`, `(K̄, r) = G(m ‖ H(pk))`,
/// `c = Enc(pk, m, r)`, shared secret `K = KDF(K̄ ‖ H(c))`.
pub(crate) fn kem_encaps<const K: usize, const ETA1_64: usize, const ETA2_64: usize>(
    rng: &mut impl CryptoRngCore, du: u32, dv: u32, pk: &[u8], ct: &mut [u8],
) -> Result<SharedSecret, &'static str> {
    debug_assert_eq!(pk.len(), 384 * K + 32, "kem encaps: pk length");
    debug_assert_eq!(ct.len(), 32 * (du as usize * K + dv as usize), "kem encaps: ct length");

    let mut m_seed = [0u8; 32];
    rng.try_fill_bytes(&mut m_seed).map_err(|_| "encaps: random number generator failed")?;
    // the entropy is hashed before use
    let m = h(&m_seed);

    let h_pk = h(pk);
    let (k_bar, r) = g(&[&m, &h_pk]);

    k_pke_encrypt::<K, ETA1_64, ETA2_64>(du, dv, pk, &m, &r, ct)?;

    let mut ssk = [0u8; SSK_LEN];
    kdf(&[&k_bar, &h(ct)], &mut ssk);
    Ok(SharedSecret(ssk))
}


/// Decapsulation with implicit rejection: decrypt to m′, re-derive (K̄′, r′),
/// re-encrypt, and select K̄′ or z by a constant-time comparison of the
/// ciphertexts before the final KDF. Timing does not depend on whether the
/// ciphertext was valid.
pub(crate) fn kem_decaps<
    const K: usize,
    const ETA1_64: usize,
    const ETA2_64: usize,
    const CT_LEN: usize,
>(
    du: u32, dv: u32, sk: &[u8], ct: &[u8; CT_LEN],
) -> Result<SharedSecret, &'static str> {
    debug_assert_eq!(sk.len(), 768 * K + 96, "kem decaps: sk length");
    debug_assert_eq!(ct.len(), 32 * (du as usize * K + dv as usize), "kem decaps: ct length");

    let p1 = 384 * K;
    let p2 = p1 + 384 * K + 32;
    let p3 = p2 + 32;
    let dk_pke = &sk[..p1];
    let pk = &sk[p1..p2];
    let h_pk = &sk[p2..p3];
    let z: [u8; 32] = sk[p3..].try_into().map_err(|_| "decaps: malformed secret key")?;

    let m_prime = k_pke_decrypt::<K>(du, dv, dk_pke, ct)?;
    let (mut k_bar, r_prime) = g(&[&m_prime, h_pk]);

    let mut ct_prime = [0u8; CT_LEN];
    k_pke_encrypt::<K, ETA1_64, ETA2_64>(du, dv, pk, &m_prime, &r_prime, &mut ct_prime)?;

    // mask-select the KDF prefix; no branch on the comparison
    k_bar.conditional_assign(&z, ct.ct_ne(&ct_prime));

    let mut ssk = [0u8; SSK_LEN];
    kdf(&[&k_bar, &h(ct)], &mut ssk);
    Ok(SharedSecret(ssk))
}
