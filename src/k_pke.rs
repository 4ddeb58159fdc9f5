use rand_core::CryptoRngCore;

use crate::helpers::{g, prf};
use crate::module::{PolyMat, PolyVec};
use crate::types::{Ntt, Poly, Standard};

// The IND-CPA public-key encryption scheme underneath the KEM. All three
// functions are deterministic given their seed material; keygen draws its
// 32-byte seed d from the caller's rng so the KEM layer controls the draw
// order of the entropy stream.

/// CPA keygen: expands `G(d)` into (ρ, σ), samples Â from ρ and the secret and
/// error vectors from σ, and writes `ek = Encode₁₂(t̂) ‖ ρ`, `dk = Encode₁₂(ŝ)`.
pub(crate) fn k_pke_key_gen<const K: usize, const ETA1_64: usize>(
    rng: &mut impl CryptoRngCore, ek_pke: &mut [u8], dk_pke: &mut [u8],
) -> Result<(), &'static str> {
    debug_assert_eq!(ek_pke.len(), 384 * K + 32, "pke keygen: ek length");
    debug_assert_eq!(dk_pke.len(), 384 * K, "pke keygen: dk length");

    let mut d = [0u8; 32];
    rng.try_fill_bytes(&mut d).map_err(|_| "keygen: random number generator failed")?;
    let (rho, sigma) = g(&[&d]);

    let a_hat = PolyMat::<K>::sample_uniform(&rho);

    let mut n = 0u8;
    let s_hat = PolyVec::<Standard, K>::sample_cbd::<ETA1_64>(&sigma, &mut n).to_ntt();
    let e_hat = PolyVec::<Standard, K>::sample_cbd::<ETA1_64>(&sigma, &mut n).to_ntt();

    // t̂ = Â∘ŝ + ê; the Montgomery lift cancels the R^{-1} the pointwise
    // products picked up, leaving t̂ canonical for encoding
    let t_hat = a_hat.mul_vec(&s_hat).to_montgomery().add(&e_hat);

    t_hat.encode(12, &mut ek_pke[..384 * K])?;
    ek_pke[384 * K..].copy_from_slice(&rho);
    s_hat.encode(12, dk_pke)?;
    Ok(())
}


/// CPA encryption of the 32-byte message `m` under coins `r`:
/// `u = InvNTT(Âᵀ∘r̂) + e₁`, `v = InvNTT(t̂ᵀ∘r̂) + e₂ + Decompress₁(m)`,
/// ciphertext is the compressed encodings of u (d_u bits) and v (d_v bits).
pub(crate) fn k_pke_encrypt<const K: usize, const ETA1_64: usize, const ETA2_64: usize>(
    du: u32, dv: u32, ek_pke: &[u8], m: &[u8; 32], r: &[u8; 32], ct: &mut [u8],
) -> Result<(), &'static str> {
    debug_assert_eq!(ek_pke.len(), 384 * K + 32, "pke encrypt: ek length");
    debug_assert_eq!(ct.len(), 32 * (du as usize * K + dv as usize), "pke encrypt: ct length");

    let t_hat = PolyVec::<Ntt, K>::decode(12, &ek_pke[..384 * K])?;
    let rho: [u8; 32] =
        ek_pke[384 * K..].try_into().map_err(|_| "encrypt: malformed public key")?;

    // same XOF stream as keygen, consumed through the transpose
    let a_hat_t = PolyMat::<K>::sample_uniform(&rho).transpose();

    let mut n = 0u8;
    let r_hat = PolyVec::<Standard, K>::sample_cbd::<ETA1_64>(r, &mut n).to_ntt();
    let e1 = PolyVec::<Standard, K>::sample_cbd::<ETA2_64>(r, &mut n);
    let e2 = Poly::sample_cbd(&prf::<ETA2_64>(r, n));

    let mu = Poly::<Standard>::decode(1, m)?.decompress(1);

    let u = a_hat_t.mul_vec(&r_hat).from_ntt().add(&e1);
    let v = t_hat.dot(&r_hat).from_ntt().add(&e2).add(&mu);

    let step = 32 * du as usize;
    u.compress(du).encode(du, &mut ct[..K * step])?;
    v.compress(dv).encode(dv, &mut ct[K * step..])?;
    Ok(())
}


/// CPA decryption: `m = Encode₁(Compress₁(v − InvNTT(ŝᵀ∘NTT(u))))`.
pub(crate) fn k_pke_decrypt<const K: usize>(
    du: u32, dv: u32, dk_pke: &[u8], ct: &[u8],
) -> Result<[u8; 32], &'static str> {
    debug_assert_eq!(dk_pke.len(), 384 * K, "pke decrypt: dk length");
    debug_assert_eq!(ct.len(), 32 * (du as usize * K + dv as usize), "pke decrypt: ct length");

    let split = 32 * du as usize * K;
    let u_hat = PolyVec::<Standard, K>::decode(du, &ct[..split])?.decompress(du).to_ntt();
    let v = Poly::<Standard>::decode(dv, &ct[split..])?.decompress(dv);
    let s_hat = PolyVec::<Ntt, K>::decode(12, dk_pke)?;

    let w = v.sub(&s_hat.dot(&u_hat).from_ntt());

    let mut m = [0u8; 32];
    w.compress(1).encode(1, &mut m)?;
    Ok(m)
}
