use crate::types::Z;
use crate::{Q, ZETA};

// All twiddle factors live in Montgomery form so the butterflies can use the
// single-reduction `mont_mul`: the R in the table cancels the R^{-1} of the
// reduction and the transforms stay exact.

const MONT_R: u32 = (1u32 << 16) % Q;

// base^exp mod q; compile-time only.
const fn mod_pow(mut base: u64, mut exp: u64) -> u64 {
    let mut acc = 1u64;
    base %= Q as u64;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * base % Q as u64;
        }
        base = base * base % Q as u64;
        exp >>= 1;
    }
    acc
}

// ζ^i · R mod q stored at the bit-reversed index, so ZETA_TABLE[k] equals
// ζ^{rev8(k)} in Montgomery form. Lookups exploit two identities:
// rev8(2i) = rev7(i) for the layered butterflies, and
// rev8(i | 0x80) = 2·rev7(i) + 1 for the basecase gammas.
#[allow(clippy::cast_possible_truncation)]
const fn gen_zeta_table() -> [Z; 256] {
    let mut result = [Z::new(0); 256];
    let mut x: u32 = 1;
    let mut i = 0u32;
    while i < 256 {
        result[(i as u8).reverse_bits() as usize] = Z::new((x * MONT_R % Q) as u16);
        x = x * ZETA % Q;
        i += 1;
    }
    result
}

pub(crate) static ZETA_TABLE: [Z; 256] = gen_zeta_table();

// Final scale of the inverse transform: 128^{-1}·R^2. The extra R makes
// `ntt_inv` of a Montgomery-reduced pointwise product come out exact.
#[allow(clippy::cast_possible_truncation)]
const INV_NTT_SCALE: Z = Z::new(
    (mod_pow(128, (Q - 2) as u64) * (((MONT_R as u64) * (MONT_R as u64)) % Q as u64)
        % Q as u64) as u16,
);


/// Forward NTT: seven layers of Cooley–Tukey butterflies over the 128
/// quadratic factors of `X^256 + 1`. In place on a copy of the input;
/// output coefficients are canonical.
#[must_use]
#[allow(clippy::module_name_repetitions)]
pub(crate) fn ntt(f: &[Z; 256]) -> [Z; 256] {
    let mut f_hat = *f;
    let mut i = 1;
    for len in [128, 64, 32, 16, 8, 4, 2] {
        for start in (0..256).step_by(2 * len) {
            let zeta = ZETA_TABLE[i << 1];
            i += 1;
            for j in start..(start + len) {
                let t = f_hat[j + len].mont_mul(zeta);
                f_hat[j + len] = f_hat[j].sub(t);
                f_hat[j] = f_hat[j].add(t);
            }
        }
    }
    f_hat
}


/// Inverse NTT: Gentleman–Sande butterflies walking the zeta table backwards,
/// then the folded `128^{-1}·R^2` scale. Feeding it a pointwise product (which
/// carries R^{-1}) therefore yields the exact standard-domain result; feeding
/// it a raw forward transform yields the input scaled by R.
#[must_use]
#[allow(clippy::module_name_repetitions)]
pub(crate) fn ntt_inv(f_hat: &[Z; 256]) -> [Z; 256] {
    let mut f = *f_hat;
    let mut i = 127;
    for len in [2, 4, 8, 16, 32, 64, 128] {
        for start in (0..256).step_by(2 * len) {
            let zeta = ZETA_TABLE[i << 1];
            i -= 1;
            for j in start..(start + len) {
                let t = f[j];
                f[j] = t.add(f[j + len]);
                f[j + len] = zeta.mont_mul(f[j + len].sub(t));
            }
        }
    }
    f.iter_mut().for_each(|c| *c = c.mont_mul(INV_NTT_SCALE));
    f
}


/// Pointwise multiplication of two NTT-domain elements: 128 independent
/// products of degree-one polynomials modulo `X^2 − γ_i`.
#[must_use]
pub(crate) fn multiply_ntts(f_hat: &[Z; 256], g_hat: &[Z; 256]) -> [Z; 256] {
    let mut h_hat = [Z::default(); 256];
    for i in 0..128 {
        let gamma = ZETA_TABLE[i ^ 0x80]; // ζ^{2·rev7(i)+1} in Montgomery form
        let (c0, c1) = base_case_multiply(
            f_hat[2 * i],
            f_hat[2 * i + 1],
            g_hat[2 * i],
            g_hat[2 * i + 1],
            gamma,
        );
        h_hat[2 * i] = c0;
        h_hat[2 * i + 1] = c1;
    }
    h_hat
}


/// `(a0 + a1·X)(b0 + b1·X) mod (X^2 − γ)`. Every product is Montgomery-reduced,
/// so the result carries a factor of R^{-1} relative to the true product.
#[must_use]
pub(crate) fn base_case_multiply(a0: Z, a1: Z, b0: Z, b1: Z, gamma: Z) -> (Z, Z) {
    let c0 = a0.mont_mul(b0).add(a1.mont_mul(b1).mont_mul(gamma));
    let c1 = a0.mont_mul(b1).add(a1.mont_mul(b0));
    (c0, c1)
}


#[cfg(test)]
mod tests {
    use rand_core::{RngCore, SeedableRng};

    use super::{ntt, ntt_inv, ZETA_TABLE};
    use crate::types::{Poly, Standard, Z};
    use crate::Q;

    fn random_coeffs(rng: &mut impl RngCore) -> [Z; 256] {
        core::array::from_fn(|_| {
            let mut c = Z::default();
            c.set_u16(u16::try_from(rng.next_u32() % Q).unwrap());
            c
        })
    }

    // strip the Montgomery factor: x·R → x
    fn demont(x: Z) -> u16 {
        x.mont_mul(Z::new(1)).get_u16()
    }

    #[test]
    fn zeta_table_anchors() {
        // ζ^0 in Montgomery form is R mod q
        assert_eq!(ZETA_TABLE[0].get_u16(), 2285);
        assert!(ZETA_TABLE.iter().all(|z| z.get_u16() < u16::try_from(Q).unwrap()));
        // ζ has order 256, so no other power maps to the identity
        assert_eq!(ZETA_TABLE.iter().filter(|z| z.get_u16() == 2285).count(), 1);
    }

    #[test]
    fn zero_is_a_fixed_point() {
        let zero = [Z::default(); 256];
        assert!(ntt(&zero).iter().all(|c| c.get_u16() == 0));
        assert!(ntt_inv(&zero).iter().all(|c| c.get_u16() == 0));
    }

    #[test]
    fn inverse_transform_undoes_forward() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
        for _ in 0..20 {
            let f = random_coeffs(&mut rng);
            // raw inverse of a raw forward transform returns f scaled by R
            let f2 = ntt_inv(&ntt(&f));
            for i in 0..256 {
                assert_eq!(demont(f2[i]), f[i].get_u16());
            }
        }
    }

    #[test]
    fn ntt_multiply_matches_schoolbook() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(456);
        for _ in 0..8 {
            let a = Poly::<Standard>::from_coeffs(random_coeffs(&mut rng));
            let b = Poly::<Standard>::from_coeffs(random_coeffs(&mut rng));
            let via_ntt = a.to_ntt().mul(&b.to_ntt()).from_ntt();
            let via_schoolbook = a.schoolbook_mul(&b);
            for i in 0..256 {
                assert_eq!(via_ntt.coeffs[i].get_u16(), via_schoolbook.coeffs[i].get_u16());
            }
        }
    }
}
