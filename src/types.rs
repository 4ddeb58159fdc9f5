use core::marker::PhantomData;

use sha3::digest::XofReader;

use crate::byte_fns::{byte_decode, byte_encode};
use crate::helpers::{compress_vector, decompress_vector};
use crate::ntt::{multiply_ntts, ntt, ntt_inv};
use crate::sampling::{sample_ntt, sample_poly_cbd};
use crate::Q;

/// Ring coefficient; stored as u16 in canonical form `[0, q)`, arithmetic done
/// as u32/u64 so products can be reduced.
#[derive(Clone, Copy, Default)]
pub(crate) struct Z(u16);

#[allow(clippy::inline_always, clippy::cast_possible_truncation)]
impl Z {
    const M: u64 = (1u64 << 32) / Self::Q64;
    const NEG_QINV: u16 = neg_q_inv();
    const Q16: u16 = Q as u16;
    const Q64: u64 = Q as u64;
    /// R^2 mod q with R = 2^16; `mont_mul` by this lifts a value into Montgomery form.
    pub(crate) const R2: Z = Z((((1u32 << 16) % Q) * ((1u32 << 16) % Q) % Q) as u16);

    pub(crate) const fn new(a: u16) -> Self { Self(a) }

    pub(crate) fn get_u16(self) -> u16 { self.0 }

    pub(crate) fn get_u32(self) -> u32 { u32::from(self.0) }

    pub(crate) fn set_u16(&mut self, a: u16) { self.0 = a }

    // Subtract q if the value reached it; masked, no data-dependent branch.
    // Input must be below 2q and below 2^15 so the borrow lands in the sign bit.
    #[inline(always)]
    const fn reduce_once(a: u16) -> u16 {
        let t = a.wrapping_sub(Self::Q16);
        t.wrapping_add(Self::Q16 & 0u16.wrapping_sub(t >> 15))
    }

    #[inline(always)]
    pub(crate) const fn add(self, other: Self) -> Self {
        Self(Self::reduce_once(self.0.wrapping_add(other.0)))
    }

    #[inline(always)]
    pub(crate) const fn sub(self, other: Self) -> Self {
        let t = self.0.wrapping_sub(other.0);
        Self(t.wrapping_add(Self::Q16 & 0u16.wrapping_sub(t >> 15)))
    }

    /// Plain modular multiply via Barrett reduction with a precomputed 2^32/q
    /// constant. Off the hot paths (schoolbook multiply, scale factors).
    #[inline(always)]
    pub(crate) const fn mul(self, other: Self) -> Self {
        let prod = (self.0 as u64) * (other.0 as u64);
        let quot = (prod * Self::M) >> 32;
        let rem = prod - quot * Self::Q64;
        Self(Self::reduce_once(rem as u16))
    }

    /// Montgomery multiply: returns `self · other · R^{-1} mod q`, R = 2^16.
    #[inline(always)]
    pub(crate) const fn mont_mul(self, other: Self) -> Self {
        let prod = (self.0 as u32) * (other.0 as u32);
        let m = (prod as u16).wrapping_mul(Self::NEG_QINV);
        let t = ((prod + (m as u32) * (Self::Q16 as u32)) >> 16) as u16;
        Self(Self::reduce_once(t))
    }
}

// -q^{-1} mod 2^16 by Hensel lifting: x ← x·(2 − q·x) doubles the correct
// low bits each step, so five steps cover 2^16.
#[allow(clippy::cast_possible_truncation)]
const fn neg_q_inv() -> u16 {
    let q = Q as u16;
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 5 {
        x = x.wrapping_mul(2u16.wrapping_sub(q.wrapping_mul(x)));
        i += 1;
    }
    0u16.wrapping_sub(x)
}


/// Marker for coefficient-domain polynomials.
#[derive(Clone, Copy)]
pub(crate) struct Standard;

/// Marker for NTT-domain polynomials.
#[derive(Clone, Copy)]
pub(crate) struct Ntt;

/// Domain tag carried at the type level: the same 256 coefficients mean
/// different ring elements depending on the tag, so mixing domains in
/// arithmetic must not compile.
pub(crate) trait Form: Copy {}

impl Form for Standard {}
impl Form for Ntt {}


/// An element of `R_q = Z_q[X]/(X^256 + 1)`, tagged with its domain.
#[derive(Clone, Copy)]
pub(crate) struct Poly<F: Form> {
    pub(crate) coeffs: [Z; 256],
    form: PhantomData<F>,
}

impl<F: Form> Poly<F> {
    pub(crate) fn zero() -> Self {
        Self { coeffs: [Z::default(); 256], form: PhantomData }
    }

    pub(crate) fn from_coeffs(coeffs: [Z; 256]) -> Self {
        Self { coeffs, form: PhantomData }
    }

    pub(crate) fn add(&self, other: &Self) -> Self {
        Self::from_coeffs(core::array::from_fn(|i| self.coeffs[i].add(other.coeffs[i])))
    }

    pub(crate) fn sub(&self, other: &Self) -> Self {
        Self::from_coeffs(core::array::from_fn(|i| self.coeffs[i].sub(other.coeffs[i])))
    }

    /// Packs each coefficient as `d` little-endian bits into `32·d` bytes.
    pub(crate) fn encode(&self, d: u32, bytes: &mut [u8]) -> Result<(), &'static str> {
        byte_encode(d, &self.coeffs, bytes)
    }

    /// Inverse of `encode`. The caller's type ascription picks the domain tag,
    /// so stored NTT-form vectors (`t̂`, `ŝ`) deserialize without a transform.
    pub(crate) fn decode(d: u32, bytes: &[u8]) -> Result<Self, &'static str> {
        Ok(Self::from_coeffs(byte_decode(d, bytes)?))
    }
}

impl Poly<Standard> {
    pub(crate) fn sample_cbd(bytes: &[u8]) -> Self {
        Self::from_coeffs(sample_poly_cbd(bytes))
    }

    pub(crate) fn compress(mut self, d: u32) -> Self {
        compress_vector(d, &mut self.coeffs);
        self
    }

    pub(crate) fn decompress(mut self, d: u32) -> Self {
        decompress_vector(d, &mut self.coeffs);
        self
    }

    pub(crate) fn to_ntt(&self) -> Poly<Ntt> {
        Poly::from_coeffs(ntt(&self.coeffs))
    }

    /// Negacyclic product by the quadratic-time method; not on any hot path,
    /// kept as the cross-check for the NTT-based multiplier.
    #[allow(dead_code)]
    pub(crate) fn schoolbook_mul(&self, other: &Self) -> Self {
        let mut out = [Z::default(); 256];
        for i in 0..256 {
            for j in 0..256 {
                let prod = self.coeffs[i].mul(other.coeffs[j]);
                if i + j < 256 {
                    out[i + j] = out[i + j].add(prod);
                } else {
                    // X^256 = -1
                    out[i + j - 256] = out[i + j - 256].sub(prod);
                }
            }
        }
        Self::from_coeffs(out)
    }
}

impl Poly<Ntt> {
    /// Rejection-samples a uniform NTT-domain element directly from an XOF stream.
    pub(crate) fn sample_uniform(xof: impl XofReader) -> Self {
        Self::from_coeffs(sample_ntt(xof))
    }

    pub(crate) fn from_ntt(&self) -> Poly<Standard> {
        Poly::from_coeffs(ntt_inv(&self.coeffs))
    }

    /// Pointwise product; Montgomery-reduced, so the result carries R^{-1}.
    pub(crate) fn mul(&self, other: &Self) -> Self {
        Self::from_coeffs(multiply_ntts(&self.coeffs, &other.coeffs))
    }

    /// Multiplies every coefficient by R, cancelling the R^{-1} a preceding
    /// pointwise multiplication introduced.
    pub(crate) fn to_montgomery(mut self) -> Self {
        self.coeffs.iter_mut().for_each(|c| *c = c.mont_mul(Z::R2));
        self
    }
}
