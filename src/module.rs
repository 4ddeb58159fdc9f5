use crate::helpers::{ensure, prf, xof};
use crate::types::{Form, Ntt, Poly, Standard};

// The vector/matrix layer over R_q. Everything is shape-checked at compile
// time through the const K parameter, and domain-checked through the form tag
// the element polynomials carry.

/// A k-vector of ring elements, all in the same domain.
pub(crate) struct PolyVec<F: Form, const K: usize> {
    pub(crate) polys: [Poly<F>; K],
}

impl<F: Form, const K: usize> PolyVec<F, K> {
    pub(crate) fn from_fn(f: impl FnMut(usize) -> Poly<F>) -> Self {
        Self { polys: core::array::from_fn(f) }
    }

    pub(crate) fn add(&self, other: &Self) -> Self {
        Self::from_fn(|i| self.polys[i].add(&other.polys[i]))
    }

    // Componentwise inverse of `add`; the KEM only subtracts scalar
    // polynomials, so this stays test-exercised.
    #[allow(dead_code)]
    pub(crate) fn sub(&self, other: &Self) -> Self {
        Self::from_fn(|i| self.polys[i].sub(&other.polys[i]))
    }

    /// Concatenation of the per-polynomial encodings, in order.
    pub(crate) fn encode(&self, d: u32, out: &mut [u8]) -> Result<(), &'static str> {
        let step = 32 * d as usize;
        ensure!(out.len() == K * step, "module: encode output length mismatch");
        for (i, chunk) in out.chunks_mut(step).enumerate() {
            self.polys[i].encode(d, chunk)?;
        }
        Ok(())
    }

    /// Inverse of `encode`; the caller's type ascription picks the domain tag.
    pub(crate) fn decode(d: u32, bytes: &[u8]) -> Result<Self, &'static str> {
        let step = 32 * d as usize;
        ensure!(bytes.len() == K * step, "module: decode input length mismatch");
        let mut out = Self::from_fn(|_| Poly::zero());
        for (i, chunk) in bytes.chunks(step).enumerate() {
            out.polys[i] = Poly::decode(d, chunk)?;
        }
        Ok(out)
    }
}

impl<const K: usize> PolyVec<Standard, K> {
    /// Samples the k noise polynomials CBD_η(PRF(seed, N)), advancing the
    /// domain-separation counter once per polynomial.
    pub(crate) fn sample_cbd<const ETA_64: usize>(seed: &[u8; 32], n: &mut u8) -> Self {
        Self::from_fn(|_| {
            let poly = Poly::sample_cbd(&prf::<ETA_64>(seed, *n));
            *n += 1;
            poly
        })
    }

    pub(crate) fn to_ntt(&self) -> PolyVec<Ntt, K> {
        PolyVec::from_fn(|i| self.polys[i].to_ntt())
    }

    pub(crate) fn compress(self, d: u32) -> Self {
        Self::from_fn(|i| self.polys[i].compress(d))
    }

    pub(crate) fn decompress(self, d: u32) -> Self {
        Self::from_fn(|i| self.polys[i].decompress(d))
    }
}

impl<const K: usize> PolyVec<Ntt, K> {
    pub(crate) fn from_ntt(&self) -> PolyVec<Standard, K> {
        PolyVec::from_fn(|i| self.polys[i].from_ntt())
    }

    pub(crate) fn to_montgomery(self) -> Self {
        Self::from_fn(|i| self.polys[i].to_montgomery())
    }

    /// vᵀ·w: the 1×1 result of a row times a column, i.e. the sum of the
    /// pointwise products.
    pub(crate) fn dot(&self, other: &Self) -> Poly<Ntt> {
        let mut acc = Poly::zero();
        for i in 0..K {
            acc = acc.add(&self.polys[i].mul(&other.polys[i]));
        }
        acc
    }
}


/// The k×k public matrix. It only ever exists in the NTT domain: the uniform
/// sampler emits NTT coefficients directly.
pub(crate) struct PolyMat<const K: usize> {
    rows: [[Poly<Ntt>; K]; K],
}

impl<const K: usize> PolyMat<K> {
    /// Expands ρ into Â with `Â[i][j] = Parse(XOF(ρ ‖ j ‖ i))`.
    pub(crate) fn sample_uniform(rho: &[u8; 32]) -> Self {
        Self {
            rows: core::array::from_fn(|i| {
                core::array::from_fn(|j| {
                    Poly::sample_uniform(xof(rho, j.to_le_bytes()[0], i.to_le_bytes()[0]))
                })
            }),
        }
    }

    /// O(k²) pointer swap; `sample_uniform(ρ).transpose()` equals sampling
    /// with the XOF indices in `(i, j)` order.
    pub(crate) fn transpose(&self) -> Self {
        Self { rows: core::array::from_fn(|i| core::array::from_fn(|j| self.rows[j][i])) }
    }

    pub(crate) fn mul_vec(&self, v: &PolyVec<Ntt, K>) -> PolyVec<Ntt, K> {
        PolyVec::from_fn(|i| {
            let mut acc = Poly::zero();
            for j in 0..K {
                acc = acc.add(&self.rows[i][j].mul(&v.polys[j]));
            }
            acc
        })
    }
}
