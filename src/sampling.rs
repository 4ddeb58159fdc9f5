use sha3::digest::XofReader;

use crate::types::Z;
use crate::Q;

/// Uniform rejection sampler: draws 3-byte chunks from the XOF stream, splits
/// each into two 12-bit candidates, and keeps those below q until 256
/// coefficients are filled. Streaming the reader means the sampler can never
/// run out of input. The loop's timing depends only on ρ, which is public.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn sample_ntt(mut xof_reader: impl XofReader) -> [Z; 256] {
    let mut coeffs = [Z::default(); 256];
    let mut c = [0u8; 3];

    let mut j = 0usize;
    while j < 256 {
        xof_reader.read(&mut c);

        let d1 = u32::from(c[0]) + 256 * (u32::from(c[1]) & 0x0F);
        let d2 = (u32::from(c[1]) >> 4) + 16 * u32::from(c[2]);

        if d1 < Q {
            coeffs[j].set_u16(d1 as u16);
            j += 1;
        }
        if (d2 < Q) && (j < 256) {
            coeffs[j].set_u16(d2 as u16);
            j += 1;
        }
    }
    coeffs
}


/// Centered binomial sampler CBD_η for η ∈ {2, 3}; η is implied by the input
/// length of `64·η` bytes. Each coefficient is the difference of two η-bit
/// popcounts of consecutive bit groups, taken in little-endian bit order.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn sample_poly_cbd(bytes: &[u8]) -> [Z; 256] {
    let eta = bytes.len() >> 6;
    debug_assert_eq!(bytes.len(), 64 * eta, "cbd: input length not 64 * eta");
    let mut coeffs = [Z::default(); 256];
    let mut temp = 0u32;
    let mut int_index = 0;
    let mut bit_index = 0;
    for byte in bytes {
        temp |= u32::from(*byte) << bit_index;
        bit_index += 8;
        while bit_index >= 2 * eta {
            let x = count_ones(temp & ((1 << eta) - 1));
            let y = count_ones((temp >> eta) & ((1 << eta) - 1));
            let (mut xx, mut yy) = (Z::default(), Z::default());
            xx.set_u16(x);
            yy.set_u16(y);
            coeffs[int_index] = xx.sub(yy);
            bit_index -= 2 * eta;
            temp >>= 2 * eta;
            int_index += 1;
        }
    }
    coeffs
}


// Popcount without a data-dependent branch (and without trusting the target's
// lowering of the intrinsic).
#[allow(clippy::cast_possible_truncation)]
fn count_ones(x: u32) -> u16 {
    let x = (x & 0x5555_5555) + ((x >> 1) & 0x5555_5555);
    let x = (x & 0x3333_3333) + ((x >> 2) & 0x3333_3333);
    let x = (x & 0x0F0F_0F0F) + ((x >> 4) & 0x0F0F_0F0F);
    x as u16
}
