use crate::helpers::ensure;
use crate::types::Z;
use crate::Q;

/// Serializes 256 coefficients into `32·d` bytes, each coefficient contributing
/// its `d` low bits in little-endian bit order (bit 0 of byte 0 first).
/// Coefficients must lie in `[0, 2^d)`, or `[0, q)` when `d = 12`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn byte_encode(
    d: u32, coeffs: &[Z; 256], bytes: &mut [u8],
) -> Result<(), &'static str> {
    ensure!(bytes.len() == 32 * d as usize, "encode: output length not 32 * d");
    let max = if d < 12 { 1u32 << d } else { Q };
    let mut temp = 0u64;
    let mut bit_index = 0;
    let mut byte_index = 0;
    for coeff in coeffs {
        let c = coeff.get_u32();
        ensure!(c < max, "encode: coefficient out of range");
        temp |= u64::from(c) << bit_index;
        bit_index += d as usize;
        while bit_index > 7 {
            bytes[byte_index] = temp as u8;
            temp >>= 8;
            byte_index += 1;
            bit_index -= 8;
        }
    }
    Ok(())
}


/// Inverse of `byte_encode`: unpacks `32·d` bytes into 256 `d`-bit integers.
/// For `d = 12` every group must decode below q; malformed inputs are rejected
/// before any arithmetic runs on them.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn byte_decode(d: u32, bytes: &[u8]) -> Result<[Z; 256], &'static str> {
    ensure!(bytes.len() == 32 * d as usize, "decode: input length not 32 * d");
    let mut coeffs = [Z::default(); 256];
    let mut temp = 0u64;
    let mut int_index = 0;
    let mut bit_index = 0;
    for byte in bytes {
        temp |= u64::from(*byte) << bit_index;
        bit_index += 8;
        while bit_index >= d as usize {
            coeffs[int_index].set_u16((temp & ((1u64 << d) - 1)) as u16);
            temp >>= d;
            bit_index -= d as usize;
            int_index += 1;
        }
    }
    let max = if d < 12 { 1u16 << d } else { Q as u16 };
    ensure!(coeffs.iter().all(|c| c.get_u16() < max), "decode: coefficient out of range");
    Ok(coeffs)
}


#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::vec;
    use alloc::vec::Vec;

    use rand::{Rng, SeedableRng};

    use super::{byte_decode, byte_encode};

    #[test]
    fn decode_then_encode_roundtrips() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
        for d in 1u32..=12 {
            for _ in 0..20 {
                let num_bytes = 32 * d as usize;
                let mut bytes1: Vec<u8> = (0..num_bytes).map(|_| rng.gen()).collect();
                if d == 12 {
                    // keep every 12-bit group below q
                    bytes1.iter_mut().skip(1).step_by(3).for_each(|b| *b &= 0x0C);
                    bytes1.iter_mut().skip(2).step_by(3).for_each(|b| *b &= 0x0C);
                }
                let coeffs = byte_decode(d, &bytes1).unwrap();
                let mut bytes2 = vec![0u8; num_bytes];
                byte_encode(d, &coeffs, &mut bytes2).unwrap();
                assert_eq!(bytes1, bytes2);
            }
        }
    }

    #[test]
    fn twelve_bit_groups_at_or_above_q_are_rejected() {
        let mut bytes = [0u8; 32 * 12];
        bytes[0] = 0x01;
        bytes[1] = 0x0D; // first group decodes to 0x0D01 = 3329 = q
        assert!(byte_decode(12, &bytes).is_err());

        bytes[1] = 0x0C; // 0x0C01 = 3073 < q
        assert!(byte_decode(12, &bytes).is_ok());
    }

    #[test]
    fn little_endian_bit_order() {
        // 0x45 = bits 1,0,1,0,0,0,1,0 → 1-bit coefficients in that order
        let mut bytes = [0u8; 32];
        bytes[0] = 0x45;
        let coeffs = byte_decode(1, &bytes).unwrap();
        let first: Vec<u16> = coeffs.iter().take(8).map(|c| c.get_u16()).collect();
        assert_eq!(first, vec![1, 0, 1, 0, 0, 0, 1, 0]);
    }
}
