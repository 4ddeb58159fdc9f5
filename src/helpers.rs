use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake256};

use crate::types::Z;
use crate::Q;


/// If the condition is not met, return an error message. Borrowed from the `anyhow` crate.
macro_rules! ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($msg);
        }
    };
}

pub(crate) use ensure; // make available throughout crate


/// Function H: SHA3-256 of the input, 32 bytes out.
#[must_use]
pub(crate) fn h(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    Digest::update(&mut hasher, bytes);
    hasher.finalize().into()
}


/// Function G: SHA3-512 of the concatenated inputs, split into two 32-byte halves.
pub(crate) fn g(parts: &[&[u8]]) -> ([u8; 32], [u8; 32]) {
    let mut hasher = Sha3_512::new();
    parts.iter().for_each(|p| Digest::update(&mut hasher, p));
    let digest = hasher.finalize();
    let a = digest[0..32].try_into().expect("g: left split");
    let b = digest[32..64].try_into().expect("g: right split");
    (a, b)
}


/// Function XOF: SHAKE-128 over `rho ‖ i ‖ j`, returned as a reader so the
/// uniform sampler can squeeze as many bytes as rejection demands.
#[must_use]
pub(crate) fn xof(rho: &[u8; 32], i: u8, j: u8) -> impl XofReader {
    let mut hasher = Shake128::default();
    hasher.update(rho);
    hasher.update(&[i]);
    hasher.update(&[j]);
    hasher.finalize_xof()
}


/// Function PRF: `ETA_64` bytes of SHAKE-256 over `s ‖ b`.
#[must_use]
pub(crate) fn prf<const ETA_64: usize>(s: &[u8; 32], b: u8) -> [u8; ETA_64] {
    let mut hasher = Shake256::default();
    hasher.update(s);
    hasher.update(&[b]);
    let mut reader = hasher.finalize_xof();
    let mut result = [0u8; ETA_64];
    reader.read(&mut result);
    result
}


/// Function KDF: SHAKE-256 over the concatenated inputs, output-length chosen
/// by the caller's buffer.
pub(crate) fn kdf(parts: &[&[u8]], out: &mut [u8]) {
    let mut hasher = Shake256::default();
    parts.iter().for_each(|p| hasher.update(p));
    let mut reader = hasher.finalize_xof();
    reader.read(out);
}


/// `Compress_d`: x → round(x·2^d / q) mod 2^d, rounding half away from zero.
///
/// The division by q is a multiply by a precomputed ceiling of 2^36/q; exact
/// for the operand range (x < q, d ≤ 12).
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn compress_vector(d: u32, inout: &mut [Z]) {
    const M: u32 = (((1u64 << 36) + Q as u64 - 1) / Q as u64) as u32;
    for x in &mut *inout {
        let y = (x.get_u32() << d) + (Q >> 1);
        let quot = (u64::from(y) * u64::from(M)) >> 36;
        x.set_u16((quot as u16) & ((1u16 << d) - 1));
    }
}


/// `Decompress_d`: y → round(y·q / 2^d), rounding half away from zero. Output
/// is in `[0, q)`; lossy inverse of `Compress_d`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn decompress_vector(d: u32, inout: &mut [Z]) {
    for y in &mut *inout {
        let qy = Q * y.get_u32() + (1 << (d - 1));
        y.set_u16((qy >> d) as u16);
    }
}
