//! Encoding a bitstring message into a ring element and back.
//!
//! [`encode`] turns a byte slice into a length-`n` coefficient vector whose
//! entries are each `0` or `floor(q/2)` (rounded half up when `q` is odd);
//! [`decode`] reverses it by centering each coefficient into
//! `(-q/2, q/2]` before thresholding against `q/4`.

use crate::errors::Error;

/// Interprets `message` as a big-endian bit stream (each byte's bits
/// most-significant-first), takes the first `n` bits — zero-padding on the
/// right if the stream is shorter, truncating if longer — and scales each
/// bit by `round(q/2)`.
pub fn encode(message: &[u8], q: i64, n: usize) -> Result<Vec<i64>, Error> {
    if q <= 0 || n == 0 {
        return Err(Error::ArgumentError("q and n must be positive".to_string()));
    }

    let scale = (q + 1) / 2;
    let mut coeffs = vec![0i64; n];

    'bits: for (byte_idx, &byte) in message.iter().enumerate() {
        for bit_idx in 0..8 {
            let pos = byte_idx * 8 + bit_idx;
            if pos >= n {
                break 'bits;
            }
            let bit = (byte >> (7 - bit_idx)) & 1;
            coeffs[pos] = bit as i64 * scale;
        }
    }

    Ok(coeffs)
}

/// Centers each of `poly`'s coefficients into `(-q/2, q/2]`, thresholds
/// against `q/4` (ties round to `1`), and packs the resulting bits
/// big-endian into bytes. A trailing partial byte, if any, is dropped: if
/// `poly.len()` is not a multiple of 8, only `floor(n/8)` bytes come out.
pub fn decode(poly: &[i64], q: i64) -> Result<Vec<u8>, Error> {
    if q <= 0 {
        return Err(Error::ArgumentError("q must be positive".to_string()));
    }

    let bits: Vec<u8> = poly
        .iter()
        .map(|&c| {
            let centered = if c > q / 2 { c - q } else { c };
            if centered.abs() * 4 >= q {
                1
            } else {
                0
            }
        })
        .collect();

    let n_bytes = bits.len() / 8;
    let mut bytes = vec![0u8; n_bytes];
    for (byte_idx, out) in bytes.iter_mut().enumerate() {
        let mut byte = 0u8;
        for bit_idx in 0..8 {
            byte |= bits[byte_idx * 8 + bit_idx] << (7 - bit_idx);
        }
        *out = byte;
    }

    Ok(bytes)
}
