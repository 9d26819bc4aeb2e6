//! Decimal <-> magnitude conversion.
//!
//! String to magnitude accumulates chunks of up to 9 decimal digits (since
//! 10^9 < 2^32) via a scalar multiply-add, Algorithm M specialized to a
//! one-limb multiplier with an additive constant. Magnitude to string
//! repeatedly extracts four decimal digits at a time via short division by
//! 10^4 on a half-limb scratch copy.

use super::div::{short_division, to_half_limbs};
use crate::limb;

/// `u := u * x + y`, Algorithm M specialized to a scalar multiplier with an
/// additive constant. Sweeps low to high, carry seeded with `y`.
fn multiply_add(u: &mut Vec<u32>, x: u32, y: u32) {
    let mut k = y;
    for limb in u.iter_mut() {
        let (hi, lo) = limb::widening_mul(*limb, x);
        let (lo_plus_k, carry) = lo.overflowing_add(k);
        *limb = lo_plus_k;
        k = hi.wrapping_add(carry as u32);
    }
    if k != 0 {
        u.push(k);
    }
}

/// The powers of ten used by [`multiply_add`] chunking, indexed by chunk
/// length in decimals (1..=9). A full 9-digit chunk uses `10^9`; a
/// terminating partial chunk of `k` digits (1 <= k <= 8) uses `10^k`.
const POW10: [u32; 10] = [
    1,          // unused (index 0)
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// Parse a non-empty run of ASCII decimal digits into a normalized
/// magnitude. Caller (the signed façade) has already validated the string
/// matches `[0-9]+`.
pub(crate) fn magnitude_from_decimal(digits: &str) -> Vec<u32> {
    debug_assert!(!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()));

    let mut u: Vec<u32> = Vec::new();
    let n = digits.len();
    let mut chunk: u32 = 0;
    let mut chunk_len = 0usize;

    for (i, byte) in digits.bytes().enumerate() {
        chunk = chunk * 10 + (byte - b'0') as u32;
        chunk_len += 1;

        if chunk_len == 9 || i + 1 == n {
            let power = if chunk_len == 9 { POW10[9] } else { POW10[chunk_len] };
            multiply_add(&mut u, power, chunk);
            chunk = 0;
            chunk_len = 0;
        }
    }

    super::trim(u)
}

/// Render a normalized magnitude as a canonical decimal string (no leading
/// zeros; the empty magnitude renders as `"0"`).
pub(crate) fn magnitude_to_decimal(magnitude: &[u32]) -> String {
    if magnitude.is_empty() {
        return "0".to_string();
    }

    let mut half = to_half_limbs(magnitude);
    let mut len = half.len();
    while len > 0 && half[len - 1] == 0 {
        len -= 1;
    }

    let mut digits: Vec<u8> = Vec::new();
    while len != 0 {
        let mut r = short_division(&mut half[..len], 10_000);
        while len > 0 && half[len - 1] == 0 {
            len -= 1;
        }

        if len == 0 {
            // Most significant group: no zero-padding, but always at least
            // one digit (the group can't be zero, since the magnitude was
            // trimmed and this is its last, most significant, group).
            while r != 0 {
                digits.push(b'0' + (r % 10) as u8);
                r /= 10;
            }
        } else {
            for _ in 0..4 {
                digits.push(b'0' + (r % 10) as u8);
                r /= 10;
            }
        }
    }

    digits.reverse();
    String::from_utf8(digits).expect("digits are always ASCII")
}
