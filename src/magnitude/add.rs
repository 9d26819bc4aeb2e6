//! Algorithm A (Knuth TAOCP 4.3.1): addition of multi-precision magnitudes.

use super::trim;
use crate::limb;

/// Add two magnitudes, producing a normalized sum.
///
/// The shorter operand is treated as zero-padded to the length of the
/// longer one, per spec: Algorithm A proper iterates over equal-length
/// `n`-limb operands and emits an `(n + 1)`-limb result, with the padding
/// folded into the indexing here instead of materialized as a copy.
pub(crate) fn add_magnitudes(u: &[u32], v: &[u32]) -> Vec<u32> {
    let n = u.len().max(v.len());
    let mut w = Vec::with_capacity(n + 1);
    let mut carry = false;
    for j in 0..n {
        let a = u.get(j).copied().unwrap_or(0);
        let b = v.get(j).copied().unwrap_or(0);
        let (sum, carry_out) = limb::add_with_carry(a, b, carry);
        w.push(sum);
        carry = carry_out;
    }
    w.push(carry as u32);
    trim(w)
}
