//! Algorithm S (Knuth TAOCP 4.3.1): subtraction of multi-precision magnitudes.

use super::{cmp_magnitude, trim};
use crate::limb;
use std::cmp::Ordering;

/// Subtract `v` from `u`, where `u >= v` by magnitude. Producing a negative
/// magnitude is a contract violation in the unsigned kernel; callers (the
/// signed façade) are responsible for ordering the operands and fixing up
/// the sign.
pub(crate) fn sub_magnitudes(u: &[u32], v: &[u32]) -> Vec<u32> {
    debug_assert!(
        cmp_magnitude(u, v) != Ordering::Less,
        "subtraction result would be negative"
    );
    let n = u.len();
    let mut w = Vec::with_capacity(n);
    let mut borrow = false;
    for j in 0..n {
        let b = v.get(j).copied().unwrap_or(0);
        let (diff, borrow_out) = limb::sub_with_borrow(u[j], b, borrow);
        w.push(diff);
        borrow = borrow_out;
    }
    debug_assert!(!borrow, "residual borrow after subtraction");
    trim(w)
}
