//! Arbitrary-precision signed integer arithmetic.
//!
//! [`BigInt`] pairs a sign with a normalized little-endian limb magnitude
//! and dispatches each operation to the unsigned kernels in [`magnitude`],
//! fixing up signs per the table in each method's doc comment. Values are
//! immutable; every operation returns a fresh [`BigInt`].

mod limb;
mod magnitude;

use std::cmp::Ordering;
use std::fmt;

use magnitude::{add_magnitudes, cmp_magnitude, divrem_magnitudes, mul_magnitudes, sub_magnitudes};

/// Errors returned at the public construction boundary. Everything deeper
/// in the kernel treats a violated precondition as a caller bug and
/// panics instead (see the `debug_assert!`s throughout `magnitude`).
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum BigIntError {
    /// [`BigInt::from_decimal`] was given text that isn't `-?[0-9]+`.
    #[error("invalid decimal literal: {0:?}")]
    InvalidDecimal(String),
}

/// The sign of a [`BigInt`]. Zero is always [`Sign::NonNegative`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    NonNegative,
    Negative,
}

impl Sign {
    fn flip(self) -> Sign {
        match self {
            Sign::NonNegative => Sign::Negative,
            Sign::Negative => Sign::NonNegative,
        }
    }

    fn xor(self, other: Sign) -> Sign {
        if self == other {
            Sign::NonNegative
        } else {
            Sign::Negative
        }
    }
}

/// An arbitrary-precision signed integer.
#[derive(Debug, Clone)]
pub struct BigInt {
    sign: Sign,
    magnitude: Vec<u32>,
}

impl BigInt {
    /// Construct from an explicit little-endian limb sequence and sign.
    /// Trims trailing zero limbs; if the trimmed magnitude is empty,
    /// forces the sign to [`Sign::NonNegative`] (zero has no sign).
    pub fn from_limbs(limbs: Vec<u32>, sign: Sign) -> BigInt {
        let magnitude = magnitude::trim(limbs);
        let sign = if magnitude.is_empty() { Sign::NonNegative } else { sign };
        BigInt { sign, magnitude }
    }

    /// Parse a decimal literal matching `-?[0-9]+`. An empty string or a
    /// lone `-` is rejected.
    ///
    /// ```
    /// # use bigint::BigInt;
    /// let v = BigInt::from_decimal("-42").unwrap();
    /// assert_eq!(v.to_decimal(), "-42");
    /// ```
    pub fn from_decimal(text: &str) -> Result<BigInt, BigIntError> {
        let (sign, digits) = match text.strip_prefix('-') {
            Some(rest) => (Sign::Negative, rest),
            None => (Sign::NonNegative, text),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BigIntError::InvalidDecimal(text.to_string()));
        }
        log::trace!("parsed decimal literal of {} digits", digits.len());
        let magnitude = magnitude::magnitude_from_decimal(digits);
        let sign = if magnitude.is_empty() { Sign::NonNegative } else { sign };
        Ok(BigInt { sign, magnitude })
    }

    /// Render as a canonical decimal string: no leading zeros, `0` has no
    /// sign, negatives are prefixed `-`.
    ///
    /// ```
    /// # use bigint::{BigInt, Sign};
    /// assert_eq!(BigInt::from_limbs(vec![], Sign::NonNegative).to_decimal(), "0");
    /// ```
    pub fn to_decimal(&self) -> String {
        let digits = magnitude::magnitude_to_decimal(&self.magnitude);
        match self.sign {
            Sign::Negative => format!("-{digits}"),
            Sign::NonNegative => digits,
        }
    }

    /// An upper bound (not necessarily tight) on the length of
    /// [`BigInt::to_decimal`]'s output, for callers sizing buffers.
    pub fn max_decimal_length(&self) -> usize {
        if self.magnitude.is_empty() {
            return 1;
        }
        10 * self.magnitude.len() + (self.sign == Sign::Negative) as usize
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_empty()
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// `x + y`.
    pub fn add(&self, other: &BigInt) -> BigInt {
        match (self.sign, other.sign) {
            (Sign::Negative, Sign::Negative) => {
                BigInt::from_limbs(add_magnitudes(&self.magnitude, &other.magnitude), Sign::Negative)
            }
            (Sign::NonNegative, Sign::NonNegative) => {
                BigInt::from_limbs(add_magnitudes(&self.magnitude, &other.magnitude), Sign::NonNegative)
            }
            (Sign::Negative, Sign::NonNegative) => sub_with_sign(&other.magnitude, &self.magnitude),
            (Sign::NonNegative, Sign::Negative) => sub_with_sign(&self.magnitude, &other.magnitude),
        }
    }

    /// `x - y`.
    pub fn sub(&self, other: &BigInt) -> BigInt {
        match (self.sign, other.sign) {
            (Sign::Negative, Sign::Negative) => sub_with_sign(&other.magnitude, &self.magnitude),
            (Sign::Negative, Sign::NonNegative) => {
                BigInt::from_limbs(add_magnitudes(&self.magnitude, &other.magnitude), Sign::Negative)
            }
            (Sign::NonNegative, Sign::Negative) => {
                BigInt::from_limbs(add_magnitudes(&self.magnitude, &other.magnitude), Sign::NonNegative)
            }
            (Sign::NonNegative, Sign::NonNegative) => sub_with_sign(&self.magnitude, &other.magnitude),
        }
    }

    /// `x * y`.
    pub fn mul(&self, other: &BigInt) -> BigInt {
        let product = mul_magnitudes(&self.magnitude, &other.magnitude);
        BigInt::from_limbs(product, self.sign.xor(other.sign))
    }

    /// `x / y`, truncating toward zero. `y` must be non-zero: this is a
    /// contract violation (the calculator front-end checks for it before
    /// ever calling into the kernel; see `src/bin/bigcalc.rs`).
    pub fn div(&self, other: &BigInt) -> BigInt {
        debug_assert!(!other.is_zero(), "division by zero");
        if cmp_magnitude(&self.magnitude, &other.magnitude) == Ordering::Less {
            return BigInt::from_limbs(Vec::new(), Sign::NonNegative);
        }
        let (quotient, _) = divrem_magnitudes(&self.magnitude, &other.magnitude);
        BigInt::from_limbs(quotient, self.sign.xor(other.sign))
    }

    /// `x rem y`, carrying the sign of the dividend `x`. `y` must be
    /// non-zero (same contract as [`BigInt::div`]).
    pub fn rem(&self, other: &BigInt) -> BigInt {
        debug_assert!(!other.is_zero(), "division by zero");
        if cmp_magnitude(&self.magnitude, &other.magnitude) == Ordering::Less {
            return self.clone();
        }
        let (_, remainder) = divrem_magnitudes(&self.magnitude, &other.magnitude);
        BigInt::from_limbs(remainder, self.sign)
    }

    /// `-x`.
    pub fn neg(&self) -> BigInt {
        BigInt::from_limbs(self.magnitude.clone(), self.sign.flip())
    }

    /// Three-way comparison: -1, 0, or 1.
    pub fn cmp_value(&self, other: &BigInt) -> i32 {
        match self.partial_cmp(other).unwrap() {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }
}

/// `sub_magnitudes` requires `u >= v`; swap and flip the sign otherwise,
/// inlining the one-level recursive swap `original_source/bigint.c` uses.
fn sub_with_sign(u: &[u32], v: &[u32]) -> BigInt {
    match cmp_magnitude(u, v) {
        Ordering::Less => BigInt::from_limbs(sub_magnitudes(v, u), Sign::Negative),
        _ => BigInt::from_limbs(sub_magnitudes(u, v), Sign::NonNegative),
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal())
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign && self.magnitude == other.magnitude
    }
}

impl Eq for BigInt {}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign, other.sign) {
            (Sign::Negative, Sign::NonNegative) => Ordering::Less,
            (Sign::NonNegative, Sign::Negative) => Ordering::Greater,
            (Sign::NonNegative, Sign::NonNegative) => cmp_magnitude(&self.magnitude, &other.magnitude),
            (Sign::Negative, Sign::Negative) => cmp_magnitude(&other.magnitude, &self.magnitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn big(n: i64) -> BigInt {
        let sign = if n < 0 { Sign::Negative } else { Sign::NonNegative };
        let magnitude = n.unsigned_abs();
        let limbs = vec![magnitude as u32, (magnitude >> 32) as u32];
        BigInt::from_limbs(limbs, sign)
    }

    #[test]
    fn construct_from_limbs_normalizes_zero_sign() {
        let v = BigInt::from_limbs(vec![0, 0], Sign::Negative);
        assert_eq!(v.sign, Sign::NonNegative);
        assert!(v.magnitude.is_empty());
    }

    #[test]
    fn from_decimal_rejects_empty_and_lone_minus() {
        assert!(BigInt::from_decimal("").is_err());
        assert!(BigInt::from_decimal("-").is_err());
        assert!(BigInt::from_decimal("12a").is_err());
    }

    #[test]
    fn scenario_addition() {
        let x = BigInt::from_decimal("123456789").unwrap();
        let y = BigInt::from_decimal("987654321").unwrap();
        assert_eq!(x.add(&y).to_decimal(), "1111111110");
    }

    #[test]
    fn scenario_large_multiplication() {
        let x = BigInt::from_decimal("1000000000000000000").unwrap();
        let y = BigInt::from_decimal("1000000000000000000").unwrap();
        assert_eq!(x.mul(&y).to_decimal(), "1000000000000000000000000000000000000");
    }

    #[test]
    fn scenario_negative_sub_and_add() {
        let neg100 = BigInt::from_decimal("-100").unwrap();
        let neg30 = BigInt::from_decimal("-30").unwrap();
        let pos30 = BigInt::from_decimal("30").unwrap();
        let pos100 = BigInt::from_decimal("100").unwrap();
        assert_eq!(neg100.sub(&neg30).to_decimal(), "-70");
        assert_eq!(neg100.add(&pos30).to_decimal(), "-70");
        assert_eq!(pos100.sub(&pos30).to_decimal(), "70");
    }

    #[test]
    fn scenario_power_of_two_division() {
        let x = BigInt::from_decimal("340282366920938463463374607431768211456").unwrap();
        let y = BigInt::from_decimal("4294967296").unwrap();
        assert_eq!(x.div(&y).to_decimal(), "79228162514264337593543950336");
        assert_eq!(x.rem(&y).to_decimal(), "0");
    }

    #[test]
    fn scenario_remainder_follows_dividend_sign() {
        let x = BigInt::from_decimal("100").unwrap();
        let y = BigInt::from_decimal("-7").unwrap();
        assert_eq!(x.rem(&y).to_decimal(), "2");
    }

    #[test]
    fn scenario_zero_prints_as_zero() {
        let zero = BigInt::from_decimal("0").unwrap();
        let neg_zero = BigInt::from_limbs(vec![], Sign::Negative);
        assert_eq!(zero.to_decimal(), "0");
        assert_eq!(zero, neg_zero);
    }

    #[test]
    fn divide_short_circuits_when_dividend_smaller() {
        let x = BigInt::from_decimal("5").unwrap();
        let y = BigInt::from_decimal("1000").unwrap();
        assert_eq!(x.div(&y).to_decimal(), "0");
        assert_eq!(x.rem(&y), x);
    }

    #[quickcheck]
    fn decimal_roundtrip(n: i64) -> bool {
        let v = big(n);
        BigInt::from_decimal(&v.to_decimal()).unwrap() == v
    }

    #[quickcheck]
    fn additive_inverse(n: i64) -> bool {
        let v = big(n);
        v.add(&v.neg()).is_zero() && v.neg().neg() == v
    }

    #[quickcheck]
    fn add_commutes(a: i64, b: i64) -> bool {
        big(a).add(&big(b)) == big(b).add(&big(a))
    }

    #[quickcheck]
    fn mul_commutes(a: i64, b: i64) -> bool {
        big(a).mul(&big(b)) == big(b).mul(&big(a))
    }

    #[quickcheck]
    fn distributivity(a: i64, b: i64, c: i64) -> bool {
        let (x, y, z) = (big(a), big(b), big(c));
        x.mul(&y.add(&z)) == x.mul(&y).add(&x.mul(&z))
    }

    #[quickcheck]
    fn division_identity(a: i64, b: i64) -> bool {
        if b == 0 {
            return true;
        }
        let (x, y) = (big(a), big(b));
        let q = x.div(&y);
        let r = x.rem(&y);
        q.mul(&y).add(&r) == x && cmp_magnitude(&r.magnitude, &y.magnitude) == Ordering::Less
    }

    #[quickcheck]
    fn order_consistent_with_decimal(a: i64, b: i64) -> bool {
        let (x, y) = (big(a), big(b));
        x.cmp(&y) == a.cmp(&b)
    }
}
