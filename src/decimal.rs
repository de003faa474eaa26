//! Arbitrary-precision decimal: significand × 10^exponent.
//!
//! Both fields are big integers. Values are kept normalized: trailing
//! decimal zeros of the significand are stripped into the exponent, and
//! zero is `(0, 0)`. Equality is field equality on the normalized form.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::Error;
use crate::float16::Float16;
use crate::integer::BigInt;
use crate::limb::Limb;

// 5^k for k <= 24; every finite binary16 is m * 2^e with |e| <= 24, and
// 2^-e = 5^-e * 10^-e for negative e.
const POW5: [u64; 25] = [
    1,
    5,
    25,
    125,
    625,
    3125,
    15625,
    78125,
    390625,
    1953125,
    9765625,
    48828125,
    244140625,
    1220703125,
    6103515625,
    30517578125,
    152587890625,
    762939453125,
    3814697265625,
    19073486328125,
    95367431640625,
    476837158203125,
    2384185791015625,
    11920928955078125,
    59604644775390625,
];

/// Decimal number `significand * 10^exponent`, kept normalized.
#[derive(Clone, Debug, Hash)]
pub struct Decimal<L: Limb = u64, const N: usize = 1> {
    significand: BigInt<L, N>,
    exponent: BigInt<L, N>,
}

impl<L: Limb, const N: usize> Decimal<L, N> {
    pub fn zero() -> Self {
        Self { significand: BigInt::zero(), exponent: BigInt::zero() }
    }

    pub fn is_zero(&self) -> bool {
        self.significand.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.significand.is_negative()
    }

    pub fn signum(&self) -> i32 {
        self.significand.signum()
    }

    pub fn significand(&self) -> &BigInt<L, N> {
        &self.significand
    }

    pub fn exponent(&self) -> &BigInt<L, N> {
        &self.exponent
    }

    /// Both fields in the packed inline layout.
    pub fn is_inplaced(&self) -> bool {
        self.significand.is_inplaced() && self.exponent.is_inplaced()
    }

    /// Build from a significand and a decimal exponent, normalizing.
    pub fn from_parts(significand: BigInt<L, N>, exponent: BigInt<L, N>) -> Self {
        if significand.is_zero() {
            return Self::zero();
        }
        let mut sig = significand;
        let mut exp = exponent;
        let ten = BigInt::<L, N>::from(10u8);
        loop {
            let (q, r) = match sig.div_rem(&ten) {
                Ok(qr) => qr,
                Err(_) => break,
            };
            if !r.is_zero() {
                break;
            }
            sig = q;
            exp += 1;
        }
        Self { significand: sig, exponent: exp }
    }

    fn exponent_i64_saturating(&self) -> i64 {
        if self.exponent.bits() <= 62 {
            self.exponent.as_i64()
        } else if self.exponent.is_negative() {
            i64::MIN
        } else {
            i64::MAX
        }
    }

    fn exponent_i32(&self) -> Option<i32> {
        if self.exponent.bits() <= 31 { Some(self.exponent.as_i32()) } else { None }
    }

    // ------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------

    /// Parse a decoded decimal string `±d*[.d*][eE±d+]`. Trailing zero
    /// digits are stripped into the exponent.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let bytes = s.as_bytes();
        let mut i = 0;
        let negative = match bytes.first() {
            Some(b'-') => {
                i += 1;
                true
            }
            Some(b'+') => {
                i += 1;
                false
            }
            _ => false,
        };

        let mut digits = String::new();
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            digits.push(bytes[i] as char);
            i += 1;
        }
        let mut frac_len: i64 = 0;
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                digits.push(bytes[i] as char);
                frac_len += 1;
                i += 1;
            }
        }
        if digits.is_empty() {
            return Err(Error::InvalidArgument("malformed decimal string"));
        }

        let mut exp: i64 = 0;
        if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            i += 1;
            let start = i;
            if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
                i += 1;
            }
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            exp = s[start..i]
                .parse::<i64>()
                .map_err(|_| Error::InvalidArgument("malformed decimal exponent"))?;
        }
        if i != bytes.len() {
            return Err(Error::InvalidArgument("malformed decimal string"));
        }

        exp -= frac_len;
        while digits.ends_with('0') && !digits.is_empty() {
            digits.pop();
            exp += 1;
        }
        if digits.is_empty() {
            return Ok(Self::zero());
        }

        let mut sig = BigInt::<L, N>::from_str_radix(&digits, 10)?;
        if sig.is_zero() {
            return Ok(Self::zero());
        }
        if negative {
            sig.negate();
        }
        Ok(Self { significand: sig, exponent: BigInt::from(exp) })
    }

    // ------------------------------------------------------------------
    // Conversions out
    // ------------------------------------------------------------------

    /// Scale the significand by the exponent into a big integer,
    /// truncating toward zero for negative exponents. An exponent too
    /// large to apply is `Overflow`; one too small yields zero.
    pub fn to_bigint(&self) -> Result<BigInt<L, N>, Error> {
        if self.exponent.is_zero() {
            return Ok(self.significand.clone());
        }
        let Some(e) = self.exponent_i32() else {
            if self.exponent.is_negative() {
                return Ok(BigInt::zero());
            }
            return Err(Error::Overflow("decimal exponent is too large"));
        };
        let scale = BigInt::<L, N>::from(10u8).pow(e.unsigned_abs());
        if e > 0 {
            Ok(&self.significand * &scale)
        } else {
            Ok(&self.significand / &scale)
        }
    }

    pub fn to_i64(&self) -> Result<i64, Error> {
        Ok(self.to_bigint()?.as_i64())
    }

    pub fn to_i32(&self) -> Result<i32, Error> {
        Ok(self.to_bigint()?.as_i32())
    }

    pub fn to_i16(&self) -> Result<i16, Error> {
        Ok(self.to_bigint()?.as_i16())
    }

    pub fn to_u64(&self) -> Result<u64, Error> {
        Ok(self.to_bigint()?.as_u64())
    }

    pub fn to_i128(&self) -> Result<i128, Error> {
        Ok(self.to_bigint()?.as_i128())
    }

    pub fn to_f64(&self) -> f64 {
        let e = self.exponent_i32().unwrap_or(if self.exponent.is_negative() {
            i32::MIN
        } else {
            i32::MAX
        });
        self.significand.to_f64() * 10f64.powi(e)
    }

    pub fn to_f32(&self) -> f32 {
        self.to_f64() as f32
    }

    // ------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------

    fn pow10(k: u32) -> BigInt<L, N> {
        BigInt::<L, N>::from(10u8).pow(k)
    }

    fn exponent_diff_u32(diff: &BigInt<L, N>) -> u32 {
        if diff.bits() > 32 {
            u32::MAX
        } else {
            u32::try_from(diff.abs().as_u128()).unwrap_or(u32::MAX)
        }
    }

    fn add_core(l: &Self, r: &Self, subtract: bool) -> Self {
        let rsig = if subtract { -&r.significand } else { r.significand.clone() };
        if l.is_zero() {
            return Self::from_parts(rsig, r.exponent.clone());
        }
        if rsig.is_zero() {
            return l.clone();
        }
        let diff = &l.exponent - &r.exponent;
        if diff.is_zero() {
            return Self::from_parts(&l.significand + &rsig, l.exponent.clone());
        }
        if diff.is_negative() {
            let scaled = &rsig * &Self::pow10(Self::exponent_diff_u32(&diff));
            Self::from_parts(&l.significand + &scaled, l.exponent.clone())
        } else {
            let scaled = &l.significand * &Self::pow10(Self::exponent_diff_u32(&diff));
            Self::from_parts(&scaled + &rsig, r.exponent.clone())
        }
    }

    // ------------------------------------------------------------------
    // Ordering
    // ------------------------------------------------------------------

    /// Ordering of `a * 10^d` against `b` for positive magnitudes and
    /// `d > 0`, computed by scaling `b` down limb-digit chunks at a time
    /// instead of materializing an oversized integer.
    fn cmp_scaled(a: &BigInt<L, N>, d: &BigInt<L, N>, b: &BigInt<L, N>) -> Ordering {
        let chunk = BigInt::<L, N>::from(L::DIGITS10);
        let chunk_scale = Self::pow10(L::DIGITS10);
        let mut b_cur = b.clone();
        let mut d_rem = d.clone();
        let mut sticky = false;
        loop {
            if d_rem <= chunk {
                let k = d_rem.as_u32();
                let (q, rem) = match b_cur.div_rem(&Self::pow10(k)) {
                    Ok(qr) => qr,
                    Err(_) => return Ordering::Equal,
                };
                sticky |= !rem.is_zero();
                return match a.cmp(&q) {
                    Ordering::Equal if sticky => Ordering::Less,
                    o => o,
                };
            }
            let (q, rem) = match b_cur.div_rem(&chunk_scale) {
                Ok(qr) => qr,
                Err(_) => return Ordering::Equal,
            };
            sticky |= !rem.is_zero();
            b_cur = q;
            d_rem -= &chunk;
            if b_cur < *a {
                // further scaling only shrinks b's quotient
                return Ordering::Greater;
            }
        }
    }

    fn cmp_abs(l: &Self, r: &Self) -> Ordering {
        let la = l.significand.abs();
        let ra = r.significand.abs();
        let diff = &l.exponent - &r.exponent;
        if diff.is_zero() {
            return la.cmp(&ra);
        }
        if diff.is_negative() {
            Self::cmp_scaled(&ra, &-&diff, &la).reverse()
        } else {
            Self::cmp_scaled(&la, &diff, &ra)
        }
    }
}

// ============================================================================
// Construction
// ============================================================================

macro_rules! decimal_from_int {
    ($($t:ty)*) => {$(
        impl<L: Limb, const N: usize> From<$t> for Decimal<L, N> {
            fn from(v: $t) -> Self {
                Self::from_parts(BigInt::from(v), BigInt::zero())
            }
        }
    )*};
}

decimal_from_int!(i8 i16 i32 i64 i128 u8 u16 u32 u64 u128);

impl<L: Limb, const N: usize> From<BigInt<L, N>> for Decimal<L, N> {
    fn from(v: BigInt<L, N>) -> Self {
        Self::from_parts(v, BigInt::zero())
    }
}

impl<L: Limb, const N: usize> TryFrom<f64> for Decimal<L, N> {
    type Error = Error;

    /// Shortest round-trippable decimal of a finite `f64`, trailing
    /// zeros removed.
    fn try_from(v: f64) -> Result<Self, Error> {
        if !v.is_finite() {
            return Err(Error::InvalidArgument("floating-point value must be finite"));
        }
        if v == 0.0 {
            return Ok(Self::zero());
        }
        let mut buf = dtoa::Buffer::new();
        Self::parse(buf.format(v))
    }
}

impl<L: Limb, const N: usize> TryFrom<f32> for Decimal<L, N> {
    type Error = Error;

    fn try_from(v: f32) -> Result<Self, Error> {
        if !v.is_finite() {
            return Err(Error::InvalidArgument("floating-point value must be finite"));
        }
        if v == 0.0 {
            return Ok(Self::zero());
        }
        let mut buf = dtoa::Buffer::new();
        Self::parse(buf.format(v))
    }
}

impl<L: Limb, const N: usize> TryFrom<Float16> for Decimal<L, N> {
    type Error = Error;

    /// Exact decimal expansion of a finite binary16 value.
    fn try_from(v: Float16) -> Result<Self, Error> {
        let bits = v.to_bits();
        let negative = bits & 0x8000 != 0;
        let exp_bits = (bits >> 10) & 0x1f;
        let mant = bits & 0x3ff;

        if exp_bits == 0x1f {
            return Err(Error::InvalidArgument("floating-point value must be finite"));
        }
        if exp_bits == 0 && mant == 0 {
            return Ok(Self::zero());
        }

        let (mut sig, mut bexp): (u32, i32) = if exp_bits == 0 {
            (mant as u32, -24)
        } else {
            ((1024 + mant) as u32, exp_bits as i32 - 25)
        };
        while sig & 1 == 0 {
            sig >>= 1;
            bexp += 1;
        }

        let mut dexp: i64 = 0;
        let mut wide = sig as u128;
        if bexp >= 0 {
            wide <<= bexp as u32;
        } else {
            dexp = bexp as i64;
            wide *= POW5[(-bexp) as usize] as u128;
        }
        while wide % 10 == 0 {
            wide /= 10;
            dexp += 1;
        }

        let mut sig = BigInt::<L, N>::from(wide);
        if negative {
            sig.negate();
        }
        Ok(Self { significand: sig, exponent: BigInt::from(dexp) })
    }
}

impl<L: Limb, const N: usize> FromStr for Decimal<L, N> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::parse(s)
    }
}

impl<L: Limb, const N: usize> Default for Decimal<L, N> {
    fn default() -> Self {
        Self::zero()
    }
}

// ============================================================================
// Comparison
// ============================================================================

impl<L: Limb, const N: usize> PartialEq for Decimal<L, N> {
    fn eq(&self, other: &Self) -> bool {
        self.significand == other.significand && self.exponent == other.exponent
    }
}

impl<L: Limb, const N: usize> Eq for Decimal<L, N> {}

impl<L: Limb, const N: usize> PartialOrd for Decimal<L, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<L: Limb, const N: usize> Ord for Decimal<L, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        let ls = self.signum();
        let rs = other.signum();
        if ls != rs {
            return ls.cmp(&rs);
        }
        if ls == 0 {
            return Ordering::Equal;
        }
        let mag = Self::cmp_abs(self, other);
        if ls < 0 { mag.reverse() } else { mag }
    }
}

macro_rules! decimal_cmp_int {
    ($($t:ty)*) => {$(
        impl<L: Limb, const N: usize> PartialEq<$t> for Decimal<L, N> {
            fn eq(&self, other: &$t) -> bool {
                *self == Decimal::<L, N>::from(*other)
            }
        }

        impl<L: Limb, const N: usize> PartialEq<Decimal<L, N>> for $t {
            fn eq(&self, other: &Decimal<L, N>) -> bool {
                Decimal::<L, N>::from(*self) == *other
            }
        }

        impl<L: Limb, const N: usize> PartialOrd<$t> for Decimal<L, N> {
            fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                Some(self.cmp(&Decimal::<L, N>::from(*other)))
            }
        }

        impl<L: Limb, const N: usize> PartialOrd<Decimal<L, N>> for $t {
            fn partial_cmp(&self, other: &Decimal<L, N>) -> Option<Ordering> {
                Some(Decimal::<L, N>::from(*self).cmp(other))
            }
        }
    )*};
}

decimal_cmp_int!(i32 i64 u32 u64);

// ============================================================================
// Operators
// ============================================================================

impl<L: Limb, const N: usize> Neg for Decimal<L, N> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.significand.negate();
        self
    }
}

impl<L: Limb, const N: usize> Neg for &Decimal<L, N> {
    type Output = Decimal<L, N>;

    fn neg(self) -> Decimal<L, N> {
        -self.clone()
    }
}

macro_rules! decimal_binop {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $subtract:expr) => {
        impl<L: Limb, const N: usize> $trait for &Decimal<L, N> {
            type Output = Decimal<L, N>;

            fn $method(self, rhs: &Decimal<L, N>) -> Decimal<L, N> {
                Decimal::add_core(self, rhs, $subtract)
            }
        }

        impl<L: Limb, const N: usize> $trait for Decimal<L, N> {
            type Output = Decimal<L, N>;

            fn $method(self, rhs: Decimal<L, N>) -> Decimal<L, N> {
                Decimal::add_core(&self, &rhs, $subtract)
            }
        }

        impl<L: Limb, const N: usize> $trait<&Decimal<L, N>> for Decimal<L, N> {
            type Output = Decimal<L, N>;

            fn $method(self, rhs: &Decimal<L, N>) -> Decimal<L, N> {
                Decimal::add_core(&self, rhs, $subtract)
            }
        }

        impl<L: Limb, const N: usize> $assign_trait<&Decimal<L, N>> for Decimal<L, N> {
            fn $assign_method(&mut self, rhs: &Decimal<L, N>) {
                *self = Decimal::add_core(self, rhs, $subtract);
            }
        }

        impl<L: Limb, const N: usize> $assign_trait<Decimal<L, N>> for Decimal<L, N> {
            fn $assign_method(&mut self, rhs: Decimal<L, N>) {
                *self = Decimal::add_core(self, &rhs, $subtract);
            }
        }
    };
}

decimal_binop!(Add, add, AddAssign, add_assign, false);
decimal_binop!(Sub, sub, SubAssign, sub_assign, true);

// ============================================================================
// Formatting
// ============================================================================

impl<L: Limb, const N: usize> fmt::Display for Decimal<L, N> {
    /// Canonical decimal string: plain notation, a `.` only when the
    /// exponent is negative, left zero padding when the integer part
    /// would otherwise be empty. Never scientific, never a trailing `.`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let negative = self.is_negative();
        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&self.significand.abs().to_string_radix(10));
        let e = self.exponent_i64_saturating();
        if e >= 0 {
            for _ in 0..e {
                out.push('0');
            }
        } else {
            let pos = if negative { 1usize } else { 0 };
            let zpad = (-e) - (out.len() as i64 - pos as i64) + 1;
            if zpad > 0 {
                out.insert_str(pos, &"0".repeat(zpad as usize));
            }
            let point = (out.len() as i64 + e) as usize;
            out.insert(point, '.');
        }
        f.write_str(&out)
    }
}
