//! Public signed arbitrary-precision integer.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};
use std::str::FromStr;

use crate::error::Error;
use crate::kernels::divby1::div_by_limb;
use crate::kernels::udiv::udiv;
use crate::kernels::{self, Decomposed};
use crate::limb::Limb;
use crate::storage::{self, Repr};

/// Signed big integer with small-buffer optimization.
///
/// Magnitudes up to `N * B - 2` bits live inplaced inside the value; larger
/// magnitudes own a heap buffer. The two layouts compare, order and hash
/// identically. `N` is the inline limb budget, `L` the limb type.
#[derive(Clone, Debug)]
pub struct BigInt<L: Limb = u64, const N: usize = 1> {
    repr: Repr<L, N>,
}

/// The crate's default big integer: 64-bit limbs, one inline limb.
pub type Int = BigInt<u64, 1>;

impl<L: Limb, const N: usize> BigInt<L, N> {
    pub fn zero() -> Self {
        Self { repr: Repr::zero() }
    }

    pub fn is_zero(&self) -> bool {
        self.decompose().is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.decompose().negative
    }

    pub fn is_positive(&self) -> bool {
        let d = self.decompose();
        !d.negative && !d.is_zero()
    }

    pub fn signum(&self) -> i32 {
        let d = self.decompose();
        if d.is_zero() {
            0
        } else if d.negative {
            -1
        } else {
            1
        }
    }

    /// True when the value is stored in the packed inline layout.
    pub fn is_inplaced(&self) -> bool {
        self.repr.is_inplaced()
    }

    /// Largest value representable inplaced: `2^(N*B-2) - 1`.
    pub fn inplace_max() -> Self {
        let mut mag = vec![L::MAX; N];
        mag[N - 1] = storage::top_mag_mask::<L>();
        Self { repr: Repr::new(false, mag) }
    }

    /// Smallest value representable inplaced: `-(2^(N*B-2) - 1)`.
    pub fn inplace_min() -> Self {
        let mut mag = vec![L::MAX; N];
        mag[N - 1] = storage::top_mag_mask::<L>();
        Self { repr: Repr::new(true, mag) }
    }

    /// Construct from a little-endian magnitude view and a sign.
    pub fn from_le_limbs(negative: bool, limbs: &[L]) -> Self {
        Self { repr: Repr::new(negative, limbs.to_vec()) }
    }

    pub(crate) fn from_sign_magnitude(negative: bool, mag: Vec<L>) -> Self {
        Self { repr: Repr::new(negative, mag) }
    }

    pub(crate) fn from_kernel(negative: bool, mag: Vec<L>) -> Self {
        Self { repr: Repr::from_kernel(negative, mag) }
    }

    pub(crate) fn decompose(&self) -> Decomposed<'_, L> {
        self.repr.decompose()
    }

    /// Magnitude bit width; zero for zero.
    pub fn bits(&self) -> u64 {
        self.decompose().bits()
    }

    pub fn abs(&self) -> Self {
        let mut out = self.clone();
        if out.is_negative() {
            out.repr.negate();
        }
        out
    }

    pub fn negate(&mut self) {
        self.repr.negate();
    }

    fn from_u128_magnitude(negative: bool, mut mag: u128) -> Self {
        let mut limbs = Vec::new();
        while mag != 0 {
            limbs.push(L::from_u64_truncate(mag as u64));
            mag >>= L::BITS;
        }
        Self { repr: Repr::new(negative, limbs) }
    }

    /// Low 128 bits of the magnitude.
    fn magnitude_low_u128(&self) -> u128 {
        let d = self.decompose();
        let mut acc = 0u128;
        let mut shift = 0u32;
        for (i, &limb) in d.limbs.iter().enumerate() {
            if shift >= 128 {
                break;
            }
            let limb = if i == d.limbs.len() - 1 { limb.bitand(d.mask) } else { limb };
            acc |= (limb.as_u64() as u128) << shift;
            shift += L::BITS;
        }
        acc
    }

    /// Truncating conversion: the value modulo `2^128`, two's complement.
    pub fn as_u128(&self) -> u128 {
        let mag = self.magnitude_low_u128();
        if self.is_negative() { mag.wrapping_neg() } else { mag }
    }

    pub fn as_i128(&self) -> i128 {
        self.as_u128() as i128
    }

    pub fn as_u64(&self) -> u64 {
        self.as_u128() as u64
    }

    pub fn as_i64(&self) -> i64 {
        self.as_u128() as i64
    }

    pub fn as_u32(&self) -> u32 {
        self.as_u128() as u32
    }

    pub fn as_i32(&self) -> i32 {
        self.as_u128() as i32
    }

    pub fn as_i16(&self) -> i16 {
        self.as_u128() as i16
    }

    pub fn as_i8(&self) -> i8 {
        self.as_u128() as i8
    }

    /// Round-to-nearest-even conversion to `f64`.
    pub fn to_f64(&self) -> f64 {
        let d = self.decompose();
        let bits = d.bits();
        if bits == 0 {
            return 0.0;
        }
        let val = if bits <= 53 {
            self.magnitude_low_u128() as u64 as f64
        } else {
            let shift = bits - 53;
            let mut mant: u64 = 0;
            for pos in (shift..bits).rev() {
                mant = (mant << 1) | mag_bit(&d, pos) as u64;
            }
            let round = mag_bit(&d, shift - 1);
            let sticky = shift > 1 && mag_any_below(&d, shift - 1);
            if round && (sticky || mant & 1 == 1) {
                mant += 1;
            }
            let exp = i32::try_from(shift).unwrap_or(i32::MAX);
            (mant as f64) * 2f64.powi(exp)
        };
        if self.is_negative() { -val } else { val }
    }

    /// Binary exponentiation over `*` for a non-negative exponent.
    pub fn pow(&self, mut k: u32) -> Self {
        let mut result = Self::from(1u8);
        let mut base = self.clone();
        while k != 0 {
            if k & 1 == 1 {
                result = &result * &base;
            }
            k >>= 1;
            if k != 0 {
                base = &base * &base;
            }
        }
        result
    }

    // ------------------------------------------------------------------
    // Arithmetic cores
    // ------------------------------------------------------------------

    fn add_core(l: &Self, r: &Self, subtract: bool) -> Self {
        let ld = l.decompose();
        let rd0 = r.decompose();
        let rd = if subtract { rd0.with_sign(!rd0.negative && !rd0.is_zero()) } else { rd0 };

        // inplaced fast path: both magnitudes fit one limb
        if ld.limbs.len() <= 1 && rd.limbs.len() <= 1 {
            let a = ld.top();
            let b = rd.top();
            if ld.negative == rd.negative || rd.is_zero() || ld.is_zero() {
                let negative = if ld.is_zero() { rd.negative } else { ld.negative };
                let (s, c) = L::add_cc(a, b, false);
                if !c {
                    return Self::from_sign_magnitude(negative, vec![s]);
                }
                return Self::from_sign_magnitude(negative, vec![s, L::ONE]);
            }
            return match a.cmp(&b) {
                Ordering::Equal => Self::zero(),
                Ordering::Greater => {
                    let (m, _) = L::sub_bb(a, b, false);
                    Self::from_sign_magnitude(ld.negative, vec![m])
                }
                Ordering::Less => {
                    let (m, _) = L::sub_bb(b, a, false);
                    Self::from_sign_magnitude(rd.negative, vec![m])
                }
            };
        }

        let (mag, negative) = kernels::add_signed(&ld, &rd);
        Self::from_kernel(negative, mag)
    }

    fn mul_core(l: &Self, r: &Self) -> Self {
        let ld = l.decompose();
        let rd = r.decompose();
        if ld.is_zero() || rd.is_zero() {
            return Self::zero();
        }
        let negative = ld.negative != rd.negative;
        if ld.limbs.len() == 1 && rd.limbs.len() == 1 {
            let (hi, lo) = L::mul_full(ld.top(), rd.top());
            if hi.is_zero() {
                return Self::from_sign_magnitude(negative, vec![lo]);
            }
            return Self::from_sign_magnitude(negative, vec![lo, hi]);
        }
        let (mag, negative) = kernels::mul_signed(&ld, &rd);
        Self::from_kernel(negative, mag)
    }

    /// Truncating division with remainder: the quotient truncates toward
    /// zero, the remainder takes the dividend's sign, and
    /// `(a / b) * b + a % b == a`.
    pub fn div_rem(&self, rhs: &Self) -> Result<(Self, Self), Error> {
        let ld = self.decompose();
        let rd = rhs.decompose();
        if rd.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if ld.is_zero() {
            return Ok((Self::zero(), Self::zero()));
        }
        let qneg = ld.negative != rd.negative;
        let rneg = ld.negative;

        if rd.limbs.len() == 1 {
            if ld.limbs.len() == 1 {
                let (q, r) = L::div2by1(L::ZERO, ld.top(), rd.top());
                return Ok((
                    Self::from_sign_magnitude(qneg, vec![q]),
                    Self::from_sign_magnitude(rneg, vec![r]),
                ));
            }
            let (q, r) = div_by_limb(&ld.to_vec(), rd.top());
            let rem = if r.is_zero() { Vec::new() } else { vec![r] };
            return Ok((Self::from_kernel(qneg, q), Self::from_kernel(rneg, rem)));
        }

        let (q, r) = udiv(&ld.to_vec(), &rd.to_vec())?;
        Ok((Self::from_kernel(qneg, q), Self::from_kernel(rneg, r)))
    }

    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        self.div_rem(rhs).ok().map(|(q, _)| q)
    }

    pub fn checked_rem(&self, rhs: &Self) -> Option<Self> {
        self.div_rem(rhs).ok().map(|(_, r)| r)
    }

    // ------------------------------------------------------------------
    // Parsing and formatting
    // ------------------------------------------------------------------

    /// Parse from a string with an optional `+`/`-` sign and an optional
    /// base prefix: `0x`/`0X` selects 16, a leading `0` followed by more
    /// digits selects 8, anything else is decimal. Whitespace and digit
    /// separators are rejected.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        if rest.is_empty() {
            return Err(Error::InvalidArgument("empty numeric string"));
        }
        let (radix, digits) = if rest.starts_with("0x") || rest.starts_with("0X") {
            (16, &rest[2..])
        } else if rest.len() > 1 && rest.starts_with('0') {
            (8, &rest[1..])
        } else {
            (10, rest)
        };
        let mag = digits_to_limbs::<L>(digits, radix)?;
        Ok(Self::from_sign_magnitude(negative, mag))
    }

    /// Parse digits in the given base (2, 8, 10 or 16), with an optional
    /// leading sign and no prefix.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, Error> {
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let mag = digits_to_limbs::<L>(digits, radix)?;
        Ok(Self::from_sign_magnitude(negative, mag))
    }

    /// Format in base 2, 8, 10 or 16. Base 16 is prefixed with `0x`,
    /// octal with `0`; negative values carry a `-` prefix; zero is `0` in
    /// every base.
    pub fn to_string_radix(&self, radix: u32) -> String {
        debug_assert!(matches!(radix, 2 | 8 | 10 | 16));
        let d = self.decompose();
        if d.is_zero() {
            return "0".to_string();
        }
        let mut out = String::new();
        if d.negative {
            out.push('-');
        }
        match radix {
            16 => out.push_str("0x"),
            8 => out.push('0'),
            _ => {}
        }
        if radix == 10 {
            let chunk_pow = L::ipow(L::from_u64_truncate(10), L::DIGITS10);
            let mut mag = d.to_vec();
            let mut chunks: Vec<u64> = Vec::new();
            while mag.len() > 1 {
                let (q, r) = div_by_limb(&mag, chunk_pow);
                chunks.push(r.as_u64());
                mag = q;
            }
            let mut buf = itoa::Buffer::new();
            out.push_str(buf.format(mag[0].as_u64()));
            for chunk in chunks.iter().rev() {
                let digits = buf.format(*chunk);
                for _ in digits.len()..L::DIGITS10 as usize {
                    out.push('0');
                }
                out.push_str(digits);
            }
        } else {
            let bits_per = radix.trailing_zeros();
            let total = d.bits();
            let ndigits = (total + bits_per as u64 - 1) / bits_per as u64;
            for i in (0..ndigits).rev() {
                let v = mag_bits_at(&d, i * bits_per as u64, bits_per);
                out.push(char::from_digit(v, radix).unwrap_or('0'));
            }
        }
        out
    }
}

fn mag_limb<L: Limb>(d: &Decomposed<L>, i: usize) -> L {
    if i == d.limbs.len() - 1 { d.limbs[i].bitand(d.mask) } else { d.limbs[i] }
}

fn mag_bit<L: Limb>(d: &Decomposed<L>, pos: u64) -> bool {
    let li = (pos / L::BITS as u64) as usize;
    if li >= d.limbs.len() {
        return false;
    }
    let bi = (pos % L::BITS as u64) as u32;
    !mag_limb(d, li).shr(bi).bitand(L::ONE).is_zero()
}

/// Any magnitude bit set strictly below `pos`.
fn mag_any_below<L: Limb>(d: &Decomposed<L>, pos: u64) -> bool {
    let full = (pos / L::BITS as u64) as usize;
    let part = (pos % L::BITS as u64) as u32;
    for i in 0..full.min(d.limbs.len()) {
        if !mag_limb(d, i).is_zero() {
            return true;
        }
    }
    if part > 0 && full < d.limbs.len() {
        let mask = L::MAX.shr(L::BITS - part);
        if !mag_limb(d, full).bitand(mask).is_zero() {
            return true;
        }
    }
    false
}

fn mag_bits_at<L: Limb>(d: &Decomposed<L>, pos: u64, width: u32) -> u32 {
    let mut v = 0u32;
    for k in 0..width {
        if mag_bit(d, pos + k as u64) {
            v |= 1 << k;
        }
    }
    v
}

/// Accumulate a digit string into a little-endian magnitude, processing
/// the largest digit chunk that fits a limb per multiply-add.
fn digits_to_limbs<L: Limb>(s: &str, radix: u32) -> Result<Vec<L>, Error> {
    if !matches!(radix, 2 | 8 | 10 | 16) {
        return Err(Error::InvalidArgument("unsupported base"));
    }
    if s.is_empty() {
        return Err(Error::InvalidArgument("empty numeric string"));
    }
    let radix_limb = L::from_u64_truncate(radix as u64);
    // largest k with radix^k representable in a limb
    let mut chunk_len = 0u32;
    let mut pow = L::ONE;
    loop {
        let (hi, lo) = L::mul_full(pow, radix_limb);
        if !hi.is_zero() {
            break;
        }
        pow = lo;
        chunk_len += 1;
    }

    let bytes = s.as_bytes();
    let mut limbs: Vec<L> = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let take = (bytes.len() - i).min(chunk_len as usize);
        let mut chunk = 0u64;
        for &b in &bytes[i..i + take] {
            let digit = (b as char)
                .to_digit(radix)
                .ok_or(Error::InvalidArgument("malformed numeric string"))?;
            chunk = chunk * radix as u64 + digit as u64;
        }
        let scale = L::ipow(radix_limb, take as u32);
        mul_add_small(&mut limbs, scale, L::from_u64_truncate(chunk));
        i += take;
    }
    Ok(limbs)
}

/// `limbs = limbs * mul + add`.
fn mul_add_small<L: Limb>(limbs: &mut Vec<L>, mul: L, add: L) {
    let mut carry = add;
    for limb in limbs.iter_mut() {
        let (hi, lo) = L::mul_full(*limb, mul);
        let (s, c) = L::add_cc(lo, carry, false);
        *limb = s;
        carry = hi.wrapping_add(L::from_u64_truncate(c as u64));
    }
    if !carry.is_zero() {
        limbs.push(carry);
    }
}

// ============================================================================
// Construction from native integers
// ============================================================================

macro_rules! bigint_from_signed {
    ($($t:ty)*) => {$(
        impl<L: Limb, const N: usize> From<$t> for BigInt<L, N> {
            fn from(v: $t) -> Self {
                Self::from_u128_magnitude(v < 0, v.unsigned_abs() as u128)
            }
        }
    )*};
}

macro_rules! bigint_from_unsigned {
    ($($t:ty)*) => {$(
        impl<L: Limb, const N: usize> From<$t> for BigInt<L, N> {
            fn from(v: $t) -> Self {
                Self::from_u128_magnitude(false, v as u128)
            }
        }
    )*};
}

bigint_from_signed!(i8 i16 i32 i64 i128 isize);
bigint_from_unsigned!(u8 u16 u32 u64 u128 usize);

impl<L: Limb, const N: usize> Default for BigInt<L, N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<L: Limb, const N: usize> FromStr for BigInt<L, N> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::parse(s)
    }
}

// ============================================================================
// Comparison
// ============================================================================

impl<L: Limb, const N: usize> PartialEq for BigInt<L, N> {
    fn eq(&self, other: &Self) -> bool {
        self.repr == other.repr
    }
}

impl<L: Limb, const N: usize> Eq for BigInt<L, N> {}

impl<L: Limb, const N: usize> PartialOrd for BigInt<L, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<L: Limb, const N: usize> Ord for BigInt<L, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        kernels::cmp_signed(&self.decompose(), &other.decompose())
    }
}

impl<L: Limb, const N: usize> Hash for BigInt<L, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr.hash(state)
    }
}

macro_rules! bigint_cmp_native {
    ($($t:ty)*) => {$(
        impl<L: Limb, const N: usize> PartialEq<$t> for BigInt<L, N> {
            fn eq(&self, other: &$t) -> bool {
                *self == BigInt::<L, N>::from(*other)
            }
        }

        impl<L: Limb, const N: usize> PartialEq<BigInt<L, N>> for $t {
            fn eq(&self, other: &BigInt<L, N>) -> bool {
                BigInt::<L, N>::from(*self) == *other
            }
        }

        impl<L: Limb, const N: usize> PartialOrd<$t> for BigInt<L, N> {
            fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                Some(self.cmp(&BigInt::<L, N>::from(*other)))
            }
        }

        impl<L: Limb, const N: usize> PartialOrd<BigInt<L, N>> for $t {
            fn partial_cmp(&self, other: &BigInt<L, N>) -> Option<Ordering> {
                Some(BigInt::<L, N>::from(*self).cmp(other))
            }
        }
    )*};
}

bigint_cmp_native!(i8 i16 i32 i64 i128 u8 u16 u32 u64 u128);

// ============================================================================
// Operators
// ============================================================================

impl<L: Limb, const N: usize> Neg for BigInt<L, N> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.repr.negate();
        self
    }
}

impl<L: Limb, const N: usize> Neg for &BigInt<L, N> {
    type Output = BigInt<L, N>;

    fn neg(self) -> BigInt<L, N> {
        -self.clone()
    }
}

impl<L: Limb, const N: usize> BigInt<L, N> {
    fn add_op(l: &Self, r: &Self) -> Self {
        Self::add_core(l, r, false)
    }

    fn sub_op(l: &Self, r: &Self) -> Self {
        Self::add_core(l, r, true)
    }

    fn mul_op(l: &Self, r: &Self) -> Self {
        Self::mul_core(l, r)
    }

    fn div_op(l: &Self, r: &Self) -> Self {
        match l.div_rem(r) {
            Ok((q, _)) => q,
            Err(_) => panic!("attempt to divide by zero"),
        }
    }

    fn rem_op(l: &Self, r: &Self) -> Self {
        match l.div_rem(r) {
            Ok((_, rem)) => rem,
            Err(_) => panic!("attempt to calculate remainder with a divisor of zero"),
        }
    }
}

macro_rules! bigint_binop {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $core:ident) => {
        impl<L: Limb, const N: usize> $trait for &BigInt<L, N> {
            type Output = BigInt<L, N>;

            fn $method(self, rhs: &BigInt<L, N>) -> BigInt<L, N> {
                BigInt::$core(self, rhs)
            }
        }

        impl<L: Limb, const N: usize> $trait for BigInt<L, N> {
            type Output = BigInt<L, N>;

            fn $method(self, rhs: BigInt<L, N>) -> BigInt<L, N> {
                BigInt::$core(&self, &rhs)
            }
        }

        impl<L: Limb, const N: usize> $trait<&BigInt<L, N>> for BigInt<L, N> {
            type Output = BigInt<L, N>;

            fn $method(self, rhs: &BigInt<L, N>) -> BigInt<L, N> {
                BigInt::$core(&self, rhs)
            }
        }

        impl<L: Limb, const N: usize> $trait<BigInt<L, N>> for &BigInt<L, N> {
            type Output = BigInt<L, N>;

            fn $method(self, rhs: BigInt<L, N>) -> BigInt<L, N> {
                BigInt::$core(self, &rhs)
            }
        }

        impl<L: Limb, const N: usize> $assign_trait<&BigInt<L, N>> for BigInt<L, N> {
            fn $assign_method(&mut self, rhs: &BigInt<L, N>) {
                *self = BigInt::$core(self, rhs);
            }
        }

        impl<L: Limb, const N: usize> $assign_trait<BigInt<L, N>> for BigInt<L, N> {
            fn $assign_method(&mut self, rhs: BigInt<L, N>) {
                *self = BigInt::$core(self, &rhs);
            }
        }
    };
}

bigint_binop!(Add, add, AddAssign, add_assign, add_op);
bigint_binop!(Sub, sub, SubAssign, sub_assign, sub_op);
bigint_binop!(Mul, mul, MulAssign, mul_assign, mul_op);
bigint_binop!(Div, div, DivAssign, div_assign, div_op);
bigint_binop!(Rem, rem, RemAssign, rem_assign, rem_op);

macro_rules! bigint_binop_native {
    ($($t:ty)*) => {$(
        impl<L: Limb, const N: usize> Add<$t> for &BigInt<L, N> {
            type Output = BigInt<L, N>;

            fn add(self, rhs: $t) -> BigInt<L, N> {
                BigInt::add_op(self, &BigInt::from(rhs))
            }
        }

        impl<L: Limb, const N: usize> Add<$t> for BigInt<L, N> {
            type Output = BigInt<L, N>;

            fn add(self, rhs: $t) -> BigInt<L, N> {
                BigInt::add_op(&self, &BigInt::from(rhs))
            }
        }

        impl<L: Limb, const N: usize> Add<&BigInt<L, N>> for $t {
            type Output = BigInt<L, N>;

            fn add(self, rhs: &BigInt<L, N>) -> BigInt<L, N> {
                BigInt::add_op(&BigInt::from(self), rhs)
            }
        }

        impl<L: Limb, const N: usize> Sub<$t> for &BigInt<L, N> {
            type Output = BigInt<L, N>;

            fn sub(self, rhs: $t) -> BigInt<L, N> {
                BigInt::sub_op(self, &BigInt::from(rhs))
            }
        }

        impl<L: Limb, const N: usize> Sub<$t> for BigInt<L, N> {
            type Output = BigInt<L, N>;

            fn sub(self, rhs: $t) -> BigInt<L, N> {
                BigInt::sub_op(&self, &BigInt::from(rhs))
            }
        }

        impl<L: Limb, const N: usize> Sub<&BigInt<L, N>> for $t {
            type Output = BigInt<L, N>;

            fn sub(self, rhs: &BigInt<L, N>) -> BigInt<L, N> {
                BigInt::sub_op(&BigInt::from(self), rhs)
            }
        }

        impl<L: Limb, const N: usize> Mul<$t> for &BigInt<L, N> {
            type Output = BigInt<L, N>;

            fn mul(self, rhs: $t) -> BigInt<L, N> {
                BigInt::mul_op(self, &BigInt::from(rhs))
            }
        }

        impl<L: Limb, const N: usize> Mul<$t> for BigInt<L, N> {
            type Output = BigInt<L, N>;

            fn mul(self, rhs: $t) -> BigInt<L, N> {
                BigInt::mul_op(&self, &BigInt::from(rhs))
            }
        }

        impl<L: Limb, const N: usize> Mul<&BigInt<L, N>> for $t {
            type Output = BigInt<L, N>;

            fn mul(self, rhs: &BigInt<L, N>) -> BigInt<L, N> {
                BigInt::mul_op(&BigInt::from(self), rhs)
            }
        }

        impl<L: Limb, const N: usize> Div<$t> for &BigInt<L, N> {
            type Output = BigInt<L, N>;

            fn div(self, rhs: $t) -> BigInt<L, N> {
                BigInt::div_op(self, &BigInt::from(rhs))
            }
        }

        impl<L: Limb, const N: usize> Div<$t> for BigInt<L, N> {
            type Output = BigInt<L, N>;

            fn div(self, rhs: $t) -> BigInt<L, N> {
                BigInt::div_op(&self, &BigInt::from(rhs))
            }
        }

        impl<L: Limb, const N: usize> Div<&BigInt<L, N>> for $t {
            type Output = BigInt<L, N>;

            fn div(self, rhs: &BigInt<L, N>) -> BigInt<L, N> {
                BigInt::div_op(&BigInt::from(self), rhs)
            }
        }

        impl<L: Limb, const N: usize> Rem<$t> for &BigInt<L, N> {
            type Output = BigInt<L, N>;

            fn rem(self, rhs: $t) -> BigInt<L, N> {
                BigInt::rem_op(self, &BigInt::from(rhs))
            }
        }

        impl<L: Limb, const N: usize> Rem<$t> for BigInt<L, N> {
            type Output = BigInt<L, N>;

            fn rem(self, rhs: $t) -> BigInt<L, N> {
                BigInt::rem_op(&self, &BigInt::from(rhs))
            }
        }

        impl<L: Limb, const N: usize> AddAssign<$t> for BigInt<L, N> {
            fn add_assign(&mut self, rhs: $t) {
                *self = BigInt::add_op(self, &BigInt::from(rhs));
            }
        }

        impl<L: Limb, const N: usize> SubAssign<$t> for BigInt<L, N> {
            fn sub_assign(&mut self, rhs: $t) {
                *self = BigInt::sub_op(self, &BigInt::from(rhs));
            }
        }

        impl<L: Limb, const N: usize> MulAssign<$t> for BigInt<L, N> {
            fn mul_assign(&mut self, rhs: $t) {
                *self = BigInt::mul_op(self, &BigInt::from(rhs));
            }
        }

        impl<L: Limb, const N: usize> DivAssign<$t> for BigInt<L, N> {
            fn div_assign(&mut self, rhs: $t) {
                *self = BigInt::div_op(self, &BigInt::from(rhs));
            }
        }

        impl<L: Limb, const N: usize> RemAssign<$t> for BigInt<L, N> {
            fn rem_assign(&mut self, rhs: $t) {
                *self = BigInt::rem_op(self, &BigInt::from(rhs));
            }
        }
    )*};
}

bigint_binop_native!(i8 i16 i32 i64 i128 u8 u16 u32 u64 u128);

impl<L: Limb, const N: usize> fmt::Display for BigInt<L, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_radix(10))
    }
}
