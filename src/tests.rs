//! Property-based tests using quickcheck.
//!
//! Small values are checked against native integer behavior, 256-bit-range
//! magnitudes against `ethnum::U256`, and everything larger against
//! algebraic laws that hold at arbitrary precision.

use std::hash::{DefaultHasher, Hash, Hasher};

use quickcheck_macros::quickcheck;

use crate::kernels;
use crate::{BigInt, Decimal, Float16, Int};

fn to_u256(x: &Int) -> ethnum::U256 {
    let limbs = x.decompose().to_vec();
    assert!(limbs.len() <= 4);
    let mut bytes = [0u8; 32];
    for (i, l) in limbs.iter().enumerate() {
        bytes[i * 8..i * 8 + 8].copy_from_slice(&l.to_le_bytes());
    }
    ethnum::U256::from_le_bytes(bytes)
}

fn from_u256(v: ethnum::U256) -> Int {
    let bytes = v.to_le_bytes();
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        *limb = u64::from_le_bytes(bytes[i * 8..i * 8 + 8].try_into().unwrap());
    }
    Int::from_le_limbs(false, &limbs)
}

fn hash_of<T: Hash>(v: &T) -> u64 {
    let mut h = DefaultHasher::new();
    v.hash(&mut h);
    h.finish()
}

// ============================================================================
// BigInt vs native integers
// ============================================================================

#[quickcheck]
fn int_roundtrip_i128(v: i128) -> bool {
    Int::from(v).as_i128() == v
}

#[quickcheck]
fn int_roundtrip_u128(v: u128) -> bool {
    Int::from(v).as_u128() == v
}

#[quickcheck]
fn int_add_matches_native(a: i64, b: i64) -> bool {
    let expected = a as i128 + b as i128;
    (Int::from(a) + Int::from(b)).as_i128() == expected
}

#[quickcheck]
fn int_sub_matches_native(a: i64, b: i64) -> bool {
    let expected = a as i128 - b as i128;
    (Int::from(a) - Int::from(b)).as_i128() == expected
}

#[quickcheck]
fn int_mul_matches_native(a: i64, b: i64) -> bool {
    let expected = a as i128 * b as i128;
    (Int::from(a) * Int::from(b)).as_i128() == expected
}

#[quickcheck]
fn int_div_matches_native(a: i128, b: i64) -> bool {
    if b == 0 {
        return true;
    }
    let expected = a / b as i128;
    (Int::from(a) / Int::from(b)).as_i128() == expected
}

#[quickcheck]
fn int_rem_matches_native(a: i128, b: i64) -> bool {
    if b == 0 {
        return true;
    }
    let expected = a % b as i128;
    (Int::from(a) % Int::from(b)).as_i128() == expected
}

#[quickcheck]
fn int_neg_matches_native(v: i64) -> bool {
    (-Int::from(v)).as_i128() == -(v as i128)
}

#[quickcheck]
fn int_native_rhs_operators_narrow(a: i8, b: i8) -> bool {
    let x = Int::from(a);
    let sum = (&x + b).as_i128() == a as i128 + b as i128;
    let diff = (&x - b).as_i128() == a as i128 - b as i128;
    let prod = (&x * b).as_i128() == a as i128 * b as i128;
    let quot = b == 0 || (&x / b).as_i128() == a as i128 / b as i128;
    let rem = b == 0 || (&x % b).as_i128() == a as i128 % b as i128;
    sum && diff && prod && quot && rem
}

#[quickcheck]
fn int_native_rhs_operators_wide(a: u64, b: u128) -> bool {
    // conversions truncate mod 2^128, so the oracle is wrapping arithmetic
    let x = Int::from(a);
    let sum = (&x + b).as_u128() == (a as u128).wrapping_add(b);
    let diff = (&x - b).as_u128() == (a as u128).wrapping_sub(b);
    let prod = (&x * b).as_u128() == (a as u128).wrapping_mul(b);
    let quot = b == 0 || (&x / b).as_u128() == a as u128 / b;
    sum && diff && prod && quot
}

#[quickcheck]
fn int_cmp_matches_native(a: i64, b: i64) -> bool {
    Int::from(a).cmp(&Int::from(b)) == a.cmp(&b)
}

#[quickcheck]
fn int_cmp_against_native_rhs(a: i64, b: i64) -> bool {
    let x = Int::from(a);
    (x == b) == (a == b) && x.partial_cmp(&b) == Some(a.cmp(&b))
}

#[quickcheck]
fn int_to_f64_is_nearest_even(v: i64) -> bool {
    Int::from(v).to_f64() == v as f64
}

#[quickcheck]
fn int_to_f64_is_nearest_even_wide(v: u128) -> bool {
    Int::from(v).to_f64() == v as f64
}

#[quickcheck]
fn int_pow_matches_native(a: i16, k: u8) -> bool {
    let k = (k % 6) as u32;
    Int::from(a).pow(k).as_i128() == (a as i128).pow(k)
}

// ============================================================================
// BigInt vs ethnum::U256 in the 256-bit range
// ============================================================================

#[quickcheck]
fn u256_add(l0: u64, l1: u64, l2: u64, m0: u64, m1: u64, m2: u64) -> bool {
    // three-limb operands cannot carry out of 256 bits
    let a = Int::from_le_limbs(false, &[l0, l1, l2]);
    let b = Int::from_le_limbs(false, &[m0, m1, m2]);
    let expected = from_u256(to_u256(&a).wrapping_add(to_u256(&b)));
    &a + &b == expected
}

#[quickcheck]
fn u256_mul(a0: u64, a1: u64, b0: u64, b1: u64) -> bool {
    let a = Int::from_le_limbs(false, &[a0, a1]);
    let b = Int::from_le_limbs(false, &[b0, b1]);
    let expected = from_u256(to_u256(&a).wrapping_mul(to_u256(&b)));
    &a * &b == expected
}

#[quickcheck]
fn u256_div_rem(l0: u64, l1: u64, l2: u64, l3: u64, m0: u64, m1: u64, m2: u64, m3: u64) -> bool {
    let b = Int::from_le_limbs(false, &[m0, m1, m2, m3]);
    if b.is_zero() {
        return true;
    }
    let a = Int::from_le_limbs(false, &[l0, l1, l2, l3]);
    let (ea, eb) = (to_u256(&a), to_u256(&b));
    &a / &b == from_u256(ea / eb) && &a % &b == from_u256(ea % eb)
}

#[quickcheck]
fn u256_cmp(l0: u64, l1: u64, l2: u64, l3: u64, m0: u64, m1: u64, m2: u64, m3: u64) -> bool {
    let a = Int::from_le_limbs(false, &[l0, l1, l2, l3]);
    let b = Int::from_le_limbs(false, &[m0, m1, m2, m3]);
    a.cmp(&b) == to_u256(&a).cmp(&to_u256(&b))
}

// ============================================================================
// Algebraic laws at arbitrary precision
// ============================================================================

#[quickcheck]
fn add_sub_inverse(a: Vec<u64>, an: bool, b: Vec<u64>, bn: bool) -> bool {
    let a = Int::from_le_limbs(an, &a);
    let b = Int::from_le_limbs(bn, &b);
    &(&a + &b) - &b == a
}

#[quickcheck]
fn add_commutative(a: Vec<u64>, an: bool, b: Vec<u64>, bn: bool) -> bool {
    let a = Int::from_le_limbs(an, &a);
    let b = Int::from_le_limbs(bn, &b);
    &a + &b == &b + &a
}

#[quickcheck]
fn mul_commutative(a: Vec<u64>, an: bool, b: Vec<u64>, bn: bool) -> bool {
    let a = Int::from_le_limbs(an, &a);
    let b = Int::from_le_limbs(bn, &b);
    &a * &b == &b * &a
}

#[quickcheck]
fn euclidean_division(a: Vec<u64>, an: bool, b: Vec<u64>, bn: bool) -> bool {
    let a = Int::from_le_limbs(an, &a);
    let b = Int::from_le_limbs(bn, &b);
    if b.is_zero() {
        return true;
    }
    let (q, r) = a.div_rem(&b).unwrap();
    let identity = &(&q * &b) + &r == a;
    let bounded = r.abs() < b.abs();
    let sign_ok = r.is_zero() || r.is_negative() == a.is_negative();
    identity && bounded && sign_ok
}

#[quickcheck]
fn cmp_is_total(a: Vec<u64>, an: bool, b: Vec<u64>, bn: bool) -> bool {
    let a = Int::from_le_limbs(an, &a);
    let b = Int::from_le_limbs(bn, &b);
    let lt = a < b;
    let eq = a == b;
    let gt = a > b;
    (lt as u8 + eq as u8 + gt as u8) == 1
}

#[quickcheck]
fn cmp_transitive(a: Vec<u64>, b: Vec<u64>, c: Vec<u64>) -> bool {
    let a = Int::from_le_limbs(false, &a);
    let b = Int::from_le_limbs(false, &b);
    let c = Int::from_le_limbs(false, &c);
    if a <= b && b <= c { a <= c } else { true }
}

// ============================================================================
// Parsing and formatting round-trips
// ============================================================================

#[quickcheck]
fn string_roundtrip_base10(a: Vec<u64>, neg: bool) -> bool {
    let x = Int::from_le_limbs(neg, &a);
    Int::parse(&x.to_string_radix(10)) == Ok(x)
}

#[quickcheck]
fn string_roundtrip_base16(a: Vec<u64>, neg: bool) -> bool {
    let x = Int::from_le_limbs(neg, &a);
    Int::parse(&x.to_string_radix(16)) == Ok(x)
}

#[quickcheck]
fn string_roundtrip_base8(a: Vec<u64>, neg: bool) -> bool {
    let x = Int::from_le_limbs(neg, &a);
    Int::parse(&x.to_string_radix(8)) == Ok(x)
}

#[quickcheck]
fn string_roundtrip_base2(a: Vec<u64>, neg: bool) -> bool {
    let x = Int::from_le_limbs(neg, &a);
    Int::from_str_radix(&x.to_string_radix(2), 2) == Ok(x)
}

#[quickcheck]
fn decimal_digits_match_native(v: u128) -> bool {
    Int::from(v).to_string() == v.to_string()
}

// ============================================================================
// Inplaced / heap layout indistinguishability
// ============================================================================

#[quickcheck]
fn layouts_are_indistinguishable(v: i32, w: i32) -> bool {
    let big = Int::from_le_limbs(false, &[0, 0, 0, 1 << 8]);
    let x = Int::from(v);
    let y = &(&x + &big) - &big;
    if v != 0 && (x.is_inplaced() == y.is_inplaced()) {
        // the detour must have produced the other layout
        return false;
    }
    let z = Int::from(w);
    x == y
        && hash_of(&x) == hash_of(&y)
        && x.cmp(&z) == y.cmp(&z)
        && &x * &z == &y * &z
        && &x + &z == &y + &z
}

#[quickcheck]
fn inplaced_iff_fits_inline(v: i64) -> bool {
    Int::from(v).is_inplaced() == (v.unsigned_abs() <= (1u64 << 62) - 1)
}

// ============================================================================
// Limb kernels
// ============================================================================

#[quickcheck]
fn mul1_add_unrolled_matches_scalar(u: Vec<u64>, v: u64, seed: u64) -> bool {
    let mut u = u;
    u.push(1);
    while u.len() % 4 != 0 {
        u.push(seed.rotate_left(u.len() as u32));
    }
    let mut r1: Vec<u64> = (0..u.len())
        .map(|i| seed.wrapping_mul(i as u64 + 1))
        .collect();
    let mut r2 = r1.clone();
    let c1 = kernels::mul1_add(&u, v, &mut r1);
    let c2 = kernels::mul1_add_x4(&u, v, &mut r2);
    c1 == c2 && r1 == r2
}

#[quickcheck]
fn long_division_euclidean(u: Vec<u64>, d0: u64, d1: u64) -> bool {
    // pad the dividend so the quotient is long enough to take the
    // Svoboda path
    let mut un = u;
    let mut i = 0u64;
    while un.len() < 20 {
        un.push(d0.wrapping_add(i).rotate_left((i % 64) as u32) ^ d1);
        i += 1;
    }
    let d = [d0, d1 | 1];
    let (q, r) = kernels::udiv::udiv(&un, &d).unwrap();
    let ub = Int::from_le_limbs(false, &un);
    let db = Int::from_le_limbs(false, &d);
    let qb = Int::from_le_limbs(false, &q);
    let rb = Int::from_le_limbs(false, &r);
    &(&qb * &db) + &rb == ub && rb < db
}

#[quickcheck]
fn div_by_limb_power_of_two(u: Vec<u64>, k: u8) -> bool {
    let d = 1u64 << (k % 64);
    let (q, r) = kernels::divby1::div_by_limb(&u, d);
    let ub = Int::from_le_limbs(false, &u);
    let qb = Int::from_le_limbs(false, &q);
    r < d && &(&qb * Int::from(d)) + Int::from(r) == ub
}

#[quickcheck]
fn div_by_limb_general(u: Vec<u64>, d: u64) -> bool {
    if d == 0 {
        return true;
    }
    let (q, r) = kernels::divby1::div_by_limb(&u, d);
    let ub = Int::from_le_limbs(false, &u);
    let qb = Int::from_le_limbs(false, &q);
    r < d && &(&qb * Int::from(d)) + Int::from(r) == ub
}

#[quickcheck]
fn kernel_sub_signed_matches_native(a: i64, b: i64) -> bool {
    let x = Int::from(a);
    let y = Int::from(b);
    let (mag, neg) = kernels::sub_signed(&x.decompose(), &y.decompose());
    Int::from_le_limbs(neg, &mag) == Int::from(a as i128 - b as i128)
}

#[quickcheck]
fn div2by1_reciprocal_matches_wide_divide(u1: u64, u0: u64, d: u64) -> bool {
    let d = d | (1 << 63);
    let u1 = u1 % d;
    let dinv = <u64 as crate::Limb>::inv_2by1(d);
    let norm = <u64 as crate::Limb>::div2by1_norm(u1, u0, d);
    let inv = <u64 as crate::Limb>::div2by1_inv(u1, u0, d, dinv);
    norm == inv
}

#[quickcheck]
fn bitwise_or_xor_and_match_native(a: u128, b: u128) -> bool {
    let al = [a as u64, (a >> 64) as u64];
    let bl = [b as u64, (b >> 64) as u64];
    let mut or = [0u64; 2];
    let mut xor = [0u64; 2];
    let mut and = [0u64; 2];
    kernels::uor(&al, &bl, &mut or);
    kernels::uxor(&al, &bl, &mut xor);
    kernels::uand(&al, &bl, &mut and);
    let recombine = |l: &[u64; 2]| (l[0] as u128) | ((l[1] as u128) << 64);
    recombine(&or) == a | b && recombine(&xor) == a ^ b && recombine(&and) == a & b
}

#[quickcheck]
fn shift_left_right_inverse(a: Vec<u64>, k: u8) -> bool {
    let shift = (k % 63) as u32 + 1;
    let mut shifted = vec![0u64; a.len() + 1];
    let spill = kernels::shl_limbs(&a, shift, &mut shifted[..a.len()]);
    shifted[a.len()] = spill;
    let mut back = vec![0u64; shifted.len()];
    kernels::shr_limbs(&shifted, shift, &mut back);
    Int::from_le_limbs(false, &back) == Int::from_le_limbs(false, &a)
}

// ============================================================================
// Other limb widths: the same laws at u8 and u32
// ============================================================================

#[quickcheck]
fn u8_limbs_format_like_u64_limbs(v: i128) -> bool {
    BigInt::<u8, 2>::from(v).to_string() == Int::from(v).to_string()
}

#[quickcheck]
fn u8_limb_mul_matches_native(a: i32, b: i32) -> bool {
    (BigInt::<u8, 2>::from(a) * BigInt::<u8, 2>::from(b)).as_i128() == a as i128 * b as i128
}

#[quickcheck]
fn u8_limb_euclidean(a: Vec<u8>, an: bool, b: Vec<u8>, bn: bool) -> bool {
    let a = BigInt::<u8, 2>::from_le_limbs(an, &a);
    let b = BigInt::<u8, 2>::from_le_limbs(bn, &b);
    if b.is_zero() {
        return true;
    }
    let (q, r) = a.div_rem(&b).unwrap();
    &(&q * &b) + &r == a && r.abs() < b.abs()
}

#[quickcheck]
fn u32_limb_div_matches_native(a: u128, b: u128) -> bool {
    if b == 0 {
        return true;
    }
    (BigInt::<u32, 1>::from(a) / BigInt::<u32, 1>::from(b)).as_u128() == a / b
}

#[quickcheck]
fn u32_limb_string_roundtrip(v: i128) -> bool {
    let x = BigInt::<u32, 1>::from(v);
    BigInt::<u32, 1>::parse(&x.to_string_radix(16)) == Ok(x)
}

// ============================================================================
// Float16
// ============================================================================

#[quickcheck]
fn float16_f32_roundtrip(bits: u16) -> bool {
    let f = Float16::from_bits(bits);
    if f.is_nan() {
        return true;
    }
    Float16::from_f32(f.to_f32()).to_bits() == bits
}

#[quickcheck]
fn float16_order_mirrors_f32(a: u16, b: u16) -> bool {
    let x = Float16::from_bits(a);
    let y = Float16::from_bits(b);
    x.partial_cmp(&y) == x.to_f32().partial_cmp(&y.to_f32())
}

#[quickcheck]
fn float16_f64_path_matches_f32_path(v: f32) -> bool {
    if v.is_nan() {
        return true;
    }
    Float16::from_f64(v as f64).to_bits() == Float16::from_f32(v).to_bits()
}

#[quickcheck]
fn float16_from_int_clamps(v: i32) -> bool {
    let f = Float16::from(v);
    if v > 65504 {
        f.to_bits() == Float16::INFINITY.to_bits()
    } else if v < -65504 {
        f.to_bits() == Float16::NEG_INFINITY.to_bits()
    } else {
        f.to_bits() == Float16::from_f32(v as f32).to_bits()
    }
}

#[quickcheck]
fn float16_next_up_is_the_successor(bits: u16) -> bool {
    let f = Float16::from_bits(bits);
    if f.is_nan() {
        return true;
    }
    let up = f.next_up();
    if f.to_bits() == Float16::INFINITY.to_bits() {
        return up.to_bits() == f.to_bits();
    }
    up.to_f32() > f.to_f32() || (up.is_infinite() && f == Float16::MAX)
}

// ============================================================================
// Decimal
// ============================================================================

#[quickcheck]
fn decimal_normalization_idempotent(sig: i64, exp: i8) -> bool {
    let d = Decimal::<u64, 1>::from_parts(Int::from(sig), Int::from(exp));
    let d2 = Decimal::from_parts(d.significand().clone(), d.exponent().clone());
    d == d2
}

#[quickcheck]
fn decimal_string_roundtrip(sig: i64, exp: i8) -> bool {
    let d = Decimal::<u64, 1>::from_parts(Int::from(sig), Int::from(exp));
    Decimal::parse(&d.to_string()) == Ok(d)
}

#[quickcheck]
fn decimal_cmp_matches_scaled_model(s1: i32, e1: i8, s2: i32, e2: i8) -> bool {
    let e1 = (e1 % 7) as i32;
    let e2 = (e2 % 7) as i32;
    let d1 = Decimal::<u64, 1>::from_parts(Int::from(s1), Int::from(e1));
    let d2 = Decimal::<u64, 1>::from_parts(Int::from(s2), Int::from(e2));
    let m1 = s1 as i128 * 10i128.pow((e1 + 6) as u32);
    let m2 = s2 as i128 * 10i128.pow((e2 + 6) as u32);
    d1.cmp(&d2) == m1.cmp(&m2)
}

#[quickcheck]
fn decimal_add_matches_scaled_model(s1: i32, e1: i8, s2: i32, e2: i8) -> bool {
    let e1 = (e1 % 4) as i32;
    let e2 = (e2 % 4) as i32;
    let d1 = Decimal::<u64, 1>::from_parts(Int::from(s1), Int::from(e1));
    let d2 = Decimal::<u64, 1>::from_parts(Int::from(s2), Int::from(e2));
    let m1 = s1 as i128 * 10i128.pow((e1 + 3) as u32);
    let m2 = s2 as i128 * 10i128.pow((e2 + 3) as u32);
    &d1 + &d2 == Decimal::from_parts(Int::from(m1 + m2), Int::from(-3))
}

#[quickcheck]
fn decimal_to_int_truncates(s: i32, e: i8) -> bool {
    let e = (e % 5) as i32;
    let d = Decimal::<u64, 1>::from_parts(Int::from(s), Int::from(e));
    let expected = if e >= 0 {
        s as i128 * 10i128.pow(e as u32)
    } else {
        s as i128 / 10i128.pow((-e) as u32)
    };
    d.to_bigint().unwrap().as_i128() == expected
}

#[quickcheck]
fn decimal_from_integral_f64_is_exact(v: i32) -> bool {
    Decimal::<u64, 1>::try_from(v as f64) == Ok(Decimal::from(v))
}

#[quickcheck]
fn decimal_from_f64_string_roundtrip(v: f64) -> bool {
    if !v.is_finite() {
        return true;
    }
    let d = Decimal::<u64, 1>::try_from(v).unwrap();
    Decimal::parse(&d.to_string()) == Ok(d)
}

#[quickcheck]
fn decimal_from_int_strips_tens(v: i64) -> bool {
    let d = Decimal::<u64, 1>::from(v);
    if v == 0 {
        return d.significand().is_zero() && d.exponent().is_zero();
    }
    let sig = d.significand().as_i128();
    sig % 10 != 0 && sig * 10i128.pow(d.exponent().as_u32()) == v as i128
}
