//! Multi-limb kernels.
//!
//! All kernels operate on little-endian limb slices. Signed entry points
//! take [`Decomposed`] views — limbs plus a mask selecting the meaningful
//! bits of the top limb plus a sign — so a kernel can run directly against
//! a value whose top limb carries packed layout bits (see `storage`).
//!
//! Aliasing convention: the `_assign` variants are the in-place forms; the
//! plain forms require the result slice to be disjoint from both inputs.
//! The borrow checker enforces this, so there are no runtime overlap
//! checks.

use std::cmp::Ordering;
use std::sync::OnceLock;

use crate::limb::Limb;

pub mod divby1;
pub mod udiv;

/// A view of a signed magnitude: limbs little-endian with no redundant top
/// limb, `mask` selecting the meaningful bits of the top limb, and the
/// sign. Zero is an empty slice with `negative == false`.
#[derive(Clone, Copy, Debug)]
pub struct Decomposed<'a, L: Limb> {
    pub limbs: &'a [L],
    pub mask: L,
    pub negative: bool,
}

impl<'a, L: Limb> Decomposed<'a, L> {
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// The masked top limb, or zero for an empty magnitude.
    #[inline]
    pub fn top(&self) -> L {
        match self.limbs.last() {
            Some(&t) => t.bitand(self.mask),
            None => L::ZERO,
        }
    }

    /// Low limbs and the masked top limb.
    #[inline]
    fn split(&self) -> (&'a [L], L) {
        match self.limbs.split_last() {
            Some((&t, rest)) => (rest, t.bitand(self.mask)),
            None => (&[], L::ZERO),
        }
    }

    /// Owned canonical copy of the magnitude (mask applied).
    pub fn to_vec(&self) -> Vec<L> {
        let mut v = self.limbs.to_vec();
        if let Some(last) = v.last_mut() {
            *last = last.bitand(self.mask);
        }
        v
    }

    /// Magnitude bit width.
    pub fn bits(&self) -> u64 {
        match self.limbs.len() {
            0 => 0,
            n => {
                (n as u64 - 1) * L::BITS as u64
                    + (L::BITS - self.top().leading_zeros()) as u64
            }
        }
    }

    pub fn with_sign(self, negative: bool) -> Self {
        Self { negative, ..self }
    }
}

// ============================================================================
// Compare
// ============================================================================

/// Compare two canonical magnitudes (trimmed, full masks).
pub fn cmp_limbs<L: Limb>(u: &[L], v: &[L]) -> Ordering {
    match u.len().cmp(&v.len()) {
        Ordering::Equal => {}
        o => return o,
    }
    for i in (0..u.len()).rev() {
        match u[i].cmp(&v[i]) {
            Ordering::Equal => {}
            o => return o,
        }
    }
    Ordering::Equal
}

/// Compare magnitudes under their top-limb masks.
pub fn cmp_magnitudes<L: Limb>(l: &Decomposed<L>, r: &Decomposed<L>) -> Ordering {
    match l.limbs.len().cmp(&r.limbs.len()) {
        Ordering::Equal => {}
        o => return o,
    }
    let (ll, lt) = l.split();
    let (rl, rt) = r.split();
    match lt.cmp(&rt) {
        Ordering::Equal => {}
        o => return o,
    }
    for i in (0..ll.len()).rev() {
        match ll[i].cmp(&rl[i]) {
            Ordering::Equal => {}
            o => return o,
        }
    }
    Ordering::Equal
}

/// Strict signed comparison of two decompositions.
pub fn cmp_signed<L: Limb>(l: &Decomposed<L>, r: &Decomposed<L>) -> Ordering {
    match (l.negative, r.negative) {
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (false, false) => cmp_magnitudes(l, r),
        (true, true) => cmp_magnitudes(r, l),
    }
}

// ============================================================================
// Add / subtract
// ============================================================================

/// In-place `u += v`; `u.len() >= v.len()`. Returns the carry-out.
pub fn uadd_assign<L: Limb>(u: &mut [L], v: &[L]) -> bool {
    debug_assert!(u.len() >= v.len());
    let mut c = false;
    for i in 0..v.len() {
        (u[i], c) = L::add_cc(u[i], v[i], c);
    }
    let mut i = v.len();
    while c && i < u.len() {
        (u[i], c) = L::add_cc(u[i], L::ZERO, c);
        i += 1;
    }
    c
}

/// In-place `u -= v`; `u.len() >= v.len()`. Returns the borrow-out.
pub fn usub_assign<L: Limb>(u: &mut [L], v: &[L]) -> bool {
    debug_assert!(u.len() >= v.len());
    let mut b = false;
    for i in 0..v.len() {
        (u[i], b) = L::sub_bb(u[i], v[i], b);
    }
    let mut i = v.len();
    while b && i < u.len() {
        (u[i], b) = L::sub_bb(u[i], L::ZERO, b);
        i += 1;
    }
    b
}

/// `(uh:u) + (vh:v)` where the `h` limbs are the masked tops; requires
/// `u.len() >= v.len()`, writes `u.len() + 1` limbs to `r`, returns the
/// carry-out.
fn uadd_with_tops<L: Limb>(uh: L, u: &[L], vh: L, v: &[L], r: &mut [L]) -> bool {
    debug_assert!(u.len() >= v.len());
    let mut c = false;
    for i in 0..v.len() {
        (r[i], c) = L::add_cc(u[i], v[i], c);
    }
    if u.len() > v.len() {
        (r[v.len()], c) = L::add_cc(u[v.len()], vh, c);
        for i in v.len() + 1..u.len() {
            (r[i], c) = L::add_cc(u[i], L::ZERO, c);
        }
        (r[u.len()], c) = L::add_cc(uh, L::ZERO, c);
    } else {
        (r[u.len()], c) = L::add_cc(uh, vh, c);
    }
    c
}

/// `(uh:u) - (vh:v)`; requires the first operand to be the larger
/// magnitude, writes `u.len() + 1` limbs to `r`, returns the borrow-out
/// (zero for well-ordered operands).
fn usub_with_tops<L: Limb>(uh: L, u: &[L], vh: L, v: &[L], r: &mut [L]) -> bool {
    debug_assert!(u.len() >= v.len());
    let mut b = false;
    for i in 0..v.len() {
        (r[i], b) = L::sub_bb(u[i], v[i], b);
    }
    if u.len() > v.len() {
        (r[v.len()], b) = L::sub_bb(u[v.len()], vh, b);
        for i in v.len() + 1..u.len() {
            (r[i], b) = L::sub_bb(u[i], L::ZERO, b);
        }
        (r[u.len()], b) = L::sub_bb(uh, L::ZERO, b);
    } else {
        (r[u.len()], b) = L::sub_bb(uh, vh, b);
    }
    b
}

fn canonical<L: Limb>(mut mag: Vec<L>, negative: bool) -> (Vec<L>, bool) {
    trim_zeros(&mut mag);
    let negative = negative && !mag.is_empty();
    (mag, negative)
}

/// Signed addition over decompositions. Same signs ripple-add; opposite
/// signs subtract the smaller magnitude from the larger and take the sign
/// of the larger. A zero magnitude collapses to canonical zero.
pub fn add_signed<L: Limb>(l: &Decomposed<L>, r: &Decomposed<L>) -> (Vec<L>, bool) {
    if l.is_zero() {
        return canonical(r.to_vec(), r.negative);
    }
    if r.is_zero() {
        return canonical(l.to_vec(), l.negative);
    }
    if l.negative == r.negative {
        let (big, small) = if l.limbs.len() >= r.limbs.len() { (l, r) } else { (r, l) };
        let (bl, bt) = big.split();
        let (sl, st) = small.split();
        let n = big.limbs.len();
        let mut out = vec![L::ZERO; n + 1];
        let c = uadd_with_tops(bt, bl, st, sl, &mut out);
        if c {
            out[n] = L::ONE;
        }
        canonical(out, l.negative)
    } else {
        match cmp_magnitudes(l, r) {
            Ordering::Equal => (Vec::new(), false),
            Ordering::Greater => {
                let (ll, lt) = l.split();
                let (rl, rt) = r.split();
                let mut out = vec![L::ZERO; l.limbs.len()];
                let b = usub_with_tops(lt, ll, rt, rl, &mut out);
                debug_assert!(!b);
                canonical(out, l.negative)
            }
            Ordering::Less => {
                let (ll, lt) = l.split();
                let (rl, rt) = r.split();
                let mut out = vec![L::ZERO; r.limbs.len()];
                let b = usub_with_tops(rt, rl, lt, ll, &mut out);
                debug_assert!(!b);
                canonical(out, r.negative)
            }
        }
    }
}

/// Signed subtraction: `l - r` as `l + (-r)`.
pub fn sub_signed<L: Limb>(l: &Decomposed<L>, r: &Decomposed<L>) -> (Vec<L>, bool) {
    add_signed(l, &r.with_sign(!r.negative))
}

// ============================================================================
// Shifts
// ============================================================================

/// `r = u << shift` for a sub-limb shift; returns the spilled high bits.
pub fn shl_limbs<L: Limb>(u: &[L], shift: u32, r: &mut [L]) -> L {
    debug_assert!(shift < L::BITS);
    debug_assert!(r.len() >= u.len());
    if shift == 0 {
        r[..u.len()].copy_from_slice(u);
        return L::ZERO;
    }
    let rsh = L::BITS - shift;
    let mut low = L::ZERO;
    for i in 0..u.len() {
        r[i] = u[i].shl(shift).bitor(low);
        low = u[i].shr(rsh);
    }
    low
}

/// In-place `u <<= shift`; returns the spilled high bits.
pub fn shl_assign_limbs<L: Limb>(u: &mut [L], shift: u32) -> L {
    debug_assert!(shift < L::BITS);
    if shift == 0 || u.is_empty() {
        return L::ZERO;
    }
    let rsh = L::BITS - shift;
    let spill = u[u.len() - 1].shr(rsh);
    for i in (1..u.len()).rev() {
        u[i] = u[i].shl(shift).bitor(u[i - 1].shr(rsh));
    }
    u[0] = u[0].shl(shift);
    spill
}

/// `r = u >> shift` (the floor-quotient by `2^shift`); returns the
/// discarded low bits, left-justified in a limb.
pub fn shr_limbs<L: Limb>(u: &[L], shift: u32, r: &mut [L]) -> L {
    debug_assert!(shift < L::BITS);
    debug_assert!(r.len() >= u.len());
    if shift == 0 {
        r[..u.len()].copy_from_slice(u);
        return L::ZERO;
    }
    let lsh = L::BITS - shift;
    let mut high = L::ZERO;
    for i in (0..u.len()).rev() {
        r[i] = u[i].shr(shift).bitor(high);
        high = u[i].shl(lsh);
    }
    high
}

/// In-place `u >>= shift`; returns the discarded low bits, left-justified.
pub fn shr_assign_limbs<L: Limb>(u: &mut [L], shift: u32) -> L {
    debug_assert!(shift < L::BITS);
    if shift == 0 || u.is_empty() {
        return L::ZERO;
    }
    let lsh = L::BITS - shift;
    let spill = u[0].shl(lsh);
    for i in 0..u.len() - 1 {
        u[i] = u[i].shr(shift).bitor(u[i + 1].shl(lsh));
    }
    let last = u.len() - 1;
    u[last] = u[last].shr(shift);
    spill
}

// ============================================================================
// Bitwise
// ============================================================================

/// `r = u | v`; `r.len() >= max(u.len(), v.len())`.
pub fn uor<L: Limb>(u: &[L], v: &[L], r: &mut [L]) {
    let (long, short) = if u.len() >= v.len() { (u, v) } else { (v, u) };
    for i in 0..short.len() {
        r[i] = long[i].bitor(short[i]);
    }
    r[short.len()..long.len()].copy_from_slice(&long[short.len()..]);
}

/// `r = u ^ v`; `r.len() >= max(u.len(), v.len())`.
pub fn uxor<L: Limb>(u: &[L], v: &[L], r: &mut [L]) {
    let (long, short) = if u.len() >= v.len() { (u, v) } else { (v, u) };
    for i in 0..short.len() {
        r[i] = long[i].bitxor(short[i]);
    }
    r[short.len()..long.len()].copy_from_slice(&long[short.len()..]);
}

/// `r = u & v`; `r.len() >= min(u.len(), v.len())`.
pub fn uand<L: Limb>(u: &[L], v: &[L], r: &mut [L]) {
    let n = u.len().min(v.len());
    for i in 0..n {
        r[i] = u[i].bitand(v[i]);
    }
}

// ============================================================================
// Scalar multiply / multiply-add
// ============================================================================

/// `r = u * v`; `r.len() == u.len()`. Returns the carry limb.
pub fn mul1<L: Limb>(u: &[L], v: L, r: &mut [L]) -> L {
    debug_assert!(r.len() >= u.len());
    let mut carry = L::ZERO;
    for i in 0..u.len() {
        let (hi, lo) = L::mul_full(u[i], v);
        let (s, c) = L::add_cc(lo, carry, false);
        r[i] = s;
        carry = hi.wrapping_add(L::from_u64_truncate(c as u64));
    }
    carry
}

/// Fused multiply-add row: `r += u * v` over `u.len()` limbs. Returns the
/// carry limb. Inner loop of schoolbook multiplication.
pub fn mul1_add<L: Limb>(u: &[L], v: L, r: &mut [L]) -> L {
    debug_assert!(r.len() >= u.len());
    let mut carry = L::ZERO;
    for i in 0..u.len() {
        let (hi, lo) = L::mul_full(u[i], v);
        let (s1, c1) = L::add_cc(lo, carry, false);
        let (s2, c2) = L::add_cc(r[i], s1, false);
        r[i] = s2;
        // per-position total is < base^2, so the outgoing carry fits a limb
        carry = hi
            .wrapping_add(L::from_u64_truncate(c1 as u64))
            .wrapping_add(L::from_u64_truncate(c2 as u64));
    }
    carry
}

/// Four-lane unrolled multiply-add row; identical contract to [`mul1_add`],
/// requires `u.len()` to be a positive multiple of four.
pub fn mul1_add_x4<L: Limb>(u: &[L], v: L, r: &mut [L]) -> L {
    debug_assert!(!u.is_empty() && u.len() % 4 == 0);
    debug_assert!(r.len() >= u.len());
    let mut carry = L::ZERO;
    let mut i = 0;
    while i < u.len() {
        let (h0, l0) = L::mul_full(u[i], v);
        let (h1, l1) = L::mul_full(u[i + 1], v);
        let (h2, l2) = L::mul_full(u[i + 2], v);
        let (h3, l3) = L::mul_full(u[i + 3], v);

        let (s, c1) = L::add_cc(l0, carry, false);
        let (s, c2) = L::add_cc(r[i], s, false);
        r[i] = s;
        carry = h0
            .wrapping_add(L::from_u64_truncate(c1 as u64))
            .wrapping_add(L::from_u64_truncate(c2 as u64));

        let (s, c1) = L::add_cc(l1, carry, false);
        let (s, c2) = L::add_cc(r[i + 1], s, false);
        r[i + 1] = s;
        carry = h1
            .wrapping_add(L::from_u64_truncate(c1 as u64))
            .wrapping_add(L::from_u64_truncate(c2 as u64));

        let (s, c1) = L::add_cc(l2, carry, false);
        let (s, c2) = L::add_cc(r[i + 2], s, false);
        r[i + 2] = s;
        carry = h2
            .wrapping_add(L::from_u64_truncate(c1 as u64))
            .wrapping_add(L::from_u64_truncate(c2 as u64));

        let (s, c1) = L::add_cc(l3, carry, false);
        let (s, c2) = L::add_cc(r[i + 3], s, false);
        r[i + 3] = s;
        carry = h3
            .wrapping_add(L::from_u64_truncate(c1 as u64))
            .wrapping_add(L::from_u64_truncate(c2 as u64));

        i += 4;
    }
    carry
}

// ============================================================================
// Schoolbook multiplication
// ============================================================================

/// `r = u * v`, schoolbook; `r.len() == u.len() + v.len()`, both operands
/// non-empty. Every limb of `r` is written.
pub fn mul_basecase<L: Limb>(u: &[L], v: &[L], r: &mut [L]) {
    L::mul_basecase(u, v, r)
}

/// Portable schoolbook kernel: one `mul1` row then `mul1_add` rows against
/// a sliding window of the result.
pub fn mul_basecase_portable<L: Limb>(u: &[L], v: &[L], r: &mut [L]) {
    debug_assert!(!u.is_empty() && !v.is_empty());
    debug_assert!(r.len() == u.len() + v.len());
    let (u, v) = if u.len() >= v.len() { (u, v) } else { (v, u) };
    let c = mul1(u, v[0], &mut r[..u.len()]);
    r[u.len()] = c;
    for (i, &vi) in v.iter().enumerate().skip(1) {
        let c = mul1_add(u, vi, &mut r[i..i + u.len()]);
        r[i + u.len()] = c;
    }
}

/// Schoolbook kernel using the four-lane row when the longer operand's
/// length allows it.
pub fn mul_basecase_unrolled(u: &[u64], v: &[u64], r: &mut [u64]) {
    debug_assert!(!u.is_empty() && !v.is_empty());
    debug_assert!(r.len() == u.len() + v.len());
    let (u, v) = if u.len() >= v.len() { (u, v) } else { (v, u) };
    if u.len() % 4 != 0 {
        let c = mul1(u, v[0], &mut r[..u.len()]);
        r[u.len()] = c;
        for (i, &vi) in v.iter().enumerate().skip(1) {
            let c = mul1_add(u, vi, &mut r[i..i + u.len()]);
            r[i + u.len()] = c;
        }
        return;
    }
    let c = mul1(u, v[0], &mut r[..u.len()]);
    r[u.len()] = c;
    for (i, &vi) in v.iter().enumerate().skip(1) {
        let c = mul1_add_x4(u, vi, &mut r[i..i + u.len()]);
        r[i + u.len()] = c;
    }
}

type MulKernel = fn(&[u64], &[u64], &mut [u64]);

static MUL_KERNEL: OnceLock<MulKernel> = OnceLock::new();

// The kernels are interchangeable; the probe just picks the row shape.
// Correctness does not depend on the choice.
fn select_mul_kernel() -> MulKernel {
    mul_basecase_unrolled
}

/// One-shot selected schoolbook kernel for 64-bit limbs. The first caller
/// installs the kernel; initialisation is idempotent and safe under
/// concurrent first-callers.
pub fn mul_basecase_u64(u: &[u64], v: &[u64], r: &mut [u64]) {
    let kernel = *MUL_KERNEL.get_or_init(select_mul_kernel);
    kernel(u, v, r)
}

/// Ripple-add a single limb into `r`, propagating the carry upward.
fn ripple_add<L: Limb>(r: &mut [L], add: L) {
    let mut c = add;
    let mut i = 0;
    while !c.is_zero() {
        debug_assert!(i < r.len());
        let (s, over) = L::add_cc(r[i], c, false);
        r[i] = s;
        c = L::from_u64_truncate(over as u64);
        i += 1;
    }
}

/// `(uh * B^n + u) * (vh * B^m + v)` where `n = u.len()`, `m = v.len()`:
/// the fully-meaningful prefixes are multiplied first, then the masked
/// tops and cross terms are folded in. `r.len() >= n + m + 2`, zeroed by
/// the kernel. Returns the significant length.
pub fn mul_with_tops<L: Limb>(uh: L, u: &[L], vh: L, v: &[L], r: &mut [L]) -> usize {
    let n = u.len();
    let m = v.len();
    debug_assert!(r.len() >= n + m + 2);
    for limb in r[..n + m + 2].iter_mut() {
        *limb = L::ZERO;
    }
    if !u.is_empty() && !v.is_empty() {
        if n >= m {
            mul_basecase(u, v, &mut r[..n + m]);
        } else {
            mul_basecase(v, u, &mut r[..n + m]);
        }
    }
    if !v.is_empty() {
        let c = mul1_add(v, uh, &mut r[n..n + m]);
        ripple_add(&mut r[n + m..], c);
    }
    if !u.is_empty() {
        let c = mul1_add(u, vh, &mut r[m..m + n]);
        ripple_add(&mut r[m + n..], c);
    }
    let (hi, lo) = L::mul_full(uh, vh);
    let (s, c) = L::add_cc(r[n + m], lo, false);
    r[n + m] = s;
    let (s, c) = L::add_cc(r[n + m + 1], hi, c);
    r[n + m + 1] = s;
    debug_assert!(!c);

    let mut len = n + m + 2;
    while len > 0 && r[len - 1].is_zero() {
        len -= 1;
    }
    len
}

/// Signed multiplication over decompositions.
pub fn mul_signed<L: Limb>(l: &Decomposed<L>, r: &Decomposed<L>) -> (Vec<L>, bool) {
    if l.is_zero() || r.is_zero() {
        return (Vec::new(), false);
    }
    let negative = l.negative != r.negative;
    if l.limbs.len() == 1 && r.limbs.len() == 1 {
        let (hi, lo) = L::mul_full(l.top(), r.top());
        let mut out = vec![lo];
        if !hi.is_zero() {
            out.push(hi);
        }
        return (out, negative);
    }
    let n = l.limbs.len() + r.limbs.len();
    if l.mask == L::MAX && r.mask == L::MAX {
        let mut out = vec![L::ZERO; n];
        if l.limbs.len() >= r.limbs.len() {
            mul_basecase(l.limbs, r.limbs, &mut out);
        } else {
            mul_basecase(r.limbs, l.limbs, &mut out);
        }
        canonical(out, negative)
    } else {
        let (ll, lt) = l.split();
        let (rl, rt) = r.split();
        let mut out = vec![L::ZERO; n + 2];
        let len = mul_with_tops(lt, ll, rt, rl, &mut out);
        out.truncate(len);
        (out, negative)
    }
}

/// Drop redundant top-limb zeros.
pub fn trim_zeros<L: Limb>(v: &mut Vec<L>) {
    while v.last().is_some_and(|l| l.is_zero()) {
        v.pop();
    }
}
