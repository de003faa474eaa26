//! Multi-limb division.
//!
//! `udiv` normalizes the divisor by its leading-zero count, dispatches to
//! the base case (Knuth 4.3.1.D) or, for long quotients, to a
//! Svoboda-style preconditioned loop, then denormalizes the remainder.

use std::cmp::Ordering;

use crate::error::Error;
use crate::limb::Limb;

use super::divby1::div_by_limb;
use super::{
    cmp_limbs, mul1, mul_basecase, shl_assign_limbs, shr_assign_limbs, trim_zeros, uadd_assign,
    usub_assign,
};

/// Quotient digit counts at or above this take the Svoboda path.
pub(crate) const SVOBODA_QR_THRESHOLD: usize = 8;

/// `u -= q * d` over `d.len()` limbs; returns the borrow limb.
fn submul1<L: Limb>(u: &mut [L], d: &[L], q: L) -> L {
    debug_assert!(u.len() >= d.len());
    let mut cy = L::ZERO;
    for i in 0..d.len() {
        let (hi, lo) = L::mul_full(d[i], q);
        let (lo, c) = L::add_cc(lo, cy, false);
        let hi = hi.wrapping_add(L::from_u64_truncate(c as u64));
        let (diff, b) = L::sub_bb(u[i], lo, false);
        u[i] = diff;
        cy = hi.wrapping_add(L::from_u64_truncate(b as u64));
    }
    cy
}

/// Compare equal-length limb windows (leading zeros allowed).
fn cmp_fixed<L: Limb>(u: &[L], v: &[L]) -> Ordering {
    debug_assert_eq!(u.len(), v.len());
    for i in (0..u.len()).rev() {
        match u[i].cmp(&v[i]) {
            Ordering::Equal => {}
            o => return o,
        }
    }
    Ordering::Equal
}

/// Normalized base-case division.
///
/// `un` is the dividend, `m + n + 1` limbs with the top limb below the
/// divisor's top limb; `dn` is the divisor, `n >= 2` limbs with its top
/// bit set. Produces the `m + 1` quotient digits (untrimmed); the
/// remainder is left in `un[..n]`.
///
/// Each digit is trial-estimated from the top limbs by a 2-by-1 divide
/// against the precomputed reciprocal, corrected with the second divisor
/// limb, and fixed up by add-back after the multiply-subtract when the
/// trial overshot.
fn udiv_bc<L: Limb>(un: &mut [L], dn: &[L]) -> Vec<L> {
    let n = dn.len();
    debug_assert!(n >= 2);
    debug_assert!(un.len() >= n + 1);
    let m = un.len() - n - 1;

    let dh = dn[n - 1];
    let dl2 = dn[n - 2];
    let dinv = L::inv_2by1(dh);

    let mut q = vec![L::ZERO; m + 1];

    for j in (0..=m).rev() {
        let u2 = un[j + n];
        let u1 = un[j + n - 1];
        debug_assert!(u2 <= dh);

        let mut qhat;
        if u2 >= dh {
            qhat = L::MAX;
        } else {
            let (est, mut rhat) = L::div2by1_inv(u2, u1, dh, dinv);
            qhat = est;
            let u0 = un[j + n - 2];
            loop {
                let (ph, pl) = L::mul_full(qhat, dl2);
                if ph < rhat || (ph == rhat && pl <= u0) {
                    break;
                }
                qhat = qhat.wrapping_sub(L::ONE);
                let (r2, c) = L::add_cc(rhat, dh, false);
                rhat = r2;
                if c {
                    break;
                }
            }
        }

        if !qhat.is_zero() {
            let borrow = submul1(&mut un[j..j + n], dn, qhat);
            let (t, b) = L::sub_bb(un[j + n], borrow, false);
            un[j + n] = t;
            if b {
                loop {
                    qhat = qhat.wrapping_sub(L::ONE);
                    let c = uadd_assign(&mut un[j..j + n], dn);
                    let (t, c2) = L::add_cc(un[j + n], L::ZERO, c);
                    un[j + n] = t;
                    if c2 {
                        break;
                    }
                }
            }
        }
        q[j] = qhat;
    }
    q
}

/// Svoboda-style division for long quotients.
///
/// A one-shot preconditioning computes `k = ceil(B^(n+1) / d)` so that
/// `k*d = B^(n+1) + e` with `e < B^n`. With that shape the trial digit is
/// the top limb of the remaining dividend — no 2-by-1 divide per step —
/// and the inner loop is one `mul1` by `e`, a subtract, and at most one
/// add-back. The quotient accumulated in base `k*d` is converted back by
/// a final base-case division of the low remainder plus a multiplication
/// by `k`.
fn udiv_svoboda<L: Limb>(un: &mut [L], dn: &[L]) -> Vec<L> {
    let n = dn.len();
    let m = un.len() - n - 1;
    debug_assert!(n >= 2 && m >= 2);

    // top digit: 1 iff u >= d * B^m
    let top_ge = !un[m + n].is_zero() || cmp_fixed(&un[m..m + n], dn) != Ordering::Less;
    let q_m = if top_ge {
        let b = usub_assign(&mut un[m..m + n], dn);
        let (t, b2) = L::sub_bb(un[m + n], L::from_u64_truncate(b as u64), false);
        un[m + n] = t;
        debug_assert!(!b2);
        true
    } else {
        false
    };
    debug_assert!(un[m + n].is_zero());

    // k = ceil(B^(n+1) / d), a two-limb scalar in [B, 2B]
    let mut num = vec![L::ZERO; n + 2];
    num[n + 1] = L::ONE;
    let mut k = udiv_bc(&mut num, dn);
    debug_assert_eq!(k.len(), 2);
    if num[..n].iter().any(|l| !l.is_zero()) {
        let (s, c) = L::add_cc(k[0], L::ONE, false);
        k[0] = s;
        if c {
            k[1] = k[1].wrapping_add(L::ONE);
        }
    }

    // d1 = k * d = B^(n+1) + e
    let mut d1 = vec![L::ZERO; n + 2];
    mul_basecase(dn, &k, &mut d1);
    debug_assert!(d1[n].is_zero());
    debug_assert!(d1[n + 1] == L::ONE);
    let e = d1[..n].to_vec();

    // Middle digits, high to low. The running remainder is kept below
    // d1 * B^(j-1) after every step, which allows its limb one above the
    // digit position to be 1; in that state the digit is forcibly B - 1
    // (the subtraction then cannot borrow), otherwise the digit is the
    // top limb itself with at most one add-back.
    let mut q1 = vec![L::ZERO; m - 1];
    let mut prod = vec![L::ZERO; n + 2];
    for j in (1..m).rev() {
        let qj = if !un[j + n + 1].is_zero() {
            debug_assert!(un[j + n + 1] == L::ONE);
            let qj = L::MAX;
            let c = mul1(&d1, qj, &mut prod);
            debug_assert!(c.is_zero());
            let window = &mut un[j - 1..=j + n + 1];
            let b = usub_assign(window, &prod);
            debug_assert!(!b);
            debug_assert!(un[j + n + 1].is_zero());
            qj
        } else {
            let mut qj = un[j + n];
            if !qj.is_zero() {
                let c = mul1(&d1, qj, &mut prod);
                debug_assert!(c.is_zero());
                let window = &mut un[j - 1..=j + n];
                let b = usub_assign(window, &prod);
                if b {
                    qj = qj.wrapping_sub(L::ONE);
                    let c = uadd_assign(window, &d1);
                    debug_assert!(c);
                }
            }
            qj
        };
        q1[j - 1] = qj;
    }

    // convert back to base d: q0 = r1 / d, then q = q_m*B^m + k*q1 + q0
    let mut r1 = vec![L::ZERO; n + 2];
    r1.copy_from_slice(&un[..n + 2]);
    let q0 = udiv_bc(&mut r1, dn);
    un[..n].copy_from_slice(&r1[..n]);
    un[n] = L::ZERO;
    un[n + 1] = L::ZERO;

    let mut q = vec![L::ZERO; m + 1];
    mul_basecase(&q1, &k, &mut q[..m + 1]);
    let c = uadd_assign(&mut q, &q0);
    debug_assert!(!c);
    if q_m {
        let (s, c) = L::add_cc(q[m], L::ONE, false);
        q[m] = s;
        debug_assert!(!c);
    }
    q
}

/// `u / d` on magnitudes: returns trimmed `(quotient, remainder)`.
pub fn udiv<L: Limb>(u: &[L], d: &[L]) -> Result<(Vec<L>, Vec<L>), Error> {
    let mut dlen = d.len();
    while dlen > 0 && d[dlen - 1].is_zero() {
        dlen -= 1;
    }
    let d = &d[..dlen];
    if d.is_empty() {
        return Err(Error::DivisionByZero);
    }

    let mut ulen = u.len();
    while ulen > 0 && u[ulen - 1].is_zero() {
        ulen -= 1;
    }
    let u = &u[..ulen];

    if cmp_limbs(u, d) == Ordering::Less {
        return Ok((Vec::new(), u.to_vec()));
    }

    if d.len() == 1 {
        let (q, r) = div_by_limb(u, d[0]);
        let rem = if r.is_zero() { Vec::new() } else { vec![r] };
        return Ok((q, rem));
    }

    let shift = d[d.len() - 1].leading_zeros();
    let mut dn = d.to_vec();
    if shift > 0 {
        shl_assign_limbs(&mut dn, shift);
    }
    let mut un = vec![L::ZERO; u.len() + 1];
    un[..u.len()].copy_from_slice(u);
    if shift > 0 {
        shl_assign_limbs(&mut un, shift);
    }

    let n = dn.len();
    let m = un.len() - n - 1;
    let mut q = if m >= SVOBODA_QR_THRESHOLD {
        udiv_svoboda(&mut un, &dn)
    } else {
        udiv_bc(&mut un, &dn)
    };
    trim_zeros(&mut q);

    let mut r = un[..n].to_vec();
    if shift > 0 {
        shr_assign_limbs(&mut r, shift);
    }
    trim_zeros(&mut r);
    Ok((q, r))
}
