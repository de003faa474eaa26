//! Division of a multi-limb magnitude by a single limb.

use crate::limb::Limb;

use super::trim_zeros;

/// `u / d` for a nonzero single-limb divisor. Returns the quotient
/// (trimmed) and the remainder.
///
/// Three paths: `d == 1` is a copy; a power-of-two divisor reduces to a
/// shift and a mask; otherwise `d` is normalized once, its reciprocal is
/// precomputed, and the quotient digits are produced top-down with
/// [`Limb::div2by1_inv`].
pub fn div_by_limb<L: Limb>(u: &[L], d: L) -> (Vec<L>, L) {
    debug_assert!(!d.is_zero());
    if u.is_empty() {
        return (Vec::new(), L::ZERO);
    }
    if d == L::ONE {
        return (u.to_vec(), L::ZERO);
    }

    let zcnt = d.leading_zeros();

    if d.bitand(d.wrapping_sub(L::ONE)).is_zero() {
        // power of two: quotient is a right shift, remainder the low bits
        let shift = L::BITS - 1 - zcnt;
        let rem = u[0].bitand(d.wrapping_sub(L::ONE));
        let mut q = vec![L::ZERO; u.len()];
        super::shr_limbs(u, shift, &mut q);
        trim_zeros(&mut q);
        return (q, rem);
    }

    let mut q = vec![L::ZERO; u.len()];
    let rem = if zcnt == 0 {
        let dinv = L::inv_2by1(d);
        let mut r = L::ZERO;
        for i in (0..u.len()).rev() {
            let (qi, r2) = L::div2by1_inv(r, u[i], d, dinv);
            q[i] = qi;
            r = r2;
        }
        r
    } else {
        // divide the virtually-shifted dividend by the normalized divisor;
        // the quotient is unchanged, the remainder comes back shifted
        let dnorm = d.shl(zcnt);
        let dinv = L::inv_2by1(dnorm);
        let rsh = L::BITS - zcnt;
        let mut r = u[u.len() - 1].shr(rsh);
        for i in (0..u.len()).rev() {
            let lo = if i > 0 { u[i - 1].shr(rsh) } else { L::ZERO };
            let vi = u[i].shl(zcnt).bitor(lo);
            let (qi, r2) = L::div2by1_inv(r, vi, dnorm, dinv);
            q[i] = qi;
            r = r2;
        }
        r.shr(zcnt)
    };
    trim_zeros(&mut q);
    (q, rem)
}
