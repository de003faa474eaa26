//! Packed small-buffer storage for signed magnitudes.
//!
//! A value either lives *inplaced* — the magnitude packed into `N` inline
//! limbs, with the top limb's highest bit the is-inplaced flag (always 1 in
//! this layout) and the next bit the sign — or on the heap as an
//! exclusively owned limb vector plus a sign. The enum discriminant is the
//! side byte carrying the layout; the flag bit is still maintained inside
//! the inline limbs so the packed word classifies on its own.
//!
//! The inline magnitude budget is `N * BITS - 2` bits. Construction
//! promotes to the heap when a value exceeds it; kernel results keep their
//! heap buffer even when small (a zero magnitude always collapses to the
//! canonical inplaced zero). The two layouts are observationally
//! indistinguishable: comparison, ordering and hashing go through the
//! decomposed view.

use std::hash::{Hash, Hasher};

use crate::kernels::{self, Decomposed};
use crate::limb::Limb;

#[inline]
fn flag_bit<L: Limb>() -> L {
    L::ONE.shl(L::BITS - 1)
}

#[inline]
fn sign_bit<L: Limb>() -> L {
    L::ONE.shl(L::BITS - 2)
}

/// Mask selecting the magnitude bits of the top inline limb.
#[inline]
pub(crate) fn top_mag_mask<L: Limb>() -> L {
    L::MAX.shr(2)
}

#[derive(Clone, Debug)]
pub(crate) enum Repr<L: Limb, const N: usize> {
    Inline([L; N]),
    Heap { limbs: Vec<L>, negative: bool },
}

impl<L: Limb, const N: usize> Repr<L, N> {
    pub fn zero() -> Self {
        const { assert!(N > 0) }
        let mut a = [L::ZERO; N];
        a[N - 1] = flag_bit::<L>();
        Repr::Inline(a)
    }

    pub fn is_inplaced(&self) -> bool {
        matches!(self, Repr::Inline(_))
    }

    /// Inline candidate: fits iff the trimmed magnitude needs at most `N`
    /// limbs and the top one stays under the flag/sign bits.
    pub fn try_inline(negative: bool, mag: &[L]) -> Option<Self> {
        let mut len = mag.len();
        while len > 0 && mag[len - 1].is_zero() {
            len -= 1;
        }
        if len > N || (len == N && mag[N - 1] > top_mag_mask::<L>()) {
            return None;
        }
        let mut a = [L::ZERO; N];
        a[..len].copy_from_slice(&mag[..len]);
        a[N - 1] = a[N - 1].bitor(flag_bit::<L>());
        if negative && len > 0 {
            a[N - 1] = a[N - 1].bitor(sign_bit::<L>());
        }
        Some(Repr::Inline(a))
    }

    /// Construction entry: prefers the inplaced layout, promotes otherwise.
    pub fn new(negative: bool, mag: Vec<L>) -> Self {
        if let Some(r) = Self::try_inline(negative, &mag) {
            return r;
        }
        let mut limbs = mag;
        kernels::trim_zeros(&mut limbs);
        Repr::Heap { limbs, negative }
    }

    /// Kernel-result entry: keeps the heap buffer unless the magnitude is
    /// zero.
    pub fn from_kernel(negative: bool, mut mag: Vec<L>) -> Self {
        kernels::trim_zeros(&mut mag);
        if mag.is_empty() {
            return Self::zero();
        }
        let negative = negative && !mag.is_empty();
        Repr::Heap { limbs: mag, negative }
    }

    /// Kernel view of the stored value. For inline values the top-limb
    /// mask strips the flag and sign bits.
    pub fn decompose(&self) -> Decomposed<'_, L> {
        match self {
            Repr::Inline(a) => {
                let negative = !a[N - 1].bitand(sign_bit::<L>()).is_zero();
                let top = a[N - 1].bitand(top_mag_mask::<L>());
                let mut len = N;
                while len > 0 {
                    let limb = if len == N { top } else { a[len - 1] };
                    if !limb.is_zero() {
                        break;
                    }
                    len -= 1;
                }
                let mask = if len == N { top_mag_mask::<L>() } else { L::MAX };
                Decomposed {
                    limbs: &a[..len],
                    mask,
                    negative: negative && len > 0,
                }
            }
            Repr::Heap { limbs, negative } => Decomposed {
                limbs,
                mask: L::MAX,
                negative: *negative,
            },
        }
    }

    pub fn negate(&mut self) {
        if self.decompose().is_zero() {
            return;
        }
        match self {
            Repr::Inline(a) => a[N - 1] = a[N - 1].bitxor(sign_bit::<L>()),
            Repr::Heap { negative, .. } => *negative = !*negative,
        }
    }
}

impl<L: Limb, const N: usize> PartialEq for Repr<L, N> {
    fn eq(&self, other: &Self) -> bool {
        kernels::cmp_signed(&self.decompose(), &other.decompose()) == std::cmp::Ordering::Equal
    }
}

impl<L: Limb, const N: usize> Eq for Repr<L, N> {}

impl<L: Limb, const N: usize> Hash for Repr<L, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let d = self.decompose();
        d.negative.hash(state);
        d.limbs.len().hash(state);
        if let Some((&top, rest)) = d.limbs.split_last() {
            rest.hash(state);
            top.bitand(d.mask).hash(state);
        }
    }
}
