//! Arbitrary-precision arithmetic.
//!
//! A small-buffer-optimized signed big integer ([`BigInt`]), a decimal
//! significand-times-power-of-ten type on top of it ([`Decimal`]), an IEEE
//! binary16 type ([`Float16`]), and the limb-level kernels underneath
//! ([`kernels`]), written once against the [`Limb`] trait with `u8`, `u32`
//! and `u64` instances.

mod decimal;
mod error;
mod float16;
mod integer;
pub mod kernels;
mod limb;
mod storage;

#[cfg(test)]
mod tests;

pub use decimal::Decimal;
pub use error::Error;
pub use float16::Float16;
pub use integer::{BigInt, Int};
pub use limb::Limb;
