//! Base-field engine boundary.
//!
//! The tower gadgets never touch limbs, ranges, or reduction; they only
//! consume the capability interface below. The real non-native arithmetic
//! engine of the surrounding proof system implements [`CircuitContext`];
//! [`NativeContext`] is the plain modular-arithmetic implementation used for
//! witness assignment and tests.

use std::fmt;

mod native;

pub use native::NativeContext;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("equality constraint {index} unsatisfied")]
    Unsatisfied { index: usize },
    #[error("inverse of zero requested while evaluating the witness")]
    DivisionByZero,
}

/// Capability interface of the emulated base field Fq.
///
/// Every tower operation threads a `&mut C` through and is pure with respect
/// to its operands: the only externally observable side effect is constraint
/// emission via [`fq_assert_eq`](CircuitContext::fq_assert_eq). `fq_inverse`
/// is unchecked: an engine is free to produce garbage for a zero input, and
/// the violation surfaces only when a complete witness is checked.
pub trait CircuitContext {
    type Fq: Clone + fmt::Debug;

    fn fq_add(&mut self, a: &Self::Fq, b: &Self::Fq) -> Self::Fq;
    fn fq_sub(&mut self, a: &Self::Fq, b: &Self::Fq) -> Self::Fq;
    fn fq_mul(&mut self, a: &Self::Fq, b: &Self::Fq) -> Self::Fq;
    fn fq_neg(&mut self, a: &Self::Fq) -> Self::Fq;
    fn fq_inverse(&mut self, a: &Self::Fq) -> Self::Fq;
    /// One if `a` is zero, zero otherwise, usable as a selection flag.
    fn fq_is_zero(&mut self, a: &Self::Fq) -> Self::Fq;
    /// `a` if `flag` is one, `b` if it is zero. `flag` must be boolean;
    /// gadgets branch on values only through this, never natively.
    fn fq_select(&mut self, flag: &Self::Fq, a: &Self::Fq, b: &Self::Fq) -> Self::Fq;
    fn fq_constant(&mut self, v: ark_bn254::Fq) -> Self::Fq;
    fn fq_assert_eq(&mut self, a: &Self::Fq, b: &Self::Fq);
}
