use ark_ff::{AdditiveGroup, Field, Zero};
use tracing::{debug, warn};

use super::{CircuitContext, Error};

/// Plain modular-arithmetic engine over `ark_bn254::Fq`.
///
/// Operations evaluate eagerly; equality assertions are recorded rather than
/// enforced, so a full expression can be evaluated first and the accumulated
/// constraint set checked once via [`check`](NativeContext::check). This
/// mirrors how the production engine defers unsatisfiability to witness
/// checking.
#[derive(Debug, Default)]
pub struct NativeContext {
    constraints: usize,
    violations: Vec<usize>,
    zero_inversions: usize,
}

impl NativeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of equality constraints recorded so far.
    pub fn constraints(&self) -> usize {
        self.constraints
    }

    pub fn is_satisfied(&self) -> bool {
        self.violations.is_empty() && self.zero_inversions == 0
    }

    /// Single pass/fail signal for the accumulated constraint set.
    pub fn check(&self) -> Result<(), Error> {
        if self.zero_inversions > 0 {
            return Err(Error::DivisionByZero);
        }
        match self.violations.first() {
            Some(&index) => Err(Error::Unsatisfied { index }),
            None => Ok(()),
        }
    }
}

impl CircuitContext for NativeContext {
    type Fq = ark_bn254::Fq;

    fn fq_add(&mut self, a: &Self::Fq, b: &Self::Fq) -> Self::Fq {
        *a + *b
    }

    fn fq_sub(&mut self, a: &Self::Fq, b: &Self::Fq) -> Self::Fq {
        *a - *b
    }

    fn fq_mul(&mut self, a: &Self::Fq, b: &Self::Fq) -> Self::Fq {
        *a * *b
    }

    fn fq_neg(&mut self, a: &Self::Fq) -> Self::Fq {
        -*a
    }

    fn fq_inverse(&mut self, a: &Self::Fq) -> Self::Fq {
        match a.inverse() {
            Some(inv) => inv,
            None => {
                warn!("inverse of zero; witness is unsatisfiable");
                self.zero_inversions += 1;
                Self::Fq::ZERO
            }
        }
    }

    fn fq_is_zero(&mut self, a: &Self::Fq) -> Self::Fq {
        if a.is_zero() {
            Self::Fq::ONE
        } else {
            Self::Fq::ZERO
        }
    }

    fn fq_select(&mut self, flag: &Self::Fq, a: &Self::Fq, b: &Self::Fq) -> Self::Fq {
        if flag.is_zero() { *b } else { *a }
    }

    fn fq_constant(&mut self, v: ark_bn254::Fq) -> Self::Fq {
        v
    }

    fn fq_assert_eq(&mut self, a: &Self::Fq, b: &Self::Fq) {
        let index = self.constraints;
        self.constraints += 1;
        if a != b {
            debug!(index, "equality constraint unsatisfied");
            self.violations.push(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use ark_ff::UniformRand;
    use test_log::test;

    use super::*;
    use crate::test_utils::trng;

    #[test]
    fn test_native_satisfied() {
        let mut rng = trng();
        let a = ark_bn254::Fq::rand(&mut rng);
        let b = ark_bn254::Fq::rand(&mut rng);

        let mut ctx = NativeContext::new();
        let sum = ctx.fq_add(&a, &b);
        let expected = a + b;
        ctx.fq_assert_eq(&sum, &expected);

        assert!(ctx.is_satisfied());
        assert_eq!(ctx.constraints(), 1);
        ctx.check().unwrap();
    }

    #[test]
    fn test_native_unsatisfied() {
        let mut rng = trng();
        let a = ark_bn254::Fq::rand(&mut rng);

        let mut ctx = NativeContext::new();
        let bad = ctx.fq_add(&a, &ark_bn254::Fq::ONE);
        ctx.fq_assert_eq(&a, &bad);

        assert!(!ctx.is_satisfied());
        assert!(matches!(ctx.check(), Err(Error::Unsatisfied { index: 0 })));
    }

    #[test]
    fn test_native_is_zero_select() {
        let mut rng = trng();
        let a = ark_bn254::Fq::rand(&mut rng);
        let b = ark_bn254::Fq::rand(&mut rng);

        let mut ctx = NativeContext::new();
        let zero = ctx.fq_constant(ark_bn254::Fq::ZERO);
        let on = ctx.fq_is_zero(&zero);
        let off = ctx.fq_is_zero(&a);
        assert_eq!(on, ark_bn254::Fq::ONE);
        assert_eq!(off, ark_bn254::Fq::ZERO);

        assert_eq!(ctx.fq_select(&on, &a, &b), a);
        assert_eq!(ctx.fq_select(&off, &a, &b), b);
    }

    #[test]
    fn test_native_zero_inverse() {
        let mut ctx = NativeContext::new();
        let zero = ctx.fq_constant(ark_bn254::Fq::ZERO);
        let _ = ctx.fq_inverse(&zero);

        assert!(matches!(ctx.check(), Err(Error::DivisionByZero)));
    }
}
