//! BN254 degree-12 extension Fq12 = Fq6[w]/(w² - v).
//!
//! The top of the tower: pairing values and Miller-loop accumulators live
//! here. Frobenius endomorphisms are implemented coordinate-wise with
//! precomputed Fq2 constants so that no generic Fq12 multiplication is
//! spent on them.

use ark_ff::{Field, Fp12Config, Fp6Config};
use rand::Rng;

use crate::{
    circuit::CircuitContext,
    gadgets::bn254::{fq2::Fq2, fq6::Fq6},
};

#[derive(Clone, Debug)]
pub struct Fq12<T>(pub [Fq6<T>; 2]);

/// Per-coordinate Frobenius constants for `x ↦ x^(p^power)`.
///
/// Writing a = Σ a_{jk} v^j w^k with a_{jk} in Fq2, the map sends each
/// coordinate to its (power-fold) conjugate times ξ^{m(p^power - 1)/6}
/// where m = 2j + k indexes the basis element v^j w^k = W^m over Fq2.
/// The five non-trivial scalars, in coordinate order
/// (c0.b1, c0.b2, c1.b0, c1.b1, c1.b2), come out of the arkworks
/// configuration tables with the w-coset factor folded in.
fn frobenius_coeffs(power: usize) -> [ark_bn254::Fq2; 5] {
    let q1 = ark_bn254::Fq6Config::FROBENIUS_COEFF_FP6_C1[power % 6];
    let q2 = ark_bn254::Fq6Config::FROBENIUS_COEFF_FP6_C2[power % 6];
    let w1 = ark_bn254::Fq12Config::FROBENIUS_COEFF_FP12_C1[power % 12];
    [q1, q2, w1, q1 * w1, q2 * w1]
}

impl<T: Clone> Fq12<T> {
    pub fn c0(&self) -> &Fq6<T> {
        &self.0[0]
    }

    pub fn c1(&self) -> &Fq6<T> {
        &self.0[1]
    }

    pub fn from_components(c0: Fq6<T>, c1: Fq6<T>) -> Self {
        Fq12([c0, c1])
    }

    pub fn random(rng: &mut impl Rng) -> ark_bn254::Fq12 {
        ark_bn254::Fq12::new(Fq6::<T>::random(rng), Fq6::<T>::random(rng))
    }

    pub fn new_constant<C: CircuitContext<Fq = T>>(circuit: &mut C, v: &ark_bn254::Fq12) -> Self {
        Fq12::from_components(
            Fq6::new_constant(circuit, &v.c0),
            Fq6::new_constant(circuit, &v.c1),
        )
    }

    pub fn one<C: CircuitContext<Fq = T>>(circuit: &mut C) -> Self {
        Self::new_constant(circuit, &ark_bn254::Fq12::ONE)
    }

    pub fn add<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &Self) -> Self {
        Fq12::from_components(
            Fq6::add(circuit, a.c0(), b.c0()),
            Fq6::add(circuit, a.c1(), b.c1()),
        )
    }

    pub fn sub<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &Self) -> Self {
        Fq12::from_components(
            Fq6::sub(circuit, a.c0(), b.c0()),
            Fq6::sub(circuit, a.c1(), b.c1()),
        )
    }

    pub fn neg<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        Fq12::from_components(Fq6::neg(circuit, a.c0()), Fq6::neg(circuit, a.c1()))
    }

    /// (c0, c1) -> (c0, -c1). For elements of the cyclotomic subgroup this
    /// is the inverse, at the cost of six negations.
    pub fn conjugate<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        Fq12::from_components(a.c0().clone(), Fq6::neg(circuit, a.c1()))
    }

    pub fn mul<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &Self) -> Self {
        let v0 = Fq6::mul(circuit, a.c0(), b.c0());
        let v1 = Fq6::mul(circuit, a.c1(), b.c1());

        let a_sum = Fq6::add(circuit, a.c0(), a.c1());
        let b_sum = Fq6::add(circuit, b.c0(), b.c1());
        let cross = Fq6::mul(circuit, &a_sum, &b_sum);
        let c1 = Fq6::sub(circuit, &cross, &v0);
        let c1 = Fq6::sub(circuit, &c1, &v1);

        let v1_shift = Fq6::mul_by_nonresidue(circuit, &v1);
        let c0 = Fq6::add(circuit, &v0, &v1_shift);

        Fq12::from_components(c0, c1)
    }

    /// Complex squaring over the quadratic step w² = v.
    pub fn square<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        let v0 = Fq6::mul(circuit, a.c0(), a.c1());

        let sum = Fq6::add(circuit, a.c0(), a.c1());
        let a1_shift = Fq6::mul_by_nonresidue(circuit, a.c1());
        let mixed = Fq6::add(circuit, a.c0(), &a1_shift);
        let t = Fq6::mul(circuit, &sum, &mixed);

        let v0_shift = Fq6::mul_by_nonresidue(circuit, &v0);
        let c0 = Fq6::sub(circuit, &t, &v0);
        let c0 = Fq6::sub(circuit, &c0, &v0_shift);
        let c1 = Fq6::double(circuit, &v0);

        Fq12::from_components(c0, c1)
    }

    pub fn inverse<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        // norm = a0² - v*a1² lands in Fq6
        let a0_square = Fq6::square(circuit, a.c0());
        let a1_square = Fq6::square(circuit, a.c1());
        let a1_square_shift = Fq6::mul_by_nonresidue(circuit, &a1_square);
        let norm = Fq6::sub(circuit, &a0_square, &a1_square_shift);

        let inverse_norm = Fq6::inverse(circuit, &norm);
        let c0 = Fq6::mul(circuit, a.c0(), &inverse_norm);
        let a1_neg = Fq6::neg(circuit, a.c1());
        let c1 = Fq6::mul(circuit, &a1_neg, &inverse_norm);

        Fq12::from_components(c0, c1)
    }

    /// a/b without a zero check on b: the inverse is unchecked, so a zero
    /// divisor yields engine-defined garbage that only surfaces when the
    /// witness is checked.
    pub fn div_unchecked<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &Self) -> Self {
        let b_inv = Self::inverse(circuit, b);
        Self::mul(circuit, a, &b_inv)
    }

    fn apply_frobenius<C: CircuitContext<Fq = T>>(
        circuit: &mut C,
        a: &Self,
        power: usize,
    ) -> Self {
        let [q1, q2, w1, q1w1, q2w1] = frobenius_coeffs(power);

        let conj = |circuit: &mut C, x: &Fq2<T>| -> Fq2<T> {
            if power % 2 == 1 {
                Fq2::conjugate(circuit, x)
            } else {
                x.clone()
            }
        };

        let a00 = conj(circuit, a.c0().c0());
        let a01 = conj(circuit, a.c0().c1());
        let a02 = conj(circuit, a.c0().c2());
        let a10 = conj(circuit, a.c1().c0());
        let a11 = conj(circuit, a.c1().c1());
        let a12 = conj(circuit, a.c1().c2());

        let c01 = Fq2::mul_by_constant(circuit, &a01, &q1);
        let c02 = Fq2::mul_by_constant(circuit, &a02, &q2);
        let c10 = Fq2::mul_by_constant(circuit, &a10, &w1);
        let c11 = Fq2::mul_by_constant(circuit, &a11, &q1w1);
        let c12 = Fq2::mul_by_constant(circuit, &a12, &q2w1);

        Fq12::from_components(
            Fq6::from_components(a00, c01, c02),
            Fq6::from_components(c10, c11, c12),
        )
    }

    /// x ↦ x^p.
    pub fn frobenius<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        Self::apply_frobenius(circuit, a, 1)
    }

    /// x ↦ x^(p²). All five constants degenerate to base-field scalars, so
    /// this costs only constant multiplications.
    pub fn frobenius_square<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        Self::apply_frobenius(circuit, a, 2)
    }

    /// x ↦ x^(p³).
    pub fn frobenius_cube<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        Self::apply_frobenius(circuit, a, 3)
    }

    pub fn assert_equal<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &Self) {
        Fq6::assert_equal(circuit, a.c0(), b.c0());
        Fq6::assert_equal(circuit, a.c1(), b.c1());
    }
}

impl Fq12<ark_bn254::Fq> {
    pub fn to_value(&self) -> ark_bn254::Fq12 {
        ark_bn254::Fq12::new(self.0[0].to_value(), self.0[1].to_value())
    }
}
