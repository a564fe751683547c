//! BN254 quadratic extension field Fq2.
//!
//! Elements are represented as c0 + c1*u where c0, c1 are emulated base-field
//! values held by the engine and u² = -1. Fq2 is the first step of the tower
//! leading to Fq12; multiplication uses the 3-multiplication Karatsuba
//! identity to keep the emulated multiplication count down.

use ark_ff::{One, UniformRand, Zero};
use rand::Rng;

use crate::circuit::CircuitContext;

#[derive(Clone, Debug)]
pub struct Fq2<T>(pub [T; 2]);

impl<T: Clone> Fq2<T> {
    pub fn c0(&self) -> &T {
        &self.0[0]
    }

    pub fn c1(&self) -> &T {
        &self.0[1]
    }

    pub fn from_components(c0: T, c1: T) -> Self {
        Fq2([c0, c1])
    }

    pub fn random(rng: &mut impl Rng) -> ark_bn254::Fq2 {
        ark_bn254::Fq2::new(ark_bn254::Fq::rand(rng), ark_bn254::Fq::rand(rng))
    }

    pub fn new_constant<C: CircuitContext<Fq = T>>(circuit: &mut C, v: &ark_bn254::Fq2) -> Self {
        let c0 = circuit.fq_constant(v.c0);
        let c1 = circuit.fq_constant(v.c1);
        Fq2::from_components(c0, c1)
    }

    pub fn add<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &Self) -> Self {
        let c0 = circuit.fq_add(a.c0(), b.c0());
        let c1 = circuit.fq_add(a.c1(), b.c1());
        Fq2::from_components(c0, c1)
    }

    pub fn sub<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &Self) -> Self {
        let c0 = circuit.fq_sub(a.c0(), b.c0());
        let c1 = circuit.fq_sub(a.c1(), b.c1());
        Fq2::from_components(c0, c1)
    }

    pub fn neg<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        let c0 = circuit.fq_neg(a.c0());
        let c1 = circuit.fq_neg(a.c1());
        Fq2::from_components(c0, c1)
    }

    pub fn double<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        Self::add(circuit, a, a)
    }

    pub fn triple<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        let a_2 = Self::double(circuit, a);
        Self::add(circuit, a, &a_2)
    }

    /// (c0, c1) -> (c0, -c1). For unitary Fq12 elements the Fq12-level
    /// conjugate coincides with the inverse.
    pub fn conjugate<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        let c1 = circuit.fq_neg(a.c1());
        Fq2::from_components(a.c0().clone(), c1)
    }

    pub fn mul<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &Self) -> Self {
        // (a0 + a1) and (b0 + b1)
        let a_sum = circuit.fq_add(a.c0(), a.c1());
        let b_sum = circuit.fq_add(b.c0(), b.c1());

        // a0 * b0 and a1 * b1
        let a0_b0 = circuit.fq_mul(a.c0(), b.c0());
        let a1_b1 = circuit.fq_mul(a.c1(), b.c1());

        // (a0 + a1) * (b0 + b1)
        let sum_prod = circuit.fq_mul(&a_sum, &b_sum);

        // c0 = a0*b0 - a1*b1 (u² = -1)
        let c0 = circuit.fq_sub(&a0_b0, &a1_b1);

        // c1 = (a0+a1)*(b0+b1) - a0*b0 - a1*b1 = a0*b1 + a1*b0
        let sum_a0b0_a1b1 = circuit.fq_add(&a0_b0, &a1_b1);
        let c1 = circuit.fq_sub(&sum_prod, &sum_a0b0_a1b1);

        Fq2::from_components(c0, c1)
    }

    pub fn square<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        // (a0 + a1*u)² = (a0+a1)(a0-a1) + 2*a0*a1*u
        let a0_plus_a1 = circuit.fq_add(a.c0(), a.c1());
        let a0_minus_a1 = circuit.fq_sub(a.c0(), a.c1());
        let a0_a1 = circuit.fq_mul(a.c0(), a.c1());
        let c0 = circuit.fq_mul(&a0_plus_a1, &a0_minus_a1);
        let c1 = circuit.fq_add(&a0_a1, &a0_a1);

        Fq2::from_components(c0, c1)
    }

    pub fn mul_by_fq<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &T) -> Self {
        let c0 = circuit.fq_mul(a.c0(), b);
        let c1 = circuit.fq_mul(a.c1(), b);
        Fq2::from_components(c0, c1)
    }

    pub fn mul_by_constant_fq<C: CircuitContext<Fq = T>>(
        circuit: &mut C,
        a: &Self,
        b: &ark_bn254::Fq,
    ) -> Self {
        if b.is_one() {
            return a.clone();
        }
        if (-*b).is_one() {
            return Self::neg(circuit, a);
        }
        let bw = circuit.fq_constant(*b);
        Self::mul_by_fq(circuit, a, &bw)
    }

    pub fn mul_by_constant<C: CircuitContext<Fq = T>>(
        circuit: &mut C,
        a: &Self,
        b: &ark_bn254::Fq2,
    ) -> Self {
        // Frobenius coefficients frequently degenerate to ±1 or to plain
        // base-field scalars; take the cheap paths for those.
        if b.c1.is_zero() {
            return Self::mul_by_constant_fq(circuit, a, &b.c0);
        }
        let bw = Self::new_constant(circuit, b);
        Self::mul(circuit, a, &bw)
    }

    /// Multiply by the Fq6-level non-residue ξ = 9 + u:
    /// (9*a0 - a1) + (a0 + 9*a1)*u. Additions only.
    pub fn mul_by_nonresidue<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        let a0_3 = {
            let d = circuit.fq_add(a.c0(), a.c0());
            circuit.fq_add(&d, a.c0())
        };
        let a0_9 = {
            let d = circuit.fq_add(&a0_3, &a0_3);
            circuit.fq_add(&d, &a0_3)
        };
        let a1_3 = {
            let d = circuit.fq_add(a.c1(), a.c1());
            circuit.fq_add(&d, a.c1())
        };
        let a1_9 = {
            let d = circuit.fq_add(&a1_3, &a1_3);
            circuit.fq_add(&d, &a1_3)
        };

        let c0 = circuit.fq_sub(&a0_9, a.c1());
        let c1 = circuit.fq_add(&a1_9, a.c0());

        Fq2::from_components(c0, c1)
    }

    /// (a0 + a1*u)⁻¹ = (a0 - a1*u) / (a0² + a1²). The norm inverse is
    /// unchecked: a zero operand surfaces only at witness checking.
    pub fn inverse<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        let a0_square = circuit.fq_mul(a.c0(), a.c0());
        let a1_square = circuit.fq_mul(a.c1(), a.c1());
        let norm = circuit.fq_add(&a0_square, &a1_square);
        let inverse_norm = circuit.fq_inverse(&norm);

        let c0 = circuit.fq_mul(a.c0(), &inverse_norm);
        let neg_a1 = circuit.fq_neg(a.c1());
        let c1 = circuit.fq_mul(&neg_a1, &inverse_norm);

        Fq2::from_components(c0, c1)
    }

    pub fn div<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &Self) -> Self {
        let b_inv = Self::inverse(circuit, b);
        Self::mul(circuit, a, &b_inv)
    }

    /// Boolean flag (one/zero) marking whether both coordinates are zero.
    pub fn is_zero<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> T {
        let z0 = circuit.fq_is_zero(a.c0());
        let z1 = circuit.fq_is_zero(a.c1());
        circuit.fq_mul(&z0, &z1)
    }

    /// Coordinate-wise selection: `a` if `flag` is one, `b` otherwise.
    pub fn select<C: CircuitContext<Fq = T>>(
        circuit: &mut C,
        flag: &T,
        a: &Self,
        b: &Self,
    ) -> Self {
        let c0 = circuit.fq_select(flag, a.c0(), b.c0());
        let c1 = circuit.fq_select(flag, a.c1(), b.c1());
        Fq2::from_components(c0, c1)
    }

    pub fn assert_equal<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &Self) {
        circuit.fq_assert_eq(a.c0(), b.c0());
        circuit.fq_assert_eq(a.c1(), b.c1());
    }
}

impl Fq2<ark_bn254::Fq> {
    /// Read back the concrete value held by a [`crate::circuit::NativeContext`].
    pub fn to_value(&self) -> ark_bn254::Fq2 {
        ark_bn254::Fq2::new(self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use ark_ff::{AdditiveGroup, Field, Fp6Config};
    use test_log::test;

    use super::*;
    use crate::{circuit::NativeContext, test_utils::trng};

    fn eval2(
        f: impl FnOnce(&mut NativeContext, &Fq2<ark_bn254::Fq>, &Fq2<ark_bn254::Fq>) -> Fq2<ark_bn254::Fq>,
        a: ark_bn254::Fq2,
        b: ark_bn254::Fq2,
    ) -> ark_bn254::Fq2 {
        let mut ctx = NativeContext::new();
        let aw = Fq2::new_constant(&mut ctx, &a);
        let bw = Fq2::new_constant(&mut ctx, &b);
        f(&mut ctx, &aw, &bw).to_value()
    }

    fn eval1(
        f: impl FnOnce(&mut NativeContext, &Fq2<ark_bn254::Fq>) -> Fq2<ark_bn254::Fq>,
        a: ark_bn254::Fq2,
    ) -> ark_bn254::Fq2 {
        let mut ctx = NativeContext::new();
        let aw = Fq2::new_constant(&mut ctx, &a);
        f(&mut ctx, &aw).to_value()
    }

    #[test]
    fn test_fq2_add() {
        let mut rng = trng();
        let a = Fq2::<ark_bn254::Fq>::random(&mut rng);
        let b = Fq2::<ark_bn254::Fq>::random(&mut rng);
        assert_eq!(eval2(|c, a, b| Fq2::add(c, a, b), a, b), a + b);
    }

    #[test]
    fn test_fq2_sub() {
        let mut rng = trng();
        let a = Fq2::<ark_bn254::Fq>::random(&mut rng);
        let b = Fq2::<ark_bn254::Fq>::random(&mut rng);
        assert_eq!(eval2(|c, a, b| Fq2::sub(c, a, b), a, b), a - b);
    }

    #[test]
    fn test_fq2_neg() {
        let a = Fq2::<ark_bn254::Fq>::random(&mut trng());
        assert_eq!(eval1(|c, a| Fq2::neg(c, a), a), -a);
    }

    #[test]
    fn test_fq2_double_triple() {
        let a = Fq2::<ark_bn254::Fq>::random(&mut trng());
        assert_eq!(eval1(|c, a| Fq2::double(c, a), a), a + a);
        assert_eq!(eval1(|c, a| Fq2::triple(c, a), a), a + a + a);
    }

    #[test]
    fn test_fq2_mul() {
        let mut rng = trng();
        let a = Fq2::<ark_bn254::Fq>::random(&mut rng);
        let b = Fq2::<ark_bn254::Fq>::random(&mut rng);
        assert_eq!(eval2(|c, a, b| Fq2::mul(c, a, b), a, b), a * b);
    }

    #[test]
    fn test_fq2_mul_schoolbook_toy() {
        // (1 + 2u)(3 + 4u) = (3 - 8) + (4 + 6)u = -5 + 10u
        let a = ark_bn254::Fq2::new(ark_bn254::Fq::from(1u64), ark_bn254::Fq::from(2u64));
        let b = ark_bn254::Fq2::new(ark_bn254::Fq::from(3u64), ark_bn254::Fq::from(4u64));
        let expected = ark_bn254::Fq2::new(-ark_bn254::Fq::from(5u64), ark_bn254::Fq::from(10u64));
        assert_eq!(eval2(|c, a, b| Fq2::mul(c, a, b), a, b), expected);
    }

    #[test]
    fn test_fq2_mul_by_constant() {
        let mut rng = trng();
        let a = Fq2::<ark_bn254::Fq>::random(&mut rng);
        let b = Fq2::<ark_bn254::Fq>::random(&mut rng);
        assert_eq!(eval1(|c, a| Fq2::mul_by_constant(c, a, &b), a), a * b);

        // degenerate constants take the shortcut paths
        assert_eq!(
            eval1(|c, a| Fq2::mul_by_constant(c, a, &ark_bn254::Fq2::ONE), a),
            a
        );
        let scalar = ark_bn254::Fq2::new(ark_bn254::Fq::from(7u64), ark_bn254::Fq::ZERO);
        assert_eq!(
            eval1(|c, a| Fq2::mul_by_constant(c, a, &scalar), a),
            a * scalar
        );
        assert_eq!(
            eval1(|c, a| Fq2::mul_by_constant(c, a, &-ark_bn254::Fq2::ONE), a),
            -a
        );
    }

    #[test]
    fn test_fq2_mul_by_nonresidue() {
        let a = Fq2::<ark_bn254::Fq>::random(&mut trng());
        let expected = ark_bn254::Fq6Config::mul_fp2_by_nonresidue(a);
        assert_eq!(eval1(|c, a| Fq2::mul_by_nonresidue(c, a), a), expected);
    }

    #[test]
    fn test_fq2_square() {
        let a = Fq2::<ark_bn254::Fq>::random(&mut trng());
        assert_eq!(eval1(|c, a| Fq2::square(c, a), a), a * a);
    }

    #[test]
    fn test_fq2_conjugate() {
        let a = Fq2::<ark_bn254::Fq>::random(&mut trng());
        let expected = ark_bn254::Fq2::new(a.c0, -a.c1);
        assert_eq!(eval1(|c, a| Fq2::conjugate(c, a), a), expected);

        // double conjugation is the identity
        let back = eval1(
            |c, a| {
                let t = Fq2::conjugate(c, a);
                Fq2::conjugate(c, &t)
            },
            a,
        );
        assert_eq!(back, a);
    }

    #[test]
    fn test_fq2_inverse() {
        let a = Fq2::<ark_bn254::Fq>::random(&mut trng());
        assert_eq!(eval1(|c, a| Fq2::inverse(c, a), a), a.inverse().unwrap());
    }

    #[test]
    fn test_fq2_div() {
        let mut rng = trng();
        let a = Fq2::<ark_bn254::Fq>::random(&mut rng);
        let b = Fq2::<ark_bn254::Fq>::random(&mut rng);
        assert_eq!(eval2(|c, a, b| Fq2::div(c, a, b), a, b), a / b);
    }

    #[test]
    fn test_fq2_is_zero_select() {
        let mut rng = trng();
        let a = Fq2::<ark_bn254::Fq>::random(&mut rng);
        let b = Fq2::<ark_bn254::Fq>::random(&mut rng);

        let mut ctx = NativeContext::new();
        let aw = Fq2::new_constant(&mut ctx, &a);
        let bw = Fq2::new_constant(&mut ctx, &b);
        let zw = Fq2::new_constant(&mut ctx, &ark_bn254::Fq2::ZERO);
        // one zero coordinate is not enough
        let pw =
            Fq2::new_constant(&mut ctx, &ark_bn254::Fq2::new(ark_bn254::Fq::ZERO, a.c1));

        let on = Fq2::is_zero(&mut ctx, &zw);
        let off = Fq2::is_zero(&mut ctx, &aw);
        let partial = Fq2::is_zero(&mut ctx, &pw);
        assert_eq!(on, ark_bn254::Fq::ONE);
        assert_eq!(off, ark_bn254::Fq::ZERO);
        assert_eq!(partial, ark_bn254::Fq::ZERO);

        assert_eq!(Fq2::select(&mut ctx, &on, &aw, &bw).to_value(), a);
        assert_eq!(Fq2::select(&mut ctx, &off, &aw, &bw).to_value(), b);
    }

    #[test]
    fn test_fq2_assert_equal() {
        let a = Fq2::<ark_bn254::Fq>::random(&mut trng());

        let mut ctx = NativeContext::new();
        let aw = Fq2::new_constant(&mut ctx, &a);
        let bw = Fq2::new_constant(&mut ctx, &a);
        Fq2::assert_equal(&mut ctx, &aw, &bw);
        assert_eq!(ctx.constraints(), 2);
        ctx.check().unwrap();

        let cw = Fq2::new_constant(&mut ctx, &(a + a));
        Fq2::assert_equal(&mut ctx, &aw, &cw);
        assert!(ctx.check().is_err());
    }
}
