//! Sparse multiplication by a Miller-loop line evaluation.
//!
//! With a D-type twist the line function evaluated at a point is
//! 1 + c3·w + c4·v·w: an Fq12 element whose c0 limb is the constant one
//! and whose c1 limb is the sparse Fq6 element c3 + c4·v. Multiplying the
//! Miller accumulator by it costs two sparse Fq6 products instead of a
//! full Fq12 multiplication.

use ark_ff::Field;

use crate::{
    circuit::CircuitContext,
    gadgets::bn254::{fq2::Fq2, fq6::Fq6, fq12::Fq12},
};

/// The two non-trivial Fq2 coefficients of a line evaluation; the constant
/// coefficient is implicitly one.
#[derive(Clone, Debug)]
pub struct LineEval<T> {
    pub r0: Fq2<T>,
    pub r1: Fq2<T>,
}

impl<T: Clone> Fq12<T> {
    /// a * (1 + c3·w + c4·v·w) via two sparse Fq6 products.
    pub fn mul_by_034<C: CircuitContext<Fq = T>>(
        circuit: &mut C,
        a: &Self,
        c3: &Fq2<T>,
        c4: &Fq2<T>,
    ) -> Self {
        // d = a1 * (c3 + c4 v)
        let d = Fq6::mul_by_01(circuit, a.c1(), c3, c4);

        let d_shift = Fq6::mul_by_nonresidue(circuit, &d);
        let new_c0 = Fq6::add(circuit, &d_shift, a.c0());

        // (a0 + a1) * (1 + c3 + c4 v) - d - a0 = a1 + a0 c3 + a0 c4 v + ...
        let a_sum = Fq6::add(circuit, a.c0(), a.c1());
        let one = Fq2::new_constant(circuit, &ark_bn254::Fq2::ONE);
        let c3_plus_one = Fq2::add(circuit, c3, &one);
        let cross = Fq6::mul_by_01(circuit, &a_sum, &c3_plus_one, c4);
        let tail = Fq6::add(circuit, &d, a.c0());
        let new_c1 = Fq6::sub(circuit, &cross, &tail);

        Fq12::from_components(new_c0, new_c1)
    }

    pub fn mul_by_line<C: CircuitContext<Fq = T>>(
        circuit: &mut C,
        a: &Self,
        line: &LineEval<T>,
    ) -> Self {
        Self::mul_by_034(circuit, a, &line.r0, &line.r1)
    }
}

#[cfg(test)]
mod tests {
    use ark_ff::{AdditiveGroup, Field};
    use test_log::test;

    use super::*;
    use crate::{circuit::NativeContext, test_utils::trng};

    fn sparse_line(c3: ark_bn254::Fq2, c4: ark_bn254::Fq2) -> ark_bn254::Fq12 {
        ark_bn254::Fq12::new(
            ark_bn254::Fq6::new(ark_bn254::Fq2::ONE, ark_bn254::Fq2::ZERO, ark_bn254::Fq2::ZERO),
            ark_bn254::Fq6::new(c3, c4, ark_bn254::Fq2::ZERO),
        )
    }

    #[test]
    fn test_mul_by_034() {
        let mut rng = trng();
        let a = Fq12::<ark_bn254::Fq>::random(&mut rng);
        let c3 = Fq2::<ark_bn254::Fq>::random(&mut rng);
        let c4 = Fq2::<ark_bn254::Fq>::random(&mut rng);

        let mut ctx = NativeContext::new();
        let aw = Fq12::new_constant(&mut ctx, &a);
        let c3w = Fq2::new_constant(&mut ctx, &c3);
        let c4w = Fq2::new_constant(&mut ctx, &c4);
        let r = Fq12::mul_by_034(&mut ctx, &aw, &c3w, &c4w);
        assert_eq!(r.to_value(), a * sparse_line(c3, c4));
    }

    #[test]
    fn test_mul_by_line() {
        let mut rng = trng();
        let a = Fq12::<ark_bn254::Fq>::random(&mut rng);
        let c3 = Fq2::<ark_bn254::Fq>::random(&mut rng);
        let c4 = Fq2::<ark_bn254::Fq>::random(&mut rng);

        let mut ctx = NativeContext::new();
        let aw = Fq12::new_constant(&mut ctx, &a);
        let line = LineEval {
            r0: Fq2::new_constant(&mut ctx, &c3),
            r1: Fq2::new_constant(&mut ctx, &c4),
        };
        let r = Fq12::mul_by_line(&mut ctx, &aw, &line);
        assert_eq!(r.to_value(), a * sparse_line(c3, c4));
    }

    #[test]
    fn test_mul_by_034_on_identity_is_the_line() {
        // multiplying one by the line leaves exactly the sparse literal
        let mut rng = trng();
        let c3 = Fq2::<ark_bn254::Fq>::random(&mut rng);
        let c4 = Fq2::<ark_bn254::Fq>::random(&mut rng);

        let mut ctx = NativeContext::new();
        let one = Fq12::one(&mut ctx);
        let c3w = Fq2::new_constant(&mut ctx, &c3);
        let c4w = Fq2::new_constant(&mut ctx, &c4);
        let r = Fq12::mul_by_034(&mut ctx, &one, &c3w, &c4w);
        assert_eq!(r.to_value(), sparse_line(c3, c4));
    }

    #[test]
    fn test_mul_by_034_one_line() {
        // zero coefficients degrade to multiplication by one
        let a = Fq12::<ark_bn254::Fq>::random(&mut trng());

        let mut ctx = NativeContext::new();
        let aw = Fq12::new_constant(&mut ctx, &a);
        let zero = Fq2::new_constant(&mut ctx, &ark_bn254::Fq2::ZERO);
        let r = Fq12::mul_by_034(&mut ctx, &aw, &zero, &zero);
        assert_eq!(r.to_value(), a);
    }
}
