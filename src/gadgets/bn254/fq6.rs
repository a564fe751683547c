//! BN254 cubic extension Fq6 = Fq2[v]/(v³ - ξ), ξ = 9 + u.

use rand::Rng;

use crate::{circuit::CircuitContext, gadgets::bn254::fq2::Fq2};

#[derive(Clone, Debug)]
pub struct Fq6<T>(pub [Fq2<T>; 3]);

impl<T: Clone> Fq6<T> {
    pub fn c0(&self) -> &Fq2<T> {
        &self.0[0]
    }

    pub fn c1(&self) -> &Fq2<T> {
        &self.0[1]
    }

    pub fn c2(&self) -> &Fq2<T> {
        &self.0[2]
    }

    pub fn from_components(c0: Fq2<T>, c1: Fq2<T>, c2: Fq2<T>) -> Self {
        Fq6([c0, c1, c2])
    }

    pub fn random(rng: &mut impl Rng) -> ark_bn254::Fq6 {
        ark_bn254::Fq6::new(
            Fq2::<T>::random(rng),
            Fq2::<T>::random(rng),
            Fq2::<T>::random(rng),
        )
    }

    pub fn new_constant<C: CircuitContext<Fq = T>>(circuit: &mut C, v: &ark_bn254::Fq6) -> Self {
        Fq6::from_components(
            Fq2::new_constant(circuit, &v.c0),
            Fq2::new_constant(circuit, &v.c1),
            Fq2::new_constant(circuit, &v.c2),
        )
    }

    pub fn add<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &Self) -> Self {
        Fq6::from_components(
            Fq2::add(circuit, a.c0(), b.c0()),
            Fq2::add(circuit, a.c1(), b.c1()),
            Fq2::add(circuit, a.c2(), b.c2()),
        )
    }

    pub fn sub<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &Self) -> Self {
        Fq6::from_components(
            Fq2::sub(circuit, a.c0(), b.c0()),
            Fq2::sub(circuit, a.c1(), b.c1()),
            Fq2::sub(circuit, a.c2(), b.c2()),
        )
    }

    pub fn neg<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        Fq6::from_components(
            Fq2::neg(circuit, a.c0()),
            Fq2::neg(circuit, a.c1()),
            Fq2::neg(circuit, a.c2()),
        )
    }

    pub fn double<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        Self::add(circuit, a, a)
    }

    /// Degree-3 Karatsuba: three direct products plus three cross sums,
    /// wrap-around terms folded back through ξ.
    pub fn mul<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &Self) -> Self {
        let v0 = Fq2::mul(circuit, a.c0(), b.c0());
        let v1 = Fq2::mul(circuit, a.c1(), b.c1());
        let v2 = Fq2::mul(circuit, a.c2(), b.c2());

        // a1*b2 + a2*b1
        let a12 = Fq2::add(circuit, a.c1(), a.c2());
        let b12 = Fq2::add(circuit, b.c1(), b.c2());
        let cross12 = Fq2::mul(circuit, &a12, &b12);
        let t0 = Fq2::sub(circuit, &cross12, &v1);
        let t0 = Fq2::sub(circuit, &t0, &v2);

        // a0*b1 + a1*b0
        let a01 = Fq2::add(circuit, a.c0(), a.c1());
        let b01 = Fq2::add(circuit, b.c0(), b.c1());
        let cross01 = Fq2::mul(circuit, &a01, &b01);
        let t1 = Fq2::sub(circuit, &cross01, &v0);
        let t1 = Fq2::sub(circuit, &t1, &v1);

        // a0*b2 + a2*b0
        let a02 = Fq2::add(circuit, a.c0(), a.c2());
        let b02 = Fq2::add(circuit, b.c0(), b.c2());
        let cross02 = Fq2::mul(circuit, &a02, &b02);
        let t2 = Fq2::sub(circuit, &cross02, &v0);
        let t2 = Fq2::sub(circuit, &t2, &v2);

        let t0_xi = Fq2::mul_by_nonresidue(circuit, &t0);
        let c0 = Fq2::add(circuit, &v0, &t0_xi);
        let v2_xi = Fq2::mul_by_nonresidue(circuit, &v2);
        let c1 = Fq2::add(circuit, &t1, &v2_xi);
        let c2 = Fq2::add(circuit, &t2, &v1);

        Fq6::from_components(c0, c1, c2)
    }

    pub fn square<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        let s0 = Fq2::square(circuit, a.c0());
        let ab = Fq2::mul(circuit, a.c0(), a.c1());
        let s1 = Fq2::double(circuit, &ab);
        let w1 = Fq2::sub(circuit, a.c0(), a.c1());
        let w2 = Fq2::add(circuit, &w1, a.c2());
        let s2 = Fq2::square(circuit, &w2);
        let bc = Fq2::mul(circuit, a.c1(), a.c2());
        let s3 = Fq2::double(circuit, &bc);
        let s4 = Fq2::square(circuit, a.c2());

        let s3_xi = Fq2::mul_by_nonresidue(circuit, &s3);
        let c0 = Fq2::add(circuit, &s0, &s3_xi);
        let s4_xi = Fq2::mul_by_nonresidue(circuit, &s4);
        let c1 = Fq2::add(circuit, &s1, &s4_xi);
        let w3 = Fq2::add(circuit, &s1, &s2);
        let w4 = Fq2::add(circuit, &w3, &s3);
        let w5 = Fq2::sub(circuit, &w4, &s0);
        let c2 = Fq2::sub(circuit, &w5, &s4);

        Fq6::from_components(c0, c1, c2)
    }

    /// Multiply by v: (b0 + b1*v + b2*v²)*v = ξ*b2 + b0*v + b1*v².
    /// This is the Fq12-level non-residue, not the Fq2-level one.
    pub fn mul_by_nonresidue<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        let u = Fq2::mul_by_nonresidue(circuit, a.c2());
        Fq6::from_components(u, a.c0().clone(), a.c1().clone())
    }

    pub fn mul_by_fq2<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &Fq2<T>) -> Self {
        Fq6::from_components(
            Fq2::mul(circuit, a.c0(), b),
            Fq2::mul(circuit, a.c1(), b),
            Fq2::mul(circuit, a.c2(), b),
        )
    }

    pub fn mul_by_constant_fq2<C: CircuitContext<Fq = T>>(
        circuit: &mut C,
        a: &Self,
        b: &ark_bn254::Fq2,
    ) -> Self {
        Fq6::from_components(
            Fq2::mul_by_constant(circuit, a.c0(), b),
            Fq2::mul_by_constant(circuit, a.c1(), b),
            Fq2::mul_by_constant(circuit, a.c2(), b),
        )
    }

    /// Multiply by a sparse element c0 + c1*v (b2 slot zero). Used by the
    /// line-function product on Fq12.
    pub fn mul_by_01<C: CircuitContext<Fq = T>>(
        circuit: &mut C,
        a: &Self,
        c0: &Fq2<T>,
        c1: &Fq2<T>,
    ) -> Self {
        let v0 = Fq2::mul(circuit, a.c0(), c0);
        let v1 = Fq2::mul(circuit, a.c1(), c1);

        // a2*c1 folded through ξ
        let a12 = Fq2::add(circuit, a.c1(), a.c2());
        let w1 = Fq2::mul(circuit, &a12, c1);
        let w2 = Fq2::sub(circuit, &w1, &v1);
        let w3 = Fq2::mul_by_nonresidue(circuit, &w2);
        let r0 = Fq2::add(circuit, &w3, &v0);

        // a0*c1 + a1*c0
        let a01 = Fq2::add(circuit, a.c0(), a.c1());
        let c01 = Fq2::add(circuit, c0, c1);
        let w4 = Fq2::mul(circuit, &a01, &c01);
        let w5 = Fq2::sub(circuit, &w4, &v0);
        let r1 = Fq2::sub(circuit, &w5, &v1);

        // a2*c0 + a1*c1
        let a02 = Fq2::add(circuit, a.c0(), a.c2());
        let w6 = Fq2::mul(circuit, &a02, c0);
        let w7 = Fq2::sub(circuit, &w6, &v0);
        let r2 = Fq2::add(circuit, &w7, &v1);

        Fq6::from_components(r0, r1, r2)
    }

    /// Classical norm-down inversion: one Fq2 inverse plus nine Fq2 products.
    pub fn inverse<C: CircuitContext<Fq = T>>(circuit: &mut C, r: &Self) -> Self {
        let a = r.c0();
        let b = r.c1();
        let c = r.c2();

        let a_square = Fq2::square(circuit, a);
        let b_square = Fq2::square(circuit, b);
        let c_square = Fq2::square(circuit, c);

        let ab = Fq2::mul(circuit, a, b);
        let ac = Fq2::mul(circuit, a, c);
        let bc = Fq2::mul(circuit, b, c);

        let bc_xi = Fq2::mul_by_nonresidue(circuit, &bc);
        let t0 = Fq2::sub(circuit, &a_square, &bc_xi);

        let c_square_xi = Fq2::mul_by_nonresidue(circuit, &c_square);
        let t1 = Fq2::sub(circuit, &c_square_xi, &ab);
        let t2 = Fq2::sub(circuit, &b_square, &ac);

        // norm = a*t0 + ξ(c*t1 + b*t2)
        let w1 = Fq2::mul(circuit, c, &t1);
        let w2 = Fq2::mul(circuit, b, &t2);
        let w3 = Fq2::add(circuit, &w1, &w2);
        let w4 = Fq2::mul_by_nonresidue(circuit, &w3);
        let w5 = Fq2::mul(circuit, a, &t0);
        let norm = Fq2::add(circuit, &w5, &w4);

        let inverse_norm = Fq2::inverse(circuit, &norm);
        Fq6::from_components(
            Fq2::mul(circuit, &t0, &inverse_norm),
            Fq2::mul(circuit, &t1, &inverse_norm),
            Fq2::mul(circuit, &t2, &inverse_norm),
        )
    }

    pub fn assert_equal<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self, b: &Self) {
        Fq2::assert_equal(circuit, a.c0(), b.c0());
        Fq2::assert_equal(circuit, a.c1(), b.c1());
        Fq2::assert_equal(circuit, a.c2(), b.c2());
    }
}

impl Fq6<ark_bn254::Fq> {
    pub fn to_value(&self) -> ark_bn254::Fq6 {
        ark_bn254::Fq6::new(
            self.0[0].to_value(),
            self.0[1].to_value(),
            self.0[2].to_value(),
        )
    }
}
