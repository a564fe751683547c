//! Cyclotomic-subgroup arithmetic on Fq12.
//!
//! After the easy part of the final exponentiation every value lies in the
//! cyclotomic subgroup G_{Φ12(p)}, where squaring admits much cheaper
//! formulas than the generic complex squaring: Granger-Scott squaring over
//! the three Fq4 sub-towers, and the Karabina variant that keeps only four
//! of the six Fq2 coordinates across a run of consecutive squarings. The
//! fixed exponentiation by the curve seed is built from these.
//!
//! All operations here assume the operand is in the subgroup; feeding a
//! general element produces garbage without emitting any constraint.

use ark_ff::{AdditiveGroup, Field};

use crate::{
    circuit::CircuitContext,
    gadgets::bn254::{fq2::Fq2, fq6::Fq6, fq12::Fq12},
};

/// BN254 curve seed t; [`Fq12::expt`] raises to this power.
pub const SEED: u64 = 4965661367192848881;

/// Lengths of the squaring runs between set bits of [`SEED`], most
/// significant bit first. The seed has no trailing zero bits, so the chain
/// is exactly: for each run, square that many times and multiply by the
/// base.
const SEED_RUNS: [usize; 27] = [
    4, 3, 1, 1, 2, 3, 1, 3, 3, 2, 2, 1, 2, 4, 3, 2, 3, 1, 2, 3, 5, 3, 1, 1, 1, 1, 4,
];

/// (a + b·W)² in Fq4 = Fq2[W]/(W² - ξ): returns (a² + ξb², 2ab).
fn fq4_square<T: Clone, C: CircuitContext<Fq = T>>(
    circuit: &mut C,
    a: &Fq2<T>,
    b: &Fq2<T>,
) -> (Fq2<T>, Fq2<T>) {
    let ab = Fq2::mul(circuit, a, b);
    let a_plus_b = Fq2::add(circuit, a, b);
    let b_xi = Fq2::mul_by_nonresidue(circuit, b);
    let a_plus_b_xi = Fq2::add(circuit, a, &b_xi);
    let t = Fq2::mul(circuit, &a_plus_b, &a_plus_b_xi);
    let ab_xi = Fq2::mul_by_nonresidue(circuit, &ab);
    let t = Fq2::sub(circuit, &t, &ab);
    let t = Fq2::sub(circuit, &t, &ab_xi);
    let double_ab = Fq2::double(circuit, &ab);
    (t, double_ab)
}

/// 3t - 2c
fn three_minus<T: Clone, C: CircuitContext<Fq = T>>(
    circuit: &mut C,
    t: &Fq2<T>,
    c: &Fq2<T>,
) -> Fq2<T> {
    let w = Fq2::sub(circuit, t, c);
    let w2 = Fq2::double(circuit, &w);
    Fq2::add(circuit, &w2, t)
}

/// 3t + 2c
fn three_plus<T: Clone, C: CircuitContext<Fq = T>>(
    circuit: &mut C,
    t: &Fq2<T>,
    c: &Fq2<T>,
) -> Fq2<T> {
    let w = Fq2::add(circuit, t, c);
    let w2 = Fq2::double(circuit, &w);
    Fq2::add(circuit, &w2, t)
}

impl<T: Clone> Fq12<T> {
    /// Granger-Scott squaring. Three Fq4 squarings instead of a full Fq12
    /// multiplication; valid only inside the cyclotomic subgroup.
    pub fn cyclotomic_square<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        let c0 = a.c0().c0();
        let c1 = a.c0().c1();
        let c2 = a.c0().c2();
        let c3 = a.c1().c0();
        let c4 = a.c1().c1();
        let c5 = a.c1().c2();

        // the three Fq4 sub-towers are spanned by (c0,c4), (c3,c2), (c1,c5)
        let (t0, t1) = fq4_square(circuit, c0, c4);
        let (t2, t3) = fq4_square(circuit, c3, c2);
        let (t4, t5) = fq4_square(circuit, c1, c5);

        let z0 = three_minus(circuit, &t0, c0);
        let z4 = three_minus(circuit, &t2, c1);
        let z3 = three_minus(circuit, &t4, c2);

        let t5_xi = Fq2::mul_by_nonresidue(circuit, &t5);
        let z2 = three_plus(circuit, &t5_xi, c3);
        let z1 = three_plus(circuit, &t1, c4);
        let z5 = three_plus(circuit, &t3, c5);

        Fq12::from_components(
            Fq6::from_components(z0, z4, z3),
            Fq6::from_components(z2, z1, z5),
        )
    }

    /// Squares while compressing: the result is the Karabina form of a².
    pub fn cyclotomic_square_compressed<C: CircuitContext<Fq = T>>(
        circuit: &mut C,
        a: &Self,
    ) -> CompressedFq12<T> {
        CompressedFq12::square(circuit, &CompressedFq12::compress(a))
    }

    /// a^t for the curve seed t, by square-and-multiply over the runs of
    /// [`SEED`]. Runs of two or more squarings go through the compressed
    /// form, paying one decompression per run; single squarings use the
    /// plain Granger-Scott formula, which is cheaper than
    /// compress-square-decompress.
    pub fn expt<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        let mut r = a.clone();
        for run in SEED_RUNS {
            if run == 1 {
                r = Self::cyclotomic_square(circuit, &r);
            } else {
                let mut compressed = Self::cyclotomic_square_compressed(circuit, &r);
                for _ in 1..run {
                    compressed = CompressedFq12::square(circuit, &compressed);
                }
                r = CompressedFq12::decompress(circuit, &compressed);
            }
            r = Self::mul(circuit, &r, a);
        }
        r
    }
}

/// Karabina 2345 compression of a cyclotomic-subgroup element.
///
/// Only the coordinates (g1, g2, g3, g5) = (c0.b1, c0.b2, c1.b0, c1.b2)
/// are kept; squaring is closed on them, and the dropped g4 and g0 are
/// recovered algebraically on [`decompress`](CompressedFq12::decompress).
#[derive(Clone, Debug)]
pub struct CompressedFq12<T>(pub [Fq2<T>; 4]);

impl<T: Clone> CompressedFq12<T> {
    /// Coordinate projection; free of engine operations.
    pub fn compress(a: &Fq12<T>) -> Self {
        CompressedFq12([
            a.c0().c1().clone(),
            a.c0().c2().clone(),
            a.c1().c0().clone(),
            a.c1().c2().clone(),
        ])
    }

    pub fn g1(&self) -> &Fq2<T> {
        &self.0[0]
    }

    pub fn g2(&self) -> &Fq2<T> {
        &self.0[1]
    }

    pub fn g3(&self) -> &Fq2<T> {
        &self.0[2]
    }

    pub fn g5(&self) -> &Fq2<T> {
        &self.0[3]
    }

    /// Compressed squaring: four Fq2 multiplications.
    ///
    ///   g1' = 3(g3² + ξg2²) - 2g1
    ///   g2' = 3(g1² + ξg5²) - 2g2
    ///   g3' = 6ξ g1g5 + 2g3
    ///   g5' = 6 g2g3 + 2g5
    pub fn square<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Self {
        let g3_square = Fq2::square(circuit, a.g3());
        let g2_square = Fq2::square(circuit, a.g2());
        let g2_square_xi = Fq2::mul_by_nonresidue(circuit, &g2_square);
        let s1 = Fq2::add(circuit, &g3_square, &g2_square_xi);
        let s1_3 = Fq2::triple(circuit, &s1);
        let g1_2 = Fq2::double(circuit, a.g1());
        let new_g1 = Fq2::sub(circuit, &s1_3, &g1_2);

        let g1_square = Fq2::square(circuit, a.g1());
        let g5_square = Fq2::square(circuit, a.g5());
        let g5_square_xi = Fq2::mul_by_nonresidue(circuit, &g5_square);
        let s2 = Fq2::add(circuit, &g1_square, &g5_square_xi);
        let s2_3 = Fq2::triple(circuit, &s2);
        let g2_2 = Fq2::double(circuit, a.g2());
        let new_g2 = Fq2::sub(circuit, &s2_3, &g2_2);

        let g1_g5 = Fq2::mul(circuit, a.g1(), a.g5());
        let g1_g5_xi = Fq2::mul_by_nonresidue(circuit, &g1_g5);
        let s3_3 = Fq2::triple(circuit, &g1_g5_xi);
        let s3_6 = Fq2::double(circuit, &s3_3);
        let g3_2 = Fq2::double(circuit, a.g3());
        let new_g3 = Fq2::add(circuit, &s3_6, &g3_2);

        let g2_g3 = Fq2::mul(circuit, a.g2(), a.g3());
        let s4_3 = Fq2::triple(circuit, &g2_g3);
        let s4_6 = Fq2::double(circuit, &s4_3);
        let g5_2 = Fq2::double(circuit, a.g5());
        let new_g5 = Fq2::add(circuit, &s4_6, &g5_2);

        CompressedFq12([new_g1, new_g2, new_g3, new_g5])
    }

    /// Recover the full element. Generically
    ///
    ///   g4 = (ξg5² + 3g1² - 2g2) / 4g3
    ///   g0 = ξ(2g4² - 3g1g2 + g3g5) + 1
    ///
    /// but a unitary element can legitimately have g3 = 0, where the
    /// back-substitution degenerates to g4 = 2g1g5 / g2, and with g2 = 0
    /// as well the element is one. The branches are folded in with the
    /// engine's selection capability, so the emitted constraints are the
    /// same for every operand. A compressed value not arising from a
    /// genuine unitary element still yields unspecified results.
    pub fn decompress<C: CircuitContext<Fq = T>>(circuit: &mut C, a: &Self) -> Fq12<T> {
        let g2_is_zero = Fq2::is_zero(circuit, a.g2());
        let g3_is_zero = Fq2::is_zero(circuit, a.g3());
        let degenerate = circuit.fq_mul(&g2_is_zero, &g3_is_zero);

        let g5_square = Fq2::square(circuit, a.g5());
        let g5_square_xi = Fq2::mul_by_nonresidue(circuit, &g5_square);
        let g1_square = Fq2::square(circuit, a.g1());
        let g1_square_3 = Fq2::triple(circuit, &g1_square);
        let g2_2 = Fq2::double(circuit, a.g2());
        let num = Fq2::add(circuit, &g5_square_xi, &g1_square_3);
        let num = Fq2::sub(circuit, &num, &g2_2);
        let g3_4 = {
            let d = Fq2::double(circuit, a.g3());
            Fq2::double(circuit, &d)
        };

        // g3 = 0 branch
        let g1_g5 = Fq2::mul(circuit, a.g1(), a.g5());
        let g1_g5_2 = Fq2::double(circuit, &g1_g5);

        let num = Fq2::select(circuit, &g3_is_zero, &g1_g5_2, &num);
        let den = Fq2::select(circuit, &g3_is_zero, a.g2(), &g3_4);
        // keep the inverse well-defined when both denominators vanish;
        // the quotient is discarded below in that case
        let one = Fq2::new_constant(circuit, &ark_bn254::Fq2::ONE);
        let den = Fq2::select(circuit, &degenerate, &one, &den);
        let quotient = Fq2::div(circuit, &num, &den);
        let zero = Fq2::new_constant(circuit, &ark_bn254::Fq2::ZERO);
        let g4 = Fq2::select(circuit, &degenerate, &zero, &quotient);

        let g4_square = Fq2::square(circuit, &g4);
        let g4_square_2 = Fq2::double(circuit, &g4_square);
        let g1_g2 = Fq2::mul(circuit, a.g1(), a.g2());
        let g1_g2_3 = Fq2::triple(circuit, &g1_g2);
        let g3_g5 = Fq2::mul(circuit, a.g3(), a.g5());
        let t = Fq2::sub(circuit, &g4_square_2, &g1_g2_3);
        let t = Fq2::add(circuit, &t, &g3_g5);
        let t_xi = Fq2::mul_by_nonresidue(circuit, &t);
        let g0 = Fq2::add(circuit, &t_xi, &one);

        Fq12::from_components(
            Fq6::from_components(g0, a.g1().clone(), a.g2().clone()),
            Fq6::from_components(a.g3().clone(), g4, a.g5().clone()),
        )
    }
}
