//! Extension-tower gadgets for the BN254 pairing target group.
//!
//! The tower is built Fq → Fq2 → Fq6 → Fq12 with the standard BN254
//! non-residues (u² = -1, v³ = 9 + u, w² = v). Every operation is generic
//! over the base-field engine through
//! [`CircuitContext`](crate::circuit::CircuitContext).

pub mod cyclotomic;
pub mod fq2;
pub mod fq6;
pub mod fq12;
pub mod line;

pub use cyclotomic::CompressedFq12;
pub use fq2::Fq2;
pub use fq6::Fq6;
pub use fq12::Fq12;
pub use line::LineEval;
