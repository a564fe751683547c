//! BN254 Fq12 tower-field arithmetic over an emulated base field.
//!
//! The crate provides the extension-tower gadgets a pairing circuit needs
//! above its non-native base-field engine: ring arithmetic on Fq2, Fq6 and
//! Fq12, the Frobenius family, cyclotomic-subgroup squaring (plain and
//! Karabina-compressed) with the fixed seed exponentiation, and the sparse
//! line-evaluation product used inside the Miller loop.
//!
//! Gadgets are generic over [`CircuitContext`], the capability interface of
//! the base-field engine; [`NativeContext`] implements it with plain
//! `ark_bn254::Fq` arithmetic for witness assignment and testing.

pub mod circuit;
pub mod gadgets;
pub mod logging;

pub use circuit::{CircuitContext, Error, NativeContext};
pub use gadgets::bn254::{CompressedFq12, Fq2, Fq6, Fq12, LineEval, cyclotomic::SEED};
pub use logging::init_tracing;
