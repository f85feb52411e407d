pub mod automorphism;
pub mod ring;
