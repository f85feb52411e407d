pub mod impl_u64;

use crate::dft::ntt::Table;
use crate::modulus::WordOps;
use crate::modulus::prime::Prime;
use crate::poly::Poly;
use num_traits::Unsigned;

/// The negacyclic ring Z_q[X]/(X^n+1) with its NTT table.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring<O: Unsigned> {
    pub n: usize,
    pub modulus: Prime<O>,
    pub dft: Table<O>,
}

impl<O: Unsigned> Ring<O> {
    pub fn log_n(&self) -> usize {
        self.n().log2()
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns 2n, the order of the cyclotomic X^n+1.
    pub fn cyclotomic_order(&self) -> usize {
        self.n << 1
    }

    pub fn new_poly(&self) -> Poly<u64> {
        Poly::<u64>::new(self.n())
    }
}
