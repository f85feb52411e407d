use crate::automorphism::AutomorphismPermutation;
use crate::poly::Poly;
use crate::ring::Ring;

impl Ring<u64> {
    /// Assigns a(X^gal_el) to b.
    /// If NTT, a and b are expected in the NTT domain.
    pub fn automorphism<const NTT: bool>(&self, a: &Poly<u64>, gal_el: usize, b: &mut Poly<u64>) {
        let perm: AutomorphismPermutation = AutomorphismPermutation::new::<NTT>(self.n(), gal_el);
        self.automorphism_from_perm::<NTT>(a, &perm, b);
    }

    pub fn automorphism_from_perm<const NTT: bool>(
        &self,
        a: &Poly<u64>,
        perm: &AutomorphismPermutation,
        b: &mut Poly<u64>,
    ) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(
            perm.permutation.len() == self.n(),
            "perm.len()={} != n={}",
            perm.permutation.len(),
            self.n()
        );

        b.resize(self.n());
        let b_vec: &mut Vec<u64> = &mut b.0;
        let a_vec: &Vec<u64> = &a.0;

        if NTT {
            b_vec
                .iter_mut()
                .zip(perm.permutation.iter())
                .for_each(|(bi, &j)| *bi = a_vec[j]);
        } else {
            let mask: usize = self.n() - 1;
            let q: u64 = self.modulus.q();
            a_vec
                .iter()
                .zip(perm.permutation.iter())
                .for_each(|(ai, &j)| {
                    let negate: bool = j >> (usize::BITS - 1) == 1 && *ai != 0;
                    b_vec[j & mask] = if negate { q - ai } else { *ai };
                });
        }
    }
}
