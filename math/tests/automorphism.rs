use itertools::izip;
use math::automorphism::{AutomorphismPermutation, galois_element};
use math::modulus::WordOps;
use math::poly::Poly;
use math::ring::Ring;
use sampling::source::Source;

#[test]
fn automorphism_u64() {
    let n: usize = 1 << 4;
    let q: u64 = 65537u64;
    let ring: Ring<u64> = Ring::new(n, q).unwrap();

    sub_test("test_automorphism_negation_u64::<NTT:false>", || {
        test_automorphism_negation_u64::<false>(&ring)
    });
    sub_test("test_automorphism_negation_u64::<NTT:true>", || {
        test_automorphism_negation_u64::<true>(&ring)
    });
    sub_test("test_automorphism_ntt_matches_coefficients_u64", || {
        test_automorphism_ntt_matches_coefficients_u64(&ring)
    });
    sub_test("test_automorphism_composition_u64", || {
        test_automorphism_composition_u64(&ring)
    });
}

fn sub_test<F: FnOnce()>(name: &str, f: F) {
    println!("Running {}", name);
    f();
}

fn random_poly(ring: &Ring<u64>, source: &mut Source) -> Poly<u64> {
    let mut p: Poly<u64> = ring.new_poly();
    let q: u64 = ring.q();
    p.0.iter_mut().for_each(|x| *x = source.next_u64n(q, q.mask()));
    p
}

/// X -> X^(2n-1) maps sum a_i X^i to a_0 - sum a_i X^(n-i).
fn test_automorphism_negation_u64<const NTT: bool>(ring: &Ring<u64>) {
    let n: usize = ring.n();
    let q: u64 = ring.q();

    let mut p0: Poly<u64> = ring.new_poly();
    let mut p1: Poly<u64> = ring.new_poly();

    for i in 0..p0.n() {
        p0.0[i] = i as u64
    }

    if NTT {
        ring.ntt_inplace::<false>(&mut p0);
    }

    let gal_el: usize = ring.cyclotomic_order() - 1;
    let perm: AutomorphismPermutation = AutomorphismPermutation::new::<NTT>(n, gal_el);
    ring.automorphism_from_perm::<NTT>(&p0, &perm, &mut p1);

    if NTT {
        ring.intt_inplace::<false>(&mut p1);
    }

    p0.0[0] = 0;
    for i in 1..p0.n() {
        p0.0[i] = q - (n - i) as u64
    }

    izip!(p0.0, p1.0).for_each(|(a, b)| assert_eq!(a, b));
}

fn test_automorphism_ntt_matches_coefficients_u64(ring: &Ring<u64>) {
    let mut source: Source = Source::new([7u8; 32]);
    let a: Poly<u64> = random_poly(ring, &mut source);

    for steps in [1i64, 2, 3, -1] {
        let gal_el: usize = galois_element(steps, ring.n());

        let mut want: Poly<u64> = ring.new_poly();
        ring.automorphism::<false>(&a, gal_el, &mut want);

        let mut a_ntt: Poly<u64> = ring.new_poly();
        ring.ntt::<false>(&a, &mut a_ntt);
        let mut have: Poly<u64> = ring.new_poly();
        ring.automorphism::<true>(&a_ntt, gal_el, &mut have);
        ring.intt_inplace::<false>(&mut have);

        assert_eq!(have, want, "steps={}", steps);
    }
}

fn test_automorphism_composition_u64(ring: &Ring<u64>) {
    let mut source: Source = Source::new([11u8; 32]);
    let a: Poly<u64> = random_poly(ring, &mut source);

    let mut once: Poly<u64> = ring.new_poly();
    let mut twice: Poly<u64> = ring.new_poly();
    ring.automorphism::<false>(&a, galois_element(1, ring.n()), &mut once);
    ring.automorphism::<false>(&once, galois_element(1, ring.n()), &mut twice);

    let mut direct: Poly<u64> = ring.new_poly();
    ring.automorphism::<false>(&a, galois_element(2, ring.n()), &mut direct);

    assert_eq!(twice, direct);
}
