use math::dft::DFT;
use math::dft::ntt::Table;
use math::modulus::WordOps;
use math::modulus::prime::Prime;
use math::modulus::prime_generator::NTTFriendlyPrimesGenerator;
use math::poly::Poly;
use math::ring::Ring;
use sampling::source::Source;

#[test]
fn ntt_u64() {
    sub_test("test_roots_match_reference_values", test_roots_match_reference_values);
    sub_test("test_forward_backward_generated_primes", test_forward_backward_generated_primes);
    sub_test("test_ntt_is_multiplicative", test_ntt_is_multiplicative);
}

fn sub_test<F: FnOnce()>(name: &str, f: F) {
    println!("Running {}", name);
    f();
}

fn test_roots_match_reference_values() {
    for (q, n, psi) in [
        (17u64, 8u64, 3u64),
        (97, 8, 8),
        (257, 16, 136),
        (65537, 16, 65529),
        (12289, 1024, 1945),
        (1032193, 8192, 445136),
    ] {
        let prime: Prime<u64> = Prime::<u64>::new(q).unwrap();
        let table: Table<u64> = Table::<u64>::new(prime, 2 * n).unwrap();
        assert_eq!(table.psi(), psi, "q={} n={}", q, n);
        assert_eq!(table.n(), n as usize);
    }
}

fn test_forward_backward_generated_primes() {
    let n: usize = 1 << 10;
    let mut generator: NTTFriendlyPrimesGenerator =
        NTTFriendlyPrimesGenerator::new(50, 2 * n as u64).unwrap();
    let mut source: Source = Source::new([3u8; 32]);

    for prime in generator.next_alternating_primes(4).unwrap() {
        let q: u64 = prime.q();
        let table: Table<u64> = Table::<u64>::new(prime, 2 * n as u64).unwrap();
        let a: Vec<u64> = (0..n).map(|_| source.next_u64n(q, q.mask())).collect();
        let mut b: Vec<u64> = a.clone();
        table.forward_inplace(&mut b);
        table.backward_inplace(&mut b);
        assert_eq!(a, b, "q={}", q);
    }
}

/// ntt(a) * ntt(X) = ntt(a * X) where a * X shifts negacyclically.
fn test_ntt_is_multiplicative() {
    let n: usize = 64;
    let ring: Ring<u64> = Ring::new(n, 12289).unwrap();
    let q: u64 = ring.q();

    let a: Poly<u64> = Poly((0..n as u64).map(|i| (i * 97 + 1) % q).collect());
    let mut x: Poly<u64> = ring.new_poly();
    x.0[1] = 1;

    let mut c: Poly<u64> = ring.new_poly();
    ring.mul_negacyclic(&a, &x, &mut c);

    let mut want: Poly<u64> = ring.new_poly();
    want.0[0] = q - a.0[n - 1];
    want.0[1..].copy_from_slice(&a.0[..n - 1]);
    assert_eq!(c, want);
}
