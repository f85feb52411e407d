use batching::{BatchEncoder, Context, MemoryPoolHandle, Parameters, Plaintext};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use math::modulus::WordOps;
use sampling::source::Source;

fn encoder(c: &mut Criterion) {
    let mut group: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> = c.benchmark_group("batch_encoder");

    for log_n in [12usize, 13] {
        let parameters: Parameters = Parameters::batching(1 << log_n, 20).unwrap();
        let encoder: BatchEncoder = BatchEncoder::new(&Context::new(parameters)).unwrap();
        let t: u64 = parameters.plain_modulus;

        let mut source: Source = Source::new([0u8; 32]);
        let values: Vec<u64> = (0..encoder.slot_count())
            .map(|_| source.next_u64n(t, t.mask()))
            .collect();

        let mut plaintext: Plaintext = Plaintext::new(encoder.slot_count());
        group.bench_with_input(BenchmarkId::new("encode", format!("n={}", 1 << log_n)), &(), |b, _| {
            b.iter(|| encoder.encode_vector_u64(&values, &mut plaintext))
        });

        let pool: MemoryPoolHandle = MemoryPoolHandle::new_local(None);
        let mut decoded: Vec<u64> = Vec::with_capacity(encoder.slot_count());
        group.bench_with_input(BenchmarkId::new("decode", format!("n={}", 1 << log_n)), &(), |b, _| {
            b.iter(|| encoder.decode_vector_u64(&plaintext, &mut decoded, Some(&pool)))
        });
    }
}

criterion_group!(benches, encoder);
criterion_main!(benches);
