use criterion::{criterion_group, criterion_main, Criterion};
use tinyrand::{Rand, StdRand};

use drawcheck::cache::CachingEvaluator;
use drawcheck::engine::evaluate;
use drawcheck::matching::Threshold;
use drawcheck::record::{Round, Variant};

fn criterion_benchmark(c: &mut Criterion) {
    fn numbers(rand: &mut StdRand, picks: usize) -> Vec<u64> {
        (0..picks).map(|_| rand.next_u64() % 49 + 1).collect()
    }

    fn fixtures(rounds: usize, variants: usize) -> (Vec<Round>, Vec<Variant>) {
        let mut rand = StdRand::default();
        let rounds = (0..rounds)
            .map(|_| Round::new(numbers(&mut rand, 6)).unwrap())
            .collect();
        let variants = (0..variants)
            .map(|index| Variant::new(format!("{index}"), numbers(&mut rand, 6)).unwrap())
            .collect();
        (rounds, variants)
    }

    let threshold = Threshold::new(3).unwrap();

    // sanity check
    let (rounds, variants) = fixtures(10, 10);
    let result = evaluate(&rounds, &variants, threshold);
    let result = result.computed().unwrap();
    assert_eq!(
        result.total_wins(),
        result.per_variant_wins().iter().sum::<usize>()
    );

    fn bench(c: &mut Criterion, num_rounds: usize, num_variants: usize, threshold: Threshold) {
        let (rounds, variants) = fixtures(num_rounds, num_variants);
        c.bench_function(&format!("cri_engine_{num_rounds}x{num_variants}"), |b| {
            b.iter(|| evaluate(&rounds, &variants, threshold));
        });
    }
    bench(c, 100, 100, threshold);
    bench(c, 1_000, 1_000, threshold);

    let (rounds, variants) = fixtures(1_000, 1_000);
    let mut evaluator = CachingEvaluator::default();
    c.bench_function("cri_engine_cached_1000x1000", |b| {
        b.iter(|| {
            evaluator
                .evaluate(&rounds, &variants, threshold)
                .map(|evaluation| evaluation.is_empty())
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
