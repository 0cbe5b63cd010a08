use criterion::{criterion_group, criterion_main, Criterion};
use mtree::{LinearScan, MTree, Point};
use rand::{rngs::StdRng, Rng, SeedableRng};

const SEED: u64 = 0;
const N: usize = 10000;
const RADIUS: f64 = 5.0;
const NODE_SIZE: usize = 16;

fn benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("range_search");
    group.sample_size(10);

    group.bench_function("MTree", |b| b.iter(|| bench_mtree()));
    group.bench_function("Linear", |b| b.iter(|| bench_linear()));
}

criterion_group!(benches, benchmark);
criterion_main!(benches);

fn bench_mtree() {
    let mut tree = MTree::new(NODE_SIZE).expect("Invalid node size");
    for (id, point) in dataset().into_iter().enumerate() {
        let _ = tree.search(&point, RADIUS).expect("Fixed dimension");
        tree.insert(Point::new(point, id)).expect("Fixed dimension");
    }
}

fn bench_linear() {
    let mut linear = LinearScan::new();
    for (id, point) in dataset().into_iter().enumerate() {
        let _ = linear.search(&point, RADIUS).expect("Fixed dimension");
        linear.insert(Point::new(point, id)).expect("Fixed dimension");
    }
}

fn dataset() -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..N)
        .map(|_| vec![rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)])
        .collect()
}
