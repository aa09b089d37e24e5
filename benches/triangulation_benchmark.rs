// benches/triangulation_benchmark.rs
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use planar_graph_viz::graph_lib::{Triangulation, TriangulationConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn grown_graph(vertices: usize, seed: u64) -> Triangulation {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Triangulation::new(TriangulationConfig::default());
    graph.seed_triangle();
    while graph.vertices().len() < vertices {
        if graph.add_random_vertex(&mut rng).is_err() {
            break;
        }
    }
    graph
}

fn triangulation_benchmark_fn(c: &mut Criterion) {
    let mut group = c.benchmark_group("TriangulationOperations");

    group.bench_function("grow_to_200_vertices", |b| {
        b.iter(|| grown_graph(black_box(200), black_box(7)))
    });

    let base = grown_graph(500, 11);
    group.bench_function("add_random_vertex_at_500", |b| {
        let mut rng = StdRng::seed_from_u64(13);
        b.iter_batched(
            || base.clone(),
            |mut graph| graph.add_random_vertex(&mut rng),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("validate_500", |b| {
        b.iter(|| black_box(&base).validate())
    });

    group.bench_function("vertex_at_500", |b| {
        let target = base.vertices()[250].position;
        b.iter(|| base.vertex_at(black_box(target), None))
    });
    group.finish();
}

criterion_group!(benches, triangulation_benchmark_fn);
criterion_main!(benches);
