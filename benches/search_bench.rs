use astar_visualizer::{astar, pos, CancelToken, Grid, NoRedraw};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn random_grid(n: usize, density: f64, rng: &mut StdRng) -> Grid {
    let mut grid = Grid::new(n);
    grid.scatter_walls(rng, density);
    grid.set_start(pos(0, 0)).unwrap();
    grid.set_end(pos(n - 1, n - 1)).unwrap();
    grid.compute_neighbours();
    grid
}

fn search_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let cancel = CancelToken::new();
    for (n, density) in [(32, 0.0), (32, 0.3), (128, 0.0), (128, 0.3)] {
        let grid = random_grid(n, density, &mut rng);
        c.bench_function(format!("{n}x{n}, wall density {density}").as_str(), |b| {
            b.iter(|| {
                let mut grid = grid.clone();
                black_box(astar(&mut grid, &mut NoRedraw, &cancel).unwrap());
            })
        });
    }
}

fn neighbours_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut grid = random_grid(128, 0.3, &mut rng);
    c.bench_function("compute_neighbours 128x128", |b| {
        b.iter(|| grid.compute_neighbours())
    });
}

criterion_group!(benches, search_bench, neighbours_bench);
criterion_main!(benches);
