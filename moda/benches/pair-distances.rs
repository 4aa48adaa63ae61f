#![allow(clippy::needless_return)]
use moda::{Atom, Configuration, Lattice, Vector3D};

use criterion::{BenchmarkGroup, Criterion, measurement::WallTime, SamplingMode};
use criterion::{black_box, criterion_group, criterion_main};

/// Rocksalt crystal with `n x n x n` conventional cells
fn rocksalt(n: usize) -> Configuration {
    let mut cell = Configuration::new(Lattice::cubic(5.64).expect("invalid lattice"));
    let fcc = [
        Vector3D::new(0.0, 0.0, 0.0),
        Vector3D::new(0.5, 0.5, 0.0),
        Vector3D::new(0.5, 0.0, 0.5),
        Vector3D::new(0.0, 0.5, 0.5),
    ];
    for &position in &fcc {
        cell.add_atom(Atom::new("Na", position));
    }
    for &position in &fcc {
        let mut atom = Atom::new("Cl", position + Vector3D::new(0.5, 0.0, 0.0));
        atom.wrap();
        cell.add_atom(atom);
    }

    return cell.supercell(n, n, n).expect("invalid supercell");
}

fn run_pair_distances(mut group: BenchmarkGroup<WallTime>, test_mode: bool) {
    let sizes: &[usize] = if test_mode { &[1] } else { &[2, 4, 6] };

    for &n in sizes {
        let configuration = rocksalt(n);
        let n_pairs = configuration.size() * (configuration.size() - 1) / 2;

        group.bench_function(&format!("all pairs, {} atoms", configuration.size()), |b| b.iter_custom(|repeat| {
            let start = std::time::Instant::now();
            for _ in 0..repeat {
                black_box(configuration.distances_by_type_pair());
            }
            start.elapsed() / n_pairs as u32
        }));

        group.bench_function(&format!("Na-Cl pairs, {} atoms", configuration.size()), |b| b.iter_custom(|repeat| {
            let start = std::time::Instant::now();
            for _ in 0..repeat {
                black_box(configuration.distances(Some("Na"), Some("Cl")));
            }
            start.elapsed() / n_pairs as u32
        }));
    }

    group.finish();
}

fn pair_distances(c: &mut Criterion) {
    let test_mode = std::env::args().any(|arg| arg == "--test");

    let mut group = c.benchmark_group("Pair distances (per pair)/Rocksalt");
    group.noise_threshold(0.05);
    group.sampling_mode(SamplingMode::Flat);
    group.sample_size(10);

    run_pair_distances(group, test_mode);
}

criterion_group!(all, pair_distances);
criterion_main!(all);
