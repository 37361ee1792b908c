//! Benchmarks for mesh-io operations.
//!
//! Run with: cargo bench -p mesh-io
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-io -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-io -- --baseline main

#![allow(clippy::expect_used, clippy::cast_precision_loss, clippy::cast_possible_truncation)]

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_io::{load_mesh, save_mesh, save_ply};
use mesh_types::{IndexedMesh, Point3};
use tempfile::tempdir;

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// A wavy height field of `n x n` vertices, two triangles per cell.
fn create_terrain(n: u32) -> IndexedMesh {
    let mut mesh = IndexedMesh::with_capacity((n * n) as usize, (2 * (n - 1) * (n - 1)) as usize);

    for j in 0..n {
        for i in 0..n {
            let x = f64::from(i) / f64::from(n - 1);
            let y = f64::from(j) / f64::from(n - 1);
            let z = 0.1 * (x * 12.0).sin() * (y * 9.0).cos();
            mesh.vertices.push(Point3::new(x, y, z));
        }
    }

    for j in 0..n - 1 {
        for i in 0..n - 1 {
            let a = j * n + i;
            let b = a + 1;
            let c = a + n;
            let d = c + 1;
            mesh.faces.push([a, b, d]);
            mesh.faces.push([a, d, c]);
        }
    }

    mesh
}

// =============================================================================
// I/O Benchmarks
// =============================================================================

fn bench_io(c: &mut Criterion) {
    let mut group = c.benchmark_group("IO");

    let terrain = create_terrain(72); // ~10k triangles
    let temp_dir = tempdir().expect("failed to create temp dir");

    // Write test files
    let obj_path = temp_dir.path().join("bench_terrain.obj");
    let ply_path = temp_dir.path().join("bench_terrain.ply");
    let ply_ascii_path = temp_dir.path().join("bench_terrain_ascii.ply");

    save_mesh(&terrain, &obj_path).expect("failed to save OBJ");
    save_mesh(&terrain, &ply_path).expect("failed to save PLY");
    save_ply(&terrain, &ply_ascii_path, false).expect("failed to save ASCII PLY");

    group.throughput(Throughput::Elements(terrain.faces.len() as u64));

    // Load benchmarks
    group.bench_function("load_obj", |b| b.iter(|| load_mesh(black_box(&obj_path))));

    group.bench_function("load_ply", |b| b.iter(|| load_mesh(black_box(&ply_path))));

    group.bench_function("load_ply_ascii", |b| {
        b.iter(|| load_mesh(black_box(&ply_ascii_path)));
    });

    // Save benchmarks
    let out_obj = temp_dir.path().join("bench_out.obj");
    let out_ply = temp_dir.path().join("bench_out.ply");

    group.bench_function("save_obj", |b| {
        b.iter(|| save_mesh(black_box(&terrain), black_box(&out_obj)));
    });

    group.bench_function("save_ply", |b| {
        b.iter(|| save_mesh(black_box(&terrain), black_box(&out_ply)));
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_io);
criterion_main!(benches);
