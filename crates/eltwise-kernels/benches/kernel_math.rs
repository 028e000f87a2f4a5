// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for the scalar kernel math.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use eltwise_kernels::{exp_scalar, reciprocal_scalar, tanh_scalar};
use tile_core::Tile;

fn bench_exp_tile(c: &mut Criterion) {
    let tile = Tile::from_fn(|i| (i as f32 / 64.0) - 8.0);
    c.bench_function("exp_tile", |b| {
        b.iter(|| black_box(&tile).map(exp_scalar))
    });
}

fn bench_tanh_tile(c: &mut Criterion) {
    let tile = Tile::from_fn(|i| (i as f32 / 128.0) - 4.0);
    c.bench_function("tanh_tile", |b| {
        b.iter(|| black_box(&tile).map(tanh_scalar))
    });
}

fn bench_reciprocal(c: &mut Criterion) {
    c.bench_function("reciprocal_scalar", |b| {
        b.iter(|| reciprocal_scalar(black_box(2.718_281_8)))
    });
}

criterion_group!(benches, bench_exp_tile, bench_tanh_tile, bench_reciprocal);
criterion_main!(benches);
