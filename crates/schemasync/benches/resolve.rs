// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::missing_panics_doc)] // Benches panic on failure

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use schemasync::{FieldMetadata, FieldType, SerializationContext, TypeKey, TypeSchema};
use std::collections::BTreeSet;

fn wide_fields(width: usize) -> BTreeSet<FieldMetadata> {
    (0..width)
        .map(|i| FieldMetadata::new(format!("field_{i}"), FieldType::Long))
        .collect()
}

// ============================================================================
// Resolve Benchmarks
// ============================================================================

/// Benchmark: resolve of a fully known type (hot path, empty delta)
fn bench_resolve_known(c: &mut Criterion) {
    let ctx = SerializationContext::new();
    let key = TypeKey::new("Known");
    let fields = wide_fields(16);
    ctx.resolve(&key, &fields);
    ctx.commit_pending();

    c.bench_function("resolve_known_16_fields", |b| {
        b.iter(|| black_box(ctx.resolve(black_box(&key), black_box(&fields))))
    });
}

/// Benchmark: resolve of a never-seen type followed by commit
fn bench_resolve_first_use(c: &mut Criterion) {
    let key = TypeKey::new("Fresh");
    let fields = wide_fields(16);

    c.bench_function("resolve_first_use_and_commit", |b| {
        b.iter_batched(
            SerializationContext::new,
            |ctx| {
                let delta = ctx.resolve(&key, &fields);
                ctx.commit_pending();
                black_box(delta)
            },
            BatchSize::SmallInput,
        )
    });
}

/// Benchmark: one new field on top of a known type
fn bench_resolve_evolved(c: &mut Criterion) {
    let key = TypeKey::new("Evolving");
    let known = wide_fields(16);
    let evolved = wide_fields(17);

    c.bench_function("resolve_one_new_field", |b| {
        b.iter_batched(
            || {
                let ctx = SerializationContext::new();
                ctx.resolve(&key, &known);
                ctx.commit_pending();
                ctx
            },
            |ctx| black_box(ctx.resolve(&key, &evolved)),
            BatchSize::SmallInput,
        )
    });
}

/// Benchmark: building and validating a 16-field schema
fn bench_schema_build(c: &mut Criterion) {
    c.bench_function("schema_build_16_fields", |b| {
        b.iter(|| {
            let mut builder = TypeSchema::builder(TypeKey::new("Wide"));
            for i in 0..16 {
                builder = builder.field(&format!("field_{i}"), FieldType::Int);
            }
            black_box(builder.build())
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_known,
    bench_resolve_first_use,
    bench_resolve_evolved,
    bench_schema_build
);
criterion_main!(benches);
