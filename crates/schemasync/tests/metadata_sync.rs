// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests panic on failure
#![allow(clippy::cast_possible_truncation)] // Test parameters

//! Resolve/commit behaviour observed through the public API.
//!
//! Randomised cases use `fastrand` with a fixed seed so failures replay.

use schemasync::{ClassMetadataDelta, FieldMetadata, FieldType, SerializationContext, TypeKey};
use std::collections::BTreeSet;

const ALPHABET: &[&str] = &["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];

fn random_set(rng: &mut fastrand::Rng) -> BTreeSet<FieldMetadata> {
    ALPHABET
        .iter()
        .filter_map(|name| {
            if !rng.bool() {
                return None;
            }
            let ty = if rng.bool() {
                FieldType::Int
            } else {
                FieldType::String
            };
            Some(FieldMetadata::new(*name, ty))
        })
        .collect()
}

/// Context whose known set for `key` is exactly `known`.
fn context_knowing(key: &TypeKey, known: &BTreeSet<FieldMetadata>) -> SerializationContext {
    let ctx = SerializationContext::new();
    ctx.resolve(key, known);
    ctx.commit_pending();
    assert_eq!(ctx.known_fields(key).as_ref(), Some(known));
    ctx
}

#[test]
fn unseen_type_gets_full_candidate_set() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);

    for round in 0..200 {
        let ctx = SerializationContext::new();
        let key = TypeKey::new(format!("T{round}"));
        let candidate = random_set(&mut rng);

        let delta = ctx.resolve(&key, &candidate);

        assert_eq!(delta.type_key(), Some(&key));
        assert_eq!(delta.fields(), &candidate);
        assert_eq!(ctx.pending_len(), 1);
    }
}

#[test]
fn covered_candidate_is_empty_and_not_queued() {
    let mut rng = fastrand::Rng::with_seed(0xc0ffee);
    let key = TypeKey::new("Covered");

    for _ in 0..200 {
        let known = random_set(&mut rng);
        let ctx = context_knowing(&key, &known);

        let subset: BTreeSet<_> = known.iter().filter(|_| rng.bool()).cloned().collect();
        let delta = ctx.resolve(&key, &subset);

        assert_eq!(delta, ClassMetadataDelta::EMPTY);
        assert_eq!(ctx.pending_len(), 0);
    }
}

#[test]
fn uncovered_candidate_yields_exact_difference() {
    let mut rng = fastrand::Rng::with_seed(42);
    let key = TypeKey::new("Diff");

    for _ in 0..200 {
        let known = random_set(&mut rng);
        let candidate = random_set(&mut rng);
        let ctx = context_knowing(&key, &known);

        let delta = ctx.resolve(&key, &candidate);
        let expected: BTreeSet<_> = candidate.difference(&known).cloned().collect();

        if expected.is_empty() {
            assert!(delta.is_empty());
            assert_eq!(ctx.pending_len(), 0);
        } else {
            assert_eq!(delta.type_key(), Some(&key));
            assert_eq!(delta.fields(), &expected);
            assert_eq!(ctx.pending_len(), 1);
        }
    }
}

#[test]
fn commit_makes_known_set_the_union_of_returned_fields() {
    let mut rng = fastrand::Rng::with_seed(7);
    let ctx = SerializationContext::new();
    let keys: Vec<TypeKey> = (0..5).map(|i| TypeKey::new(format!("U{i}"))).collect();
    let mut returned: Vec<BTreeSet<FieldMetadata>> = vec![BTreeSet::new(); keys.len()];

    for _ in 0..50 {
        for _ in 0..rng.usize(1..8) {
            let idx = rng.usize(..keys.len());
            let delta = ctx.resolve(&keys[idx], &random_set(&mut rng));
            returned[idx].extend(delta.iter().cloned());
        }

        ctx.commit_pending();

        for (key, fields) in keys.iter().zip(&returned) {
            if let Some(known) = ctx.known_fields(key) {
                assert_eq!(&known, fields, "known set of {}", key);
            }
        }
    }
}

#[test]
fn second_commit_changes_nothing() {
    let ctx = SerializationContext::new();
    let a = TypeKey::new("A");
    let b = TypeKey::new("B");
    let f = |n: &str| FieldMetadata::new(n, FieldType::Double);

    ctx.resolve(&a, &[f("x"), f("y")].into_iter().collect());
    ctx.resolve(&b, &[f("x")].into_iter().collect());
    ctx.resolve(&a, &[f("x"), f("y"), f("z")].into_iter().collect());
    ctx.commit_pending();

    let before = (ctx.known_fields(&a), ctx.known_fields(&b), ctx.stats());
    assert_eq!(ctx.commit_pending(), 0);
    let after = (ctx.known_fields(&a), ctx.known_fields(&b), ctx.stats());

    assert_eq!(before, after);
}

#[test]
fn point_scenario() {
    let ctx = SerializationContext::new();
    let point = TypeKey::new("Point");
    let f = |n: &str| FieldMetadata::new(n, FieldType::Int);
    let xy: BTreeSet<_> = [f("x"), f("y")].into_iter().collect();
    let xyz: BTreeSet<_> = [f("x"), f("y"), f("z")].into_iter().collect();

    let delta = ctx.resolve(&point, &xy);
    assert_eq!(delta.fields(), &xy);
    assert_eq!(ctx.pending_len(), 1);

    ctx.commit_pending();

    assert!(ctx.resolve(&point, &xy).is_empty());

    let delta = ctx.resolve(&point, &xyz);
    let names: Vec<&str> = delta.iter().map(FieldMetadata::name).collect();
    assert_eq!(names, ["z"]);
}

#[test]
fn skipped_commits_only_cost_bandwidth() {
    let ctx = SerializationContext::new();
    let key = TypeKey::new("Chatty");
    let fields: BTreeSet<_> = [FieldMetadata::new("v", FieldType::Long)]
        .into_iter()
        .collect();

    for _ in 0..10 {
        assert_eq!(ctx.resolve(&key, &fields).fields(), &fields);
    }
    assert_eq!(ctx.pending_len(), 10);

    assert_eq!(ctx.commit_pending(), 10);
    assert_eq!(ctx.known_fields(&key), Some(fields.clone()));
    assert!(ctx.resolve(&key, &fields).is_empty());
}
