//! Entity creation, component attach, and intersection query throughput at
//! population sizes representative of a full settlement-scale world.
//!
//! Run with: `cargo bench --bench ecs_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chronicle_ecs::prelude::*;

fn populated_world(entity_count: usize) -> World {
    let mut world = World::new();
    world.register_component_kind(ComponentKind::Position);
    world.register_component_kind(ComponentKind::Health);
    world.register_component_kind(ComponentKind::Profession);

    for i in 0..entity_count {
        let e = world.create_entity();
        world
            .attach(
                e,
                Component::Position(Position {
                    x: i as f64,
                    y: 0.0,
                }),
            )
            .unwrap();
        world
            .attach(e, Component::Health(Health { value: 100.0 }))
            .unwrap();
        if i % 10 == 0 {
            world
                .attach(
                    e,
                    Component::Profession(Profession {
                        title: "smith".to_owned(),
                    }),
                )
                .unwrap();
        }
    }
    world
}

fn bench_entity_creation(c: &mut Criterion) {
    c.bench_function("create_10k_entities", |b| {
        b.iter(|| {
            let mut world = World::new();
            for _ in 0..10_000 {
                black_box(world.create_entity());
            }
        });
    });
}

fn bench_two_kind_query(c: &mut Criterion) {
    let world = populated_world(10_000);
    c.bench_function("query_2_kind_10k_entities", |b| {
        b.iter(|| {
            let result = world.query(&[ComponentKind::Position, ComponentKind::Health]);
            black_box(result);
        });
    });
}

fn bench_sparse_intersection_query(c: &mut Criterion) {
    let world = populated_world(10_000);
    c.bench_function("query_sparse_3_kind_10k_entities", |b| {
        b.iter(|| {
            let result = world.query(&[
                ComponentKind::Position,
                ComponentKind::Health,
                ComponentKind::Profession,
            ]);
            black_box(result);
        });
    });
}

fn bench_query_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_scaling");
    for &count in &[100usize, 1_000, 10_000, 50_000] {
        let world = populated_world(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &_count| {
            b.iter(|| {
                let result = world.query(&[ComponentKind::Position, ComponentKind::Health]);
                black_box(result);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_entity_creation,
    bench_two_kind_query,
    bench_sparse_intersection_query,
    bench_query_scaling,
);
criterion_main!(benches);
