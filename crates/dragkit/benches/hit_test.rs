//! Benchmarks for hover re-evaluation with a populated target registry.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dragkit::{DragCoordinator, DragData, DropTarget, InteractionId};
use dragkit_core::geometry::Rect;
use dragkit_core::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    Block,
}

fn coordinator_with_targets(count: usize) -> DragCoordinator<Kind, u32> {
    let mut coordinator = DragCoordinator::new();
    for i in 0..count {
        let column = (i % 32) as f32;
        let row = (i / 32) as f32;
        coordinator.register_target(
            DropTarget::new(format!("target-{i}").as_str())
                .fixed_region(Rect::new(column * 50.0, row * 50.0, 48.0, 48.0))
                .accepts(Kind::Block),
        );
    }
    coordinator
}

fn bench_update_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_drag");
    for count in [16, 128, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut coordinator = coordinator_with_targets(count);
            coordinator.start_drag(
                DragData {
                    item: InteractionId::new("bench"),
                    kind: Kind::Block,
                    payload: 0,
                },
                Vec2::ZERO,
                Vec2::ZERO,
            );
            let mut x = 0.0f32;
            b.iter(|| {
                x = (x + 7.0) % 1600.0;
                coordinator.update_drag(black_box(Vec2::new(x, x * 0.5)));
            });
        });
    }
    group.finish();
}

fn bench_evaluate_drop(c: &mut Criterion) {
    c.bench_function("evaluate_drop_1024_targets", |b| {
        let mut coordinator = coordinator_with_targets(1024);
        coordinator.start_drag(
            DragData {
                item: InteractionId::new("bench"),
                kind: Kind::Block,
                payload: 0,
            },
            Vec2::new(25.0, 25.0),
            Vec2::ZERO,
        );
        b.iter(|| black_box(coordinator.evaluate_drop()));
    });
}

criterion_group!(benches, bench_update_drag, bench_evaluate_drop);
criterion_main!(benches);
