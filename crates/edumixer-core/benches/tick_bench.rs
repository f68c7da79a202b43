//! Criterion benchmarks for one console tick
//!
//! Run with: cargo bench -p edumixer-core
#![allow(missing_docs)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use edumixer_core::{
    ChannelRouting, ConsoleState, NullBackend, Scheduler, compute_levels, map_parameters,
};

fn busy_console() -> ConsoleState {
    let mut state = ConsoleState::default();
    for (i, c) in state.channels.iter_mut().enumerate() {
        c.gain = 0.6 + 0.1 * i as f32;
        c.pan = -0.75 + 0.5 * i as f32;
        c.aux = [0.5; 4];
        c.routing = ChannelRouting {
            to_main: true,
            to_sub12: i % 2 == 0,
            to_sub34: i % 2 == 1,
        };
    }
    state
}

fn bench_engine(c: &mut Criterion) {
    let state = busy_console();
    let mut group = c.benchmark_group("Tick");

    group.bench_function("compute_levels", |b| {
        b.iter(|| black_box(compute_levels(black_box(&state))));
    });

    group.bench_function("map_parameters", |b| {
        b.iter(|| black_box(map_parameters(black_box(&state))));
    });

    group.bench_function("scheduler_tick", |b| {
        let mut scheduler = Scheduler::new(NullBackend);
        let _ = scheduler.power_on();
        b.iter(|| black_box(*scheduler.tick(black_box(&state))));
    });

    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
