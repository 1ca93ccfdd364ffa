// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for toast queue operations.
//!
//! Measures the performance of:
//! - Enqueueing notifications with auto-removal timers
//! - Manual dismissal from a populated queue
//! - Expiring a full queue in one tick

use criterion::{criterion_group, criterion_main, Criterion};
use pos_toasts::notifications::{Kind, Lifetime, ManualClock, NotificationId, ToastQueue};
use std::hint::black_box;
use std::time::Duration;

const QUEUE_SIZE: u64 = 100;

fn filled_queue(clock: &ManualClock) -> (ToastQueue<ManualClock>, Vec<NotificationId>) {
    let mut queue = ToastQueue::with_clock(clock.clone());
    let ids = (0..QUEUE_SIZE)
        .map(|i| {
            queue.notify(
                Kind::Info,
                format!("notification {i}"),
                None,
                Some(Lifetime::from_millis(i as i64 + 1)),
            )
        })
        .collect();
    (queue, ids)
}

fn bench_notify(c: &mut Criterion) {
    let mut group = c.benchmark_group("toast_queue");

    group.bench_function("notify_100", |b| {
        b.iter(|| {
            let clock = ManualClock::new();
            black_box(filled_queue(&clock));
        });
    });

    group.finish();
}

fn bench_dismiss(c: &mut Criterion) {
    let mut group = c.benchmark_group("toast_queue");

    group.bench_function("dismiss_all_100", |b| {
        b.iter(|| {
            let clock = ManualClock::new();
            let (mut queue, ids) = filled_queue(&clock);
            for id in ids.iter().rev() {
                black_box(queue.dismiss(*id));
            }
        });
    });

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("toast_queue");

    group.bench_function("expire_100", |b| {
        b.iter(|| {
            let clock = ManualClock::new();
            let (mut queue, _ids) = filled_queue(&clock);
            clock.advance(Duration::from_millis(QUEUE_SIZE));
            black_box(queue.tick());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_notify, bench_dismiss, bench_tick);
criterion_main!(benches);
