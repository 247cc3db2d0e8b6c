use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use keepsake::{KeyValueStore, MemoryStorage, SessionState, SessionStore, Store, USER_STATE_KEY};

fn session_restore_benchmark(c: &mut Criterion) {
    let storage = MemoryStorage::new();
    storage
        .set(USER_STATE_KEY, r#"{"isLoggedIn":true,"username":"alice"}"#)
        .unwrap();

    c.bench_function("session_restore", |b| {
        b.iter(|| black_box(SessionStore::with_storage(storage.clone())));
    });
}

fn session_read_benchmark(c: &mut Criterion) {
    let session = SessionStore::in_memory();

    c.bench_function("session_read", |b| {
        b.iter(|| {
            black_box(session.get());
        });
    });
}

fn session_set_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_set");

    let in_memory = SessionStore::in_memory();
    group.bench_function("in_memory", |b| {
        let mut i = 0u64;
        b.iter(|| {
            in_memory.set(SessionState::logged_in(black_box(i.to_string())));
            i += 1;
        });
    });

    let persisted = SessionStore::with_storage(MemoryStorage::new());
    group.bench_function("memory_storage", |b| {
        let mut i = 0u64;
        b.iter(|| {
            persisted.set(SessionState::logged_in(black_box(i.to_string())));
            i += 1;
        });
    });

    group.finish();
}

fn store_subscribe_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_notify");

    for subscriber_count in [1, 10, 100].iter() {
        let store = Store::new(0usize);

        let _subs: Vec<_> = (0..*subscriber_count)
            .map(|_| {
                store.subscribe(|_| {
                    // Empty subscriber
                })
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(subscriber_count),
            subscriber_count,
            |b, _| {
                let mut i = 0;
                b.iter(|| {
                    store.update(|state| *state = black_box(i));
                    i += 1;
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    session_restore_benchmark,
    session_read_benchmark,
    session_set_benchmark,
    store_subscribe_benchmark,
);
criterion_main!(benches);
