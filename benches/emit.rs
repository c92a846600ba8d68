use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pico_emit::{callback, Emitter};

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");

    let single: Emitter<u64> = Emitter::new();
    single.on(
        "evt",
        callback(|n: &u64| {
            black_box(*n);
        }),
    );
    group.bench_function("single listener", |b| {
        b.iter(|| single.emit("evt", black_box(&1)))
    });

    let many: Emitter<u64> = Emitter::new();
    for _ in 0..10 {
        many.on(
            "evt",
            callback(|n: &u64| {
                black_box(*n);
            }),
        );
    }
    group.bench_function("ten listeners", |b| {
        b.iter(|| many.emit("evt", black_box(&1)))
    });

    let miss: Emitter<u64> = Emitter::new();
    group.bench_function("no listeners", |b| {
        b.iter(|| miss.emit("evt", black_box(&1)))
    });

    group.finish();
}

fn bench_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation");

    group.bench_function("register + remove", |b| {
        let emitter: Emitter = Emitter::new();
        let handle = callback(|_: &()| {});
        b.iter(|| {
            emitter.on("evt", handle.clone());
            emitter.remove_listener("evt", &handle, false);
        });
    });

    group.bench_function("once register + emit", |b| {
        let emitter: Emitter = Emitter::new();
        b.iter(|| {
            emitter.once("evt", callback(|_| {}));
            emitter.emit("evt", &());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_emit, bench_mutation);
criterion_main!(benches);
