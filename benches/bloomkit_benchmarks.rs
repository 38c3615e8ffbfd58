//! Bloomkit benchmarks.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use bloomkit::context::Context;
use bloomkit::data_structures::bloom_filter::{BloomFilter, DoubleHashStrategy, MemoryBitStore, Strategy};
use bloomkit::data_structures::BitVectorBloom;
use bloomkit::protocol::resp::{bitfield_command, read_reply, BitFieldOp};
use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkId, Criterion,
    SamplingMode, Throughput,
};
use std::time::Duration;

fn keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{i:032}")).collect()
}

/// Benchmark position computation for the pluggable filter.
fn bench_strategy(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategy");
    let strategy = DoubleHashStrategy::new();

    for k in [3usize, 7, 10, 20] {
        group.bench_with_input(BenchmarkId::new("double_hash", k), &k, |b, &k| {
            b.iter(|| strategy.bloom_hash(black_box(b"00000000000000000000000000000042"), k, 14_723));
        });
    }
    group.finish();
}

/// Benchmark the pluggable filter over the memory store.
fn bench_memory_filter(c: &mut Criterion) {
    let runtime = match tokio::runtime::Builder::new_current_thread().build() {
        Ok(runtime) => runtime,
        Err(err) => panic!("failed to build runtime: {err}"),
    };

    let mut group = c.benchmark_group("bloom_filter_memory");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    for size in [1_000usize, 10_000] {
        let values = keys(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("add", size), &values, |b, values| {
            b.to_async(&runtime).iter(|| async {
                let filter = BloomFilter::new(values.len() as i64, 0.01, MemoryBitStore::new())
                    .unwrap_or_else(|e| panic!("sizing failed: {e}"));
                let ctx = Context::background();
                for value in values {
                    let _ = filter.add(&ctx, black_box(value)).await;
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("may_exist", size), &values, |b, values| {
            let filter = BloomFilter::new(values.len() as i64, 0.01, MemoryBitStore::new())
                .unwrap_or_else(|e| panic!("sizing failed: {e}"));
            let ctx = Context::background();
            runtime.block_on(async {
                for value in values {
                    let _ = filter.add(&ctx, value).await;
                }
            });
            b.to_async(&runtime).iter(|| async {
                for value in values {
                    black_box(filter.may_exist(&ctx, value).await.ok());
                }
            });
        });
    }
    group.finish();
}

/// Benchmark the bit-vector bloom.
fn bench_bit_vector(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_vector_bloom");

    for size in [1_000usize, 10_000] {
        let values = keys(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("test_and_add", size), &values, |b, values| {
            b.iter(|| {
                let mut bloom = BitVectorBloom::new(10, values.len());
                for value in values {
                    black_box(bloom.test_and_add(value));
                }
            });
        });
    }
    group.finish();
}

/// Benchmark RESP request encoding and reply decoding.
fn bench_resp(c: &mut Criterion) {
    let mut group = c.benchmark_group("resp");

    let ops: Vec<BitFieldOp> = (0..10u64).map(|i| BitFieldOp::Set(i * 1_471, true)).collect();
    group.bench_function("encode_bitfield", |b| {
        b.iter(|| bitfield_command(black_box("bloom"), black_box(&ops)).to_bytes());
    });

    let mut reply = b"*10\r\n".to_vec();
    for _ in 0..10 {
        reply.extend_from_slice(b":1\r\n");
    }
    group.bench_function("decode_bitfield_reply", |b| {
        b.iter(|| {
            let mut input = reply.as_slice();
            black_box(tokio_test::block_on(read_reply(&mut input)).ok())
        });
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02);
    targets = bench_strategy, bench_memory_filter, bench_bit_vector, bench_resp
}

criterion_main!(benches);
