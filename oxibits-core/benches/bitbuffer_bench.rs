//! Performance benchmarks for BitBuffer operations
//!
//! This benchmark suite evaluates:
//! - Append throughput for single bits, bit groups and byte slices
//! - Unaligned peeks across byte boundaries
//! - Removal with cross-byte shifting
//! - Bitwise combination and shifts over the active window

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxibits_core::BitBuffer;
use std::hint::black_box;

/// Standard data sizes for benchmarking
mod data_sizes {
    pub const SMALL: usize = 256; // 256 B
    pub const MEDIUM: usize = 4 * 1024; // 4 KB
    pub const LARGE: usize = 64 * 1024; // 64 KB
}

/// Reproducible pseudo-random bytes.
fn random(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x123456789ABCDEF0;
    for _ in 0..size {
        // Linear congruential generator
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

const SIZES: [(&str, usize); 3] = [
    ("256B", data_sizes::SMALL),
    ("4KB", data_sizes::MEDIUM),
    ("64KB", data_sizes::LARGE),
];

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");

    for (name, size) in SIZES {
        let data = random(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("write_bytes", name), &data, |b, data| {
            b.iter(|| {
                let mut buf = BitBuffer::new();
                buf.write_bit(true);
                buf.write_bytes(black_box(data));
                black_box(buf)
            });
        });

        group.bench_with_input(BenchmarkId::new("write_bit", name), &data, |b, data| {
            b.iter(|| {
                let mut buf = BitBuffer::new();
                for &byte in data.iter() {
                    for i in 0..8 {
                        buf.write_bit(byte >> i & 1 == 1);
                    }
                }
                black_box(buf)
            });
        });

        group.bench_with_input(BenchmarkId::new("write_bits_13", name), &data, |b, data| {
            b.iter(|| {
                let mut buf = BitBuffer::new();
                for pair in data.chunks_exact(2) {
                    let value = u32::from(pair[0]) | u32::from(pair[1]) << 8;
                    buf.write_bits(value, 13).unwrap();
                }
                black_box(buf)
            });
        });
    }

    group.finish();
}

fn bench_peek(c: &mut Criterion) {
    let mut group = c.benchmark_group("peek");

    for (name, size) in SIZES {
        let mut buf = BitBuffer::from(random(size));
        buf.advance(3);
        let bits = buf.bits();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_function(BenchmarkId::new("read_int_unaligned", name), |b| {
            b.iter(|| {
                let mut acc = 0u32;
                let mut i = 0;
                while i + 32 <= bits {
                    acc ^= buf.read_int(black_box(i)).unwrap();
                    i += 29;
                }
                black_box(acc)
            });
        });
    }

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");

    for (name, size) in SIZES {
        let template = BitBuffer::from(random(size));
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_function(BenchmarkId::new("remove_bits_front", name), |b| {
            b.iter(|| {
                let mut buf = template.clone();
                buf.remove_bits(black_box(3), black_box(5)).unwrap();
                black_box(buf)
            });
        });
    }

    group.finish();
}

fn bench_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine");

    for (name, size) in SIZES {
        let template = BitBuffer::from(random(size));
        let mut other = BitBuffer::from(random(size + 1));
        other.advance(5);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_function(BenchmarkId::new("xor_buffer_unaligned", name), |b| {
            b.iter(|| {
                let mut buf = template.clone();
                buf.xor_buffer(black_box(&other));
                black_box(buf)
            });
        });

        group.bench_function(BenchmarkId::new("shift_left", name), |b| {
            b.iter(|| {
                let mut buf = template.clone();
                buf.shift_left(black_box(11));
                black_box(buf)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_append, bench_peek, bench_remove, bench_combine);
criterion_main!(benches);
