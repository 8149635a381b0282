//! Benchmarks against the official blake3 crate.

use core::hint::black_box;
use core::time::Duration;

use b3::{Blake3, Digest as _, Xof as _};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn pseudo_random_bytes(len: usize, mut seed: u64) -> Vec<u8> {
  let mut out = Vec::with_capacity(len);
  while out.len() < len {
    // xorshift64*
    seed ^= seed >> 12;
    seed ^= seed << 25;
    seed ^= seed >> 27;
    let word = seed.wrapping_mul(0x2545_F491_4F6C_DD1D);
    out.extend_from_slice(&word.to_le_bytes());
  }
  out.truncate(len);
  out
}

fn oneshot(c: &mut Criterion) {
  let mut group = c.benchmark_group("blake3/oneshot");
  group.warm_up_time(Duration::from_secs(2));
  group.measurement_time(Duration::from_secs(4));

  for len in [64usize, 1024, 4096, 16 * 1024, 64 * 1024, 1024 * 1024] {
    let data = pseudo_random_bytes(len, 0xB3B3_0001 ^ len as u64);
    group.throughput(Throughput::Bytes(len as u64));

    group.bench_with_input(BenchmarkId::new("b3", len), &data, |b, d| {
      b.iter(|| black_box(Blake3::digest(black_box(d))))
    });

    group.bench_with_input(BenchmarkId::new("official", len), &data, |b, d| {
      b.iter(|| black_box(*blake3::hash(black_box(d)).as_bytes()))
    });
  }

  group.finish();
}

fn streaming(c: &mut Criterion) {
  let data = pseudo_random_bytes(1024 * 1024, 0xB3B3_0002);

  let mut group = c.benchmark_group("blake3/streaming");
  group.warm_up_time(Duration::from_secs(2));
  group.measurement_time(Duration::from_secs(4));
  group.throughput(Throughput::Bytes(data.len() as u64));

  for update_len in [4096usize, 64 * 1024] {
    group.bench_with_input(BenchmarkId::new("b3", update_len), &data, |b, d| {
      b.iter(|| {
        let mut h = Blake3::new();
        for part in d.chunks(update_len) {
          h.update(part);
        }
        black_box(h.finalize())
      })
    });

    group.bench_with_input(BenchmarkId::new("official", update_len), &data, |b, d| {
      b.iter(|| {
        let mut h = blake3::Hasher::new();
        for part in d.chunks(update_len) {
          h.update(part);
        }
        black_box(*h.finalize().as_bytes())
      })
    });
  }

  group.finish();
}

fn xof(c: &mut Criterion) {
  let data = pseudo_random_bytes(1024, 0xB3B3_0003);
  const OUT_LEN: usize = 8 * 1024;

  let mut group = c.benchmark_group("blake3/xof");
  group.warm_up_time(Duration::from_secs(2));
  group.measurement_time(Duration::from_secs(4));
  group.throughput(Throughput::Bytes(OUT_LEN as u64));

  group.bench_function("b3", |b| {
    let mut out = vec![0u8; OUT_LEN];
    b.iter(|| {
      let mut reader = Blake3::xof(black_box(&data));
      reader.squeeze(&mut out);
      black_box(out.last().copied())
    })
  });

  group.bench_function("official", |b| {
    let mut out = vec![0u8; OUT_LEN];
    b.iter(|| {
      let mut h = blake3::Hasher::new();
      h.update(black_box(&data));
      h.finalize_xof().fill(&mut out);
      black_box(out.last().copied())
    })
  });

  group.finish();
}

criterion_group!(benches, oneshot, streaming, xof);
criterion_main!(benches);
