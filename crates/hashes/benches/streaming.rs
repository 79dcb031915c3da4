use core::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use streamhash::{
  Digest, FastHash as _,
  crypto::{Blake2b, CShake, Kmac, Sha3, Sha256, Shake},
  fast::{Murmur3_32, Xxh64},
};

mod common;

fn update_in_chunks<D: Digest>(h: &mut D, data: &[u8], chunk: usize) {
  for piece in data.chunks(chunk) {
    h.update(piece);
  }
}

fn oneshot(c: &mut Criterion) {
  let inputs = common::sized_inputs();
  let mut group = c.benchmark_group("streamhash/oneshot");

  for (len, data) in &inputs {
    common::set_throughput(&mut group, *len);

    group.bench_with_input(BenchmarkId::new("sha3_256/streamhash", len), data, |b, d| {
      b.iter(|| black_box(Sha3::v256().digest(black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("sha3_256/sha3", len), data, |b, d| {
      b.iter(|| {
        use sha3::Digest as _;
        black_box(sha3::Sha3_256::digest(black_box(d)))
      })
    });

    group.bench_with_input(BenchmarkId::new("shake128_32/streamhash", len), data, |b, d| {
      b.iter(|| {
        let mut out = [0u8; 32];
        Shake::v128().hash_into(black_box(d), &mut out);
        black_box(out)
      })
    });
    group.bench_with_input(BenchmarkId::new("shake128_32/sha3", len), data, |b, d| {
      b.iter(|| {
        use sha3::digest::{ExtendableOutput, Update, XofReader};
        let mut h = sha3::Shake128::default();
        h.update(black_box(d));
        let mut out = [0u8; 32];
        h.finalize_xof().read(&mut out);
        black_box(out)
      })
    });

    group.bench_with_input(BenchmarkId::new("cshake256_64/streamhash", len), data, |b, d| {
      b.iter(|| {
        let mut out = [0u8; 64];
        CShake::v256(b"streamhash", b"bench").hash_into(black_box(d), &mut out);
        black_box(out)
      })
    });

    group.bench_with_input(BenchmarkId::new("kmac128/streamhash", len), data, |b, d| {
      b.iter(|| black_box(Kmac::v128(b"streamhash bench key", b"bench").digest(black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("kmac128/tiny-keccak", len), data, |b, d| {
      b.iter(|| {
        use tiny_keccak::{Hasher, Kmac};
        let mut h = Kmac::v128(b"streamhash bench key", b"bench");
        h.update(black_box(d));
        let mut out = [0u8; 32];
        h.finalize(&mut out);
        black_box(out)
      })
    });

    group.bench_with_input(BenchmarkId::new("sha256/streamhash", len), data, |b, d| {
      b.iter(|| black_box(Sha256::hash(black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("sha256/sha2", len), data, |b, d| {
      b.iter(|| {
        use sha2::Digest as _;
        black_box(sha2::Sha256::digest(black_box(d)))
      })
    });

    group.bench_with_input(BenchmarkId::new("blake2b512/streamhash", len), data, |b, d| {
      b.iter(|| black_box(Blake2b::v512().digest(black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("blake2b512/blake2", len), data, |b, d| {
      b.iter(|| {
        use blake2::Digest as _;
        black_box(blake2::Blake2b512::digest(black_box(d)))
      })
    });

    group.bench_with_input(BenchmarkId::new("xxh64/streamhash", len), data, |b, d| {
      b.iter(|| black_box(Xxh64::hash(black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("xxh64/xxhash-rust", len), data, |b, d| {
      b.iter(|| black_box(xxhash_rust::xxh64::xxh64(black_box(d), 0)))
    });

    group.bench_with_input(BenchmarkId::new("murmur3_32/streamhash", len), data, |b, d| {
      b.iter(|| black_box(Murmur3_32::hash(black_box(d))))
    });
  }

  group.finish();
}

/// Same input fed in small pieces, to measure buffering overhead.
fn chunked(c: &mut Criterion) {
  let data = common::pseudo_random_bytes(64 * 1024, 0xC0FF_EE00);
  let mut group = c.benchmark_group("streamhash/chunked");
  common::set_throughput(&mut group, data.len());

  for chunk in [1usize, 7, 64, 4096] {
    group.bench_with_input(BenchmarkId::new("sha3_256", chunk), &chunk, |b, &chunk| {
      b.iter(|| {
        let mut h = Sha3::v256();
        update_in_chunks(&mut h, black_box(&data), chunk);
        black_box(h.finalize())
      })
    });
    group.bench_with_input(BenchmarkId::new("sha256", chunk), &chunk, |b, &chunk| {
      b.iter(|| {
        let mut h = Sha256::new();
        update_in_chunks(&mut h, black_box(&data), chunk);
        black_box(h.finalize())
      })
    });
    group.bench_with_input(BenchmarkId::new("blake2b512", chunk), &chunk, |b, &chunk| {
      b.iter(|| {
        let mut h = Blake2b::v512();
        update_in_chunks(&mut h, black_box(&data), chunk);
        black_box(h.finalize())
      })
    });
    group.bench_with_input(BenchmarkId::new("xxh64", chunk), &chunk, |b, &chunk| {
      b.iter(|| {
        let mut h = Xxh64::new();
        update_in_chunks(&mut h, black_box(&data), chunk);
        black_box(h.finish_u64())
      })
    });
  }

  group.finish();
}

fn xof_squeeze(c: &mut Criterion) {
  let mut group = c.benchmark_group("streamhash/squeeze");
  for out_len in [32usize, 168, 4096] {
    group.throughput(criterion::Throughput::Bytes(out_len as u64));
    group.bench_with_input(BenchmarkId::new("shake128", out_len), &out_len, |b, &n| {
      let mut out = vec![0u8; n];
      b.iter(|| {
        let mut h = Shake::v128();
        h.update(b"seed");
        h.finalize_xof_into(&mut out);
        black_box(&out);
      })
    });
  }
  group.finish();
}

criterion_group!(benches, oneshot, chunked, xof_squeeze);
criterion_main!(benches);
