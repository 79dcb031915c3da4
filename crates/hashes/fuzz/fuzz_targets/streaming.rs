//! Arbitrary `update` chunkings must match the one-shot digest for every
//! algorithm behind the shared `Digest` façade.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use streamhash::{
  crypto::{Blake2b, CShake, Kmac, Sha3, Sha256, Shake},
  fast::{Murmur3_32, Xxh64},
};
use traits::{Digest, FastHash as _};

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<usize>,
  /// Feed single bytes through `update_byte` instead of slices
  bytewise: bool,
}

fn streamed<D: Digest + Clone>(fresh: &D, data: &[u8], chunk_sizes: &[usize], bytewise: bool) {
  let expected = fresh.clone().digest(data);

  let mut hasher = fresh.clone();
  let mut offset = 0;
  let mut chunk_idx = 0;

  while offset < data.len() {
    let chunk_size = if chunk_sizes.is_empty() {
      1
    } else {
      (chunk_sizes[chunk_idx % chunk_sizes.len()] % 256).max(1)
    };

    let end = (offset + chunk_size).min(data.len());
    if bytewise {
      for &byte in &data[offset..end] {
        hasher.update_byte(byte);
      }
    } else {
      hasher.update(&data[offset..end]);
    }
    offset = end;
    chunk_idx += 1;
  }

  assert_eq!(hasher.finalize(), expected, "{} streaming mismatch", fresh.algorithm_name());
  // Finalization resets.
  assert_eq!(hasher.digest(data), expected, "{} reset mismatch", fresh.algorithm_name());
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let chunks = &input.chunk_sizes;
  let bytewise = input.bytewise;

  streamed(&Sha3::v256(), data, chunks, bytewise);
  streamed(&Sha3::v512(), data, chunks, bytewise);
  streamed(&Shake::v128(), data, chunks, bytewise);
  streamed(&CShake::v256(b"fuzz", b"streaming"), data, chunks, bytewise);
  streamed(&Kmac::v128(b"key", b""), data, chunks, bytewise);
  streamed(&Sha256::new(), data, chunks, bytewise);
  streamed(&Blake2b::v512(), data, chunks, bytewise);
  streamed(&Xxh64::new(), data, chunks, bytewise);
  streamed(&Murmur3_32::new(), data, chunks, bytewise);

  assert_eq!(Xxh64::hash(data), xxhash_rust::xxh64::xxh64(data, 0));
  assert_eq!(Murmur3_32::with_seed(7).digest(data)[..], Murmur3_32::hash_with_seed(7, data).to_be_bytes());
});
