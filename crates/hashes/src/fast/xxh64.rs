//! XXH64 (**NOT CRYPTO**).
//!
//! 32-byte stripes run through the shared [`ByteAccumulator`]; the tail and
//! avalanche happen in [`finalize`](BlockCompressor::finalize). The [`Digest`]
//! output is the 64-bit hash in big-endian (canonical) byte order.

#![allow(clippy::indexing_slicing)] // Fixed-size stripe lanes

use core::fmt;

use traits::{Digest, FastHash};

use crate::accumulator::{BlockCompressor, ByteAccumulator};

const STRIPE_LEN: usize = 32;

const P1: u64 = 0x9E37_79B1_85EB_CA87;
const P2: u64 = 0xC2B2_AE3D_27D4_EB4F;
const P3: u64 = 0x1656_67B1_9E37_79F9;
const P4: u64 = 0x85EB_CA77_C2B2_AE63;
const P5: u64 = 0x27D4_EB2F_1656_67C5;

#[inline(always)]
fn round(acc: u64, lane: u64) -> u64 {
  acc.wrapping_add(lane.wrapping_mul(P2)).rotate_left(31).wrapping_mul(P1)
}

#[inline(always)]
fn merge_round(acc: u64, v: u64) -> u64 {
  (acc ^ round(0, v)).wrapping_mul(P1).wrapping_add(P4)
}

#[inline(always)]
fn avalanche(mut h: u64) -> u64 {
  h ^= h >> 33;
  h = h.wrapping_mul(P2);
  h ^= h >> 29;
  h = h.wrapping_mul(P3);
  h ^= h >> 32;
  h
}

/// XXH64 lane accumulators.
#[derive(Clone, Default)]
pub struct Xxh64Core {
  seed: u64,
  v: [u64; 4],
}

impl Xxh64Core {
  /// Core for `seed`; lanes are initialized by the accumulator.
  #[must_use]
  pub const fn with_seed(seed: u64) -> Self {
    Self { seed, v: [0; 4] }
  }
}

impl fmt::Debug for Xxh64Core {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Xxh64Core").field("seed", &self.seed).finish_non_exhaustive()
  }
}

impl BlockCompressor<STRIPE_LEN> for Xxh64Core {
  fn algorithm_name(&self) -> &'static str {
    "XXH64"
  }

  fn output_size(&self) -> usize {
    8
  }

  #[inline]
  fn reinit(&mut self, _preload: &mut [u8; STRIPE_LEN]) -> usize {
    let seed = self.seed;
    self.v = [
      seed.wrapping_add(P1).wrapping_add(P2),
      seed.wrapping_add(P2),
      seed,
      seed.wrapping_sub(P1),
    ];
    0
  }

  #[inline]
  fn compress(&mut self, block: &[u8; STRIPE_LEN], _block_index: u64) {
    let (lanes, _) = block.as_chunks::<8>();
    for (v, lane) in self.v.iter_mut().zip(lanes) {
      *v = round(*v, u64::from_le_bytes(*lane));
    }
  }

  fn finalize(&mut self, tail: &[u8], block_count: u64, out: &mut [u8]) {
    let total_len = block_count
      .wrapping_mul(STRIPE_LEN as u64)
      .wrapping_add(tail.len() as u64);

    let mut h = if block_count > 0 {
      let [v1, v2, v3, v4] = self.v;
      let mut h = v1
        .rotate_left(1)
        .wrapping_add(v2.rotate_left(7))
        .wrapping_add(v3.rotate_left(12))
        .wrapping_add(v4.rotate_left(18));
      for v in self.v {
        h = merge_round(h, v);
      }
      h
    } else {
      self.seed.wrapping_add(P5)
    };
    h = h.wrapping_add(total_len);

    let (words, rest) = tail.as_chunks::<8>();
    for word in words {
      h ^= round(0, u64::from_le_bytes(*word));
      h = h.rotate_left(27).wrapping_mul(P1).wrapping_add(P4);
    }
    let (halves, bytes) = rest.as_chunks::<4>();
    for half in halves {
      h ^= u64::from(u32::from_le_bytes(*half)).wrapping_mul(P1);
      h = h.rotate_left(23).wrapping_mul(P2).wrapping_add(P3);
    }
    for &b in bytes {
      h ^= u64::from(b).wrapping_mul(P5);
      h = h.rotate_left(11).wrapping_mul(P1);
    }

    out.copy_from_slice(&avalanche(h).to_be_bytes());
  }
}

/// Streaming XXH64.
pub type Xxh64 = ByteAccumulator<Xxh64Core, STRIPE_LEN>;

impl Xxh64 {
  /// XXH64 with seed 0.
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// XXH64 with `seed`.
  #[inline]
  #[must_use]
  pub fn with_seed(seed: u64) -> Self {
    Self::with_compressor(Xxh64Core::with_seed(seed))
  }

  /// Finish as an integer and reset.
  #[must_use]
  pub fn finish_u64(&mut self) -> u64 {
    let mut out = [0u8; 8];
    self.finalize_raw(&mut out);
    u64::from_be_bytes(out)
  }
}

impl FastHash for Xxh64 {
  type Output = u64;
  type Seed = u64;

  #[inline]
  fn hash_with_seed(seed: u64, data: &[u8]) -> u64 {
    let mut h = Self::with_seed(seed);
    h.update(data);
    h.finish_u64()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_values() {
    assert_eq!(Xxh64::hash(b""), 0xEF46_DB37_51D8_E999);
    assert_eq!(Xxh64::hash(b"abc"), 0x44BC_2CF5_AD77_0999);
  }

  #[test]
  fn digest_is_canonical_big_endian() {
    let mut h = Xxh64::new();
    assert_eq!(&h.digest(b"abc")[..], &0x44BC_2CF5_AD77_0999u64.to_be_bytes());
    assert_eq!(h.output_size(), 8);
    assert_eq!(h.algorithm_name(), "XXH64");
  }

  #[test]
  fn streaming_matches_one_shot_across_stripes() {
    let data: [u8; 100] = core::array::from_fn(|i| (i as u8).wrapping_mul(31));
    for seed in [0u64, 1, u64::MAX] {
      let expected = Xxh64::hash_with_seed(seed, &data);
      let mut h = Xxh64::with_seed(seed);
      for chunk in data.chunks(7) {
        h.update(chunk);
      }
      assert_eq!(h.finish_u64(), expected, "seed={seed}");
    }
  }

  #[test]
  fn seed_changes_output() {
    assert_ne!(Xxh64::hash_with_seed(1, b"abc"), Xxh64::hash(b"abc"));
  }
}
