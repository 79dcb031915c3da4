//! MurmurHash3 x86_32 (**NOT CRYPTO**).
//!
//! The [`Digest`] output is the 32-bit hash in big-endian byte order.

use core::fmt;

use traits::{Digest, FastHash};

use crate::accumulator::{BlockCompressor, ByteAccumulator};

const BLOCK_LEN: usize = 4;

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

#[inline(always)]
fn mix_k(k: u32) -> u32 {
  k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

#[inline(always)]
fn fmix32(mut h: u32) -> u32 {
  h ^= h >> 16;
  h = h.wrapping_mul(0x85eb_ca6b);
  h ^= h >> 13;
  h = h.wrapping_mul(0xc2b2_ae35);
  h ^= h >> 16;
  h
}

/// MurmurHash3 x86_32 running state.
#[derive(Clone, Default)]
pub struct Murmur3Core {
  seed: u32,
  h: u32,
}

impl Murmur3Core {
  /// Core for `seed`.
  #[must_use]
  pub const fn with_seed(seed: u32) -> Self {
    Self { seed, h: seed }
  }
}

impl fmt::Debug for Murmur3Core {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Murmur3Core").field("seed", &self.seed).finish_non_exhaustive()
  }
}

impl BlockCompressor<BLOCK_LEN> for Murmur3Core {
  fn algorithm_name(&self) -> &'static str {
    "Murmur3_32"
  }

  fn output_size(&self) -> usize {
    4
  }

  #[inline]
  fn reinit(&mut self, _preload: &mut [u8; BLOCK_LEN]) -> usize {
    self.h = self.seed;
    0
  }

  #[inline]
  fn compress(&mut self, block: &[u8; BLOCK_LEN], _block_index: u64) {
    self.h ^= mix_k(u32::from_le_bytes(*block));
    self.h = self.h.rotate_left(13).wrapping_mul(5).wrapping_add(0xe654_6b64);
  }

  fn finalize(&mut self, tail: &[u8], block_count: u64, out: &mut [u8]) {
    let mut h = self.h;
    if !tail.is_empty() {
      let k = tail
        .iter()
        .rev()
        .fold(0u32, |k, &b| (k << 8) | u32::from(b));
      h ^= mix_k(k);
    }
    // The length is mixed in modulo 2^32.
    let len = block_count.wrapping_mul(BLOCK_LEN as u64).wrapping_add(tail.len() as u64) as u32;
    h ^= len;
    out.copy_from_slice(&fmix32(h).to_be_bytes());
  }
}

/// Streaming MurmurHash3 x86_32.
pub type Murmur3_32 = ByteAccumulator<Murmur3Core, BLOCK_LEN>;

impl Murmur3_32 {
  /// Murmur3 with seed 0.
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Murmur3 with `seed`.
  #[inline]
  #[must_use]
  pub fn with_seed(seed: u32) -> Self {
    Self::with_compressor(Murmur3Core::with_seed(seed))
  }

  /// Finish as an integer and reset.
  #[must_use]
  pub fn finish_u32(&mut self) -> u32 {
    let mut out = [0u8; 4];
    self.finalize_raw(&mut out);
    u32::from_be_bytes(out)
  }
}

impl FastHash for Murmur3_32 {
  type Output = u32;
  type Seed = u32;

  #[inline]
  fn hash_with_seed(seed: u32, data: &[u8]) -> u32 {
    let mut h = Self::with_seed(seed);
    h.update(data);
    h.finish_u32()
  }
}
