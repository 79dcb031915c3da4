//! SHA-256 (FIPS 180-4) as a [`BlockCompressor`] plugin.

#![allow(clippy::indexing_slicing)] // Fixed-size arrays + compression schedule

use core::fmt;

use traits::Digest;

use crate::accumulator::{BlockCompressor, ByteAccumulator};

const BLOCK_LEN: usize = 64;

const H0: [u32; 8] = [
  0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

const K: [u32; 64] = [
  0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5, 0xd807aa98,
  0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174, 0xe49b69c1, 0xefbe4786,
  0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da, 0x983e5152, 0xa831c66d, 0xb00327c8,
  0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967, 0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13,
  0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85, 0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819,
  0xd6990624, 0xf40e3585, 0x106aa070, 0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a,
  0x5b9cca4f, 0x682e6ff3, 0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7,
  0xc67178f2,
];

#[inline(always)]
fn ch(x: u32, y: u32, z: u32) -> u32 {
  (x & y) ^ (!x & z)
}

#[inline(always)]
fn maj(x: u32, y: u32, z: u32) -> u32 {
  (x & y) ^ (x & z) ^ (y & z)
}

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
  x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
  x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
  x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
  x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

fn compress_block(state: &mut [u32; 8], block: &[u8; BLOCK_LEN]) {
  // 16-word ring buffer message schedule.
  let mut w = [0u32; 16];
  let (chunks, _) = block.as_chunks::<4>();
  for (word, chunk) in w.iter_mut().zip(chunks) {
    *word = u32::from_be_bytes(*chunk);
  }

  let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;
  for (i, &k) in K.iter().enumerate() {
    let wi = if i < 16 {
      w[i]
    } else {
      let next = small_sigma1(w[(i + 14) & 15])
        .wrapping_add(w[(i + 9) & 15])
        .wrapping_add(small_sigma0(w[(i + 1) & 15]))
        .wrapping_add(w[i & 15]);
      w[i & 15] = next;
      next
    };

    let t1 = h
      .wrapping_add(big_sigma1(e))
      .wrapping_add(ch(e, f, g))
      .wrapping_add(k)
      .wrapping_add(wi);
    let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

    h = g;
    g = f;
    f = e;
    e = d.wrapping_add(t1);
    d = c;
    c = b;
    b = a;
    a = t1.wrapping_add(t2);
  }

  for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
    *s = s.wrapping_add(v);
  }
}

/// SHA-256 chaining state.
#[derive(Clone)]
pub struct Sha256Core {
  state: [u32; 8],
}

impl Default for Sha256Core {
  #[inline]
  fn default() -> Self {
    Self { state: H0 }
  }
}

impl fmt::Debug for Sha256Core {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Sha256Core").finish_non_exhaustive()
  }
}

impl BlockCompressor<BLOCK_LEN> for Sha256Core {
  fn algorithm_name(&self) -> &'static str {
    "SHA-256"
  }

  fn output_size(&self) -> usize {
    32
  }

  #[inline]
  fn reinit(&mut self, _preload: &mut [u8; BLOCK_LEN]) -> usize {
    self.state = H0;
    0
  }

  #[inline]
  fn compress(&mut self, block: &[u8; BLOCK_LEN], _block_index: u64) {
    compress_block(&mut self.state, block);
  }

  fn finalize(&mut self, tail: &[u8], block_count: u64, out: &mut [u8]) {
    let total_len = block_count.wrapping_mul(BLOCK_LEN as u64).wrapping_add(tail.len() as u64);
    let bit_len = total_len.wrapping_mul(8);

    let mut block = [0u8; BLOCK_LEN];
    block[..tail.len()].copy_from_slice(tail);
    block[tail.len()] = 0x80;

    // No room for the 64-bit length: it goes in an extra block.
    if tail.len() >= 56 {
      compress_block(&mut self.state, &block);
      block = [0u8; BLOCK_LEN];
    }
    block[56..].copy_from_slice(&bit_len.to_be_bytes());
    compress_block(&mut self.state, &block);

    for (chunk, word) in out.chunks_exact_mut(4).zip(self.state) {
      chunk.copy_from_slice(&word.to_be_bytes());
    }
  }
}

/// SHA-256 over the shared [`ByteAccumulator`].
pub type Sha256 = ByteAccumulator<Sha256Core, BLOCK_LEN>;

impl Sha256 {
  /// A fresh SHA-256 hasher.
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Compute the digest of `data` in one shot.
  #[must_use]
  pub fn hash(data: &[u8]) -> [u8; 32] {
    let mut h = Self::new();
    h.update(data);
    let mut out = [0u8; 32];
    h.finalize_raw(&mut out);
    out
  }
}
