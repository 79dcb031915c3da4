//! BLAKE2b (RFC 7693) as a [`BlockCompressor`] plugin.
//!
//! Supports the full sequential parameter set: output length 1..=64 bytes,
//! keys up to 64 bytes, and 16-byte salt and personalization strings.

#![allow(clippy::indexing_slicing)] // Compression schedule uses fixed indices

use core::fmt;

use traits::{Digest, MAX_OUTPUT_SIZE};

use crate::{
  accumulator::{BlockCompressor, ByteAccumulator},
  error::ParamError,
};

const BLOCK_LEN: usize = 128;
const MAX_KEY_LEN: usize = 64;
const SALT_LEN: usize = 16;
const PERSONAL_LEN: usize = 16;

const IV: [u64; 8] = [
  0x6a09_e667_f3bc_c908,
  0xbb67_ae85_84ca_a73b,
  0x3c6e_f372_fe94_f82b,
  0xa54f_f53a_5f1d_36f1,
  0x510e_527f_ade6_82d1,
  0x9b05_688c_2b3e_6c1f,
  0x1f83_d9ab_fb41_bd6b,
  0x5be0_cd19_137e_2179,
];

const SIGMA: [[usize; 16]; 12] = [
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
  [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
  [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
  [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
  [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
  [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
  [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
  [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
  [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
];

#[inline(always)]
fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
  v[d] = (v[d] ^ v[a]).rotate_right(32);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(24);
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
  v[d] = (v[d] ^ v[a]).rotate_right(16);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(63);
}

fn compress(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t: u128, is_last: bool) {
  let mut m = [0u64; 16];
  let (chunks, _) = block.as_chunks::<8>();
  for (word, chunk) in m.iter_mut().zip(chunks) {
    *word = u64::from_le_bytes(*chunk);
  }

  let mut v = [0u64; 16];
  v[..8].copy_from_slice(h);
  v[8..].copy_from_slice(&IV);
  v[12] ^= t as u64;
  v[13] ^= (t >> 64) as u64;
  if is_last {
    v[14] = !v[14];
  }

  for s in &SIGMA {
    g(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
    g(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
    g(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
    g(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);

    g(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
    g(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
    g(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
    g(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
  }

  for (i, word) in h.iter_mut().enumerate() {
    *word ^= v[i] ^ v[i + 8];
  }
}

/// Builder for BLAKE2b parameters. Validation happens in
/// [`build`](Self::build).
#[derive(Clone)]
pub struct Blake2bParams {
  output_size: usize,
  key: [u8; MAX_KEY_LEN],
  key_len: usize,
  salt: [u8; SALT_LEN],
  salt_len: usize,
  personal: [u8; PERSONAL_LEN],
  personal_len: usize,
}

impl Default for Blake2bParams {
  fn default() -> Self {
    Self::new()
  }
}

impl Blake2bParams {
  /// Unkeyed BLAKE2b-512 with no salt or personalization.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      output_size: MAX_OUTPUT_SIZE,
      key: [0u8; MAX_KEY_LEN],
      key_len: 0,
      salt: [0u8; SALT_LEN],
      salt_len: 0,
      personal: [0u8; PERSONAL_LEN],
      personal_len: 0,
    }
  }

  /// Digest length in bytes (1..=64).
  #[must_use]
  pub const fn output_size(mut self, len: usize) -> Self {
    self.output_size = len;
    self
  }

  /// MAC key, at most 64 bytes.
  #[must_use]
  pub fn key(mut self, key: &[u8]) -> Self {
    self.key = [0u8; MAX_KEY_LEN];
    let n = key.len().min(MAX_KEY_LEN);
    self.key[..n].copy_from_slice(&key[..n]);
    self.key_len = key.len();
    self
  }

  /// Salt: empty or exactly 16 bytes.
  #[must_use]
  pub fn salt(mut self, salt: &[u8]) -> Self {
    self.salt = [0u8; SALT_LEN];
    let n = salt.len().min(SALT_LEN);
    self.salt[..n].copy_from_slice(&salt[..n]);
    self.salt_len = salt.len();
    self
  }

  /// Personalization: empty or exactly 16 bytes.
  #[must_use]
  pub fn personal(mut self, personal: &[u8]) -> Self {
    self.personal = [0u8; PERSONAL_LEN];
    let n = personal.len().min(PERSONAL_LEN);
    self.personal[..n].copy_from_slice(&personal[..n]);
    self.personal_len = personal.len();
    self
  }

  /// Validate the parameters and create the hasher.
  pub fn build(&self) -> Result<Blake2b, ParamError> {
    if self.output_size == 0 || self.output_size > MAX_OUTPUT_SIZE {
      return Err(
        ParamError::InvalidOutputSize {
          len: self.output_size,
          max: MAX_OUTPUT_SIZE,
        }
        .logged(),
      );
    }
    if self.key_len > MAX_KEY_LEN {
      return Err(
        ParamError::KeyTooLong {
          len: self.key_len,
          max: MAX_KEY_LEN,
        }
        .logged(),
      );
    }
    if self.salt_len != 0 && self.salt_len != SALT_LEN {
      return Err(
        ParamError::InvalidSaltLength {
          len: self.salt_len,
          expected: SALT_LEN,
        }
        .logged(),
      );
    }
    if self.personal_len != 0 && self.personal_len != PERSONAL_LEN {
      return Err(
        ParamError::InvalidPersonalLength {
          len: self.personal_len,
          expected: PERSONAL_LEN,
        }
        .logged(),
      );
    }
    Ok(Blake2b::with_compressor(Blake2bCore::from_params(self)))
  }
}

impl fmt::Debug for Blake2bParams {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Blake2bParams")
      .field("output_size", &self.output_size)
      .field("key_len", &self.key_len)
      .field("salt_len", &self.salt_len)
      .field("personal_len", &self.personal_len)
      .finish_non_exhaustive()
  }
}

/// BLAKE2b chaining state.
///
/// The final block must carry the last-block flag, but the accumulator
/// cannot know a block is final when it hands it over. The core therefore
/// holds the most recent block back and compresses it on the next call,
/// marking it final only from [`finalize`](BlockCompressor::finalize).
#[derive(Clone)]
pub struct Blake2bCore {
  h: [u64; 8],
  h0: [u64; 8],
  key: [u8; MAX_KEY_LEN],
  key_len: usize,
  output_size: usize,
  pending: [u8; BLOCK_LEN],
  has_pending: bool,
}

impl Blake2bCore {
  fn from_params(params: &Blake2bParams) -> Self {
    let mut h0 = IV;
    // Parameter block word 0: digest length, key length, fanout = 1, depth = 1.
    h0[0] ^= 0x0101_0000 ^ ((params.key_len as u64) << 8) ^ params.output_size as u64;
    let (salt, _) = params.salt.as_chunks::<8>();
    let (personal, _) = params.personal.as_chunks::<8>();
    h0[4] ^= u64::from_le_bytes(salt[0]);
    h0[5] ^= u64::from_le_bytes(salt[1]);
    h0[6] ^= u64::from_le_bytes(personal[0]);
    h0[7] ^= u64::from_le_bytes(personal[1]);

    Self {
      h: h0,
      h0,
      key: params.key,
      key_len: params.key_len,
      output_size: params.output_size,
      pending: [0u8; BLOCK_LEN],
      has_pending: false,
    }
  }

  #[inline]
  fn byte_count(blocks: u64, extra: usize) -> u128 {
    (blocks as u128) * (BLOCK_LEN as u128) + extra as u128
  }
}

impl Default for Blake2bCore {
  #[inline]
  fn default() -> Self {
    Self::from_params(&Blake2bParams::new())
  }
}

impl fmt::Debug for Blake2bCore {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Blake2bCore")
      .field("output_size", &self.output_size)
      .finish_non_exhaustive()
  }
}

impl BlockCompressor<BLOCK_LEN> for Blake2bCore {
  fn algorithm_name(&self) -> &'static str {
    "BLAKE2b"
  }

  fn output_size(&self) -> usize {
    self.output_size
  }

  fn reinit(&mut self, preload: &mut [u8; BLOCK_LEN]) -> usize {
    self.h = self.h0;
    self.has_pending = false;
    if self.key_len == 0 {
      return 0;
    }
    // The key is hashed as a full zero-padded first block.
    preload[..self.key_len].copy_from_slice(&self.key[..self.key_len]);
    BLOCK_LEN
  }

  fn compress(&mut self, block: &[u8; BLOCK_LEN], block_index: u64) {
    if self.has_pending {
      compress(&mut self.h, &self.pending, Self::byte_count(block_index, 0), false);
    }
    self.pending = *block;
    self.has_pending = true;
  }

  fn finalize(&mut self, tail: &[u8], block_count: u64, out: &mut [u8]) {
    if tail.is_empty() && self.has_pending {
      compress(&mut self.h, &self.pending, Self::byte_count(block_count, 0), true);
    } else {
      if self.has_pending {
        compress(&mut self.h, &self.pending, Self::byte_count(block_count, 0), false);
      }
      let mut last = [0u8; BLOCK_LEN];
      last[..tail.len()].copy_from_slice(tail);
      compress(&mut self.h, &last, Self::byte_count(block_count, tail.len()), true);
    }
    self.has_pending = false;

    let mut bytes = [0u8; 64];
    for (chunk, word) in bytes.chunks_exact_mut(8).zip(self.h) {
      chunk.copy_from_slice(&word.to_le_bytes());
    }
    out.copy_from_slice(&bytes[..self.output_size]);
  }
}

/// BLAKE2b over the shared [`ByteAccumulator`].
pub type Blake2b = ByteAccumulator<Blake2bCore, BLOCK_LEN>;

impl Blake2b {
  /// Unkeyed BLAKE2b with an `output_size`-byte digest.
  pub fn new(output_size: usize) -> Result<Self, ParamError> {
    Blake2bParams::new().output_size(output_size).build()
  }

  /// BLAKE2b-512.
  #[must_use]
  pub fn v512() -> Self {
    Self::default()
  }

  /// Keyed BLAKE2b (MAC mode) with an `output_size`-byte tag.
  pub fn keyed(key: &[u8], output_size: usize) -> Result<Self, ParamError> {
    Blake2bParams::new().output_size(output_size).key(key).build()
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, string::String, vec::Vec};
  use core::fmt::Write;

  use super::*;

  fn hex(bytes: &[u8]) -> String {
    let mut s = String::new();
    for &b in bytes {
      write!(&mut s, "{b:02x}").unwrap();
    }
    s
  }

  #[test]
  fn rfc7693_abc() {
    assert_eq!(
      hex(&Blake2b::v512().digest(b"abc")),
      "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d17d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923"
    );
  }

  #[test]
  fn empty_message() {
    assert_eq!(
      hex(&Blake2b::v512().finalize()),
      "786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be2ce"
    );
  }

  #[test]
  fn blake2b_256_empty() {
    assert_eq!(
      hex(&Blake2b::new(32).unwrap().finalize()),
      "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
    );
  }

  #[test]
  fn exact_block_keeps_last_flag() {
    // A message of exactly one block must be compressed once, as the final block.
    let data = [0x11u8; BLOCK_LEN * 2];
    let mut streamed = Blake2b::v512();
    streamed.update(&data[..BLOCK_LEN]);
    streamed.update(&data[BLOCK_LEN..]);
    let mut bytewise = Blake2b::v512();
    for &b in &data {
      bytewise.update_byte(b);
    }
    assert_eq!(streamed.finalize(), bytewise.finalize());
    assert_ne!(
      Blake2b::v512().digest(&data[..BLOCK_LEN]),
      Blake2b::v512().digest(&data[..BLOCK_LEN - 1])
    );
  }

  #[test]
  fn keyed_empty_message_uses_key_block_as_final() {
    let key: Vec<u8> = (0u8..64).collect();
    let mut mac = Blake2b::keyed(&key, 64).unwrap();
    // RFC 7693 / reference `blake2b-kat.txt`, first keyed entry (empty input).
    assert_eq!(
      hex(&mac.finalize()),
      "10ebb67700b1868efb4417987acf4690ae9d972fb7a590c2f02871799aaa4786b5e996e8f0f4eb981fc214b005f42d2ff4233499391653df7aefcbc13fc51568"
    );
  }

  #[test]
  fn reset_restores_key_block() {
    let mut mac = Blake2b::keyed(b"secret", 32).unwrap();
    let expected = mac.digest(b"payload");
    mac.update(b"noise");
    mac.reset();
    assert_eq!(mac.digest(b"payload"), expected);
    assert_eq!(mac.block_count(), 1);
  }

  #[test]
  fn parameter_validation() {
    assert!(matches!(
      Blake2b::new(0),
      Err(ParamError::InvalidOutputSize { len: 0, max: 64 })
    ));
    assert!(matches!(
      Blake2b::new(65),
      Err(ParamError::InvalidOutputSize { len: 65, max: 64 })
    ));
    assert!(matches!(
      Blake2b::keyed(&[0u8; 65], 64),
      Err(ParamError::KeyTooLong { len: 65, max: 64 })
    ));
    assert!(matches!(
      Blake2bParams::new().salt(&[1u8; 8]).build(),
      Err(ParamError::InvalidSaltLength { len: 8, expected: 16 })
    ));
    assert!(matches!(
      Blake2bParams::new().personal(&[1u8; 17]).build(),
      Err(ParamError::InvalidPersonalLength { len: 17, expected: 16 })
    ));
    assert!(
      Blake2bParams::new()
        .salt(&[1u8; 16])
        .personal(&[2u8; 16])
        .key(b"k")
        .output_size(20)
        .build()
        .is_ok()
    );
  }

  #[test]
  fn salt_and_personal_change_output() {
    let plain = Blake2b::v512().digest(b"x");
    let salted = Blake2bParams::new().salt(&[7u8; 16]).build().unwrap().digest(b"x");
    let personal = Blake2bParams::new().personal(&[7u8; 16]).build().unwrap().digest(b"x");
    assert_ne!(plain, salted);
    assert_ne!(salted, personal);
  }

  #[test]
  fn debug_hides_key() {
    let params = Blake2bParams::new().key(b"hunter2");
    let s = format!("{params:?}");
    assert!(!s.contains("hunter2"));
    assert_eq!(
      s,
      "Blake2bParams { output_size: 64, key_len: 7, salt_len: 0, personal_len: 0, .. }"
    );
  }
}
