//! SP 800-185 derived Keccak functions: cSHAKE and KMAC.
//!
//! Both absorb an encoded prefix into a fresh SHAKE-rate sponge and keep a
//! snapshot of the sponge taken right after it. Reset restores the snapshot,
//! which leaves the sponge exactly as re-absorbing the prefix would.

#![allow(clippy::indexing_slicing)] // Fixed-size encoding buffers + audited indexing

use core::fmt;

use traits::{Digest, MAX_OUTPUT_SIZE, VerificationError};

use super::{
  shake::{SHAKE_SUFFIX, SHAKE_SUFFIX_BITS, XofReader},
  sponge::{STATE_BITS, SpongeState},
};
use crate::error::ParamError;

/// cSHAKE suffix `00`.
const CSHAKE_SUFFIX: u8 = 0x00;
const CSHAKE_SUFFIX_BITS: usize = 2;

const KMAC_FUNCTION_NAME: &[u8] = b"KMAC";

// Largest bytepad fill: one byte short of the cSHAKE128 rate.
const ZEROES_168: [u8; 168] = [0u8; 168];

/// `left_encode(value)`: big-endian bytes without leading zeros, preceded by
/// their count. Zero encodes as `[0x01, 0x00]`.
#[inline(always)]
pub fn left_encode(value: u64, buf: &mut [u8; 9]) -> &[u8] {
  buf[1..].copy_from_slice(&value.to_be_bytes());
  let i = buf[1..8].iter().take_while(|&&b| b == 0).count();
  buf[i] = (8 - i) as u8;
  &buf[i..]
}

/// `right_encode(value)`: big-endian bytes without leading zeros, followed by
/// their count. Zero encodes as `[0x00, 0x01]`.
#[inline(always)]
pub fn right_encode(value: u64, buf: &mut [u8; 9]) -> &[u8] {
  buf[..8].copy_from_slice(&value.to_be_bytes());
  let i = buf[..7].iter().take_while(|&&b| b == 0).count();
  buf[8] = (8 - i) as u8;
  &buf[i..]
}

/// Streams `bytepad(X, rate_bytes)` into a sponge while counting bytes, so no
/// intermediate buffer is needed for `X`.
struct BytePad<'a> {
  sponge: &'a mut SpongeState,
  written: usize,
}

impl<'a> BytePad<'a> {
  fn start(sponge: &'a mut SpongeState) -> Self {
    let rate_bytes = sponge.rate_bytes() as u64;
    let mut pad = Self { sponge, written: 0 };
    let mut buf = [0u8; 9];
    pad.absorb(left_encode(rate_bytes, &mut buf));
    pad
  }

  #[inline]
  fn absorb(&mut self, data: &[u8]) {
    self.sponge.absorb_aligned(data);
    self.written += data.len();
  }

  /// `encode_string(s) = left_encode(bit_len(s)) || s`.
  fn encode_string(&mut self, s: &[u8]) {
    let mut buf = [0u8; 9];
    self.absorb(left_encode((s.len() as u64) * 8, &mut buf));
    self.absorb(s);
  }

  fn finish(mut self) {
    let rate_bytes = self.sponge.rate_bytes();
    let rem = self.written % rate_bytes;
    if rem != 0 {
      self.absorb(&ZEROES_168[..rate_bytes - rem]);
    }
  }
}

/// cSHAKE128 / cSHAKE256: SHAKE with a function name `N` and customization
/// string `S`.
///
/// With both strings empty the output is byte-for-byte SHAKE.
#[derive(Clone, Debug)]
pub struct CShake {
  sponge: SpongeState,
  initial: SpongeState,
  bits: usize,
  suffix: u8,
  suffix_bits: usize,
}

impl CShake {
  /// cSHAKE with `bits` of security (128 or 256).
  pub fn new(bits: usize, function_name: &[u8], customization: &[u8]) -> Result<Self, ParamError> {
    match bits {
      128 | 256 => Ok(Self::with_valid_bits(bits, function_name, customization)),
      _ => Err(ParamError::UnsupportedBitLength { algorithm: "cSHAKE", bits }.logged()),
    }
  }

  fn with_valid_bits(bits: usize, function_name: &[u8], customization: &[u8]) -> Self {
    let mut sponge = SpongeState::with_valid_rate(STATE_BITS - 2 * bits);
    if function_name.is_empty() && customization.is_empty() {
      return Self {
        initial: sponge.clone(),
        sponge,
        bits,
        suffix: SHAKE_SUFFIX,
        suffix_bits: SHAKE_SUFFIX_BITS,
      };
    }

    log::trace!(
      target: "streamhash::sha3_derived",
      "cSHAKE{bits} prefix: rate {} bytes, N {} bytes, S {} bytes",
      sponge.rate_bytes(),
      function_name.len(),
      customization.len()
    );
    let mut pad = BytePad::start(&mut sponge);
    pad.encode_string(function_name);
    pad.encode_string(customization);
    pad.finish();

    Self {
      initial: sponge.clone(),
      sponge,
      bits,
      suffix: CSHAKE_SUFFIX,
      suffix_bits: CSHAKE_SUFFIX_BITS,
    }
  }

  /// cSHAKE128.
  #[must_use]
  pub fn v128(function_name: &[u8], customization: &[u8]) -> Self {
    Self::with_valid_bits(128, function_name, customization)
  }

  /// cSHAKE256.
  #[must_use]
  pub fn v256(function_name: &[u8], customization: &[u8]) -> Self {
    Self::with_valid_bits(256, function_name, customization)
  }

  /// Security level in bits.
  #[inline]
  #[must_use]
  pub const fn security_bits(&self) -> usize {
    self.bits
  }

  /// Squeeze exactly `out.len()` bytes, then reset.
  pub fn finalize_xof_into(&mut self, out: &mut [u8]) {
    self.sponge.finish_with_suffix(self.suffix, self.suffix_bits, out);
    self.reset();
  }

  /// Finish absorbing and return a reader over the output stream. The hasher
  /// is reset and can be reused immediately.
  #[must_use]
  pub fn finalize_xof(&mut self) -> XofReader {
    let mut sponge = self.sponge.clone();
    sponge.finish_with_suffix(self.suffix, self.suffix_bits, &mut []);
    self.reset();
    XofReader::from_squeezing(sponge)
  }

  /// Absorb `data` and squeeze `out.len()` bytes in one call.
  pub fn hash_into(&mut self, data: &[u8], out: &mut [u8]) {
    self.update(data);
    self.finalize_xof_into(out);
  }
}

impl Digest for CShake {
  fn algorithm_name(&self) -> &'static str {
    if self.bits == 128 { "cSHAKE128" } else { "cSHAKE256" }
  }

  #[inline]
  fn output_size(&self) -> usize {
    self.bits / 4
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.sponge.absorb_aligned(data);
  }

  #[inline]
  fn finalize_raw(&mut self, out: &mut [u8]) {
    self.finalize_xof_into(out);
  }

  #[inline]
  fn reset(&mut self) {
    self.sponge.clone_from(&self.initial);
  }
}

impl fmt::Display for CShake {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.algorithm_name())
  }
}

/// KMAC128 / KMAC256 keyed message authentication.
///
/// The [`Digest`] output length is fixed at construction (32 bytes for
/// KMAC128, 64 for KMAC256, or [`with_output_size`](Self::with_output_size))
/// and is bound into the tag. [`finalize_xof`](Self::finalize_xof) gives
/// KMACXOF, whose output does not depend on how much is read.
#[derive(Clone)]
pub struct Kmac {
  inner: CShake,
  output_size: usize,
}

impl Kmac {
  /// KMAC with `bits` of security (128 or 256), keyed with `key`.
  pub fn new(bits: usize, key: &[u8], customization: &[u8]) -> Result<Self, ParamError> {
    match bits {
      128 | 256 => Ok(Self::with_valid_bits(bits, key, customization)),
      _ => Err(ParamError::UnsupportedBitLength { algorithm: "KMAC", bits }.logged()),
    }
  }

  fn with_valid_bits(bits: usize, key: &[u8], customization: &[u8]) -> Self {
    let mut inner = CShake::with_valid_bits(bits, KMAC_FUNCTION_NAME, customization);
    log::trace!(
      target: "streamhash::sha3_derived",
      "KMAC{bits} key block: {} key bytes",
      key.len()
    );
    let mut pad = BytePad::start(&mut inner.sponge);
    pad.encode_string(key);
    pad.finish();
    inner.initial.clone_from(&inner.sponge);

    Self {
      inner,
      output_size: bits / 4,
    }
  }

  /// KMAC128.
  #[must_use]
  pub fn v128(key: &[u8], customization: &[u8]) -> Self {
    Self::with_valid_bits(128, key, customization)
  }

  /// KMAC256.
  #[must_use]
  pub fn v256(key: &[u8], customization: &[u8]) -> Self {
    Self::with_valid_bits(256, key, customization)
  }

  /// Override the [`Digest`] output length (1 to 64 bytes).
  pub fn with_output_size(mut self, len: usize) -> Result<Self, ParamError> {
    if len == 0 || len > MAX_OUTPUT_SIZE {
      return Err(ParamError::InvalidOutputSize { len, max: MAX_OUTPUT_SIZE }.logged());
    }
    self.output_size = len;
    Ok(self)
  }

  /// Security level in bits.
  #[inline]
  #[must_use]
  pub const fn security_bits(&self) -> usize {
    self.inner.bits
  }

  fn absorb_length(&mut self, bits: u64) {
    let mut buf = [0u8; 9];
    self.inner.sponge.absorb_aligned(right_encode(bits, &mut buf));
  }

  /// KMAC with the output length `out.len()` encoded into the tag, for tags
  /// longer than [`MAX_OUTPUT_SIZE`]. Resets afterwards.
  pub fn finalize_variable_into(&mut self, out: &mut [u8]) {
    self.absorb_length((out.len() as u64) * 8);
    self.inner.finalize_xof_into(out);
  }

  /// KMACXOF: squeeze exactly `out.len()` bytes, then reset.
  pub fn finalize_xof_into(&mut self, out: &mut [u8]) {
    self.absorb_length(0);
    self.inner.finalize_xof_into(out);
  }

  /// KMACXOF reader. The MAC is reset to its keyed state.
  #[must_use]
  pub fn finalize_xof(&mut self) -> XofReader {
    self.absorb_length(0);
    self.inner.finalize_xof()
  }

  /// Compare the tag of everything absorbed so far against `tag` in constant
  /// time, then reset.
  ///
  /// `tag` must have the configured output size.
  pub fn verify(&mut self, tag: &[u8]) -> Result<(), VerificationError> {
    let expected = self.finalize();
    if expected.len() != tag.len() {
      return Err(VerificationError::new());
    }
    let diff = expected.iter().zip(tag).fold(0u8, |acc, (a, b)| acc | (a ^ b));
    if core::hint::black_box(diff) == 0 {
      Ok(())
    } else {
      Err(VerificationError::new())
    }
  }
}

impl Digest for Kmac {
  fn algorithm_name(&self) -> &'static str {
    if self.inner.bits == 128 { "KMAC128" } else { "KMAC256" }
  }

  #[inline]
  fn output_size(&self) -> usize {
    self.output_size
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.inner.update(data);
  }

  #[inline]
  fn finalize_raw(&mut self, out: &mut [u8]) {
    self.finalize_variable_into(out);
  }

  #[inline]
  fn reset(&mut self) {
    self.inner.reset();
  }
}

impl fmt::Display for Kmac {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.algorithm_name())
  }
}

impl fmt::Debug for Kmac {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Kmac")
      .field("bits", &self.inner.bits)
      .field("output_size", &self.output_size)
      .finish_non_exhaustive()
  }
}
