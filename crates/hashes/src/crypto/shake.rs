//! SHAKE128 / SHAKE256 extendable-output functions (FIPS 202).

use core::fmt;

use traits::{Digest, Xof};

use super::sponge::{STATE_BITS, SpongeState};
use crate::error::ParamError;

/// SHAKE suffix `1111`, least-significant bit first.
pub(crate) const SHAKE_SUFFIX: u8 = 0x0F;
pub(crate) const SHAKE_SUFFIX_BITS: usize = 4;

/// Output stream of a finalized SHAKE, cSHAKE or KMACXOF instance.
///
/// The reader owns a sponge that is already squeezing; it can only produce
/// more output, never absorb.
#[derive(Clone, Debug)]
pub struct XofReader {
  sponge: SpongeState,
}

impl XofReader {
  /// Wrap a sponge that has already switched to squeezing.
  #[inline]
  pub(crate) fn from_squeezing(sponge: SpongeState) -> Self {
    debug_assert!(sponge.is_squeezing());
    Self { sponge }
  }
}

impl Xof for XofReader {
  #[inline]
  fn squeeze(&mut self, out: &mut [u8]) {
    self.sponge.squeeze_bytes(out);
  }
}

/// SHAKE at the 128 or 256-bit security level.
///
/// As a [`Digest`] it produces `2 · security / 8` bytes (32 for SHAKE128, 64
/// for SHAKE256). Arbitrary output lengths go through
/// [`finalize_xof_into`](Self::finalize_xof_into) or
/// [`finalize_xof`](Self::finalize_xof).
#[derive(Clone, Debug)]
pub struct Shake {
  sponge: SpongeState,
  bits: usize,
}

impl Shake {
  /// SHAKE with `bits` of security (128 or 256).
  pub fn new(bits: usize) -> Result<Self, ParamError> {
    match bits {
      128 | 256 => Ok(Self::with_valid_bits(bits)),
      _ => Err(ParamError::UnsupportedBitLength { algorithm: "SHAKE", bits }.logged()),
    }
  }

  const fn with_valid_bits(bits: usize) -> Self {
    Self {
      sponge: SpongeState::with_valid_rate(STATE_BITS - 2 * bits),
      bits,
    }
  }

  /// SHAKE128.
  #[must_use]
  pub const fn v128() -> Self {
    Self::with_valid_bits(128)
  }

  /// SHAKE256.
  #[must_use]
  pub const fn v256() -> Self {
    Self::with_valid_bits(256)
  }

  /// Security level in bits.
  #[inline]
  #[must_use]
  pub const fn security_bits(&self) -> usize {
    self.bits
  }

  /// Squeeze exactly `out.len()` bytes, then reset.
  pub fn finalize_xof_into(&mut self, out: &mut [u8]) {
    self.sponge.finish_with_suffix(SHAKE_SUFFIX, SHAKE_SUFFIX_BITS, out);
    self.reset();
  }

  /// Finish absorbing and return a reader over the output stream. The hasher
  /// is reset and can be reused immediately.
  #[must_use]
  pub fn finalize_xof(&mut self) -> XofReader {
    let mut sponge = self.sponge.clone();
    sponge.finish_with_suffix(SHAKE_SUFFIX, SHAKE_SUFFIX_BITS, &mut []);
    self.reset();
    XofReader::from_squeezing(sponge)
  }

  /// Absorb `data` and squeeze `out.len()` bytes in one call.
  pub fn hash_into(&mut self, data: &[u8], out: &mut [u8]) {
    self.update(data);
    self.finalize_xof_into(out);
  }
}

impl Digest for Shake {
  fn algorithm_name(&self) -> &'static str {
    if self.bits == 128 { "SHAKE128" } else { "SHAKE256" }
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
    self.sponge.reset();
  }
}

impl fmt::Display for Shake {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.algorithm_name())
  }
}
