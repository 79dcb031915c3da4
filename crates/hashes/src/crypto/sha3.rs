//! Fixed-output Keccak digests: original Keccak and SHA-3 (FIPS 202).
//!
//! Both share the sponge and differ only in the domain-separation suffix:
//! Keccak appends nothing before `pad10*1`, SHA-3 appends the two bits `01`.

use core::fmt;

use traits::Digest;

use super::sponge::{STATE_BITS, SpongeState};
use crate::error::ParamError;

/// SHA-3 suffix `01`, least-significant bit first.
const SHA3_SUFFIX: u8 = 0x02;
const SHA3_SUFFIX_BITS: usize = 2;

/// Original Keccak with a 128, 224, 256, 288, 384 or 512-bit output.
#[derive(Clone, Debug)]
pub struct Keccak {
  sponge: SpongeState,
  bits: usize,
}

impl Keccak {
  /// Keccak with a `bits`-bit digest.
  pub fn new(bits: usize) -> Result<Self, ParamError> {
    Ok(Self {
      sponge: SpongeState::with_bit_length(bits)?,
      bits,
    })
  }

  const fn with_valid_bits(bits: usize) -> Self {
    Self {
      sponge: SpongeState::with_valid_rate(STATE_BITS - 2 * bits),
      bits,
    }
  }

  /// Keccak-224.
  #[must_use]
  pub const fn v224() -> Self {
    Self::with_valid_bits(224)
  }

  /// Keccak-256, as used by Ethereum.
  #[must_use]
  pub const fn v256() -> Self {
    Self::with_valid_bits(256)
  }

  /// Keccak-384.
  #[must_use]
  pub const fn v384() -> Self {
    Self::with_valid_bits(384)
  }

  /// Keccak-512.
  #[must_use]
  pub const fn v512() -> Self {
    Self::with_valid_bits(512)
  }
}

impl Digest for Keccak {
  fn algorithm_name(&self) -> &'static str {
    match self.bits {
      128 => "Keccak-128",
      224 => "Keccak-224",
      256 => "Keccak-256",
      288 => "Keccak-288",
      384 => "Keccak-384",
      _ => "Keccak-512",
    }
  }

  #[inline]
  fn output_size(&self) -> usize {
    self.bits / 8
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.sponge.absorb_aligned(data);
  }

  fn finalize_raw(&mut self, out: &mut [u8]) {
    self.sponge.finish_with_suffix(0, 0, out);
    self.reset();
  }

  #[inline]
  fn reset(&mut self) {
    self.sponge.reset();
  }
}

impl fmt::Display for Keccak {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.algorithm_name())
  }
}

/// SHA-3 with a 224, 256, 384 or 512-bit output.
#[derive(Clone, Debug)]
pub struct Sha3 {
  sponge: SpongeState,
  bits: usize,
}

impl Sha3 {
  /// SHA3 with a `bits`-bit digest.
  pub fn new(bits: usize) -> Result<Self, ParamError> {
    match bits {
      224 | 256 | 384 | 512 => Ok(Self::with_valid_bits(bits)),
      _ => Err(ParamError::UnsupportedBitLength { algorithm: "SHA3", bits }.logged()),
    }
  }

  const fn with_valid_bits(bits: usize) -> Self {
    Self {
      sponge: SpongeState::with_valid_rate(STATE_BITS - 2 * bits),
      bits,
    }
  }

  /// SHA3-224.
  #[must_use]
  pub const fn v224() -> Self {
    Self::with_valid_bits(224)
  }

  /// SHA3-256.
  #[must_use]
  pub const fn v256() -> Self {
    Self::with_valid_bits(256)
  }

  /// SHA3-384.
  #[must_use]
  pub const fn v384() -> Self {
    Self::with_valid_bits(384)
  }

  /// SHA3-512.
  #[must_use]
  pub const fn v512() -> Self {
    Self::with_valid_bits(512)
  }
}

impl Digest for Sha3 {
  fn algorithm_name(&self) -> &'static str {
    match self.bits {
      224 => "SHA3-224",
      256 => "SHA3-256",
      384 => "SHA3-384",
      _ => "SHA3-512",
    }
  }

  #[inline]
  fn output_size(&self) -> usize {
    self.bits / 8
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.sponge.absorb_aligned(data);
  }

  fn finalize_raw(&mut self, out: &mut [u8]) {
    self.sponge.finish_with_suffix(SHA3_SUFFIX, SHA3_SUFFIX_BITS, out);
    self.reset();
  }

  #[inline]
  fn reset(&mut self) {
    self.sponge.reset();
  }
}

impl fmt::Display for Sha3 {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.algorithm_name())
  }
}
