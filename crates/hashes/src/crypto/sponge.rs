//! Bit-level Keccak sponge.
//!
//! [`SpongeState`] owns the 1600-bit state, the rate/capacity split and a
//! rate-sized queue. It absorbs whole bytes, accepts one trailing partial byte
//! for domain separation, applies `pad10*1` at the absorb→squeeze transition,
//! and squeezes an unbounded byte stream.
//!
//! Bits within a byte are numbered least-significant first, matching the
//! FIPS 202 byte convention: a 2-bit suffix `0b10` followed by the first
//! padding bit is the familiar `0x06` SHA-3 delimiter.

#![allow(clippy::indexing_slicing)] // Queue offsets are bounded by `rate_bytes <= MAX_RATE_BYTES`

use core::fmt;

use super::keccak::KeccakState;
use crate::error::{ParamError, SpongeError};

/// Width of the Keccak-f[1600] state in bits.
pub const STATE_BITS: usize = 1600;

/// Largest legal rate in bytes: 1600 − 64 bits.
const MAX_RATE_BYTES: usize = (STATE_BITS - 64) / 8;

/// A Keccak sponge with a rate fixed at construction.
///
/// The sponge is either absorbing (after construction or [`reset`](Self::reset))
/// or squeezing. Absorbing after squeezing has started, or after a partial
/// byte, returns a [`SpongeError`] rather than producing non-standard output.
#[derive(Clone, PartialEq, Eq)]
pub struct SpongeState {
  state: KeccakState,
  queue: [u8; MAX_RATE_BYTES],
  rate: usize,
  bits_in_queue: usize,
  squeezing: bool,
}

impl SpongeState {
  /// Create a sponge with `rate` bits exposed per permutation.
  ///
  /// `rate` must be a multiple of 64 strictly between 0 and 1600. The
  /// restriction keeps the final padding bit at the top of a whole lane.
  pub fn new(rate: usize) -> Result<Self, ParamError> {
    if rate == 0 || rate >= STATE_BITS || rate % 64 != 0 {
      return Err(ParamError::InvalidRate { rate }.logged());
    }
    Ok(Self::with_valid_rate(rate))
  }

  /// Create the sponge of the Keccak digest with a `bits`-bit output.
  ///
  /// Valid lengths are 128, 224, 256, 288, 384 and 512; the rate is
  /// `1600 − 2 · bits`.
  pub fn with_bit_length(bits: usize) -> Result<Self, ParamError> {
    match bits {
      128 | 224 | 256 | 288 | 384 | 512 => Ok(Self::with_valid_rate(STATE_BITS - 2 * bits)),
      _ => Err(ParamError::UnsupportedBitLength { algorithm: "Keccak", bits }.logged()),
    }
  }

  /// Construct from a rate already known to be valid.
  #[inline]
  pub(crate) const fn with_valid_rate(rate: usize) -> Self {
    debug_assert!(rate > 0 && rate < STATE_BITS && rate % 64 == 0);
    Self {
      state: KeccakState::new(),
      queue: [0u8; MAX_RATE_BYTES],
      rate,
      bits_in_queue: 0,
      squeezing: false,
    }
  }

  /// Rate in bits.
  #[inline]
  #[must_use]
  pub const fn rate(&self) -> usize {
    self.rate
  }

  /// Rate in bytes.
  #[inline]
  #[must_use]
  pub const fn rate_bytes(&self) -> usize {
    self.rate / 8
  }

  /// Capacity in bits.
  #[inline]
  #[must_use]
  pub const fn capacity(&self) -> usize {
    STATE_BITS - self.rate
  }

  /// Digest length implied by the rate: `(1600 − rate) / 2` bits.
  #[inline]
  #[must_use]
  pub const fn fixed_output_bits(&self) -> usize {
    (STATE_BITS - self.rate) / 2
  }

  /// True once the padding transition has run.
  #[inline]
  #[must_use]
  pub const fn is_squeezing(&self) -> bool {
    self.squeezing
  }

  #[inline]
  fn check_absorbing(&self) -> Result<(), SpongeError> {
    if self.squeezing {
      return Err(SpongeError::AbsorbWhileSqueezing.logged());
    }
    if self.bits_in_queue % 8 != 0 {
      return Err(SpongeError::UnalignedQueue.logged());
    }
    Ok(())
  }

  #[inline(always)]
  fn absorb_queue(&mut self) {
    let rate_bytes = self.rate_bytes();
    self.state.xor_bytes(&self.queue[..rate_bytes]);
    self.state.permute();
  }

  /// Absorb one byte.
  pub fn absorb_byte(&mut self, byte: u8) -> Result<(), SpongeError> {
    self.check_absorbing()?;
    self.queue[self.bits_in_queue / 8] = byte;
    self.bits_in_queue += 8;
    if self.bits_in_queue == self.rate {
      self.absorb_queue();
      self.bits_in_queue = 0;
    }
    Ok(())
  }

  /// Absorb `data`.
  ///
  /// Whole rate-sized blocks are XORed into the state straight from `data`;
  /// only a leading top-up and the trailing remainder pass through the queue.
  pub fn absorb(&mut self, mut data: &[u8]) -> Result<(), SpongeError> {
    self.check_absorbing()?;
    if data.is_empty() {
      return Ok(());
    }

    let rate_bytes = self.rate_bytes();
    let queued = self.bits_in_queue / 8;
    if queued != 0 {
      let take = core::cmp::min(rate_bytes - queued, data.len());
      self.queue[queued..queued + take].copy_from_slice(&data[..take]);
      data = &data[take..];

      if queued + take < rate_bytes {
        self.bits_in_queue = (queued + take) * 8;
        return Ok(());
      }
      self.absorb_queue();
      self.bits_in_queue = 0;
    }

    let mut blocks = data.chunks_exact(rate_bytes);
    for block in &mut blocks {
      self.state.xor_bytes(block);
      self.state.permute();
    }

    let rest = blocks.remainder();
    self.queue[..rest.len()].copy_from_slice(rest);
    self.bits_in_queue = rest.len() * 8;
    Ok(())
  }

  /// Absorb the low `bits` bits of `value` as a final partial byte.
  ///
  /// Used for domain-separation suffixes. After this call the queue is no
  /// longer byte-aligned and only squeezing is allowed.
  pub fn absorb_bits(&mut self, value: u8, bits: usize) -> Result<(), SpongeError> {
    if !(1..=7).contains(&bits) {
      return Err(SpongeError::InvalidBitCount { bits }.logged());
    }
    self.check_absorbing()?;

    let mask = (1u8 << bits) - 1;
    self.queue[self.bits_in_queue / 8] = value & mask;
    self.bits_in_queue += bits;
    Ok(())
  }

  /// Apply `pad10*1` and switch to squeezing.
  fn pad_and_switch_to_squeezing(&mut self) {
    let index = self.bits_in_queue / 8;
    let bit = self.bits_in_queue % 8;
    // A byte-aligned position may hold stale queue data from an earlier block.
    let partial_byte = if bit == 0 { 0 } else { self.queue[index] };
    self.queue[index] = partial_byte | (1u8 << bit);
    self.bits_in_queue += 1;

    if self.bits_in_queue == self.rate {
      self.absorb_queue();
    } else {
      let full_lanes = self.bits_in_queue / 64;
      let partial_bits = self.bits_in_queue % 64;
      self.state.xor_bytes(&self.queue[..full_lanes * 8]);
      if partial_bits > 0 {
        let offset = full_lanes * 8;
        let mut lane = [0u8; 8];
        lane.copy_from_slice(&self.queue[offset..offset + 8]);
        let mask = (1u64 << partial_bits) - 1;
        self.state.xor_lane(full_lanes, u64::from_le_bytes(lane) & mask);
      }
    }

    self.state.xor_lane((self.rate - 1) / 64, 1u64 << 63);
    self.bits_in_queue = 0;
    self.squeezing = true;
  }

  /// Squeeze `bit_length` bits into the front of `out`.
  ///
  /// Pads first if the sponge is still absorbing. `bit_length` must be a
  /// multiple of 8 and fit in `out`; both are checked before the sponge
  /// changes state.
  pub fn squeeze(&mut self, out: &mut [u8], bit_length: usize) -> Result<(), SpongeError> {
    if bit_length % 8 != 0 {
      return Err(SpongeError::UnalignedSqueeze { bits: bit_length }.logged());
    }
    let needed = bit_length / 8;
    let available = out.len();
    let Some(dst) = out.get_mut(..needed) else {
      return Err(SpongeError::OutputTooShort { needed, available }.logged());
    };
    self.squeeze_bytes(dst);
    Ok(())
  }

  /// Squeeze exactly `out.len()` bytes, padding first if still absorbing.
  pub fn squeeze_bytes(&mut self, mut out: &mut [u8]) {
    if !self.squeezing {
      self.pad_and_switch_to_squeezing();
    }

    let rate_bytes = self.rate_bytes();
    while !out.is_empty() {
      if self.bits_in_queue == 0 {
        self.state.permute();
        self.state.write_bytes(&mut self.queue[..rate_bytes]);
        self.bits_in_queue = self.rate;
      }

      let queued = self.bits_in_queue / 8;
      let start = rate_bytes - queued;
      let take = core::cmp::min(queued, out.len());
      out[..take].copy_from_slice(&self.queue[start..start + take]);
      self.bits_in_queue -= take * 8;
      out = &mut out[take..];
    }
  }

  /// Absorb for a façade that keeps the sponge absorbing and byte-aligned
  /// between calls, so the protocol checks cannot fail.
  #[inline]
  pub(crate) fn absorb_aligned(&mut self, data: &[u8]) {
    let absorbed = self.absorb(data);
    debug_assert!(absorbed.is_ok(), "façade sponge left the absorbing phase");
  }

  /// Append a domain-separation suffix, finish with `pad10*1` and squeeze
  /// `out.len()` bytes. `suffix_bits == 0` means no suffix.
  #[inline]
  pub(crate) fn finish_with_suffix(&mut self, suffix: u8, suffix_bits: usize, out: &mut [u8]) {
    if suffix_bits != 0 && !self.squeezing {
      let absorbed = self.absorb_bits(suffix, suffix_bits);
      debug_assert!(absorbed.is_ok(), "façade sponge left the absorbing phase");
    }
    self.squeeze_bytes(out);
  }

  /// Zero the state and queue and return to absorbing. The rate is kept.
  pub fn reset(&mut self) {
    self.state.clear();
    self.queue = [0u8; MAX_RATE_BYTES];
    self.bits_in_queue = 0;
    self.squeezing = false;
  }
}

impl fmt::Debug for SpongeState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SpongeState")
      .field("rate", &self.rate)
      .field("bits_in_queue", &self.bits_in_queue)
      .field("squeezing", &self.squeezing)
      .finish_non_exhaustive()
  }
}
