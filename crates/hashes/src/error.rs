//! Construction and sponge-protocol errors.

use core::fmt;

/// A construction-time parameter was rejected.
///
/// Constructors validate every parameter before any data is processed; a
/// hasher that was built successfully can no longer fail on its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ParamError {
  /// The algorithm does not exist at this security/output bit length.
  UnsupportedBitLength {
    /// Algorithm family (`"Keccak"`, `"SHA3"`, `"SHAKE"`, ...).
    algorithm: &'static str,
    /// Requested bit length.
    bits: usize,
  },
  /// Sponge rate must be a multiple of 64 in `(0, 1600)`.
  InvalidRate {
    /// Requested rate in bits.
    rate: usize,
  },
  /// MAC key longer than the algorithm allows.
  KeyTooLong {
    /// Key length in bytes.
    len: usize,
    /// Maximum key length in bytes.
    max: usize,
  },
  /// Salt must be empty or exactly `expected` bytes.
  InvalidSaltLength {
    /// Salt length in bytes.
    len: usize,
    /// Required salt length in bytes.
    expected: usize,
  },
  /// Personalization must be empty or exactly `expected` bytes.
  InvalidPersonalLength {
    /// Personalization length in bytes.
    len: usize,
    /// Required personalization length in bytes.
    expected: usize,
  },
  /// Output size outside `1..=max` bytes.
  InvalidOutputSize {
    /// Requested output size in bytes.
    len: usize,
    /// Maximum output size in bytes.
    max: usize,
  },
}

impl ParamError {
  /// Log the rejection and hand the error back, for use in constructor `Err` arms.
  #[inline]
  pub(crate) fn logged(self) -> Self {
    log::debug!(target: "streamhash::params", "rejected construction parameter: {self}");
    self
  }
}

impl fmt::Display for ParamError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::UnsupportedBitLength { algorithm, bits } => {
        write!(f, "{algorithm} does not support a bit length of {bits}")
      }
      Self::InvalidRate { rate } => {
        write!(f, "sponge rate {rate} must be a non-zero multiple of 64 below 1600")
      }
      Self::KeyTooLong { len, max } => write!(f, "key of {len} bytes exceeds the {max}-byte maximum"),
      Self::InvalidSaltLength { len, expected } => {
        write!(f, "salt of {len} bytes must be empty or exactly {expected} bytes")
      }
      Self::InvalidPersonalLength { len, expected } => {
        write!(f, "personalization of {len} bytes must be empty or exactly {expected} bytes")
      }
      Self::InvalidOutputSize { len, max } => write!(f, "output size {len} must be between 1 and {max} bytes"),
    }
  }
}

impl core::error::Error for ParamError {}

/// The Keccak sponge was driven out of protocol.
///
/// These are programmer-contract violations. They are always reported and
/// never silently repaired: a repaired sponge would produce output that looks
/// valid but matches no standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SpongeError {
  /// Absorb called after squeezing started.
  AbsorbWhileSqueezing,
  /// Absorb called after a partial-byte absorb left the queue unaligned.
  UnalignedQueue,
  /// Partial-byte absorb with a bit count outside `1..=7`.
  InvalidBitCount {
    /// Requested bit count.
    bits: usize,
  },
  /// Squeeze length is not a whole number of bytes.
  UnalignedSqueeze {
    /// Requested output length in bits.
    bits: usize,
  },
  /// Output slice shorter than the requested squeeze length.
  OutputTooShort {
    /// Bytes requested.
    needed: usize,
    /// Bytes available.
    available: usize,
  },
}

impl SpongeError {
  #[inline]
  pub(crate) fn logged(self) -> Self {
    log::debug!(target: "streamhash::sponge", "sponge protocol violation: {self}");
    self
  }
}

impl fmt::Display for SpongeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::AbsorbWhileSqueezing => f.write_str("attempt to absorb while squeezing"),
      Self::UnalignedQueue => f.write_str("attempt to absorb with a non-byte-aligned queue"),
      Self::InvalidBitCount { bits } => write!(f, "partial absorb of {bits} bits; must be 1 to 7"),
      Self::UnalignedSqueeze { bits } => write!(f, "squeeze length of {bits} bits is not a multiple of 8"),
      Self::OutputTooShort { needed, available } => {
        write!(f, "squeeze of {needed} bytes into a {available}-byte buffer")
      }
    }
  }
}

impl core::error::Error for SpongeError {}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::string::ToString;

  use super::*;

  #[test]
  fn param_error_messages() {
    assert_eq!(
      ParamError::UnsupportedBitLength {
        algorithm: "SHA3",
        bits: 128
      }
      .to_string(),
      "SHA3 does not support a bit length of 128"
    );
    assert_eq!(
      ParamError::InvalidRate { rate: 100 }.to_string(),
      "sponge rate 100 must be a non-zero multiple of 64 below 1600"
    );
    assert_eq!(
      ParamError::KeyTooLong { len: 65, max: 64 }.to_string(),
      "key of 65 bytes exceeds the 64-byte maximum"
    );
  }

  #[test]
  fn sponge_error_messages() {
    assert_eq!(
      SpongeError::AbsorbWhileSqueezing.to_string(),
      "attempt to absorb while squeezing"
    );
    assert_eq!(
      SpongeError::InvalidBitCount { bits: 8 }.to_string(),
      "partial absorb of 8 bits; must be 1 to 7"
    );
    assert_eq!(
      SpongeError::OutputTooShort { needed: 4, available: 2 }.to_string(),
      "squeeze of 4 bytes into a 2-byte buffer"
    );
  }

  #[test]
  fn logged_is_identity() {
    let err = SpongeError::UnalignedSqueeze { bits: 3 };
    assert_eq!(err.logged(), err);
    let err = ParamError::InvalidOutputSize { len: 0, max: 64 };
    assert_eq!(err.logged(), err);
  }
}
