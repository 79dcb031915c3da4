//! Error types shared by every digest implementation.
//!
//! Algorithm crates add their own construction and protocol errors; the types
//! here cover the façade itself: writing a digest into a caller-provided buffer
//! and verifying a tag.

use core::fmt;

/// The caller-provided output buffer cannot hold the digest.
///
/// Returned by [`Digest::finalize_into`](crate::Digest::finalize_into) and
/// [`Digest::digest_into`](crate::Digest::digest_into) before any byte is
/// written and before the hasher state changes, so the call can be retried with
/// a larger buffer.
///
/// # Examples
///
/// ```
/// use streamhash_traits::OutputSizeError;
///
/// let err = OutputSizeError::new(32, 16);
/// assert_eq!(err.required(), 32);
/// assert_eq!(err.available(), 16);
/// assert_eq!(err.to_string(), "output buffer too small: need 32 bytes, have 16");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputSizeError {
  required: usize,
  available: usize,
}

impl OutputSizeError {
  /// Create an error for a buffer of `available` bytes when `required` are needed.
  #[inline]
  #[must_use]
  pub const fn new(required: usize, available: usize) -> Self {
    Self { required, available }
  }

  /// Number of bytes the digest needs.
  #[inline]
  #[must_use]
  pub const fn required(&self) -> usize {
    self.required
  }

  /// Number of bytes the caller offered.
  #[inline]
  #[must_use]
  pub const fn available(&self) -> usize {
    self.available
  }
}

impl fmt::Display for OutputSizeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "output buffer too small: need {} bytes, have {}",
      self.required, self.available
    )
  }
}

impl core::error::Error for OutputSizeError {}

/// Verification failed.
///
/// Returned when a computed MAC tag does not match the expected one.
/// Intentionally opaque: it carries no information about where the mismatch
/// occurred.
///
/// # Examples
///
/// ```
/// use streamhash_traits::VerificationError;
///
/// fn verify(computed: &[u8; 32], expected: &[u8; 32]) -> Result<(), VerificationError> {
///   if computed == expected {
///     Ok(())
///   } else {
///     Err(VerificationError::new())
///   }
/// }
///
/// assert!(verify(&[0u8; 32], &[1u8; 32]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct VerificationError;

impl VerificationError {
  /// Create a new verification error.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for VerificationError {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for VerificationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("verification failed")
  }
}

impl core::error::Error for VerificationError {}
