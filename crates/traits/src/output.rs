//! Fixed-capacity digest output.

use core::{fmt, ops::Deref};

/// Largest fixed digest any algorithm in the workspace produces, in bytes.
pub const MAX_OUTPUT_SIZE: usize = 64;

/// A finalized digest held on the stack.
///
/// Digest lengths are chosen at construction time (for example `Sha3::new(384)`
/// or a BLAKE2b output size), so the output carries its length next to a
/// [`MAX_OUTPUT_SIZE`] byte array. It dereferences to the valid bytes only.
#[derive(Clone, Copy)]
pub struct DigestOutput {
  bytes: [u8; MAX_OUTPUT_SIZE],
  len: usize,
}

impl DigestOutput {
  /// A zeroed output of `len` bytes.
  ///
  /// # Panics
  ///
  /// Panics if `len > MAX_OUTPUT_SIZE`. Algorithms validate their output size
  /// at construction, so this only fires on an implementation bug.
  #[inline]
  #[must_use]
  pub const fn zeroed(len: usize) -> Self {
    assert!(len <= MAX_OUTPUT_SIZE, "digest output exceeds MAX_OUTPUT_SIZE");
    Self {
      bytes: [0u8; MAX_OUTPUT_SIZE],
      len,
    }
  }

  /// Copy `bytes` into a new output.
  ///
  /// # Panics
  ///
  /// Panics if `bytes.len() > MAX_OUTPUT_SIZE`.
  #[inline]
  #[must_use]
  pub fn from_slice(bytes: &[u8]) -> Self {
    let mut out = Self::zeroed(bytes.len());
    out.as_mut_slice().copy_from_slice(bytes);
    out
  }

  /// Digest length in bytes.
  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.len
  }

  /// True for a zero-length output.
  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// The digest bytes.
  #[inline]
  #[must_use]
  pub fn as_slice(&self) -> &[u8] {
    self.bytes.get(..self.len).unwrap_or(&[])
  }

  /// Mutable access for implementations filling the output.
  #[inline]
  pub fn as_mut_slice(&mut self) -> &mut [u8] {
    self.bytes.get_mut(..self.len).unwrap_or(&mut [])
  }

  /// Copy the first `N` bytes into an array, or `None` if the digest is not
  /// exactly `N` bytes long.
  #[inline]
  #[must_use]
  pub fn to_array<const N: usize>(&self) -> Option<[u8; N]> {
    self.as_slice().try_into().ok()
  }
}

impl Deref for DigestOutput {
  type Target = [u8];

  #[inline]
  fn deref(&self) -> &[u8] {
    self.as_slice()
  }
}

impl AsRef<[u8]> for DigestOutput {
  #[inline]
  fn as_ref(&self) -> &[u8] {
    self.as_slice()
  }
}

impl PartialEq for DigestOutput {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.as_slice() == other.as_slice()
  }
}

impl Eq for DigestOutput {}

impl PartialEq<[u8]> for DigestOutput {
  #[inline]
  fn eq(&self, other: &[u8]) -> bool {
    self.as_slice() == other
  }
}

impl<const N: usize> PartialEq<[u8; N]> for DigestOutput {
  #[inline]
  fn eq(&self, other: &[u8; N]) -> bool {
    self.as_slice() == other.as_slice()
  }
}

impl fmt::LowerHex for DigestOutput {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for b in self.as_slice() {
      write!(f, "{b:02x}")?;
    }
    Ok(())
  }
}

impl fmt::Debug for DigestOutput {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "DigestOutput({self:x})")
  }
}
