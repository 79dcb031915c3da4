//! The streaming digest contract.
//!
//! Every algorithm in the workspace, whether it is backed by the Keccak sponge
//! or by the generic block accumulator, implements [`Digest`] identically:
//! streaming updates, finalization that leaves the hasher freshly reset, and
//! cheap independent copies through [`Clone`].

use crate::{DigestOutput, OutputSizeError};

/// A streaming hash function with an output length fixed at construction.
///
/// `Clone` is the copy operation: the clone carries the same pending state and
/// shares nothing with the original.
pub trait Digest: Clone {
  /// Descriptive algorithm name (for example `"SHA3-256"`).
  fn algorithm_name(&self) -> &'static str;

  /// Digest length in bytes.
  fn output_size(&self) -> usize;

  /// Update the hasher with additional data. An empty slice is a no-op.
  fn update(&mut self, data: &[u8]);

  /// Update the hasher with a single byte.
  #[inline]
  fn update_byte(&mut self, byte: u8) {
    self.update(core::slice::from_ref(&byte));
  }

  /// Update the hasher with multiple non-contiguous buffers.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Update the hasher with `std::io::IoSlice` buffers.
  #[cfg(feature = "std")]
  #[inline]
  fn update_io_slices(&mut self, bufs: &[std::io::IoSlice<'_>]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Write exactly `output_size()` bytes of digest into `out`, then reset.
  ///
  /// `out.len()` equals `output_size()`; callers go through
  /// [`finalize_into`](Self::finalize_into) or [`finalize`](Self::finalize).
  fn finalize_raw(&mut self, out: &mut [u8]);

  /// Restore the freshly constructed state, keeping construction parameters
  /// (key, salt, rate, output length).
  fn reset(&mut self);

  /// Finalize, return the digest, and reset the hasher.
  #[inline]
  #[must_use]
  fn finalize(&mut self) -> DigestOutput {
    let mut out = DigestOutput::zeroed(self.output_size());
    self.finalize_raw(out.as_mut_slice());
    out
  }

  /// Finalize into the front of `out` and reset.
  ///
  /// Returns the number of bytes written. Fails without touching `out` or the
  /// hasher when `out` is shorter than [`output_size`](Self::output_size).
  #[inline]
  fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize, OutputSizeError> {
    let size = self.output_size();
    let available = out.len();
    let dst = out.get_mut(..size).ok_or(OutputSizeError::new(size, available))?;
    self.finalize_raw(dst);
    Ok(size)
  }

  /// Finalize into `out[offset..offset + len]` and reset.
  ///
  /// Fails before any write when `len` is smaller than the digest or the
  /// window does not fit inside `out`.
  #[inline]
  fn digest_into(&mut self, out: &mut [u8], offset: usize, len: usize) -> Result<usize, OutputSizeError> {
    let size = self.output_size();
    if len < size {
      return Err(OutputSizeError::new(size, len));
    }
    let available = out.len().saturating_sub(offset);
    let window = offset
      .checked_add(len)
      .and_then(|end| out.get_mut(offset..end))
      .ok_or(OutputSizeError::new(len, available))?;
    self.finalize_into(window)
  }

  /// Absorb `data` and finalize in one call.
  #[inline]
  #[must_use]
  fn digest(&mut self, data: &[u8]) -> DigestOutput {
    self.update(data);
    self.finalize()
  }

  /// Wrap a reader to compute the digest of everything read through it.
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn reader<R>(self, inner: R) -> crate::io::DigestReader<R, Self>
  where
    Self: Sized,
  {
    crate::io::DigestReader::new(inner, self)
  }

  /// Wrap a writer to compute the digest of everything written through it.
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn writer<W>(self, inner: W) -> crate::io::DigestWriter<W, Self>
  where
    Self: Sized,
  {
    crate::io::DigestWriter::new(inner, self)
  }
}
