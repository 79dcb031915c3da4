//! `std::io` adapters that hash data as it streams through.
//!
//! [`DigestReader`] and [`DigestWriter`] forward to an inner reader or writer
//! and feed exactly the bytes actually transferred into the wrapped hasher,
//! so short reads and short writes are accounted for.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::io::Write;
//! use streamhash::{Digest, crypto::Sha3};
//!
//! let mut writer = Sha3::v256().writer(Vec::new());
//! writer.write_all(b"abc")?;
//! let (bytes, mut hasher) = writer.into_parts();
//! println!("{:x}", hasher.finalize());
//! ```

use std::io::{self, IoSlice, IoSliceMut, Read, Write};

use crate::{Digest, DigestOutput};

/// Wraps a [`Read`] and hashes every byte read through it.
#[derive(Clone, Debug)]
pub struct DigestReader<R, D> {
  inner: R,
  hasher: D,
}

impl<R, D: Digest> DigestReader<R, D> {
  /// Wrap `inner`, feeding reads into `hasher`.
  #[inline]
  pub fn new(inner: R, hasher: D) -> Self {
    Self { inner, hasher }
  }

  /// Finalize the digest of everything read so far and reset the hasher.
  #[inline]
  #[must_use]
  pub fn digest(&mut self) -> DigestOutput {
    self.hasher.finalize()
  }

  /// The wrapped hasher.
  #[inline]
  pub fn hasher(&self) -> &D {
    &self.hasher
  }

  /// The wrapped reader.
  #[inline]
  pub fn get_ref(&self) -> &R {
    &self.inner
  }

  /// Unwrap into the reader and the hasher.
  #[inline]
  pub fn into_parts(self) -> (R, D) {
    (self.inner, self.hasher)
  }
}

impl<R: Read, D: Digest> Read for DigestReader<R, D> {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    let n = self.inner.read(buf)?;
    if let Some(data) = buf.get(..n) {
      self.hasher.update(data);
    }
    Ok(n)
  }

  fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
    let n = self.inner.read_vectored(bufs)?;
    let mut remaining = n;
    for buf in bufs.iter() {
      if remaining == 0 {
        break;
      }
      let take = remaining.min(buf.len());
      if let Some(data) = buf.get(..take) {
        self.hasher.update(data);
      }
      remaining -= take;
    }
    Ok(n)
  }
}

/// Wraps a [`Write`] and hashes every byte accepted by it.
#[derive(Clone, Debug)]
pub struct DigestWriter<W, D> {
  inner: W,
  hasher: D,
}

impl<W, D: Digest> DigestWriter<W, D> {
  /// Wrap `inner`, feeding accepted writes into `hasher`.
  #[inline]
  pub fn new(inner: W, hasher: D) -> Self {
    Self { inner, hasher }
  }

  /// Finalize the digest of everything written so far and reset the hasher.
  #[inline]
  #[must_use]
  pub fn digest(&mut self) -> DigestOutput {
    self.hasher.finalize()
  }

  /// The wrapped hasher.
  #[inline]
  pub fn hasher(&self) -> &D {
    &self.hasher
  }

  /// The wrapped writer.
  #[inline]
  pub fn get_ref(&self) -> &W {
    &self.inner
  }

  /// Unwrap into the writer and the hasher.
  #[inline]
  pub fn into_parts(self) -> (W, D) {
    (self.inner, self.hasher)
  }
}

impl<W: Write, D: Digest> Write for DigestWriter<W, D> {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    let n = self.inner.write(buf)?;
    if let Some(data) = buf.get(..n) {
      self.hasher.update(data);
    }
    Ok(n)
  }

  fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
    let n = self.inner.write_vectored(bufs)?;
    let mut remaining = n;
    for buf in bufs {
      if remaining == 0 {
        break;
      }
      let take = remaining.min(buf.len());
      if let Some(data) = buf.get(..take) {
        self.hasher.update(data);
      }
      remaining -= take;
    }
    Ok(n)
  }

  #[inline]
  fn flush(&mut self) -> io::Result<()> {
    self.inner.flush()
  }
}

#[cfg(test)]
mod tests {
  use std::{io::Cursor, vec::Vec};

  use super::*;
  use crate::digest::tests::SumDigest;

  /// Accepts at most `limit` bytes per write.
  struct Trickle {
    out: Vec<u8>,
    limit: usize,
  }

  impl Write for Trickle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      let n = buf.len().min(self.limit);
      self.out.extend_from_slice(&buf[..n]);
      Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  #[test]
  fn reader_hashes_bytes_read() {
    let mut reader = SumDigest::default().reader(Cursor::new(b"abc".to_vec()));
    io::copy(&mut reader, &mut io::sink()).unwrap();
    let expected = u32::from(b'a') + u32::from(b'b') + u32::from(b'c');
    assert_eq!(reader.digest(), expected.to_be_bytes());
  }

  #[test]
  fn writer_hashes_only_accepted_bytes() {
    let mut writer = SumDigest::default().writer(Trickle { out: Vec::new(), limit: 2 });
    assert_eq!(writer.write(b"hello").unwrap(), 2);
    writer.write_all(b"llo").unwrap();
    let (inner, mut hasher) = writer.into_parts();
    assert_eq!(inner.out, b"hello");

    let mut expected = SumDigest::default();
    assert_eq!(hasher.finalize(), expected.digest(b"hello"));
  }
}
