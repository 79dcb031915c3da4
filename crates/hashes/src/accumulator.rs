//! Fixed-block input buffering for block-oriented digests.
//!
//! A [`BlockCompressor`] knows how to process one `BLOCK`-byte block and how
//! to pad and finish from a partial tail. [`ByteAccumulator`] owns the
//! buffering around it: callers may feed any number of arbitrarily sized
//! chunks, and the compressor sees each full block exactly once.
//!
//! The buffer never holds a full block between calls. A block that completes
//! on an exact boundary is compressed immediately, so at finalization the
//! compressor always receives a tail strictly shorter than `BLOCK`.

#![allow(clippy::indexing_slicing)] // `buf_len < BLOCK` is maintained by every mutation

use core::fmt;

use traits::Digest;

/// A block compression function driven by [`ByteAccumulator`].
pub trait BlockCompressor<const BLOCK: usize>: Clone {
  /// Human-readable algorithm name.
  fn algorithm_name(&self) -> &'static str;

  /// Digest length in bytes.
  fn output_size(&self) -> usize;

  /// Restore the initial state.
  ///
  /// Bytes written to the front of `preload` are hashed before any caller
  /// data (a MAC key block, for instance). Returns how many were written;
  /// anything above `BLOCK` is clamped.
  fn reinit(&mut self, preload: &mut [u8; BLOCK]) -> usize;

  /// Process one full block. `block_index` counts the blocks processed
  /// before this one.
  fn compress(&mut self, block: &[u8; BLOCK], block_index: u64);

  /// Pad and finish.
  ///
  /// `tail` holds the unprocessed bytes (`tail.len() < BLOCK`), `block_count`
  /// the number of blocks already compressed. Writes exactly
  /// [`output_size`](Self::output_size) bytes into `out`. The compressor's
  /// state is discarded afterwards through [`reinit`](Self::reinit).
  fn finalize(&mut self, tail: &[u8], block_count: u64, out: &mut [u8]);
}

/// Streaming buffer in front of a [`BlockCompressor`].
///
/// Implements [`Digest`]; algorithm types are aliases of this struct with a
/// concrete compressor.
#[derive(Clone)]
pub struct ByteAccumulator<C, const BLOCK: usize> {
  compressor: C,
  buf: [u8; BLOCK],
  buf_len: usize,
  block_count: u64,
}

impl<C: BlockCompressor<BLOCK>, const BLOCK: usize> ByteAccumulator<C, BLOCK> {
  /// Wrap `compressor`, running its [`reinit`](BlockCompressor::reinit) once.
  pub fn with_compressor(compressor: C) -> Self {
    let mut acc = Self {
      compressor,
      buf: [0u8; BLOCK],
      buf_len: 0,
      block_count: 0,
    };
    acc.restart();
    acc
  }

  /// The wrapped compressor.
  #[inline]
  #[must_use]
  pub fn compressor(&self) -> &C {
    &self.compressor
  }

  /// Number of buffered bytes not yet compressed. Always `< BLOCK`.
  #[inline]
  #[must_use]
  pub const fn flush(&self) -> usize {
    self.buf_len
  }

  /// Number of blocks passed to the compressor since the last reset,
  /// including a compressed preload block.
  #[inline]
  #[must_use]
  pub const fn block_count(&self) -> u64 {
    self.block_count
  }

  #[inline(always)]
  fn compress_buffer(&mut self) {
    self.compressor.compress(&self.buf, self.block_count);
    self.block_count += 1;
    self.buf_len = 0;
  }

  fn restart(&mut self) {
    self.buf = [0u8; BLOCK];
    self.block_count = 0;
    self.buf_len = self.compressor.reinit(&mut self.buf).min(BLOCK);
    if self.buf_len == BLOCK {
      self.compress_buffer();
    }
  }

  fn absorb(&mut self, mut data: &[u8]) {
    if data.is_empty() {
      return;
    }

    if self.buf_len != 0 {
      let take = core::cmp::min(BLOCK - self.buf_len, data.len());
      self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
      self.buf_len += take;
      data = &data[take..];

      if self.buf_len < BLOCK {
        return;
      }
      self.compress_buffer();
    }

    let (blocks, rest) = data.as_chunks::<BLOCK>();
    for block in blocks {
      self.compressor.compress(block, self.block_count);
      self.block_count += 1;
    }

    self.buf[..rest.len()].copy_from_slice(rest);
    self.buf_len = rest.len();
  }
}

impl<C: BlockCompressor<BLOCK>, const BLOCK: usize> Digest for ByteAccumulator<C, BLOCK> {
  #[inline]
  fn algorithm_name(&self) -> &'static str {
    self.compressor.algorithm_name()
  }

  #[inline]
  fn output_size(&self) -> usize {
    self.compressor.output_size()
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.absorb(data);
  }

  #[inline]
  fn update_byte(&mut self, byte: u8) {
    self.buf[self.buf_len] = byte;
    self.buf_len += 1;
    if self.buf_len == BLOCK {
      self.compress_buffer();
    }
  }

  fn finalize_raw(&mut self, out: &mut [u8]) {
    self
      .compressor
      .finalize(&self.buf[..self.buf_len], self.block_count, out);
    self.restart();
  }

  #[inline]
  fn reset(&mut self) {
    self.restart();
  }
}

impl<C: BlockCompressor<BLOCK> + Default, const BLOCK: usize> Default for ByteAccumulator<C, BLOCK> {
  #[inline]
  fn default() -> Self {
    Self::with_compressor(C::default())
  }
}

impl<C: BlockCompressor<BLOCK>, const BLOCK: usize> fmt::Display for ByteAccumulator<C, BLOCK> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.compressor.algorithm_name())
  }
}

impl<C: BlockCompressor<BLOCK>, const BLOCK: usize> fmt::Debug for ByteAccumulator<C, BLOCK> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ByteAccumulator")
      .field("algorithm", &self.compressor.algorithm_name())
      .field("block", &BLOCK)
      .field("buffered", &self.buf_len)
      .field("block_count", &self.block_count)
      .finish_non_exhaustive()
  }
}
