//! Extendable-output function (XOF) trait.

/// Extendable-output reader producing an arbitrary number of bytes.
///
/// Successive calls continue the same output stream: squeezing `a` bytes and
/// then `b` bytes yields the same bytes as squeezing `a + b` at once.
pub trait Xof: Clone {
  /// Squeeze the next `out.len()` output bytes into `out`.
  fn squeeze(&mut self, out: &mut [u8]);
}
