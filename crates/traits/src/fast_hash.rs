//! Fast non-cryptographic hash traits (**NOT CRYPTO**).

use core::fmt::Debug;

/// A fast non-cryptographic hash with a one-shot, seeded entry point.
///
/// These hashes are suitable for hash tables, sharding and fingerprints. They
/// are **not** suitable for signatures, MACs, or untrusted inputs where
/// collision attacks matter. Streaming use goes through the algorithm's
/// [`Digest`](crate::Digest) implementation.
pub trait FastHash {
  /// Hash output type.
  type Output: Copy + Eq + Debug + Default;

  /// Seed type.
  type Seed: Copy + Debug + Default;

  /// Compute the hash of `data` using the default seed.
  #[inline]
  #[must_use]
  fn hash(data: &[u8]) -> Self::Output {
    Self::hash_with_seed(Self::Seed::default(), data)
  }

  /// Compute the hash of `data` using `seed`.
  #[must_use]
  fn hash_with_seed(seed: Self::Seed, data: &[u8]) -> Self::Output;
}
