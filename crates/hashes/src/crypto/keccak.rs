//! Keccak-f[1600] permutation and the owned lane state it runs on.
//!
//! The permutation is a pure function of 25 lanes. [`KeccakState`] owns the
//! lanes for a sponge and is the only way the rest of the crate touches them:
//! byte blocks are XORed in and serialized out through its methods, never by
//! indexing a shared array.

#![allow(clippy::indexing_slicing)] // Keccak state is fixed-size; indexing is audited

use core::fmt;

/// Number of 64-bit lanes in the 1600-bit state.
pub const LANES: usize = 25;

const KECCAKF_ROUNDS: usize = 24;

// Round constants (iota).
const RC: [u64; KECCAKF_ROUNDS] = [
  0x0000_0000_0000_0001,
  0x0000_0000_0000_8082,
  0x8000_0000_0000_808a,
  0x8000_0000_8000_8000,
  0x0000_0000_0000_808b,
  0x0000_0000_8000_0001,
  0x8000_0000_8000_8081,
  0x8000_0000_0000_8009,
  0x0000_0000_0000_008a,
  0x0000_0000_0000_0088,
  0x0000_0000_8000_8009,
  0x0000_0000_8000_000a,
  0x0000_0000_8000_808b,
  0x8000_0000_0000_008b,
  0x8000_0000_0000_8089,
  0x8000_0000_0000_8003,
  0x8000_0000_0000_8002,
  0x8000_0000_0000_0080,
  0x0000_0000_0000_800a,
  0x8000_0000_8000_000a,
  0x8000_0000_8000_8081,
  0x8000_0000_0000_8080,
  0x0000_0000_8000_0001,
  0x8000_0000_8000_8008,
];

// Rotation offsets (rho), in the order lanes are visited by `PI`.
const RHO: [u32; 24] = [
  1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

// Lane permutation (pi): the walk 1 -> 10 -> 7 -> ... -> 1 over lane indices.
const PI: [usize; 24] = [
  10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Apply the 24-round Keccak-f[1600] permutation in place.
///
/// Lane `x + 5 * y` holds column `x`, row `y` of the state.
#[inline]
pub fn keccak_f1600(a: &mut [u64; LANES]) {
  for rc in RC {
    // θ
    let mut c = [0u64; 5];
    for x in 0..5 {
      c[x] = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
    }
    for x in 0..5 {
      let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
      for y in 0..5 {
        a[x + 5 * y] ^= d;
      }
    }

    // ρ + π
    let mut carry = a[1];
    for (&to, &rot) in PI.iter().zip(RHO.iter()) {
      let next = a[to];
      a[to] = carry.rotate_left(rot);
      carry = next;
    }

    // χ
    for y in 0..5 {
      let row = [a[5 * y], a[5 * y + 1], a[5 * y + 2], a[5 * y + 3], a[5 * y + 4]];
      for x in 0..5 {
        a[5 * y + x] = row[x] ^ ((!row[(x + 1) % 5]) & row[(x + 2) % 5]);
      }
    }

    // ι
    a[0] ^= rc;
  }
}

/// The 1600-bit Keccak state owned by one sponge.
#[derive(Clone, Default, PartialEq, Eq)]
pub(crate) struct KeccakState {
  lanes: [u64; LANES],
}

impl KeccakState {
  #[inline]
  pub(crate) const fn new() -> Self {
    Self { lanes: [0u64; LANES] }
  }

  #[inline(always)]
  pub(crate) fn permute(&mut self) {
    keccak_f1600(&mut self.lanes);
  }

  /// XOR a little-endian byte block into the leading lanes.
  ///
  /// `block.len()` must be a multiple of 8 and at most 200.
  #[inline(always)]
  pub(crate) fn xor_bytes(&mut self, block: &[u8]) {
    debug_assert_eq!(block.len() % 8, 0);
    let (chunks, _) = block.as_chunks::<8>();
    for (lane, chunk) in self.lanes.iter_mut().zip(chunks) {
      *lane ^= u64::from_le_bytes(*chunk);
    }
  }

  /// XOR `value` into lane `index`.
  #[inline(always)]
  pub(crate) fn xor_lane(&mut self, index: usize, value: u64) {
    self.lanes[index] ^= value;
  }

  /// Serialize the leading lanes little-endian into `out`.
  ///
  /// `out.len()` must be a multiple of 8 and at most 200.
  #[inline(always)]
  pub(crate) fn write_bytes(&self, out: &mut [u8]) {
    debug_assert_eq!(out.len() % 8, 0);
    let (chunks, _) = out.as_chunks_mut::<8>();
    for (chunk, lane) in chunks.iter_mut().zip(self.lanes.iter()) {
      *chunk = lane.to_le_bytes();
    }
  }

  #[inline]
  pub(crate) fn clear(&mut self) {
    self.lanes = [0u64; LANES];
  }
}

impl fmt::Debug for KeccakState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("KeccakState").finish_non_exhaustive()
  }
}
