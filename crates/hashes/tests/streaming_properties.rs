//! Properties every streaming hasher must satisfy, independent of algorithm.

use proptest::prelude::*;
use streamhash::{
  Digest, DigestOutput, Xof as _,
  crypto::{Blake2b, CShake, Keccak, Kmac, Sha3, Sha256, Shake},
  fast::{Murmur3_32, Xxh64},
};

/// Run `$body` once per algorithm, with `$h` bound to a fresh instance.
macro_rules! each_digest {
  ($h:ident => $body:block) => {{
    { let $h = Keccak::v256(); $body }
    { let $h = Sha3::v512(); $body }
    { let $h = Shake::v128(); $body }
    { let $h = CShake::v256(b"N", b"S"); $body }
    { let $h = Kmac::v128(b"key", b"custom"); $body }
    { let $h = Sha256::new(); $body }
    { let $h = Blake2b::v512(); $body }
    { let $h = Blake2b::keyed(b"key", 32).unwrap(); $body }
    { let $h = Xxh64::with_seed(7); $body }
    { let $h = Murmur3_32::with_seed(7); $body }
  }};
}

fn chunked<D: Digest>(proto: &D, data: &[u8], cuts: &[usize]) -> DigestOutput {
  let mut points: Vec<usize> = cuts.iter().map(|c| c % (data.len() + 1)).collect();
  points.sort_unstable();

  let mut h = proto.clone();
  let mut start = 0usize;
  for p in points {
    h.update(&data[start..p]);
    start = p;
  }
  h.update(&data[start..]);
  h.finalize()
}

fn pattern(len: usize) -> Vec<u8> {
  (0..len).map(|i| (i as u8).wrapping_mul(151).wrapping_add(7)).collect()
}

proptest! {
  #[test]
  fn chunk_size_independence(
    data in proptest::collection::vec(any::<u8>(), 0..1200),
    cuts in proptest::collection::vec(any::<usize>(), 0..6),
  ) {
    each_digest!(h => {
      let whole = h.clone().digest(&data);
      prop_assert_eq!(chunked(&h, &data, &cuts), whole, "{}", h.algorithm_name());
    });
  }

  #[test]
  fn cshake_with_empty_strings_is_shake(
    data in proptest::collection::vec(any::<u8>(), 0..700),
    out_len in 0usize..600,
  ) {
    for bits in [128, 256] {
      let mut expected = vec![0u8; out_len];
      Shake::new(bits).unwrap().hash_into(&data, &mut expected);
      let mut actual = vec![0u8; out_len];
      CShake::new(bits, b"", b"").unwrap().hash_into(&data, &mut actual);
      prop_assert_eq!(actual, expected);
    }
  }
}

macro_rules! block_boundary {
  ($make:expr, $block:expr) => {{
    for k in 0..4usize {
      let data = pattern(k * $block);
      let expected = $make.digest(&data);

      let mut whole = $make;
      let preloaded = whole.block_count();
      whole.update(&data);
      assert_eq!(whole.flush(), 0, "{} k={k}", whole.algorithm_name());
      assert_eq!(whole.block_count(), preloaded + k as u64);
      whole.update(&[]);
      assert_eq!(whole.finalize(), expected);

      let mut blockwise = $make;
      for block in data.chunks($block) {
        blockwise.update(block);
      }
      assert_eq!(blockwise.finalize(), expected);

      let mut bytewise = $make;
      for &b in &data {
        bytewise.update_byte(b);
      }
      assert_eq!(bytewise.finalize(), expected);

      // One byte past the boundary lands in the buffer.
      let mut over = $make;
      over.update(&data);
      over.update_byte(0xFF);
      assert_eq!(over.flush(), 1);
    }
  }};
}

#[test]
fn exact_block_boundary() {
  block_boundary!(Sha256::new(), 64);
  block_boundary!(Blake2b::v512(), 128);
  block_boundary!(Blake2b::keyed(b"k", 64).unwrap(), 128);
  block_boundary!(Xxh64::with_seed(1), 32);
  block_boundary!(Murmur3_32::new(), 4);
}

#[test]
fn exact_rate_boundary() {
  let cases: [(fn() -> Sha3, usize); 3] = [(Sha3::v256, 136), (Sha3::v224, 144), (Sha3::v512, 72)];
  for (make, rate_bytes) in cases {
    for k in 0..4 {
      let data = pattern(k * rate_bytes);
      let expected = make().digest(&data);
      let mut blockwise = make();
      for block in data.chunks(rate_bytes) {
        blockwise.update(block);
      }
      assert_eq!(blockwise.finalize(), expected);
    }
  }
}

#[test]
fn clone_independence() {
  each_digest!(h => {
    let mut original = h.clone();
    original.update(b"shared prefix ");
    let mut copy = original.clone();
    copy.update(b"copy tail");
    original.update(b"original tail");

    let name = original.algorithm_name();
    assert_eq!(original.finalize(), h.clone().digest(b"shared prefix original tail"), "{name}");
    assert_eq!(copy.finalize(), h.clone().digest(b"shared prefix copy tail"), "{name}");
  });
}

#[test]
fn reset_idempotence() {
  each_digest!(h => {
    let fresh = h.clone().digest(b"message");

    let mut used = h.clone();
    used.update(&pattern(500));
    used.reset();
    used.reset();
    assert_eq!(used.digest(b"message"), fresh, "{}", used.algorithm_name());

    // Finalization leaves the instance reset as well.
    assert_eq!(used.digest(b"message"), fresh);
  });
}

#[test]
fn finalize_into_checks_buffer_before_writing() {
  each_digest!(h => {
    let mut h = h;
    h.update(b"abc");
    let size = h.output_size();

    let mut short = vec![0xAAu8; size - 1];
    let err = h.finalize_into(&mut short).unwrap_err();
    assert_eq!((err.required(), err.available()), (size, size - 1));
    assert!(short.iter().all(|&b| b == 0xAA));

    let mut out = vec![0u8; size + 3];
    assert_eq!(h.finalize_into(&mut out), Ok(size));
    assert_eq!(&out[..size], &h.digest(b"abc")[..]);
  });
}

#[test]
fn squeeze_extensibility() {
  let data = pattern(333);

  let mut shake = Shake::v256();
  let nominal = shake.output_size();
  let mut long = vec![0u8; nominal * 2];
  shake.clone().hash_into(&data, &mut long);
  assert_eq!(&long[..nominal], &shake.digest(&data)[..]);

  let mut cshake = CShake::v128(b"", b"extend");
  let nominal = cshake.output_size();
  let mut long = vec![0u8; nominal * 2];
  cshake.update(&data);
  let mut reader = cshake.finalize_xof();
  reader.squeeze(&mut long);
  assert_eq!(&long[..nominal], &cshake.digest(&data)[..]);
}
