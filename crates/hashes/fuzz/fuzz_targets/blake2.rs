#![no_main]

use libfuzzer_sys::fuzz_target;
use streamhash::crypto::Blake2b;
use traits::Digest as _;

fn split_point(input: &[u8]) -> usize {
  if input.is_empty() {
    return 0;
  }
  (input[0] as usize) % (input.len() + 1)
}

fuzz_target!(|input: &[u8]| {
  let split = split_point(input);
  let (a, b) = input.split_at(split);

  {
    let ours = Blake2b::v512().digest(input);
    let mut h = Blake2b::v512();
    h.update(a);
    h.update(b);
    assert_eq!(ours, h.finalize());

    use blake2::Digest as _;
    let ref_out = blake2::Blake2b512::digest(input);
    assert_eq!(&ours[..], &ref_out[..]);
  }

  // Keyed: the first bytes double as key material.
  {
    let key_len = input.get(1).copied().unwrap_or(0) as usize % 65;
    let key_len = core::cmp::min(key_len, input.len()).max(1);
    let Some(key) = input.get(..key_len) else {
      return;
    };
    let mut h = Blake2b::keyed(key, 64).unwrap();
    h.update(a);
    h.update(b);
    let ours = h.finalize();

    use blake2::digest::{Mac, KeyInit};
    let mut mac = blake2::Blake2bMac512::new_from_slice(key).unwrap();
    mac.update(input);
    let expected = mac.finalize().into_bytes();
    assert_eq!(&ours[..], &expected[..]);
  }
});
