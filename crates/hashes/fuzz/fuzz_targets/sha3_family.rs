#![no_main]

use libfuzzer_sys::fuzz_target;
use streamhash::crypto::{Keccak, Sha3};
use traits::Digest as _;

fn split_point(input: &[u8]) -> usize {
  if input.is_empty() {
    return 0;
  }
  (input[0] as usize) % (input.len() + 1)
}

macro_rules! check {
  ($ours:expr, $oracle:ty, $input:expr, $a:expr, $b:expr) => {{
    let one_shot = $ours.digest($input);
    let mut h = $ours;
    h.update($a);
    h.update($b);
    assert_eq!(one_shot, h.finalize());

    use sha3::Digest as _;
    let expected = <$oracle>::digest($input);
    assert_eq!(&one_shot[..], &expected[..]);
  }};
}

fuzz_target!(|input: &[u8]| {
  let split = split_point(input);
  let (a, b) = input.split_at(split);

  check!(Sha3::v224(), sha3::Sha3_224, input, a, b);
  check!(Sha3::v256(), sha3::Sha3_256, input, a, b);
  check!(Sha3::v384(), sha3::Sha3_384, input, a, b);
  check!(Sha3::v512(), sha3::Sha3_512, input, a, b);
  check!(Keccak::v224(), sha3::Keccak224, input, a, b);
  check!(Keccak::v256(), sha3::Keccak256, input, a, b);
  check!(Keccak::v384(), sha3::Keccak384, input, a, b);
  check!(Keccak::v512(), sha3::Keccak512, input, a, b);
});
