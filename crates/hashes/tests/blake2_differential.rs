use blake2::digest::consts::U32;
use proptest::prelude::*;
use streamhash::{
  Digest as _,
  crypto::{Blake2b, Blake2bParams},
};

fn blake2b512_ref(data: &[u8]) -> [u8; 64] {
  use blake2::Digest as _;
  let out = blake2::Blake2b512::digest(data);
  let mut bytes = [0u8; 64];
  bytes.copy_from_slice(&out);
  bytes
}

fn blake2b_var_ref(output_size: usize, data: &[u8]) -> Vec<u8> {
  use blake2::digest::{Update, VariableOutput};
  let mut h = blake2::Blake2bVar::new(output_size).unwrap();
  h.update(data);
  let mut out = vec![0u8; output_size];
  h.finalize_variable(&mut out).unwrap();
  out
}

fn blake2b_mac512_ref(key: &[u8], salt: &[u8], personal: &[u8], data: &[u8]) -> Vec<u8> {
  use blake2::digest::Mac;
  let mut h = blake2::Blake2bMac512::new_with_salt_and_personal(key, salt, personal).unwrap();
  Mac::update(&mut h, data);
  h.finalize().into_bytes().to_vec()
}

fn blake2b_mac256_ref(key: &[u8], data: &[u8]) -> Vec<u8> {
  use blake2::digest::Mac;
  let mut h = blake2::Blake2bMac::<U32>::new_with_salt_and_personal(key, &[], &[]).unwrap();
  Mac::update(&mut h, data);
  h.finalize().into_bytes().to_vec()
}

proptest! {
  #[test]
  fn blake2b512_one_shot_matches_blake2(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
    prop_assert_eq!(Blake2b::v512().digest(&data), blake2b512_ref(&data));
  }

  #[test]
  fn blake2b512_streaming_matches_blake2(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
    let expected = blake2b512_ref(&data);
    let mut h = Blake2b::v512();

    let mut i = 0usize;
    while i < data.len() {
      let step = (data[i] as usize % 97) + 1;
      let end = core::cmp::min(data.len(), i + step);
      h.update(&data[i..end]);
      i = end;
    }
    prop_assert_eq!(h.finalize(), expected);
  }

  #[test]
  fn blake2b_variable_output_matches_blake2(
    output_size in 1usize..=64,
    data in proptest::collection::vec(any::<u8>(), 0..1024),
  ) {
    let mut h = Blake2b::new(output_size).unwrap();
    prop_assert_eq!(&h.digest(&data)[..], &blake2b_var_ref(output_size, &data)[..]);
  }

  #[test]
  fn blake2b_keyed_salted_matches_blake2(
    key in proptest::collection::vec(any::<u8>(), 1..=64),
    salt in proptest::array::uniform16(any::<u8>()),
    personal in proptest::array::uniform16(any::<u8>()),
    data in proptest::collection::vec(any::<u8>(), 0..1024),
  ) {
    let mut h = Blake2bParams::new().key(&key).salt(&salt).personal(&personal).build().unwrap();
    prop_assert_eq!(&h.digest(&data)[..], &blake2b_mac512_ref(&key, &salt, &personal, &data)[..]);
  }

  #[test]
  fn blake2b_keyed_256_matches_blake2(
    key in proptest::collection::vec(any::<u8>(), 1..=64),
    data in proptest::collection::vec(any::<u8>(), 0..1024),
  ) {
    let mut h = Blake2b::keyed(&key, 32).unwrap();
    prop_assert_eq!(&h.digest(&data)[..], &blake2b_mac256_ref(&key, &data)[..]);
  }
}
