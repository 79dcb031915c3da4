use proptest::prelude::*;
use streamhash::{
  Digest,
  crypto::{Keccak, Sha3},
};

fn oracle<D: sha3::Digest>(data: &[u8]) -> Vec<u8> {
  D::digest(data).to_vec()
}

fn update_chunked<D: Digest>(h: &mut D, data: &[u8]) {
  let mut i = 0usize;
  while i < data.len() {
    let step = (data[i] as usize % 97) + 1;
    let end = core::cmp::min(data.len(), i + step);
    h.update(&data[i..end]);
    i = end;
  }
}

fn cases(data: &[u8]) -> [(Sha3, Keccak, Vec<u8>, Vec<u8>); 4] {
  [
    (Sha3::v224(), Keccak::v224(), oracle::<sha3::Sha3_224>(data), oracle::<sha3::Keccak224>(data)),
    (Sha3::v256(), Keccak::v256(), oracle::<sha3::Sha3_256>(data), oracle::<sha3::Keccak256>(data)),
    (Sha3::v384(), Keccak::v384(), oracle::<sha3::Sha3_384>(data), oracle::<sha3::Keccak384>(data)),
    (Sha3::v512(), Keccak::v512(), oracle::<sha3::Sha3_512>(data), oracle::<sha3::Keccak512>(data)),
  ]
}

proptest! {
  #[test]
  fn sha3_and_keccak_match_sha3_crate(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    for (mut fips, mut keccak, fips_expected, keccak_expected) in cases(&data) {
      prop_assert_eq!(&fips.digest(&data)[..], &fips_expected[..]);
      prop_assert_eq!(&keccak.digest(&data)[..], &keccak_expected[..]);
    }
  }

  #[test]
  fn sha3_and_keccak_streaming_match_sha3_crate(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    for (mut fips, mut keccak, fips_expected, keccak_expected) in cases(&data) {
      update_chunked(&mut fips, &data);
      update_chunked(&mut keccak, &data);
      prop_assert_eq!(&fips.finalize()[..], &fips_expected[..]);
      prop_assert_eq!(&keccak.finalize()[..], &keccak_expected[..]);
    }
  }

  #[test]
  fn sha3_bytewise_matches_sha3_crate(data in proptest::collection::vec(any::<u8>(), 0..600)) {
    let mut h = Sha3::v256();
    for &b in &data {
      h.update_byte(b);
    }
    prop_assert_eq!(&h.finalize()[..], &oracle::<sha3::Sha3_256>(&data)[..]);
  }
}
