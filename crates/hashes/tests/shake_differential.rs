use proptest::prelude::*;
use streamhash::{Digest as _, Xof as _, crypto::Shake};

fn shake_ref(bits: usize, data: &[u8], out: &mut [u8]) {
  use sha3::digest::{ExtendableOutput, Update, XofReader};
  if bits == 128 {
    let mut h = sha3::Shake128::default();
    h.update(data);
    h.finalize_xof().read(out);
  } else {
    let mut h = sha3::Shake256::default();
    h.update(data);
    h.finalize_xof().read(out);
  }
}

proptest! {
  #[test]
  fn shake_one_shot_matches_sha3_crate(
    data in proptest::collection::vec(any::<u8>(), 0..4096),
    out_len in 0usize..2048,
  ) {
    for bits in [128, 256] {
      let mut expected = vec![0u8; out_len];
      shake_ref(bits, &data, &mut expected);

      let mut actual = vec![0u8; out_len];
      Shake::new(bits).unwrap().hash_into(&data, &mut actual);
      prop_assert_eq!(actual, expected);
    }
  }

  #[test]
  fn shake_streaming_reader_matches_sha3_crate(
    data in proptest::collection::vec(any::<u8>(), 0..4096),
    out_len in 0usize..2048,
    split in any::<usize>(),
  ) {
    for bits in [128, 256] {
      let mut expected = vec![0u8; out_len];
      shake_ref(bits, &data, &mut expected);

      let mut h = Shake::new(bits).unwrap();
      let mut i = 0usize;
      while i < data.len() {
        let step = (data[i] as usize % 97) + 1;
        let end = core::cmp::min(data.len(), i + step);
        h.update(&data[i..end]);
        i = end;
      }

      let split = split % (out_len + 1);
      let mut actual = vec![0u8; out_len];
      let mut reader = h.finalize_xof();
      reader.squeeze(&mut actual[..split]);
      reader.squeeze(&mut actual[split..]);
      prop_assert_eq!(actual, expected);
    }
  }

  #[test]
  fn shake_nominal_digest_is_xof_prefix(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
    for bits in [128, 256] {
      let mut h = Shake::new(bits).unwrap();
      let nominal = h.output_size();
      let mut expected = vec![0u8; nominal];
      shake_ref(bits, &data, &mut expected);
      prop_assert_eq!(&h.digest(&data)[..], &expected[..]);
    }
  }
}
