#![no_main]

use libfuzzer_sys::fuzz_target;
use streamhash::crypto::CShake;
use traits::{Digest as _, Xof as _};

fn parse_u16_le(input: &[u8]) -> u16 {
  match input.len() {
    0 => 0,
    1 => input[0] as u16,
    _ => u16::from_le_bytes([input[0], input[1]]),
  }
}

fn split_len(max: usize, b: u8) -> usize {
  if max == 0 { 0 } else { (b as usize) % (max + 1) }
}

fuzz_target!(|input: &[u8]| {
  // Layout:
  // - 1 byte fn_len
  // - 1 byte custom_len
  // - 2 bytes out_len (capped)
  // - remaining: fn || custom || data
  let fn_len = input.first().copied().unwrap_or(0) as usize % 65;
  let custom_len = input.get(1).copied().unwrap_or(0) as usize % 65;
  let out_len = (parse_u16_le(input.get(2..).unwrap_or(&[])) as usize) % 1025;
  let rest = input.get(4..).unwrap_or(&[]);

  let fn_len = core::cmp::min(fn_len, rest.len());
  let (function_name, rest) = rest.split_at(fn_len);
  let custom_len = core::cmp::min(custom_len, rest.len());
  let (customization, data) = rest.split_at(custom_len);

  let split_data = if data.is_empty() { 0 } else { (data[0] as usize) % (data.len() + 1) };
  let (a, b) = data.split_at(split_data);
  let split_out = split_len(out_len, data.get(1).copied().unwrap_or(0));

  for bits in [128usize, 256] {
    let mut ours = vec![0u8; out_len];
    let mut h = CShake::new(bits, function_name, customization).unwrap();
    h.hash_into(data, &mut ours);

    // Reset must restore the customized state.
    h.update(a);
    h.update(b);
    let mut xof = h.finalize_xof();
    let mut streamed = vec![0u8; out_len];
    xof.squeeze(&mut streamed[..split_out]);
    xof.squeeze(&mut streamed[split_out..]);
    assert_eq!(ours, streamed);

    use sha3::digest::{ExtendableOutput, Update, XofReader};
    let mut expected = vec![0u8; out_len];
    if function_name.is_empty() && customization.is_empty() {
      if bits == 128 {
        let mut hh = sha3::Shake128::default();
        hh.update(data);
        hh.finalize_xof().read(&mut expected);
      } else {
        let mut hh = sha3::Shake256::default();
        hh.update(data);
        hh.finalize_xof().read(&mut expected);
      }
    } else if bits == 128 {
      let core = sha3::CShake128Core::new_with_function_name(function_name, customization);
      let mut hh = sha3::CShake128::from_core(core);
      hh.update(data);
      hh.finalize_xof().read(&mut expected);
    } else {
      let core = sha3::CShake256Core::new_with_function_name(function_name, customization);
      let mut hh = sha3::CShake256::from_core(core);
      hh.update(data);
      hh.finalize_xof().read(&mut expected);
    }
    assert_eq!(ours, expected, "cSHAKE{bits}");
  }
});
