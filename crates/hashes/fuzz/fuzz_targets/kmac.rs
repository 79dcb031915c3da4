#![no_main]

use libfuzzer_sys::fuzz_target;
use streamhash::crypto::Kmac;
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

fn left_encode(value: u64) -> Vec<u8> {
  let bytes = value.to_be_bytes();
  let skip = bytes.iter().take_while(|&&b| b == 0).count().min(7);
  let mut out = vec![(8 - skip) as u8];
  out.extend_from_slice(&bytes[skip..]);
  out
}

fn right_encode(value: u64) -> Vec<u8> {
  let bytes = value.to_be_bytes();
  let skip = bytes.iter().take_while(|&&b| b == 0).count().min(7);
  let mut out = bytes[skip..].to_vec();
  out.push((8 - skip) as u8);
  out
}

/// cSHAKE("KMAC", S) over `bytepad(encode_string(key), rate) || data || right_encode(output_bits)`.
fn reference(bits: usize, key: &[u8], customization: &[u8], data: &[u8], output_bits: u64, out: &mut [u8], split: usize) {
  use sha3::digest::{ExtendableOutput, Update, XofReader};

  let rate = if bits == 128 { 168 } else { 136 };
  let mut prefix = left_encode(rate as u64);
  prefix.extend(left_encode((key.len() as u64) * 8));
  prefix.extend_from_slice(key);
  prefix.resize(prefix.len().div_ceil(rate) * rate, 0);
  let trailer = right_encode(output_bits);

  if bits == 128 {
    let core = sha3::CShake128Core::new_with_function_name(b"KMAC", customization);
    let mut h = sha3::CShake128::from_core(core);
    h.update(&prefix);
    h.update(data);
    h.update(&trailer);
    let mut reader = h.finalize_xof();
    reader.read(&mut out[..split]);
    reader.read(&mut out[split..]);
  } else {
    let core = sha3::CShake256Core::new_with_function_name(b"KMAC", customization);
    let mut h = sha3::CShake256::from_core(core);
    h.update(&prefix);
    h.update(data);
    h.update(&trailer);
    let mut reader = h.finalize_xof();
    reader.read(&mut out[..split]);
    reader.read(&mut out[split..]);
  }
}

fuzz_target!(|input: &[u8]| {
  // Layout:
  // - 1 byte key_len (<= 200, spans more than one rate block)
  // - 1 byte custom_len (<= 64)
  // - 2 bytes out_len (<= 512)
  // - rest: key || custom || data
  let key_len = input.first().copied().unwrap_or(0) as usize % 201;
  let custom_len = input.get(1).copied().unwrap_or(0) as usize % 65;
  let out_len = (parse_u16_le(input.get(2..).unwrap_or(&[])) as usize) % 513;
  let rest = input.get(4..).unwrap_or(&[]);

  let key_len = core::cmp::min(key_len, rest.len());
  let (key, rest) = rest.split_at(key_len);
  let custom_len = core::cmp::min(custom_len, rest.len());
  let (customization, data) = rest.split_at(custom_len);

  let split_data = if data.is_empty() { 0 } else { (data[0] as usize) % (data.len() + 1) };
  let (a, b) = data.split_at(split_data);
  let split_out = split_len(out_len, data.get(1).copied().unwrap_or(0));

  for bits in [128usize, 256] {
    // Fixed-length output (L = out_len)
    let mut h = Kmac::new(bits, key, customization).unwrap();
    h.update(a);
    h.update(b);
    let mut ours = vec![0u8; out_len];
    h.finalize_variable_into(&mut ours);

    let mut expected = vec![0u8; out_len];
    reference(bits, key, customization, data, (out_len as u64) * 8, &mut expected, 0);
    assert_eq!(ours, expected, "KMAC{bits}");

    // Tag verification at the configured size
    if (1..=64).contains(&out_len) {
      let mut h = Kmac::new(bits, key, customization).unwrap().with_output_size(out_len).unwrap();
      h.update(data);
      assert!(h.verify(&expected).is_ok());
    }

    // XOF (L = 0) + multi-squeeze, after the finalize above reset `h`
    h.update(a);
    h.update(b);
    let mut xof = h.finalize_xof();
    let mut ours = vec![0u8; out_len];
    xof.squeeze(&mut ours[..split_out]);
    xof.squeeze(&mut ours[split_out..]);

    let mut expected = vec![0u8; out_len];
    reference(bits, key, customization, data, 0, &mut expected, split_out);
    assert_eq!(ours, expected, "KMACXOF{bits}");
  }
});
