use core::hint::black_box;

/// Deterministic xorshift generator, so inputs are not all-zero or otherwise
/// trivially structured. Not cryptographic.
#[inline]
fn xorshift64star(state: &mut u64) -> u64 {
  let mut x = *state;
  x ^= x >> 12;
  x ^= x << 25;
  x ^= x >> 27;
  *state = x;
  x.wrapping_mul(0x2545F4914F6CDD1D)
}

pub fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut state = seed ^ (len as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
  let out: Vec<u8> = (0..len).map(|_| (xorshift64star(&mut state) >> 56) as u8).collect();
  black_box(&out);
  out
}

/// Payload sizes around the block and rate boundaries (4, 32, 64, 128, 136,
/// 168 bytes) plus a few bulk sizes.
pub fn sized_inputs() -> Vec<(usize, Vec<u8>)> {
  let sizes = [0usize, 1, 4, 31, 32, 64, 127, 128, 136, 168, 1024, 16 * 1024, 1024 * 1024];
  sizes
    .into_iter()
    .map(|len| (len, pseudo_random_bytes(len, 0x5EED_0F_5A0E_u64)))
    .collect()
}

pub fn set_throughput(group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>, len: usize) {
  if len == 0 {
    group.throughput(criterion::Throughput::Elements(1));
  } else {
    group.throughput(criterion::Throughput::Bytes(len as u64));
  }
}
