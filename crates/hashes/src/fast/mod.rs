//! Fast non-cryptographic hashes (**NOT CRYPTO**).
//!
//! Both run on the shared [`ByteAccumulator`](crate::ByteAccumulator) and
//! expose a seeded one-shot [`FastHash`](crate::FastHash) entry point. Do not
//! use them for signatures, MACs or key derivation.

pub mod murmur3;
pub mod xxh64;

pub use murmur3::{Murmur3_32, Murmur3Core};
pub use xxh64::{Xxh64, Xxh64Core};
