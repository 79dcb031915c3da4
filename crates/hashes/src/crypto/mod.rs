//! Cryptographic hash functions.
//!
//! The Keccak family (Keccak, SHA-3, SHAKE, cSHAKE, KMAC) runs on
//! [`SpongeState`]; SHA-256 and BLAKE2b run on the shared
//! [`ByteAccumulator`](crate::ByteAccumulator).

pub mod blake2b;
pub mod keccak;
pub mod sha256;
pub mod sha3;
pub mod sha3_derived;
pub mod shake;
pub mod sponge;

pub use blake2b::{Blake2b, Blake2bCore, Blake2bParams};
pub use sha3::{Keccak, Sha3};
pub use sha3_derived::{CShake, Kmac};
pub use sha256::{Sha256, Sha256Core};
pub use shake::{Shake, XofReader};
pub use sponge::SpongeState;
