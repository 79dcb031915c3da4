//! Streaming hash engines behind one digest interface.
//!
//! Two engines carry every algorithm in the crate:
//!
//! - [`SpongeState`], the bit-level Keccak sponge, underlies Keccak, SHA-3,
//!   SHAKE, cSHAKE and KMAC.
//! - [`ByteAccumulator`] buffers arbitrarily chunked input into fixed-size
//!   blocks for a [`BlockCompressor`] plugin (SHA-256, BLAKE2b, XXH64,
//!   MurmurHash3).
//!
//! Every algorithm implements [`Digest`]. The crate is `no_std` and never
//! allocates.
//!
//! # Modules
//!
//! - [`crypto`] - Cryptographic hash functions.
//! - [`fast`] - Non-cryptographic hashes (**NOT CRYPTO**).
//!
//! # Example
//!
//! ```
//! use streamhash::{Digest, Xof, crypto::Shake};
//!
//! let mut shake = Shake::v128();
//! shake.update(b"hello ");
//! shake.update(b"world");
//! let mut reader = shake.finalize_xof();
//! let mut out = [0u8; 100];
//! reader.squeeze(&mut out);
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod accumulator;
pub mod crypto;
pub mod error;
pub mod fast;
#[cfg(feature = "std")]
pub mod io;

pub use accumulator::{BlockCompressor, ByteAccumulator};
pub use crypto::SpongeState;
pub use error::{ParamError, SpongeError};
pub use traits::{Digest, DigestOutput, FastHash, OutputSizeError, VerificationError, Xof};
