//! Streaming digest contract for streamhash.
//!
//! This crate defines the façade every streamhash algorithm implements. It is
//! `no_std` compatible and has zero dependencies.
//!
//! # Traits
//!
//! | Trait | Purpose | Implemented by |
//! |-------|---------|----------------|
//! | [`Digest`] | Streaming, fixed-length digests | SHA-3, SHAKE, cSHAKE, KMAC, SHA-256, BLAKE2b, XXH64, Murmur3 |
//! | [`Xof`] | Extendable-output readers | SHAKE / cSHAKE / KMACXOF readers |
//! | [`FastHash`] | One-shot seeded non-cryptographic hashes | XXH64, Murmur3 |
//!
//! # Error Types
//!
//! - [`OutputSizeError`] - caller buffer too small for the digest
//! - [`VerificationError`] - opaque MAC verification failure
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod digest;
pub mod error;
mod fast_hash;
#[cfg(feature = "std")]
pub mod io;
mod output;
mod xof;

pub use digest::Digest;
pub use error::{OutputSizeError, VerificationError};
pub use fast_hash::FastHash;
pub use output::{DigestOutput, MAX_OUTPUT_SIZE};
pub use xof::Xof;
