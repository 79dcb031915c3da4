//! I/O adapters for streaming digests.
//!
//! [`DigestReader`] and [`DigestWriter`] wrap [`std::io::Read`] and
//! [`std::io::Write`] implementations and hash exactly the bytes that pass
//! through them, including short reads and writes.
//!
//! # Example
//!
//! ```
//! use std::io::Write;
//!
//! use streamhash::{Digest, crypto::Sha3};
//!
//! let mut writer = Sha3::v256().writer(Vec::new());
//! writer.write_all(b"abc").unwrap();
//! let (bytes, mut hasher) = writer.into_parts();
//! assert_eq!(bytes, b"abc");
//! assert_eq!(hasher.finalize(), Sha3::v256().digest(b"abc"));
//! ```

pub use traits::io::{DigestReader, DigestWriter};
