//! Content integrity primitives for outbound media payloads.
//!
//! Provides incremental hashing over in-memory payloads without enforcing any
//! verification policy: callers render a digest, attach it to an outbound
//! request, and the remote side does the checking. Nothing here performs I/O,
//! and nothing here inspects digests the remote side sends back.
//!
//! # Example
//!
//! ```
//! use upstage_verify::{Crc32Hasher, Hasher, crc32_hex};
//!
//! let mut hasher = Crc32Hasher::new();
//! hasher.update(b"123456789");
//! assert_eq!(hasher.value(), 0xCBF4_3926);
//!
//! assert_eq!(crc32_hex(b""), "0");
//! ```

pub use self::crc32::Crc32Hasher;
pub use self::hasher::{Hasher, Sha256Hasher};

mod crc32;
mod hasher;

/// Render the IEEE CRC-32 of `data` as unpadded lowercase hex.
///
/// Empty input yields `"0"`, the well-defined CRC-32 of zero bytes.
pub fn crc32_hex(data: &[u8]) -> String { format!("{:x}", Crc32Hasher::digest(data)) }

/// Render the SHA-256 of `data` as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String { hex::encode(Sha256Hasher::digest(data)) }
