//! BLAKE3: hash, keyed hash (MAC), and key derivation, with incremental
//! hashing and extendable output.
//!
//! This crate is `no_std` compatible. With the default `std` feature, the
//! best kernel for the current CPU is detected once at runtime; without it,
//! kernel selection is compile-time only.
//!
//! # Quick Start
//!
//! ```
//! use b3::{Blake3, Digest as _, Xof as _};
//!
//! // One-shot hashing.
//! let digest = b3::hash(b"hello world");
//!
//! // Incremental hashing.
//! let mut hasher = Blake3::new();
//! hasher.update(b"hello ");
//! hasher.update(b"world");
//! assert_eq!(hasher.finalize(), digest);
//!
//! // Extended output of any length; the first 32 bytes are the digest.
//! let mut out = [0u8; 100];
//! hasher.finalize_xof().squeeze(&mut out);
//! assert_eq!(out[..32], digest);
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
// Fixed-size arrays and in-bounds block parsing dominate this crate.
#![allow(clippy::indexing_slicing)]
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(target_arch = "aarch64")]
mod aarch64;
mod chunk;
mod compress;
mod dispatch;
mod hasher;
#[cfg(test)]
mod kernel_test;
mod kernels;
mod output;
mod tree;
mod words;
#[cfg(target_arch = "x86_64")]
mod x86_64;

pub use hasher::Blake3;
pub use output::XofReader;
pub use traits::{Digest, KeyLengthError, Xof};

/// Digest length in bytes.
pub const OUT_LEN: usize = 32;

/// Key length in bytes for the keyed mode.
pub const KEY_LEN: usize = 32;

pub(crate) const BLOCK_LEN: usize = 64;
pub(crate) const CHUNK_LEN: usize = 1024;

pub(crate) const CHUNK_START: u32 = 1 << 0;
pub(crate) const CHUNK_END: u32 = 1 << 1;
pub(crate) const PARENT: u32 = 1 << 2;
pub(crate) const ROOT: u32 = 1 << 3;
pub(crate) const KEYED_HASH: u32 = 1 << 4;
pub(crate) const DERIVE_KEY_CONTEXT: u32 = 1 << 5;
pub(crate) const DERIVE_KEY_MATERIAL: u32 = 1 << 6;

pub(crate) const IV: [u32; 8] = [
  0x6A09_E667,
  0xBB67_AE85,
  0x3C6E_F372,
  0xA54F_F53A,
  0x510E_527F,
  0x9B05_688C,
  0x1F83_D9AB,
  0x5BE0_CD19,
];

/// Message schedules for the seven rounds.
///
/// Round 1 is the identity; each later row is the fixed permutation
/// `[2, 6, 3, 10, 7, 0, 4, 13, 1, 11, 12, 5, 9, 14, 15, 8]` applied to the
/// row before it.
pub(crate) const MSG_SCHEDULE: [[usize; 16]; 7] = [
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [2, 6, 3, 10, 7, 0, 4, 13, 1, 11, 12, 5, 9, 14, 15, 8],
  [3, 4, 10, 12, 13, 2, 7, 14, 6, 5, 9, 0, 11, 15, 8, 1],
  [10, 7, 12, 9, 14, 3, 13, 15, 4, 0, 11, 2, 5, 8, 1, 6],
  [12, 13, 9, 11, 15, 10, 14, 8, 7, 2, 5, 3, 0, 1, 6, 4],
  [9, 14, 11, 5, 8, 12, 15, 1, 13, 3, 0, 10, 2, 6, 4, 7],
  [11, 15, 5, 0, 1, 9, 8, 6, 14, 10, 2, 12, 3, 4, 7, 13],
];

/// Hash `input`, returning the default 32-byte digest.
#[inline]
#[must_use]
pub fn hash(input: &[u8]) -> [u8; OUT_LEN] {
  Blake3::digest(input)
}

/// Compute the keyed hash (MAC) of `input` under a 32-byte key.
#[inline]
#[must_use]
pub fn keyed_hash(key: &[u8; KEY_LEN], input: &[u8]) -> [u8; OUT_LEN] {
  Blake3::keyed_digest(key, input)
}

/// Derive a 32-byte key for `context` from `key_material`.
#[inline]
#[must_use]
pub fn derive_key(context: &str, key_material: &[u8]) -> [u8; OUT_LEN] {
  Blake3::derive_key(context, key_material)
}
