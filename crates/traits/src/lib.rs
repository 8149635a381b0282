//! Core traits for the b3 workspace.
//!
//! This crate provides the trait vocabulary the hash implementations conform
//! to. It is `no_std` and has zero dependencies.
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Digest`] | Streaming hash with a fixed-size output |
//! | [`Xof`] | Extendable-output reader |
//!
//! # Error Types
//!
//! - [`KeyLengthError`] - a key slice had the wrong length
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to
//! ensure all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

mod digest;
pub mod error;
mod xof;

pub use digest::Digest;
pub use error::KeyLengthError;
pub use xof::Xof;
