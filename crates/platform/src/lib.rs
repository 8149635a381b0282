//! CPU capability probe for the b3 workspace.
//!
//! This crate answers exactly one question: does the current CPU have usable
//! 128-bit SIMD? Kernel selection elsewhere in the workspace keys off that
//! single bit.
//!
//! # Caching
//!
//! - With `std`: detection runs once and is cached in a `OnceLock`.
//! - Without `std`: detection is compile-time only (`cfg!(target_feature)`),
//!   so each call is a constant.
//!
//! # Miri
//!
//! Under Miri the probe always reports no SIMD, so interpreted runs stay on
//! the portable kernels.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

/// CPU capabilities relevant to this workspace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Caps {
  /// 128-bit SIMD is available (SSE4.1 + SSSE3 on x86_64, NEON on aarch64).
  pub simd128: bool,
}

impl Caps {
  /// No capabilities; portable kernels only.
  pub const NONE: Self = Self { simd128: false };
}

/// Get the detected capabilities of the current CPU.
#[inline]
#[must_use]
#[cfg(feature = "std")]
pub fn caps() -> Caps {
  static CAPS: std::sync::OnceLock<Caps> = std::sync::OnceLock::new();
  *CAPS.get_or_init(detect)
}

/// Get the detected capabilities of the current CPU.
#[inline]
#[must_use]
#[cfg(not(feature = "std"))]
pub fn caps() -> Caps {
  detect()
}

#[inline]
fn detect() -> Caps {
  if cfg!(miri) {
    return Caps::NONE;
  }
  Caps { simd128: simd128_available() }
}

#[cfg(all(target_arch = "x86_64", feature = "std"))]
#[inline]
fn simd128_available() -> bool {
  // The 4-lane kernels use pshufb byte shuffles, so SSSE3 is required in
  // addition to SSE4.1.
  std::arch::is_x86_feature_detected!("sse4.1") && std::arch::is_x86_feature_detected!("ssse3")
}

#[cfg(all(target_arch = "x86_64", not(feature = "std")))]
#[inline]
fn simd128_available() -> bool {
  cfg!(target_feature = "sse4.1") && cfg!(target_feature = "ssse3")
}

#[cfg(target_arch = "aarch64")]
#[inline]
fn simd128_available() -> bool {
  // NEON is baseline on aarch64.
  cfg!(target_feature = "neon")
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline]
fn simd128_available() -> bool {
  false
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn caps_are_stable_across_calls() {
    assert_eq!(caps(), caps());
  }

  #[cfg(target_arch = "aarch64")]
  #[test]
  fn neon_is_baseline() {
    if !cfg!(miri) {
      assert!(caps().simd128);
    }
  }

  #[cfg(miri)]
  #[test]
  fn miri_is_portable_only() {
    assert_eq!(caps(), Caps::NONE);
  }
}
