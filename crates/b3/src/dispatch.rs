//! One-time kernel selection.
//!
//! The CPU check runs once; every hasher constructed afterwards copies the
//! selected function-pointer bundle, so the hot paths never re-dispatch.

use crate::kernels::{Kernel, KernelId, kernel};

/// The kernel new hashers are built with.
#[inline]
#[must_use]
pub(crate) fn active_kernel() -> Kernel {
  kernel(active_id())
}

#[cfg(feature = "std")]
#[inline]
fn active_id() -> KernelId {
  static ACTIVE: std::sync::OnceLock<KernelId> = std::sync::OnceLock::new();
  *ACTIVE.get_or_init(select)
}

#[cfg(not(feature = "std"))]
#[inline]
fn active_id() -> KernelId {
  select()
}

fn select() -> KernelId {
  #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
  {
    // The 4-lane kernels load lanes as little-endian bytes.
    if cfg!(target_endian = "little") && platform::caps().simd128 {
      return KernelId::Simd128;
    }
  }
  KernelId::Portable
}
