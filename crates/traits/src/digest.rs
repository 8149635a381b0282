//! Streaming digest trait.

use core::fmt::Debug;

/// Cryptographic hash function producing a fixed-size digest.
///
/// Implementations accept input incrementally via [`update`](Self::update)
/// and produce their digest via [`finalize`](Self::finalize), which is
/// idempotent: it borrows the hasher immutably, so the caller may keep
/// updating afterwards and finalize again later.
pub trait Digest: Clone + Default {
  /// Output size in bytes.
  const OUTPUT_SIZE: usize;

  /// The digest output type.
  ///
  /// Typically `[u8; N]`.
  type Output: Copy + Eq + Debug;

  /// Create a new hasher in its initial state.
  #[must_use]
  fn new() -> Self;

  /// Update the hasher with additional data.
  fn update(&mut self, data: &[u8]);

  /// Finalize and return the digest without consuming the hasher.
  #[must_use]
  fn finalize(&self) -> Self::Output;

  /// Reset the hasher to its initial state.
  fn reset(&mut self);

  /// Compute the digest of `data` in one shot.
  #[inline]
  #[must_use]
  fn digest(data: &[u8]) -> Self::Output {
    let mut h = Self::new();
    h.update(data);
    h.finalize()
  }
}
