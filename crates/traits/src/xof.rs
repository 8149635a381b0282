//! Extendable-output function (XOF) trait.

/// Extendable-output reader producing an arbitrary number of bytes.
///
/// Reads are cumulative: each call to [`squeeze`](Self::squeeze) continues
/// where the previous one ended. The trait has no `std::io` dependency and is
/// usable in `no_std` environments.
pub trait Xof: Clone {
  /// Squeeze the next `out.len()` output bytes into `out`.
  fn squeeze(&mut self, out: &mut [u8]);
}
