//! Error types for keyed hashing.
//!
//! Every error here is deterministic and caller-correctable; there are no
//! retryable conditions in this workspace.

use core::fmt;

/// A key slice did not have the required length.
///
/// Keyed constructors taking a fixed-size `&[u8; 32]` cannot fail; this error
/// exists for callers holding key material of unknown length.
///
/// # Examples
///
/// ```
/// use traits::KeyLengthError;
///
/// fn parse_key(bytes: &[u8]) -> Result<[u8; 32], KeyLengthError> {
///   bytes.try_into().map_err(|_| KeyLengthError::new(bytes.len()))
/// }
///
/// assert!(parse_key(&[0u8; 31]).is_err());
/// assert!(parse_key(&[0u8; 32]).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyLengthError {
  got: usize,
}

impl KeyLengthError {
  /// Required key length in bytes.
  pub const EXPECTED: usize = 32;

  /// Create a new error recording the offending length.
  #[inline]
  #[must_use]
  pub const fn new(got: usize) -> Self {
    Self { got }
  }

  /// The length that was actually supplied.
  #[inline]
  #[must_use]
  pub const fn got(self) -> usize {
    self.got
  }
}

impl fmt::Display for KeyLengthError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "invalid key length: expected {} bytes, got {}",
      Self::EXPECTED,
      self.got
    )
  }
}

impl core::error::Error for KeyLengthError {}
