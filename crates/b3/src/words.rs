//! Little-endian word conversions.
//!
//! All wire formats in this crate are little-endian; these helpers are the
//! only place byte order is handled. On little-endian hosts they compile to
//! plain loads and stores.

use crate::BLOCK_LEN;

#[inline(always)]
pub(crate) fn words8_from_le(bytes: &[u8; 32]) -> [u32; 8] {
  let mut words = [0u32; 8];
  let (quads, _) = bytes.as_chunks::<4>();
  for (word, quad) in words.iter_mut().zip(quads) {
    *word = u32::from_le_bytes(*quad);
  }
  words
}

#[inline(always)]
pub(crate) fn words16_from_le(bytes: &[u8; BLOCK_LEN]) -> [u32; 16] {
  let mut words = [0u32; 16];
  let (quads, _) = bytes.as_chunks::<4>();
  for (word, quad) in words.iter_mut().zip(quads) {
    *word = u32::from_le_bytes(*quad);
  }
  words
}

#[inline(always)]
pub(crate) fn words8_to_le(words: &[u32; 8]) -> [u8; 32] {
  let mut bytes = [0u8; 32];
  let (quads, _) = bytes.as_chunks_mut::<4>();
  for (quad, word) in quads.iter_mut().zip(words) {
    *quad = word.to_le_bytes();
  }
  bytes
}

#[inline(always)]
pub(crate) fn words16_to_le(words: &[u32; 16]) -> [u8; BLOCK_LEN] {
  let mut bytes = [0u8; BLOCK_LEN];
  let (quads, _) = bytes.as_chunks_mut::<4>();
  for (quad, word) in quads.iter_mut().zip(words) {
    *quad = word.to_le_bytes();
  }
  bytes
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn roundtrip_words8() {
    let words = [0x0100_0302u32, 5, 6, 7, 8, 9, 10, 0xFFFF_FFFF];
    assert_eq!(words8_from_le(&words8_to_le(&words)), words);
  }

  #[test]
  fn word_order_is_little_endian() {
    let mut bytes = [0u8; BLOCK_LEN];
    bytes[0] = 0x01;
    bytes[4] = 0x02;
    let words = words16_from_le(&bytes);
    assert_eq!(words[0], 0x01);
    assert_eq!(words[1], 0x02);
  }
}
