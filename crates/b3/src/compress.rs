//! The BLAKE3 compression function, portable form.
//!
//! State lives in sixteen locals so the compiler can keep it in registers;
//! the message words are read through the per-round schedule table, which
//! unrolls completely once the round loop is unrolled.

use crate::{BLOCK_LEN, IV, MSG_SCHEDULE, PARENT};

/// Truncate a 16-word compression output to its chaining value.
#[inline(always)]
pub(crate) fn first8(words: [u32; 16]) -> [u32; 8] {
  let [a, b, c, d, e, f, g, h, ..] = words;
  [a, b, c, d, e, f, g, h]
}

/// Compress one 64-byte block into a 16-word state.
///
/// The first 8 output words are the next chaining value; the full 16 words
/// are only needed for XOF expansion. Pure and infallible. `block_len` must
/// be at most 64.
pub(crate) fn compress(cv: &[u32; 8], block: &[u32; 16], counter: u64, block_len: u32, flags: u32) -> [u32; 16] {
  debug_assert!(block_len as usize <= BLOCK_LEN);

  let mut v0 = cv[0];
  let mut v1 = cv[1];
  let mut v2 = cv[2];
  let mut v3 = cv[3];
  let mut v4 = cv[4];
  let mut v5 = cv[5];
  let mut v6 = cv[6];
  let mut v7 = cv[7];
  let mut v8 = IV[0];
  let mut v9 = IV[1];
  let mut v10 = IV[2];
  let mut v11 = IV[3];
  let mut v12 = counter as u32;
  let mut v13 = (counter >> 32) as u32;
  let mut v14 = block_len;
  let mut v15 = flags;

  macro_rules! g {
    ($a:ident, $b:ident, $c:ident, $d:ident, $mx:expr, $my:expr) => {{
      $a = $a.wrapping_add($b).wrapping_add($mx);
      $d = ($d ^ $a).rotate_right(16);
      $c = $c.wrapping_add($d);
      $b = ($b ^ $c).rotate_right(12);
      $a = $a.wrapping_add($b).wrapping_add($my);
      $d = ($d ^ $a).rotate_right(8);
      $c = $c.wrapping_add($d);
      $b = ($b ^ $c).rotate_right(7);
    }};
  }

  for schedule in &MSG_SCHEDULE {
    let m = |i: usize| block[schedule[i]];

    // Columns.
    g!(v0, v4, v8, v12, m(0), m(1));
    g!(v1, v5, v9, v13, m(2), m(3));
    g!(v2, v6, v10, v14, m(4), m(5));
    g!(v3, v7, v11, v15, m(6), m(7));

    // Diagonals.
    g!(v0, v5, v10, v15, m(8), m(9));
    g!(v1, v6, v11, v12, m(10), m(11));
    g!(v2, v7, v8, v13, m(12), m(13));
    g!(v3, v4, v9, v14, m(14), m(15));
  }

  [
    v0 ^ v8,
    v1 ^ v9,
    v2 ^ v10,
    v3 ^ v11,
    v4 ^ v12,
    v5 ^ v13,
    v6 ^ v14,
    v7 ^ v15,
    v8 ^ cv[0],
    v9 ^ cv[1],
    v10 ^ cv[2],
    v11 ^ cv[3],
    v12 ^ cv[4],
    v13 ^ cv[5],
    v14 ^ cv[6],
    v15 ^ cv[7],
  ]
}

/// Compute a parent chaining value from two children.
///
/// Parent compressions always run with counter 0 and a full block length.
#[inline]
pub(crate) fn parent_cv(left: &[u32; 8], right: &[u32; 8], key: &[u32; 8], flags: u32) -> [u32; 8] {
  let mut block = [0u32; 16];
  block[..8].copy_from_slice(left);
  block[8..].copy_from_slice(right);
  first8(compress(key, &block, 0, BLOCK_LEN as u32, PARENT | flags))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{CHUNK_END, CHUNK_START, ROOT};
  use crate::words::words8_to_le;

  // The empty-input hash is a single compression of the zero block.
  #[test]
  fn empty_input_root_compression() {
    let out = compress(&IV, &[0u32; 16], 0, 0, CHUNK_START | CHUNK_END | ROOT);
    let expected: [u8; 32] = [
      0xaf, 0x13, 0x49, 0xb9, 0xf5, 0xf9, 0xa1, 0xa6, 0xa0, 0x40, 0x4d, 0xea, 0x36, 0xdc, 0xc9, 0x49, 0x9b, 0xcb,
      0x25, 0xc9, 0xad, 0xc1, 0x12, 0xb7, 0xcc, 0x9a, 0x93, 0xca, 0xe4, 0x1f, 0x32, 0x62,
    ];
    assert_eq!(words8_to_le(&first8(out)), expected);
  }

  #[test]
  fn output_feedforward_differs_between_halves() {
    let block = [0x0101_0101u32; 16];
    let out = compress(&IV, &block, 7, 64, 0);
    // The two output halves mix the input cv differently; a collision here
    // would mean the feed-forward step was dropped.
    assert_ne!(first8(out), {
      let [_, _, _, _, _, _, _, _, i, j, k, l, m, n, o, p] = out;
      [i, j, k, l, m, n, o, p]
    });
  }
}
