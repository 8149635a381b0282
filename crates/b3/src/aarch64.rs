//! 4-lane 128-bit SIMD kernels for aarch64 (NEON).
//!
//! Same vertical layout as the x86_64 module: each `uint32x4_t` holds one
//! state word across four lanes. Rotations use the cheapest NEON forms:
//! `vrev32q_u16` for 16, a byte table lookup for 8, shift-insert otherwise.
//! Lane loads assume little-endian; dispatch never selects this kernel on a
//! big-endian target.

#![allow(clippy::inline_always)]

use core::arch::aarch64::*;

use crate::output::OutputNode;
use crate::{BLOCK_LEN, CHUNK_END, CHUNK_LEN, CHUNK_START, IV, MSG_SCHEDULE, ROOT};

const DEGREE: usize = 4;
const BLOCKS_PER_CHUNK: usize = CHUNK_LEN / BLOCK_LEN;

/// Byte indices rotating every 32-bit lane right by 8 bits.
static ROT8_TABLE: [u8; 16] = [1, 2, 3, 0, 5, 6, 7, 4, 9, 10, 11, 8, 13, 14, 15, 12];

#[inline(always)]
unsafe fn loadu(src: *const u8) -> uint32x4_t {
  // vld1q_u8 has no alignment requirement.
  unsafe { vreinterpretq_u32_u8(vld1q_u8(src)) }
}

#[inline(always)]
unsafe fn storeu(v: uint32x4_t, dst: *mut u8) {
  unsafe { vst1q_u8(dst, vreinterpretq_u8_u32(v)) }
}

#[inline(always)]
unsafe fn add(a: uint32x4_t, b: uint32x4_t) -> uint32x4_t {
  unsafe { vaddq_u32(a, b) }
}

#[inline(always)]
unsafe fn xor(a: uint32x4_t, b: uint32x4_t) -> uint32x4_t {
  unsafe { veorq_u32(a, b) }
}

#[inline(always)]
unsafe fn splat(x: u32) -> uint32x4_t {
  unsafe { vdupq_n_u32(x) }
}

#[inline(always)]
unsafe fn rot16(v: uint32x4_t) -> uint32x4_t {
  unsafe { vreinterpretq_u32_u16(vrev32q_u16(vreinterpretq_u16_u32(v))) }
}

#[inline(always)]
unsafe fn rot12(v: uint32x4_t) -> uint32x4_t {
  unsafe { vsliq_n_u32(vshrq_n_u32(v, 12), v, 20) }
}

#[inline(always)]
unsafe fn rot8(v: uint32x4_t) -> uint32x4_t {
  unsafe {
    let table = vld1q_u8(ROT8_TABLE.as_ptr());
    vreinterpretq_u32_u8(vqtbl1q_u8(vreinterpretq_u8_u32(v), table))
  }
}

#[inline(always)]
unsafe fn rot7(v: uint32x4_t) -> uint32x4_t {
  unsafe { vsliq_n_u32(vshrq_n_u32(v, 7), v, 25) }
}

/// Per-lane chunk counters: lane `i` holds `counter + i`.
#[inline(always)]
unsafe fn lane_counters(counter: u64) -> (uint32x4_t, uint32x4_t) {
  let c: [u64; DEGREE] = [
    counter,
    counter.wrapping_add(1),
    counter.wrapping_add(2),
    counter.wrapping_add(3),
  ];
  let lo: [u32; DEGREE] = [c[0] as u32, c[1] as u32, c[2] as u32, c[3] as u32];
  let hi: [u32; DEGREE] = [
    (c[0] >> 32) as u32,
    (c[1] >> 32) as u32,
    (c[2] >> 32) as u32,
    (c[3] >> 32) as u32,
  ];
  unsafe { (vld1q_u32(lo.as_ptr()), vld1q_u32(hi.as_ptr())) }
}

/// One full round (columns then diagonals) over four lanes.
#[inline(always)]
unsafe fn round4(v: &mut [uint32x4_t; 16], m: &[uint32x4_t; 16], r: usize) {
  unsafe {
    let s = &MSG_SCHEDULE[r];

    macro_rules! g4 {
      ($a:literal, $b:literal, $c:literal, $d:literal, $x:literal, $y:literal) => {{
        v[$a] = add(add(v[$a], v[$b]), m[s[$x]]);
        v[$d] = rot16(xor(v[$d], v[$a]));
        v[$c] = add(v[$c], v[$d]);
        v[$b] = rot12(xor(v[$b], v[$c]));
        v[$a] = add(add(v[$a], v[$b]), m[s[$y]]);
        v[$d] = rot8(xor(v[$d], v[$a]));
        v[$c] = add(v[$c], v[$d]);
        v[$b] = rot7(xor(v[$b], v[$c]));
      }};
    }

    g4!(0, 4, 8, 12, 0, 1);
    g4!(1, 5, 9, 13, 2, 3);
    g4!(2, 6, 10, 14, 4, 5);
    g4!(3, 7, 11, 15, 6, 7);

    g4!(0, 5, 10, 15, 8, 9);
    g4!(1, 6, 11, 12, 10, 11);
    g4!(2, 7, 8, 13, 12, 13);
    g4!(3, 4, 9, 14, 14, 15);
  }
}

/// 4x4 transpose of 32-bit words.
#[inline(always)]
unsafe fn transpose4(vecs: &mut [uint32x4_t; DEGREE]) {
  unsafe {
    let rows01 = vtrnq_u32(vecs[0], vecs[1]);
    let rows23 = vtrnq_u32(vecs[2], vecs[3]);
    vecs[0] = vcombine_u32(vget_low_u32(rows01.0), vget_low_u32(rows23.0));
    vecs[1] = vcombine_u32(vget_low_u32(rows01.1), vget_low_u32(rows23.1));
    vecs[2] = vcombine_u32(vget_high_u32(rows01.0), vget_high_u32(rows23.0));
    vecs[3] = vcombine_u32(vget_high_u32(rows01.1), vget_high_u32(rows23.1));
  }
}

/// Load block `block` of all four chunks, transposed so that `m[i]` holds
/// message word `i` of every lane.
#[inline(always)]
unsafe fn load_block_vecs(input: &[u8; DEGREE * CHUNK_LEN], block: usize) -> [uint32x4_t; 16] {
  unsafe {
    let base = input.as_ptr();
    let mut m = [vdupq_n_u32(0); 16];
    for quarter in 0..4 {
      let offset = block * BLOCK_LEN + quarter * 16;
      let mut rows = [
        loadu(base.add(offset)),
        loadu(base.add(CHUNK_LEN + offset)),
        loadu(base.add(2 * CHUNK_LEN + offset)),
        loadu(base.add(3 * CHUNK_LEN + offset)),
      ];
      transpose4(&mut rows);
      m[4 * quarter] = rows[0];
      m[4 * quarter + 1] = rows[1];
      m[4 * quarter + 2] = rows[2];
      m[4 * quarter + 3] = rows[3];
    }
    m
  }
}

/// Hash four contiguous full chunks, one lane per chunk.
pub(crate) fn hash_chunks4(input: &[u8; DEGREE * CHUNK_LEN], key: &[u32; 8], counter: u64, flags: u32) -> [[u32; 8]; DEGREE] {
  // SAFETY: this entry point is only installed in a kernel row after
  // `platform::caps()` reported NEON.
  unsafe { hash_chunks4_neon(input, key, counter, flags) }
}

#[target_feature(enable = "neon")]
unsafe fn hash_chunks4_neon(
  input: &[u8; DEGREE * CHUNK_LEN],
  key: &[u32; 8],
  counter: u64,
  flags: u32,
) -> [[u32; 8]; DEGREE] {
  unsafe {
    let mut h = [
      splat(key[0]),
      splat(key[1]),
      splat(key[2]),
      splat(key[3]),
      splat(key[4]),
      splat(key[5]),
      splat(key[6]),
      splat(key[7]),
    ];
    let (counter_lo, counter_hi) = lane_counters(counter);
    let block_len_vec = splat(BLOCK_LEN as u32);

    for block in 0..BLOCKS_PER_CHUNK {
      let mut block_flags = flags;
      if block == 0 {
        block_flags |= CHUNK_START;
      }
      if block + 1 == BLOCKS_PER_CHUNK {
        block_flags |= CHUNK_END;
      }

      let m = load_block_vecs(input, block);
      let mut v = [
        h[0],
        h[1],
        h[2],
        h[3],
        h[4],
        h[5],
        h[6],
        h[7],
        splat(IV[0]),
        splat(IV[1]),
        splat(IV[2]),
        splat(IV[3]),
        counter_lo,
        counter_hi,
        block_len_vec,
        splat(block_flags),
      ];

      for r in 0..7 {
        round4(&mut v, &m, r);
      }

      for i in 0..8 {
        h[i] = xor(v[i], v[i + 8]);
      }
    }

    // Back to one CV per lane.
    let mut lo = [h[0], h[1], h[2], h[3]];
    let mut hi = [h[4], h[5], h[6], h[7]];
    transpose4(&mut lo);
    transpose4(&mut hi);

    let mut out = [[0u32; 8]; DEGREE];
    for (lane, cv) in out.iter_mut().enumerate() {
      vst1q_u32(cv.as_mut_ptr(), lo[lane]);
      vst1q_u32(cv.as_mut_ptr().add(4), hi[lane]);
    }
    out
  }
}

/// Four consecutive 64-byte XOF output blocks of a finalized root node.
///
/// Every lane shares the root parameters; only the output-block counter
/// differs per lane.
pub(crate) fn xof_blocks4(node: &OutputNode, block_counter: u64) -> [u8; DEGREE * BLOCK_LEN] {
  // SAFETY: this entry point is only installed in a kernel row after
  // `platform::caps()` reported NEON.
  unsafe { xof_blocks4_neon(node, block_counter) }
}

#[target_feature(enable = "neon")]
unsafe fn xof_blocks4_neon(node: &OutputNode, block_counter: u64) -> [u8; DEGREE * BLOCK_LEN] {
  unsafe {
    let cv = [
      splat(node.cv[0]),
      splat(node.cv[1]),
      splat(node.cv[2]),
      splat(node.cv[3]),
      splat(node.cv[4]),
      splat(node.cv[5]),
      splat(node.cv[6]),
      splat(node.cv[7]),
    ];
    let mut m = [vdupq_n_u32(0); 16];
    for (dst, &word) in m.iter_mut().zip(node.block.iter()) {
      *dst = splat(word);
    }

    let (counter_lo, counter_hi) = lane_counters(block_counter);
    let mut v = [
      cv[0],
      cv[1],
      cv[2],
      cv[3],
      cv[4],
      cv[5],
      cv[6],
      cv[7],
      splat(IV[0]),
      splat(IV[1]),
      splat(IV[2]),
      splat(IV[3]),
      counter_lo,
      counter_hi,
      splat(node.block_len),
      splat(node.flags | ROOT),
    ];

    for r in 0..7 {
      round4(&mut v, &m, r);
    }

    let mut words = [vdupq_n_u32(0); 16];
    for i in 0..8 {
      words[i] = xor(v[i], v[i + 8]);
      words[i + 8] = xor(v[i + 8], cv[i]);
    }

    // Transpose word quartets back into per-lane 64-byte blocks.
    let mut out = [0u8; DEGREE * BLOCK_LEN];
    for quarter in 0..4 {
      let mut rows = [
        words[4 * quarter],
        words[4 * quarter + 1],
        words[4 * quarter + 2],
        words[4 * quarter + 3],
      ];
      transpose4(&mut rows);
      for (lane, row) in rows.iter().enumerate() {
        storeu(*row, out.as_mut_ptr().add(lane * BLOCK_LEN + quarter * 16));
      }
    }
    out
  }
}
