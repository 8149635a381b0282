//! Compression kernels.
//!
//! A [`Kernel`] bundles the function pointers the streaming hasher calls
//! into. Selection happens once (see [`crate::dispatch`]); after that there
//! is no per-block dispatch cost.

use platform::Caps;

use crate::compress::{compress, first8};
use crate::output::OutputNode;
use crate::words::words16_from_le;
use crate::{BLOCK_LEN, CHUNK_END, CHUNK_LEN, CHUNK_START};

/// Single-block compression.
pub(crate) type CompressFn = fn(&[u32; 8], &[u32; 16], u64, u32, u32) -> [u32; 16];

/// Hash four contiguous full chunks, one lane per chunk, producing the four
/// chunk chaining values for counters `counter .. counter + 4`.
pub(crate) type HashChunks4Fn = fn(&[u8; 4 * CHUNK_LEN], &[u32; 8], u64, u32) -> [[u32; 8]; 4];

/// Produce four consecutive 64-byte XOF output blocks for a finalized root
/// node, starting at the given output-block counter.
pub(crate) type XofBlocks4Fn = fn(&OutputNode, u64) -> [u8; 4 * BLOCK_LEN];

#[derive(Clone, Copy, Debug)]
pub(crate) struct Kernel {
  pub(crate) id: KernelId,
  pub(crate) compress: CompressFn,
  pub(crate) hash_chunks4: HashChunks4Fn,
  pub(crate) xof_blocks4: XofBlocks4Fn,
  /// 1 for portable, 4 for the 128-bit SIMD kernel.
  pub(crate) simd_degree: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KernelId {
  Portable,
  #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
  Simd128,
}

impl KernelId {
  #[inline]
  #[must_use]
  pub(crate) const fn as_str(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      #[cfg(target_arch = "x86_64")]
      Self::Simd128 => "x86_64/sse4.1",
      #[cfg(target_arch = "aarch64")]
      Self::Simd128 => "aarch64/neon",
    }
  }
}

/// Every kernel this build knows about, portable first.
pub(crate) const ALL: &[KernelId] = &[
  KernelId::Portable,
  #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
  KernelId::Simd128,
];

#[inline]
#[must_use]
pub(crate) const fn required_caps(id: KernelId) -> Caps {
  match id {
    KernelId::Portable => Caps::NONE,
    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    KernelId::Simd128 => Caps { simd128: true },
  }
}

#[must_use]
pub(crate) fn kernel(id: KernelId) -> Kernel {
  match id {
    KernelId::Portable => Kernel {
      id,
      compress,
      hash_chunks4: hash_chunks4_portable,
      xof_blocks4: xof_blocks4_portable,
      simd_degree: 1,
    },
    // Single-block compression stays scalar even on the SIMD kernel: one
    // block cannot fill four lanes, and the scalar compressor keeps the
    // streaming path free of vector setup costs.
    #[cfg(target_arch = "x86_64")]
    KernelId::Simd128 => Kernel {
      id,
      compress,
      hash_chunks4: crate::x86_64::hash_chunks4,
      xof_blocks4: crate::x86_64::xof_blocks4,
      simd_degree: 4,
    },
    #[cfg(target_arch = "aarch64")]
    KernelId::Simd128 => Kernel {
      id,
      compress,
      hash_chunks4: crate::aarch64::hash_chunks4,
      xof_blocks4: crate::aarch64::xof_blocks4,
      simd_degree: 4,
    },
  }
}

fn hash_chunks4_portable(input: &[u8; 4 * CHUNK_LEN], key: &[u32; 8], counter: u64, flags: u32) -> [[u32; 8]; 4] {
  let mut out = [[0u32; 8]; 4];
  let (chunks, _) = input.as_chunks::<CHUNK_LEN>();
  for (lane, (chunk, cv_out)) in chunks.iter().zip(out.iter_mut()).enumerate() {
    let chunk_counter = counter.wrapping_add(lane as u64);
    let mut cv = *key;
    let (blocks, _) = chunk.as_chunks::<BLOCK_LEN>();
    for (i, block) in blocks.iter().enumerate() {
      let mut block_flags = flags;
      if i == 0 {
        block_flags |= CHUNK_START;
      }
      if i + 1 == CHUNK_LEN / BLOCK_LEN {
        block_flags |= CHUNK_END;
      }
      cv = first8(compress(
        &cv,
        &words16_from_le(block),
        chunk_counter,
        BLOCK_LEN as u32,
        block_flags,
      ));
    }
    *cv_out = cv;
  }
  out
}

fn xof_blocks4_portable(node: &OutputNode, block_counter: u64) -> [u8; 4 * BLOCK_LEN] {
  let mut out = [0u8; 4 * BLOCK_LEN];
  let (blocks, _) = out.as_chunks_mut::<BLOCK_LEN>();
  for (i, block) in blocks.iter_mut().enumerate() {
    *block = node.xof_block(compress, block_counter.wrapping_add(i as u64));
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::IV;

  #[test]
  fn portable_requires_nothing() {
    assert_eq!(required_caps(KernelId::Portable), Caps::NONE);
  }

  #[test]
  fn hash_chunks4_matches_single_chunk_hashing() {
    let mut input = [0u8; 4 * CHUNK_LEN];
    for (i, b) in input.iter_mut().enumerate() {
      *b = (i % 251) as u8;
    }

    let batched = hash_chunks4_portable(&input, &IV, 5, 0);

    let (chunks, _) = input.as_chunks::<CHUNK_LEN>();
    for (lane, chunk) in chunks.iter().enumerate() {
      let mut one = [0u8; 4 * CHUNK_LEN];
      one[..CHUNK_LEN].copy_from_slice(chunk);
      // Lane 0 of a batch starting at this lane's counter.
      let padded: &[u8; 4 * CHUNK_LEN] = &one;
      let solo = hash_chunks4_portable(padded, &IV, 5 + lane as u64, 0);
      assert_eq!(solo[0], batched[lane], "lane {lane}");
    }
  }
}
