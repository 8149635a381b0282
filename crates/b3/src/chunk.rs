//! Chunk state: the leaf accumulator of the tree.
//!
//! A chunk absorbs up to 1024 bytes across up to 16 block compressions. The
//! last block of a chunk is never compressed by `update`; it stays buffered
//! so that finalization can apply `CHUNK_END` (and possibly `ROOT`) to it.

use crate::kernels::Kernel;
use crate::compress::first8;
use crate::output::OutputNode;
use crate::words::words16_from_le;
use crate::{BLOCK_LEN, CHUNK_END, CHUNK_LEN, CHUNK_START};

#[derive(Clone, Copy, Debug)]
pub(crate) struct ChunkState {
  cv: [u32; 8],
  chunk_counter: u64,
  block: [u8; BLOCK_LEN],
  block_len: u8,
  blocks_compressed: u8,
  flags: u32,
}

impl ChunkState {
  #[inline]
  pub(crate) fn new(key: [u32; 8], chunk_counter: u64, flags: u32) -> Self {
    Self {
      cv: key,
      chunk_counter,
      block: [0u8; BLOCK_LEN],
      block_len: 0,
      blocks_compressed: 0,
      flags,
    }
  }

  /// Bytes absorbed so far (0..=1024).
  #[inline]
  pub(crate) fn len(&self) -> usize {
    BLOCK_LEN * self.blocks_compressed as usize + self.block_len as usize
  }

  #[inline]
  pub(crate) fn chunk_counter(&self) -> u64 {
    self.chunk_counter
  }

  #[inline]
  fn start_flag(&self) -> u32 {
    if self.blocks_compressed == 0 { CHUNK_START } else { 0 }
  }

  /// Absorb input. The caller never feeds more than the chunk can hold.
  pub(crate) fn update(&mut self, kernel: &Kernel, mut input: &[u8]) {
    debug_assert!(self.len() + input.len() <= CHUNK_LEN);

    while !input.is_empty() {
      // A buffered full block is compressed only once another byte arrives,
      // which proves it was not the chunk's last block.
      if self.block_len as usize == BLOCK_LEN {
        let block_words = words16_from_le(&self.block);
        self.cv = first8((kernel.compress)(
          &self.cv,
          &block_words,
          self.chunk_counter,
          BLOCK_LEN as u32,
          self.flags | self.start_flag(),
        ));
        self.blocks_compressed += 1;
        self.block = [0u8; BLOCK_LEN];
        self.block_len = 0;
      }

      let want = BLOCK_LEN - self.block_len as usize;
      let take = want.min(input.len());
      self.block[self.block_len as usize..][..take].copy_from_slice(&input[..take]);
      self.block_len += take as u8;
      input = &input[take..];
    }
  }

  /// The chunk's final compression, with `CHUNK_END` set.
  ///
  /// The block buffer is already zero-padded past `block_len`.
  #[inline]
  pub(crate) fn output(&self) -> OutputNode {
    OutputNode {
      cv: self.cv,
      block: words16_from_le(&self.block),
      counter: self.chunk_counter,
      block_len: self.block_len as u32,
      flags: self.flags | self.start_flag() | CHUNK_END,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::IV;
  use crate::kernels::{KernelId, kernel};

  #[test]
  fn full_chunk_keeps_last_block_buffered() {
    let k = kernel(KernelId::Portable);
    let mut state = ChunkState::new(IV, 0, 0);
    state.update(&k, &[0xAB; CHUNK_LEN]);
    assert_eq!(state.len(), CHUNK_LEN);
    assert_eq!(state.blocks_compressed, 15);
    assert_eq!(state.block_len as usize, BLOCK_LEN);
  }

  #[test]
  fn single_block_chunk_sets_both_boundary_flags() {
    let k = kernel(KernelId::Portable);
    let mut state = ChunkState::new(IV, 0, 0);
    state.update(&k, b"hello");
    let node = state.output();
    assert_eq!(node.flags & CHUNK_START, CHUNK_START);
    assert_eq!(node.flags & CHUNK_END, CHUNK_END);
    assert_eq!(node.block_len, 5);
  }

  #[test]
  fn split_updates_match_one_update() {
    let k = kernel(KernelId::Portable);
    let data: [u8; 300] = core::array::from_fn(|i| (i % 251) as u8);

    let mut whole = ChunkState::new(IV, 3, 0);
    whole.update(&k, &data);

    let mut split = ChunkState::new(IV, 3, 0);
    for part in data.chunks(7) {
      split.update(&k, part);
    }

    assert_eq!(whole.output().chaining_value(&k), split.output().chaining_value(&k));
  }
}
