//! Finalization outputs.
//!
//! [`OutputNode`] captures the parameters of the compression whose output is
//! the digest (or the XOF seed). The node's own `counter` matters only while
//! it is still an interior chaining value; once it becomes the root, every
//! output block replaces the counter slot with the *output-block index*.
//! Conflating those two counters silently corrupts extended output.

use traits::Xof;

use crate::compress::first8;
use crate::kernels::{CompressFn, Kernel};
use crate::words::{words8_to_le, words16_to_le};
use crate::{BLOCK_LEN, OUT_LEN, PARENT, ROOT};

#[derive(Clone, Copy)]
pub(crate) struct OutputNode {
  pub(crate) cv: [u32; 8],
  pub(crate) block: [u32; 16],
  pub(crate) counter: u64,
  pub(crate) block_len: u32,
  /// Flags without `ROOT`; finalization adds it.
  pub(crate) flags: u32,
}

impl OutputNode {
  /// Node combining two child chaining values.
  #[inline]
  pub(crate) fn parent(left: &[u32; 8], right: &[u32; 8], key: &[u32; 8], flags: u32) -> Self {
    let mut block = [0u32; 16];
    block[..8].copy_from_slice(left);
    block[8..].copy_from_slice(right);
    Self {
      cv: *key,
      block,
      counter: 0,
      block_len: BLOCK_LEN as u32,
      flags: PARENT | flags,
    }
  }

  /// The chaining value this node contributes when it is *not* the root.
  #[inline]
  pub(crate) fn chaining_value(&self, kernel: &Kernel) -> [u32; 8] {
    first8((kernel.compress)(
      &self.cv,
      &self.block,
      self.counter,
      self.block_len,
      self.flags,
    ))
  }

  #[inline]
  pub(crate) fn root_hash_words(&self, kernel: &Kernel) -> [u32; 8] {
    // Output block 0; the node's own counter is not used for root output.
    first8((kernel.compress)(&self.cv, &self.block, 0, self.block_len, self.flags | ROOT))
  }

  #[inline]
  pub(crate) fn root_hash(&self, kernel: &Kernel) -> [u8; OUT_LEN] {
    words8_to_le(&self.root_hash_words(kernel))
  }

  /// One 64-byte XOF output block at the given output-block counter.
  #[inline]
  pub(crate) fn xof_block(&self, compress: CompressFn, block_counter: u64) -> [u8; BLOCK_LEN] {
    words16_to_le(&compress(
      &self.cv,
      &self.block,
      block_counter,
      self.block_len,
      self.flags | ROOT,
    ))
  }
}

/// Extendable output reader.
///
/// Created by [`Blake3::finalize_xof`](crate::Blake3::finalize_xof). Reads
/// are cumulative and deterministic: any sequence of `squeeze` calls yields
/// the same byte stream as one large read.
#[derive(Clone)]
pub struct XofReader {
  node: OutputNode,
  kernel: Kernel,
  block_counter: u64,
  buf: [u8; BLOCK_LEN],
  buf_pos: usize,
}

impl XofReader {
  #[inline]
  pub(crate) fn new(node: OutputNode, kernel: Kernel) -> Self {
    Self {
      node,
      kernel,
      block_counter: 0,
      buf: [0u8; BLOCK_LEN],
      buf_pos: BLOCK_LEN,
    }
  }
}

impl Xof for XofReader {
  fn squeeze(&mut self, mut out: &mut [u8]) {
    if out.is_empty() {
      return;
    }

    // Drain any buffered bytes first.
    if self.buf_pos != BLOCK_LEN {
      let take = (BLOCK_LEN - self.buf_pos).min(out.len());
      out[..take].copy_from_slice(&self.buf[self.buf_pos..self.buf_pos + take]);
      self.buf_pos += take;
      out = &mut out[take..];
    }

    // Four blocks at a time while the destination can hold them.
    if self.kernel.simd_degree == 4 {
      while out.len() >= 4 * BLOCK_LEN {
        let blocks = (self.kernel.xof_blocks4)(&self.node, self.block_counter);
        out[..4 * BLOCK_LEN].copy_from_slice(&blocks);
        self.block_counter = self.block_counter.wrapping_add(4);
        out = &mut out[4 * BLOCK_LEN..];
      }
    }

    // Remaining whole blocks, straight into the destination.
    while out.len() >= BLOCK_LEN {
      let block = self.node.xof_block(self.kernel.compress, self.block_counter);
      out[..BLOCK_LEN].copy_from_slice(&block);
      self.block_counter = self.block_counter.wrapping_add(1);
      out = &mut out[BLOCK_LEN..];
    }

    // Tail: buffer one block and serve the partial read from it.
    if !out.is_empty() {
      self.buf = self.node.xof_block(self.kernel.compress, self.block_counter);
      self.block_counter = self.block_counter.wrapping_add(1);
      let take = out.len();
      out.copy_from_slice(&self.buf[..take]);
      self.buf_pos = take;
    }
  }
}
