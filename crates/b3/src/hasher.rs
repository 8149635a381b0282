//! The streaming hasher.

use traits::{Digest, KeyLengthError, Xof as _};

use crate::chunk::ChunkState;
use crate::dispatch;
use crate::kernels::Kernel;
use crate::output::{OutputNode, XofReader};
use crate::tree::TreeStack;
use crate::words::words8_from_le;
use crate::{CHUNK_LEN, DERIVE_KEY_CONTEXT, DERIVE_KEY_MATERIAL, IV, KEY_LEN, KEYED_HASH, OUT_LEN};

/// An incremental BLAKE3 hasher.
///
/// The three modes (plain, keyed, derive-key) differ only in the initial key
/// words and the base flag byte; everything after construction is shared.
/// `finalize` and `finalize_xof` borrow the hasher immutably, so a hasher can
/// be finalized at any point and updated further afterwards.
///
/// # Example
///
/// ```
/// use b3::{Blake3, Digest as _};
///
/// let mut hasher = Blake3::new();
/// hasher.update(b"hello ");
/// hasher.update(b"world");
/// assert_eq!(hasher.finalize(), Blake3::digest(b"hello world"));
/// ```
#[derive(Clone, Debug)]
pub struct Blake3 {
  key: [u32; 8],
  chunk: ChunkState,
  tree: TreeStack,
  flags: u32,
  kernel: Kernel,
}

impl Blake3 {
  fn with_key_words(key: [u32; 8], flags: u32) -> Self {
    let kernel = dispatch::active_kernel();
    Self {
      key,
      chunk: ChunkState::new(key, 0, flags),
      tree: TreeStack::new(),
      flags,
      kernel,
    }
  }

  /// Construct a hasher for the keyed hash function (MAC).
  #[inline]
  #[must_use]
  pub fn new_keyed(key: &[u8; KEY_LEN]) -> Self {
    Self::with_key_words(words8_from_le(key), KEYED_HASH)
  }

  /// Construct a keyed hasher from a slice of unknown length.
  ///
  /// # Errors
  ///
  /// Returns [`KeyLengthError`] unless `key` is exactly 32 bytes.
  #[inline]
  pub fn new_keyed_from_slice(key: &[u8]) -> Result<Self, KeyLengthError> {
    match key.try_into() {
      Ok(key) => Ok(Self::new_keyed(key)),
      Err(_) => Err(KeyLengthError::new(key.len())),
    }
  }

  /// Construct a hasher for the key derivation function.
  ///
  /// The context string should be hardcoded, globally unique, and
  /// application-specific.
  #[must_use]
  pub fn new_derive_key(context: &str) -> Self {
    let context_key = Self::digest_words(IV, DERIVE_KEY_CONTEXT, context.as_bytes());
    Self::with_key_words(context_key, DERIVE_KEY_MATERIAL)
  }

  /// Hash `data` in one shot.
  #[inline]
  #[must_use]
  pub fn digest(data: &[u8]) -> [u8; OUT_LEN] {
    <Self as Digest>::digest(data)
  }

  /// Hash `data` and fill `out` with extended output of any length.
  ///
  /// The first 32 bytes always equal [`Blake3::digest`] of the same data.
  #[inline]
  pub fn digest_into(data: &[u8], out: &mut [u8]) {
    Self::xof(data).squeeze(out);
  }

  /// Hash `data` in one shot, returning an extendable-output reader.
  #[inline]
  #[must_use]
  pub fn xof(data: &[u8]) -> XofReader {
    let mut h = Self::new();
    h.update_inner(data);
    h.finalize_xof()
  }

  /// Compute the keyed hash of `data` in one shot.
  #[inline]
  #[must_use]
  pub fn keyed_digest(key: &[u8; KEY_LEN], data: &[u8]) -> [u8; OUT_LEN] {
    let mut h = Self::new_keyed(key);
    h.update_inner(data);
    h.finalize()
  }

  /// Compute the keyed XOF of `data` in one shot.
  #[inline]
  #[must_use]
  pub fn keyed_xof(key: &[u8; KEY_LEN], data: &[u8]) -> XofReader {
    let mut h = Self::new_keyed(key);
    h.update_inner(data);
    h.finalize_xof()
  }

  /// Derive a 32-byte key for `context` from `key_material`, in one shot.
  #[inline]
  #[must_use]
  pub fn derive_key(context: &str, key_material: &[u8]) -> [u8; OUT_LEN] {
    let mut h = Self::new_derive_key(context);
    h.update_inner(key_material);
    h.finalize()
  }

  /// Derive key material of any length for `context`.
  #[inline]
  pub fn derive_key_into(context: &str, key_material: &[u8], out: &mut [u8]) {
    let mut h = Self::new_derive_key(context);
    h.update_inner(key_material);
    h.finalize_xof().squeeze(out);
  }

  /// Finalize into an extendable-output reader.
  ///
  /// Does not consume the hasher; further updates remain possible.
  #[inline]
  #[must_use]
  pub fn finalize_xof(&self) -> XofReader {
    XofReader::new(self.root_node(), self.kernel)
  }

  /// Swap the kernel; test glue.
  #[cfg(test)]
  pub(crate) fn force_kernel(&mut self, kernel: Kernel) {
    self.kernel = kernel;
  }

  fn digest_words(key: [u32; 8], flags: u32, input: &[u8]) -> [u32; 8] {
    let mut h = Self::with_key_words(key, flags);
    h.update_inner(input);
    h.root_node().root_hash_words(&h.kernel)
  }

  fn root_node(&self) -> OutputNode {
    self.tree.fold_root(&self.kernel, self.chunk.output(), &self.key, self.flags)
  }

  fn update_inner(&mut self, mut input: &[u8]) {
    while !input.is_empty() {
      // A filled chunk is committed only now that more input follows, which
      // proves it is not the terminal chunk; the terminal chunk must stay in
      // `ChunkState` so finalization can make it the root (or right child).
      if self.chunk.len() == CHUNK_LEN {
        let cv = self.chunk.output().chaining_value(&self.kernel);
        self.tree.push_chunk_cv(cv, &self.key, self.flags);
        self.chunk = ChunkState::new(self.key, self.tree.chunks_done(), self.flags);
      }

      // 4-lane fast path: whole groups of four chunks, as long as at least
      // one byte remains after the group. Tree updates are identical to the
      // scalar path; the kernel only batches the leaves.
      if self.chunk.len() == 0 && self.kernel.simd_degree == 4 && input.len() > 4 * CHUNK_LEN {
        while let Some((group, rest)) = input.split_first_chunk::<{ 4 * CHUNK_LEN }>() {
          if rest.is_empty() {
            break;
          }
          let counter = self.tree.chunks_done();
          let cvs = (self.kernel.hash_chunks4)(group, &self.key, counter, self.flags);
          for cv in cvs {
            self.tree.push_chunk_cv(cv, &self.key, self.flags);
          }
          input = rest;
        }
        self.chunk = ChunkState::new(self.key, self.tree.chunks_done(), self.flags);
      }

      let want = CHUNK_LEN - self.chunk.len();
      let take = want.min(input.len());
      self.chunk.update(&self.kernel, &input[..take]);
      input = &input[take..];
    }
  }
}

impl Default for Blake3 {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl Digest for Blake3 {
  const OUTPUT_SIZE: usize = OUT_LEN;
  type Output = [u8; OUT_LEN];

  #[inline]
  fn new() -> Self {
    Self::with_key_words(IV, 0)
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.update_inner(data);
  }

  #[inline]
  fn finalize(&self) -> Self::Output {
    self.root_node().root_hash(&self.kernel)
  }

  #[inline]
  fn reset(&mut self) {
    // The configured mode (key words and base flags) survives a reset.
    *self = Self::with_key_words(self.key, self.flags);
  }
}
