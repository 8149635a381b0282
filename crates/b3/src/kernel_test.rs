//! Forced-kernel equivalence harness.
//!
//! Every kernel this build knows about must produce byte-identical output
//! for every input. The helpers here pin a hasher to a specific kernel so
//! tests can exercise kernels the dispatcher would skip.

extern crate alloc;

use alloc::vec::Vec;

use traits::Digest as _;

use crate::Blake3;
use crate::kernels::{ALL, KernelId, kernel, required_caps};

#[derive(Clone, Debug)]
pub(crate) struct KernelDigest {
  pub(crate) name: &'static str,
  pub(crate) digest: [u8; 32],
}

pub(crate) fn hasher_with_kernel(id: KernelId) -> Blake3 {
  let mut h = Blake3::new();
  h.force_kernel(kernel(id));
  h
}

pub(crate) fn digest_with_kernel(id: KernelId, data: &[u8]) -> [u8; 32] {
  let mut h = hasher_with_kernel(id);
  h.update(data);
  h.finalize()
}

fn available() -> impl Iterator<Item = KernelId> {
  let caps = platform::caps();
  ALL
    .iter()
    .copied()
    .filter(move |&id| !required_caps(id).simd128 || caps.simd128)
}

/// Digest `data` once per available kernel.
pub(crate) fn run_all_kernels(data: &[u8]) -> Vec<KernelDigest> {
  available()
    .map(|id| KernelDigest {
      name: id.as_str(),
      digest: digest_with_kernel(id, data),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use alloc::vec;

  use traits::Xof as _;

  use super::*;

  const KEY: &[u8; 32] = b"whats the Elvish word for friend";
  const CONTEXT: &str = "BLAKE3 2019-12-27 16:29:52 test vectors context";

  fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
  }

  #[test]
  fn kernels_agree_across_lengths_and_splits() {
    let lens = [
      0usize, 1, 2, 63, 64, 65, 1023, 1024, 1025, 2048, 4096, 4097, 5 * 1024 + 17, 16 * 1024, 100 * 1024,
    ];

    for &len in &lens {
      let msg = pattern(len);
      let expected = digest_with_kernel(KernelId::Portable, &msg);
      assert_eq!(expected, *blake3::hash(&msg).as_bytes(), "portable len={len}");

      for id in super::available() {
        assert_eq!(
          digest_with_kernel(id, &msg),
          expected,
          "kernel={} len={len}",
          id.as_str()
        );

        for &step in &[1usize, 31, 64, 1000, 4096, 8192] {
          let mut h = hasher_with_kernel(id);
          for part in msg.chunks(step) {
            h.update(part);
          }
          assert_eq!(h.finalize(), expected, "kernel={} len={len} step={step}", id.as_str());
        }
      }
    }
  }

  #[test]
  fn keyed_and_derive_modes_agree() {
    let msg = pattern(31 * 1024 + 9);

    for id in super::available() {
      let mut keyed = Blake3::new_keyed(KEY);
      keyed.force_kernel(kernel(id));
      keyed.update(&msg);
      assert_eq!(
        keyed.finalize(),
        *blake3::keyed_hash(KEY, &msg).as_bytes(),
        "keyed kernel={}",
        id.as_str()
      );

      let mut derive = Blake3::new_derive_key(CONTEXT);
      derive.force_kernel(kernel(id));
      derive.update(&msg);
      let expected = {
        let mut h = blake3::Hasher::new_derive_key(CONTEXT);
        h.update(&msg);
        *h.finalize().as_bytes()
      };
      assert_eq!(derive.finalize(), expected, "derive kernel={}", id.as_str());
    }
  }

  #[test]
  fn xof_output_agrees() {
    let msg = pattern(10_240);

    let mut expected = vec![0u8; 1031];
    {
      let mut h = blake3::Hasher::new();
      h.update(&msg);
      h.finalize_xof().fill(&mut expected);
    }

    for id in super::available() {
      let mut h = hasher_with_kernel(id);
      h.update(&msg);
      let mut out = vec![0u8; 1031];
      h.finalize_xof().squeeze(&mut out);
      assert_eq!(out, expected, "xof kernel={}", id.as_str());
    }
  }

  #[test]
  fn run_all_report_is_consistent() {
    let results = run_all_kernels(&pattern(8192));
    let Some(first) = results.first() else {
      panic!("no kernels available");
    };
    for r in &results {
      assert_eq!(r.digest, first.digest, "kernel {} disagrees with {}", r.name, first.name);
    }
  }
}
