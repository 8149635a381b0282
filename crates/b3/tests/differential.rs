//! Differential tests against the official `blake3` crate.

use b3::{Blake3, Digest as _, Xof as _};
use proptest::prelude::*;

proptest! {
  #[test]
  fn one_shot_matches_official(data in proptest::collection::vec(any::<u8>(), 0..10_240)) {
    prop_assert_eq!(Blake3::digest(&data), *blake3::hash(&data).as_bytes());
  }

  #[test]
  fn streaming_matches_official(data in proptest::collection::vec(any::<u8>(), 0..10_240)) {
    let expected = *blake3::hash(&data).as_bytes();

    // Derive the split sizes from the data itself so the cases are
    // reproducible from the failing seed alone.
    let mut h = Blake3::new();
    let mut i = 0usize;
    while i < data.len() {
      let step = (data[i] as usize % 997) + 1;
      let end = data.len().min(i + step);
      h.update(&data[i..end]);
      i = end;
    }

    prop_assert_eq!(h.finalize(), expected);
  }

  #[test]
  fn xof_matches_official(
    data in proptest::collection::vec(any::<u8>(), 0..10_240),
    out_len in 0usize..2048,
    split in 0usize..2048,
  ) {
    let mut expected = vec![0u8; out_len];
    let mut reference = blake3::Hasher::new();
    reference.update(&data);
    reference.finalize_xof().fill(&mut expected);

    let split = split.min(out_len);
    let mut actual = vec![0u8; out_len];
    let mut reader = Blake3::xof(&data);
    reader.squeeze(&mut actual[..split]);
    reader.squeeze(&mut actual[split..]);

    prop_assert_eq!(actual, expected);
  }

  #[test]
  fn keyed_matches_official(
    data in proptest::collection::vec(any::<u8>(), 0..10_240),
    key in any::<[u8; 32]>(),
  ) {
    prop_assert_eq!(
      Blake3::keyed_digest(&key, &data),
      *blake3::keyed_hash(&key, &data).as_bytes()
    );
  }

  #[test]
  fn derive_key_matches_official(data in proptest::collection::vec(any::<u8>(), 0..10_240)) {
    const CONTEXT: &str = "b3 2026-08-02 differential test context";

    prop_assert_eq!(
      Blake3::derive_key(CONTEXT, &data),
      blake3::derive_key(CONTEXT, &data)
    );
  }
}

// Chunk-group boundaries around the 4-lane fast path deserve exact,
// non-randomized coverage.
#[test]
fn simd_group_boundaries_match_official() {
  let data: Vec<u8> = (0..64 * 1024 + 7).map(|i| (i % 251) as u8).collect();

  for len in [
    4 * 1024 - 1,
    4 * 1024,
    4 * 1024 + 1,
    8 * 1024,
    8 * 1024 + 1,
    12 * 1024 - 1,
    16 * 1024,
    64 * 1024 + 7,
  ] {
    let input = &data[..len];
    assert_eq!(Blake3::digest(input), *blake3::hash(input).as_bytes(), "len={len}");
  }
}
