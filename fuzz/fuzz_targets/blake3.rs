#![no_main]

use b3::Blake3;
use libfuzzer_sys::fuzz_target;
use traits::{Digest as _, Xof as _};

fuzz_target!(|data: &[u8]| {
  // Hash mode, one-shot and streamed.
  let expected = *blake3::hash(data).as_bytes();
  assert_eq!(Blake3::digest(data), expected);

  {
    let mut h = Blake3::new();
    let step = (data.first().copied().unwrap_or(0) as usize) + 1;
    for part in data.chunks(step) {
      h.update(part);
    }
    assert_eq!(h.finalize(), expected);
  }

  // Keyed mode, with the key drawn from the input.
  {
    let mut key = [0u8; 32];
    let take = data.len().min(32);
    key[..take].copy_from_slice(&data[..take]);

    let ours = Blake3::keyed_digest(&key, data);
    assert_eq!(ours, *blake3::keyed_hash(&key, data).as_bytes());
  }

  // Derive-key mode; force the context to ASCII so it is valid UTF-8.
  {
    let ctx_len = (data.len() % 65).min(data.len());
    let context: String = data[..ctx_len].iter().map(|&b| (b'a' + (b % 26)) as char).collect();

    let ours = Blake3::derive_key(&context, data);
    assert_eq!(ours, blake3::derive_key(&context, data));
  }

  // XOF with a data-derived length and split point.
  {
    let out_len = (data.len().wrapping_mul(31) % 2049) + 1;
    let split = data.last().copied().unwrap_or(0) as usize % out_len;

    let mut ours = vec![0u8; out_len];
    let mut reader = Blake3::xof(data);
    reader.squeeze(&mut ours[..split]);
    reader.squeeze(&mut ours[split..]);

    let mut expected = vec![0u8; out_len];
    let mut h = blake3::Hasher::new();
    h.update(data);
    h.finalize_xof().fill(&mut expected);

    assert_eq!(ours, expected);
  }
});
