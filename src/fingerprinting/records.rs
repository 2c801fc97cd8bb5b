use serde::{Deserialize, Serialize};

use crate::fingerprinting::frame_hash::FrameHash;

/// One perceptual sample of a media file: the hash of the frame decoded at
/// `timestamp_secs`.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct PerceptualSample {
    pub timestamp_secs: u32,
    pub digest: FrameHash,
}

/// The fingerprint of one media artifact: an exact content hash plus an
/// ordered sequence of perceptual samples. Computed once per artifact and
/// never mutated afterwards.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct FingerprintRecord {
    pub content_hash: String,
    pub samples: Vec<PerceptualSample>,
}

/// The mean hamming distance between two perceptual-sample sequences,
/// aligned by position (not by timestamp) up to the shorter length.
///
/// Returns 0.0 when either sequence is empty. This is a deliberate
/// degenerate default, not an error: a score of 0.0 can mean "no data"
/// rather than "no divergence", so callers should check sample counts
/// before trusting it.
pub fn divergence(a: &[PerceptualSample], b: &[PerceptualSample]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let aligned_len = a.len().min(b.len());
    let total_distance: u32 = a
        .iter()
        .zip(b.iter())
        .take(aligned_len)
        .map(|(sample_a, sample_b)| sample_a.digest.distance(&sample_b.digest))
        .sum();

    total_distance as f64 / aligned_len as f64
}
