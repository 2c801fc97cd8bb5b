use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use md5::Digest;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    definitions::*,
    fingerprinting::{
        analysis_error::AnalysisError,
        frame_hash::FrameHash,
        records::{FingerprintRecord, PerceptualSample},
    },
};

/// The digest used for exact (byte-level) content hashing.
///
/// Md5 is the historical default for artifact identity; Blake3 is the
/// faster, longer alternative for new deployments.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    #[default]
    Md5,
    Blake3,
}

/// Computes fingerprints of media files: an exact content hash, and a
/// temporally-sampled perceptual hash sequence.
///
/// ```no_run
/// use vid_uniquify_lib::Analyzer;
///
/// let analyzer = Analyzer::default();
/// let before = analyzer.fingerprint("original.mp4".as_ref()).unwrap();
/// let after = analyzer.fingerprint("processed.mp4".as_ref()).unwrap();
/// let score = vid_uniquify_lib::divergence(&before.samples, &after.samples);
/// println!("divergence: {score}");
/// ```
#[derive(Clone, Debug)]
pub struct Analyzer {
    digest: DigestAlgorithm,
    sample_interval_secs: u32,
    frame_edge: u32,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            digest: DigestAlgorithm::default(),
            sample_interval_secs: DEFAULT_SAMPLE_INTERVAL_SECS,
            frame_edge: DEFAULT_FRAME_EDGE,
        }
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn digest(mut self, digest: DigestAlgorithm) -> Self {
        self.digest = digest;
        self
    }

    /// Spacing of perceptual samples in seconds. Values below 1 are clamped to 1.
    pub fn sample_interval_secs(mut self, interval: u32) -> Self {
        self.sample_interval_secs = interval.max(1);
        self
    }

    /// Edge length of the square each sampled frame is downscaled to before
    /// hashing.
    pub fn frame_edge(mut self, edge: u32) -> Self {
        self.frame_edge = edge;
        self
    }

    /// Stream the file through the configured digest and return the
    /// hex-encoded result. The file is read in fixed-size chunks and is
    /// never loaded into memory whole, so arbitrarily large inputs are fine.
    pub fn exact_hash(&self, src_path: &Path) -> Result<String, AnalysisError> {
        let io_err = |e: std::io::Error| AnalysisError::Io {
            src_path: src_path.to_path_buf(),
            error: e.to_string(),
        };

        let file = File::open(src_path).map_err(io_err)?;
        let reader = BufReader::new(file);

        let hex = match self.digest {
            DigestAlgorithm::Md5 => {
                let mut hasher = md5::Md5::new();
                stream_chunks(reader, |bytes| hasher.update(bytes)).map_err(io_err)?;
                hasher
                    .finalize()
                    .iter()
                    .map(|byte| format!("{byte:02x}"))
                    .collect()
            }
            DigestAlgorithm::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                stream_chunks(reader, |bytes| {
                    hasher.update(bytes);
                })
                .map_err(io_err)?;
                hasher.finalize().to_hex().to_string()
            }
        };

        Ok(hex)
    }

    /// Probe the file for its duration, then hash one decoded frame per
    /// sample interval over `[0, duration)`.
    ///
    /// Samples are extracted in parallel (they are independent) and returned
    /// ordered by timestamp. A frame that fails to extract is logged and
    /// skipped, so the returned sequence may be shorter than the timestamp
    /// grid; callers must not assume a fixed length.
    pub fn perceptual_samples(
        &self,
        src_path: &Path,
    ) -> Result<Vec<PerceptualSample>, AnalysisError> {
        let info =
            ffmpeg_render_utils::VideoInfo::new(src_path).map_err(|error| AnalysisError::Probe {
                src_path: src_path.to_path_buf(),
                error,
            })?;

        let duration_secs = info.duration().as_secs_f64();
        let timestamps = (0..duration_secs as u64)
            .step_by(self.sample_interval_secs as usize)
            .map(|t| t as u32)
            .collect::<Vec<_>>();

        let mut samples = timestamps
            .par_iter()
            .filter_map(|&timestamp_secs| {
                match ffmpeg_render_utils::extract_frame_gray(
                    src_path,
                    timestamp_secs,
                    self.frame_edge,
                ) {
                    Ok(frame) => Some(PerceptualSample {
                        timestamp_secs,
                        digest: FrameHash::from_gray_frame(&frame),
                    }),
                    Err(error) => {
                        log::warn!(
                            "skipping perceptual sample at {timestamp_secs}s for {}: {error}",
                            src_path.display()
                        );
                        None
                    }
                }
            })
            .collect::<Vec<_>>();

        samples.sort_by_key(|sample| sample.timestamp_secs);
        Ok(samples)
    }

    /// Compute the full fingerprint record (exact hash + perceptual samples)
    /// of a media file.
    pub fn fingerprint(&self, src_path: &Path) -> Result<FingerprintRecord, AnalysisError> {
        let content_hash = self.exact_hash(src_path)?;
        let samples = self.perceptual_samples(src_path)?;
        Ok(FingerprintRecord {
            content_hash,
            samples,
        })
    }
}

fn stream_chunks<R: Read>(mut reader: R, mut update: impl FnMut(&[u8])) -> std::io::Result<()> {
    let mut chunk = vec![0u8; EXACT_HASH_CHUNK_SIZE];
    loop {
        let bytes_read = reader.read(&mut chunk)?;
        if bytes_read == 0 {
            return Ok(());
        }
        update(&chunk[..bytes_read]);
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    fn write_temp_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_exact_hash_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_file(&dir, "a.bin", b"the same bytes every time");

        let analyzer = Analyzer::default();
        assert_eq!(
            analyzer.exact_hash(&path).unwrap(),
            analyzer.exact_hash(&path).unwrap()
        );
    }

    #[test]
    fn test_exact_hash_changes_on_single_byte_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let mut contents = vec![0u8; 200_000];
        contents[123_456] = 1;
        let original = write_temp_file(&dir, "orig.bin", &contents);

        contents[123_456] = 2;
        let mutated = write_temp_file(&dir, "mut.bin", &contents);

        for digest in [DigestAlgorithm::Md5, DigestAlgorithm::Blake3] {
            let analyzer = Analyzer::new().digest(digest);
            assert_ne!(
                analyzer.exact_hash(&original).unwrap(),
                analyzer.exact_hash(&mutated).unwrap()
            );
        }
    }

    #[test]
    fn test_exact_hash_known_md5_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_file(&dir, "empty.bin", b"");

        //md5 of the empty input, byte-identical on any filesystem
        assert_eq!(
            Analyzer::default().exact_hash(&path).unwrap(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn test_digest_lengths() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_file(&dir, "b.bin", b"abc");

        let md5_hex = Analyzer::new()
            .digest(DigestAlgorithm::Md5)
            .exact_hash(&path)
            .unwrap();
        assert_eq!(md5_hex.len(), 32);

        let blake3_hex = Analyzer::new()
            .digest(DigestAlgorithm::Blake3)
            .exact_hash(&path)
            .unwrap();
        assert_eq!(blake3_hex.len(), 64);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let analyzer = Analyzer::default();
        let result = analyzer.exact_hash("/no/such/file.mp4".as_ref());
        assert!(matches!(result, Err(AnalysisError::Io { .. })));
    }
}
