use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use rand::{rngs::StdRng, SeedableRng};

use crate::processing::render_options::RenderOptions;

/// A job-exclusive, disposable working directory.
///
/// The directory (and any missing parents) is created on construction and
/// removed best-effort when the guard is dropped — on success, on failure,
/// and during unwinding alike. The path is chosen by the caller rather than
/// randomized, so a redelivered job recreates and overwrites the same
/// location instead of accumulating copies.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn create(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        std::fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Err(error) = std::fs::remove_dir_all(&self.path) {
            log::warn!(
                "failed to remove scratch dir {}: {error}",
                self.path.display()
            );
        }
    }
}

/// Mutable state threaded through one pipeline run.
///
/// Each run exclusively owns its context: the source path, the scratch
/// space, the accumulated [`RenderOptions`], a side-metadata channel for
/// steps to record their chosen parameters (never read by the renderer),
/// and the random source all steps draw from.
#[derive(Debug)]
pub struct ProcessingContext {
    source_path: PathBuf,
    scratch: ScratchDir,
    pub render_options: RenderOptions,
    pub side_metadata: BTreeMap<String, String>,
    rng: StdRng,
}

impl ProcessingContext {
    /// A context drawing fresh randomness per run.
    pub fn new(source_path: impl Into<PathBuf>, scratch: ScratchDir) -> Self {
        Self::with_rng(source_path, scratch, StdRng::from_entropy())
    }

    /// A context with seeded randomness. Two runs of the same profile over
    /// the same seed choose identical step parameters.
    pub fn with_seed(source_path: impl Into<PathBuf>, scratch: ScratchDir, seed: u64) -> Self {
        Self::with_rng(source_path, scratch, StdRng::seed_from_u64(seed))
    }

    fn with_rng(source_path: impl Into<PathBuf>, scratch: ScratchDir, rng: StdRng) -> Self {
        Self {
            source_path: source_path.into(),
            scratch,
            render_options: RenderOptions::default(),
            side_metadata: BTreeMap::new(),
            rng,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn scratch_path(&self) -> &Path {
        self.scratch.path()
    }

    /// The run's random source. Steps must draw through this handle rather
    /// than any ambient generator, so seeded runs stay reproducible.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Record a free-form annotation for later inspection.
    pub fn note(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.side_metadata.insert(key.into(), value.into());
    }
}
