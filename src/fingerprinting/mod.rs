pub(crate) mod analysis_error;
pub(crate) mod analyzer;
pub(crate) mod frame_hash;
pub(crate) mod records;

pub use analysis_error::AnalysisError;
pub use analyzer::{Analyzer, DigestAlgorithm};
pub use frame_hash::FrameHash;
pub use records::{divergence, FingerprintRecord, PerceptualSample};
