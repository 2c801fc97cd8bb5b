//! # Overview
//! vid_uniquify_lib transforms a source video into a copy that a human
//! viewer cannot tell apart from the original, while its byte-level and
//! content-fingerprint identity changes — and then measures how far the
//! copy actually drifted.
//!
//! # How it works
//! A [`Pipeline`] folds a profile of [`TransformStep`]s over an ffmpeg
//! filter graph:
//! * Metadata mutation (strip inherited tags, write a synthetic comment)
//! * Color modulation (imperceptible brightness/contrast/saturation/gamma jitter)
//! * Noise injection (temporal luma+chroma noise)
//! * Geometric transform (a 2-4 pixel symmetric edge crop)
//!
//! and issues a single render invocation into a job-exclusive scratch
//! directory. An [`Analyzer`] then fingerprints both files: an exact
//! content hash (streamed md5 by default) plus a perceptual hash of one
//! frame per second (the [discrete cosine transform](http://hackerfactor.com/blog/index.php%3F/archives/432-Looks-Like-It.html)
//! fingerprint of each sampled frame). [`divergence`] reports the mean
//! hamming distance between the two sample sequences.
//!
//! # High level API
//! [`JobRunner`] drives the whole flow for one job: fetch the input, build
//! a [`ProcessingContext`], run the pipeline, fingerprint before and after,
//! publish the artifact, and report each state transition to a
//! [`JobLedger`].
//!
//! ```rust,no_run
//! use vid_uniquify_lib::*;
//!
//! struct PrintLedger;
//! impl JobLedger for PrintLedger {
//!     fn mark_processing(&mut self, job_id: &str) { println!("{job_id}: processing"); }
//!     fn mark_completed(&mut self, job_id: &str, record: &CompletionRecord) {
//!         println!("{job_id}: divergence {}", record.divergence);
//!     }
//!     fn mark_failed(&mut self, job_id: &str, cause: &str) { println!("{job_id}: {cause}"); }
//! }
//!
//! # struct NullStore;
//! # impl ArtifactStore for NullStore {
//! #     fn publish(&self, _: &std::path::Path, _: &str) -> Result<Option<String>, PublishError> { Ok(None) }
//! # }
//! let runner = JobRunner::new(HttpFetcher::new(), NullStore, "/tmp/video_processing");
//! let report = runner.run("job-1", "https://example.com/source.mp4", &mut PrintLedger);
//! assert!(report.status.is_terminal());
//! ```
//!
//! # Reproducibility
//! Every step draws its random parameters through the context's explicit
//! RNG handle. [`ProcessingContext::with_seed`] makes two runs of the same
//! profile choose identical parameters, which the tests rely on.
//!
//! # Prerequisites
//! This crate calls Ffmpeg from the command line. You must make Ffmpeg and
//! Ffprobe available on the command line, for example:
//!
//! * Debian-based systems: ```# apt-get install ffmpeg```
//! * Yum-based systems: ```# yum install ffmpeg```
//! * Windows:
//!     1) Download the correct installer from <https://ffmpeg.org/download.html>
//!     2) Run the installer and install ffmpeg to any directory
//!     3) Add the directory into the PATH environment variable

pub(crate) mod definitions;
pub(crate) mod fingerprinting;
pub(crate) mod job_runner;
pub(crate) mod processing;
pub(crate) mod utils;

pub use fingerprinting::{
    divergence, AnalysisError, Analyzer, DigestAlgorithm, FingerprintRecord, FrameHash,
    PerceptualSample,
};
pub use job_runner::{
    ArtifactStore, CompletionRecord, FetchError, HttpFetcher, InputFetcher, JobError, JobLedger,
    JobReport, JobRunner, JobStatus, PublishError,
};
pub use processing::{
    default_profile, FilterGraph, FilterNode, Pipeline, PipelineError, ProcessingContext,
    RenderOptions, ScratchDir, TransformStep,
};

pub use ffmpeg_render_utils::{ffmpeg_and_ffprobe_are_callable, FfmpegError, VideoInfo};
