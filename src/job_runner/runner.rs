use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    definitions::INPUT_STAGING_NAME,
    fingerprinting::{
        analysis_error::AnalysisError,
        analyzer::Analyzer,
        records::{divergence, PerceptualSample},
    },
    job_runner::{
        collaborators::{ArtifactStore, FetchError, InputFetcher, JobLedger, PublishError},
        status::JobStatus,
    },
    processing::{context::ProcessingContext, pipeline::Pipeline, pipeline_error::PipelineError},
};

/// Everything handed to the persistence layer when a job completes: both
/// fingerprints, the divergence score, and where the artifact was published.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub content_hash_in: String,
    pub content_hash_out: String,
    pub samples_in: Vec<PerceptualSample>,
    pub samples_out: Vec<PerceptualSample>,
    pub divergence: f64,
    pub output_key: String,
    pub output_locator: Option<String>,
}

/// Any of the failures that drive a job to the Failed state.
#[derive(Error, Debug)]
pub enum JobError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("failed to create scratch dir {path}: {error}")]
    Scratch { path: PathBuf, error: String },
}

/// The terminal outcome of one job invocation.
#[derive(Clone, Debug)]
pub struct JobReport {
    pub job_id: String,
    pub status: JobStatus,
    pub record: Option<CompletionRecord>,
    pub failure: Option<String>,
}

/// Drives one job to a terminal state: fetch input → fingerprint → run the
/// pipeline → fingerprint output → compute divergence → publish → record.
///
/// The runner imposes no concurrency control of its own; each invocation is
/// an independent unit of work and the broker's pool bounds parallelism.
/// Once processing begins the runner always reaches a terminal state — no
/// cancellation, no internal retries. The per-job scratch directory
/// (`<scratch_root>/<job_id>`) is removed on every exit path, including
/// unwinding, by its RAII guard.
pub struct JobRunner<F, S> {
    fetcher: F,
    store: S,
    analyzer: Analyzer,
    pipeline: Pipeline,
    scratch_root: PathBuf,
}

impl<F, S> JobRunner<F, S>
where
    F: InputFetcher,
    S: ArtifactStore,
{
    pub fn new(fetcher: F, store: S, scratch_root: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            store,
            analyzer: Analyzer::default(),
            pipeline: Pipeline::with_default_profile(),
            scratch_root: scratch_root.into(),
        }
    }

    pub fn analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Run one job to a terminal state, reporting each transition to the
    /// ledger. Processing is entered immediately, before any I/O. On
    /// failure the triggering error's message is recorded verbatim.
    pub fn run(&self, job_id: &str, source_locator: &str, ledger: &mut dyn JobLedger) -> JobReport {
        ledger.mark_processing(job_id);
        log::info!("job {job_id}: processing {source_locator}");

        match self.run_to_completion(job_id, source_locator) {
            Ok(record) => {
                log::info!(
                    "job {job_id}: completed, divergence {:.2}, published as {}",
                    record.divergence,
                    record.output_key
                );
                ledger.mark_completed(job_id, &record);
                JobReport {
                    job_id: job_id.to_string(),
                    status: JobStatus::Completed,
                    record: Some(record),
                    failure: None,
                }
            }
            Err(error) => {
                let cause = error.to_string();
                log::error!("job {job_id}: failed: {cause}");
                ledger.mark_failed(job_id, &cause);
                JobReport {
                    job_id: job_id.to_string(),
                    status: JobStatus::Failed,
                    record: None,
                    failure: Some(cause),
                }
            }
        }
    }

    fn run_to_completion(
        &self,
        job_id: &str,
        source_locator: &str,
    ) -> Result<CompletionRecord, JobError> {
        use crate::processing::context::ScratchDir;

        let scratch_path = self.scratch_root.join(job_id);
        let scratch = ScratchDir::create(&scratch_path).map_err(|e| JobError::Scratch {
            path: scratch_path,
            error: e.to_string(),
        })?;

        let input_path = scratch.path().join(INPUT_STAGING_NAME);
        self.fetcher.fetch(source_locator, &input_path)?;

        let fingerprint_in = self.analyzer.fingerprint(&input_path)?;

        //the context takes ownership of the scratch guard, so teardown
        //happens when this function exits, whatever the path out
        let mut ctx = ProcessingContext::new(&input_path, scratch);
        let output_path = self.pipeline.run(&mut ctx)?;

        let fingerprint_out = self.analyzer.fingerprint(&output_path)?;
        let score = divergence(&fingerprint_in.samples, &fingerprint_out.samples);

        let output_name = output_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output_key = format!("processed/{job_id}/{output_name}");

        let output_locator = self.store.publish(&output_path, &output_key)?;

        Ok(CompletionRecord {
            content_hash_in: fingerprint_in.content_hash,
            content_hash_out: fingerprint_out.content_hash,
            samples_in: fingerprint_in.samples,
            samples_out: fingerprint_out.samples,
            divergence: score,
            output_key,
            output_locator,
        })
    }
}


#[cfg(test)]
mod test {
    use super::test_util::*;
    use super::*;

    #[test]
    fn test_fetch_failure_drives_job_to_failed_with_cause() {
        let root = tempfile::tempdir().unwrap();
        let store = RecordingStore::new(root.path().join("store"));
        let runner = JobRunner::new(FailingFetcher, store, root.path().join("scratch"));

        let mut ledger = VecLedger::default();
        let report = runner.run("job-a", "http://nowhere.invalid/in.mp4", &mut ledger);

        assert_eq!(report.status, JobStatus::Failed);
        assert!(report.record.is_none());
        assert!(report.failure.as_deref().unwrap().contains("connection refused"));

        //Processing observed before the terminal state
        assert_eq!(ledger.events.len(), 2);
        assert_eq!(ledger.events[0].1, JobStatus::Processing);
        assert_eq!(ledger.events[1].1, JobStatus::Failed);
        assert!(ledger.events[1].2.as_deref().unwrap().contains("connection refused"));
    }

    #[test]
    fn test_scratch_dir_removed_after_failure() {
        let root = tempfile::tempdir().unwrap();
        let scratch_root = root.path().join("scratch");
        let store = RecordingStore::new(root.path().join("store"));
        let runner = JobRunner::new(FailingFetcher, store, &scratch_root);

        let mut ledger = VecLedger::default();
        runner.run("job-b", "http://nowhere.invalid/in.mp4", &mut ledger);

        assert!(!scratch_root.join("job-b").exists());
    }

    #[test]
    fn test_undecodable_input_fails_before_any_publish() {
        //a fixture of garbage bytes: fetch succeeds, probing cannot
        let root = tempfile::tempdir().unwrap();
        let fixture = root.path().join("garbage.mp4");
        std::fs::write(&fixture, b"this is not a video container").unwrap();

        let store = RecordingStore::new(root.path().join("store"));
        let runner = JobRunner::new(
            FileCopyFetcher { fixture },
            store,
            root.path().join("scratch"),
        );

        let mut ledger = VecLedger::default();
        let report = runner.run("job-c", "http://example.com/garbage.mp4", &mut ledger);

        assert_eq!(report.status, JobStatus::Failed);
        assert_eq!(ledger.events.last().unwrap().1, JobStatus::Failed);

        //nothing reached the store and the scratch dir is gone
        assert!(!root.path().join("store").join("processed").exists());
        assert!(!root.path().join("scratch").join("job-c").exists());
    }

    #[test]
    fn test_terminal_states_are_terminal() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }
}
