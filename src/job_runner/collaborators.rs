use std::path::Path;

use thiserror::Error;

use crate::job_runner::runner::CompletionRecord;

/// The input could not be fetched (unreachable host, non-2xx response, or
/// a local write failure while staging the bytes).
#[derive(Error, Debug, Clone)]
#[error("failed to fetch {locator}: {message}")]
pub struct FetchError {
    pub locator: String,
    pub message: String,
}

/// The output artifact could not be stored.
#[derive(Error, Debug, Clone)]
#[error("failed to publish {key}: {message}")]
pub struct PublishError {
    pub key: String,
    pub message: String,
}

/// Supplies input bytes: given a locator, produce a local readable file at
/// `dest`.
pub trait InputFetcher {
    fn fetch(&self, locator: &str, dest: &Path) -> Result<(), FetchError>;
}

/// Receives output bytes: store the local file under a job-scoped key and
/// optionally return an access locator for it.
pub trait ArtifactStore {
    fn publish(&self, local_path: &Path, key: &str) -> Result<Option<String>, PublishError>;
}

/// The external persistence layer's view of a job's lifecycle.
///
/// The runner calls `mark_processing` exactly once before any I/O, then
/// exactly one of `mark_completed` (with the full outcome record) or
/// `mark_failed` (with a human-readable cause, verbatim from the
/// triggering error).
pub trait JobLedger {
    fn mark_processing(&mut self, job_id: &str);
    fn mark_completed(&mut self, job_id: &str, record: &CompletionRecord);
    fn mark_failed(&mut self, job_id: &str, cause: &str);
}
