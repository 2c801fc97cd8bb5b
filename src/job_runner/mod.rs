pub(crate) mod collaborators;
pub(crate) mod http_fetch;
pub(crate) mod runner;
pub(crate) mod status;

pub use collaborators::{ArtifactStore, FetchError, InputFetcher, JobLedger, PublishError};
pub use http_fetch::HttpFetcher;
pub use runner::{CompletionRecord, JobError, JobReport, JobRunner};
pub use status::JobStatus;
