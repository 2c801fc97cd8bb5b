use std::{fs::File, path::Path, time::Duration};

use crate::job_runner::collaborators::{FetchError, InputFetcher};

const FETCH_TIMEOUT_SECS: u64 = 300;

/// Fetches input bytes over HTTP(S) with a blocking GET, streaming the
/// response body to the destination file. The client is built per fetch;
/// a job fetches exactly once.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher;

impl HttpFetcher {
    pub fn new() -> Self {
        Self
    }
}

impl InputFetcher for HttpFetcher {
    fn fetch(&self, locator: &str, dest: &Path) -> Result<(), FetchError> {
        let fetch_err = |message: String| FetchError {
            locator: locator.to_string(),
            message,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| fetch_err(e.to_string()))?;

        let mut response = client
            .get(locator)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| fetch_err(e.to_string()))?;

        let mut file = File::create(dest).map_err(|e| fetch_err(e.to_string()))?;
        response
            .copy_to(&mut file)
            .map_err(|e| fetch_err(e.to_string()))?;

        Ok(())
    }
}
