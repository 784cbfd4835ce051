// src/uniprot.rs

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::warn;

const MAX_ATTEMPTS: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_BASE_URL: &str = "https://rest.uniprot.org";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

/// Blocking client for the UniProtKB flat-text endpoint. Transient failures
/// (transport errors, 429, 5xx) are retried with doubling backoff.
pub struct UniprotClient {
    client: Client,
    base_url: String,
}

impl UniprotClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("mutation_mapper/0.1")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the flat-text record for a human gene symbol.
    pub fn fetch_record(&self, gene: &str) -> Result<String, FetchError> {
        let url = format!(
            "{}/uniprotkb/stream?query=gene:{}+AND+organism_id:9606&format=txt",
            self.base_url, gene
        );
        self.get_with_retry(&url)
    }

    fn get_with_retry(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0;
        let mut backoff = Duration::from_secs(1);

        loop {
            attempt += 1;
            let response = self.client.get(url).header("Accept", "text/plain").send();

            match response {
                Ok(resp) if resp.status().is_success() => {
                    return resp.text().map_err(|e| FetchError::Transport {
                        url: url.to_string(),
                        source: e,
                    });
                }
                Ok(resp)
                    if attempt < MAX_ATTEMPTS
                        && (resp.status() == StatusCode::TOO_MANY_REQUESTS
                            || resp.status().is_server_error()) =>
                {
                    let wait = resp
                        .headers()
                        .get("Retry-After")
                        .and_then(|h| h.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .map(Duration::from_secs)
                        .unwrap_or(backoff);
                    warn!(
                        "HTTP {} from {}, retrying in {}s (attempt {}/{})",
                        resp.status(),
                        url,
                        wait.as_secs(),
                        attempt,
                        MAX_ATTEMPTS
                    );
                    thread::sleep(wait);
                    backoff *= 2;
                }
                Ok(resp) => {
                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status: resp.status(),
                    });
                }
                Err(e) if attempt < MAX_ATTEMPTS => {
                    warn!(
                        "Request to {} failed ({}), retrying in {}s (attempt {}/{})",
                        url,
                        e,
                        backoff.as_secs(),
                        attempt,
                        MAX_ATTEMPTS
                    );
                    thread::sleep(backoff);
                    backoff *= 2;
                }
                Err(e) => {
                    return Err(FetchError::Transport {
                        url: url.to_string(),
                        source: e,
                    });
                }
            }
        }
    }
}
