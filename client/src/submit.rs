//! Submission client
//!
//! Posts a [`SubmissionDocument`] to `{base_url}/survey-sql` and hands back
//! the SQL the service generated. No retries are attempted.

use std::time::Duration;
use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use thiserror::Error;

use survey_payload_core::config::EndpointConfig;
use survey_payload_core::{CoreError, EntityStore, PayloadTransformer, SubmissionDocument, TransformConfig};

/// Path of the SQL generation endpoint
pub const SURVEY_SQL_PATH: &str = "/survey-sql";

/// Error type for submission
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Server error {status}: {body}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot could not be transformed
    #[error("Transform error: {0}")]
    Transform(#[from] CoreError),
}

/// Result type for submission
pub type Result<T> = std::result::Result<T, SubmitError>;

/// Client for the SQL generation service
#[derive(Debug, Clone)]
pub struct SqlClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl SqlClient {
    /// Create a new client
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Create a client from endpoint configuration
    pub fn from_config(config: &EndpointConfig) -> Self {
        let mut client = Self::new(&config.base_url);
        client.set_timeout(Duration::from_secs(config.timeout_secs));
        client
    }

    /// Set the timeout for requests
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Post a document and return the generated SQL
    pub async fn post_survey(&self, document: &SubmissionDocument) -> Result<String> {
        let url = format!("{}{}", self.base_url, SURVEY_SQL_PATH);
        let body = serde_json::to_vec(document)?;
        debug!("POST {} ({} bytes)", url, body.len());

        let response = self.client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.timeout)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(SubmitError::Server { status: status.as_u16(), body: text });
        }

        info!("SQL generation service returned {} bytes", text.len());
        Ok(text)
    }
}

/// Snapshot the store, transform it and post the result
pub async fn submit_store(store: &EntityStore, config: &TransformConfig) -> Result<String> {
    let snapshot = store.snapshot(&config.db_name);
    let document = PayloadTransformer::from_config(config).transform(&snapshot)?;
    SqlClient::from_config(&config.endpoint).post_survey(&document).await
}
