//! HTTP client for the Sidewalk web server (survey and mission endpoints)

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

use crate::infrastructure::ports::{
    MissionCompletion, MissionPersistencePort, RemoteError, SurveyEligibility, SurveyPort,
};

/// Default Sidewalk server base URL.
pub const DEFAULT_SIDEWALK_BASE_URL: &str = "http://localhost:9000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client for the survey eligibility and mission completion endpoints
#[derive(Clone)]
pub struct SidewalkApiClient {
    client: Client,
    base_url: String,
}

impl SidewalkApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for SidewalkApiClient {
    fn default() -> Self {
        Self::new(
            DEFAULT_SIDEWALK_BASE_URL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }
}

/// Turn a non-success status into `RemoteError::Status`, keeping the body for logs.
async fn ensure_success(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .map_err(RemoteError::request_failed)?;
    Err(RemoteError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl SurveyPort for SidewalkApiClient {
    async fn check_eligibility(&self) -> Result<SurveyEligibility, RemoteError> {
        let response = self
            .client
            .get(self.url("/survey/display"))
            .send()
            .await
            .map_err(RemoteError::request_failed)?;

        ensure_success(response)
            .await?
            .json::<SurveyEligibility>()
            .await
            .map_err(RemoteError::invalid_response)
    }
}

#[async_trait]
impl MissionPersistencePort for SidewalkApiClient {
    async fn complete_mission(&self, completion: &MissionCompletion) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(self.url("/mission/complete"))
            .json(completion)
            .send()
            .await
            .map_err(RemoteError::request_failed)?;

        ensure_success(response).await?;
        Ok(())
    }
}
