//! Survey API client.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use survey_core::{
    CreateEstateRequest, CreateResponse, CreateTreeRequest, DronePlanResponse, ErrorResponse,
    EstateStats,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Client for a survey server.
#[derive(Debug, Clone)]
pub struct SurveyClient {
    base_url: String,
    client: reqwest::Client,
}

impl SurveyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create an estate and return its ID.
    pub async fn create_estate(&self, length: i64, width: i64) -> Result<String> {
        let url = format!("{}/estate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&CreateEstateRequest { length, width })
            .send()
            .await?;

        let created: CreateResponse = decode(response).await?;
        tracing::debug!("Created estate {}", created.id);
        Ok(created.id)
    }

    /// Plant a tree and return its ID.
    pub async fn plant_tree(&self, estate_id: &str, x: i64, y: i64, height: i64) -> Result<String> {
        let url = format!("{}/estate/{}/tree", self.base_url, estate_id);
        let response = self
            .client
            .post(&url)
            .json(&CreateTreeRequest { x, y, height })
            .send()
            .await?;

        let created: CreateResponse = decode(response).await?;
        Ok(created.id)
    }

    pub async fn stats(&self, estate_id: &str) -> Result<EstateStats> {
        let url = format!("{}/estate/{}/stats", self.base_url, estate_id);
        decode(self.client.get(&url).send().await?).await
    }

    /// Fetch the drone plan, optionally bounded by a flight-distance budget.
    pub async fn drone_plan(
        &self,
        estate_id: &str,
        max_distance: Option<i64>,
    ) -> Result<DronePlanResponse> {
        let url = format!("{}/estate/{}/drone-plan", self.base_url, estate_id);
        let mut request = self.client.get(&url);
        if let Some(max_distance) = max_distance {
            request = request.query(&[("max_distance", max_distance)]);
        }
        decode(request.send().await?).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|err| err.message)
        .unwrap_or(body);
    tracing::warn!("Survey API error {}: {}", status, message);
    Err(ClientError::Api { status, message })
}
