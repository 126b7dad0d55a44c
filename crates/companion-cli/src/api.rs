//! Companion API Client

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use uuid::Uuid;

use companion::CompanionFilter;

/// API Client for the Companion server
pub struct CompanionClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionResponse {
    pub id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub category_id: Uuid,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub seed: String,
    pub src: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
}

/// `/api/companion` with the filter's non-empty values as query parameters
pub fn companions_url(base_url: &str, filter: &CompanionFilter) -> String {
    let query = filter
        .to_query_pairs()
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        format!("{}/api/companion", base_url)
    } else {
        format!("{}/api/companion?{}", base_url, query)
    }
}

/// `/api/companion/{id}` with the id percent-encoded
pub fn companion_url(base_url: &str, companion_id: &str) -> String {
    format!(
        "{}/api/companion/{}",
        base_url,
        urlencoding::encode(companion_id)
    )
}

impl CompanionClient {
    /// Create a new API client
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
        }
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Search companions
    pub async fn list_companions(
        &self,
        filter: &CompanionFilter,
    ) -> Result<Vec<CompanionResponse>> {
        let url = companions_url(&self.base_url, filter);
        tracing::debug!(%url, "listing companions");
        self.send(self.client.get(&url)).await
    }

    /// Get a specific companion
    pub async fn get_companion(&self, companion_id: &str) -> Result<CompanionResponse> {
        let url = companion_url(&self.base_url, companion_id);
        self.send(self.client.get(&url)).await
    }

    /// Delete a companion owned by the logged-in user
    pub async fn delete_companion(&self, companion_id: &str) -> Result<CompanionResponse> {
        let url = companion_url(&self.base_url, companion_id);
        tracing::debug!(%url, "deleting companion");
        self.send(self.client.delete(&url)).await
    }

    /// List all categories
    pub async fn list_categories(&self) -> Result<Vec<CategoryResponse>> {
        let url = format!("{}/api/category", self.base_url);
        self.send(self.client.get(&url)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let resp = request
            .send()
            .await
            .context("Failed to connect to Companion API")?;

        parse(resp).await
    }
}

async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T> {
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("API error ({}): {}", status, body);
    }

    resp.json().await.context("Failed to parse response")
}
