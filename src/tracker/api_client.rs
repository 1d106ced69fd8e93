use anyhow::Context;
use reqwest::{Method, RequestBuilder};

use super::TrackerConfig;
use crate::models::{Position, PositionInput};

/// HTTP client for the Position API. Failures never escape the calling
/// command handler as anything but an `anyhow::Error` carrying the server's
/// message.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(key) = &self.api_key {
            builder = builder.header("x-api-key", key);
        }
        builder
    }

    async fn expect_ok(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        // Surface the server's {error}/{message} text when there is one.
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .or_else(|| v.get("message"))
                    .and_then(|m| m.as_str().map(str::to_string))
            })
            .unwrap_or(body);
        anyhow::bail!("API returned {status}: {detail}")
    }

    pub async fn list_positions(&self) -> anyhow::Result<Vec<Position>> {
        let response = self
            .request(Method::GET, "/positions")
            .send()
            .await
            .context("Failed to fetch positions")?;
        Ok(Self::expect_ok(response).await?.json().await?)
    }

    pub async fn create_position(&self, input: &PositionInput) -> anyhow::Result<Position> {
        let response = self
            .request(Method::POST, "/positions")
            .json(input)
            .send()
            .await
            .context("Failed to add position")?;
        Ok(Self::expect_ok(response).await?.json().await?)
    }

    pub async fn update_position(
        &self,
        id: &str,
        input: &PositionInput,
    ) -> anyhow::Result<Position> {
        let response = self
            .request(Method::PUT, &format!("/positions/{id}"))
            .json(input)
            .send()
            .await
            .context("Failed to update position")?;
        Ok(Self::expect_ok(response).await?.json().await?)
    }

    pub async fn delete_position(&self, id: &str) -> anyhow::Result<String> {
        let response = self
            .request(Method::DELETE, &format!("/positions/{id}"))
            .send()
            .await
            .context("Failed to delete position")?;
        let body: serde_json::Value = Self::expect_ok(response).await?.json().await?;
        body["deleted"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("delete response missing `deleted` field"))
    }
}
