//! HTTP client that hands back status and body without judging them.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;

/// Status code and body text of a completed HTTP exchange.
///
/// The remote services report application-level failures inside bodies of
/// otherwise successful responses, so non-2xx statuses are not turned into
/// errors here; [`super::Reply`] decides what counts as success.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// HTTP client used by every outbound call.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Performs a GET request with the given extra headers.
    #[tracing::instrument(skip(self, url, headers), fields(host = %host_of(url)))]
    pub async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<RawResponse> {
        debug!("GET {}...", host_of(url));

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to send request")?;
        Self::read(response).await
    }

    /// Performs a POST request with a JSON body.
    #[tracing::instrument(skip(self, url, body), fields(host = %host_of(url)))]
    pub async fn post_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<RawResponse> {
        debug!("POST JSON to {}...", host_of(url));

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to send request")?;
        Self::read(response).await
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to read response body")?;
        debug!("Response {} ({} bytes)", status, body.len());
        Ok(RawResponse { status, body })
    }
}

/// Host part of `url` for log output. Webhook paths and queries carry keys.
fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| "<invalid url>".to_string())
}
