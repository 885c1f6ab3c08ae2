//! HTTP client module and per-endpoint reply classification.

mod client;
mod reply;

pub use client::{HttpClient, RawResponse};
pub use reply::Reply;

use anyhow::Result;
use reqwest::Client;

/// User agent sent with every request.
pub const USER_AGENT: &str = "jinrishici-notify";

/// Build the HTTP client shared by all outbound calls.
pub fn build_http_client() -> Result<HttpClient> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    Ok(HttpClient::new(client))
}
