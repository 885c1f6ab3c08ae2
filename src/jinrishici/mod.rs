//! Client side of the jinrishici ("今日诗词") service.
//!
//! The service hands out an anonymous token from `/token` and returns the
//! sentence of the day from `/sentence` when that token is presented in the
//! `X-User-Token` header.

mod sentence;
mod token;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use sentence::PoemClient;
pub use token::TokenStore;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://v2.jinrishici.com";

/// Header carrying the credential on sentence requests.
pub const TOKEN_HEADER: &str = "X-User-Token";

/// Poem the excerpt was taken from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Origin {
    /// Full text, one entry per line
    pub content: Vec<String>,
    pub title: String,
    pub dynasty: String,
    pub author: String,
}

/// Sentence of the day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Quote {
    /// The quoted excerpt
    pub content: String,
    pub origin: Origin,
}

impl Quote {
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Source of the credential for the sentence endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Return the cached token, or fetch and cache a new one when `force`
    /// is set or nothing is cached yet.
    async fn load(&self, force: bool) -> Result<String>;
}

/// Source of the sentence of the day.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the sentence of the day. `Ok(None)` means the service answered
    /// successfully but had nothing to return.
    async fn fetch_quote(&self, credential: &str) -> Result<Option<Quote>>;
}
