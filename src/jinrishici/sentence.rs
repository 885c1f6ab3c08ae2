//! Sentence-of-the-day fetch.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use super::{Quote, QuoteSource, TOKEN_HEADER};
use crate::error::NotifyError;
use crate::http::{HttpClient, Reply};

pub struct PoemClient {
    http_client: HttpClient,
    sentence_url: String,
}

impl PoemClient {
    pub fn new(http_client: HttpClient, api_url: &str) -> Self {
        Self {
            http_client,
            sentence_url: format!("{}/sentence", api_url),
        }
    }
}

#[async_trait]
impl QuoteSource for PoemClient {
    #[tracing::instrument(skip(self, credential))]
    async fn fetch_quote(&self, credential: &str) -> Result<Option<Quote>> {
        if credential.is_empty() {
            return Err(NotifyError::InvalidCredential.into());
        }

        debug!("Fetching sentence of the day...");
        let response = self
            .http_client
            .get(&self.sentence_url, &[(TOKEN_HEADER, credential)])
            .await?;

        Reply::<Option<Quote>>::from_status_envelope(response)
            .into_result(NotifyError::UpstreamFailure)
    }
}
