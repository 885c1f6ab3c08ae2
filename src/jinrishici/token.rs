//! Token acquisition with a plain-text file cache.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};

use super::TokenSource;
use crate::error::NotifyError;
use crate::http::{HttpClient, Reply};
use crate::runtime::Runtime;

/// Caches the jinrishici token in a single file.
///
/// The file holds the token verbatim. There is no expiry tracking: a cached
/// token is used until a forced reload replaces it.
pub struct TokenStore<R: Runtime> {
    runtime: R,
    http_client: HttpClient,
    token_url: String,
    path: PathBuf,
}

impl<R: Runtime> TokenStore<R> {
    pub fn new(runtime: R, http_client: HttpClient, api_url: &str, path: PathBuf) -> Self {
        Self {
            runtime,
            http_client,
            token_url: format!("{}/token", api_url),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Request a fresh token from the auth endpoint.
    async fn fetch(&self) -> Result<String> {
        let response = self.http_client.get(&self.token_url, &[]).await?;
        Reply::<String>::from_status_envelope(response).into_result(NotifyError::AuthFailure)
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !self.runtime.exists(parent) {
                self.runtime.create_dir_all(parent)?;
            }
        }

        debug!("Writing token to {:?}", self.path);
        self.runtime
            .write(&self.path, token.as_bytes())
            .with_context(|| format!("Failed to save token to {:?}", self.path))
    }
}

#[async_trait]
impl<R: Runtime> TokenSource for TokenStore<R> {
    #[tracing::instrument(skip(self))]
    async fn load(&self, force: bool) -> Result<String> {
        if !force && self.runtime.exists(&self.path) {
            debug!("Using cached token from {:?}", self.path);
            return self
                .runtime
                .read_to_string(&self.path)
                .with_context(|| format!("Failed to read cached token from {:?}", self.path));
        }

        info!("Fetching a new token...");
        let token = self.fetch().await?;
        if token.is_empty() {
            warn!("Auth endpoint returned an empty token, not caching it");
            return Ok(token);
        }
        self.save(&token)?;
        info!("Token refreshed");
        Ok(token)
    }
}
