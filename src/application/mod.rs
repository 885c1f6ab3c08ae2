//! Application layer - Use cases that coordinate the clients.
//!
//! This layer wires the token store, poem client and webhook notifier built
//! from [`Config`] and runs them under the retry policy.

mod daily;

pub use daily::{DailyPoemUseCase, Outcome, SkipReason};

use anyhow::Result;
use log::info;

use crate::config::Config;
use crate::http::build_http_client;
use crate::jinrishici::{PoemClient, TokenStore};
use crate::runtime::Runtime;
use crate::webhook::WebhookNotifier;

/// Fetch today's sentence and deliver it to the configured webhook.
#[tracing::instrument(skip(runtime, config), fields(mode = %config.mode))]
pub async fn notify_daily_poem<R: Runtime>(runtime: R, config: &Config) -> Result<Outcome> {
    let http_client = build_http_client()?;

    let tokens = TokenStore::new(
        runtime,
        http_client.clone(),
        &config.api_url,
        config.token_file.clone(),
    );
    info!("Token cache: {:?}", tokens.path());
    let quotes = PoemClient::new(http_client.clone(), &config.api_url);
    let notifier = WebhookNotifier::new(http_client, &config.webhook_url);

    let outcome = DailyPoemUseCase::new(tokens, quotes, notifier)
        .run(&config.retry)
        .await?;
    info!("Finished: {:?}", outcome);
    Ok(outcome)
}
