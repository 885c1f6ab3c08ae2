//! Daily poem use case: token, sentence, render, deliver.

use anyhow::Result;
use log::{info, warn};

use crate::jinrishici::{QuoteSource, TokenSource};
use crate::message;
use crate::retry::{RetryPolicy, with_retry};
use crate::webhook::Notify;

/// Why an attempt finished without sending anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The token store produced an empty token
    EmptyToken,
    /// The service returned no sentence, or an empty one
    EmptyQuote,
}

/// Result of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Sent,
    Skipped(SkipReason),
}

pub struct DailyPoemUseCase<T: TokenSource, Q: QuoteSource, N: Notify> {
    tokens: T,
    quotes: Q,
    notifier: N,
}

impl<T: TokenSource, Q: QuoteSource, N: Notify> DailyPoemUseCase<T, Q, N> {
    pub fn new(tokens: T, quotes: Q, notifier: N) -> Self {
        Self {
            tokens,
            quotes,
            notifier,
        }
    }

    /// One attempt. `force` refreshes the token instead of using the cache.
    #[tracing::instrument(skip(self))]
    pub async fn run_once(&self, force: bool) -> Result<Outcome> {
        let token = self.tokens.load(force).await?;
        if token.is_empty() {
            warn!("Token is empty, nothing to do");
            return Ok(Outcome::Skipped(SkipReason::EmptyToken));
        }

        let quote = match self.quotes.fetch_quote(&token).await? {
            Some(quote) if !quote.is_empty() => quote,
            _ => {
                warn!("No sentence returned, nothing to do");
                return Ok(Outcome::Skipped(SkipReason::EmptyQuote));
            }
        };
        info!(
            "Sentence: {}",
            serde_json::to_string(&quote).unwrap_or_else(|_| quote.content.clone())
        );

        let text = message::render(&quote)?;
        self.notifier.send(&text).await?;
        Ok(Outcome::Sent)
    }

    /// Runs attempts under `policy`, refreshing the token on every retry.
    pub async fn run(&self, policy: &RetryPolicy) -> Result<Outcome> {
        with_retry(policy, |force| self.run_once(force)).await
    }
}
