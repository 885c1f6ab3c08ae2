//! Chat robot webhook delivery (WeCom-style `msgtype` envelopes).

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serde::Serialize;

use crate::error::NotifyError;
use crate::http::{HttpClient, Reply};

/// Destination for the rendered message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notify: Send + Sync {
    /// Deliver a markdown message.
    async fn send(&self, message: &str) -> Result<()>;
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MarkdownBody<'a> {
    pub content: &'a str,
}

/// Request body understood by the webhook.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "msgtype", rename_all = "lowercase")]
pub enum WebhookMessage<'a> {
    Markdown { markdown: MarkdownBody<'a> },
}

impl<'a> WebhookMessage<'a> {
    pub fn markdown(content: &'a str) -> Self {
        WebhookMessage::Markdown {
            markdown: MarkdownBody { content },
        }
    }
}

pub struct WebhookNotifier {
    http_client: HttpClient,
    url: String,
}

impl WebhookNotifier {
    pub fn new(http_client: HttpClient, url: &str) -> Self {
        Self {
            http_client,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl Notify for WebhookNotifier {
    #[tracing::instrument(skip(self, message))]
    async fn send(&self, message: &str) -> Result<()> {
        let response = self
            .http_client
            .post_json(&self.url, &WebhookMessage::markdown(message))
            .await?;

        Reply::from_errcode(response).into_result(NotifyError::DeliveryFailure)?;
        info!("Message delivered to webhook");
        Ok(())
    }
}
