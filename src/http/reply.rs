//! Application-level success/failure of remote calls.
//!
//! Both remote services answer with HTTP 200 and signal the real outcome in
//! the body: jinrishici with `{"status": "success", "data": ...}`, the webhook
//! with `{"errcode": 0, ...}`. These shapes are folded into [`Reply`] once so
//! callers never branch on raw payloads.

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::client::RawResponse;
use crate::error::NotifyError;

/// Outcome of a single remote call.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// The service reported success and produced a value
    Accepted(T),
    /// Anything else; carries the raw response body
    Rejected(String),
}

#[derive(Deserialize)]
struct StatusEnvelope<T> {
    status: String,
    data: T,
}

#[derive(Deserialize)]
struct ErrcodeEnvelope {
    errcode: i64,
}

impl<T: DeserializeOwned> Reply<T> {
    /// Accepts HTTP 200 responses whose body is `{"status": "success", "data": T}`.
    pub fn from_status_envelope(response: RawResponse) -> Self {
        if response.status != StatusCode::OK {
            return Reply::Rejected(response.body);
        }

        match serde_json::from_str::<StatusEnvelope<T>>(&response.body) {
            Ok(envelope) if envelope.status == "success" => Reply::Accepted(envelope.data),
            _ => Reply::Rejected(response.body),
        }
    }
}

impl Reply<()> {
    /// Accepts HTTP 200 responses whose body carries `"errcode": 0`.
    pub fn from_errcode(response: RawResponse) -> Self {
        if response.status != StatusCode::OK {
            return Reply::Rejected(response.body);
        }

        match serde_json::from_str::<ErrcodeEnvelope>(&response.body) {
            Ok(envelope) if envelope.errcode == 0 => Reply::Accepted(()),
            _ => Reply::Rejected(response.body),
        }
    }
}

impl<T> Reply<T> {
    /// Converts into a `Result`, mapping the rejected body with `to_error`.
    pub fn into_result<F>(self, to_error: F) -> anyhow::Result<T>
    where
        F: FnOnce(String) -> NotifyError,
    {
        match self {
            Reply::Accepted(value) => Ok(value),
            Reply::Rejected(body) => Err(anyhow::Error::from(to_error(body))),
        }
    }
}
