//! Failure kinds of the fetch-and-notify flow.
//!
//! These are carried inside `anyhow::Error` and recovered with `downcast_ref`
//! where a caller needs to tell them apart.

/// Errors raised by the token store, poem client, notifier and retry driver.
#[derive(Debug)]
pub enum NotifyError {
    /// The auth endpoint did not hand out a token (raw response body)
    AuthFailure(String),
    /// A sentence was requested without a credential
    InvalidCredential,
    /// The sentence endpoint rejected the request (raw response body)
    UpstreamFailure(String),
    /// The webhook did not accept the message (raw response body)
    DeliveryFailure(String),
    /// Every attempt failed
    RetryExhausted { attempts: usize, last: String },
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyError::AuthFailure(body) => {
                write!(f, "Failed to obtain token: {}", body)
            }
            NotifyError::InvalidCredential => {
                write!(f, "A token is required to fetch the sentence")
            }
            NotifyError::UpstreamFailure(body) => {
                write!(f, "Failed to fetch sentence: {}", body)
            }
            NotifyError::DeliveryFailure(body) => {
                write!(f, "Webhook rejected the message: {}", body)
            }
            NotifyError::RetryExhausted { attempts, last } => {
                write!(f, "Retry end after {} attempt(s), last error: {}", attempts, last)
            }
        }
    }
}

impl std::error::Error for NotifyError {}
