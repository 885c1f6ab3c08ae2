//! Whole-flow retry with forced token refresh.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use log::{error, warn};

use crate::error::NotifyError;

/// Total number of attempts made by default.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Delay between attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Never below 1.
    pub max_attempts: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::from_millis(RETRY_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

/// Runs `operation` until it succeeds or the policy runs out of attempts.
///
/// The operation receives `force = false` on the first attempt and `true` on
/// every later one, so a stale cached token is replaced before retrying.
/// Every attempt is awaited; exhaustion yields [`NotifyError::RetryExhausted`].
pub async fn with_retry<F, Fut, T>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut(bool) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match operation(attempt > 0).await {
            Ok(result) => return Ok(result),
            Err(e) => {
                error!("Attempt {}/{} failed: {:#}", attempt + 1, max_attempts, e);
                attempt += 1;

                if attempt >= max_attempts {
                    return Err(NotifyError::RetryExhausted {
                        attempts: attempt,
                        last: format!("{:#}", e),
                    }
                    .into());
                }

                warn!("Retry {} ...", attempt);
                if !policy.delay.is_zero() {
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn no_delay(max_attempts: usize) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO)
    }

    #[test]
    fn test_policy_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_policy_at_least_one_attempt() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    #[test_log::test(tokio::test)]
    async fn test_with_retry_first_attempt_success() {
        let forces = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&forces);

        let result = with_retry(&no_delay(3), |force| {
            seen.lock().unwrap().push(force);
            async { Ok::<_, anyhow::Error>(42) }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(*forces.lock().unwrap(), vec![false]);
    }

    #[test_log::test(tokio::test)]
    async fn test_with_retry_succeeds_on_third_attempt() {
        let forces = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&forces);

        let result = with_retry(&no_delay(3), |force| {
            let attempt = {
                let mut forces = seen.lock().unwrap();
                forces.push(force);
                forces.len()
            };
            async move {
                if attempt < 3 {
                    Err(anyhow::anyhow!("connection reset"))
                } else {
                    Ok("sent")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "sent");
        assert_eq!(*forces.lock().unwrap(), vec![false, true, true]);
    }

    #[test_log::test(tokio::test)]
    async fn test_with_retry_exhausts_attempts() {
        let forces = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&forces);

        let result = with_retry(&no_delay(3), |force| {
            seen.lock().unwrap().push(force);
            async { Err::<(), _>(anyhow::Error::from(NotifyError::DeliveryFailure("{}".into()))) }
        })
        .await;

        let err = result.unwrap_err();
        match err.downcast_ref::<NotifyError>() {
            Some(NotifyError::RetryExhausted { attempts, last }) => {
                assert_eq!(*attempts, 3);
                assert!(last.contains("Webhook rejected"));
            }
            other => panic!("Expected RetryExhausted, got {:?}", other),
        }
        assert_eq!(forces.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_with_retry_single_attempt() {
        let calls = Arc::new(Mutex::new(0));
        let seen = Arc::clone(&calls);

        let result = with_retry(&no_delay(1), |_| {
            *seen.lock().unwrap() += 1;
            async { Err::<(), _>(anyhow::anyhow!("boom")) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_with_retry_waits_between_attempts() {
        let start = std::time::Instant::now();
        let policy = RetryPolicy::new(3, Duration::from_millis(50));

        let result = with_retry(&policy, |_| async { Err::<(), _>(anyhow::anyhow!("boom")) }).await;

        assert!(result.is_err());
        // Two pauses: after the first and second failures, none after the last
        assert!(start.elapsed() >= Duration::from_millis(100));
    }
}
