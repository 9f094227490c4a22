//! Bounded retry with a fixed pause for order source requests.
//!
//! Transient failures (network errors, 429, 5xx) are retried after the same
//! delay every time. Everything else is returned on the first failure.

use std::future::Future;
use std::time::Duration;

use crate::error::SourceError;

/// Returns `true` if `err` represents a transient condition worth another
/// attempt.
///
/// Retriable:
/// - [`SourceError::Http`]: network-level failure (timeout, connection reset).
/// - [`SourceError::RateLimited`]: HTTP 429.
/// - [`SourceError::UnexpectedStatus`] with a 5xx status.
///
/// Not retriable: 4xx statuses, malformed bodies, empty documents, invalid
/// URLs or headers.
fn is_retriable(err: &SourceError) -> bool {
    match err {
        SourceError::Http(_) | SourceError::RateLimited { .. } => true,
        SourceError::UnexpectedStatus { status, .. } => *status >= 500,
        SourceError::Deserialize { .. }
        | SourceError::EmptyDocument { .. }
        | SourceError::InvalidUrl { .. }
        | SourceError::InvalidHeader { .. } => false,
    }
}

/// Runs `operation` up to `max_attempts` times in total, sleeping
/// `backoff_ms` between attempts.
///
/// `max_attempts` of `0` is treated as `1`: the operation always runs once.
pub(crate) async fn retry_with_fixed_backoff<T, F, Fut>(
    max_attempts: u32,
    backoff_ms: u64,
    mut operation: F,
) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_attempts {
                    return Err(err);
                }
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = backoff_ms,
                    error = %err,
                    "transient order source error; retrying"
                );
            }
        }

        tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn server_error() -> SourceError {
        SourceError::UnexpectedStatus {
            status: 503,
            url: "https://orders.example.com".to_owned(),
        }
    }

    #[test]
    fn client_errors_are_not_retriable() {
        assert!(!is_retriable(&SourceError::UnexpectedStatus {
            status: 404,
            url: "u".to_owned()
        }));
        assert!(!is_retriable(&SourceError::EmptyDocument {
            url: "u".to_owned()
        }));
    }

    #[test]
    fn server_errors_and_rate_limits_are_retriable() {
        assert!(is_retriable(&server_error()));
        assert!(is_retriable(&SourceError::RateLimited {
            url: "u".to_owned(),
            retry_after_secs: 1
        }));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_fixed_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, SourceError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_fixed_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(server_error())
                } else {
                    Ok::<u32, SourceError>(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_fixed_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, SourceError>(server_error())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(
            result,
            Err(SourceError::UnexpectedStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn zero_attempts_still_runs_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let _ = retry_with_fixed_backoff(0, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, SourceError>(server_error())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn does_not_retry_client_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_fixed_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, SourceError>(SourceError::UnexpectedStatus {
                    status: 401,
                    url: "https://orders.example.com".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(result.is_err());
    }
}
