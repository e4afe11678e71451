//! Resilient execution with exponential back-off and cooperative cancellation.
//!
//! [`execute_with_retry`] wraps any fallible async operation. Whether an
//! error is worth another attempt is decided by the error type itself
//! through [`Retryable`]; non-retryable errors are returned immediately
//! without sleeping.
//!
//! Back-off schedule with the defaults (`min_delay = 4s`, `max_delay = 10s`):
//!
//! | Failed attempt | Wait before next attempt |
//! |----------------|--------------------------|
//! | 1              | 4 s × 2⁰ = 4 s           |
//! | 2              | 4 s × 2¹ = 8 s           |
//! | 3              | 4 s × 2² → capped at 10 s |

use std::future::Future;
use std::time::Duration;

use jobintel_core::AppConfig;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Classifies an error as transient (worth retrying) or not.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts including the first; at least 1.
    pub max_attempts: u32,
    pub min_delay: Duration,
    pub max_delay: Duration,
    /// Scale each delay by a random factor in `[0.75, 1.25)`, then clamp it
    /// back into `[min_delay, max_delay]`.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_delay: Duration::from_secs(4),
            max_delay: Duration::from_secs(10),
            jitter: false,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_attempts: config.retry_max_attempts,
            min_delay: Duration::from_secs(config.retry_min_delay_secs),
            max_delay: Duration::from_secs(config.retry_max_delay_secs),
            jitter: false,
        }
    }

    /// Wait after the `attempt`-th failure (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        let base = self.min_delay.saturating_mul(factor).min(self.max_delay);
        if !self.jitter {
            return base;
        }
        let scale = rand::random::<f64>() * 0.5 + 0.75;
        Duration::from_secs_f64(base.as_secs_f64() * scale)
            .max(self.min_delay)
            .min(self.max_delay)
    }
}

/// Snapshot handed to the delay observer before each back-off wait.
#[derive(Debug)]
pub struct RetryState<'a, E> {
    /// The attempt that just failed (1-based).
    pub attempt: u32,
    pub max_attempts: u32,
    pub last_error: &'a E,
    pub next_delay: Duration,
}

#[derive(Debug, Error)]
pub enum RetryError<E> {
    #[error("non-retryable error: {0}")]
    Fatal(#[source] E),

    #[error("gave up after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: E,
    },

    #[error("cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },
}

impl<E> RetryError<E> {
    /// The operation's own error, if one ended the retry loop.
    #[must_use]
    pub fn into_inner(self) -> Option<E> {
        match self {
            RetryError::Fatal(e) | RetryError::Exhausted { source: e, .. } => Some(e),
            RetryError::Cancelled { .. } => None,
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RetryError::Cancelled { .. })
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error,
/// exhausts `config.max_attempts`, or `cancel` fires.
///
/// # Errors
///
/// - [`RetryError::Fatal`]: the first non-retryable error, with no delay.
/// - [`RetryError::Exhausted`]: the last retryable error after `max_attempts`.
/// - [`RetryError::Cancelled`]: `cancel` fired before an attempt or during a wait.
pub async fn execute_with_retry<T, E, F, Fut>(
    operation: F,
    config: &RetryConfig,
    cancel: &CancellationToken,
) -> Result<T, RetryError<E>>
where
    E: Retryable + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    execute_with_retry_observed(operation, config, cancel, |_| {}).await
}

/// [`execute_with_retry`] with a hook called before every back-off wait.
///
/// # Errors
///
/// Same as [`execute_with_retry`].
pub async fn execute_with_retry_observed<T, E, F, Fut, O>(
    mut operation: F,
    config: &RetryConfig,
    cancel: &CancellationToken,
    mut observe: O,
) -> Result<T, RetryError<E>>
where
    E: Retryable + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    O: FnMut(&RetryState<'_, E>),
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1u32;
    loop {
        if cancel.is_cancelled() {
            return Err(RetryError::Cancelled {
                attempts: attempt - 1,
            });
        }

        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !err.is_retryable() {
            return Err(RetryError::Fatal(err));
        }
        if attempt >= max_attempts {
            return Err(RetryError::Exhausted {
                attempts: attempt,
                source: err,
            });
        }

        let delay = config.delay_for(attempt);
        observe(&RetryState {
            attempt,
            max_attempts,
            last_error: &err,
            next_delay: delay,
        });
        #[allow(clippy::cast_possible_truncation)]
        let delay_ms = delay.as_millis() as u64;
        tracing::warn!(
            attempt,
            max_attempts,
            delay_ms,
            error = %err,
            "transient error, retrying after back-off"
        );

        tokio::select! {
            () = cancel.cancelled() => {
                return Err(RetryError::Cancelled { attempts: attempt });
            }
            () = tokio::time::sleep(delay) => {}
        }
        attempt += 1;
    }
}

#[cfg(test)]
#[path = "retry_test.rs"]
mod tests;
