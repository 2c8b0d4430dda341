use crate::error::{FetchError, SourceError};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Wait after the first failure; doubles with every further failure
    pub backoff_unit: Duration,
    /// Per-attempt deadline; running past it counts as a transient failure
    pub request_timeout: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_unit: Duration, request_timeout: Duration) -> Self {
        Self {
            max_attempts,
            backoff_unit,
            request_timeout,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_unit: Duration::from_secs(1),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Wait before the attempt following the failed `attempt` (0-indexed):
/// `unit * 2^attempt`.
pub fn backoff_delay(attempt: u32, unit: Duration) -> Duration {
    unit.saturating_mul(2u32.saturating_pow(attempt))
}

/// Errors that know whether another attempt could succeed.
pub trait Transience {
    fn is_transient(&self) -> bool;
}

impl Transience for FetchError {
    fn is_transient(&self) -> bool {
        FetchError::is_transient(self)
    }
}

impl Transience for SourceError {
    fn is_transient(&self) -> bool {
        match self {
            SourceError::Fetch(error) => error.is_transient(),
            SourceError::Credential(_) => false,
        }
    }
}

#[derive(Debug)]
enum RetryState<T, E> {
    Attempting(u32),
    Backoff { attempt: u32, error: E },
    Exhausted(E),
    Succeeded(T),
}

/// Runs a network call under [`RetryPolicy`].
#[derive(Debug, Clone, Default)]
pub struct RetryingFetcher {
    policy: RetryPolicy,
}

impl RetryingFetcher {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn fetch<T, E, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Transience + From<FetchError> + Display,
    {
        let mut state = RetryState::Attempting(0);

        loop {
            state = match state {
                RetryState::Attempting(attempt) => {
                    match timeout(self.policy.request_timeout, call()).await {
                        Ok(Ok(value)) => RetryState::Succeeded(value),
                        Ok(Err(error)) => self.after_failure(attempt, error),
                        Err(_) => self.after_failure(
                            attempt,
                            E::from(FetchError::Timeout(self.policy.request_timeout)),
                        ),
                    }
                }
                RetryState::Backoff { attempt, error } => {
                    let delay = backoff_delay(attempt, self.policy.backoff_unit);
                    warn!(
                        operation,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Attempt failed, backing off"
                    );
                    sleep(delay).await;
                    RetryState::Attempting(attempt + 1)
                }
                RetryState::Exhausted(error) => return Err(error),
                RetryState::Succeeded(value) => return Ok(value),
            };
        }
    }

    fn after_failure<T, E: Transience>(&self, attempt: u32, error: E) -> RetryState<T, E> {
        if !error.is_transient() {
            return RetryState::Exhausted(error);
        }

        if attempt + 1 >= self.policy.max_attempts.max(1) {
            debug!(attempts = attempt + 1, "Retries exhausted");
            return RetryState::Exhausted(error);
        }

        RetryState::Backoff { attempt, error }
    }
}
