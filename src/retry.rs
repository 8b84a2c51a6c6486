//! Bounded retry with linear backoff for outbound calls.
//!
//! The policy knows nothing about HTTP: an operation reports failures through
//! its error type, and [`Retryable`] decides whether another attempt is worth
//! making.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Classifies a failure as transient or permanent.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryConfigError {
    #[error("Retry policy needs at least one attempt")]
    ZeroAttempts,
}

#[derive(Debug, Error)]
pub enum RetryError<E> {
    #[error("Retries exhausted after {attempts} attempts: {last_message}")]
    Exhausted { attempts: u32, last_message: String },

    #[error("Non-retryable failure: {0}")]
    Aborted(E),

    #[error("Retry deadline exceeded after {attempts} attempts: {last_message}")]
    DeadlineExceeded { attempts: u32, last_message: String },
}

impl<E: Display> RetryError<E> {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Exhausted { .. } => "RETRY_EXHAUSTED",
            Self::Aborted(_) => "RETRY_ABORTED",
            Self::DeadlineExceeded { .. } => "RETRY_DEADLINE_EXCEEDED",
        }
    }

    /// Attempts made before giving up. An aborted call made exactly one.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Exhausted { attempts, .. } | Self::DeadlineExceeded { attempts, .. } => *attempts,
            Self::Aborted(_) => 1,
        }
    }

    #[must_use]
    pub fn last_message(&self) -> String {
        match self {
            Self::Exhausted { last_message, .. } | Self::DeadlineExceeded { last_message, .. } => {
                last_message.clone()
            }
            Self::Aborted(e) => e.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    deadline: Option<Duration>,
}

#[derive(Default)]
struct Progress {
    attempts: u32,
    last_message: Option<String>,
}

impl RetryPolicy {
    /// Builds a policy making at most `max_attempts` calls.
    ///
    /// # Errors
    ///
    /// Returns [`RetryConfigError::ZeroAttempts`] when `max_attempts` is 0.
    pub const fn new(max_attempts: u32, base_delay: Duration) -> Result<Self, RetryConfigError> {
        if max_attempts == 0 {
            return Err(RetryConfigError::ZeroAttempts);
        }
        Ok(Self {
            max_attempts,
            base_delay,
            deadline: None,
        })
    }

    /// Caps the total time spent across all attempts and waits.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Wait after failed attempt `attempt` (1-based): `base_delay * attempt`.
    #[must_use]
    pub const fn backoff_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Runs `operation` until it succeeds, fails permanently, or the policy
    /// runs out of attempts (or time, when a deadline is set).
    pub async fn execute<F, Fut, T, E>(&self, mut operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + Display,
    {
        let mut progress = Progress::default();

        let Some(deadline) = self.deadline else {
            return self.run(&mut operation, &mut progress).await;
        };

        let timed = tokio::time::timeout(deadline, self.run(&mut operation, &mut progress)).await;
        match timed {
            Ok(outcome) => outcome,
            Err(_) => {
                let last_message = progress
                    .last_message
                    .unwrap_or_else(|| "no attempt completed".to_string());
                warn!(
                    attempts = progress.attempts,
                    deadline = ?deadline,
                    "Retry deadline exceeded: {}",
                    last_message
                );
                Err(RetryError::DeadlineExceeded {
                    attempts: progress.attempts,
                    last_message,
                })
            }
        }
    }

    async fn run<F, Fut, T, E>(
        &self,
        operation: &mut F,
        progress: &mut Progress,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + Display,
    {
        loop {
            progress.attempts += 1;
            let attempt = progress.attempts;

            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("Succeeded on attempt {}/{}", attempt, self.max_attempts);
                    }
                    return Ok(value);
                }
                Err(e) if !e.is_retryable() => {
                    warn!("Attempt {} failed permanently: {}", attempt, e);
                    return Err(RetryError::Aborted(e));
                }
                Err(e) => {
                    let message = e.to_string();

                    if attempt >= self.max_attempts {
                        warn!(
                            "Retries exhausted after {} attempts: {}",
                            attempt, message
                        );
                        return Err(RetryError::Exhausted {
                            attempts: attempt,
                            last_message: message,
                        });
                    }

                    let delay = self.backoff_for(attempt);
                    warn!(
                        "Attempt {}/{} failed: {}. Retrying in {:?}",
                        attempt, self.max_attempts, message, delay
                    );
                    progress.last_message = Some(message);

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
