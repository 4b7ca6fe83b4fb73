//! Retry and backoff policy for stale-link recovery.
//!
//! A non-200 status on a segment or key fetch means the signed URL prefix
//! has expired; the fetcher re-resolves the manifest and retries the same
//! unit. This policy bounds those re-resolution rounds and spaces them with
//! exponential backoff, so a permanently stale source surfaces
//! `ExhaustedRetries` instead of looping forever.

use std::time::Duration;

use crate::config::RetryConfig;

/// Decision for one failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Stop: the attempt budget is spent.
    NoRetry,
    /// Re-resolve and retry after the given delay.
    RetryAfter(Duration),
}

/// Capped exponential backoff with a maximum attempt count.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts per unit (including the first).
    pub max_attempts: u32,
    /// Base delay for backoff.
    pub base_delay: Duration,
    /// Upper bound on backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(cfg: &RetryConfig) -> Self {
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(cfg.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(cfg.max_delay_secs),
        }
    }

    /// Decide what to do after attempt number `attempt` (1-based) failed.
    ///
    /// Backoff is `base * 2^(attempt-1)`, capped at `max_delay`.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }
        let exp = 1u32 << attempt.saturating_sub(1).min(8);
        let delay = self.base_delay.saturating_mul(exp).min(self.max_delay);
        RetryDecision::RetryAfter(delay)
    }
}
