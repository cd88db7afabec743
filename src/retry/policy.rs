//! Retry Mechanism Module
//!
//! Bounded retry for single logical operations against a vendor client,
//! with exponential or fixed backoff and optional jitter.
//!
//! The attempt unit is deliberately asymmetric between call kinds: a
//! non-streaming call retries the whole round trip, a streaming call retries
//! only stream establishment. Once chunks have been delivered a failure
//! propagates to the consumer, because partial output cannot be un-sent.

use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

use crate::error::GatewayError;

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (first attempt included)
    pub max_attempts: u32,
    /// Delay before the first re-attempt
    pub initial_delay: Duration,
    /// Upper bound on any computed delay
    pub max_delay: Duration,
    /// Backoff multiplier; 1.0 yields a fixed delay
    pub backoff_multiplier: f64,
    /// Whether to add jitter to delays
    pub use_jitter: bool,
    /// Maximum jitter fraction (0.0 to 1.0)
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(60),
            backoff_multiplier: 2.0,
            use_jitter: true,
            jitter_factor: 0.1,
        }
    }
}

impl RetryPolicy {
    /// Create the default exponential policy
    pub fn new() -> Self {
        Self::default()
    }

    /// A fixed-delay policy: the same pause between every attempt.
    pub const fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay: delay,
            max_delay: delay,
            backoff_multiplier: 1.0,
            use_jitter: false,
            jitter_factor: 0.0,
        }
    }

    /// Set maximum attempts
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the delay before the first re-attempt
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the delay cap
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff multiplier
    pub const fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Enable or disable jitter
    pub const fn with_jitter(mut self, use_jitter: bool) -> Self {
        self.use_jitter = use_jitter;
        self
    }

    /// Set the jitter fraction, clamped to [0, 1]
    pub fn with_jitter_factor(mut self, factor: f64) -> Self {
        self.jitter_factor = factor.clamp(0.0, 1.0);
        self
    }

    /// Delay to apply after the given zero-based attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base =
            self.initial_delay.as_millis() as f64 * self.backoff_multiplier.powi(attempt as i32);
        let delay = Duration::from_millis(base as u64).min(self.max_delay);

        if self.use_jitter {
            self.add_jitter(delay)
        } else {
            delay
        }
    }

    fn add_jitter(&self, delay: Duration) -> Duration {
        let mut rng = rand::thread_rng();
        let jitter_range = delay.as_millis() as f64 * self.jitter_factor;
        if jitter_range <= 0.0 {
            return delay;
        }
        let jitter = rng.gen_range(-jitter_range..=jitter_range);
        Duration::from_millis((delay.as_millis() as f64 + jitter).max(0.0) as u64)
    }
}

/// Runs a single logical operation under a [`RetryPolicy`].
///
/// Only errors classified transient by [`GatewayError::is_transient`] are
/// retried; everything else propagates on the first failure. Exhausting the
/// attempt budget yields [`GatewayError::RetryExhausted`] wrapping the last
/// transient error.
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    /// Create an executor for the given policy
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// The configured policy
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute an operation, retrying transient failures.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, GatewayError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, GatewayError>>,
    {
        let mut last_error = None;

        for attempt in 0..self.policy.max_attempts {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    if !error.is_transient() {
                        return Err(error);
                    }
                    last_error = Some(error);

                    if attempt == self.policy.max_attempts - 1 {
                        break;
                    }

                    let delay = self.policy.delay_for(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts = self.policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %last_error.as_ref().expect("just set"),
                        "transient failure, retrying"
                    );
                    sleep(delay).await;
                }
            }
        }

        let cause = last_error.unwrap_or_else(|| {
            GatewayError::Internal("retry executor finished without recording an error".to_string())
        });
        Err(GatewayError::RetryExhausted {
            attempts: self.policy.max_attempts,
            cause: Box::new(cause),
        })
    }
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn throttle() -> GatewayError {
        GatewayError::throttled("simulated throttle")
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let policy = RetryPolicy::fixed(3, Duration::from_millis(1));
        let executor = RetryExecutor::new(policy);

        let result = executor
            .execute(|| {
                let counter = counter_clone.clone();
                async move {
                    let count = counter.fetch_add(1, Ordering::SeqCst);
                    if count < 2 { Err(throttle()) } else { Ok("success") }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "success");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhaustion_wraps_last_transient_error() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let executor = RetryExecutor::new(RetryPolicy::fixed(2, Duration::from_millis(1)));

        let result: Result<(), GatewayError> = executor
            .execute(|| {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(throttle())
                }
            })
            .await;

        assert_eq!(counter.load(Ordering::SeqCst), 2);
        match result {
            Err(GatewayError::RetryExhausted { attempts, cause }) => {
                assert_eq!(attempts, 2);
                assert!(matches!(*cause, GatewayError::Throttled(_)));
            }
            other => panic!("expected RetryExhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn permanent_error_is_not_retried() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let executor = RetryExecutor::new(RetryPolicy::fixed(5, Duration::from_millis(1)));

        let result: Result<(), GatewayError> = executor
            .execute(|| {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(GatewayError::authentication("bad credentials"))
                }
            })
            .await;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(GatewayError::AuthenticationError(_))));
    }

    #[test]
    fn exponential_delay_without_jitter() {
        let policy = RetryPolicy::new()
            .with_initial_delay(Duration::from_millis(100))
            .with_backoff_multiplier(2.0)
            .with_jitter(false);

        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
    }

    #[test]
    fn delay_is_capped() {
        let policy = RetryPolicy::new()
            .with_initial_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(250))
            .with_jitter(false);

        assert_eq!(policy.delay_for(5), Duration::from_millis(250));
    }

    #[test]
    fn fixed_policy_is_flat() {
        let policy = RetryPolicy::fixed(4, Duration::from_millis(50));
        assert_eq!(policy.delay_for(0), Duration::from_millis(50));
        assert_eq!(policy.delay_for(3), Duration::from_millis(50));
    }
}
