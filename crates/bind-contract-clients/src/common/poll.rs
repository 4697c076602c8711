//! Bounded polling for values that appear on-chain some time after submission.
//!
//! The typical use is waiting for a transaction receipt: the operation returns
//! `Ok(None)` while the transaction is pending, `Ok(Some(_))` once mined. RPC
//! errors while polling are logged and polled through; only the deadline ends
//! the wait with an error.
//!
//! ```ignore
//! let receipt = poll_until(&PollConfig::default(), "approveBind receipt", || {
//!     let provider = provider.clone();
//!     async move { Ok(provider.get_transaction_receipt(tx_hash).await?) }
//! })
//! .await?;
//! ```

use anyhow::{Result, bail};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 120;

/// Configuration for polling behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between two polls.
    pub interval: Duration,
    /// Total time to wait before giving up.
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::from_secs(DEFAULT_POLL_INTERVAL_SECS, DEFAULT_POLL_TIMEOUT_SECS)
    }
}

impl PollConfig {
    pub fn from_secs(interval_secs: u64, timeout_secs: u64) -> Self {
        Self {
            interval: Duration::from_secs(interval_secs),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Poll `operation` until it yields a value or the timeout elapses.
///
/// The operation is always attempted at least once, even with a zero timeout.
pub async fn poll_until<F, Fut, T>(
    config: &PollConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let started = Instant::now();
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(Some(value)) => {
                debug!(
                    operation = operation_name,
                    attempt = attempt,
                    waited_ms = started.elapsed().as_millis() as u64,
                    "Poll completed"
                );
                return Ok(value);
            }
            Ok(None) => {
                debug!(operation = operation_name, attempt = attempt, "Not ready yet");
            }
            Err(e) => {
                warn!(
                    operation = operation_name,
                    attempt = attempt,
                    error = %e,
                    "Poll attempt failed"
                );
            }
        }

        if started.elapsed() + config.interval > config.timeout {
            bail!(
                "{operation_name} not available after {}s ({attempt} attempts)",
                config.timeout.as_secs()
            );
        }

        tokio::time::sleep(config.interval).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_poll_config_default() {
        let config = PollConfig::default();
        assert_eq!(config.interval, Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_POLL_TIMEOUT_SECS));
    }

    #[tokio::test]
    async fn test_poll_ready_first_attempt() {
        let config = PollConfig::from_secs(1, 10);
        let result = poll_until(&config, "test_op", || async { Ok(Some(42)) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_ready_after_pending() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let config = PollConfig::from_secs(3, 120);
        let result = poll_until(&config, "test_op", || {
            let attempts = attempts_clone.clone();
            async move {
                let current = attempts.fetch_add(1, Ordering::SeqCst);
                if current < 2 { Ok(None) } else { Ok(Some("mined")) }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "mined");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_survives_transient_errors() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let config = PollConfig::from_secs(1, 30);
        let result = poll_until(&config, "test_op", || {
            let attempts = attempts_clone.clone();
            async move {
                let current = attempts.fetch_add(1, Ordering::SeqCst);
                if current == 0 {
                    Err(anyhow::anyhow!("connection reset"))
                } else {
                    Ok(Some(7u64))
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_times_out() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let config = PollConfig::from_secs(3, 10);
        let result: Result<u64> = poll_until(&config, "receipt", || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Ok(None)
            }
        })
        .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("receipt not available after 10s"));
        // polls at t=0, 3, 6, 9; sleeping again would pass the deadline
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_poll_zero_timeout_attempts_once() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let config = PollConfig::from_secs(1, 0);
        let result: Result<u64> = poll_until(&config, "test_op", || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Ok(None)
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
