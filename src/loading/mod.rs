//! Waiting for a freshly opened view to finish loading.
//!
//! Hosts load files in the background, so anything that needs the opened
//! text (highlighting the search term, for one) awaits the view's load
//! signal first. The wait is a single future bounded by a timeout; it never
//! blocks the calling thread.

use std::time::Duration;
use tokio::sync::watch;

use crate::error::{NavError, NavResult};
use crate::host::{HostAdapter, ViewId};

/// Resolves once `signal` reads `true`.
///
/// # Errors
///
/// * [`NavError::LoadTimeout`] if loading does not finish within `timeout`
/// * [`NavError::Host`] if the view went away before it loaded
pub async fn wait_until_loaded(
    mut signal: watch::Receiver<bool>,
    timeout: Duration,
) -> NavResult<()> {
    match tokio::time::timeout(timeout, signal.wait_for(|loaded| *loaded)).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(_)) => Err(NavError::Host("view closed before it finished loading".to_string())),
        Err(_) => Err(NavError::LoadTimeout {
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}

/// Waits for `view` and then runs `action` against the host.
pub async fn after_load<H, F, T>(
    host: &mut H,
    view: ViewId,
    timeout: Duration,
    action: F,
) -> NavResult<T>
where
    H: HostAdapter + ?Sized,
    F: FnOnce(&mut H) -> T,
{
    wait_until_loaded(host.load_signal(view), timeout).await?;
    Ok(action(host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_already_loaded_resolves() {
        let (_tx, rx) = watch::channel(true);
        assert_eq!(wait_until_loaded(rx, Duration::from_millis(10)).await, Ok(()));
    }

    #[tokio::test]
    async fn test_resolves_when_signalled_later() {
        let (tx, rx) = watch::channel(false);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            tx.send_replace(true);
            // Keep the channel open until the waiter has seen the value
            tokio::time::sleep(Duration::from_millis(50)).await;
        });

        assert_eq!(wait_until_loaded(rx, Duration::from_secs(2)).await, Ok(()));
    }

    #[tokio::test]
    async fn test_times_out() {
        let (_tx, rx) = watch::channel(false);
        assert_eq!(
            wait_until_loaded(rx, Duration::from_millis(20)).await,
            Err(NavError::LoadTimeout { timeout_ms: 20 })
        );
    }

    #[tokio::test]
    async fn test_closed_channel_is_host_error() {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        assert!(matches!(
            wait_until_loaded(rx, Duration::from_millis(20)).await,
            Err(NavError::Host(_))
        ));
    }
}
