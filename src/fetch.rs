use std::future::Future;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use futures::StreamExt;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, warn};

use crate::error::{CtftError, Result};

pub(crate) const RETRY_ATTEMPTS: usize = 3;
pub(crate) const RETRY_DELAY: Duration = Duration::from_secs(3);

const NAV_TIMEOUT: Duration = Duration::from_secs(30);
const SETTLE_DELAY: Duration = Duration::from_secs(3);

fn browser_err(url: &str, source: CdpError) -> CtftError {
    CtftError::Browser {
        url: url.to_string(),
        source,
    }
}

/// Render one page in a fresh headless browser and return the settled HTML.
///
/// Every call owns its own browser instance; concurrent scrape sessions
/// never share a page handle.
pub(crate) async fn render_page(url: &str) -> Result<String> {
    debug!(url, "rendering page");

    let config = BrowserConfig::builder()
        .arg("--no-sandbox")
        .arg("--disable-gpu")
        .arg("--disable-dev-shm-usage")
        .build()
        .map_err(CtftError::BrowserConfig)?;

    let (mut browser, mut handler) = Browser::launch(config)
        .await
        .map_err(|e| browser_err(url, e))?;
    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    let result = render_on(&browser, url).await;

    let _ = browser.close().await;
    let _ = browser.wait().await;
    handler_task.abort();

    result
}

async fn render_on(browser: &Browser, url: &str) -> Result<String> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| browser_err(url, e))?;

    let navigation = async {
        page.goto(url).await?;
        page.wait_for_navigation().await?;
        Ok::<_, CdpError>(())
    };
    timeout(NAV_TIMEOUT, navigation)
        .await
        .map_err(|_| CtftError::NavigationTimeout {
            url: url.to_string(),
            timeout: NAV_TIMEOUT,
        })?
        .map_err(|e| browser_err(url, e))?;

    // The page keeps hydrating after navigation settles.
    sleep(SETTLE_DELAY).await;

    page.content().await.map_err(|e| browser_err(url, e))
}

/// Run a page-render-and-extract task with bounded retries and a fixed
/// inter-attempt delay.
///
/// A [`CtftError::NavigationTimeout`] logs as a warning, anything else as an
/// error; both retry the same way. Exhaustion returns `None`, and callers
/// map that to their empty shape rather than treating it as fatal.
pub(crate) async fn fetch_with_retries<T, F, Fut>(
    label: &str,
    max_attempts: usize,
    delay: Duration,
    mut task: F,
) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    for attempt in 1..=max_attempts {
        debug!(label, attempt, "fetch attempt");
        match task().await {
            Ok(value) => return Some(value),
            Err(err @ CtftError::NavigationTimeout { .. }) => {
                warn!(label, attempt, %err, "navigation timed out");
            }
            Err(err) => {
                error!(label, attempt, %err, "fetch attempt failed");
            }
        }
        sleep(delay).await;
    }
    error!(label, max_attempts, "failed fetch after exhausting retries");
    None
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn test_retry_exhaustion_returns_none() {
        let attempts = AtomicUsize::new(0);
        let result: Option<Vec<String>> =
            fetch_with_retries("events", 3, Duration::from_millis(1), || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(CtftError::ElementNotFound {
                        context: "wrapper",
                    })
                }
            })
            .await;

        assert!(result.is_none());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_recovers_after_failures() {
        let attempts = AtomicUsize::new(0);
        let result = fetch_with_retries("schedule", 3, Duration::from_millis(1), || {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err(CtftError::NavigationTimeout {
                        url: "https://competetft.com/en-US/schedule".to_string(),
                        timeout: Duration::from_secs(30),
                    })
                } else {
                    Ok(vec!["day".to_string()])
                }
            }
        })
        .await;

        assert_eq!(result, Some(vec!["day".to_string()]));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }
}
