//! Chromium-backed implementation of the page capability
//!
//! Wraps one chromiumoxide [`Page`] behind [`PageCapability`]. Navigation
//! status comes from the CDP network event stream: the first HTML document
//! response observed after a `goto` is the navigation response, which holds
//! across redirects. Selector waits are bounded polls over `find_element`.

use crate::page::{NavigationResponse, PageCapability, WaitOutcome, WaitUntil};
use crate::{Result, ShigotoError};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, EventResponseReceived, Headers, SetExtraHttpHeadersParams,
};
use chromiumoxide::Page;
use futures::StreamExt;
use std::collections::HashMap;
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long to watch the network event stream for the main document response.
const STATUS_CAPTURE_WINDOW: Duration = Duration::from_secs(10);

/// Poll interval for selector waits.
const SELECTOR_POLL: Duration = Duration::from_millis(100);

/// Launches a Chromium instance and spawns its event handler loop.
///
/// The hardening flags match what the crawl has always run with in
/// containerized environments. The returned task drives the CDP connection
/// and ends when the browser goes away.
pub async fn launch_browser(headless: bool) -> Result<(Browser, JoinHandle<()>)> {
    let mut builder = BrowserConfig::builder().args(vec![
        "--disable-gpu",
        "--disable-dev-shm-usage",
        "--disable-setuid-sandbox",
        "--no-first-run",
        "--no-sandbox",
        "--no-zygote",
    ]);
    if !headless {
        builder = builder.with_head();
    }
    let config = builder
        .build()
        .map_err(ShigotoError::Infrastructure)?;

    let (browser, mut handler) = Browser::launch(config)
        .await
        .map_err(|e| ShigotoError::Infrastructure(format!("failed to launch browser: {e}")))?;

    let handle = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    Ok((browser, handle))
}

/// One rendered Chromium page adapted to the engine's capability trait.
pub struct ChromiumPage {
    page: Page,
}

impl ChromiumPage {
    /// Opens a fresh page in `browser` and enables network events so that
    /// navigation responses can be observed.
    pub async fn open(browser: &Browser) -> Result<Self> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ShigotoError::Infrastructure(format!("failed to open page: {e}")))?;
        page.execute(EnableParams::default())
            .await
            .map_err(|e| ShigotoError::Infrastructure(format!("network enable failed: {e}")))?;
        Ok(Self { page })
    }
}

#[async_trait]
impl PageCapability for ChromiumPage {
    async fn set_request_headers(&self, headers: &HashMap<String, String>) -> Result<()> {
        let value = serde_json::to_value(headers)
            .map_err(|e| ShigotoError::Infrastructure(e.to_string()))?;
        self.page
            .execute(SetExtraHttpHeadersParams::new(Headers::new(value)))
            .await
            .map_err(|e| ShigotoError::Infrastructure(format!("set headers failed: {e}")))?;
        Ok(())
    }

    async fn navigate(&self, url: &str, wait: WaitUntil) -> Result<NavigationResponse> {
        // Subscribe before navigating so the document response is not missed.
        let mut responses = self
            .page
            .event_listener::<EventResponseReceived>()
            .await
            .map_err(|e| ShigotoError::Infrastructure(format!("event listener failed: {e}")))?;

        self.page.goto(url).await.map_err(|e| ShigotoError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        // chromiumoxide exposes a single lifecycle wait; both wait modes map
        // onto it here. The distinction matters for capabilities that can
        // observe network idleness directly.
        if wait == WaitUntil::NetworkSettled {
            let _ = self.page.wait_for_navigation().await;
        }

        let deadline = tokio::time::Instant::now() + STATUS_CAPTURE_WINDOW;
        let mut status = 200u16;
        loop {
            match tokio::time::timeout_at(deadline, responses.next()).await {
                Ok(Some(event)) => {
                    let mime = event.response.mime_type.to_lowercase();
                    if mime.starts_with("text/html") || mime.starts_with("application/xhtml") {
                        status = event.response.status as u16;
                        break;
                    }
                }
                // Stream closed or window elapsed without a document
                // response; assume the navigation itself succeeded.
                Ok(None) | Err(_) => break,
            }
        }

        Ok(NavigationResponse { status })
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<WaitOutcome> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(WaitOutcome::Visible);
            }
            if tokio::time::Instant::now() >= deadline {
                return Ok(WaitOutcome::TimedOut);
            }
            tokio::time::sleep(SELECTOR_POLL).await;
        }
    }

    async fn current_location(&self) -> Result<String> {
        let url = self
            .page
            .url()
            .await
            .map_err(|e| ShigotoError::Infrastructure(format!("location read failed: {e}")))?;
        Ok(url.unwrap_or_default())
    }

    async fn dom_snapshot(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| ShigotoError::Snapshot(e.to_string()))
    }
}
