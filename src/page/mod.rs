//! The rendered-page capability boundary
//!
//! The crawl engine never talks to a browser directly; it drives a single
//! rendered page through this trait. Navigations, selector waits and DOM
//! snapshots are all asynchronous and may fail. Exactly one operation is in
//! flight against a given page handle at a time, enforced by sequencing in
//! the callers rather than by locking here.

mod chrome;

pub use chrome::{launch_browser, ChromiumPage};

use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// How long a navigation should wait before it is considered complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// The document fired its load event.
    Load,
    /// Network activity has settled (rendered content is in place).
    NetworkSettled,
}

/// The response observed for a completed navigation.
#[derive(Debug, Clone, Copy)]
pub struct NavigationResponse {
    /// HTTP status of the main document response.
    pub status: u16,
}

/// Result of waiting for an element to appear.
///
/// A timeout is an outcome, not an error: the caller decides whether it
/// means an empty page or something worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Visible,
    TimedOut,
}

/// One controllable rendered page.
///
/// All operations are potentially slow and potentially failing; none may be
/// assumed synchronous. Implementations exist over a real browser
/// ([`ChromiumPage`]) and as scripted fakes in tests.
#[async_trait]
pub trait PageCapability {
    /// Applies extra HTTP headers to every subsequent request from this page.
    async fn set_request_headers(&self, headers: &HashMap<String, String>) -> Result<()>;

    /// Navigates to `url` and waits per `wait`, reporting the main document's
    /// HTTP status.
    async fn navigate(&self, url: &str, wait: WaitUntil) -> Result<NavigationResponse>;

    /// Waits up to `timeout` for `selector` to be visible on the current page.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<WaitOutcome>;

    /// The page's current location href (soft walls announce themselves here,
    /// not through HTTP status codes).
    async fn current_location(&self) -> Result<String>;

    /// Serialized HTML of the current document. Extraction runs over this
    /// snapshot as a pure function, so nothing has to execute inside the
    /// page's own context.
    async fn dom_snapshot(&self) -> Result<String>;
}
