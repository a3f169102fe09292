//! Test fixtures: a scripted page capability and collecting sinks

use async_trait::async_trait;
use shigoto::output::{PageResult, Sink, SinkResult};
use shigoto::page::{NavigationResponse, PageCapability, WaitOutcome, WaitUntil};
use shigoto::{Config, Result, ShigotoError};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// What the fake page serves for one navigation.
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    pub status: u16,
    /// Location reported after the navigation; None means the requested URL.
    pub location: Option<String>,
    pub selector_found: bool,
    pub html: String,
    /// When set, the navigation itself fails with an infrastructure error.
    pub fail_navigation: bool,
}

impl ScriptedResponse {
    /// A listing page with one well-formed job card per posting URL.
    pub fn listing(posting_urls: &[&str]) -> Self {
        let cards: Vec<String> = posting_urls
            .iter()
            .enumerate()
            .map(|(i, url)| job_card(&format!("React Developer {i}"), url))
            .collect();
        Self {
            status: 200,
            location: None,
            selector_found: true,
            html: format!("<html><body><ul>{}</ul></body></html>", cards.join("\n")),
            fail_navigation: false,
        }
    }

    /// A page where the listing selector never shows up.
    pub fn empty() -> Self {
        Self {
            status: 200,
            location: None,
            selector_found: false,
            html: "<html><body></body></html>".to_string(),
            fail_navigation: false,
        }
    }

    /// An HTTP 429 answer.
    pub fn rate_limited() -> Self {
        Self {
            status: 429,
            ..Self::empty()
        }
    }

    /// A redirect to the authentication interstitial.
    pub fn soft_wall() -> Self {
        Self {
            location: Some("https://www.linkedin.com/authwall?trk=qf".to_string()),
            ..Self::empty()
        }
    }

    /// A navigation that dies outright.
    pub fn broken() -> Self {
        Self {
            fail_navigation: true,
            ..Self::empty()
        }
    }

    /// A posting detail page carrying a description container.
    pub fn detail(description_html: &str) -> Self {
        Self {
            status: 200,
            location: None,
            selector_found: true,
            html: format!(
                r#"<html><body><div class="show-more-less-html__markup">{description_html}</div></body></html>"#
            ),
            fail_navigation: false,
        }
    }
}

/// One well-formed job card.
pub fn job_card(title: &str, posting_url: &str) -> String {
    format!(
        r#"<li>
          <div class="base-card base-search-card" data-entity-urn="urn:li:jobPosting:7">
            <a class="base-card__full-link" href="{posting_url}"></a>
            <h3 class="base-search-card__title">{title}</h3>
            <h4 class="base-search-card__subtitle">Acme Corp</h4>
            <span class="job-search-card__location">Berlin, Germany</span>
            <time class="job-search-card__listdate" datetime="2024-03-01"></time>
          </div>
        </li>"#
    )
}

/// Scripted implementation of the page capability.
///
/// Each URL maps to a queue of responses: navigations pop the queue until
/// one entry is left, which then repeats. Unscripted URLs serve an empty
/// page.
#[derive(Default)]
pub struct FakePage {
    scripts: Mutex<HashMap<String, VecDeque<ScriptedResponse>>>,
    current: Mutex<Option<(String, ScriptedResponse)>>,
    pub navigations: Mutex<Vec<String>>,
    pub fail_headers: bool,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page whose header application fails, i.e. an unusable capability.
    pub fn with_failing_headers() -> Self {
        Self {
            fail_headers: true,
            ..Self::default()
        }
    }

    pub fn script(&self, url: &str, responses: Vec<ScriptedResponse>) {
        self.scripts
            .lock()
            .unwrap()
            .insert(url.to_string(), responses.into());
    }

    pub fn navigation_count(&self, url: &str) -> usize {
        self.navigations
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.as_str() == url)
            .count()
    }
}

#[async_trait]
impl PageCapability for FakePage {
    async fn set_request_headers(&self, _headers: &HashMap<String, String>) -> Result<()> {
        if self.fail_headers {
            return Err(ShigotoError::Infrastructure(
                "scripted header failure".to_string(),
            ));
        }
        Ok(())
    }

    async fn navigate(&self, url: &str, _wait: WaitUntil) -> Result<NavigationResponse> {
        self.navigations.lock().unwrap().push(url.to_string());

        let response = {
            let mut scripts = self.scripts.lock().unwrap();
            match scripts.get_mut(url) {
                Some(queue) if queue.len() > 1 => {
                    queue.pop_front().unwrap_or_else(ScriptedResponse::empty)
                }
                Some(queue) => queue.front().cloned().unwrap_or_else(ScriptedResponse::empty),
                None => ScriptedResponse::empty(),
            }
        };

        if response.fail_navigation {
            return Err(ShigotoError::Infrastructure(
                "scripted navigation failure".to_string(),
            ));
        }

        let status = response.status;
        *self.current.lock().unwrap() = Some((url.to_string(), response));
        Ok(NavigationResponse { status })
    }

    async fn wait_for_selector(&self, _selector: &str, _timeout: Duration) -> Result<WaitOutcome> {
        let current = self.current.lock().unwrap();
        match current.as_ref() {
            Some((_, response)) if response.selector_found => Ok(WaitOutcome::Visible),
            _ => Ok(WaitOutcome::TimedOut),
        }
    }

    async fn current_location(&self) -> Result<String> {
        let current = self.current.lock().unwrap();
        Ok(current
            .as_ref()
            .map(|(url, response)| response.location.clone().unwrap_or_else(|| url.clone()))
            .unwrap_or_default())
    }

    async fn dom_snapshot(&self) -> Result<String> {
        let current = self.current.lock().unwrap();
        Ok(current
            .as_ref()
            .map(|(_, response)| response.html.clone())
            .unwrap_or_default())
    }
}

/// Sink that keeps every accepted page for inspection.
#[derive(Default)]
pub struct CollectingSink {
    pub pages: Vec<PageResult>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sink for CollectingSink {
    fn accept(&mut self, result: PageResult) -> SinkResult<()> {
        self.pages.push(result);
        Ok(())
    }
}

/// Sink that refuses every page.
pub struct FailingSink;

impl Sink for FailingSink {
    fn accept(&mut self, _result: PageResult) -> SinkResult<()> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "scripted sink failure").into())
    }
}

/// A single-query configuration with test-friendly timings.
pub fn test_config(technologies: &[&str]) -> Config {
    let mut config = Config::default();
    config.search.locations = vec![String::new()];
    config.search.technologies = technologies.iter().map(|t| t.to_string()).collect();
    config.search.tags = vec!["react".to_string()];
    config.retry.max_attempts = 2;
    config.retry.base_delay_ms = 1;
    config.retry.description_max_attempts = 2;
    config.crawler.selector_timeout_ms = 100;
    config
}
