//! In-memory browser for exercising scraping and traversal.

use crate::crawlers::browser::{Browser, ElementQuery};
use crate::error::{CrawlError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// A page served by [`MockBrowser`]
#[derive(Debug, Clone)]
pub struct MockPage {
    text: String,
    links: Vec<String>,
    failures: u32,
}

impl MockPage {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            links: Vec::new(),
            failures: 0,
        }
    }

    /// Hrefs rendered as `<a>` elements, relative ones included
    pub fn with_links(mut self, links: &[&str]) -> Self {
        self.links = links.iter().map(|l| l.to_string()).collect();
        self
    }

    /// The first `n` navigations to this page fail
    pub fn failing_first(mut self, n: u32) -> Self {
        self.failures = n;
        self
    }
}

/// Serves pages from a map keyed by exact URL; unknown URLs fail to load
#[derive(Debug, Default)]
pub struct MockBrowser {
    pages: HashMap<String, MockPage>,
    goto_calls: HashMap<String, u32>,
    current: Option<String>,
    cookie_button: Option<ElementQuery>,
    broken_dom: bool,
    broken_source: bool,
    /// Every `goto` call, failed ones included
    pub navigations: Vec<String>,
    pub clicked: Vec<ElementQuery>,
    pub removed: Vec<String>,
    /// Number of `page_source` calls
    pub source_reads: u32,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, page: MockPage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    pub fn with_cookie_button(mut self, query: ElementQuery) -> Self {
        self.cookie_button = Some(query);
        self
    }

    /// Clicking and element removal always fail
    pub fn with_broken_dom_actions(mut self) -> Self {
        self.broken_dom = true;
        self
    }

    /// Reading the page source always fails
    pub fn with_broken_source(mut self) -> Self {
        self.broken_source = true;
        self
    }

    /// URLs that were successfully loaded, in order
    pub fn loaded(&self) -> Vec<String> {
        let mut seen_calls: HashMap<&str, u32> = HashMap::new();
        self.navigations
            .iter()
            .filter(|url| {
                let calls = seen_calls.entry(url.as_str()).or_default();
                *calls += 1;
                self.pages
                    .get(url.as_str())
                    .is_some_and(|page| *calls > page.failures)
            })
            .cloned()
            .collect()
    }

    fn current_page(&self) -> Result<&MockPage> {
        self.current
            .as_ref()
            .and_then(|url| self.pages.get(url))
            .ok_or_else(|| CrawlError::UnexpectedResponse("no page loaded".to_string()))
    }
}

#[async_trait]
impl Browser for MockBrowser {
    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<()> {
        self.navigations.push(url.to_string());
        let calls = self.goto_calls.entry(url.to_string()).or_default();
        *calls += 1;

        match self.pages.get(url) {
            Some(page) if *calls > page.failures => {
                self.current = Some(url.to_string());
                Ok(())
            }
            _ => {
                self.current = None;
                Err(CrawlError::Timeout {
                    action: format!("loading {}", url),
                    after: timeout,
                })
            }
        }
    }

    async fn wait_for(&mut self, _css: &str, _timeout: Duration) -> Result<()> {
        self.current_page().map(|_| ())
    }

    async fn click_first(&mut self, query: ElementQuery) -> Result<bool> {
        if self.broken_dom {
            return Err(CrawlError::UnexpectedResponse("stale element".to_string()));
        }
        if self.cookie_button == Some(query) {
            self.clicked.push(query);
            return Ok(true);
        }
        Ok(false)
    }

    async fn remove_all(&mut self, css: &str) -> Result<()> {
        if self.broken_dom {
            return Err(CrawlError::UnexpectedResponse("script error".to_string()));
        }
        self.removed.push(css.to_string());
        Ok(())
    }

    async fn inner_text(&mut self, _css: &str) -> Result<String> {
        Ok(self.current_page()?.text.clone())
    }

    async fn page_source(&mut self) -> Result<String> {
        self.source_reads += 1;
        if self.broken_source {
            return Err(CrawlError::UnexpectedResponse("source unavailable".to_string()));
        }
        let anchors: String = self
            .current_page()?
            .links
            .iter()
            .map(|href| format!("<a href=\"{}\">link</a>\n", href))
            .collect();
        Ok(format!("<html><body>\n{}</body></html>", anchors))
    }

    async fn current_url(&mut self) -> Result<Url> {
        let url = self
            .current
            .as_deref()
            .ok_or_else(|| CrawlError::UnexpectedResponse("no page loaded".to_string()))?;
        Ok(Url::parse(url)?)
    }
}
