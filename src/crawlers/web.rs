use crate::config::BrowserConfig;
use crate::crawlers::browser::{Browser, ElementQuery};
use crate::error::{CrawlError, Result};
use crate::retry::RetryPolicy;
use std::time::Duration;

/// Cookie-consent buttons, tried in order; only the first match is clicked
///
/// "Accept" matches ignore case. "OK" stays case-sensitive so it does not
/// match words like "cookie" or "book".
const COOKIE_BUTTONS: [ElementQuery; 6] = [
    ElementQuery::XPath(
        "//button[contains(translate(., 'ABCDEFGHIJKLMNOPQRSTUVWXYZ', 'abcdefghijklmnopqrstuvwxyz'), 'accept')]",
    ),
    ElementQuery::XPath(
        "//button[contains(translate(., 'ABCDEFGHIJKLMNOPQRSTUVWXYZ', 'abcdefghijklmnopqrstuvwxyz'), 'i accept')]",
    ),
    ElementQuery::XPath("//button[contains(., 'OK')]"),
    ElementQuery::Css("div[class*='cookie'] button"),
    ElementQuery::Css("[aria-label*='Accept']"),
    ElementQuery::Css("button[class*='cookie']"),
];

/// Elements removed before reading page text
const NOISE_SELECTORS: [&str; 4] = ["script", "style", "img", "input"];

/// Fetches rendered page text through a [`Browser`]
#[derive(Debug, Clone)]
pub struct PageScraper {
    goto_policy: RetryPolicy,
    page_load_timeout: Duration,
    body_wait_timeout: Duration,
    cookie_pause: Duration,
}

impl PageScraper {
    pub fn new(config: &BrowserConfig) -> Self {
        Self {
            goto_policy: RetryPolicy::new(config.goto_attempts, config.goto_retry_delay()),
            page_load_timeout: config.page_load_timeout(),
            body_wait_timeout: config.body_wait_timeout(),
            cookie_pause: config.cookie_dismiss_pause(),
        }
    }

    /// Loads `url` and returns the body text with noise elements stripped
    ///
    /// Navigation is retried; cookie dismissal and noise stripping are best
    /// effort and never fail the scrape.
    pub async fn scrape<B: Browser + ?Sized>(&self, browser: &mut B, url: &str) -> Result<String> {
        let started = std::time::Instant::now();

        self.load(browser, url).await?;
        browser.wait_for("body", self.body_wait_timeout).await?;

        dismiss_cookie_popup(browser, self.cookie_pause).await;
        strip_noise(browser).await;

        let text = browser.inner_text("body").await?;
        ::log::debug!(
            "Scraped {} characters from {} in {:.2} seconds",
            text.chars().count(),
            url,
            started.elapsed().as_secs_f64()
        );
        Ok(text)
    }

    /// Navigates with retries
    async fn load<B: Browser + ?Sized>(&self, browser: &mut B, url: &str) -> Result<()> {
        let attempts = self.goto_policy.attempts();
        let mut attempt = 1;
        loop {
            match browser.goto(url, self.page_load_timeout).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    ::log::warn!("Goto failed ({}/{}) for {}: {}", attempt, attempts, url, e);
                    if !self.goto_policy.before_retry(attempt).await {
                        return Err(CrawlError::PageLoad {
                            attempts,
                            last_error: e.to_string(),
                        });
                    }
                    attempt += 1;
                }
            }
        }
    }
}

/// Clicks the first cookie-consent button found; failures are ignored
pub async fn dismiss_cookie_popup<B: Browser + ?Sized>(browser: &mut B, pause: Duration) {
    for query in COOKIE_BUTTONS {
        match browser.click_first(query).await {
            Ok(true) => {
                ::log::debug!("Dismissed cookie popup via {:?}", query);
                if !pause.is_zero() {
                    tokio::time::sleep(pause).await;
                }
                return;
            }
            Ok(false) => {}
            Err(e) => {
                ::log::trace!("Cookie button {:?} not clickable: {}", query, e);
            }
        }
    }
}

/// Removes scripts, styles, images and inputs from the rendered DOM
pub async fn strip_noise<B: Browser + ?Sized>(browser: &mut B) {
    for selector in NOISE_SELECTORS {
        if let Err(e) = browser.remove_all(selector).await {
            ::log::debug!("Could not remove '{}' elements: {}", selector, e);
        }
    }
}
