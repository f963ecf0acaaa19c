pub mod config;
pub mod crawlers;
pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod retry;
pub mod summarizer;
pub mod translation;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::CrawlerConfig;
pub use error::{CrawlError, Result};
pub use results::PageRecord;

use crawlers::{Traversal, WebDriverBrowser};
use diagnostics::DiagnosticLog;
use translation::{ChunkedTranslator, GoogleTranslator, Translator};

/// Main builder for an about-page crawl
pub struct Crawl {
    config: CrawlerConfig,
}

impl Crawl {
    /// Create a new Crawl builder from a full configuration
    pub fn new(config: CrawlerConfig) -> Self {
        Self { config }
    }

    /// Create a Crawl builder with default settings for `start_url`
    pub fn from_url(start_url: &str) -> Self {
        Self::new(CrawlerConfig::new(start_url))
    }

    /// Load configuration from a file
    pub fn from_config_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self::new(CrawlerConfig::from_file(path)?))
    }

    /// Set the maximum number of link hops
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Set the maximum number of path segments of followed links
    pub fn with_max_path_segments(mut self, max_path_segments: usize) -> Self {
        self.config.max_path_segments = max_path_segments;
        self
    }

    /// Replace the target keywords
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.config.target_keywords = keywords;
        self
    }

    /// Replace the excluded domains
    pub fn with_excluded_domains(mut self, domains: Vec<String>) -> Self {
        self.config.excluded_domains = domains;
        self
    }

    /// Set the WebDriver endpoint
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.browser.webdriver_url = url.to_string();
        self
    }

    /// Enable or disable translation of summaries
    pub fn with_translation(mut self, enabled: bool) -> Self {
        self.config.translation.enabled = enabled;
        self
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Connects to WebDriver, crawls, and returns the page records in
    /// traversal order
    ///
    /// Only configuration and WebDriver connection problems are errors;
    /// page-level failures end up in the records.
    pub async fn run(mut self) -> Result<Vec<PageRecord>> {
        self.prepare()?;

        let translation = &self.config.translation;
        let diagnostics = if translation.enabled {
            DiagnosticLog::open(&self.config.error_log_path)?
        } else {
            DiagnosticLog::disabled()
        };
        let translator =
            ChunkedTranslator::new(GoogleTranslator::new(translation)?, translation, diagnostics);
        self.run_with_translator(translator).await
    }

    /// Like [`Crawl::run`] with a caller-supplied translation service
    pub async fn run_with_translator<T: Translator>(
        mut self,
        translator: ChunkedTranslator<T>,
    ) -> Result<Vec<PageRecord>> {
        self.prepare()?;
        let start_url = self.config.start_url()?;
        let traversal = Traversal::new(&self.config, &translator)?;

        let mut browser = WebDriverBrowser::connect(&self.config.browser).await?;
        let records = traversal.run(&mut browser, &start_url).await;

        if let Err(e) = browser.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }
        Ok(records)
    }

    /// Applies environment overrides and validates the configuration
    fn prepare(&mut self) -> Result<()> {
        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.config.browser.webdriver_url = webdriver_url;
            }
        }
        self.config.validate()
    }
}
