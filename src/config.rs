use crate::error::{CrawlError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Configuration for an about-page crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// URL to start crawling from
    pub start_url: String,

    /// Maximum number of link hops away from the start URL
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum number of path segments a followed URL may have
    #[serde(default = "default_max_path_segments")]
    pub max_path_segments: usize,

    /// Substrings that mark a URL path as worth crawling
    #[serde(default = "default_target_keywords")]
    pub target_keywords: Vec<String>,

    /// Hosts (and their subdomains) that are never followed
    #[serde(default = "default_excluded_domains")]
    pub excluded_domains: Vec<String>,

    /// Regex patterns for URLs to exclude
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub summary: SummaryConfig,

    #[serde(default)]
    pub translation: TranslationConfig,

    /// Where the JSON records are written
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// Append-only log of failed translation attempts
    #[serde(default = "default_error_log_path")]
    pub error_log_path: String,
}

/// Settings for the WebDriver-backed fetch service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    #[serde(default = "default_true")]
    pub headless: bool,

    /// Navigation timeout per attempt
    #[serde(default = "default_page_load_timeout_ms")]
    pub page_load_timeout_ms: u64,

    /// How long to wait for `body` once navigation finished
    #[serde(default = "default_body_wait_timeout_ms")]
    pub body_wait_timeout_ms: u64,

    #[serde(default = "default_goto_attempts")]
    pub goto_attempts: u32,

    #[serde(default = "default_goto_retry_delay_ms")]
    pub goto_retry_delay_ms: u64,

    /// Pause after clicking a cookie-consent button
    #[serde(default = "default_cookie_dismiss_pause_ms")]
    pub cookie_dismiss_pause_ms: u64,
}

/// Settings for the paragraph summarizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Lead sentences kept per paragraph
    #[serde(default = "default_sentences")]
    pub sentences: usize,

    /// Paragraphs shorter than this are treated as navigation noise
    #[serde(default = "default_min_paragraph_chars")]
    pub min_paragraph_chars: usize,
}

/// Settings for the chunked translation wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Translation endpoint (Google `translate_a/single` compatible)
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_source_language")]
    pub source_language: String,

    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Maximum characters sent per request
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    #[serde(default = "default_translation_attempts")]
    pub attempts: u32,

    #[serde(default = "default_translation_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl CrawlerConfig {
    /// Create a new configuration with default values
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            max_depth: default_max_depth(),
            max_path_segments: default_max_path_segments(),
            target_keywords: default_target_keywords(),
            excluded_domains: default_excluded_domains(),
            exclude_patterns: Vec::new(),
            browser: BrowserConfig::default(),
            summary: SummaryConfig::default(),
            translation: TranslationConfig::default(),
            output_path: default_output_path(),
            error_log_path: default_error_log_path(),
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Parses the start URL, rejecting anything a browser cannot crawl
    pub fn start_url(&self) -> Result<Url> {
        let url = Url::parse(&self.start_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(CrawlError::Config(format!(
                "start URL must be http(s), got scheme '{}'",
                other
            ))),
        }
    }

    /// Checks the configuration before any browser session is opened
    pub fn validate(&self) -> Result<()> {
        self.start_url()?;

        if self.summary.sentences == 0 {
            return Err(CrawlError::Config(
                "summary.sentences must be at least 1".to_string(),
            ));
        }
        if self.translation.max_chunk_chars == 0 {
            return Err(CrawlError::Config(
                "translation.max_chunk_chars must be at least 1".to_string(),
            ));
        }
        if self.translation.attempts == 0 || self.browser.goto_attempts == 0 {
            return Err(CrawlError::Config(
                "retry attempt counts must be at least 1".to_string(),
            ));
        }
        for pattern in &self.exclude_patterns {
            regex::Regex::new(pattern)?;
        }
        Ok(())
    }
}

impl BrowserConfig {
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_millis(self.page_load_timeout_ms)
    }

    pub fn body_wait_timeout(&self) -> Duration {
        Duration::from_millis(self.body_wait_timeout_ms)
    }

    pub fn goto_retry_delay(&self) -> Duration {
        Duration::from_millis(self.goto_retry_delay_ms)
    }

    pub fn cookie_dismiss_pause(&self) -> Duration {
        Duration::from_millis(self.cookie_dismiss_pause_ms)
    }
}

impl TranslationConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: true,
            page_load_timeout_ms: default_page_load_timeout_ms(),
            body_wait_timeout_ms: default_body_wait_timeout_ms(),
            goto_attempts: default_goto_attempts(),
            goto_retry_delay_ms: default_goto_retry_delay_ms(),
            cookie_dismiss_pause_ms: default_cookie_dismiss_pause_ms(),
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            sentences: default_sentences(),
            min_paragraph_chars: default_min_paragraph_chars(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_translation_endpoint(),
            source_language: default_source_language(),
            target_language: default_target_language(),
            max_chunk_chars: default_max_chunk_chars(),
            attempts: default_translation_attempts(),
            retry_delay_ms: default_translation_retry_delay_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

fn default_max_depth() -> usize {
    1
}

fn default_max_path_segments() -> usize {
    3
}

fn default_target_keywords() -> Vec<String> {
    ["about", "who-we-are", "company"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_excluded_domains() -> Vec<String> {
    vec!["linkedin.com".to_string()]
}

fn default_output_path() -> String {
    "scraped_about_company_info_with_summary.json".to_string()
}

fn default_error_log_path() -> String {
    "translation_errors.log".to_string()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_true() -> bool {
    true
}

fn default_page_load_timeout_ms() -> u64 {
    20_000
}

fn default_body_wait_timeout_ms() -> u64 {
    5_000
}

fn default_goto_attempts() -> u32 {
    3
}

fn default_goto_retry_delay_ms() -> u64 {
    2_000
}

fn default_cookie_dismiss_pause_ms() -> u64 {
    1_000
}

fn default_sentences() -> usize {
    3
}

fn default_min_paragraph_chars() -> usize {
    60
}

fn default_translation_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

/// Stays under the request size limit of the public translation endpoint
fn default_max_chunk_chars() -> usize {
    4999
}

fn default_translation_attempts() -> u32 {
    3
}

fn default_translation_retry_delay_ms() -> u64 {
    5_000
}

fn default_request_timeout_ms() -> u64 {
    30_000
}
