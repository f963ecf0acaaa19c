use std::time::Duration;

/// Errors produced while configuring or running a crawl
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// The crawl configuration is unusable
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Could not open a WebDriver session
    #[error("WebDriver session error: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    /// A WebDriver command failed
    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    #[error("timed out after {after:?} while {action}")]
    Timeout { action: String, after: Duration },

    /// Navigation kept failing after every retry
    #[error("page load failed after {attempts} attempts: {last_error}")]
    PageLoad { attempts: u32, last_error: String },

    #[error("translation request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The translation endpoint answered with a non-success status
    #[error("translation API error ({status}): {message}")]
    TranslationApi { status: u16, message: String },

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
