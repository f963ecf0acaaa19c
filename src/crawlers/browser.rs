use crate::config::BrowserConfig;
use crate::error::{CrawlError, Result};
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Map, Value, json};
use std::time::Duration;
use url::Url;

/// A way of locating elements in the rendered DOM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementQuery {
    Css(&'static str),
    XPath(&'static str),
}

impl ElementQuery {
    fn locator(&self) -> Locator<'static> {
        match *self {
            ElementQuery::Css(css) => Locator::Css(css),
            ElementQuery::XPath(xpath) => Locator::XPath(xpath),
        }
    }
}

/// A rendering browser session used to fetch and inspect pages
///
/// One session serves one traversal; navigation replaces the current page.
#[async_trait]
pub trait Browser: Send {
    /// Navigates to `url`, returning once the DOM is ready
    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<()>;

    /// Waits until an element matching `css` exists
    async fn wait_for(&mut self, css: &str, timeout: Duration) -> Result<()>;

    /// Clicks the first element matching `query`; false if none matched
    async fn click_first(&mut self, query: ElementQuery) -> Result<bool>;

    /// Removes every element matching `css` from the DOM
    async fn remove_all(&mut self, css: &str) -> Result<()>;

    /// Rendered text of the first element matching `css`
    async fn inner_text(&mut self, css: &str) -> Result<String>;

    async fn page_source(&mut self) -> Result<String>;

    /// URL of the current page after redirects
    async fn current_url(&mut self) -> Result<Url>;
}

/// Common local WebDriver endpoints tried when the configured one is down
const FALLBACK_WEBDRIVER_URLS: [&str; 3] = [
    "http://localhost:9515", // ChromeDriver default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
    "http://localhost:4444", // geckodriver / Selenium default
];

/// [`Browser`] backed by a WebDriver session
pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    /// Connects to the configured WebDriver, falling back to common local
    /// endpoints
    pub async fn connect(config: &BrowserConfig) -> Result<Self> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(capabilities(config));

        let first_error = match builder.connect(&config.webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", config.webdriver_url);
                return Ok(Self { client });
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    config.webdriver_url,
                    e
                );
                e
            }
        };

        for url in FALLBACK_WEBDRIVER_URLS.iter() {
            if *url == config.webdriver_url {
                continue;
            }
            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = builder.connect(url).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(Self { client });
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(first_error.into())
    }

    /// Ends the WebDriver session
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

/// Session capabilities: DOM-ready navigation, page-load timeout, headless
fn capabilities(config: &BrowserConfig) -> Map<String, Value> {
    let mut caps = Map::new();
    // Navigation returns at DOMContentLoaded
    caps.insert("pageLoadStrategy".to_string(), json!("eager"));
    caps.insert(
        "timeouts".to_string(),
        json!({ "pageLoad": config.page_load_timeout_ms }),
    );
    if config.headless {
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({ "args": ["--headless=new", "--disable-gpu", "--no-sandbox"] }),
        );
        caps.insert(
            "moz:firefoxOptions".to_string(),
            json!({ "args": ["-headless"] }),
        );
    }
    caps
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<()> {
        match tokio::time::timeout(timeout, self.client.goto(url)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(CrawlError::Timeout {
                action: format!("loading {}", url),
                after: timeout,
            }),
        }
    }

    async fn wait_for(&mut self, css: &str, timeout: Duration) -> Result<()> {
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(css))
            .await?;
        Ok(())
    }

    async fn click_first(&mut self, query: ElementQuery) -> Result<bool> {
        let elements = self.client.find_all(query.locator()).await?;
        match elements.into_iter().next() {
            Some(element) => {
                element.click().await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_all(&mut self, css: &str) -> Result<()> {
        self.client
            .execute(
                "document.querySelectorAll(arguments[0]).forEach(el => el.remove());",
                vec![json!(css)],
            )
            .await?;
        Ok(())
    }

    async fn inner_text(&mut self, css: &str) -> Result<String> {
        let value = self
            .client
            .execute(
                "const el = document.querySelector(arguments[0]); return el ? el.innerText : null;",
                vec![json!(css)],
            )
            .await?;
        match value {
            Value::String(text) => Ok(text),
            _ => Err(CrawlError::UnexpectedResponse(format!(
                "no element matches '{}'",
                css
            ))),
        }
    }

    async fn page_source(&mut self) -> Result<String> {
        Ok(self.client.source().await?)
    }

    async fn current_url(&mut self) -> Result<Url> {
        Ok(self.client.current_url().await?)
    }
}
