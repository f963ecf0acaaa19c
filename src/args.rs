use about_crawl::CrawlerConfig;
use clap::Parser;
use std::error::Error;

#[derive(Parser, Debug)]
#[command(name = "about-crawl")]
#[command(about = "Crawls about-us pages, summarizes them and translates the summaries to English")]
#[command(version)]
pub struct Args {
    /// URL to start crawling from (required unless --config sets it)
    pub url: Option<String>,

    /// Path to a JSON crawler configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Maximum number of link hops from the start URL
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Maximum number of path segments of a followed link
    #[arg(long)]
    pub max_path_segments: Option<usize>,

    /// Keyword a link path must contain (repeatable, replaces the defaults)
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Domain never to follow (repeatable, replaces the defaults)
    #[arg(long = "exclude-domain")]
    pub excluded_domains: Vec<String>,

    /// WebDriver endpoint
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Lead sentences kept per paragraph
    #[arg(short, long)]
    pub sentences: Option<usize>,

    /// Where to write the JSON records
    #[arg(short, long)]
    pub output: Option<String>,

    /// Where to append translation failures
    #[arg(long)]
    pub error_log: Option<String>,

    /// Skip translation; translated content mirrors the summary
    #[arg(long)]
    pub no_translate: bool,
}

impl Args {
    /// Builds the crawler configuration from the config file and overrides
    pub fn into_config(self) -> Result<CrawlerConfig, Box<dyn Error>> {
        let mut config = match (&self.config, &self.url) {
            (Some(path), _) => CrawlerConfig::from_file(path)?,
            (None, Some(url)) => CrawlerConfig::new(url),
            (None, None) => return Err("a start URL or --config is required".into()),
        };

        if let Some(url) = self.url {
            config.start_url = url;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(max_path_segments) = self.max_path_segments {
            config.max_path_segments = max_path_segments;
        }
        if !self.keywords.is_empty() {
            config.target_keywords = self.keywords;
        }
        if !self.excluded_domains.is_empty() {
            config.excluded_domains = self.excluded_domains;
        }
        if let Some(webdriver_url) = self.webdriver_url {
            config.browser.webdriver_url = webdriver_url;
        }
        if let Some(sentences) = self.sentences {
            config.summary.sentences = sentences;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(error_log) = self.error_log {
            config.error_log_path = error_log;
        }
        if self.no_translate {
            config.translation.enabled = false;
        }

        Ok(config)
    }
}
