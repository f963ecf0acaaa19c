use crate::config::CrawlerConfig;
use crate::crawlers::browser::Browser;
use crate::crawlers::web::PageScraper;
use crate::error::Result;
use crate::filter::{UrlFilter, UrlFilterConfig, VisitedSet, normalize_url};
use crate::parsers::html;
use crate::results::PageRecord;
use crate::summarizer::ParagraphSummarizer;
use crate::translation::{ChunkedTranslator, Translator};
use url::Url;

/// Depth-first, depth-bounded crawl of keyword-matching links
///
/// Every normalized URL is fetched at most once per [`VisitedSet`]. Records
/// come out in pre-order: a page, then the pages reached through its links
/// in the order the links appear.
pub struct Traversal<'a, T> {
    max_depth: usize,
    filter: UrlFilter,
    scraper: PageScraper,
    summarizer: ParagraphSummarizer,
    translator: &'a ChunkedTranslator<T>,
}

impl<'a, T: Translator> Traversal<'a, T> {
    pub fn new(config: &CrawlerConfig, translator: &'a ChunkedTranslator<T>) -> Result<Self> {
        Ok(Self {
            max_depth: config.max_depth,
            filter: UrlFilter::new(UrlFilterConfig::from(config))?,
            scraper: PageScraper::new(&config.browser),
            summarizer: ParagraphSummarizer::new(&config.summary),
            translator,
        })
    }

    /// Crawls from `start_url` with a fresh visited set
    pub async fn run<B: Browser + ?Sized>(&self, browser: &mut B, start_url: &Url) -> Vec<PageRecord> {
        let mut visited = VisitedSet::new();
        self.run_with(browser, start_url, &mut visited).await
    }

    /// Crawls from `start_url`, skipping anything already in `visited`
    pub async fn run_with<B: Browser + ?Sized>(
        &self,
        browser: &mut B,
        start_url: &Url,
        visited: &mut VisitedSet,
    ) -> Vec<PageRecord> {
        ::log::info!("Starting traversal at {} (max depth {})", start_url, self.max_depth);

        let mut records = Vec::new();
        // Explicit stack in place of recursion; children are pushed in
        // reverse so the first discovered link is popped next.
        let mut pending: Vec<(Url, usize)> = vec![(start_url.clone(), 0)];

        while let Some((url, depth)) = pending.pop() {
            let Some(normalized) = self.admit(&url, depth, visited) else {
                continue;
            };
            visited.insert(normalized.clone());

            let (record, links) = self.visit(browser, &normalized, depth, visited).await;
            records.push(record);

            if !links.is_empty() {
                ::log::info!(
                    "Queuing {} links from {} at depth {}",
                    links.len(),
                    normalized,
                    depth + 1
                );
            }
            pending.extend(links.into_iter().rev().map(|link| (link, depth + 1)));
        }

        ::log::info!(
            "Traversal complete: {} pages, {} failed",
            records.len(),
            records.iter().filter(|r| r.is_error()).count()
        );
        records
    }

    /// Returns the normalized URL if it may be fetched at this depth
    fn admit(&self, url: &Url, depth: usize, visited: &VisitedSet) -> Option<String> {
        let normalized = normalize_url(url);
        if visited.contains(&normalized) {
            ::log::trace!("Skipping already visited: {}", normalized);
            return None;
        }
        if depth > self.max_depth {
            ::log::debug!("Skipping {} beyond max depth {}", normalized, self.max_depth);
            return None;
        }
        if !self.filter.within_path_bound(url) {
            ::log::debug!("Skipping {} with too many path segments", normalized);
            return None;
        }
        Some(normalized)
    }

    /// Scrapes, summarizes and translates one page, returning its record and
    /// the links worth following from it. Pages at the depth limit have no
    /// followable links.
    async fn visit<B: Browser + ?Sized>(
        &self,
        browser: &mut B,
        url: &str,
        depth: usize,
        visited: &VisitedSet,
    ) -> (PageRecord, Vec<Url>) {
        ::log::info!("Scraping: {}", url);

        let content = match self.scraper.scrape(browser, url).await {
            Ok(content) => content,
            Err(e) => {
                ::log::error!("Failed to scrape {}: {}", url, e);
                return (PageRecord::failed(url.to_string(), e.to_string()), Vec::new());
            }
        };

        let summarized = self.summarizer.summarize(&content);
        let mut translated = Vec::with_capacity(summarized.len());
        for paragraph in &summarized {
            translated.push(self.translator.translate(paragraph).await);
        }

        let links = if depth >= self.max_depth {
            Vec::new()
        } else {
            match self.discover_links(browser, visited).await {
                Ok(links) => links,
                Err(e) => {
                    ::log::error!("Failed to extract links from {}: {}", url, e);
                    Vec::new()
                }
            }
        };

        (
            PageRecord::scraped(url.to_string(), content, summarized, translated),
            links,
        )
    }

    /// Outbound links of the current page that pass the link filter
    async fn discover_links<B: Browser + ?Sized>(
        &self,
        browser: &mut B,
        visited: &VisitedSet,
    ) -> Result<Vec<Url>> {
        let base = browser.current_url().await?;
        let source = browser.page_source().await?;

        let links = html::extract_links(&source, &base)
            .into_iter()
            .filter_map(|link| {
                let followable = self.filter.followable(&link, visited);
                if followable.is_none() {
                    ::log::trace!("URL filter rejected: {}", link);
                }
                followable
            })
            .collect();
        Ok(links)
    }
}
