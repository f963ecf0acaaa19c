use crate::config::CrawlerConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use url::Url;

/// Canonical form used for visitation: `scheme://host[:port]/path` without
/// trailing slashes, query or fragment
pub fn normalize_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    let authority = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };
    format!(
        "{}://{}{}",
        url.scheme(),
        authority,
        url.path().trim_end_matches('/')
    )
}

/// Number of non-empty `/`-separated segments in the URL path
pub fn path_depth(url: &Url) -> usize {
    url.path().split('/').filter(|s| !s.is_empty()).count()
}

/// Normalized URLs already handed to the fetch service during one traversal
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, normalized: &str) -> bool {
        self.urls.contains(normalized)
    }

    /// Records a URL, returning false if it was already present
    pub fn insert(&mut self, normalized: String) -> bool {
        self.urls.insert(normalized)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Configuration for link filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlFilterConfig {
    /// A link path must contain at least one of these (case-insensitive)
    pub target_keywords: Vec<String>,

    /// Hosts never followed, subdomains included
    #[serde(default)]
    pub excluded_domains: Vec<String>,

    /// Upper bound on path segments of a followed link
    pub max_path_segments: usize,

    /// Regex patterns for URLs to exclude
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl From<&CrawlerConfig> for UrlFilterConfig {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            target_keywords: config.target_keywords.clone(),
            excluded_domains: config.excluded_domains.clone(),
            max_path_segments: config.max_path_segments,
            exclude_patterns: config.exclude_patterns.clone(),
        }
    }
}

/// Decides which discovered links are worth following
#[derive(Debug)]
pub struct UrlFilter {
    keywords: Vec<String>,
    excluded_domains: Vec<String>,
    max_path_segments: usize,
    exclude_regexes: Vec<Regex>,
}

impl UrlFilter {
    /// Create a new URL filter from configuration
    pub fn new(config: UrlFilterConfig) -> Result<Self, regex::Error> {
        let mut exclude_regexes = Vec::with_capacity(config.exclude_patterns.len());
        for pattern in &config.exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            keywords: lowercase_all(&config.target_keywords),
            excluded_domains: lowercase_all(&config.excluded_domains),
            max_path_segments: config.max_path_segments,
            exclude_regexes,
        })
    }

    /// Parses `link` and returns it if every filtering rule accepts it
    pub fn followable(&self, link: &str, visited: &VisitedSet) -> Option<Url> {
        let url = Url::parse(link).ok()?;
        if self.is_followable(&url, visited) {
            Some(url)
        } else {
            None
        }
    }

    /// Determine if a link should be followed based on all filtering rules
    pub fn is_followable(&self, url: &Url, visited: &VisitedSet) -> bool {
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }

        if self.is_excluded_domain(url) {
            ::log::trace!("Excluded domain: {}", url);
            return false;
        }

        if !self.matches_keyword(url) {
            return false;
        }

        if visited.contains(&normalize_url(url)) {
            ::log::trace!("Already visited: {}", url);
            return false;
        }

        if !self.within_path_bound(url) {
            ::log::trace!("Too many path segments: {}", url);
            return false;
        }

        let url_str = url.as_str();
        !self.exclude_regexes.iter().any(|re| re.is_match(url_str))
    }

    /// Check whether the URL path is shallow enough to crawl
    pub fn within_path_bound(&self, url: &Url) -> bool {
        path_depth(url) <= self.max_path_segments
    }

    /// Check if the URL path contains one of the target keywords
    fn matches_keyword(&self, url: &Url) -> bool {
        let path = url.path().to_lowercase();
        self.keywords.iter().any(|kw| path.contains(kw.as_str()))
    }

    /// Check if the URL host is, or is a subdomain of, an excluded domain
    fn is_excluded_domain(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return true;
        };
        let host = host.to_lowercase();
        self.excluded_domains.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

fn lowercase_all(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> UrlFilter {
        UrlFilter::new(UrlFilterConfig {
            target_keywords: vec!["about".to_string(), "company".to_string()],
            excluded_domains: vec!["linkedin.com".to_string()],
            max_path_segments: 3,
            exclude_patterns: vec![],
        })
        .unwrap()
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_normalize_drops_query_fragment_and_trailing_slash() {
        assert_eq!(
            normalize_url(&url("https://x.com/about-us/?ref=1#team")),
            "https://x.com/about-us"
        );
        assert_eq!(normalize_url(&url("https://x.com/")), "https://x.com");
        assert_eq!(normalize_url(&url("https://x.com")), "https://x.com");
        assert_eq!(
            normalize_url(&url("http://x.com:8080/a//")),
            "http://x.com:8080/a"
        );
        assert_eq!(
            normalize_url(&url("https://x.com/about")),
            normalize_url(&url("https://x.com/about/?lang=nl"))
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [
            "https://x.com/about-us/?ref=1",
            "https://x.com/",
            "http://x.com:8080/a/b/c/",
            "https://www.example.org/nl/over-ons#top",
        ] {
            let once = normalize_url(&url(raw));
            let twice = normalize_url(&url(&once));
            assert_eq!(once, twice, "normalize not idempotent for {}", raw);
        }
    }

    #[test]
    fn test_path_depth() {
        assert_eq!(path_depth(&url("https://x.com")), 0);
        assert_eq!(path_depth(&url("https://x.com/")), 0);
        assert_eq!(path_depth(&url("https://x.com/about-us?ref=1")), 1);
        assert_eq!(path_depth(&url("https://x.com/a//b/c/")), 3);

        for raw in ["https://x.com/about-us/", "https://x.com/a/b/", "https://x.com/"] {
            let u = url(raw);
            assert_eq!(path_depth(&url(&normalize_url(&u))), path_depth(&u));
        }
    }

    #[test]
    fn test_keyword_link_is_followable() {
        let visited = VisitedSet::new();
        let link = url("https://x.com/about-us?ref=1");
        assert_eq!(path_depth(&link), 1);
        assert!(filter().is_followable(&link, &visited));
        assert!(filter().is_followable(&url("https://x.com/Company/Team"), &visited));
        assert!(!filter().is_followable(&url("https://x.com/contact"), &visited));
    }

    #[test]
    fn test_excluded_domain_never_followed() {
        let visited = VisitedSet::new();
        assert!(!filter().is_followable(&url("https://linkedin.com/company/acme"), &visited));
        assert!(!filter().is_followable(&url("https://www.LinkedIn.com/company/acme"), &visited));
        assert!(filter().is_followable(&url("https://notlinkedin.com/company/acme"), &visited));
    }

    #[test]
    fn test_non_http_and_relative_links_rejected() {
        let visited = VisitedSet::new();
        assert!(!filter().is_followable(&url("mailto:about@x.com"), &visited));
        assert!(!filter().is_followable(&url("ftp://x.com/about"), &visited));
        assert!(filter().followable("/about", &visited).is_none());
        assert!(filter().followable("https://x.com/about", &visited).is_some());
    }

    #[test]
    fn test_visited_links_rejected() {
        let mut visited = VisitedSet::new();
        visited.insert("https://x.com/about".to_string());
        assert!(!filter().is_followable(&url("https://x.com/about/?x=1"), &visited));
        assert!(filter().is_followable(&url("https://x.com/about/team"), &visited));
    }

    #[test]
    fn test_path_segment_bound() {
        let visited = VisitedSet::new();
        assert!(filter().is_followable(&url("https://x.com/a/b/about"), &visited));
        assert!(!filter().is_followable(&url("https://x.com/a/b/c/about"), &visited));
    }

    #[test]
    fn test_exclude_patterns() {
        let filter = UrlFilter::new(UrlFilterConfig {
            target_keywords: vec!["about".to_string()],
            excluded_domains: vec![],
            max_path_segments: 3,
            exclude_patterns: vec![r"\.(pdf|jpg)$".to_string()],
        })
        .unwrap();
        let visited = VisitedSet::new();
        assert!(!filter.is_followable(&url("https://x.com/about.pdf"), &visited));
        assert!(filter.is_followable(&url("https://x.com/about.html"), &visited));
    }
}
