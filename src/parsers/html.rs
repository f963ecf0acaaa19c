use scraper::{Html, Selector};
use url::Url;

/// Extracts the targets of all `a[href]` elements, resolved against `base`
///
/// Links are returned in document order. Hrefs that cannot be resolved are
/// skipped; scheme filtering is left to the caller.
pub fn extract_links(html: &str, base: &Url) -> Vec<String> {
    let doc = Html::parse_document(html);

    let link_selector = Selector::parse("a[href]").expect("static selector is valid");
    let links = doc
        .select(&link_selector)
        .filter_map(|e| e.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .filter_map(|href| base.join(href).ok())
        .map(String::from)
        .collect::<Vec<String>>();

    ::log::debug!("HTML parser found {} links on {}", links.len(), base);
    if !links.is_empty() {
        ::log::trace!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    links
}
