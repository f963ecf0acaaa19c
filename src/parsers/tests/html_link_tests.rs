use crate::parsers::html;
use url::Url;

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/nl/").unwrap()
    }

    #[test]
    fn test_links_resolved_in_document_order() {
        let page = r#"<html><body>
            <a href="over-ons">Over ons</a>
            <a href="/about">About</a>
            <a href="https://linkedin.com/company/acme">LinkedIn</a>
            <a href="../company/team?x=1#top">Team</a>
        </body></html>"#;
        let links = html::extract_links(page, &base());
        assert_eq!(
            links,
            vec![
                "https://example.com/nl/over-ons",
                "https://example.com/about",
                "https://linkedin.com/company/acme",
                "https://example.com/company/team?x=1#top",
            ]
        );
    }

    #[test]
    fn test_anchors_without_href_are_ignored() {
        let page = r#"<a name="top">Top</a><a href="">Empty</a><a href="mailto:info@example.com">Mail</a>"#;
        let links = html::extract_links(page, &base());
        assert_eq!(links, vec!["mailto:info@example.com"]);
    }

    #[test]
    fn test_page_without_links() {
        let links = html::extract_links("<html><body><p>No links here.</p></body></html>", &base());
        assert!(links.is_empty());
    }
}
