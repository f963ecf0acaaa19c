pub mod browser;
pub mod traversal;
pub mod web;

#[cfg(test)]
pub(crate) mod testing;

pub use browser::{Browser, ElementQuery, WebDriverBrowser};
pub use traversal::Traversal;
pub use web::PageScraper;
