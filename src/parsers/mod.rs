//! Parsers for rendered page content.
//!
//! `text` splits body text into paragraphs and sentences for summarizing;
//! `html` pulls outbound links from page source.

pub mod html;
pub mod text;

#[cfg(test)]
mod tests;
