use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// What the crawl learned about one visited URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Normalized URL of the page
    pub url: String,

    /// Rendered body text, absent when the page failed to load
    #[serde(
        rename = "page_content",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub page_content: Option<String>,

    /// Why the page could not be scraped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Lead sentences of each prose paragraph, absent on failure
    #[serde(
        rename = "summarized_content",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub summarized_paragraphs: Option<Vec<String>>,

    /// English rendering of `summarized_paragraphs`, same order
    #[serde(
        rename = "translated_content",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub translated_paragraphs: Option<Vec<String>>,
}

impl PageRecord {
    /// Record for a page whose content was extracted
    pub fn scraped(
        url: String,
        content: String,
        summarized_paragraphs: Vec<String>,
        translated_paragraphs: Vec<String>,
    ) -> Self {
        Self {
            url,
            page_content: Some(content),
            error: None,
            summarized_paragraphs: Some(summarized_paragraphs),
            translated_paragraphs: Some(translated_paragraphs),
        }
    }

    /// Record for a page that could not be fetched
    pub fn failed(url: String, error: String) -> Self {
        Self {
            url,
            page_content: None,
            error: Some(error),
            summarized_paragraphs: None,
            translated_paragraphs: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Pretty-printed JSON array; non-ASCII text is kept literal
pub fn to_json_string(records: &[PageRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Writes the records to `path` as a pretty-printed UTF-8 JSON array
pub fn write_json<P: AsRef<Path>>(path: P, records: &[PageRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    ::log::info!(
        "Wrote {} page records to {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(())
}
