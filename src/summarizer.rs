use crate::config::SummaryConfig;
use crate::parsers::text;

/// Extractive summarizer that keeps the lead sentences of every prose
/// paragraph
///
/// Sentences are never ranked: a paragraph is truncated to its first
/// `sentences` sentences, or kept whole when it is already that short.
#[derive(Debug, Clone)]
pub struct ParagraphSummarizer {
    sentences: usize,
    min_paragraph_chars: usize,
}

impl ParagraphSummarizer {
    pub fn new(config: &SummaryConfig) -> Self {
        Self {
            sentences: config.sentences,
            min_paragraph_chars: config.min_paragraph_chars,
        }
    }

    /// Summarizes each qualifying paragraph of `text`, in page order
    pub fn summarize(&self, text: &str) -> Vec<String> {
        text::split_into_paragraphs(text, self.min_paragraph_chars)
            .into_iter()
            .map(|para| summarize_paragraph(para, self.sentences))
            .collect()
    }
}

impl Default for ParagraphSummarizer {
    fn default() -> Self {
        Self::new(&SummaryConfig::default())
    }
}

/// Keeps the first `max_sentences` sentences of a paragraph
pub fn summarize_paragraph(paragraph: &str, max_sentences: usize) -> String {
    let sentences = text::split_into_sentences(paragraph);
    if sentences.len() <= max_sentences {
        paragraph.to_string()
    } else {
        sentences[..max_sentences].join(" ")
    }
}
