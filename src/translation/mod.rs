//! Chunked, retrying translation on top of an external translation service.

pub mod google;

use crate::config::TranslationConfig;
use crate::diagnostics::DiagnosticLog;
use crate::error::Result;
use crate::retry::RetryPolicy;
use crate::utils::chunk_by_chars;
use async_trait::async_trait;

pub use google::GoogleTranslator;

/// An external text translation service
///
/// Implementations translate one request's worth of text and may fail on
/// any call; chunking and retries are handled by [`ChunkedTranslator`].
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}

/// Translates arbitrary-length text, never failing
///
/// Text is cut into chunks of at most `max_chunk_chars` characters. Each
/// chunk is retried under the configured policy; a chunk that still fails is
/// kept untranslated. Chunk results are joined with newlines.
#[derive(Debug)]
pub struct ChunkedTranslator<T> {
    service: T,
    enabled: bool,
    source_language: String,
    target_language: String,
    max_chunk_chars: usize,
    policy: RetryPolicy,
    diagnostics: DiagnosticLog,
}

impl<T: Translator> ChunkedTranslator<T> {
    pub fn new(service: T, config: &TranslationConfig, diagnostics: DiagnosticLog) -> Self {
        Self {
            service,
            enabled: config.enabled,
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            max_chunk_chars: config.max_chunk_chars,
            policy: RetryPolicy::new(config.attempts, config.retry_delay()),
            diagnostics,
        }
    }

    /// Translates `text`, falling back to the original for failed chunks
    pub async fn translate(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }

        let mut translated = Vec::new();
        for chunk in chunk_by_chars(text, self.max_chunk_chars) {
            translated.push(self.translate_chunk(chunk).await);
        }
        translated.join("\n")
    }

    async fn translate_chunk(&self, chunk: &str) -> String {
        let service = &self.service;
        let source = self.source_language.as_str();
        let target = self.target_language.as_str();
        let attempts = self.policy.attempts();

        let result = self
            .policy
            .run(
                move |_| service.translate(chunk, source, target),
                |attempt, e| {
                    ::log::warn!("Translation attempt {}/{} failed: {}", attempt, attempts, e);
                    self.diagnostics.translation_failed(attempt, chunk, e);
                },
            )
            .await;

        match result {
            Ok(text) => text,
            Err(_) => {
                ::log::error!(
                    "Max retries reached, keeping {} untranslated characters",
                    chunk.chars().count()
                );
                chunk.to_string()
            }
        }
    }
}
