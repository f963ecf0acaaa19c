use super::Translator;
use crate::config::TranslationConfig;
use crate::error::{CrawlError, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Client for the public Google `translate_a/single` endpoint
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let resp = self
            .client
            .post(&self.endpoint)
            .query(&[("client", "gtx"), ("sl", source), ("tl", target), ("dt", "t")])
            .form(&[("q", text)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CrawlError::TranslationApi {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: Value = resp.json().await?;
        parse_response(&body)
    }
}

/// Joins the translated segments of a `translate_a/single` response
///
/// The payload is a nested array whose first element lists segments as
/// `[translated, original, ...]`.
fn parse_response(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| CrawlError::UnexpectedResponse("missing translation segments".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() && !segments.is_empty() {
        return Err(CrawlError::UnexpectedResponse(
            "translation segments contained no text".to_string(),
        ));
    }
    Ok(translated)
}
