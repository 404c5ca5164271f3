//! HTTP client for the answer generation service

use crate::error::{IngotError, Result};
use crate::llm::Generator;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Context passages are capped and clipped before prompting
const MAX_CONTEXTS: usize = 6;
const MAX_CONTEXT_CHARS: usize = 1200;

/// One grounding passage sent to the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationContext {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Generator backed by the external seq2seq service
pub struct HttpGenerator {
    http_client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    question: &'a str,
    contexts: Vec<GenerationContext>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    answer: String,
}

impl HttpGenerator {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(IngotError::Http)?;

        Ok(Self {
            http_client,
            url: url.into(),
        })
    }

    fn clip(context: &GenerationContext) -> GenerationContext {
        let content = if context.content.len() > MAX_CONTEXT_CHARS {
            let mut end = MAX_CONTEXT_CHARS;
            while end > 0 && !context.content.is_char_boundary(end) {
                end -= 1;
            }
            context.content[..end].to_string()
        } else {
            context.content.clone()
        };
        GenerationContext {
            content,
            title: context.title.clone(),
        }
    }
}

#[async_trait]
impl Generator for HttpGenerator {
    async fn generate(&self, question: &str, contexts: &[GenerationContext]) -> Result<String> {
        let clipped: Vec<GenerationContext> = contexts
            .iter()
            .take(MAX_CONTEXTS)
            .map(Self::clip)
            .collect();

        let request = GenerateRequest {
            question,
            contexts: clipped,
        };

        let response = self.http_client.post(&self.url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(IngotError::ExternalService(format!(
                "generation service error (HTTP {status}): {body}"
            )));
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.answer)
    }
}
