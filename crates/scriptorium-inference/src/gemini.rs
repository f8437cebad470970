//! Gemini inference backend implementation.
//!
//! Talks to the Google Generative Language API for summaries, tag
//! suggestions, embeddings, and grounded question answering. All calls
//! are timeout-bound; callers in the policy core degrade failures to
//! empty values, so nothing here needs to be retried or fatal.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use scriptorium_core::{defaults, EnrichmentBackend, Error, Result, Vector};

/// Default Generative Language API endpoint.
pub const DEFAULT_BASE_URL: &str = defaults::GEMINI_BASE_URL;

/// Default generation model.
pub const DEFAULT_GEN_MODEL: &str = defaults::GEN_MODEL;

/// Default embedding model.
pub const DEFAULT_EMBED_MODEL: &str = defaults::EMBED_MODEL;

/// Gemini enrichment backend.
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    api_key: String,
    gen_model: String,
    embed_model: String,
    gen_timeout_secs: u64,
    embed_timeout_secs: u64,
}

impl GeminiBackend {
    /// Create a backend with default models.
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_config(
            api_key,
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_GEN_MODEL.to_string(),
            DEFAULT_EMBED_MODEL.to_string(),
        )
    }

    /// Create a backend with custom endpoint and models.
    pub fn with_config(
        api_key: String,
        base_url: String,
        gen_model: String,
        embed_model: String,
    ) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config("Gemini API key cannot be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::GEN_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key,
            gen_model,
            embed_model,
            gen_timeout_secs: defaults::GEN_TIMEOUT_SECS,
            embed_timeout_secs: defaults::EMBED_TIMEOUT_SECS,
        })
    }

    /// Create from the `GEMINI_API_KEY` environment variable.
    ///
    /// Returns `None` when the key is unset: AI features then degrade to
    /// empty values everywhere, mirroring the backend contract.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty())?;
        Self::new(api_key).ok()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.gen_model, self.api_key
        );
        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.gen_timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "Gemini returned {}: {}",
                status, body
            )));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        let text = result
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            response_len = text.len(),
            duration_ms = elapsed,
            "Generation complete"
        );
        if elapsed > 30_000 {
            warn!(
                duration_ms = elapsed,
                prompt_len = prompt.len(),
                slow = true,
                "Slow generation operation"
            );
        }
        Ok(text)
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    content: Content,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}

#[async_trait]
impl EnrichmentBackend for GeminiBackend {
    async fn summarize(&self, content: &str) -> Result<String> {
        let prompt = format!(
            "Summarize the following document in 2-3 sentences:\n\n{}",
            content
        );
        self.generate(&prompt).await
    }

    async fn suggest_tags(&self, content: &str) -> Result<Vec<String>> {
        let prompt = format!(
            "Read the content and return 3-8 short tags, comma-separated, \
             lowercase, no punctuation other than commas:\n\n{}",
            content
        );
        let text = self.generate(&prompt).await?;
        Ok(parse_tag_list(&text))
    }

    async fn embed(&self, text: &str) -> Result<Vector> {
        let start = Instant::now();

        let request = EmbedRequest {
            model: format!("models/{}", self.embed_model),
            content: Content {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
        };

        let url = format!(
            "{}/models/{}:embedContent?key={}",
            self.base_url, self.embed_model, self.api_key
        );
        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.embed_timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Embedding(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!(
                "Gemini returned {}: {}",
                status, body
            )));
        }

        let result: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("Failed to parse response: {}", e)))?;

        debug!(
            dimension = result.embedding.values.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Embedding complete"
        );
        Ok(result.embedding.values)
    }

    async fn answer(&self, question: &str, context: &str) -> Result<String> {
        let prompt = format!(
            "You are a helpful assistant. Use only the provided context to \
             answer. If unsure, say you don't know.\n\nContext:\n{}\n\nQuestion: {}",
            context, question
        );
        self.generate(&prompt).await
    }
}

/// Parse a comma-separated tag response into clean lowercase tags.
fn parse_tag_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_list() {
        let tags = parse_tag_list("Rust, async runtime , ,SEARCH,");
        assert_eq!(tags, vec!["rust", "async runtime", "search"]);
    }

    #[test]
    fn test_parse_tag_list_empty_input() {
        assert!(parse_tag_list("").is_empty());
        assert!(parse_tag_list(" , , ").is_empty());
    }

    #[test]
    fn test_new_rejects_empty_api_key() {
        assert!(GeminiBackend::new(String::new()).is_err());
    }

    #[test]
    fn test_with_config_builds_client() {
        let backend = GeminiBackend::with_config(
            "test-key".to_string(),
            "http://localhost:9999".to_string(),
            "gen-model".to_string(),
            "embed-model".to_string(),
        )
        .unwrap();
        assert_eq!(backend.gen_model, "gen-model");
        assert_eq!(backend.embed_model, "embed-model");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_yields_error_not_panic() {
        let backend = GeminiBackend::with_config(
            "test-key".to_string(),
            "http://127.0.0.1:1".to_string(),
            DEFAULT_GEN_MODEL.to_string(),
            DEFAULT_EMBED_MODEL.to_string(),
        )
        .unwrap();

        let result = backend.summarize("some content").await;
        assert!(matches!(result, Err(Error::Inference(_))));

        let result = backend.embed("some content").await;
        assert!(matches!(result, Err(Error::Embedding(_))));
    }

    #[test]
    fn test_generate_response_parses_candidates() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hello "}, {"text": "world"}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.candidates.len(), 1);
    }

    #[test]
    fn test_generate_response_tolerates_missing_candidates() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }

    #[test]
    fn test_embed_response_parses_values() {
        let json = r#"{"embedding": {"values": [0.1, 0.2, 0.3]}}"#;
        let parsed: EmbedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.embedding.values.len(), 3);
    }
}
