//! Mock enrichment backend for deterministic testing.
//!
//! Produces deterministic embeddings and canned generation output so the
//! policy core's ranking and degradation paths can be exercised without a
//! live provider. Failure injection covers the graceful-degradation rule:
//! with `with_failure_rate(1.0)` every call errors, and callers are
//! expected to fall back to empty enrichment values.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use scriptorium_core::{EnrichmentBackend, Error, Result, Vector};

/// Mock enrichment backend.
#[derive(Clone)]
pub struct MockEnrichmentBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    dimension: usize,
    summary: String,
    tags: Vec<String>,
    answer: String,
    answer_map: HashMap<String, String>,
    embedding_map: HashMap<String, Vector>,
    failure_rate: f64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            dimension: 8,
            summary: "Mock summary".to_string(),
            tags: vec!["mock".to_string()],
            answer: "Mock answer".to_string(),
            answer_map: HashMap::new(),
            embedding_map: HashMap::new(),
            failure_rate: 0.0,
        }
    }
}

/// One logged backend call, for assertions.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
}

impl MockEnrichmentBackend {
    /// Create a mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the embedding dimension.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        Arc::make_mut(&mut self.config).dimension = dimension;
        self
    }

    /// Set the canned summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).summary = summary.into();
        self
    }

    /// Set the canned tag suggestions.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        Arc::make_mut(&mut self.config).tags = tags;
        self
    }

    /// Set the canned answer.
    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).answer = answer.into();
        self
    }

    /// Map a specific question to a specific answer.
    pub fn with_answer_mapping(
        mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .answer_map
            .insert(question.into(), answer.into());
        self
    }

    /// Map a specific input text to a fixed embedding, overriding the
    /// deterministic generator. Useful for driving exact ranking
    /// scenarios in tests.
    pub fn with_embedding_mapping(mut self, text: impl Into<String>, embedding: Vector) -> Self {
        Arc::make_mut(&mut self.config)
            .embedding_map
            .insert(text.into(), embedding);
        self
    }

    /// Set failure rate (0.0 - 1.0). At 1.0 every call fails, which is
    /// the deterministic setting degradation tests use.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        Arc::make_mut(&mut self.config).failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// All logged calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of calls for one operation ("summarize", "suggest_tags",
    /// "embed", "answer").
    pub fn call_count(&self, operation: &str) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn log_call(&self, operation: &str, input: &str) {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
        });
    }

    fn should_fail(&self) -> bool {
        use rand::Rng;
        match self.config.failure_rate {
            r if r >= 1.0 => true,
            r if r <= 0.0 => false,
            r => rand::thread_rng().gen::<f64>() < r,
        }
    }

    /// Deterministic embedding of `text`: the same text always produces
    /// the same unit vector.
    pub fn deterministic_embedding(text: &str, dimension: usize) -> Vector {
        let mut vec = vec![0.0f32; dimension];
        for (i, c) in text.chars().enumerate() {
            let idx = (c as usize + i) % dimension;
            vec[idx] += 0.1;
        }

        let magnitude: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            vec.iter_mut().for_each(|x| *x /= magnitude);
        }
        vec
    }
}

impl Default for MockEnrichmentBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EnrichmentBackend for MockEnrichmentBackend {
    async fn summarize(&self, content: &str) -> Result<String> {
        self.log_call("summarize", content);
        if self.should_fail() {
            return Err(Error::Inference("simulated failure".to_string()));
        }
        Ok(self.config.summary.clone())
    }

    async fn suggest_tags(&self, content: &str) -> Result<Vec<String>> {
        self.log_call("suggest_tags", content);
        if self.should_fail() {
            return Err(Error::Inference("simulated failure".to_string()));
        }
        Ok(self.config.tags.clone())
    }

    async fn embed(&self, text: &str) -> Result<Vector> {
        self.log_call("embed", text);
        if self.should_fail() {
            return Err(Error::Embedding("simulated failure".to_string()));
        }
        if let Some(embedding) = self.config.embedding_map.get(text) {
            return Ok(embedding.clone());
        }
        Ok(Self::deterministic_embedding(text, self.config.dimension))
    }

    async fn answer(&self, question: &str, context: &str) -> Result<String> {
        self.log_call("answer", &format!("{}\n---\n{}", question, context));
        if self.should_fail() {
            return Err(Error::Inference("simulated failure".to_string()));
        }
        if let Some(answer) = self.config.answer_map.get(question) {
            return Ok(answer.clone());
        }
        Ok(self.config.answer.clone())
    }
}
