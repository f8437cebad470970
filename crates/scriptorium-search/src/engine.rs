//! Hybrid retrieval engine.
//!
//! Two independent channels over the caller's visible set, never merged
//! into one score:
//!
//! - **Lexical**: the storage engine's keyword predicate, restricted by
//!   the caller's access scope, capped at 20, in the store's native
//!   relevance order. This engine imposes no additional ordering.
//! - **Semantic**: cosine similarity of the query embedding against a
//!   bounded candidate pool (200) of visible documents, descending with
//!   stable ties, truncated to the caller's cap (20 for search, 5 for
//!   question answering). The bounded pool is a deliberate
//!   scalability/cost trade-off, not an exhaustive scan — exact top-K
//!   over the full corpus would need a real vector index.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use scriptorium_core::{
    defaults, list_scope, Document, DocumentFilter, DocumentStore, EnrichmentBackend, Error,
    Principal, Result, Vector,
};

use crate::semantic::{rank_by_similarity, ScoredDocument};

/// A document reference included in a question-answering context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextDocument {
    pub id: Uuid,
    pub title: String,
}

/// Outcome of a question-answering request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaResponse {
    /// Free-text answer; empty when the AI collaborator degraded.
    pub answer: String,
    /// The documents assembled into the context, in ranked order.
    pub context_documents: Vec<ContextDocument>,
}

/// Hybrid retrieval ranker over the storage engine and AI collaborator.
pub struct RetrievalEngine {
    documents: Arc<dyn DocumentStore>,
    ai: Arc<dyn EnrichmentBackend>,
}

impl RetrievalEngine {
    pub fn new(documents: Arc<dyn DocumentStore>, ai: Arc<dyn EnrichmentBackend>) -> Self {
        Self { documents, ai }
    }

    /// Lexical channel: keyword search in the store's native relevance
    /// order, confined to the principal's visible set.
    ///
    /// A blank query yields no results rather than everything.
    pub async fn lexical_search(
        &self,
        principal: &Principal,
        query: &str,
    ) -> Result<Vec<Document>> {
        if query.trim().is_empty() {
            return Ok(vec![]);
        }

        let start = Instant::now();
        let results = self
            .documents
            .find(DocumentFilter {
                owner: list_scope(principal),
                text: Some(query.to_string()),
                limit: Some(defaults::LEXICAL_SEARCH_LIMIT),
                ..Default::default()
            })
            .await?;

        debug!(
            op = "lexical_search",
            result_count = results.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "lexical search complete"
        );
        Ok(results)
    }

    /// Semantic channel: rank the visible candidate pool by cosine
    /// similarity to the query embedding, top 20.
    pub async fn semantic_search(
        &self,
        principal: &Principal,
        query: &str,
    ) -> Result<Vec<ScoredDocument>> {
        if query.trim().is_empty() {
            return Ok(vec![]);
        }
        self.semantic_top(principal, query, defaults::SEMANTIC_SEARCH_LIMIT)
            .await
    }

    /// Question answering: semantic top-5 context assembly handed to the
    /// AI collaborator. The ranker only assembles and orders context; it
    /// never interprets the answer.
    pub async fn ask(&self, principal: &Principal, question: &str) -> Result<QaResponse> {
        if question.trim().is_empty() {
            return Err(Error::InvalidInput("question must not be empty".to_string()));
        }

        let top = self
            .semantic_top(principal, question, defaults::QA_CONTEXT_LIMIT)
            .await?;
        let context_docs: Vec<Document> = top.into_iter().map(|s| s.document).collect();
        let context = build_context(&context_docs);

        let answer = match self.ai.answer(question, &context).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "answer generation degraded to empty");
                String::new()
            }
        };

        Ok(QaResponse {
            answer,
            context_documents: context_docs
                .into_iter()
                .map(|d| ContextDocument {
                    id: d.id,
                    title: d.title,
                })
                .collect(),
        })
    }

    async fn semantic_top(
        &self,
        principal: &Principal,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ScoredDocument>> {
        let start = Instant::now();
        let query_embedding = self.query_embedding(query).await;

        let pool = self
            .documents
            .find(DocumentFilter {
                owner: list_scope(principal),
                limit: Some(defaults::SEMANTIC_POOL_LIMIT),
                ..Default::default()
            })
            .await?;

        let candidate_count = pool.len();
        let ranked = rank_by_similarity(&query_embedding, pool, limit);

        debug!(
            op = "semantic_search",
            candidate_count,
            result_count = ranked.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "semantic ranking complete"
        );
        Ok(ranked)
    }

    /// Query embedding with graceful degradation: a failed embed call
    /// yields the empty vector, which scores 0.0 against every candidate.
    async fn query_embedding(&self, query: &str) -> Vector {
        match self.ai.embed(query).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!(error = %e, "query embedding degraded to empty");
                Vector::new()
            }
        }
    }
}

/// Assemble the ranked context blob for question answering: one
/// `Title/Summary/Content` block per document, blank-line separated,
/// in ranked order.
pub fn build_context(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|d| {
            format!(
                "Title: {}\nSummary: {}\nContent: {}",
                d.title, d.summary, d.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
