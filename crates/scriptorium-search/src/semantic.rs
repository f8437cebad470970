//! Semantic ranking over a bounded candidate pool.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use scriptorium_core::Document;

use crate::cosine::cosine_similarity;

/// A document scored by the semantic channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: f32,
}

/// Score every candidate against the query embedding, sort by descending
/// score, and truncate to `limit`.
///
/// The sort is stable: candidates with equal scores keep their pool load
/// order. An empty or degraded query embedding scores every candidate
/// 0.0, which reduces the ranking to the pool order.
pub fn rank_by_similarity(
    query_embedding: &[f32],
    pool: Vec<Document>,
    limit: usize,
) -> Vec<ScoredDocument> {
    let mut scored: Vec<ScoredDocument> = pool
        .into_iter()
        .map(|document| {
            let score = cosine_similarity(query_embedding, &document.embedding);
            ScoredDocument { document, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(limit);
    scored
}
