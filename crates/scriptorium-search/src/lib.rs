//! # scriptorium-search
//!
//! Hybrid retrieval ranker for scriptorium.
//!
//! This crate provides:
//! - Reproducible cosine similarity over embedding vectors
//! - Semantic ranking over a bounded, visibility-confined candidate pool
//! - The lexical (keyword) channel delegating to the storage engine
//! - Question-answering context assembly
//!
//! The two channels are independent and their scores are never merged.

pub mod cosine;
pub mod engine;
pub mod semantic;

pub use cosine::cosine_similarity;
pub use engine::{build_context, ContextDocument, QaResponse, RetrievalEngine};
pub use semantic::{rank_by_similarity, ScoredDocument};
