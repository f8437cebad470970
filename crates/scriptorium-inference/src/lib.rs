//! # scriptorium-inference
//!
//! AI enrichment backends for scriptorium.
//!
//! Implementations of the [`scriptorium_core::EnrichmentBackend`] trait:
//! a Gemini (Google Generative Language API) backend for production and a
//! deterministic mock for tests. The policy core treats every backend as
//! slow, fallible external I/O and degrades failures to empty enrichment
//! values; backends here only have to report errors honestly.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiBackend;
pub use mock::MockEnrichmentBackend;
