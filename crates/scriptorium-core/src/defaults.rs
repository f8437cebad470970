//! Shared defaults and operational caps for scriptorium.

/// Maximum results returned by the lexical (keyword) search channel.
pub const LEXICAL_SEARCH_LIMIT: usize = 20;

/// Maximum results returned by the semantic search channel.
pub const SEMANTIC_SEARCH_LIMIT: usize = 20;

/// Size of the candidate pool loaded for semantic scoring.
///
/// Semantic ranking scores a bounded pool of visible documents rather than
/// the full corpus. This is a deliberate scalability/cost trade-off: exact
/// top-K over the whole corpus would require a real vector index.
pub const SEMANTIC_POOL_LIMIT: usize = 200;

/// Number of documents assembled into the question-answering context.
pub const QA_CONTEXT_LIMIT: usize = 5;

/// Number of entries returned by the activity feed.
pub const ACTIVITY_FEED_LIMIT: usize = 5;

/// Token subject claimed by the privileged root principal.
///
/// Stored accounts are keyed by UUID, so this marker can never collide
/// with an account subject.
pub const ROOT_SUBJECT: &str = "admin";

/// Display name recorded for root-initiated activity.
pub const ROOT_DISPLAY_NAME: &str = "Administrator";

/// Synthetic email reported for the root principal in activity feeds.
pub const ROOT_EMAIL: &str = "admin@system.local";

/// Base URL of the Google Generative Language API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model for summaries, tags, and answers.
pub const GEN_MODEL: &str = "gemini-1.5-flash";

/// Default embedding model.
pub const EMBED_MODEL: &str = "text-embedding-004";

/// Timeout for generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = 60;

/// Timeout for embedding requests (seconds).
pub const EMBED_TIMEOUT_SECS: u64 = 30;
