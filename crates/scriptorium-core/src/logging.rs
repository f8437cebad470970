//! Structured logging schema and field name constants for scriptorium.
//!
//! All crates use these constants for consistent structured logging
//! fields, so log aggregation tools can query by standardized names
//! across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied (enrichment degradation lands here) |
//! | INFO  | Lifecycle events, operation completions |
//! | DEBUG | Decision points, intermediate values |
//! | TRACE | Per-item iteration, high-volume data |

use tracing_subscriber::EnvFilter;

/// Subsystem originating the log event.
/// Values: "store", "inference", "search", "service"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "gemini", "memory_store", "retrieval", "documents"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "create", "update", "lexical_search", "embed"
pub const OPERATION: &str = "op";

/// Document UUID being operated on.
pub const DOCUMENT_ID: &str = "document_id";

/// Actor performing the operation ("root" or an account UUID).
pub const ACTOR: &str = "actor";

/// Search or question text.
pub const QUERY: &str = "query";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a search or listing.
pub const RESULT_COUNT: &str = "result_count";

/// Number of candidates scored by the semantic channel.
pub const CANDIDATE_COUNT: &str = "candidate_count";

/// Error message when an operation fails or degrades.
pub const ERROR_MSG: &str = "error";

/// Install a global `tracing` subscriber honoring `RUST_LOG`.
///
/// Opt-in helper for embedding applications and examples; library code
/// never installs a subscriber on its own. Calling it twice is a no-op.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
