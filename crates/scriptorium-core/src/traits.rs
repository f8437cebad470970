//! Core traits for scriptorium's external collaborators.
//!
//! These traits define the narrow contracts the policy core depends on:
//! a storage engine with key lookup and a keyword/text predicate, and an
//! AI backend for enrichment. Concrete implementations are pluggable,
//! which keeps every policy decision testable in-process.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Account, ActivityEntry, ActorId, Document, Vector};

// =============================================================================
// DOCUMENT STORE
// =============================================================================

/// Filter for document listing and lexical search.
///
/// All present fields compose with logical AND. The `owner` field carries
/// the access scope and is set by the policy layer, never by callers, so
/// tag/text filters can only narrow a result set.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Restrict to documents owned by this actor.
    pub owner: Option<ActorId>,
    /// Exact tag membership.
    pub tag: Option<String>,
    /// Keyword/text match over title, content, and tags. When present,
    /// results come back in the store's native relevance order; when
    /// absent, most-recently-updated first.
    pub text: Option<String>,
    /// Maximum results.
    pub limit: Option<usize>,
}

/// Storage engine contract for documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new document.
    async fn insert(&self, document: Document) -> Result<()>;

    /// Fetch a document by id. `None` when absent.
    async fn fetch(&self, id: Uuid) -> Result<Option<Document>>;

    /// Find documents matching `filter` (fields ANDed, see [`DocumentFilter`]).
    async fn find(&self, filter: DocumentFilter) -> Result<Vec<Document>>;

    /// Replace a stored document by id.
    async fn update(&self, document: Document) -> Result<()>;

    /// Hard-delete a document and its embedded versions.
    /// Returns `true` when a document was removed.
    async fn remove(&self, id: Uuid) -> Result<bool>;
}

// =============================================================================
// ACCOUNT STORE
// =============================================================================

/// Storage engine contract for accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account.
    async fn insert(&self, account: Account) -> Result<()>;

    /// Fetch an account by id. `None` when absent.
    async fn fetch(&self, id: Uuid) -> Result<Option<Account>>;

    /// Fetch an account by email (case-insensitive). `None` when absent.
    async fn fetch_by_email(&self, email: &str) -> Result<Option<Account>>;
}

// =============================================================================
// ACTIVITY STORE
// =============================================================================

/// Storage engine contract for the append-only activity trail.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Append one entry. Entries are never mutated or deleted afterward.
    async fn append(&self, entry: ActivityEntry) -> Result<()>;

    /// The `limit` most recent entries, newest first.
    async fn latest(&self, limit: usize) -> Result<Vec<ActivityEntry>>;
}

// =============================================================================
// AI ENRICHMENT
// =============================================================================

/// Backend for AI-assisted enrichment and question answering.
///
/// Implementations may fail (slow external I/O, missing credentials);
/// callers in the policy core degrade failures to empty/neutral values
/// rather than surfacing them. No method here may abort a surrounding
/// mutation.
#[async_trait]
pub trait EnrichmentBackend: Send + Sync {
    /// Summarize document content in a few sentences.
    async fn summarize(&self, content: &str) -> Result<String>;

    /// Suggest short lowercase tags for document content.
    async fn suggest_tags(&self, content: &str) -> Result<Vec<String>>;

    /// Embed text into a vector.
    async fn embed(&self, text: &str) -> Result<Vector>;

    /// Answer a question using only the provided context.
    async fn answer(&self, question: &str, context: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_filter_default_is_unrestricted() {
        let filter = DocumentFilter::default();
        assert!(filter.owner.is_none());
        assert!(filter.tag.is_none());
        assert!(filter.text.is_none());
        assert!(filter.limit.is_none());
    }

    #[test]
    fn test_document_filter_composes_scope_and_caller_filters() {
        let owner = ActorId::Account(Uuid::new_v4());
        let filter = DocumentFilter {
            owner: Some(owner),
            tag: Some("rust".to_string()),
            text: Some("ownership".to_string()),
            limit: Some(20),
        };

        assert_eq!(filter.owner, Some(owner));
        assert_eq!(filter.tag.as_deref(), Some("rust"));
        assert_eq!(filter.text.as_deref(), Some("ownership"));
        assert_eq!(filter.limit, Some(20));
    }

    #[test]
    fn test_stores_are_object_safe() {
        fn assert_object_safe<T: ?Sized>() {}

        assert_object_safe::<dyn DocumentStore>();
        assert_object_safe::<dyn AccountStore>();
        assert_object_safe::<dyn ActivityStore>();
        assert_object_safe::<dyn EnrichmentBackend>();
    }
}
