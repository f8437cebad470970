//! In-memory storage engine.
//!
//! Implements the scriptorium store contracts over plain hash maps behind
//! `tokio::sync::RwLock`. Each store method takes the lock for the
//! duration of one call only, so a read-modify-write sequence spanning
//! several calls is NOT atomic — that is the documented lost-update model
//! of the mutation engine, and this store must not paper over it with
//! hidden caching or merging.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::trace;
use uuid::Uuid;

use scriptorium_core::{
    Account, ActivityEntry, ActivityStore, AccountStore, Document, DocumentFilter, DocumentStore,
    Result,
};

/// Lowercase alphanumeric tokens of `text`.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Keyword relevance: number of distinct query tokens present in the
/// document's title, content, or tags. Zero means no match.
fn keyword_score(query_tokens: &[String], document: &Document) -> usize {
    if query_tokens.is_empty() {
        return 0;
    }
    let mut haystack: Vec<String> = tokenize(&document.title);
    haystack.extend(tokenize(&document.content));
    for tag in &document.tags {
        haystack.extend(tokenize(tag));
    }
    query_tokens
        .iter()
        .filter(|token| haystack.iter().any(|h| h == *token))
        .count()
}

/// In-memory storage engine for documents, accounts, and activity.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<Uuid, Document>>,
    accounts: RwLock<HashMap<Uuid, Account>>,
    activity: RwLock<Vec<ActivityEntry>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Number of activity entries ever appended.
    pub async fn activity_count(&self) -> usize {
        self.activity.read().await.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, document: Document) -> Result<()> {
        self.documents.write().await.insert(document.id, document);
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Document>> {
        Ok(self.documents.read().await.get(&id).cloned())
    }

    async fn find(&self, filter: DocumentFilter) -> Result<Vec<Document>> {
        let documents = self.documents.read().await;
        let query_tokens = filter.text.as_deref().map(tokenize);

        let mut matches: Vec<(usize, Document)> = documents
            .values()
            .filter(|doc| filter.owner.is_none_or(|owner| doc.owner == owner))
            .filter(|doc| {
                filter
                    .tag
                    .as_ref()
                    .is_none_or(|tag| doc.tags.iter().any(|t| t == tag))
            })
            .filter_map(|doc| match &query_tokens {
                Some(tokens) => {
                    let score = keyword_score(tokens, doc);
                    (score > 0).then(|| (score, doc.clone()))
                }
                None => Some((0, doc.clone())),
            })
            .collect();

        // Native order: keyword relevance first when a text query is
        // present, most-recently-updated otherwise. Ties break on
        // update recency, then id for determinism.
        if query_tokens.is_some() {
            matches.sort_by(|a, b| {
                b.0.cmp(&a.0)
                    .then(b.1.updated_at_utc.cmp(&a.1.updated_at_utc))
                    .then(a.1.id.cmp(&b.1.id))
            });
        } else {
            matches.sort_by(|a, b| {
                b.1.updated_at_utc
                    .cmp(&a.1.updated_at_utc)
                    .then(a.1.id.cmp(&b.1.id))
            });
        }

        if let Some(limit) = filter.limit {
            matches.truncate(limit);
        }

        trace!(result_count = matches.len(), "document find");
        Ok(matches.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn update(&self, document: Document) -> Result<()> {
        self.documents.write().await.insert(document.id, document);
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        Ok(self.documents.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert(&self, account: Account) -> Result<()> {
        self.accounts.write().await.insert(account.id, account);
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn fetch_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn append(&self, entry: ActivityEntry) -> Result<()> {
        self.activity.write().await.push(entry);
        Ok(())
    }

    async fn latest(&self, limit: usize) -> Result<Vec<ActivityEntry>> {
        let activity = self.activity.read().await;
        let mut entries: Vec<ActivityEntry> = activity.clone();
        entries.sort_by(|a, b| b.created_at_utc.cmp(&a.created_at_utc));
        entries.truncate(limit);
        Ok(entries)
    }
}
