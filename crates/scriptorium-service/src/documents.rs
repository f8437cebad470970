//! Version & mutation engine for documents.
//!
//! Every entry point enforces existence and access checks first and
//! short-circuits before touching state. Mutation is a non-atomic
//! load → gate → snapshot → apply → persist sequence: concurrent updates
//! to the same document are a lost-update race where the last writer's
//! snapshot-then-apply wins. That is an accepted limitation (no
//! optimistic locking), not a corruption risk; an interleaved editor's
//! intermediate state may simply be missing from the version history.
//!
//! Enrichment (summary, tag suggestions, embedding) is slow external
//! I/O: failures degrade to empty values with a warning and never fail
//! the surrounding mutation.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use scriptorium_core::{
    can_mutate, can_view, dedup_tags, list_scope, merge_tags, Document, DocumentAction,
    DocumentFilter, DocumentStore, EnrichmentBackend, Error, Principal, Result, Vector,
};

use crate::activity::ActivityRecorder;

/// Fields for a new document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial field changes for an update. Absent fields are untouched;
/// a present `tags` replaces the whole tag set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Caller-supplied listing filters. These compose with the principal's
/// access scope via AND; they can only narrow the visible set.
#[derive(Debug, Clone, Default)]
pub struct ListDocuments {
    pub tag: Option<String>,
    pub text: Option<String>,
    /// Restrict to the caller's own documents even for admin-class
    /// principals.
    pub mine: bool,
}

/// Create/update/delete engine over the document store.
pub struct DocumentService {
    documents: Arc<dyn DocumentStore>,
    ai: Arc<dyn EnrichmentBackend>,
    recorder: ActivityRecorder,
}

impl DocumentService {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        ai: Arc<dyn EnrichmentBackend>,
        recorder: ActivityRecorder,
    ) -> Self {
        Self {
            documents,
            ai,
            recorder,
        }
    }

    /// Create a document owned by `principal`, with AI enrichment.
    pub async fn create(&self, principal: &Principal, fields: NewDocument) -> Result<Document> {
        validate_required("title", &fields.title)?;
        validate_required("content", &fields.content)?;

        let summary = self.summary_or_empty(&fields.content).await;
        let suggested = self.tags_or_empty(&fields.content).await;
        let tags = merge_tags(&dedup_tags(fields.tags), suggested);
        let embedding = self
            .embedding_or_empty(&fields.title, &fields.content)
            .await;

        let now = Utc::now();
        let document = Document {
            id: Uuid::new_v4(),
            title: fields.title,
            content: fields.content,
            tags,
            summary,
            owner: principal.actor_id(),
            embedding,
            versions: vec![],
            created_at_utc: now,
            updated_at_utc: now,
        };

        self.documents.insert(document.clone()).await?;
        self.recorder
            .record(principal, document.id, &document.title, DocumentAction::Create)
            .await?;

        info!(document_id = %document.id, "document created");
        Ok(document)
    }

    /// Fetch one document, enforcing visibility.
    pub async fn get(&self, principal: &Principal, id: Uuid) -> Result<Document> {
        let document = self.load(id).await?;
        if !can_view(principal, &document) {
            return Err(Error::Forbidden(
                "you can only view your own documents".to_string(),
            ));
        }
        Ok(document)
    }

    /// List documents visible to `principal`, narrowed by caller filters.
    pub async fn list(&self, principal: &Principal, query: ListDocuments) -> Result<Vec<Document>> {
        let owner = if query.mine {
            Some(principal.actor_id())
        } else {
            list_scope(principal)
        };

        self.documents
            .find(DocumentFilter {
                owner,
                tag: query.tag,
                text: query.text,
                limit: None,
            })
            .await
    }

    /// Apply partial field changes, snapshotting prior state first for
    /// stored-account editors.
    ///
    /// Root edits apply in place with no snapshot — privileged edits are
    /// not recoverable via history (see CHANGELOG release notes).
    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        patch: DocumentPatch,
    ) -> Result<Document> {
        if let Some(title) = &patch.title {
            validate_required("title", title)?;
        }
        if let Some(content) = &patch.content {
            validate_required("content", content)?;
        }

        let mut document = self.load(id).await?;
        self.gate_mutation(principal, &document)?;

        if let Principal::Account(account) = principal {
            let snapshot = document.snapshot(account.id);
            document.versions.push(snapshot);
        }

        let previous_content = document.content.clone();
        if let Some(title) = patch.title {
            document.title = title;
        }
        if let Some(content) = patch.content {
            document.content = content;
        }
        if let Some(tags) = patch.tags {
            document.tags = dedup_tags(tags);
        }

        if document.content != previous_content {
            document.summary = self.summary_or_empty(&document.content).await;
            document.embedding = self
                .embedding_or_empty(&document.title, &document.content)
                .await;
        }

        document.updated_at_utc = Utc::now();
        self.documents.update(document.clone()).await?;
        self.recorder
            .record(principal, document.id, &document.title, DocumentAction::Update)
            .await?;

        info!(document_id = %document.id, "document updated");
        Ok(document)
    }

    /// Hard-delete a document. The activity entry keeps the id and title
    /// captured before removal, since the record itself is gone.
    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<()> {
        let document = self.load(id).await?;
        self.gate_mutation(principal, &document)?;

        if !self.documents.remove(id).await? {
            return Err(Error::DocumentNotFound(id));
        }
        self.recorder
            .record(principal, document.id, &document.title, DocumentAction::Delete)
            .await?;

        info!(document_id = %id, "document deleted");
        Ok(())
    }

    /// Regenerate the summary from current content.
    ///
    /// Follows the update semantics: mutation gate, snapshot for
    /// stored-account editors, one Update activity entry.
    pub async fn refresh_summary(&self, principal: &Principal, id: Uuid) -> Result<Document> {
        let mut document = self.load(id).await?;
        self.gate_mutation(principal, &document)?;

        if let Principal::Account(account) = principal {
            let snapshot = document.snapshot(account.id);
            document.versions.push(snapshot);
        }

        document.summary = self.summary_or_empty(&document.content).await;
        document.updated_at_utc = Utc::now();
        self.documents.update(document.clone()).await?;
        self.recorder
            .record(principal, document.id, &document.title, DocumentAction::Update)
            .await?;

        Ok(document)
    }

    /// Merge AI-suggested tags into the existing tag set.
    ///
    /// Follows the update semantics like [`Self::refresh_summary`].
    pub async fn regenerate_tags(&self, principal: &Principal, id: Uuid) -> Result<Document> {
        let mut document = self.load(id).await?;
        self.gate_mutation(principal, &document)?;

        if let Principal::Account(account) = principal {
            let snapshot = document.snapshot(account.id);
            document.versions.push(snapshot);
        }

        let suggested = self.tags_or_empty(&document.content).await;
        document.tags = merge_tags(&document.tags, suggested);
        document.updated_at_utc = Utc::now();
        self.documents.update(document.clone()).await?;
        self.recorder
            .record(principal, document.id, &document.title, DocumentAction::Update)
            .await?;

        Ok(document)
    }

    async fn load(&self, id: Uuid) -> Result<Document> {
        self.documents
            .fetch(id)
            .await?
            .ok_or(Error::DocumentNotFound(id))
    }

    fn gate_mutation(&self, principal: &Principal, document: &Document) -> Result<()> {
        if !can_mutate(principal, document) {
            return Err(Error::Forbidden(
                "you can only modify your own documents".to_string(),
            ));
        }
        Ok(())
    }

    async fn summary_or_empty(&self, content: &str) -> String {
        match self.ai.summarize(content).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "summary enrichment degraded to empty");
                String::new()
            }
        }
    }

    async fn tags_or_empty(&self, content: &str) -> Vec<String> {
        match self.ai.suggest_tags(content).await {
            Ok(tags) => tags,
            Err(e) => {
                warn!(error = %e, "tag enrichment degraded to empty");
                vec![]
            }
        }
    }

    async fn embedding_or_empty(&self, title: &str, content: &str) -> Vector {
        match self.ai.embed(&format!("{}\n{}", title, content)).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!(error = %e, "embedding enrichment degraded to empty");
                Vector::new()
            }
        }
    }
}

fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}
