//! Core data models for scriptorium.
//!
//! These types are shared across all scriptorium crates and represent
//! the core domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;

/// An embedding vector produced by the AI collaborator.
///
/// May be empty when enrichment failed or was never run; an empty vector
/// scores 0.0 against every query (zero-norm rule in the ranker).
pub type Vector = Vec<f32>;

// =============================================================================
// IDENTITY TYPES
// =============================================================================

/// Role carried by a stored account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Admin,
}

/// A stored user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub created_at_utc: DateTime<Utc>,
}

/// The authenticated actor performing an operation.
///
/// Two kinds only: a stored account, or the configuration-derived root
/// principal which has no backing record and is admin-class by definition.
/// Modeled as an enum rather than a nullable account reference so every
/// consumer handles both kinds exhaustively.
#[derive(Debug, Clone)]
pub enum Principal {
    Account(Account),
    Root,
}

impl Principal {
    /// True for the root principal and for stored accounts with the admin role.
    pub fn is_admin(&self) -> bool {
        match self {
            Principal::Root => true,
            Principal::Account(account) => account.role == Role::Admin,
        }
    }

    /// The identity this principal stamps onto owned documents and activity.
    pub fn actor_id(&self) -> ActorId {
        match self {
            Principal::Root => ActorId::Root,
            Principal::Account(account) => ActorId::Account(account.id),
        }
    }

    /// Display name for audit purposes.
    pub fn display_name(&self) -> &str {
        match self {
            Principal::Root => defaults::ROOT_DISPLAY_NAME,
            Principal::Account(account) => &account.display_name,
        }
    }
}

/// Reference to an actor, usable as a document owner or activity actor.
///
/// The `Root` variant is structurally distinct from every `Account` id,
/// which encodes the invariant that the root principal never collides
/// with a stored account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ActorId {
    Account(Uuid),
    Root,
}

/// Claims extracted from a verified bearer credential.
///
/// Produced by the external identity collaborator; the subject is either
/// the configured root marker or a stored account UUID in string form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub subject: String,
    pub role: Role,
}

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// A document in the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Tag set: deduplicated, insertion order preserved.
    pub tags: Vec<String>,
    /// AI-derived summary; empty when enrichment failed or was never run.
    pub summary: String,
    /// Owner, immutable after creation.
    pub owner: ActorId,
    /// Embedding of "{title}\n{content}"; empty when enrichment degraded.
    pub embedding: Vector,
    /// Edit history, oldest-first. Never contains the current live state:
    /// each entry is the snapshot taken immediately before an update.
    pub versions: Vec<VersionSnapshot>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

/// Immutable copy of a document's content fields taken just before an update.
///
/// Only stored-account edits produce snapshots; root edits apply in place
/// with no history entry (see CHANGELOG release notes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionSnapshot {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub updated_at_utc: DateTime<Utc>,
    /// Account that triggered the snapshotting update.
    pub updated_by: Uuid,
}

impl Document {
    /// Snapshot the current content fields as edited by `account_id`.
    pub fn snapshot(&self, account_id: Uuid) -> VersionSnapshot {
        VersionSnapshot {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
            summary: self.summary.clone(),
            updated_at_utc: Utc::now(),
            updated_by: account_id,
        }
    }
}

// =============================================================================
// ACTIVITY TYPES
// =============================================================================

/// Kind of mutation recorded in the activity trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentAction {
    Create,
    Update,
    Delete,
}

/// One append-only audit record, written once per successful mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: Uuid,
    pub actor: ActorId,
    pub document_id: Uuid,
    /// Denormalized title so delete entries stay meaningful after the
    /// document itself is gone.
    pub document_title: String,
    pub action: DocumentAction,
    /// Denormalized display name. Always `Some` for root entries, which
    /// have no account record to join against.
    pub actor_name: Option<String>,
    pub created_at_utc: DateTime<Utc>,
}
