//! Activity trail: one append-only entry per successful mutation.
//!
//! Entries reference their actor polymorphically: a stored account id
//! resolved against the account store at read time, or the root marker
//! whose display name is denormalized at write time because there is no
//! record to join against.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use scriptorium_core::{
    defaults, AccountStore, ActivityEntry, ActivityStore, ActorId, DocumentAction, Principal,
    Result, RootConfig,
};

/// Display name reported when an entry's account has since disappeared.
const UNKNOWN_ACTOR: &str = "Unknown";

/// An activity entry with its actor resolved for presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityView {
    pub id: Uuid,
    pub actor: ActorId,
    pub actor_name: String,
    pub actor_email: Option<String>,
    pub document_id: Uuid,
    pub document_title: String,
    pub action: DocumentAction,
    pub created_at_utc: DateTime<Utc>,
}

/// Records and reads the audit trail.
pub struct ActivityRecorder {
    activity: Arc<dyn ActivityStore>,
    accounts: Arc<dyn AccountStore>,
    root: RootConfig,
}

impl ActivityRecorder {
    pub fn new(
        activity: Arc<dyn ActivityStore>,
        accounts: Arc<dyn AccountStore>,
        root: RootConfig,
    ) -> Self {
        Self {
            activity,
            accounts,
            root,
        }
    }

    /// Append one entry for a successful mutation.
    ///
    /// The document title is denormalized on every entry so delete
    /// entries stay meaningful after the document is gone.
    pub async fn record(
        &self,
        principal: &Principal,
        document_id: Uuid,
        document_title: &str,
        action: DocumentAction,
    ) -> Result<ActivityEntry> {
        let actor_name = match principal {
            Principal::Root => Some(self.root.display_name.clone()),
            Principal::Account(_) => None,
        };

        let entry = ActivityEntry {
            id: Uuid::new_v4(),
            actor: principal.actor_id(),
            document_id,
            document_title: document_title.to_string(),
            action,
            actor_name,
            created_at_utc: Utc::now(),
        };

        self.activity.append(entry.clone()).await?;
        debug!(
            document_id = %document_id,
            action = ?action,
            "activity recorded"
        );
        Ok(entry)
    }

    /// The most recent entries (newest first) with actors resolved.
    ///
    /// An account that has since been removed degrades to a placeholder
    /// name; it never fails the feed.
    pub async fn latest(&self, limit: usize) -> Result<Vec<ActivityView>> {
        let entries = self.activity.latest(limit).await?;

        let mut views = Vec::with_capacity(entries.len());
        for entry in entries {
            let (actor_name, actor_email) = match entry.actor {
                ActorId::Root => (
                    entry
                        .actor_name
                        .clone()
                        .unwrap_or_else(|| self.root.display_name.clone()),
                    Some(defaults::ROOT_EMAIL.to_string()),
                ),
                ActorId::Account(id) => match self.accounts.fetch(id).await? {
                    Some(account) => (account.display_name, Some(account.email)),
                    None => (UNKNOWN_ACTOR.to_string(), None),
                },
            };

            views.push(ActivityView {
                id: entry.id,
                actor: entry.actor,
                actor_name,
                actor_email,
                document_id: entry.document_id,
                document_title: entry.document_title,
                action: entry.action,
                created_at_utc: entry.created_at_utc,
            });
        }
        Ok(views)
    }

    /// The default-size activity feed.
    pub async fn feed(&self) -> Result<Vec<ActivityView>> {
        self.latest(defaults::ACTIVITY_FEED_LIMIT).await
    }
}
