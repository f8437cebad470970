//! End-to-end mutation engine tests: ownership scoping, version history
//! asymmetry, enrichment degradation, and the activity trail, wired over
//! the in-memory store and the mock AI backend.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use scriptorium_core::{
    Account, ActivityStore, ActorId, DocumentAction, Error, Principal, Role, RootConfig,
};
use scriptorium_inference::MockEnrichmentBackend;
use scriptorium_service::{
    ActivityRecorder, DocumentPatch, DocumentService, ListDocuments, NewDocument,
};
use scriptorium_store::MemoryStore;

struct Harness {
    store: Arc<MemoryStore>,
    ai: MockEnrichmentBackend,
    service: DocumentService,
}

fn harness_with(ai: MockEnrichmentBackend) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let recorder = ActivityRecorder::new(store.clone(), store.clone(), RootConfig::default());
    let service = DocumentService::new(store.clone(), Arc::new(ai.clone()), recorder);
    Harness { store, ai, service }
}

fn harness() -> Harness {
    harness_with(
        MockEnrichmentBackend::new()
            .with_summary("Generated summary")
            .with_tags(vec!["suggested".to_string()])
            .with_dimension(4),
    )
}

fn member(name: &str) -> Principal {
    Principal::Account(Account {
        id: Uuid::new_v4(),
        display_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role: Role::Member,
        created_at_utc: Utc::now(),
    })
}

fn admin_account() -> Principal {
    Principal::Account(Account {
        id: Uuid::new_v4(),
        display_name: "Root-ish".to_string(),
        email: "admin-account@example.com".to_string(),
        role: Role::Admin,
        created_at_utc: Utc::now(),
    })
}

fn new_doc(title: &str, content: &str) -> NewDocument {
    NewDocument {
        title: title.to_string(),
        content: content.to_string(),
        tags: vec![],
    }
}

// ─── create ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_enriches_merges_tags_and_records_activity() {
    let h = harness();
    let alice = member("Alice");

    let doc = h
        .service
        .create(
            &alice,
            NewDocument {
                title: "Borrow checker".to_string(),
                content: "Ownership and borrowing".to_string(),
                tags: vec!["rust".to_string(), "suggested".to_string()],
            },
        )
        .await
        .unwrap();

    assert_eq!(doc.summary, "Generated summary");
    // Caller tags first, AI suggestions merged in, duplicates collapsed.
    assert_eq!(doc.tags, vec!["rust".to_string(), "suggested".to_string()]);
    assert_eq!(doc.embedding.len(), 4);
    assert_eq!(doc.owner, alice.actor_id());
    assert!(doc.versions.is_empty());

    // Embedding input is "{title}\n{content}".
    let embed_inputs: Vec<String> = h
        .ai
        .calls()
        .into_iter()
        .filter(|c| c.operation == "embed")
        .map(|c| c.input)
        .collect();
    assert_eq!(embed_inputs, vec!["Borrow checker\nOwnership and borrowing"]);

    let feed = h.store.latest(10).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].action, DocumentAction::Create);
    assert_eq!(feed[0].document_id, doc.id);
}

#[tokio::test]
async fn create_degrades_enrichment_on_ai_failure() {
    let h = harness_with(MockEnrichmentBackend::new().with_failure_rate(1.0));
    let alice = member("Alice");

    let doc = h
        .service
        .create(
            &alice,
            NewDocument {
                title: "T".to_string(),
                content: "C".to_string(),
                tags: vec!["kept".to_string()],
            },
        )
        .await
        .unwrap();

    assert_eq!(doc.summary, "");
    assert_eq!(doc.tags, vec!["kept".to_string()]);
    assert!(doc.embedding.is_empty());
}

#[tokio::test]
async fn create_rejects_blank_fields() {
    let h = harness();
    let alice = member("Alice");

    assert!(matches!(
        h.service.create(&alice, new_doc("  ", "content")).await,
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        h.service.create(&alice, new_doc("title", "")).await,
        Err(Error::InvalidInput(_))
    ));
}

// ─── visibility ────────────────────────────────────────────────────────────

#[tokio::test]
async fn members_see_only_their_own_documents() {
    let h = harness();
    let alice = member("Alice");
    let bob = member("Bob");

    let d1 = h.service.create(&alice, new_doc("D1", "alpha")).await.unwrap();
    let d2 = h.service.create(&alice, new_doc("D2", "beta")).await.unwrap();
    let d3 = h.service.create(&bob, new_doc("D3", "gamma")).await.unwrap();

    let alice_docs = h
        .service
        .list(&alice, ListDocuments::default())
        .await
        .unwrap();
    let alice_ids: Vec<Uuid> = alice_docs.iter().map(|d| d.id).collect();
    assert_eq!(alice_docs.len(), 2);
    assert!(alice_ids.contains(&d1.id) && alice_ids.contains(&d2.id));

    for p in [Principal::Root, admin_account()] {
        let all = h.service.list(&p, ListDocuments::default()).await.unwrap();
        assert_eq!(all.len(), 3, "admin-class principals list everything");
    }

    // Foreign get is Forbidden, absent get is DocumentNotFound.
    assert!(matches!(
        h.service.get(&bob, d1.id).await,
        Err(Error::Forbidden(_))
    ));
    assert!(matches!(
        h.service.get(&bob, Uuid::new_v4()).await,
        Err(Error::DocumentNotFound(_))
    ));
    assert_eq!(h.service.get(&bob, d3.id).await.unwrap().id, d3.id);
}

#[tokio::test]
async fn mine_filter_restricts_even_admins() {
    let h = harness();
    let alice = member("Alice");
    let admin = admin_account();

    h.service.create(&alice, new_doc("A", "alpha")).await.unwrap();
    let own = h.service.create(&admin, new_doc("B", "beta")).await.unwrap();

    let mine = h
        .service
        .list(
            &admin,
            ListDocuments {
                mine: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, own.id);
}

#[tokio::test]
async fn tag_filter_cannot_widen_a_member_scope() {
    let h = harness();
    let alice = member("Alice");
    let bob = member("Bob");

    h.service
        .create(
            &bob,
            NewDocument {
                title: "Bob's".to_string(),
                content: "secret".to_string(),
                tags: vec!["shared-tag".to_string()],
            },
        )
        .await
        .unwrap();

    let found = h
        .service
        .list(
            &alice,
            ListDocuments {
                tag: Some("shared-tag".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(found.is_empty());
}

// ─── update & version history ──────────────────────────────────────────────

#[tokio::test]
async fn account_updates_snapshot_prior_state_oldest_first() {
    let h = harness();
    let alice = member("Alice");
    let alice_id = match &alice {
        Principal::Account(a) => a.id,
        _ => unreachable!(),
    };

    let doc = h.service.create(&alice, new_doc("T0", "C0")).await.unwrap();

    let doc = h
        .service
        .update(
            &alice,
            doc.id,
            DocumentPatch {
                content: Some("C1".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let doc = h
        .service
        .update(
            &alice,
            doc.id,
            DocumentPatch {
                content: Some("C2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(doc.content, "C2");
    assert_eq!(doc.versions.len(), 2);
    // Oldest first, each snapshot equals the state immediately before
    // that update.
    assert_eq!(doc.versions[0].content, "C0");
    assert_eq!(doc.versions[0].title, "T0");
    assert_eq!(doc.versions[1].content, "C1");
    assert!(doc.versions.iter().all(|v| v.updated_by == alice_id));
}

#[tokio::test]
async fn root_updates_leave_no_history() {
    let h = harness();
    let alice = member("Alice");

    let doc = h.service.create(&alice, new_doc("T", "C")).await.unwrap();
    let doc = h
        .service
        .update(
            &Principal::Root,
            doc.id,
            DocumentPatch {
                content: Some("patched by root".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(doc.content, "patched by root");
    assert!(doc.versions.is_empty());

    // A later account edit snapshots the root-written state.
    let doc = h
        .service
        .update(
            &alice,
            doc.id,
            DocumentPatch {
                content: Some("C2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(doc.versions.len(), 1);
    assert_eq!(doc.versions[0].content, "patched by root");
}

#[tokio::test]
async fn content_change_recomputes_summary_and_embedding() {
    let h = harness();
    let alice = member("Alice");
    let doc = h.service.create(&alice, new_doc("T", "C")).await.unwrap();
    assert_eq!(h.ai.call_count("embed"), 1);

    // Title-only patch: no recompute.
    let doc = h
        .service
        .update(
            &alice,
            doc.id,
            DocumentPatch {
                title: Some("T2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(h.ai.call_count("embed"), 1);
    assert_eq!(h.ai.call_count("summarize"), 1);

    // Content patch: summary and embedding recomputed from the new state.
    h.service
        .update(
            &alice,
            doc.id,
            DocumentPatch {
                content: Some("C2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(h.ai.call_count("embed"), 2);
    assert_eq!(h.ai.call_count("summarize"), 2);

    let embed_inputs: Vec<String> = h
        .ai
        .calls()
        .into_iter()
        .filter(|c| c.operation == "embed")
        .map(|c| c.input)
        .collect();
    assert_eq!(embed_inputs[1], "T2\nC2");
}

#[tokio::test]
async fn update_gates_before_mutating() {
    let h = harness();
    let alice = member("Alice");
    let bob = member("Bob");
    let doc = h.service.create(&alice, new_doc("T", "C")).await.unwrap();

    let result = h
        .service
        .update(
            &bob,
            doc.id,
            DocumentPatch {
                content: Some("hijacked".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(Error::Forbidden(_))));

    // Nothing changed, nothing recorded beyond the create.
    let unchanged = h.service.get(&alice, doc.id).await.unwrap();
    assert_eq!(unchanged.content, "C");
    assert!(unchanged.versions.is_empty());
    assert_eq!(h.store.activity_count().await, 1);

    assert!(matches!(
        h.service
            .update(&alice, Uuid::new_v4(), DocumentPatch::default())
            .await,
        Err(Error::DocumentNotFound(_))
    ));
}

// ─── delete ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_document_and_records_denormalized_entry() {
    let h = harness();
    let alice = member("Alice");
    let doc = h
        .service
        .create(&alice, new_doc("Quarterly report", "numbers"))
        .await
        .unwrap();

    h.service.delete(&alice, doc.id).await.unwrap();

    assert!(matches!(
        h.service.get(&alice, doc.id).await,
        Err(Error::DocumentNotFound(_))
    ));

    let deletes: Vec<_> = h
        .store
        .latest(10)
        .await
        .unwrap()
        .into_iter()
        .filter(|e| e.action == DocumentAction::Delete)
        .collect();
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].document_id, doc.id);
    assert_eq!(deletes[0].document_title, "Quarterly report");
}

#[tokio::test]
async fn delete_foreign_document_is_forbidden() {
    let h = harness();
    let alice = member("Alice");
    let bob = member("Bob");
    let doc = h.service.create(&alice, new_doc("T", "C")).await.unwrap();

    assert!(matches!(
        h.service.delete(&bob, doc.id).await,
        Err(Error::Forbidden(_))
    ));
    assert!(h.service.get(&alice, doc.id).await.is_ok());
}

// ─── supplemental enrichment operations ────────────────────────────────────

#[tokio::test]
async fn refresh_summary_follows_update_semantics() {
    let h = harness();
    let alice = member("Alice");
    let bob = member("Bob");
    let doc = h.service.create(&alice, new_doc("T", "C")).await.unwrap();

    assert!(matches!(
        h.service.refresh_summary(&bob, doc.id).await,
        Err(Error::Forbidden(_))
    ));

    let refreshed = h.service.refresh_summary(&alice, doc.id).await.unwrap();
    assert_eq!(refreshed.summary, "Generated summary");
    assert_eq!(refreshed.versions.len(), 1);
}

#[tokio::test]
async fn regenerate_tags_merges_into_existing_set() {
    let h = harness();
    let alice = member("Alice");
    let doc = h
        .service
        .create(
            &alice,
            NewDocument {
                title: "T".to_string(),
                content: "C".to_string(),
                tags: vec!["manual".to_string()],
            },
        )
        .await
        .unwrap();

    let doc = h.service.regenerate_tags(&alice, doc.id).await.unwrap();
    assert_eq!(
        doc.tags,
        vec!["manual".to_string(), "suggested".to_string()]
    );
}

// ─── activity feed resolution ──────────────────────────────────────────────

#[tokio::test]
async fn activity_feed_resolves_both_actor_kinds() {
    let h = harness();
    let alice = member("Alice");
    match &alice {
        Principal::Account(a) => {
            use scriptorium_core::AccountStore;
            h.store.insert(a.clone()).await.unwrap();
        }
        _ => unreachable!(),
    }

    h.service.create(&alice, new_doc("Hers", "x")).await.unwrap();
    h.service
        .create(&Principal::Root, new_doc("Ops", "y"))
        .await
        .unwrap();

    let recorder = ActivityRecorder::new(h.store.clone(), h.store.clone(), RootConfig::default());
    let feed = recorder.feed().await.unwrap();
    assert_eq!(feed.len(), 2);

    let root_entry = feed.iter().find(|v| v.actor == ActorId::Root).unwrap();
    assert_eq!(root_entry.actor_name, "Administrator");
    assert_eq!(root_entry.actor_email.as_deref(), Some("admin@system.local"));

    let account_entry = feed
        .iter()
        .find(|v| matches!(v.actor, ActorId::Account(_)))
        .unwrap();
    assert_eq!(account_entry.actor_name, "Alice");
}
