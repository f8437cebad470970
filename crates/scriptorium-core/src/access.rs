//! Access-scope predicates gating every read and write.
//!
//! Two rules only: admin-class principals (root, or accounts with the
//! admin role) see and mutate everything; everyone else is confined to
//! documents they own. There is no separate write-role tier.

use crate::models::{ActorId, Document, Principal};

/// True iff `principal` may view `document`.
pub fn can_view(principal: &Principal, document: &Document) -> bool {
    principal.is_admin() || document.owner == principal.actor_id()
}

/// True iff `principal` may mutate `document`. Identical rule to
/// [`can_view`]: ownership or admin.
pub fn can_mutate(principal: &Principal, document: &Document) -> bool {
    can_view(principal, document)
}

/// Ownership restriction applied to list and search operations.
///
/// `None` means unrestricted (admin-class). The returned restriction is
/// ANDed with caller-supplied filters, never ORed, so a non-privileged
/// caller cannot widen visibility by adding filters.
pub fn list_scope(principal: &Principal) -> Option<ActorId> {
    if principal.is_admin() {
        None
    } else {
        Some(principal.actor_id())
    }
}
