//! # scriptorium-service
//!
//! Identity resolution, the document version & mutation engine, and the
//! activity trail for scriptorium.
//!
//! The flow through this crate mirrors the system's dependency order:
//! the [`IdentityResolver`] turns verified token claims into a
//! principal, the access-scope predicates from `scriptorium-core` gate
//! every entry into the [`DocumentService`], and every successful
//! mutation lands one entry in the [`ActivityRecorder`].

pub mod activity;
pub mod documents;
pub mod identity;

pub use activity::{ActivityRecorder, ActivityView};
pub use documents::{DocumentPatch, DocumentService, ListDocuments, NewDocument};
pub use identity::IdentityResolver;
