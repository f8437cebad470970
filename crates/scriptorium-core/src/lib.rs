//! # scriptorium-core
//!
//! Core types, traits, and abstractions for the scriptorium document
//! repository.
//!
//! This crate provides the domain entities (principals, documents,
//! version snapshots, activity entries), the access-scope predicates that
//! gate every read and write, the error taxonomy, and the trait contracts
//! for the external storage and AI collaborators.

pub mod access;
pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod tags;
pub mod traits;

// Re-export commonly used types at crate root
pub use access::{can_mutate, can_view, list_scope};
pub use config::RootConfig;
pub use error::{Error, Result};
pub use models::*;
pub use tags::{dedup_tags, merge_tags};
pub use traits::*;
