//! # scriptorium-store
//!
//! Reference storage engine for scriptorium.
//!
//! The policy core treats storage as an external collaborator with a
//! narrow contract (key lookup, filtered find, keyword/text predicate).
//! This crate provides the in-memory implementation of that contract used
//! in tests and single-process deployments; a persistent engine plugs in
//! by implementing the same `scriptorium-core` traits.

pub mod memory;

pub use memory::MemoryStore;
