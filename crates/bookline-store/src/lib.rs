//! # bookline-store
//!
//! Persistence layer for Bookline. Repositories speak to the remote
//! document store through the narrow [`bookline_core::traits::DocumentStore`]
//! trait; the `memory` module carries in-memory implementations of every
//! collaborator for tests and single-node use.

pub mod memory;
pub mod repositories;

pub use repositories::Versioned;
