//! # bookline-core
//!
//! Core crate for Bookline. Contains collaborator traits, configuration
//! schemas, typed identifiers, conversation identity, change events, and
//! the unified error system.
//!
//! This crate has **no** internal dependencies on other Bookline crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod telemetry;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
