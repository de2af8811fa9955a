//! # bookline-entity
//!
//! Domain entity models for Bookline. Every struct in this crate
//! represents a document-store record or a domain value object. All
//! entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.
//!
//! Bookings and messages are modeled as tagged unions keyed on `status`
//! and `kind` respectively, so each variant only carries the fields
//! meaningful to that state.

pub mod booking;
pub mod commission;
pub mod message;
pub mod payment;
