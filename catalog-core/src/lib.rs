//! Bookrail Catalog Core
//!
//! Listing data model and lifecycle for the book marketplace.
//!
//! # Architecture
//!
//! - **Repository traits**: persistence is injected (`CatalogStore`), so the
//!   lifecycle rules are testable without a live document store
//! - **Atomic reservation**: availability flips through a conditional update,
//!   exactly one concurrent buyer wins
//! - **Approval gate**: a listing is offered to buyers only when it is both
//!   approved and available
//!
//! # Invariants
//!
//! - Purchasable ⇔ `is_approved && available`
//! - `approval` and `is_approved` never disagree: `Approved` ⇒ `is_approved`
//! - A reservation never succeeds against an unavailable listing

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod store;
pub mod lifecycle;
pub mod error;
pub mod config;

// Re-exports
pub use error::{Error, Result};
pub use types::{
    ApprovalStatus, BookId, Category, Condition, GeoPoint, Listing, ListingDraft, ReaderId,
};
pub use store::{CatalogStore, MemoryCatalog};
pub use lifecycle::Lifecycle;
pub use config::Config;
