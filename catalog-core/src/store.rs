//! Catalog persistence
//!
//! The lifecycle is written against the [`CatalogStore`] trait so the rules
//! can be exercised without a live document store. The contract mirrors the
//! narrow slice of a document database the marketplace actually uses:
//! create, find-by-id, and targeted field updates. `reserve_if_available`
//! is the one operation that must be an atomic conditional update; with two
//! concurrent buyers exactly one caller may win.
//!
//! [`MemoryCatalog`] is the in-process implementation used by tests and the
//! demo binary; its per-key locking makes the reservation genuinely atomic.

use crate::{
    error::{Error, Result},
    types::{ApprovalStatus, BookId, Listing},
};
use chrono::Utc;
use dashmap::DashMap;

/// Persistence contract for listings
pub trait CatalogStore: Send + Sync {
    /// Insert a new listing. Fails with `Validation` on a duplicate title.
    fn insert(&self, listing: Listing) -> Result<Listing>;

    /// Fetch a listing by id. Fails with `NotFound` if absent.
    fn get(&self, id: BookId) -> Result<Listing>;

    /// Atomically flip `available: true → false`.
    ///
    /// Fails with `Conflict` if the listing is already reserved. Exactly one
    /// of any set of concurrent callers succeeds.
    fn reserve_if_available(&self, id: BookId) -> Result<Listing>;

    /// Set `available = true`. Idempotent.
    fn release(&self, id: BookId) -> Result<Listing>;

    /// Record a moderation decision, keeping `is_approved` derived from it.
    fn set_approval(&self, id: BookId, approval: ApprovalStatus) -> Result<Listing>;

    /// Increment the detail-page view counter.
    fn bump_views(&self, id: BookId) -> Result<Listing>;

    /// Look up a listing by its unique title.
    fn find_by_title(&self, title: &str) -> Option<Listing>;
}

/// In-memory catalog store
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    books: DashMap<BookId, Listing>,
    titles: DashMap<String, BookId>,
}

impl MemoryCatalog {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listings held
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// True when no listings are held
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn with_mut<F>(&self, id: BookId, f: F) -> Result<Listing>
    where
        F: FnOnce(&mut Listing) -> Result<()>,
    {
        let mut entry = self
            .books
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("Listing {} not found", id)))?;
        f(entry.value_mut())?;
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }
}

impl CatalogStore for MemoryCatalog {
    fn insert(&self, listing: Listing) -> Result<Listing> {
        // Claim the title first; the entry lock makes the uniqueness check
        // and the claim a single step.
        match self.titles.entry(listing.title.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(Error::Validation(format!(
                    "A listing titled \"{}\" already exists",
                    listing.title
                )));
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(listing.id);
            }
        }
        self.books.insert(listing.id, listing.clone());
        Ok(listing)
    }

    fn get(&self, id: BookId) -> Result<Listing> {
        self.books
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::NotFound(format!("Listing {} not found", id)))
    }

    fn reserve_if_available(&self, id: BookId) -> Result<Listing> {
        self.with_mut(id, |listing| {
            if !listing.available {
                return Err(Error::Conflict(format!("Listing {} is not available", id)));
            }
            listing.available = false;
            Ok(())
        })
    }

    fn release(&self, id: BookId) -> Result<Listing> {
        self.with_mut(id, |listing| {
            listing.available = true;
            Ok(())
        })
    }

    fn set_approval(&self, id: BookId, approval: ApprovalStatus) -> Result<Listing> {
        self.with_mut(id, |listing| {
            listing.is_approved = matches!(approval, ApprovalStatus::Approved { .. });
            listing.approval = approval;
            Ok(())
        })
    }

    fn bump_views(&self, id: BookId) -> Result<Listing> {
        self.with_mut(id, |listing| {
            listing.views += 1;
            Ok(())
        })
    }

    fn find_by_title(&self, title: &str) -> Option<Listing> {
        let id = *self.titles.get(title)?;
        self.books.get(&id).map(|entry| entry.value().clone())
    }
}
