//! Listing lifecycle
//!
//! Single source of truth for whether a listing is visible and purchasable.
//!
//! A listing is born unapproved and available. Moderation approves or
//! rejects it; a purchase reserves it (flips `available` off); settling the
//! purchase releases it again. The reservation goes through the store's
//! conditional update, so two concurrent buyers cannot both reserve the
//! same book.

use crate::{
    config::Config,
    error::{Error, Result},
    store::CatalogStore,
    types::{ApprovalStatus, BookId, Listing, ListingDraft, ReaderId},
};
use chrono::Utc;
use std::sync::Arc;

/// Listing lifecycle over an injected catalog store
#[derive(Clone)]
pub struct Lifecycle {
    store: Arc<dyn CatalogStore>,
    config: Config,
}

impl std::fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lifecycle")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Lifecycle {
    /// Create a lifecycle with default configuration
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self::with_config(store, Config::default())
    }

    /// Create a lifecycle with explicit configuration
    pub fn with_config(store: Arc<dyn CatalogStore>, config: Config) -> Self {
        Self { store, config }
    }

    /// Access the underlying store
    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    /// Fetch a listing by id
    pub fn get(&self, id: BookId) -> Result<Listing> {
        self.store.get(id)
    }

    /// Validate and insert a new listing: unapproved, available
    pub fn submit(&self, draft: ListingDraft) -> Result<Listing> {
        self.validate(&draft)?;
        let listing = self.store.insert(Listing::from_draft(draft))?;
        tracing::info!(
            listing = %listing.id,
            owner = %listing.owner,
            title = %listing.title,
            "Listing submitted, pending approval"
        );
        Ok(listing)
    }

    /// Reserve a purchasable listing for a buyer
    ///
    /// Fails with `NotFound` if the listing is missing, `Conflict` if it is
    /// not purchasable, `Forbidden` if the requester owns it. The
    /// availability flip is the store's conditional update; of two
    /// concurrent buyers one gets the listing and the other `Conflict`.
    pub fn reserve(&self, id: BookId, requester: ReaderId) -> Result<Listing> {
        let listing = self.store.get(id)?;
        if !listing.is_purchasable() {
            return Err(Error::Conflict(format!(
                "Listing {} is not open for purchase",
                id
            )));
        }
        if listing.owner == requester {
            return Err(Error::Forbidden(
                "Cannot buy your own listing".to_string(),
            ));
        }
        let reserved = self.store.reserve_if_available(id)?;
        tracing::info!(listing = %id, buyer = %requester, "Listing reserved");
        Ok(reserved)
    }

    /// Make a listing available again
    ///
    /// Idempotent; re-releasing an already-available listing is a no-op
    /// success. Fails only with `NotFound`.
    pub fn release(&self, id: BookId) -> Result<Listing> {
        let listing = self.store.release(id)?;
        tracing::info!(listing = %id, "Listing released");
        Ok(listing)
    }

    /// Approve a pending listing
    ///
    /// Sets the moderation state and the `is_approved` flag in one store
    /// update, so the two can never disagree. Fails with `Conflict` once a
    /// decision has been made.
    pub fn approve(&self, id: BookId, moderator: ReaderId) -> Result<Listing> {
        let listing = self.store.get(id)?;
        if listing.approval.is_decided() {
            return Err(Error::Conflict(format!(
                "Listing {} has already been moderated",
                id
            )));
        }
        let approved = self.store.set_approval(
            id,
            ApprovalStatus::Approved {
                by: moderator,
                at: Utc::now(),
            },
        )?;
        tracing::info!(listing = %id, moderator = %moderator, "Listing approved");
        Ok(approved)
    }

    /// Reject a pending listing with a reason
    pub fn reject(&self, id: BookId, moderator: ReaderId, reason: impl Into<String>) -> Result<Listing> {
        let listing = self.store.get(id)?;
        if listing.approval.is_decided() {
            return Err(Error::Conflict(format!(
                "Listing {} has already been moderated",
                id
            )));
        }
        let reason = reason.into();
        let rejected = self
            .store
            .set_approval(id, ApprovalStatus::Rejected { reason: reason.clone() })?;
        tracing::info!(listing = %id, moderator = %moderator, %reason, "Listing rejected");
        Ok(rejected)
    }

    /// Count a detail-page view
    pub fn record_view(&self, id: BookId) -> Result<Listing> {
        self.store.bump_views(id)
    }

    fn validate(&self, draft: &ListingDraft) -> Result<()> {
        let limits = &self.config.validation;
        if draft.title.trim().is_empty() {
            return Err(Error::Validation("Book title is required".to_string()));
        }
        if draft.title.chars().count() > limits.max_title_len {
            return Err(Error::Validation(format!(
                "Title exceeds {} characters",
                limits.max_title_len
            )));
        }
        if draft.author.trim().is_empty() {
            return Err(Error::Validation("Author name is required".to_string()));
        }
        if draft.price.is_sign_negative() {
            return Err(Error::Validation("Price must be non-negative".to_string()));
        }
        if let Some(description) = &draft.description {
            if description.chars().count() > limits.max_description_len {
                return Err(Error::Validation(format!(
                    "Description exceeds {} characters",
                    limits.max_description_len
                )));
            }
        }
        Ok(())
    }
}
