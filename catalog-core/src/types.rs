//! Core types for the catalog
//!
//! All types are designed for:
//! - Serde serialization (JSON payloads and the document store)
//! - Exact arithmetic (Decimal for prices)
//! - Time-ordered ids (UUIDv7)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Listing identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(Uuid);

impl BookId {
    /// Mint a new id (UUIDv7 for time-ordering)
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing id
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reader (account) identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReaderId(Uuid);

impl ReaderId {
    /// Mint a new id
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing id
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ReaderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Book category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Fiction
    Fiction,
    /// Non-fiction
    NonFiction,
    /// Education
    Education,
    /// Comics
    Comics,
    /// Everything else
    #[default]
    Other,
}

impl Category {
    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fiction => "Fiction",
            Category::NonFiction => "Non-fiction",
            Category::Education => "Education",
            Category::Comics => "Comics",
            Category::Other => "Other",
        }
    }

    /// Parse from canonical name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Fiction" => Some(Category::Fiction),
            "Non-fiction" => Some(Category::NonFiction),
            "Education" => Some(Category::Education),
            "Comics" => Some(Category::Comics),
            "Other" => Some(Category::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Physical condition of a book
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Unread
    New,
    /// Lightly used
    Good,
    /// Visibly worn
    #[default]
    Used,
}

impl Condition {
    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::Good => "Good",
            Condition::Used => "Used",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Moderation state of a listing
///
/// The variants carry the moderation metadata, so `Approved` cannot exist
/// without a moderator and timestamp, and `Rejected` cannot exist without
/// a reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Awaiting moderation
    Pending,
    /// Cleared for the storefront
    Approved {
        /// Moderator who approved
        by: ReaderId,
        /// When it was approved
        at: DateTime<Utc>,
    },
    /// Rejected by moderation
    Rejected {
        /// Why it was rejected
        reason: String,
    },
}

impl ApprovalStatus {
    /// Still awaiting a moderation decision
    pub fn is_pending(&self) -> bool {
        matches!(self, ApprovalStatus::Pending)
    }

    /// A decision has been made (approved or rejected)
    pub fn is_decided(&self) -> bool {
        !self.is_pending()
    }
}

/// Geographic point (longitude, latitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
}

/// Owner-supplied fields for a new listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDraft {
    /// Book title (unique across the catalog)
    pub title: String,

    /// Author name
    pub author: String,

    /// Category
    #[serde(default)]
    pub category: Category,

    /// Condition
    #[serde(default)]
    pub condition: Condition,

    /// Asking price (non-negative)
    pub price: Decimal,

    /// Where the book is offered
    pub location: GeoPoint,

    /// Listing owner
    pub owner: ReaderId,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,

    /// Cover image reference
    #[serde(default)]
    pub image: Option<String>,
}

/// A book offered for sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Unique id
    pub id: BookId,

    /// Book title (unique across the catalog)
    pub title: String,

    /// Author name
    pub author: String,

    /// Category
    pub category: Category,

    /// Condition
    pub condition: Condition,

    /// Asking price
    pub price: Decimal,

    /// Where the book is offered
    pub location: GeoPoint,

    /// Listing owner
    pub owner: ReaderId,

    /// Free-form description
    pub description: Option<String>,

    /// Cover image reference
    pub image: Option<String>,

    /// Detail-page view counter
    pub views: u64,

    /// Purchasable right now (flipped off while a sale is pending)
    pub available: bool,

    /// Moderation gate, kept consistent with `approval`
    pub is_approved: bool,

    /// Moderation state
    pub approval: ApprovalStatus,

    /// Promoted on the storefront
    pub is_featured: bool,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Last updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Build a fresh listing from a draft: unapproved, available, zero views
    pub fn from_draft(draft: ListingDraft) -> Self {
        let now = Utc::now();
        Self {
            id: BookId::new(),
            title: draft.title,
            author: draft.author,
            category: draft.category,
            condition: draft.condition,
            price: draft.price,
            location: draft.location,
            owner: draft.owner,
            description: draft.description,
            image: draft.image,
            views: 0,
            available: true,
            is_approved: false,
            approval: ApprovalStatus::Pending,
            is_featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Offered to buyers right now
    pub fn is_purchasable(&self) -> bool {
        self.is_approved && self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn draft(owner: ReaderId) -> ListingDraft {
        ListingDraft {
            title: "The Master and Margarita".to_string(),
            author: "Mikhail Bulgakov".to_string(),
            category: Category::Fiction,
            condition: Condition::Good,
            price: Decimal::new(2000, 2),
            location: GeoPoint { lon: 37.6, lat: 55.7 },
            owner,
            description: None,
            image: None,
        }
    }

    #[test]
    fn fresh_listing_is_available_but_not_purchasable() {
        let listing = Listing::from_draft(draft(ReaderId::new()));
        assert!(listing.available);
        assert!(!listing.is_approved);
        assert!(listing.approval.is_pending());
        assert!(!listing.is_purchasable());
    }

    #[test]
    fn purchasable_requires_both_flags() {
        let mut listing = Listing::from_draft(draft(ReaderId::new()));
        listing.is_approved = true;
        assert!(listing.is_purchasable());
        listing.available = false;
        assert!(!listing.is_purchasable());
    }

    #[test]
    fn category_round_trips_through_name() {
        for cat in [
            Category::Fiction,
            Category::NonFiction,
            Category::Education,
            Category::Comics,
            Category::Other,
        ] {
            assert_eq!(Category::parse(cat.as_str()), Some(cat));
        }
    }
}
