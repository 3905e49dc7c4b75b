//! Core types for the settlement protocol

use catalog_core::{BookId, ReaderId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::store::ReaderProfile;

/// Transaction identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(Uuid);

impl TxId {
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

impl Default for TxId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transaction status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxStatus {
    /// Created, awaiting the seller's decision
    Pending,
    /// Seller confirmed the sale (terminal; releases the listing)
    Completed,
    /// Seller cancelled the sale (terminal)
    Cancelled,
}

impl TxStatus {
    /// No further transition is allowed out of this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, TxStatus::Completed | TxStatus::Cancelled)
    }

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Pending => "Pending",
            TxStatus::Completed => "Completed",
            TxStatus::Cancelled => "Cancelled",
        }
    }

    /// Parse from canonical name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(TxStatus::Pending),
            "Completed" => Some(TxStatus::Completed),
            "Cancelled" => Some(TxStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A purchase transaction
///
/// Immutable after creation except for `status` and `updated_at`. The price
/// is a snapshot of the listing price at creation time, never re-read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique id
    pub id: TxId,

    /// Listing being bought
    pub book: BookId,

    /// Buyer
    pub buyer: ReaderId,

    /// Seller (the listing's owner at creation time)
    pub seller: ReaderId,

    /// Agreed price (snapshot)
    pub price: Decimal,

    /// Current status
    pub status: TxStatus,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Last updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a pending transaction for a book at a snapshot price
    pub fn pending(book: BookId, buyer: ReaderId, seller: ReaderId, price: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: TxId::new(),
            book,
            buyer,
            seller,
            price,
            status: TxStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when the reader is the buyer or the seller
    pub fn involves(&self, reader: ReaderId) -> bool {
        self.buyer == reader || self.seller == reader
    }
}

/// Summary of the listing a transaction refers to, for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSummary {
    /// Listing id
    pub id: BookId,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Current listing price (may differ from the transaction snapshot)
    pub price: Decimal,
}

/// A transaction with its references resolved for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionView {
    /// The transaction record
    pub transaction: Transaction,

    /// Buyer profile, when the directory knows them
    pub buyer: Option<ReaderProfile>,

    /// Seller profile, when the directory knows them
    pub seller: Option<ReaderProfile>,

    /// Listing summary, when the listing still exists
    pub book: Option<BookSummary>,
}
