//! Transaction persistence and reader lookup
//!
//! [`LedgerStore`] is the narrow document-store slice the protocol needs:
//! insert, find-by-id, a targeted status update, and a party query sorted
//! newest first. [`ReaderDirectory`] resolves reader ids to display
//! profiles for transaction views and notification payloads.

use crate::{
    error::{Error, Result},
    types::{Transaction, TxId, TxStatus},
};
use catalog_core::ReaderId;
use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Persistence contract for transactions
pub trait LedgerStore: Send + Sync {
    /// Insert a new transaction record
    fn insert(&self, tx: Transaction) -> Result<Transaction>;

    /// Fetch a transaction by id. Fails with `NotFound` if absent.
    fn get(&self, id: TxId) -> Result<Transaction>;

    /// Persist a status change, bumping `updated_at`
    fn set_status(&self, id: TxId, status: TxStatus) -> Result<Transaction>;

    /// All transactions where the reader is buyer or seller, newest first
    fn find_for_user(&self, reader: ReaderId) -> Vec<Transaction>;
}

/// Display profile for a reader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderProfile {
    /// Reader id
    pub id: ReaderId,
    /// Display name
    pub name: String,
    /// Contact email (notification recipient)
    pub email: String,
}

/// Reader id → profile lookup
pub trait ReaderDirectory: Send + Sync {
    /// Resolve a reader's display profile, if known
    fn profile(&self, reader: ReaderId) -> Option<ReaderProfile>;
}

/// In-memory transaction store
#[derive(Debug, Default)]
pub struct MemoryLedger {
    txs: DashMap<TxId, Transaction>,
}

impl MemoryLedger {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transactions held
    pub fn len(&self) -> usize {
        self.txs.len()
    }

    /// True when no transactions are held
    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }
}

impl LedgerStore for MemoryLedger {
    fn insert(&self, tx: Transaction) -> Result<Transaction> {
        self.txs.insert(tx.id, tx.clone());
        Ok(tx)
    }

    fn get(&self, id: TxId) -> Result<Transaction> {
        self.txs
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::NotFound(format!("Transaction {} not found", id)))
    }

    fn set_status(&self, id: TxId, status: TxStatus) -> Result<Transaction> {
        let mut entry = self
            .txs
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("Transaction {} not found", id)))?;
        entry.status = status;
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }

    fn find_for_user(&self, reader: ReaderId) -> Vec<Transaction> {
        let mut txs: Vec<Transaction> = self
            .txs
            .iter()
            .filter(|entry| entry.involves(reader))
            .map(|entry| entry.value().clone())
            .collect();
        // UUIDv7 ids break ties between equal timestamps
        txs.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.as_uuid().cmp(&a.id.as_uuid()))
        });
        txs
    }
}

/// In-memory reader directory
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    readers: DashMap<ReaderId, ReaderProfile>,
}

impl MemoryDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reader, returning their id
    pub fn register(&self, name: impl Into<String>, email: impl Into<String>) -> ReaderId {
        let id = ReaderId::new();
        self.readers.insert(
            id,
            ReaderProfile {
                id,
                name: name.into(),
                email: email.into(),
            },
        );
        id
    }
}

impl ReaderDirectory for MemoryDirectory {
    fn profile(&self, reader: ReaderId) -> Option<ReaderProfile> {
        self.readers.get(&reader).map(|entry| entry.value().clone())
    }
}
