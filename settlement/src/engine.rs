//! Main settlement engine
//!
//! Orchestrates transaction creation and status transitions against the
//! listing lifecycle, the transaction ledger, and the notifier.
//!
//! # Ordering
//!
//! `create_transaction` reserves the listing *before* inserting the
//! transaction record. The reservation is the store's atomic conditional
//! update, so two concurrent buyers cannot both get past it; the loser
//! fails with a conflict and no record is written for them. If the record
//! insert itself fails, the reservation is released again (compensating
//! action) before the error propagates.

use crate::{
    config::Config,
    notify::{Notification, NotifierHandle},
    store::{LedgerStore, ReaderDirectory},
    types::{BookSummary, Transaction, TransactionView, TxId, TxStatus},
    Error, Result,
};
use catalog_core::{BookId, Lifecycle, Listing, ReaderId};
use std::sync::Arc;

/// Settlement engine
pub struct SettlementEngine {
    /// Listing lifecycle (availability and approval rules)
    lifecycle: Lifecycle,

    /// Transaction store
    ledger: Arc<dyn LedgerStore>,

    /// Reader profile lookup
    directory: Arc<dyn ReaderDirectory>,

    /// Seller notification mailbox
    notifier: NotifierHandle,

    /// Notifier task, joined on shutdown
    notifier_task: tokio::task::JoinHandle<()>,

    /// Configuration
    config: Config,
}

impl std::fmt::Debug for SettlementEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettlementEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SettlementEngine {
    /// Create a new settlement engine, spawning its notifier task
    pub fn new(
        config: Config,
        lifecycle: Lifecycle,
        ledger: Arc<dyn LedgerStore>,
        directory: Arc<dyn ReaderDirectory>,
        sink: Arc<dyn crate::notify::NotifySink>,
    ) -> Self {
        let (notifier, task) = crate::notify::spawn_notifier(sink, config.notify.queue_capacity);
        Self {
            lifecycle,
            ledger,
            directory,
            notifier,
            notifier_task: task,
            config,
        }
    }

    /// Drain and stop the notifier task
    ///
    /// Pending notifications are delivered before this returns. Intended
    /// for clean shutdown and for tests that assert on deliveries.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.notifier);
        self.notifier_task
            .await
            .map_err(|e| Error::Other(format!("Notifier task panicked: {}", e)))
    }

    /// Create a purchase transaction for a listing
    ///
    /// Fails with `NotFound` if the listing is missing, `Conflict` if it is
    /// not open for purchase (unavailable, unapproved, or lost to a
    /// concurrent buyer), `Forbidden` if the buyer owns it. On success the
    /// listing is reserved, a `Pending` transaction references it, and the
    /// seller has been notified (best-effort).
    pub async fn create_transaction(
        &self,
        book: BookId,
        buyer: ReaderId,
    ) -> Result<TransactionView> {
        // Reserve first: the conditional update admits exactly one buyer.
        let listing = self.lifecycle.reserve(book, buyer)?;

        let tx = Transaction::pending(book, buyer, listing.owner, listing.price);
        let tx = match self.ledger.insert(tx) {
            Ok(tx) => tx,
            Err(err) => {
                // Compensate: give the listing back before propagating.
                if let Err(release_err) = self.lifecycle.release(book) {
                    tracing::error!(
                        listing = %book,
                        "Failed to release listing after insert error: {}",
                        release_err
                    );
                }
                return Err(err);
            }
        };

        tracing::info!(
            transaction = %tx.id,
            listing = %book,
            buyer = %buyer,
            seller = %tx.seller,
            price = %tx.price,
            "Transaction created"
        );

        self.notify_seller(&tx, &listing);

        Ok(self.resolve(tx))
    }

    /// Advance a transaction's status (seller only)
    ///
    /// `Pending → Completed` releases the listing back to the catalog;
    /// `Pending → Cancelled` has no listing side effect. Both are terminal:
    /// a second update fails with `Conflict`.
    pub async fn update_status(
        &self,
        id: TxId,
        requester: ReaderId,
        new_status: TxStatus,
    ) -> Result<Transaction> {
        let tx = self.ledger.get(id)?;

        if tx.seller != requester {
            return Err(Error::Forbidden(
                "Only the seller may update a transaction".to_string(),
            ));
        }
        if tx.status.is_terminal() {
            return Err(Error::Conflict(format!(
                "Transaction {} is already {}",
                id, tx.status
            )));
        }
        if new_status == TxStatus::Pending {
            return Err(Error::Validation(
                "A transaction cannot be moved back to Pending".to_string(),
            ));
        }

        let tx = self.ledger.set_status(id, new_status)?;
        tracing::info!(transaction = %id, status = %new_status, "Transaction status updated");

        // Completing a sale re-lists the book.
        if new_status == TxStatus::Completed {
            self.lifecycle.release(tx.book)?;
        }

        Ok(tx)
    }

    /// All transactions the reader is a party to, newest first
    pub async fn get_for_user(&self, reader: ReaderId) -> Vec<TransactionView> {
        self.ledger
            .find_for_user(reader)
            .into_iter()
            .map(|tx| self.resolve(tx))
            .collect()
    }

    /// Fetch a single transaction, visible only to its parties
    pub async fn get_by_id(&self, id: TxId, requester: ReaderId) -> Result<TransactionView> {
        let tx = self.ledger.get(id)?;
        if !tx.involves(requester) {
            return Err(Error::Forbidden(
                "Not a party to this transaction".to_string(),
            ));
        }
        Ok(self.resolve(tx))
    }

    fn notify_seller(&self, tx: &Transaction, listing: &Listing) {
        let seller = match self.directory.profile(tx.seller) {
            Some(profile) => profile,
            None => {
                tracing::warn!(
                    seller = %tx.seller,
                    "No profile for seller, skipping notification"
                );
                return;
            }
        };
        let buyer_name = self
            .directory
            .profile(tx.buyer)
            .map(|p| p.name)
            .unwrap_or_else(|| "A reader".to_string());

        self.notifier.notify(Notification {
            recipient: seller.email,
            template: self.config.notify.purchase_template.clone(),
            payload: serde_json::json!({
                "sellerName": seller.name,
                "buyerName": buyer_name,
                "bookTitle": listing.title,
                "transactionType": "Purchase",
                "price": tx.price,
            }),
        });
    }

    fn resolve(&self, tx: Transaction) -> TransactionView {
        let book = self.lifecycle.get(tx.book).ok().map(|listing| BookSummary {
            id: listing.id,
            title: listing.title,
            author: listing.author,
            price: listing.price,
        });
        TransactionView {
            buyer: self.directory.profile(tx.buyer),
            seller: self.directory.profile(tx.seller),
            book,
            transaction: tx,
        }
    }
}
