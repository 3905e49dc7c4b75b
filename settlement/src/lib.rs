//! Settlement Protocol
//!
//! Creates and advances purchase transactions for the book marketplace,
//! keeping listing availability consistent with transaction status.
//!
//! # State machine
//!
//! Each transaction starts `Pending` and moves exactly once:
//!
//! 1. **Pending → Completed**: seller confirms; the listing is released
//!    back to the catalog
//! 2. **Pending → Cancelled**: seller cancels; no listing side effect
//!
//! Both outcomes are terminal; a second status update fails with a
//! conflict. Only the seller may advance a transaction.
//!
//! # Example
//!
//! ```no_run
//! use catalog_core::{Lifecycle, MemoryCatalog};
//! use settlement::{Config, MemoryDirectory, MemoryLedger, SettlementEngine};
//! use settlement::notify::NoopSink;
//! use std::sync::Arc;
//!
//! # fn ids() -> (catalog_core::BookId, catalog_core::ReaderId) { todo!() }
//! #[tokio::main]
//! async fn main() -> settlement::Result<()> {
//!     let lifecycle = Lifecycle::new(Arc::new(MemoryCatalog::new()));
//!     let engine = SettlementEngine::new(
//!         Config::default(),
//!         lifecycle,
//!         Arc::new(MemoryLedger::new()),
//!         Arc::new(MemoryDirectory::new()),
//!         Arc::new(NoopSink),
//!     );
//!
//!     let (book, buyer) = ids();
//!     let view = engine.create_transaction(book, buyer).await?;
//!     println!("Created {} at {}", view.transaction.id, view.transaction.price);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod store;
pub mod notify;
pub mod error;
pub mod config;
pub mod engine;

// Re-exports
pub use error::{Error, Result};
pub use types::{BookSummary, Transaction, TransactionView, TxId, TxStatus};
pub use store::{LedgerStore, MemoryDirectory, MemoryLedger, ReaderDirectory, ReaderProfile};
pub use notify::{Notification, NotifierHandle, NotifySink};
pub use config::Config;
pub use engine::SettlementEngine;
