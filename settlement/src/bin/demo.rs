//! End-to-end settlement walkthrough against the in-memory stores
//!
//! Submits a listing, approves it, buys it as another reader, and lets the
//! seller complete the sale.

use catalog_core::{Category, Condition, GeoPoint, Lifecycle, ListingDraft, MemoryCatalog};
use rust_decimal::Decimal;
use settlement::notify::NoopSink;
use settlement::{Config, MemoryDirectory, MemoryLedger, SettlementEngine, TxStatus};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let directory = Arc::new(MemoryDirectory::new());
    let seller = directory.register("Nadia", "nadia@example.com");
    let buyer = directory.register("Tomas", "tomas@example.com");
    let moderator = directory.register("Admin", "admin@example.com");

    let lifecycle = Lifecycle::new(Arc::new(MemoryCatalog::new()));
    let engine = SettlementEngine::new(
        Config::default(),
        lifecycle.clone(),
        Arc::new(MemoryLedger::new()),
        directory,
        Arc::new(NoopSink),
    );

    let listing = lifecycle.submit(ListingDraft {
        title: "The Left Hand of Darkness".to_string(),
        author: "Ursula K. Le Guin".to_string(),
        category: Category::Fiction,
        condition: Condition::Good,
        price: Decimal::new(2000, 2),
        location: GeoPoint { lon: -0.12, lat: 51.5 },
        owner: seller,
        description: Some("First paperback edition".to_string()),
        image: None,
    })?;
    lifecycle.approve(listing.id, moderator)?;
    tracing::info!("Listing {} approved at {}", listing.id, listing.price);

    let view = engine.create_transaction(listing.id, buyer).await?;
    tracing::info!(
        "Purchase pending: transaction {} for \"{}\"",
        view.transaction.id,
        view.book.as_ref().map(|b| b.title.as_str()).unwrap_or("?")
    );

    let completed = engine
        .update_status(view.transaction.id, seller, TxStatus::Completed)
        .await?;
    tracing::info!("Sale {} settled as {}", completed.id, completed.status);

    let relisted = lifecycle.get(listing.id)?;
    tracing::info!("Listing available again: {}", relisted.available);

    engine.shutdown().await?;
    Ok(())
}
