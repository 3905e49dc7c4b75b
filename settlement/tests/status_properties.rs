//! Property-based tests for the transaction state machine
//!
//! For any sequence of status updates from any mix of requesters:
//! - at most one update ever succeeds (both outcomes are terminal)
//! - only the seller can be the one who succeeds
//! - the listing ends up available again iff a `Completed` landed

use catalog_core::{
    Category, Condition, GeoPoint, Lifecycle, ListingDraft, MemoryCatalog, ReaderId,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use settlement::notify::NoopSink;
use settlement::{Config, MemoryDirectory, MemoryLedger, SettlementEngine, TxStatus};
use std::sync::Arc;

/// Who issues an update
#[derive(Debug, Clone, Copy)]
enum Requester {
    Seller,
    Buyer,
    Stranger,
}

fn requester_strategy() -> impl Strategy<Value = Requester> {
    prop_oneof![
        Just(Requester::Seller),
        Just(Requester::Buyer),
        Just(Requester::Stranger),
    ]
}

fn status_strategy() -> impl Strategy<Value = TxStatus> {
    prop_oneof![
        Just(TxStatus::Pending),
        Just(TxStatus::Completed),
        Just(TxStatus::Cancelled),
    ]
}

fn update_sequence() -> impl Strategy<Value = Vec<(Requester, TxStatus)>> {
    prop::collection::vec((requester_strategy(), status_strategy()), 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn at_most_one_update_lands(updates in update_sequence()) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let lifecycle = Lifecycle::new(Arc::new(MemoryCatalog::new()));
            let directory = Arc::new(MemoryDirectory::new());
            let seller = directory.register("Seller", "seller@example.com");
            let buyer = directory.register("Buyer", "buyer@example.com");
            let stranger = directory.register("Stranger", "stranger@example.com");

            let engine = SettlementEngine::new(
                Config::default(),
                lifecycle.clone(),
                Arc::new(MemoryLedger::new()),
                directory,
                Arc::new(NoopSink),
            );

            let listing = lifecycle
                .submit(ListingDraft {
                    title: "Stories of Your Life".to_string(),
                    author: "Ted Chiang".to_string(),
                    category: Category::Fiction,
                    condition: Condition::New,
                    price: Decimal::new(1300, 2),
                    location: GeoPoint { lon: 0.0, lat: 0.0 },
                    owner: seller,
                    description: None,
                    image: None,
                })
                .unwrap();
            lifecycle.approve(listing.id, ReaderId::new()).unwrap();

            let view = engine.create_transaction(listing.id, buyer).await.unwrap();
            let id = view.transaction.id;

            let mut landed: Option<TxStatus> = None;
            for (requester, status) in updates {
                let who = match requester {
                    Requester::Seller => seller,
                    Requester::Buyer => buyer,
                    Requester::Stranger => stranger,
                };
                let outcome = engine.update_status(id, who, status).await;
                match outcome {
                    Ok(tx) => {
                        prop_assert!(landed.is_none());
                        prop_assert!(matches!(requester, Requester::Seller));
                        prop_assert!(status.is_terminal());
                        prop_assert_eq!(tx.status, status);
                        landed = Some(status);
                    }
                    Err(_) => {}
                }
            }

            let available = lifecycle.get(listing.id).unwrap().available;
            prop_assert_eq!(available, landed == Some(TxStatus::Completed));
            Ok(())
        })?;
    }
}
