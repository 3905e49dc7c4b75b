//! Property-based tests for lifecycle invariants
//!
//! These tests use proptest to verify critical invariants:
//! - A reservation never succeeds against an unavailable listing
//! - Availability always matches the last effective reserve/release
//! - Unapproved or rejected listings are never purchasable
//! - Moderation keeps `is_approved` derived from the approval state

use catalog_core::{
    store::{CatalogStore, MemoryCatalog},
    types::{Category, Condition, GeoPoint, ListingDraft},
    Lifecycle, ReaderId,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Strategy for non-negative prices (cents)
fn price_strategy() -> impl Strategy<Value = Decimal> {
    (0u64..1_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// Strategy for non-empty titles
fn title_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,40}".prop_map(|s| s.trim().to_string()).prop_filter(
        "title must be non-empty",
        |s| !s.is_empty(),
    )
}

/// Strategy for categories
fn category_strategy() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Fiction),
        Just(Category::NonFiction),
        Just(Category::Education),
        Just(Category::Comics),
        Just(Category::Other),
    ]
}

/// Strategy for conditions
fn condition_strategy() -> impl Strategy<Value = Condition> {
    prop_oneof![
        Just(Condition::New),
        Just(Condition::Good),
        Just(Condition::Used),
    ]
}

fn draft_strategy(owner: ReaderId) -> impl Strategy<Value = ListingDraft> {
    (
        title_strategy(),
        price_strategy(),
        category_strategy(),
        condition_strategy(),
    )
        .prop_map(move |(title, price, category, condition)| ListingDraft {
            title,
            author: "Anonymous".to_string(),
            category,
            condition,
            price,
            location: GeoPoint { lon: 0.0, lat: 0.0 },
            owner,
            description: None,
            image: None,
        })
}

/// One step against a reserved/released listing
#[derive(Debug, Clone, Copy)]
enum Step {
    Reserve,
    Release,
}

fn step_strategy() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(
        prop_oneof![Just(Step::Reserve), Just(Step::Release)],
        0..32,
    )
}

proptest! {
    /// A freshly submitted listing is never purchasable, whatever the draft
    #[test]
    fn submitted_listing_awaits_approval(draft in draft_strategy(ReaderId::new())) {
        let lifecycle = Lifecycle::new(Arc::new(MemoryCatalog::new()));
        let listing = lifecycle.submit(draft).unwrap();
        prop_assert!(!listing.is_purchasable());
        prop_assert!(listing.available);
    }

    /// Availability tracks the reserve/release history exactly: a reserve
    /// succeeds iff the listing was available, a release always leaves it
    /// available, and the stored flag matches the model after every step.
    #[test]
    fn availability_matches_model(steps in step_strategy()) {
        let store = Arc::new(MemoryCatalog::new());
        let lifecycle = Lifecycle::new(store.clone());
        let owner = ReaderId::new();
        let buyer = ReaderId::new();

        let listing = lifecycle
            .submit(ListingDraft {
                title: "Model checked".to_string(),
                author: "Anonymous".to_string(),
                category: Category::Other,
                condition: Condition::Used,
                price: Decimal::new(100, 2),
                location: GeoPoint { lon: 0.0, lat: 0.0 },
                owner,
                description: None,
                image: None,
            })
            .unwrap();
        lifecycle.approve(listing.id, ReaderId::new()).unwrap();

        let mut model_available = true;
        for step in steps {
            match step {
                Step::Reserve => {
                    let outcome = lifecycle.reserve(listing.id, buyer);
                    if model_available {
                        prop_assert!(outcome.is_ok());
                        model_available = false;
                    } else {
                        prop_assert!(outcome.unwrap_err().is_conflict());
                    }
                }
                Step::Release => {
                    prop_assert!(lifecycle.release(listing.id).is_ok());
                    model_available = true;
                }
            }
            prop_assert_eq!(store.get(listing.id).unwrap().available, model_available);
        }
    }

    /// Moderation keeps the boolean gate consistent with the decision
    #[test]
    fn moderation_flags_stay_consistent(draft in draft_strategy(ReaderId::new()), approve in any::<bool>()) {
        let lifecycle = Lifecycle::new(Arc::new(MemoryCatalog::new()));
        let listing = lifecycle.submit(draft).unwrap();
        let moderator = ReaderId::new();

        let decided = if approve {
            lifecycle.approve(listing.id, moderator).unwrap()
        } else {
            lifecycle.reject(listing.id, moderator, "not suitable").unwrap()
        };

        prop_assert_eq!(decided.is_approved, approve);
        prop_assert_eq!(decided.is_purchasable(), approve);
    }
}
