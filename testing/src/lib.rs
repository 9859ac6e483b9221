//! # Slicekit Testing
//!
//! Testing utilities and helpers for slicekit resource slices.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness, with optional effect driving
//! - [`MockApiClient`]: scripted, recording stand-in for the HTTP adapter
//! - [`fixtures`]: backend envelopes as JSON
//! - [`properties`]: proptest strategies for paging and filter input
//!
//! ## Example
//!
//! ```ignore
//! use slicekit_testing::{fixtures, MockApiClient, MockReply};
//!
//! #[tokio::test]
//! async fn test_customer_list() {
//!     let client = Arc::new(MockApiClient::new().on(
//!         Method::Get,
//!         "/customers",
//!         MockReply::json(200, fixtures::page(customers(), fixtures::pagination(12, 1, 10))),
//!     ));
//!     let reducer = ResourceReducer::<Customer, BasicFilters>::new(Endpoint::new("/customers"));
//!     let store = Store::new(reducer.initial_state(), reducer, ApiEnvironment::new(client));
//!
//!     store.send(ResourceAction::FetchList).await?.wait().await;
//!
//!     assert_eq!(store.state(|s| s.pagination.total_count).await, 12);
//! }
//! ```

pub mod fixtures;
mod mock_api;

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;

    /// Page sizes a view might request, zero included
    pub fn page_size() -> impl Strategy<Value = u32> {
        prop_oneof![Just(0_u32), 1_u32..=200, Just(u32::MAX)]
    }

    /// Page numbers, mostly small
    pub fn page_number() -> impl Strategy<Value = u32> {
        prop_oneof![4 => 1_u32..=20, 1 => any::<u32>()]
    }

    /// Optional filter text, including the blank values that must be omitted
    pub fn optional_text() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            "[ \t]{1,3}".prop_map(Some),
            "[A-Za-z0-9]{1,12}".prop_map(Some),
        ]
    }

    /// Optional amounts, zero included
    pub fn optional_amount() -> impl Strategy<Value = Option<u64>> {
        prop_oneof![Just(None), Just(Some(0_u64)), (1_u64..1_000_000).prop_map(Some)]
    }
}

/// Install a test tracing subscriber honoring `RUST_LOG`
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub use mock_api::{MockApiClient, MockReply};
pub use reducer_test::{assertions, ReducerTest};
