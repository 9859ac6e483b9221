//! Page requests, the draft/apply filter protocol and the outgoing query

#![allow(clippy::unwrap_used)]

mod common;

use common::{customers, reducer, Action, State};
use proptest::prelude::*;
use slicekit_resource::{
    list_query, ApiEnvironment, BasicFilterField, Method, SliceConfig, SortOrder,
};
use slicekit_testing::assertions::{assert_effects_count, assert_has_future_effect, assert_no_effects};
use slicekit_testing::properties::{optional_text, page_number, page_size};
use slicekit_testing::{fixtures, MockApiClient, MockReply, ReducerTest};
use std::sync::Arc;

fn environment(client: MockApiClient) -> ApiEnvironment {
    ApiEnvironment::new(Arc::new(client))
}

fn initial() -> State {
    reducer(SliceConfig::default()).initial_state()
}

proptest! {
    #[test]
    fn page_size_change_always_returns_to_first_page(start in page_number(), size in page_size()) {
        let mut state = initial();
        state.page_request.current_page = start;

        ReducerTest::new(reducer(SliceConfig::default()))
            .with_env(environment(MockApiClient::new()))
            .given_state(state)
            .when_action(Action::SetPageSize(size))
            .then_state(move |s| {
                assert_eq!(s.page_request.current_page, 1);
                assert_eq!(s.page_request.page_size, size);
            })
            .run();
    }

    #[test]
    fn blank_filters_never_reach_the_query(
        search in optional_text(),
        status in optional_text(),
        sort_by in optional_text(),
    ) {
        let expected = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        let (has_search, has_status, has_sort) = (expected(&search), expected(&status), expected(&sort_by));

        ReducerTest::new(reducer(SliceConfig::default()))
            .with_env(environment(MockApiClient::new()))
            .given_state(initial())
            .when_actions([
                Action::SetFilter(BasicFilterField::Search(search)),
                Action::SetFilter(BasicFilterField::Status(status)),
                Action::SetFilter(BasicFilterField::SortBy(sort_by)),
                Action::ApplyFilters,
            ])
            .then_state(move |s| {
                let query = list_query(s.page_request, &s.filters.applied);
                assert_eq!(query.contains_key("Search"), has_search);
                assert_eq!(query.contains_key("Status"), has_status);
                assert_eq!(query.contains_key("SortBy"), has_sort);
                assert!(query.iter().all(|(_, v)| !v.trim().is_empty() && v != "null"));
            })
            .run();
    }
}

#[test]
fn set_filter_edits_only_the_draft() {
    ReducerTest::new(reducer(SliceConfig::default()))
        .with_env(environment(MockApiClient::new()))
        .given_state(initial())
        .when_action(Action::SetFilter(BasicFilterField::Search(Some("smith".into()))))
        .then_state(|s| {
            assert_eq!(s.filters.draft.search.as_deref(), Some("smith"));
            assert_eq!(s.filters.applied.search, None);
            assert!(s.has_unapplied_changes());
        })
        .then_effects(assert_no_effects)
        .run();
}

#[test]
fn unchanged_page_does_not_refetch() {
    ReducerTest::new(reducer(SliceConfig::default()))
        .with_env(environment(MockApiClient::new()))
        .given_state(initial())
        .when_action(Action::SetPage(1))
        .then_effects(assert_no_effects)
        .run();
}

#[test]
fn apply_filters_returns_to_first_page_and_fetches() {
    let mut state = initial();
    state.page_request.current_page = 4;

    ReducerTest::new(reducer(SliceConfig::default()))
        .with_env(environment(MockApiClient::new()))
        .given_state(state)
        .when_actions([
            Action::SetFilter(BasicFilterField::SortOrder(Some(SortOrder::Desc))),
            Action::ApplyFilters,
        ])
        .then_state(|s| {
            assert_eq!(s.page_request.current_page, 1);
            assert_eq!(s.filters.applied.sort_order, Some(SortOrder::Desc));
            assert!(s.collection.loading);
        })
        .then_effects(|effects| {
            assert_effects_count(effects, 1);
            assert_has_future_effect(effects);
        })
        .run();
}

#[tokio::test]
async fn applied_filters_are_sent_with_the_page() {
    let client = Arc::new(MockApiClient::new().on(
        Method::Get,
        "/customers",
        MockReply::json(200, fixtures::page(customers(1..=2), fixtures::pagination(2, 1, 10))),
    ));

    ReducerTest::new(reducer(SliceConfig::default()))
        .with_env(ApiEnvironment::new(Arc::clone(&client) as Arc<dyn slicekit_resource::ApiClient>))
        .given_state(initial())
        .when_actions([
            Action::SetFilter(BasicFilterField::Status(Some("Active".into()))),
            Action::SetFilter(BasicFilterField::Search(Some(String::new()))),
            Action::ApplyFilters,
        ])
        .then_state(|s| {
            assert!(s.collection.success);
            assert_eq!(s.collection.items.len(), 2);
            assert!(s.has_active_filters());
        })
        .then_feedback(|actions| {
            assert_eq!(actions.len(), 1);
            assert!(actions[0].is_settlement());
        })
        .run_async()
        .await;

    let sent = &client.requests()[0].query;
    assert_eq!(sent.get("Status"), Some("Active"));
    assert!(!sent.contains_key("Search"));
    assert_eq!(sent.get("PageNumber"), Some("1"));
}

#[tokio::test]
async fn reset_filters_clears_both_copies_and_refetches() {
    let client = Arc::new(MockApiClient::new().on(
        Method::Get,
        "/customers",
        MockReply::json(200, fixtures::page(customers(1..=5), fixtures::pagination(5, 1, 10))),
    ));
    let mut state = initial();
    state.filters.edit(BasicFilterField::Status(Some("Inactive".into())));
    state.filters.apply();

    ReducerTest::new(reducer(SliceConfig::default()))
        .with_env(ApiEnvironment::new(Arc::clone(&client) as Arc<dyn slicekit_resource::ApiClient>))
        .given_state(state)
        .when_action(Action::ResetFilters)
        .then_state(|s| {
            assert!(!s.has_active_filters());
            assert!(!s.has_unapplied_changes());
            assert_eq!(s.collection.items.len(), 5);
        })
        .run_async()
        .await;

    assert!(!client.requests()[0].query.contains_key("Status"));
}
