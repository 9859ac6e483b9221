//! The application context routing actions to the right slice

#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use serde_json::json;
use slicekit_resource::{
    list_query, ApiEnvironment, Method, OperationKind, PageRequest, ResourceAction, ResourceId, SliceConfig,
};
use slicekit_testing::properties::optional_amount;
use slicekit_testing::{fixtures, MockApiClient, MockReply};
use std::sync::Arc;
use std::time::Duration;
use utility_admin::resources::{
    payment, Customer, CustomerFilters, CustomerInput, PaymentFilterField, RoleInput,
};
use utility_admin::{admin_store, AdminAction, AdminStore};

fn customer(id: u64) -> Customer {
    Customer {
        id,
        full_name: format!("Customer {id}"),
        email: None,
        phone: None,
        account_number: format!("ACC-{id:04}"),
        account_type: "Prepaid".to_string(),
        status: "Active".to_string(),
        agent_id: Some(3),
        created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
    }
}

fn payment_json(id: u64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "customerId": 1,
        "amount": 120.5,
        "reference": format!("TX-{id}"),
        "status": status,
        "paidAt": "2024-02-01T12:00:00Z",
    })
}

fn store(client: &Arc<MockApiClient>, config: SliceConfig) -> AdminStore {
    admin_store(config, ApiEnvironment::new(Arc::clone(client) as Arc<dyn slicekit_resource::ApiClient>))
}

async fn dispatch(store: &AdminStore, action: AdminAction) {
    let mut handle = store.send(action).await.unwrap();
    handle.wait_with_timeout(Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn customer_fetch_only_touches_the_customer_slice() {
    slicekit_testing::init_tracing();
    let client = Arc::new(MockApiClient::new().on(
        Method::Get,
        "/customers",
        MockReply::json(200, fixtures::page(vec![customer(1), customer(2)], fixtures::pagination(2, 1, 25))),
    ));
    let store = store(&client, SliceConfig::default().with_page_size(25));
    let mut settlements = store.subscribe_actions();

    dispatch(&store, AdminAction::Customers(ResourceAction::FetchList)).await;

    let request = &client.requests()[0];
    assert_eq!(request.path, "/customers");
    assert_eq!(request.query.get("PageSize"), Some("25"));

    let settled = settlements.try_recv().unwrap();
    assert!(matches!(settled, AdminAction::Customers(ResourceAction::ListSettled { result: Ok(_), .. })));
    assert_eq!(settled.resource(), "customers");
    assert!(settled.is_settlement());

    store
        .state(|s| {
            assert_eq!(s.customers.collection.items.len(), 2);
            assert_eq!(s.customers.collection.items[0].created_at.to_rfc3339(), "2024-01-15T09:30:00+00:00");
            assert!(s.meters.is_empty());
            assert!(!s.meters.collection.loading);
            assert!(s.payments.is_empty());
            assert!(s.agents.is_empty());
            assert!(s.roles.is_empty());
        })
        .await;
}

#[tokio::test]
async fn approving_a_payment_merges_the_returned_entity() {
    let client = Arc::new(
        MockApiClient::new()
            .on(
                Method::Get,
                "/payments",
                MockReply::json(
                    200,
                    fixtures::page(vec![payment_json(5, "Pending"), payment_json(6, "Pending")], fixtures::pagination(2, 1, 10)),
                ),
            )
            .on(
                Method::Put,
                "/payments/5/approve",
                MockReply::json(200, fixtures::success(payment_json(5, "Approved"))),
            ),
    );
    let store = store(&client, SliceConfig::default());
    dispatch(&store, AdminAction::Payments(ResourceAction::FetchList)).await;

    dispatch(
        &store,
        AdminAction::Payments(ResourceAction::Custom {
            operation: payment::APPROVE.to_string(),
            id: ResourceId::new(5),
            body: None,
        }),
    )
    .await;

    store
        .state(|s| {
            assert_eq!(s.payments.collection.items[0].status, "Approved");
            assert_eq!(s.payments.collection.items[1].status, "Pending");
            let approve = s.payments.operation(&OperationKind::Custom(payment::APPROVE.into())).unwrap();
            assert!(approve.success);
        })
        .await;
}

#[tokio::test]
async fn created_customer_becomes_the_selection() {
    let client = Arc::new(MockApiClient::new().on(
        Method::Post,
        "/customers",
        MockReply::json(201, fixtures::success(customer(7))),
    ));
    let store = store(&client, SliceConfig::default());

    dispatch(
        &store,
        AdminAction::Customers(ResourceAction::Create {
            input: CustomerInput {
                full_name: "Customer 7".to_string(),
                email: Some("c7@example.com".to_string()),
                phone: None,
                account_type: "Prepaid".to_string(),
                agent_id: Some(3),
            },
        }),
    )
    .await;

    store
        .state(|s| {
            assert_eq!(s.customers.current.item.as_ref().map(|c| c.id), Some(7));
            assert_eq!(s.customers.collection.items.len(), 1);
            assert!(s.customers.operation(&OperationKind::Create).unwrap().success);
        })
        .await;
}

fn customer_input() -> CustomerInput {
    CustomerInput {
        full_name: "Customer 7".to_string(),
        email: None,
        phone: None,
        account_type: "Prepaid".to_string(),
        agent_id: Some(3),
    }
}

#[tokio::test]
async fn create_settling_after_reset_does_not_reselect() {
    let client = Arc::new(MockApiClient::new().on(
        Method::Post,
        "/customers",
        MockReply::json(201, fixtures::success(customer(7))).delayed(Duration::from_millis(50)),
    ));
    let store = store(&client, SliceConfig::default());

    let mut create = store
        .send(AdminAction::Customers(ResourceAction::Create { input: customer_input() }))
        .await
        .unwrap();
    dispatch(&store, AdminAction::Customers(ResourceAction::Reset)).await;
    create.wait().await;

    store
        .state(|s| {
            assert!(s.customers.current.item.is_none());
            assert!(s.customers.collection.items.is_empty());
        })
        .await;
}

#[tokio::test]
async fn slow_by_id_fetch_does_not_replace_a_created_selection() {
    let client = Arc::new(
        MockApiClient::new()
            .on(
                Method::Get,
                "/customers/2",
                MockReply::json(200, fixtures::success(customer(2))).delayed(Duration::from_millis(50)),
            )
            .on(Method::Post, "/customers", MockReply::json(201, fixtures::success(customer(7)))),
    );
    let store = store(&client, SliceConfig::default());

    let mut fetch = store
        .send(AdminAction::Customers(ResourceAction::FetchById { id: ResourceId::new(2) }))
        .await
        .unwrap();
    dispatch(&store, AdminAction::Customers(ResourceAction::Create { input: customer_input() })).await;
    fetch.wait().await;

    store
        .state(|s| {
            assert_eq!(s.customers.current.item.as_ref().map(|c| c.id), Some(7));
            assert!(!s.customers.current.loading);
            assert!(s.customers.current.error.is_none());
        })
        .await;
}

#[tokio::test]
async fn waiting_for_a_settlement_returns_it() {
    let client = Arc::new(MockApiClient::new().on(
        Method::Get,
        "/customers",
        MockReply::json(200, fixtures::page(vec![customer(1)], fixtures::pagination(1, 1, 25))),
    ));
    let store = store(&client, SliceConfig::default());

    let settled = store
        .send_and_wait_for(
            AdminAction::Customers(ResourceAction::FetchList),
            AdminAction::is_settlement,
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    match settled {
        AdminAction::Customers(ResourceAction::ListSettled { result: Ok(page), .. }) => {
            assert_eq!(page.items, vec![customer(1)]);
        },
        other => panic!("unexpected settlement for {}", other.resource()),
    }
}

#[tokio::test]
async fn unregistered_operation_fails_without_a_request() {
    let client = Arc::new(MockApiClient::new());
    let store = store(&client, SliceConfig::default());

    dispatch(
        &store,
        AdminAction::Agents(ResourceAction::Custom {
            operation: "approve".to_string(),
            id: ResourceId::new(2),
            body: None,
        }),
    )
    .await;

    assert_eq!(client.request_count(), 0);
    store
        .state(|s| {
            let op = s.agents.operation(&OperationKind::Custom("approve".into())).unwrap();
            assert!(op.error.is_some());
            assert!(!op.loading);
        })
        .await;
}

#[tokio::test]
async fn agent_pause_goes_to_its_own_route() {
    let client = Arc::new(MockApiClient::new().on(
        Method::Put,
        "/agents/4/pause",
        MockReply::json(200, fixtures::success(json!({"id": 4, "name": "Ama", "region": "North", "status": "Paused"}))),
    ));
    let store = store(&client, SliceConfig::default());

    dispatch(
        &store,
        AdminAction::Agents(ResourceAction::Custom {
            operation: "pause".to_string(),
            id: ResourceId::new(4),
            body: Some(json!({"reason": "leave"})),
        }),
    )
    .await;

    let sent = client.requests_to(Method::Put, "/agents/4/pause");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body, Some(json!({"reason": "leave"})));
    store
        .state(|s| {
            let pause = s.agents.operation(&OperationKind::Custom("pause".into())).unwrap();
            assert_eq!(pause.result.as_ref().map(|a| a.status.as_str()), Some("Paused"));
        })
        .await;
}

#[tokio::test]
async fn payment_filters_send_zero_amounts() {
    let client = Arc::new(MockApiClient::new().on(
        Method::Get,
        "/payments",
        MockReply::json(200, fixtures::page(Vec::<serde_json::Value>::new(), fixtures::pagination(0, 1, 10))),
    ));
    let store = store(&client, SliceConfig::default());

    dispatch(&store, AdminAction::Payments(ResourceAction::SetFilter(PaymentFilterField::MinAmount(Some(0.0))))).await;
    dispatch(&store, AdminAction::Payments(ResourceAction::SetFilter(PaymentFilterField::CustomerId(None)))).await;
    assert_eq!(client.request_count(), 0);

    dispatch(&store, AdminAction::Payments(ResourceAction::ApplyFilters)).await;

    let query = &client.requests()[0].query;
    assert_eq!(query.get("MinAmount"), Some("0"));
    assert!(!query.contains_key("CustomerId"));
    assert!(store.state(|s| s.payments.collection.success && s.payments.is_empty()).await);
}

#[tokio::test]
async fn invalid_role_never_reaches_the_backend() {
    let client = Arc::new(MockApiClient::new());
    let store = store(&client, SliceConfig::default());

    dispatch(
        &store,
        AdminAction::Roles(ResourceAction::Create {
            input: RoleInput {
                name: "Auditor".to_string(),
                description: None,
                permissions: Vec::new(),
            },
        }),
    )
    .await;

    assert_eq!(client.request_count(), 0);
    let error = store
        .state(|s| s.roles.operation(&OperationKind::Create).and_then(|op| op.error.clone()))
        .await;
    assert_eq!(error.as_deref(), Some("At least one permission is required"));
}

proptest! {
    #[test]
    fn agent_filter_is_sent_whenever_set(agent_id in optional_amount()) {
        let filters = CustomerFilters { agent_id, ..CustomerFilters::default() };
        let query = list_query(PageRequest::default(), &filters);

        let expected = agent_id.map(|id| id.to_string());
        prop_assert_eq!(query.get("AgentId"), expected.as_deref());
    }
}
