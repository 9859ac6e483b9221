//! Shared fixtures for slice integration tests

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use slicekit_resource::{
    ApiEnvironment, BasicFilters, CustomOperation, Endpoint, Method, Resource, ResourceAction,
    ResourceId, ResourceReducer, ResourceState, SliceConfig,
};
use slicekit_runtime::Store;
use slicekit_testing::MockApiClient;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u64,
    pub full_name: String,
    pub status: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub full_name: String,
}

impl Resource for Customer {
    type Input = CustomerInput;
    const NAME: &'static str = "Customer";
    const PLURAL: &'static str = "customers";

    fn id(&self) -> ResourceId {
        ResourceId::new(self.id)
    }

    fn validate(input: &CustomerInput) -> Result<(), String> {
        if input.full_name.trim().is_empty() {
            return Err("Full name is required".to_string());
        }
        Ok(())
    }
}

pub type Action = ResourceAction<Customer, BasicFilters>;
pub type State = ResourceState<Customer, BasicFilters>;
pub type Reducer = ResourceReducer<Customer, BasicFilters>;
pub type CustomerStore = Store<State, Action, ApiEnvironment, Reducer>;

pub fn customer(id: u64, full_name: &str) -> Customer {
    Customer {
        id,
        full_name: full_name.to_string(),
        status: "Active".to_string(),
    }
}

pub fn customers(ids: std::ops::RangeInclusive<u64>) -> Vec<Customer> {
    ids.map(|id| customer(id, &format!("Customer {id}"))).collect()
}

pub fn reducer(config: SliceConfig) -> Reducer {
    let endpoint = Endpoint::new("/customers")
        .with_custom(CustomOperation::new("suspend", Method::Put));
    ResourceReducer::with_config(endpoint, config)
}

pub fn store(client: &Arc<MockApiClient>, config: SliceConfig) -> CustomerStore {
    let reducer = reducer(config);
    let environment = ApiEnvironment::new(Arc::clone(client) as Arc<dyn slicekit_resource::ApiClient>);
    Store::new(reducer.initial_state(), reducer, environment)
}

/// Dispatch and wait until the action's network call has settled
pub async fn dispatch(store: &CustomerStore, action: Action) {
    match store.send(action).await {
        Ok(mut handle) => handle.wait().await,
        Err(error) => panic!("store rejected action: {error}"),
    }
}
