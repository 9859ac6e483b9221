//! Customer accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slicekit_core::effect::Effect;
use slicekit_core::reducer::Reducer;
use slicekit_core::SmallVec;
use slicekit_resource::{
    ApiEnvironment, BasicFilterField, BasicFilters, Endpoint, Filters, OperationKind, QueryParams, Resource,
    ResourceAction, ResourceId, ResourceState,
};

/// A utility customer account
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Backend id
    pub id: u64,
    /// Account holder's name
    pub full_name: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Printed on bills
    pub account_number: String,
    /// `Prepaid` or `Postpaid`
    pub account_type: String,
    /// Account status as the backend spells it
    pub status: String,
    /// Field agent responsible for the account
    pub agent_id: Option<u64>,
    /// When the account was opened
    pub created_at: DateTime<Utc>,
}

/// Body for creating or updating a customer
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    /// Account holder's name
    pub full_name: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// `Prepaid` or `Postpaid`
    pub account_type: String,
    /// Field agent responsible for the account
    pub agent_id: Option<u64>,
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
        if input.email.as_deref().is_some_and(|e| !e.contains('@')) {
            return Err("Email address is invalid".to_string());
        }
        Ok(())
    }
}

/// Customer list predicates
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFilters {
    /// Search, status and sorting
    pub basic: BasicFilters,
    /// Only accounts of this type
    pub account_type: Option<String>,
    /// Only accounts handled by this agent
    pub agent_id: Option<u64>,
}

/// Single-field edit of [`CustomerFilters`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CustomerFilterField {
    /// Search, status or sorting
    Basic(BasicFilterField),
    /// Set or clear the account type
    AccountType(Option<String>),
    /// Set or clear the agent
    AgentId(Option<u64>),
}

impl Filters for CustomerFilters {
    type Field = CustomerFilterField;

    fn set(&mut self, field: CustomerFilterField) {
        match field {
            CustomerFilterField::Basic(f) => self.basic.set(f),
            CustomerFilterField::AccountType(v) => self.account_type = v,
            CustomerFilterField::AgentId(v) => self.agent_id = v,
        }
    }

    fn append_to(&self, query: &mut QueryParams) {
        self.basic.append_to(query);
        query.insert_opt("AccountType", self.account_type.as_deref());
        query.insert_opt("AgentId", self.agent_id);
    }
}

/// `/customers`
#[must_use]
pub fn endpoint() -> Endpoint {
    Endpoint::new("/customers")
}

/// Selects a customer as soon as its creation succeeds
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectCreatedCustomer;

impl Reducer for SelectCreatedCustomer {
    type State = ResourceState<Customer, CustomerFilters>;
    type Action = ResourceAction<Customer, CustomerFilters>;
    type Environment = ApiEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if let ResourceAction::MutationSettled {
            kind: OperationKind::Create,
            result: Ok(Some(created)),
            ..
        } = action
        {
            state.select(Some(created));
        }
        SmallVec::new()
    }
}
