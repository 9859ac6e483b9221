//! The application context: every slice in one state, one action type and
//! one reducer.

use crate::resources::{
    agent, customer, meter, payment, role, Agent, AgentFilters, Customer, CustomerFilters, Meter,
    MeterFilters, Payment, PaymentFilters, Role,
};
use slicekit_core::composition::{combine_reducers, scope_reducer, CombinedReducer};
use slicekit_core::reducer::Reducer;
use slicekit_resource::{
    ApiEnvironment, BasicFilters, Resource, ResourceAction, ResourceReducer, ResourceState, SliceConfig,
};
use slicekit_runtime::Store;
use std::sync::Arc;

/// Customer slice state
pub type CustomerState = ResourceState<Customer, CustomerFilters>;
/// Meter slice state
pub type MeterState = ResourceState<Meter, MeterFilters>;
/// Payment slice state
pub type PaymentState = ResourceState<Payment, PaymentFilters>;
/// Agent slice state
pub type AgentState = ResourceState<Agent, AgentFilters>;
/// Role slice state
pub type RoleState = ResourceState<Role, BasicFilters>;

/// Every slice the back office works with
#[derive(Clone, Debug, PartialEq)]
pub struct AdminState {
    /// Customer accounts
    pub customers: CustomerState,
    /// Installed meters
    pub meters: MeterState,
    /// Received payments
    pub payments: PaymentState,
    /// Field agents
    pub agents: AgentState,
    /// Back-office roles
    pub roles: RoleState,
}

impl AdminState {
    /// Fresh slices at the configured page size
    #[must_use]
    pub fn new(config: &SliceConfig) -> Self {
        let size = config.default_page_size;
        Self {
            customers: ResourceState::new(size),
            meters: ResourceState::new(size),
            payments: ResourceState::new(size),
            agents: ResourceState::new(size),
            roles: ResourceState::new(size),
        }
    }
}

/// An action addressed to one slice
#[derive(Clone, Debug)]
pub enum AdminAction {
    /// Customer slice
    Customers(ResourceAction<Customer, CustomerFilters>),
    /// Meter slice
    Meters(ResourceAction<Meter, MeterFilters>),
    /// Payment slice
    Payments(ResourceAction<Payment, PaymentFilters>),
    /// Agent slice
    Agents(ResourceAction<Agent, AgentFilters>),
    /// Role slice
    Roles(ResourceAction<Role, BasicFilters>),
}

impl AdminAction {
    /// Plural name of the resource the action targets
    #[must_use]
    pub const fn resource(&self) -> &'static str {
        match self {
            Self::Customers(_) => Customer::PLURAL,
            Self::Meters(_) => Meter::PLURAL,
            Self::Payments(_) => Payment::PLURAL,
            Self::Agents(_) => Agent::PLURAL,
            Self::Roles(_) => Role::PLURAL,
        }
    }

    /// Whether the action settles a network call
    #[must_use]
    pub const fn is_settlement(&self) -> bool {
        match self {
            Self::Customers(a) => a.is_settlement(),
            Self::Meters(a) => a.is_settlement(),
            Self::Payments(a) => a.is_settlement(),
            Self::Agents(a) => a.is_settlement(),
            Self::Roles(a) => a.is_settlement(),
        }
    }
}

/// The combined back-office reducer
pub type AdminReducer = CombinedReducer<AdminState, AdminAction, ApiEnvironment>;

/// The back-office store
pub type AdminStore = Store<AdminState, AdminAction, ApiEnvironment, AdminReducer>;

type BoxedReducer = Box<dyn Reducer<State = AdminState, Action = AdminAction, Environment = ApiEnvironment> + Send + Sync>;

/// Scope every resource reducer into the application context
///
/// Each slice only sees its own actions and its own field of [`AdminState`];
/// settlements produced by a slice's effects are routed back to it.
#[must_use]
pub fn admin_reducer(config: SliceConfig) -> AdminReducer {
    let reducers: Vec<BoxedReducer> = vec![
        Box::new(scope_reducer(
            ResourceReducer::with_config(customer::endpoint(), config)
                .with_custom_reducer(Arc::new(customer::SelectCreatedCustomer)),
            |s: &mut AdminState| &mut s.customers,
            |a: AdminAction| match a {
                AdminAction::Customers(a) => Some(a),
                _ => None,
            },
            AdminAction::Customers,
        )),
        Box::new(scope_reducer(
            ResourceReducer::with_config(meter::endpoint(), config),
            |s: &mut AdminState| &mut s.meters,
            |a: AdminAction| match a {
                AdminAction::Meters(a) => Some(a),
                _ => None,
            },
            AdminAction::Meters,
        )),
        Box::new(scope_reducer(
            ResourceReducer::with_config(payment::endpoint(), config),
            |s: &mut AdminState| &mut s.payments,
            |a: AdminAction| match a {
                AdminAction::Payments(a) => Some(a),
                _ => None,
            },
            AdminAction::Payments,
        )),
        Box::new(scope_reducer(
            ResourceReducer::with_config(agent::endpoint(), config),
            |s: &mut AdminState| &mut s.agents,
            |a: AdminAction| match a {
                AdminAction::Agents(a) => Some(a),
                _ => None,
            },
            AdminAction::Agents,
        )),
        Box::new(scope_reducer(
            ResourceReducer::with_config(role::endpoint(), config),
            |s: &mut AdminState| &mut s.roles,
            |a: AdminAction| match a {
                AdminAction::Roles(a) => Some(a),
                _ => None,
            },
            AdminAction::Roles,
        )),
    ];

    combine_reducers(reducers)
}

/// Build the store for an API environment
#[must_use]
pub fn admin_store(config: SliceConfig, environment: ApiEnvironment) -> AdminStore {
    Store::new(AdminState::new(&config), admin_reducer(config), environment)
}
