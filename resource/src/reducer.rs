//! The transition table of a resource slice.
//!
//! Every operation walks `idle → pending → (fulfilled | rejected)`:
//!
//! | Phase     | `loading` | `success` | `error`     |
//! |-----------|-----------|-----------|-------------|
//! | pending   | `true`    | `false`   | `None`      |
//! | fulfilled | `false`   | `true`    | `None`      |
//! | rejected  | `false`   | `false`   | `Some(msg)` |
//!
//! A pending list fetch keeps the loaded items on screen; a rejected one
//! empties the list and zeroes the pagination.

use crate::action::ResourceAction;
use crate::client::ApiClient;
use crate::filters::Filters;
use crate::operation::{Endpoint, ResourceOperations};
use crate::pagination::{PageRequest, DEFAULT_PAGE_SIZE};
use crate::resource::{Resource, ResourceId};
use crate::state::{OperationKind, RequestId, RequestSlot, ResourceState};
use serde::{Deserialize, Serialize};
use slicekit_core::effect::Effect;
use slicekit_core::reducer::Reducer;
use slicekit_core::{smallvec, SmallVec};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Which of two overlapping requests determines the state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StalePolicy {
    /// Settlements of superseded requests are discarded
    #[default]
    LatestIssuedWins,
    /// Whichever request settles last overwrites the state
    LastSettledWins,
}

/// Unknown stale-policy name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stale policy '{0}' (expected 'latest-issued-wins' or 'last-settled-wins')")]
pub struct ParseStalePolicyError(String);

impl FromStr for StalePolicy {
    type Err = ParseStalePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "latest-issued-wins" | "latest-issued" | "latest" => Ok(Self::LatestIssuedWins),
            "last-settled-wins" | "last-settled" | "last" => Ok(Self::LastSettledWins),
            _ => Err(ParseStalePolicyError(s.to_string())),
        }
    }
}

/// Per-slice settings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceConfig {
    /// Page size of a fresh or reset slice
    pub default_page_size: u32,
    /// How overlapping requests resolve
    pub stale_policy: StalePolicy,
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            stale_policy: StalePolicy::default(),
        }
    }
}

impl SliceConfig {
    /// Set the default page size
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Set the stale policy
    #[must_use]
    pub const fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.stale_policy = policy;
        self
    }
}

/// Dependencies injected into every resource reducer
#[derive(Clone)]
pub struct ApiEnvironment {
    /// Client all operations are issued through
    pub client: Arc<dyn ApiClient>,
}

impl ApiEnvironment {
    /// Environment around a client
    #[must_use]
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for ApiEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiEnvironment").finish_non_exhaustive()
    }
}

/// Extra reducer run after the transition table on every action
pub type CustomReducer<R, F> = Arc<
    dyn Reducer<State = ResourceState<R, F>, Action = ResourceAction<R, F>, Environment = ApiEnvironment>
        + Send
        + Sync,
>;

/// Reducer of one resource slice
///
/// # Example
///
/// ```ignore
/// let reducer = ResourceReducer::<Payment, PaymentFilters>::new(
///     Endpoint::new("/payments").with_custom(CustomOperation::new("approve", Method::Put)),
/// );
/// let store = Store::new(reducer.initial_state(), reducer, ApiEnvironment::new(client));
/// store.send(ResourceAction::FetchList).await?;
/// ```
pub struct ResourceReducer<R: Resource, F: Filters> {
    endpoint: Arc<Endpoint>,
    config: SliceConfig,
    custom: Vec<CustomReducer<R, F>>,
}

impl<R: Resource, F: Filters> Clone for ResourceReducer<R, F> {
    fn clone(&self) -> Self {
        Self {
            endpoint: Arc::clone(&self.endpoint),
            config: self.config,
            custom: self.custom.clone(),
        }
    }
}

impl<R: Resource, F: Filters> ResourceReducer<R, F> {
    /// Reducer with the default configuration
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_config(endpoint, SliceConfig::default())
    }

    /// Reducer with an explicit configuration
    #[must_use]
    pub fn with_config(endpoint: Endpoint, config: SliceConfig) -> Self {
        Self {
            endpoint: Arc::new(endpoint),
            config,
            custom: Vec::new(),
        }
    }

    /// Run `reducer` after the transition table
    #[must_use]
    pub fn with_custom_reducer(mut self, reducer: CustomReducer<R, F>) -> Self {
        self.custom.push(reducer);
        self
    }

    /// The slice's configuration
    #[must_use]
    pub const fn config(&self) -> &SliceConfig {
        &self.config
    }

    /// The endpoint this slice talks to
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Empty state at the configured page size
    #[must_use]
    pub fn initial_state(&self) -> ResourceState<R, F> {
        ResourceState::new(self.config.default_page_size)
    }

    fn operations(&self, env: &ApiEnvironment) -> ResourceOperations<R> {
        ResourceOperations::new(Arc::clone(&env.client), Arc::clone(&self.endpoint))
    }

    fn accepts(&self, state: &ResourceState<R, F>, slot: &RequestSlot, request: RequestId) -> bool {
        match self.config.stale_policy {
            StalePolicy::LastSettledWins => true,
            StalePolicy::LatestIssuedWins => state.ledger.is_latest(slot, request),
        }
    }

    fn settlement_accepted(&self, state: &ResourceState<R, F>, action: &ResourceAction<R, F>) -> bool {
        match action {
            ResourceAction::ListSettled { request, .. } => {
                self.accepts(state, &RequestSlot::List, *request)
            },
            ResourceAction::ItemSettled { request, .. } => {
                self.accepts(state, &RequestSlot::Current, *request)
            },
            ResourceAction::MutationSettled { request, kind, .. } => {
                self.accepts(state, &RequestSlot::Operation(kind.clone()), *request)
            },
            _ => true,
        }
    }

    fn fetch_list(
        &self,
        state: &mut ResourceState<R, F>,
        env: &ApiEnvironment,
    ) -> SmallVec<[Effect<ResourceAction<R, F>>; 4]> {
        let request = state.ledger.issue(RequestSlot::List);
        state.collection.loading = true;
        state.collection.error = None;
        state.collection.success = false;

        let operations = self.operations(env);
        let page = state.page_request;
        let filters = state.filters.applied.clone();
        tracing::debug!(resource = R::PLURAL, %request, page = page.current_page, "Fetching list");

        smallvec![Effect::future(async move {
            let result = operations.fetch_list(page, &filters).await;
            Some(ResourceAction::ListSettled { request, result })
        })]
    }

    fn refetch_if_changed(
        &self,
        state: &mut ResourceState<R, F>,
        previous: PageRequest,
        env: &ApiEnvironment,
    ) -> SmallVec<[Effect<ResourceAction<R, F>>; 4]> {
        if state.page_request == previous {
            return SmallVec::new();
        }
        self.fetch_list(state, env)
    }

    fn begin_mutation(state: &mut ResourceState<R, F>, kind: &OperationKind) -> RequestId {
        let request = state.ledger.issue(RequestSlot::Operation(kind.clone()));
        state.operation_mut(kind.clone()).begin();
        tracing::debug!(resource = R::PLURAL, %request, operation = %kind, "Starting operation");
        request
    }

    fn settle_mutation(
        &self,
        state: &mut ResourceState<R, F>,
        request: RequestId,
        kind: OperationKind,
        target: Option<ResourceId>,
        result: Result<Option<R>, crate::OperationError>,
    ) {
        let merge = match self.config.stale_policy {
            StalePolicy::LastSettledWins => true,
            StalePolicy::LatestIssuedWins => state.ledger.survived_reset(request),
        };
        let slot = RequestSlot::Operation(kind.clone());
        let flags = self.accepts(state, &slot, request);

        // The server applied a successful mutation whether or not a newer
        // request of the same kind is in flight.
        if merge {
            if let Ok(entity) = &result {
                match (&kind, entity.clone(), target) {
                    (OperationKind::Create, Some(entity), _) => state.add_item(entity),
                    (OperationKind::Delete, _, Some(id)) => state.remove_item(id),
                    (OperationKind::Update | OperationKind::Custom(_), Some(entity), _) => {
                        state.update_item(entity);
                    },
                    _ => {},
                }
            }
        }

        if !flags {
            tracing::debug!(resource = R::PLURAL, %request, operation = %kind, "Discarding stale operation flags");
            return;
        }

        let operation = state.operation_mut(kind);
        match result {
            Ok(entity) => operation.succeed(entity),
            Err(error) => operation.fail(error.to_string()),
        }
    }

    #[allow(clippy::too_many_lines)]
    fn transition(
        &self,
        state: &mut ResourceState<R, F>,
        action: ResourceAction<R, F>,
        env: &ApiEnvironment,
    ) -> SmallVec<[Effect<ResourceAction<R, F>>; 4]> {
        match action {
            ResourceAction::FetchList => self.fetch_list(state, env),

            ResourceAction::FetchById { id } => {
                let request = state.ledger.issue(RequestSlot::Current);
                state.current.loading = true;
                state.current.error = None;

                let operations = self.operations(env);
                smallvec![Effect::future(async move {
                    let result = operations.fetch_by_id(id).await;
                    Some(ResourceAction::ItemSettled { request, result })
                })]
            },

            ResourceAction::Create { input } => {
                let kind = OperationKind::Create;
                let request = Self::begin_mutation(state, &kind);
                let operations = self.operations(env);
                smallvec![Effect::future(async move {
                    let result = operations.create(&input).await;
                    Some(ResourceAction::MutationSettled { request, kind, target: None, result })
                })]
            },

            ResourceAction::Update { id, input } => {
                let kind = OperationKind::Update;
                let request = Self::begin_mutation(state, &kind);
                let operations = self.operations(env);
                smallvec![Effect::future(async move {
                    let result = operations.update(id, &input).await;
                    Some(ResourceAction::MutationSettled { request, kind, target: Some(id), result })
                })]
            },

            ResourceAction::Delete { id } => {
                let kind = OperationKind::Delete;
                let request = Self::begin_mutation(state, &kind);
                let operations = self.operations(env);
                smallvec![Effect::future(async move {
                    let result = operations.delete(id).await.map(|()| None);
                    Some(ResourceAction::MutationSettled { request, kind, target: Some(id), result })
                })]
            },

            ResourceAction::Custom { operation, id, body } => {
                let kind = OperationKind::Custom(operation.clone());
                let request = Self::begin_mutation(state, &kind);
                let operations = self.operations(env);
                smallvec![Effect::future(async move {
                    let result = operations.custom(&operation, id, body).await;
                    Some(ResourceAction::MutationSettled { request, kind, target: Some(id), result })
                })]
            },

            ResourceAction::ListSettled { request, result } => {
                if !self.accepts(state, &RequestSlot::List, request) {
                    tracing::debug!(resource = R::PLURAL, %request, "Discarding stale list response");
                    return SmallVec::new();
                }
                state.collection.loading = false;
                match result {
                    Ok(page) => {
                        state.collection.items = page.items;
                        state.pagination = page.pagination;
                        state.collection.success = true;
                        state.collection.error = None;
                    },
                    Err(error) => {
                        state.collection.items.clear();
                        state.pagination = crate::Pagination::empty();
                        state.collection.success = false;
                        state.collection.error = Some(error.to_string());
                    },
                }
                SmallVec::new()
            },

            ResourceAction::ItemSettled { request, result } => {
                if !self.accepts(state, &RequestSlot::Current, request) {
                    tracing::debug!(resource = R::PLURAL, %request, "Discarding stale item response");
                    return SmallVec::new();
                }
                state.current.loading = false;
                match result {
                    Ok(item) => {
                        state.current.item = Some(item);
                        state.current.error = None;
                    },
                    Err(error) => {
                        state.current.item = None;
                        state.current.error = Some(error.to_string());
                    },
                }
                SmallVec::new()
            },

            ResourceAction::MutationSettled {
                request,
                kind,
                target,
                result,
            } => {
                self.settle_mutation(state, request, kind, target, result);
                SmallVec::new()
            },

            ResourceAction::ClearList => {
                state.ledger.invalidate(RequestSlot::List);
                state.collection = crate::CollectionState::default();
                state.pagination = crate::Pagination::empty();
                SmallVec::new()
            },

            ResourceAction::ClearCurrent => {
                state.ledger.invalidate(RequestSlot::Current);
                state.current = crate::CurrentItemState::default();
                SmallVec::new()
            },

            ResourceAction::SetCurrent(item) => {
                state.select(item);
                SmallVec::new()
            },

            ResourceAction::ClearOperation(kind) => {
                state.ledger.invalidate(RequestSlot::Operation(kind.clone()));
                state.operations.remove(&kind);
                SmallVec::new()
            },

            ResourceAction::SetPage(page) => {
                let previous = state.page_request;
                state.page_request.current_page = page;
                self.refetch_if_changed(state, previous, env)
            },

            ResourceAction::SetPageSize(page_size) => {
                let previous = state.page_request;
                state.page_request = PageRequest::first(page_size);
                self.refetch_if_changed(state, previous, env)
            },

            ResourceAction::SetFilter(field) => {
                state.filters.edit(field);
                SmallVec::new()
            },

            ResourceAction::ApplyFilters => {
                state.filters.apply();
                state.page_request.current_page = 1;
                self.fetch_list(state, env)
            },

            ResourceAction::ResetFilters => {
                state.filters.reset();
                state.page_request.current_page = 1;
                self.fetch_list(state, env)
            },

            ResourceAction::AddItem(item) => {
                state.add_item(item);
                SmallVec::new()
            },

            ResourceAction::UpdateItem(item) => {
                state.update_item(item);
                SmallVec::new()
            },

            ResourceAction::RemoveItem(id) => {
                state.remove_item(id);
                SmallVec::new()
            },

            ResourceAction::Reset => {
                let mut ledger = std::mem::take(&mut state.ledger);
                ledger.invalidate_all();
                *state = self.initial_state();
                state.ledger = ledger;
                SmallVec::new()
            },
        }
    }
}

impl<R: Resource, F: Filters> Reducer for ResourceReducer<R, F> {
    type State = ResourceState<R, F>;
    type Action = ResourceAction<R, F>;
    type Environment = ApiEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if self.custom.is_empty() {
            return self.transition(state, action, env);
        }

        // Custom reducers only observe settlements the slice itself accepted.
        let accepted = self.settlement_accepted(state, &action);
        let mut effects = self.transition(state, action.clone(), env);
        if !accepted {
            return effects;
        }
        for reducer in &self.custom {
            effects.extend(
                reducer
                    .reduce(state, action.clone(), env)
                    .into_iter()
                    .filter(|effect| !effect.is_none()),
            );
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_policy_parses_common_spellings() {
        assert_eq!("latest-issued-wins".parse::<StalePolicy>(), Ok(StalePolicy::LatestIssuedWins));
        assert_eq!("LAST_SETTLED_WINS".parse::<StalePolicy>(), Ok(StalePolicy::LastSettledWins));
        assert_eq!(" last ".parse::<StalePolicy>(), Ok(StalePolicy::LastSettledWins));
        assert!("newest".parse::<StalePolicy>().is_err());
    }

    #[test]
    fn slice_config_builders() {
        let config = SliceConfig::default()
            .with_page_size(25)
            .with_stale_policy(StalePolicy::LastSettledWins);

        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.stale_policy, StalePolicy::LastSettledWins);
        assert_eq!(SliceConfig::default().default_page_size, DEFAULT_PAGE_SIZE);
    }
}
