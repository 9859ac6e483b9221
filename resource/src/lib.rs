//! # Slicekit Resource
//!
//! One generic engine for remote-collection state.
//!
//! A back-office screen that lists, filters, pages through and edits a remote
//! collection needs the same handful of things every time: the current page of
//! entities, server-reported pagination, draft and applied filters, one
//! selected entity, and loading/error/success flags for each mutation. This
//! crate provides all of it once, parameterized over the entity type.
//!
//! - [`Resource`]: the entity type, its create/update body and its names
//! - [`Filters`]: the entity's filter predicates and how they become a query
//! - [`ResourceState`]: everything a slice owns
//! - [`ResourceAction`]: everything a slice reacts to
//! - [`ResourceReducer`]: the transition table, returning network calls as effects
//! - [`ResourceOperations`]: the network calls themselves, through an injected [`ApiClient`]
//!
//! ## Example
//!
//! ```ignore
//! use slicekit_resource::{ApiEnvironment, BasicFilters, Endpoint, ResourceAction, ResourceReducer};
//! use slicekit_runtime::Store;
//!
//! let reducer = ResourceReducer::<Customer, BasicFilters>::new(Endpoint::new("/customers"));
//! let store = Store::new(reducer.initial_state(), reducer, ApiEnvironment::new(client));
//!
//! let mut handle = store.send(ResourceAction::FetchList).await?;
//! handle.wait().await;
//!
//! let label = store.state(|s| s.range_label()).await;
//! ```

pub mod action;
pub mod client;
pub mod envelope;
pub mod error;
pub mod filters;
pub mod operation;
pub mod pagination;
pub mod reducer;
pub mod resource;
pub mod state;
mod view;

pub use action::ResourceAction;
pub use client::{ApiClient, ApiFuture, ApiRequest, ApiResponse, Method, QueryParams, TransportError};
pub use envelope::Envelope;
pub use error::OperationError;
pub use filters::{list_query, BasicFilterField, BasicFilters, FilterState, Filters, SortOrder};
pub use operation::{CustomOperation, Endpoint, ResourceOperations};
pub use pagination::{Page, PageRequest, Pagination, DEFAULT_PAGE_SIZE};
pub use reducer::{
    ApiEnvironment, CustomReducer, ParseStalePolicyError, ResourceReducer, SliceConfig, StalePolicy,
};
pub use resource::{Resource, ResourceId};
pub use state::{
    CollectionState, CurrentItemState, OperationKind, OperationState, RequestId, RequestSlot,
    ResourceState,
};
