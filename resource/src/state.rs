//! Slice state: the collection, the current item, per-operation flags and
//! the bookkeeping that decides which settlements are still wanted.

use crate::filters::FilterState;
use crate::pagination::{PageRequest, Pagination};
use crate::resource::{Resource, ResourceId};
use std::collections::BTreeMap;
use std::fmt;

/// Identifies one dispatched operation
///
/// Ids increase monotonically within a slice, so a larger id was always
/// issued later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// The raw sequence number
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A mutating operation with its own loading/error/success flags
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    /// POST to the collection
    Create,
    /// PUT to an item
    Update,
    /// DELETE of an item
    Delete,
    /// Resource-specific action such as `approve` or `pause`
    Custom(String),
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Update => f.write_str("update"),
            Self::Delete => f.write_str("delete"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// A piece of state whose settlements are tracked by request id
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestSlot {
    /// The list fetch
    List,
    /// The by-id fetch
    Current,
    /// One mutating operation
    Operation(OperationKind),
}

/// Latest request id issued per slot
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct RequestLedger {
    next: u64,
    latest: BTreeMap<RequestSlot, RequestId>,
    /// Requests up to this id were issued before the last full reset
    reset_at: u64,
}

impl RequestLedger {
    fn bump(&mut self) -> RequestId {
        self.next += 1;
        RequestId(self.next)
    }

    /// Issue a new id and make it the slot's latest
    pub(crate) fn issue(&mut self, slot: RequestSlot) -> RequestId {
        let id = self.bump();
        self.latest.insert(slot, id);
        id
    }

    pub(crate) fn is_latest(&self, slot: &RequestSlot, id: RequestId) -> bool {
        self.latest.get(slot) == Some(&id)
    }

    /// Make every in-flight request for the slot stale
    pub(crate) fn invalidate(&mut self, slot: RequestSlot) {
        let id = self.bump();
        self.latest.insert(slot, id);
    }

    /// Whether the request was issued after the last full reset
    pub(crate) const fn survived_reset(&self, id: RequestId) -> bool {
        id.0 > self.reset_at
    }

    /// Make every in-flight request stale
    pub(crate) fn invalidate_all(&mut self) {
        let id = self.bump();
        for latest in self.latest.values_mut() {
            *latest = id;
        }
        self.reset_at = id.0;
    }
}

/// The fetched list
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionState<R> {
    /// Entities in server order
    pub items: Vec<R>,
    /// A fetch is in flight
    pub loading: bool,
    /// Message of the last failed fetch
    pub error: Option<String>,
    /// The last fetch succeeded
    pub success: bool,
}

impl<R> Default for CollectionState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            success: false,
        }
    }
}

/// The single entity a detail view is showing
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentItemState<R> {
    /// The entity, once fetched or selected
    pub item: Option<R>,
    /// A by-id fetch is in flight
    pub loading: bool,
    /// Message of the last failed by-id fetch
    pub error: Option<String>,
}

impl<R> Default for CurrentItemState<R> {
    fn default() -> Self {
        Self {
            item: None,
            loading: false,
            error: None,
        }
    }
}

/// Flags of one mutating operation
#[derive(Clone, Debug, PartialEq)]
pub struct OperationState<R> {
    /// The operation is in flight
    pub loading: bool,
    /// Message of the last failure
    pub error: Option<String>,
    /// The last attempt succeeded
    pub success: bool,
    /// Entity returned by the last successful attempt
    pub result: Option<R>,
}

impl<R> Default for OperationState<R> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            success: false,
            result: None,
        }
    }
}

impl<R> OperationState<R> {
    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.success = false;
        self.result = None;
    }

    pub(crate) fn succeed(&mut self, result: Option<R>) {
        self.loading = false;
        self.error = None;
        self.success = true;
        self.result = result;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
        self.success = false;
        self.result = None;
    }
}

/// Everything a slice owns for one resource type
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceState<R, F> {
    /// The fetched list
    pub collection: CollectionState<R>,
    /// Server-reported pagination of `collection`
    pub pagination: Pagination,
    /// The page the view wants
    pub page_request: PageRequest,
    /// The detail entity
    pub current: CurrentItemState<R>,
    /// Flags per mutating operation, created on first dispatch
    pub operations: BTreeMap<OperationKind, OperationState<R>>,
    /// Draft and applied filters
    pub filters: FilterState<F>,
    pub(crate) ledger: RequestLedger,
}

impl<R: Resource, F: Default> ResourceState<R, F> {
    /// Empty slice requesting the first page at `page_size`
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            collection: CollectionState::default(),
            pagination: Pagination::empty(),
            page_request: PageRequest::first(page_size),
            current: CurrentItemState::default(),
            operations: BTreeMap::new(),
            filters: FilterState::default(),
            ledger: RequestLedger::default(),
        }
    }

    /// Flags of an operation, if it was ever dispatched
    #[must_use]
    pub fn operation(&self, kind: &OperationKind) -> Option<&OperationState<R>> {
        self.operations.get(kind)
    }

    pub(crate) fn operation_mut(&mut self, kind: OperationKind) -> &mut OperationState<R> {
        self.operations.entry(kind).or_default()
    }

    /// Replace the selected entity
    ///
    /// Any in-flight by-id fetch becomes stale and will not overwrite it.
    pub fn select(&mut self, item: Option<R>) {
        self.ledger.invalidate(RequestSlot::Current);
        self.current.item = item;
        self.current.loading = false;
        self.current.error = None;
    }

    /// Insert an entity at the head of the list
    pub fn add_item(&mut self, item: R) {
        self.collection.items.insert(0, item);
        self.pagination.record_added(self.page_request);
    }

    /// Replace the entity with the same id in the list and in `current`
    ///
    /// An id that is not loaded leaves the list untouched.
    pub fn update_item(&mut self, item: R) {
        let id = item.id();
        if let Some(slot) = self.collection.items.iter_mut().find(|i| i.id() == id) {
            *slot = item.clone();
        }
        if let Some(current) = self.current.item.as_mut().filter(|c| c.id() == id) {
            *current = item;
        }
    }

    /// Drop the entity with `id` from the list and from `current`
    pub fn remove_item(&mut self, id: ResourceId) {
        let before = self.collection.items.len();
        self.collection.items.retain(|i| i.id() != id);
        if self.collection.items.len() < before {
            self.pagination.record_removed(self.page_request);
        }
        if self.current.item.as_ref().is_some_and(|c| c.id() == id) {
            self.current.item = None;
        }
    }
}
