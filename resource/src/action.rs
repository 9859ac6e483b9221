//! Everything a slice reacts to.

use crate::error::OperationError;
use crate::filters::Filters;
use crate::pagination::Page;
use crate::resource::{Resource, ResourceId};
use crate::state::{OperationKind, RequestId};

/// Actions of one resource slice
///
/// Views dispatch the operation and local-edit variants. The `*Settled`
/// variants are produced by the slice's own effects when a network call
/// finishes and are not meant to be dispatched by hand.
#[derive(Clone, Debug)]
pub enum ResourceAction<R: Resource, F: Filters> {
    // Operations
    /// Fetch the requested page with the applied filters
    FetchList,
    /// Fetch one entity into `current`
    FetchById {
        /// Entity to fetch
        id: ResourceId,
    },
    /// Create an entity
    Create {
        /// Request body
        input: R::Input,
    },
    /// Replace an entity
    Update {
        /// Entity to update
        id: ResourceId,
        /// Request body
        input: R::Input,
    },
    /// Delete an entity
    Delete {
        /// Entity to delete
        id: ResourceId,
    },
    /// Run a resource-specific operation registered on the endpoint
    Custom {
        /// Registered operation name, e.g. `approve`
        operation: String,
        /// Target entity
        id: ResourceId,
        /// Optional JSON body
        body: Option<serde_json::Value>,
    },

    // Settlements
    /// A list fetch finished
    ListSettled {
        /// Request being settled
        request: RequestId,
        /// Page or failure
        result: Result<Page<R>, OperationError>,
    },
    /// A by-id fetch finished
    ItemSettled {
        /// Request being settled
        request: RequestId,
        /// Entity or failure
        result: Result<R, OperationError>,
    },
    /// A mutation finished
    MutationSettled {
        /// Request being settled
        request: RequestId,
        /// Which operation
        kind: OperationKind,
        /// Entity the operation addressed, absent for create
        target: Option<ResourceId>,
        /// Returned entity, if the server sent one
        result: Result<Option<R>, OperationError>,
    },

    // Local edits
    /// Empty the list and its pagination
    ClearList,
    /// Forget the current item
    ClearCurrent,
    /// Select an entity without fetching it
    SetCurrent(Option<R>),
    /// Reset one operation's flags
    ClearOperation(OperationKind),
    /// Request a page number
    SetPage(u32),
    /// Request a page size; always goes back to page 1
    SetPageSize(u32),
    /// Edit one field of the draft filters
    SetFilter(F::Field),
    /// Make the draft filters the applied ones
    ApplyFilters,
    /// Restore default filters
    ResetFilters,
    /// Insert an entity at the head of the list
    AddItem(R),
    /// Replace an entity by id
    UpdateItem(R),
    /// Remove an entity by id
    RemoveItem(ResourceId),
    /// Return to the initial state
    Reset,
}

impl<R: Resource, F: Filters> ResourceAction<R, F> {
    /// Whether this action settles a network call
    #[must_use]
    pub const fn is_settlement(&self) -> bool {
        matches!(
            self,
            Self::ListSettled { .. } | Self::ItemSettled { .. } | Self::MutationSettled { .. }
        )
    }

    /// Whether this action is a settlement that carries a failure
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::ListSettled { result: Err(_), .. }
                | Self::ItemSettled { result: Err(_), .. }
                | Self::MutationSettled { result: Err(_), .. }
        )
    }
}
