//! Read-only selectors every list and detail page computes the same way.

use crate::filters::Filters;
use crate::resource::Resource;
use crate::state::ResourceState;

impl<R: Resource, F: Filters> ResourceState<R, F> {
    /// Loaded without error and nothing to show
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.collection.loading && self.collection.error.is_none() && self.collection.items.is_empty()
    }

    /// Any request of this slice is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.collection.loading
            || self.current.loading
            || self.operations.values().any(|op| op.loading)
    }

    /// The applied filters differ from the defaults
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.filters.applied != F::default()
    }

    /// The draft has edits that have not been applied yet
    #[must_use]
    pub fn has_unapplied_changes(&self) -> bool {
        self.filters.draft != self.filters.applied
    }

    /// "Showing 11-20 of 57", or "No results" for an empty page
    #[must_use]
    pub fn range_label(&self) -> String {
        let shown = self.collection.items.len() as u64;
        if shown == 0 || self.pagination.total_count == 0 {
            return "No results".to_string();
        }

        let page = u64::from(self.pagination.current_page.max(1));
        let size = u64::from(self.pagination.page_size.max(1));
        let first = (page - 1) * size + 1;
        let last = (first + shown - 1).min(self.pagination.total_count.max(first));
        format!("Showing {first}-{last} of {}", self.pagination.total_count)
    }
}
