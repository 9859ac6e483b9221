//! Filter sets and the draft/apply protocol.
//!
//! A slice keeps two copies of its filters. Views edit the draft freely;
//! nothing is fetched until the draft is applied, and the applied copy is the
//! only one that ever parameterizes a list request.

use crate::client::QueryParams;
use crate::pagination::PageRequest;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A resource's filter predicates
///
/// `Field` is the set of single-field edits a view can make, so filter
/// editing stays typed end to end.
pub trait Filters: Clone + Debug + Default + PartialEq + Send + Sync + 'static {
    /// One edit to one field
    type Field: Clone + Debug + Send + Sync + 'static;

    /// Apply an edit
    fn set(&mut self, field: Self::Field);

    /// Write the set predicates as PascalCase query parameters
    ///
    /// Unset predicates must not appear in the query.
    fn append_to(&self, query: &mut QueryParams);
}

/// Sort direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

/// Predicates every list screen has: free-text search, status and sorting
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicFilters {
    /// Free-text search
    pub search: Option<String>,
    /// Status name as the backend spells it
    pub status: Option<String>,
    /// Column to sort by
    pub sort_by: Option<String>,
    /// Sort direction
    pub sort_order: Option<SortOrder>,
}

/// Single-field edit of [`BasicFilters`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BasicFilterField {
    /// Set or clear the search text
    Search(Option<String>),
    /// Set or clear the status
    Status(Option<String>),
    /// Set or clear the sort column
    SortBy(Option<String>),
    /// Set or clear the sort direction
    SortOrder(Option<SortOrder>),
}

impl Filters for BasicFilters {
    type Field = BasicFilterField;

    fn set(&mut self, field: BasicFilterField) {
        match field {
            BasicFilterField::Search(v) => self.search = v,
            BasicFilterField::Status(v) => self.status = v,
            BasicFilterField::SortBy(v) => self.sort_by = v,
            BasicFilterField::SortOrder(v) => self.sort_order = v,
        }
    }

    fn append_to(&self, query: &mut QueryParams) {
        query.insert_opt("Search", self.search.as_deref());
        query.insert_opt("Status", self.status.as_deref());
        query.insert_opt("SortBy", self.sort_by.as_deref());
        query.insert_opt("SortOrder", self.sort_order);
    }
}

/// Draft and applied copies of a slice's filters
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState<F> {
    /// Being edited; never sent
    pub draft: F,
    /// Drives list fetches
    pub applied: F,
}

impl<F: Filters> FilterState<F> {
    /// Edit the draft only
    pub fn edit(&mut self, field: F::Field) {
        self.draft.set(field);
    }

    /// Copy the whole draft into the applied filters
    pub fn apply(&mut self) {
        self.applied = self.draft.clone();
    }

    /// Restore both copies to defaults
    pub fn reset(&mut self) {
        self.draft = F::default();
        self.applied = F::default();
    }
}

/// Query for a list fetch: page parameters followed by the applied filters
#[must_use]
pub fn list_query<F: Filters>(page: PageRequest, filters: &F) -> QueryParams {
    let mut query = QueryParams::new();
    page.append_to(&mut query);
    filters.append_to(&mut query);
    query
}
