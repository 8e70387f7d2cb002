//! Pagination primitives shared by tracker queries.

use serde::{Deserialize, Serialize};

/// Result ordering for paginated queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest records first. The default for every tracker query.
    #[default]
    CreatedAtDesc,
    /// Oldest records first.
    CreatedAtAsc,
}

/// Page selector: zero-based page number, page size, and sort order.
///
/// The full request participates in cache keys, so two requests differing in
/// any field are distinct cache entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    number: u32,
    size: u32,
    sort: SortOrder,
}

impl PageRequest {
    /// Creates a page request with the default sort order.
    #[must_use]
    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number,
            size,
            sort: SortOrder::default(),
        }
    }

    /// Sets the sort order.
    #[must_use]
    pub const fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Returns the zero-based page number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Returns the page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns the sort order.
    #[must_use]
    pub const fn sort(&self) -> SortOrder {
        self.sort
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 20)
    }
}

/// One page of query results plus total-count metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    items: Vec<T>,
    total_elements: u64,
    number: u32,
    size: u32,
}

impl<T> Page<T> {
    /// Slices one page out of a fully filtered and sorted result set.
    ///
    /// Used by in-memory adapters; a SQL adapter would push the slicing into
    /// the query instead.
    #[must_use]
    pub fn from_complete(full_set: Vec<T>, request: &PageRequest) -> Self {
        let total_elements = u64::try_from(full_set.len()).unwrap_or(u64::MAX);
        let size = usize::try_from(request.size()).unwrap_or(usize::MAX);
        let offset = usize::try_from(request.number())
            .unwrap_or(usize::MAX)
            .saturating_mul(size);
        let items = full_set.into_iter().skip(offset).take(size).collect();
        Self {
            items,
            total_elements,
            number: request.number(),
            size: request.size(),
        }
    }

    /// Returns the records on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page, returning its records.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the total number of matching records across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Returns the zero-based page number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Returns the requested page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns whether this page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
