//! Table view state: sort, pagination and ownership modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction for the active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The active sort: one column at a time; selecting another column replaces
/// the previous sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

/// Zero-based page index and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub index: usize,
    pub size: usize,
}

impl PageState {
    pub fn new(index: usize, size: usize) -> Self {
        Self { index, size }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self { index: 0, size: 10 }
    }
}

/// The full view projection the engine is currently asked to produce.
///
/// In manual mode this is what callers forward to the backend when
/// re-querying.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableQuery {
    pub sort: Option<SortState>,
    pub filter_text: String,
    pub page: PageState,
}

/// How the engine sources rows and counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// The engine holds the complete row collection; filtering, sorting and
    /// pagination are computed in memory.
    Client,
    /// The engine holds only the current page. `row_count` is the backend's
    /// total; `page_count` overrides the derived `ceil(row_count / size)`
    /// when the backend reports pages directly.
    Manual {
        row_count: usize,
        page_count: Option<usize>,
    },
}

/// Who owns the page state.
///
/// Chosen once at construction and never mixed at runtime: either the engine
/// stores `{index, size}` itself, or the calling screen does and the engine
/// goes through the caller's accessors for every read and write.
pub enum PageOwnership {
    Internal(PageState),
    External {
        get: Box<dyn Fn() -> PageState + Send + Sync>,
        set: Box<dyn Fn(PageState) + Send + Sync>,
    },
}

impl PageOwnership {
    pub(crate) fn current(&self) -> PageState {
        match self {
            PageOwnership::Internal(state) => *state,
            PageOwnership::External { get, .. } => get(),
        }
    }

    pub(crate) fn store(&mut self, state: PageState) {
        match self {
            PageOwnership::Internal(slot) => *slot = state,
            PageOwnership::External { set, .. } => set(state),
        }
    }
}

impl fmt::Debug for PageOwnership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageOwnership::Internal(state) => f.debug_tuple("Internal").field(state).finish(),
            PageOwnership::External { .. } => f.write_str("External"),
        }
    }
}
