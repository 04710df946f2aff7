//! The tabular data engine.
//!
//! A pure, I/O-free projection of a row collection under sort, filter and
//! pagination. The engine never fails: out-of-range pages clamp, unknown
//! columns are ignored, and an empty dataset simply yields zero pages.

use super::column::Column;
use super::state::{
    PageOwnership, PageState, PaginationMode, SortDirection, SortState, TableQuery,
};

/// Computes the visible slice of a row collection.
///
/// Two operating modes, selected per instantiation:
/// - [`PaginationMode::Client`]: the engine owns the full row set and
///   computes filter, then stable sort, then the page slice, in that order.
/// - [`PaginationMode::Manual`]: the engine holds only the current page.
///   Sort and filter changes are recorded and reported through the change
///   listener; the rows themselves are never locally re-ordered or
///   re-filtered, since the engine does not own the full collection.
///
/// Page state is either engine-owned ([`PageOwnership::Internal`]) or owned
/// by the calling screen ([`PageOwnership::External`]); external ownership is
/// required when rows are paged remotely, so the caller stays the single
/// source of truth.
pub struct TableEngine<R> {
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    mode: PaginationMode,
    sort: Option<SortState>,
    filter_text: String,
    page: PageOwnership,
    on_change: Option<Box<dyn Fn(&TableQuery) + Send + Sync>>,
}

impl<R> TableEngine<R> {
    /// Creates a client-mode engine owning the complete row collection.
    pub fn client(columns: Vec<Column<R>>, rows: Vec<R>) -> Self {
        Self {
            columns,
            rows,
            mode: PaginationMode::Client,
            sort: None,
            filter_text: String::new(),
            page: PageOwnership::Internal(PageState::default()),
            on_change: None,
        }
    }

    /// Creates a manual-mode engine holding only the current page of rows.
    ///
    /// `row_count` is the backend's total matching-row count; `page_count`
    /// overrides the derived count when the backend reports pages directly.
    pub fn manual(
        columns: Vec<Column<R>>,
        rows: Vec<R>,
        row_count: usize,
        page_count: Option<usize>,
    ) -> Self {
        Self {
            columns,
            rows,
            mode: PaginationMode::Manual {
                row_count,
                page_count,
            },
            sort: None,
            filter_text: String::new(),
            page: PageOwnership::Internal(PageState::default()),
            on_change: None,
        }
    }

    /// Sets the initial engine-owned page state.
    pub fn with_page_state(mut self, state: PageState) -> Self {
        self.page = PageOwnership::Internal(state);
        self
    }

    /// Hands page-state ownership to the caller (controlled mode).
    ///
    /// Every page read goes through `get` and every page write through
    /// `set`; the engine keeps no copy of its own.
    pub fn with_external_page_state(
        mut self,
        get: impl Fn() -> PageState + Send + Sync + 'static,
        set: impl Fn(PageState) + Send + Sync + 'static,
    ) -> Self {
        self.page = PageOwnership::External {
            get: Box::new(get),
            set: Box::new(set),
        };
        self
    }

    /// Registers a listener invoked with the full query after every sort,
    /// filter or page mutation. Manual-mode callers re-fetch from it.
    pub fn with_change_listener(
        mut self,
        listener: impl Fn(&TableQuery) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    // ============================================================================
    // Queries
    // ============================================================================

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// The effective page state: the owned (or caller-owned) tuple with the
    /// index clamped into `[0, page_count - 1]`.
    pub fn page(&self) -> PageState {
        let mut state = self.page.current();
        state.index = clamp_index(state.index, self.page_count_for_size(state.size));
        state
    }

    /// Total matching rows: post-filter count in client mode, the externally
    /// supplied total in manual mode.
    pub fn row_count(&self) -> usize {
        match self.mode {
            PaginationMode::Client => self.filtered_indices().len(),
            PaginationMode::Manual { row_count, .. } => row_count,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count_for_size(self.page.current().size)
    }

    pub fn can_previous_page(&self) -> bool {
        self.page().index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page().index + 1 < self.page_count()
    }

    /// The current view projection (what manual-mode callers send upstream).
    pub fn query(&self) -> TableQuery {
        TableQuery {
            sort: self.sort.clone(),
            filter_text: self.filter_text.clone(),
            page: self.page(),
        }
    }

    /// The rows visible on the current page, in display order.
    ///
    /// Recomputed on every call (restartable); yields at most `page size`
    /// rows, fewer on the last page, none for an empty dataset.
    pub fn visible_rows(&self) -> impl Iterator<Item = &R> + '_ {
        let indices = match self.mode {
            PaginationMode::Client => {
                let ordered = self.sorted_filtered_indices();
                let page = self.page();
                let start = page.index * page.size;
                ordered
                    .into_iter()
                    .skip(start)
                    .take(page.size)
                    .collect::<Vec<_>>()
            }
            // Manual mode: the held rows already are the current page.
            PaginationMode::Manual { .. } => (0..self.rows.len()).collect(),
        };
        indices.into_iter().map(move |i| &self.rows[i])
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Cycles the sort on `key`: none -> ascending -> descending -> none.
    /// Selecting a different column replaces the active sort. Unknown or
    /// non-sortable columns are ignored.
    pub fn toggle_sort(&mut self, key: &str) {
        if !self.is_sortable_column(key) {
            return;
        }
        self.sort = match self.sort.take() {
            Some(SortState { column, direction }) if column == key => match direction {
                SortDirection::Ascending => Some(SortState::new(key, SortDirection::Descending)),
                SortDirection::Descending => None,
            },
            _ => Some(SortState::new(key, SortDirection::Ascending)),
        };
        self.notify();
    }

    /// Sets the sort explicitly. Unknown or non-sortable columns are ignored.
    pub fn set_sort(&mut self, key: &str, direction: SortDirection) {
        if !self.is_sortable_column(key) {
            return;
        }
        self.sort = Some(SortState::new(key, direction));
        self.notify();
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.notify();
    }

    /// Sets the free-text filter.
    ///
    /// Matching is a case-insensitive substring check across searchable
    /// columns. In client mode the page resets to 0 so a narrowed row set
    /// cannot leave the view pointing past the end; in manual mode the text
    /// is only recorded and reported, the caller re-fetches.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
        if matches!(self.mode, PaginationMode::Client) {
            let size = self.page.current().size;
            self.page.store(PageState::new(0, size));
        }
        self.notify();
    }

    /// Moves to `index`, clamped into `[0, page_count - 1]`.
    pub fn set_page(&mut self, index: usize) {
        let size = self.page.current().size;
        let clamped = clamp_index(index, self.page_count_for_size(size));
        self.page.store(PageState::new(clamped, size));
        self.notify();
    }

    /// Changes the page size, re-clamping the index so the view never points
    /// past the new last page. A zero size is ignored.
    pub fn set_page_size(&mut self, size: usize) {
        if size == 0 {
            return;
        }
        let index = self.page.current().index;
        let clamped = clamp_index(index, self.page_count_for_size(size));
        self.page.store(PageState::new(clamped, size));
        self.notify();
    }

    /// Replaces the row collection (client mode: a fresh dataset; manual
    /// mode: the newly fetched page). The engine-owned index is re-clamped.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        let count = self.page_count_for_size(self.page.current().size);
        if let PageOwnership::Internal(state) = &mut self.page {
            state.index = clamp_index(state.index, count);
        }
    }

    /// Updates the backend-reported totals after a manual-mode re-fetch.
    /// No-op in client mode.
    pub fn set_manual_counts(&mut self, row_count: usize, page_count: Option<usize>) {
        if let PaginationMode::Manual { .. } = self.mode {
            self.mode = PaginationMode::Manual {
                row_count,
                page_count,
            };
        }
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn is_sortable_column(&self, key: &str) -> bool {
        self.columns
            .iter()
            .any(|c| c.key() == key && c.is_sortable())
    }

    fn notify(&self) {
        if let Some(listener) = &self.on_change {
            listener(&self.query());
        }
    }

    fn page_count_for_size(&self, size: usize) -> usize {
        let derived = |total: usize| total.div_ceil(size.max(1));
        match self.mode {
            PaginationMode::Client => derived(self.filtered_indices().len()),
            PaginationMode::Manual {
                row_count,
                page_count,
            } => page_count.unwrap_or_else(|| derived(row_count)),
        }
    }

    /// Indices of rows passing the filter, in insertion order.
    fn filtered_indices(&self) -> Vec<usize> {
        if self.filter_text.is_empty() || !matches!(self.mode, PaginationMode::Client) {
            return (0..self.rows.len()).collect();
        }
        let needle = self.filter_text.to_lowercase();
        (0..self.rows.len())
            .filter(|&i| {
                self.columns.iter().any(|column| {
                    column.is_searchable()
                        && column
                            .value(&self.rows[i])
                            .to_string()
                            .to_lowercase()
                            .contains(&needle)
                })
            })
            .collect()
    }

    /// Filtered indices, stably ordered by the active sort column.
    fn sorted_filtered_indices(&self) -> Vec<usize> {
        let mut indices = self.filtered_indices();
        let Some(sort) = &self.sort else {
            return indices;
        };
        let Some(column) = self.columns.iter().find(|c| c.key() == sort.column) else {
            return indices;
        };

        // Vec::sort_by is stable, so rows comparing equal keep their
        // insertion order in both directions.
        match sort.direction {
            SortDirection::Ascending => indices.sort_by(|&a, &b| {
                column.value(&self.rows[a]).compare(&column.value(&self.rows[b]))
            }),
            SortDirection::Descending => indices.sort_by(|&a, &b| {
                column.value(&self.rows[b]).compare(&column.value(&self.rows[a]))
            }),
        }
        indices
    }
}

fn clamp_index(index: usize, page_count: usize) -> usize {
    index.min(page_count.saturating_sub(1))
}
