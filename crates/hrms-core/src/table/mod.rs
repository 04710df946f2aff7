//! Generic tabular data engine: sorting, filtering and pagination over a row
//! collection, in client-side or server-driven mode.

pub mod column;
pub mod engine;
pub mod state;

pub use column::{CellValue, Column};
pub use engine::TableEngine;
pub use state::{
    PageOwnership, PageState, PaginationMode, SortDirection, SortState, TableQuery,
};
