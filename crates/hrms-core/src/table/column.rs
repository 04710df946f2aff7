//! Column descriptors and cell values.

use std::cmp::Ordering;
use std::fmt;

/// A typed scalar extracted from a row for one column.
///
/// Keeping cells typed (instead of pre-rendered strings) lets sorting compare
/// numbers numerically while filtering still works on the textual form.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Rank used to order values of different kinds relative to each other:
    /// empty cells sort first, then booleans, numbers, text.
    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Total ordering across all cell kinds. Ints and floats compare
    /// numerically with each other.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.kind_rank().cmp(&other.kind_rank()),
            },
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// Describes one column over rows of type `R`.
///
/// The accessor projects a row to the cell shown in this column. Columns are
/// sortable and searchable by default, matching how screens declare them.
pub struct Column<R> {
    key: String,
    header: String,
    sortable: bool,
    searchable: bool,
    accessor: Box<dyn Fn(&R) -> CellValue + Send + Sync>,
}

impl<R> Column<R> {
    pub fn new(
        key: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&R) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: true,
            searchable: true,
            accessor: Box::new(accessor),
        }
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// Projects a row to this column's cell.
    pub fn value(&self, row: &R) -> CellValue {
        (self.accessor)(row)
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_cross_kind_comparison() {
        assert_eq!(CellValue::Int(2).compare(&CellValue::Float(2.5)), Ordering::Less);
        assert_eq!(CellValue::Float(3.0).compare(&CellValue::Int(3)), Ordering::Equal);
    }

    #[test]
    fn test_empty_sorts_first() {
        assert_eq!(
            CellValue::Empty.compare(&CellValue::Text("a".into())),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Empty.compare(&CellValue::Int(-100)),
            Ordering::Less
        );
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Int(42).to_string(), "42");
        assert_eq!(CellValue::Text("hi".into()).to_string(), "hi");
    }

    #[test]
    fn test_option_accessor_maps_to_empty() {
        let value: CellValue = Option::<i64>::None.into();
        assert_eq!(value, CellValue::Empty);
        let value: CellValue = Some("x").into();
        assert_eq!(value, CellValue::Text("x".into()));
    }
}
