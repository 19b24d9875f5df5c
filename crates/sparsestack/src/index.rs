//! Index keys and their resolution against a stacked array's shape.
//!
//! Supported access patterns:
//! - `(row, col)` / `(row, col, layer)` with integer row and col: one cell
//! - integer on one axis, `..` on the other: one row or one column
//! - `(.., ..)`: every stored entry
//! - a layer name alone: every stored entry of that layer
//!
//! A layer selector is a name, an integer position or `..` (all layers).
//! Partial ranges on any axis are rejected with `SlicingNotImplemented`.

use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo};

use sparsestack_core::{Error, Record, Records, Result};
use sparsestack_kernels::utility::util::i64_to_usize;
use tracing::trace;

/// Selection along the row or column axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AxisSelector {
    /// One position; negative values count from the end.
    Index(i128),
    Slice {
        start: Option<i128>,
        stop: Option<i128>,
        step: Option<i128>,
    },
}

impl AxisSelector {
    /// The whole axis, `..`.
    pub const FULL: Self = Self::Slice {
        start: None,
        stop: None,
        step: None,
    };

    #[must_use]
    pub const fn is_full(&self) -> bool {
        matches!(
            self,
            Self::Slice {
                start: None,
                stop: None,
                step: None,
            }
        )
    }
}

/// Selection of layers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayerSelector {
    All,
    Name(String),
    /// Schema position; negative values count from the end.
    Position(i128),
    Slice {
        start: Option<i128>,
        stop: Option<i128>,
    },
}

fn wide<T>(value: T) -> i128
where
    i128: TryFrom<T>,
{
    i128::try_from(value).unwrap_or(i128::MAX)
}

macro_rules! impl_selector_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AxisSelector {
                fn from(index: $t) -> Self {
                    Self::Index(wide(index))
                }
            }

            impl From<Range<$t>> for AxisSelector {
                fn from(r: Range<$t>) -> Self {
                    Self::Slice { start: Some(wide(r.start)), stop: Some(wide(r.end)), step: None }
                }
            }

            impl From<RangeFrom<$t>> for AxisSelector {
                fn from(r: RangeFrom<$t>) -> Self {
                    Self::Slice { start: Some(wide(r.start)), stop: None, step: None }
                }
            }

            impl From<RangeTo<$t>> for AxisSelector {
                fn from(r: RangeTo<$t>) -> Self {
                    Self::Slice { start: None, stop: Some(wide(r.end)), step: None }
                }
            }

            impl From<RangeInclusive<$t>> for AxisSelector {
                fn from(r: RangeInclusive<$t>) -> Self {
                    let (start, end) = r.into_inner();
                    Self::Slice {
                        start: Some(wide(start)),
                        stop: Some(wide(end).saturating_add(1)),
                        step: None,
                    }
                }
            }

            impl From<$t> for LayerSelector {
                fn from(position: $t) -> Self {
                    Self::Position(wide(position))
                }
            }

            impl From<Range<$t>> for LayerSelector {
                fn from(r: Range<$t>) -> Self {
                    Self::Slice { start: Some(wide(r.start)), stop: Some(wide(r.end)) }
                }
            }

            impl From<RangeFrom<$t>> for LayerSelector {
                fn from(r: RangeFrom<$t>) -> Self {
                    Self::Slice { start: Some(wide(r.start)), stop: None }
                }
            }

            impl From<RangeTo<$t>> for LayerSelector {
                fn from(r: RangeTo<$t>) -> Self {
                    Self::Slice { start: None, stop: Some(wide(r.end)) }
                }
            }

            impl From<$t> for IndexKey {
                /// A bare integer selects one row.
                fn from(row: $t) -> Self {
                    Self::new(row, .., ..)
                }
            }
        )*
    };
}

impl_selector_from_int!(i32, i64, i128, isize, u32, u64, usize);

impl From<RangeFull> for AxisSelector {
    fn from(_: RangeFull) -> Self {
        Self::FULL
    }
}

impl From<RangeFull> for LayerSelector {
    fn from(_: RangeFull) -> Self {
        Self::All
    }
}

impl From<&str> for LayerSelector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for LayerSelector {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for LayerSelector {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

/// A complete `[row, col, layer]` key. Row and column are either both given
/// or both absent; absent axes only combine with a layer name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexKey {
    row: Option<AxisSelector>,
    col: Option<AxisSelector>,
    layer: LayerSelector,
}

impl IndexKey {
    #[must_use]
    pub fn new(
        row: impl Into<AxisSelector>,
        col: impl Into<AxisSelector>,
        layer: impl Into<LayerSelector>,
    ) -> Self {
        Self {
            row: Some(row.into()),
            col: Some(col.into()),
            layer: layer.into(),
        }
    }

    /// All stored entries of one layer.
    #[must_use]
    pub fn layer(name: impl Into<String>) -> Self {
        Self {
            row: None,
            col: None,
            layer: LayerSelector::Name(name.into()),
        }
    }
}

impl<R: Into<AxisSelector>, C: Into<AxisSelector>> From<(R, C)> for IndexKey {
    fn from((row, col): (R, C)) -> Self {
        Self::new(row, col, LayerSelector::All)
    }
}

impl<R, C, L> From<(R, C, L)> for IndexKey
where
    R: Into<AxisSelector>,
    C: Into<AxisSelector>,
    L: Into<LayerSelector>,
{
    fn from((row, col, layer): (R, C, L)) -> Self {
        Self::new(row, col, layer)
    }
}

impl From<&str> for IndexKey {
    fn from(name: &str) -> Self {
        Self::layer(name)
    }
}

impl From<String> for IndexKey {
    fn from(name: String) -> Self {
        Self::layer(name)
    }
}

impl From<RangeFull> for IndexKey {
    fn from(_: RangeFull) -> Self {
        Self::new(.., .., ..)
    }
}

/// Layers picked by a resolved key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayerChoice {
    All,
    One(usize),
}

impl LayerChoice {
    /// Schema positions selected out of `num_layers`.
    #[must_use]
    pub fn positions(self, num_layers: usize) -> Vec<usize> {
        match self {
            Self::All => (0..num_layers).collect(),
            Self::One(position) => vec![position],
        }
    }
}

/// A key validated against the array shape, with negative indices normalized.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolvedKey {
    Cell {
        row: i64,
        col: i64,
        layers: LayerChoice,
    },
    Row {
        row: i64,
        layers: LayerChoice,
    },
    Col {
        col: i64,
        layers: LayerChoice,
    },
    All {
        layers: LayerChoice,
    },
    Layer(usize),
}

/// Validates keys against `(n_row, n_col)` and a layer schema.
#[derive(Copy, Clone, Debug)]
pub struct IndexResolver<'a> {
    n_row: usize,
    n_col: usize,
    names: &'a [String],
}

impl<'a> IndexResolver<'a> {
    #[must_use]
    pub const fn new(n_row: usize, n_col: usize, names: &'a [String]) -> Self {
        Self {
            n_row,
            n_col,
            names,
        }
    }

    /// # Errors
    /// `SlicingNotImplemented` for partial ranges or a key without both
    /// axes and without a layer name, `IndexOutOfRange` for integers outside
    /// `[-len, len)`, `UnknownLayer` for an unknown layer name.
    pub fn resolve(&self, key: &IndexKey) -> Result<ResolvedKey> {
        let resolved = match (&key.row, &key.col) {
            (None, None) => match &key.layer {
                LayerSelector::Name(name) => ResolvedKey::Layer(self.layer_position(name)?),
                _ => return Err(Error::SlicingNotImplemented),
            },
            (Some(row), Some(col)) => {
                let layers = self.resolve_layers(&key.layer)?;
                let row = normalize_axis(row, self.n_row)?;
                let col = normalize_axis(col, self.n_col)?;
                match (row, col) {
                    (Some(row), Some(col)) => ResolvedKey::Cell { row, col, layers },
                    (Some(row), None) => ResolvedKey::Row { row, layers },
                    (None, Some(col)) => ResolvedKey::Col { col, layers },
                    (None, None) => ResolvedKey::All { layers },
                }
            }
            _ => return Err(Error::SlicingNotImplemented),
        };
        trace!(?key, ?resolved, "resolved index key");
        Ok(resolved)
    }

    fn layer_position(&self, name: &str) -> Result<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| Error::UnknownLayer(name.to_owned()))
    }

    fn resolve_layers(&self, selector: &LayerSelector) -> Result<LayerChoice> {
        match selector {
            LayerSelector::All | LayerSelector::Slice { start: None, stop: None } => {
                Ok(LayerChoice::All)
            }
            LayerSelector::Name(name) => self.layer_position(name).map(LayerChoice::One),
            LayerSelector::Position(position) => {
                let position = normalize_index(*position, self.names.len())?;
                Ok(LayerChoice::One(i64_to_usize(position)))
            }
            LayerSelector::Slice { .. } => Err(Error::SlicingNotImplemented),
        }
    }
}

// Keys stay i128 up to here so errors report the index as given.
fn normalize_index(index: i128, len: usize) -> Result<i64> {
    let n = wide(len);
    if index < -n || index >= n {
        return Err(Error::out_of_range(index, len));
    }
    let position = if index < 0 { index + n } else { index };
    i64::try_from(position).map_err(|_| Error::out_of_range(index, len))
}

/// `Some(position)` for an integer, `None` for the whole axis.
fn normalize_axis(selector: &AxisSelector, len: usize) -> Result<Option<i64>> {
    match *selector {
        AxisSelector::Index(index) => normalize_index(index, len).map(Some),
        s if s.is_full() => Ok(None),
        AxisSelector::Slice { .. } => Err(Error::SlicingNotImplemented),
    }
}

/// Stored entries picked by a row, column, whole-array or layer key.
#[derive(Debug, Clone, PartialEq)]
pub struct Entries {
    pub row: Vec<i64>,
    pub col: Vec<i64>,
    pub records: Records,
}

impl Entries {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.row.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }

    /// Values of the only selected layer, `None` if several were selected.
    #[must_use]
    pub fn values(&self) -> Option<&sparsestack_core::LayerData> {
        match self.records.columns() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// Result of indexing a stacked array.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Value of a single cell.
    ///
    /// A coordinate with no stored entry yields the zero of every selected
    /// layer, so "absent" and "stored zero" cannot be told apart here.
    Cell(Record),
    Entries(Entries),
}

impl Selection {
    #[must_use]
    pub const fn as_cell(&self) -> Option<&Record> {
        match self {
            Self::Cell(record) => Some(record),
            Self::Entries(_) => None,
        }
    }

    #[must_use]
    pub const fn as_entries(&self) -> Option<&Entries> {
        match self {
            Self::Entries(entries) => Some(entries),
            Self::Cell(_) => None,
        }
    }

    #[must_use]
    pub fn into_entries(self) -> Option<Entries> {
        match self {
            Self::Entries(entries) => Some(entries),
            Self::Cell(_) => None,
        }
    }
}
