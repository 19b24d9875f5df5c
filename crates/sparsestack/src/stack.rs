//! `StackedSparseMatrix`: a 2.5-D sparse array with named layers.
//!
//! Each stored entry is a (row, col) coordinate carrying one value per
//! layer. Entries are kept sorted by (row, col) with no repeated coordinate,
//! and every layer column is indexed by the same entry slot.
//!
//! Adding a layer never edits the current state in place: the new
//! coordinates and records are computed first and swapped in only when the
//! whole operation succeeded. Clones share state until one of them changes.

use std::fmt;
use std::sync::Arc;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis as NdAxis};
use sparsestack_core::{
    dispatch_dense, Coo, CoordIndex, CoordinateSet, DenseLayer, DenseRecords, Element, Error,
    LayerData, LayerValues, Records, Result,
};
use sparsestack_io::{to_table, Table};
use sparsestack_kernels::{
    cell_index, col_indices, coordinates_to_dense, dense_to_coordinates, filter_by_range,
    join_arrays, layer_to_dense, records_to_dense, row_range, sort_unique_coordinates, CompareOp,
    JoinType, RangeBounds,
};
use tracing::debug;

use crate::index::{Entries, IndexKey, IndexResolver, LayerChoice, ResolvedKey, Selection};

#[derive(Debug, Clone, Default, PartialEq)]
struct StackState {
    coords: CoordinateSet,
    records: Records,
}

/// Dense export of one or all layers.
#[derive(Debug, Clone, PartialEq)]
pub enum DenseArray {
    Layer(DenseLayer),
    Records(DenseRecords),
}

/// Options for [`StackedSparseMatrix::filter_by_range_with`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeFilter {
    /// Layer to test; `None` picks the only layer.
    pub name: Option<String>,
    pub bounds: RangeBounds,
}

impl RangeFilter {
    #[must_use]
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            name: None,
            bounds: RangeBounds {
                low,
                high,
                ..RangeBounds::default()
            },
        }
    }

    #[must_use]
    pub fn layer(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn operators(mut self, above: CompareOp, below: CompareOp) -> Self {
        self.bounds.above = above;
        self.bounds.below = below;
        self
    }

    /// Operators given as strings, e.g. `(">=", "<=")`.
    ///
    /// # Errors
    /// `UnknownOperator` for anything other than `>`, `<`, `>=`, `<=`.
    pub fn with_operators(self, above: &str, below: &str) -> Result<Self> {
        Ok(self.operators(above.parse()?, below.parse()?))
    }
}

/// A sparse `n_row x n_col` array holding several named scalar layers per
/// stored coordinate.
#[derive(Debug, Clone)]
pub struct StackedSparseMatrix {
    n_row: usize,
    n_col: usize,
    state: Arc<StackState>,
}

impl StackedSparseMatrix {
    /// Empty array: no entries, no layers.
    #[must_use]
    pub fn new(n_row: usize, n_col: usize) -> Self {
        Self {
            n_row,
            n_col,
            state: Arc::default(),
        }
    }

    fn with_state(&self, coords: CoordinateSet, records: Records) -> Self {
        Self {
            n_row: self.n_row,
            n_col: self.n_col,
            state: Arc::new(StackState { coords, records }),
        }
    }

    /// `(n_row, n_col, n_layers)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.n_row, self.n_col, self.state.records.num_layers())
    }

    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.state.coords.len()
    }

    #[inline]
    #[must_use]
    pub fn layer_names(&self) -> &[String] {
        self.state.records.names()
    }

    #[inline]
    #[must_use]
    pub fn row(&self) -> &[i64] {
        self.state.coords.row()
    }

    #[inline]
    #[must_use]
    pub fn col(&self) -> &[i64] {
        self.state.coords.col()
    }

    #[inline]
    #[must_use]
    pub fn coords(&self) -> &CoordinateSet {
        &self.state.coords
    }

    #[inline]
    #[must_use]
    pub fn records(&self) -> &Records {
        &self.state.records
    }

    /// Values of one layer, indexed like [`row`](Self::row) and [`col`](Self::col).
    ///
    /// # Errors
    /// `UnknownLayer`.
    pub fn layer(&self, name: &str) -> Result<&LayerData> {
        self.state
            .records
            .column(name)
            .ok_or_else(|| Error::UnknownLayer(name.to_owned()))
    }

    /// # Errors
    /// `UnknownLayer` or `DTypeMismatch`.
    pub fn layer_as<T: Element>(&self, name: &str) -> Result<&[T]> {
        self.state.records.column_as::<T>(name)
    }

    /// The layer name to use when none was given: the only layer.
    ///
    /// # Errors
    /// `EmptyArray` with no layers, `NameRequired` with more than one.
    pub fn guess_layer_name(&self) -> Result<&str> {
        match self.layer_names() {
            [] => Err(Error::EmptyArray),
            [only] => Ok(only.as_str()),
            _ => Err(Error::NameRequired),
        }
    }

    fn resolve_name<'a>(&'a self, name: Option<&'a str>) -> Result<&'a str> {
        name.map_or_else(|| self.guess_layer_name(), Ok)
    }

    /// Compute the state after merging incoming triplets, leaving `self` as is.
    fn merged(
        &self,
        coords: CoordinateSet,
        values: LayerValues,
        name: &str,
        how: JoinType,
    ) -> Result<StackState> {
        if coords.len() != values.len() {
            return Err(Error::length_mismatch(
                "coordinates/values",
                coords.len(),
                values.len(),
            ));
        }
        let names = self.layer_names();
        // first layer, or re-adding the sole layer: replace instead of joining
        if names.is_empty() || (names.len() == 1 && names[0] == name) {
            coords.check_bounds(self.n_row, self.n_col)?;
            let records = values.into_records(name)?;
            let (coords, records) = sort_unique_coordinates(coords, records)?;
            debug!(layer = name, nnz = coords.len(), "seeded layers");
            return Ok(StackState { coords, records });
        }
        if how.keeps_incoming() {
            coords.check_bounds(self.n_row, self.n_col)?;
        }
        let incoming = coords.len();
        let (coords, records) =
            join_arrays(self.coords(), self.records(), coords, values, name, how)?;
        debug!(
            layer = name,
            join = %how,
            incoming,
            nnz = coords.len(),
            "added layers"
        );
        Ok(StackState { coords, records })
    }

    fn commit(&mut self, state: StackState) {
        self.state = Arc::new(state);
    }

    fn check_dense_shape(&self, shape: (usize, usize)) -> Result<()> {
        if shape.0 > self.n_row || shape.1 > self.n_col {
            return Err(Error::DimensionMismatch {
                expected: (self.n_row, self.n_col),
                got: shape,
            });
        }
        Ok(())
    }

    /// Add the nonzero cells of a dense array as layer `name`.
    ///
    /// The array may be smaller than the stacked array; it is anchored at
    /// (0, 0).
    ///
    /// # Errors
    /// `DimensionMismatch` if the array does not fit, plus any error of
    /// [`add_sparse_data`](Self::add_sparse_data).
    pub fn add_dense_layer<T: Element>(
        &mut self,
        matrix: ArrayView2<'_, T>,
        name: &str,
        how: JoinType,
    ) -> Result<()> {
        self.check_dense_shape(matrix.dim())?;
        let (coords, data) = dense_to_coordinates(matrix);
        let state = self.merged(coords, data.into(), name, how)?;
        self.commit(state);
        Ok(())
    }

    /// A 1-D array is treated as a single column.
    ///
    /// # Errors
    /// See [`add_dense_layer`](Self::add_dense_layer).
    pub fn add_dense_vector<T: Element>(
        &mut self,
        vector: ArrayView1<'_, T>,
        name: &str,
        how: JoinType,
    ) -> Result<()> {
        self.add_dense_layer(vector.insert_axis(NdAxis(1)), name, how)
    }

    /// Dtype-dispatched [`add_dense_layer`](Self::add_dense_layer).
    ///
    /// # Errors
    /// See [`add_dense_layer`](Self::add_dense_layer).
    pub fn add_dense(&mut self, dense: &DenseLayer, name: &str, how: JoinType) -> Result<()> {
        dispatch_dense!(dense, a => self.add_dense_layer(a.view(), name, how))
    }

    /// Add every field of a structured dense array as its own layer,
    /// named `"{name}_{field}"` (or `field` when `name` is empty).
    ///
    /// Fields are added in order; each one after the first joins against
    /// the layers added before it. Either every field is added or none is.
    ///
    /// # Errors
    /// See [`add_dense_layer`](Self::add_dense_layer).
    pub fn add_dense_records(
        &mut self,
        records: &DenseRecords,
        name: &str,
        how: JoinType,
    ) -> Result<()> {
        let mut working = self.clone();
        for (field, layer) in records.iter() {
            let layer_name = if name.is_empty() {
                field.to_owned()
            } else {
                format!("{name}_{field}")
            };
            working.add_dense(layer, &layer_name, how)?;
        }
        self.state = working.state;
        Ok(())
    }

    /// Add the triplets of a COO matrix as layer `name`.
    ///
    /// # Errors
    /// See [`add_sparse_data`](Self::add_sparse_data).
    pub fn add_coo_layer<T: Element, I: CoordIndex>(
        &mut self,
        coo: &Coo<T, I>,
        name: &str,
        how: JoinType,
    ) -> Result<()> {
        let coords = coo.coordinates()?;
        let state = self.merged(coords, coo.values().into(), name, how)?;
        self.commit(state);
        Ok(())
    }

    /// Add triplets `(row[k], col[k], values[k])`.
    ///
    /// Single-valued data becomes layer `name`; named fields become
    /// `"{name}_{field}"`. The first addition to an empty array, or adding
    /// under the name of the only layer, replaces the content. Otherwise the
    /// triplets are joined in with `how`.
    ///
    /// # Errors
    /// - `LengthMismatch` for unequal input lengths
    /// - `NegativeIndex` / `IndexOverflow` for unrepresentable coordinates
    /// - `BoundsExceeded` when a kept coordinate lies outside the shape
    /// - `DuplicateCoordinate`, `DuplicateLayer`, `LayerNameRequired`
    pub fn add_sparse_data<I: CoordIndex>(
        &mut self,
        row: &[I],
        col: &[I],
        values: impl Into<LayerValues>,
        name: &str,
        how: JoinType,
    ) -> Result<()> {
        let coords = CoordinateSet::from_indices(row, col)?;
        let state = self.merged(coords, values.into(), name, how)?;
        self.commit(state);
        Ok(())
    }

    /// Entries whose layer `name` lies strictly between `low` and `high`.
    ///
    /// # Errors
    /// See [`filter_by_range_with`](Self::filter_by_range_with).
    pub fn filter_by_range(&self, name: Option<&str>, low: f64, high: f64) -> Result<Self> {
        let mut filter = RangeFilter::new(low, high);
        filter.name = name.map(str::to_owned);
        self.filter_by_range_with(&filter)
    }

    /// New array with the entries that pass `filter`; all layers are kept.
    ///
    /// # Errors
    /// `EmptyArray` / `NameRequired` when no name is given and none can be
    /// guessed, `UnknownLayer` for an unknown name.
    pub fn filter_by_range_with(&self, filter: &RangeFilter) -> Result<Self> {
        let name = self.resolve_name(filter.name.as_deref())?;
        let position = self
            .records()
            .position(name)
            .ok_or_else(|| Error::UnknownLayer(name.to_owned()))?;
        let (coords, records) =
            filter_by_range(self.coords(), self.records(), position, &filter.bounds)?;
        Ok(self.with_state(coords, records))
    }

    /// Dense export. With a name, that layer alone; without, the only layer,
    /// or one field per layer when there are several.
    ///
    /// # Errors
    /// `UnknownLayer`, or `EmptyArray` when there are no layers.
    pub fn to_dense_array(&self, name: Option<&str>) -> Result<DenseArray> {
        let shape = (self.n_row, self.n_col);
        if let Some(name) = name {
            return Ok(DenseArray::Layer(layer_to_dense(
                self.coords(),
                self.layer(name)?,
                shape,
            )));
        }
        match self.records().columns() {
            [] => Err(Error::EmptyArray),
            [only] => Ok(DenseArray::Layer(layer_to_dense(self.coords(), only, shape))),
            _ => Ok(DenseArray::Records(records_to_dense(
                self.coords(),
                self.records(),
                shape,
            ))),
        }
    }

    /// Typed dense export of one layer (or the only layer).
    ///
    /// # Errors
    /// `EmptyArray`, `NameRequired`, `UnknownLayer` or `DTypeMismatch`.
    pub fn to_array<T: Element>(&self, name: Option<&str>) -> Result<Array2<T>> {
        let name = self.resolve_name(name)?;
        let data = self.layer_as::<T>(name)?;
        Ok(coordinates_to_dense(
            self.coords(),
            data,
            (self.n_row, self.n_col),
        ))
    }

    /// One layer as a COO matrix in (row, col) order.
    ///
    /// # Errors
    /// `EmptyArray`, `NameRequired`, `UnknownLayer` or `DTypeMismatch`.
    pub fn to_coo<T: Element>(&self, name: Option<&str>) -> Result<Coo<T, i64>> {
        let name = self.resolve_name(name)?;
        let data = self.layer_as::<T>(name)?.to_vec();
        Ok(Coo::from_parts_unchecked(
            self.n_row,
            self.n_col,
            self.row().to_vec(),
            self.col().to_vec(),
            data,
        ))
    }

    /// One row per stored entry: `row`, `col`, then every layer.
    #[must_use]
    pub fn to_table(&self) -> Table {
        to_table(self.coords(), self.records())
    }

    /// Read access by key; see [`crate::index`] for the accepted shapes.
    ///
    /// # Errors
    /// `SlicingNotImplemented`, `IndexOutOfRange` or `UnknownLayer`.
    pub fn get(&self, key: impl Into<IndexKey>) -> Result<Selection> {
        let key = key.into();
        let resolved =
            IndexResolver::new(self.n_row, self.n_col, self.layer_names()).resolve(&key)?;
        let records = self.records();
        let select = |layers: LayerChoice| layers.positions(records.num_layers());
        let selection = match resolved {
            ResolvedKey::Cell { row, col, layers } => {
                let positions = select(layers);
                let record = cell_index(self.coords(), row, col)
                    .and_then(|k| records.record_of(k, &positions))
                    .unwrap_or_else(|| records.zero_record_of(&positions));
                Selection::Cell(record)
            }
            ResolvedKey::Row { row, layers } => {
                let slots: Vec<usize> = row_range(self.coords(), row).collect();
                Selection::Entries(self.entries(&slots, &select(layers)))
            }
            ResolvedKey::Col { col, layers } => {
                let slots = col_indices(self.coords(), col);
                Selection::Entries(self.entries(&slots, &select(layers)))
            }
            ResolvedKey::All { layers } => {
                let slots: Vec<usize> = (0..self.nnz()).collect();
                Selection::Entries(self.entries(&slots, &select(layers)))
            }
            ResolvedKey::Layer(position) => {
                let slots: Vec<usize> = (0..self.nnz()).collect();
                Selection::Entries(self.entries(&slots, &[position]))
            }
        };
        Ok(selection)
    }

    fn entries(&self, slots: &[usize], positions: &[usize]) -> Entries {
        let coords = self.coords().take(slots);
        let (row, col) = coords.into_parts();
        Entries {
            row,
            col,
            records: self.records().take_layers(slots, positions),
        }
    }

    /// Item assignment is not offered; use the `add_*` methods.
    ///
    /// # Errors
    /// Always `NotSupported`.
    pub fn set(&mut self, _key: impl Into<IndexKey>, _value: impl Into<LayerValues>) -> Result<()> {
        Err(Error::NotSupported("Item assignment"))
    }
}

impl PartialEq for StackedSparseMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && (Arc::ptr_eq(&self.state, &other.state) || self.state == other.state)
    }
}

/// `{}` prints the full summary, `{:#}` the short one.
impl fmt::Display for StackedSparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n_row, n_col, n_layers) = self.shape();
        if f.alternate() {
            return write!(
                f,
                "StackedSparseArray array of shape ({n_row}, {n_col}, {n_layers}) containing scores for {:?}.",
                self.layer_names()
            );
        }
        write!(
            f,
            "<{n_row}x{n_col}x{n_layers} stacked sparse array containing scores for {:?} with {} stored elements in COOrdinate format>",
            self.layer_names(),
            self.nnz()
        )
    }
}
