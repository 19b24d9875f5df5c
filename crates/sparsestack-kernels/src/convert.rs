//! Dense <-> coordinate conversions.
//!
//! - dense 2-D array -> (coordinates, values) of its nonzero cells
//! - (coordinates, layer) -> dense 2-D array, zero elsewhere
//! - (coordinates, records) -> structured dense array, one field per layer
//!
//! Nonzero means numeric truthiness: `false`, `0` and `0.0` are dropped, NaN
//! is kept. Zeros are therefore lost by design in a dense round trip.

#![allow(
    clippy::many_single_char_names,
    reason = "Index kernels conventionally use i/j/k for positions"
)]

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use sparsestack_core::{
    dispatch_dense, dispatch_layer, CoordinateSet, DenseLayer, DenseRecords, Element, LayerData,
    Records,
};

use crate::utility::util::{i64_to_usize, usize_to_i64, SMALL_DIM_LIMIT};

fn row_nonzeros<T: Element>(matrix: &ArrayView2<'_, T>, i: usize) -> (Vec<i64>, Vec<T>) {
    let mut cols = Vec::new();
    let mut vals = Vec::new();
    for (j, &v) in matrix.row(i).iter().enumerate() {
        if v.is_nonzero() {
            cols.push(usize_to_i64(j));
            vals.push(v);
        }
    }
    (cols, vals)
}

/// Coordinates and values of the nonzero cells, in row-major scan order.
///
/// The result is sorted by (row, col) by construction.
///
/// # Parallelization
/// Above `SMALL_DIM_LIMIT` cells each row is scanned on its own rayon task;
/// per-row results are concatenated in row order.
#[must_use]
pub fn dense_to_coordinates<T: Element>(matrix: ArrayView2<'_, T>) -> (CoordinateSet, Vec<T>) {
    let nrows = matrix.nrows();
    let per_row: Vec<(Vec<i64>, Vec<T>)> = if matrix.len() > SMALL_DIM_LIMIT {
        (0..nrows)
            .into_par_iter()
            .map(|i| row_nonzeros(&matrix, i))
            .collect()
    } else {
        (0..nrows).map(|i| row_nonzeros(&matrix, i)).collect()
    };

    let nnz = per_row.iter().map(|(c, _)| c.len()).sum();
    let mut row = Vec::with_capacity(nnz);
    let mut col = Vec::with_capacity(nnz);
    let mut data = Vec::with_capacity(nnz);
    for (i, (cols, vals)) in per_row.into_iter().enumerate() {
        row.extend(std::iter::repeat(usize_to_i64(i)).take(cols.len()));
        col.extend(cols);
        data.extend(vals);
    }
    (CoordinateSet::from_parts_unchecked(row, col), data)
}

/// Dtype-dispatched [`dense_to_coordinates`].
#[must_use]
pub fn dense_layer_to_coordinates(dense: &DenseLayer) -> (CoordinateSet, LayerData) {
    dispatch_dense!(dense, a => {
        let (coords, data) = dense_to_coordinates(a.view());
        (coords, data.into())
    })
}

/// Scatter `values` into a zero-filled `nrows x ncols` array.
#[must_use]
pub fn coordinates_to_dense<T: Element>(
    coords: &CoordinateSet,
    values: &[T],
    shape: (usize, usize),
) -> Array2<T> {
    debug_assert_eq!(coords.len(), values.len());
    let mut out = Array2::from_elem(shape, T::zero());
    for (k, (i, j)) in coords.iter().enumerate() {
        out[(i64_to_usize(i), i64_to_usize(j))] = values[k];
    }
    out
}

/// Dtype-dispatched [`coordinates_to_dense`]; the result keeps the layer's dtype.
#[must_use]
pub fn layer_to_dense(coords: &CoordinateSet, layer: &LayerData, shape: (usize, usize)) -> DenseLayer {
    dispatch_layer!(layer, v => coordinates_to_dense(coords, v, shape).into())
}

/// One dense field per layer, in schema order.
#[must_use]
pub fn records_to_dense(coords: &CoordinateSet, records: &Records, shape: (usize, usize)) -> DenseRecords {
    let fields = records
        .columns()
        .par_iter()
        .map(|layer| layer_to_dense(coords, layer, shape))
        .collect();
    DenseRecords::from_parts_unchecked(records.names().to_vec(), fields)
}
