//! Entry lookups over a sorted coordinate set

use std::ops::Range;

use rayon::prelude::*;
use sparsestack_core::CoordinateSet;

use crate::utility::util::SMALL_NNZ_LIMIT;

/// Slot holding `(row, col)`, found by binary search.
#[must_use]
pub fn cell_index(coords: &CoordinateSet, row: i64, col: i64) -> Option<usize> {
    let rows = row_range(coords, row);
    let cols = &coords.col()[rows.clone()];
    let k = cols.partition_point(|&c| c < col);
    (k < cols.len() && cols[k] == col).then_some(rows.start + k)
}

/// Contiguous slot range of all entries in `row`.
#[must_use]
pub fn row_range(coords: &CoordinateSet, row: i64) -> Range<usize> {
    debug_assert!(coords.is_sorted());
    let rows = coords.row();
    let start = rows.partition_point(|&r| r < row);
    let end = start + rows[start..].partition_point(|&r| r == row);
    start..end
}

/// Slots of all entries in `col`, ascending.
#[must_use]
pub fn col_indices(coords: &CoordinateSet, col: i64) -> Vec<usize> {
    let cols = coords.col();
    if cols.len() < SMALL_NNZ_LIMIT {
        return (0..cols.len()).filter(|&k| cols[k] == col).collect();
    }
    (0..cols.len())
        .into_par_iter()
        .filter(|&k| cols[k] == col)
        .collect()
}
