//! Lexicographic (row, col) ordering of coordinate sets

use rayon::prelude::*;
use sparsestack_core::{CoordinateSet, Error, Records, Result};

use super::util::SMALL_NNZ_LIMIT;

/// Stable permutation that orders `coords` by (row, col).
#[must_use]
pub fn argsort_coordinates(coords: &CoordinateSet) -> Vec<usize> {
    let row = coords.row();
    let col = coords.col();
    let mut perm: Vec<usize> = (0..coords.len()).collect();
    if perm.len() > SMALL_NNZ_LIMIT {
        perm.par_sort_by_key(|&k| (row[k], col[k]));
    } else {
        perm.sort_by_key(|&k| (row[k], col[k]));
    }
    perm
}

/// Sort coordinates and their records together; a sorted input is returned as is.
#[must_use]
pub fn sort_coordinates(coords: CoordinateSet, records: Records) -> (CoordinateSet, Records) {
    if coords.is_sorted() {
        return (coords, records);
    }
    let perm = argsort_coordinates(&coords);
    (coords.take(&perm), records.take(&perm))
}

/// Sort, then reject repeated coordinates.
///
/// # Errors
/// `DuplicateCoordinate` naming the first repeated (row, col).
pub fn sort_unique_coordinates(
    coords: CoordinateSet,
    records: Records,
) -> Result<(CoordinateSet, Records)> {
    let (coords, records) = sort_coordinates(coords, records);
    if let Some((row, col)) = coords.first_duplicate() {
        return Err(Error::DuplicateCoordinate { row, col });
    }
    Ok((coords, records))
}
