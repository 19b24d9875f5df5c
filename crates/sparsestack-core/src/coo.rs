//! COO triplet source and constructors

use crate::coords::{CoordIndex, CoordinateSet};
use crate::dtype::{Element, LayerData};
use crate::error::{Error, Result};

/// Unsorted (row, col, value) triplets with a declared shape.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Coo<T, I> {
    pub data: Vec<T>,
    pub row: Vec<I>, // length nnz
    pub col: Vec<I>, // length nnz
    pub ncols: usize,
    pub nrows: usize,
}

impl<T, I> Coo<T, I> {
    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.data.len()
    }
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }
}

impl<T: Element, I: CoordIndex> Coo<T, I> {
    /// # Errors
    /// `LengthMismatch` for unequal sequences; with `check`, also
    /// `NegativeIndex`/`IndexOverflow`/`BoundsExceeded` for indices that do
    /// not fit `nrows x ncols`.
    #[inline]
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        row: Vec<I>,
        col: Vec<I>,
        data: Vec<T>,
        check: bool,
    ) -> Result<Self> {
        if row.len() != data.len() {
            return Err(Error::length_mismatch("row/data", data.len(), row.len()));
        }
        if col.len() != data.len() {
            return Err(Error::length_mismatch("col/data", data.len(), col.len()));
        }
        if check {
            CoordinateSet::from_indices(&row, &col)?.check_bounds(nrows, ncols)?;
        }
        Ok(Self {
            data,
            row,
            col,
            ncols,
            nrows,
        })
    }

    #[inline]
    #[must_use]
    pub const fn from_parts_unchecked(
        nrows: usize,
        ncols: usize,
        row: Vec<I>,
        col: Vec<I>,
        data: Vec<T>,
    ) -> Self {
        Self {
            data,
            row,
            col,
            ncols,
            nrows,
        }
    }

    /// Coordinates widened to `i64`, in triplet order.
    ///
    /// # Errors
    /// See [`CoordinateSet::from_indices`].
    pub fn coordinates(&self) -> Result<CoordinateSet> {
        CoordinateSet::from_indices(&self.row, &self.col)
    }

    #[must_use]
    pub fn values(&self) -> LayerData {
        T::wrap(self.data.clone())
    }
}
