//! Coordinate sets: parallel `row`/`col` index sequences

use std::fmt;

use crate::error::{Error, Result};

/// Matrix axis, used to report which bound was violated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => f.write_str("row"),
            Self::Column => f.write_str("column"),
        }
    }
}

/// Integer types accepted as incoming coordinate indices.
///
/// Every index is widened to `i64` before any merge runs, so inputs of
/// different integer widths can be joined against each other.
pub trait CoordIndex: Copy {
    /// `None` if the value does not fit in `i64`.
    fn to_i64(self) -> Option<i64>;
}

macro_rules! impl_coord_index {
    ($($t:ty),*) => {
        $(
            impl CoordIndex for $t {
                #[inline]
                fn to_i64(self) -> Option<i64> {
                    i64::try_from(self).ok()
                }
            }
        )*
    };
}

impl_coord_index!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Ordered (row, col) pairs; slot `i` of `row` and `col` is one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CoordinateSet {
    row: Vec<i64>,
    col: Vec<i64>,
}

impl CoordinateSet {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            row: Vec::new(),
            col: Vec::new(),
        }
    }

    /// # Errors
    /// `LengthMismatch` if `row` and `col` differ in length.
    pub fn from_parts(row: Vec<i64>, col: Vec<i64>) -> Result<Self> {
        if row.len() != col.len() {
            return Err(Error::length_mismatch("row/col", row.len(), col.len()));
        }
        Ok(Self { row, col })
    }

    #[inline]
    #[must_use]
    pub const fn from_parts_unchecked(row: Vec<i64>, col: Vec<i64>) -> Self {
        Self { row, col }
    }

    /// Widen arbitrary integer indices to `i64`. Order is preserved, so the
    /// result may be unsorted.
    ///
    /// # Errors
    /// `LengthMismatch`, `NegativeIndex` or `IndexOverflow`.
    pub fn from_indices<I: CoordIndex>(row: &[I], col: &[I]) -> Result<Self> {
        if row.len() != col.len() {
            return Err(Error::length_mismatch("row/col", row.len(), col.len()));
        }
        let widen = |values: &[I]| -> Result<Vec<i64>> {
            values
                .iter()
                .map(|&v| match v.to_i64() {
                    Some(x) if x < 0 => Err(Error::NegativeIndex(x)),
                    Some(x) => Ok(x),
                    None => Err(Error::IndexOverflow),
                })
                .collect()
        };
        Ok(Self {
            row: widen(row)?,
            col: widen(col)?,
        })
    }

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

    #[inline]
    #[must_use]
    pub fn row(&self) -> &[i64] {
        &self.row
    }

    #[inline]
    #[must_use]
    pub fn col(&self) -> &[i64] {
        &self.col
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<(i64, i64)> {
        Some((*self.row.get(index)?, *self.col.get(index)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.row.iter().copied().zip(self.col.iter().copied())
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<i64>, Vec<i64>) {
        (self.row, self.col)
    }

    /// True when (row, col) is lexicographically non-decreasing.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        (1..self.len()).all(|i| (self.row[i - 1], self.col[i - 1]) <= (self.row[i], self.col[i]))
    }

    /// First repeated coordinate of a sorted set.
    #[must_use]
    pub fn first_duplicate(&self) -> Option<(i64, i64)> {
        debug_assert!(self.is_sorted());
        (1..self.len())
            .find(|&i| self.row[i - 1] == self.row[i] && self.col[i - 1] == self.col[i])
            .map(|i| (self.row[i], self.col[i]))
    }

    /// Gather the entries at `indices`, in that order.
    #[must_use]
    pub fn take(&self, indices: &[usize]) -> Self {
        Self {
            row: indices.iter().map(|&i| self.row[i]).collect(),
            col: indices.iter().map(|&i| self.col[i]).collect(),
        }
    }

    /// Check that every coordinate lies inside `nrows x ncols`.
    ///
    /// # Errors
    /// `BoundsExceeded` naming the first axis that overflows.
    pub fn check_bounds(&self, nrows: usize, ncols: usize) -> Result<()> {
        for (axis, values, bound) in [(Axis::Row, &self.row, nrows), (Axis::Column, &self.col, ncols)] {
            if let Some(&max) = values.iter().max() {
                let fits = usize::try_from(max).is_ok_and(|m| m < bound);
                if !fits {
                    return Err(Error::BoundsExceeded { axis, max, bound });
                }
            }
        }
        Ok(())
    }
}
