//! Range filtering of entries by the value of one layer

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use sparsestack_core::{CoordinateSet, Error, Records, Result};
use tracing::debug;
use wide::f64x4;

use crate::utility::util::{SMALL_NNZ_LIMIT, STRIPE};

/// Comparison applied between a layer value and a threshold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
}

impl CompareOp {
    #[inline]
    #[must_use]
    pub fn apply(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Greater => value > threshold,
            Self::Less => value < threshold,
            Self::GreaterEqual => value >= threshold,
            Self::LessEqual => value <= threshold,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Greater => ">",
            Self::Less => "<",
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CompareOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            ">" => Ok(Self::Greater),
            "<" => Ok(Self::Less),
            ">=" => Ok(Self::GreaterEqual),
            "<=" => Ok(Self::LessEqual),
            other => Err(Error::UnknownOperator(other.to_owned())),
        }
    }
}

/// Keep entries where `value {above} low` and `value {below} high`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RangeBounds {
    pub low: f64,
    pub high: f64,
    pub above: CompareOp,
    pub below: CompareOp,
}

impl Default for RangeBounds {
    fn default() -> Self {
        Self {
            low: f64::NEG_INFINITY,
            high: f64::INFINITY,
            above: CompareOp::Greater,
            below: CompareOp::Less,
        }
    }
}

impl RangeBounds {
    #[inline]
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.above.apply(value, self.low) && self.below.apply(value, self.high)
    }
}

#[inline]
fn collect_in_range(values: &[f64], base: usize, bounds: &RangeBounds, out: &mut Vec<usize>) {
    let mut block_offset = 0usize;
    let vectorized_limit = values.len() & !3;
    while block_offset < vectorized_limit {
        let block = f64x4::from([
            values[block_offset],
            values[block_offset + 1],
            values[block_offset + 2],
            values[block_offset + 3],
        ]);
        for (lane, &v) in block.to_array().iter().enumerate() {
            if bounds.contains(v) {
                out.push(base + block_offset + lane);
            }
        }
        block_offset += 4;
    }
    while block_offset < values.len() {
        if bounds.contains(values[block_offset]) {
            out.push(base + block_offset);
        }
        block_offset += 1;
    }
}

/// Slots whose value lies inside `bounds`, ascending.
#[must_use]
pub fn range_indices(values: &[f64], bounds: &RangeBounds) -> Vec<usize> {
    if values.len() < SMALL_NNZ_LIMIT {
        let mut out = Vec::new();
        collect_in_range(values, 0, bounds, &mut out);
        return out;
    }
    values
        .par_chunks(STRIPE)
        .enumerate()
        .map(|(stripe, chunk)| {
            let mut out = Vec::new();
            collect_in_range(chunk, stripe * STRIPE, bounds, &mut out);
            out
        })
        .collect::<Vec<_>>()
        .concat()
}

/// Entries whose layer `position` lies inside `bounds`.
///
/// Order is preserved, so sorted input stays sorted.
///
/// # Errors
/// `UnknownLayer` if `position` is not a layer of `records`.
pub fn filter_by_range(
    coords: &CoordinateSet,
    records: &Records,
    position: usize,
    bounds: &RangeBounds,
) -> Result<(CoordinateSet, Records)> {
    let layer = records
        .column_at(position)
        .ok_or_else(|| Error::UnknownLayer(position.to_string()))?;
    let keep = range_indices(&layer.as_f64(), bounds);
    debug!(
        layer = %records.names()[position],
        kept = keep.len(),
        total = coords.len(),
        "filtered by range"
    );
    Ok((coords.take(&keep), records.take(&keep)))
}
