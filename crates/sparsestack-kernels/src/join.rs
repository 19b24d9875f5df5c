//! Layer joins: merging two coordinate/record pairs under left, right, inner
//! or outer semantics.
//!
//! The existing (left) side is always sorted by (row, col) and free of
//! duplicates. Incoming (right) triplets are sorted and checked here before
//! the scan. The output record schema is the left layers followed by the
//! incoming layers; coordinates one side lacks are filled with that side's
//! zero value.

use std::fmt;
use std::str::FromStr;

use sparsestack_core::{CoordinateSet, Error, LayerValues, Records, Result};
use tracing::debug;

use crate::utility::sort::{argsort_coordinates, sort_unique_coordinates};

/// Which coordinates survive a join.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum JoinType {
    /// Keep the existing coordinates; incoming values attach where they match.
    #[default]
    Left,
    /// Keep the incoming coordinates; existing values attach where they match.
    Right,
    /// Keep coordinates present on both sides.
    Inner,
    /// Keep the union of both sides.
    Outer,
}

impl JoinType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Inner => "inner",
            Self::Outer => "outer",
        }
    }

    /// Whether incoming coordinates can end up in the output.
    #[must_use]
    pub const fn keeps_incoming(self) -> bool {
        matches!(self, Self::Right | Self::Outer)
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "inner" => Ok(Self::Inner),
            "outer" => Ok(Self::Outer),
            other => Err(Error::UnsupportedJoinMode(other.to_owned())),
        }
    }
}

/// Output coordinates plus, per output slot, the source slot on each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinPlan {
    pub coords: CoordinateSet,
    pub left: Vec<Option<usize>>,
    pub right: Vec<Option<usize>>,
}

impl JoinPlan {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// Two-pointer scan over sorted, duplicate-free `a` and `b`.
///
/// Returns, for each slot of `a`, the slot of `b` holding the same
/// coordinate, and for each slot of `b` whether anything in `a` matched it.
/// Runs in O(|a| + |b|).
#[must_use]
pub fn merge_scan(a: &CoordinateSet, b: &CoordinateSet) -> (Vec<Option<usize>>, Vec<bool>) {
    debug_assert!(a.is_sorted() && b.is_sorted());
    let (ar, ac) = (a.row(), a.col());
    let (br, bc) = (b.row(), b.col());
    let mut matches = vec![None; a.len()];
    let mut matched = vec![false; b.len()];
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        match (ar[i], ac[i]).cmp(&(br[j], bc[j])) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                matches[i] = Some(j);
                matched[j] = true;
                i += 1;
                j += 1;
            }
        }
    }
    (matches, matched)
}

/// Decide the output coordinates of a join and where each output slot's
/// values come from. Both inputs must be sorted and duplicate-free; the plan
/// is sorted by (row, col).
#[must_use]
pub fn plan_join(left: &CoordinateSet, right: &CoordinateSet, how: JoinType) -> JoinPlan {
    let plan = match how {
        JoinType::Left => {
            let (matches, _) = merge_scan(left, right);
            JoinPlan {
                coords: left.clone(),
                left: (0..left.len()).map(Some).collect(),
                right: matches,
            }
        }
        // right(A, B) is left(B, A) with the slot roles swapped back
        JoinType::Right => {
            let (matches, _) = merge_scan(right, left);
            JoinPlan {
                coords: right.clone(),
                left: matches,
                right: (0..right.len()).map(Some).collect(),
            }
        }
        JoinType::Inner => {
            let (matches, _) = merge_scan(left, right);
            let (keep, right_slots): (Vec<usize>, Vec<Option<usize>>) = matches
                .iter()
                .enumerate()
                .filter_map(|(i, m)| m.map(|j| (i, Some(j))))
                .unzip();
            JoinPlan {
                coords: left.take(&keep),
                left: keep.into_iter().map(Some).collect(),
                right: right_slots,
            }
        }
        JoinType::Outer => {
            let (matches, matched) = merge_scan(left, right);
            let right_only: Vec<usize> = matched
                .iter()
                .enumerate()
                .filter_map(|(j, &m)| (!m).then_some(j))
                .collect();
            let extra = right.take(&right_only);
            let (mut row, mut col) = left.clone().into_parts();
            row.extend_from_slice(extra.row());
            col.extend_from_slice(extra.col());
            let mut left_slots: Vec<Option<usize>> = (0..left.len()).map(Some).collect();
            left_slots.extend(std::iter::repeat(None).take(right_only.len()));
            let mut right_slots = matches;
            right_slots.extend(right_only.into_iter().map(Some));
            JoinPlan {
                coords: CoordinateSet::from_parts_unchecked(row, col),
                left: left_slots,
                right: right_slots,
            }
        }
    };
    sorted_plan(plan)
}

/// Final (row, col) sort of a plan, carrying the slot vectors along.
fn sorted_plan(plan: JoinPlan) -> JoinPlan {
    if plan.coords.is_sorted() {
        return plan;
    }
    let perm = argsort_coordinates(&plan.coords);
    JoinPlan {
        coords: plan.coords.take(&perm),
        left: perm.iter().map(|&k| plan.left[k]).collect(),
        right: perm.iter().map(|&k| plan.right[k]).collect(),
    }
}

/// Merge incoming triplets into an existing coordinate/record pair.
///
/// `right_values` is either a single unnamed column, stored under `name`, or
/// a set of named layers, stored as `"{name}_{layer}"` (or under their own
/// names when `name` is empty).
///
/// # Algorithm
/// 1. Widened incoming coordinates are sorted by (row, col) together with
///    their values, and repeated coordinates are rejected.
/// 2. A merge scan pairs every existing slot with its incoming match.
/// 3. The join mode selects output coordinates; left/right/outer fill the
///    side without a match with zeros, inner never needs a fill.
/// 4. Columns are gathered per side and concatenated, left layers first.
///
/// # Errors
/// `LengthMismatch`, `LayerNameRequired`, `DuplicateLayer` or
/// `DuplicateCoordinate`. Nothing is computed when validation fails.
pub fn join_arrays(
    left_coords: &CoordinateSet,
    left_records: &Records,
    right_coords: CoordinateSet,
    right_values: LayerValues,
    name: &str,
    how: JoinType,
) -> Result<(CoordinateSet, Records)> {
    if left_coords.len() != left_records.len() {
        return Err(Error::length_mismatch(
            "existing coordinates/records",
            left_coords.len(),
            left_records.len(),
        ));
    }
    if right_coords.len() != right_values.len() {
        return Err(Error::length_mismatch(
            "incoming coordinates/values",
            right_coords.len(),
            right_values.len(),
        ));
    }
    let incoming_names = right_values.layer_names(name)?;
    if let Some(clash) = incoming_names
        .iter()
        .find(|n| left_records.position(n).is_some())
    {
        return Err(Error::DuplicateLayer(clash.clone()));
    }

    let right_records = right_values.into_records(name)?;
    let (right_coords, right_records) = sort_unique_coordinates(right_coords, right_records)?;

    let plan = plan_join(left_coords, &right_coords, how);
    let merged = left_records
        .take_or_zero(&plan.left)
        .hstack(right_records.take_or_zero(&plan.right))?;

    debug!(
        join = %how,
        layers = ?incoming_names,
        left = left_coords.len(),
        right = right_coords.len(),
        output = plan.len(),
        "joined layers"
    );
    Ok((plan.coords, merged))
}
