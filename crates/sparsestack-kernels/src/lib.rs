//! Kernels for sparsestack (pure Rust, parallel ready)
//!
//! Layer joins, dense conversion, range filtering and entry lookups over the
//! types in `sparsestack-core`. Everything here is a pure function of its
//! inputs; the stacked array type decides when to call which kernel.

/// Configure the global rayon pool.
///
/// `None` keeps rayon's default, which honours `RAYON_NUM_THREADS`. Call this
/// once, before the first parallel kernel runs.
///
/// # Errors
/// Returns rayon's error if the global pool was already initialised.
pub fn init_parallel(num_threads: Option<usize>) -> Result<(), rayon::ThreadPoolBuildError> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = num_threads {
        builder = builder.num_threads(n);
    }
    builder.build_global()
}

pub mod convert;
pub mod filter;
pub mod join;
pub mod lookup;
pub mod utility;

pub use convert::{
    coordinates_to_dense, dense_layer_to_coordinates, dense_to_coordinates, layer_to_dense,
    records_to_dense,
};
pub use filter::{filter_by_range, range_indices, CompareOp, RangeBounds};
pub use join::{join_arrays, merge_scan, plan_join, JoinPlan, JoinType};
pub use lookup::{cell_index, col_indices, row_range};
pub use utility::sort::{argsort_coordinates, sort_coordinates, sort_unique_coordinates};
