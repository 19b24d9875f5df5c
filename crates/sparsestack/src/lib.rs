//! sparsestack: 2.5-D sparse arrays
//!
//! A [`StackedSparseMatrix`] stores several named scalar layers (scores) for
//! each stored (row, col) coordinate of a sparse `n_row x n_col` array.
//! Layers come from dense arrays, COO matrices or raw triplets, and are
//! merged with left, right, inner or outer join semantics.
//!
//! ```
//! use ndarray::array;
//! use sparsestack::{JoinType, StackedSparseMatrix};
//!
//! let mut matrix = StackedSparseMatrix::new(2, 3);
//! matrix.add_dense_layer(array![[0.0, 1.5, 0.0], [2.0, 0.0, 0.0]].view(), "scores", JoinType::Left)?;
//! matrix.add_sparse_data(&[0_i64, 1], &[1, 2], vec![7_i32, 8], "counts", JoinType::Outer)?;
//! assert_eq!(matrix.shape(), (2, 3, 2));
//! assert_eq!(matrix.nnz(), 3);
//! # Ok::<(), sparsestack::Error>(())
//! ```

pub mod index;
pub mod stack;

pub use index::{
    AxisSelector, Entries, IndexKey, IndexResolver, LayerChoice, LayerSelector, ResolvedKey,
    Selection,
};
pub use stack::{DenseArray, RangeFilter, StackedSparseMatrix};

pub use sparsestack_core::{
    Axis, Coo, CoordIndex, CoordinateSet, DType, DenseLayer, DenseRecords, Element, Error,
    LayerData, LayerValues, Record, Records, Result, Scalar,
};
pub use sparsestack_io::{Table, TableRow};
pub use sparsestack_kernels::{init_parallel, CompareOp, JoinType, RangeBounds};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
