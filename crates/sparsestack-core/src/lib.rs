//! Core data structures for sparsestack (pure Rust)
//!
//! A stacked sparse array stores several named scalar layers per (row, col)
//! coordinate. This crate holds the plain data types; algorithms over them
//! live in `sparsestack-kernels`.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod coo;
pub mod coords;
pub mod dense;
pub mod dtype;
pub mod error;
pub mod layers;

pub use coo::Coo;
pub use coords::{Axis, CoordIndex, CoordinateSet};
pub use dense::{DenseLayer, DenseRecords};
pub use dtype::{DType, Element, LayerData, Scalar};
pub use error::{Error, Result};
pub use layers::{LayerValues, Record, Records};
