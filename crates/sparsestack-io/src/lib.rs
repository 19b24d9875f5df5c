//! IO helpers for sparsestack
//!
//! Tabular export: one row per live coordinate with explicit `row` and `col`
//! columns followed by one column per layer, named exactly as the layers are.

pub mod table;

pub use table::{to_table, Table, TableRow};

#[inline]
#[must_use]
pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
