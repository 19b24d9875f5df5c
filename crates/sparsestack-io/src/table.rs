//! Row-per-coordinate table export

use std::io::{self, Write};

use sparsestack_core::{CoordinateSet, Records, Scalar};

/// One live coordinate and its layer values, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub row: i64,
    pub col: i64,
    pub values: Vec<Scalar>,
}

/// A materialised table with `row`, `col` and one column per layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<TableRow>,
}

impl Table {
    /// Column headers: `row`, `col`, then the layer names.
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as delimited text with a header line.
    ///
    /// # Errors
    /// Propagates any error from `writer`.
    pub fn write_delimited<W: Write>(&self, mut writer: W, separator: char) -> io::Result<()> {
        let sep = separator.to_string();
        writeln!(writer, "{}", self.columns.join(&sep))?;
        for entry in &self.rows {
            write!(writer, "{}{sep}{}", entry.row, entry.col)?;
            for value in &entry.values {
                write!(writer, "{sep}{value}")?;
            }
            writeln!(writer)?;
        }
        writer.flush()
    }
}

/// Build a table from a coordinate set and its parallel records.
#[must_use]
pub fn to_table(coords: &CoordinateSet, records: &Records) -> Table {
    debug_assert_eq!(coords.len(), records.len());
    let mut columns = Vec::with_capacity(records.num_layers() + 2);
    columns.push("row".to_owned());
    columns.push("col".to_owned());
    columns.extend(records.names().iter().cloned());

    let rows = coords
        .iter()
        .enumerate()
        .map(|(k, (row, col))| TableRow {
            row,
            col,
            values: records
                .columns()
                .iter()
                .filter_map(|layer| layer.get(k))
                .collect(),
        })
        .collect();
    Table { columns, rows }
}
