//! Layer records: a schema-evolving, column-per-layer value store
//!
//! `Records` holds one `LayerData` column per layer, every column indexed by
//! the same entry slot as the owning `CoordinateSet`. The schema (ordered
//! layer names plus their dtypes) only grows: joins append columns, nothing
//! removes one.

use std::fmt;

use crate::dtype::{DType, Element, LayerData, Scalar};
use crate::error::{Error, Result};

/// Per-entry composite value: one scalar for each selected layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Scalar)>,
}

impl Record {
    #[must_use]
    pub fn new(fields: Vec<(String, Scalar)>) -> Self {
        Self { fields }
    }

    /// The "no score" record: the zero of every given dtype.
    ///
    /// This is indistinguishable from an entry that stores zeros.
    #[must_use]
    pub fn zeros<'a>(schema: impl IntoIterator<Item = (&'a str, DType)>) -> Self {
        Self {
            fields: schema
                .into_iter()
                .map(|(name, dtype)| (name.to_owned(), Scalar::zero(dtype)))
                .collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Scalar> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    #[must_use]
    pub fn get_at(&self, position: usize) -> Option<Scalar> {
        self.fields.get(position).map(|(_, v)| *v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = Scalar> + '_ {
        self.fields.iter().map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Scalar)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), *v))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, (_, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str(")")
    }
}

/// Columnar layer store shared by all entries of a stacked array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Records {
    names: Vec<String>,
    columns: Vec<LayerData>,
    len: usize,
}

impl Records {
    /// Empty schema with no entries.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            names: Vec::new(),
            columns: Vec::new(),
            len: 0,
        }
    }

    /// One named layer.
    #[must_use]
    pub fn single(name: impl Into<String>, data: LayerData) -> Self {
        let len = data.len();
        Self {
            names: vec![name.into()],
            columns: vec![data],
            len,
        }
    }

    /// # Errors
    /// `LengthMismatch` for unequal columns or name/column counts,
    /// `DuplicateLayer` for repeated names.
    pub fn from_columns(names: Vec<String>, columns: Vec<LayerData>) -> Result<Self> {
        if names.len() != columns.len() {
            return Err(Error::length_mismatch(
                "layer names/columns",
                names.len(),
                columns.len(),
            ));
        }
        if let Some(name) = first_repeated(&names) {
            return Err(Error::DuplicateLayer(name.to_owned()));
        }
        let len = columns.first().map_or(0, LayerData::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != len) {
            return Err(Error::length_mismatch("layer columns", len, bad.len()));
        }
        Ok(Self {
            names,
            columns,
            len,
        })
    }

    /// Number of entries (not layers).
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    #[must_use]
    pub fn num_layers(&self) -> usize {
        self.names.len()
    }

    #[inline]
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[LayerData] {
        &self.columns
    }

    #[must_use]
    pub fn dtypes(&self) -> Vec<DType> {
        self.columns.iter().map(LayerData::dtype).collect()
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&LayerData> {
        self.position(name).map(|pos| &self.columns[pos])
    }

    #[must_use]
    pub fn column_at(&self, position: usize) -> Option<&LayerData> {
        self.columns.get(position)
    }

    /// Typed view of one layer.
    ///
    /// # Errors
    /// `UnknownLayer` or `DTypeMismatch`.
    pub fn column_as<T: Element>(&self, name: &str) -> Result<&[T]> {
        let column = self
            .column(name)
            .ok_or_else(|| Error::UnknownLayer(name.to_owned()))?;
        column.as_slice::<T>().ok_or(Error::DTypeMismatch {
            expected: T::DTYPE,
            got: column.dtype(),
        })
    }

    /// The composite value of entry `index`.
    #[must_use]
    pub fn record(&self, index: usize) -> Option<Record> {
        if index >= self.len {
            return None;
        }
        let fields = self
            .names
            .iter()
            .zip(&self.columns)
            .filter_map(|(name, column)| column.get(index).map(|v| (name.clone(), v)))
            .collect();
        Some(Record { fields })
    }

    pub fn iter(&self) -> impl Iterator<Item = Record> + '_ {
        (0..self.len).filter_map(|i| self.record(i))
    }

    /// Gather entries at `indices` across all layers.
    #[must_use]
    pub fn take(&self, indices: &[usize]) -> Self {
        Self {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take(indices)).collect(),
            len: indices.len(),
        }
    }

    /// Gather entries, filling `None` slots with each layer's zero.
    #[must_use]
    pub fn take_or_zero(&self, indices: &[Option<usize>]) -> Self {
        Self {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take_or_zero(indices)).collect(),
            len: indices.len(),
        }
    }

    /// Gather entries at `indices`, keeping only the layers at `positions`.
    #[must_use]
    pub fn take_layers(&self, indices: &[usize], positions: &[usize]) -> Self {
        Self {
            names: positions.iter().map(|&p| self.names[p].clone()).collect(),
            columns: positions.iter().map(|&p| self.columns[p].take(indices)).collect(),
            len: indices.len(),
        }
    }

    /// Composite value of entry `index`, restricted to the layers at `positions`.
    #[must_use]
    pub fn record_of(&self, index: usize, positions: &[usize]) -> Option<Record> {
        let fields = positions
            .iter()
            .map(|&p| Some((self.names.get(p)?.clone(), self.columns.get(p)?.get(index)?)))
            .collect::<Option<Vec<_>>>()?;
        Some(Record { fields })
    }

    /// Zero-valued record restricted to the layers at `positions`.
    #[must_use]
    pub fn zero_record_of(&self, positions: &[usize]) -> Record {
        Record::zeros(
            positions
                .iter()
                .filter_map(|&p| Some((self.names.get(p)?.as_str(), self.columns.get(p)?.dtype()))),
        )
    }

    /// Rename every layer to `"{prefix}_{name}"`; an empty prefix keeps names.
    #[must_use]
    pub fn prefixed(mut self, prefix: &str) -> Self {
        if !prefix.is_empty() {
            for name in &mut self.names {
                *name = format!("{prefix}_{name}");
            }
        }
        self
    }

    /// Append the layers of `other` after this schema's layers.
    ///
    /// # Errors
    /// `LengthMismatch` if entry counts differ, `DuplicateLayer` on a name clash.
    pub fn hstack(mut self, other: Self) -> Result<Self> {
        if self.names.is_empty() {
            return Ok(other);
        }
        if other.len != self.len {
            return Err(Error::length_mismatch("records", self.len, other.len));
        }
        if let Some(name) = other.names.iter().find(|n| self.names.contains(n)) {
            return Err(Error::DuplicateLayer(name.clone()));
        }
        self.names.extend(other.names);
        self.columns.extend(other.columns);
        Ok(self)
    }
}

fn first_repeated(names: &[String]) -> Option<&str> {
    names
        .iter()
        .enumerate()
        .find(|&(i, n)| names[..i].contains(n))
        .map(|(_, n)| n.as_str())
}

/// Values arriving with a batch of incoming coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerValues {
    /// One unnamed column; it takes the caller-supplied layer name.
    Single(LayerData),
    /// Several named columns, e.g. the result of an earlier join.
    Fields(Records),
}

impl LayerValues {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(data) => data.len(),
            Self::Fields(records) => records.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names the incoming layers will carry once merged under `name`.
    ///
    /// # Errors
    /// `LayerNameRequired` for single-valued data with an empty name.
    pub fn layer_names(&self, name: &str) -> Result<Vec<String>> {
        match self {
            Self::Single(_) if name.is_empty() => Err(Error::LayerNameRequired),
            Self::Single(_) => Ok(vec![name.to_owned()]),
            Self::Fields(records) if name.is_empty() => Ok(records.names().to_vec()),
            Self::Fields(records) => Ok(records
                .names()
                .iter()
                .map(|field| format!("{name}_{field}"))
                .collect()),
        }
    }

    /// Name the incoming layers: a single column is called `name`; named
    /// fields become `"{name}_{field}"`, or keep their names if `name` is empty.
    ///
    /// # Errors
    /// `LayerNameRequired` for single-valued data with an empty name.
    pub fn into_records(self, name: &str) -> Result<Records> {
        match self {
            Self::Single(_) if name.is_empty() => Err(Error::LayerNameRequired),
            Self::Single(data) => Ok(Records::single(name, data)),
            Self::Fields(records) => Ok(records.prefixed(name)),
        }
    }
}

impl From<LayerData> for LayerValues {
    fn from(data: LayerData) -> Self {
        Self::Single(data)
    }
}

impl<T: Element> From<Vec<T>> for LayerValues {
    fn from(values: Vec<T>) -> Self {
        Self::Single(T::wrap(values))
    }
}

impl<T: Element> From<&[T]> for LayerValues {
    fn from(values: &[T]) -> Self {
        Self::Single(T::wrap(values.to_vec()))
    }
}

impl From<Records> for LayerValues {
    fn from(records: Records) -> Self {
        Self::Fields(records)
    }
}
