//! Dense sources and export targets (`ndarray` backed)

use ndarray::Array2;

use crate::dtype::{DType, Element, Scalar};
use crate::error::{Error, Result};

/// Run `$body` with `$a` bound to the typed 2-D array inside a `DenseLayer`.
#[macro_export]
macro_rules! dispatch_dense {
    ($dense:expr, $a:ident => $body:expr) => {
        match $dense {
            $crate::DenseLayer::Bool($a) => $body,
            $crate::DenseLayer::I32($a) => $body,
            $crate::DenseLayer::I64($a) => $body,
            $crate::DenseLayer::U32($a) => $body,
            $crate::DenseLayer::U64($a) => $body,
            $crate::DenseLayer::F32($a) => $body,
            $crate::DenseLayer::F64($a) => $body,
        }
    };
}

/// A dense 2-D array of one dtype.
#[derive(Debug, Clone, PartialEq)]
pub enum DenseLayer {
    Bool(Array2<bool>),
    I32(Array2<i32>),
    I64(Array2<i64>),
    U32(Array2<u32>),
    U64(Array2<u64>),
    F32(Array2<f32>),
    F64(Array2<f64>),
}

impl DenseLayer {
    #[must_use]
    pub fn zeros(dtype: DType, shape: (usize, usize)) -> Self {
        match dtype {
            DType::Bool => Self::Bool(Array2::from_elem(shape, false)),
            DType::I32 => Self::I32(Array2::zeros(shape)),
            DType::I64 => Self::I64(Array2::zeros(shape)),
            DType::U32 => Self::U32(Array2::zeros(shape)),
            DType::U64 => Self::U64(Array2::zeros(shape)),
            DType::F32 => Self::F32(Array2::zeros(shape)),
            DType::F64 => Self::F64(Array2::zeros(shape)),
        }
    }

    #[must_use]
    pub fn dtype(&self) -> DType {
        match self {
            Self::Bool(_) => DType::Bool,
            Self::I32(_) => DType::I32,
            Self::I64(_) => DType::I64,
            Self::U32(_) => DType::U32,
            Self::U64(_) => DType::U64,
            Self::F32(_) => DType::F32,
            Self::F64(_) => DType::F64,
        }
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        dispatch_dense!(self, a => a.dim())
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Scalar> {
        dispatch_dense!(self, a => a.get((row, col)).map(|x| x.into_scalar()))
    }

    /// Typed owned array, `None` if `T` is not this layer's dtype.
    #[must_use]
    pub fn into_array<T: Element>(self) -> Option<Array2<T>> {
        T::unwrap_dense(&self).map(|view| view.to_owned())
    }
}

impl<T: Element> From<Array2<T>> for DenseLayer {
    fn from(values: Array2<T>) -> Self {
        T::wrap_dense(values)
    }
}

/// Structured dense array: ordered named fields sharing one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseRecords {
    names: Vec<String>,
    fields: Vec<DenseLayer>,
}

impl DenseRecords {
    /// Build from `(field name, array)` pairs.
    ///
    /// # Errors
    /// `DimensionMismatch` if the fields disagree in shape, `DuplicateLayer`
    /// if a field name repeats.
    pub fn new<S: Into<String>>(fields: Vec<(S, DenseLayer)>) -> Result<Self> {
        let mut names: Vec<String> = Vec::with_capacity(fields.len());
        let mut layers = Vec::with_capacity(fields.len());
        for (name, layer) in fields {
            let name = name.into();
            if names.contains(&name) {
                return Err(Error::DuplicateLayer(name));
            }
            if let Some(first) = layers.first().map(DenseLayer::shape) {
                if layer.shape() != first {
                    return Err(Error::DimensionMismatch {
                        expected: first,
                        got: layer.shape(),
                    });
                }
            }
            names.push(name);
            layers.push(layer);
        }
        Ok(Self {
            names,
            fields: layers,
        })
    }

    /// Assembled by kernels that already guarantee equal shapes and unique names.
    #[must_use]
    pub fn from_parts_unchecked(names: Vec<String>, fields: Vec<DenseLayer>) -> Self {
        Self { names, fields }
    }

    #[inline]
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
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

    /// Shape shared by all fields, `None` when there are no fields.
    #[must_use]
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.fields.first().map(DenseLayer::shape)
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&DenseLayer> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|pos| &self.fields[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DenseLayer)> {
        self.names.iter().map(String::as_str).zip(self.fields.iter())
    }
}
