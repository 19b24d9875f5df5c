//! Layer dtypes, the `Element` trait and columnar layer storage
//!
//! Every layer is one homogeneous column (`LayerData`) indexed by entry slot.
//! `Element` maps a Rust primitive onto its runtime `DType` and gives the
//! generic kernels access to the zero value, truthiness and an `f64` view.

use ndarray::{Array2, ArrayView2};
use std::borrow::Cow;
use std::fmt;

use crate::dense::DenseLayer;

/// Runtime scalar type of one layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    Bool,
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
}

impl DType {
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for primitives that can be stored as a layer.
pub trait Element: Copy + Send + Sync + PartialEq + fmt::Debug + 'static {
    /// The corresponding `DType` for this Rust type
    const DTYPE: DType;

    /// Fill value used for coordinates a layer has no entry for.
    fn zero() -> Self;

    /// Numeric truthiness; NaN counts as nonzero.
    fn is_nonzero(self) -> bool;

    fn to_f64(self) -> f64;

    fn into_scalar(self) -> Scalar;

    fn wrap(values: Vec<Self>) -> LayerData;

    fn unwrap(data: &LayerData) -> Option<&[Self]>;

    fn wrap_dense(values: Array2<Self>) -> DenseLayer;

    fn unwrap_dense(dense: &DenseLayer) -> Option<ArrayView2<'_, Self>>;
}

macro_rules! impl_element {
    ($t:ty, $variant:ident, $zero:expr) => {
        impl Element for $t {
            const DTYPE: DType = DType::$variant;

            #[inline]
            fn zero() -> Self {
                $zero
            }

            #[inline]
            fn is_nonzero(self) -> bool {
                self != $zero
            }

            #[inline]
            #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn into_scalar(self) -> Scalar {
                Scalar::$variant(self)
            }

            #[inline]
            fn wrap(values: Vec<Self>) -> LayerData {
                LayerData::$variant(values)
            }

            #[inline]
            fn unwrap(data: &LayerData) -> Option<&[Self]> {
                match data {
                    LayerData::$variant(v) => Some(v.as_slice()),
                    _ => None,
                }
            }

            #[inline]
            fn wrap_dense(values: Array2<Self>) -> DenseLayer {
                DenseLayer::$variant(values)
            }

            #[inline]
            fn unwrap_dense(dense: &DenseLayer) -> Option<ArrayView2<'_, Self>> {
                match dense {
                    DenseLayer::$variant(a) => Some(a.view()),
                    _ => None,
                }
            }
        }
    };
}

impl_element!(i32, I32, 0);
impl_element!(i64, I64, 0);
impl_element!(u32, U32, 0);
impl_element!(u64, U64, 0);
impl_element!(f32, F32, 0.0);
impl_element!(f64, F64, 0.0);

impl Element for bool {
    const DTYPE: DType = DType::Bool;

    #[inline]
    fn zero() -> Self {
        false
    }

    #[inline]
    fn is_nonzero(self) -> bool {
        self
    }

    #[inline]
    fn to_f64(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }

    #[inline]
    fn into_scalar(self) -> Scalar {
        Scalar::Bool(self)
    }

    #[inline]
    fn wrap(values: Vec<Self>) -> LayerData {
        LayerData::Bool(values)
    }

    #[inline]
    fn unwrap(data: &LayerData) -> Option<&[Self]> {
        match data {
            LayerData::Bool(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    #[inline]
    fn wrap_dense(values: Array2<Self>) -> DenseLayer {
        DenseLayer::Bool(values)
    }

    #[inline]
    fn unwrap_dense(dense: &DenseLayer) -> Option<ArrayView2<'_, Self>> {
        match dense {
            DenseLayer::Bool(a) => Some(a.view()),
            _ => None,
        }
    }
}

/// A single layer value of any supported dtype.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl Scalar {
    /// The zero ("no score") value of `dtype`.
    #[must_use]
    pub const fn zero(dtype: DType) -> Self {
        match dtype {
            DType::Bool => Self::Bool(false),
            DType::I32 => Self::I32(0),
            DType::I64 => Self::I64(0),
            DType::U32 => Self::U32(0),
            DType::U64 => Self::U64(0),
            DType::F32 => Self::F32(0.0),
            DType::F64 => Self::F64(0.0),
        }
    }

    #[must_use]
    pub const fn dtype(&self) -> DType {
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
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Bool(v) => v.to_f64(),
            Self::I32(v) => v.to_f64(),
            Self::I64(v) => v.to_f64(),
            Self::U32(v) => v.to_f64(),
            Self::U64(v) => v.to_f64(),
            Self::F32(v) => v.to_f64(),
            Self::F64(v) => v,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

/// Run `$body` with `$v` bound to the typed vector inside a `LayerData`.
#[macro_export]
macro_rules! dispatch_layer {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            $crate::LayerData::Bool($v) => $body,
            $crate::LayerData::I32($v) => $body,
            $crate::LayerData::I64($v) => $body,
            $crate::LayerData::U32($v) => $body,
            $crate::LayerData::U64($v) => $body,
            $crate::LayerData::F32($v) => $body,
            $crate::LayerData::F64($v) => $body,
        }
    };
}

/// Like `dispatch_layer!`, but re-wraps the resulting vector in the same variant.
#[macro_export]
macro_rules! map_layer {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            $crate::LayerData::Bool($v) => $crate::LayerData::Bool($body),
            $crate::LayerData::I32($v) => $crate::LayerData::I32($body),
            $crate::LayerData::I64($v) => $crate::LayerData::I64($body),
            $crate::LayerData::U32($v) => $crate::LayerData::U32($body),
            $crate::LayerData::U64($v) => $crate::LayerData::U64($body),
            $crate::LayerData::F32($v) => $crate::LayerData::F32($body),
            $crate::LayerData::F64($v) => $crate::LayerData::F64($body),
        }
    };
}

/// One homogeneous column of layer values, indexed by entry slot.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerData {
    Bool(Vec<bool>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl LayerData {
    #[must_use]
    pub fn zeros(dtype: DType, len: usize) -> Self {
        match dtype {
            DType::Bool => Self::Bool(vec![false; len]),
            DType::I32 => Self::I32(vec![0; len]),
            DType::I64 => Self::I64(vec![0; len]),
            DType::U32 => Self::U32(vec![0; len]),
            DType::U64 => Self::U64(vec![0; len]),
            DType::F32 => Self::F32(vec![0.0; len]),
            DType::F64 => Self::F64(vec![0.0; len]),
        }
    }

    #[inline]
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

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        dispatch_layer!(self, v => v.len())
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Scalar> {
        dispatch_layer!(self, v => v.get(index).map(|x| x.into_scalar()))
    }

    /// Typed view of the column, `None` if `T` is not this column's dtype.
    #[inline]
    #[must_use]
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::unwrap(self)
    }

    /// Values widened to `f64`; borrows when the column already is `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Cow<'_, [f64]> {
        match self {
            Self::F64(v) => Cow::Borrowed(v.as_slice()),
            other => Cow::Owned(dispatch_layer!(other, v => v.iter().map(|x| x.to_f64()).collect())),
        }
    }

    /// Gather the values at `indices`, in that order.
    #[must_use]
    pub fn take(&self, indices: &[usize]) -> Self {
        map_layer!(self, v => indices.iter().map(|&i| v[i]).collect())
    }

    /// Gather values, substituting the dtype's zero wherever the slot is `None`.
    #[must_use]
    pub fn take_or_zero(&self, indices: &[Option<usize>]) -> Self {
        map_layer!(self, v => indices
            .iter()
            .map(|slot| slot.map_or_else(Element::zero, |i| v[i]))
            .collect())
    }
}

impl<T: Element> From<Vec<T>> for LayerData {
    fn from(values: Vec<T>) -> Self {
        T::wrap(values)
    }
}

impl<T: Element> From<&[T]> for LayerData {
    fn from(values: &[T]) -> Self {
        T::wrap(values.to_vec())
    }
}
