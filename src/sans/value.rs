//! Decoded field values.

use alloc::{string::String, vec::Vec};
use core::fmt;

use either::Either::{Left, Right};

/// A decoded field value.
///
/// Null values are represented outside this type, as `None`. Arrays keep
/// their null elements so positions are preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    String(String),
    /// A named member of an enumerated type.
    Symbol(&'static str),
    Array(Vec<Option<Value>>),
}

impl Value {
    /// The value as a wide integer, if it is a scalar integer.
    pub fn as_i128(&self) -> Option<i128> {
        Some(match *self {
            Self::U8(x) => x.into(),
            Self::I8(x) => x.into(),
            Self::U16(x) => x.into(),
            Self::I16(x) => x.into(),
            Self::U32(x) => x.into(),
            Self::I32(x) => x.into(),
            Self::U64(x) => x.into(),
            Self::I64(x) => x.into(),
            _ => return None,
        })
    }

    /// The value as an unsigned integer, if it is a non-negative scalar integer.
    pub fn as_u64(&self) -> Option<u64> {
        self.as_i128().and_then(|x| u64::try_from(x).ok())
    }

    /// The value as a float, if it is a scalar number.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::F32(x) => Some(x.into()),
            Self::F64(x) => Some(x),
            _ => self.as_i128().map(|x| x as f64),
        }
    }

    /// The value as text, if it is a string or a symbol.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            Self::Symbol(s) => Some(*s),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Iterate over the non-null elements of an array, or the value itself if
    /// it is a scalar.
    pub fn elements(&self) -> impl Iterator<Item = &Value> {
        match self {
            Self::Array(v) => Right(v.iter().flatten()),
            v => Left(core::iter::once(v)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8(x) => write!(f, "{x}"),
            Self::I8(x) => write!(f, "{x}"),
            Self::U16(x) => write!(f, "{x}"),
            Self::I16(x) => write!(f, "{x}"),
            Self::U32(x) => write!(f, "{x}"),
            Self::I32(x) => write!(f, "{x}"),
            Self::U64(x) => write!(f, "{x}"),
            Self::I64(x) => write!(f, "{x}"),
            Self::F32(x) => write!(f, "{x}"),
            Self::F64(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Symbol(s) => f.write_str(s),
            Self::Array(v) => {
                for (i, x) in v.iter().enumerate() {
                    if i != 0 {
                        f.write_str("|")?;
                    }
                    if let Some(x) = x {
                        write!(f, "{x}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Conversion from a decoded value into a Rust type.
///
/// Integer conversions succeed only when lossless.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! from_value_integer {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> Option<Self> {
                    value.as_i128().and_then(|x| <$t>::try_from(x).ok())
                }
            }
        )*
    };
}

from_value_integer!(u8, i8, u16, i16, u32, i32, u64, i64);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64().map(|x| x as f32)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(String::from)
    }
}

impl FromValue for &'static str {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Symbol(s) => Some(*s),
            _ => None,
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        value.elements().map(T::from_value).collect()
    }
}
