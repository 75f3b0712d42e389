//! Rust types as conversion targets.
//!
//! [`Convertible`] links a Rust type to the descriptor the registry
//! dispatches on, and extracts the type from the converter's output.

use std::path::PathBuf;
use std::time::Duration;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde_json::Value as JsonValue;

use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, Result};
use crate::leaf::to_json;
use crate::value::Value;

/// A Rust type the facade can convert to.
///
/// # Example
///
/// ```
/// use convert_kit::{ConversionError, Convertible, ConverterRegistry, Converter, TypeDescriptor, Value};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Celsius(f64);
///
/// impl Convertible for Celsius {
///     fn descriptor() -> TypeDescriptor {
///         TypeDescriptor::concrete("Celsius")
///     }
///
///     fn from_value(value: Value) -> Result<Self, ConversionError> {
///         value
///             .downcast_ref::<Celsius>()
///             .cloned()
///             .ok_or_else(|| ConversionError::shape(Self::descriptor(), &value))
///     }
/// }
///
/// let registry = ConverterRegistry::new();
/// registry.put_custom(Celsius::descriptor(), |_: &TypeDescriptor, v: Value| {
///     let degrees = v.to_string().trim_end_matches('C').parse::<f64>().unwrap_or(0.0);
///     Ok(Value::opaque(Celsius(degrees)))
/// });
///
/// let temp: Celsius = Converter::new(&registry).convert("21.5C").unwrap();
/// assert_eq!(temp, Celsius(21.5));
/// ```
pub trait Convertible: Sized {
    /// Descriptor the registry dispatches on.
    fn descriptor() -> TypeDescriptor;

    /// Extract `Self` from a converter's (non-null) output.
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! int_target {
    ($($ty:ty => $desc:ident),* $(,)?) => {
        $(
            impl Convertible for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::$desc
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::Int(i) => <$ty>::try_from(i).map_err(|e| {
                            ConversionError::with_cause(&TypeDescriptor::$desc, &value, e)
                        }),
                        other => Err(ConversionError::shape(TypeDescriptor::$desc, &other)),
                    }
                }
            }
        )*
    };
}

int_target!(i8 => I8, i16 => I16, i32 => I32, i64 => I64);

impl Convertible for f64 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::F64
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float(x) => Ok(x),
            other => Err(ConversionError::shape(TypeDescriptor::F64, &other)),
        }
    }
}

impl Convertible for f32 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::F32
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float(x) => Ok(x as f32),
            other => Err(ConversionError::shape(TypeDescriptor::F32, &other)),
        }
    }
}

macro_rules! variant_target {
    ($($ty:ty => $desc:ident, $variant:ident);* $(;)?) => {
        $(
            impl Convertible for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::$desc
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(ConversionError::shape(TypeDescriptor::$desc, &other)),
                    }
                }
            }
        )*
    };
}

variant_target! {
    bool => BOOL, Bool;
    char => CHAR, Char;
    String => STRING, Str;
    BigInt => BIG_INT, BigInt;
    BigDecimal => BIG_DECIMAL, Decimal;
    PathBuf => PATH, Path;
    Duration => DURATION, Duration;
}

#[cfg(feature = "url")]
variant_target! {
    url::Url => URL, Url;
}

#[cfg(feature = "time")]
variant_target! {
    chrono::DateTime<chrono::FixedOffset> => DATE_TIME, DateTime;
}

impl Convertible for JsonValue {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::JSON
    }

    fn from_value(value: Value) -> Result<Self> {
        to_json(value)
    }
}

impl<T: Convertible> Convertible for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array_of(T::descriptor())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(ConversionError::shape(Self::descriptor(), &other)),
        }
    }
}

impl<T: Convertible> Convertible for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::option_of(T::descriptor())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
