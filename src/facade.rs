//! Typed conversion facade.
//!
//! [`Converter`] is a borrowed view over a [`ConverterRegistry`] that turns
//! registry results into Rust types. The free functions in this module do
//! the same over [`ConverterRegistry::global`].
//!
//! # Failure modes
//!
//! | Call | Null input / null result | Conversion error |
//! |------|--------------------------|------------------|
//! | [`convert`](Converter::convert) | `Err` | `Err` |
//! | [`convert_or`](Converter::convert_or) | `Ok(default)` | `Err` |
//! | [`convert_quietly`](Converter::convert_quietly) | `default` | `default` |
//! | [`convert_quietly_opt`](Converter::convert_quietly_opt) | `None` | `None` |
//!
//! [`convert_with_check`](Converter::convert_with_check) exposes the shared
//! path directly, with an explicit quiet flag.
//! The scalar helpers (`to_int`, `to_bool`, ...) are quiet.
//!
//! # Example
//!
//! ```
//! use convert_kit::{convert, convert_quietly, to_int_or};
//!
//! assert_eq!(convert::<i32>("42").unwrap(), 42);
//! assert!(convert::<i32>("abc").is_err());
//! assert_eq!(convert_quietly::<i32>("abc", -1), -1);
//! assert_eq!(to_int_or(" 7 ", 0), 7);
//! ```

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, ErrorKind, Result};
use crate::registry::ConverterRegistry;
use crate::target::Convertible;
use crate::value::Value;

/// Typed entry point over a registry.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'r> {
    registry: &'r ConverterRegistry,
}

impl<'r> Converter<'r> {
    /// View over `registry`.
    pub fn new(registry: &'r ConverterRegistry) -> Self {
        Self { registry }
    }

    /// The registry conversions are dispatched to.
    pub fn registry(&self) -> &'r ConverterRegistry {
        self.registry
    }

    /// Untyped conversion, for descriptors without a Rust type.
    pub fn convert_value(&self, target: &TypeDescriptor, value: impl Into<Value>) -> Result<Value> {
        self.registry.convert(target, value)
    }

    /// Convert `value` to `T`.
    ///
    /// Fails when no converter exists, the converter rejects the value, or
    /// nothing is produced (null input, blank string).
    pub fn convert<T: Convertible>(&self, value: impl Into<Value>) -> Result<T> {
        let value = value.into();
        self.dispatch(&value, false)?.ok_or_else(|| {
            ConversionError::conversion(&T::descriptor(), &value, "conversion produced no value")
        })
    }

    /// Convert `value` to `T`, returning `default` when nothing is produced.
    ///
    /// Errors still propagate; `default` is not a fallback for them.
    pub fn convert_or<T: Convertible>(&self, value: impl Into<Value>, default: T) -> Result<T> {
        Ok(self.dispatch(&value.into(), false)?.unwrap_or(default))
    }

    /// Convert `value` to `T`, substituting `default` on any failure.
    pub fn convert_quietly<T: Convertible>(&self, value: impl Into<Value>, default: T) -> T {
        self.convert_quietly_opt(value).unwrap_or(default)
    }

    /// Convert `value` to `T`, `None` on any failure.
    pub fn convert_quietly_opt<T: Convertible>(&self, value: impl Into<Value>) -> Option<T> {
        self.dispatch(&value.into(), true).ok().flatten()
    }

    /// Convert `value` to `T`.
    ///
    /// Null input and null converter output yield `default`. When `quiet`
    /// is set, errors are swallowed and `default` is returned as well.
    pub fn convert_with_check<T: Convertible>(
        &self,
        value: impl Into<Value>,
        default: Option<T>,
        quiet: bool,
    ) -> Result<Option<T>> {
        Ok(self.dispatch(&value.into(), quiet)?.or(default))
    }

    /// Shared implementation of every typed conversion. `Ok(None)` means
    /// nothing was produced, or an error was swallowed in quiet mode.
    ///
    /// A converter output `T` can not hold is reported against `value`.
    fn dispatch<T: Convertible>(&self, value: &Value, quiet: bool) -> Result<Option<T>> {
        if value.is_null() {
            return Ok(None);
        }

        let target = T::descriptor();
        let converted = self
            .registry
            .convert_with_order(&target, value.clone(), self.registry.config().lookup_order)
            .and_then(|out| match out {
                Value::Null => Ok(None),
                out => T::from_value(out).map(Some).map_err(|e| match e {
                    shape @ ConversionError::Shape { .. } => {
                        ConversionError::with_cause(&target, value, shape)
                    }
                    other => other,
                }),
            });

        match converted {
            Err(e) if quiet => {
                self.suppressed(&target, &e);
                Ok(None)
            }
            other => other,
        }
    }

    fn suppressed(&self, target: &TypeDescriptor, error: &ConversionError) {
        if error.kind() == ErrorKind::ContractViolation {
            tracing::error!(%target, %error, "converter contract violated during quiet conversion");
        } else if self.registry.config().log_suppressed {
            tracing::debug!(%target, %error, "suppressed conversion failure");
        }
    }
}

impl Converter<'static> {
    /// View over the process-wide registry.
    pub fn global() -> Self {
        Self::new(ConverterRegistry::global())
    }
}

impl Default for Converter<'static> {
    fn default() -> Self {
        Self::global()
    }
}

// =============================================================================
// Free functions over the global registry
// =============================================================================

/// [`Converter::convert_value`] over the global registry.
pub fn convert_value(target: &TypeDescriptor, value: impl Into<Value>) -> Result<Value> {
    Converter::global().convert_value(target, value)
}

/// [`Converter::convert`] over the global registry.
pub fn convert<T: Convertible>(value: impl Into<Value>) -> Result<T> {
    Converter::global().convert(value)
}

/// [`Converter::convert_or`] over the global registry.
pub fn convert_or<T: Convertible>(value: impl Into<Value>, default: T) -> Result<T> {
    Converter::global().convert_or(value, default)
}

/// [`Converter::convert_quietly`] over the global registry.
pub fn convert_quietly<T: Convertible>(value: impl Into<Value>, default: T) -> T {
    Converter::global().convert_quietly(value, default)
}

/// [`Converter::convert_quietly_opt`] over the global registry.
pub fn convert_quietly_opt<T: Convertible>(value: impl Into<Value>) -> Option<T> {
    Converter::global().convert_quietly_opt(value)
}

/// [`Converter::convert_with_check`] over the global registry.
pub fn convert_with_check<T: Convertible>(
    value: impl Into<Value>,
    default: Option<T>,
    quiet: bool,
) -> Result<Option<T>> {
    Converter::global().convert_with_check(value, default, quiet)
}

// =============================================================================
// Scalar helpers
// =============================================================================

macro_rules! scalar_helpers {
    ($($ty:ty => $name:ident, $name_or:ident, $array:ident);* $(;)?) => {
        impl Converter<'_> {
            $(
                #[doc = concat!("Quietly convert to `", stringify!($ty), "`, `None` on failure.")]
                pub fn $name(&self, value: impl Into<Value>) -> Option<$ty> {
                    self.convert_quietly_opt(value)
                }

                #[doc = concat!("Quietly convert to `", stringify!($ty), "`, `default` on failure.")]
                pub fn $name_or(&self, value: impl Into<Value>, default: $ty) -> $ty {
                    self.convert_quietly(value, default)
                }

                #[doc = concat!("Quietly convert to `Vec<", stringify!($ty), ">`, `None` on failure.")]
                pub fn $array(&self, value: impl Into<Value>) -> Option<Vec<$ty>> {
                    self.convert_quietly_opt(value)
                }
            )*
        }

        $(
            #[doc = concat!("[`Converter::", stringify!($name), "`] over the global registry.")]
            pub fn $name(value: impl Into<Value>) -> Option<$ty> {
                Converter::global().$name(value)
            }

            #[doc = concat!("[`Converter::", stringify!($name_or), "`] over the global registry.")]
            pub fn $name_or(value: impl Into<Value>, default: $ty) -> $ty {
                Converter::global().$name_or(value, default)
            }

            #[doc = concat!("[`Converter::", stringify!($array), "`] over the global registry.")]
            pub fn $array(value: impl Into<Value>) -> Option<Vec<$ty>> {
                Converter::global().$array(value)
            }
        )*
    };
}

scalar_helpers! {
    i32 => to_int, to_int_or, to_int_array;
    i64 => to_long, to_long_or, to_long_array;
    i16 => to_short, to_short_or, to_short_array;
    i8 => to_byte, to_byte_or, to_byte_array;
    f64 => to_double, to_double_or, to_double_array;
    f32 => to_float, to_float_or, to_float_array;
    char => to_char, to_char_or, to_char_array;
    bool => to_bool, to_bool_or, to_bool_array;
    String => to_str, to_str_or, to_str_array;
    BigDecimal => to_big_decimal, to_big_decimal_or, to_big_decimal_array;
    BigInt => to_big_integer, to_big_integer_or, to_big_integer_array;
}
