//! Prelude module for convenient imports.
//!
//! ```
//! use convert_kit::prelude::*;
//! ```

// Core types
pub use crate::{ConversionError, Convertible, ErrorKind, Result, TypeDescriptor, Value};

// Bidirectional converters
pub use crate::{string_converter, BiConverter, Transform};

// Registry
pub use crate::{ConverterRegistry, LeafConverter, LookupOrder};

// Facade
pub use crate::{
    convert, convert_or, convert_quietly, convert_quietly_opt, convert_value, Converter,
};

// Scalar helpers
pub use crate::{
    to_big_decimal, to_big_decimal_or, to_big_integer, to_big_integer_or, to_bool, to_bool_array,
    to_bool_or, to_char, to_char_or, to_double, to_double_array, to_double_or, to_int,
    to_int_array, to_int_or, to_long, to_long_array, to_long_or, to_str, to_str_array, to_str_or,
};
