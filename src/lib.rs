//! # convert-kit
//!
//! Type-directed value conversion with a runtime converter registry.
//!
//! The crate has three layers:
//!
//! - **Bidirectional converters**: [`BiConverter<A, B>`] is a reversible,
//!   composable mapping. `c.reverse().reverse()` is `c` itself, chaining is
//!   associative, and chaining with [`BiConverter::identity`] is free.
//! - **Registry**: [`ConverterRegistry`] dispatches a dynamic [`Value`] to a
//!   [`LeafConverter`] chosen by [`TypeDescriptor`]. User converters
//!   registered with [`put_custom`](ConverterRegistry::put_custom) shadow the
//!   built-ins (or fill gaps, see [`LookupOrder`]).
//! - **Facade**: [`convert`], [`convert_quietly`] and the scalar helpers
//!   ([`to_int`], [`to_bool`], ...) turn registry results into Rust types.
//!
//! ## Quick Start
//!
//! ```
//! use convert_kit::prelude::*;
//!
//! // Checked: errors propagate
//! assert_eq!(convert::<i32>("42").unwrap(), 42);
//! assert!(convert::<i32>("abc").is_err());
//!
//! // Quiet: the default replaces any failure
//! assert_eq!(convert_quietly::<i32>("abc", -1), -1);
//! assert_eq!(to_bool_array("yes, no"), Some(vec![true, false]));
//!
//! // Custom converters shadow built-ins on their own registry
//! let registry = ConverterRegistry::new();
//! registry.put_custom(TypeDescriptor::BOOL, |target: &TypeDescriptor, v: Value| {
//!     match v.as_str() {
//!         Some("ja") => Ok(Value::Bool(true)),
//!         Some("nein") => Ok(Value::Bool(false)),
//!         _ => Err(ConversionError::conversion(target, &v, "expected ja or nein")),
//!     }
//! });
//! assert!(Converter::new(&registry).convert::<bool>("ja").unwrap());
//!
//! // Bidirectional converters compose
//! let text = string_converter::<i64>();
//! let double = BiConverter::from_fns(|n: i64| n.checked_mul(2), |n: i64| Some(n / 2));
//! let chain = text.and_then(&double);
//! assert_eq!(chain.convert("21".to_owned()).unwrap(), 42);
//! assert_eq!(chain.convert_back(42).unwrap(), "21");
//! ```
//!
//! ## Modules
//!
//! - [`bidi`]: bidirectional converters
//! - [`registry`]: the converter registry and the [`LeafConverter`] contract
//! - [`leaf`]: built-in leaf converters and their parsers
//! - [`facade`]: typed conversion and scalar helpers
//! - [`config`]: runtime configuration (lookup order, whitespace, separators)
//!
//! ## Features
//!
//! - `url` (default): [`url::Url`] targets
//! - `time` (default): [`chrono`] date-time targets

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bidi;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod facade;
pub mod leaf;
pub mod prelude;
pub mod registry;
pub mod target;
pub mod value;

mod laws;

// =============================================================================
// Core types
// =============================================================================

pub use descriptor::TypeDescriptor;
pub use error::{ConversionError, Direction, ErrorKind, Result};
pub use target::Convertible;
pub use value::{Opaque, Value};

// =============================================================================
// Bidirectional converters
// =============================================================================

pub use bidi::{string_converter, BiConverter, ConvertAll, StringConverter, Transform};

// =============================================================================
// Registry
// =============================================================================

pub use registry::{ConverterRegistry, LeafConverter, SharedConverter};

// =============================================================================
// Facade
// =============================================================================

pub use facade::{
    convert, convert_or, convert_quietly, convert_quietly_opt, convert_value, convert_with_check,
    Converter,
};
pub use facade::{
    to_big_decimal, to_big_decimal_array, to_big_decimal_or, to_big_integer, to_big_integer_array,
    to_big_integer_or, to_bool, to_bool_array, to_bool_or, to_byte, to_byte_array, to_byte_or,
    to_char, to_char_array, to_char_or, to_double, to_double_array, to_double_or, to_float,
    to_float_array, to_float_or, to_int, to_int_array, to_int_or, to_long, to_long_array,
    to_long_or, to_short, to_short_array, to_short_or, to_str, to_str_array, to_str_or,
};

// =============================================================================
// Infrastructure
// =============================================================================

pub use config::{Config, ConfigBuilder, LookupOrder};
