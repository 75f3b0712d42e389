//! Built-in leaf converters.
//!
//! Each converter handles one family of targets and maps [`Value::Null`]
//! (and, for parsed types, blank strings) to null.
//!
//! # Modules
//!
//! - [`number`] - fixed-width integers, floats, big integers, decimals
//! - [`text`] - strings, chars, booleans
//! - [`location`] - paths and URLs
//! - [`time`] - durations and timestamps
//! - [`json`] - JSON documents
//! - [`structural`] - arrays and options

mod json;
mod location;
mod number;
mod structural;
mod text;
mod time;

use crate::registry::ConverterRegistry;

#[cfg(test)]
use crate::value::Value;

// Numbers
pub use number::{
    parse_big_int, parse_decimal, parse_float, parse_integer, BigIntConverter, DecimalConverter,
    FloatConverter, IntConverter, IntWidth,
};

// Text
pub use text::{parse_bool, BoolConverter, CharConverter, TextConverter};

// Locations
pub use location::PathConverter;
#[cfg(feature = "url")]
pub use location::UrlConverter;

// Time
pub use time::{parse_iso_duration, DurationConverter};
#[cfg(feature = "time")]
pub use time::{parse_date_time, DateTimeConverter};

// JSON
pub use json::{to_json, JsonConverter};

// Structural
pub use structural::{ArrayConverter, OptionConverter};

/// Apply the registry's whitespace policy to a string input.
fn prepare<'a>(s: &'a str, registry: &ConverterRegistry) -> &'a str {
    if registry.config().trim_strings {
        s.trim()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::descriptor::TypeDescriptor;

    #[test]
    fn test_trim_policy() {
        let trimming = ConverterRegistry::new();
        assert_eq!(
            trimming.convert(&TypeDescriptor::I32, " 12 ").unwrap(),
            Value::Int(12)
        );

        let strict = ConverterRegistry::with_config(ConfigBuilder::new().trim_strings(false).build());
        assert!(strict.convert(&TypeDescriptor::I32, " 12 ").is_err());
    }
}
