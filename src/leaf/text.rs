//! Text-like converters: strings, characters, booleans.

use super::prepare;
use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, Result};
use crate::registry::{ConverterRegistry, LeafConverter};
use crate::value::Value;

/// Renders any value as a string. Strings pass through untouched, arrays
/// are joined with the configured separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextConverter;

impl LeafConverter for TextConverter {
    fn convert(
        &self,
        _target: &TypeDescriptor,
        value: Value,
        registry: &ConverterRegistry,
    ) -> Result<Value> {
        Ok(match value {
            Value::Null => Value::Null,
            Value::Str(s) => Value::Str(s),
            Value::Array(items) => {
                let separator = registry.config().array_separator.to_string();
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                Value::Str(parts.join(&separator))
            }
            other => Value::Str(other.to_string()),
        })
    }
}

/// Converts to a single `char`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharConverter;

impl LeafConverter for CharConverter {
    fn convert(
        &self,
        target: &TypeDescriptor,
        value: Value,
        _registry: &ConverterRegistry,
    ) -> Result<Value> {
        let parsed = match &value {
            Value::Null => return Ok(Value::Null),
            Value::Char(c) => Some(*c),
            Value::Str(s) if s.is_empty() => return Ok(Value::Null),
            Value::Str(s) => single_char(s).or_else(|| single_char(s.trim())),
            Value::Int(i) => u32::try_from(*i).ok().and_then(char::from_u32),
            _ => None,
        };
        parsed
            .map(Value::Char)
            .ok_or_else(|| ConversionError::conversion(target, &value, "not a single character"))
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Converts to `bool`.
///
/// Numbers are `true` when non-zero. Strings are matched case-insensitively
/// against [`parse_bool`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolConverter;

impl LeafConverter for BoolConverter {
    fn convert(
        &self,
        target: &TypeDescriptor,
        value: Value,
        registry: &ConverterRegistry,
    ) -> Result<Value> {
        let parsed = match &value {
            Value::Null => return Ok(Value::Null),
            Value::Str(s) if s.trim().is_empty() => return Ok(Value::Null),
            Value::Bool(b) => Some(*b),
            Value::Int(i) => Some(*i != 0),
            Value::Float(x) => Some(*x != 0.0),
            Value::BigInt(i) => Some(i.sign() != num_bigint::Sign::NoSign),
            Value::Char(c) => parse_bool(c.encode_utf8(&mut [0; 4])),
            Value::Str(s) => parse_bool(prepare(s, registry)),
            _ => None,
        };
        parsed
            .map(Value::Bool)
            .ok_or_else(|| ConversionError::conversion(target, &value, "not a boolean"))
    }
}

/// Parse a boolean word.
///
/// - true: `true`, `yes`, `y`, `t`, `on`, `1`
/// - false: `false`, `no`, `n`, `f`, `off`, `0`
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "t" | "on" | "1" => Some(true),
        "false" | "no" | "n" | "f" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_words() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_array_is_joined() {
        let registry = ConverterRegistry::new();
        let out = TextConverter
            .convert(&TypeDescriptor::STRING, Value::from(vec![1, 2, 3]), &registry)
            .unwrap();
        assert_eq!(out, Value::from("1,2,3"));
    }

    #[test]
    fn test_single_char() {
        assert_eq!(single_char("a"), Some('a'));
        assert_eq!(single_char("好"), Some('好'));
        assert_eq!(single_char("ab"), None);
        assert_eq!(single_char(""), None);
    }
}
