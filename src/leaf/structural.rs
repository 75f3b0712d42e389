//! Converters for `[T]` and `Option<T>` targets.
//!
//! Both recurse into the registry for the element type, so they pick up
//! custom element converters automatically.

use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, Result};
use crate::registry::{ConverterRegistry, LeafConverter};
use crate::value::Value;

/// Element-wise conversion to `[T]`.
///
/// - arrays: every element converted to `T`
/// - strings: split on the configured separator, each piece converted
///   (a blank string is an empty array)
/// - other values: a one-element array
///
/// The first failing element fails the whole conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayConverter;

impl LeafConverter for ArrayConverter {
    fn convert(
        &self,
        target: &TypeDescriptor,
        value: Value,
        registry: &ConverterRegistry,
    ) -> Result<Value> {
        let Some(element) = target.element() else {
            return Err(ConversionError::conversion(target, &value, "target is not an array type"));
        };

        let items = match value {
            Value::Null => return Ok(Value::Null),
            Value::Array(items) => items,
            Value::Str(s) => split(&s, registry),
            other => vec![other],
        };

        items
            .into_iter()
            .map(|item| registry.convert(element, item))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }
}

fn split(s: &str, registry: &ConverterRegistry) -> Vec<Value> {
    let config = registry.config();
    if s.trim().is_empty() {
        return Vec::new();
    }
    s.split(config.array_separator)
        .map(|piece| {
            let piece = if config.trim_strings { piece.trim() } else { piece };
            Value::from(piece)
        })
        .collect()
}

/// Conversion to `Option<T>`: null stays null, anything else converts to `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionConverter;

impl LeafConverter for OptionConverter {
    fn convert(
        &self,
        target: &TypeDescriptor,
        value: Value,
        registry: &ConverterRegistry,
    ) -> Result<Value> {
        let Some(inner) = target.option_inner() else {
            return Err(ConversionError::conversion(target, &value, "target is not an option type"));
        };
        if value.is_null() {
            return Ok(Value::Null);
        }
        registry.convert(inner, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;

    fn ints() -> TypeDescriptor {
        TypeDescriptor::array_of(TypeDescriptor::I32)
    }

    #[test]
    fn test_array_elements() {
        let registry = ConverterRegistry::new();
        let out = ArrayConverter
            .convert(&ints(), Value::from(vec!["1", "2", "3"]), &registry)
            .unwrap();
        assert_eq!(out, Value::from(vec![1, 2, 3]));
    }

    #[test]
    fn test_string_is_split() {
        let registry = ConverterRegistry::new();
        let out = ArrayConverter.convert(&ints(), Value::from(" 4, 5 ,6"), &registry).unwrap();
        assert_eq!(out, Value::from(vec![4, 5, 6]));

        let empty = ArrayConverter.convert(&ints(), Value::from("  "), &registry).unwrap();
        assert_eq!(empty, Value::Array(Vec::new()));
    }

    #[test]
    fn test_custom_separator() {
        let registry = ConverterRegistry::with_config(ConfigBuilder::new().array_separator(';').build());
        let out = ArrayConverter.convert(&ints(), Value::from("7;8"), &registry).unwrap();
        assert_eq!(out, Value::from(vec![7, 8]));
    }

    #[test]
    fn test_scalar_becomes_singleton() {
        let registry = ConverterRegistry::new();
        let out = ArrayConverter.convert(&ints(), Value::Float(9.0), &registry).unwrap();
        assert_eq!(out, Value::from(vec![9]));
    }

    #[test]
    fn test_first_bad_element_fails() {
        let registry = ConverterRegistry::new();
        let err = ArrayConverter
            .convert(&ints(), Value::from(vec!["1", "x", "3"]), &registry)
            .unwrap_err();
        assert_eq!(err.target(), Some(&TypeDescriptor::I32));
    }

    #[test]
    fn test_rejects_non_array_target() {
        let registry = ConverterRegistry::new();
        assert!(ArrayConverter.convert(&TypeDescriptor::I32, Value::from(1), &registry).is_err());
    }

    #[test]
    fn test_option() {
        let registry = ConverterRegistry::new();
        let target = TypeDescriptor::option_of(TypeDescriptor::BOOL);
        assert_eq!(OptionConverter.convert(&target, Value::Null, &registry).unwrap(), Value::Null);
        assert_eq!(
            OptionConverter.convert(&target, Value::from("yes"), &registry).unwrap(),
            Value::Bool(true)
        );
    }
}
