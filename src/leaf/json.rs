//! JSON converter and `Value` → `serde_json::Value` mapping.

use serde_json::{Map, Number, Value as JsonValue};

use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, Result};
use crate::registry::{ConverterRegistry, LeafConverter};
use crate::value::Value;

/// Converts any value to a JSON-shaped value.
///
/// A top-level string is parsed as JSON text. Everything else is mapped
/// structurally; types without a JSON counterpart (paths, URLs, decimals,
/// timestamps) become their string form.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConverter;

impl LeafConverter for JsonConverter {
    fn convert(
        &self,
        target: &TypeDescriptor,
        value: Value,
        _registry: &ConverterRegistry,
    ) -> Result<Value> {
        match value {
            Value::Str(ref s) => serde_json::from_str::<JsonValue>(s)
                .map(Value::from)
                .map_err(|e| ConversionError::with_cause(target, &value, e)),
            other => normalize(target, other),
        }
    }
}

fn normalize(target: &TypeDescriptor, value: Value) -> Result<Value> {
    Ok(match value {
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Str(_) => value,
        Value::Float(x) if x.is_finite() => value,
        Value::Float(_) => {
            return Err(ConversionError::conversion(target, &value, "non-finite float"));
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| normalize(target, item))
                .collect::<Result<_>>()?,
        ),
        Value::Map(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| Ok((k, normalize(target, v)?)))
                .collect::<Result<_>>()?,
        ),
        Value::BigInt(ref i) => match i64::try_from(i) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Str(i.to_string()),
        },
        Value::Opaque(_) => {
            return Err(ConversionError::conversion(target, &value, "no JSON form"));
        }
        other => Value::Str(other.to_string()),
    })
}

/// Map a JSON-shaped value to `serde_json::Value`.
///
/// Fails with [`ConversionError::Shape`] on anything [`JsonConverter`] would
/// not produce.
pub fn to_json(value: Value) -> Result<JsonValue> {
    Ok(match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(b),
        Value::Int(i) => JsonValue::Number(i.into()),
        Value::Float(x) => match Number::from_f64(x) {
            Some(n) => JsonValue::Number(n),
            None => return Err(ConversionError::shape(TypeDescriptor::JSON, &value)),
        },
        Value::Str(s) => JsonValue::String(s),
        Value::Array(items) => {
            JsonValue::Array(items.into_iter().map(to_json).collect::<Result<_>>()?)
        }
        Value::Map(map) => JsonValue::Object(
            map.into_iter()
                .map(|(k, v)| Ok((k, to_json(v)?)))
                .collect::<Result<Map<_, _>>>()?,
        ),
        other => return Err(ConversionError::shape(TypeDescriptor::JSON, &other)),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_string_is_parsed_as_json_text() {
        let registry = ConverterRegistry::new();
        let out = JsonConverter
            .convert(&TypeDescriptor::JSON, Value::from(r#"{"a": [1, 2]}"#), &registry)
            .unwrap();
        assert_eq!(to_json(out).unwrap(), json!({"a": [1, 2]}));
    }

    #[test]
    fn test_invalid_json_text_keeps_cause() {
        use std::error::Error;

        let registry = ConverterRegistry::new();
        let err = JsonConverter
            .convert(&TypeDescriptor::JSON, Value::from("{oops"), &registry)
            .unwrap_err();
        assert!(err.source().is_some());
    }

    #[test]
    fn test_structural_values_are_normalized() {
        let registry = ConverterRegistry::new();
        let input = Value::from(vec![Value::Char('x'), Value::from(std::path::PathBuf::from("/tmp"))]);
        let out = JsonConverter.convert(&TypeDescriptor::JSON, input, &registry).unwrap();
        assert_eq!(to_json(out).unwrap(), json!(["x", "/tmp"]));
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        let registry = ConverterRegistry::new();
        assert!(JsonConverter
            .convert(&TypeDescriptor::JSON, Value::Float(f64::NAN), &registry)
            .is_err());
    }
}
