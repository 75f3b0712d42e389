//! End-to-end scenarios across the facade, registry and bidirectional layer.

use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::bidi::{BiConverter, string_converter};
use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, ErrorKind, Result};
use crate::facade::Converter;
use crate::registry::ConverterRegistry;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Green,
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "RED" => Ok(Self::Red),
            "GREEN" => Ok(Self::Green),
            other => Err(format!("unknown color {other}")),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Red => "RED",
            Self::Green => "GREEN",
        })
    }
}

#[test]
fn integer_text() {
    let registry = ConverterRegistry::new();
    assert_eq!(Converter::new(&registry).convert::<i32>("42").unwrap(), 42);
}

#[test]
fn bad_integer_text() {
    let registry = ConverterRegistry::new();
    let c = Converter::new(&registry);
    assert_eq!(c.convert::<i32>("abc").unwrap_err().kind(), ErrorKind::Conversion);
    assert_eq!(c.convert_quietly::<i32>("abc", -1), -1);
}

#[test]
fn enum_names() {
    let colors = string_converter::<Color>();
    assert_eq!(colors.convert("RED".to_owned()).unwrap(), Color::Red);
    assert_eq!(colors.reverse().convert(Color::Red).unwrap(), "RED");
    assert!(colors.convert("PURPLE".to_owned()).is_err());
    assert_eq!(colors, string_converter::<Color>());
}

#[test]
fn custom_yes_no_shadows_builtin_bool() {
    let registry = ConverterRegistry::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);

    registry.put_custom(TypeDescriptor::BOOL, move |target: &TypeDescriptor, v: Value| -> Result<Value> {
        seen.fetch_add(1, Ordering::SeqCst);
        match v.as_str() {
            Some("yes") => Ok(Value::Bool(true)),
            Some("no") => Ok(Value::Bool(false)),
            _ => Err(ConversionError::conversion(target, &v, "expected yes or no")),
        }
    });

    assert!(Converter::new(&registry).convert::<bool>("yes").unwrap());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(registry.builtin(&TypeDescriptor::BOOL).is_some());
}

#[test]
fn identity_chain_behaves_like_the_converter() {
    let x = string_converter::<Color>();
    let chained = BiConverter::<String, String>::identity().and_then(&x);

    for name in ["RED", "GREEN", "BLUE"] {
        let expected = x.convert(name.to_owned()).ok();
        assert_eq!(chained.convert(name.to_owned()).ok(), expected);
    }
    assert!(chained.same_as(&x));
}
