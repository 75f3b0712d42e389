//! Name ↔ value converters for types with a textual form.

use std::any::Any;
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use super::converter::{BiConverter, Transform};
use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, Result};
use crate::value::Value;

/// Converter between a type's textual form and the type itself.
///
/// Forward parses with [`FromStr`]; backward renders with [`Display`]. For
/// enums whose `FromStr`/`Display` use the variant name this is a true
/// bijection over the variant names.
///
/// # Example
///
/// ```
/// use std::fmt;
/// use std::str::FromStr;
///
/// use convert_kit::string_converter;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Color { Red, Green }
///
/// impl FromStr for Color {
///     type Err = String;
///     fn from_str(s: &str) -> Result<Self, String> {
///         match s {
///             "RED" => Ok(Color::Red),
///             "GREEN" => Ok(Color::Green),
///             other => Err(format!("no color named {other}")),
///         }
///     }
/// }
///
/// impl fmt::Display for Color {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str(match self { Color::Red => "RED", Color::Green => "GREEN" })
///     }
/// }
///
/// let conv = string_converter::<Color>();
/// assert_eq!(conv.convert("RED".into()).unwrap(), Color::Red);
/// assert_eq!(conv.reverse().convert(Color::Red).unwrap(), "RED");
/// ```
pub struct StringConverter<T>(PhantomData<fn() -> T>);

impl<T> StringConverter<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::concrete(short_type_name(std::any::type_name::<T>()))
    }
}

/// Drop module paths from every segment of a type name, keeping generic
/// arguments: `alloc::vec::Vec<app::Color>` becomes `Vec<Color>`.
fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut start = 0;
    for (i, c) in full.char_indices() {
        if matches!(c, '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';') {
            out.push_str(last_segment(&full[start..i]));
            out.push(c);
            start = i + c.len_utf8();
        }
    }
    out.push_str(last_segment(&full[start..]));
    out
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

impl<T> Transform<String, T> for StringConverter<T>
where
    T: FromStr + Display + 'static,
    T::Err: Display,
{
    fn forward(&self, name: String) -> Result<T> {
        name.parse::<T>().map_err(|e| {
            ConversionError::conversion(&Self::descriptor(), &Value::Str(name.clone()), e.to_string())
        })
    }

    fn backward(&self, value: T) -> Result<String> {
        Ok(value.to_string())
    }

    /// All string converters for the same `T` are interchangeable.
    fn equivalent(&self, other: &dyn Any) -> bool {
        other.is::<Self>()
    }
}

/// Build a [`StringConverter`] for `T`.
pub fn string_converter<T>() -> BiConverter<String, T>
where
    T: FromStr + Display + 'static,
    T::Err: Display,
{
    BiConverter::new(StringConverter::<T>(PhantomData))
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;
    use crate::error::ErrorKind;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Color {
        Red,
        Green,
        Blue,
    }

    impl FromStr for Color {
        type Err = String;

        fn from_str(s: &str) -> std::result::Result<Self, String> {
            match s {
                "RED" => Ok(Self::Red),
                "GREEN" => Ok(Self::Green),
                "BLUE" => Ok(Self::Blue),
                other => Err(format!("no color named {other}")),
            }
        }
    }

    impl fmt::Display for Color {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                Self::Red => "RED",
                Self::Green => "GREEN",
                Self::Blue => "BLUE",
            })
        }
    }

    #[test]
    fn test_name_to_variant_and_back() {
        let conv = string_converter::<Color>();
        assert_eq!(conv.convert("RED".into()).unwrap(), Color::Red);
        assert_eq!(conv.reverse().convert(Color::Red).unwrap(), "RED");
    }

    #[test]
    fn test_round_trip_every_variant() {
        let conv = string_converter::<Color>();
        for color in [Color::Red, Color::Green, Color::Blue] {
            let name = conv.reverse().convert(color).unwrap();
            assert_eq!(conv.convert(name).unwrap(), color);
        }
    }

    #[test]
    fn test_unknown_name_is_conversion_error() {
        let err = string_converter::<Color>().convert("PURPLE".into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
        let msg = err.to_string();
        assert!(msg.contains("PURPLE"), "{msg}");
        assert!(msg.contains("Color"), "{msg}");
    }

    #[test]
    fn test_equal_by_configuration() {
        assert_eq!(string_converter::<Color>(), string_converter::<Color>());
        assert_eq!(
            string_converter::<Color>().reverse(),
            string_converter::<Color>().reverse()
        );
    }

    #[test]
    fn test_generic_type_names_keep_arguments() {
        assert_eq!(short_type_name("app::Color"), "Color");
        assert_eq!(short_type_name("alloc::vec::Vec<app::Color>"), "Vec<Color>");
        assert_eq!(
            short_type_name("std::collections::HashMap<alloc::string::String, i32>"),
            "HashMap<String, i32>"
        );
        assert_eq!(
            StringConverter::<Option<Color>>::descriptor(),
            TypeDescriptor::concrete("Option<Color>")
        );
    }

    #[test]
    fn test_parses_numbers_too() {
        let conv = string_converter::<u16>();
        assert_eq!(conv.convert("8080".into()).unwrap(), 8080);
        assert!(conv.convert("70000".into()).is_err());
    }
}
