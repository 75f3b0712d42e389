//! Shared converters and strategies for the law tests.

use proptest::prelude::*;

use crate::bidi::BiConverter;
use crate::value::Value;

/// `a -> a + n`, wrapping.
pub fn shift(n: i64) -> BiConverter<i64, i64> {
    BiConverter::from_fns(move |a: i64| Some(a.wrapping_add(n)), move |b: i64| Some(b.wrapping_sub(n)))
}

/// `a -> !a`, bitwise.
pub fn flip() -> BiConverter<i64, i64> {
    BiConverter::from_fns(|a: i64| Some(!a), |b: i64| Some(!b))
}

/// Integer <-> decimal text.
pub fn decimal() -> BiConverter<i64, String> {
    crate::bidi::string_converter::<i64>().reverse()
}

/// Text the scalar converters may or may not accept.
pub fn messy_text() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[ ]{0,2}[-+]?[0-9_,]{0,12}(\\.[0-9]{0,4})?[ ]{0,2}",
        "[-+]?(0x|0X)[-+]?[0-9a-fA-F]{0,18}",
        "[-+]?[0-9]{1,3}(\\.[0-9]{0,3})?[eE][-+]?[0-9]{1,9}",
        "(true|false|yes|no|on|off|y|n|t|f|maybe)",
        "P(T[0-9]{1,3}[HMS])?",
    ]
}

/// Dynamic values of every scalar shape, plus flat arrays of them.
pub fn any_value() -> impl Strategy<Value = Value> {
    let scalar = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<char>().prop_map(Value::Char),
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_map(Value::Float),
        messy_text().prop_map(Value::Str),
    ]
    .boxed();
    prop_oneof![
        4 => scalar.clone(),
        1 => prop::collection::vec(scalar, 0..5).prop_map(Value::Array),
    ]
}
