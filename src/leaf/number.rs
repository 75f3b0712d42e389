//! Numeric converters: fixed-width integers, floats, big integers, decimals.
//!
//! String parsing accepts:
//! - plain decimal: `42`, `-7`, `+3`
//! - digit grouping: `1_000`, `1,000`
//! - hex: `0x1F`, `-0xff`
//! - fractional or exponent forms, truncated toward zero for integers: `1.9` → `1`, `1e3` → `1000`

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};

use super::prepare;
use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, Result};
use crate::registry::{ConverterRegistry, LeafConverter};
use crate::value::Value;

/// Width of a fixed-size integer target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
}

impl IntWidth {
    fn bounds(self) -> (i64, i64) {
        match self {
            Self::I8 => (i64::from(i8::MIN), i64::from(i8::MAX)),
            Self::I16 => (i64::from(i16::MIN), i64::from(i16::MAX)),
            Self::I32 => (i64::from(i32::MIN), i64::from(i32::MAX)),
            Self::I64 => (i64::MIN, i64::MAX),
        }
    }
}

/// Converts to a fixed-width integer, rejecting out-of-range input.
#[derive(Debug, Clone, Copy)]
pub struct IntConverter {
    width: IntWidth,
}

impl IntConverter {
    /// Converter for `width`.
    pub const fn new(width: IntWidth) -> Self {
        Self { width }
    }
}

impl LeafConverter for IntConverter {
    fn convert(
        &self,
        target: &TypeDescriptor,
        value: Value,
        registry: &ConverterRegistry,
    ) -> Result<Value> {
        let parsed = match &value {
            Value::Null => return Ok(Value::Null),
            Value::Str(s) if s.trim().is_empty() => return Ok(Value::Null),
            Value::Int(i) => Some(*i),
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Char(c) => c.to_digit(10).map(i64::from),
            Value::Float(x) => float_to_i64(*x),
            Value::BigInt(i) => i.to_i64(),
            Value::Decimal(d) => truncate(d, I64_DIGITS).and_then(|i| i.to_i64()),
            Value::Str(s) => parse_integer(prepare(s, registry)),
            Value::Duration(d) => i64::try_from(d.as_millis()).ok(),
            #[cfg(feature = "time")]
            Value::DateTime(t) => Some(t.timestamp_millis()),
            _ => return Err(ConversionError::conversion(target, &value, "not a number")),
        };
        let n = parsed.ok_or_else(|| ConversionError::conversion(target, &value, "not an integer"))?;

        let (min, max) = self.width.bounds();
        if n < min || n > max {
            return Err(ConversionError::conversion(
                target,
                &value,
                format!("{n} is out of range [{min}, {max}]"),
            ));
        }
        Ok(Value::Int(n))
    }
}

/// Converts to `f32` or `f64`.
#[derive(Debug, Clone, Copy)]
pub struct FloatConverter {
    single: bool,
}

impl FloatConverter {
    /// `f32` target.
    pub const F32: Self = Self { single: true };
    /// `f64` target.
    pub const F64: Self = Self { single: false };
}

impl LeafConverter for FloatConverter {
    fn convert(
        &self,
        target: &TypeDescriptor,
        value: Value,
        registry: &ConverterRegistry,
    ) -> Result<Value> {
        let parsed = match &value {
            Value::Null => return Ok(Value::Null),
            Value::Str(s) if s.trim().is_empty() => return Ok(Value::Null),
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::BigInt(i) => i.to_f64(),
            Value::Decimal(d) => d.to_f64(),
            Value::Str(s) => parse_float(prepare(s, registry)),
            Value::Duration(d) => Some(d.as_secs_f64()),
            _ => return Err(ConversionError::conversion(target, &value, "not a number")),
        };
        let x = parsed.ok_or_else(|| ConversionError::conversion(target, &value, "not a float"))?;

        if self.single {
            if x.is_finite() && x.abs() > f64::from(f32::MAX) {
                return Err(ConversionError::conversion(target, &value, "out of range for f32"));
            }
            return Ok(Value::Float(f64::from(x as f32)));
        }
        Ok(Value::Float(x))
    }
}

/// Converts to an arbitrary-precision integer, truncating fractions.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigIntConverter;

impl LeafConverter for BigIntConverter {
    fn convert(
        &self,
        target: &TypeDescriptor,
        value: Value,
        registry: &ConverterRegistry,
    ) -> Result<Value> {
        let parsed = match &value {
            Value::Null => return Ok(Value::Null),
            Value::Str(s) if s.trim().is_empty() => return Ok(Value::Null),
            Value::BigInt(i) => Some(i.clone()),
            Value::Int(i) => Some(BigInt::from(*i)),
            Value::Bool(b) => Some(BigInt::from(u8::from(*b))),
            Value::Float(x) if x.is_finite() => BigInt::from_f64(x.trunc()),
            Value::Decimal(d) => truncate(d, MAX_BIG_INT_DIGITS),
            Value::Str(s) => parse_big_int(prepare(s, registry)),
            _ => return Err(ConversionError::conversion(target, &value, "not a number")),
        };
        parsed
            .map(Value::BigInt)
            .ok_or_else(|| ConversionError::conversion(target, &value, "not an integer"))
    }
}

/// Converts to an arbitrary-precision decimal.
///
/// Floats go through their shortest decimal rendering, so `0.1` becomes
/// exactly `0.1` rather than its binary expansion.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalConverter;

impl LeafConverter for DecimalConverter {
    fn convert(
        &self,
        target: &TypeDescriptor,
        value: Value,
        registry: &ConverterRegistry,
    ) -> Result<Value> {
        let parsed = match &value {
            Value::Null => return Ok(Value::Null),
            Value::Str(s) if s.trim().is_empty() => return Ok(Value::Null),
            Value::Decimal(d) => Some(d.clone()),
            Value::Int(i) => Some(BigDecimal::from(*i)),
            Value::Bool(b) => Some(BigDecimal::from(u8::from(*b))),
            Value::BigInt(i) => Some(BigDecimal::new(i.clone(), 0)),
            Value::Float(x) if x.is_finite() => BigDecimal::from_str(&x.to_string()).ok(),
            Value::Str(s) => parse_decimal(prepare(s, registry)),
            _ => return Err(ConversionError::conversion(target, &value, "not a number")),
        };
        parsed
            .map(Value::Decimal)
            .ok_or_else(|| ConversionError::conversion(target, &value, "not a decimal"))
    }
}

// =============================================================================
// Parsers
// =============================================================================

/// Parse an integer literal, truncating fractional forms.
///
/// # Examples
/// ```
/// use convert_kit::leaf::parse_integer;
///
/// assert_eq!(parse_integer("1_000"), Some(1000));
/// assert_eq!(parse_integer("0x1F"), Some(31));
/// assert_eq!(parse_integer("-2.7"), Some(-2));
/// assert_eq!(parse_integer("abc"), None);
/// ```
pub fn parse_integer(s: &str) -> Option<i64> {
    let cleaned = strip_grouping(s);
    if cleaned.is_empty() {
        return None;
    }

    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };
    if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        // `from_str_radix` takes its own sign; only bare hex digits are valid here
        if !hex.starts_with(|c: char| c.is_ascii_hexdigit()) {
            return None;
        }
        let n = i128::from(u64::from_str_radix(hex, 16).ok()?);
        return i64::try_from(if negative { -n } else { n }).ok();
    }

    if let Ok(n) = cleaned.parse::<i64>() {
        return Some(n);
    }
    float_to_i64(cleaned.parse::<f64>().ok()?)
}

/// Parse a float literal, ignoring digit grouping.
pub fn parse_float(s: &str) -> Option<f64> {
    let cleaned = strip_grouping(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Parse an arbitrary-precision integer, truncating fractional forms.
pub fn parse_big_int(s: &str) -> Option<BigInt> {
    let cleaned = strip_grouping(s);
    if let Ok(i) = BigInt::from_str(cleaned.strip_prefix('+').unwrap_or(&cleaned)) {
        return Some(i);
    }
    if let Some(n) = parse_integer(&cleaned) {
        return Some(BigInt::from(n));
    }
    truncate(&BigDecimal::from_str(&cleaned).ok()?, MAX_BIG_INT_DIGITS)
}

/// Parse an arbitrary-precision decimal.
pub fn parse_decimal(s: &str) -> Option<BigDecimal> {
    let cleaned = strip_grouping(s);
    BigDecimal::from_str(cleaned.strip_prefix('+').unwrap_or(&cleaned)).ok()
}

fn strip_grouping(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '_' | ',')).collect()
}

fn float_to_i64(x: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it overflows.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let t = x.trunc();
    if !t.is_finite() || t >= LIMIT || t < -LIMIT {
        return None;
    }
    Some(t as i64)
}

/// Decimal digits of the largest `i64`, rounded up.
const I64_DIGITS: i64 = 20;

/// Longest integer part `BigInt` conversions will expand.
const MAX_BIG_INT_DIGITS: i64 = 10_000;

/// Integer part of `d`, or `None` when it has more than `max_digits` digits.
///
/// The digit count is estimated from the exponent before rescaling, so a
/// short input such as `1e30000000` is rejected without being expanded.
fn truncate(d: &BigDecimal, max_digits: i64) -> Option<BigInt> {
    let (mantissa, scale) = d.as_bigint_and_exponent();
    let mantissa_digits = (mantissa.bits() as f64 * std::f64::consts::LOG10_2) as i64 + 1;
    let integer_digits = mantissa_digits.saturating_sub(scale);
    if integer_digits <= 0 {
        return Some(BigInt::from(0));
    }
    if integer_digits > max_digits {
        return None;
    }
    Some(d.with_scale(0).into_bigint_and_exponent().0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_forms() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer("+42"), Some(42));
        assert_eq!(parse_integer("-42"), Some(-42));
        assert_eq!(parse_integer("1,234,567"), Some(1_234_567));
        assert_eq!(parse_integer("-0xff"), Some(-255));
        assert_eq!(parse_integer("1e3"), Some(1000));
        assert_eq!(parse_integer("3.99"), Some(3));
    }

    #[test]
    fn test_parse_integer_rejects() {
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("abc"), None);
        assert_eq!(parse_integer("NaN"), None);
        assert_eq!(parse_integer("1e40"), None);
        assert_eq!(parse_integer("0xZZ"), None);
    }

    #[test]
    fn test_hex_takes_one_sign() {
        assert_eq!(parse_integer("0x-1F"), None);
        assert_eq!(parse_integer("0x+1F"), None);
        assert_eq!(parse_integer("-0x-8000000000000000"), None);
        assert_eq!(parse_integer("-0x8000000000000000"), Some(i64::MIN));
        assert_eq!(parse_integer("0x8000000000000000"), None);
    }

    #[test]
    fn test_huge_exponent_is_not_expanded() {
        assert_eq!(parse_big_int("1e30000000"), None);
        assert_eq!(parse_big_int("1e-30000000"), Some(BigInt::from(0)));
        assert_eq!(parse_big_int("12.5e2"), Some(BigInt::from(1250)));

        let registry = ConverterRegistry::new();
        let huge = Value::Decimal(BigDecimal::from_str("1e30000000").unwrap());
        assert!(IntConverter::new(IntWidth::I64)
            .convert(&TypeDescriptor::I64, huge.clone(), &registry)
            .is_err());
        assert!(BigIntConverter.convert(&TypeDescriptor::BIG_INT, huge, &registry).is_err());
    }

    #[test]
    fn test_float_to_i64_limits() {
        assert_eq!(float_to_i64(-9_223_372_036_854_775_808.0), Some(i64::MIN));
        assert_eq!(float_to_i64(9_223_372_036_854_775_808.0), None);
        assert_eq!(float_to_i64(f64::INFINITY), None);
        assert_eq!(float_to_i64(-0.5), Some(0));
    }

    #[test]
    fn test_parse_big_int() {
        let big = "123456789012345678901234567890";
        assert_eq!(parse_big_int(big), BigInt::from_str(big).ok());
        assert_eq!(parse_big_int("12.9"), Some(BigInt::from(12)));
        assert_eq!(parse_big_int("x"), None);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1,000.25"), BigDecimal::from_str("1000.25").ok());
        assert_eq!(parse_decimal("+0.1"), BigDecimal::from_str("0.1").ok());
        assert_eq!(parse_decimal("one"), None);
    }
}
