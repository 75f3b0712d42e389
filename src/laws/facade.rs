//! Quiet conversion laws.

use proptest::prelude::*;

use super::common::{any_value, messy_text};
use crate::facade::Converter;
use crate::registry::ConverterRegistry;

proptest! {
    #[test]
    fn quiet_never_fails(value in any_value()) {
        let registry = ConverterRegistry::new();
        let c = Converter::new(&registry);

        let _ = c.to_int(value.clone());
        let _ = c.to_long(value.clone());
        let _ = c.to_byte(value.clone());
        let _ = c.to_double(value.clone());
        let _ = c.to_char(value.clone());
        let _ = c.to_bool(value.clone());
        let _ = c.to_str(value.clone());
        let _ = c.to_big_decimal(value.clone());
        let _ = c.to_big_integer(value.clone());
        let _ = c.to_int_array(value.clone());
        let _ = c.convert_quietly_opt::<serde_json::Value>(value.clone());
        let _ = c.convert_quietly_opt::<std::time::Duration>(value);
    }

    #[test]
    fn quiet_agrees_with_checked(text in messy_text(), default in any::<i32>()) {
        let registry = ConverterRegistry::new();
        let c = Converter::new(&registry);

        let quiet = c.to_int_or(text.as_str(), default);
        match c.convert::<i32>(text.as_str()) {
            Ok(n) => prop_assert_eq!(quiet, n),
            Err(_) => prop_assert_eq!(quiet, default),
        }
    }

    #[test]
    fn string_conversion_is_idempotent(value in any_value()) {
        let registry = ConverterRegistry::new();
        let c = Converter::new(&registry);

        if let Some(once) = c.to_str(value) {
            prop_assert_eq!(c.to_str(once.as_str()), Some(once));
        }
    }
}
