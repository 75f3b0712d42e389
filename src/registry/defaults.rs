//! Built-in table population.

use std::sync::Arc;

use super::{ConverterRegistry, LeafConverter, SharedConverter};
use crate::descriptor::TypeDescriptor;
use crate::leaf::{
    ArrayConverter, BigIntConverter, BoolConverter, CharConverter, DecimalConverter,
    DurationConverter, FloatConverter, IntConverter, IntWidth, JsonConverter, OptionConverter,
    PathConverter, TextConverter,
};

impl ConverterRegistry {
    /// Populate the built-in table. Runs once, from the constructor.
    ///
    /// Every scalar target also gets `[T]` and `Option<T>` entries.
    pub(super) fn register_defaults(&mut self) {
        debug_assert!(self.builtins.is_empty(), "built-ins registered twice");

        #[cfg_attr(not(any(feature = "url", feature = "time")), allow(unused_mut))]
        let mut scalars: Vec<(TypeDescriptor, SharedConverter)> = vec![
            (TypeDescriptor::BOOL, shared(BoolConverter)),
            (TypeDescriptor::CHAR, shared(CharConverter)),
            (TypeDescriptor::I8, shared(IntConverter::new(IntWidth::I8))),
            (TypeDescriptor::I16, shared(IntConverter::new(IntWidth::I16))),
            (TypeDescriptor::I32, shared(IntConverter::new(IntWidth::I32))),
            (TypeDescriptor::I64, shared(IntConverter::new(IntWidth::I64))),
            (TypeDescriptor::F32, shared(FloatConverter::F32)),
            (TypeDescriptor::F64, shared(FloatConverter::F64)),
            (TypeDescriptor::STRING, shared(TextConverter)),
            (TypeDescriptor::BIG_INT, shared(BigIntConverter)),
            (TypeDescriptor::BIG_DECIMAL, shared(DecimalConverter)),
            (TypeDescriptor::PATH, shared(PathConverter)),
            (TypeDescriptor::DURATION, shared(DurationConverter)),
        ];
        #[cfg(feature = "url")]
        scalars.push((TypeDescriptor::URL, shared(crate::leaf::UrlConverter)));
        #[cfg(feature = "time")]
        scalars.push((TypeDescriptor::DATE_TIME, shared(crate::leaf::DateTimeConverter)));

        for (target, converter) in scalars {
            self.insert_builtin(TypeDescriptor::array_of(target.clone()), shared(ArrayConverter));
            self.insert_builtin(TypeDescriptor::option_of(target.clone()), shared(OptionConverter));
            self.insert_builtin(target, converter);
        }

        self.insert_builtin(TypeDescriptor::JSON, shared(JsonConverter));

        tracing::debug!(count = self.builtins.len(), "registered built-in converters");
    }
}

fn shared<C: LeafConverter + 'static>(converter: C) -> SharedConverter {
    Arc::new(converter)
}
