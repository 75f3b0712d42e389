//! Type-directed converter registry.
//!
//! # Lookup
//!
//! ```text
//! ConverterRegistry
//! ├── builtins: FxHashMap<TypeDescriptor, LeafConverter>   (built once, read-only)
//! └── custom:   OnceLock<CustomEntries>                    (materialized on first put)
//!     └── ArcSwap<FxHashMap<..>>  ─── lock-free reads, copy-on-write inserts
//!
//! convert(type, value):
//! 1. Consult the preferred table (LookupOrder), then the other one
//! 2. Missing in both → ConversionError::Lookup
//! 3. Otherwise hand (type, value) to the leaf converter, result as-is
//! ```

mod custom;
mod defaults;

use std::fmt;
use std::sync::{Arc, LazyLock};

use rustc_hash::FxHashMap;

use self::custom::CustomTable;
use crate::config::{self, Config, LookupOrder};
use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, Result};
use crate::value::Value;

/// A single-target conversion strategy.
///
/// Receives the requested descriptor, the input value and the registry that
/// dispatched it, so structural converters can convert nested values.
/// Implementations decide their own policy for [`Value::Null`]; every
/// built-in maps null to null.
///
/// Closures with the signature `Fn(&TypeDescriptor, Value) -> Result<Value>`
/// implement this trait.
pub trait LeafConverter: Send + Sync {
    /// Convert `value` to an instance of `target`.
    fn convert(
        &self,
        target: &TypeDescriptor,
        value: Value,
        registry: &ConverterRegistry,
    ) -> Result<Value>;
}

impl<F> LeafConverter for F
where
    F: Fn(&TypeDescriptor, Value) -> Result<Value> + Send + Sync,
{
    fn convert(
        &self,
        target: &TypeDescriptor,
        value: Value,
        _registry: &ConverterRegistry,
    ) -> Result<Value> {
        self(target, value)
    }
}

/// Shared handle to a registered converter.
pub type SharedConverter = Arc<dyn LeafConverter>;

/// Process-wide registry, built with the global [`Config`].
static GLOBAL_REGISTRY: LazyLock<ConverterRegistry> = LazyLock::new(ConverterRegistry::new);

/// Dispatches conversions to leaf converters by target descriptor.
pub struct ConverterRegistry {
    config: Config,
    builtins: FxHashMap<TypeDescriptor, SharedConverter>,
    custom: CustomTable,
}

impl ConverterRegistry {
    /// Create a registry with the built-in converters and the global config.
    pub fn new() -> Self {
        Self::with_config(config::get().clone())
    }

    /// Create a registry with the built-in converters and `config`.
    pub fn with_config(config: Config) -> Self {
        let mut registry = Self {
            config,
            builtins: FxHashMap::default(),
            custom: CustomTable::new(),
        };
        registry.register_defaults();
        registry
    }

    /// The process-wide registry.
    pub fn global() -> &'static ConverterRegistry {
        &GLOBAL_REGISTRY
    }

    /// Configuration this registry was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Register (or replace) the custom converter for `target`.
    ///
    /// # Example
    ///
    /// ```
    /// use convert_kit::{ConverterRegistry, TypeDescriptor, Value};
    ///
    /// let registry = ConverterRegistry::new();
    /// registry
    ///     .put_custom(TypeDescriptor::concrete("Upper"), |_: &TypeDescriptor, v: Value| {
    ///         Ok(Value::from(v.to_string().to_uppercase()))
    ///     })
    ///     .put_custom(TypeDescriptor::concrete("Len"), |_: &TypeDescriptor, v: Value| {
    ///         Ok(Value::from(v.to_string().len()))
    ///     });
    ///
    /// let upper = registry.convert(&TypeDescriptor::concrete("Upper"), "abc").unwrap();
    /// assert_eq!(upper, Value::from("ABC"));
    /// ```
    pub fn put_custom<C>(&self, target: TypeDescriptor, converter: C) -> &Self
    where
        C: LeafConverter + 'static,
    {
        self.put_custom_shared(target, Arc::new(converter))
    }

    /// Register an already shared converter.
    pub fn put_custom_shared(&self, target: TypeDescriptor, converter: SharedConverter) -> &Self {
        tracing::debug!(%target, "registering custom converter");
        if self.custom.insert(target.clone(), converter).is_some() {
            tracing::debug!(%target, "replaced previous custom converter");
        }
        self
    }

    /// Find the converter for `target`, trying the table preferred by `order`
    /// first and the other one second.
    pub fn get_converter(
        &self,
        target: &TypeDescriptor,
        order: LookupOrder,
    ) -> Option<SharedConverter> {
        match order {
            LookupOrder::CustomFirst => self.custom(target).or_else(|| self.builtin(target)),
            LookupOrder::DefaultFirst => self.builtin(target).or_else(|| self.custom(target)),
        }
    }

    /// Find the converter for `target` using the configured lookup order.
    pub fn resolve(&self, target: &TypeDescriptor) -> Option<SharedConverter> {
        self.get_converter(target, self.config.lookup_order)
    }

    /// Built-in converter for `target`.
    pub fn builtin(&self, target: &TypeDescriptor) -> Option<SharedConverter> {
        self.builtins.get(target).cloned()
    }

    /// User-registered converter for `target`.
    pub fn custom(&self, target: &TypeDescriptor) -> Option<SharedConverter> {
        self.custom.get(target)
    }

    /// Whether any table can handle `target`.
    pub fn contains(&self, target: &TypeDescriptor) -> bool {
        self.builtins.contains_key(target) || self.custom.get(target).is_some()
    }

    /// Whether the custom table has been materialized.
    pub fn has_custom_table(&self) -> bool {
        self.custom.is_ready()
    }

    /// Descriptors with a built-in converter.
    pub fn builtin_types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.builtins.keys()
    }

    /// Descriptors with a custom converter, at the time of the call.
    pub fn custom_types(&self) -> Vec<TypeDescriptor> {
        self.custom.keys()
    }

    /// Convert `value` to `target` using the configured lookup order.
    ///
    /// The leaf converter's result or error is returned unchanged.
    pub fn convert(&self, target: &TypeDescriptor, value: impl Into<Value>) -> Result<Value> {
        self.convert_with_order(target, value.into(), self.config.lookup_order)
    }

    /// Convert `value` to `target` with an explicit lookup order.
    pub fn convert_with_order(
        &self,
        target: &TypeDescriptor,
        value: Value,
        order: LookupOrder,
    ) -> Result<Value> {
        let Some(converter) = self.get_converter(target, order) else {
            return Err(ConversionError::lookup(target, &value));
        };
        tracing::trace!(%target, source = value.type_name(), "dispatching conversion");
        converter.convert(target, value, self)
    }

    fn insert_builtin(&mut self, target: TypeDescriptor, converter: SharedConverter) {
        let previous = self.builtins.insert(target, converter);
        debug_assert!(previous.is_none(), "duplicate built-in converter");
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("config", &self.config)
            .field("builtins", &self.builtins.len())
            .field("custom", &self.custom.keys().len())
            .finish()
    }
}
