//! Configuration for convert-kit.
//!
//! This module provides the runtime configuration used by registries built
//! without an explicit [`Config`], including the global registry.
//! Use [`ConfigBuilder`] at application startup, before the first conversion.

use std::sync::OnceLock;

/// Global configuration, initialized via [`ConfigBuilder::init`].
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Which table a registry consults first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupOrder {
    /// User-registered converters shadow built-ins.
    #[default]
    CustomFirst,
    /// Built-ins win; custom converters only fill gaps.
    DefaultFirst,
}

impl LookupOrder {
    /// The opposite order.
    pub fn flipped(self) -> Self {
        match self {
            Self::CustomFirst => Self::DefaultFirst,
            Self::DefaultFirst => Self::CustomFirst,
        }
    }
}

/// Runtime configuration for converter registries.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Table preference for [`ConverterRegistry::convert`](crate::ConverterRegistry::convert).
    pub lookup_order: LookupOrder,
    /// Trim surrounding whitespace from strings before parsing them.
    pub trim_strings: bool,
    /// Separator used when a string is converted to an array.
    pub array_separator: char,
    /// Emit a `debug` event for every failure swallowed by quiet conversion.
    pub log_suppressed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookup_order: LookupOrder::CustomFirst,
            trim_strings: true,
            array_separator: ',',
            log_suppressed: false,
        }
    }
}

/// Configuration builder for fluent API.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    lookup_order: Option<LookupOrder>,
    trim_strings: Option<bool>,
    array_separator: Option<char>,
    log_suppressed: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table preference.
    ///
    /// Default: [`LookupOrder::CustomFirst`]
    pub fn lookup_order(mut self, order: LookupOrder) -> Self {
        self.lookup_order = Some(order);
        self
    }

    /// Whether strings are trimmed before parsing.
    ///
    /// Default: `true`
    pub fn trim_strings(mut self, trim: bool) -> Self {
        self.trim_strings = Some(trim);
        self
    }

    /// Separator for string → array conversion.
    ///
    /// Default: `','`
    pub fn array_separator(mut self, separator: char) -> Self {
        self.array_separator = Some(separator);
        self
    }

    /// Log failures swallowed by quiet conversion.
    ///
    /// Default: `false`
    pub fn log_suppressed(mut self, log: bool) -> Self {
        self.log_suppressed = Some(log);
        self
    }

    /// Build the configuration without installing it.
    pub fn build(self) -> Config {
        let defaults = Config::default();
        Config {
            lookup_order: self.lookup_order.unwrap_or(defaults.lookup_order),
            trim_strings: self.trim_strings.unwrap_or(defaults.trim_strings),
            array_separator: self.array_separator.unwrap_or(defaults.array_separator),
            log_suppressed: self.log_suppressed.unwrap_or(defaults.log_suppressed),
        }
    }

    /// Build and initialize the global configuration.
    ///
    /// This can only be called once. Subsequent calls are ignored.
    /// Returns `true` if configuration was set, `false` if already initialized.
    ///
    /// # Example
    ///
    /// ```
    /// use convert_kit::config::{ConfigBuilder, LookupOrder};
    ///
    /// ConfigBuilder::new()
    ///     .lookup_order(LookupOrder::CustomFirst)
    ///     .array_separator(';')
    ///     .init();
    /// ```
    pub fn init(self) -> bool {
        let installed = CONFIG.set(self.build()).is_ok();
        if !installed {
            tracing::warn!("convert-kit configuration already initialized; ignoring");
        }
        installed
    }
}

/// Initialize convert-kit with default configuration.
///
/// This is equivalent to `ConfigBuilder::new().init()`.
pub fn init_default() -> bool {
    ConfigBuilder::new().init()
}

/// Get the current configuration, or default if not initialized.
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}
