//! Conversion error type.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::descriptor::TypeDescriptor;
use crate::value::Value;

/// Maximum number of characters of a value rendering kept in error messages.
const VALUE_PREVIEW_LEN: usize = 64;

/// Boxed underlying cause of a conversion failure.
pub type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T, E = ConversionError> = std::result::Result<T, E>;

/// Coarse classification of a [`ConversionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No converter registered for the target type.
    Lookup,
    /// A converter rejected the input value.
    Conversion,
    /// A converter broke its own contract (a defect, not bad input).
    ContractViolation,
}

/// Which transform of a bidirectional converter misbehaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `A → B`
    Forward,
    /// `B → A`
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        })
    }
}

/// Error raised by the registry, the facade, or a converter.
///
/// # Example
///
/// ```
/// use convert_kit::{ConversionError, ErrorKind, convert};
///
/// match convert::<i32>("abc") {
///     Ok(_) => unreachable!(),
///     Err(e) => {
///         assert_eq!(e.kind(), ErrorKind::Conversion);
///         eprintln!("{e}");
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ConversionError {
    /// No converter (custom or built-in) for the target type.
    #[error("no converter registered for {target} (value `{value}` of type {source_type})")]
    Lookup {
        /// Runtime type name of the input value.
        source_type: &'static str,
        /// Truncated rendering of the input value.
        value: String,
        /// Requested target.
        target: TypeDescriptor,
    },

    /// A converter rejected the input.
    #[error("can not convert `{value}` of type {source_type} to {target}: {reason}")]
    Conversion {
        /// Runtime type name of the input value.
        source_type: &'static str,
        /// Truncated rendering of the input value.
        value: String,
        /// Requested target.
        target: TypeDescriptor,
        /// Short explanation.
        reason: String,
        /// Underlying error, if any.
        #[source]
        cause: Option<Cause>,
    },

    /// A converter returned a value of the wrong shape for the requested type.
    #[error("converter for {target} returned a {found} value")]
    Shape {
        /// Requested target.
        target: TypeDescriptor,
        /// Runtime type name of the returned value.
        found: &'static str,
    },

    /// A bidirectional transform produced no result for a present input.
    #[error("{direction} transform of {converter} returned no value for a present input")]
    ContractViolation {
        /// Type name of the offending converter.
        converter: &'static str,
        /// Which transform misbehaved.
        direction: Direction,
    },
}

impl ConversionError {
    /// Missing converter for `target`.
    pub fn lookup(target: &TypeDescriptor, value: &Value) -> Self {
        Self::Lookup {
            source_type: value.type_name(),
            value: preview(value),
            target: target.clone(),
        }
    }

    /// `value` can not be converted to `target`.
    pub fn conversion(target: &TypeDescriptor, value: &Value, reason: impl Into<String>) -> Self {
        Self::Conversion {
            source_type: value.type_name(),
            value: preview(value),
            target: target.clone(),
            reason: reason.into(),
            cause: None,
        }
    }

    /// Like [`conversion`](Self::conversion), keeping the underlying error.
    pub fn with_cause<E>(target: &TypeDescriptor, value: &Value, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Conversion {
            source_type: value.type_name(),
            value: preview(value),
            target: target.clone(),
            reason: cause.to_string(),
            cause: Some(Box::new(cause)),
        }
    }

    /// A converter returned `found` where `target` was expected.
    pub fn shape(target: TypeDescriptor, found: &Value) -> Self {
        Self::Shape {
            target,
            found: found.type_name(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Lookup { .. } => ErrorKind::Lookup,
            Self::Conversion { .. } | Self::Shape { .. } => ErrorKind::Conversion,
            Self::ContractViolation { .. } => ErrorKind::ContractViolation,
        }
    }

    /// The requested target, if the error names one.
    pub fn target(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Lookup { target, .. }
            | Self::Conversion { target, .. }
            | Self::Shape { target, .. } => Some(target),
            Self::ContractViolation { .. } => None,
        }
    }
}

fn preview(value: &Value) -> String {
    let rendered = value.to_string();
    match rendered.char_indices().nth(VALUE_PREVIEW_LEN) {
        Some((cut, _)) => format!("{}...", &rendered[..cut]),
        None => rendered,
    }
}
