//! Filesystem path and URL converters.

use std::path::PathBuf;

use super::prepare;
use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, Result};
use crate::registry::{ConverterRegistry, LeafConverter};
use crate::value::Value;

/// Converts strings (and `file:` URLs) to paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathConverter;

impl LeafConverter for PathConverter {
    fn convert(
        &self,
        target: &TypeDescriptor,
        value: Value,
        registry: &ConverterRegistry,
    ) -> Result<Value> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Path(p) => Ok(Value::Path(p)),
            Value::Str(ref s) if s.trim().is_empty() => Ok(Value::Null),
            Value::Str(ref s) => Ok(Value::Path(PathBuf::from(prepare(s, registry)))),
            #[cfg(feature = "url")]
            Value::Url(ref u) if u.scheme() == "file" => u
                .to_file_path()
                .map(Value::Path)
                .map_err(|()| ConversionError::conversion(target, &value, "not a local file URL")),
            other => Err(ConversionError::conversion(target, &other, "not a path")),
        }
    }
}

/// Converts strings (and absolute paths) to URLs.
#[cfg(feature = "url")]
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlConverter;

#[cfg(feature = "url")]
impl LeafConverter for UrlConverter {
    fn convert(
        &self,
        target: &TypeDescriptor,
        value: Value,
        registry: &ConverterRegistry,
    ) -> Result<Value> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Url(u) => Ok(Value::Url(u)),
            Value::Str(ref s) if s.trim().is_empty() => Ok(Value::Null),
            Value::Str(ref s) => url::Url::parse(prepare(s, registry))
                .map(Value::Url)
                .map_err(|e| ConversionError::with_cause(target, &value, e)),
            Value::Path(ref p) => url::Url::from_file_path(p)
                .map(Value::Url)
                .map_err(|()| ConversionError::conversion(target, &value, "path is not absolute")),
            other => Err(ConversionError::conversion(target, &other, "not a URL")),
        }
    }
}
