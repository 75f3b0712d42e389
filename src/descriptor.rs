//! Type descriptors: the registry's dispatch keys.
//!
//! A descriptor names a target shape without needing runtime reflection:
//!
//! ```text
//! Concrete("i32")                      → i32
//! ArrayOf(Concrete("i32"))             → [i32]
//! Parameterized("Option", [i32])       → Option<i32>
//! ```

use std::borrow::Cow;
use std::fmt;

/// Hashable key identifying a conversion target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeDescriptor {
    /// A plain named type.
    Concrete(Cow<'static, str>),
    /// A homogeneous sequence of the element type.
    ArrayOf(Box<TypeDescriptor>),
    /// A generic base applied to type arguments.
    Parameterized {
        /// Base type name, e.g. `Option`.
        base: Cow<'static, str>,
        /// Type arguments in declaration order.
        args: Vec<TypeDescriptor>,
    },
}

macro_rules! concrete_consts {
    ($($(#[$doc:meta])* $name:ident => $lit:literal;)*) => {
        impl TypeDescriptor {
            $(
                $(#[$doc])*
                pub const $name: TypeDescriptor = TypeDescriptor::Concrete(Cow::Borrowed($lit));
            )*
        }
    };
}

concrete_consts! {
    /// `bool`
    BOOL => "bool";
    /// `char`
    CHAR => "char";
    /// `i8`
    I8 => "i8";
    /// `i16`
    I16 => "i16";
    /// `i32`
    I32 => "i32";
    /// `i64`
    I64 => "i64";
    /// `f32`
    F32 => "f32";
    /// `f64`
    F64 => "f64";
    /// Owned string.
    STRING => "String";
    /// Arbitrary-precision integer.
    BIG_INT => "BigInt";
    /// Arbitrary-precision decimal.
    BIG_DECIMAL => "BigDecimal";
    /// Filesystem path.
    PATH => "PathBuf";
    /// Elapsed time span.
    DURATION => "Duration";
    /// Zoned timestamp.
    DATE_TIME => "DateTime";
    /// URL.
    URL => "Url";
    /// JSON document.
    JSON => "Json";
}

impl TypeDescriptor {
    /// Base name used for `Option<T>` descriptors.
    pub const OPTION: &'static str = "Option";

    /// A concrete descriptor with an owned or static name.
    pub fn concrete(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Concrete(name.into())
    }

    /// `[element]`
    pub fn array_of(element: TypeDescriptor) -> Self {
        Self::ArrayOf(Box::new(element))
    }

    /// `Option<inner>`
    pub fn option_of(inner: TypeDescriptor) -> Self {
        Self::parameterized(Self::OPTION, [inner])
    }

    /// `base<args..>`
    pub fn parameterized(
        base: impl Into<Cow<'static, str>>,
        args: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Self {
        Self::Parameterized {
            base: base.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Element descriptor if this is an array descriptor.
    pub fn element(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::ArrayOf(element) => Some(element),
            _ => None,
        }
    }

    /// Inner descriptor if this is `Option<T>`.
    pub fn option_inner(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Parameterized { base, args } if base == Self::OPTION && args.len() == 1 => {
                args.first()
            }
            _ => None,
        }
    }

    /// Whether this descriptor is a plain named type.
    pub fn is_concrete(&self) -> bool {
        matches!(self, Self::Concrete(_))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(name) => f.write_str(name),
            Self::ArrayOf(element) => write!(f, "[{element}]"),
            Self::Parameterized { base, args } => {
                write!(f, "{base}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_display() {
        assert_eq!(TypeDescriptor::I32.to_string(), "i32");
        assert_eq!(TypeDescriptor::array_of(TypeDescriptor::STRING).to_string(), "[String]");
        assert_eq!(
            TypeDescriptor::parameterized("Map", [TypeDescriptor::STRING, TypeDescriptor::I64])
                .to_string(),
            "Map<String, i64>"
        );
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(TypeDescriptor::concrete("i32"), TypeDescriptor::I32);
        assert_eq!(
            TypeDescriptor::concrete(String::from("Color")),
            TypeDescriptor::concrete("Color")
        );
        assert_ne!(
            TypeDescriptor::array_of(TypeDescriptor::I32),
            TypeDescriptor::array_of(TypeDescriptor::I64)
        );

        let mut keys = FxHashSet::default();
        keys.insert(TypeDescriptor::option_of(TypeDescriptor::BOOL));
        assert!(keys.contains(&TypeDescriptor::parameterized("Option", [TypeDescriptor::BOOL])));
    }

    #[test]
    fn test_accessors() {
        let arr = TypeDescriptor::array_of(TypeDescriptor::F64);
        assert_eq!(arr.element(), Some(&TypeDescriptor::F64));
        assert_eq!(arr.option_inner(), None);

        let opt = TypeDescriptor::option_of(TypeDescriptor::CHAR);
        assert_eq!(opt.option_inner(), Some(&TypeDescriptor::CHAR));
        assert!(!opt.is_concrete());
        assert!(TypeDescriptor::URL.is_concrete());
    }
}
