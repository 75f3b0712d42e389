//! Composable bidirectional converters.
//!
//! A [`BiConverter<A, B>`] maps `A → B` and back. It is independent of the
//! registry and is used directly wherever a reversible mapping is needed:
//!
//! ```text
//! conv            : A → B
//! conv.reverse()  : B → A        (reverse().reverse() is conv)
//! conv.and_then(n): A → B → C    (backward runs n first)
//! identity()      : A → A        (elided by and_then)
//! ```
//!
//! # Modules
//!
//! - [`converter`] - `BiConverter`, `Transform`, composition
//! - [`iter`] - lazy `convert_all`
//! - [`string`] - name ↔ value converters

mod converter;
mod iter;
mod string;

pub use converter::{BiConverter, Transform};
pub use iter::ConvertAll;
pub use string::{string_converter, StringConverter};
