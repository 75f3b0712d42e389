//! Property tests for the conversion laws.
//!
//! Tests verify that:
//! - `c.convert_back(c.convert(a)) == a` for bijections
//! - chaining matches applying each converter in turn, and is associative
//! - chaining with identity returns the other converter itself
//! - quiet conversion never fails, whatever the input

#[cfg(test)]
pub(crate) mod common;

#[cfg(test)]
mod bidi;

#[cfg(test)]
mod facade;

#[cfg(test)]
mod scenarios;
