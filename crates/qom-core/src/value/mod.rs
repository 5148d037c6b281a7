pub(crate) mod compare;
mod float;


pub use compare::TypeMismatchError;
pub use float::{Float64, Float64Error};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

///
/// Value
///
/// Closed set of typed scalar values produced by operand evaluation and
/// consumed by comparisons, orderings, and projected columns.
///
/// A value has exactly one type. Comparison across non-coercible types is
/// reported as a `TypeMismatchError`, never silently guessed; the documented
/// coercions are numeric widening (Long ⇄ Double) and the string-like family
/// (String, Name, Path, Reference, Uri), which compares lexicographically.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Value {
    Binary(Vec<u8>),
    Boolean(bool),
    Date(OffsetDateTime),
    Double(Float64),
    Long(i64),
    Name(String),
    Path(String),
    Reference(String),
    String(String),
    Uri(String),
}

impl Value {
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Binary(_) => ValueType::Binary,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Date(_) => ValueType::Date,
            Self::Double(_) => ValueType::Double,
            Self::Long(_) => ValueType::Long,
            Self::Name(_) => ValueType::Name,
            Self::Path(_) => ValueType::Path,
            Self::Reference(_) => ValueType::Reference,
            Self::String(_) => ValueType::String,
            Self::Uri(_) => ValueType::Uri,
        }
    }

    /// Text view of a string-like value.
    ///
    /// Returns `None` for every non string-like variant; callers that need
    /// a textual comparison decide what that means (usually a mismatch).
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Name(s) | Self::Path(s) | Self::Reference(s) | Self::String(s) | Self::Uri(s) => {
                Some(s)
            }
            _ => None,
        }
    }

    /// Length of a value: byte length for Binary, character length of the
    /// canonical string form otherwise.
    #[must_use]
    pub fn length(&self) -> u64 {
        match self {
            Self::Binary(bytes) => bytes.len() as u64,
            Self::Boolean(b) => if *b { "true" } else { "false" }.len() as u64,
            Self::Date(dt) => dt.format(&Rfc3339).map(|s| s.chars().count()).unwrap_or(0) as u64,
            Self::Double(d) => d.to_string().chars().count() as u64,
            Self::Long(n) => n.to_string().chars().count() as u64,
            Self::Name(s) | Self::Path(s) | Self::Reference(s) | Self::String(s) | Self::Uri(s) => {
                s.chars().count() as u64
            }
        }
    }

    /// Total order within a type (plus the documented coercions).
    ///
    /// Cross-type ordering outside the coercible families is undefined and
    /// reported as a `TypeMismatchError`.
    pub fn try_compare(&self, other: &Self) -> Result<Ordering, TypeMismatchError> {
        compare::try_compare(self, other)
    }

    /// Equality under the same coercion rules as `try_compare`.
    pub fn try_eq(&self, other: &Self) -> Result<bool, TypeMismatchError> {
        Ok(compare::try_compare(self, other)? == Ordering::Equal)
    }
}

///
/// ValueType
///
/// Type tag mirroring the `Value` variants one-to-one.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ValueType {
    Binary,
    Boolean,
    Date,
    Double,
    Long,
    Name,
    Path,
    Reference,
    String,
    Uri,
}

impl ValueType {
    /// Canonical rank used as a deterministic fallback when ordering keys of
    /// non-coercible types. Mixed-rank comparisons are rank-only.
    #[must_use]
    pub(crate) const fn canonical_rank(self) -> u8 {
        match self {
            Self::Binary => 0,
            Self::Boolean => 1,
            Self::Date => 2,
            Self::Double => 3,
            Self::Long => 4,
            Self::Name => 5,
            Self::Path => 6,
            Self::Reference => 7,
            Self::String => 8,
            Self::Uri => 9,
        }
    }

    #[must_use]
    pub const fn is_string_like(self) -> bool {
        matches!(
            self,
            Self::Name | Self::Path | Self::Reference | Self::String | Self::Uri
        )
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Double | Self::Long)
    }
}
