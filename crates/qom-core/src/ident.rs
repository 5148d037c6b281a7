//! Identifier invariants and construction.
//!
//! Invariants:
//! - Identifiers are non-empty and carry no control characters.
//! - At most one `prefix:` separator; neither part may be empty.
//! - All construction paths validate invariants.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use thiserror::Error as ThisError;

// Characters with structural meaning in paths, patterns, and quoted forms.
const RESERVED: &[char] = &['/', '|', '[', ']', '*', '\'', '"'];

///
/// InvalidIdentifierError
///
/// A selector or property name fails the syntactic validity rules.
/// Fatal to the query being assembled.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum InvalidIdentifierError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier '{name}' contains reserved character '{found}'")]
    ReservedCharacter { name: String, found: char },

    #[error("identifier '{name}' contains a control character")]
    ControlCharacter { name: String },

    #[error("identifier '{name}' has leading or trailing whitespace")]
    SurroundingWhitespace { name: String },

    #[error("identifier '{name}' has a malformed prefix")]
    MalformedPrefix { name: String },
}

/// Validate the shared identifier syntax used by selector, property, and
/// node-type names.
pub fn validate_identifier(name: &str) -> Result<(), InvalidIdentifierError> {
    if name.is_empty() {
        return Err(InvalidIdentifierError::Empty);
    }

    if name.trim() != name {
        return Err(InvalidIdentifierError::SurroundingWhitespace {
            name: name.to_string(),
        });
    }

    for c in name.chars() {
        if c.is_control() {
            return Err(InvalidIdentifierError::ControlCharacter {
                name: name.to_string(),
            });
        }
        if RESERVED.contains(&c) {
            return Err(InvalidIdentifierError::ReservedCharacter {
                name: name.to_string(),
                found: c,
            });
        }
    }

    // at most one prefix separator, both sides non-empty
    let mut parts = name.split(':');
    let first = parts.next().unwrap_or_default();
    match parts.next() {
        None => Ok(()),
        Some(local) => {
            if first.is_empty() || local.is_empty() || parts.next().is_some() {
                return Err(InvalidIdentifierError::MalformedPrefix {
                    name: name.to_string(),
                });
            }
            Ok(())
        }
    }
}

/// Local part of a possibly prefixed name.
#[must_use]
pub(crate) fn local_part(name: &str) -> &str {
    name.split_once(':').map_or(name, |(_, local)| local)
}

macro_rules! identifier_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn try_from_str(name: &str) -> Result<Self, InvalidIdentifierError> {
                validate_identifier(name)?;

                Ok(Self(name.to_string()))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Portion after the namespace prefix, or the whole name when
            /// there is no prefix.
            #[must_use]
            pub fn local_name(&self) -> &str {
                local_part(&self.0)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = InvalidIdentifierError;

            fn try_from(name: &str) -> Result<Self, Self::Error> {
                Self::try_from_str(name)
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidIdentifierError;

            fn try_from(name: String) -> Result<Self, Self::Error> {
                Self::try_from_str(&name)
            }
        }

        impl From<$name> for String {
            fn from(name: $name) -> Self {
                name.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier_newtype!(
    ///
    /// SelectorName
    ///
    /// Named binding of one node-type subtree within a query's source.
    ///
    SelectorName
);

identifier_newtype!(
    ///
    /// PropertyName
    ///
    /// Name of a property on a selector's resolved node.
    ///
    PropertyName
);

///
/// TESTS
///
