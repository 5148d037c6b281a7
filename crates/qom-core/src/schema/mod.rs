//! Node-type metadata consumed by validation.
//!
//! Selector resolution ("type is, or is a subtype of") and validation-time
//! column expansion both read this registry; per-tuple evaluation never
//! touches it.


use crate::{
    ident::{InvalidIdentifierError, PropertyName, validate_identifier},
    value::ValueType,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;

///
/// SchemaError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifierError),

    #[error("node type '{name}' is already registered")]
    DuplicateNodeType { name: String },

    #[error("node type '{name}' declares unknown supertype '{supertype}'")]
    UnknownSupertype { name: String, supertype: String },

    #[error("node type '{name}' declares property '{property}' twice")]
    DuplicateProperty { name: String, property: String },
}

///
/// PropertyDef
///
/// One declared property of a node type, in declaration order.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyDef {
    pub name: PropertyName,
    pub value_type: ValueType,
    /// Multi-valued property.
    pub multiple: bool,
    /// Residual (wildcard) definition; residual properties are never part of
    /// the implicit column expansion.
    pub residual: bool,
}

impl PropertyDef {
    #[must_use]
    pub const fn new(name: PropertyName, value_type: ValueType) -> Self {
        Self {
            name,
            value_type,
            multiple: false,
            residual: false,
        }
    }

    #[must_use]
    pub const fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    #[must_use]
    pub const fn residual(mut self) -> Self {
        self.residual = true;
        self
    }
}

///
/// NodeTypeDef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NodeTypeDef {
    pub name: String,
    pub supertypes: Vec<String>,
    pub properties: Vec<PropertyDef>,
}

impl NodeTypeDef {
    pub fn new(
        name: impl Into<String>,
        supertypes: Vec<String>,
        properties: Vec<PropertyDef>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        validate_identifier(&name)?;

        let mut seen = BTreeSet::new();
        for property in &properties {
            if !seen.insert(property.name.as_str()) {
                return Err(SchemaError::DuplicateProperty {
                    name,
                    property: property.name.as_str().to_string(),
                });
            }
        }

        Ok(Self {
            name,
            supertypes,
            properties,
        })
    }

    /// Declared single-valued non-residual properties, in declaration order.
    /// This is the set implicit column expansion produces.
    pub fn single_valued_non_residual(&self) -> impl Iterator<Item = &PropertyDef> {
        self.properties
            .iter()
            .filter(|p| !p.multiple && !p.residual)
    }
}

///
/// Schema
///
/// Registry of node types with subtype closure. Insertion order of a type's
/// properties is preserved; the registry itself is name-keyed.
///

#[derive(Clone, Debug, Default)]
pub struct Schema {
    types: BTreeMap<String, NodeTypeDef>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node type. Supertypes must already be registered so the
    /// subtype relation stays acyclic by construction.
    pub fn insert(&mut self, def: NodeTypeDef) -> Result<(), SchemaError> {
        if self.types.contains_key(&def.name) {
            return Err(SchemaError::DuplicateNodeType { name: def.name });
        }
        for supertype in &def.supertypes {
            if !self.types.contains_key(supertype) {
                return Err(SchemaError::UnknownSupertype {
                    name: def.name,
                    supertype: supertype.clone(),
                });
            }
        }

        self.types.insert(def.name.clone(), def);

        Ok(())
    }

    #[must_use]
    pub fn node_type(&self, name: &str) -> Option<&NodeTypeDef> {
        self.types.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Reflexive, transitive subtype check.
    #[must_use]
    pub fn is_subtype_of(&self, sub: &str, sup: &str) -> bool {
        if sub == sup {
            return self.types.contains_key(sub);
        }

        let Some(def) = self.types.get(sub) else {
            return false;
        };

        def.supertypes
            .iter()
            .any(|parent| self.is_subtype_of(parent, sup))
    }
}
