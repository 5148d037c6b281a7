mod eval;


use crate::{
    ident::{PropertyName, SelectorName},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Operand AST
///
/// Pure representation of comparison operands. Static operands are fixed at
/// assembly time; dynamic operands produce a value (or no value) per
/// node-tuple. All interpretation occurs in later passes:
///
/// - validation (selector references, schema-aware)
/// - evaluation
///

///
/// StaticOperand
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum StaticOperand {
    /// A typed literal value.
    Literal(Value),
    /// A named parameter bound at evaluation time.
    BindVariable(String),
}

impl StaticOperand {
    #[must_use]
    pub const fn literal(value: Value) -> Self {
        Self::Literal(value)
    }

    #[must_use]
    pub fn bind_variable(name: impl Into<String>) -> Self {
        Self::BindVariable(name.into())
    }
}

///
/// DynamicOperand
///
/// Evaluates per node-tuple, possibly to no value. A missing value is
/// explicitly not an error; comparisons over it come out unknown.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum DynamicOperand {
    /// Value(s) of a property on the selector's resolved node.
    PropertyValue {
        selector: SelectorName,
        property: PropertyName,
    },
    /// Length(s) of a property's value(s): bytes for binary, characters of
    /// the canonical string form otherwise.
    PropertyLength {
        selector: SelectorName,
        property: PropertyName,
    },
    /// Name of the selector's resolved node.
    NodeName { selector: SelectorName },
    /// Name of the resolved node without its namespace prefix.
    NodeLocalName { selector: SelectorName },
    /// Depth of the resolved node (root = 0).
    NodeDepth { selector: SelectorName },
    /// Absolute path of the resolved node.
    NodePath { selector: SelectorName },
    /// Full-text relevance score computed by the engine.
    FullTextSearchScore { selector: SelectorName },
    /// Case-folded inner operand; defined iff the inner operand is defined
    /// and string-typed.
    LowerCase(Box<Self>),
    UpperCase(Box<Self>),
}

impl DynamicOperand {
    #[must_use]
    pub const fn property_value(selector: SelectorName, property: PropertyName) -> Self {
        Self::PropertyValue { selector, property }
    }

    #[must_use]
    pub const fn property_length(selector: SelectorName, property: PropertyName) -> Self {
        Self::PropertyLength { selector, property }
    }

    #[must_use]
    pub const fn node_name(selector: SelectorName) -> Self {
        Self::NodeName { selector }
    }

    #[must_use]
    pub const fn node_local_name(selector: SelectorName) -> Self {
        Self::NodeLocalName { selector }
    }

    #[must_use]
    pub const fn node_depth(selector: SelectorName) -> Self {
        Self::NodeDepth { selector }
    }

    #[must_use]
    pub const fn node_path(selector: SelectorName) -> Self {
        Self::NodePath { selector }
    }

    #[must_use]
    pub const fn full_text_search_score(selector: SelectorName) -> Self {
        Self::FullTextSearchScore { selector }
    }

    #[must_use]
    pub fn lower_case(inner: Self) -> Self {
        Self::LowerCase(Box::new(inner))
    }

    #[must_use]
    pub fn upper_case(inner: Self) -> Self {
        Self::UpperCase(Box::new(inner))
    }

    /// Selector this operand reads from, looking through case wrappers.
    #[must_use]
    pub fn selector(&self) -> &SelectorName {
        match self {
            Self::PropertyValue { selector, .. }
            | Self::PropertyLength { selector, .. }
            | Self::NodeName { selector }
            | Self::NodeLocalName { selector }
            | Self::NodeDepth { selector }
            | Self::NodePath { selector }
            | Self::FullTextSearchScore { selector } => selector,
            Self::LowerCase(inner) | Self::UpperCase(inner) => inner.selector(),
        }
    }
}

///
/// Operand
///
/// Right-hand side of a comparison: static or dynamic.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Operand {
    Static(StaticOperand),
    Dynamic(DynamicOperand),
}

impl From<StaticOperand> for Operand {
    fn from(op: StaticOperand) -> Self {
        Self::Static(op)
    }
}

impl From<DynamicOperand> for Operand {
    fn from(op: DynamicOperand) -> Self {
        Self::Dynamic(op)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Static(StaticOperand::Literal(value))
    }
}

///
/// Bindings
///
/// Values for bind variables, supplied by the caller at evaluation time.
/// An unbound variable evaluates to no value.
///

#[derive(Clone, Debug, Default)]
pub struct Bindings {
    values: BTreeMap<String, Value>,
}

impl Bindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}
