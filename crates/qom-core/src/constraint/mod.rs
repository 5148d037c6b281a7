mod eval;
mod like;
mod truth;


pub use truth::Truth;

use crate::{
    ident::{PropertyName, SelectorName},
    node::NodePath,
    operand::{DynamicOperand, Operand},
};
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr};

///
/// Constraint AST
///
/// Pure, schema-agnostic boolean-predicate tree over node-tuples. This layer
/// contains no selector resolution or validation; all interpretation occurs
/// in later passes:
///
/// - validation (selector namespace, schema-aware)
/// - evaluation (three-valued, per tuple)
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

///
/// Constraint
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Constraint {
    And(Box<Self>, Box<Self>),
    Or(Box<Self>, Box<Self>),
    Not(Box<Self>),

    /// Dynamic operand compared against a static or dynamic operand.
    Comparison {
        left: DynamicOperand,
        op: CompareOp,
        right: Operand,
    },

    /// Full-text search over a node (or one of its properties), delegated to
    /// the engine's index.
    FullTextSearch {
        selector: SelectorName,
        property: Option<PropertyName>,
        expression: String,
    },

    /// The selector's node is the node at `path`.
    SameNode {
        selector: SelectorName,
        path: NodePath,
    },

    /// The selector's node is a child of the node at `parent_path`.
    ChildNode {
        selector: SelectorName,
        parent_path: NodePath,
    },

    /// The selector's node is a descendant of the node at `ancestor_path`.
    DescendantNode {
        selector: SelectorName,
        ancestor_path: NodePath,
    },

    /// The named property exists on the selector's node.
    PropertyExistence {
        selector: SelectorName,
        property: PropertyName,
    },
}

impl Constraint {
    #[must_use]
    pub fn and(left: Self, right: Self) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    #[must_use]
    pub fn or(left: Self, right: Self) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    #[must_use]
    pub fn comparison(left: DynamicOperand, op: CompareOp, right: impl Into<Operand>) -> Self {
        Self::Comparison {
            left,
            op,
            right: right.into(),
        }
    }

    #[must_use]
    pub fn eq(left: DynamicOperand, right: impl Into<Operand>) -> Self {
        Self::comparison(left, CompareOp::Eq, right)
    }

    #[must_use]
    pub fn ne(left: DynamicOperand, right: impl Into<Operand>) -> Self {
        Self::comparison(left, CompareOp::Ne, right)
    }

    #[must_use]
    pub fn lt(left: DynamicOperand, right: impl Into<Operand>) -> Self {
        Self::comparison(left, CompareOp::Lt, right)
    }

    #[must_use]
    pub fn le(left: DynamicOperand, right: impl Into<Operand>) -> Self {
        Self::comparison(left, CompareOp::Le, right)
    }

    #[must_use]
    pub fn gt(left: DynamicOperand, right: impl Into<Operand>) -> Self {
        Self::comparison(left, CompareOp::Gt, right)
    }

    #[must_use]
    pub fn ge(left: DynamicOperand, right: impl Into<Operand>) -> Self {
        Self::comparison(left, CompareOp::Ge, right)
    }

    #[must_use]
    pub fn like(left: DynamicOperand, right: impl Into<Operand>) -> Self {
        Self::comparison(left, CompareOp::Like, right)
    }

    #[must_use]
    pub fn full_text_search(
        selector: SelectorName,
        property: Option<PropertyName>,
        expression: impl Into<String>,
    ) -> Self {
        Self::FullTextSearch {
            selector,
            property,
            expression: expression.into(),
        }
    }

    #[must_use]
    pub const fn same_node(selector: SelectorName, path: NodePath) -> Self {
        Self::SameNode { selector, path }
    }

    #[must_use]
    pub const fn child_node(selector: SelectorName, parent_path: NodePath) -> Self {
        Self::ChildNode {
            selector,
            parent_path,
        }
    }

    #[must_use]
    pub const fn descendant_node(selector: SelectorName, ancestor_path: NodePath) -> Self {
        Self::DescendantNode {
            selector,
            ancestor_path,
        }
    }

    #[must_use]
    pub const fn property_existence(selector: SelectorName, property: PropertyName) -> Self {
        Self::PropertyExistence { selector, property }
    }
}

impl BitAnd for Constraint {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::and(self, rhs)
    }
}

impl BitOr for Constraint {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::or(self, rhs)
    }
}
