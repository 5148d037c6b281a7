mod eval;


use crate::{
    ident::{InvalidIdentifierError, PropertyName, SelectorName, validate_identifier},
    node::NodePathError,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// SourceError
///
/// Structural violations caught while assembling a source tree.
/// Assembly fails fast; a structurally invalid source is never produced.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SourceError {
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifierError),

    #[error(transparent)]
    InvalidPath(#[from] NodePathError),

    #[error("selector name '{selector}' is bound on both sides of a join")]
    DuplicateSelectorName { selector: String },
}

///
/// JoinType
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum JoinType {
    Inner,
    LeftOuter,
    RightOuter,
}

///
/// JoinCondition
///
/// Predicate deciding whether a left tuple and a right tuple combine.
/// Conditions reference selectors by name; validation checks those names
/// against the join's own subtrees.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum JoinCondition {
    /// A property of one selector equals a property of the other.
    EquiJoin {
        selector1: SelectorName,
        property1: PropertyName,
        selector2: SelectorName,
        property2: PropertyName,
    },

    /// The child selector's node is a child of the parent selector's node.
    ChildNode {
        child_selector: SelectorName,
        parent_selector: SelectorName,
    },

    /// The descendant selector's node is a descendant of the ancestor
    /// selector's node.
    DescendantNode {
        descendant_selector: SelectorName,
        ancestor_selector: SelectorName,
    },

    /// Both selectors resolve to the same node, optionally offset by a
    /// relative path below the second selector's node.
    SameNode {
        selector1: SelectorName,
        selector2: SelectorName,
        selector2_path: Option<String>,
    },
}

impl JoinCondition {
    /// Selector names this condition references.
    #[must_use]
    pub fn selectors(&self) -> [&SelectorName; 2] {
        match self {
            Self::EquiJoin {
                selector1,
                selector2,
                ..
            }
            | Self::SameNode {
                selector1,
                selector2,
                ..
            } => [selector1, selector2],
            Self::ChildNode {
                child_selector,
                parent_selector,
            } => [child_selector, parent_selector],
            Self::DescendantNode {
                descendant_selector,
                ancestor_selector,
            } => [descendant_selector, ancestor_selector],
        }
    }
}

///
/// Source
///
/// Node-tuple source: a selector names one node-type subtree; a join
/// combines two sources under a condition. The union of selector names in a
/// query's source, in left-to-right declaration order, is the query's
/// selector namespace.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Source {
    Selector {
        node_type_name: String,
        selector_name: SelectorName,
    },
    Join {
        left: Box<Self>,
        right: Box<Self>,
        join_type: JoinType,
        condition: JoinCondition,
    },
}

impl Source {
    pub fn selector(
        node_type_name: impl Into<String>,
        selector_name: SelectorName,
    ) -> Result<Self, SourceError> {
        let node_type_name = node_type_name.into();
        validate_identifier(&node_type_name)?;

        Ok(Self::Selector {
            node_type_name,
            selector_name,
        })
    }

    /// Join two sources. The sides must bind disjoint selector names.
    pub fn join(
        left: Self,
        right: Self,
        join_type: JoinType,
        condition: JoinCondition,
    ) -> Result<Self, SourceError> {
        let left_names: BTreeSet<&str> = left
            .selector_names()
            .into_iter()
            .map(SelectorName::as_str)
            .collect();

        for name in right.selector_names() {
            if left_names.contains(name.as_str()) {
                return Err(SourceError::DuplicateSelectorName {
                    selector: name.as_str().to_string(),
                });
            }
        }

        if let JoinCondition::SameNode {
            selector2_path: Some(relative),
            ..
        } = &condition
        {
            // validate the relative path once, at assembly time
            crate::node::NodePath::root().resolve(relative)?;
        }

        Ok(Self::Join {
            left: Box::new(left),
            right: Box::new(right),
            join_type,
            condition,
        })
    }

    /// Selector names bound by this source, in declaration order.
    #[must_use]
    pub fn selector_names(&self) -> Vec<&SelectorName> {
        match self {
            Self::Selector { selector_name, .. } => vec![selector_name],
            Self::Join { left, right, .. } => {
                let mut names = left.selector_names();
                names.extend(right.selector_names());
                names
            }
        }
    }

    /// Node type bound to a selector name, if this source binds it.
    #[must_use]
    pub fn node_type_of(&self, selector: &str) -> Option<&str> {
        match self {
            Self::Selector {
                node_type_name,
                selector_name,
            } => (selector_name.as_str() == selector).then_some(node_type_name.as_str()),
            Self::Join { left, right, .. } => left
                .node_type_of(selector)
                .or_else(|| right.node_type_of(selector)),
        }
    }
}
