//! Engine-facing node contract.
//!
//! The core never resolves selectors against storage itself; it defines the
//! read-only interface a repository node must expose and the tuple shape
//! that source evaluation produces and constraint/ordering/column evaluation
//! consume.

use crate::{ident::SelectorName, ident::local_part, value::Value};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use thiserror::Error as ThisError;

///
/// NodePathError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum NodePathError {
    #[error("path is empty")]
    Empty,

    #[error("path '{path}' is not absolute")]
    NotAbsolute { path: String },

    #[error("path '{path}' contains an empty segment")]
    EmptySegment { path: String },

    #[error("relative path '{path}' must not start with '/'")]
    NotRelative { path: String },
}

///
/// NodePath
///
/// Absolute, normalized node path: `/` for the root, `/a/b/c` otherwise.
/// No empty segments, no trailing slash.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodePath(String);

impl NodePath {
    pub fn try_from_str(path: &str) -> Result<Self, NodePathError> {
        if path.is_empty() {
            return Err(NodePathError::Empty);
        }
        if !path.starts_with('/') {
            return Err(NodePathError::NotAbsolute {
                path: path.to_string(),
            });
        }
        if path == "/" {
            return Ok(Self(path.to_string()));
        }
        if path[1..].split('/').any(str::is_empty) {
            return Err(NodePathError::EmptySegment {
                path: path.to_string(),
            });
        }

        Ok(Self(path.to_string()))
    }

    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Number of segments below the root; the root itself has depth 0.
    #[must_use]
    pub fn depth(&self) -> u32 {
        if self.is_root() {
            0
        } else {
            self.as_str()[1..].split('/').count() as u32
        }
    }

    /// Last path segment; empty for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        self.as_str().rsplit('/').next().unwrap_or_default()
    }

    /// Last path segment without its namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        local_part(self.name())
    }

    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }

        match self.as_str().rsplit_once('/') {
            Some(("", _)) => Some(Self("/".to_string())),
            Some((parent, _)) => Some(Self(parent.to_string())),
            None => None,
        }
    }

    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }

    #[must_use]
    pub fn is_child_of(&self, parent: &Self) -> bool {
        self.parent().is_some_and(|p| p.is_same(parent))
    }

    /// Strict descendant: a path is not a descendant of itself.
    #[must_use]
    pub fn is_descendant_of(&self, ancestor: &Self) -> bool {
        if self.is_same(ancestor) {
            return false;
        }
        if ancestor.is_root() {
            return true;
        }

        self.as_str()
            .strip_prefix(ancestor.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Resolve a relative path (plain segments separated by `/`) against
    /// this path.
    pub fn resolve(&self, relative: &str) -> Result<Self, NodePathError> {
        if relative.is_empty() {
            return Err(NodePathError::Empty);
        }
        if relative.starts_with('/') {
            return Err(NodePathError::NotRelative {
                path: relative.to_string(),
            });
        }
        if relative.split('/').any(str::is_empty) {
            return Err(NodePathError::EmptySegment {
                path: relative.to_string(),
            });
        }

        let base = if self.is_root() { "" } else { self.as_str() };

        Ok(Self(format!("{base}/{relative}")))
    }
}

impl TryFrom<&str> for NodePath {
    type Error = NodePathError;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        Self::try_from_str(path)
    }
}

impl TryFrom<String> for NodePath {
    type Error = NodePathError;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        Self::try_from_str(&path)
    }
}

impl From<NodePath> for String {
    fn from(path: NodePath) -> Self {
        path.as_str().to_string()
    }
}

impl Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// Node
///
/// Read-only contract a repository node exposes to the evaluator.
/// Properties distinguish absent (`None`) from present-with-values; a
/// present property always carries at least one value.
///

pub trait Node {
    fn path(&self) -> &NodePath;

    /// Primary node type name of this node.
    fn node_type(&self) -> &str;

    /// Values of the named property, or `None` when the node has no such
    /// property. Missing is not an error.
    fn property(&self, name: &str) -> Option<&[Value]>;

    /// Whether this node (or one of its properties) matches a full-text
    /// search expression. Engines without a full-text index keep the
    /// default, which matches nothing.
    fn full_text_matches(&self, _property: Option<&str>, _expression: &str) -> bool {
        false
    }

    /// Full-text relevance score of this node for the current query, if the
    /// engine computes one.
    fn full_text_score(&self) -> Option<f64> {
        None
    }
}

///
/// NodeProvider
///
/// Selector-resolution contract implemented by the external engine: all live
/// nodes whose primary or mixin type is, or is a subtype of, the named node
/// type. Subtype dispatch belongs to the provider, which owns the live
/// schema.
///

pub trait NodeProvider<N: Node> {
    fn nodes_of_type(&self, node_type_name: &str) -> Vec<&N>;
}

///
/// NodeTuple
///
/// One combination of resolved nodes, one entry per selector in the query's
/// namespace, in namespace order. An entry may be empty: an outer join keeps
/// tuples whose far side has no match, and every operand over that selector
/// then evaluates to no value.
///

#[derive(Debug)]
pub struct NodeTuple<'a, N> {
    entries: Vec<(SelectorName, Option<&'a N>)>,
}

// manual impl: entries hold references, so cloning needs no `N: Clone`
impl<N> Clone for NodeTuple<'_, N> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<'a, N> NodeTuple<'a, N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn single(selector: SelectorName, node: &'a N) -> Self {
        Self {
            entries: vec![(selector, Some(node))],
        }
    }

    pub(crate) fn push(&mut self, selector: SelectorName, node: Option<&'a N>) {
        self.entries.push((selector, node));
    }

    /// Node bound to the named selector, or `None` when the selector is not
    /// part of this tuple or its entry is empty.
    #[must_use]
    pub fn node(&self, selector: &str) -> Option<&'a N> {
        self.entries
            .iter()
            .find(|(name, _)| name.as_str() == selector)
            .and_then(|(_, node)| *node)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&SelectorName, Option<&'a N>)> {
        self.entries.iter().map(|(name, node)| (name, *node))
    }

    #[must_use]
    pub fn selectors(&self) -> Vec<&SelectorName> {
        self.entries.iter().map(|(name, _)| name).collect()
    }

    /// Concatenate two tuples with disjoint selector sets.
    #[must_use]
    pub(crate) fn merged(&self, other: &Self) -> Self {
        let mut entries = self.entries.clone();
        entries.extend(other.entries.iter().cloned());

        Self { entries }
    }

    /// Append empty entries for the given selectors (outer-join miss).
    #[must_use]
    pub(crate) fn padded(mut self, selectors: &[SelectorName]) -> Self {
        for selector in selectors {
            self.entries.push((selector.clone(), None));
        }

        self
    }
}

impl<N> Default for NodeTuple<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> NodePath {
        NodePath::try_from_str(s).unwrap()
    }

    #[test]
    fn rejects_malformed_paths() {
        assert!(matches!(
            NodePath::try_from_str(""),
            Err(NodePathError::Empty)
        ));
        assert!(matches!(
            NodePath::try_from_str("a/b"),
            Err(NodePathError::NotAbsolute { .. })
        ));
        assert!(matches!(
            NodePath::try_from_str("/a//b"),
            Err(NodePathError::EmptySegment { .. })
        ));
        assert!(matches!(
            NodePath::try_from_str("/a/"),
            Err(NodePathError::EmptySegment { .. })
        ));
    }

    #[test]
    fn depth_and_names() {
        assert_eq!(p("/").depth(), 0);
        assert_eq!(p("/").name(), "");
        assert_eq!(p("/a/b/c").depth(), 3);
        assert_eq!(p("/a/ns:b").name(), "ns:b");
        assert_eq!(p("/a/ns:b").local_name(), "b");
    }

    #[test]
    fn parent_child_descendant_relations() {
        assert_eq!(p("/a/b").parent(), Some(p("/a")));
        assert_eq!(p("/a").parent(), Some(p("/")));
        assert_eq!(p("/").parent(), None);

        assert!(p("/a/b").is_child_of(&p("/a")));
        assert!(p("/a").is_child_of(&p("/")));
        assert!(!p("/a/b/c").is_child_of(&p("/a")));

        assert!(p("/a/b/c").is_descendant_of(&p("/a")));
        assert!(p("/a").is_descendant_of(&p("/")));
        assert!(!p("/a").is_descendant_of(&p("/a")));
        // prefix of a segment name is not an ancestor
        assert!(!p("/abc").is_descendant_of(&p("/ab")));
    }

    #[test]
    fn resolve_relative_paths() {
        assert_eq!(p("/a").resolve("b/c").unwrap(), p("/a/b/c"));
        assert_eq!(p("/").resolve("a").unwrap(), p("/a"));

        assert!(matches!(
            p("/a").resolve("/b"),
            Err(NodePathError::NotRelative { .. })
        ));
        assert!(matches!(
            p("/a").resolve("b//c"),
            Err(NodePathError::EmptySegment { .. })
        ));
    }
}
