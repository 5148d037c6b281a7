//! Result columns and implicit column expansion.

use crate::{
    ident::{PropertyName, SelectorName},
    node::{Node, NodeTuple},
    schema::Schema,
    source::Source,
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// Column
///
/// One projected result column. A column with no property is a wildcard
/// standing for every single-valued non-residual property its selector's
/// node type declares; expansion replaces it before execution.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Column {
    pub selector: SelectorName,
    pub property: Option<PropertyName>,
    /// Explicit result label. Defaults to `selector.property` when absent.
    pub column_name: Option<String>,
}

impl Column {
    #[must_use]
    pub const fn new(
        selector: SelectorName,
        property: Option<PropertyName>,
        column_name: Option<String>,
    ) -> Self {
        Self {
            selector,
            property,
            column_name,
        }
    }

    /// Concrete column over one property, default label.
    #[must_use]
    pub const fn of(selector: SelectorName, property: PropertyName) -> Self {
        Self::new(selector, Some(property), None)
    }

    /// Wildcard column covering every expandable property of the selector.
    #[must_use]
    pub const fn wildcard(selector: SelectorName) -> Self {
        Self::new(selector, None, None)
    }

    #[must_use]
    pub fn named(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = Some(column_name.into());
        self
    }

    /// Result label: the explicit name when set, otherwise
    /// `selector.property`. Wildcards have no label until expanded.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        if let Some(name) = &self.column_name {
            return Some(name.clone());
        }

        self.property
            .as_ref()
            .map(|property| format!("{}.{}", self.selector.as_str(), property.as_str()))
    }

    /// Project this column against one tuple.
    ///
    /// Yields the property's value when the node is present and the property
    /// holds exactly one value; absent nodes, absent properties, and
    /// multi-valued properties all project to nothing. Wildcards project to
    /// nothing; expansion must run first.
    #[must_use]
    pub fn project<N: Node>(&self, tuple: &NodeTuple<'_, N>) -> Option<Value> {
        let property = self.property.as_ref()?;
        let node = tuple.node(self.selector.as_str())?;
        let values = node.property(property.as_str())?;

        match values {
            [value] => Some(value.clone()),
            _ => None,
        }
    }
}

/// Expand a column list against a source and schema.
///
/// An empty list means one wildcard per selector, in declaration order. Each
/// wildcard becomes one concrete column per single-valued non-residual
/// property of its selector's node type, in the type's declaration order.
/// Selectors whose node type is not registered expand to nothing; validation
/// reports those separately.
#[must_use]
pub fn expand(columns: &[Column], source: &Source, schema: &Schema) -> Vec<Column> {
    let implicit: Vec<Column>;
    let columns = if columns.is_empty() {
        implicit = source
            .selector_names()
            .into_iter()
            .map(|selector| Column::wildcard(selector.clone()))
            .collect();
        &implicit
    } else {
        columns
    };

    let mut expanded = Vec::new();
    for column in columns {
        if column.property.is_some() {
            expanded.push(column.clone());
            continue;
        }

        let Some(def) = source
            .node_type_of(column.selector.as_str())
            .and_then(|name| schema.node_type(name))
        else {
            continue;
        };

        for property in def.single_valued_non_residual() {
            expanded.push(Column::of(column.selector.clone(), property.name.clone()));
        }
    }

    expanded
}

///
/// TESTS
///
