//! Assembled queries.
//!
//! A `Query` is immutable once built: assembly validates the whole tree
//! against the schema and expands wildcard columns, so an existing query is
//! always structurally sound. Execution here is the reference semantics an
//! engine must reproduce, not an execution plan.

mod validate;

#[cfg(test)]
mod tests;

pub use validate::{ValidityReport, Violation, ViolationKind};

use crate::{
    column::{self, Column},
    constraint::Constraint,
    node::{Node, NodeProvider, NodeTuple},
    operand::{Bindings, StaticOperand},
    ordering::{Ordering, sort_tuples},
    schema::Schema,
    source::Source,
    value::Value,
    visit::{QueryVisitor, walk_query},
};
use serde::Serialize;
use std::collections::BTreeSet;

///
/// Query
///
/// Serializes for embedders that want to ship a query across a boundary, but
/// deliberately does not deserialize: `Query::new` is the only construction
/// path, so an existing query is always validated and column-expanded.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Query {
    source: Source,
    constraint: Option<Constraint>,
    orderings: Vec<Ordering>,
    columns: Vec<Column>,
}

impl Query {
    /// Assemble and validate a query.
    ///
    /// Wildcard and implicit columns are expanded here, against the schema
    /// the query was validated with. Any violation fails assembly; the
    /// report carries all of them.
    pub fn new(
        source: Source,
        constraint: Option<Constraint>,
        orderings: Vec<Ordering>,
        columns: Vec<Column>,
        schema: &Schema,
    ) -> Result<Self, ValidityReport> {
        validate::validate(&source, constraint.as_ref(), &orderings, &columns, schema)
            .into_result()?;

        let columns = column::expand(&columns, &source, schema);

        Ok(Self {
            source,
            constraint,
            orderings,
            columns,
        })
    }

    #[must_use]
    pub const fn source(&self) -> &Source {
        &self.source
    }

    #[must_use]
    pub const fn constraint(&self) -> Option<&Constraint> {
        self.constraint.as_ref()
    }

    #[must_use]
    pub fn orderings(&self) -> &[Ordering] {
        &self.orderings
    }

    /// Result columns, fully expanded.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Bind variable names the query references, in first-appearance order.
    #[must_use]
    pub fn bind_variables(&self) -> Vec<String> {
        let mut collector = BindVariables::default();
        walk_query(&mut collector, self);

        collector.names
    }

    /// Check that every referenced bind variable has a value.
    ///
    /// Advisory: execution treats an unbound variable as no value, which
    /// makes its comparisons unknown instead of failing.
    pub fn validate_bindings(&self, bindings: &Bindings) -> Result<(), ValidityReport> {
        let violations = self
            .bind_variables()
            .into_iter()
            .filter(|name| !bindings.contains(name))
            .map(|name| Violation {
                at: "bindings".to_string(),
                kind: ViolationKind::UnboundVariable { name },
            })
            .collect();

        ValidityReport { violations }.into_result()
    }

    /// Reference execution: resolve the source, keep tuples whose constraint
    /// comes out true, then apply the orderings with a stable sort.
    #[must_use]
    pub fn execute<'a, N, P>(&self, provider: &'a P, bindings: &Bindings) -> Vec<NodeTuple<'a, N>>
    where
        N: Node,
        P: NodeProvider<N>,
    {
        let mut tuples: Vec<NodeTuple<'a, N>> = self
            .source
            .resolve(provider)
            .into_iter()
            .filter(|tuple| {
                self.constraint
                    .as_ref()
                    .is_none_or(|c| c.eval(tuple, bindings).is_true())
            })
            .collect();

        sort_tuples(&self.orderings, &mut tuples);

        tuples
    }

    /// Project one result tuple through the query's columns.
    ///
    /// Each entry is (label, value); a column over an absent node, absent
    /// property, or multi-valued property yields no value for that tuple.
    #[must_use]
    pub fn project<N: Node>(&self, tuple: &NodeTuple<'_, N>) -> Vec<(String, Option<Value>)> {
        self.columns
            .iter()
            .map(|column| (column.label().unwrap_or_default(), column.project(tuple)))
            .collect()
    }
}

///
/// BindVariables
///

#[derive(Default)]
struct BindVariables {
    names: Vec<String>,
    seen: BTreeSet<String>,
}

impl QueryVisitor for BindVariables {
    fn visit_static_operand(&mut self, operand: &StaticOperand) {
        if let StaticOperand::BindVariable(name) = operand {
            if self.seen.insert(name.clone()) {
                self.names.push(name.clone());
            }
        }
    }
}
