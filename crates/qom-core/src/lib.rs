//! Core query object model: typed values, operands, constraints, sources,
//! orderings, columns, and the reference evaluation semantics a repository
//! engine must reproduce. Domain vocabulary is exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod column;
pub mod constraint;
pub mod ident;
pub mod node;
pub mod operand;
pub mod ordering;
pub mod query;
pub mod schema;
pub mod source;
pub mod value;
pub mod visit;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, evaluators, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        column::Column,
        constraint::{CompareOp, Constraint, Truth},
        ident::{PropertyName, SelectorName},
        node::{Node, NodePath, NodeProvider, NodeTuple},
        operand::{Bindings, DynamicOperand, Operand, StaticOperand},
        ordering::{Direction, Ordering},
        query::Query,
        schema::Schema,
        source::{JoinCondition, JoinType, Source},
        value::Value,
    };
}
