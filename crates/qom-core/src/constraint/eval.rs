use crate::{
    constraint::{CompareOp, Constraint, Truth, like::like_match},
    node::{Node, NodeTuple},
    operand::{Bindings, DynamicOperand, Operand},
    value::Value,
};
use std::cmp::Ordering;

impl Constraint {
    ///
    /// Evaluate this constraint against a single node-tuple.
    ///
    /// Three-valued: value-level problems (missing operand value, type
    /// mismatch, multi-valued operand) come out Unknown and never abort
    /// evaluation. Structural and existence predicates are two-valued: an
    /// empty selector entry simply fails them.
    ///
    /// A tuple belongs to the filtered result iff the root constraint
    /// evaluates to True; False and Unknown are both excluded.
    ///
    #[must_use]
    pub fn eval<N: Node>(&self, tuple: &NodeTuple<'_, N>, bindings: &Bindings) -> Truth {
        match self {
            Self::And(left, right) => left.eval(tuple, bindings).and(right.eval(tuple, bindings)),
            Self::Or(left, right) => left.eval(tuple, bindings).or(right.eval(tuple, bindings)),
            Self::Not(inner) => inner.eval(tuple, bindings).not(),

            Self::Comparison { left, op, right } => {
                eval_comparison(left, *op, right, tuple, bindings)
            }

            Self::FullTextSearch {
                selector,
                property,
                expression,
            } => tuple
                .node(selector.as_str())
                .is_some_and(|node| {
                    node.full_text_matches(property.as_ref().map(|p| p.as_str()), expression)
                })
                .into(),

            Self::SameNode { selector, path } => tuple
                .node(selector.as_str())
                .is_some_and(|node| node.path().is_same(path))
                .into(),

            Self::ChildNode {
                selector,
                parent_path,
            } => tuple
                .node(selector.as_str())
                .is_some_and(|node| node.path().is_child_of(parent_path))
                .into(),

            Self::DescendantNode {
                selector,
                ancestor_path,
            } => tuple
                .node(selector.as_str())
                .is_some_and(|node| node.path().is_descendant_of(ancestor_path))
                .into(),

            Self::PropertyExistence { selector, property } => tuple
                .node(selector.as_str())
                .is_some_and(|node| node.property(property.as_str()).is_some())
                .into(),
        }
    }
}

///
/// Evaluate a single comparison against a tuple.
///
/// Unknown if:
/// - either operand has no value for this tuple
/// - the operand types are not comparable
/// - `Like` is applied to a non string-like value
///
fn eval_comparison<N: Node>(
    left: &DynamicOperand,
    op: CompareOp,
    right: &Operand,
    tuple: &NodeTuple<'_, N>,
    bindings: &Bindings,
) -> Truth {
    let Some(lhs) = left.eval(tuple) else {
        return Truth::Unknown;
    };
    let Some(rhs) = right.eval(tuple, bindings) else {
        return Truth::Unknown;
    };

    if op == CompareOp::Like {
        return eval_like(&lhs, &rhs);
    }

    match lhs.try_compare(&rhs) {
        Ok(ordering) => op_holds(op, ordering).into(),
        // mismatch is absorbed, not raised; missing data never throws
        Err(_) => Truth::Unknown,
    }
}

fn eval_like(lhs: &Value, rhs: &Value) -> Truth {
    match (lhs.as_text(), rhs.as_text()) {
        (Some(text), Some(pattern)) => like_match(text, pattern).into(),
        _ => Truth::Unknown,
    }
}

const fn op_holds(op: CompareOp, ordering: Ordering) -> bool {
    match op {
        CompareOp::Eq => ordering.is_eq(),
        CompareOp::Ne => ordering.is_ne(),
        CompareOp::Lt => ordering.is_lt(),
        CompareOp::Le => ordering.is_le(),
        CompareOp::Gt => ordering.is_gt(),
        CompareOp::Ge => ordering.is_ge(),
        // handled before ordering-based dispatch
        CompareOp::Like => false,
    }
}
