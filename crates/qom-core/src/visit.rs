//! Pre-order traversal over assembled query trees.
//!
//! Visitors get one hook per node kind; every hook defaults to a no-op, so
//! an implementation only overrides the kinds it cares about. Traversal
//! order is fixed: source (selectors before join conditions), constraint,
//! orderings, then columns.

use crate::{
    column::Column,
    constraint::Constraint,
    operand::{DynamicOperand, Operand, StaticOperand},
    ordering::Ordering,
    query::Query,
    source::{JoinCondition, Source},
};

///
/// QueryVisitor
///

pub trait QueryVisitor {
    fn visit_source(&mut self, _source: &Source) {}
    fn visit_join_condition(&mut self, _condition: &JoinCondition) {}
    fn visit_constraint(&mut self, _constraint: &Constraint) {}
    fn visit_static_operand(&mut self, _operand: &StaticOperand) {}
    fn visit_dynamic_operand(&mut self, _operand: &DynamicOperand) {}
    fn visit_ordering(&mut self, _ordering: &Ordering) {}
    fn visit_column(&mut self, _column: &Column) {}
}

pub fn walk_query<V: QueryVisitor>(visitor: &mut V, query: &Query) {
    walk_source(visitor, query.source());

    if let Some(constraint) = query.constraint() {
        walk_constraint(visitor, constraint);
    }

    for ordering in query.orderings() {
        visitor.visit_ordering(ordering);
        walk_dynamic_operand(visitor, &ordering.operand);
    }

    for column in query.columns() {
        visitor.visit_column(column);
    }
}

pub fn walk_source<V: QueryVisitor>(visitor: &mut V, source: &Source) {
    visitor.visit_source(source);

    if let Source::Join {
        left,
        right,
        condition,
        ..
    } = source
    {
        walk_source(visitor, left);
        walk_source(visitor, right);
        visitor.visit_join_condition(condition);
    }
}

pub fn walk_constraint<V: QueryVisitor>(visitor: &mut V, constraint: &Constraint) {
    visitor.visit_constraint(constraint);

    match constraint {
        Constraint::And(a, b) | Constraint::Or(a, b) => {
            walk_constraint(visitor, a);
            walk_constraint(visitor, b);
        }
        Constraint::Not(inner) => walk_constraint(visitor, inner),
        Constraint::Comparison { left, right, .. } => {
            walk_dynamic_operand(visitor, left);
            walk_operand(visitor, right);
        }
        Constraint::FullTextSearch { .. }
        | Constraint::SameNode { .. }
        | Constraint::ChildNode { .. }
        | Constraint::DescendantNode { .. }
        | Constraint::PropertyExistence { .. } => {}
    }
}

pub fn walk_operand<V: QueryVisitor>(visitor: &mut V, operand: &Operand) {
    match operand {
        Operand::Static(inner) => visitor.visit_static_operand(inner),
        Operand::Dynamic(inner) => walk_dynamic_operand(visitor, inner),
    }
}

pub fn walk_dynamic_operand<V: QueryVisitor>(visitor: &mut V, operand: &DynamicOperand) {
    visitor.visit_dynamic_operand(operand);

    match operand {
        DynamicOperand::LowerCase(inner) | DynamicOperand::UpperCase(inner) => {
            walk_dynamic_operand(visitor, inner);
        }
        _ => {}
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constraint::CompareOp,
        operand::StaticOperand,
        source::JoinType,
        test_support::{prop_name, sel, v_long},
    };

    #[derive(Default)]
    struct Counter {
        sources: usize,
        conditions: usize,
        constraints: usize,
        dynamics: usize,
        statics: usize,
    }

    impl QueryVisitor for Counter {
        fn visit_source(&mut self, _: &Source) {
            self.sources += 1;
        }
        fn visit_join_condition(&mut self, _: &JoinCondition) {
            self.conditions += 1;
        }
        fn visit_constraint(&mut self, _: &Constraint) {
            self.constraints += 1;
        }
        fn visit_static_operand(&mut self, _: &StaticOperand) {
            self.statics += 1;
        }
        fn visit_dynamic_operand(&mut self, _: &DynamicOperand) {
            self.dynamics += 1;
        }
    }

    #[test]
    fn traversal_reaches_every_node_once() {
        let source = Source::join(
            Source::selector("file", sel("f")).unwrap(),
            Source::selector("folder", sel("d")).unwrap(),
            JoinType::Inner,
            JoinCondition::ChildNode {
                child_selector: sel("f"),
                parent_selector: sel("d"),
            },
        )
        .unwrap();

        let constraint = Constraint::not(Constraint::and(
            Constraint::eq(
                DynamicOperand::lower_case(DynamicOperand::property_value(
                    sel("f"),
                    prop_name("mimeType"),
                )),
                StaticOperand::literal(v_long(1)),
            ),
            Constraint::comparison(
                DynamicOperand::node_depth(sel("d")),
                CompareOp::Lt,
                DynamicOperand::node_depth(sel("f")),
            ),
        ));

        let mut counter = Counter::default();
        walk_source(&mut counter, &source);
        walk_constraint(&mut counter, &constraint);

        // join + two selectors
        assert_eq!(counter.sources, 3);
        assert_eq!(counter.conditions, 1);
        // not, and, two comparisons
        assert_eq!(counter.constraints, 4);
        // lower_case + its inner property, depth, depth
        assert_eq!(counter.dynamics, 4);
        assert_eq!(counter.statics, 1);
    }
}
