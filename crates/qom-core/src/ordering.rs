//! Result ordering.
//!
//! Tuples compare by evaluating the ordering list left to right; the first
//! non-equal key decides. A missing operand value sorts before any defined
//! value ascending. When every key compares equal the relative order is
//! implementation-defined: the sort is stable, but that stability is not
//! part of the contract.

use crate::{
    node::{Node, NodeTuple},
    operand::DynamicOperand,
    value::{Value, compare::ordering_key_cmp},
};
use serde::{Deserialize, Serialize};
use std::cmp;

///
/// Direction
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

///
/// Ordering
///
/// One (operand, direction) sort key.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Ordering {
    pub operand: DynamicOperand,
    pub direction: Direction,
}

impl Ordering {
    #[must_use]
    pub const fn ascending(operand: DynamicOperand) -> Self {
        Self {
            operand,
            direction: Direction::Asc,
        }
    }

    #[must_use]
    pub const fn descending(operand: DynamicOperand) -> Self {
        Self {
            operand,
            direction: Direction::Desc,
        }
    }
}

/// Compare two tuples under an ordering list.
#[must_use]
pub fn compare_tuples<N: Node>(
    orderings: &[Ordering],
    a: &NodeTuple<'_, N>,
    b: &NodeTuple<'_, N>,
) -> cmp::Ordering {
    for ordering in orderings {
        let key_a = ordering.operand.eval(a);
        let key_b = ordering.operand.eval(b);

        let cmp = compare_keys(key_a.as_ref(), key_b.as_ref());
        let cmp = match ordering.direction {
            Direction::Asc => cmp,
            Direction::Desc => cmp.reverse(),
        };

        if cmp != cmp::Ordering::Equal {
            return cmp;
        }
    }

    cmp::Ordering::Equal
}

/// Sort tuples by the ordering list.
///
/// The sort is stable so the guaranteed prefix of the order is reproducible;
/// tuples whose keys all compare equal stay in an implementation-defined
/// relative order.
pub fn sort_tuples<N: Node>(orderings: &[Ordering], tuples: &mut [NodeTuple<'_, N>]) {
    if orderings.is_empty() {
        return;
    }

    tuples.sort_by(|a, b| compare_tuples(orderings, a, b));
}

// None sorts before any defined value ascending.
fn compare_keys(a: Option<&Value>, b: Option<&Value>) -> cmp::Ordering {
    match (a, b) {
        (None, None) => cmp::Ordering::Equal,
        (None, Some(_)) => cmp::Ordering::Less,
        (Some(_), None) => cmp::Ordering::Greater,
        (Some(a), Some(b)) => ordering_key_cmp(a, b),
    }
}

///
/// TESTS
///
