use crate::{
    ident::SelectorName,
    node::{Node, NodeProvider, NodeTuple},
    source::{JoinCondition, JoinType, Source},
};

impl Source {
    ///
    /// Reference evaluation: the candidate node-tuple set this source
    /// denotes, before any constraint filtering.
    ///
    /// This is the semantics an engine must reproduce, not an execution
    /// plan; the engine is free to stream, index, or reorder as long as the
    /// logical result set matches.
    ///
    #[must_use]
    pub fn resolve<'a, N, P>(&self, provider: &'a P) -> Vec<NodeTuple<'a, N>>
    where
        N: Node,
        P: NodeProvider<N>,
    {
        match self {
            Self::Selector {
                node_type_name,
                selector_name,
            } => provider
                .nodes_of_type(node_type_name)
                .into_iter()
                .map(|node| NodeTuple::single(selector_name.clone(), node))
                .collect(),

            Self::Join {
                left,
                right,
                join_type,
                condition,
            } => {
                let left_tuples = left.resolve(provider);
                let right_tuples = right.resolve(provider);

                join(
                    &left_tuples,
                    &right_tuples,
                    *join_type,
                    condition,
                    &owned(&left.selector_names()),
                    &owned(&right.selector_names()),
                )
            }
        }
    }
}

fn owned(names: &[&SelectorName]) -> Vec<SelectorName> {
    names.iter().map(|name| (*name).clone()).collect()
}

fn join<'a, N: Node>(
    left_tuples: &[NodeTuple<'a, N>],
    right_tuples: &[NodeTuple<'a, N>],
    join_type: JoinType,
    condition: &JoinCondition,
    left_selectors: &[SelectorName],
    right_selectors: &[SelectorName],
) -> Vec<NodeTuple<'a, N>> {
    let mut out = Vec::new();

    match join_type {
        JoinType::Inner => {
            for l in left_tuples {
                for r in right_tuples {
                    let merged = l.merged(r);
                    if condition_holds(condition, &merged) {
                        out.push(merged);
                    }
                }
            }
        }

        JoinType::LeftOuter => {
            for l in left_tuples {
                let mut matched = false;
                for r in right_tuples {
                    let merged = l.merged(r);
                    if condition_holds(condition, &merged) {
                        out.push(merged);
                        matched = true;
                    }
                }
                if !matched {
                    // keep the left tuple; the right side's entries are empty
                    out.push(l.clone().padded(right_selectors));
                }
            }
        }

        JoinType::RightOuter => {
            for r in right_tuples {
                let mut matched = false;
                for l in left_tuples {
                    let merged = l.merged(r);
                    if condition_holds(condition, &merged) {
                        out.push(merged);
                        matched = true;
                    }
                }
                if !matched {
                    // empty left entries first, keeping namespace order
                    out.push(NodeTuple::new().padded(left_selectors).merged(r));
                }
            }
        }
    }

    out
}

/// Whether a join condition holds on a combined tuple.
///
/// Two-valued: a missing node, missing property, or non-comparable value
/// pair means the combination is not kept. Equi-join over multi-valued
/// properties holds iff any pair of values is equal.
fn condition_holds<N: Node>(condition: &JoinCondition, tuple: &NodeTuple<'_, N>) -> bool {
    match condition {
        JoinCondition::EquiJoin {
            selector1,
            property1,
            selector2,
            property2,
        } => {
            let Some(node1) = tuple.node(selector1.as_str()) else {
                return false;
            };
            let Some(node2) = tuple.node(selector2.as_str()) else {
                return false;
            };
            let (Some(values1), Some(values2)) = (
                node1.property(property1.as_str()),
                node2.property(property2.as_str()),
            ) else {
                return false;
            };

            values1.iter().any(|v1| {
                values2
                    .iter()
                    .any(|v2| v1.try_eq(v2).unwrap_or(false))
            })
        }

        JoinCondition::ChildNode {
            child_selector,
            parent_selector,
        } => paths(tuple, child_selector, parent_selector)
            .is_some_and(|(child, parent)| child.is_child_of(parent)),

        JoinCondition::DescendantNode {
            descendant_selector,
            ancestor_selector,
        } => paths(tuple, descendant_selector, ancestor_selector)
            .is_some_and(|(descendant, ancestor)| descendant.is_descendant_of(ancestor)),

        JoinCondition::SameNode {
            selector1,
            selector2,
            selector2_path,
        } => paths(tuple, selector1, selector2).is_some_and(|(path1, path2)| {
            match selector2_path {
                // relative path validated at assembly time
                Some(relative) => path2
                    .resolve(relative)
                    .is_ok_and(|expected| path1.is_same(&expected)),
                None => path1.is_same(path2),
            }
        }),
    }
}

fn paths<'a, N: Node>(
    tuple: &NodeTuple<'a, N>,
    a: &SelectorName,
    b: &SelectorName,
) -> Option<(&'a crate::node::NodePath, &'a crate::node::NodePath)> {
    let node_a = tuple.node(a.as_str())?;
    let node_b = tuple.node(b.as_str())?;

    Some((node_a.path(), node_b.path()))
}
