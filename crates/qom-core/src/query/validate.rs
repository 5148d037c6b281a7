//! Whole-query validation.
//!
//! Runs once at assembly time over the full tree. All findings are collected
//! into one report rather than failing on the first; a query is produced
//! only from an empty report.

use crate::{
    column::{self, Column},
    constraint::Constraint,
    ident::SelectorName,
    operand::DynamicOperand,
    ordering::Ordering,
    schema::Schema,
    source::Source,
    visit::{QueryVisitor, walk_constraint, walk_dynamic_operand},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Write;
use thiserror::Error as ThisError;

///
/// ViolationKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
pub enum ViolationKind {
    #[error("selector '{selector}' is not bound by the source")]
    UnresolvedSelectorReference { selector: String },

    #[error("selector name '{selector}' is bound more than once")]
    DuplicateSelectorName { selector: String },

    #[error("column name '{name}' is produced more than once")]
    DuplicateColumnName { name: String },

    #[error("node type '{name}' is not registered")]
    UnknownNodeType { name: String },

    #[error("bind variable '{name}' has no bound value")]
    UnboundVariable { name: String },
}

///
/// Violation
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Violation {
    /// Where in the query the violation was found.
    pub at: String,
    pub kind: ViolationKind,
}

///
/// ValidityReport
///
/// Every violation found in one validation pass. Doubles as the error type
/// of query assembly.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{}", self.render())]
pub struct ValidityReport {
    pub violations: Vec<Violation>,
}

impl ValidityReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_valid() { Ok(()) } else { Err(self) }
    }

    fn push(&mut self, at: impl Into<String>, kind: ViolationKind) {
        self.violations.push(Violation {
            at: at.into(),
            kind,
        });
    }

    fn render(&self) -> String {
        let mut out = format!("query is invalid ({} violations)", self.violations.len());
        for violation in &self.violations {
            let _ = write!(out, "; {} at {}", violation.kind, violation.at);
        }
        out
    }
}

/// Validate a query's parts against each other and the schema.
pub(crate) fn validate(
    source: &Source,
    constraint: Option<&Constraint>,
    orderings: &[Ordering],
    columns: &[Column],
    schema: &Schema,
) -> ValidityReport {
    let mut report = ValidityReport::default();

    check_source(source, schema, &mut report);

    let namespace: BTreeSet<&str> = source
        .selector_names()
        .into_iter()
        .map(SelectorName::as_str)
        .collect();

    if let Some(constraint) = constraint {
        let mut check = SelectorCheck::new(&namespace, "constraint");
        walk_constraint(&mut check, constraint);
        report.violations.extend(check.violations);
    }

    for (index, ordering) in orderings.iter().enumerate() {
        let mut check = SelectorCheck::new(&namespace, format!("ordering {index}"));
        walk_dynamic_operand(&mut check, &ordering.operand);
        report.violations.extend(check.violations);
    }

    check_columns(columns, source, schema, &namespace, &mut report);

    report
}

fn check_source(source: &Source, schema: &Schema, report: &mut ValidityReport) {
    // duplicate selector names across the whole namespace
    let mut seen = BTreeSet::new();
    for name in source.selector_names() {
        if !seen.insert(name.as_str()) {
            report.push(
                "source",
                ViolationKind::DuplicateSelectorName {
                    selector: name.as_str().to_string(),
                },
            );
        }
    }

    check_source_tree(source, schema, report);
}

fn check_source_tree(source: &Source, schema: &Schema, report: &mut ValidityReport) {
    match source {
        Source::Selector {
            node_type_name,
            selector_name,
        } => {
            if !schema.contains(node_type_name) {
                report.push(
                    format!("selector '{}'", selector_name.as_str()),
                    ViolationKind::UnknownNodeType {
                        name: node_type_name.clone(),
                    },
                );
            }
        }

        Source::Join {
            left,
            right,
            condition,
            ..
        } => {
            check_source_tree(left, schema, report);
            check_source_tree(right, schema, report);

            // a condition may reference any selector bound below this join
            let mut names: BTreeSet<&str> = left
                .selector_names()
                .into_iter()
                .map(SelectorName::as_str)
                .collect();
            names.extend(right.selector_names().into_iter().map(SelectorName::as_str));

            for selector in condition.selectors() {
                if !names.contains(selector.as_str()) {
                    report.push(
                        "join condition",
                        ViolationKind::UnresolvedSelectorReference {
                            selector: selector.as_str().to_string(),
                        },
                    );
                }
            }
        }
    }
}

fn check_columns(
    columns: &[Column],
    source: &Source,
    schema: &Schema,
    namespace: &BTreeSet<&str>,
    report: &mut ValidityReport,
) {
    for column in columns {
        if !namespace.contains(column.selector.as_str()) {
            report.push(
                "columns",
                ViolationKind::UnresolvedSelectorReference {
                    selector: column.selector.as_str().to_string(),
                },
            );
        }
    }

    // duplicate (selector, property) pairs are permitted and kept as-is;
    // only explicit column names must be unique
    let mut seen = BTreeSet::new();
    for column in column::expand(columns, source, schema) {
        let Some(name) = column.column_name else {
            continue;
        };
        if !seen.insert(name.clone()) {
            report.push("columns", ViolationKind::DuplicateColumnName { name });
        }
    }
}

///
/// SelectorCheck
///
/// Visitor flagging selector references outside the query's namespace.
///

struct SelectorCheck<'a> {
    namespace: &'a BTreeSet<&'a str>,
    at: String,
    violations: Vec<Violation>,
}

impl<'a> SelectorCheck<'a> {
    fn new(namespace: &'a BTreeSet<&'a str>, at: impl Into<String>) -> Self {
        Self {
            namespace,
            at: at.into(),
            violations: Vec::new(),
        }
    }

    fn check(&mut self, selector: &SelectorName) {
        if !self.namespace.contains(selector.as_str()) {
            self.violations.push(Violation {
                at: self.at.clone(),
                kind: ViolationKind::UnresolvedSelectorReference {
                    selector: selector.as_str().to_string(),
                },
            });
        }
    }
}

impl QueryVisitor for SelectorCheck<'_> {
    fn visit_dynamic_operand(&mut self, operand: &DynamicOperand) {
        // case wrappers delegate; their inner operand is visited on its own
        if !matches!(
            operand,
            DynamicOperand::LowerCase(_) | DynamicOperand::UpperCase(_)
        ) {
            self.check(operand.selector());
        }
    }

    fn visit_constraint(&mut self, constraint: &Constraint) {
        match constraint {
            Constraint::FullTextSearch { selector, .. }
            | Constraint::SameNode { selector, .. }
            | Constraint::ChildNode { selector, .. }
            | Constraint::DescendantNode { selector, .. }
            | Constraint::PropertyExistence { selector, .. } => self.check(selector),
            _ => {}
        }
    }
}
