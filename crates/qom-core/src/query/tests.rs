use crate::{
    column::Column,
    constraint::Constraint,
    node::Node,
    operand::{Bindings, DynamicOperand, StaticOperand},
    ordering::Ordering,
    query::{Query, ViolationKind},
    source::{JoinCondition, JoinType, Source},
    test_support::{MemNode, MemRepo, file_schema, prop_name, sel, v_long, v_txt},
    value::Value,
};

fn repo() -> MemRepo {
    MemRepo::new(
        file_schema(),
        vec![
            MemNode::new("/docs", "folder"),
            MemNode::new("/docs/a.txt", "file")
                .prop("size", v_long(10))
                .prop("mimeType", v_txt("text/plain")),
            MemNode::new("/docs/b.bin", "file").prop("mimeType", v_txt("application/octet")),
            MemNode::new("/docs/c.txt", "file")
                .prop("size", v_long(30))
                .prop("mimeType", v_txt("text/plain")),
            MemNode::new("/empty", "folder"),
        ],
    )
}

fn files() -> Source {
    Source::selector("file", sel("f")).unwrap()
}

fn size() -> DynamicOperand {
    DynamicOperand::property_value(sel("f"), prop_name("size"))
}

fn file_paths(query: &Query, repo: &MemRepo, bindings: &Bindings) -> Vec<String> {
    query
        .execute(repo, bindings)
        .iter()
        .map(|t| t.node("f").unwrap().path().as_str().to_string())
        .collect()
}

#[test]
fn filter_excludes_unknown_and_ordering_applies() {
    let repo = repo();
    let schema = file_schema();

    let query = Query::new(
        files(),
        Some(Constraint::gt(size(), v_long(5))),
        vec![Ordering::descending(size())],
        vec![],
        &schema,
    )
    .unwrap();

    // b.bin has no size: its comparison is unknown, so it is filtered out
    let paths = file_paths(&query, &repo, &Bindings::new());
    assert_eq!(paths, vec!["/docs/c.txt", "/docs/a.txt"]);
}

#[test]
fn existence_filter_removes_null_instead_of_sorting_it() {
    let repo = repo();
    let schema = file_schema();

    let query = Query::new(
        files(),
        Some(Constraint::property_existence(sel("f"), prop_name("size"))),
        vec![Ordering::descending(size())],
        vec![],
        &schema,
    )
    .unwrap();

    let paths = file_paths(&query, &repo, &Bindings::new());
    assert_eq!(paths, vec!["/docs/c.txt", "/docs/a.txt"]);
}

#[test]
fn absent_constraint_keeps_every_tuple() {
    let repo = repo();
    let schema = file_schema();

    let query = Query::new(files(), None, vec![], vec![], &schema).unwrap();
    assert_eq!(query.execute(&repo, &Bindings::new()).len(), 3);
}

#[test]
fn implicit_columns_expand_and_project() {
    let repo = repo();
    let schema = file_schema();

    let query = Query::new(
        files(),
        Some(Constraint::eq(size(), v_long(10))),
        vec![],
        vec![],
        &schema,
    )
    .unwrap();

    let labels: Vec<String> = query.columns().iter().map(|c| c.label().unwrap()).collect();
    assert_eq!(labels, vec!["f.size", "f.mimeType"]);

    let tuples = query.execute(&repo, &Bindings::new());
    assert_eq!(tuples.len(), 1);

    let row = query.project(&tuples[0]);
    assert_eq!(
        row,
        vec![
            ("f.size".to_string(), Some(v_long(10))),
            ("f.mimeType".to_string(), Some(v_txt("text/plain"))),
        ]
    );
}

#[test]
fn projection_over_padded_tuple_yields_no_values() {
    let repo = repo();
    let schema = file_schema();

    // folders with file children, right-outer so childless folders survive
    let source = Source::join(
        files(),
        Source::selector("folder", sel("d")).unwrap(),
        JoinType::RightOuter,
        JoinCondition::ChildNode {
            child_selector: sel("f"),
            parent_selector: sel("d"),
        },
    )
    .unwrap();

    let query = Query::new(
        source,
        None,
        vec![],
        vec![Column::of(sel("f"), prop_name("size")).named("bytes")],
        &schema,
    )
    .unwrap();

    let tuples = query.execute(&repo, &Bindings::new());

    // /empty has no file children and survives only as a padded tuple
    let padded: Vec<_> = tuples.iter().filter(|t| t.node("f").is_none()).collect();
    assert_eq!(padded.len(), 1);
    assert_eq!(padded[0].node("d").unwrap().path().as_str(), "/empty");

    for tuple in &tuples {
        let row = query.project(tuple);
        assert_eq!(row.len(), 1);
        assert_eq!(row[0].0, "bytes");
        if tuple.node("f").is_none() {
            assert_eq!(row[0].1, None);
        }
    }
}

#[test]
fn bind_variables_flow_through_execution() {
    let repo = repo();
    let schema = file_schema();

    let query = Query::new(
        files(),
        Some(Constraint::ge(
            size(),
            StaticOperand::bind_variable("min"),
        )),
        vec![Ordering::ascending(size())],
        vec![],
        &schema,
    )
    .unwrap();

    assert_eq!(query.bind_variables(), vec!["min".to_string()]);

    // unbound: every comparison is unknown, nothing matches
    assert!(query.validate_bindings(&Bindings::new()).is_err());
    assert!(file_paths(&query, &repo, &Bindings::new()).is_empty());

    let bindings = Bindings::new().with("min", Value::Long(20));
    query.validate_bindings(&bindings).unwrap();
    assert_eq!(file_paths(&query, &repo, &bindings), vec!["/docs/c.txt"]);
}

#[test]
fn unknown_node_type_fails_assembly() {
    let schema = file_schema();

    let report = Query::new(
        Source::selector("mystery", sel("m")).unwrap(),
        None,
        vec![],
        vec![],
        &schema,
    )
    .unwrap_err();

    assert!(report.violations.iter().any(|v| matches!(
        &v.kind,
        ViolationKind::UnknownNodeType { name } if name == "mystery"
    )));
}

#[test]
fn foreign_selector_in_join_condition_is_reported() {
    let schema = file_schema();

    let source = Source::join(
        files(),
        Source::selector("folder", sel("d")).unwrap(),
        JoinType::Inner,
        JoinCondition::EquiJoin {
            selector1: sel("f"),
            property1: prop_name("size"),
            selector2: sel("z"),
            property2: prop_name("size"),
        },
    )
    .unwrap();

    let report = Query::new(source, None, vec![], vec![], &schema).unwrap_err();
    assert!(report.violations.iter().any(|v| matches!(
        &v.kind,
        ViolationKind::UnresolvedSelectorReference { selector } if selector == "z"
    )));
}

#[test]
fn foreign_selector_in_constraint_and_ordering_is_reported() {
    let schema = file_schema();
    let foreign = DynamicOperand::property_value(sel("z"), prop_name("size"));

    let report = Query::new(
        files(),
        Some(Constraint::property_existence(sel("z"), prop_name("size"))),
        vec![Ordering::ascending(foreign)],
        vec![],
        &schema,
    )
    .unwrap_err();

    let unresolved = report
        .violations
        .iter()
        .filter(|v| matches!(&v.kind, ViolationKind::UnresolvedSelectorReference { selector } if selector == "z"))
        .count();
    assert_eq!(unresolved, 2);
}

#[test]
fn duplicate_selector_name_is_reported() {
    let schema = file_schema();

    // bypass the join constructor to exercise validation
    let source = Source::Join {
        left: Box::new(files()),
        right: Box::new(Source::selector("folder", sel("f")).unwrap()),
        join_type: JoinType::Inner,
        condition: JoinCondition::ChildNode {
            child_selector: sel("f"),
            parent_selector: sel("f"),
        },
    };

    let report = Query::new(source, None, vec![], vec![], &schema).unwrap_err();
    assert!(report.violations.iter().any(|v| matches!(
        &v.kind,
        ViolationKind::DuplicateSelectorName { selector } if selector == "f"
    )));
}

#[test]
fn duplicate_column_label_is_reported() {
    let schema = file_schema();

    let report = Query::new(
        files(),
        None,
        vec![],
        vec![
            Column::of(sel("f"), prop_name("size")).named("x"),
            Column::of(sel("f"), prop_name("mimeType")).named("x"),
        ],
        &schema,
    )
    .unwrap_err();

    assert!(report.violations.iter().any(|v| matches!(
        &v.kind,
        ViolationKind::DuplicateColumnName { name } if name == "x"
    )));
}

#[test]
fn duplicate_implicit_columns_are_permitted() {
    let repo = repo();
    let schema = file_schema();

    // same (selector, property) twice: kept as-is, never deduplicated
    let query = Query::new(
        files(),
        Some(Constraint::eq(size(), v_long(10))),
        vec![],
        vec![
            Column::of(sel("f"), prop_name("size")),
            Column::of(sel("f"), prop_name("size")),
        ],
        &schema,
    )
    .unwrap();

    let tuples = query.execute(&repo, &Bindings::new());
    let row = query.project(&tuples[0]);
    assert_eq!(
        row,
        vec![
            ("f.size".to_string(), Some(v_long(10))),
            ("f.size".to_string(), Some(v_long(10))),
        ]
    );
}

#[test]
fn explicit_name_may_shadow_a_default_label() {
    let schema = file_schema();

    // only explicit names are checked against each other
    let query = Query::new(
        files(),
        None,
        vec![],
        vec![
            Column::of(sel("f"), prop_name("size")),
            Column::of(sel("f"), prop_name("mimeType")).named("f.size"),
        ],
        &schema,
    );

    assert!(query.is_ok());
}

#[test]
fn query_serializes_with_expanded_columns() {
    let schema = file_schema();
    let query = Query::new(files(), None, vec![], vec![], &schema).unwrap();

    let json = serde_json::to_value(&query).unwrap();
    assert_eq!(json["columns"].as_array().unwrap().len(), 2);
}

#[test]
fn report_display_names_every_violation() {
    let schema = file_schema();

    let report = Query::new(
        Source::selector("mystery", sel("m")).unwrap(),
        Some(Constraint::property_existence(sel("z"), prop_name("p"))),
        vec![],
        vec![],
        &schema,
    )
    .unwrap_err();

    let text = report.to_string();
    assert!(text.contains("2 violations"));
    assert!(text.contains("mystery"));
    assert!(text.contains("'z'"));
}
