//! In-memory node fixtures shared by unit tests.

use crate::{
    ident::{PropertyName, SelectorName},
    node::{Node, NodePath, NodeProvider},
    schema::{NodeTypeDef, PropertyDef, Schema},
    value::{Float64, Value},
};
use std::collections::BTreeMap;

///
/// MemNode
///

#[derive(Clone, Debug)]
pub(crate) struct MemNode {
    path: NodePath,
    node_type: String,
    properties: BTreeMap<String, Vec<Value>>,
    score: Option<f64>,
}

impl MemNode {
    pub fn new(path: &str, node_type: &str) -> Self {
        Self {
            path: NodePath::try_from_str(path).expect("valid path"),
            node_type: node_type.to_string(),
            properties: BTreeMap::new(),
            score: None,
        }
    }

    pub fn prop(mut self, name: &str, value: Value) -> Self {
        self.properties.insert(name.to_string(), vec![value]);
        self
    }

    pub fn props(mut self, name: &str, values: Vec<Value>) -> Self {
        self.properties.insert(name.to_string(), values);
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

impl Node for MemNode {
    fn path(&self) -> &NodePath {
        &self.path
    }

    fn node_type(&self) -> &str {
        &self.node_type
    }

    fn property(&self, name: &str) -> Option<&[Value]> {
        self.properties.get(name).map(Vec::as_slice)
    }

    fn full_text_matches(&self, property: Option<&str>, expression: &str) -> bool {
        let matches_in = |values: &Vec<Value>| {
            values
                .iter()
                .filter_map(Value::as_text)
                .any(|text| text.contains(expression))
        };

        match property {
            Some(name) => self.properties.get(name).is_some_and(matches_in),
            None => self.properties.values().any(matches_in),
        }
    }

    fn full_text_score(&self) -> Option<f64> {
        self.score
    }
}

///
/// MemRepo
///
/// Naive provider: linear scan with schema-driven subtype dispatch.
///

#[derive(Debug, Default)]
pub(crate) struct MemRepo {
    schema: Schema,
    nodes: Vec<MemNode>,
}

impl MemRepo {
    pub fn new(schema: Schema, nodes: Vec<MemNode>) -> Self {
        Self { schema, nodes }
    }
}

impl NodeProvider<MemNode> for MemRepo {
    fn nodes_of_type(&self, node_type_name: &str) -> Vec<&MemNode> {
        self.nodes
            .iter()
            .filter(|node| self.schema.is_subtype_of(node.node_type(), node_type_name))
            .collect()
    }
}

// ---- shorthand constructors ---------------------------------------------

pub(crate) fn sel(name: &str) -> SelectorName {
    SelectorName::try_from_str(name).expect("valid selector name")
}

pub(crate) fn prop_name(name: &str) -> PropertyName {
    PropertyName::try_from_str(name).expect("valid property name")
}

pub(crate) fn v_txt(s: &str) -> Value {
    Value::String(s.to_string())
}

pub(crate) fn v_long(n: i64) -> Value {
    Value::Long(n)
}

pub(crate) fn v_double(x: f64) -> Value {
    Value::Double(Float64::try_new(x).expect("finite f64"))
}

/// The `file` / `item` schema most tests run against.
pub(crate) fn file_schema() -> Schema {
    let name = |n: &str| PropertyName::try_from_str(n).expect("valid property name");

    let mut schema = Schema::new();
    schema
        .insert(
            NodeTypeDef::new(
                "item",
                vec![],
                vec![PropertyDef::new(
                    name("name"),
                    crate::value::ValueType::Name,
                )],
            )
            .unwrap(),
        )
        .unwrap();
    schema
        .insert(
            NodeTypeDef::new(
                "file",
                vec!["item".to_string()],
                vec![
                    PropertyDef::new(name("size"), crate::value::ValueType::Long),
                    PropertyDef::new(name("mimeType"), crate::value::ValueType::String),
                    PropertyDef::new(name("tags"), crate::value::ValueType::String).multiple(),
                ],
            )
            .unwrap(),
        )
        .unwrap();
    schema
        .insert(NodeTypeDef::new("folder", vec!["item".to_string()], vec![]).unwrap())
        .unwrap();

    schema
}
