//! Mock values for node trees.
//!
//! Each root node becomes one collection (`User` → `users`) holding `count` independently
//! generated instances. Values follow the node kind; strings, numbers and dates first
//! consult the name heuristics in [`hints`].
pub mod hints;

use fake::Fake;
use fake::faker::lorem::en::Word;
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde_json::{Map, Value, json};
use crate::inflect::collection_name;
use crate::ir::{Node, Shape};

/// Collection name → generated instances, in root order.
pub type Dataset = IndexMap<String, Vec<Value>>;

const MAX_ARRAY_LEN: usize = 5;

pub struct DataGenerator<'a> {
    nodes: &'a [Node],
}

impl<'a> DataGenerator<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        Self { nodes }
    }

    pub fn generate(&self, count: usize) -> Dataset {
        self.generate_with_rng(count, &mut rand::thread_rng())
    }

    /// Later roots whose names pluralize to an existing key replace its instances; the
    /// key keeps its first position.
    pub fn generate_with_rng(&self, count: usize, rng: &mut dyn RngCore) -> Dataset {
        let mut dataset = Dataset::with_capacity(self.nodes.len());
        let mut owners: IndexMap<String, &str> = IndexMap::new();
        for node in self.nodes {
            let key = collection_name(&node.name);
            if let Some(previous) = owners.insert(key.clone(), &node.name) {
                tracing::warn!(
                    collection = %key,
                    previous,
                    current = %node.name,
                    "collection name collision, keeping the later root"
                );
            }
            let values = (0..count).map(|_| generate_value(node, rng)).collect();
            dataset.insert(key, values);
        }
        dataset
    }
}

pub fn generate_value(node: &Node, rng: &mut dyn RngCore) -> Value {
    match &node.shape {
        Shape::String => {
            let value = hints::STRING.generate(&node.name, rng);
            Value::String(value.unwrap_or_else(|| Word().fake_with_rng(rng)))
        }
        Shape::Number => hints::NUMBER
            .generate(&node.name, rng)
            .unwrap_or_else(|| json!(hints::round(rng.gen_range(1.0..=1000.0), 2))),
        Shape::Boolean => Value::Bool(rng.gen_bool(0.5)),
        Shape::Date => {
            let at = hints::DATE.generate(&node.name, rng).unwrap_or_else(|| hints::recent(rng));
            Value::String(hints::iso(at))
        }
        Shape::Enum { values } => values.choose(rng).map(Value::from).unwrap_or(Value::Null),
        Shape::Array { element } => {
            let len = rng.gen_range(1..=MAX_ARRAY_LEN);
            Value::Array((0..len).map(|_| generate_value(element, rng)).collect())
        }
        Shape::Object { children } => {
            let object: Map<String, Value> = children
                .iter()
                .map(|child| (child.name.clone(), generate_value(child, rng)))
                .collect();
            Value::Object(object)
        }
    }
}
