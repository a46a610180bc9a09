// Uniform node tree shared by the extractors and the generator.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,        // `@mock` annotation, recorded only
    pub original_type: String,       // source rendering, diagnostics only
    #[serde(flatten)]
    pub shape: Shape,
}

/// Kind tag plus the auxiliary data that belongs to that kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    String,
    Number,
    Boolean,
    Date,
    Enum {
        #[serde(rename = "enumValues")]
        values: Vec<EnumValue>,      // never empty
    },
    Array {
        #[serde(rename = "elementType")]
        element: Box<Node>,
    },
    Object {
        children: Vec<Node>,         // unique names, source order
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    String(String),
    Number(serde_json::Number),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Number,
    Boolean,
    Date,
    Enum,
    Array,
    Object,
}

impl Node {
    pub fn new(name: impl Into<String>, original_type: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            is_optional: false,
            hint: None,
            original_type: original_type.into(),
            shape,
        }
    }
    pub fn kind(&self) -> Kind {
        match &self.shape {
            Shape::String => Kind::String,
            Shape::Number => Kind::Number,
            Shape::Boolean => Kind::Boolean,
            Shape::Date => Kind::Date,
            Shape::Enum { .. } => Kind::Enum,
            Shape::Array { .. } => Kind::Array,
            Shape::Object { .. } => Kind::Object,
        }
    }
    pub fn children(&self) -> &[Node] {
        match &self.shape {
            Shape::Object { children } => children,
            _ => &[],
        }
    }
    pub fn element(&self) -> Option<&Node> {
        match &self.shape {
            Shape::Array { element } => Some(element),
            _ => None,
        }
    }
    pub fn enum_values(&self) -> &[EnumValue] {
        match &self.shape {
            Shape::Enum { values } => values,
            _ => &[],
        }
    }
}

impl From<&EnumValue> for serde_json::Value {
    fn from(value: &EnumValue) -> Self {
        match value {
            EnumValue::String(s) => serde_json::Value::String(s.clone()),
            EnumValue::Number(n) => serde_json::Value::Number(n.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<Node> {
        let role = Node::new("element", "\"admin\" | \"user\"", Shape::Enum {
            values: vec![EnumValue::String("admin".into()), EnumValue::String("user".into())],
        });
        let mut email = Node::new("email", "string", Shape::String);
        email.hint = Some("work address".into());
        email.is_optional = true;
        vec![Node::new("User", "User", Shape::Object {
            children: vec![
                Node::new("id", "string", Shape::String),
                email,
                Node::new("roles", "(\"admin\" | \"user\")[]", Shape::Array { element: Box::new(role) }),
                Node::new("level", "1 | 2", Shape::Enum {
                    values: vec![EnumValue::Number(1.into()), EnumValue::Number(2.into())],
                }),
            ],
        })]
    }

    #[test]
    fn serialized_form_uses_kind_specific_fields() {
        let v = serde_json::to_value(sample()).unwrap();
        let user = &v[0];
        assert_eq!(user["kind"], "object");
        assert_eq!(user["isOptional"], false);
        assert!(user.get("enumValues").is_none());
        assert!(user.get("hint").is_none());
        assert_eq!(user["children"][1]["hint"], "work address");
        assert_eq!(user["children"][2]["elementType"]["enumValues"], json!(["admin", "user"]));
        assert_eq!(user["children"][3]["enumValues"], json!([1, 2]));
    }

    #[test]
    fn node_tree_survives_json_round_trip() {
        let nodes = sample();
        let text = serde_json::to_string_pretty(&nodes).unwrap();
        let back: Vec<Node> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, nodes);
        let names: Vec<_> = back[0].children().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "email", "roles", "level"]);
    }
}
