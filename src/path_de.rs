use serde::de::DeserializeOwned;
use crate::error::{Error, Result};
use crate::ir::Node;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| Error::Decode {
        path: err.path().to_string(),
        source: err.into_inner(),
    })
}

/// A node list as written by `ts-mockgen nodes`.
pub fn nodes_from_str(src: &str) -> Result<Vec<Node>> {
    from_str_with_path(src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Kind;

    #[test]
    fn decodes_node_lists() {
        let src = r#"[{"name":"User","kind":"object","isOptional":false,"originalType":"User",
            "children":[{"name":"tags","kind":"array","originalType":"string[]",
                "elementType":{"name":"element","kind":"string","originalType":"string"}}]}]"#;
        let nodes = nodes_from_str(src).unwrap();
        assert_eq!(nodes[0].children()[0].kind(), Kind::Array);
        assert!(!nodes[0].children()[0].is_optional);
    }

    #[test]
    fn errors_name_the_offending_path() {
        let src = r#"[{"name":"A","kind":"string","originalType":"string"},
            {"name":"B","kind":"object","originalType":7,"children":[]}]"#;
        let err = nodes_from_str(src).unwrap_err();
        assert!(matches!(&err, Error::Decode { path, .. } if path == "[1].originalType"), "{err}");
        assert!(err.to_string().starts_with("at JSON path [1].originalType → invalid type"));
    }
}
