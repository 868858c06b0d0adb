use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        anyhow!("at JSON path {path} → {}", err.into_inner())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Node {
        #[allow(unused)]
        name: String,
        #[serde(default)]
        #[allow(unused)]
        children: Vec<Node>,
    }

    #[test]
    fn error_names_the_path() {
        let err = from_str_with_path::<Vec<Node>>(r#"[{"name": "a", "children": [{"name": 5}]}]"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("[0].children[0].name"), "{err}");
    }

    #[test]
    fn decodes_valid_input() {
        let nodes = from_str_with_path::<Vec<Node>>(r#"[{"name": "a"}]"#).unwrap();
        assert_eq!(nodes.len(), 1);
    }
}
