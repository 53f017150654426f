use super::types::Document;
use anyhow::Context;
use serde_json::Value;
use std::path::Path;
use tracing::info;

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false)
}

/// Parse a JSON or YAML document into a raw value
///
/// YAML is chosen by file extension (`.yaml` / `.yml`), everything else is
/// read as JSON.
pub fn load_value(file_path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read OpenAPI document {}", file_path.display()))?;
    let value: Value = if is_yaml(file_path) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", file_path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", file_path.display()))?
    };
    Ok(value)
}

/// Load an OpenAPI document from disk into its typed view.
pub fn load_document(file_path: &Path) -> anyhow::Result<Document> {
    let value = load_value(file_path)?;
    let document = Document::from_value(&value)
        .with_context(|| format!("not an OpenAPI document: {}", file_path.display()))?;

    info!(
        path = %file_path.display(),
        paths_count = document.paths.as_ref().map(Vec::len).unwrap_or(0),
        schemes_count = document
            .security_schemes()
            .map(|s| s.iter().count())
            .unwrap_or(0),
        "OpenAPI document loaded"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_yaml() {
        assert!(is_yaml(Path::new("openapi.yaml")));
        assert!(is_yaml(Path::new("dir/openapi.yml")));
        assert!(!is_yaml(Path::new("openapi.json")));
        assert!(!is_yaml(Path::new("openapi")));
    }

    #[test]
    fn test_load_document_rejects_scalar_document() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"42").unwrap();
        let err = load_document(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("schema must be an object"));
    }
}
