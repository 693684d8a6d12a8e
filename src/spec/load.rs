use super::types::OpenApiDocument;
use anyhow::Context;
use std::path::Path;

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}

/// Load an OpenAPI document from a YAML (`.yaml`/`.yml`) or JSON file.
///
/// The document is not validated here; see [`super::validate_document`].
pub fn load_document(path: &Path) -> anyhow::Result<OpenApiDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read OpenAPI document: {}", path.display()))?;
    parse_document(&content, is_yaml(path))
        .with_context(|| format!("Failed to parse OpenAPI document: {}", path.display()))
}

/// Parse document text. YAML is a superset of JSON, but JSON input goes
/// through `serde_json` for its error messages.
pub fn parse_document(content: &str, yaml: bool) -> anyhow::Result<OpenApiDocument> {
    let value: serde_json::Value = if yaml {
        serde_yaml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    Ok(OpenApiDocument::new(value))
}

/// Short identifier for a spec file, used to name its output directory.
pub fn spec_slug(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "openapi".to_string())
}
