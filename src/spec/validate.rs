use super::types::OpenApiDocument;
use serde_json::Value;
use std::fmt;

/// Major version token every accepted document must start with.
pub const EXPECTED_MAJOR_VERSION: &str = "3.";

/// Why a document was rejected before generation
///
/// Variants are listed in the order in which they are checked; only the
/// first failing check is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No document, or the root is not a mapping
    MissingDocument,
    /// No `openapi` string
    MissingOpenApiVersion,
    /// `openapi` does not start with `3.`
    UnsupportedOpenApiVersion {
        /// The version string found in the document
        found: String,
    },
    /// No `components.schemas` mapping
    MissingSchemas,
    /// No `info` section
    MissingInfo,
    /// No `info.title`
    MissingTitle,
    /// No `info.version`
    MissingInfoVersion,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingDocument => write!(f, "OpenAPI document is missing"),
            ValidationError::MissingOpenApiVersion => write!(f, "OpenAPI version is missing"),
            ValidationError::UnsupportedOpenApiVersion { found } => {
                write!(f, "Invalid OpenAPI version: expected 3.x, got {found}")
            }
            ValidationError::MissingSchemas => {
                write!(f, "OpenAPI document has no components.schemas section")
            }
            ValidationError::MissingInfo => write!(f, "OpenAPI info section is missing"),
            ValidationError::MissingTitle => write!(f, "OpenAPI info.title is missing"),
            ValidationError::MissingInfoVersion => write!(f, "OpenAPI info.version is missing"),
        }
    }
}

impl std::error::Error for ValidationError {}

fn present(value: Option<&Value>) -> bool {
    value.map(|v| !v.is_null()).unwrap_or(false)
}

/// Check that `document` has the minimum shape the model generator and the
/// event templates rely on.
///
/// This is a presence check only: field types beyond the version string and
/// the individual schema entries are not inspected.
pub fn validate_document(document: &OpenApiDocument) -> Result<(), ValidationError> {
    let root = document.as_value();
    if !root.is_object() {
        return Err(ValidationError::MissingDocument);
    }

    let version = document
        .openapi_version()
        .ok_or(ValidationError::MissingOpenApiVersion)?;
    if !version.starts_with(EXPECTED_MAJOR_VERSION) {
        return Err(ValidationError::UnsupportedOpenApiVersion {
            found: version.to_string(),
        });
    }

    if !present(root.get("components").and_then(|c| c.get("schemas"))) {
        return Err(ValidationError::MissingSchemas);
    }

    let info = document.info().ok_or(ValidationError::MissingInfo)?;
    if !present(info.get("title")) {
        return Err(ValidationError::MissingTitle);
    }
    if !present(info.get("version")) {
        return Err(ValidationError::MissingInfoVersion);
    }

    Ok(())
}
