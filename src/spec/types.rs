use serde_json::{Map, Value};

/// Parsed OpenAPI document.
///
/// Kept as an untyped JSON tree so that `$ref` pointers can be walked segment
/// by segment and the whole document can be handed back to the model
/// generator unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiDocument(Value);

impl OpenApiDocument {
    pub fn new(value: Value) -> Self {
        OpenApiDocument(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The `openapi` version string, when present and a string.
    pub fn openapi_version(&self) -> Option<&str> {
        self.0.get("openapi").and_then(Value::as_str)
    }

    pub fn info(&self) -> Option<&Value> {
        self.0.get("info").filter(|v| !v.is_null())
    }

    pub fn title(&self) -> Option<&str> {
        self.info()?.get("title").and_then(Value::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.info()?.get("version").and_then(Value::as_str)
    }

    /// The `components.schemas` mapping.
    pub fn schemas(&self) -> Option<&Map<String, Value>> {
        self.0.get("components")?.get("schemas")?.as_object()
    }
}

impl From<Value> for OpenApiDocument {
    fn from(value: Value) -> Self {
        OpenApiDocument(value)
    }
}
