//! `$ref` resolution against a single in-memory document.
//!
//! Pointers have the form `#/components/schemas/<Name>` (or deeper). A
//! resolved value that is itself a Reference Object is followed again, so
//! chains such as `A -> B -> C` yield the body of `C`.

use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Error returned when a `$ref` pointer cannot be turned into a concrete schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A segment of the pointer does not exist in the document
    Unresolved {
        /// The full pointer that failed
        pointer: String,
    },
    /// The pointer targets another document (not supported)
    External {
        /// The full pointer that was rejected
        pointer: String,
    },
    /// Following the chain revisited a pointer
    Circular {
        /// The pointer seen twice
        pointer: String,
        /// Every pointer followed, in order, ending with the repeat
        chain: Vec<String>,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Unresolved { pointer } => {
                write!(f, "Could not resolve reference: {pointer}")
            }
            ResolveError::External { pointer } => {
                write!(
                    f,
                    "External reference not supported: {pointer} (only '#/...' pointers into the same document)"
                )
            }
            ResolveError::Circular { pointer, chain } => {
                write!(
                    f,
                    "Circular reference detected at {pointer}: {}",
                    chain.join(" -> ")
                )
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// The pointer string of a Reference Object, if `value` is one.
pub fn ref_pointer(value: &Value) -> Option<&str> {
    value.get("$ref").and_then(Value::as_str)
}

/// Resolve `pointer` against `document`, following chained references until
/// a non-reference value is reached.
pub fn resolve_ref<'a>(document: &'a Value, pointer: &str) -> Result<&'a Value, ResolveError> {
    let mut visited = HashSet::new();
    let mut chain = Vec::new();
    let mut current = pointer;

    loop {
        chain.push(current.to_string());
        if !visited.insert(current) {
            return Err(ResolveError::Circular {
                pointer: current.to_string(),
                chain,
            });
        }
        let target = walk(document, current)?;
        match ref_pointer(target) {
            Some(next) => current = next,
            None => return Ok(target),
        }
    }
}

/// Resolve `schema` if it is a Reference Object, otherwise return it as is.
pub fn resolve_schema<'a>(document: &'a Value, schema: &'a Value) -> Result<&'a Value, ResolveError> {
    match ref_pointer(schema) {
        Some(pointer) => resolve_ref(document, pointer),
        None => Ok(schema),
    }
}

/// Walk a single pointer without following any reference found at its end.
fn walk<'a>(document: &'a Value, pointer: &str) -> Result<&'a Value, ResolveError> {
    let unresolved = || ResolveError::Unresolved {
        pointer: pointer.to_string(),
    };

    let mut segments = pointer.split('/');
    // The leading segment is the document root marker.
    match segments.next() {
        Some("#") => {}
        Some("") if pointer.is_empty() => return Err(unresolved()),
        _ => {
            return Err(ResolveError::External {
                pointer: pointer.to_string(),
            })
        }
    }

    let mut node = document;
    for raw in segments {
        let segment = unescape(raw);
        node = match node {
            Value::Object(map) => map.get(segment.as_str()),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
        .filter(|v| !v.is_null())
        .ok_or_else(unresolved)?;
    }
    Ok(node)
}

/// JSON pointer escapes: `~1` is `/`, `~0` is `~`.
fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
