//! # Spec Module
//!
//! Loading, validation and `$ref` resolution for the OpenAPI documents the
//! generator consumes.
//!
//! - [`load_document`] reads YAML or JSON into an [`OpenApiDocument`]
//! - [`validate_document`] performs the presence checks generation depends on
//! - [`resolve_ref`] / [`resolve_schema`] follow `#/...` pointers, including
//!   chained references, shared by every language target

mod load;
mod resolve;
mod types;
mod validate;


pub use load::{load_document, parse_document, spec_slug};
pub use resolve::{ref_pointer, resolve_ref, resolve_schema, ResolveError};
pub use types::OpenApiDocument;
pub use validate::{validate_document, ValidationError, EXPECTED_MAJOR_VERSION};
