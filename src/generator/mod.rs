//! # Generator Module
//!
//! Turns a validated OpenAPI document into model classes plus one EventBridge
//! publisher and one consumer per event schema, for TypeScript or Python.
//!
//! ## Pipeline
//!
//! ```text
//! validate → openapi-generator-cli (models) → post-process → events → scaffold cleanup
//! ```
//!
//! [`Orchestrator`] runs the whole pipeline. The event step on its own is
//! [`EventGenerator`], which selects every schema whose key ends in `Event`
//! and renders the language's publisher/consumer templates through a
//! [`TemplateRenderer`].
//!
//! ## Language targets
//!
//! Everything language-specific (generator id, CLI properties, file naming,
//! post-processing and scaffold list) sits behind [`LanguageTarget`]:
//!
//! | | TypeScript | Python |
//! |---|---|---|
//! | publisher | `events/<Name>Publisher.ts` | `events/<name>_publisher.py` |
//! | consumer | `events/<Name>Consumer.ts` | `events/<name>_consumer.py` |
//! | post-process | strip `HttpFile` import | flatten `<package>/models/` |
//!
//! ## Example
//!
//! ```rust,ignore
//! use openapi_eventgen::generator::{GeneratorOptions, Orchestrator, TargetLanguage};
//! use openapi_eventgen::spec::load_document;
//!
//! let document = load_document("openapi.yaml".as_ref())?;
//! let options = GeneratorOptions::new(TargetLanguage::Python).with_package_name("billing");
//! Orchestrator::new(document, "generated/python/billing", options)?.run()?;
//! ```

mod case;
mod events;
mod options;
mod orchestrator;
mod python;
mod target;
mod templates;
mod typescript;


pub use case::{split_words, to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};
pub use events::{
    check_event_outputs, event_fields, event_names, is_event_name, is_valid_component_key,
    select_events, EventDefinition, EventError, EventField, EventGenerator, GeneratedFile,
    EVENT_SUFFIX,
};
pub use options::{
    GeneratorOptions, TargetLanguage, DEFAULT_EVENT_BUS_NAME, DEFAULT_EVENT_SOURCE,
    DEFAULT_PACKAGE_NAME, DEFAULT_PACKAGE_VERSION, DEFAULT_REGION,
};
pub use orchestrator::{GenerationReport, Orchestrator, TEMP_SPEC_FILE};
pub use python::{python_package_name, PythonTarget};
pub use target::{LanguageTarget, EVENTS_DIR, MODELS_DIR};
pub use templates::{
    MiniJinjaEngine, TemplateEngine, TemplateRenderer, PYTHON_CONSUMER_TEMPLATE,
    PYTHON_PUBLISHER_TEMPLATE, TYPESCRIPT_CONSUMER_TEMPLATE, TYPESCRIPT_PUBLISHER_TEMPLATE,
};
pub use typescript::{strip_http_import, TypeScriptTarget, HTTP_FILE_IMPORT};
