use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use super::options::GeneratorOptions;
use super::target::LanguageTarget;
use super::templates::{TemplateEngine, TemplateRenderer};
use crate::fs::FileSystem;
use crate::spec::{ref_pointer, resolve_ref, resolve_schema, OpenApiDocument};

/// Schema-name suffix that marks a schema as an event
pub const EVENT_SUFFIX: &str = "Event";

/// A schema selected for publisher/consumer generation
#[derive(Debug, Clone, PartialEq)]
pub struct EventDefinition<'a> {
    /// The key under `components.schemas` (e.g. `BillApprovedEvent`)
    pub name: &'a str,
    /// The schema body with any top-level reference resolved
    pub schema: &'a Value,
}

/// One rendered output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

/// A top-level property of an event, as exposed to templates
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EventField {
    pub name: String,
    /// Referenced schema name, the JSON `type`, or `object`
    pub type_name: String,
    /// `required` or `optional`
    pub presence: &'static str,
}

/// Event names that cannot be turned into output files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// Key is not a valid component name (`^[a-zA-Z0-9.\-_]+$`)
    InvalidName { name: String },
    /// Two events render to the same file
    PathCollision {
        path: PathBuf,
        first: String,
        second: String,
    },
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::InvalidName { name } => write!(
                f,
                "Invalid event schema name '{name}': component keys may only contain letters, digits, '.', '-' and '_'"
            ),
            EventError::PathCollision {
                path,
                first,
                second,
            } => write!(
                f,
                "Events '{first}' and '{second}' would both be written to {}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for EventError {}

/// Whether a schema key names an event.
pub fn is_event_name(name: &str) -> bool {
    name.ends_with(EVENT_SUFFIX)
}

/// Whether `name` is allowed as a key under `components`.
pub fn is_valid_component_key(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

/// Keys of `components.schemas` that name events, in key order.
pub fn event_names(document: &OpenApiDocument) -> Vec<&str> {
    let Some(schemas) = document.schemas() else {
        return Vec::new();
    };
    let mut names: Vec<&str> = schemas
        .keys()
        .map(String::as_str)
        .filter(|k| is_event_name(k))
        .collect();
    names.sort_unstable();
    names
}

/// Reject event names that are not valid component keys or that map to the
/// same publisher or consumer file for `target`.
pub fn check_event_outputs(names: &[&str], target: &dyn LanguageTarget) -> Result<(), EventError> {
    let mut claimed: HashMap<PathBuf, &str> = HashMap::with_capacity(names.len() * 2);
    for &name in names {
        if !is_valid_component_key(name) {
            return Err(EventError::InvalidName {
                name: name.to_string(),
            });
        }
        for path in [target.publisher_path(name), target.consumer_path(name)] {
            if let Some(first) = claimed.get(&path) {
                return Err(EventError::PathCollision {
                    path,
                    first: first.to_string(),
                    second: name.to_string(),
                });
            }
            claimed.insert(path, name);
        }
    }
    Ok(())
}

/// Collect event definitions from `components.schemas`, in key order.
///
/// Fails on the first reference that cannot be resolved.
pub fn select_events(document: &OpenApiDocument) -> anyhow::Result<Vec<EventDefinition<'_>>> {
    let Some(schemas) = document.schemas() else {
        return Ok(Vec::new());
    };
    let names = event_names(document);

    let mut events = Vec::with_capacity(names.len());
    for name in names {
        let Some(raw) = schemas.get(name) else {
            continue;
        };
        let schema = resolve_schema(document.as_value(), raw)?;
        events.push(EventDefinition { name, schema });
    }
    Ok(events)
}

/// Top-level properties of an event schema.
///
/// Property references must resolve; their last pointer segment becomes the
/// field's type name.
pub fn event_fields(document: &OpenApiDocument, schema: &Value) -> anyhow::Result<Vec<EventField>> {
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let Some(props) = schema.get("properties").and_then(Value::as_object) else {
        return Ok(Vec::new());
    };

    let mut fields = Vec::with_capacity(props.len());
    for (name, prop) in props {
        let type_name = match ref_pointer(prop) {
            Some(pointer) => {
                resolve_ref(document.as_value(), pointer)?;
                pointer.rsplit('/').next().unwrap_or(pointer).to_string()
            }
            None => prop
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("object")
                .to_string(),
        };
        fields.push(EventField {
            name: name.clone(),
            type_name,
            presence: if required.contains(&name.as_str()) {
                "required"
            } else {
                "optional"
            },
        });
    }
    Ok(fields)
}

/// Renders and writes one publisher and one consumer per event
///
/// A generator owns one [`TemplateRenderer`], so each template is compiled
/// at most once per run however many events there are.
pub struct EventGenerator<'a, E: TemplateEngine> {
    document: &'a OpenApiDocument,
    options: &'a GeneratorOptions,
    fs: &'a dyn FileSystem,
    renderer: TemplateRenderer<E>,
}

impl<'a, E: TemplateEngine> EventGenerator<'a, E> {
    pub fn new(
        document: &'a OpenApiDocument,
        options: &'a GeneratorOptions,
        fs: &'a dyn FileSystem,
        renderer: TemplateRenderer<E>,
    ) -> Self {
        EventGenerator {
            document,
            options,
            fs,
            renderer,
        }
    }

    /// Render the files for every event without touching the file system.
    pub fn render_all(&mut self) -> anyhow::Result<Vec<GeneratedFile>> {
        check_event_outputs(&event_names(self.document), self.options.target())?;
        let events = select_events(self.document)?;
        let mut files = Vec::with_capacity(events.len() * 2);
        for event in &events {
            files.extend(self.render_event(event)?);
        }
        Ok(files)
    }

    /// Publisher and consumer for a single event, paths relative to the
    /// output directory.
    pub fn render_event(&mut self, event: &EventDefinition<'_>) -> anyhow::Result<[GeneratedFile; 2]> {
        let target = self.options.target();
        let context = json!({
            "event_name": event.name,
            "model_module": target.model_module(event.name),
            "schema": event.schema,
            "fields": event_fields(self.document, event.schema)?,
            "options": self.options.template_context(),
        });

        let publisher = GeneratedFile {
            path: target.publisher_path(event.name),
            content: self.renderer.render(target.publisher_template(), &context)?,
        };
        let consumer = GeneratedFile {
            path: target.consumer_path(event.name),
            content: self.renderer.render(target.consumer_template(), &context)?,
        };
        Ok([publisher, consumer])
    }

    /// Check the output paths, create the output directories, then render
    /// and write every event.
    ///
    /// Returns the written paths. The first failure is logged and returned.
    pub fn generate(&mut self, out_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let span = self.options.span().clone();
        let _enter = span.enter();

        if let Err(e) = check_event_outputs(&event_names(self.document), self.options.target()) {
            error!(error = %e, "Event names cannot be written safely");
            return Err(e.into());
        }

        for dir in self.options.target().output_dirs() {
            self.fs.create_dir_all(&out_dir.join(dir))?;
        }

        let events = match select_events(self.document) {
            Ok(events) => events,
            Err(e) => {
                error!(error = %format!("{e:#}"), "Failed to select events");
                return Err(e);
            }
        };

        let mut written = Vec::with_capacity(events.len() * 2);
        for event in &events {
            let files = match self.render_event(event) {
                Ok(files) => files,
                Err(e) => {
                    error!(event = event.name, error = %format!("{e:#}"), "Failed to render event");
                    return Err(e);
                }
            };
            for file in files {
                let path = out_dir.join(&file.path);
                if let Err(e) = self.fs.write(&path, &file.content) {
                    error!(event = event.name, path = %path.display(), error = %format!("{e:#}"), "Failed to write event file");
                    return Err(e);
                }
                written.push(path);
            }
            info!(event = event.name, "Generated publisher and consumer");
        }
        info!(events = events.len(), files = written.len(), "Event generation complete");
        Ok(written)
    }

    pub fn renderer(&self) -> &TemplateRenderer<E> {
        &self.renderer
    }
}
