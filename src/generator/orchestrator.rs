use anyhow::Context;
use std::path::PathBuf;
use tracing::{error, info, warn};

use super::events::{check_event_outputs, event_names, EventGenerator};
use super::options::GeneratorOptions;
use super::templates::TemplateRenderer;
use crate::fs::{FileSystem, LocalFileSystem};
use crate::model_gen::{ModelGenInvocation, ModelGenerator, OpenApiGeneratorCli};
use crate::spec::{validate_document, OpenApiDocument, ValidationError};

/// File the document is serialized to for the model generator, relative to
/// the output directory
pub const TEMP_SPEC_FILE: &str = ".eventgen-openapi.json";

/// What a successful run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Publisher and consumer files, in write order
    pub event_files: Vec<PathBuf>,
    /// Scaffold entries that existed and were deleted
    pub removed_scaffold: Vec<PathBuf>,
}

/// Drives a full generation run: models, post-processing, events, cleanup
///
/// The document is validated when the orchestrator is built, so an invalid
/// document never causes any file system activity.
pub struct Orchestrator {
    document: OpenApiDocument,
    output_dir: PathBuf,
    options: GeneratorOptions,
    model_generator: Box<dyn ModelGenerator>,
    fs: Box<dyn FileSystem>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("output_dir", &self.output_dir)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Validate `document` and prepare a run writing to `output_dir`.
    ///
    /// Uses the real file system and `openapi-generator-cli` (or
    /// `$OPENAPI_GENERATOR_BIN`) until replaced with the `with_*` methods.
    pub fn new(
        document: OpenApiDocument,
        output_dir: impl Into<PathBuf>,
        options: GeneratorOptions,
    ) -> Result<Self, ValidationError> {
        if let Err(e) = validate_document(&document) {
            let _enter = options.span().enter();
            error!(error = %e, "OpenAPI document failed validation");
            return Err(e);
        }
        Ok(Orchestrator {
            document,
            output_dir: output_dir.into(),
            options,
            model_generator: Box::new(OpenApiGeneratorCli::from_env()),
            fs: Box::new(LocalFileSystem),
        })
    }

    pub fn with_model_generator(mut self, generator: Box<dyn ModelGenerator>) -> Self {
        self.model_generator = generator;
        self
    }

    pub fn with_file_system(mut self, fs: Box<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Execute the run. The first failing step aborts the rest; files
    /// already written are left in place.
    pub fn run(&self) -> anyhow::Result<GenerationReport> {
        let _enter = self.options.span().enter();
        info!(
            language = %self.options.language(),
            output = %self.output_dir.display(),
            "Starting generation"
        );
        match self.run_steps() {
            Ok(report) => {
                info!(
                    event_files = report.event_files.len(),
                    removed = report.removed_scaffold.len(),
                    output = %self.output_dir.display(),
                    "Generation complete"
                );
                Ok(report)
            }
            Err(e) => {
                error!(error = %format!("{e:#}"), output = %self.output_dir.display(), "Generation failed");
                Err(e)
            }
        }
    }

    fn run_steps(&self) -> anyhow::Result<GenerationReport> {
        let fs = self.fs.as_ref();
        let out = self.output_dir.as_path();
        let target = self.options.target();

        // nothing touches the disk until options and event paths are known good
        target.check_options(&self.options)?;
        check_event_outputs(&event_names(&self.document), target)?;

        fs.create_dir_all(out)?;

        let temp_spec = out.join(TEMP_SPEC_FILE);
        let json = serde_json::to_string_pretty(self.document.as_value())
            .context("Failed to serialize OpenAPI document")?;
        fs.write(&temp_spec, &json)?;

        let invocation = ModelGenInvocation {
            input: temp_spec.clone(),
            generator: target.generator_name().to_string(),
            output: out.to_path_buf(),
            global_properties: target.global_properties().to_string(),
            additional_properties: target.additional_properties_arg(&self.options),
        };
        let models = self
            .model_generator
            .generate(&invocation)
            .and_then(|()| target.post_process(fs, out, &self.options));
        let cleanup = fs.remove(&temp_spec);
        match (models, cleanup) {
            (Err(e), Err(cleanup_err)) => {
                warn!(path = %temp_spec.display(), error = %format!("{cleanup_err:#}"), "Could not remove temporary document");
                return Err(e);
            }
            (Err(e), Ok(())) | (Ok(()), Err(e)) => return Err(e),
            (Ok(()), Ok(())) => {}
        }

        let mut events = EventGenerator::new(&self.document, &self.options, fs, TemplateRenderer::new());
        let event_files = events.generate(out)?;

        let mut removed_scaffold = Vec::new();
        for entry in target.scaffold() {
            let path = out.join(entry);
            if !fs.exists(&path) {
                continue;
            }
            fs.remove(&path)?;
            removed_scaffold.push(path);
        }
        info!(removed = removed_scaffold.len(), "Removed generator scaffold");

        Ok(GenerationReport {
            event_files,
            removed_scaffold,
        })
    }
}
