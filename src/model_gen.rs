//! Invocation of the external OpenAPI Generator CLI that produces model classes.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// Environment variable overriding the OpenAPI Generator executable
pub const GENERATOR_BIN_ENV: &str = "OPENAPI_GENERATOR_BIN";
/// Executable used when no override is configured
pub const DEFAULT_GENERATOR_BIN: &str = "openapi-generator-cli";

/// One `generate` call of the model generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelGenInvocation {
    /// Temporary JSON copy of the document
    pub input: PathBuf,
    /// Generator id (`typescript`, `python`)
    pub generator: String,
    pub output: PathBuf,
    pub global_properties: String,
    pub additional_properties: String,
}

impl ModelGenInvocation {
    /// Command-line arguments, without the program name.
    pub fn args(&self) -> Vec<OsString> {
        vec![
            "generate".into(),
            "-i".into(),
            self.input.clone().into_os_string(),
            "-g".into(),
            self.generator.clone().into(),
            "-o".into(),
            self.output.clone().into_os_string(),
            "--global-property".into(),
            self.global_properties.clone().into(),
            "--additional-properties".into(),
            self.additional_properties.clone().into(),
            "--skip-validate-spec".into(),
        ]
    }
}

/// Something that turns an OpenAPI document into model source files
pub trait ModelGenerator {
    fn generate(&self, invocation: &ModelGenInvocation) -> anyhow::Result<()>;
}

/// [`ModelGenerator`] that shells out to `openapi-generator-cli`
///
/// The child inherits stdio and is waited on without a timeout.
#[derive(Debug, Clone)]
pub struct OpenApiGeneratorCli {
    program: OsString,
}

impl Default for OpenApiGeneratorCli {
    fn default() -> Self {
        OpenApiGeneratorCli::from_env()
    }
}

impl OpenApiGeneratorCli {
    pub fn new(program: impl Into<OsString>) -> Self {
        OpenApiGeneratorCli {
            program: program.into(),
        }
    }

    /// Use `$OPENAPI_GENERATOR_BIN`, falling back to `openapi-generator-cli`.
    pub fn from_env() -> Self {
        let program = std::env::var_os(GENERATOR_BIN_ENV)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_GENERATOR_BIN.into());
        OpenApiGeneratorCli::new(program)
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }
}

impl ModelGenerator for OpenApiGeneratorCli {
    fn generate(&self, invocation: &ModelGenInvocation) -> anyhow::Result<()> {
        let args = invocation.args();
        debug!(program = ?self.program, args = ?args, "Running model generator");
        info!(
            generator = %invocation.generator,
            output = %invocation.output.display(),
            "Generating models"
        );

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|e| {
                anyhow::anyhow!(
                    "Failed to run {}: {e}",
                    self.program.to_string_lossy()
                )
            })?;
        if !status.success() {
            anyhow::bail!(
                "{} generate failed ({status})",
                self.program.to_string_lossy()
            );
        }
        Ok(())
    }
}
