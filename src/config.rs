//! `eventgen.toml` project configuration.
//!
//! A config file sits next to the OpenAPI document (or is passed with
//! `--config`) and supplies defaults for any generation setting:
//!
//! ```toml
//! language = "python"
//! package_name = "billing-events"
//! package_version = "2.0.0"
//! region = "eu-west-1"
//! event_bus_name = "billing"
//! event_source = "com.example.billing"
//! output_root = "generated"
//! generator_bin = "/opt/openapi-generator/bin/openapi-generator-cli"
//! ```
//!
//! Precedence, highest first: command line, environment, config file,
//! built-in defaults. Command line and environment are merged by clap, so
//! this module only layers the result over the file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::generator::{GeneratorOptions, TargetLanguage};

/// File name looked up next to the OpenAPI document
pub const CONFIG_FILE_NAME: &str = "eventgen.toml";

/// Output root used when neither flag, environment nor file sets one
pub const DEFAULT_OUTPUT_ROOT: &str = "generated";

/// Generation settings, each optional so layers can be merged
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<TargetLanguage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_bus_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_source: Option<String>,
    /// Root under which `<language>/<spec name>/` output dirs are created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_root: Option<PathBuf>,
    /// OpenAPI Generator executable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_bin: Option<String>,
}

impl GeneratorConfig {
    /// Merge `higher` over `self`; any value set in `higher` wins.
    pub fn overlay(self, higher: GeneratorConfig) -> GeneratorConfig {
        GeneratorConfig {
            language: higher.language.or(self.language),
            package_name: higher.package_name.or(self.package_name),
            package_version: higher.package_version.or(self.package_version),
            region: higher.region.or(self.region),
            event_bus_name: higher.event_bus_name.or(self.event_bus_name),
            event_source: higher.event_source.or(self.event_source),
            output_root: higher.output_root.or(self.output_root),
            generator_bin: higher.generator_bin.or(self.generator_bin),
        }
    }

    pub fn language(&self) -> TargetLanguage {
        self.language.unwrap_or_default()
    }

    pub fn output_root(&self) -> PathBuf {
        self.output_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT))
    }

    /// Build run options, filling unset values with the built-in defaults.
    pub fn to_options(&self) -> GeneratorOptions {
        let mut options = GeneratorOptions::new(self.language());
        if let Some(v) = &self.package_name {
            options = options.with_package_name(v.as_str());
        }
        if let Some(v) = &self.package_version {
            options = options.with_package_version(v.as_str());
        }
        if let Some(v) = &self.region {
            options = options.with_region(v.as_str());
        }
        if let Some(v) = &self.event_bus_name {
            options = options.with_event_bus_name(v.as_str());
        }
        if let Some(v) = &self.event_source {
            options = options.with_event_source(v.as_str());
        }
        options
    }
}

/// Load a config file.
pub fn load_config(config_path: &Path) -> anyhow::Result<GeneratorConfig> {
    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let config: GeneratorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;
    Ok(config)
}

/// `eventgen.toml` in the document's directory, if present.
pub fn auto_detect_config_path(spec_path: &Path) -> Option<PathBuf> {
    let spec_dir = spec_path.parent()?;
    let dir = if spec_dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        spec_dir
    };
    let config_path = dir.join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Pick the config file for a run.
///
/// An explicit path must exist; otherwise fall back to auto-detection.
pub fn resolve_config_path(
    explicit_path: Option<&Path>,
    spec_path: &Path,
) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = explicit_path {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }
    Ok(auto_detect_config_path(spec_path))
}

/// Load the config that applies to `spec_path`, or an empty one.
pub fn load_for_spec(
    explicit_path: Option<&Path>,
    spec_path: &Path,
) -> anyhow::Result<GeneratorConfig> {
    match resolve_config_path(explicit_path, spec_path)? {
        Some(path) => {
            let config = load_config(&path)?;
            tracing::debug!(config = %path.display(), "Loaded config file");
            Ok(config)
        }
        None => Ok(GeneratorConfig::default()),
    }
}
