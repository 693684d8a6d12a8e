use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use tracing::Span;

use super::python::PythonTarget;
use super::target::LanguageTarget;
use super::typescript::TypeScriptTarget;

/// Default package name passed to the model generator
pub const DEFAULT_PACKAGE_NAME: &str = "events";
/// Default package version passed to the model generator
pub const DEFAULT_PACKAGE_VERSION: &str = "1.0.0";
/// Default AWS region baked into generated publishers/consumers
pub const DEFAULT_REGION: &str = "us-west-2";
/// Default EventBridge bus name baked into generated code
pub const DEFAULT_EVENT_BUS_NAME: &str = "homebound-events";
/// Default `Source` attached to published events
pub const DEFAULT_EVENT_SOURCE: &str = "com.homebound";

/// Output language of a generation run
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    /// TypeScript models and `@aws-sdk/client-eventbridge` publishers/consumers
    #[default]
    #[value(name = "typescript", alias = "ts")]
    #[serde(alias = "ts")]
    TypeScript,
    /// Python (pydantic) models and boto3 publishers/consumers
    #[value(name = "python", alias = "py")]
    #[serde(alias = "py")]
    Python,
}

impl TargetLanguage {
    /// Language-specific behaviour for this variant.
    pub fn target(self) -> &'static dyn LanguageTarget {
        match self {
            TargetLanguage::TypeScript => &TypeScriptTarget,
            TargetLanguage::Python => &PythonTarget,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TargetLanguage::TypeScript => "typescript",
            TargetLanguage::Python => "python",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(TargetLanguage::TypeScript),
            "python" | "py" => Ok(TargetLanguage::Python),
            other => Err(format!(
                "Unsupported language '{other}' (expected 'typescript' or 'python')"
            )),
        }
    }
}

/// Settings for one generation run
///
/// Built once with the `with_*` methods and then only read. The span is the
/// run's logger: every component enters it before emitting events, so all
/// log lines of a run carry the same context.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    language: TargetLanguage,
    package_name: String,
    package_version: String,
    region: String,
    event_bus_name: String,
    event_source: String,
    span: Span,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions::new(TargetLanguage::default())
    }
}

impl GeneratorOptions {
    /// Options for `language` with every other setting at its default.
    pub fn new(language: TargetLanguage) -> Self {
        GeneratorOptions {
            language,
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            package_version: DEFAULT_PACKAGE_VERSION.to_string(),
            region: DEFAULT_REGION.to_string(),
            event_bus_name: DEFAULT_EVENT_BUS_NAME.to_string(),
            event_source: DEFAULT_EVENT_SOURCE.to_string(),
            span: Span::none(),
        }
    }

    pub fn with_package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = name.into();
        self
    }

    pub fn with_package_version(mut self, version: impl Into<String>) -> Self {
        self.package_version = version.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_event_bus_name(mut self, name: impl Into<String>) -> Self {
        self.event_bus_name = name.into();
        self
    }

    pub fn with_event_source(mut self, source: impl Into<String>) -> Self {
        self.event_source = source.into();
        self
    }

    /// Attach the span generation components log under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn language(&self) -> TargetLanguage {
        self.language
    }

    pub fn target(&self) -> &'static dyn LanguageTarget {
        self.language.target()
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn package_version(&self) -> &str {
        &self.package_version
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn event_bus_name(&self) -> &str {
        &self.event_bus_name
    }

    pub fn event_source(&self) -> &str {
        &self.event_source
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// The `options` object exposed to templates.
    pub fn template_context(&self) -> Value {
        json!({
            "language": self.language.as_str(),
            "package_name": self.package_name,
            "package_version": self.package_version,
            "region": self.region,
            "event_bus_name": self.event_bus_name,
            "event_source": self.event_source,
        })
    }
}
