use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::options::{GeneratorOptions, TargetLanguage};
use super::target::{LanguageTarget, EVENTS_DIR, MODELS_DIR};
use super::templates::{TYPESCRIPT_CONSUMER_TEMPLATE, TYPESCRIPT_PUBLISHER_TEMPLATE};
use crate::fs::FileSystem;

/// Import the OpenAPI Generator puts in every TypeScript model. The `http/`
/// module it points at is removed with the rest of the scaffold.
pub const HTTP_FILE_IMPORT: &str = "import { HttpFile } from '../http/http';";

const SCAFFOLD: &[&str] = &[
    ".openapi-generator",
    ".openapi-generator-ignore",
    ".gitignore",
    "git_push.sh",
    "README.md",
    "package.json",
    "tsconfig.json",
    "index.ts",
    "configuration.ts",
    "middleware.ts",
    "servers.ts",
    "util.ts",
    "rxjsStub.ts",
    "apis",
    "auth",
    "http",
    "types",
    "docs",
];

#[allow(clippy::expect_used)]
static HTTP_IMPORT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?m)^[ \t]*{}[ \t]*(\r?\n|$)",
        regex::escape(HTTP_FILE_IMPORT)
    ))
    .expect("HttpFile import regex should be valid")
});

/// Remove the `HttpFile` import line from a model source.
///
/// Returns `None` when the source contains no such line.
pub fn strip_http_import(source: &str) -> Option<String> {
    if !HTTP_IMPORT_LINE.is_match(source) {
        return None;
    }
    Some(HTTP_IMPORT_LINE.replace_all(source, "").into_owned())
}

/// TypeScript target: `typescript` generator, verbatim file names
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptTarget;

impl LanguageTarget for TypeScriptTarget {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::TypeScript
    }

    fn generator_name(&self) -> &'static str {
        "typescript"
    }

    fn global_properties(&self) -> &'static str {
        "models"
    }

    fn additional_properties(&self, options: &GeneratorOptions) -> Vec<(&'static str, String)> {
        vec![
            ("npmName", options.package_name().to_string()),
            ("npmVersion", options.package_version().to_string()),
            ("supportsES6", "true".to_string()),
            ("platform", "node".to_string()),
            ("modelPropertyNaming", "original".to_string()),
            ("enumPropertyNaming", "original".to_string()),
        ]
    }

    fn output_dirs(&self) -> &'static [&'static str] {
        &[EVENTS_DIR]
    }

    fn model_module(&self, event_name: &str) -> String {
        event_name.to_string()
    }

    fn publisher_path(&self, event_name: &str) -> PathBuf {
        Path::new(EVENTS_DIR).join(format!("{event_name}Publisher.ts"))
    }

    fn consumer_path(&self, event_name: &str) -> PathBuf {
        Path::new(EVENTS_DIR).join(format!("{event_name}Consumer.ts"))
    }

    fn publisher_template(&self) -> &'static str {
        TYPESCRIPT_PUBLISHER_TEMPLATE
    }

    fn consumer_template(&self) -> &'static str {
        TYPESCRIPT_CONSUMER_TEMPLATE
    }

    fn post_process(
        &self,
        fs: &dyn FileSystem,
        out_dir: &Path,
        _options: &GeneratorOptions,
    ) -> anyhow::Result<()> {
        let models_dir = out_dir.join(MODELS_DIR);
        if !fs.exists(&models_dir) {
            debug!(dir = %models_dir.display(), "No models directory to post-process");
            return Ok(());
        }
        let mut stripped = 0usize;
        for path in fs.list_dir(&models_dir)? {
            if path.extension().map(|e| e != "ts").unwrap_or(true) {
                continue;
            }
            let source = fs.read_to_string(&path)?;
            if let Some(cleaned) = strip_http_import(&source) {
                fs.write(&path, &cleaned)?;
                stripped += 1;
            }
        }
        info!(dir = %models_dir.display(), files = stripped, "Stripped HttpFile imports from models");
        Ok(())
    }

    fn scaffold(&self) -> &'static [&'static str] {
        SCAFFOLD
    }
}
