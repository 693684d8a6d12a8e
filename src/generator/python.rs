use anyhow::bail;
use std::path::{Path, PathBuf};
use tracing::info;

use super::case::to_snake_case;
use super::options::{GeneratorOptions, TargetLanguage};
use super::target::{LanguageTarget, EVENTS_DIR, MODELS_DIR};
use super::templates::{PYTHON_CONSUMER_TEMPLATE, PYTHON_PUBLISHER_TEMPLATE};
use crate::fs::FileSystem;

const SCAFFOLD: &[&str] = &[
    ".openapi-generator",
    ".openapi-generator-ignore",
    ".gitignore",
    ".gitlab-ci.yml",
    ".travis.yml",
    ".github",
    "git_push.sh",
    "README.md",
    "pyproject.toml",
    "requirements.txt",
    "test-requirements.txt",
    "setup.cfg",
    "setup.py",
    "tox.ini",
    "docs",
    "test",
];

/// Python package the model generator nests models under.
pub fn python_package_name(options: &GeneratorOptions) -> String {
    to_snake_case(options.package_name())
}

/// Python target: `python` generator, snake_case file names
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonTarget;

impl LanguageTarget for PythonTarget {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::Python
    }

    fn generator_name(&self) -> &'static str {
        "python"
    }

    fn global_properties(&self) -> &'static str {
        "models,modelDocs=false,modelTests=false"
    }

    fn additional_properties(&self, options: &GeneratorOptions) -> Vec<(&'static str, String)> {
        vec![
            ("packageName", python_package_name(options)),
            ("packageVersion", options.package_version().to_string()),
            ("projectName", options.package_name().to_string()),
            ("library", "urllib3".to_string()),
        ]
    }

    fn output_dirs(&self) -> &'static [&'static str] {
        &[MODELS_DIR, EVENTS_DIR]
    }

    fn model_module(&self, event_name: &str) -> String {
        to_snake_case(event_name)
    }

    fn publisher_path(&self, event_name: &str) -> PathBuf {
        Path::new(EVENTS_DIR).join(format!("{}_publisher.py", to_snake_case(event_name)))
    }

    fn consumer_path(&self, event_name: &str) -> PathBuf {
        Path::new(EVENTS_DIR).join(format!("{}_consumer.py", to_snake_case(event_name)))
    }

    fn publisher_template(&self) -> &'static str {
        PYTHON_PUBLISHER_TEMPLATE
    }

    fn consumer_template(&self) -> &'static str {
        PYTHON_CONSUMER_TEMPLATE
    }

    /// The package directory is deleted after its models are moved out, so
    /// it must not be empty or collide with `models/`.
    fn check_options(&self, options: &GeneratorOptions) -> anyhow::Result<()> {
        let package = python_package_name(options);
        if package.is_empty() || package == MODELS_DIR {
            bail!(
                "Python package name '{}' cannot be used: it must not be empty or '{MODELS_DIR}'",
                options.package_name()
            );
        }
        Ok(())
    }

    /// Flatten `<out>/<package>/models/` into `<out>/models/` and drop the
    /// rest of the generated package along with `docs/` and `test/`.
    fn post_process(
        &self,
        fs: &dyn FileSystem,
        out_dir: &Path,
        options: &GeneratorOptions,
    ) -> anyhow::Result<()> {
        self.check_options(options)?;
        let package = python_package_name(options);
        let package_dir = out_dir.join(&package);
        let nested_models = package_dir.join(MODELS_DIR);
        let models_dir = out_dir.join(MODELS_DIR);

        let mut moved = 0usize;
        if fs.exists(&nested_models) {
            fs.create_dir_all(&models_dir)?;
            for entry in fs.list_dir(&nested_models)? {
                let Some(file_name) = entry.file_name() else {
                    continue;
                };
                let dest = models_dir.join(file_name);
                // rename does not replace directories
                fs.remove(&dest)?;
                fs.rename(&entry, &dest)?;
                moved += 1;
            }
        }

        fs.remove(&package_dir)?;
        fs.remove(&out_dir.join("docs"))?;
        fs.remove(&out_dir.join("test"))?;

        info!(package = %package, moved, dir = %models_dir.display(), "Relocated Python models");
        Ok(())
    }

    fn scaffold(&self) -> &'static [&'static str] {
        SCAFFOLD
    }
}
