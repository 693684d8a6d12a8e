use std::path::{Path, PathBuf};

use super::options::{GeneratorOptions, TargetLanguage};
use crate::fs::FileSystem;

/// Name of the directory model classes end up in, relative to the output dir
pub const MODELS_DIR: &str = "models";
/// Name of the directory publishers/consumers are written to
pub const EVENTS_DIR: &str = "events";

/// Everything that differs between the TypeScript and Python pipelines
///
/// Implemented by [`super::TypeScriptTarget`] and [`super::PythonTarget`];
/// obtain one through [`TargetLanguage::target`].
pub trait LanguageTarget {
    fn language(&self) -> TargetLanguage;

    /// Generator id passed to `-g`.
    fn generator_name(&self) -> &'static str;

    /// Value of `--global-property`.
    fn global_properties(&self) -> &'static str;

    /// Ordered `--additional-properties` table.
    fn additional_properties(&self, options: &GeneratorOptions) -> Vec<(&'static str, String)>;

    /// Value of `--additional-properties`.
    fn additional_properties_arg(&self, options: &GeneratorOptions) -> String {
        self.additional_properties(options)
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Directories the event generator creates, in creation order.
    fn output_dirs(&self) -> &'static [&'static str];

    /// Module the generated model for `event_name` is imported from.
    fn model_module(&self, event_name: &str) -> String;

    /// Publisher file for `event_name`, relative to the output dir.
    fn publisher_path(&self, event_name: &str) -> PathBuf;

    /// Consumer file for `event_name`, relative to the output dir.
    fn consumer_path(&self, event_name: &str) -> PathBuf;

    fn publisher_template(&self) -> &'static str;

    fn consumer_template(&self) -> &'static str;

    /// Reject options this target cannot generate with. Runs before any
    /// file system activity.
    fn check_options(&self, _options: &GeneratorOptions) -> anyhow::Result<()> {
        Ok(())
    }

    /// Reshape what the model generator wrote into `out_dir`.
    fn post_process(
        &self,
        fs: &dyn FileSystem,
        out_dir: &Path,
        options: &GeneratorOptions,
    ) -> anyhow::Result<()>;

    /// Files and directories the model generator emits that are removed
    /// after generation, relative to the output dir.
    fn scaffold(&self) -> &'static [&'static str];
}
