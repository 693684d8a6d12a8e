//! Template compilation and rendering.
//!
//! [`TemplateRenderer`] compiles each distinct template source once and
//! reuses the compiled form for every later render of the same source. The
//! compile/apply steps are delegated to a [`TemplateEngine`]; the production
//! engine is [`MiniJinjaEngine`].

use minijinja::Environment;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use super::case::{to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};

/// TypeScript publisher template
pub const TYPESCRIPT_PUBLISHER_TEMPLATE: &str =
    include_str!("../../templates/typescript/publisher.ts.jinja");
/// TypeScript consumer template
pub const TYPESCRIPT_CONSUMER_TEMPLATE: &str =
    include_str!("../../templates/typescript/consumer.ts.jinja");
/// Python publisher template
pub const PYTHON_PUBLISHER_TEMPLATE: &str =
    include_str!("../../templates/python/publisher.py.jinja");
/// Python consumer template
pub const PYTHON_CONSUMER_TEMPLATE: &str =
    include_str!("../../templates/python/consumer.py.jinja");

/// Compiles template sources and applies compiled templates to a context
pub trait TemplateEngine {
    /// Compile `source` and store it under `name`.
    fn compile(&mut self, name: &str, source: &str) -> anyhow::Result<()>;
    /// Render the template stored under `name`.
    fn apply(&self, name: &str, context: &Value) -> anyhow::Result<String>;
}

/// [`TemplateEngine`] backed by a `minijinja` environment
///
/// Registers the case helpers as filters: `snake_case`, `camel_case`,
/// `pascal_case` and `kebab_case`.
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        MiniJinjaEngine::new()
    }
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("snake_case", |s: String| to_snake_case(&s));
        env.add_filter("camel_case", |s: String| to_camel_case(&s));
        env.add_filter("pascal_case", |s: String| to_pascal_case(&s));
        env.add_filter("kebab_case", |s: String| to_kebab_case(&s));
        MiniJinjaEngine { env }
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn compile(&mut self, name: &str, source: &str) -> anyhow::Result<()> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        Ok(())
    }

    fn apply(&self, name: &str, context: &Value) -> anyhow::Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(context)?)
    }
}

/// Renders template strings, compiling each distinct source only once
pub struct TemplateRenderer<E: TemplateEngine = MiniJinjaEngine> {
    engine: E,
    /// Template source -> name it was compiled under.
    compiled: HashMap<String, String>,
}

impl Default for TemplateRenderer<MiniJinjaEngine> {
    fn default() -> Self {
        TemplateRenderer::new()
    }
}

impl TemplateRenderer<MiniJinjaEngine> {
    pub fn new() -> Self {
        TemplateRenderer::with_engine(MiniJinjaEngine::new())
    }
}

impl<E: TemplateEngine> TemplateRenderer<E> {
    pub fn with_engine(engine: E) -> Self {
        TemplateRenderer {
            engine,
            compiled: HashMap::new(),
        }
    }

    /// Render `source` against `context`.
    ///
    /// Rendering is a pure function of `(source, context)`; the only state
    /// kept between calls is the compiled form of each source.
    pub fn render(&mut self, source: &str, context: &Value) -> anyhow::Result<String> {
        let name = match self.compiled.get(source) {
            Some(name) => name.clone(),
            None => {
                let name = format!("template_{}", self.compiled.len());
                self.engine.compile(&name, source)?;
                debug!(template = %name, "Compiled template");
                self.compiled.insert(source.to_string(), name.clone());
                name
            }
        };
        self.engine.apply(&name, context)
    }

    /// Number of distinct sources compiled so far.
    pub fn compiled_count(&self) -> usize {
        self.compiled.len()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}
