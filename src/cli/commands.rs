use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info_span;

use crate::config::{load_for_spec, GeneratorConfig};
use crate::generator::{select_events, Orchestrator, TargetLanguage};
use crate::model_gen::{OpenApiGeneratorCli, DEFAULT_GENERATOR_BIN};
use crate::spec::{load_document, ref_pointer, spec_slug, validate_document};

/// Command-line interface for the EventBridge code generator
///
/// Generates OpenAPI Generator models plus EventBridge publishers and
/// consumers for every `*Event` schema in an OpenAPI document.
#[derive(Parser, Debug)]
#[command(name = "eventgen", version)]
#[command(about = "Generate EventBridge publishers/consumers from OpenAPI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate models, publishers and consumers for one language
    Generate(GenerateArgs),
    /// Check that a document has everything generation needs
    Validate {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,
    },
    /// List the schemas that will become events
    Events {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,
    },
}

/// Arguments of `eventgen generate`
///
/// Every optional value falls back to its environment variable, then to
/// `eventgen.toml`, then to the built-in default.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateArgs {
    /// Path to the OpenAPI specification file (YAML or JSON)
    #[arg(short, long)]
    pub spec: PathBuf,

    /// Target language (default: typescript)
    #[arg(short, long, value_enum, env = "EVENTGEN_LANGUAGE")]
    pub language: Option<TargetLanguage>,

    /// Root for generated output; the output dir is <root>/<language>/<spec name>
    /// (default: generated)
    #[arg(long, env = "EVENTGEN_OUTPUT_ROOT")]
    pub output_root: Option<PathBuf>,

    /// Exact output directory, overriding --output-root
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Package name handed to OpenAPI Generator (default: events)
    #[arg(long)]
    pub package_name: Option<String>,

    /// Package version handed to OpenAPI Generator (default: 1.0.0)
    #[arg(long)]
    pub package_version: Option<String>,

    /// AWS region baked into generated clients (default: us-west-2)
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// EventBridge bus name baked into generated clients (default: homebound-events)
    #[arg(long, env = "EVENT_BUS_NAME")]
    pub event_bus_name: Option<String>,

    /// Source attached to published events (default: com.homebound)
    #[arg(long, env = "EVENT_SOURCE")]
    pub event_source: Option<String>,

    /// Path to eventgen.toml
    /// If not provided, will auto-detect alongside the OpenAPI spec
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// OpenAPI Generator executable (default: openapi-generator-cli)
    #[arg(long, env = "OPENAPI_GENERATOR_BIN")]
    pub generator_bin: Option<String>,
}

impl GenerateArgs {
    /// The command-line/environment layer as a config.
    pub fn to_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            language: self.language,
            package_name: self.package_name.clone(),
            package_version: self.package_version.clone(),
            region: self.region.clone(),
            event_bus_name: self.event_bus_name.clone(),
            event_source: self.event_source.clone(),
            output_root: self.output_root.clone(),
            generator_bin: self.generator_bin.clone(),
        }
    }

    /// Merge these arguments over the config file that applies to the spec.
    pub fn resolve(&self) -> anyhow::Result<GeneratorConfig> {
        let file = load_for_spec(self.config.as_deref(), &self.spec)?;
        Ok(file.overlay(self.to_config()))
    }

    /// `--output`, else `<output_root>/<language>/<spec name>`.
    pub fn output_dir(&self, settings: &GeneratorConfig) -> PathBuf {
        match &self.output {
            Some(dir) => dir.clone(),
            None => settings
                .output_root()
                .join(settings.language().as_str())
                .join(spec_slug(&self.spec)),
        }
    }
}

/// Parse the process arguments and execute the command
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Execute a parsed command
///
/// # Errors
///
/// Returns an error if:
/// - The OpenAPI document cannot be loaded, or fails validation
/// - A `$ref` cannot be resolved
/// - The model generator fails, or any file cannot be written
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Validate { spec } => {
            let document = load_document(spec)?;
            validate_document(&document)
                .with_context(|| format!("{} failed validation", spec.display()))?;
            let schemas = document.schemas().map(|s| s.len()).unwrap_or(0);
            println!(
                "✅ {} is valid: OpenAPI {}, {} schemas",
                spec.display(),
                document.openapi_version().unwrap_or_default(),
                schemas
            );
            Ok(())
        }
        Commands::Events { spec } => list_events(spec),
    }
}

fn generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let settings = args.resolve()?;
    let output_dir = args.output_dir(&settings);
    let language = settings.language();
    let span = info_span!(
        "generate",
        spec = %args.spec.display(),
        language = %language,
    );
    let options = settings.to_options().with_span(span);

    let document = load_document(&args.spec)?;
    let program = settings
        .generator_bin
        .clone()
        .unwrap_or_else(|| DEFAULT_GENERATOR_BIN.to_string());
    let report = Orchestrator::new(document, &output_dir, options)?
        .with_model_generator(Box::new(OpenApiGeneratorCli::new(program)))
        .run()?;

    println!(
        "✅ Generated {} event files for {} in {}",
        report.event_files.len(),
        language,
        output_dir.display()
    );
    Ok(())
}

fn list_events(spec: &Path) -> anyhow::Result<()> {
    let document = load_document(spec)?;
    validate_document(&document)
        .with_context(|| format!("{} failed validation", spec.display()))?;
    let events = select_events(&document)?;
    if events.is_empty() {
        println!("No event schemas (names ending in 'Event') in {}", spec.display());
        return Ok(());
    }
    println!("📣 {} event schemas in {}:", events.len(), spec.display());
    for event in &events {
        let pointer = document
            .schemas()
            .and_then(|s| s.get(event.name))
            .and_then(ref_pointer);
        match pointer {
            Some(pointer) => println!("  {} -> {}", event.name, pointer),
            None => println!("  {}", event.name),
        }
    }
    Ok(())
}
