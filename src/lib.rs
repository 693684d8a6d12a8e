//! # openapi-eventgen
//!
//! **openapi-eventgen** generates Amazon EventBridge publishers and consumers
//! from an [OpenAPI 3.x](https://spec.openapis.org/oas/v3.0.3) document, on top
//! of the model classes produced by
//! [OpenAPI Generator](https://openapi-generator.tech).
//!
//! ## Overview
//!
//! Every schema under `components.schemas` whose name ends in `Event` gets a
//! publisher (wrapping `PutEvents`) and a consumer (dispatching incoming
//! events to registered handlers). Models for all schemas come from
//! `openapi-generator-cli`, which is run as a subprocess and whose output is
//! then trimmed down to the models alone.
//!
//! Two targets are supported: TypeScript (`@aws-sdk/client-eventbridge`) and
//! Python (`boto3`).
//!
//! ## Architecture
//!
//! - **[`spec`]** - Loading, validation and `$ref` resolution
//! - **[`generator`]** - Event selection, template rendering, language targets
//!   and the [`Orchestrator`](generator::Orchestrator) driving a full run
//! - **[`model_gen`]** - The OpenAPI Generator subprocess
//! - **[`fs`]** - File system seam used by every step that touches disk
//! - **[`config`]** - `eventgen.toml` and settings precedence
//! - **[`logging`]** - `tracing` subscriber setup for the binary
//! - **[`cli`]** - The `eventgen` command line
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as eventgen
//!     participant Orch as Orchestrator
//!     participant Gen as openapi-generator-cli
//!     participant Target as LanguageTarget
//!     participant Events as EventGenerator
//!     participant FS as FileSystem
//!
//!     CLI->>Orch: new(document, out, options)
//!     Orch->>Orch: validate_document
//!     CLI->>Orch: run()
//!     Orch->>FS: create out/, write .eventgen-openapi.json
//!     Orch->>Gen: generate -i ... -g <lang> -o out
//!     Gen-->>FS: models + scaffold
//!     Orch->>Target: post_process
//!     Orch->>FS: remove .eventgen-openapi.json
//!     Orch->>Events: generate(out)
//!     Events->>FS: events/<publisher>, events/<consumer>
//!     Orch->>FS: remove scaffold
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! eventgen generate --spec openapi.yaml --language typescript
//! eventgen generate --spec openapi.yaml --language python --output out/python
//! ```
//!
//! From code:
//!
//! ```rust,ignore
//! use openapi_eventgen::generator::{GeneratorOptions, Orchestrator, TargetLanguage};
//! use openapi_eventgen::spec::load_document;
//!
//! let document = load_document("openapi.yaml".as_ref())?;
//! let options = GeneratorOptions::new(TargetLanguage::TypeScript)
//!     .with_event_bus_name("billing")
//!     .with_span(tracing::info_span!("billing"));
//! let report = Orchestrator::new(document, "generated/typescript/billing", options)?.run()?;
//! println!("{} files", report.event_files.len());
//! ```
//!
//! ## Logging
//!
//! Library code emits `tracing` events inside the span carried by the
//! generator options and never installs a subscriber. The binary does, see
//! [`logging`].

pub mod cli;
pub mod config;
pub mod fs;
pub mod generator;
pub mod logging;
pub mod model_gen;
pub mod spec;

pub use generator::{GeneratorOptions, Orchestrator, TargetLanguage};
pub use spec::{load_document, OpenApiDocument};
