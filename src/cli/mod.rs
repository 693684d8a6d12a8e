//! # CLI Module
//!
//! Command-line interface of the `eventgen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! eventgen generate --spec openapi.yaml --language python
//! ```
//!
//! Options:
//! - `--spec <FILE>` - Path to the OpenAPI document (required)
//! - `--language <typescript|python>` - Target language (`EVENTGEN_LANGUAGE`)
//! - `--output <DIR>` - Exact output directory
//! - `--output-root <DIR>` - Root for `<root>/<language>/<spec name>` (`EVENTGEN_OUTPUT_ROOT`)
//! - `--package-name`, `--package-version` - Passed to OpenAPI Generator
//! - `--region`, `--event-bus-name`, `--event-source` - Baked into generated
//!   clients (`AWS_REGION`, `EVENT_BUS_NAME`, `EVENT_SOURCE`)
//! - `--config <FILE>` - `eventgen.toml` (auto-detected next to the spec)
//! - `--generator-bin <PATH>` - OpenAPI Generator executable (`OPENAPI_GENERATOR_BIN`)
//!
//! ### `validate`
//!
//! ```bash
//! eventgen validate --spec openapi.yaml
//! ```
//!
//! ### `events`
//!
//! Lists the schemas that will get a publisher and consumer:
//!
//! ```bash
//! eventgen events --spec openapi.yaml
//! ```

mod commands;


pub use commands::{run, run_cli, Cli, Commands, GenerateArgs};
