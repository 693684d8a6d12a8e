#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{
    billing_document, document_from_yaml, FailingModelGenerator, FakeModelGenerator,
    RecordingFileSystem, TS_HTTP_IMPORT,
};
use openapi_eventgen::generator::{
    EventError, GeneratorOptions, Orchestrator, TargetLanguage, TEMP_SPEC_FILE,
};
use openapi_eventgen::spec::{ResolveError, ValidationError};
use std::fs;
use std::path::Path;

fn orchestrator(
    out: &Path,
    options: GeneratorOptions,
    fake: &FakeModelGenerator,
    fs: &RecordingFileSystem,
) -> Orchestrator {
    Orchestrator::new(billing_document(), out, options)
        .unwrap()
        .with_model_generator(Box::new(fake.clone()))
        .with_file_system(Box::new(fs.clone()))
}

#[test]
fn test_python_generates_snake_case_files_after_models_dir() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("python/billing");
    let fake = FakeModelGenerator::default();
    let recorder = RecordingFileSystem::default();
    let options = GeneratorOptions::new(TargetLanguage::Python).with_package_name("billing-events");

    let report = orchestrator(&out, options, &fake, &recorder).run().unwrap();

    assert!(out.join("events/bill_event_publisher.py").is_file());
    assert!(out.join("events/bill_event_consumer.py").is_file());
    assert!(out.join("events/payment_event_publisher.py").is_file());
    assert_eq!(report.event_files.len(), 4);

    let created = recorder.paths("create_dir_all");
    let models = created.iter().position(|p| p == &out.join("models")).unwrap();
    let events = created.iter().position(|p| p == &out.join("events")).unwrap();
    assert!(models < events, "models/ must be created before events/: {created:?}");

    let publisher = fs::read_to_string(out.join("events/bill_event_publisher.py")).unwrap();
    assert!(publisher.contains("from ..models.bill_event import BillEvent"));
    assert!(publisher.contains("class BillEventPublisher:"));
}

#[test]
fn test_python_models_relocated_and_package_removed() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_path_buf();
    let fake = FakeModelGenerator::default();
    let recorder = RecordingFileSystem::default();
    let options = GeneratorOptions::new(TargetLanguage::Python).with_package_name("billing-events");

    let report = orchestrator(&out, options, &fake, &recorder).run().unwrap();

    assert!(out.join("models/__init__.py").is_file());
    assert!(out.join("models/bill_event.py").is_file());
    assert!(out.join("models/payment.py").is_file());
    assert!(!out.join("billing_events").exists());
    assert!(!out.join("docs").exists());
    assert!(!out.join("test").exists());
    for leftover in ["setup.py", "pyproject.toml", "requirements.txt", "README.md", ".openapi-generator"] {
        assert!(!out.join(leftover).exists(), "{leftover} should be removed");
    }
    assert!(report.removed_scaffold.contains(&out.join("setup.py")));
    // already removed by post-processing
    assert!(!report.removed_scaffold.contains(&out.join("docs")));
}

#[test]
fn test_chained_reference_resolved_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_path_buf();
    let fake = FakeModelGenerator::default();
    let recorder = RecordingFileSystem::default();
    let options = GeneratorOptions::new(TargetLanguage::TypeScript);

    orchestrator(&out, options, &fake, &recorder).run().unwrap();

    // PaymentEvent -> Payment: the field list comes from Payment's body
    let publisher = fs::read_to_string(out.join("events/PaymentEventPublisher.ts")).unwrap();
    assert!(publisher.contains(" * - paymentId (string, required)"));
    assert!(publisher.contains(" * - amount (Money, optional)"));
    assert!(publisher.contains("import { PaymentEvent } from '../models/PaymentEvent';"));
}

#[test]
fn test_invalid_openapi_version_fails_before_any_io() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never-created");
    let doc = document_from_yaml(
        "openapi: 2.0.0\ninfo:\n  title: Old\n  version: '1'\ncomponents:\n  schemas: {}\n",
    );

    let err = Orchestrator::new(doc, &out, GeneratorOptions::default()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnsupportedOpenApiVersion {
            found: "2.0.0".to_string()
        }
    );
    assert_eq!(err.to_string(), "Invalid OpenAPI version: expected 3.x, got 2.0.0");
    assert!(!out.exists());
}

#[test]
fn test_typescript_models_lose_only_http_import() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_path_buf();
    let fake = FakeModelGenerator::default();
    let recorder = RecordingFileSystem::default();
    let options = GeneratorOptions::new(TargetLanguage::TypeScript);

    orchestrator(&out, options, &fake, &recorder).run().unwrap();

    let model = fs::read_to_string(out.join("models/BillEvent.ts")).unwrap();
    assert!(!model.contains(TS_HTTP_IMPORT));
    let expected: String = common::ts_model_source("BillEvent")
        .lines()
        .filter(|l| *l != TS_HTTP_IMPORT)
        .map(|l| format!("{l}\n"))
        .collect();
    assert_eq!(model, expected);
    // files without the import are untouched
    assert_eq!(
        fs::read_to_string(out.join("models/all.ts")).unwrap(),
        "export * from './BillEvent';\n"
    );
}

#[test]
fn test_typescript_output_layout() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_path_buf();
    let fake = FakeModelGenerator::default();
    let recorder = RecordingFileSystem::default();
    let options = GeneratorOptions::new(TargetLanguage::TypeScript)
        .with_package_name("billing-events")
        .with_event_bus_name("billing");

    let report = orchestrator(&out, options, &fake, &recorder).run().unwrap();

    assert_eq!(
        report.event_files,
        vec![
            out.join("events/BillEventPublisher.ts"),
            out.join("events/BillEventConsumer.ts"),
            out.join("events/PaymentEventPublisher.ts"),
            out.join("events/PaymentEventConsumer.ts"),
        ]
    );
    for gone in ["http", "apis", "index.ts", "package.json", "tsconfig.json", ".gitignore", TEMP_SPEC_FILE] {
        assert!(!out.join(gone).exists(), "{gone} should be removed");
    }
    assert!(out.join("models/Money.ts").is_file());
    // AuditLog is not an event
    assert!(!out.join("events/AuditLogPublisher.ts").exists());

    let publisher = fs::read_to_string(out.join("events/BillEventPublisher.ts")).unwrap();
    assert!(publisher.contains(r#"options.eventBusName ?? "billing";"#));
}

#[test]
fn test_model_generator_invocation() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_path_buf();
    let fake = FakeModelGenerator::default();
    let recorder = RecordingFileSystem::default();
    let options = GeneratorOptions::new(TargetLanguage::Python)
        .with_package_name("billing-events")
        .with_package_version("3.1.0");

    orchestrator(&out, options, &fake, &recorder).run().unwrap();

    let invocations = fake.invocations.borrow();
    assert_eq!(invocations.len(), 1);
    let inv = &invocations[0];
    assert_eq!(inv.input, out.join(TEMP_SPEC_FILE));
    assert_eq!(inv.generator, "python");
    assert_eq!(inv.output, out);
    assert_eq!(inv.global_properties, "models,modelDocs=false,modelTests=false");
    assert_eq!(
        inv.additional_properties,
        "packageName=billing_events,packageVersion=3.1.0,projectName=billing-events,library=urllib3"
    );
    assert_eq!(*fake.saw_input.borrow(), vec![true]);
    assert!(!out.join(TEMP_SPEC_FILE).exists());

    let written = recorder.paths("write");
    assert_eq!(written.first(), Some(&out.join(TEMP_SPEC_FILE)));
}

#[test]
fn test_model_generator_failure_propagates_and_cleans_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_path_buf();
    let recorder = RecordingFileSystem::default();

    let err = Orchestrator::new(billing_document(), &out, GeneratorOptions::default())
        .unwrap()
        .with_model_generator(Box::new(FailingModelGenerator))
        .with_file_system(Box::new(recorder.clone()))
        .run()
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "openapi-generator-cli generate failed (exit status: 1)"
    );
    assert!(!out.join(TEMP_SPEC_FILE).exists());
    assert!(!out.join("events").exists());
    assert!(recorder.paths("remove").contains(&out.join(TEMP_SPEC_FILE)));
}

#[test]
fn test_unresolvable_event_reference_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_path_buf();
    let doc = document_from_yaml(
        r#"openapi: 3.0.3
info:
  title: Broken
  version: 1.0.0
components:
  schemas:
    LostEvent:
      $ref: '#/components/schemas/Nowhere'
"#,
    );

    let err = Orchestrator::new(doc, &out, GeneratorOptions::default())
        .unwrap()
        .with_model_generator(Box::new(FakeModelGenerator::default()))
        .run()
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<ResolveError>(),
        Some(&ResolveError::Unresolved {
            pointer: "#/components/schemas/Nowhere".to_string()
        })
    );
    // nothing rolled back, nothing generated
    assert!(out.join("models/BillEvent.ts").exists());
    assert!(!out.join("events/LostEventPublisher.ts").exists());
}

#[test]
fn test_rerun_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_path_buf();
    let fake = FakeModelGenerator::default();
    let recorder = RecordingFileSystem::default();

    orchestrator(&out, GeneratorOptions::new(TargetLanguage::Python), &fake, &recorder)
        .run()
        .unwrap();
    let first = fs::read_to_string(out.join("events/bill_event_consumer.py")).unwrap();
    orchestrator(&out, GeneratorOptions::new(TargetLanguage::Python), &fake, &recorder)
        .run()
        .unwrap();
    let second = fs::read_to_string(out.join("events/bill_event_consumer.py")).unwrap();

    assert_eq!(first, second);
    assert_eq!(fake.invocations.borrow().len(), 2);
}

#[test]
fn test_python_models_package_rejected_before_any_io() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("python/billing");
    let fake = FakeModelGenerator::default();
    let recorder = RecordingFileSystem::default();
    let options = GeneratorOptions::new(TargetLanguage::Python).with_package_name("models");

    let err = orchestrator(&out, options, &fake, &recorder).run().unwrap_err();

    assert!(err.to_string().contains("Python package name 'models' cannot be used"));
    assert!(fake.invocations.borrow().is_empty());
    assert!(recorder.ops.borrow().is_empty());
    assert!(!out.exists());
}

#[test]
fn test_path_like_event_key_rejected_before_any_io() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let doc = document_from_yaml(
        r#"openapi: 3.0.3
info:
  title: Escape
  version: 1.0.0
components:
  schemas:
    ../../EscapedEvent:
      type: object
"#,
    );
    let fake = FakeModelGenerator::default();
    let recorder = RecordingFileSystem::default();

    let err = Orchestrator::new(doc, &out, GeneratorOptions::default())
        .unwrap()
        .with_model_generator(Box::new(fake.clone()))
        .with_file_system(Box::new(recorder.clone()))
        .run()
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<EventError>(),
        Some(&EventError::InvalidName {
            name: "../../EscapedEvent".to_string()
        })
    );
    assert!(fake.invocations.borrow().is_empty());
    assert!(recorder.ops.borrow().is_empty());
    assert!(!dir.path().join("EscapedEventPublisher.ts").exists());
}
