#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use openapi_eventgen::fs::{FileSystem, LocalFileSystem};
use openapi_eventgen::model_gen::{ModelGenInvocation, ModelGenerator};
use openapi_eventgen::spec::{parse_document, OpenApiDocument};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const BILLING_SPEC: &str = include_str!("../fixtures/billing.yaml");

pub fn billing_document() -> OpenApiDocument {
    parse_document(BILLING_SPEC, true).unwrap()
}

pub fn document_from_yaml(yaml: &str) -> OpenApiDocument {
    parse_document(yaml, true).unwrap()
}

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Import line OpenAPI Generator puts at the top of TypeScript models
pub const TS_HTTP_IMPORT: &str = "import { HttpFile } from '../http/http';";

pub fn ts_model_source(name: &str) -> String {
    format!(
        "{TS_HTTP_IMPORT}\nimport {{ Money }} from './Money';\n\nexport class {name} {{\n    'id'?: string;\n}}\n"
    )
}

/// Stands in for `openapi-generator-cli`: writes the layout the real tool
/// produces for a handful of models and records every invocation.
#[derive(Clone, Default)]
pub struct FakeModelGenerator {
    pub invocations: Rc<RefCell<Vec<ModelGenInvocation>>>,
    /// Whether the temporary document existed when the tool ran
    pub saw_input: Rc<RefCell<Vec<bool>>>,
}

impl FakeModelGenerator {
    fn additional_property(inv: &ModelGenInvocation, key: &str) -> Option<String> {
        inv.additional_properties.split(',').find_map(|kv| {
            let (k, v) = kv.split_once('=')?;
            (k == key).then(|| v.to_string())
        })
    }
}

impl ModelGenerator for FakeModelGenerator {
    fn generate(&self, inv: &ModelGenInvocation) -> anyhow::Result<()> {
        self.invocations.borrow_mut().push(inv.clone());
        self.saw_input.borrow_mut().push(inv.input.is_file());
        let out = &inv.output;

        write(&out.join(".openapi-generator/VERSION"), "7.0.0\n");
        write(&out.join(".openapi-generator-ignore"), "");
        write(&out.join(".gitignore"), "node_modules\n");
        write(&out.join("git_push.sh"), "#!/bin/sh\n");
        write(&out.join("README.md"), "# generated\n");

        match inv.generator.as_str() {
            "typescript" => {
                for name in ["BillEvent", "Money", "Payment", "PaymentEvent"] {
                    write(&out.join(format!("models/{name}.ts")), &ts_model_source(name));
                }
                write(&out.join("models/all.ts"), "export * from './BillEvent';\n");
                write(&out.join("http/http.ts"), "export class HttpFile {}\n");
                write(&out.join("apis/exception.ts"), "");
                write(&out.join("index.ts"), "export * from './http/http';\n");
                write(&out.join("package.json"), "{}\n");
                write(&out.join("tsconfig.json"), "{}\n");
            }
            "python" => {
                let package = Self::additional_property(inv, "packageName").unwrap();
                let models = out.join(&package).join("models");
                write(&models.join("__init__.py"), "from .bill_event import BillEvent\n");
                for module in ["bill_event", "money", "payment", "payment_event"] {
                    write(&models.join(format!("{module}.py")), "class Model: ...\n");
                }
                write(&out.join(&package).join("api_client.py"), "");
                write(&out.join("docs/BillEvent.md"), "");
                write(&out.join("test/test_bill_event.py"), "");
                write(&out.join("setup.py"), "");
                write(&out.join("pyproject.toml"), "");
                write(&out.join("requirements.txt"), "");
            }
            other => anyhow::bail!("unexpected generator {other}"),
        }
        Ok(())
    }
}

/// Model generator that always fails, like a non-zero exit
pub struct FailingModelGenerator;

impl ModelGenerator for FailingModelGenerator {
    fn generate(&self, _inv: &ModelGenInvocation) -> anyhow::Result<()> {
        anyhow::bail!("openapi-generator-cli generate failed (exit status: 1)")
    }
}

/// [`FileSystem`] that forwards to the real disk and records each call
#[derive(Clone, Default)]
pub struct RecordingFileSystem {
    inner: LocalFileSystem,
    pub ops: Rc<RefCell<Vec<(&'static str, PathBuf)>>>,
}

impl RecordingFileSystem {
    fn record(&self, op: &'static str, path: &Path) {
        self.ops.borrow_mut().push((op, path.to_path_buf()));
    }

    /// Paths passed to `op`, in call order.
    pub fn paths(&self, op: &str) -> Vec<PathBuf> {
        self.ops
            .borrow()
            .iter()
            .filter(|(o, _)| *o == op)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

impl FileSystem for RecordingFileSystem {
    fn create_dir_all(&self, path: &Path) -> anyhow::Result<()> {
        self.record("create_dir_all", path);
        self.inner.create_dir_all(path)
    }

    fn read_to_string(&self, path: &Path) -> anyhow::Result<String> {
        self.record("read", path);
        self.inner.read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> anyhow::Result<()> {
        self.record("write", path);
        self.inner.write(path, contents)
    }

    fn rename(&self, from: &Path, to: &Path) -> anyhow::Result<()> {
        self.record("rename", from);
        self.inner.rename(from, to)
    }

    fn remove(&self, path: &Path) -> anyhow::Result<()> {
        self.record("remove", path);
        self.inner.remove(path)
    }

    fn list_dir(&self, path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        self.record("list_dir", path);
        self.inner.list_dir(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }
}
