//! Module loading capability.
//!
//! Discovery itself only needs one entry [`ModuleRef`], however obtained;
//! everything in this module is environment plumbing around that. The
//! shipped [`JsonModuleLoader`] reads a JSON module-descriptor document,
//! trying a chain of accepted document shapes, and links named import
//! references into shared descriptors. Cycles and diamond references are
//! legal in the document and resolve to the same descriptor instance.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::metadata::{
    MetadataTable, MetadataValue, CONTROLLERS_KEY, IMPORTS_KEY, METHOD_KEY, PATH_KEY,
};
use crate::model::{ControllerDescriptor, EndpointDescriptor, ModuleDescriptor, ModuleImport, ModuleRef};

/// Capability that turns a file path into an in-memory exports handle.
pub trait ModuleLoader {
    fn load(&self, path: &Path) -> Result<ExportsHandle>;
}

/// The named module descriptors a loaded document exposes.
#[derive(Debug)]
pub struct ExportsHandle {
    exports: IndexMap<String, ModuleRef>,
    source: PathBuf,
}

impl ExportsHandle {
    pub fn get(&self, name: &str) -> Option<&ModuleRef> {
        self.exports.get(name)
    }

    /// Selects the entry module by its class name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClassNotFound`] when the document declares no
    /// module under that name; the error lists the declared names.
    pub fn entry(&self, name: &str) -> Result<ModuleRef> {
        match self.exports.get(name) {
            Some(module) => Ok(Rc::clone(module)),
            None => Err(Error::ClassNotFound {
                class: name.to_string(),
                file: self.source.clone(),
                available: self.exports.keys().cloned().collect(),
            }),
        }
    }

    /// Declared module names, in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.exports.keys().map(String::as_str)
    }
}

/// Loader for JSON module-descriptor documents.
///
/// Two document shapes are accepted, tried in order:
///
/// 1. A document object with a top-level `modules` map:
///    `{ "modules": { "AppModule": { ... } } }`
/// 2. A bare map of module name to module definition:
///    `{ "AppModule": { ... } }`
///
/// Each module definition may declare `imports` (bare name strings or
/// configured objects with a `module` field plus opaque options) and
/// `controllers` (name, optional base `path`, ordered `endpoints` with
/// optional `path` and `method`, the latter a canonical name or numeric
/// code).
pub struct JsonModuleLoader;

#[derive(Debug, Deserialize)]
struct RawDocument {
    modules: IndexMap<String, RawModule>,
}

#[derive(Debug, Deserialize, Default)]
struct RawModule {
    #[serde(default)]
    imports: Vec<RawImport>,
    #[serde(default)]
    controllers: Vec<RawController>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawImport {
    /// `"UsersModule"`
    Named(String),
    /// `{ "module": "ConfigModule", "options": { ... } }`
    Configured {
        module: String,
        #[serde(flatten)]
        config: serde_json::Map<String, serde_json::Value>,
    },
}

#[derive(Debug, Deserialize)]
struct RawController {
    name: String,
    path: Option<String>,
    #[serde(default)]
    endpoints: Vec<RawEndpoint>,
}

#[derive(Debug, Deserialize)]
struct RawEndpoint {
    name: String,
    path: Option<String>,
    method: Option<RawVerb>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawVerb {
    Code(i64),
    Name(String),
}

impl ModuleLoader for JsonModuleLoader {
    fn load(&self, path: &Path) -> Result<ExportsHandle> {
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;

        let modules = Self::parse(&content).ok_or_else(|| Error::ModuleLoadFailure {
            file: path.to_path_buf(),
            message: "not a recognized module document; expected a JSON object with a \
                      top-level \"modules\" map, or a bare map of module definitions"
                .to_string(),
        })?;

        debug!(
            "loaded {} module definitions from {}",
            modules.len(),
            path.display()
        );
        Ok(Self::link(modules, path))
    }
}

impl JsonModuleLoader {
    /// Tries each accepted document shape in order.
    fn parse(content: &str) -> Option<IndexMap<String, RawModule>> {
        if let Ok(document) = serde_json::from_str::<RawDocument>(content) {
            debug!("parsed as document with a top-level modules map");
            return Some(document.modules);
        }
        if let Ok(modules) = serde_json::from_str::<IndexMap<String, RawModule>>(content) {
            debug!("parsed as bare module map");
            return Some(modules);
        }
        None
    }

    /// Resolves named references into shared descriptors.
    ///
    /// All descriptors are created first, then metadata is attached, so
    /// imports may reference any module in the document regardless of
    /// declaration order, including cyclically. Imports naming an unknown
    /// module are dropped with a warning.
    fn link(raw: IndexMap<String, RawModule>, source: &Path) -> ExportsHandle {
        let modules: HashMap<&str, ModuleRef> = raw
            .keys()
            .map(|name| (name.as_str(), ModuleDescriptor::new(name)))
            .collect();

        for (name, definition) in &raw {
            let controllers = definition
                .controllers
                .iter()
                .map(Self::build_controller)
                .collect();

            let mut imports = Vec::new();
            for import in &definition.imports {
                let (target, config) = match import {
                    RawImport::Named(target) => (target, None),
                    RawImport::Configured { module, config } => (module, Some(config)),
                };
                match modules.get(target.as_str()) {
                    Some(inner) => imports.push(match config {
                        None => ModuleImport::Direct(Rc::clone(inner)),
                        Some(config) => ModuleImport::Dynamic {
                            inner: Rc::clone(inner),
                            config: serde_json::Value::Object(config.clone()),
                        },
                    }),
                    None => {
                        warn!("module {} imports undeclared module {}, skipping", name, target);
                    }
                }
            }

            modules[name.as_str()].attach(
                MetadataTable::new()
                    .with(CONTROLLERS_KEY, MetadataValue::Controllers(controllers))
                    .with(IMPORTS_KEY, MetadataValue::Imports(imports)),
            );
        }

        let exports = raw
            .keys()
            .map(|name| (name.clone(), Rc::clone(&modules[name.as_str()])))
            .collect();
        ExportsHandle {
            exports,
            source: source.to_path_buf(),
        }
    }

    fn build_controller(raw: &RawController) -> crate::model::ControllerRef {
        let members = raw
            .endpoints
            .iter()
            .map(|endpoint| {
                let mut table = MetadataTable::new();
                if let Some(path) = &endpoint.path {
                    table = table.with(PATH_KEY, MetadataValue::text(path));
                }
                if let Some(method) = &endpoint.method {
                    let value = match method {
                        RawVerb::Code(code) => MetadataValue::Code(*code),
                        RawVerb::Name(name) => MetadataValue::text(name),
                    };
                    table = table.with(METHOD_KEY, value);
                }
                EndpointDescriptor::new(&endpoint.name, table)
            })
            .collect();

        let mut table = MetadataTable::new();
        if let Some(path) = &raw.path {
            table = table.with(PATH_KEY, MetadataValue::text(path));
        }
        ControllerDescriptor::new(&raw.name, table, members)
    }
}
