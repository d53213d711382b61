//! Metadata lookup capability for declarative route discovery.
//!
//! Modules, controllers and endpoint members carry declarative key/value
//! metadata attached at load time. The discovery core never computes this
//! data; it only reads it through the [`MetadataReader`] trait, so the core
//! has no dependency on any particular annotation or loading mechanism.
//! Tests supply fake readers backed by plain mappings.

use std::collections::HashMap;

use crate::model::{ControllerRef, ModuleImport};

/// Metadata key holding the declared path of a controller or endpoint.
pub const PATH_KEY: &str = "path";
/// Metadata key holding the declared HTTP verb of an endpoint.
pub const METHOD_KEY: &str = "method";
/// Metadata key holding the controllers declared directly on a module.
pub const CONTROLLERS_KEY: &str = "controllers";
/// Metadata key holding a module's declared imports.
pub const IMPORTS_KEY: &str = "imports";

/// Key/value metadata attached to a descriptor at definition time.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    entries: HashMap<String, MetadataValue>,
}

impl MetadataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion used by loaders and tests.
    pub fn with(mut self, key: &str, value: MetadataValue) -> Self {
        self.entries.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries.get(key)
    }
}

/// One attached metadata value.
///
/// Declared verbs may be canonical names or numeric codes, so both shapes
/// are representable; the extractor normalizes them.
#[derive(Debug, Clone)]
pub enum MetadataValue {
    Text(String),
    Code(i64),
    Controllers(Vec<ControllerRef>),
    Imports(Vec<ModuleImport>),
}

impl MetadataValue {
    pub fn text(value: impl Into<String>) -> Self {
        MetadataValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_controllers(self) -> Option<Vec<ControllerRef>> {
        match self {
            MetadataValue::Controllers(controllers) => Some(controllers),
            _ => None,
        }
    }

    pub fn into_imports(self) -> Option<Vec<ModuleImport>> {
        match self {
            MetadataValue::Imports(imports) => Some(imports),
            _ => None,
        }
    }
}

/// Failure while reading one metadata key on one target.
///
/// These are never fatal to a discovery run; the walker and the extractor
/// contain them at module or member granularity.
#[derive(Debug, Clone)]
pub struct MetadataError {
    pub target: String,
    pub key: String,
    pub message: String,
}

impl MetadataError {
    pub fn new(target: &str, key: &str, message: impl Into<String>) -> Self {
        Self {
            target: target.to_string(),
            key: key.to_string(),
            message: message.into(),
        }
    }

    /// Error for a key whose attached value has an unusable shape.
    pub fn wrong_type(target: &str, key: &str) -> Self {
        Self::new(target, key, "attached value has an unexpected shape")
    }
}

impl std::fmt::Display for MetadataError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "metadata '{}' on {}: {}",
            self.key, self.target, self.message
        )
    }
}

impl std::error::Error for MetadataError {}

/// Anything metadata can be looked up on: a module, a controller, or one
/// of a controller's members.
pub trait MetadataTarget {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// The metadata table attached to this target, if any was attached.
    fn metadata(&self) -> Option<&MetadataTable>;
}

/// Result of a single metadata lookup. `Ok(None)` means the key is absent.
pub type MetadataResult = Result<Option<MetadataValue>, MetadataError>;

/// Injected lookup capability the discovery core reads metadata through.
pub trait MetadataReader {
    fn get(&self, target: &dyn MetadataTarget, key: &str) -> MetadataResult;
}

/// Production reader: a pure lookup into the table attached to the target.
pub struct AttachedMetadata;

impl MetadataReader for AttachedMetadata {
    fn get(&self, target: &dyn MetadataTarget, key: &str) -> MetadataResult {
        Ok(target.metadata().and_then(|table| table.get(key).cloned()))
    }
}
