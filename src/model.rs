//! Descriptors for modules, controllers and endpoints, plus the route
//! records discovery produces.
//!
//! Descriptors are opaque handles from the discovery core's point of view:
//! the walker and the extractor read them only through the
//! [`MetadataReader`](crate::metadata::MetadataReader) capability. Module
//! descriptors are shared (`Rc`) because several imports may reference the
//! same module, including cyclically; they live for the duration of the
//! run.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::metadata::{MetadataTable, MetadataTarget};

/// Shared handle to a module descriptor. The walker uses the `Rc` pointer
/// itself as the module's identity.
pub type ModuleRef = Rc<ModuleDescriptor>;

/// Shared handle to a controller descriptor.
pub type ControllerRef = Rc<ControllerDescriptor>;

/// One declared module unit: a name plus metadata attached once at load
/// time (its controllers and imports).
pub struct ModuleDescriptor {
    name: String,
    meta: OnceCell<MetadataTable>,
}

impl ModuleDescriptor {
    /// Creates a descriptor with no metadata attached yet. Loaders create
    /// all descriptors first so import references can be linked, then
    /// attach metadata.
    pub fn new(name: impl Into<String>) -> ModuleRef {
        Rc::new(Self {
            name: name.into(),
            meta: OnceCell::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attaches the metadata table. The first attachment wins; later calls
    /// are ignored.
    pub fn attach(&self, table: MetadataTable) {
        let _ = self.meta.set(table);
    }
}

impl MetadataTarget for ModuleDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> Option<&MetadataTable> {
        self.meta.get()
    }
}

// Import chains may be cyclic, so only the name is printed.
impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// One entry in a module's declared imports.
#[derive(Debug, Clone)]
pub enum ModuleImport {
    /// A bare reference to another module.
    Direct(ModuleRef),
    /// A configured/dynamic reference wrapping an inner module together
    /// with opaque configuration. Discovery only needs the inner module.
    Dynamic {
        inner: ModuleRef,
        config: serde_json::Value,
    },
}

impl ModuleImport {
    /// The imported module descriptor, whichever shape the import has.
    pub fn inner(&self) -> &ModuleRef {
        match self {
            ModuleImport::Direct(inner) => inner,
            ModuleImport::Dynamic { inner, .. } => inner,
        }
    }
}

/// One controller class: a base path in its metadata and an ordered set of
/// named members.
#[derive(Debug)]
pub struct ControllerDescriptor {
    name: String,
    meta: MetadataTable,
    members: Vec<EndpointDescriptor>,
}

impl ControllerDescriptor {
    pub fn new(
        name: impl Into<String>,
        meta: MetadataTable,
        members: Vec<EndpointDescriptor>,
    ) -> ControllerRef {
        Rc::new(Self {
            name: name.into(),
            meta,
            members,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in declaration order.
    pub fn members(&self) -> &[EndpointDescriptor] {
        &self.members
    }
}

impl MetadataTarget for ControllerDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> Option<&MetadataTable> {
        Some(&self.meta)
    }
}

/// One callable member of a controller. Only members carrying both path
/// and verb metadata are routes.
#[derive(Debug)]
pub struct EndpointDescriptor {
    name: String,
    meta: MetadataTable,
}

impl EndpointDescriptor {
    pub fn new(name: impl Into<String>, meta: MetadataTable) -> Self {
        Self {
            name: name.into(),
            meta,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl MetadataTarget for EndpointDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> Option<&MetadataTable> {
        Some(&self.meta)
    }
}

/// One discovered route. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Canonical uppercase verb name (e.g. "GET"), or the uppercased raw
    /// value when the declared verb is unrecognized.
    pub method: String,
    /// Normalized absolute path: starts with `/`, no doubled slashes, no
    /// trailing slash unless the path is exactly `/`.
    pub path: String,
    /// `"<ControllerName>.<memberName>"`.
    pub handler: String,
}

/// Controller name to discovered routes, in first-discovery order.
///
/// Controller names are assumed unique within one run; a later controller
/// with the same name overwrites the earlier entry. Callers must not rely
/// on iteration order for display; the renderer sorts independently.
pub type RouteMap = IndexMap<String, Vec<RouteRecord>>;
