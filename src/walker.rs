//! Module graph traversal.
//!
//! The walker starts at an entry module descriptor and expands declared
//! imports pre-order, visiting each distinct descriptor at most once.
//! Identity is the descriptor's own reference, not a derived key, which
//! makes cycles and diamond imports safe by construction. The traversal is
//! iterative with an explicit work stack, so deep import trees cannot
//! exhaust the call stack.

use std::collections::HashSet;
use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::extractor::RouteExtractor;
use crate::metadata::{MetadataError, MetadataReader, CONTROLLERS_KEY, IMPORTS_KEY};
use crate::model::{ControllerRef, ModuleDescriptor, ModuleImport, ModuleRef, RouteMap};

/// Walks the module-import graph and aggregates discovered routes.
pub struct ModuleGraphWalker<'a> {
    reader: &'a dyn MetadataReader,
}

impl<'a> ModuleGraphWalker<'a> {
    pub fn new(reader: &'a dyn MetadataReader) -> Self {
        Self { reader }
    }

    /// Discovers every route reachable from `entry`, applying the optional
    /// global `prefix` ahead of controller base paths.
    ///
    /// A metadata failure while reading one module's declarations skips
    /// that module entirely: neither its controllers nor modules reachable
    /// only through it contribute, but the walk continues with siblings.
    /// Controllers overwrite earlier map entries of the same name.
    pub fn discover(&self, entry: &ModuleRef, prefix: Option<&str>) -> RouteMap {
        let extractor = RouteExtractor::new(self.reader);
        let mut routes: RouteMap = IndexMap::new();
        let mut visited: HashSet<*const ModuleDescriptor> = HashSet::new();
        let mut stack: Vec<ModuleRef> = vec![Rc::clone(entry)];

        while let Some(module) = stack.pop() {
            // Marking before expansion is what terminates self-referential
            // graphs.
            if !visited.insert(Rc::as_ptr(&module)) {
                continue;
            }
            debug!("visiting module {}", module.name());

            let (controllers, imports) = match self.read_module(&module) {
                Ok(declarations) => declarations,
                Err(e) => {
                    warn!("skipping module {}: {}", module.name(), e);
                    continue;
                }
            };

            for controller in &controllers {
                let records = extractor.extract_routes(controller, prefix);
                if !records.is_empty() {
                    debug!(
                        "controller {}: {} routes",
                        controller.name(),
                        records.len()
                    );
                    routes.insert(controller.name().to_string(), records);
                }
            }

            // Reversed so the leftmost declared import is expanded first.
            for import in imports.iter().rev() {
                stack.push(Rc::clone(import.inner()));
            }
        }

        routes
    }

    /// Reads both declaration keys up front so a failure on either one
    /// discards the module's whole contribution, controllers included.
    fn read_module(
        &self,
        module: &ModuleRef,
    ) -> Result<(Vec<ControllerRef>, Vec<ModuleImport>), MetadataError> {
        let controllers = match self.reader.get(module.as_ref(), CONTROLLERS_KEY)? {
            Some(value) => value
                .into_controllers()
                .ok_or_else(|| MetadataError::wrong_type(module.name(), CONTROLLERS_KEY))?,
            None => Vec::new(),
        };
        let imports = match self.reader.get(module.as_ref(), IMPORTS_KEY)? {
            Some(value) => value
                .into_imports()
                .ok_or_else(|| MetadataError::wrong_type(module.name(), IMPORTS_KEY))?,
            None => Vec::new(),
        };
        Ok((controllers, imports))
    }
}
