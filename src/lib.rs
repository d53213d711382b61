//! Route Explorer - Static HTTP route discovery over a module graph.
//!
//! This library discovers the HTTP routes an application declares across a
//! tree of interconnected modules, without executing or bootstrapping the
//! application. It reads only the declarative metadata attached to modules,
//! controllers and their members, which makes it suitable for developer
//! tooling such as documentation generation, CI validation and endpoint
//! auditing where starting a full application is undesirable.
//!
//! # Architecture
//!
//! The library is organized into several modules that work together:
//!
//! 1. [`loader`] - Loads a module descriptor document into linked, shared
//!    module descriptors
//! 2. [`metadata`] - The injected lookup capability discovery reads all
//!    declarative metadata through
//! 3. [`walker`] - Traverses the module-import graph, visiting each module
//!    at most once (cycles and diamond imports are safe)
//! 4. [`extractor`] - Extracts normalized route records from one
//!    controller's members
//! 5. [`path`] - Merges prefix, base path and endpoint path into one
//!    canonical absolute path
//! 6. [`render`] - Renders the aggregated route map as JSON or text
//!
//! # Example Usage
//!
//! ```no_run
//! use route_explorer::loader::{JsonModuleLoader, ModuleLoader};
//! use route_explorer::metadata::AttachedMetadata;
//! use route_explorer::render::render_text;
//! use route_explorer::walker::ModuleGraphWalker;
//! use std::path::Path;
//!
//! // Load the module descriptor document
//! let loader = JsonModuleLoader;
//! let exports = loader.load(Path::new("./app.modules.json")).unwrap();
//!
//! // Select the entry module
//! let entry = exports.entry("AppModule").unwrap();
//!
//! // Walk the graph and collect routes
//! let reader = AttachedMetadata;
//! let walker = ModuleGraphWalker::new(&reader);
//! let routes = walker.discover(&entry, Some("api"));
//!
//! // Render for display
//! println!("{}", render_text(&routes));
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete
//! CLI application.

pub mod cli;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod metadata;
pub mod model;
pub mod path;
pub mod render;
pub mod walker;
