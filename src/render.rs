//! Rendering of a discovered route map to JSON or human-readable text.
//!
//! Rendering is a pure map-to-string step so the discovery core stays
//! independent of any output sink; the CLI decides whether the result goes
//! to stdout or a file.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::model::{RouteMap, RouteRecord};

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable listing.
    Text,
    /// Pretty-printed JSON, 2-space indent.
    Json,
}

/// Renders the route map in the selected format.
pub fn render(routes: &RouteMap, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(routes)),
        OutputFormat::Json => render_json(routes),
    }
}

/// Serializes the route map as pretty-printed JSON.
///
/// Controllers keep their first-discovery order; consumers that need a
/// stable order should sort keys themselves.
pub fn render_json(routes: &RouteMap) -> Result<String> {
    debug!("serializing route map to JSON");
    Ok(serde_json::to_string_pretty(routes)?)
}

/// Renders the route map as a human-readable listing.
///
/// Controllers are sorted alphabetically and each controller's routes are
/// sorted by path; the method column is left-justified to at least 7
/// characters. A summary line closes the listing.
pub fn render_text(routes: &RouteMap) -> String {
    let total: usize = routes.values().map(Vec::len).sum();

    let mut controllers: Vec<(&String, &Vec<RouteRecord>)> = routes.iter().collect();
    controllers.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = String::new();
    out.push_str("Discovered HTTP routes\n");
    for (name, records) in controllers {
        out.push_str(&format!("[{}]\n", name));
        let mut records: Vec<&RouteRecord> = records.iter().collect();
        records.sort_by(|a, b| a.path.cmp(&b.path));
        for record in records {
            out.push_str(&format!("  {:<7} {}\n", record.method, record.path));
        }
    }
    out.push_str(&format!(
        "{} routes in {} controllers\n",
        total,
        routes.len()
    ));
    out
}

/// Writes rendered content to a file, creating parent directories.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("writing output to {}", path.display());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
