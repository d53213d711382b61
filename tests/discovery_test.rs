use pretty_assertions::assert_eq;
use route_explorer::{
    loader::{JsonModuleLoader, ModuleLoader},
    metadata::AttachedMetadata,
    model::{RouteMap, RouteRecord},
    render::{render_json, render_text},
    walker::ModuleGraphWalker,
};
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to materialize a fixture document on disk
fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write fixture document");
    path
}

/// Helper running the whole pipeline over a document
fn discover(content: &str, entry_class: &str, prefix: Option<&str>) -> RouteMap {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = write_fixture(&temp_dir, "modules.json", content);

    let exports = JsonModuleLoader.load(&path).expect("Failed to load document");
    let entry = exports.entry(entry_class).expect("Entry module missing");

    let reader = AttachedMetadata;
    ModuleGraphWalker::new(&reader).discover(&entry, prefix)
}

fn route<'a>(routes: &'a RouteMap, controller: &str, handler: &str) -> &'a RouteRecord {
    routes[controller]
        .iter()
        .find(|record| record.handler.ends_with(handler))
        .unwrap_or_else(|| panic!("no route for {}.{}", controller, handler))
}

#[test]
fn test_end_to_end_discovery() {
    let routes = discover(include_str!("fixtures/app_modules.json"), "AppModule", None);

    // Four controllers contribute routes; SharedModule has none.
    assert_eq!(routes.len(), 4);
    let total: usize = routes.values().map(Vec::len).sum();
    assert_eq!(total, 10);

    assert_eq!(
        route(&routes, "RootController", "index"),
        &RouteRecord {
            method: "GET".to_string(),
            path: "/".to_string(),
            handler: "RootController.index".to_string(),
        }
    );

    // Verb codes and names mix within one controller.
    assert_eq!(route(&routes, "UsersController", "findAll").path, "/users");
    assert_eq!(route(&routes, "UsersController", "findOne").path, "/users/:id");
    assert_eq!(route(&routes, "UsersController", "create").method, "POST");
    assert_eq!(route(&routes, "UsersController", "update").method, "PUT");
    assert_eq!(route(&routes, "UsersController", "remove").method, "DELETE");

    assert_eq!(
        route(&routes, "PostsController", "stats").path,
        "/posts/stats/summary"
    );

    // Reached through a configured (dynamic) import.
    assert_eq!(route(&routes, "HealthController", "check").path, "/health");
    // Members without route metadata never show up.
    assert_eq!(routes["HealthController"].len(), 1);
}

#[test]
fn test_end_to_end_discovery_with_prefix() {
    let routes = discover(
        include_str!("fixtures/app_modules.json"),
        "AppModule",
        Some("api"),
    );

    assert_eq!(route(&routes, "RootController", "index").path, "/api");
    assert_eq!(route(&routes, "UsersController", "findOne").path, "/api/users/:id");
    assert_eq!(route(&routes, "HealthController", "check").path, "/api/health");
}

#[test]
fn test_discovery_starting_below_the_root() {
    let routes = discover(
        include_str!("fixtures/app_modules.json"),
        "UsersModule",
        None,
    );

    // Only UsersModule and its import subtree are reachable.
    assert_eq!(routes.len(), 1);
    assert_eq!(routes["UsersController"].len(), 5);
}

#[test]
fn test_cyclic_document_discovery_terminates() {
    let routes = discover(
        include_str!("fixtures/cycle_modules.json"),
        "OrdersModule",
        None,
    );

    assert_eq!(routes.len(), 2);
    assert_eq!(route(&routes, "OrdersController", "findAll").path, "/orders");
    assert_eq!(
        route(&routes, "BillingController", "invoice").path,
        "/billing/invoices/:id"
    );
}

#[test]
fn test_json_output_end_to_end() {
    let routes = discover(include_str!("fixtures/app_modules.json"), "AppModule", None);

    let json = render_json(&routes).expect("Failed to serialize route map");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("Output is not valid JSON");

    let users = parsed["UsersController"]
        .as_array()
        .expect("UsersController should be an array");
    assert_eq!(users.len(), 5);
    assert_eq!(users[0]["method"], "GET");
    assert_eq!(users[0]["path"], "/users");
    assert_eq!(users[0]["handler"], "UsersController.findAll");
}

#[test]
fn test_text_output_end_to_end() {
    let routes = discover(include_str!("fixtures/app_modules.json"), "AppModule", None);

    let text = render_text(&routes);

    assert!(text.starts_with("Discovered HTTP routes\n"));
    assert!(text.contains("[UsersController]\n"));
    assert!(text.contains("  GET     /users\n"));
    assert!(text.contains("  DELETE  /users/:id\n"));
    assert!(text.ends_with("10 routes in 4 controllers\n"));

    // Controllers are listed alphabetically regardless of discovery order.
    let health = text.find("[HealthController]").unwrap();
    let posts = text.find("[PostsController]").unwrap();
    let root = text.find("[RootController]").unwrap();
    let users = text.find("[UsersController]").unwrap();
    assert!(health < posts && posts < root && root < users);
}
