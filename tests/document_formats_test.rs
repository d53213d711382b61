use route_explorer::{
    error::Error,
    loader::{JsonModuleLoader, ModuleLoader},
    metadata::AttachedMetadata,
    walker::ModuleGraphWalker,
};
use std::path::PathBuf;
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write fixture document");
    path
}

#[test]
fn test_bare_map_document_discovers_routes() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(
        &temp_dir,
        "bare.json",
        r#"{
            "AppModule": {
                "imports": ["StatusModule"]
            },
            "StatusModule": {
                "controllers": [
                    {
                        "name": "StatusController",
                        "path": "status",
                        "endpoints": [
                            { "name": "ping", "path": "ping", "method": "GET" }
                        ]
                    }
                ]
            }
        }"#,
    );

    let exports = JsonModuleLoader.load(&path).unwrap();
    let entry = exports.entry("AppModule").unwrap();

    let reader = AttachedMetadata;
    let routes = ModuleGraphWalker::new(&reader).discover(&entry, None);

    assert_eq!(routes["StatusController"][0].path, "/status/ping");
}

#[test]
fn test_declarations_discovery_does_not_read_are_tolerated() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(
        &temp_dir,
        "extra.json",
        r#"{
            "modules": {
                "AppModule": {
                    "providers": ["AppService", "ConfigService"],
                    "exports": ["AppService"],
                    "controllers": [
                        {
                            "name": "AppController",
                            "path": "",
                            "endpoints": [
                                { "name": "hello", "path": "hello", "method": "GET" }
                            ]
                        }
                    ]
                }
            }
        }"#,
    );

    let exports = JsonModuleLoader.load(&path).unwrap();
    let entry = exports.entry("AppModule").unwrap();

    let reader = AttachedMetadata;
    let routes = ModuleGraphWalker::new(&reader).discover(&entry, None);

    assert_eq!(routes["AppController"][0].path, "/hello");
}

#[test]
fn test_missing_entry_file_is_fatal_and_catchable() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does_not_exist.json");

    let err = JsonModuleLoader.load(&path).unwrap_err();

    match err {
        Error::FileNotFound(reported) => assert_eq!(reported, path),
        other => panic!("expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_missing_module_class_is_fatal_and_catchable() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(
        &temp_dir,
        "modules.json",
        r#"{ "modules": { "RootModule": {} } }"#,
    );

    let exports = JsonModuleLoader.load(&path).unwrap();
    let err = exports.entry("AppModule").unwrap_err();

    let message = err.to_string();
    assert!(message.contains("AppModule"), "{}", message);
    assert!(message.contains("RootModule"), "{}", message);
}

#[test]
fn test_unrecognized_document_reports_remediation_hints() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(&temp_dir, "broken.json", "\"just a string\"");

    let err = JsonModuleLoader.load(&path).unwrap_err();

    match err {
        Error::ModuleLoadFailure { ref message, .. } => {
            assert!(message.contains("\"modules\" map"), "{}", message);
            assert!(message.contains("bare map"), "{}", message);
        }
        ref other => panic!("expected ModuleLoadFailure, got {:?}", other),
    }
    // The error Display carries the offending file for the user.
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_numeric_and_named_verbs_mix_in_one_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(
        &temp_dir,
        "verbs.json",
        r#"{
            "modules": {
                "AppModule": {
                    "controllers": [
                        {
                            "name": "VerbController",
                            "path": "verbs",
                            "endpoints": [
                                { "name": "asCode", "path": "code", "method": 4 },
                                { "name": "asName", "path": "name", "method": "options" },
                                { "name": "unknownCode", "path": "odd", "method": 99 }
                            ]
                        }
                    ]
                }
            }
        }"#,
    );

    let exports = JsonModuleLoader.load(&path).unwrap();
    let entry = exports.entry("AppModule").unwrap();

    let reader = AttachedMetadata;
    let routes = ModuleGraphWalker::new(&reader).discover(&entry, None);

    let methods: Vec<&str> = routes["VerbController"]
        .iter()
        .map(|record| record.method.as_str())
        .collect();
    assert_eq!(methods, vec!["PATCH", "OPTIONS", "99"]);
}
