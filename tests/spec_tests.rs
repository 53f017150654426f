#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for document loading and the typed document view

mod common;

use brrtsec::spec::{load_value, ApiKeyLocation, SecuritySchemeDecl};
use brrtsec::{load_document, resolve_operation_security, Document, HttpMethod};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(content: &str, suffix: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::with_suffix(suffix).expect("create temp file");
    temp.write_all(content.as_bytes()).expect("write spec");
    temp.flush().expect("flush");
    temp
}

#[test]
fn test_load_yaml_document() {
    let temp = write_temp(common::PET_STORE_YAML, ".yaml");
    let doc = load_document(temp.path()).unwrap();

    assert_eq!(doc.security.as_ref().map(Vec::len), Some(1));
    let schemes = doc.security_schemes().unwrap();
    assert_eq!(
        schemes.get("apiKeyAuth"),
        Some(&SecuritySchemeDecl::ApiKey {
            name: "X-Api-Key".to_string(),
            location: ApiKeyLocation::Header,
        })
    );

    let post = resolve_operation_security(&doc, "/pets", HttpMethod::Post).unwrap();
    assert!(post.optional);
    assert_eq!(
        post.securities[0].get("oauth2Auth").unwrap().scopes(),
        &["read".to_string()]
    );

    let delete = resolve_operation_security(&doc, "/pets/{id}", HttpMethod::Delete).unwrap();
    assert!(!delete.secured);
}

#[test]
fn test_yml_extension_is_yaml() {
    let temp = write_temp(common::PET_STORE_YAML, ".yml");
    assert!(load_document(temp.path()).is_ok());
}

#[test]
fn test_load_json_document() {
    let content = serde_json::to_string_pretty(&common::pet_store()).unwrap();
    let temp = write_temp(&content, ".json");
    let doc = load_document(temp.path()).unwrap();
    assert_eq!(doc, Document::from_value(&common::pet_store()).unwrap());
}

#[test]
fn test_load_value_keeps_declaration_order() {
    let temp = write_temp(
        "security:\n  - zeta: []\n    alpha: []\n    mid: []\npaths: {}\n",
        ".yaml",
    );
    let value = load_value(temp.path()).unwrap();
    let keys: Vec<&String> = value["security"][0].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

    let doc = Document::from_value(&value).unwrap();
    let names: Vec<&str> = doc.security.as_ref().unwrap()[0]
        .iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_load_errors() {
    let missing = std::env::temp_dir().join("brrtsec-definitely-missing.yaml");
    let err = load_document(&missing).unwrap_err();
    assert!(err.to_string().contains("failed to read"));

    let broken = write_temp("{ not json", ".json");
    assert!(load_document(broken.path()).is_err());

    let scalar = write_temp("42", ".json");
    let err = load_document(scalar.path()).unwrap_err();
    assert!(format!("{err:#}").contains("schema must be an object"));
}

#[test]
fn test_malformed_pieces_do_not_fail_ingestion() {
    let doc = Document::from_value(&json!({
        "security": "nope",
        "components": { "securitySchemes": {
            "noType": { "name": "x" },
            "bodyKey": { "type": "apiKey", "name": "k", "in": "body" },
            "badKey": { "type": "apiKey", "name": "k" },
            "noFlows": { "type": "oauth2", "flows": {} },
            "custom": { "type": "x-custom" }
        }},
        "paths": {
            "/x": { "get": "not an operation", "parameters": [], "post": {} }
        }
    }))
    .unwrap();

    assert!(doc.security.is_none());
    let schemes = doc.security_schemes().unwrap();
    assert!(schemes.get("noType").is_none());
    assert_eq!(schemes.get("badKey").map(SecuritySchemeDecl::kind), Some("apiKey"));
    assert!(matches!(
        schemes.get("badKey"),
        Some(SecuritySchemeDecl::Invalid { .. })
    ));
    assert_eq!(
        schemes.get("bodyKey"),
        Some(&SecuritySchemeDecl::ApiKey {
            name: "k".to_string(),
            location: ApiKeyLocation::Other("body".to_string()),
        })
    );
    assert!(matches!(
        schemes.get("noFlows"),
        Some(SecuritySchemeDecl::Invalid { .. })
    ));
    assert!(matches!(
        schemes.get("custom"),
        Some(SecuritySchemeDecl::Unsupported { .. })
    ));

    let item = doc.path_item("/x").unwrap();
    assert!(item.operation(HttpMethod::Get).is_none());
    assert!(item.operation(HttpMethod::Post).is_some());
}

#[test]
fn test_method_keys_are_case_sensitive() {
    let doc = Document::from_value(&json!({
        "paths": {
            "/pets": {
                "get": { "operationId": "list_pets", "security": [{ "key": [] }] },
                "GET": { "security": [] }
            },
            "/upper": { "GET": {} }
        }
    }))
    .unwrap();

    let pets = doc.path_item("/pets").unwrap();
    let get = pets.operation(HttpMethod::Get).unwrap();
    assert_eq!(get.operation_id.as_deref(), Some("list_pets"));
    assert_eq!(get.security.as_ref().map(Vec::len), Some(1));

    let upper = doc.path_item("/upper").unwrap();
    assert!(upper.operations().next().is_none());
}
