#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Property tests for the inheritance and aggregation rules

use brrtsec::{get_security, OperationSecurity};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

const DECLARED: &[&str] = &["key", "bearer", "oauth"];
const UNDECLARED: &[&str] = &["ghost", "phantom"];
const ANY: &[&str] = &["key", "bearer", "oauth", "ghost", "phantom"];
const SCOPES: &[&str] = &["a", "b", "c"];

fn schemes() -> Value {
    json!({
        "key": { "type": "apiKey", "name": "X-Api-Key", "in": "header" },
        "bearer": { "type": "http", "scheme": "bearer" },
        "oauth": {
            "type": "oauth2",
            "flows": { "implicit": {
                "authorizationUrl": "https://auth.example.com/authorize",
                "scopes": { "a": "A", "b": "B" }
            }}
        }
    })
}

/// A `security` array built from scheme names drawn from `names`
fn requirements(names: &'static [&'static str]) -> impl Strategy<Value = Value> {
    let entry = (
        prop::sample::select(names),
        prop::collection::vec(prop::sample::select(SCOPES), 0..3),
    );
    prop::collection::vec(prop::collection::vec(entry, 0..3), 0..4).prop_map(|alternatives| {
        Value::Array(
            alternatives
                .into_iter()
                .map(|entries| {
                    let mut obj = Map::new();
                    for (name, scopes) in entries {
                        obj.insert(name.to_string(), json!(scopes));
                    }
                    Value::Object(obj)
                })
                .collect(),
        )
    })
}

fn document(root: Option<&Value>, operation: Option<&Value>) -> Value {
    let mut op = Map::new();
    if let Some(security) = operation {
        op.insert("security".to_string(), security.clone());
    }
    let mut doc = json!({
        "components": { "securitySchemes": schemes() },
        "paths": { "/x": { "get": Value::Object(op) } }
    });
    if let Some(security) = root {
        doc["security"] = security.clone();
    }
    doc
}

fn resolve(doc: &Value) -> OperationSecurity {
    get_security(doc, "/x", "get").unwrap().unwrap()
}

fn alternatives(security: &Value) -> Vec<&Map<String, Value>> {
    security
        .as_array()
        .unwrap()
        .iter()
        .map(|alt| alt.as_object().unwrap())
        .collect()
}

proptest! {
    #[test]
    fn prop_absent_operation_security_inherits_root(root in requirements(ANY)) {
        let inherited = resolve(&document(Some(&root), None));
        let explicit = resolve(&document(None, Some(&root)));
        prop_assert_eq!(inherited, explicit);
    }

    #[test]
    fn prop_explicit_empty_list_is_unsecured(root in requirements(ANY)) {
        let sec = resolve(&document(Some(&root), Some(&json!([]))));
        prop_assert!(!sec.secured);
        prop_assert!(!sec.optional);
        prop_assert!(sec.securities.is_empty());
    }

    #[test]
    fn prop_flags_follow_the_requirement_list(security in requirements(ANY)) {
        let sec = resolve(&document(None, Some(&security)));
        let alts = alternatives(&security);
        prop_assert_eq!(sec.secured, alts.iter().any(|a| !a.is_empty()));
        prop_assert_eq!(sec.optional, alts.iter().any(|a| a.is_empty()));
    }

    #[test]
    fn prop_declared_schemes_resolve_every_alternative(security in requirements(DECLARED)) {
        let sec = resolve(&document(None, Some(&security)));
        let alts = alternatives(&security);
        let non_empty: Vec<_> = alts.iter().filter(|a| !a.is_empty()).collect();

        prop_assert_eq!(sec.secured, !sec.securities.is_empty());
        prop_assert_eq!(sec.securities.len(), non_empty.len());
        for (resolved, declared) in sec.securities.iter().zip(non_empty) {
            let names: Vec<&str> = resolved.names().collect();
            let expected: Vec<&str> = declared.keys().map(String::as_str).collect();
            prop_assert_eq!(names, expected);
        }
    }

    #[test]
    fn prop_undeclared_schemes_are_excluded(security in requirements(UNDECLARED)) {
        let sec = resolve(&document(None, Some(&security)));
        prop_assert!(sec.securities.is_empty());
    }

    #[test]
    fn prop_oauth2_scopes_are_filtered_in_order(security in requirements(DECLARED)) {
        let sec = resolve(&document(None, Some(&security)));
        let alts = alternatives(&security);
        let non_empty = alts.iter().filter(|a| !a.is_empty());
        for (resolved, declared) in sec.securities.iter().zip(non_empty) {
            if let Some(oauth) = resolved.get("oauth") {
                let expected: Vec<String> = declared["oauth"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|s| *s == "a" || *s == "b")
                    .map(str::to_string)
                    .collect();
                prop_assert_eq!(oauth.scopes(), expected.as_slice());
            }
        }
    }

    #[test]
    fn prop_resolution_is_idempotent(security in requirements(ANY)) {
        let doc = document(None, Some(&security));
        let before = doc.clone();
        prop_assert_eq!(resolve(&doc), resolve(&doc));
        prop_assert_eq!(doc, before);
    }
}
