//! # Security Module
//!
//! The security module answers, for one declared operation, "how is this
//! protected?": which schemes apply, whether authentication is mandatory or
//! optional, and for OAuth2 which flows and scopes are in force.
//!
//! ## Architecture
//!
//! Resolution follows this flow:
//!
//! 1. [`get_operation_security`] picks the operation's own `security` list, or
//!    falls back to [`get_root_security`] when the operation declares none
//! 2. Empty alternatives (`{}`) mark the operation as `optional`
//! 3. Each non-empty alternative goes through [`resolve_requirement`], which
//!    looks every scheme name up in `components.securitySchemes` and builds a
//!    [`ResolvedSecurity`]
//! 4. OAuth2 schemes run the four flow extractors ([`get_implicit_flow`],
//!    [`get_password_flow`], [`get_client_credentials_flow`],
//!    [`get_authorization_code_flow`]) and keep only requested scopes that the
//!    effective scope catalog ([`get_flow_scopes`]) declares
//! 5. [`resolve_operation_security`] assembles the [`OperationSecurity`]
//!
//! ## Example
//!
//! ```rust
//! use brrtsec::security::resolve_operation_security;
//! use brrtsec::spec::{Document, HttpMethod};
//! use serde_json::json;
//!
//! let doc = Document::from_value(&json!({
//!     "security": [{ "apiKeyAuth": [] }],
//!     "components": { "securitySchemes": {
//!         "apiKeyAuth": { "type": "apiKey", "name": "X-Api-Key", "in": "header" }
//!     }},
//!     "paths": { "/pets": { "get": {} } }
//! }))?;
//!
//! let sec = resolve_operation_security(&doc, "/pets", HttpMethod::Get)?;
//! assert!(sec.secured);
//! assert!(!sec.optional);
//! assert_eq!(sec.securities[0].get("apiKeyAuth").map(|s| s.kind()), Some("apiKey"));
//! # Ok::<(), brrtsec::SecurityError>(())
//! ```
//!
//! Every call works on a borrowed, immutable [`Document`](crate::spec::Document)
//! and returns freshly built values, so one document can be shared across
//! threads without locking.

mod flows;
mod normalize;
mod operation;
mod requirement;
mod types;

pub use flows::{
    effective_flow_scopes, get_authorization_code_flow, get_client_credentials_flow,
    get_flow_scopes, get_implicit_flow, get_password_flow, get_union_flow_scopes, resolve_flows,
};
pub use normalize::{resolve_requirement, resolve_scheme};
pub use operation::{
    resolve_document_security, resolve_operation_security, resolve_operation_security_with,
};
pub use requirement::{get_operation_security, get_root_security};
pub use types::{
    AuthorizationCodeFlow, ClientCredentialsFlow, ImplicitFlow, OperationSecurity,
    OperationSecurityEntry, PasswordFlow, ResolvedFlows, ResolvedSecurity, Securities,
};

use crate::config::ResolverConfig;
use crate::error::SecurityError;
use crate::spec::{Document, HttpMethod};
use serde_json::Value;

/// Resolve operation security straight from a raw document value
///
/// This is the argument-checking boundary. An undeclared path or method is
/// not an error here: it yields `Ok(None)`.
///
/// # Errors
///
/// * `MissingArgument` - `document` is `null`, `path` or `method` is empty
/// * `InvalidArgumentType` - `document` is not an object, `method` is not an HTTP verb
/// * `StructuralAbsence` - see [`resolve_operation_security_with`]
pub fn get_security(
    document: &Value,
    path: &str,
    method: &str,
) -> Result<Option<OperationSecurity>, SecurityError> {
    get_security_with(document, path, method, &ResolverConfig::default())
}

/// [`get_security`] with an explicit [`ResolverConfig`].
pub fn get_security_with(
    document: &Value,
    path: &str,
    method: &str,
    config: &ResolverConfig,
) -> Result<Option<OperationSecurity>, SecurityError> {
    let document = Document::from_value(document)?;
    if path.is_empty() {
        return Err(SecurityError::PathNotProvided);
    }
    let method: HttpMethod = method.parse()?;
    resolve_or_none(&document, path, method, config)
}

/// Loosely typed boundary for callers whose arguments are themselves JSON values
///
/// `null` arguments map to the `*NotProvided` errors, wrongly typed ones to
/// `SchemaNotObject`, `PathNotString` or `InvalidMethod`.
pub fn get_security_from_values(
    document: &Value,
    path: &Value,
    method: &Value,
) -> Result<Option<OperationSecurity>, SecurityError> {
    let document = Document::from_value(document)?;
    let path = match path {
        Value::Null => return Err(SecurityError::PathNotProvided),
        Value::String(p) => p.as_str(),
        _ => return Err(SecurityError::PathNotString),
    };
    let method: HttpMethod = match method {
        Value::Null => return Err(SecurityError::OperationNotProvided),
        Value::String(m) if m.is_empty() => return Err(SecurityError::OperationNotProvided),
        Value::String(m) => m.parse()?,
        other => return Err(SecurityError::InvalidMethod(other.to_string())),
    };
    resolve_or_none(&document, path, method, &ResolverConfig::default())
}

fn resolve_or_none(
    document: &Document,
    path: &str,
    method: HttpMethod,
    config: &ResolverConfig,
) -> Result<Option<OperationSecurity>, SecurityError> {
    match resolve_operation_security_with(document, path, method, config) {
        Ok(security) => Ok(Some(security)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw() -> Value {
        json!({
            "components": { "securitySchemes": {
                "bearer": { "type": "http", "scheme": "bearer" }
            }},
            "paths": { "/me": { "get": { "security": [{ "bearer": [] }] } } }
        })
    }

    #[test]
    fn test_get_security_argument_guards() {
        assert_eq!(
            get_security(&Value::Null, "/me", "get"),
            Err(SecurityError::SchemaNotProvided)
        );
        assert_eq!(
            get_security(&json!(0), "/me", "get"),
            Err(SecurityError::SchemaNotObject)
        );
        assert_eq!(
            get_security(&json!({}), "", "get"),
            Err(SecurityError::PathNotProvided)
        );
        assert_eq!(
            get_security(&json!({}), "fff", ""),
            Err(SecurityError::OperationNotProvided)
        );
        assert_eq!(
            get_security(&json!({}), "path", "jdjjd"),
            Err(SecurityError::InvalidMethod("jdjjd".into()))
        );
    }

    #[test]
    fn test_get_security_not_found_is_none() {
        assert_eq!(get_security(&raw(), "/nope", "get"), Ok(None));
        assert_eq!(get_security(&raw(), "/me", "DELETE"), Ok(None));
    }

    #[test]
    fn test_get_security_method_is_case_insensitive() {
        let sec = get_security(&raw(), "/me", "GET").unwrap().unwrap();
        assert!(sec.secured);
        assert_eq!(sec.securities[0].get("bearer").map(|s| s.kind()), Some("http"));
    }

    #[test]
    fn test_get_security_structural_absence_propagates() {
        assert_eq!(
            get_security(&json!({"openapi": "3.0.3"}), "/me", "get"),
            Err(SecurityError::NoPathInSchema)
        );
    }

    #[test]
    fn test_get_security_from_values_type_guards() {
        assert_eq!(
            get_security_from_values(&raw(), &Value::Null, &json!("get")),
            Err(SecurityError::PathNotProvided)
        );
        for bad in [json!({}), json!(0), json!(true)] {
            assert_eq!(
                get_security_from_values(&raw(), &bad, &json!("get")),
                Err(SecurityError::PathNotString)
            );
        }
        assert_eq!(
            get_security_from_values(&raw(), &json!("/me"), &Value::Null),
            Err(SecurityError::OperationNotProvided)
        );
        assert!(matches!(
            get_security_from_values(&raw(), &json!("/me"), &json!(7)),
            Err(SecurityError::InvalidMethod(_))
        ));
        assert!(get_security_from_values(&raw(), &json!("/me"), &json!("Get"))
            .unwrap()
            .is_some());
    }
}
