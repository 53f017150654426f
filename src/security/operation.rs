//! Operation-level aggregation into [`OperationSecurity`].

use super::normalize::resolve_requirement;
use super::requirement::get_operation_security;
use super::types::{OperationSecurity, OperationSecurityEntry};
use crate::config::ResolverConfig;
use crate::error::SecurityError;
use crate::spec::{Document, HttpMethod};
use tracing::{debug, warn};

/// Resolve how `method path` is protected, with the default configuration.
///
/// See [`resolve_operation_security_with`].
pub fn resolve_operation_security(
    document: &Document,
    path: &str,
    method: HttpMethod,
) -> Result<OperationSecurity, SecurityError> {
    resolve_operation_security_with(document, path, method, &ResolverConfig::default())
}

/// Resolve how `method path` is protected
///
/// 1. Look up the effective requirement list (operation override or root default)
/// 2. Empty alternatives set `optional`
/// 3. Non-empty alternatives set `secured` and are normalized in order;
///    alternatives whose schemes all fail to resolve are left out of `securities`
///
/// `secured` reflects the declared requirements, so an operation whose only
/// requirement names an undeclared scheme is still reported as secured, with
/// no usable alternative.
///
/// # Errors
///
/// * `NotFound` kind - path or method not declared
/// * `StructuralAbsence` kind - no `paths`, or a non-empty alternative exists but
///   `components.securitySchemes` does not
pub fn resolve_operation_security_with(
    document: &Document,
    path: &str,
    method: HttpMethod,
    config: &ResolverConfig,
) -> Result<OperationSecurity, SecurityError> {
    let requirements = get_operation_security(document, path, method)?;

    let mut security = OperationSecurity {
        secured: requirements.iter().any(|r| !r.is_empty()),
        optional: requirements.iter().any(|r| r.is_empty()),
        securities: Vec::new(),
    };

    for requirement in requirements.iter().filter(|r| !r.is_empty()) {
        let securities = resolve_requirement(document, requirement, config.scope_policy)?;
        if securities.is_empty() {
            debug!(
                path = %path,
                method = %method,
                "dropping requirement alternative with no resolvable scheme"
            );
            continue;
        }
        security.securities.push(securities);
    }

    if security.secured && security.securities.is_empty() {
        warn!(
            path = %path,
            method = %method,
            "operation requires authentication but none of its security schemes could be resolved"
        );
    }

    debug!(
        path = %path,
        method = %method,
        secured = security.secured,
        optional = security.optional,
        alternatives = security.securities.len(),
        "operation security resolved"
    );
    Ok(security)
}

/// Resolve every declared operation, in document order
///
/// # Errors
///
/// Fails with the first `StructuralAbsence` error encountered, or
/// [`SecurityError::NoPathInSchema`] when the document has no `paths`.
pub fn resolve_document_security(
    document: &Document,
    config: &ResolverConfig,
) -> Result<Vec<OperationSecurityEntry>, SecurityError> {
    let paths = document
        .paths
        .as_ref()
        .ok_or(SecurityError::NoPathInSchema)?;

    let mut entries = Vec::new();
    for (path, item) in paths {
        for (method, operation) in item.operations() {
            let security = resolve_operation_security_with(document, path, method, config)?;
            entries.push(OperationSecurityEntry {
                path: path.clone(),
                method: method.to_string(),
                operation_id: operation.operation_id.clone(),
                security,
            });
        }
    }
    Ok(entries)
}
