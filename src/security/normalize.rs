//! Scheme normalization: turn one requirement alternative into resolved schemes.

use super::flows::{effective_flow_scopes, resolve_flows};
use super::types::{ResolvedSecurity, Securities};
use crate::config::ScopePolicy;
use crate::error::SecurityError;
use crate::spec::{Document, SecurityRequirement, SecuritySchemeDecl};
use tracing::debug;

/// Resolve one named scheme reference against its declaration
///
/// Returns `None` when the declaration cannot be used (unsupported type or
/// missing required fields).
#[must_use]
pub fn resolve_scheme(
    decl: &SecuritySchemeDecl,
    requested: &[String],
    policy: ScopePolicy,
) -> Option<ResolvedSecurity> {
    let scopes = requested.to_vec();
    match decl {
        SecuritySchemeDecl::ApiKey { name, location } => Some(ResolvedSecurity::ApiKey {
            name: name.clone(),
            location: location.clone(),
            scopes,
        }),
        SecuritySchemeDecl::Http {
            scheme,
            bearer_format,
        } => Some(ResolvedSecurity::Http {
            scheme: scheme.clone(),
            bearer_format: bearer_format.clone(),
            scopes,
        }),
        SecuritySchemeDecl::MutualTls => Some(ResolvedSecurity::MutualTls { scopes }),
        SecuritySchemeDecl::OAuth2 { flows } => {
            let declared = effective_flow_scopes(flows, policy);
            let (kept, dropped): (Vec<String>, Vec<String>) =
                scopes.into_iter().partition(|s| declared.contains(s));
            if !dropped.is_empty() {
                debug!(
                    dropped = ?dropped,
                    declared = ?declared,
                    "dropping oauth2 scopes not declared by the scheme's flows"
                );
            }
            Some(ResolvedSecurity::OAuth2 {
                flows: resolve_flows(flows),
                scopes: kept,
            })
        }
        SecuritySchemeDecl::OpenIdConnect {
            open_id_connect_url,
        } => Some(ResolvedSecurity::OpenIdConnect {
            open_id_connect_url: open_id_connect_url.clone(),
            scopes,
        }),
        SecuritySchemeDecl::Unsupported { .. } | SecuritySchemeDecl::Invalid { .. } => None,
    }
}

/// Normalize one requirement alternative
///
/// Each entry is resolved independently. Names that are not declared, and
/// declarations that cannot be used, are skipped without error; the result may
/// therefore be smaller than the requirement, or empty.
///
/// # Errors
///
/// Fails only when the document lacks the structure a lookup needs at all:
///
/// * [`SecurityError::NoComponentsFound`] - no `components`
/// * [`SecurityError::NoSecuritySchemesFound`] - no `components.securitySchemes`
pub fn resolve_requirement(
    document: &Document,
    requirement: &SecurityRequirement,
    policy: ScopePolicy,
) -> Result<Securities, SecurityError> {
    let components = document
        .components
        .as_ref()
        .ok_or(SecurityError::NoComponentsFound)?;
    let schemes = components
        .security_schemes
        .as_ref()
        .ok_or(SecurityError::NoSecuritySchemesFound)?;

    let mut securities = Securities::new();
    for (name, requested) in requirement.iter() {
        let Some(decl) = schemes.get(name) else {
            debug!(scheme = %name, "skipping security scheme not declared in components");
            continue;
        };
        match resolve_scheme(decl, requested, policy) {
            Some(resolved) => securities.insert(name, resolved),
            None => debug!(
                scheme = %name,
                kind = %decl.kind(),
                "skipping security scheme that cannot be resolved"
            ),
        }
    }
    Ok(securities)
}
