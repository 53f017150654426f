//! OAuth2 flow extraction.
//!
//! A flow is usable only when its mandatory URL(s) and a non-empty scope
//! catalog are declared. `refreshUrl` is optional and passed through. Only scope
//! names survive extraction; descriptions are discarded.

use super::types::{
    AuthorizationCodeFlow, ClientCredentialsFlow, ImplicitFlow, PasswordFlow, ResolvedFlows,
};
use crate::config::ScopePolicy;
use crate::spec::{OAuthFlowDecl, OAuthFlows};

/// Scope names of a declared flow, or `None` when the catalog is absent or empty.
fn scope_names(flow: &OAuthFlowDecl) -> Option<Vec<String>> {
    let scopes = flow.scopes.as_ref()?;
    if scopes.is_empty() {
        return None;
    }
    Some(scopes.iter().map(|(name, _)| name.clone()).collect())
}

/// Extract the implicit flow (`authorizationUrl` + scopes).
#[must_use]
pub fn get_implicit_flow(flows: &OAuthFlows) -> Option<ImplicitFlow> {
    let flow = flows.implicit.as_ref()?;
    let authorization_url = flow.authorization_url.clone()?;
    let scopes = scope_names(flow)?;
    Some(ImplicitFlow {
        authorization_url,
        refresh_url: flow.refresh_url.clone(),
        scopes,
    })
}

/// Extract the password flow (`tokenUrl` + scopes).
#[must_use]
pub fn get_password_flow(flows: &OAuthFlows) -> Option<PasswordFlow> {
    let flow = flows.password.as_ref()?;
    let token_url = flow.token_url.clone()?;
    let scopes = scope_names(flow)?;
    Some(PasswordFlow {
        token_url,
        refresh_url: flow.refresh_url.clone(),
        scopes,
    })
}

/// Extract the client credentials flow (`tokenUrl` + scopes).
#[must_use]
pub fn get_client_credentials_flow(flows: &OAuthFlows) -> Option<ClientCredentialsFlow> {
    let flow = flows.client_credentials.as_ref()?;
    let token_url = flow.token_url.clone()?;
    let scopes = scope_names(flow)?;
    Some(ClientCredentialsFlow {
        token_url,
        refresh_url: flow.refresh_url.clone(),
        scopes,
    })
}

/// Extract the authorization code flow (`authorizationUrl` + `tokenUrl` + scopes).
#[must_use]
pub fn get_authorization_code_flow(flows: &OAuthFlows) -> Option<AuthorizationCodeFlow> {
    let flow = flows.authorization_code.as_ref()?;
    let authorization_url = flow.authorization_url.clone()?;
    let token_url = flow.token_url.clone()?;
    let scopes = scope_names(flow)?;
    Some(AuthorizationCodeFlow {
        authorization_url,
        token_url,
        refresh_url: flow.refresh_url.clone(),
        scopes,
    })
}

/// Run all four extractors.
#[must_use]
pub fn resolve_flows(flows: &OAuthFlows) -> ResolvedFlows {
    ResolvedFlows {
        implicit: get_implicit_flow(flows),
        password: get_password_flow(flows),
        client_credentials: get_client_credentials_flow(flows),
        authorization_code: get_authorization_code_flow(flows),
    }
}

/// Scopes of the first usable flow
///
/// Priority is Implicit → Password → ClientCredentials → AuthorizationCode.
/// This is deliberately *not* a union: a scope only declared by a lower-priority
/// flow is not part of the result while a higher-priority flow is usable.
/// Returns an empty list when no flow is usable.
#[must_use]
pub fn get_flow_scopes(flows: &OAuthFlows) -> Vec<String> {
    if let Some(flow) = get_implicit_flow(flows) {
        return flow.scopes;
    }
    if let Some(flow) = get_password_flow(flows) {
        return flow.scopes;
    }
    if let Some(flow) = get_client_credentials_flow(flows) {
        return flow.scopes;
    }
    if let Some(flow) = get_authorization_code_flow(flows) {
        return flow.scopes;
    }
    Vec::new()
}

/// Scopes of every usable flow, deduplicated, in priority order.
#[must_use]
pub fn get_union_flow_scopes(flows: &OAuthFlows) -> Vec<String> {
    let resolved = resolve_flows(flows);
    let catalogs = [
        resolved.implicit.map(|f| f.scopes),
        resolved.password.map(|f| f.scopes),
        resolved.client_credentials.map(|f| f.scopes),
        resolved.authorization_code.map(|f| f.scopes),
    ];
    let mut out: Vec<String> = Vec::new();
    for scope in catalogs.into_iter().flatten().flatten() {
        if !out.contains(&scope) {
            out.push(scope);
        }
    }
    out
}

/// The scope catalog requested scopes are validated against, under `policy`.
#[must_use]
pub fn effective_flow_scopes(flows: &OAuthFlows, policy: ScopePolicy) -> Vec<String> {
    match policy {
        ScopePolicy::FirstPresent => get_flow_scopes(flows),
        ScopePolicy::Union => get_union_flow_scopes(flows),
    }
}
