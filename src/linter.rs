//! # Security Linter Module
//!
//! The resolver is deliberately forgiving: undeclared schemes, incomplete
//! declarations and undeclared OAuth2 scopes are dropped without error. The
//! linter reports each of those silent drops so they can be fixed in the
//! document.
//!
//! ## Checks Performed
//!
//! 1. **missing_security_schemes** - requirements exist but `components.securitySchemes` does not
//! 2. **undeclared_scheme** - a requirement names a scheme that is not declared
//! 3. **invalid_security_scheme** - a declared scheme lacks a required field
//! 4. **unsupported_scheme_type** - a declared scheme has an unknown `type`
//! 5. **no_usable_flow** - an oauth2 scheme has no complete flow
//! 6. **undeclared_scope** - a requested oauth2 scope is not declared by the flows
//! 7. **invalid_flow_url** - a flow or OpenID Connect URL is not an absolute URL
//! 8. **shadowed_flow_scopes** - scopes only declared by flows the first-present policy never reads
//!    (first-present policy only)
//! 9. **unused_security_scheme** - a declared scheme is never referenced
//! 10. **nonstandard_api_key_location** - an apiKey `in` other than query, header or cookie
//!
//! ## Usage
//!
//! ```rust,no_run
//! use brrtsec::config::ScopePolicy;
//! use brrtsec::linter::{lint_spec, print_lint_issues};
//! use std::path::Path;
//!
//! let issues = lint_spec(Path::new("openapi.yaml"), ScopePolicy::default())?;
//! print_lint_issues(&issues);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::config::ScopePolicy;
use crate::security::{effective_flow_scopes, get_flow_scopes, get_union_flow_scopes};
use crate::spec::{
    load_document, Document, OAuthFlowDecl, OAuthFlows, SecurityRequirement, SecuritySchemeDecl,
};
use std::collections::HashSet;
use std::path::Path;


/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LintSeverity {
    /// Error - a requirement the resolver cannot honour
    Error,
    /// Warning - the resolver will silently drop or degrade something
    Warning,
    /// Info - housekeeping
    Info,
}

impl std::fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LintSeverity::Error => write!(f, "error"),
            LintSeverity::Warning => write!(f, "warning"),
            LintSeverity::Info => write!(f, "info"),
        }
    }
}

/// A lint issue found in an OpenAPI document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Where the issue occurred (e.g., "root", "path:/users/{id}/get", "securityScheme:oauth")
    pub location: String,
    /// Severity of the issue
    pub severity: LintSeverity,
    /// Type of lint issue (e.g., "undeclared_scheme")
    pub kind: String,
    /// Human-readable description of the problem
    pub message: String,
    /// Optional suggestion for how to fix it
    pub suggestion: Option<String>,
}

impl LintIssue {
    /// Create a new lint issue
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Lint an OpenAPI document file
///
/// # Arguments
///
/// * `spec_path` - Path to the OpenAPI document (YAML or JSON)
/// * `policy` - Scope policy used to decide which oauth2 scopes are declared
pub fn lint_spec(spec_path: &Path, policy: ScopePolicy) -> anyhow::Result<Vec<LintIssue>> {
    let document = load_document(spec_path)?;
    Ok(lint_document(&document, policy))
}

/// Lint the security declarations and references of a document
pub fn lint_document(document: &Document, policy: ScopePolicy) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    let mut referenced = HashSet::new();

    if let Some(root) = document.security.as_deref() {
        lint_requirements(document, policy, &mut issues, &mut referenced, "root", root);
    }

    if let Some(paths) = document.paths.as_ref() {
        for (path, item) in paths {
            for (method, operation) in item.operations() {
                if let Some(own) = operation.security.as_deref() {
                    let location = format!("path:{path}/{method}");
                    lint_requirements(
                        document,
                        policy,
                        &mut issues,
                        &mut referenced,
                        &location,
                        own,
                    );
                }
            }
        }
    }

    if let Some(schemes) = document.security_schemes() {
        for (name, decl) in schemes.iter() {
            lint_scheme(&mut issues, policy, name, decl);
            if !referenced.contains(name) {
                issues.push(
                    LintIssue::new(
                        format!("securityScheme:{name}"),
                        LintSeverity::Info,
                        "unused_security_scheme",
                        format!("Security scheme '{name}' is declared but never referenced"),
                    )
                    .with_suggestion("Remove it, or reference it from a security requirement"),
                );
            }
        }
    }

    issues
}

fn lint_requirements<'a>(
    document: &Document,
    policy: ScopePolicy,
    issues: &mut Vec<LintIssue>,
    referenced: &mut HashSet<&'a str>,
    location: &str,
    requirements: &'a [SecurityRequirement],
) {
    if requirements.iter().all(SecurityRequirement::is_empty) {
        return;
    }

    let Some(schemes) = document.security_schemes() else {
        let missing = if document.components.is_none() {
            "components"
        } else {
            "components.securitySchemes"
        };
        issues.push(
            LintIssue::new(
                location,
                LintSeverity::Error,
                "missing_security_schemes",
                format!("Security requirements are declared but the document has no {missing}"),
            )
            .with_suggestion("Declare the referenced schemes under components.securitySchemes"),
        );
        return;
    };

    for requirement in requirements {
        for (name, requested) in requirement.iter() {
            referenced.insert(name);
            let Some(decl) = schemes.get(name) else {
                issues.push(
                    LintIssue::new(
                        location,
                        LintSeverity::Error,
                        "undeclared_scheme",
                        format!("Security scheme '{name}' is not declared"),
                    )
                    .with_suggestion(format!(
                        "Add '{name}' under components.securitySchemes or fix the name"
                    )),
                );
                continue;
            };

            if let SecuritySchemeDecl::OAuth2 { flows } = decl {
                let declared = effective_flow_scopes(flows, policy);
                for scope in requested.iter().filter(|s| !declared.contains(*s)) {
                    issues.push(
                        LintIssue::new(
                            location,
                            LintSeverity::Warning,
                            "undeclared_scope",
                            format!(
                                "Scope '{scope}' requested for '{name}' is not declared by its flows and will be dropped"
                            ),
                        )
                        .with_suggestion(format!(
                            "Declare '{scope}' in the scopes of the '{name}' flows"
                        )),
                    );
                }
            }
        }
    }
}

fn lint_scheme(
    issues: &mut Vec<LintIssue>,
    policy: ScopePolicy,
    name: &str,
    decl: &SecuritySchemeDecl,
) {
    let location = format!("securityScheme:{name}");
    match decl {
        SecuritySchemeDecl::Invalid { kind, reason } => issues.push(LintIssue::new(
            &location,
            LintSeverity::Error,
            "invalid_security_scheme",
            format!("{kind} scheme '{name}' cannot be used: {reason}"),
        )),
        SecuritySchemeDecl::Unsupported { kind } => issues.push(
            LintIssue::new(
                &location,
                LintSeverity::Warning,
                "unsupported_scheme_type",
                format!("Security scheme '{name}' has unsupported type '{kind}'"),
            )
            .with_suggestion("Use one of apiKey, http, mutualTLS, oauth2, openIdConnect"),
        ),
        SecuritySchemeDecl::OAuth2 { flows } => lint_flows(issues, policy, &location, name, flows),
        SecuritySchemeDecl::OpenIdConnect {
            open_id_connect_url,
        } => lint_url(issues, &location, "openIdConnectUrl", open_id_connect_url),
        SecuritySchemeDecl::ApiKey {
            location: key_location,
            ..
        } if !key_location.is_standard() => issues.push(
            LintIssue::new(
                &location,
                LintSeverity::Warning,
                "nonstandard_api_key_location",
                format!("apiKey scheme '{name}' is carried in '{key_location}'"),
            )
            .with_suggestion("OpenAPI only defines query, header and cookie"),
        ),
        SecuritySchemeDecl::ApiKey { .. }
        | SecuritySchemeDecl::Http { .. }
        | SecuritySchemeDecl::MutualTls => {}
    }
}

fn lint_flows(
    issues: &mut Vec<LintIssue>,
    policy: ScopePolicy,
    location: &str,
    name: &str,
    flows: &OAuthFlows,
) {
    let declared = [
        ("implicit", flows.implicit.as_ref()),
        ("password", flows.password.as_ref()),
        ("clientCredentials", flows.client_credentials.as_ref()),
        ("authorizationCode", flows.authorization_code.as_ref()),
    ];
    for (flow_name, flow) in declared {
        if let Some(flow) = flow {
            lint_flow_urls(issues, &format!("{location}/{flow_name}"), flow);
        }
    }

    let union = get_union_flow_scopes(flows);
    if union.is_empty() {
        issues.push(
            LintIssue::new(
                location,
                LintSeverity::Warning,
                "no_usable_flow",
                format!(
                    "OAuth2 scheme '{name}' has no flow with its required URLs and a non-empty scope catalog"
                ),
            )
            .with_suggestion("Every requested scope for this scheme will be dropped"),
        );
        return;
    }
    if policy != ScopePolicy::FirstPresent {
        return;
    }

    let first = get_flow_scopes(flows);
    let shadowed: Vec<&String> = union.iter().filter(|s| !first.contains(*s)).collect();
    if !shadowed.is_empty() {
        issues.push(
            LintIssue::new(
                location,
                LintSeverity::Info,
                "shadowed_flow_scopes",
                format!(
                    "Scopes {shadowed:?} of '{name}' are only declared by lower-priority flows and are ignored by the default scope policy"
                ),
            )
            .with_suggestion("Declare them on the first usable flow, or resolve with the union scope policy"),
        );
    }
}

fn lint_flow_urls(issues: &mut Vec<LintIssue>, location: &str, flow: &OAuthFlowDecl) {
    let urls = [
        ("authorizationUrl", flow.authorization_url.as_deref()),
        ("tokenUrl", flow.token_url.as_deref()),
        ("refreshUrl", flow.refresh_url.as_deref()),
    ];
    for (field, url) in urls {
        if let Some(url) = url {
            lint_url(issues, location, field, url);
        }
    }
}

fn lint_url(issues: &mut Vec<LintIssue>, location: &str, field: &str, value: &str) {
    if let Err(err) = url::Url::parse(value) {
        issues.push(
            LintIssue::new(
                location,
                LintSeverity::Warning,
                "invalid_flow_url",
                format!("{field} '{value}' is not an absolute URL ({err})"),
            )
            .with_suggestion("Use an absolute URL such as https://auth.example.com/token"),
        );
    }
}

/// `true` if any issue is an error
pub fn has_errors(issues: &[LintIssue]) -> bool {
    issues.iter().any(|i| i.severity == LintSeverity::Error)
}

/// Print lint issues in a formatted way
pub fn print_lint_issues(issues: &[LintIssue]) {
    if issues.is_empty() {
        println!("✅ No security lint issues found!");
        return;
    }

    let count = |severity| issues.iter().filter(|i| i.severity == severity).count();
    println!("\n📋 Security Lint Results:");
    println!(
        "   {} error(s), {} warning(s), {} info(s)\n",
        count(LintSeverity::Error),
        count(LintSeverity::Warning),
        count(LintSeverity::Info)
    );

    let groups = [
        (LintSeverity::Error, "❌ Errors (must fix):"),
        (LintSeverity::Warning, "⚠️  Warnings (should fix):"),
        (LintSeverity::Info, "ℹ️  Info:"),
    ];
    for (severity, heading) in groups {
        let group: Vec<_> = issues.iter().filter(|i| i.severity == severity).collect();
        if group.is_empty() {
            continue;
        }
        println!("{heading}");
        for issue in group {
            println!("   [{}] {}", issue.kind, issue.location);
            println!("      {}", issue.message);
            if let Some(suggestion) = &issue.suggestion {
                println!("      💡 Suggestion: {}", suggestion);
            }
        }
        println!();
    }
}
