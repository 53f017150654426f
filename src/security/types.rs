use crate::spec::ApiKeyLocation;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Implicit grant: browser redirect straight to an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplicitFlow {
    pub authorization_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    pub scopes: Vec<String>,
}

/// Resource owner password grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordFlow {
    pub token_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    pub scopes: Vec<String>,
}

/// Client credentials grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCredentialsFlow {
    pub token_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    pub scopes: Vec<String>,
}

/// Authorization code grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationCodeFlow {
    pub authorization_url: String,
    pub token_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    pub scopes: Vec<String>,
}

/// The usable flows of an OAuth2 scheme. Unusable flows are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFlows {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit: Option<ImplicitFlow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<PasswordFlow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<ClientCredentialsFlow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<AuthorizationCodeFlow>,
}

/// A security scheme as it applies to one requirement alternative.
///
/// `scopes` holds the scopes *requested* by the requirement. For OAuth2 they
/// have been filtered against the scopes the scheme's flows declare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum ResolvedSecurity {
    #[serde(rename = "apiKey")]
    ApiKey {
        name: String,
        #[serde(rename = "in")]
        location: ApiKeyLocation,
        scopes: Vec<String>,
    },
    #[serde(rename = "http")]
    Http {
        scheme: String,
        #[serde(rename = "bearerFormat", skip_serializing_if = "Option::is_none")]
        bearer_format: Option<String>,
        scopes: Vec<String>,
    },
    #[serde(rename = "mutualTLS")]
    MutualTls { scopes: Vec<String> },
    #[serde(rename = "oauth2")]
    OAuth2 {
        flows: ResolvedFlows,
        scopes: Vec<String>,
    },
    #[serde(rename = "openIdConnect")]
    OpenIdConnect {
        #[serde(rename = "openIdConnectUrl")]
        open_id_connect_url: String,
        scopes: Vec<String>,
    },
}

impl ResolvedSecurity {
    /// The OpenAPI `type` string of this scheme.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ResolvedSecurity::ApiKey { .. } => "apiKey",
            ResolvedSecurity::Http { .. } => "http",
            ResolvedSecurity::MutualTls { .. } => "mutualTLS",
            ResolvedSecurity::OAuth2 { .. } => "oauth2",
            ResolvedSecurity::OpenIdConnect { .. } => "openIdConnect",
        }
    }

    /// Scopes requested (and, for OAuth2, declared) for this scheme.
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        match self {
            ResolvedSecurity::ApiKey { scopes, .. }
            | ResolvedSecurity::Http { scopes, .. }
            | ResolvedSecurity::MutualTls { scopes }
            | ResolvedSecurity::OAuth2 { scopes, .. }
            | ResolvedSecurity::OpenIdConnect { scopes, .. } => scopes,
        }
    }
}

/// One normalized requirement alternative: scheme name → resolved scheme.
///
/// Every scheme in the map must be satisfied together (logical AND).
/// Serializes as a JSON object in requirement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Securities {
    entries: Vec<(String, ResolvedSecurity)>,
}

impl Securities {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, security: ResolvedSecurity) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = security,
            None => self.entries.push((name, security)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedSecurity> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedSecurity)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Scheme names in requirement order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl Serialize for Securities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, security) in &self.entries {
            map.serialize_entry(name, security)?;
        }
        map.end()
    }
}

/// How one operation is protected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OperationSecurity {
    /// At least one non-empty requirement alternative applies.
    pub secured: bool,
    /// An empty alternative exists, so anonymous access is also accepted.
    pub optional: bool,
    /// One entry per resolvable non-empty alternative, in declaration order
    /// (logical OR between entries).
    pub securities: Vec<Securities>,
}

/// The resolved security of one declared operation, as produced by
/// [`resolve_document_security`](crate::security::resolve_document_security).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationSecurityEntry {
    pub path: String,
    pub method: String,
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    pub security: OperationSecurity,
}
