use crate::error::SecurityError;
use std::str::FromStr;

/// The eight HTTP verbs an OpenAPI path item may declare operations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Head,
    Options,
    Patch,
    Trace,
}

impl HttpMethod {
    /// All verbs, in the order OpenAPI lists them on a path item.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    /// The verb whose path-item key is exactly `key`.
    ///
    /// Keys are case-sensitive: `GET` is not an operation key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        HttpMethod::ALL.into_iter().find(|m| m.as_str() == key)
    }

    /// Lowercase key used for this verb inside a path item.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = SecurityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SecurityError::OperationNotProvided);
        }
        let lower = s.to_ascii_lowercase();
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| SecurityError::InvalidMethod(s.to_string()))
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Delete => http::Method::DELETE,
            HttpMethod::Head => http::Method::HEAD,
            HttpMethod::Options => http::Method::OPTIONS,
            HttpMethod::Patch => http::Method::PATCH,
            HttpMethod::Trace => http::Method::TRACE,
        }
    }
}

impl TryFrom<&http::Method> for HttpMethod {
    type Error = SecurityError;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

/// One security requirement alternative: scheme name → requested scopes.
///
/// Entries keep the order they were declared in. An empty requirement is the
/// OpenAPI way of saying "anonymous access is acceptable".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityRequirement {
    entries: Vec<(String, Vec<String>)>,
}

impl SecurityRequirement {
    /// Create an empty requirement (the "no authentication" alternative).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and programmatic documents.
    #[must_use]
    pub fn with(mut self, scheme: impl Into<String>, scopes: &[&str]) -> Self {
        self.insert(scheme, scopes.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Insert or replace the scopes requested for `scheme`.
    pub fn insert(&mut self, scheme: impl Into<String>, scopes: Vec<String>) {
        let scheme = scheme.into();
        match self.entries.iter_mut().find(|(name, _)| *name == scheme) {
            Some((_, existing)) => *existing = scopes,
            None => self.entries.push((scheme, scopes)),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate `(scheme name, requested scopes)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, scopes)| (name.as_str(), scopes.as_slice()))
    }
}

/// Where an API key is carried.
///
/// OpenAPI only defines `query`, `header` and `cookie`; any other non-empty
/// value is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiKeyLocation {
    Query,
    Header,
    Cookie,
    Other(String),
}

impl ApiKeyLocation {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ApiKeyLocation::Query => "query",
            ApiKeyLocation::Header => "header",
            ApiKeyLocation::Cookie => "cookie",
            ApiKeyLocation::Other(other) => other.as_str(),
        }
    }

    /// `true` for the three locations OpenAPI defines.
    #[must_use]
    pub fn is_standard(&self) -> bool {
        !matches!(self, ApiKeyLocation::Other(_))
    }
}

impl From<&str> for ApiKeyLocation {
    fn from(s: &str) -> Self {
        match s {
            "query" => ApiKeyLocation::Query,
            "header" => ApiKeyLocation::Header,
            "cookie" => ApiKeyLocation::Cookie,
            other => ApiKeyLocation::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiKeyLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl serde::Serialize for ApiKeyLocation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single OAuth2 flow as declared, before any presence check.
///
/// Empty strings were already folded into `None` during ingestion; whether the
/// flow is usable is decided by the extractors in [`crate::security::flows`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthFlowDecl {
    pub authorization_url: Option<String>,
    pub token_url: Option<String>,
    pub refresh_url: Option<String>,
    /// Declared scope catalog: `(scope name, description)` in declaration order.
    pub scopes: Option<Vec<(String, String)>>,
}

/// The `flows` object of an OAuth2 security scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthFlows {
    pub implicit: Option<OAuthFlowDecl>,
    pub password: Option<OAuthFlowDecl>,
    pub client_credentials: Option<OAuthFlowDecl>,
    pub authorization_code: Option<OAuthFlowDecl>,
}

/// A security scheme declared under `components.securitySchemes`.
///
/// `Invalid` and `Unsupported` keep the declaration visible to the linter while
/// letting the resolver skip it without inspecting raw JSON again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecuritySchemeDecl {
    ApiKey {
        name: String,
        location: ApiKeyLocation,
    },
    Http {
        scheme: String,
        bearer_format: Option<String>,
    },
    MutualTls,
    OAuth2 {
        flows: OAuthFlows,
    },
    OpenIdConnect {
        open_id_connect_url: String,
    },
    /// A `type` this resolver does not know about.
    Unsupported { kind: String },
    /// A known `type` missing one of its required fields.
    Invalid { kind: String, reason: String },
}

impl SecuritySchemeDecl {
    /// The OpenAPI `type` string of this declaration.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            SecuritySchemeDecl::ApiKey { .. } => "apiKey",
            SecuritySchemeDecl::Http { .. } => "http",
            SecuritySchemeDecl::MutualTls => "mutualTLS",
            SecuritySchemeDecl::OAuth2 { .. } => "oauth2",
            SecuritySchemeDecl::OpenIdConnect { .. } => "openIdConnect",
            SecuritySchemeDecl::Unsupported { kind } | SecuritySchemeDecl::Invalid { kind, .. } => {
                kind.as_str()
            }
        }
    }
}

/// `components.securitySchemes`, keyed by scheme name in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecuritySchemes {
    schemes: Vec<(String, SecuritySchemeDecl)>,
}

impl SecuritySchemes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, scheme: SecuritySchemeDecl) {
        let name = name.into();
        match self.schemes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = scheme,
            None => self.schemes.push((name, scheme)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SecuritySchemeDecl> {
        self.schemes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, scheme)| scheme)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SecuritySchemeDecl)> {
        self.schemes.iter().map(|(n, s)| (n.as_str(), s))
    }
}

/// The parts of `components` the resolver reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Components {
    pub security_schemes: Option<SecuritySchemes>,
}

/// An operation object. Only the fields that affect security are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operation {
    pub operation_id: Option<String>,
    /// `None` when the operation has no `security` field at all; `Some(vec![])`
    /// is an explicit override that removes the document default.
    pub security: Option<Vec<SecurityRequirement>>,
}

/// A path item: the operations declared under one path key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathItem {
    operations: Vec<(HttpMethod, Operation)>,
}

impl PathItem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, method: HttpMethod, operation: Operation) {
        match self.operations.iter_mut().find(|(m, _)| *m == method) {
            Some((_, existing)) => *existing = operation,
            None => self.operations.push((method, operation)),
        }
    }

    #[must_use]
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, op)| op)
    }

    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        self.operations.iter().map(|(m, op)| (*m, op))
    }
}

/// Typed, read-only view of an OpenAPI 3.0.x / 3.1.x document.
///
/// Build one with [`Document::from_value`](crate::spec::Document::from_value) or
/// [`load_document`](crate::spec::load_document).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Root `security`; `None` when the field is absent.
    pub security: Option<Vec<SecurityRequirement>>,
    /// `paths` in declaration order; `None` when the document has no path map.
    pub paths: Option<Vec<(String, PathItem)>>,
    pub components: Option<Components>,
}

impl Document {
    /// Look up a path item by its exact key.
    #[must_use]
    pub fn path_item(&self, path: &str) -> Option<&PathItem> {
        self.paths
            .as_ref()?
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, item)| item)
    }

    /// `components.securitySchemes`, if both levels are declared.
    #[must_use]
    pub fn security_schemes(&self) -> Option<&SecuritySchemes> {
        self.components.as_ref()?.security_schemes.as_ref()
    }
}
