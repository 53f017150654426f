use super::types::{
    ApiKeyLocation, Components, Document, HttpMethod, OAuthFlowDecl, OAuthFlows, Operation,
    PathItem, SecurityRequirement, SecuritySchemeDecl, SecuritySchemes,
};
use crate::error::SecurityError;
use serde_json::{Map, Value};
use tracing::debug;

/// Return the string at `key` if it is a non-empty string.
fn non_empty_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Extract a list of security requirements from a `security` field value
///
/// Absent or `null` means "not declared" and yields `None`. An array yields
/// `Some`, even when empty, so an explicit `security: []` survives ingestion.
/// Non-object alternatives are dropped; a scope list that is missing or not an
/// array becomes empty, and non-string scopes are dropped.
pub fn extract_security_requirements(value: Option<&Value>) -> Option<Vec<SecurityRequirement>> {
    let list = match value? {
        Value::Array(list) => list,
        Value::Null => return None,
        other => {
            debug!(found = %type_name(other), "ignoring non-array security field");
            return None;
        }
    };

    let requirements = list
        .iter()
        .filter_map(Value::as_object)
        .map(|obj| {
            let mut req = SecurityRequirement::new();
            for (name, scopes) in obj {
                if name.is_empty() {
                    continue;
                }
                let scopes = scopes
                    .as_array()
                    .map(|arr| {
                        arr.iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                req.insert(name.clone(), scopes);
            }
            req
        })
        .collect();
    Some(requirements)
}

fn extract_flow(value: Option<&Value>) -> Option<OAuthFlowDecl> {
    let obj = value?.as_object()?;
    let scopes = obj.get("scopes").and_then(Value::as_object).map(|scopes| {
        scopes
            .iter()
            .map(|(name, desc)| (name.clone(), desc.as_str().unwrap_or_default().to_string()))
            .collect()
    });
    Some(OAuthFlowDecl {
        authorization_url: non_empty_str(obj, "authorizationUrl"),
        token_url: non_empty_str(obj, "tokenUrl"),
        refresh_url: non_empty_str(obj, "refreshUrl"),
        scopes,
    })
}

/// Extract the `flows` object of an OAuth2 scheme
///
/// Flows that are not objects are treated as undeclared. Whether a declared
/// flow is usable is left to the flow extractors.
pub fn extract_oauth_flows(obj: &Map<String, Value>) -> OAuthFlows {
    OAuthFlows {
        implicit: extract_flow(obj.get("implicit")),
        password: extract_flow(obj.get("password")),
        client_credentials: extract_flow(obj.get("clientCredentials")),
        authorization_code: extract_flow(obj.get("authorizationCode")),
    }
}

fn invalid(kind: &str, reason: &str) -> SecuritySchemeDecl {
    SecuritySchemeDecl::Invalid {
        kind: kind.to_string(),
        reason: reason.to_string(),
    }
}

/// Convert one declared security scheme into its typed form
///
/// Returns `None` when the value is not an object or has no string `type`:
/// such entries are not security schemes at all.
pub fn extract_security_scheme(value: &Value) -> Option<SecuritySchemeDecl> {
    let obj = value.as_object()?;
    let kind = obj.get("type").and_then(Value::as_str)?;

    let scheme = match kind {
        "apiKey" => {
            let name = non_empty_str(obj, "name");
            let location = non_empty_str(obj, "in");
            match (name, location) {
                (None, _) => invalid(kind, "apiKey scheme has no `name`"),
                (_, None) => invalid(kind, "apiKey scheme has no `in`"),
                (Some(name), Some(loc)) => SecuritySchemeDecl::ApiKey {
                    name,
                    location: ApiKeyLocation::from(loc.as_str()),
                },
            }
        }
        "http" => match non_empty_str(obj, "scheme") {
            Some(scheme) => SecuritySchemeDecl::Http {
                scheme,
                bearer_format: non_empty_str(obj, "bearerFormat"),
            },
            None => invalid(kind, "http scheme has no `scheme`"),
        },
        "mutualTLS" => SecuritySchemeDecl::MutualTls,
        "oauth2" => match obj.get("flows").and_then(Value::as_object) {
            Some(flows) if !flows.is_empty() => SecuritySchemeDecl::OAuth2 {
                flows: extract_oauth_flows(flows),
            },
            Some(_) => invalid(kind, "oauth2 scheme has an empty `flows` object"),
            None => invalid(kind, "oauth2 scheme has no `flows` object"),
        },
        "openIdConnect" => match non_empty_str(obj, "openIdConnectUrl") {
            Some(open_id_connect_url) => SecuritySchemeDecl::OpenIdConnect { open_id_connect_url },
            None => invalid(kind, "openIdConnect scheme has no `openIdConnectUrl`"),
        },
        other => SecuritySchemeDecl::Unsupported {
            kind: other.to_string(),
        },
    };
    Some(scheme)
}

/// Extract `components.securitySchemes`
pub fn extract_components(value: Option<&Value>) -> Option<Components> {
    let obj = value?.as_object()?;
    let security_schemes = obj
        .get("securitySchemes")
        .and_then(Value::as_object)
        .map(|schemes| {
            let mut out = SecuritySchemes::new();
            for (name, scheme) in schemes {
                match extract_security_scheme(scheme) {
                    Some(decl) => out.insert(name.clone(), decl),
                    None => debug!(scheme = %name, "ignoring security scheme without a type"),
                }
            }
            out
        });
    Some(Components { security_schemes })
}

/// Extract one path item, keeping only HTTP verb keys whose value is an object
pub fn extract_path_item(value: &Value) -> PathItem {
    let mut item = PathItem::new();
    let Some(obj) = value.as_object() else {
        return item;
    };
    for (key, op) in obj {
        let Some(method) = HttpMethod::from_key(key) else {
            continue;
        };
        let Some(op_obj) = op.as_object() else {
            continue;
        };
        item.insert(
            method,
            Operation {
                operation_id: non_empty_str(op_obj, "operationId"),
                security: extract_security_requirements(op_obj.get("security")),
            },
        );
    }
    item
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Document {
    /// Build a typed document from an already-parsed JSON/YAML value
    ///
    /// This is the single place where the shape of the raw document is checked.
    /// Everything downstream operates on guaranteed-present fields.
    ///
    /// # Errors
    ///
    /// * [`SecurityError::SchemaNotProvided`] - `value` is `null`
    /// * [`SecurityError::SchemaNotObject`] - `value` is not an object
    pub fn from_value(value: &Value) -> Result<Document, SecurityError> {
        let obj = match value {
            Value::Null => return Err(SecurityError::SchemaNotProvided),
            Value::Object(obj) => obj,
            _ => return Err(SecurityError::SchemaNotObject),
        };

        let paths = obj.get("paths").and_then(Value::as_object).map(|paths| {
            paths
                .iter()
                .map(|(path, item)| (path.clone(), extract_path_item(item)))
                .collect::<Vec<_>>()
        });

        Ok(Document {
            security: extract_security_requirements(obj.get("security")),
            paths,
            components: extract_components(obj.get("components")),
        })
    }
}

impl TryFrom<&Value> for Document {
    type Error = SecurityError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Document::from_value(value)
    }
}
