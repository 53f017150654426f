#![allow(dead_code)]

use serde_json::{json, Value};

/// Pet store document exercising every scheme type and the inheritance rules
///
/// - `/pets` `get` inherits the root api key requirement
/// - `/pets` `post` accepts anonymous access or oauth2 `read`
/// - `/pets/{id}` `delete` opts out with an explicit `security: []`
/// - `/admin` `get` needs mutual TLS together with a bearer token
/// - `/ghost` `get` only references an undeclared scheme
pub fn pet_store() -> Value {
    json!({
        "openapi": "3.1.0",
        "info": { "title": "Pet Store", "version": "1.0.0" },
        "security": [{ "apiKeyAuth": [] }],
        "components": {
            "securitySchemes": {
                "apiKeyAuth": { "type": "apiKey", "name": "X-Api-Key", "in": "header" },
                "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" },
                "mtls": { "type": "mutualTLS" },
                "oidc": {
                    "type": "openIdConnect",
                    "openIdConnectUrl": "https://id.example.com/.well-known/openid-configuration"
                },
                "oauth2Auth": {
                    "type": "oauth2",
                    "flows": {
                        "implicit": {
                            "authorizationUrl": "https://auth.example.com/authorize",
                            "scopes": { "read": "Read pets", "write": "Write pets" }
                        },
                        "clientCredentials": {
                            "tokenUrl": "https://auth.example.com/token",
                            "refreshUrl": "https://auth.example.com/refresh",
                            "scopes": { "admin": "Administer pets" }
                        }
                    }
                }
            }
        },
        "paths": {
            "/pets": {
                "get": { "operationId": "list_pets" },
                "post": {
                    "operationId": "add_pet",
                    "security": [{}, { "oauth2Auth": ["read"] }]
                }
            },
            "/pets/{id}": {
                "get": { "operationId": "get_pet", "security": [{ "oidc": ["openid"] }] },
                "delete": { "operationId": "delete_pet", "security": [] }
            },
            "/admin": {
                "get": {
                    "operationId": "admin_settings",
                    "security": [{ "mtls": [], "bearerAuth": [] }]
                }
            },
            "/ghost": {
                "get": { "operationId": "ghost", "security": [{ "nobody": [] }] }
            }
        }
    })
}

/// The same pet store as YAML text
pub const PET_STORE_YAML: &str = r#"
openapi: 3.1.0
info:
  title: Pet Store
  version: 1.0.0
security:
  - apiKeyAuth: []
components:
  securitySchemes:
    apiKeyAuth:
      type: apiKey
      name: X-Api-Key
      in: header
    oauth2Auth:
      type: oauth2
      flows:
        implicit:
          authorizationUrl: https://auth.example.com/authorize
          scopes:
            read: Read pets
            write: Write pets
paths:
  /pets:
    get:
      operationId: list_pets
    post:
      operationId: add_pet
      security:
        - {}
        - oauth2Auth: [read, delete]
  /pets/{id}:
    delete:
      operationId: delete_pet
      security: []
"#;
