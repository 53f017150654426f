//! # brrtsec
//!
//! **brrtsec** answers one question about an
//! [OpenAPI 3.0/3.1](https://spec.openapis.org/oas/v3.1.0) document: *how is
//! this operation protected?*
//!
//! Given a document, a path template and an HTTP method, it produces an
//! [`OperationSecurity`] saying whether authentication is required, whether it
//! is optional, and which alternatives of resolved security schemes satisfy it.
//! Gateways, policy engines and code generators consume that normalized answer
//! instead of re-implementing OpenAPI's inheritance rules.
//!
//! ## Architecture
//!
//! - **[`spec`]** - loads YAML/JSON and builds the typed, read-only [`Document`] view
//! - **[`security`]** - requirement lookup, scheme normalization, OAuth2 flow
//!   extraction and operation-level aggregation
//! - **[`error`]** - [`SecurityError`] and its coarse [`ErrorKind`]
//! - **[`config`]** - [`ResolverConfig`] and the OAuth2 [`ScopePolicy`]
//! - **[`linter`]** - reports scheme references the resolver would silently drop
//! - **[`cli`]** and **[`logging`]** - the `brrtsec` binary
//!
//! ### Resolution Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Op as security::resolve_operation_security
//!     participant Req as security::get_operation_security
//!     participant Norm as security::resolve_requirement
//!     participant Flows as security::get_flow_scopes
//!
//!     Caller->>Op: (document, "/pets", get)
//!     Op->>Req: effective requirement list
//!     Req-->>Op: operation override or root default
//!     loop each non-empty alternative
//!         Op->>Norm: look up schemes in components.securitySchemes
//!         Norm->>Flows: oauth2 only: declared scopes
//!         Flows-->>Norm: scope catalog
//!         Norm-->>Op: Securities
//!     end
//!     Op-->>Caller: OperationSecurity { secured, optional, securities }
//! ```
//!
//! ## Inheritance
//!
//! An operation's own `security` field replaces the root list entirely, even
//! when it is the empty array `[]` (which means "no security"). Only an absent
//! field inherits the root list. An empty alternative `{}` makes authentication
//! optional.
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtsec::get_security;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "security": [{ "bearer": [] }],
//!     "components": { "securitySchemes": {
//!         "bearer": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" }
//!     }},
//!     "paths": {
//!         "/pets": { "get": {}, "post": { "security": [] } }
//!     }
//! });
//!
//! let get = get_security(&doc, "/pets", "GET")?.expect("declared");
//! assert!(get.secured);
//!
//! let post = get_security(&doc, "/pets", "post")?.expect("declared");
//! assert!(!post.secured);
//!
//! assert_eq!(get_security(&doc, "/cats", "get")?, None);
//! # Ok::<(), brrtsec::SecurityError>(())
//! ```
//!
//! ## Thread Safety
//!
//! Documents are never mutated after ingestion and every result is a fresh
//! value, so a [`Document`] can be shared behind an `Arc` and resolved from any
//! number of threads.

pub mod cli;
pub mod config;
pub mod error;
pub mod linter;
pub mod logging;
pub mod security;
pub mod spec;

pub use config::{ResolverConfig, ScopePolicy};
pub use error::{ErrorKind, SecurityError};
pub use security::{
    get_security, get_security_from_values, get_security_with, resolve_document_security,
    resolve_operation_security, resolve_operation_security_with, OperationSecurity,
    ResolvedSecurity, Securities,
};
pub use spec::{load_document, Document, HttpMethod};
