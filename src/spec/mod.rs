//! # Spec Module
//!
//! Typed, read-only view of the parts of an OpenAPI 3.0.x / 3.1.x document that
//! decide how an operation is protected: root `security`, per-operation
//! `security`, and `components.securitySchemes`.
//!
//! Raw JSON/YAML is checked exactly once, in [`Document::from_value`]. Malformed
//! pieces are either dropped (a scope that is not a string) or kept in a typed
//! "cannot be used" form ([`SecuritySchemeDecl::Invalid`],
//! [`SecuritySchemeDecl::Unsupported`]) so the resolver can skip them and the
//! linter can report them.
//!
//! `$ref` pointers are not followed; documents are expected to be dereferenced.

mod build;
mod load;
mod types;

pub use build::{
    extract_components, extract_oauth_flows, extract_path_item, extract_security_requirements,
    extract_security_scheme,
};
pub use load::{load_document, load_value};
pub use types::*;
