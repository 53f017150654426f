//! Effective security requirement lookup.
//!
//! OpenAPI inheritance is override-not-merge: an operation that has a
//! `security` field at all (even `[]`) replaces the document default entirely.

use crate::error::SecurityError;
use crate::spec::{Document, HttpMethod, SecurityRequirement};

/// The document-level default requirement list
///
/// Empty when the document declares no root `security`.
#[must_use]
pub fn get_root_security(document: &Document) -> &[SecurityRequirement] {
    document.security.as_deref().unwrap_or_default()
}

/// The requirement list in force for `path` + `method`
///
/// # Errors
///
/// * [`SecurityError::NoPathInSchema`] - the document has no `paths`
/// * [`SecurityError::PathNotFound`] - `path` is not a key of `paths`
/// * [`SecurityError::OperationNotFound`] - the path item has no `method`
pub fn get_operation_security<'a>(
    document: &'a Document,
    path: &str,
    method: HttpMethod,
) -> Result<&'a [SecurityRequirement], SecurityError> {
    if document.paths.is_none() {
        return Err(SecurityError::NoPathInSchema);
    }
    let item = document
        .path_item(path)
        .ok_or_else(|| SecurityError::PathNotFound(path.to_string()))?;
    let operation = item
        .operation(method)
        .ok_or_else(|| SecurityError::OperationNotFound {
            path: path.to_string(),
            method: method.to_string(),
        })?;

    match operation.security.as_deref() {
        Some(own) => Ok(own),
        None => Ok(get_root_security(document)),
    }
}
