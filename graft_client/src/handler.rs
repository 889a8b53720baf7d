// Copyright 2026 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler-name validation.
//!
//! Event-handler property values cross a trust boundary into client-executed
//! script, so the grammar accepted here is deliberately conservative: reject
//! rather than pass through anything that is not plainly a handler name.

/// Returns `true` if `name` is a syntactically valid client handler name.
///
/// The accepted grammar is one or more identifier segments joined by single
/// dots, where a segment is `[A-Za-z_$][A-Za-z0-9_$]*`. This covers plain
/// function names (`onShowing`) and namespaced paths
/// (`Sys.Extended.UI.onShowing`); everything else, including empty segments,
/// leading/trailing dots, and whitespace, is rejected.
///
/// # Example
///
/// ```rust
/// use graft_client::is_valid_handler_name;
///
/// assert!(is_valid_handler_name("onColorSelectionChanged"));
/// assert!(is_valid_handler_name("Sys.Extended.UI.onShowing"));
/// assert!(!is_valid_handler_name("alert(1)"));
/// assert!(!is_valid_handler_name(""));
/// ```
#[must_use]
pub fn is_valid_handler_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_identifier)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
