//! Save-time content filtering.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::FileKind;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Strip HTML-shaped markup from CSS content.
///
/// Markup has no business in a stylesheet, so anything opened with `<`
/// and closed with `>` is removed. Bare `>` child combinators survive
/// because only `<`-opened spans match.
pub fn sanitize_css(css: &str) -> String {
    TAG_RE.replace_all(css, "").into_owned()
}

/// Per-kind save filter. JS bodies pass through untouched.
pub fn sanitize_body(kind: FileKind, body: &str) -> String {
    match kind {
        FileKind::Css => sanitize_css(body),
        FileKind::Js => body.to_string(),
    }
}
