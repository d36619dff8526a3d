//! # Markup Sanitizer
//!
//! Fixed allow-list policy for user-generated content: common formatting
//! tags and links survive; scripts, styles, event handlers and unknown tags
//! are removed. Text is HTML-escaped.

use ammonia::Builder;
use std::sync::OnceLock;

fn policy() -> &'static Builder<'static> {
    static POLICY: OnceLock<Builder<'static>> = OnceLock::new();
    POLICY.get_or_init(|| {
        let mut builder = Builder::default();
        builder.link_rel(Some("nofollow"));
        builder
    })
}

/// Sanitize `input` with the user-generated-content policy.
pub fn sanitize(input: &str) -> String {
    policy().clean(input).to_string()
}
