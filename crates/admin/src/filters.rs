//! Custom Askama template filters.
//!
//! Each filter is a thin wrapper over a plain function so the formatting can
//! be tested without rendering a template.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use banzai_core::ProductStatus;
use chrono::DateTime;

/// Shown in place of an absent value.
pub const PLACEHOLDER: &str = "-";

/// `value`, or `"-"` when it is blank.
#[must_use]
pub fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        PLACEHOLDER
    } else {
        value
    }
}

/// Remove everything between `<` and the next `>`.
///
/// An unmatched `<` and an empty `<>` are kept as text.
#[must_use]
pub fn strip_html_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) if close > 0 => rest = &after[close + 1..],
            _ => {
                text.push('<');
                rest = after;
            }
        }
    }
    text.push_str(rest);
    text
}

/// Calendar date (`YYYY-MM-DD`) of an ISO-8601 timestamp.
///
/// Unparseable input keeps its first ten characters.
#[must_use]
pub fn date_prefix(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp).map_or_else(
        |_| timestamp.chars().take(10).collect(),
        |parsed| parsed.date_naive().format("%Y-%m-%d").to_string(),
    )
}

/// `ACTIVE` → `Active`; any other word is capitalized the same way.
#[must_use]
pub fn capitalize_status(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Badge tone for a status.
#[must_use]
pub const fn status_tone(status: ProductStatus) -> &'static str {
    match status {
        ProductStatus::Active => "success",
        ProductStatus::Draft => "info",
        ProductStatus::Archived => "neutral",
        ProductStatus::Other => "warning",
    }
}

/// Usage in templates: `{{ product.sku|placeholder }}`
#[askama::filter_fn]
pub fn placeholder(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(or_placeholder(&value.to_string()).to_string())
}

/// Usage in templates: `{{ product.description|strip_tags }}`
#[askama::filter_fn]
pub fn strip_tags(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(strip_html_tags(&value.to_string()))
}

/// Usage in templates: `{{ product.created_at|date_only }}`
#[askama::filter_fn]
pub fn date_only(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(date_prefix(&value.to_string()))
}

/// Usage in templates: `{{ product.status|status_label }}`
#[askama::filter_fn]
pub fn status_label(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(capitalize_status(&value.to_string()))
}
