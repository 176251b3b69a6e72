//! Shopify global identifiers.
//!
//! The Admin GraphQL API addresses every resource by a global id of the form
//! `gid://shopify/{Resource}/{numeric}`, while the REST API only understands the
//! numeric suffix. Both forms show up as merge keys, so normalization lives in
//! one place.

/// Strip everything up to and including the last `/`.
///
/// Ids that are already short come back unchanged, which makes the function
/// safe to apply to either form.
///
/// ```
/// use banzai_core::short_id;
///
/// assert_eq!(short_id("gid://shopify/Product/123"), "123");
/// assert_eq!(short_id("123"), "123");
/// ```
#[must_use]
pub fn short_id(id: &str) -> &str {
    id.rsplit_once('/').map_or(id, |(_, tail)| tail)
}
