//! Security headers for an app that lives inside the store admin iframe.
//!
//! Framing is allowed only by the store's own admin domains, so
//! `X-Frame-Options` is not sent; `frame-ancestors` is the control.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, InvalidHeaderValue, REFERRER_POLICY,
            X_CONTENT_TYPE_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

/// Origin of the store admin that embeds the app.
pub const SHOPIFY_ADMIN_ORIGIN: &str = "https://admin.shopify.com";

/// Headers computed once at startup.
#[derive(Debug, Clone)]
pub struct SecurityHeaders {
    content_security_policy: HeaderValue,
}

impl SecurityHeaders {
    /// Policy allowing `store` (a `*.myshopify.com` domain) to frame the app.
    ///
    /// # Errors
    ///
    /// Returns an error if `store` contains characters not valid in a header.
    pub fn for_store(store: &str) -> Result<Self, InvalidHeaderValue> {
        let policy = format!(
            "default-src 'self'; \
             script-src 'self' https://cdn.shopify.com; \
             style-src 'self' 'unsafe-inline'; \
             img-src 'self' data: https://cdn.shopify.com; \
             connect-src 'self' {SHOPIFY_ADMIN_ORIGIN}; \
             object-src 'none'; \
             base-uri 'self'; \
             form-action 'self'; \
             frame-ancestors https://{store} {SHOPIFY_ADMIN_ORIGIN}"
        );
        Ok(Self {
            content_security_policy: HeaderValue::from_str(&policy)?,
        })
    }

    /// The `Content-Security-Policy` value.
    #[must_use]
    pub const fn content_security_policy(&self) -> &HeaderValue {
        &self.content_security_policy
    }
}

/// Add the embedded-app security headers to every response.
pub async fn security_headers_middleware(
    State(policy): State<Arc<SecurityHeaders>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(CONTENT_SECURITY_POLICY, policy.content_security_policy.clone());
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    // The embedding admin reads the referrer to keep its own URL in sync.
    headers.insert(
        REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0"));
    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static("camera=(), geolocation=(), microphone=(), payment=(), usb=()"),
    );

    response
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::Request as HttpRequest, routing::get};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_headers_allow_store_framing() {
        let policy = Arc::new(SecurityHeaders::for_store("banzai.myshopify.com").unwrap());
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state(
                policy,
                security_headers_middleware,
            ));

        let response = app
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let headers = response.headers();

        let csp = headers[CONTENT_SECURITY_POLICY].to_str().unwrap();
        assert!(csp.ends_with(
            "frame-ancestors https://banzai.myshopify.com https://admin.shopify.com"
        ));
        assert!(headers.get("x-frame-options").is_none());
        assert_eq!(headers[X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[test]
    fn test_invalid_store_is_rejected() {
        assert!(SecurityHeaders::for_store("bad\nstore").is_err());
    }
}
