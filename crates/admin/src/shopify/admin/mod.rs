//! Shopify Admin API client.
//!
//! GraphQL for product reads, REST for inventory levels. Authenticates with
//! a static admin access token.

use std::sync::Arc;
use std::time::Duration;

use graphql_client::GraphQLQuery;
use reqwest::{StatusCode, header};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ShopifyAdminConfig;

use super::{AdminShopifyError, GraphQLError, GraphQLErrorLocation};

mod inventory;
mod products;
pub mod queries;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_RETRY_AFTER_SECS: u64 = 2;
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Shopify Admin API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    store: String,
    api_version: String,
    access_token: SecretString,
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("store", &self.inner.store)
            .field("api_version", &self.inner.api_version)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl AdminClient {
    /// Create a new Admin API client.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ShopifyAdminConfig) -> Result<Self, AdminShopifyError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("banzai-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                store: config.store.clone(),
                api_version: config.api_version.clone(),
                access_token: config.access_token.clone(),
            }),
        })
    }

    /// Get the store domain.
    #[must_use]
    pub fn store(&self) -> &str {
        &self.inner.store
    }

    /// Get the API version.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.inner.api_version
    }

    /// Absolute URL of an Admin API resource, e.g. `inventory_levels.json`.
    fn endpoint(&self, resource: &str) -> String {
        format!(
            "https://{}/admin/api/{}/{resource}",
            self.inner.store, self.inner.api_version
        )
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header(ACCESS_TOKEN_HEADER, self.inner.access_token.expose_secret())
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL query.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, AdminShopifyError>
    where
        Q::ResponseData: DeserializeOwned,
    {
        let body = Q::build_query(variables);

        let response = self
            .authorized(self.inner.client.post(self.endpoint("graphql.json")))
            .json(&body)
            .send()
            .await?;

        let response = check_status(response).await?;
        let graphql_response: graphql_client::Response<Q::ResponseData> = response.json().await?;

        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            let converted_errors: Vec<GraphQLError> =
                errors.into_iter().map(convert_graphql_error).collect();
            return Err(AdminShopifyError::GraphQL(converted_errors));
        }

        graphql_response
            .data
            .ok_or_else(|| AdminShopifyError::GraphQL(vec![GraphQLError::message("No data in response")]))
    }

    // =========================================================================
    // REST Execution
    // =========================================================================

    /// GET a REST resource and decode the JSON body.
    ///
    /// Also returns the `page_info` token of the next page when the `Link`
    /// header advertises one.
    async fn rest_get<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, String)],
    ) -> Result<(T, Option<String>), AdminShopifyError> {
        let response = self
            .authorized(self.inner.client.get(self.endpoint(resource)))
            .query(query)
            .send()
            .await?;

        let response = check_status(response).await?;
        let next = response
            .headers()
            .get(header::LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_page_info);
        let bytes = response.bytes().await?;
        Ok((serde_json::from_slice(&bytes)?, next))
    }

    /// POST a JSON body to a REST resource, discarding the response body.
    async fn rest_post<B: serde::Serialize + Sync>(
        &self,
        resource: &str,
        body: &B,
    ) -> Result<(), AdminShopifyError> {
        let response = self
            .authorized(self.inner.client.post(self.endpoint(resource)))
            .json(body)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

/// `page_info` of the `rel="next"` entry in a REST `Link` header.
fn next_page_info(link: &str) -> Option<String> {
    link.split(',')
        .find(|entry| entry.contains(r#"rel="next""#))
        .and_then(|entry| {
            let start = entry.find('<')? + 1;
            let end = entry.find('>')?;
            Url::parse(entry.get(start..end)?).ok()
        })
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "page_info")
                .map(|(_, value)| value.into_owned())
        })
}

/// Map non-success statuses onto client errors.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AdminShopifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<f64>().ok())
            .map_or(DEFAULT_RETRY_AFTER_SECS, seconds_from_header);
        return Err(AdminShopifyError::RateLimited(retry_after));
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(AdminShopifyError::Unauthorized(
            "Invalid or revoked access token".to_string(),
        ));
    }

    let body: String = response
        .text()
        .await
        .unwrap_or_default()
        .chars()
        .take(MAX_ERROR_BODY_CHARS)
        .collect();

    match status {
        StatusCode::NOT_FOUND => Err(AdminShopifyError::NotFound(body)),
        StatusCode::UNPROCESSABLE_ENTITY => Err(AdminShopifyError::UserError(body)),
        _ => Err(AdminShopifyError::Status {
            status: status.as_u16(),
            body,
        }),
    }
}

/// Shopify sends `Retry-After` as fractional seconds (`2.0`).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn seconds_from_header(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.ceil() as u64
    } else {
        DEFAULT_RETRY_AFTER_SECS
    }
}

fn convert_graphql_error(error: graphql_client::Error) -> GraphQLError {
    GraphQLError {
        message: error.message,
        locations: error
            .locations
            .unwrap_or_default()
            .into_iter()
            .map(|l| GraphQLErrorLocation {
                line: i64::from(l.line),
                column: i64::from(l.column),
            })
            .collect(),
        path: error
            .path
            .unwrap_or_default()
            .into_iter()
            .map(|fragment| match fragment {
                graphql_client::PathFragment::Key(key) => key,
                graphql_client::PathFragment::Index(index) => index.to_string(),
            })
            .collect(),
    }
}
