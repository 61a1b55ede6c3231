//! Request builder, response classifier, and blocking entry point for the
//! user search API.
//!
//! # Design
//! `SearchClient` holds its configuration and a transport, and carries no
//! mutable state between calls. `find_users` is split into
//! `build_find_users`, which validates locally and produces an
//! `HttpRequest`, and `parse_find_users`, which maps an `HttpResponse` onto
//! either a page of users or exactly one `SearchError`. Both halves are pure
//! and can be driven without a network.
//!
//! The client always asks the server for one record more than the caller
//! wants. If that extra record arrives it is dropped and the page is marked
//! as having a successor.

use std::time::Duration;

use crate::error::SearchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{SearchErrorResponse, SearchRequest, SearchResponse, User};

/// Path of the search endpoint relative to the base URL.
pub const SEARCH_PATH: &str = "/search";

/// Header carrying the shared-secret token.
pub const ACCESS_TOKEN_HEADER: &str = "AccessToken";

/// Ceiling on a full round-trip. The slow-server scenario sleeps for two
/// seconds, so this must stay below that.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Error string the server uses to reject an order field.
const BAD_ORDER_FIELD: &str = "ErrorBadOrderField";

/// Connection settings for a `SearchClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub access_token: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Synchronous client for the user search API.
#[derive(Debug, Clone)]
pub struct SearchClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl SearchClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self { config, transport }
    }
}

impl<T: Transport> SearchClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run one search: validate, send, classify. Never retries.
    pub fn find_users(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let http_request = self.build_find_users(request)?;
        tracing::debug!(
            path = %http_request.path,
            query = %http_request.query_string(),
            "sending search request"
        );
        let response = self.transport.execute(&http_request)?;
        self.parse_find_users(request, response)
    }

    /// Validate `request` and describe the GET that carries it.
    ///
    /// Fails with `InvalidLimit` / `InvalidOffset` without touching the
    /// transport. The limit is clamped to `MAX_LIMIT` and then bumped by one
    /// to detect a following page.
    pub fn build_find_users(&self, request: &SearchRequest) -> Result<HttpRequest, SearchError> {
        validate(request)?;
        let fetch_limit = request.effective_limit() + 1;

        Ok(HttpRequest {
            path: format!("{}{SEARCH_PATH}", self.config.base_url),
            query: vec![
                ("limit".to_string(), fetch_limit.to_string()),
                ("offset".to_string(), request.offset.to_string()),
                ("query".to_string(), request.query.clone()),
                ("order_field".to_string(), request.order_field.clone()),
                ("order_by".to_string(), request.order_by.to_string()),
            ],
            headers: vec![(
                ACCESS_TOKEN_HEADER.to_string(),
                self.config.access_token.clone(),
            )],
        })
    }

    /// Classify `response` to the GET built for `request`.
    pub fn parse_find_users(
        &self,
        request: &SearchRequest,
        response: HttpResponse,
    ) -> Result<SearchResponse, SearchError> {
        validate(request)?;
        tracing::debug!(status = response.status, "classifying search response");

        match response.status {
            200 => {
                let mut users: Vec<User> = serde_json::from_str(&response.body)
                    .map_err(|e| SearchError::MalformedResult(e.to_string()))?;
                let limit = usize::try_from(request.effective_limit()).unwrap_or(0);
                let next_page = users.len() > limit;
                users.truncate(limit);
                Ok(SearchResponse { users, next_page })
            }
            400 => {
                let body: SearchErrorResponse = serde_json::from_str(&response.body)
                    .map_err(|e| SearchError::MalformedErrorBody(e.to_string()))?;
                if body.error == BAD_ORDER_FIELD {
                    return Err(SearchError::BadOrderField(request.order_field.clone()));
                }
                Err(SearchError::BadRequest(body.error))
            }
            401 => Err(SearchError::BadAccessToken),
            500 => Err(SearchError::ServerFatal),
            status => Err(SearchError::UnexpectedStatus {
                status,
                body: response.body,
            }),
        }
    }
}

fn validate(request: &SearchRequest) -> Result<(), SearchError> {
    if request.limit <= 0 {
        return Err(SearchError::InvalidLimit);
    }
    if request.offset < 0 {
        return Err(SearchError::InvalidOffset);
    }
    Ok(())
}
