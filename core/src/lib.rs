//! Synchronous client for the paginated user search API.
//!
//! # Overview
//! `SearchClient::find_users` sends a filtered, paginated search to the
//! search server and returns either a page of users or a single classified
//! `SearchError`. Request building and response parsing are exposed
//! separately so the classification logic can be tested without a network.
//!
//! # Design
//! - `SearchClient` holds only configuration and a transport; calls share no
//!   mutable state and may run concurrently.
//! - Invalid limits and offsets are rejected before any I/O.
//! - All network access goes through the `Transport` trait; the default
//!   `UreqTransport` enforces a hard timeout.
//! - DTOs are defined independently from the search-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{ClientConfig, SearchClient, ACCESS_TOKEN_HEADER, DEFAULT_TIMEOUT, SEARCH_PATH};
pub use error::SearchError;
pub use http::{HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{
    SearchErrorResponse, SearchRequest, SearchResponse, User, MAX_LIMIT, ORDER_BY_ASC,
    ORDER_BY_DESC, ORDER_BY_NONE,
};
