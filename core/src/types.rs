//! Domain DTOs for the user search API.
//!
//! # Design
//! These types mirror the search server's wire schema but are defined
//! independently. The server speaks capitalized field names (`Id`, `Name`,
//! ...), so serde renames keep the Rust side idiomatic. Integration tests
//! catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// Largest page the server will hand out; bigger limits are clamped.
pub const MAX_LIMIT: i64 = 25;

/// Sort direction: descending.
pub const ORDER_BY_DESC: i64 = -1;
/// Sort direction: leave the server's natural order.
pub const ORDER_BY_NONE: i64 = 0;
/// Sort direction: ascending.
pub const ORDER_BY_ASC: i64 = 1;

/// Parameters for a single `find_users` call.
///
/// An empty `order_field` lets the server fall back to `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub order_field: String,
    #[serde(default)]
    pub order_by: i64,
}

impl SearchRequest {
    /// The page size actually requested from the server, capped at
    /// [`MAX_LIMIT`].
    pub fn effective_limit(&self) -> i64 {
        self.limit.min(MAX_LIMIT)
    }
}

/// A single user record returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Age")]
    pub age: i64,
    #[serde(rename = "About")]
    pub about: String,
    #[serde(rename = "Gender")]
    pub gender: String,
}

/// One page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResponse {
    pub users: Vec<User>,
    /// True when the server had at least one record past this page.
    pub next_page: bool,
}

/// Structured error body the server sends with some 400 responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchErrorResponse {
    #[serde(rename = "Error")]
    pub error: String,
}
