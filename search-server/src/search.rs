//! Query-parameter parsing and the filter/paginate/order-check pipeline.
//!
//! # Design
//! Everything here is pure: the handler feeds in decoded parameters and the
//! freshly loaded users, and gets back either the page to serialize or a
//! `SearchFailure` that knows its own HTTP response. Ordering is validated
//! but never applied; accepted order fields return the dataset's natural
//! order.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{SearchErrorResponse, User};

/// Page size used when the request carries no `limit`.
pub const DEFAULT_LIMIT: usize = 25;

/// Search parameters as sent, one optional text value per key. Fields are
/// decoded one at a time so the handler can act on `limit` before looking
/// at the rest.
#[derive(Debug, Default)]
pub struct SearchParams {
    pub query: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub order_by: Option<String>,
    pub order_field: Option<String>,
}

/// Decoded search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Lowercased search text; empty matches everything.
    pub query: String,
    pub limit: usize,
    pub offset: usize,
    pub order_by: i64,
    pub order_field: String,
}

/// Parameter problems answered with a bare 400.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("limit {0:?} is not a non-negative integer")]
    InvalidLimit(String),

    #[error("offset {0} is negative")]
    NegativeOffset(i64),
}

impl IntoResponse for ParamError {
    fn into_response(self) -> Response {
        StatusCode::BAD_REQUEST.into_response()
    }
}

/// Why the pipeline refused to produce a page.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchFailure {
    #[error("offset {offset} is past the {available} matching users")]
    OffsetOutOfRange { offset: usize, available: usize },

    #[error("order_by {0} is not one of -1, 0, 1")]
    BadOrderBy(i64),

    #[error("ordering by about is not supported")]
    BadOrderField,

    #[error("unknown order field {0:?}")]
    UnknownOrderField(String),
}

impl IntoResponse for SearchFailure {
    fn into_response(self) -> Response {
        match self {
            SearchFailure::OffsetOutOfRange { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
            }
            // No structured body: clients see this only as a generic failure.
            SearchFailure::BadOrderBy(_) => StatusCode::BAD_REQUEST.into_response(),
            SearchFailure::BadOrderField => error_body("ErrorBadOrderField"),
            SearchFailure::UnknownOrderField(_) => error_body("Unknown error"),
        }
    }
}

fn error_body(error: &str) -> Response {
    let body = SearchErrorResponse {
        error: error.to_string(),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

impl SearchParams {
    /// Collect decoded `key=value` pairs. When a key repeats, the first
    /// value wins; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "query" => &mut params.query,
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                "order_by" => &mut params.order_by,
                "order_field" => &mut params.order_field,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    /// Page size, defaulting to [`DEFAULT_LIMIT`]. A malformed or negative
    /// value is an error.
    pub fn limit(&self) -> Result<usize, ParamError> {
        match self.limit.as_deref().filter(|v| !v.is_empty()) {
            None => Ok(DEFAULT_LIMIT),
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| ParamError::InvalidLimit(raw.to_string())),
        }
    }

    /// Decode the remaining fields around an already parsed `limit`.
    /// Malformed `offset` and `order_by` fall back to 0.
    pub fn into_query(self, limit: usize) -> Result<SearchQuery, ParamError> {
        let offset = non_empty(self.offset)
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(0);
        let offset = usize::try_from(offset).map_err(|_| ParamError::NegativeOffset(offset))?;

        let order_by = non_empty(self.order_by)
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(0);

        Ok(SearchQuery {
            query: self.query.unwrap_or_default().to_lowercase(),
            limit,
            offset,
            order_by,
            order_field: non_empty(self.order_field).unwrap_or_else(|| "id".to_string()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl User {
    /// Case-insensitive substring match over name and about. `needle` must
    /// already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.about.to_lowercase().contains(needle)
    }
}

/// Filter, window, and validate ordering for one request.
pub fn run_search(users: Vec<User>, query: &SearchQuery) -> Result<Vec<User>, SearchFailure> {
    let matched: Vec<User> = if query.query.is_empty() {
        users
    } else {
        users.into_iter().filter(|u| u.matches(&query.query)).collect()
    };

    if query.offset > 0 && query.offset >= matched.len() {
        return Err(SearchFailure::OffsetOutOfRange {
            offset: query.offset,
            available: matched.len(),
        });
    }

    let page: Vec<User> = matched
        .into_iter()
        .skip(query.offset)
        .take(query.limit)
        .collect();

    check_order_by(query.order_by)?;
    check_order_field(&query.order_field)?;

    Ok(page)
}

fn check_order_by(order_by: i64) -> Result<(), SearchFailure> {
    match order_by {
        -1..=1 => Ok(()),
        other => Err(SearchFailure::BadOrderBy(other)),
    }
}

fn check_order_field(field: &str) -> Result<(), SearchFailure> {
    match field {
        "id" | "age" | "name" => Ok(()),
        "about" => Err(SearchFailure::BadOrderField),
        other => Err(SearchFailure::UnknownOrderField(other.to_string())),
    }
}
