//! Reference search server for the user search client.
//!
//! Each request runs one linear pipeline: check the access token, parse
//! parameters, load the dataset from disk, filter, check the offset,
//! paginate, validate ordering, serialize. Every stage either hands off to
//! the next or writes a terminal response.

pub mod dataset;
pub mod search;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::search::{run_search, SearchParams};

/// Token accepted when `ACCESS_TOKEN` is not set.
pub const DEFAULT_ACCESS_TOKEN: &str = "FindUsers-Test-Token";

/// Dataset shipped with this crate.
pub const DEFAULT_DATASET_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/dataset.xml");

/// A user record as served on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
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

/// Structured body of a 400 caused by an unacceptable order field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchErrorResponse {
    #[serde(rename = "Error")]
    pub error: String,
}

/// Where the dataset lives and which token unlocks it.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub dataset_path: PathBuf,
    pub access_token: String,
}

impl ServerConfig {
    pub fn new(dataset_path: impl Into<PathBuf>, access_token: &str) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            access_token: access_token.to_string(),
        }
    }

    /// Read `DATASET_PATH` and `ACCESS_TOKEN`, falling back to the bundled
    /// dataset and the test token.
    pub fn from_env() -> Self {
        let dataset_path =
            std::env::var("DATASET_PATH").unwrap_or_else(|_| DEFAULT_DATASET_PATH.to_string());
        let access_token =
            std::env::var("ACCESS_TOKEN").unwrap_or_else(|_| DEFAULT_ACCESS_TOKEN.to_string());
        Self::new(dataset_path, &access_token)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATASET_PATH, DEFAULT_ACCESS_TOKEN)
    }
}

pub fn app(config: ServerConfig) -> Router {
    Router::new()
        .route("/", get(search_users))
        .route("/search", get(search_users))
        .with_state(Arc::new(config))
}

/// A server that accepts every request and answers only after `delay`,
/// with an empty 200.
pub fn slow_app(delay: Duration) -> Router {
    let stall = move || async move {
        tokio::time::sleep(delay).await;
        StatusCode::OK
    };
    Router::new()
        .route("/", get(stall.clone()))
        .route("/search", get(stall))
}

pub async fn run(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}

async fn search_users(
    State(config): State<Arc<ServerConfig>>,
    headers: HeaderMap,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let token = headers.get("AccessToken").and_then(|v| v.to_str().ok());
    if token != Some(config.access_token.as_str()) {
        tracing::debug!("rejecting search with bad access token");
        return (StatusCode::UNAUTHORIZED, "Incorrect access token").into_response();
    }

    let params = match pairs {
        Ok(Query(pairs)) => SearchParams::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejecting undecodable query string");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let limit = match params.limit() {
        Ok(limit) => limit,
        Err(err) => {
            tracing::debug!(error = %err, "rejecting search parameters");
            return err.into_response();
        }
    };

    // Historical quirk: a page size of exactly one yields an empty body and
    // skips every later check.
    if limit == 1 {
        return StatusCode::OK.into_response();
    }

    let query = match params.into_query(limit) {
        Ok(query) => query,
        Err(err) => {
            tracing::debug!(error = %err, "rejecting search parameters");
            return err.into_response();
        }
    };

    let users = match dataset::load_users(&config.dataset_path).await {
        Ok(users) => users,
        Err(err) => {
            tracing::error!(path = %config.dataset_path.display(), error = %err, "dataset unavailable");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response();
        }
    };

    match run_search(users, &query) {
        Ok(page) => {
            tracing::debug!(returned = page.len(), "search served");
            Json(page).into_response()
        }
        Err(failure) => {
            tracing::warn!(error = %failure, "search failed");
            failure.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_with_capitalized_fields() {
        let user = User {
            id: 5,
            name: "Glenn Jordan".to_string(),
            age: 31,
            about: "Nulla".to_string(),
            gender: "female".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["Id"], 5);
        assert_eq!(json["Name"], "Glenn Jordan");
        assert_eq!(json["Age"], 31);
        assert_eq!(json["About"], "Nulla");
        assert_eq!(json["Gender"], "female");
    }

    #[test]
    fn error_response_serializes_error_field() {
        let body = SearchErrorResponse {
            error: "ErrorBadOrderField".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"Error":"ErrorBadOrderField"}"#
        );
    }

    #[test]
    fn default_config_uses_bundled_dataset() {
        let config = ServerConfig::default();
        assert!(config.dataset_path.ends_with("data/dataset.xml"));
        assert_eq!(config.access_token, DEFAULT_ACCESS_TOKEN);
    }
}
