//! Error types for the user search client.
//!
//! # Design
//! Every failure of `find_users` is terminal and lands in exactly one
//! variant. The `Display` strings are part of the contract with the search
//! server's test suite, so callers may assert on them verbatim. Variants fall
//! into three classes: local validation (raised before any I/O), transport
//! (raised by the HTTP layer), and server-reported.

use thiserror::Error;

/// Errors returned by `SearchClient`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The request asked for zero or a negative number of records.
    #[error("limit must be > 0")]
    InvalidLimit,

    /// The request asked to skip a negative number of records.
    #[error("offset must be > 0")]
    InvalidOffset,

    /// No response arrived within the client's timeout. Carries the encoded
    /// query string of the request.
    #[error("timeout for {0}")]
    Timeout(String),

    /// Connection refused, DNS failure, broken body, or any other transport
    /// problem.
    #[error("unknown error {0}")]
    Transport(String),

    /// The server returned 401.
    #[error("Bad AccessToken")]
    BadAccessToken,

    /// The server rejected the requested order field.
    #[error("OrderFeld {0} invalid")]
    BadOrderField(String),

    /// A 400 with a structured body the client does not recognize.
    #[error("unknown bad request error: {0}")]
    BadRequest(String),

    /// A 400 whose body is not a `SearchErrorResponse`.
    #[error("cannot unpack error json: {0}")]
    MalformedErrorBody(String),

    /// The server returned 500.
    #[error("SearchServer fatal error")]
    ServerFatal,

    /// A 200 whose body is not a JSON array of users.
    #[error("cannot unpack result json: {0}")]
    MalformedResult(String),

    /// Any status the client has no mapping for.
    #[error("unknown error: unexpected status {status}")]
    UnexpectedStatus { status: u16, body: String },
}

impl SearchError {
    /// True for errors raised before any network call.
    pub fn is_local(&self) -> bool {
        matches!(self, SearchError::InvalidLimit | SearchError::InvalidOffset)
    }

    /// True for errors raised by the HTTP layer rather than reported by the
    /// server.
    pub fn is_transport(&self) -> bool {
        matches!(self, SearchError::Timeout(_) | SearchError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_contract_wording() {
        assert_eq!(SearchError::InvalidLimit.to_string(), "limit must be > 0");
        assert_eq!(SearchError::InvalidOffset.to_string(), "offset must be > 0");
        assert_eq!(SearchError::BadAccessToken.to_string(), "Bad AccessToken");
        assert_eq!(
            SearchError::BadOrderField("about".to_string()).to_string(),
            "OrderFeld about invalid"
        );
        assert_eq!(
            SearchError::BadRequest("Unknown error".to_string()).to_string(),
            "unknown bad request error: Unknown error"
        );
        assert_eq!(SearchError::ServerFatal.to_string(), "SearchServer fatal error");
    }

    #[test]
    fn classes_are_disjoint() {
        assert!(SearchError::InvalidOffset.is_local());
        assert!(!SearchError::InvalidOffset.is_transport());
        assert!(SearchError::Timeout("limit=11".to_string()).is_transport());
        assert!(!SearchError::ServerFatal.is_local());
        assert!(!SearchError::ServerFatal.is_transport());
    }
}
