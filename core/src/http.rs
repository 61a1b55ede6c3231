//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data.
//! `SearchClient` builds `HttpRequest` values and parses `HttpResponse`
//! values; the `Transport` in between is the only piece that touches the
//! network. The search API is read-only, so every request is a GET and
//! carries no body.

/// A GET request described as plain data.
///
/// Query parameters are kept as ordered pairs and left unencoded; the
/// transport is responsible for percent-encoding them onto the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// `key=value` pairs joined with `&`, unencoded. Meant for log lines and
    /// error messages, not for building URLs.
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`, then passed
/// to `SearchClient::parse_find_users` for classification.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}
