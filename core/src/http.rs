//! HTTP exchange types described as plain data.
//!
//! # Design
//! `TypedClient` builds `HttpRequest` values and parses `HttpResponse`
//! values; a `Transport` moves one into the other. Keeping both sides as
//! owned data lets tests substitute a stub transport and inspect exactly what
//! would have gone over the wire.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// HTTP method accepted by the request helper. The set is closed: only
/// `GET` and `POST` are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a method name received as text. Anything outside the closed set
/// fails with `ApiError::InvalidMethod`.
impl FromStr for HttpMethod {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            other => Err(ApiError::InvalidMethod(other.to_string())),
        }
    }
}

/// An outgoing request. `url` is already the base URL joined with the
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// A response as handed back by a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
