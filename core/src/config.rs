//! Client configuration.

/// Base URL every endpoint is appended to unless overridden.
pub const BASE_URL: &str = "https://api.com/v1";

/// What the client does with a non-2xx response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Decode the body whatever the status.
    #[default]
    Ignore,
    /// Fail with `ApiError::HttpStatus` before decoding.
    RequireSuccess,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    status_policy: StatusPolicy,
}

impl ClientConfig {
    /// Trailing slashes are stripped so endpoints can start with `/`.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_status_policy(mut self, status_policy: StatusPolicy) -> Self {
        self.status_policy = status_policy;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            status_policy: StatusPolicy::default(),
        }
    }
}
