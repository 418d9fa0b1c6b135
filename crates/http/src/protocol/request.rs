//! The request sent for a fetch.
//!
//! Only one request shape exists: `GET <path> HTTP/1.0` with a `Host` header,
//! identity encoding and `Connection: close`.

use crate::url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    host: String,
    path: String,
    user_agent: Option<String>,
}

impl RequestHead {
    /// Builds a `GET` request for the given url.
    pub fn get(url: &Url) -> Self {
        Self { host: url.host().to_string(), path: url.path().to_string(), user_agent: None }
    }

    /// Sets the `User-Agent` header value.
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }
}
