//! HTTP response types.
//!
//! [`ResponseHead`] is what the header decoder produces once the header block is
//! complete; [`Response`] is the assembled result of a whole fetch.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use http::StatusCode;

use crate::ensure;
use crate::protocol::header::{CONTENT_KEY, STATUS_KEY, trim_value};
use crate::protocol::{HeaderMap, ParseError};

/// A parsed `HTTP/<version> <code> <reason>` status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    raw: String,
    version: String,
    status: StatusCode,
    reason: String,
}

impl StatusLine {
    /// Parses a status line, without its line terminator.
    ///
    /// The version must be made of digits and dots and the code must be exactly
    /// three digits. The reason phrase may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedStatusLine`] when the line does not match.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let raw = trim_value(line);
        let malformed = || ParseError::malformed_status_line(raw);

        let rest = raw.strip_prefix("HTTP/").ok_or_else(malformed)?;
        let (version, rest) = rest.split_once(' ').ok_or_else(malformed)?;
        ensure!(!version.is_empty() && version.bytes().all(|b| b.is_ascii_digit() || b == b'.'), malformed());

        let (code, reason) = rest.split_once(' ').unwrap_or((rest, ""));
        ensure!(code.len() == 3 && code.bytes().all(|b| b.is_ascii_digit()), malformed());
        let status = StatusCode::from_bytes(code.as_bytes()).map_err(|_invalid| malformed())?;

        Ok(Self { raw: raw.to_string(), version: version.to_string(), status, reason: reason.trim().to_string() })
    }

    /// The whole line, trimmed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The version without the `HTTP/` prefix, e.g. `1.0`.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// True for 2xx status codes.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Status line plus headers of a response, available before the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    status_line: StatusLine,
    headers: HeaderMap,
}

impl ResponseHead {
    /// Builds a head, recording the status line under the reserved [`STATUS_KEY`].
    pub fn new(status_line: StatusLine, mut headers: HeaderMap) -> Self {
        headers.insert_reserved(STATUS_KEY, status_line.as_str().to_string());
        Self { status_line, headers }
    }

    pub fn status_line(&self) -> &StatusLine {
        &self.status_line
    }

    pub fn status(&self) -> StatusCode {
        self.status_line.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Attaches an assembled body, producing the full [`Response`].
    pub fn body(self, body: Bytes) -> Response {
        Response { head: self, body }
    }
}

/// A fully read response: status, headers and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    head: ResponseHead,
    body: Bytes,
}

impl Response {
    pub fn head(&self) -> &ResponseHead {
        &self.head
    }

    pub fn status(&self) -> StatusCode {
        self.head.status()
    }

    pub fn status_line(&self) -> &StatusLine {
        self.head.status_line()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.head.headers()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The body as text. No charset negotiation happens; invalid UTF-8 is replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn into_parts(self) -> (ResponseHead, Bytes) {
        (self.head, self.body)
    }

    /// Flattens the response into a single map, the body stored under [`CONTENT_KEY`].
    pub fn into_header_map(self) -> HeaderMap {
        let content = self.text().into_owned();
        let mut headers = self.head.headers;
        headers.insert_reserved(CONTENT_KEY, content);
        headers
    }
}
