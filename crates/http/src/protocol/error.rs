use std::io;
use std::time::Duration;

use http::StatusCode;
use thiserror::Error;

use crate::protocol::StatusLine;

/// Top-level error of a single fetch.
///
/// Every stage of a fetch (url decomposition, connecting, reading the response)
/// reports through this type, so a failed fetch is never confused with an empty
/// body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url: {source}")]
    InvalidUrl {
        #[from]
        source: UrlError,
    },

    #[error("can't resolve host {host}: {source}")]
    Resolution { host: String, source: io::Error },

    #[error("can't connect to {host}: {source}")]
    Connect { host: String, source: io::Error },

    #[error("tls handshake with {host} failed: {source}")]
    TlsHandshake { host: String, source: io::Error },

    #[error("transport error: {source}")]
    Transport {
        #[from]
        source: io::Error,
    },

    #[error("response error: {source}")]
    Response { source: ParseError },

    #[error("fetch timed out after {after:?}")]
    TimedOut { after: Duration },

    #[error("can't build trust store: {reason}")]
    TrustStore { reason: String },
}

impl FetchError {
    pub fn resolution<S: ToString>(host: S, source: io::Error) -> Self {
        Self::Resolution { host: host.to_string(), source }
    }

    pub fn connect<S: ToString>(host: S, source: io::Error) -> Self {
        Self::Connect { host: host.to_string(), source }
    }

    pub fn tls_handshake<S: ToString>(host: S, source: io::Error) -> Self {
        Self::TlsHandshake { host: host.to_string(), source }
    }

    pub fn trust_store<S: ToString>(reason: S) -> Self {
        Self::TrustStore { reason: reason.to_string() }
    }

    /// Returns the response parsing error, if the fetch failed while decoding the response.
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Response { source } => Some(source),
            _ => None,
        }
    }
}

/// Read failures surface as [`FetchError::Transport`], everything else the decoder
/// rejects stays a [`FetchError::Response`].
impl From<ParseError> for FetchError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::Io { source } => Self::Transport { source },
            source => Self::Response { source },
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("missing `://` scheme separator")]
    MissingScheme,

    #[error("unsupported scheme `{scheme}`, expect http or https")]
    UnsupportedScheme { scheme: String },

    #[error("empty host")]
    EmptyHost,
}

impl UrlError {
    pub fn unsupported_scheme<S: ToString>(scheme: S) -> Self {
        Self::UnsupportedScheme { scheme: scheme.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed status line: {line:?}")]
    MalformedStatusLine { line: String },

    #[error("server responded with {status_line}")]
    HttpErrorStatus { status: StatusCode, status_line: String },

    #[error("unsupported {header}: {value}")]
    UnsupportedEncoding { header: &'static str, value: String },

    #[error("connection closed before the header block ended, {buffered} bytes buffered")]
    TruncatedHeaders { buffered: usize },

    #[error("connection closed with {remaining} body bytes outstanding")]
    TruncatedBody { remaining: u64 },

    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_status_line<S: ToString>(line: S) -> Self {
        Self::MalformedStatusLine { line: line.to_string() }
    }

    pub fn http_error_status(status_line: &StatusLine) -> Self {
        Self::HttpErrorStatus { status: status_line.status(), status_line: status_line.as_str().to_string() }
    }

    pub fn unsupported_encoding<S: ToString>(header: &'static str, value: S) -> Self {
        Self::UnsupportedEncoding { header, value: value.to_string() }
    }

    pub fn truncated_headers(buffered: usize) -> Self {
        Self::TruncatedHeaders { buffered }
    }

    pub fn truncated_body(remaining: u64) -> Self {
        Self::TruncatedBody { remaining }
    }

    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
