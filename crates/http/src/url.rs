//! Url decomposition.
//!
//! A url is split into scheme, host and path and nothing more: no
//! percent-decoding, no query parsing and no port extraction. The port is implied
//! by the scheme, see [`Scheme::default_port`].

use std::fmt;
use std::str::FromStr;

use crate::ensure;
use crate::protocol::UrlError;

const SCHEME_SEPARATOR: &str = "://";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// 80 for http, 443 for https.
    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    pub fn is_tls(&self) -> bool {
        matches!(self, Scheme::Https)
    }
}

impl FromStr for Scheme {
    type Err = UrlError;

    /// Only the exact lower-case spellings are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            other => Err(UrlError::unsupported_scheme(other)),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `http` or `https` url decomposed into its parts.
///
/// The path always starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url {
    scheme: Scheme,
    host: String,
    path: String,
}

impl Url {
    /// Splits `scheme://host[/path]`.
    ///
    /// Everything between the scheme separator and the first following `/` is the
    /// host, the rest (slash included) is the path. A missing path becomes `/`.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError`] if the separator is missing, the scheme is neither
    /// `http` nor `https`, or the host is empty.
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let (scheme, rest) = input.split_once(SCHEME_SEPARATOR).ok_or(UrlError::MissingScheme)?;
        let scheme = scheme.parse::<Scheme>()?;

        let (host, path) = match rest.find('/') {
            Some(slash) => rest.split_at(slash),
            None => (rest, "/"),
        };
        ensure!(!host.is_empty(), UrlError::EmptyHost);

        Ok(Self { scheme, host: host.to_string(), path: path.to_string() })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The port implied by the scheme.
    pub fn port(&self) -> u16 {
        self.scheme.default_port()
    }
}

impl FromStr for Url {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.scheme, SCHEME_SEPARATOR, self.host, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_scheme_host_path() {
        let url = Url::parse("https://example.org/wiki/Rust?lang=en#history").unwrap();

        assert_eq!(url.scheme(), Scheme::Https);
        assert_eq!(url.host(), "example.org");
        assert_eq!(url.path(), "/wiki/Rust?lang=en#history");
        assert_eq!(url.port(), 443);
    }

    #[test]
    fn missing_path_defaults_to_root() {
        let url = Url::parse("http://example.org").unwrap();

        assert_eq!(url.scheme(), Scheme::Http);
        assert_eq!(url.host(), "example.org");
        assert_eq!(url.path(), "/");
        assert_eq!(url.port(), 80);
        assert_eq!(url.to_string(), "http://example.org/");
    }

    #[test]
    fn path_always_starts_with_slash() {
        for input in ["http://a", "http://a/", "http://a/b/c", "https://a//double", "https://a/%20encoded"] {
            let url: Url = input.parse().unwrap();
            assert!(url.path().starts_with('/'), "{input} gave path {}", url.path());
            assert_eq!(url.host(), "a");
        }
    }

    #[test]
    fn nothing_is_decoded_or_extracted() {
        let url = Url::parse("http://example.org:8080/a%2Fb").unwrap();

        assert_eq!(url.host(), "example.org:8080");
        assert_eq!(url.path(), "/a%2Fb");
        assert_eq!(url.port(), 80);
    }

    #[test]
    fn reject_invalid_urls() {
        assert_eq!(Url::parse("example.org/index.html"), Err(UrlError::MissingScheme));
        assert_eq!(Url::parse("ftp://example.org/"), Err(UrlError::unsupported_scheme("ftp")));
        assert_eq!(Url::parse("HTTP://example.org/"), Err(UrlError::unsupported_scheme("HTTP")));
        assert_eq!(Url::parse("://example.org/"), Err(UrlError::unsupported_scheme("")));
        assert_eq!(Url::parse("http:///index.html"), Err(UrlError::EmptyHost));
        assert_eq!(Url::parse("https://"), Err(UrlError::EmptyHost));
    }
}
