//! Command line parsing.

use std::path::PathBuf;
use std::time::Duration;

use micro_fetch::connection::TrustStore;
use thiserror::Error;

pub const USAGE: &str = "Usage: micro-browser <url>";

pub const HELP: &str = "\
Usage: micro-browser <url>

Fetch an http or https url and print the body without markup.

Options:
  --ca-file <PATH>      trust only the certificates in this PEM bundle
  --mozilla-roots       trust the bundled Mozilla roots instead of the platform store
  --timeout <SECONDS>   give up when the fetch takes longer
  -v, -vv, -vvv         log more to stderr
  -h, --help            print this help";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print usage and exit successfully
    Usage,
    Fetch(FetchArgs),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchArgs {
    pub url: String,
    pub trust_store: TrustStore,
    pub timeout: Option<Duration>,
    pub verbosity: u8,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    #[error("unknown option `{flag}`")]
    UnknownFlag { flag: String },

    #[error("option `{flag}` needs a value")]
    MissingValue { flag: &'static str },

    #[error("invalid timeout `{value}`, expect a positive number of seconds")]
    InvalidTimeout { value: String },

    #[error("unexpected argument `{argument}`, only one url can be fetched")]
    UnexpectedArgument { argument: String },
}

/// Parses the arguments following the program name.
///
/// Without a url, or with `-h`, the usage is requested.
///
/// # Errors
///
/// Returns [`ArgsError`] for unknown options, missing option values, an invalid
/// timeout or a second url.
pub fn parse_args<I, S>(args: I) -> Result<Command, ArgsError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);

    let mut url = None;
    let mut trust_store = TrustStore::default();
    let mut timeout = None;
    let mut verbosity = 0u8;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Usage),
            "--ca-file" => {
                let path = args.next().ok_or(ArgsError::MissingValue { flag: "--ca-file" })?;
                trust_store = TrustStore::PemFile(PathBuf::from(path));
            }
            "--mozilla-roots" => trust_store = TrustStore::Mozilla,
            "--timeout" => {
                let value = args.next().ok_or(ArgsError::MissingValue { flag: "--timeout" })?;
                timeout = Some(parse_timeout(&value)?);
            }
            flag if is_verbose_flag(flag) => {
                let count = u8::try_from(flag.len() - 1).unwrap_or(u8::MAX);
                verbosity = verbosity.saturating_add(count);
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(ArgsError::UnknownFlag { flag: flag.to_string() });
            }
            _ if url.is_some() => return Err(ArgsError::UnexpectedArgument { argument: arg }),
            _ => url = Some(arg),
        }
    }

    Ok(match url {
        Some(url) => Command::Fetch(FetchArgs { url, trust_store, timeout, verbosity }),
        None => Command::Usage,
    })
}

fn is_verbose_flag(flag: &str) -> bool {
    flag.strip_prefix('-').is_some_and(|vs| !vs.is_empty() && vs.bytes().all(|b| b == b'v'))
}

fn parse_timeout(value: &str) -> Result<Duration, ArgsError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|secs| *secs > 0.0)
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| ArgsError::InvalidTimeout { value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch_args(args: &[&str]) -> FetchArgs {
        match parse_args(args.iter().copied()).unwrap() {
            Command::Fetch(fetch_args) => fetch_args,
            Command::Usage => panic!("expect fetch command for {args:?}"),
        }
    }

    #[test]
    fn no_arguments_is_usage() {
        assert_eq!(parse_args(Vec::<String>::new()), Ok(Command::Usage));
        assert_eq!(parse_args(["-v"]), Ok(Command::Usage));
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse_args(["http://example.org", "--help"]), Ok(Command::Usage));
        assert_eq!(parse_args(["-h"]), Ok(Command::Usage));
    }

    #[test]
    fn url_only() {
        let args = fetch_args(&["https://example.org/index.html"]);

        assert_eq!(args.url, "https://example.org/index.html");
        assert_eq!(args.trust_store, TrustStore::Platform);
        assert_eq!(args.timeout, None);
        assert_eq!(args.verbosity, 0);
    }

    #[test]
    fn options_before_and_after_url() {
        let args = fetch_args(&["--ca-file", "/etc/roots.pem", "http://example.org", "--timeout", "2.5", "-vv"]);

        assert_eq!(args.trust_store, TrustStore::PemFile(PathBuf::from("/etc/roots.pem")));
        assert_eq!(args.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(args.verbosity, 2);
    }

    #[test]
    fn verbosity_accumulates() {
        assert_eq!(fetch_args(&["-v", "http://a", "-vv"]).verbosity, 3);
        assert_eq!(fetch_args(&["--mozilla-roots", "http://a"]).trust_store, TrustStore::Mozilla);
    }

    #[test]
    fn reject_bad_arguments() {
        assert_eq!(parse_args(["--insecure", "http://a"]), Err(ArgsError::UnknownFlag { flag: "--insecure".to_string() }));
        assert_eq!(parse_args(["-vx"]), Err(ArgsError::UnknownFlag { flag: "-vx".to_string() }));
        assert_eq!(parse_args(["http://a", "--timeout"]), Err(ArgsError::MissingValue { flag: "--timeout" }));
        assert_eq!(parse_args(["--ca-file"]), Err(ArgsError::MissingValue { flag: "--ca-file" }));
        assert_eq!(parse_args(["http://a", "http://b"]), Err(ArgsError::UnexpectedArgument { argument: "http://b".to_string() }));

        for value in ["0", "-1", "soon", "NaN", "inf"] {
            assert_eq!(
                parse_args(["http://a", "--timeout", value]),
                Err(ArgsError::InvalidTimeout { value: value.to_string() }),
                "timeout {value}"
            );
        }
    }

    #[test]
    fn help_starts_with_usage() {
        assert!(HELP.starts_with(USAGE));
    }
}
