//! An asynchronous one-shot HTTP/1.0 fetcher
//!
//! This crate fetches a single resource over `http` or `https` and hands back the
//! status line, the headers and the complete body. It is built on top of tokio;
//! the response is parsed incrementally, so it may arrive in fragments of any size.
//!
//! # Features
//!
//! - One `GET` request per fetch, `Connection: close`
//! - Incremental response decoding with an explicit parse state
//! - Content-Length framed and close-delimited bodies
//! - TLS through rustls with certificate and host name verification
//! - Configurable trust store and an optional overall timeout
//! - Typed errors: a failed fetch is never an empty body
//!
//! # Example
//!
//! ```no_run
//! use micro_fetch::client::Client;
//! use micro_fetch::render::render;
//! use tracing::{Level, error};
//! use tracing_subscriber::FmtSubscriber;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).with_writer(std::io::stderr).finish();
//!     tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
//!
//!     let client = Client::new().expect("trust store should load");
//!     match client.fetch("https://example.org/").await {
//!         Ok(response) => render(response.body(), std::io::stdout().lock()).expect("stdout is writable"),
//!         Err(e) => error!(cause = %e, "fetch failed"),
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`url`]: Splits a url into scheme, host and path
//! - [`connection`]: Opens the transport and runs the request/response exchange
//! - [`codec`]: The request encoder and the incremental response decoder
//! - [`protocol`]: Response types, the header map and the error types
//! - [`client`]: The fetch entry point and its configuration
//! - [`render`]: Strips markup from a body for display
//!
//! # Core Components
//!
//! ## Response Decoding
//!
//! [`codec::ResponseDecoder`] is a `tokio_util` decoder with no I/O of its own. It
//! moves through [`protocol::ParseState`]: awaiting headers, streaming the body,
//! complete. A fixed-length body completes as soon as the declared number of
//! bytes arrived, without waiting for the server to close the connection. A body
//! without Content-Length ends when the stream ends.
//!
//! ## Headers
//!
//! [`protocol::HeaderMap`] stores lower-cased names and trimmed values. A repeated
//! header keeps its last value. The status line and the body can be stored in the
//! same map under reserved keys, see [`protocol::STATUS_KEY`] and
//! [`protocol::CONTENT_KEY`].
//!
//! ## Error Handling
//!
//! - [`protocol::FetchError`]: Top-level error type
//! - [`protocol::ParseError`]: Response parsing errors
//! - [`protocol::UrlError`]: Url decomposition errors
//!
//! # Limitations
//!
//! - No chunked transfer encoding and no compression, such responses are rejected
//! - No redirects, no keep-alive, no connection reuse
//! - Only 2xx responses are accepted
//! - The port is always the scheme's default port
//! - Maximum header size: 64KB

pub mod client;
pub mod codec;
pub mod connection;
pub mod protocol;
pub mod render;
pub mod url;

mod utils;
pub(crate) use utils::ensure;
