//! Core HTTP protocol types for a single fetch.
//!
//! # Architecture
//!
//! - **Message Handling** ([`message`]): what the response decoder yields
//!   - [`Message`]: Represents either the response head or a payload chunk
//!   - [`PayloadItem`]: A body chunk or the end-of-body marker
//!   - [`PayloadSize`]: Fixed (`Content-Length`) or unbounded (until close) framing
//!   - [`ParseState`]: Progress of a response decoder
//!
//! - **Headers** ([`header`]): [`HeaderMap`], lower-cased names, trimmed values, last write wins
//!
//! - **Request** ([`request`]): [`RequestHead`], the one `GET` this crate sends
//!
//! - **Response** ([`response`]): [`StatusLine`], [`ResponseHead`] and the assembled [`Response`]
//!
//! - **Error Handling** ([`error`]):
//!   - [`FetchError`]: Top-level error type
//!   - [`ParseError`]: Response decoding errors
//!   - [`UrlError`]: Url decomposition errors

mod message;
pub use message::Message;
pub use message::ParseState;
pub use message::PayloadItem;
pub use message::PayloadSize;

mod header;
pub use header::CONTENT_KEY;
pub use header::HeaderMap;
pub use header::STATUS_KEY;

mod request;
pub use request::RequestHead;

mod response;
pub use response::Response;
pub use response::ResponseHead;
pub use response::StatusLine;

mod error;
pub use error::FetchError;
pub use error::ParseError;
pub use error::UrlError;
