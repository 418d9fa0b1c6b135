//! HTTP codec module for encoding requests and decoding responses
//!
//! This module provides the wire format of a fetch: one request head goes out,
//! one response comes back as a head followed by body chunks. Decoding is driven
//! by a state machine so the response can arrive in fragments of any size.
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`RequestEncoder`]: Serializes the `GET` request head
//!
//! - Response handling:
//!   - [`ResponseDecoder`]: Decodes the status line, headers and body
//!   - Header parsing via the `header` module
//!   - Payload decoding via the `body` module
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use micro_fetch::codec::{RequestEncoder, ResponseDecoder};
//! use micro_fetch::protocol::RequestHead;
//! use micro_fetch::url::Url;
//! use tokio_util::codec::{Decoder, Encoder};
//!
//! let url = Url::parse("http://example.org/").unwrap();
//! let mut request_buffer = BytesMut::new();
//! RequestEncoder::new().encode(RequestHead::get(&url), &mut request_buffer).unwrap();
//!
//! let mut decoder = ResponseDecoder::new();
//! let mut response_buffer = BytesMut::from(&b"HTTP/1.0 200 OK\r\n\r\n"[..]);
//! let head = decoder.decode(&mut response_buffer).unwrap();
//! assert!(head.is_some());
//! ```
//!
//! # Features
//!
//! - Content-Length based payload handling
//! - Close-delimited payloads
//! - Tolerant header parsing
//! - State machine based processing

mod body;
mod header;
mod request_encoder;
mod response_decoder;

pub use body::PayloadDecoder;
pub use header::HeaderDecoder;
pub use request_encoder::RequestEncoder;
pub use response_decoder::ResponseDecoder;
