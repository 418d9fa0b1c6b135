//! HTTP body handling module for decoding response payloads
//!
//! # Components
//!
//! - [`LengthDecoder`]: Processes fixed-length payloads
//! - [`UntilCloseDecoder`]: Processes payloads that end when the connection closes
//! - [`PayloadDecoder`]: Main decoder that picks a strategy from the [`PayloadSize`]
//!
//! # Features
//!
//! - Content-Length based payload handling, ignoring bytes past the declared length
//! - Close-delimited payloads as used by HTTP/1.0 servers
//! - End-of-stream handling through `Decoder::decode_eof`
//! - Efficient memory usage through BytesMut
//!
//! [`PayloadSize`]: crate::protocol::PayloadSize

mod length_decoder;
mod payload_decoder;
mod until_close_decoder;

pub use payload_decoder::PayloadDecoder;
