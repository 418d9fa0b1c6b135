//! HTTP response decoder module
//!
//! This module turns a byte stream that arrives in arbitrary fragments into a
//! response head followed by body chunks. Fragment boundaries carry no meaning:
//! one read may hold part of the header block, the header block and the start of
//! the body, or only body bytes.
//!
//! # Components
//!
//! - [`ResponseDecoder`]: Main decoder that coordinates header and payload parsing
//! - Header parsing: Uses [`HeaderDecoder`] for the status line and headers
//! - Payload handling: Uses [`PayloadDecoder`] for fixed-length or close-delimited bodies
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use micro_fetch::codec::ResponseDecoder;
//! use micro_fetch::protocol::{Message, ParseState, PayloadItem, PayloadSize};
//! use tokio_util::codec::Decoder;
//!
//! let mut decoder = ResponseDecoder::new();
//! let mut buffer = BytesMut::from(&b"HTTP/1.0 200 OK\r\nContent-Length: 2\r\n\r\nhi"[..]);
//!
//! assert!(matches!(decoder.decode(&mut buffer), Ok(Some(Message::Header(_)))));
//! assert_eq!(decoder.state(), ParseState::StreamingBody(PayloadSize::Fixed(2)));
//! assert!(matches!(decoder.decode(&mut buffer), Ok(Some(Message::Payload(PayloadItem::Chunk(_))))));
//! assert!(matches!(decoder.decode(&mut buffer), Ok(Some(Message::Payload(PayloadItem::Eof)))));
//! assert_eq!(decoder.state(), ParseState::Complete);
//! ```

use crate::codec::body::PayloadDecoder;
use crate::codec::header::HeaderDecoder;
use crate::protocol::{Message, ParseError, ParseState, PayloadItem, ResponseHead};
use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::trace;

/// A decoder for HTTP responses that handles both headers and payload
///
/// The decoder operates in two phases:
/// 1. Header parsing: Decodes the response head using [`HeaderDecoder`]
/// 2. Payload parsing: Decodes the body using [`PayloadDecoder`]
///
/// # State Machine
///
/// The decoder maintains its state through the `payload_decoder` and `complete` fields:
/// - `None`, not complete: Currently parsing headers
/// - `Some(PayloadDecoder)`: Currently parsing payload
/// - `None`, complete: The body ended, further input is ignored
///
/// End-of-stream is handled by [`Decoder::decode_eof`]: it is an error while the
/// header block is incomplete or a fixed-length body is short, and the regular
/// end of a close-delimited body.
#[derive(Debug, Default)]
pub struct ResponseDecoder {
    header_decoder: HeaderDecoder,
    payload_decoder: Option<PayloadDecoder>,
    complete: bool,
}

impl ResponseDecoder {
    /// Creates a new `ResponseDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns where the decoder currently is in the response.
    pub fn state(&self) -> ParseState {
        match &self.payload_decoder {
            Some(payload_decoder) => ParseState::StreamingBody(payload_decoder.payload_size()),
            None if self.complete => ParseState::Complete,
            None => ParseState::AwaitingHeaders,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    fn on_payload_item(&mut self, item: Option<PayloadItem>) -> Option<Message<ResponseHead>> {
        match item {
            Some(item @ PayloadItem::Chunk(_)) => Some(Message::Payload(item)),
            Some(item @ PayloadItem::Eof) => {
                // the body is complete, nothing after it belongs to this response
                self.payload_decoder.take();
                self.complete = true;
                Some(Message::Payload(item))
            }
            None => None,
        }
    }

    fn on_header(&mut self, header: Option<<HeaderDecoder as Decoder>::Item>) -> Option<Message<ResponseHead>> {
        let (head, payload_size) = header?;
        trace!(status = %head.status(), ?payload_size, "decoded response head");
        self.payload_decoder = Some(payload_size.into());
        Some(Message::Header(head))
    }
}

impl Decoder for ResponseDecoder {
    type Item = Message<ResponseHead>;
    type Error = ParseError;

    /// Attempts to decode an HTTP response from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Message::Header(_)))`: Successfully decoded response head
    /// - `Ok(Some(Message::Payload(_)))`: Successfully decoded a payload chunk, or the end of the body
    /// - `Ok(None)`: Need more data to proceed, or the response is already complete
    /// - `Err(_)`: Encountered a parsing error
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.complete {
            return Ok(None);
        }

        // parse payload if have payload_decoder
        if let Some(payload_decoder) = &mut self.payload_decoder {
            let item = payload_decoder.decode(src)?;
            return Ok(self.on_payload_item(item));
        }

        // parse response head
        let header = self.header_decoder.decode(src)?;
        Ok(self.on_header(header))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.complete {
            return Ok(None);
        }

        if let Some(payload_decoder) = &mut self.payload_decoder {
            let item = payload_decoder.decode_eof(src)?;
            return Ok(self.on_payload_item(item));
        }

        match self.header_decoder.decode(src)? {
            Some(header) => Ok(self.on_header(Some(header))),
            None => Err(ParseError::truncated_headers(src.len())),
        }
    }
}
