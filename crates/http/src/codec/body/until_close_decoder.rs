//! Decoder implementation for HTTP/1.0 bodies delimited by connection close.
//!
//! Without a Content-Length header the server signals the end of the body by
//! closing the connection, see
//! [RFC 1945 Section 7.2.2](https://www.rfc-editor.org/rfc/rfc1945#section-7.2.2).

use crate::protocol::{ParseError, PayloadItem};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// A decoder that hands out everything buffered and only finishes at end-of-stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UntilCloseDecoder;

impl Decoder for UntilCloseDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        Ok(Some(PayloadItem::Chunk(src.split().freeze())))
    }

    /// End-of-stream is the legitimate end of the body.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(item) => Ok(Some(item)),
            None => Ok(Some(PayloadItem::Eof)),
        }
    }
}
