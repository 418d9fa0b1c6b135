//! Decoder implementation for HTTP response payloads.
//!
//! This module provides a unified decoder for the two body framings a HTTP/1.0
//! response can use:
//! - Content-Length based payloads
//! - Payloads running until the server closes the connection

use crate::codec::body::length_decoder::LengthDecoder;
use crate::codec::body::until_close_decoder::UntilCloseDecoder;
use crate::protocol::{ParseError, PayloadItem, PayloadSize};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// A unified decoder for handling HTTP response payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadDecoder {
    /// The specific decoding strategy to use
    kind: Kind,
}

/// Enum representing different payload decoding strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    /// Decode payload with a fixed content length
    Length(LengthDecoder),

    /// Decode payload until end-of-stream
    UntilClose(UntilCloseDecoder),
}

impl PayloadDecoder {
    /// Creates a PayloadDecoder for a body delimited by connection close.
    pub fn until_close() -> Self {
        Self { kind: Kind::UntilClose(UntilCloseDecoder) }
    }

    /// Creates a PayloadDecoder for a fixed-length payload.
    ///
    /// # Arguments
    /// * `size` - The expected content length in bytes
    pub fn fix_length(size: u64) -> Self {
        Self { kind: Kind::Length(LengthDecoder::new(size)) }
    }

    /// The framing still ahead: for fixed-length payloads the outstanding byte count.
    pub fn payload_size(&self) -> PayloadSize {
        match &self.kind {
            Kind::Length(length_decoder) => PayloadSize::Fixed(length_decoder.remaining()),
            Kind::UntilClose(_) => PayloadSize::Unbounded,
        }
    }
}

impl From<PayloadSize> for PayloadDecoder {
    fn from(payload_size: PayloadSize) -> Self {
        match payload_size {
            PayloadSize::Fixed(size) => PayloadDecoder::fix_length(size),
            PayloadSize::Unbounded => PayloadDecoder::until_close(),
        }
    }
}

/// Delegates to the appropriate decoder based on the payload type.
impl Decoder for PayloadDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match &mut self.kind {
            Kind::Length(length_decoder) => length_decoder.decode(src),
            Kind::UntilClose(until_close_decoder) => until_close_decoder.decode(src),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match &mut self.kind {
            Kind::Length(length_decoder) => length_decoder.decode_eof(src),
            Kind::UntilClose(until_close_decoder) => until_close_decoder.decode_eof(src),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_payload_size() {
        let mut decoder = PayloadDecoder::from(PayloadSize::Fixed(4));
        assert_eq!(decoder.payload_size(), PayloadSize::Fixed(4));

        let mut buffer = BytesMut::from(&b"ab"[..]);
        decoder.decode(&mut buffer).unwrap();
        assert_eq!(decoder.payload_size(), PayloadSize::Fixed(2));

        assert_eq!(PayloadDecoder::from(PayloadSize::Unbounded).payload_size(), PayloadSize::Unbounded);
    }
}
