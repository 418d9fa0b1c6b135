//! HTTP header decoder implementation for parsing HTTP response headers
//!
//! This module turns the raw bytes at the start of a response into a
//! [`ResponseHead`] and decides how the body that follows is framed.
//!
//! # Features
//!
//! - Incremental: bytes can arrive in arbitrary fragments, the terminator search
//!   resumes where the previous call stopped
//! - Tolerant header lines: lines without `:` are skipped, names are lower-cased
//!   and values trimmed
//! - Fails fast on non-2xx statuses and on transfer or content encodings
//!
//! # Limits
//!
//! - Maximum header size: 64KB
//!
//! # Implementation Details
//!
//! The decoder works in multiple stages:
//!
//! 1. Search the buffer for the `\r\n\r\n` terminator
//! 2. Split the header block off the buffer, leaving any body bytes behind
//! 3. Parse and check the status line
//! 4. Parse header lines into a [`HeaderMap`]
//! 5. Reject unsupported encodings and determine the [`PayloadSize`]

use bytes::BytesMut;
use http::header::CONTENT_LENGTH;
use tokio_util::codec::Decoder;
use tracing::{debug, trace};

use crate::ensure;
use crate::protocol::{HeaderMap, ParseError, PayloadSize, ResponseHead, StatusLine};

/// Maximum size in bytes allowed for the entire header section
const MAX_HEADER_BYTES: usize = 64 * 1024;

/// Blank line separating the header block from the body
const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Headers announcing a body encoding this crate can't decode
const UNSUPPORTED_ENCODINGS: [&str; 2] = ["transfer-encoding", "content-encoding"];

/// Decoder for HTTP response headers implementing the [`Decoder`] trait.
///
/// This decoder parses raw bytes into a [`ResponseHead`] and determines the
/// [`PayloadSize`] from the Content-Length header.
#[derive(Debug, Default)]
pub struct HeaderDecoder {
    /// Number of leading buffer bytes already known not to start the terminator
    scanned: usize,
}

impl HeaderDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_terminator(&mut self, src: &[u8]) -> Option<usize> {
        let start = self.scanned.min(src.len());
        match src[start..].windows(HEADER_TERMINATOR.len()).position(|window| window == HEADER_TERMINATOR) {
            Some(offset) => {
                self.scanned = 0;
                Some(start + offset)
            }
            None => {
                // the last bytes may be the beginning of a split terminator
                self.scanned = src.len().saturating_sub(HEADER_TERMINATOR.len() - 1);
                None
            }
        }
    }
}

impl Decoder for HeaderDecoder {
    type Item = (ResponseHead, PayloadSize);
    type Error = ParseError;

    /// Attempts to decode HTTP response headers from the provided bytes buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some((head, payload_size)))` if the header block was complete; the
    ///   header block is consumed from `src`, body bytes stay in it
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if parsing failed
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The header block exceeds `MAX_HEADER_BYTES`
    /// - The status line is malformed or not 2xx
    /// - Transfer-Encoding or Content-Encoding is present
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(header_len) = self.find_terminator(src) else {
            ensure!(src.len() <= MAX_HEADER_BYTES, ParseError::too_large_header(src.len(), MAX_HEADER_BYTES));
            return Ok(None);
        };
        ensure!(header_len <= MAX_HEADER_BYTES, ParseError::too_large_header(header_len, MAX_HEADER_BYTES));

        let header_bytes = src.split_to(header_len + HEADER_TERMINATOR.len());
        trace!(header_size = header_len, body_size = src.len(), "found end of header block");

        let header_block = String::from_utf8_lossy(&header_bytes[..header_len]);
        let mut lines = header_block.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

        let status_line = StatusLine::parse(lines.next().unwrap_or_default())?;
        ensure!(status_line.is_success(), ParseError::http_error_status(&status_line));

        let mut headers = HeaderMap::new();
        for line in lines {
            match line.split_once(':') {
                Some((name, value)) => {
                    if let Some(previous) = headers.insert(name, value) {
                        debug!(header = name, previous = %previous, "duplicate header, keep the last value");
                    }
                }
                None => trace!(line, "skip header line without colon"),
            }
        }

        reject_encodings(&headers)?;
        let payload_size = parse_payload(&headers);

        Ok(Some((ResponseHead::new(status_line, headers), payload_size)))
    }
}

/// Fails if the body is transfer-encoded or compressed, neither can be decoded here.
fn reject_encodings(headers: &HeaderMap) -> Result<(), ParseError> {
    for name in UNSUPPORTED_ENCODINGS {
        if let Some(value) = headers.get(name) {
            return Err(ParseError::unsupported_encoding(name, value));
        }
    }
    Ok(())
}

/// Determines body framing from the Content-Length header.
///
/// A missing or unparsable value falls back to reading until the connection closes.
fn parse_payload(headers: &HeaderMap) -> PayloadSize {
    let Some(value) = headers.get(CONTENT_LENGTH) else {
        return PayloadSize::Unbounded;
    };

    match value.parse::<u64>() {
        Ok(length) => PayloadSize::Fixed(length),
        Err(e) => {
            debug!(content_length = value, cause = %e, "ignore invalid content-length, read until close");
            PayloadSize::Unbounded
        }
    }
}
