//! Serializes the single request shape this crate sends.
//!
//! The request is always `GET <path> HTTP/1.0` with a `Host` header, asks for
//! an unencoded body and tells the server to close the connection when done,
//! so the response body is either Content-Length framed or close-delimited.

use crate::protocol::RequestHead;
use bytes::{BufMut, BytesMut};
use std::io;
use tokio_util::codec::Encoder;

/// Initial buffer size reserved for the request head
const INIT_REQUEST_SIZE: usize = 256;

#[derive(Debug, Default)]
pub struct RequestEncoder;

impl RequestEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder<RequestHead> for RequestEncoder {
    type Error = io::Error;

    fn encode(&mut self, head: RequestHead, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(INIT_REQUEST_SIZE);

        dst.put_slice(b"GET ");
        dst.put_slice(head.path().as_bytes());
        dst.put_slice(b" HTTP/1.0\r\n");

        put_header(dst, "Host", head.host());
        put_header(dst, "Accept-Encoding", "identity");
        put_header(dst, "Connection", "close");
        if let Some(user_agent) = head.user_agent() {
            put_header(dst, "User-Agent", user_agent);
        }

        dst.put_slice(b"\r\n");
        Ok(())
    }
}

fn put_header(dst: &mut BytesMut, name: &str, value: &str) {
    dst.put_slice(name.as_bytes());
    dst.put_slice(b": ");
    dst.put_slice(value.as_bytes());
    dst.put_slice(b"\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::Url;

    #[test]
    fn encode_get_request() {
        let url = Url::parse("http://example.org/index.html").unwrap();
        let mut buffer = BytesMut::new();

        RequestEncoder::new().encode(RequestHead::get(&url), &mut buffer).unwrap();

        assert_eq!(
            &buffer[..],
            &b"GET /index.html HTTP/1.0\r\nHost: example.org\r\nAccept-Encoding: identity\r\nConnection: close\r\n\r\n"[..]
        );
    }

    #[test]
    fn encode_user_agent() {
        let url = Url::parse("https://example.org").unwrap();
        let head = RequestHead::get(&url).with_user_agent("micro-fetch/0.1.0");
        let mut buffer = BytesMut::new();

        RequestEncoder::new().encode(head, &mut buffer).unwrap();

        let request = std::str::from_utf8(&buffer).unwrap();
        assert!(request.starts_with("GET / HTTP/1.0\r\nHost: example.org\r\n"));
        assert!(request.ends_with("User-Agent: micro-fetch/0.1.0\r\n\r\n"));
    }
}
