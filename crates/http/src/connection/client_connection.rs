use bytes::BytesMut;
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, trace};

use crate::codec::{RequestEncoder, ResponseDecoder};
use crate::protocol::{FetchError, Message, ParseError, ParseState, PayloadItem, PayloadSize, RequestHead, Response};

/// Size of each read from the transport
pub const READ_CHUNK_SIZE: usize = 1024;

/// A single request/response exchange over an already opened stream
///
/// The connection writes one request, then reads until the response decoder
/// reports the body complete. Any read or decode error ends the exchange; the
/// partially read body is dropped.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct ClientConnection<R, W> {
    framed_read: FramedRead<R, ResponseDecoder>,
    framed_write: FramedWrite<W, RequestEncoder>,
}

impl<R, W> ClientConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, ResponseDecoder::new(), READ_CHUNK_SIZE),
            framed_write: FramedWrite::new(writer, RequestEncoder::new()),
        }
    }

    /// Sends the request and reads the full response.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the stream fails and
    /// [`FetchError::Response`] if the response is rejected.
    pub async fn process(mut self, request: RequestHead) -> Result<Response, FetchError> {
        self.framed_write.send(request).await?;
        trace!("request sent");

        let response = self.read_response().await?;

        // the body is complete, a failing shutdown can't change the result anymore
        if let Err(e) = self.framed_write.get_mut().shutdown().await {
            debug!(cause = %e, "shutdown connection failed");
        }

        Ok(response)
    }

    async fn read_response(&mut self) -> Result<Response, FetchError> {
        let mut head = None;
        let mut body = BytesMut::new();

        while let Some(message) = self.framed_read.next().await {
            match message? {
                Message::Header(response_head) => {
                    info!(status_line = response_head.status_line().as_str(), "received response head");
                    head = Some(response_head);
                }
                Message::Payload(PayloadItem::Chunk(bytes)) => {
                    trace!(size = bytes.len(), "received body chunk");
                    body.extend_from_slice(&bytes);
                }
                Message::Payload(PayloadItem::Eof) => {
                    debug!(body_size = body.len(), "received response body");
                    let head = head.ok_or_else(|| ParseError::truncated_headers(0))?;
                    return Ok(head.body(body.freeze()));
                }
            }
        }

        // the decoder reports end-of-stream itself, the stream only ends early if it was cut off
        let error = match self.framed_read.decoder().state() {
            ParseState::AwaitingHeaders => ParseError::truncated_headers(self.framed_read.read_buffer().len()),
            ParseState::StreamingBody(PayloadSize::Fixed(remaining)) => ParseError::truncated_body(remaining),
            ParseState::StreamingBody(PayloadSize::Unbounded) | ParseState::Complete => ParseError::truncated_body(0),
        };
        Err(error.into())
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! A scripted transport for driving a connection without sockets.

    use std::collections::VecDeque;
    use std::io;
    use std::pin::Pin;
    use std::sync::{Arc, Mutex};
    use std::task::{Context, Poll};

    use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

    #[derive(Debug, Default)]
    struct Recorded {
        written: Vec<u8>,
        shutdown: bool,
        reads: usize,
    }

    /// Hands out one scripted chunk per read, then end-of-stream, an error or nothing at all.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct MockIo {
        chunks: VecDeque<Vec<u8>>,
        error: Option<io::ErrorKind>,
        pending_when_exhausted: bool,
        recorded: Arc<Mutex<Recorded>>,
    }

    impl MockIo {
        pub(crate) fn new<I, C>(chunks: I) -> Self
        where
            I: IntoIterator<Item = C>,
            C: AsRef<[u8]>,
        {
            Self { chunks: chunks.into_iter().map(|chunk| chunk.as_ref().to_vec()).collect(), ..Default::default() }
        }

        /// Fails the read after the scripted chunks instead of signalling end-of-stream.
        pub(crate) fn fail_with(mut self, kind: io::ErrorKind) -> Self {
            self.error = Some(kind);
            self
        }

        /// Never completes a read after the scripted chunks, like a server keeping the socket open.
        pub(crate) fn pending_when_exhausted(mut self) -> Self {
            self.pending_when_exhausted = true;
            self
        }

        pub(crate) fn written(&self) -> Vec<u8> {
            self.recorded.lock().unwrap().written.clone()
        }

        pub(crate) fn is_shutdown(&self) -> bool {
            self.recorded.lock().unwrap().shutdown
        }

        pub(crate) fn reads(&self) -> usize {
            self.recorded.lock().unwrap().reads
        }
    }

    impl AsyncRead for MockIo {
        fn poll_read(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
            self.recorded.lock().unwrap().reads += 1;

            if let Some(mut chunk) = self.chunks.pop_front() {
                let len = chunk.len().min(buf.remaining());
                buf.put_slice(&chunk[..len]);
                if len < chunk.len() {
                    chunk.drain(..len);
                    self.chunks.push_front(chunk);
                }
                return Poll::Ready(Ok(()));
            }

            if let Some(kind) = self.error {
                return Poll::Ready(Err(io::Error::from(kind)));
            }
            if self.pending_when_exhausted {
                return Poll::Pending;
            }
            Poll::Ready(Ok(()))
        }
    }

    impl AsyncWrite for MockIo {
        fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
            self.recorded.lock().unwrap().written.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            self.recorded.lock().unwrap().shutdown = true;
            Poll::Ready(Ok(()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockIo;
    use super::*;
    use crate::url::Url;
    use http::StatusCode;
    use indoc::indoc;
    use std::io;
    use std::time::Duration;

    fn request() -> RequestHead {
        RequestHead::get(&Url::parse("http://example.org/index.html").unwrap())
    }

    async fn exchange(io: MockIo) -> Result<Response, FetchError> {
        let (reader, writer) = tokio::io::split(io);
        let connection = ClientConnection::new(reader, writer);
        tokio::time::timeout(Duration::from_secs(1), connection.process(request())).await.expect("read loop stalled")
    }

    #[tokio::test]
    async fn fixed_length_response() {
        let io = MockIo::new([&b"HTTP/1.0 200 OK\r\nContent-Length: 26\r\n\r\n<p>Hello <b>World</b></p>\n"[..]]);

        let response = exchange(io.clone()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), &b"<p>Hello <b>World</b></p>\n"[..]);
        assert!(io.written().starts_with(b"GET /index.html HTTP/1.0\r\nHost: example.org\r\n"));
        assert!(io.is_shutdown());
    }

    #[tokio::test]
    async fn stop_reading_after_declared_length() {
        // the server keeps the socket open, reading past the body would hang
        let io = MockIo::new(["HTTP/1.0 200 OK\r\nContent-Length: 5\r\n\r\nhel", "lo"]).pending_when_exhausted();

        let response = exchange(io.clone()).await.unwrap();

        assert_eq!(response.body(), &b"hello"[..]);
        assert_eq!(io.reads(), 2);
    }

    #[tokio::test]
    async fn zero_content_length_needs_no_more_reads() {
        let io = MockIo::new(["HTTP/1.0 204 No Content\r\nContent-Length: 0\r\n\r\n"]).pending_when_exhausted();

        let response = exchange(io.clone()).await.unwrap();

        assert!(response.body().is_empty());
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn close_delimited_response() {
        let response = indoc! {"
            HTTP/1.0 200 OK
            Content-Type: text/html

            <html>
            <body>hi</body>
            </html>"}
        .replace('\n', "\r\n");
        let chunks: Vec<&[u8]> = response.as_bytes().chunks(7).collect();

        let response = exchange(MockIo::new(chunks)).await.unwrap();

        assert_eq!(response.headers().get("content-type"), Some("text/html"));
        assert_eq!(response.body(), &b"<html>\r\n<body>hi</body>\r\n</html>"[..]);
    }

    #[tokio::test]
    async fn large_body_over_many_reads() {
        let body = "x".repeat(5000);
        let response = format!("HTTP/1.0 200 OK\r\nContent-Length: {}\r\n\r\n{body}", body.len());

        let response = exchange(MockIo::new([response])).await.unwrap();

        assert_eq!(response.body().len(), 5000);
    }

    #[tokio::test]
    async fn error_status() {
        let io = MockIo::new(["HTTP/1.0 404 Not Found\r\nContent-Length: 9\r\n\r\nnot found"]);

        let error = exchange(io).await.unwrap_err();

        let parse_error = error.as_parse_error().unwrap();
        assert!(matches!(parse_error, ParseError::HttpErrorStatus { status: StatusCode::NOT_FOUND, .. }));
    }

    #[tokio::test]
    async fn truncated_headers() {
        let error = exchange(MockIo::new(["HTTP/1.0 200 OK\r\nContent-"])).await.unwrap_err();
        assert!(matches!(error.as_parse_error(), Some(ParseError::TruncatedHeaders { .. })));

        let error = exchange(MockIo::new(Vec::<Vec<u8>>::new())).await.unwrap_err();
        assert!(matches!(error.as_parse_error(), Some(ParseError::TruncatedHeaders { buffered: 0 })));
    }

    #[tokio::test]
    async fn truncated_body() {
        let io = MockIo::new(["HTTP/1.0 200 OK\r\nContent-Length: 10\r\n\r\nabc"]);

        let error = exchange(io.clone()).await.unwrap_err();

        assert!(matches!(error.as_parse_error(), Some(ParseError::TruncatedBody { remaining: 7 })));
        assert!(!io.is_shutdown());
    }

    #[tokio::test]
    async fn transport_error_is_not_an_empty_body() {
        let io = MockIo::new(["HTTP/1.0 200 OK\r\n\r\npartial"]).fail_with(io::ErrorKind::ConnectionReset);

        let error = exchange(io).await.unwrap_err();

        match error {
            FetchError::Transport { source } => assert_eq!(source.kind(), io::ErrorKind::ConnectionReset),
            e => panic!("expect transport error, got {e}"),
        }
    }

    #[tokio::test]
    async fn unsupported_encoding() {
        let io = MockIo::new([&b"HTTP/1.0 200 OK\r\nContent-Encoding: gzip\r\n\r\n\x1f\x8b"[..]]);

        let error = exchange(io).await.unwrap_err();

        assert!(matches!(
            error.as_parse_error(),
            Some(ParseError::UnsupportedEncoding { header: "content-encoding", .. })
        ));
    }
}
