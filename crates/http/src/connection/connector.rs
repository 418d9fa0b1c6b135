//! Opening the byte stream a fetch talks over.
//!
//! For `http` this is a plain TCP connection, for `https` the TCP connection is
//! wrapped in a TLS session that verifies the server certificate chain and the
//! host name. Both are exposed as [`MaybeTlsStream`], so the rest of a fetch
//! doesn't care which scheme is in use.

use std::fmt;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::{TcpStream, lookup_host};
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::ClientConfig;
use tokio_rustls::rustls::pki_types::ServerName;
use tracing::{debug, info};

use crate::connection::tls::{TrustStore, client_config};
use crate::protocol::FetchError;
use crate::url::{Scheme, Url};

/// Opens a connection to the host named by a url.
///
/// [`Connect`] is the `Send` variant used by [`Client`](crate::client::Client);
/// implement it and `LocalConnect` comes for free.
#[trait_variant::make(Connect: Send)]
pub trait LocalConnect {
    type Io: AsyncRead + AsyncWrite + Unpin + Send;

    async fn connect(&self, url: &Url) -> Result<Self::Io, FetchError>;
}

/// Connects over TCP, adding TLS for `https`.
#[derive(Clone)]
pub struct TcpConnector {
    tls: TlsConnector,
}

impl TcpConnector {
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self { tls: TlsConnector::from(config) }
    }

    /// Builds a connector trusting the given root certificates.
    ///
    /// # Errors
    ///
    /// Fails if the trust store can't be loaded.
    pub fn with_trust_store(trust_store: &TrustStore) -> Result<Self, FetchError> {
        Ok(Self::new(client_config(trust_store)?))
    }
}

impl fmt::Debug for TcpConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TcpConnector").finish_non_exhaustive()
    }
}

impl Connect for TcpConnector {
    type Io = MaybeTlsStream;

    async fn connect(&self, url: &Url) -> Result<Self::Io, FetchError> {
        let host = url.host();
        let tcp_stream = connect_tcp(host, url.port()).await?;

        match url.scheme() {
            Scheme::Http => Ok(MaybeTlsStream::Plain(tcp_stream)),
            Scheme::Https => {
                // the name is sent as SNI and checked against the certificate
                let server_name = ServerName::try_from(host.to_owned())
                    .map_err(|e| FetchError::tls_handshake(host, io::Error::new(io::ErrorKind::InvalidInput, e)))?;

                let tls_stream =
                    self.tls.connect(server_name, tcp_stream).await.map_err(|e| FetchError::tls_handshake(host, e))?;
                info!(host, "tls handshake finished");
                Ok(MaybeTlsStream::Tls(Box::new(tls_stream)))
            }
        }
    }
}

/// Resolves the host and tries every address in order until one accepts.
async fn connect_tcp(host: &str, port: u16) -> Result<TcpStream, FetchError> {
    let addrs: Vec<_> = lookup_host((host, port)).await.map_err(|e| FetchError::resolution(host, e))?.collect();
    if addrs.is_empty() {
        return Err(FetchError::resolution(host, io::Error::new(io::ErrorKind::NotFound, "no address found")));
    }

    let mut last_error = None;
    for addr in addrs {
        match TcpStream::connect(addr).await {
            Ok(tcp_stream) => {
                info!(host, %addr, "connected");
                return Ok(tcp_stream);
            }
            Err(e) => {
                debug!(host, %addr, cause = %e, "can't connect, try next address");
                last_error = Some(e);
            }
        }
    }

    let source = last_error.unwrap_or_else(|| io::Error::from(io::ErrorKind::NotConnected));
    Err(FetchError::connect(host, source))
}

/// A TCP stream, optionally wrapped in a TLS session.
#[derive(Debug)]
pub enum MaybeTlsStream {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl AsyncRead for MaybeTlsStream {
    fn poll_read(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            MaybeTlsStream::Plain(tcp_stream) => Pin::new(tcp_stream).poll_read(cx, buf),
            MaybeTlsStream::Tls(tls_stream) => match Pin::new(tls_stream.as_mut()).poll_read(cx, buf) {
                // many servers close the socket without close_notify, read it as end-of-stream
                // and let the decoder decide whether the body is complete
                Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    debug!("peer closed tls session without close_notify");
                    Poll::Ready(Ok(()))
                }
                poll => poll,
            },
        }
    }
}

impl AsyncWrite for MaybeTlsStream {
    fn poll_write(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            MaybeTlsStream::Plain(tcp_stream) => Pin::new(tcp_stream).poll_write(cx, buf),
            MaybeTlsStream::Tls(tls_stream) => Pin::new(tls_stream.as_mut()).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            MaybeTlsStream::Plain(tcp_stream) => Pin::new(tcp_stream).poll_flush(cx),
            MaybeTlsStream::Tls(tls_stream) => Pin::new(tls_stream.as_mut()).poll_flush(cx),
        }
    }

    /// For TLS this sends close_notify before shutting the socket down.
    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            MaybeTlsStream::Plain(tcp_stream) => Pin::new(tcp_stream).poll_shutdown(cx),
            MaybeTlsStream::Tls(tls_stream) => Pin::new(tls_stream.as_mut()).poll_shutdown(cx),
        }
    }
}
