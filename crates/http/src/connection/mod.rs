//! Connection handling module
//!
//! This module opens the transport for a fetch and drives one request/response
//! exchange over it.
//!
//! # Components
//!
//! - [`Connect`] and [`TcpConnector`]: resolve the host, connect over TCP and
//!   negotiate TLS for `https`
//! - [`TrustStore`]: where the root certificates for TLS verification come from
//! - [`ClientConnection`]: writes the request and runs the response read loop
//!   over any `AsyncRead`/`AsyncWrite` pair
//!
//! # Features
//!
//! - Every resolved address is tried in order
//! - Certificate chain and host name verification, with SNI
//! - Reads stop as soon as a fixed-length body is complete
//! - close_notify is sent after a successful read

mod client_connection;
mod connector;
mod tls;

pub use client_connection::{ClientConnection, READ_CHUNK_SIZE};
pub use connector::{Connect, LocalConnect, MaybeTlsStream, TcpConnector};
pub use tls::{TrustStore, client_config};

#[cfg(test)]
pub(crate) use client_connection::mock::MockIo;
