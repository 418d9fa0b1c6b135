//! The fetch entry point.
//!
//! A [`Client`] decomposes the url, opens a connection through its connector,
//! sends one `GET` request and reads the complete response. Every failure comes
//! back as a [`FetchError`]; a response with an empty body is still `Ok`.

use std::time::Duration;

use tracing::info;

use crate::connection::{ClientConnection, Connect, TcpConnector, TrustStore};
use crate::protocol::{FetchError, RequestHead, Response};
use crate::url::Url;

/// User-Agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = concat!("micro-fetch/", env!("CARGO_PKG_VERSION"));

#[derive(Debug)]
pub struct ClientBuilder {
    trust_store: TrustStore,
    timeout: Option<Duration>,
    user_agent: String,
}

impl ClientBuilder {
    fn new() -> Self {
        Self { trust_store: TrustStore::default(), timeout: None, user_agent: DEFAULT_USER_AGENT.to_string() }
    }

    pub fn trust_store(mut self, trust_store: TrustStore) -> Self {
        self.trust_store = trust_store;
        self
    }

    /// Deadline for a whole fetch: connecting, sending the request and reading the response.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builds a client connecting over TCP.
    ///
    /// # Errors
    ///
    /// Fails if the trust store can't be loaded.
    pub fn build(self) -> Result<Client, FetchError> {
        let connector = TcpConnector::with_trust_store(&self.trust_store)?;
        Ok(self.build_with_connector(connector))
    }

    /// Builds a client on a custom connector, the trust store setting is not used.
    pub fn build_with_connector<C: Connect>(self, connector: C) -> Client<C> {
        Client { connector, timeout: self.timeout, user_agent: self.user_agent }
    }
}

/// Fetches single resources over `http` or `https`.
#[derive(Debug)]
pub struct Client<C = TcpConnector> {
    connector: C,
    timeout: Option<Duration>,
    user_agent: String,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// A client with the platform trust store and no timeout.
    ///
    /// # Errors
    ///
    /// Fails if the trust store can't be loaded.
    pub fn new() -> Result<Self, FetchError> {
        Self::builder().build()
    }
}

impl<C: Connect> Client<C> {
    /// Parses the url and fetches it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] for a malformed url, otherwise whatever
    /// [`Client::get`] returns.
    pub async fn fetch(&self, url: &str) -> Result<Response, FetchError> {
        let url = Url::parse(url)?;
        self.get(&url).await
    }

    /// Fetches the resource, the response status is always 2xx.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if connecting fails, the transport breaks, the
    /// response is rejected or the timeout expires.
    pub async fn get(&self, url: &Url) -> Result<Response, FetchError> {
        match self.timeout {
            Some(after) => tokio::time::timeout(after, self.do_get(url)).await.map_err(|_elapsed| FetchError::TimedOut { after })?,
            None => self.do_get(url).await,
        }
    }

    async fn do_get(&self, url: &Url) -> Result<Response, FetchError> {
        info!(%url, "start fetch");
        let io = self.connector.connect(url).await?;

        let (reader, writer) = tokio::io::split(io);
        let request = RequestHead::get(url).with_user_agent(self.user_agent.as_str());
        let response = ClientConnection::new(reader, writer).process(request).await?;

        info!(%url, status = %response.status(), body_size = response.body().len(), "finished fetch");
        Ok(response)
    }
}
