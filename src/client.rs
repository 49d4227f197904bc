//! High-level client — `EthrDidClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the connection lifecycle, and the
//! `send_request` primitive every operation is built on.

use crate::domain::attribute::client::Attributes;
use crate::domain::document::client::Documents;
use crate::domain::owner::client::Owners;
use crate::error::{SdkError, WsError};
use crate::ws::native::WsConnection;
use crate::ws::{ConnectionState, Method, RpcRequest, RpcResponse, WsConfig};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::Mutex;

// Re-export sub-client types for convenience.
pub use crate::domain::attribute::client::Attributes as AttributesClient;
pub use crate::domain::document::client::Documents as DocumentsClient;
pub use crate::domain::owner::client::Owners as OwnersClient;

/// The primary entry point: one WebSocket connection to a DID registry service.
///
/// The connection sits behind an async mutex and every request/response pair
/// runs while holding it, so a shared client never interleaves replies.
///
/// ```rust,ignore
/// let client = EthrDidClient::builder().port(8080).build();
/// client.connect().await?;
///
/// let did = client.documents().get_did_by_address(wallet.address(), "polygon").await?;
/// client.owners().change_owner(&did, &wallet, &new_owner).await?;
///
/// client.disconnect().await?;
/// ```
pub struct EthrDidClient {
    config: WsConfig,
    connection: Mutex<Option<WsConnection>>,
}

impl EthrDidClient {
    pub fn builder() -> EthrDidClientBuilder {
        EthrDidClientBuilder::default()
    }

    /// Client for `<host>:<port>`, e.g. `EthrDidClient::new("ws://localhost", 8080)`.
    pub fn new(host: &str, port: u16) -> Self {
        Self::builder().host(host).port(port).build()
    }

    pub fn with_config(config: WsConfig) -> Self {
        Self {
            config,
            connection: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &WsConfig {
        &self.config
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn documents(&self) -> Documents<'_> {
        Documents { client: self }
    }

    pub fn owners(&self) -> Owners<'_> {
        Owners { client: self }
    }

    pub fn attributes(&self) -> Attributes<'_> {
        Attributes { client: self }
    }

    // ── Connection lifecycle ─────────────────────────────────────────────

    /// Open the connection. A no-op when already connected.
    pub async fn connect(&self) -> Result<(), SdkError> {
        let mut slot = self.connection.lock().await;
        if slot.is_some() {
            tracing::debug!("Already connected to {}", self.config.url);
            return Ok(());
        }

        *slot = Some(WsConnection::open(&self.config).await?);
        Ok(())
    }

    /// Close the connection. Safe to call at any time, any number of times.
    pub async fn disconnect(&self) -> Result<(), SdkError> {
        let connection = self.connection.lock().await.take();
        if let Some(connection) = connection {
            connection.close().await;
        }
        Ok(())
    }

    pub async fn connection_state(&self) -> ConnectionState {
        if self.connection.lock().await.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Unconnected
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.connection_state().await == ConnectionState::Connected
    }

    // ── Request primitive ────────────────────────────────────────────────

    /// Send `{method, args}` and return the whole reply envelope.
    ///
    /// Fails with `WsError::NotConnected` before any I/O if there is no
    /// connection. The connection is taken out of its slot for the exchange
    /// and put back only once the reply has been read. A transport failure,
    /// unexpected frame, timeout, or the caller dropping this future midway
    /// therefore leaves the client `Unconnected`: a reply that arrives late
    /// would otherwise be matched to the next request.
    pub async fn send_request(
        &self,
        method: impl AsRef<str>,
        args: impl Serialize,
    ) -> Result<RpcResponse, SdkError> {
        let method = method.as_ref();
        let mut slot = self.connection.lock().await;
        if slot.is_none() {
            return Err(WsError::NotConnected.into());
        }

        let request = RpcRequest::new(method, args)?;
        let payload = serde_json::to_string(&request)?;

        let Some(mut connection) = slot.take() else {
            return Err(WsError::NotConnected.into());
        };
        tracing::debug!("→ {} {}", method, request.args);

        let exchange = connection.round_trip(payload);
        let outcome = match self.config.request_timeout() {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .unwrap_or(Err(WsError::Timeout)),
            None => exchange.await,
        };

        let text = match outcome {
            Ok(text) => {
                *slot = Some(connection);
                text
            }
            Err(e) => {
                tracing::warn!(
                    "{} to {} failed, dropping connection: {}",
                    method,
                    connection.url(),
                    e
                );
                return Err(e.into());
            }
        };
        drop(slot);

        tracing::debug!("← {} {}", method, text);
        serde_json::from_str(&text)
            .map_err(|e| SdkError::Protocol(format!("invalid response envelope: {}", e)))
    }

    /// Fail with `WsError::NotConnected` unless a connection is open.
    pub(crate) async fn ensure_connected(&self) -> Result<(), SdkError> {
        if self.connection.lock().await.is_some() {
            Ok(())
        } else {
            Err(WsError::NotConnected.into())
        }
    }

    /// Send a request and decode its `result` into `T`.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        args: impl Serialize,
    ) -> Result<T, SdkError> {
        let result = self.send_request(method, args).await?.into_result()?;
        serde_json::from_value(result)
            .map_err(|e| SdkError::Protocol(format!("unexpected `{}` result: {}", method, e)))
    }
}

impl Default for EthrDidClient {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl std::fmt::Debug for EthrDidClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EthrDidClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct EthrDidClientBuilder {
    host: String,
    port: u16,
    url: Option<String>,
    connect_timeout: Duration,
    request_timeout: Option<Duration>,
}

impl Default for EthrDidClientBuilder {
    fn default() -> Self {
        let defaults = WsConfig::default();
        Self {
            host: crate::network::DEFAULT_HOST.to_string(),
            port: crate::network::DEFAULT_PORT,
            url: None,
            connect_timeout: defaults.connect_timeout(),
            request_timeout: defaults.request_timeout(),
        }
    }
}

impl EthrDidClientBuilder {
    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Use a full endpoint URL instead of host + port.
    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Bound each request/response exchange. Unbounded by default.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> EthrDidClient {
        let url = self
            .url
            .unwrap_or_else(|| crate::network::endpoint_url(&self.host, self.port));

        EthrDidClient::with_config(WsConfig {
            url,
            connect_timeout_ms: self.connect_timeout.as_millis() as u64,
            request_timeout_ms: self.request_timeout.map(|t| t.as_millis() as u64),
        })
    }
}
