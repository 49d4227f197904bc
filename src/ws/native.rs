//! Native WebSocket transport — `tokio-tungstenite`.
//!
//! One connection, one request in flight. The client sends a text frame and
//! then reads frames until it sees the reply:
//! - text frame → the reply
//! - ping/pong → skipped (tungstenite answers pings itself)
//! - close, binary, end of stream → `WsError::UnexpectedMessage`
//! - read error → `WsError::Transport`

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::WsError;
use crate::ws::WsConfig;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// An open WebSocket to the registry service.
pub struct WsConnection {
    stream: WsStream,
    url: String,
}

impl WsConnection {
    /// Open a connection, bounded by the configured connect timeout.
    pub async fn open(config: &WsConfig) -> Result<Self, WsError> {
        let (stream, _) = tokio::time::timeout(
            config.connect_timeout(),
            connect_async(config.url.as_str()),
        )
        .await
        .map_err(|_| {
            WsError::ConnectionFailed(format!(
                "timed out after {}ms connecting to {}",
                config.connect_timeout_ms, config.url
            ))
        })?
        .map_err(|e| WsError::ConnectionFailed(format!("{}: {}", config.url, e)))?;

        tracing::info!("WebSocket connected to {}", config.url);

        Ok(Self {
            stream,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one text frame.
    pub async fn send_text(&mut self, text: String) -> Result<(), WsError> {
        self.stream
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| WsError::SendFailed(e.to_string()))
    }

    /// Wait for the next reply frame and return its text.
    pub async fn recv_reply(&mut self) -> Result<String, WsError> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(text.to_string()),
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {
                    tracing::trace!("Skipping control frame while awaiting reply");
                }
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = extract_close(frame.as_ref());
                    tracing::warn!("Server closed connection while a reply was pending: {} {}", code, reason);
                    return Err(WsError::UnexpectedMessage(format!(
                        "close frame (code {}, reason: {})",
                        code, reason
                    )));
                }
                Some(Ok(Message::Binary(data))) => {
                    return Err(WsError::UnexpectedMessage(format!(
                        "binary frame ({} bytes)",
                        data.len()
                    )));
                }
                Some(Ok(Message::Frame(_))) => {
                    return Err(WsError::UnexpectedMessage("raw frame".into()));
                }
                Some(Err(e)) => return Err(WsError::Transport(e.to_string())),
                None => return Err(WsError::UnexpectedMessage("stream ended".into())),
            }
        }
    }

    /// Send a request and wait for exactly one reply.
    pub async fn round_trip(&mut self, text: String) -> Result<String, WsError> {
        self.send_text(text).await?;
        self.recv_reply().await
    }

    /// Send a normal close frame. Errors from an already-dead socket are ignored.
    pub async fn close(mut self) {
        let frame = CloseFrame {
            code: CloseCode::Normal,
            reason: "Client disconnect".into(),
        };
        if let Err(e) = self.stream.close(Some(frame)).await {
            tracing::debug!("Close handshake with {} failed: {}", self.url, e);
        }
        tracing::info!("WebSocket disconnected from {}", self.url);
    }
}

/// Extract close code and reason from an optional CloseFrame.
fn extract_close(frame: Option<&CloseFrame>) -> (u16, String) {
    match frame {
        Some(f) => (f.code.into(), f.reason.to_string()),
        None => (1006, "No close frame".into()),
    }
}
