//! Physical WebSocket connection.
//!
//! [`Transport`] is the seam between the [`Session`](super::Session) and the
//! socket: one text frame out, one text frame in. [`WsTransport`] implements
//! it over `tokio-tungstenite`.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, trace};

use crate::error::{Error, Result};

// ============================================================================
// Transport
// ============================================================================

/// A bidirectional text-frame channel to the print service.
///
/// Implementations do no correlation of their own; the session decides when
/// a frame is read.
#[async_trait]
pub trait Transport: Send {
    /// Writes one text frame.
    async fn send_text(&mut self, text: String) -> Result<()>;

    /// Waits for the next text frame.
    ///
    /// Returns [`Error::ConnectionClosed`] when the peer closes the stream.
    async fn recv_text(&mut self) -> Result<String>;

    /// Closes the channel.
    async fn close(&mut self) -> Result<()>;
}

// ============================================================================
// WsTransport
// ============================================================================

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket client connection to the print service.
pub struct WsTransport {
    stream: WsStream,
}

impl WsTransport {
    /// Opens a WebSocket connection, bounding TCP connect plus handshake.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionTimeout`] if the handshake does not finish in time
    /// - [`Error::Connection`] if the service refuses or the handshake fails
    pub async fn connect(url: &str, connect_timeout: Duration) -> Result<Self> {
        let (stream, response) = timeout(connect_timeout, connect_async(url))
            .await
            .map_err(|_| Error::connection_timeout(connect_timeout.as_millis() as u64))?
            .map_err(|e| Error::connection(format!("cannot connect to {url}: {e}")))?;

        debug!(url, status = %response.status(), "WebSocket handshake completed");

        Ok(Self { stream })
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn send_text(&mut self, text: String) -> Result<()> {
        trace!(%text, "Sending frame");
        self.stream.send(Message::Text(text.into())).await?;
        Ok(())
    }

    async fn recv_text(&mut self) -> Result<String> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    trace!(text = %text.as_str(), "Received frame");
                    return Ok(text.as_str().to_owned());
                }

                Some(Ok(Message::Binary(bytes))) => {
                    return String::from_utf8(bytes.to_vec())
                        .map_err(|e| Error::malformed_reply(format!("binary frame: {e}")));
                }

                Some(Ok(Message::Close(frame))) => {
                    debug!(?frame, "WebSocket closed by remote");
                    return Err(Error::ConnectionClosed);
                }

                Some(Err(e)) => return Err(e.into()),

                None => {
                    debug!("WebSocket stream ended");
                    return Err(Error::ConnectionClosed);
                }

                // Ping/Pong are answered by tungstenite itself
                Some(Ok(_)) => {}
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
