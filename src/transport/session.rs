//! Single-connection session with one exchange in flight.
//!
//! The protocol has no request identifiers. A reply is simply the next frame
//! to arrive, so every write and its optional read run under one exclusive
//! channel lock. Concurrent callers queue on the lock in arrival order; a lost
//! reply stalls the queue until its timeout expires.
//!
//! # Timeouts
//!
//! The session keeps one default receive timeout. A per-call override only
//! bounds that call and never touches the default. The same wait also bounds
//! the write, so a peer that stops reading cannot hold the channel forever.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

use super::connection::{Transport, WsTransport};

// ============================================================================
// Constants
// ============================================================================

/// Default service endpoint.
pub const DEFAULT_URL: &str = "ws://127.0.0.1:15268";

/// Default bound on TCP connect plus WebSocket handshake.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default wait for a reply.
pub const DEFAULT_RECV_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// SessionConfig
// ============================================================================

/// Endpoint and timeouts of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// WebSocket URL of the print service.
    pub url: String,
    /// Bound on establishing the connection.
    pub connect_timeout: Duration,
    /// Initial default wait for replies.
    pub recv_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            recv_timeout: DEFAULT_RECV_TIMEOUT,
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// One logical connection to the print service.
///
/// # Thread Safety
///
/// `Session` is `Send + Sync`. Share it behind an `Arc`; exchanges from
/// different tasks are serialized, never interleaved.
pub struct Session {
    /// Endpoint and connect bound.
    config: SessionConfig,
    /// Socket, present while connected. The lock is the exchange channel.
    channel: tokio::sync::Mutex<Option<Box<dyn Transport>>>,
    /// Current receive timeout.
    recv_timeout: Mutex<Duration>,
}

impl Session {
    /// Creates a disconnected session.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let recv_timeout = config.recv_timeout;
        Self {
            config,
            channel: tokio::sync::Mutex::new(None),
            recv_timeout: Mutex::new(recv_timeout),
        }
    }

    /// Creates a session over an already-open transport.
    ///
    /// After [`close`](Self::close), [`connect`](Self::connect) dials
    /// `config.url` as usual.
    #[must_use]
    pub fn with_transport(config: SessionConfig, transport: Box<dyn Transport>) -> Self {
        let recv_timeout = config.recv_timeout;
        Self {
            config,
            channel: tokio::sync::Mutex::new(Some(transport)),
            recv_timeout: Mutex::new(recv_timeout),
        }
    }

    /// Returns the session configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the current default receive timeout.
    #[inline]
    #[must_use]
    pub fn recv_timeout(&self) -> Duration {
        *self.recv_timeout.lock()
    }

    /// Changes the default receive timeout.
    ///
    /// Exchanges already waiting keep the bound they started with.
    pub fn set_recv_timeout(&self, recv_timeout: Duration) {
        *self.recv_timeout.lock() = recv_timeout;
    }

    /// Returns `true` if a socket is open.
    pub async fn is_connected(&self) -> bool {
        self.channel.lock().await.is_some()
    }

    /// Opens the connection. No-op when already connected.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionTimeout`] if the handshake exceeds `connect_timeout`
    /// - [`Error::Connection`] if the service cannot be reached
    pub async fn connect(&self) -> Result<()> {
        let mut channel = self.channel.lock().await;
        if channel.is_some() {
            return Ok(());
        }

        let transport = WsTransport::connect(&self.config.url, self.config.connect_timeout).await?;
        *channel = Some(Box::new(transport));

        info!(url = %self.config.url, "Connected to print service");
        Ok(())
    }

    /// Closes the connection if open. Idempotent and infallible.
    pub async fn close(&self) {
        let Some(mut transport) = self.channel.lock().await.take() else {
            return;
        };

        if let Err(e) = transport.close().await {
            warn!(error = %e, "Error while closing connection");
        }

        debug!(url = %self.config.url, "Connection closed");
    }

    /// Writes one frame without waiting for a reply.
    ///
    /// The write is bounded by the default receive timeout.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] if no socket is open
    /// - [`Error::Timeout`] if the write stalls (operation `"request"`)
    /// - [`Error::WebSocket`] if the write fails
    pub async fn send(&self, payload: String) -> Result<()> {
        let mut channel = self.channel.lock().await;
        let transport = channel.as_mut().ok_or(Error::NotConnected)?;

        let wait = self.recv_timeout();
        write_within(&mut **transport, payload, wait).await?;
        debug!("Request sent, no reply awaited");
        Ok(())
    }

    /// Writes one frame and returns the next frame received.
    ///
    /// Waits at most `recv_timeout` if given, else the session default. The
    /// same bound applies to the write.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] if no socket is open
    /// - [`Error::Timeout`] if the write stalls (operation `"request"`) or
    ///   nothing arrives in time (operation `"reply"`)
    /// - [`Error::ConnectionClosed`] if the service closes the stream; the
    ///   socket is dropped and the session must be reconnected
    pub async fn send_receive(&self, payload: String, recv_timeout: Option<Duration>) -> Result<String> {
        let mut channel = self.channel.lock().await;
        let transport = channel.as_mut().ok_or(Error::NotConnected)?;

        let wait = recv_timeout.unwrap_or_else(|| self.recv_timeout());
        write_within(&mut **transport, payload, wait).await?;

        let received = timeout(wait, transport.recv_text()).await;

        match received {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(Error::ConnectionClosed)) => {
                *channel = None;
                Err(Error::ConnectionClosed)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(Error::timeout("reply", wait.as_millis() as u64)),
        }
    }
}

/// Writes one frame, giving up after `wait`.
async fn write_within(transport: &mut dyn Transport, payload: String, wait: Duration) -> Result<()> {
    match timeout(wait, transport.send_text(payload)).await {
        Ok(result) => result,
        Err(_) => Err(Error::timeout("request", wait.as_millis() as u64)),
    }
}

// ============================================================================
// Tests
// ============================================================================
