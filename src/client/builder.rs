//! Builder pattern for client configuration.
//!
//! Provides a fluent API for configuring and creating [`PrinterClient`]
//! instances.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use supvan_printer::PrinterClient;
//!
//! # async fn example() -> supvan_printer::Result<()> {
//! let client = PrinterClient::builder()
//!     .url("ws://127.0.0.1:15268")
//!     .recv_timeout(Duration::from_secs(10))
//!     .connect()
//!     .await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::transport::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_RECV_TIMEOUT, DEFAULT_URL, SessionConfig};

use super::core::PrinterClient;

// ============================================================================
// ClientBuilder
// ============================================================================

/// Builder for configuring a [`PrinterClient`].
///
/// Use [`PrinterClient::builder()`] to create a new builder.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    /// Service endpoint.
    url: String,
    /// Bound on connect plus handshake.
    connect_timeout: Duration,
    /// Default wait for replies.
    recv_timeout: Duration,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            recv_timeout: DEFAULT_RECV_TIMEOUT,
        }
    }
}

// ============================================================================
// ClientBuilder Implementation
// ============================================================================

impl ClientBuilder {
    /// Creates a builder targeting `ws://127.0.0.1:15268`.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the WebSocket URL of the print service.
    #[inline]
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the connect timeout.
    #[inline]
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the default receive timeout.
    #[inline]
    #[must_use]
    pub fn recv_timeout(mut self, timeout: Duration) -> Self {
        self.recv_timeout = timeout;
        self
    }

    /// Builds a disconnected client.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the URL is not `ws://`/`wss://` or a timeout is zero.
    pub fn build(self) -> Result<PrinterClient> {
        Ok(PrinterClient::new(self.validate()?))
    }

    /// Builds the client and connects it.
    ///
    /// # Errors
    ///
    /// Any error of [`build`](Self::build) or
    /// [`PrinterClient::connect`].
    pub async fn connect(self) -> Result<PrinterClient> {
        let client = self.build()?;
        client.connect().await?;
        Ok(client)
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ClientBuilder {
    /// Validates the configuration.
    fn validate(self) -> Result<SessionConfig> {
        let url = Url::parse(&self.url)
            .map_err(|e| Error::config(format!("Invalid service URL '{}': {e}", self.url)))?;

        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(Error::config(format!(
                "Service URL must use ws:// or wss://, got '{}'",
                self.url
            )));
        }

        if self.connect_timeout.is_zero() {
            return Err(Error::config("connect_timeout must be greater than zero"));
        }

        if self.recv_timeout.is_zero() {
            return Err(Error::config("recv_timeout must be greater than zero"));
        }

        Ok(SessionConfig {
            url: self.url,
            connect_timeout: self.connect_timeout,
            recv_timeout: self.recv_timeout,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
