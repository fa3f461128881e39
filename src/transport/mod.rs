//! WebSocket transport layer.
//!
//! This module owns the single connection to the print service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  PrinterClient  │                              │  Print service  │
//! │                 │         WebSocket            │                 │
//! │  Session        │─────────────────────────────►│  ws://127.0.0.1 │
//! │  → Transport    │◄─────────────────────────────│  :15268         │
//! └─────────────────┘   one request, one reply     └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `Session::new` - Disconnected session with endpoint and timeouts
//! 2. `Session::connect` - Dial the service (no-op if connected)
//! 3. `Session::send_receive` / `Session::send` - Exchange frames
//! 4. `Session::close` - Release the socket (idempotent)
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | [`Transport`] trait and WebSocket implementation |
//! | `session` | Exclusive exchange channel and default receive timeout |

// ============================================================================
// Submodules
// ============================================================================

/// Transport trait and WebSocket client connection.
pub mod connection;

/// Session with one exchange in flight.
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{Transport, WsTransport};
pub use session::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_RECV_TIMEOUT, DEFAULT_URL, Session, SessionConfig,
};
