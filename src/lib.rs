//! Supvan printer SDK - Client for the label printer WebSocket service.
//!
//! This library controls a label printer through the vendor's local
//! WebSocket service: enumerate devices, submit print jobs built from typed
//! draw objects, poll print status and abort a running job.
//!
//! # Architecture
//!
//! The SDK is a thin client over one persistent connection:
//!
//! - **Client (Rust)**: Sends `{"Action", "Content"}` requests
//! - **Service (local)**: Answers with `{"ResultCode", "ResultValue", "ErrorMsg"}`
//!
//! Key design principles:
//!
//! - The wire carries no request IDs, so exactly one call awaits a reply at a time
//! - Per-call timeouts never change the connection default
//! - Reply policy (await or fire-and-forget) is chosen per call
//! - Reply payloads stay open-ended JSON; only named fields are pulled out
//!
//! # Quick Start
//!
//! ```no_run
//! use supvan_printer::{PrintSettings, PrinterClient, Result, TextLabel};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = PrinterClient::builder()
//!         .url("ws://127.0.0.1:15268")
//!         .connect()
//!         .await?;
//!
//!     let devices = client.list_devices(None).await?;
//!     let path = devices.first().and_then(|d| d.device_path());
//!
//!     let settings = PrintSettings::new().with_label_size(30, 30);
//!     client
//!         .print_text_label(&TextLabel::new("HelloWorld"), Some(&settings), path)
//!         .await?;
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`PrinterClient`], builder and call options |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`model`] | Print settings, pages, draw objects, reply payloads |
//! | [`protocol`] | Request/reply envelopes |
//! | [`transport`] | WebSocket session |

// ============================================================================
// Modules
// ============================================================================

/// Printer client, builder and call options.
///
/// Use [`PrinterClient::builder()`] to create a configured client.
pub mod client;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Print job data model and reply payloads.
pub mod model;

/// WebSocket protocol message types.
///
/// Request encoding and reply decoding, no I/O.
pub mod protocol;

/// WebSocket transport layer.
///
/// Session holding the connection and serializing exchanges.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Client types
pub use client::{CallOptions, ClientBuilder, PrinterClient, TextLabel};

// Error types
pub use error::{Error, Result};

// Model types
pub use model::{
    Align, DeviceDescriptor, DrawFormat, DrawObject, FontSize, Geometry, PrintPage,
    PrintSettings, PrintState, PrintStatus,
};

// Protocol types
pub use protocol::{Action, Command};

// Transport types
pub use transport::{Session, SessionConfig, Transport};
