//! WebSocket protocol message types.
//!
//! This module defines the message format spoken with the print service.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | [`Command`] | Client → Service | `{"Action", "Content"}` request |
//! | [`Reply`] | Service → Client | `{"ResultCode", "ResultValue", "ErrorMsg"}` |
//!
//! Messages carry no request identifier. A reply is matched to its request
//! only by arriving next on the connection, see [`crate::transport`].
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Actions and their content |
//! | `request` | Encoding and reply decoding |

// ============================================================================
// Submodules
// ============================================================================

/// Action definitions.
pub mod command;

/// Request encoding and reply decoding.
pub mod request;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{Action, Command, PrintJob};
pub use request::{Reply, decode, encode};
