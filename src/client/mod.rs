//! Printer client module.
//!
//! This module provides the main entry point of the SDK.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PrinterClient`] | Action invoker and high-level operations |
//! | [`ClientBuilder`] | Fluent configuration builder |
//! | [`CallOptions`] | Per-call timeout and reply policy |
//! | [`TextLabel`] | Single text label job |
//!
//! # Example
//!
//! ```no_run
//! use supvan_printer::{PrinterClient, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = PrinterClient::builder().connect().await?;
//!
//! for device in client.list_devices(None).await? {
//!     println!("{:?}", device.device_path());
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder for client configuration.
pub mod builder;

/// Client implementation.
pub mod core;

/// Text label convenience job.
pub mod label;

/// Per-call options.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ClientBuilder;
pub use core::{PRINT_REPLY_MIN_TIMEOUT, PrinterClient};
pub use label::{DEFAULT_LABEL_FONT, DEFAULT_LABEL_FONT_SIZE, TextLabel};
pub use options::CallOptions;
