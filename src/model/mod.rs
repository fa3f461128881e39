//! Print job data model.
//!
//! Plain values owned by the caller. They carry no identity and are consumed
//! by serialization.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PrintSettings`] | Paper and print-head settings (`PrintSet`) |
//! | [`PrintPage`] | Page with ordered draw objects |
//! | [`DrawObject`] | Text, barcode, image or line |
//! | [`DeviceDescriptor`] | Entry of the device list reply |
//! | [`PrintStatus`] | Status reply with [`PrintState`] view |

// ============================================================================
// Submodules
// ============================================================================

/// Pages and draw objects.
pub mod page;

/// Reply payload wrappers.
pub mod reply;

/// Print settings.
pub mod settings;

// ============================================================================
// Re-exports
// ============================================================================

pub use page::{Align, DEFAULT_FONT_NAME, DrawFormat, DrawObject, FontSize, Geometry, PrintPage};
pub use reply::{DeviceDescriptor, PrintState, PrintStatus};
pub use settings::PrintSettings;
