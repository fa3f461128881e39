//! Action definitions.
//!
//! Each request names one of four actions and carries an action-specific
//! `Content` object:
//!
//! | Action | Content |
//! |--------|---------|
//! | `GetDevicePaths` | `{}` |
//! | `GetPrintResult` | `{"DevicePath"}` |
//! | `DoPrint` | `{"DevicePath", "PrintSet", "PrintPages"}` |
//! | `StopPrint` | `{"DevicePath"}` |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{PrintPage, PrintSettings};

// ============================================================================
// Action
// ============================================================================

/// Action names understood by the print service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Enumerate attached printers.
    GetDevicePaths,
    /// Poll the status of the current job.
    GetPrintResult,
    /// Submit a print job.
    DoPrint,
    /// Abort the current job.
    StopPrint,
}

impl Action {
    /// Returns the wire name of the action.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetDevicePaths => "GetDevicePaths",
            Self::GetPrintResult => "GetPrintResult",
            Self::DoPrint => "DoPrint",
            Self::StopPrint => "StopPrint",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Command
// ============================================================================

/// A request: action plus its content, borrowed from the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "Action", content = "Content")]
pub enum Command<'a> {
    /// List attached devices.
    GetDevicePaths {},

    /// Query job status on a device.
    GetPrintResult {
        /// Target device; empty selects the service default.
        #[serde(rename = "DevicePath")]
        device_path: &'a str,
    },

    /// Submit pages for printing.
    DoPrint(PrintJob<'a>),

    /// Abort the running job on a device.
    StopPrint {
        /// Target device; empty selects the service default.
        #[serde(rename = "DevicePath")]
        device_path: &'a str,
    },
}

impl Command<'_> {
    /// Returns the action this command invokes.
    #[inline]
    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::GetDevicePaths {} => Action::GetDevicePaths,
            Self::GetPrintResult { .. } => Action::GetPrintResult,
            Self::DoPrint(_) => Action::DoPrint,
            Self::StopPrint { .. } => Action::StopPrint,
        }
    }
}

// ============================================================================
// PrintJob
// ============================================================================

/// Content of a `DoPrint` request.
#[derive(Debug, Clone, Serialize)]
pub struct PrintJob<'a> {
    /// Target device; empty selects the service default.
    #[serde(rename = "DevicePath")]
    pub device_path: &'a str,
    /// Paper and head settings.
    #[serde(rename = "PrintSet")]
    pub settings: &'a PrintSettings,
    /// Pages in print order.
    #[serde(rename = "PrintPages")]
    pub pages: &'a [PrintPage],
}

// ============================================================================
// Tests
// ============================================================================
