//! Reply payloads: device descriptors and print status.
//!
//! Both are server-defined objects that may grow fields, so they wrap the raw
//! JSON map and only pull out the fields the SDK names.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// DeviceDescriptor
// ============================================================================

/// One entry of a `GetDevicePaths` reply.
///
/// Fields other than `DevicePath` are forwarded untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceDescriptor(Map<String, Value>);

impl DeviceDescriptor {
    /// Returns the device path used to address the printer.
    #[inline]
    #[must_use]
    pub fn device_path(&self) -> Option<&str> {
        self.0.get("DevicePath").and_then(Value::as_str)
    }

    /// Gets any field of the descriptor.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns all fields.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the descriptor, returning the raw map.
    #[inline]
    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for DeviceDescriptor {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

// ============================================================================
// PrintState
// ============================================================================

/// Typed view of the numeric `State` of a [`PrintStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrintState {
    /// 0
    Idle,
    /// 2
    Printing,
    /// 3
    Aborted,
    /// 4
    Completed,
    /// Any other server-defined value, kept as sent.
    Other(i64),
}

impl PrintState {
    /// Returns `true` once the job can no longer change (aborted or completed).
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Aborted | Self::Completed)
    }

    /// Returns the raw numeric state.
    #[inline]
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Idle => 0,
            Self::Printing => 2,
            Self::Aborted => 3,
            Self::Completed => 4,
            Self::Other(code) => code,
        }
    }
}

impl From<i64> for PrintState {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Idle,
            2 => Self::Printing,
            3 => Self::Aborted,
            4 => Self::Completed,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for PrintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Printing => f.write_str("printing"),
            Self::Aborted => f.write_str("aborted"),
            Self::Completed => f.write_str("completed"),
            Self::Other(code) => write!(f, "state {code}"),
        }
    }
}

// ============================================================================
// PrintStatus
// ============================================================================

/// Reply of `GetPrintResult`.
///
/// An absent payload decodes to the empty status, whose [`state`](Self::state)
/// is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrintStatus(Map<String, Value>);

impl PrintStatus {
    /// Returns the raw `State` number.
    #[inline]
    #[must_use]
    pub fn state_code(&self) -> Option<i64> {
        self.0.get("State").and_then(Value::as_i64)
    }

    /// Returns the typed state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> Option<PrintState> {
        self.state_code().map(PrintState::from)
    }

    /// Returns `true` if the job is aborted or completed.
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state().is_some_and(PrintState::is_terminal)
    }

    /// Returns `PrintDes`, or an empty string.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        self.0
            .get("PrintDes")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Returns `ErrorMsg`, or an empty string.
    #[inline]
    #[must_use]
    pub fn error_message(&self) -> &str {
        self.0
            .get("ErrorMsg")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Returns `true` if the reply carried no fields.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets any field of the status.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns all fields.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for PrintStatus {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_device_descriptor_forwards_fields() {
        let device: DeviceDescriptor = serde_json::from_value(json!({
            "DevicePath": "USB#001",
            "DeviceName": "T50",
            "Extra": [1, 2]
        }))
        .expect("deserialize");

        assert_eq!(device.device_path(), Some("USB#001"));
        assert_eq!(device.get("DeviceName"), Some(&json!("T50")));
        assert_eq!(device.fields().len(), 3);
        assert_eq!(
            serde_json::to_value(&device).expect("serialize")["Extra"],
            json!([1, 2])
        );
    }

    #[test]
    fn test_print_state_mapping() {
        assert_eq!(PrintState::from(0), PrintState::Idle);
        assert_eq!(PrintState::from(2), PrintState::Printing);
        assert_eq!(PrintState::from(3), PrintState::Aborted);
        assert_eq!(PrintState::from(4), PrintState::Completed);
        assert_eq!(PrintState::from(9), PrintState::Other(9));
        assert_eq!(PrintState::Other(9).code(), 9);
        assert!(PrintState::Aborted.is_terminal());
        assert!(!PrintState::Printing.is_terminal());
    }

    #[test]
    fn test_print_status_accessors() {
        let status: PrintStatus = serde_json::from_value(json!({
            "State": 2,
            "PrintDes": "printing page 1"
        }))
        .expect("deserialize");

        assert_eq!(status.state(), Some(PrintState::Printing));
        assert_eq!(status.description(), "printing page 1");
        assert_eq!(status.error_message(), "");
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_empty_status() {
        let status = PrintStatus::default();
        assert!(status.is_empty());
        assert_eq!(status.state(), None);
        assert!(!status.is_terminal());
    }
}
