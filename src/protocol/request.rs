//! Request encoding and reply decoding.
//!
//! Pure data transformation, no I/O.

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

use super::Command;

// ============================================================================
// Encoding
// ============================================================================

/// Encodes a command as a request text frame.
///
/// # Format
///
/// ```json
/// { "Action": "GetPrintResult", "Content": { "DevicePath": "" } }
/// ```
///
/// # Errors
///
/// Returns [`Error::Json`] if serialization fails.
pub fn encode(command: &Command<'_>) -> Result<String> {
    Ok(serde_json::to_string(command)?)
}

// ============================================================================
// Reply
// ============================================================================

/// Message used when a failing reply has no `ErrorMsg`.
const UNKNOWN_ERROR: &str = "unknown error";

/// A reply from the print service.
///
/// # Format
///
/// ```json
/// { "ResultCode": 0, "ResultValue": [ ... ], "ErrorMsg": "" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reply {
    /// 0 on success.
    #[serde(rename = "ResultCode")]
    pub result_code: i64,

    /// Payload; `null` and absent both decode to `None`.
    #[serde(rename = "ResultValue", default)]
    pub result_value: Option<Value>,

    /// Cause of a failure.
    #[serde(rename = "ErrorMsg", default)]
    pub error_msg: Option<String>,
}

impl Reply {
    /// Returns `true` if `ResultCode` is 0.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result_code == 0
    }

    /// Extracts the payload, failing on a non-zero code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Server`] carrying the code and `ErrorMsg`.
    pub fn into_result(self) -> Result<Option<Value>> {
        if self.is_success() {
            return Ok(self.result_value);
        }

        let message = self
            .error_msg
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        Err(Error::server(self.result_code, message))
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes a reply text frame.
///
/// # Errors
///
/// Returns [`Error::MalformedReply`] if the text is not JSON or lacks an
/// integer `ResultCode`.
pub fn decode(text: &str) -> Result<Reply> {
    serde_json::from_str(text)
        .map_err(|e| Error::malformed_reply(format!("{e}; reply was: {text}")))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_encode_request() {
        let text = encode(&Command::GetPrintResult { device_path: "USB1" }).expect("encode");
        let value: Value = serde_json::from_str(&text).expect("parse");
        assert_eq!(
            value,
            json!({"Action": "GetPrintResult", "Content": {"DevicePath": "USB1"}})
        );
    }

    #[test]
    fn test_encode_keeps_non_ascii() {
        let text = encode(&Command::StopPrint { device_path: "打印机" }).expect("encode");
        assert!(text.contains("打印机"));
    }

    #[test]
    fn test_decode_success() {
        let reply = decode(r#"{"ResultCode":0,"ResultValue":[{"DevicePath":"a"}],"ErrorMsg":""}"#)
            .expect("decode");
        assert!(reply.is_success());
        let value = reply.into_result().expect("success");
        assert_eq!(value, Some(json!([{"DevicePath": "a"}])));
    }

    #[test]
    fn test_decode_absent_and_null_value() {
        let reply = decode(r#"{"ResultCode":0}"#).expect("decode");
        assert_eq!(reply.into_result().expect("success"), None);

        let reply = decode(r#"{"ResultCode":0,"ResultValue":null}"#).expect("decode");
        assert_eq!(reply.into_result().expect("success"), None);
    }

    #[test]
    fn test_nonzero_code_is_server_error() {
        let reply = decode(r#"{"ResultCode":7,"ErrorMsg":"busy"}"#).expect("decode");
        match reply.into_result() {
            Err(Error::Server { code, message }) => {
                assert_eq!(code, 7);
                assert_eq!(message, "busy");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn test_nonzero_code_without_message() {
        let reply = decode(r#"{"ResultCode":-1}"#).expect("decode");
        let err = reply.into_result().expect_err("should fail");
        assert_eq!(err.to_string(), "Server error -1: unknown error");
    }

    #[test]
    fn test_empty_message_is_kept() {
        let reply = decode(r#"{"ResultCode":3,"ErrorMsg":""}"#).expect("decode");
        let err = reply.into_result().expect_err("should fail");
        assert!(matches!(err, Error::Server { code: 3, ref message } if message.is_empty()));
    }

    #[test]
    fn test_malformed_replies() {
        for text in ["not json", "[]", r#"{"ResultValue":1}"#, r#"{"ResultCode":"0"}"#] {
            let err = decode(text).expect_err("should fail");
            assert!(matches!(err, Error::MalformedReply { .. }), "{text}: {err}");
        }
    }
}
