//! Printer client: action invoker and high-level operations.
//!
//! [`PrinterClient::invoke`] is the single path to the service: encode,
//! exchange over the session, decode, map a non-zero `ResultCode` to
//! [`Error::Server`]. Every other operation composes it.
//!
//! # Example
//!
//! ```no_run
//! use supvan_printer::{PrintSettings, PrinterClient, TextLabel};
//!
//! # async fn example() -> supvan_printer::Result<()> {
//! let client = PrinterClient::builder().connect().await?;
//!
//! let devices = client.list_devices(None).await?;
//! let path = devices.first().and_then(|d| d.device_path()).unwrap_or_default();
//!
//! let settings = PrintSettings::new().with_label_size(30, 30);
//! client
//!     .print_text_label(&TextLabel::new("HelloWorld"), Some(&settings), Some(path))
//!     .await?;
//!
//! let status = client.get_status(Some(path), None).await?;
//! println!("state: {:?}", status.state());
//!
//! client.close().await;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{DeviceDescriptor, PrintPage, PrintSettings, PrintStatus};
use crate::protocol::{self, Command, PrintJob};
use crate::transport::{Session, SessionConfig, Transport};

use super::builder::ClientBuilder;
use super::label::TextLabel;
use super::options::CallOptions;

// ============================================================================
// Constants
// ============================================================================

/// Minimum wait for an awaited `DoPrint` without an explicit timeout.
pub const PRINT_REPLY_MIN_TIMEOUT: Duration = Duration::from_secs(20);

// ============================================================================
// PrinterClient
// ============================================================================

/// Client for the label printer WebSocket service.
///
/// Cheap to clone; clones share one connection. Calls from any number of
/// tasks are queued so that each request is followed by its own reply.
#[derive(Clone)]
pub struct PrinterClient {
    /// Shared session.
    session: Arc<Session>,
}

impl fmt::Debug for PrinterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrinterClient")
            .field("url", &self.session.config().url)
            .field("recv_timeout", &self.session.recv_timeout())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// PrinterClient - Connection
// ============================================================================

impl PrinterClient {
    /// Creates a configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a disconnected client.
    pub(crate) fn new(config: SessionConfig) -> Self {
        Self {
            session: Arc::new(Session::new(config)),
        }
    }

    /// Creates a client over an already-open transport.
    #[must_use]
    pub fn with_transport(config: SessionConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            session: Arc::new(Session::with_transport(config, transport)),
        }
    }

    /// Returns the underlying session.
    #[inline]
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Connects to the service. No-op when already connected.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionTimeout`] if the handshake exceeds the connect timeout
    /// - [`Error::Connection`] if the service cannot be reached
    pub async fn connect(&self) -> Result<()> {
        self.session.connect().await
    }

    /// Closes the connection. Idempotent.
    pub async fn close(&self) {
        self.session.close().await;
    }

    /// Returns `true` while connected.
    pub async fn is_connected(&self) -> bool {
        self.session.is_connected().await
    }

    /// Returns the connection's default receive timeout.
    #[inline]
    #[must_use]
    pub fn recv_timeout(&self) -> Duration {
        self.session.recv_timeout()
    }

    /// Changes the connection's default receive timeout.
    #[inline]
    pub fn set_recv_timeout(&self, timeout: Duration) {
        self.session.set_recv_timeout(timeout);
    }
}

// ============================================================================
// PrinterClient - Invoker
// ============================================================================

impl PrinterClient {
    /// Sends one action and, if `options.expect_reply`, returns its payload.
    ///
    /// Returns `Ok(None)` without reading when no reply is expected, and when
    /// the reply carries no `ResultValue`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] if not connected
    /// - [`Error::Timeout`] naming the action and the wait applied
    /// - [`Error::MalformedReply`] if the reply is not a result envelope
    /// - [`Error::Server`] if `ResultCode` is non-zero
    pub async fn invoke(&self, command: &Command<'_>, options: CallOptions) -> Result<Option<Value>> {
        let action = command.action();
        let payload = protocol::encode(command)?;

        if !options.expect_reply {
            self.session.send(payload).await?;
            debug!(%action, "Action sent without awaiting reply");
            return Ok(None);
        }

        let text = self
            .session
            .send_receive(payload, options.timeout)
            .await
            .map_err(|e| match e {
                Error::Timeout { timeout_ms, .. } => Error::timeout(action.as_str(), timeout_ms),
                other => other,
            })?;

        let reply = protocol::decode(&text)?;
        if !reply.is_success() {
            warn!(%action, code = reply.result_code, "Service rejected action");
        }

        reply.into_result()
    }
}

// ============================================================================
// PrinterClient - Operations
// ============================================================================

impl PrinterClient {
    /// Lists attached devices.
    ///
    /// An absent or empty payload yields an empty list.
    ///
    /// # Errors
    ///
    /// Any [`invoke`](Self::invoke) error, or [`Error::MalformedReply`] if
    /// the payload is not a list of objects.
    pub async fn list_devices(&self, timeout: Option<Duration>) -> Result<Vec<DeviceDescriptor>> {
        let options = CallOptions::new().with_optional_timeout(timeout);
        let value = self.invoke(&Command::GetDevicePaths {}, options).await?;

        match value {
            Some(value) if !is_empty_payload(&value) => serde_json::from_value(value)
                .map_err(|e| Error::malformed_reply(format!("device list: {e}"))),
            _ => Ok(Vec::new()),
        }
    }

    /// Polls the print status of a device.
    ///
    /// `None` addresses the service's default device. An absent or empty
    /// payload yields the empty [`PrintStatus`].
    ///
    /// # Errors
    ///
    /// Any [`invoke`](Self::invoke) error, or [`Error::MalformedReply`] if
    /// the payload is not an object.
    pub async fn get_status(
        &self,
        device_path: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<PrintStatus> {
        let command = Command::GetPrintResult {
            device_path: device_path.unwrap_or_default(),
        };
        let options = CallOptions::new().with_optional_timeout(timeout);

        match self.invoke(&command, options).await? {
            Some(Value::Object(fields)) => Ok(PrintStatus::from(fields)),
            Some(value) if !is_empty_payload(&value) => Err(Error::malformed_reply(format!(
                "print status is not an object: {value}"
            ))),
            _ => Ok(PrintStatus::default()),
        }
    }

    /// Submits a print job without waiting for a reply.
    ///
    /// # Errors
    ///
    /// [`Error::NotConnected`] or a write failure.
    pub async fn submit_print(
        &self,
        pages: &[PrintPage],
        settings: &PrintSettings,
        device_path: Option<&str>,
    ) -> Result<Option<Value>> {
        self.submit_print_with(pages, settings, device_path, CallOptions::fire_and_forget())
            .await
    }

    /// Submits a print job with an explicit reply policy.
    ///
    /// When a reply is awaited without an explicit timeout, the wait is the
    /// connection default or [`PRINT_REPLY_MIN_TIMEOUT`], whichever is longer.
    ///
    /// # Errors
    ///
    /// Any [`invoke`](Self::invoke) error.
    pub async fn submit_print_with(
        &self,
        pages: &[PrintPage],
        settings: &PrintSettings,
        device_path: Option<&str>,
        mut options: CallOptions,
    ) -> Result<Option<Value>> {
        if options.expect_reply && options.timeout.is_none() {
            options.timeout = Some(self.recv_timeout().max(PRINT_REPLY_MIN_TIMEOUT));
        }

        let command = Command::DoPrint(PrintJob {
            device_path: device_path.unwrap_or_default(),
            settings,
            pages,
        });

        debug!(pages = pages.len(), "Submitting print job");
        self.invoke(&command, options).await
    }

    /// Aborts the running job on a device.
    ///
    /// # Errors
    ///
    /// Any [`invoke`](Self::invoke) error.
    pub async fn stop_print(
        &self,
        device_path: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Option<Value>> {
        let command = Command::StopPrint {
            device_path: device_path.unwrap_or_default(),
        };
        self.invoke(&command, CallOptions::new().with_optional_timeout(timeout))
            .await
    }

    /// Prints one text label, without waiting for a reply.
    ///
    /// Uses [`PrintSettings::default`] when `settings` is `None`.
    ///
    /// # Errors
    ///
    /// Same as [`submit_print`](Self::submit_print).
    pub async fn print_text_label(
        &self,
        label: &TextLabel,
        settings: Option<&PrintSettings>,
        device_path: Option<&str>,
    ) -> Result<Option<Value>> {
        self.print_text_label_with(label, settings, device_path, CallOptions::fire_and_forget())
            .await
    }

    /// Prints one text label with an explicit reply policy.
    ///
    /// # Errors
    ///
    /// Same as [`submit_print_with`](Self::submit_print_with).
    pub async fn print_text_label_with(
        &self,
        label: &TextLabel,
        settings: Option<&PrintSettings>,
        device_path: Option<&str>,
        options: CallOptions,
    ) -> Result<Option<Value>> {
        let default_settings;
        let settings = match settings {
            Some(settings) => settings,
            None => {
                default_settings = PrintSettings::default();
                &default_settings
            }
        };

        let pages = [label.to_page()];
        self.submit_print_with(&pages, settings, device_path, options)
            .await
    }

    /// Polls status until the job is aborted or completed.
    ///
    /// Does not stop the job when `deadline` passes; follow up with
    /// [`stop_print`](Self::stop_print) if needed.
    ///
    /// # Errors
    ///
    /// - [`Error::JobDeadline`] if no terminal state is seen within `deadline`
    /// - Any [`get_status`](Self::get_status) error
    pub async fn wait_for_completion(
        &self,
        device_path: Option<&str>,
        poll_interval: Duration,
        deadline: Duration,
    ) -> Result<PrintStatus> {
        let started = Instant::now();
        let mut last_state = None;

        loop {
            let status = self.get_status(device_path, None).await?;

            let state = status.state();
            if state != last_state {
                debug!(
                    state = ?state,
                    description = status.description(),
                    error = status.error_message(),
                    "Print state changed"
                );
                last_state = state;
            }

            if status.is_terminal() {
                return Ok(status);
            }

            if started.elapsed() + poll_interval > deadline {
                return Err(Error::job_deadline(deadline.as_millis() as u64));
            }

            sleep(poll_interval).await;
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Returns `true` for payloads that carry nothing: null, false, zero, or an
/// empty string or container.
fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::String(text) => text.is_empty(),
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;

    use crate::model::{Align, PrintState};

    /// Answers each request with the next canned reply; `None` never answers.
    struct ScriptedTransport {
        sent: Arc<Mutex<Vec<Value>>>,
        replies: VecDeque<Option<String>>,
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send_text(&mut self, text: String) -> Result<()> {
            let value = serde_json::from_str(&text).expect("request is JSON");
            self.sent.lock().push(value);
            Ok(())
        }

        async fn recv_text(&mut self) -> Result<String> {
            match self.replies.pop_front().flatten() {
                Some(reply) => Ok(reply),
                None => std::future::pending().await,
            }
        }

        async fn close(&mut self) -> Result<()> {
            Ok(())
        }
    }

    fn scripted(replies: &[Option<&str>]) -> (PrinterClient, Arc<Mutex<Vec<Value>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let transport = ScriptedTransport {
            sent: Arc::clone(&sent),
            replies: replies.iter().map(|r| r.map(str::to_string)).collect(),
        };
        let client = PrinterClient::with_transport(SessionConfig::default(), Box::new(transport));
        (client, sent)
    }

    #[tokio::test]
    async fn test_list_devices() {
        let (client, sent) = scripted(&[Some(
            r#"{"ResultCode":0,"ResultValue":[{"DevicePath":"USB1","Name":"T50"}],"ErrorMsg":""}"#,
        )]);

        let devices = client.list_devices(None).await.expect("list");
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].device_path(), Some("USB1"));
        assert_eq!(devices[0].get("Name"), Some(&json!("T50")));

        assert_eq!(
            sent.lock()[0],
            json!({"Action": "GetDevicePaths", "Content": {}})
        );
    }

    #[tokio::test]
    async fn test_list_devices_absent_payload_is_empty() {
        let (client, _) = scripted(&[
            Some(r#"{"ResultCode":0,"ErrorMsg":""}"#),
            Some(r#"{"ResultCode":0,"ResultValue":null}"#),
            Some(r#"{"ResultCode":0,"ResultValue":[]}"#),
            Some(r#"{"ResultCode":0,"ResultValue":0}"#),
            Some(r#"{"ResultCode":0,"ResultValue":false}"#),
        ]);

        for _ in 0..5 {
            assert!(client.list_devices(None).await.expect("list").is_empty());
        }
    }

    #[tokio::test]
    async fn test_list_devices_rejects_non_list() {
        let (client, _) = scripted(&[Some(r#"{"ResultCode":0,"ResultValue":42}"#)]);

        let err = client.list_devices(None).await.expect_err("should fail");
        assert!(matches!(err, Error::MalformedReply { .. }));
    }

    #[tokio::test]
    async fn test_get_status() {
        let (client, sent) = scripted(&[Some(
            r#"{"ResultCode":0,"ResultValue":{"State":4,"PrintDes":"done","ErrorMsg":""}}"#,
        )]);

        let status = client.get_status(Some("USB1"), None).await.expect("status");
        assert_eq!(status.state(), Some(PrintState::Completed));
        assert_eq!(status.description(), "done");
        assert_eq!(
            sent.lock()[0],
            json!({"Action": "GetPrintResult", "Content": {"DevicePath": "USB1"}})
        );
    }

    #[tokio::test]
    async fn test_get_status_empty_payload_is_default() {
        let (client, sent) = scripted(&[Some(r#"{"ResultCode":0,"ResultValue":{}}"#)]);

        let status = client.get_status(None, None).await.expect("status");
        assert_eq!(status, PrintStatus::default());
        assert_eq!(sent.lock()[0]["Content"]["DevicePath"], "");
    }

    #[tokio::test]
    async fn test_unknown_state_passes_through() {
        let (client, _) = scripted(&[Some(r#"{"ResultCode":0,"ResultValue":{"State":17}}"#)]);

        let status = client.get_status(None, None).await.expect("status");
        assert_eq!(status.state_code(), Some(17));
        assert_eq!(status.state(), Some(PrintState::Other(17)));
    }

    #[tokio::test]
    async fn test_server_error() {
        let (client, _) = scripted(&[Some(r#"{"ResultCode":7,"ErrorMsg":"busy"}"#)]);

        match client.stop_print(None, None).await {
            Err(Error::Server { code, message }) => {
                assert_eq!(code, 7);
                assert_eq!(message, "busy");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_reply() {
        let (client, _) = scripted(&[Some("<html>")]);

        let err = client.get_status(None, None).await.expect_err("should fail");
        assert!(matches!(err, Error::MalformedReply { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_names_action_and_effective_wait() {
        let (client, _) = scripted(&[None]);

        let err = client
            .get_status(Some("USB1"), Some(Duration::from_millis(1500)))
            .await
            .expect_err("should time out");

        match err {
            Error::Timeout {
                operation,
                timeout_ms,
            } => {
                assert_eq!(operation, "GetPrintResult");
                assert_eq!(timeout_ms, 1500);
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        assert_eq!(client.recv_timeout(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_submit_print_does_not_read() {
        // No reply is scripted; a read would hang forever
        let (client, sent) = scripted(&[None]);

        let pages = vec![PrintPage::default()];
        let result = tokio::time::timeout(
            Duration::from_secs(1),
            client.submit_print(&pages, &PrintSettings::default(), Some("USB1")),
        )
        .await
        .expect("returns without waiting")
        .expect("submit");

        assert_eq!(result, None);
        assert_eq!(sent.lock()[0]["Action"], "DoPrint");
    }

    #[tokio::test(start_paused = true)]
    async fn test_awaited_submit_waits_at_least_twenty_seconds() {
        let (client, _) = scripted(&[None]);

        let err = client
            .submit_print_with(
                &[PrintPage::default()],
                &PrintSettings::default(),
                None,
                CallOptions::new(),
            )
            .await
            .expect_err("should time out");

        assert!(matches!(
            err,
            Error::Timeout { ref operation, timeout_ms: 20_000 } if operation == "DoPrint"
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_awaited_submit_uses_default_during_other_override() {
        let (client, _) = scripted(&[None, None]);
        client.set_recv_timeout(Duration::from_secs(30));

        let polling = {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .get_status(None, Some(Duration::from_secs(1)))
                    .await
            })
        };

        sleep(Duration::from_millis(100)).await;
        assert_eq!(client.recv_timeout(), Duration::from_secs(30));

        let err = client
            .submit_print_with(
                &[PrintPage::default()],
                &PrintSettings::default(),
                None,
                CallOptions::new(),
            )
            .await
            .expect_err("should time out");
        assert!(matches!(
            err,
            Error::Timeout { ref operation, timeout_ms: 30_000 } if operation == "DoPrint"
        ));

        let err = polling.await.expect("task").expect_err("should time out");
        assert!(matches!(err, Error::Timeout { timeout_ms: 1000, .. }));
    }

    #[tokio::test]
    async fn test_awaited_submit_returns_value() {
        let (client, _) = scripted(&[Some(r#"{"ResultCode":0,"ResultValue":"queued"}"#)]);

        let value = client
            .submit_print_with(
                &[PrintPage::default()],
                &PrintSettings::default(),
                None,
                CallOptions::new().with_timeout(Duration::from_secs(1)),
            )
            .await
            .expect("submit");
        assert_eq!(value, Some(json!("queued")));
    }

    #[tokio::test]
    async fn test_print_text_label_builds_single_text_object() {
        let (client, sent) = scripted(&[]);

        let label = TextLabel::new("HelloWorld").with_font("黑体", 4).with_align(Align::Center);
        client
            .print_text_label(&label, None, None)
            .await
            .expect("print");

        let request = sent.lock()[0].clone();
        assert_eq!(request["Action"], "DoPrint");
        assert_eq!(request["Content"]["PrintSet"]["Width"], 50);

        let pages = request["Content"]["PrintPages"].as_array().expect("pages");
        assert_eq!(pages.len(), 1);
        let objects = pages[0]["DrawObjects"].as_array().expect("objects");
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0]["Format"], "TEXT");
        assert_eq!(objects[0]["Content"], "HelloWorld");
        assert_eq!(objects[0]["FontSize"], "4");
        assert_eq!(objects[0]["Align"], 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_completion() {
        let (client, sent) = scripted(&[
            Some(r#"{"ResultCode":0,"ResultValue":{"State":2}}"#),
            Some(r#"{"ResultCode":0,"ResultValue":{"State":2}}"#),
            Some(r#"{"ResultCode":0,"ResultValue":{"State":3,"ErrorMsg":"stopped"}}"#),
        ]);

        let status = client
            .wait_for_completion(Some("USB1"), Duration::from_secs(1), Duration::from_secs(60))
            .await
            .expect("terminal state");

        assert_eq!(status.state(), Some(PrintState::Aborted));
        assert_eq!(status.error_message(), "stopped");
        assert_eq!(sent.lock().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_completion_deadline() {
        let printing = Some(r#"{"ResultCode":0,"ResultValue":{"State":2}}"#);
        let (client, _) = scripted(&[printing; 10]);

        let err = client
            .wait_for_completion(None, Duration::from_secs(1), Duration::from_secs(3))
            .await
            .expect_err("should hit deadline");

        assert!(matches!(err, Error::JobDeadline { timeout_ms: 3000 }));
    }

    #[tokio::test]
    async fn test_not_connected_after_close() {
        let (client, _) = scripted(&[]);
        client.close().await;

        let err = client.list_devices(None).await.expect_err("should fail");
        assert!(matches!(err, Error::NotConnected));
    }

    #[test]
    fn test_is_empty_payload() {
        assert!(is_empty_payload(&Value::Null));
        assert!(is_empty_payload(&json!([])));
        assert!(is_empty_payload(&json!({})));
        assert!(is_empty_payload(&json!("")));
        assert!(is_empty_payload(&json!(0)));
        assert!(is_empty_payload(&json!(false)));
        assert!(!is_empty_payload(&json!(3)));
        assert!(!is_empty_payload(&json!(true)));
        assert!(!is_empty_payload(&json!([{}])));
    }
}
