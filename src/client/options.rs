//! Per-call options.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use supvan_printer::CallOptions;
//!
//! // Wait for a reply, at most 2 seconds
//! let awaited = CallOptions::new().with_timeout(Duration::from_secs(2));
//! assert!(awaited.expect_reply);
//!
//! // Write and return
//! let fire_and_forget = CallOptions::fire_and_forget();
//! assert!(!fire_and_forget.expect_reply);
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// CallOptions
// ============================================================================

/// How a single action call waits for its reply.
///
/// The reply policy is explicit per call rather than derived from the action,
/// so `DoPrint` can be awaited against services that acknowledge it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOptions {
    /// Overrides the connection's receive timeout for this call only.
    pub timeout: Option<Duration>,

    /// Wait for and decode a reply. When `false` the call returns as soon as
    /// the request is written.
    pub expect_reply: bool,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl CallOptions {
    /// Awaits a reply with the connection's default timeout.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: None,
            expect_reply: true,
        }
    }

    /// Writes the request without reading a reply.
    #[inline]
    #[must_use]
    pub const fn fire_and_forget() -> Self {
        Self {
            timeout: None,
            expect_reply: false,
        }
    }

    /// Sets the per-call timeout.
    #[inline]
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the per-call timeout if given.
    #[inline]
    #[must_use]
    pub const fn with_optional_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets whether a reply is awaited.
    #[inline]
    #[must_use]
    pub const fn with_expect_reply(mut self, expect_reply: bool) -> Self {
        self.expect_reply = expect_reply;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_awaits_reply() {
        let options = CallOptions::default();
        assert!(options.expect_reply);
        assert_eq!(options.timeout, None);
    }

    #[test]
    fn test_builder_methods() {
        let options = CallOptions::fire_and_forget()
            .with_timeout(Duration::from_secs(3))
            .with_expect_reply(true);
        assert!(options.expect_reply);
        assert_eq!(options.timeout, Some(Duration::from_secs(3)));

        let options = options.with_optional_timeout(None);
        assert_eq!(options.timeout, None);
    }
}
