// SPDX-License-Identifier: MPL-2.0

use crate::api::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// A message for the alert box. Failures stop here and go no further up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Show the server's own message when it sent one, else `fallback`.
    pub fn from_client_error(e: &ClientError, fallback: &str) -> Self {
        tracing::debug!("request failed: {e}");
        match e {
            ClientError::Rejected(message) if !message.is_empty() => Self::error(message.as_str()),
            ClientError::NotAuthenticated => Self::error("Please sign in to continue"),
            _ => Self::error(fallback),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_messages() {
        let notice = Notice::from_client_error(
            &ClientError::Rejected("Post not found".to_string()),
            "Failed to add comment",
        );
        assert_eq!(notice, Notice::error("Post not found"));

        let notice = Notice::from_client_error(
            &ClientError::Network("connection refused".to_string()),
            "Failed to add comment",
        );
        assert_eq!(notice.message, "Failed to add comment");
        assert!(notice.is_error());

        let notice =
            Notice::from_client_error(&ClientError::Rejected(String::new()), "Something Went Wrong");
        assert_eq!(notice.message, "Something Went Wrong");
    }
}
