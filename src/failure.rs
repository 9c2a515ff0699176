//! The remote fault error type.

use crate::formatter::ErrorFormatter;
use crate::logging::FailureLog;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use zeroize::Zeroize;

/// A fault reported by the remote management server.
///
/// Holds the ordered error tokens sent by the server and the display message
/// derived from them. The message is computed once, at construction, and is
/// never recomputed: a `Failure` deserialized from its persisted form keeps
/// the message it was saved with, whatever catalog is loaded at the time.
///
/// # Persisted Form
///
/// ```json
/// { "errorDescription": ["HOST_OFFLINE", "xs-01"], "errorText": "Host xs-01 is offline." }
/// ```
///
/// # Example
///
/// ```rust
/// use remote_failure::Failure;
///
/// let failure = Failure::new(["SR_BACKEND_FAILURE", "X", r#"{"error": "disk full"}"#]);
/// assert_eq!(failure.message(), Some("disk full"));
/// assert_eq!(failure.code(), Some("SR_BACKEND_FAILURE"));
/// assert_eq!(failure.to_string(), "disk full");
/// ```
///
/// Token strings and the message are zeroized on drop; server diagnostics
/// routinely carry host names and storage paths.
#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use = "failures should be returned or logged"]
pub struct Failure {
    error_description: Vec<String>,
    error_text: Option<String>,
    #[serde(skip)]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl Failure {
    /// Create a failure from server tokens, using the default formatter.
    ///
    /// The default formatter has no translations, so the message is the
    /// cleaned, joined token list (or the backend document's `error` field).
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_formatter(tokens, &ErrorFormatter::default())
    }

    /// Create a failure from server tokens, deriving the message with `formatter`.
    pub fn with_formatter<I, S>(tokens: I, formatter: &ErrorFormatter<'_>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let error_description: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let error_text = formatter.format(&error_description);
        Self {
            error_description,
            error_text,
            source: None,
        }
    }

    /// Wrap a local fault under `message`, using the default formatter.
    pub fn wrap(
        message: impl Into<String>,
        cause: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self::wrap_with(message, cause, &ErrorFormatter::default())
    }

    /// Wrap a local fault under `message`.
    ///
    /// The message becomes the sole token and runs through the same
    /// derivation as a server fault, so a message that happens to be a
    /// catalog code is translated.
    pub fn wrap_with(
        message: impl Into<String>,
        cause: impl Into<Box<dyn Error + Send + Sync>>,
        formatter: &ErrorFormatter<'_>,
    ) -> Self {
        let mut failure = Self::with_formatter([message.into()], formatter);
        failure.source = Some(cause.into());
        failure
    }

    /// Rebuild a failure from its persisted parts without recomputing the message.
    pub fn from_parts(error_description: Vec<String>, error_text: Option<String>) -> Self {
        Self {
            error_description,
            error_text,
            source: None,
        }
    }

    /// The raw tokens, in server order.
    #[inline]
    pub fn error_description(&self) -> &[String] {
        &self.error_description
    }

    /// The derived display message; `None` only when there were no tokens.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.error_text.as_deref()
    }

    /// The error code (token 0), if any.
    #[inline]
    pub fn code(&self) -> Option<&str> {
        self.error_description.first().map(String::as_str)
    }

    /// The tokens after the code.
    #[inline]
    pub fn arguments(&self) -> &[String] {
        self.error_description.get(1..).unwrap_or_default()
    }

    /// Whether the error code is exactly `code`.
    #[inline]
    pub fn has_code(&self, code: &str) -> bool {
        self.code() == Some(code)
    }

    /// Borrowed structured view for logging.
    ///
    /// The view cannot outlive the failure, so token data is never retained
    /// past the zeroizing drop.
    #[inline]
    pub fn log_entry(&self) -> FailureLog<'_> {
        FailureLog {
            code: self.code(),
            arguments: self.arguments(),
            message: self.message(),
            wrapped: self.source.is_some(),
        }
    }
}

impl From<Vec<String>> for Failure {
    fn from(tokens: Vec<String>) -> Self {
        Self::new(tokens)
    }
}

impl PartialEq for Failure {
    /// Equal when tokens and message match; wrapped causes are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.error_description == other.error_description && self.error_text == other.error_text
    }
}

impl Eq for Failure {}

impl Zeroize for Failure {
    fn zeroize(&mut self) {
        self.error_description.zeroize();
        self.error_text.zeroize();
    }
}

impl Drop for Failure {
    fn drop(&mut self) {
        // The cause may hold its own copies of sensitive data.
        self.source = None;
        self.zeroize();
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("error_description", &self.error_description)
            .field("error_text", &self.error_text)
            .field("source", &self.source.as_ref().map(|_| "<PRESENT>"))
            .finish()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().unwrap_or_default())
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}
