//! Structured log view of a failure.
//!
//! # Properties
//!
//! - Borrows from `Failure` with an explicit lifetime
//! - Cannot outlive the failure that created it
//! - No heap allocation in accessors
//! - Rendered fields are truncated to bound log volume
//!
//! The view exists only for the duration of the logging call. Token data
//! stays owned by the failure and is zeroized when the failure drops.

use std::borrow::Cow;
use std::fmt;

/// Maximum length for any individual field in formatted output.
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings.
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Placeholder for an absent code or message.
const ABSENT: &str = "-";

/// Structured log entry borrowing from a [`Failure`](crate::Failure).
///
/// # Example
///
/// ```rust
/// use remote_failure::Failure;
///
/// let failure = Failure::new(["VDI_IN_USE", "vdi-3"]);
/// let mut line = String::new();
/// failure.log_entry().write_to(&mut line).unwrap();
/// assert_eq!(line, "[VDI_IN_USE] message='VDI_IN_USE - vdi-3' args='vdi-3'");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FailureLog<'a> {
    pub code: Option<&'a str>,
    pub arguments: &'a [String],
    pub message: Option<&'a str>,
    pub wrapped: bool,
}

impl<'a> FailureLog<'a> {
    /// Write the entry as a single line without intermediate buffers.
    ///
    /// Format: `[CODE] message='...' args='a' 'b'`, with ` [WRAPPED]` after
    /// the code when the failure wraps a local cause. Each field is truncated
    /// to 1024 bytes on a character boundary.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "[{}]{} message='{}'",
            truncate_with_indicator(self.code.unwrap_or(ABSENT)),
            if self.wrapped { " [WRAPPED]" } else { "" },
            truncate_with_indicator(self.message.unwrap_or(ABSENT))
        )?;

        if let Some((first, rest)) = self.arguments.split_first() {
            write!(f, " args='{}'", truncate_with_indicator(first))?;
            for arg in rest {
                write!(f, " '{}'", truncate_with_indicator(arg))?;
            }
        }

        Ok(())
    }

    /// Record the entry as a `tracing` warning.
    ///
    /// Fields: `code`, `text`, `args` (argument count) and `wrapped`.
    pub fn emit(&self) {
        tracing::warn!(
            code = self.code.unwrap_or(ABSENT),
            text = %truncate_with_indicator(self.message.unwrap_or(ABSENT)),
            args = self.arguments.len(),
            wrapped = self.wrapped,
            "remote failure"
        );
    }

    /// Untruncated rendering for trusted debugging sessions.
    ///
    /// Only available with the `trusted_debug` feature in debug builds.
    #[cfg(all(feature = "trusted_debug", debug_assertions))]
    pub fn format_for_trusted_debug(&self) -> String {
        let mut output = format!(
            "[{}]{} message='{}'",
            self.code.unwrap_or(ABSENT),
            if self.wrapped { " [WRAPPED]" } else { "" },
            self.message.unwrap_or(ABSENT)
        );
        for arg in self.arguments {
            output.push_str(&format!(" '{}'", arg));
        }
        output
    }

    #[inline]
    pub const fn code(&self) -> Option<&'a str> {
        self.code
    }

    #[inline]
    pub const fn arguments(&self) -> &'a [String] {
        self.arguments
    }

    #[inline]
    pub const fn message(&self) -> Option<&'a str> {
        self.message
    }

    #[inline]
    pub const fn is_wrapped(&self) -> bool {
        self.wrapped
    }
}

impl fmt::Display for FailureLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Truncate a string for display to bound log line length.
///
/// Returns a `Cow` to avoid allocation when no truncation is needed.
fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}
