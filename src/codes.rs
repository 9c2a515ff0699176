//! Well-known server error codes.
//!
//! The server reports a fault as an ordered list of strings whose first
//! element is the error code. Codes are plain strings compared by value;
//! there is no type hierarchy behind them.
//!
//! # Families
//!
//! - **INTERNAL_ERROR**: the server failed for reasons it does not describe further
//! - **MESSAGE_PARAMETER_COUNT_MISMATCH**: the call carried the wrong number of parameters
//! - **SR_BACKEND_FAILURE\***: a storage backend failed; codes in this family
//!   share the prefix and may carry a JSON document as their third token
//!
//! # Example
//!
//! ```rust
//! use remote_failure::codes;
//!
//! assert!(codes::is_backend_failure("SR_BACKEND_FAILURE_47"));
//! assert!(!codes::is_backend_failure(codes::INTERNAL_ERROR));
//! ```

/// The server hit an unexpected internal condition.
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// The request carried a different number of parameters than the call expects.
pub const MESSAGE_PARAMETER_COUNT_MISMATCH: &str = "MESSAGE_PARAMETER_COUNT_MISMATCH";

/// Prefix shared by every storage-backend failure code.
pub const SR_BACKEND_FAILURE: &str = "SR_BACKEND_FAILURE";

/// Position of the embedded JSON document within a backend failure.
pub const BACKEND_DOCUMENT_INDEX: usize = 2;

/// Field of the embedded document holding the user-facing text.
pub const BACKEND_DOCUMENT_FIELD: &str = "error";

/// Check whether `code` belongs to the storage-backend failure family.
///
/// Empty codes never match.
#[inline]
pub fn is_backend_failure(code: &str) -> bool {
    !code.is_empty() && code.starts_with(SR_BACKEND_FAILURE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_family_matches_prefix() {
        assert!(is_backend_failure("SR_BACKEND_FAILURE"));
        assert!(is_backend_failure("SR_BACKEND_FAILURE_1200"));
    }

    #[test]
    fn backend_family_rejects_others() {
        assert!(!is_backend_failure(""));
        assert!(!is_backend_failure("SR_BACKEND"));
        assert!(!is_backend_failure("sr_backend_failure"));
        assert!(!is_backend_failure(MESSAGE_PARAMETER_COUNT_MISMATCH));
    }
}
