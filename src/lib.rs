//! # Remote Failure
//!
//! Human-readable errors for faults reported by a remote management server.
//!
//! The server reports a fault as an ordered list of strings: an error code
//! followed by arguments or diagnostic fragments. [`Failure`] keeps those
//! tokens and derives a single display message from them, once, when the
//! failure is built.
//!
//! ## Message Derivation
//!
//! 1. **Translated**: if the [`MessageCatalog`] holds a template for the
//!    code, render it with the remaining tokens as numbered arguments
//! 2. **Untranslated**: otherwise trim every token, drop the blank ones and
//!    join the rest with `" - "`
//! 3. **Broken template**: if the arguments do not fit the template, the
//!    message is the raw code
//! 4. **Storage backend**: `SR_BACKEND_FAILURE*` faults whose third token is
//!    a JSON object take the object's `error` field as the message
//!
//! Every internal fault along the way (catalog errors, template mismatches,
//! malformed documents) degrades to the best message available. Building a
//! `Failure` never fails and never panics.
//!
//! ## Quick Start
//!
//! ```rust
//! use remote_failure::{ErrorFormatter, Failure, StaticCatalog};
//!
//! let catalog = StaticCatalog::from_json_str(r#"{
//!     "HOST_OFFLINE": "Host {0} is offline."
//! }"#).unwrap();
//! let formatter = ErrorFormatter::with_catalog(&catalog);
//!
//! let failure = Failure::with_formatter(["HOST_OFFLINE", "xs-01"], &formatter);
//! assert_eq!(failure.to_string(), "Host xs-01 is offline.");
//!
//! let failure = Failure::with_formatter(["VM_MISSING_PV_DRIVERS", " vm-3\n", ""], &formatter);
//! assert_eq!(failure.to_string(), "VM_MISSING_PV_DRIVERS - vm-3");
//! ```
//!
//! ## Persistence
//!
//! A `Failure` serializes as `errorDescription` plus `errorText`. Restoring it
//! keeps the saved message exactly; nothing is recomputed against the catalog
//! that happens to be loaded.
//!
//! ## Features
//!
//! - `trusted_debug`: untruncated log rendering for trusted environments (debug builds only)

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::result;

pub mod catalog;
pub mod codes;
pub mod document;
pub mod failure;
pub mod formatter;
pub mod logging;
pub mod template;

pub use catalog::{CatalogError, EmptyCatalog, MessageCatalog, StaticCatalog};
pub use document::{Document, DocumentError, DocumentParser, JsonDocumentParser};
pub use failure::Failure;
pub use formatter::{ErrorFormatter, SEPARATOR};
pub use logging::FailureLog;
pub use template::TemplateError;

/// Type alias for Results using our error type.
pub type Result<T> = result::Result<T, Failure>;
