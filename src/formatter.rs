//! Display message derivation for remote faults.
//!
//! Given the ordered tokens of a server fault, produce one readable string:
//!
//! 1. Look up a template for the error code (token 0).
//! 2. Without a template, trim every token, drop the blank ones and join the
//!    rest with `" - "`. The server occasionally sends spurious newlines.
//! 3. With a template, render it from tokens 1.. (the code itself is never an
//!    argument). If rendering fails, the message is the raw code.
//! 4. Storage-backend failures may then replace the message with the `error`
//!    field of the JSON document in token 2.
//!
//! Nothing here fails outward. Every internal fault degrades to the best
//! message available and is reported as a `tracing` event.

use crate::catalog::{EmptyCatalog, MessageCatalog};
use crate::codes;
use crate::document::{DocumentParser, JsonDocumentParser};
use crate::template;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, trace};

/// Separator between tokens in the untranslated message.
pub const SEPARATOR: &str = " - ";

/// Message derivation over an injected catalog and document parser.
///
/// The formatter only borrows its collaborators and is `Copy`, so one
/// catalog can serve any number of threads.
///
/// # Example
///
/// ```rust
/// use remote_failure::{ErrorFormatter, StaticCatalog};
///
/// let catalog = StaticCatalog::new().with("HOST_OFFLINE", "Host {0} is offline.");
/// let formatter = ErrorFormatter::with_catalog(&catalog);
///
/// assert_eq!(
///     formatter.format(&["HOST_OFFLINE", "xs-01"]).as_deref(),
///     Some("Host xs-01 is offline.")
/// );
/// assert_eq!(
///     formatter.format(&["VDI_IN_USE", " vdi-3 \n", ""]).as_deref(),
///     Some("VDI_IN_USE - vdi-3")
/// );
/// ```
#[derive(Clone, Copy)]
pub struct ErrorFormatter<'a> {
    catalog: &'a dyn MessageCatalog,
    parser: &'a dyn DocumentParser,
}

impl<'a> ErrorFormatter<'a> {
    /// Create a formatter over explicit collaborators.
    pub const fn new(catalog: &'a dyn MessageCatalog, parser: &'a dyn DocumentParser) -> Self {
        Self { catalog, parser }
    }

    /// Create a formatter over `catalog` with the JSON document parser.
    pub const fn with_catalog(catalog: &'a dyn MessageCatalog) -> Self {
        Self::new(catalog, &JsonDocumentParser)
    }

    /// Derive the display message for `tokens`.
    ///
    /// Returns `None` only when `tokens` is empty.
    pub fn format<S: AsRef<str>>(&self, tokens: &[S]) -> Option<String> {
        let code = tokens.first()?.as_ref();

        let message = match self.lookup(code) {
            None => join_clean(tokens),
            Some(pattern) => match template::render(&pattern, &tokens[1..]) {
                Ok(rendered) => rendered,
                Err(error) => {
                    debug!(code, %error, "template rejected fault arguments, using raw code");
                    code.to_owned()
                }
            },
        };

        Some(self.backend_message(tokens).unwrap_or(message))
    }

    /// Template for `code`. Catalog faults count as a miss.
    fn lookup(&self, code: &str) -> Option<Cow<'a, str>> {
        match self.catalog.template(code) {
            Ok(template) => template,
            Err(error) => {
                debug!(code, %error, "message catalog lookup failed, treating as untranslated");
                None
            }
        }
    }

    /// The `error` field of a storage-backend failure's embedded document.
    fn backend_message<S: AsRef<str>>(&self, tokens: &[S]) -> Option<String> {
        let code = tokens.first()?.as_ref();
        if !codes::is_backend_failure(code) {
            return None;
        }
        let raw = tokens.get(codes::BACKEND_DOCUMENT_INDEX)?.as_ref();

        match self.parser.parse(raw) {
            Ok(document) => document
                .string_field(codes::BACKEND_DOCUMENT_FIELD)
                .map(str::to_owned),
            Err(error) => {
                trace!(code, %error, "backend failure carries no structured document");
                None
            }
        }
    }
}

impl Default for ErrorFormatter<'static> {
    fn default() -> Self {
        Self::new(&EmptyCatalog, &JsonDocumentParser)
    }
}

impl fmt::Debug for ErrorFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorFormatter").finish_non_exhaustive()
    }
}

/// Trim every token, drop blanks, join with [`SEPARATOR`].
fn join_clean<S: AsRef<str>>(tokens: &[S]) -> String {
    let bits: SmallVec<[&str; 8]> = tokens
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .collect();
    bits.join(SEPARATOR)
}
