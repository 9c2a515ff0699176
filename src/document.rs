//! Structured documents embedded in error tokens.
//!
//! Storage-backend failures carry a JSON object as their third token, with
//! the user-facing text in its `error` field:
//!
//! ```text
//! [
//!     "SR_BACKEND_FAILURE",
//!     "TransportException",
//!     "{\"error\": \"Unable to connect to iSCSI service on target\"}"
//! ]
//! ```
//!
//! A token that does not parse is not an error condition; it just means the
//! fault is not the nested-document kind.

use serde_json::{Map, Value};
use std::fmt;

/// Parser for embedded documents.
pub trait DocumentParser: Send + Sync {
    /// Parse `raw` into a document.
    fn parse(&self, raw: &str) -> Result<Document, DocumentError>;
}

impl<P: DocumentParser + ?Sized> DocumentParser for &P {
    fn parse(&self, raw: &str) -> Result<Document, DocumentError> {
        (**self).parse(raw)
    }
}

impl<P: DocumentParser + ?Sized> DocumentParser for Box<P> {
    fn parse(&self, raw: &str) -> Result<Document, DocumentError> {
        (**self).parse(raw)
    }
}

/// A parsed document supporting field access by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// Wrap an already-parsed JSON object.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Return the field `name` if it holds a string.
    ///
    /// Numbers, booleans, nulls, arrays and objects all yield `None`.
    #[inline]
    pub fn string_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Whether the document has a field called `name`, of any type.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

/// Reasons a token is not a structured document.
#[derive(Debug)]
pub enum DocumentError {
    /// The token is not valid JSON.
    Syntax(serde_json::Error),
    /// The token is valid JSON but not an object.
    NotAnObject,
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(e) => write!(f, "not a JSON document: {}", e),
            Self::NotAnObject => f.write_str("JSON document is not an object"),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(e) => Some(e),
            Self::NotAnObject => None,
        }
    }
}

/// Default parser backed by `serde_json`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JsonDocumentParser;

impl DocumentParser for JsonDocumentParser {
    fn parse(&self, raw: &str) -> Result<Document, DocumentError> {
        match serde_json::from_str::<Value>(raw).map_err(DocumentError::Syntax)? {
            Value::Object(fields) => Ok(Document { fields }),
            _ => Err(DocumentError::NotAnObject),
        }
    }
}
