//! Localized message catalogs.
//!
//! A catalog maps a server error code to a template whose numbered slots are
//! filled with the remaining error tokens. The catalog is injected into
//! [`ErrorFormatter`](crate::ErrorFormatter) rather than held globally, so
//! the formatting logic can be exercised with any table.
//!
//! # Contract
//!
//! A lookup yields one of three outcomes:
//!
//! - `Ok(Some(template))`: a translation exists
//! - `Ok(None)`: no translation for this code
//! - `Err(CatalogError)`: the catalog itself is broken
//!
//! The formatter treats the last two identically. A broken catalog must never
//! turn a remote fault into a different failure.
//!
//! # Loading
//!
//! [`StaticCatalog`] loads from a flat JSON object of code to template:
//!
//! ```rust
//! use remote_failure::{MessageCatalog, StaticCatalog};
//!
//! let catalog = StaticCatalog::from_json_str(r#"{
//!     "VM_BAD_POWER_STATE": "The VM must be {1} to perform this operation, but it is {2}."
//! }"#).unwrap();
//!
//! assert!(catalog.template("VM_BAD_POWER_STATE").unwrap().is_some());
//! assert!(catalog.template("HOST_OFFLINE").unwrap().is_none());
//! ```

use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::io;

/// Lookup service from error code to localized template.
///
/// Implementations must be safe to read from many threads at once.
pub trait MessageCatalog: Send + Sync {
    /// Resolve the template registered for `code`.
    fn template(&self, code: &str) -> Result<Option<Cow<'_, str>>, CatalogError>;
}

impl<C: MessageCatalog + ?Sized> MessageCatalog for &C {
    fn template(&self, code: &str) -> Result<Option<Cow<'_, str>>, CatalogError> {
        (**self).template(code)
    }
}

impl<C: MessageCatalog + ?Sized> MessageCatalog for Box<C> {
    fn template(&self, code: &str) -> Result<Option<Cow<'_, str>>, CatalogError> {
        (**self).template(code)
    }
}

impl<C: MessageCatalog + ?Sized> MessageCatalog for std::sync::Arc<C> {
    fn template(&self, code: &str) -> Result<Option<Cow<'_, str>>, CatalogError> {
        (**self).template(code)
    }
}

/// Catalog failures.
#[derive(Debug)]
pub enum CatalogError {
    /// The catalog source is not valid JSON or is not a JSON object.
    Malformed(serde_json::Error),
    /// A catalog entry maps to something other than a string.
    InvalidEntry { code: String },
    /// The catalog source could not be read.
    Io(io::Error),
    /// The backing store could not serve the lookup.
    Unavailable(Cow<'static, str>),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(e) => write!(f, "catalog is not a JSON object of strings: {}", e),
            Self::InvalidEntry { code } => {
                write!(f, "catalog entry '{}' is not a string", code)
            }
            Self::Io(e) => write!(f, "catalog could not be read: {}", e),
            Self::Unavailable(reason) => write!(f, "catalog unavailable: {}", reason),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Malformed(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::InvalidEntry { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Self::Io(e.into())
        } else {
            Self::Malformed(e)
        }
    }
}

impl From<io::Error> for CatalogError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Catalog without any translations.
///
/// Every fault renders through the joined-token fallback.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmptyCatalog;

impl MessageCatalog for EmptyCatalog {
    #[inline]
    fn template(&self, _code: &str) -> Result<Option<Cow<'_, str>>, CatalogError> {
        Ok(None)
    }
}

/// In-memory catalog, read-only once built.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StaticCatalog {
    templates: HashMap<String, String>,
}

impl StaticCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `template` for `code`, replacing any previous entry.
    pub fn insert(&mut self, code: impl Into<String>, template: impl Into<String>) -> &mut Self {
        self.templates.insert(code.into(), template.into());
        self
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, code: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(code, template);
        self
    }

    /// Load a catalog from a JSON object mapping codes to templates.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Malformed`] if the text is not a JSON object
    /// - [`CatalogError::InvalidEntry`] if any value is not a string
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Load a catalog from a reader yielding a JSON object.
    ///
    /// # Errors
    ///
    /// As [`from_json_str`](Self::from_json_str), plus [`CatalogError::Io`]
    /// when reading fails.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, CatalogError> {
        Self::from_value(serde_json::from_reader(reader)?)
    }

    fn from_value(value: Value) -> Result<Self, CatalogError> {
        let Value::Object(entries) = value else {
            return Err(CatalogError::Malformed(serde::de::Error::custom(
                "expected a JSON object",
            )));
        };

        let mut templates = HashMap::with_capacity(entries.len());
        for (code, template) in entries {
            match template {
                Value::String(template) => {
                    templates.insert(code, template);
                }
                _ => return Err(CatalogError::InvalidEntry { code }),
            }
        }
        Ok(Self { templates })
    }

    /// Number of registered templates.
    #[inline]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog holds no templates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl MessageCatalog for StaticCatalog {
    fn template(&self, code: &str) -> Result<Option<Cow<'_, str>>, CatalogError> {
        Ok(self.templates.get(code).map(|t| Cow::Borrowed(t.as_str())))
    }
}

impl<C, T> FromIterator<(C, T)> for StaticCatalog
where
    C: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, T)>>(iter: I) -> Self {
        Self {
            templates: iter
                .into_iter()
                .map(|(code, template)| (code.into(), template.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog_never_matches() {
        assert!(EmptyCatalog.template("INTERNAL_ERROR").unwrap().is_none());
        assert!(EmptyCatalog.template("").unwrap().is_none());
    }

    #[test]
    fn static_catalog_lookup_is_exact() {
        let catalog = StaticCatalog::new().with("HOST_OFFLINE", "Host {0} is offline.");
        assert_eq!(
            catalog.template("HOST_OFFLINE").unwrap().as_deref(),
            Some("Host {0} is offline.")
        );
        assert!(catalog.template("host_offline").unwrap().is_none());
        assert!(catalog.template("HOST_OFFLINE ").unwrap().is_none());
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let mut catalog = StaticCatalog::new();
        catalog.insert("A", "first").insert("A", "second");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.template("A").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn collects_from_pairs() {
        let catalog: StaticCatalog = [("A", "a"), ("B", "b")].into_iter().collect();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn loads_json_object() {
        let catalog =
            StaticCatalog::from_json_str(r#"{"A": "alpha {0}", "B": "beta"}"#).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.template("A").unwrap().as_deref(), Some("alpha {0}"));
    }

    #[test]
    fn loads_from_reader() {
        let source = br#"{"A": "alpha"}"#;
        let catalog = StaticCatalog::from_reader(&source[..]).unwrap();
        assert_eq!(catalog.template("A").unwrap().as_deref(), Some("alpha"));
    }

    #[test]
    fn rejects_non_object_json() {
        assert!(matches!(
            StaticCatalog::from_json_str(r#"["A", "B"]"#),
            Err(CatalogError::Malformed(_))
        ));
        assert!(matches!(
            StaticCatalog::from_json_str("not json"),
            Err(CatalogError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_non_string_entry() {
        let err = StaticCatalog::from_json_str(r#"{"A": "ok", "B": 7}"#).unwrap_err();
        match err {
            CatalogError::InvalidEntry { code } => assert_eq!(code, "B"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn references_and_boxes_are_catalogs() {
        let catalog = StaticCatalog::new().with("A", "a");
        let by_ref: &dyn MessageCatalog = &catalog;
        assert!(by_ref.template("A").unwrap().is_some());

        let boxed: Box<dyn MessageCatalog> = Box::new(catalog);
        assert!(boxed.template("A").unwrap().is_some());
    }

    #[test]
    fn error_display() {
        let err = CatalogError::InvalidEntry { code: "X".into() };
        assert_eq!(err.to_string(), "catalog entry 'X' is not a string");
        let err = CatalogError::Unavailable("bundle not loaded".into());
        assert_eq!(err.to_string(), "catalog unavailable: bundle not loaded");
    }
}
