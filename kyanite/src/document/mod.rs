//! Schemaless documents, the unit of data every engine operation works on.
//!
//! A [Document] is a key-value map where keys are strings and values are [crate::common::Value]
//! objects. Documents support nested fields using a configurable separator (default: ".").
//!
//! ```rust,ignore
//! use kyanite::document::Document;
//!
//! let mut doc = Document::new();
//! doc.put("name", "Alice")?;
//! doc.put("address.city", "New York")?;
//! doc.put("age", 30i64)?;
//! ```
//!
//! Documents are backed by a persistent ordered map, so cloning one is O(1) and
//! mutating a clone never disturbs the original. Query specs and update specs are
//! themselves plain documents, built the same way or with the [crate::doc] macro.

mod document;

pub use document::*;
