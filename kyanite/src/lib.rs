#![allow(
    dead_code,
    unused_imports,
    clippy::invisible_characters,
    clippy::approx_constant,
)]
//! # Kyanite - In-Memory Document Query and Update Engine
//!
//! Kyanite is a lightweight document matching, filtering, and update library
//! written in Rust. It evaluates declarative query and update specifications
//! against schemaless documents held in memory, with no storage engine underneath.
//!
//! ## Key Features
//!
//! - **Declarative Queries**: Query specifications compile once into reusable filters
//! - **Rich Filters**: Equality, array element matching, and logical combinators
//! - **Sorted Finds**: Stable multi-field ordering with locale-aware string comparison
//! - **Pagination**: Skip and limit applied after filtering and sorting
//! - **Copy-Based Updates**: `$set`, `$push`, and `$pull` operators that never touch their input
//! - **Persistent Documents**: Structure-sharing documents with cheap clones
//!
//! ## Quick Start
//!
//! ```rust
//! use kyanite::common::SortOrder;
//! use kyanite::{doc, find::{filter_documents, order_by}, update::update_document};
//!
//! # fn main() -> kyanite::errors::KyaniteResult<()> {
//! let documents = vec![
//!     doc! { name: "bolt", qty: 40, tags: ["small"] },
//!     doc! { name: "washer", qty: 10, tags: ["small", "steel"] },
//!     doc! { name: "plate", qty: 60, tags: ["large"] },
//! ];
//!
//! // Filter and sort with a declarative query specification
//! let small = filter_documents(
//!     &documents,
//!     &doc! { tags: { "$elemMatch": { "$": "small" } } },
//!     &order_by("qty", SortOrder::Ascending),
//! )?;
//! assert_eq!(small.len(), 2);
//!
//! // Updates return a new document and leave the input untouched
//! let restocked = update_document(&documents[1], &doc! { "$set": { qty: 25 } })?;
//! assert_eq!(restocked.get("qty")?, 25.into());
//! assert_eq!(documents[1].get("qty")?, 10.into());
//! # Ok(())
//! # }
//! ```
//!
//! ## Copy Semantics
//!
//! Documents are backed by a persistent ordered map. Cloning a document is cheap,
//! and every update builds its result from the input through structural sharing.
//! Query compilation, filtering, and updates never modify the documents they are
//! given, so one document slice can back any number of concurrent readers.
//!
//! ## Module Organization
//!
//! - [`common`] - Shared value types, sort orders, streams, and utilities
//! - [`document`] - The document type and its construction macros
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Query filters and filter providers
//! - [`find`] - Filtering, sorting, and pagination over document slices
//! - [`query`] - Query specification compilation and value matching
//! - [`update`] - Declarative document update operators

use crate::common::*;
use crate::errors::{ErrorKind, KyaniteError, KyaniteResult};
use std::sync::LazyLock;

pub mod common;
pub mod document;
pub mod errors;
pub mod filter;
pub mod find;
pub mod query;
pub mod update;

pub(crate) static FIELD_SEPARATOR: LazyLock<Atomic<String>> =
    LazyLock::new(|| atomic(".".to_string()));

/// Returns the current field separator string for nested document access.
pub fn field_separator() -> String {
    FIELD_SEPARATOR.read_with(|it| it.clone())
}

/// Sets the field separator for nested document access.
///
/// The separator applies process wide. Keys containing it are treated as paths
/// into nested documents and arrays by document reads and writes.
///
/// # Arguments
///
/// * `separator` - The new separator string, which must not be empty
pub fn set_field_separator(separator: &str) -> KyaniteResult<()> {
    if separator.is_empty() {
        log::error!("Field separator cannot be empty");
        return Err(KyaniteError::new(
            "Field separator cannot be empty",
            ErrorKind::InvalidOperation,
        ));
    }

    FIELD_SEPARATOR.write_with(|it| *it = separator.to_string());
    Ok(())
}
