//! Query pipeline over in-memory document collections.
//!
//! The pipeline runs fixed stages in order: filter, sort, skip, limit. It
//! never modifies the input collection; results come back either as a
//! replayable [DocumentCursor](crate::common::DocumentCursor) or as a freshly built
//! vector of documents.
//!
//! # Examples
//!
//! ```rust,ignore
//! use kyanite::{doc, find::{filter_documents, order_by}, SortOrder};
//!
//! let documents = vec![doc! { x: 10 }, doc! { x: 20 }];
//! let result = filter_documents(
//!     &documents,
//!     &doc! { x: 10 },
//!     &order_by("x", SortOrder::Ascending),
//! )?;
//! ```

mod find_options;
mod pipeline;

pub use find_options::*;
pub use pipeline::*;
