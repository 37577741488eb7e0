//! Document update operations.
//!
//! This module applies declarative update specifications to documents. An update
//! specification is itself a document whose top-level fields name update operators
//! and whose values are field maps for those operators, for example
//! `{$set: {qty: 20}, $push: {tags: "sale"}}`.
//!
//! Updates are copy based. [update_document] returns a new document built from the
//! input with the operators applied; the input document is never changed. Operators
//! form the closed [UpdateOperator] set, and specification entries naming anything
//! else are skipped.

mod engine;
mod operators;

pub use engine::*;
pub use operators::*;
