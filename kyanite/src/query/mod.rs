//! Query specification compilation and value matching.
//!
//! A query specification is a plain [Document](crate::document::Document) mapping
//! field names to matchers. A matcher is either a literal value, compared by deep
//! structural equality, or an `$elemMatch` operator object carrying a subquery for
//! array element matching. [compile] lowers such a specification to a
//! [Filter](crate::filter::Filter), and [value_matches] exposes the single-value
//! matching rule that both query evaluation and `$pull` updates share.
//!
//! # Examples
//!
//! ```rust,ignore
//! use kyanite::{doc, query::compile};
//!
//! let filter = compile(&doc! { x: 10 })?;
//! assert!(filter.apply(&doc! { x: 10, y: 20 })?);
//! ```

mod compiler;
mod matcher;

pub use compiler::*;
pub use matcher::*;
