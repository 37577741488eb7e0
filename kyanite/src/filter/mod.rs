//! Query filters for selecting documents.
//!
//! This module provides the filtering API used by the query pipeline in
//! Kyanite. Filters can be combined using logical operators and are applied
//! to documents one at a time.
//!
//! # Creating Filters
//!
//! Filters are created using the fluent API:
//! - `field("name").eq("Alice")` - equality checks
//! - `field("name").ne("Bob")` - inequality checks
//! - `field("scores").elem_match(field("$").eq(5))` - array element matching
//! - `all()` - match all documents
//! - `field("name").eq("Alice").and(field("age").eq(30))` - logical AND
//!
//! # Examples
//!
//! ```rust,ignore
//! use kyanite::filter::{field, all};
//!
//! // Simple filters using fluent API
//! let name_filter = field("name").eq("Alice");
//! let tag_filter = field("tags").elem_match(field("$").eq("sale"));
//!
//! // Fluent API with logical combinations
//! let filter = field("age").eq(30).and(field("status").eq("active"));
//!
//! // Using filters with the pipeline
//! let cursor = find_documents(&documents, filter, &FindOptions::default())?;
//! ```
//!
//! # Supported Operators
//!
//! - **Equality**: `eq`, `ne`
//! - **Array**: `elemMatch`
//! - **Logical**: `and`, `or`, `not`
//! - **Special**: `all` (match all)

mod filter;
mod fluent;

mod basic_filters;
mod element_filter;
mod logical_filters;

pub use basic_filters::*;
pub use element_filter::*;
pub use filter::*;
pub use fluent::*;
pub use logical_filters::*;
