//! Shared building blocks used across the crate.
//!
//! This module hosts the dynamic [Value] type, sort order definitions,
//! sortable field specifications, operator name constants, and the internal
//! document streams that the query pipeline is assembled from.

mod constants;
mod fields;
mod sort_order;
mod value;

pub(crate) mod stream;
pub mod util;

pub use constants::*;
pub use fields::*;
pub use sort_order::*;
pub use stream::*;
pub use util::*;
pub use value::*;
