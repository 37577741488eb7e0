mod document_utils;
mod type_utils;

pub use document_utils::*;
pub use type_utils::*;
