mod document_cursor;
pub(crate) mod filtered_stream;
pub(crate) mod sorted_stream;

pub use document_cursor::*;
