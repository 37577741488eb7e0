use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorPreferences};

use crate::{
    document::Document,
    errors::{ErrorKind, KyaniteError, KyaniteResult},
    filter::Filter,
    filtered_stream::FilteredStream,
    query::compile,
    sorted_stream::SortedStream,
    DocumentCursor,
};

use super::FindOptions;

/// Runs a compiled filter and find options against a document collection.
///
/// The pipeline applies its stages in a fixed order: filtering first, then sorting,
/// then skip, then limit. Filtering keeps the input's relative order among matching
/// documents, and sorting is stable, so documents that compare equal under every sort
/// key stay in filter order. Skip drops from the front of the sorted sequence and
/// limit caps what remains.
///
/// String sort keys are compared with an ICU collator built from the options'
/// collator preferences. All other values use their natural total order, with null
/// (and missing fields, which read as null) ordered before everything else.
///
/// The input slice is never modified; the cursor yields fresh copies of the matching
/// documents.
///
/// # Arguments
///
/// * `documents` - The collection to query
/// * `filter` - The compiled document predicate
/// * `find_options` - Sorting and pagination options
///
/// # Returns
///
/// A [DocumentCursor] over the matching documents
pub fn find_documents(
    documents: &[Document],
    filter: Filter,
    find_options: &FindOptions,
) -> KyaniteResult<DocumentCursor> {
    let source: Vec<KyaniteResult<Document>> = documents.iter().cloned().map(Ok).collect();
    let mut raw_stream: Box<dyn Iterator<Item = KyaniteResult<Document>>> =
        Box::new(FilteredStream::new(Box::new(source.into_iter()), filter));

    if let Some(sort_by) = &find_options.sort_by {
        let sort_order = sort_by.sorting_order();
        if !sort_order.is_empty() {
            let collator_preferences = find_options
                .collator_preferences
                .clone()
                .unwrap_or(CollatorPreferences::default());
            let collator_options = find_options
                .collator_options
                .clone()
                .unwrap_or(CollatorOptions::default());
            let collator =
                Collator::try_new(collator_preferences, collator_options).map_err(|_| {
                    KyaniteError::new(
                        "Failed to create collator for sorting - check collator preferences and options",
                        ErrorKind::InternalError,
                    )
                })?;
            raw_stream = Box::new(SortedStream::new(raw_stream, sort_order, Some(collator)));
        }
    }

    if find_options.skip.is_some() || find_options.limit.is_some() {
        let skip = find_options.skip.unwrap_or(0);
        let limit = find_options.limit.unwrap_or(u64::MAX);
        raw_stream = Box::new(raw_stream.skip(skip as usize).take(limit as usize));
    }

    Ok(DocumentCursor::new(raw_stream))
}

/// Filters a document collection with a declarative query specification.
///
/// The query specification is compiled with [compile](crate::query::compile) and the
/// resulting filter is run through [find_documents] together with the given options.
/// An empty specification matches every document.
///
/// # Arguments
///
/// * `documents` - The collection to query
/// * `query_spec` - A document mapping field names to matchers
/// * `find_options` - Sorting and pagination options
///
/// # Returns
///
/// The matching documents after sorting, skip, and limit
///
/// # Examples
///
/// ```rust,ignore
/// use kyanite::{common::SortOrder, doc, find::{filter_documents, order_by}};
///
/// let matches = filter_documents(
///     &documents,
///     &doc! { category: "tools" },
///     &order_by("price", SortOrder::Ascending).limit(10),
/// )?;
/// ```
pub fn filter_documents(
    documents: &[Document],
    query_spec: &Document,
    find_options: &FindOptions,
) -> KyaniteResult<Vec<Document>> {
    let filter = compile(query_spec)?;
    let mut cursor = find_documents(documents, filter, find_options)?;
    cursor.to_vec()
}
