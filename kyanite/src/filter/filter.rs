use crate::document::Document;
use crate::errors::ErrorKind;
use crate::errors::KyaniteError;
use crate::errors::KyaniteResult;
use crate::Value;
use std::any::Any;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

use super::AllFilter;
use super::AndFilter;
use super::ElementMatchFilter;
use super::EqualsFilter;
use super::NotFilter;
use super::OrFilter;

/// Trait for implementing custom filters.
///
/// A `FilterProvider` defines how to evaluate filter conditions on documents.
/// Every predicate the engine runs, whether compiled from a query spec or built
/// through the fluent API, goes through this trait.
pub trait FilterProvider: Any + Send + Sync + Display {
    /// Applies the filter to a document and returns whether it matches.
    ///
    /// # Arguments
    ///
    /// * `entry` - The document to evaluate
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the document matches the filter, `Ok(false)` otherwise
    fn apply(&self, entry: &Document) -> KyaniteResult<bool>;

    /// Checks if this filter operates on a specific field.
    #[inline]
    fn has_field(&self) -> bool {
        false
    }

    /// Gets the field name this filter operates on.
    ///
    /// # Returns
    ///
    /// The field name, or an error if the filter doesn't operate on a specific field
    fn get_field_name(&self) -> KyaniteResult<String> {
        log::error!("Filter {} does not have field name", self);
        Err(KyaniteError::new(
            "Filter does not have field name",
            ErrorKind::FilterError,
        ))
    }

    /// Sets the field name for this filter.
    fn set_field_name(&self, _field_name: String) -> KyaniteResult<()> {
        Ok(())
    }

    /// Gets the field value this filter operates on.
    fn get_field_value(&self) -> KyaniteResult<Option<Value>> {
        log::debug!("Filter {} does not have field value", self);
        Err(KyaniteError::new(
            "Filter does not have field value",
            ErrorKind::FilterError,
        ))
    }

    /// Sets the field value for this filter.
    fn set_field_value(&self, _field_value: Value) -> KyaniteResult<()> {
        Ok(())
    }

    fn logical_filters(&self) -> KyaniteResult<Vec<Filter>> {
        Err(KyaniteError::new(
            "Filter is not a logical filters",
            ErrorKind::FilterError,
        ))
    }

    fn as_any(&self) -> &dyn Any;
}

/// A query filter for selecting documents.
///
/// `Filter` encapsulates filter logic through a provider pattern that supports
/// custom filtering implementations. Filters are used with [crate::find::find_documents]
/// and similar functions to query documents with various conditions.
///
/// # Filter Composition
///
/// Filters can be composed using logical operators:
/// - `and(other)` - Combines with another filter using logical AND
/// - `or(other)` - Combines with another filter using logical OR
/// - `not()` - Negates the filter using logical NOT
///
/// # Responsibilities
///
/// * **Document Matching**: Evaluates whether documents match filter conditions
/// * **Field Operations**: Supports filtering by specific field names and values
/// * **Logical Composition**: Enables combining multiple filters with AND/OR/NOT
#[derive(Clone)]
pub struct Filter {
    inner: Arc<dyn FilterProvider>,
}

impl Filter {
    /// Creates a new filter from a filter provider implementation.
    ///
    /// # Arguments
    ///
    /// * `inner` - A type implementing `FilterProvider`
    ///
    /// # Returns
    ///
    /// A new `Filter` instance wrapping the provider
    pub fn new<T: FilterProvider + 'static>(inner: T) -> Self {
        Filter {
            inner: Arc::new(inner),
        }
    }

    /// Combines this filter with another using logical AND.
    ///
    /// # Arguments
    ///
    /// * `filter` - The other filter to combine
    ///
    /// # Returns
    ///
    /// A new `Filter` representing `self AND filter`
    pub fn and(&self, filter: Filter) -> Self {
        Filter::new(AndFilter::new(vec![filter, self.clone()]))
    }

    /// Combines this filter with another using logical OR.
    ///
    /// # Arguments
    ///
    /// * `filter` - The other filter to combine
    ///
    /// # Returns
    ///
    /// A new `Filter` representing `self OR filter`
    pub fn or(&self, filter: Filter) -> Self {
        Filter::new(OrFilter::new(vec![filter, self.clone()]))
    }

    /// Negates this filter using logical NOT.
    ///
    /// # Returns
    ///
    /// A new `Filter` representing `NOT self`
    pub fn not(&self) -> Self {
        Filter::new(NotFilter::new(self.clone()))
    }
}

impl Display for Filter {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Deref for Filter {
    type Target = Arc<dyn FilterProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Creates a filter that matches all documents.
///
/// This filter accepts every document without applying any filtering conditions.
///
/// # Returns
///
/// A `Filter` that matches all documents
pub fn all() -> Filter {
    Filter::new(AllFilter {})
}

/// Combines multiple filters using logical AND.
///
/// Creates a filter that matches documents satisfying all of the provided filters.
///
/// # Arguments
///
/// * `filters` - A vector of filters to combine
///
/// # Returns
///
/// A `Filter` representing the AND of all filters
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::new(AndFilter::new(filters))
}

/// Combines multiple filters using logical OR.
///
/// Creates a filter that matches documents satisfying at least one of the provided filters.
///
/// # Arguments
///
/// * `filters` - A vector of filters to combine
///
/// # Returns
///
/// A `Filter` representing the OR of all filters
pub fn or(filters: Vec<Filter>) -> Filter {
    Filter::new(OrFilter::new(filters))
}

/// Negates a filter using logical NOT.
///
/// Creates a filter that matches documents not matching the provided filter.
///
/// # Arguments
///
/// * `filter` - The filter to negate
///
/// # Returns
///
/// A `Filter` representing `NOT filter`
pub fn not(filter: Filter) -> Filter {
    Filter::new(NotFilter::new(filter))
}

pub(crate) fn is_all_filter(filter: &Filter) -> bool {
    filter.as_any().is::<AllFilter>()
}

pub(crate) fn is_and_filter(filter: &Filter) -> bool {
    filter.as_any().is::<AndFilter>()
}

pub(crate) fn is_or_filter(filter: &Filter) -> bool {
    filter.as_any().is::<OrFilter>()
}

pub(crate) fn is_equals_filter(filter: &Filter) -> bool {
    filter.as_any().is::<EqualsFilter>()
}

pub(crate) fn is_element_match_filter(filter: &Filter) -> bool {
    filter.as_any().is::<ElementMatchFilter>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::filter::field;
    use crate::Value;
    use std::fmt::Formatter;

    struct MockFilter;

    impl Display for MockFilter {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "MockFilter")
        }
    }

    impl FilterProvider for MockFilter {
        fn apply(&self, _entry: &Document) -> KyaniteResult<bool> {
            Ok(true)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_filter_apply() {
        let filter = Filter::new(MockFilter);
        let doc = Document::new();
        assert_eq!(filter.apply(&doc).unwrap(), true);
    }

    #[test]
    fn test_filter_get_field_name() {
        let filter = Filter::new(MockFilter);
        assert!(filter.get_field_name().is_err());
    }

    #[test]
    fn test_filter_set_field_name() {
        let filter = Filter::new(MockFilter);
        assert!(filter.set_field_name("test".to_string()).is_ok());
    }

    #[test]
    fn test_filter_get_field_value() {
        let filter = Filter::new(MockFilter);
        assert!(filter.get_field_value().is_err());
    }

    #[test]
    fn test_filter_set_field_value() {
        let filter = Filter::new(MockFilter);
        assert!(filter.set_field_value(Value::I32(42)).is_ok());
    }

    #[test]
    fn test_filter_has_field() {
        let filter = Filter::new(MockFilter);
        assert!(!filter.has_field());
    }

    #[test]
    fn test_filter_logical_filters() {
        let filter = Filter::new(MockFilter);
        assert!(filter.logical_filters().is_err());
    }

    #[test]
    fn test_all_filter() {
        let filter = all();
        let doc = Document::new();
        assert!(filter.apply(&doc).unwrap());
    }

    #[test]
    fn test_and_filter() {
        let filter = and(vec![all(), all()]);
        let doc = Document::new();
        assert!(filter.apply(&doc).is_ok());
    }

    #[test]
    fn test_or_filter() {
        let filter = or(vec![all(), all()]);
        let doc = Document::new();
        assert!(filter.apply(&doc).is_ok());
    }

    #[test]
    fn test_not_filter() {
        let filter = not(all());
        let doc = Document::new();
        assert_eq!(filter.apply(&doc).unwrap(), false);
    }

    #[test]
    fn test_filter_and_method() {
        let filter = all().and(not(all()));
        let doc = Document::new();
        assert_eq!(filter.apply(&doc).unwrap(), false);
    }

    #[test]
    fn test_filter_or_method() {
        let filter = not(all()).or(all());
        let doc = Document::new();
        assert_eq!(filter.apply(&doc).unwrap(), true);
    }

    #[test]
    fn test_filter_not_method() {
        let filter = all().not();
        let doc = Document::new();
        assert_eq!(filter.apply(&doc).unwrap(), false);
    }

    #[test]
    fn test_is_all_filter() {
        let filter = all();
        assert!(is_all_filter(&filter));
    }

    #[test]
    fn test_is_and_filter() {
        let filter = and(vec![all(), all()]);
        assert!(is_and_filter(&filter));
    }

    #[test]
    fn test_is_or_filter() {
        let filter = or(vec![all(), all()]);
        assert!(is_or_filter(&filter));
    }

    #[test]
    fn test_is_equals_filter() {
        let filter = field("field").eq("value");
        assert!(is_equals_filter(&filter));
    }

    #[test]
    fn test_is_element_match_filter() {
        let filter = field("field").elem_match(all());
        assert!(is_element_match_filter(&filter));
    }
}
