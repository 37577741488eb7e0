use crate::Value;

use super::{
    Filter,
    {ElementMatchFilter, EqualsFilter, NotEqualsFilter},
};

/// Creates a fluent filter builder for the specified field name.
///
/// This function initializes a filter builder that allows chaining of filter operations
/// on a specific field. The returned `FluentFilter` provides methods for building equality
/// and array element filters.
///
/// # Arguments
///
/// * `field_name` - The name of the field to filter on
///
/// # Returns
///
/// A `FluentFilter` builder for constructing field-specific filters
pub fn field(field_name: &str) -> FluentFilter {
    FluentFilter {
        field_name: field_name.to_string(),
    }
}

/// A fluent builder for constructing filters on a specific field.
///
/// `FluentFilter` provides chainable methods for creating filters with various conditions
/// including equality, inequality, and array element matching. Each method returns a
/// `Filter` that can be passed to the query pipeline or combined with other filters.
///
/// # Responsibilities
///
/// * **Filter Construction**: Builds filter conditions using fluent method chaining
/// * **Equality Operations**: Provides equality and inequality comparison methods
/// * **Array Operations**: Matches individual elements of array fields
pub struct FluentFilter {
    field_name: String,
}

impl FluentFilter {
    /// Creates a filter that matches documents where the field equals the specified value.
    ///
    /// Equality is the deep structural equality of [Value]: documents compare by their
    /// full field maps and arrays compare element by element.
    ///
    /// # Arguments
    ///
    /// * `value` - The value to match against
    ///
    /// # Returns
    ///
    /// A `Filter` matching documents where the field equals the value
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(EqualsFilter::new(self.field_name, value.into()))
    }

    /// Creates a filter that matches documents where the field does not equal the specified value.
    ///
    /// # Arguments
    ///
    /// * `value` - The value to exclude from matches
    ///
    /// # Returns
    ///
    /// A `Filter` matching documents where the field differs from the value
    #[inline]
    pub fn ne<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(NotEqualsFilter::new(self.field_name, value.into()))
    }

    /// Creates a filter that matches documents where at least one array element satisfies the filter.
    ///
    /// Document elements are matched against the inner filter directly. Scalar elements are
    /// matched by addressing them with the special `$` field name inside the inner filter.
    /// A field that is missing or not an array never matches.
    ///
    /// # Arguments
    ///
    /// * `filter` - The filter to apply to each array element
    ///
    /// # Returns
    ///
    /// A `Filter` matching documents where an array element satisfies the condition
    #[inline]
    pub fn elem_match(self, filter: Filter) -> Filter {
        Filter::new(ElementMatchFilter::new(self.field_name, filter))
    }
}
